//! Copy-on-write session store.
//!
//! The current state lives behind an `Arc`; every write builds a complete
//! new [`SessionState`] and replaces the `Arc` under a short write lock.
//! Readers clone the `Arc` and keep a consistent value for as long as they
//! hold it.
//!
//! # Session epoch
//!
//! Alongside the state the store keeps a monotonic epoch. It advances when
//! a new session is established (login), when its tokens are rotated
//! (refresh) and when the session is cleared.
//! Long-running operations capture the epoch before suspending and use
//! [`SessionStore::dispatch_if_epoch`] so a completion that belongs to a
//! session which no longer exists is dropped instead of resurrecting it.

use crate::session::state::{SessionAction, SessionState, User};

use common::RedactedToken;

use std::sync::{Arc, PoisonError, RwLock};

use log::debug;

/// A consistent view of the store: the state plus the epoch it belongs to.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub state: Arc<SessionState>,
    pub epoch: u64,
}

/// Shared handle to the session state.
///
/// This type is `Clone`; all clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    current: Arc<RwLock<SessionSnapshot>>,
}

impl SessionStore {
    /// Create a store holding the anonymous session at epoch 0.
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(SessionSnapshot {
                state: Arc::new(SessionState::anonymous()),
                epoch: 0,
            })),
        }
    }

    // ============================================
    // READ ACCESS
    // ============================================

    /// State and epoch read together.
    pub fn snapshot(&self) -> SessionSnapshot {
        // A poisoned lock still holds a complete snapshot: writers only ever
        // assign whole values.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The whole current state.
    pub fn auth(&self) -> Arc<SessionState> {
        self.snapshot().state
    }

    pub fn token(&self) -> Option<RedactedToken> {
        self.auth().token().cloned()
    }

    pub fn refresh_token(&self) -> Option<RedactedToken> {
        self.auth().refresh_token().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.auth().user().cloned()
    }

    pub fn epoch(&self) -> u64 {
        self.snapshot().epoch
    }

    // ============================================
    // WRITE ACCESS
    // ============================================

    /// Apply an action. `Logout` advances the epoch.
    pub fn dispatch(&self, action: SessionAction) {
        self.write(|_| true, action, false);
    }

    /// Apply an action that establishes a new session, advancing the epoch.
    pub fn dispatch_new_session(&self, action: SessionAction) {
        self.write(|_| true, action, true);
    }

    /// Apply an action only if the epoch still equals `expected`.
    ///
    /// Returns `false` (and leaves the state untouched) when the session was
    /// replaced or cleared since `expected` was read.
    pub fn dispatch_if_epoch(&self, expected: u64, action: SessionAction) -> bool {
        self.write(|epoch| epoch == expected, action, false)
    }

    /// Like [`SessionStore::dispatch_if_epoch`], but advances the epoch when applied.
    ///
    /// Used for token rotation: any other operation that captured the old
    /// epoch is then treated as stale.
    pub fn advance_if_epoch(&self, expected: u64, action: SessionAction) -> bool {
        self.write(|epoch| epoch == expected, action, true)
    }

    pub fn set_credentials(
        &self,
        token: RedactedToken,
        refresh_token: RedactedToken,
        user: Option<User>,
    ) {
        self.dispatch(SessionAction::SetCredentials {
            token,
            refresh_token,
            user,
        });
    }

    pub fn set_token(&self, token: RedactedToken) {
        self.dispatch(SessionAction::SetToken(token));
    }

    pub fn set_refresh_token(&self, refresh_token: RedactedToken) {
        self.dispatch(SessionAction::SetRefreshToken(refresh_token));
    }

    pub fn set_user(&self, user: Option<User>) {
        self.dispatch(SessionAction::SetUser(user));
    }

    pub fn logout(&self) {
        self.dispatch(SessionAction::Logout);
    }

    fn write(
        &self,
        precondition: impl FnOnce(u64) -> bool,
        action: SessionAction,
        new_session: bool,
    ) -> bool {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if !precondition(current.epoch) {
            debug!(
                "Dropping stale session action {} (epoch {} is no longer current)",
                action.name(),
                current.epoch
            );
            return false;
        }

        let name = action.name();
        let advances_epoch = new_session || matches!(action, SessionAction::Logout);
        let next = current.state.apply(action);

        *current = SessionSnapshot {
            state: Arc::new(next),
            epoch: if advances_epoch {
                current.epoch + 1
            } else {
                current.epoch
            },
        };

        debug!(
            "Session action applied: {} (authenticated={}, epoch={})",
            name,
            current.state.is_authenticated(),
            current.epoch
        );
        true
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
