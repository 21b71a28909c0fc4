//! Authentication orchestration.
//!
//! [`AuthOrchestrator`] is the only component that talks to both the remote
//! auth service and the session store. It sequences login, logout, token
//! refresh and profile lookup, and decides which session transition each
//! outcome produces.
//!
//! # Races
//!
//! Refresh and profile lookups capture the session epoch before calling
//! out and only apply their result if the epoch is unchanged on return. A
//! logout (or a new login) that completes while a refresh is in flight
//! therefore always wins; the stale refresh is reported as
//! [`AuthError::RefreshSuperseded`]. A successful refresh advances the
//! epoch too, so a concurrent refresh that fails later cannot log out the
//! session that was just renewed.

mod status;

use crate::api_client::ApiClient;
use crate::auth_api::{AuthApi, HttpAuthApi, LoginRequest, LoginResponse};
use crate::config::ClientConfig;
use crate::error::{AuthError, CoreError};
use crate::session::{SessionAction, SessionState, SessionStore, User};

use status::{InFlight, RequestStatus};

use common::RedactedToken;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use log::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct AuthOrchestrator<A> {
    api: A,
    session: SessionStore,
    status: Arc<RequestStatus>,
}

impl AuthOrchestrator<HttpAuthApi> {
    /// Wire a REST-backed orchestrator around `session`.
    pub fn from_config(config: &ClientConfig, session: SessionStore) -> Result<Self, CoreError> {
        let client = ApiClient::from_config(config, session.clone())?;
        Ok(Self::new(HttpAuthApi::new(client), session))
    }
}

impl<A: AuthApi> AuthOrchestrator<A> {
    pub fn new(api: A, session: SessionStore) -> Self {
        Self {
            api,
            session,
            status: Arc::new(RequestStatus::default()),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // ============================================
    // READ INTERFACE
    // ============================================

    /// Current `{is_authenticated, user, token, refresh_token}` view.
    pub fn auth(&self) -> Arc<SessionState> {
        self.session.auth()
    }

    pub fn token(&self) -> Option<RedactedToken> {
        self.session.token()
    }

    pub fn refresh_token(&self) -> Option<RedactedToken> {
        self.session.refresh_token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn is_logging_in(&self) -> bool {
        self.status.logging_in.load(Ordering::SeqCst)
    }

    pub fn is_logging_out(&self) -> bool {
        self.status.logging_out.load(Ordering::SeqCst)
    }

    /// Message of the most recent failed login, cleared when a new login starts.
    pub fn login_error(&self) -> Option<String> {
        self.status.login_error()
    }

    // ============================================
    // OPERATIONS
    // ============================================

    /// Authenticate with email and password.
    ///
    /// On success the returned tokens and profile become the session. On
    /// failure the session is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`] if the service rejects the credentials
    /// - [`AuthError::Network`] / [`AuthError::Server`] for anything else
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let _in_flight = InFlight::start(&self.status.logging_in);
        self.status.set_login_error(None);

        let request = LoginRequest::new(email, password);

        match self.api.login(&request).await {
            Ok(response) => {
                self.session
                    .dispatch_new_session(SessionAction::SetCredentials {
                        token: response.token.clone(),
                        refresh_token: response.refresh_token.clone(),
                        user: Some(response.user.clone()),
                    });
                info!("Login succeeded for user {}", response.user.id);
                Ok(response)
            }
            Err(e) => {
                let error = AuthError::from_login_failure(e);
                warn!("Login failed: {}", error);
                self.status.set_login_error(Some(error.to_string()));
                Err(error)
            }
        }
    }

    /// End the session.
    ///
    /// The remote call is best effort. The local session is cleared on every
    /// exit path, including when this future is dropped before completion.
    pub async fn logout(&self) {
        let _in_flight = InFlight::start(&self.status.logging_out);
        let _clear = ClearSessionOnDrop {
            session: &self.session,
        };

        match self.api.logout().await {
            Ok(()) => info!("Remote logout succeeded"),
            Err(e) => warn!("Logout failed, clearing local session anyway: {}", e),
        }
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::RefreshTokenMissing`] if no refresh token is held; nothing is sent
    /// - [`AuthError::RefreshRejected`] if the service refuses the token; the session is cleared
    /// - [`AuthError::Network`] / [`AuthError::Server`]; the session is cleared
    /// - [`AuthError::RefreshSuperseded`] if the session changed while the call was in flight
    pub async fn refresh_access_token(&self) -> Result<RedactedToken, AuthError> {
        let snapshot = self.session.snapshot();
        let Some(refresh_token) = snapshot.state.refresh_token().cloned() else {
            return Err(AuthError::refresh_token_missing());
        };

        match self.api.refresh(&refresh_token).await {
            Ok(response) => {
                let token = response.token.clone();
                let applied = self.session.advance_if_epoch(
                    snapshot.epoch,
                    SessionAction::SetCredentials {
                        token: response.token,
                        refresh_token: response.refresh_token,
                        user: None,
                    },
                );

                if !applied {
                    warn!("Discarding refreshed token: session changed during refresh");
                    return Err(AuthError::refresh_superseded());
                }

                debug!("Access token refreshed");
                Ok(token)
            }
            Err(e) => {
                let error = AuthError::from_refresh_failure(e);
                warn!("Token refresh failed, ending session: {}", error);

                if !self
                    .session
                    .dispatch_if_epoch(snapshot.epoch, SessionAction::Logout)
                {
                    debug!("Session already replaced, leaving it in place");
                }

                Err(error)
            }
        }
    }

    /// Fetch the profile for the current token and store it in the session.
    ///
    /// # Errors
    ///
    /// Propagates the service error; the session is not modified.
    pub async fn current_user(&self) -> Result<User, AuthError> {
        let epoch = self.session.epoch();
        let user = self
            .api
            .current_user()
            .await
            .map_err(AuthError::from_api)?;

        if !self
            .session
            .dispatch_if_epoch(epoch, SessionAction::SetUser(Some(user.clone())))
        {
            debug!("Session changed during profile lookup, profile not stored");
        }

        Ok(user)
    }
}

/// Clears the session when dropped.
struct ClearSessionOnDrop<'a> {
    session: &'a SessionStore,
}

impl Drop for ClearSessionOnDrop<'_> {
    fn drop(&mut self) {
        self.session.logout();
        info!("Local session cleared");
    }
}
