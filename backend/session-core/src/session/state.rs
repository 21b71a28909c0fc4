use common::RedactedToken;

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user, as returned by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Current authentication status.
///
/// Fields are private so that `is_authenticated` can only ever be derived
/// from the presence of an access token through [`SessionState::apply`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    access_token: Option<RedactedToken>,
    refresh_token: Option<RedactedToken>,
    is_authenticated: bool,
    user: Option<User>,
}

/// Transitions accepted by the session store.
#[derive(Debug, Clone)]
pub enum SessionAction {
    /// Replace both tokens; keep the prior user unless a new one is given.
    SetCredentials {
        token: RedactedToken,
        refresh_token: RedactedToken,
        user: Option<User>,
    },

    /// Replace the access token only.
    SetToken(RedactedToken),

    /// Replace the refresh token only.
    SetRefreshToken(RedactedToken),

    /// Replace the user profile only.
    SetUser(Option<User>),

    /// Clear everything.
    Logout,
}

impl SessionAction {
    /// Short name for log lines (never includes token values).
    pub fn name(&self) -> &'static str {
        match self {
            SessionAction::SetCredentials { .. } => "set_credentials",
            SessionAction::SetToken(_) => "set_token",
            SessionAction::SetRefreshToken(_) => "set_refresh_token",
            SessionAction::SetUser(_) => "set_user",
            SessionAction::Logout => "logout",
        }
    }
}

impl SessionState {
    /// The empty, anonymous session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Compute the state that results from applying `action`.
    pub fn apply(&self, action: SessionAction) -> SessionState {
        match action {
            SessionAction::SetCredentials {
                token,
                refresh_token,
                user,
            } => SessionState {
                access_token: Some(token),
                refresh_token: Some(refresh_token),
                is_authenticated: true,
                user: user.or_else(|| self.user.clone()),
            },
            SessionAction::SetToken(token) => SessionState {
                access_token: Some(token),
                is_authenticated: true,
                ..self.clone()
            },
            SessionAction::SetRefreshToken(refresh_token) => SessionState {
                refresh_token: Some(refresh_token),
                ..self.clone()
            },
            SessionAction::SetUser(user) => SessionState {
                user,
                ..self.clone()
            },
            SessionAction::Logout => SessionState::anonymous(),
        }
    }

    pub fn token(&self) -> Option<&RedactedToken> {
        self.access_token.as_ref()
    }

    pub fn refresh_token(&self) -> Option<&RedactedToken> {
        self.refresh_token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}
