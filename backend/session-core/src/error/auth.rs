//! Errors surfaced by the authentication orchestrator.
//!
//! Transport failures are classified per operation: a 401 means
//! "wrong password" on login but "session is dead" on refresh.

use crate::error::api::ApiError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error("Invalid credentials: HTTP {status_code} - {message} {location}")]
    InvalidCredentials {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("No refresh token available {location}")]
    RefreshTokenMissing { location: ErrorLocation },

    #[error("Refresh token rejected: HTTP {status_code} - {message} {location}")]
    RefreshRejected {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Refresh result discarded, session changed while it was in flight {location}")]
    RefreshSuperseded { location: ErrorLocation },

    #[error("Network failure: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        location: ErrorLocation,
    },

    #[error("Auth service error: {message} {location}")]
    Server {
        status_code: Option<HttpStatusCode>,
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn refresh_token_missing() -> Self {
        AuthError::RefreshTokenMissing {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn refresh_superseded() -> Self {
        AuthError::RefreshSuperseded {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Classify a failed login call.
    #[track_caller]
    pub fn from_login_failure(error: ApiError) -> Self {
        match error {
            ApiError::Status {
                status_code,
                message,
                ..
            } if status_code.is_credential_rejection() => AuthError::InvalidCredentials {
                status_code,
                message,
                location: ErrorLocation::from(Location::caller()),
            },
            other => Self::from_api(other),
        }
    }

    /// Classify a failed refresh call. Any 4xx invalidates the session.
    #[track_caller]
    pub fn from_refresh_failure(error: ApiError) -> Self {
        match error {
            ApiError::Status {
                status_code,
                message,
                ..
            } if status_code.is_client_error() => AuthError::RefreshRejected {
                status_code,
                message,
                location: ErrorLocation::from(Location::caller()),
            },
            other => Self::from_api(other),
        }
    }

    #[track_caller]
    pub fn from_api(error: ApiError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            ApiError::Network {
                message,
                is_timeout,
                ..
            } => AuthError::Network {
                message,
                is_timeout,
                location,
            },
            ApiError::Status {
                status_code,
                message,
                ..
            } => AuthError::Server {
                status_code: Some(status_code),
                message,
                location,
            },
            other => AuthError::Server {
                status_code: None,
                message: other.to_string(),
                location,
            },
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            AuthError::InvalidCredentials { status_code, .. }
            | AuthError::RefreshRejected { status_code, .. } => Some(status_code.0),
            AuthError::Server { status_code, .. } => status_code.map(|s| s.0),
            _ => None,
        }
    }
}
