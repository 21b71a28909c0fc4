//! Errors raised by the REST transport layer.
//!
//! Status codes are stored directly so callers classify on numbers,
//! never on message text.

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("HTTP Client Error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },

    #[error("Network Error: {message} {location}")]
    Network {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status_code} - {message} {location}")]
    Status {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn status(status_code: u16, body: impl Into<String>) -> Self {
        ApiError::Status {
            status_code: HttpStatusCode(status_code),
            message: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Get HTTP status code if the server answered.
    pub fn status_code(&self) -> Option<HttpStatusCode> {
        match self {
            ApiError::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Network { is_timeout: true, .. })
    }
}

impl From<url::ParseError> for ApiError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        // Categorize BEFORE converting to string
        if let Some(status) = error.status() {
            return ApiError::Status {
                status_code: HttpStatusCode(status.as_u16()),
                message: error.to_string(),
                location,
            };
        }

        if error.is_decode() {
            return ApiError::Json {
                message: error.to_string(),
                location,
            };
        }

        if error.is_builder() {
            return ApiError::Client {
                message: error.to_string(),
                location,
            };
        }

        ApiError::Network {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
