// Unit tests for per-operation error classification.

use crate::error::{ApiError, AuthError};

use common::ErrorLocation;

use std::panic::Location;

fn network(is_timeout: bool) -> ApiError {
    ApiError::Network {
        message: "connection reset".to_string(),
        is_timeout,
        is_connection: !is_timeout,
        location: ErrorLocation::from(Location::caller()),
    }
}

/// **VALUE**: Verifies that only credential-shaped statuses become `InvalidCredentials` on login.
///
/// **WHY THIS MATTERS**: Telling a user "wrong password" during a server outage sends
/// them to reset a password that was fine.
#[test]
fn given_login_failures_when_classified_then_only_auth_statuses_are_invalid_credentials() {
    for code in [400, 401, 403] {
        let error = AuthError::from_login_failure(ApiError::status(code, "nope"));
        assert!(
            matches!(error, AuthError::InvalidCredentials { .. }),
            "{code} should be InvalidCredentials"
        );
        assert_eq!(error.status_code(), Some(code));
    }

    let error = AuthError::from_login_failure(ApiError::status(500, "boom"));
    assert!(matches!(error, AuthError::Server { .. }));
    assert_eq!(error.status_code(), Some(500));

    let error = AuthError::from_login_failure(network(true));
    assert!(matches!(
        error,
        AuthError::Network {
            is_timeout: true,
            ..
        }
    ));
}

#[test]
fn given_refresh_failures_when_classified_then_client_errors_are_rejections() {
    let error = AuthError::from_refresh_failure(ApiError::status(401, "expired"));
    assert!(matches!(error, AuthError::RefreshRejected { .. }));

    let error = AuthError::from_refresh_failure(ApiError::status(422, "malformed"));
    assert!(matches!(error, AuthError::RefreshRejected { .. }));

    let error = AuthError::from_refresh_failure(ApiError::status(502, "bad gateway"));
    assert!(matches!(error, AuthError::Server { .. }));

    let error = AuthError::from_refresh_failure(network(false));
    assert!(matches!(error, AuthError::Network { .. }));
}

#[test]
fn given_decode_failure_when_classified_then_server_error_without_status() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

    let error = AuthError::from_api(ApiError::from(json_error));

    assert!(matches!(
        error,
        AuthError::Server {
            status_code: None,
            ..
        }
    ));
    assert_eq!(error.status_code(), None);
}

#[test]
fn given_errors_when_displayed_then_include_location() {
    let error = AuthError::refresh_token_missing();
    let message = error.to_string();

    assert!(message.starts_with("No refresh token available"));
    assert!(message.contains("error.rs"), "location should point at this file: {message}");
}
