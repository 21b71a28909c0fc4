use crate::helpers::{mount_login_ok, orchestrator};

use session_core::error::AuthError;
use session_core::session::{SessionState, User};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// End-to-end session transitions over HTTP
// ============================================================================

#[tokio::test]
async fn given_valid_credentials_when_login_then_session_matches_server_response() {
    // GIVEN: A server that accepts a@b.com / pw
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    let orchestrator = orchestrator(&server);

    // WHEN: Logging in
    orchestrator.login("a@b.com", "pw").await.unwrap();

    // THEN: {token: t1, refreshToken: r1, isAuthenticated: true, user: {...}}
    let auth = orchestrator.auth();
    assert_eq!(auth.token().map(|t| t.as_str()), Some("t1"));
    assert_eq!(auth.refresh_token().map(|t| t.as_str()), Some("r1"));
    assert!(auth.is_authenticated());
    assert_eq!(
        auth.user(),
        Some(&User {
            id: "1".to_string(),
            email: "a@b.com".to_string(),
            name: "A".to_string(),
        })
    );
}

#[tokio::test]
async fn given_wrong_password_when_login_then_invalid_credentials_and_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;
    let orchestrator = orchestrator(&server);

    let result = orchestrator.login("a@b.com", "nope").await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials { .. })));
    assert_eq!(*orchestrator.auth(), SessionState::anonymous());
}

/// **VALUE**: Verifies the refresh request uses the held refresh token and the bearer of the
/// current access token, and that the response replaces both tokens.
#[tokio::test]
async fn given_logged_in_when_refresh_then_new_tokens_and_user_unchanged() {
    // GIVEN: A logged-in session
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("authorization", "Bearer t1"))
        .and(body_json(json!({ "refreshToken": "r1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": "t2", "refreshToken": "r2" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let orchestrator = orchestrator(&server);
    orchestrator.login("a@b.com", "pw").await.unwrap();
    let user_before = orchestrator.user();

    // WHEN: Refreshing
    let token = orchestrator.refresh_access_token().await.unwrap();

    // THEN: Tokens replaced, user kept
    assert_eq!(token.as_str(), "t2");
    let auth = orchestrator.auth();
    assert_eq!(auth.token().map(|t| t.as_str()), Some("t2"));
    assert_eq!(auth.refresh_token().map(|t| t.as_str()), Some("r2"));
    assert!(auth.is_authenticated());
    assert_eq!(orchestrator.user(), user_before);
}

#[tokio::test]
async fn given_logged_in_when_refresh_returns_401_then_anonymous_and_error_propagated() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&server)
        .await;
    let orchestrator = orchestrator(&server);
    orchestrator.login("a@b.com", "pw").await.unwrap();

    let result = orchestrator.refresh_access_token().await;

    assert!(matches!(result, Err(AuthError::RefreshRejected { .. })));
    assert_eq!(*orchestrator.auth(), SessionState::anonymous());
}

#[tokio::test]
async fn given_anonymous_when_refresh_then_missing_token_and_no_request_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let orchestrator = orchestrator(&server);

    let result = orchestrator.refresh_access_token().await;

    assert!(matches!(result, Err(AuthError::RefreshTokenMissing { .. })));
    // MockServer verifies expect(0) on drop
}

/// **VALUE**: Verifies that logout clears the session even when the server is too slow.
///
/// **WHY THIS MATTERS**: Offline or hung backends must not trap the user in a signed-in
/// state on this device.
#[tokio::test]
async fn given_logged_in_when_remote_logout_times_out_then_still_anonymous() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
        .mount(&server)
        .await;
    let orchestrator = orchestrator(&server);
    orchestrator.login("a@b.com", "pw").await.unwrap();

    orchestrator.logout().await;

    assert_eq!(*orchestrator.auth(), SessionState::anonymous());
}

#[tokio::test]
async fn given_logged_in_when_remote_logout_errors_then_still_anonymous() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let orchestrator = orchestrator(&server);
    orchestrator.login("a@b.com", "pw").await.unwrap();

    orchestrator.logout().await;
    orchestrator.logout().await;

    assert_eq!(*orchestrator.auth(), SessionState::anonymous());
}

#[tokio::test]
async fn given_logged_in_when_current_user_then_profile_replaces_stored_user() {
    let server = MockServer::start().await;
    mount_login_ok(&server).await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "1", "email": "a@b.com", "name": "Renamed" })),
        )
        .mount(&server)
        .await;
    let orchestrator = orchestrator(&server);
    orchestrator.login("a@b.com", "pw").await.unwrap();

    let user = orchestrator.current_user().await.unwrap();

    assert_eq!(user.name, "Renamed");
    assert_eq!(orchestrator.user().map(|u| u.name), Some("Renamed".to_string()));
}
