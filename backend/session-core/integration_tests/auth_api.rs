use crate::helpers::{api_client, login_body};

use session_core::auth_api::{AuthApi, HttpAuthApi, LoginRequest};
use session_core::error::ApiError;
use session_core::session::SessionStore;

use common::RedactedToken;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// ============================================================================
// Wire format and bearer attachment for the auth endpoints
// ============================================================================

/// **VALUE**: Verifies the login request body and response decoding.
///
/// **BUG THIS CATCHES**: Would catch `refresh_token` being sent or read in snake_case.
#[tokio::test]
async fn given_login_endpoint_when_login_called_then_posts_credentials_and_decodes_camel_case() {
    // GIVEN: A server expecting the exact login body
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "a@b.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .expect(1)
        .mount(&server)
        .await;
    let api = HttpAuthApi::new(api_client(&server, SessionStore::new()));

    // WHEN: Logging in
    let response = api
        .login(&LoginRequest::new("a@b.com", "pw"))
        .await
        .unwrap();

    // THEN: Fields decoded
    assert_eq!(response.token.as_str(), "t1");
    assert_eq!(response.refresh_token.as_str(), "r1");
    assert_eq!(response.user.email, "a@b.com");
}

/// **VALUE**: Verifies that anonymous requests carry no Authorization header.
///
/// **WHY THIS MATTERS**: Sending `Bearer ` with an empty value makes some servers answer
/// 401 even for public endpoints like login.
#[tokio::test]
async fn given_anonymous_session_when_request_sent_then_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(|request: &Request| {
            if request.headers.contains_key("authorization") {
                ResponseTemplate::new(400)
            } else {
                ResponseTemplate::new(200).set_body_json(login_body())
            }
        })
        .mount(&server)
        .await;
    let api = HttpAuthApi::new(api_client(&server, SessionStore::new()));

    let result = api.login(&LoginRequest::new("a@b.com", "pw")).await;

    assert!(result.is_ok(), "anonymous login must not send a bearer token");
}

#[tokio::test]
async fn given_authenticated_session_when_request_sent_then_bearer_token_attached() {
    // GIVEN: A session holding t1
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "1", "email": "a@b.com", "name": "A" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let session = SessionStore::new();
    session.set_token(RedactedToken::new("t1"));
    let api = HttpAuthApi::new(api_client(&server, session));

    // WHEN: Fetching the profile
    let user = api.current_user().await.unwrap();

    // THEN: The mock matched only because the header was present
    assert_eq!(user.id, "1");
}

#[tokio::test]
async fn given_refresh_endpoint_when_refresh_called_then_sends_refresh_token_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refreshToken": "r1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": "t2", "refreshToken": "r2" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    let api = HttpAuthApi::new(api_client(&server, SessionStore::new()));

    let response = api.refresh(&RedactedToken::new("r1")).await.unwrap();

    assert_eq!(response.token.as_str(), "t2");
    assert_eq!(response.refresh_token.as_str(), "r2");
}

#[tokio::test]
async fn given_logout_endpoint_when_body_is_not_json_then_still_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204).set_body_string("bye"))
        .mount(&server)
        .await;
    let api = HttpAuthApi::new(api_client(&server, SessionStore::new()));

    assert!(api.logout().await.is_ok());
}

#[tokio::test]
async fn given_error_status_when_request_sent_then_status_error_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;
    let api = HttpAuthApi::new(api_client(&server, SessionStore::new()));

    let result = api.login(&LoginRequest::new("a@b.com", "bad")).await;

    match result {
        Err(ApiError::Status {
            status_code,
            message,
            ..
        }) => {
            assert_eq!(status_code.0, 401);
            assert_eq!(message, "Unauthorized");
        }
        other => panic!("Expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_malformed_body_when_login_called_then_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "t1" })))
        .mount(&server)
        .await;
    let api = HttpAuthApi::new(api_client(&server, SessionStore::new()));

    let result = api.login(&LoginRequest::new("a@b.com", "pw")).await;

    assert!(matches!(result, Err(ApiError::Json { .. })));
}

#[tokio::test]
async fn given_slow_server_when_request_exceeds_timeout_then_network_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
        .mount(&server)
        .await;
    let api = HttpAuthApi::new(api_client(&server, SessionStore::new()));

    let result = api.logout().await;

    let error = result.expect_err("request should time out");
    assert!(error.is_timeout(), "Expected timeout, got {error:?}");
}
