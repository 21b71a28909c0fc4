//! Test helpers for REST integration tests.
//!
//! Builds clients pointed at a wiremock server and mounts the canned
//! auth-service responses most tests need.

use session_core::api_client::ApiClient;
use session_core::auth_api::HttpAuthApi;
use session_core::orchestrator::AuthOrchestrator;
use session_core::session::SessionStore;

use std::time::Duration;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn login_body() -> Value {
    json!({
        "token": "t1",
        "refreshToken": "r1",
        "user": { "id": "1", "email": "a@b.com", "name": "A" }
    })
}

/// Test helper: client with a short timeout so timeout tests stay fast.
pub fn api_client(server: &MockServer, session: SessionStore) -> ApiClient {
    ApiClient::with_timeout(&server.uri(), Duration::from_millis(500), session)
        .expect("Failed to build API client")
}

pub fn orchestrator(server: &MockServer) -> AuthOrchestrator<HttpAuthApi> {
    let session = SessionStore::new();
    let client = api_client(server, session.clone());
    AuthOrchestrator::new(HttpAuthApi::new(client), session)
}

pub async fn mount_login_ok(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(server)
        .await;
}
