use crate::cli::{Cli, Command};
use crate::commands::{LoginSteps, describe_session, login_flow, resolve_config};
use crate::error::SessionCliError;

use session_core::auth_api::HttpAuthApi;
use session_core::config::ClientConfig;
use session_core::error::{AuthError, CoreError};
use session_core::orchestrator::AuthOrchestrator;
use session_core::session::{SessionAction, SessionState, SessionStore, User};

use common::RedactedToken;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cli_with(config_dir: &std::path::Path, base_url: Option<&str>) -> Cli {
    Cli {
        config_dir: Some(config_dir.to_path_buf()),
        base_url: base_url.map(str::to_string),
        log_dir: None,
        verbose: 0,
        command: Command::Config,
    }
}

fn orchestrator_for(server: &MockServer) -> AuthOrchestrator<HttpAuthApi> {
    let config = ClientConfig {
        api_base_url: server.uri(),
        ..ClientConfig::default()
    };
    AuthOrchestrator::from_config(&config, SessionStore::new())
        .expect("Failed to build orchestrator")
}

/// Auth backend where login succeeds, `/auth/me` fails and logout must be called once.
async fn backend_with_failing_me() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "t1",
            "refreshToken": "r1",
            "user": { "id": "1", "email": "a@b.com", "name": "A" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    server
}

/// **VALUE**: Verifies that a failing follow-up call still ends the remote session.
///
/// **BUG THIS CATCHES**: Would catch `?` on `--me` returning before the logout, leaving a
/// live server-side session behind every failed run.
#[tokio::test]
async fn given_me_fails_when_login_flow_without_keep_then_logged_out_and_error_returned() {
    // GIVEN: A backend whose profile lookup fails
    let server = backend_with_failing_me().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let orchestrator = orchestrator_for(&server);
    let steps = LoginSteps {
        me: true,
        ..LoginSteps::default()
    };

    // WHEN: The login flow runs
    let result = login_flow(&orchestrator, "a@b.com", "pw", steps).await;

    // THEN: The lookup error surfaces and the session is gone
    assert!(matches!(
        result,
        Err(SessionCliError::Core(CoreError::Auth(AuthError::Server { .. })))
    ));
    assert!(!orchestrator.is_authenticated());
    server.verify().await;
}

#[tokio::test]
async fn given_me_fails_when_login_flow_with_keep_then_session_kept() {
    let server = backend_with_failing_me().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    let orchestrator = orchestrator_for(&server);
    let steps = LoginSteps {
        me: true,
        keep: true,
        ..LoginSteps::default()
    };

    let result = login_flow(&orchestrator, "a@b.com", "pw", steps).await;

    assert!(result.is_err());
    assert!(orchestrator.is_authenticated());
    server.verify().await;
}

/// **VALUE**: Verifies the summary never prints token values.
///
/// **WHY THIS MATTERS**: CLI output ends up in terminals, CI logs and bug reports.
#[test]
fn given_authenticated_state_when_described_then_tokens_hidden_user_shown() {
    let state = SessionState::anonymous().apply(SessionAction::SetCredentials {
        token: RedactedToken::new("secret-access"),
        refresh_token: RedactedToken::new("secret-refresh"),
        user: Some(User {
            id: "1".to_string(),
            email: "a@b.com".to_string(),
            name: "A".to_string(),
        }),
    });

    let text = describe_session(&state);

    assert!(!text.contains("secret-access"));
    assert!(!text.contains("secret-refresh"));
    assert!(text.contains("authenticated: true"));
    assert!(text.contains("token: present (13 chars)"));
    assert!(text.contains("A <a@b.com> (id 1)"));
}

#[test]
fn given_anonymous_state_when_described_then_everything_absent() {
    let text = describe_session(&SessionState::anonymous());

    assert!(text.contains("authenticated: false"));
    assert!(text.contains("token: absent"));
    assert!(text.contains("refresh token: absent"));
    assert!(text.contains("user: none"));
}

#[test]
fn given_base_url_flag_when_resolving_then_flag_wins() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "api_base_url = \"http://from-file.test\"\ntimeout_secs = 5\n",
    )
    .unwrap();

    let config = resolve_config(&cli_with(dir.path(), Some("http://flag.test"))).unwrap();

    assert_eq!(config.api_base_url, "http://flag.test");
    assert_eq!(config.timeout_secs, 5);
}

#[test]
fn given_invalid_base_url_flag_when_resolving_then_config_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = resolve_config(&cli_with(dir.path(), Some("nope")));

    assert!(matches!(
        result,
        Err(SessionCliError::Core(CoreError::Config(_)))
    ));
}
