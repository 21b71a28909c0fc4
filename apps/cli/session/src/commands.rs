//! Command execution.

use crate::cli::{Cli, Command};
use crate::error::SessionCliError;

use session_core::auth_api::AuthApi;
use session_core::config::ClientConfig;
use session_core::error::CoreError;
use session_core::orchestrator::AuthOrchestrator;
use session_core::session::{SessionState, SessionStore};

use common::ErrorLocation;

use std::panic::Location;
use std::path::PathBuf;

use log::{info, warn};

/// Resolve the effective configuration: file, then environment, then `--base-url`.
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig, SessionCliError> {
    let config_dir = match &cli.config_dir {
        Some(dir) => Some(dir.clone()),
        None => ClientConfig::default_config_dir(),
    };

    let config = match config_dir {
        Some(dir) => ClientConfig::load(&dir).map_err(CoreError::from)?,
        None => ClientConfig::default(),
    };

    let mut config = config.with_env_overrides().map_err(CoreError::from)?;

    if let Some(base_url) = &cli.base_url {
        config.api_base_url = base_url.clone();
        config.validate().map_err(CoreError::from)?;
    }

    Ok(config)
}

/// Directory for the log file.
pub fn log_dir(cli: &Cli) -> Result<PathBuf, SessionCliError> {
    let dir = match &cli.log_dir {
        Some(dir) => dir.clone(),
        None => dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("session-cli"),
    };

    std::fs::create_dir_all(&dir).map_err(|e| SessionCliError::Cli {
        message: format!("Failed to create log directory {}: {e}", dir.display()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    Ok(dir)
}

/// Human-readable session summary. Tokens are shown only by length.
pub fn describe_session(state: &SessionState) -> String {
    let token = state
        .token()
        .map(|t| format!("present ({} chars)", t.len()))
        .unwrap_or_else(|| "absent".to_string());
    let refresh_token = state
        .refresh_token()
        .map(|t| format!("present ({} chars)", t.len()))
        .unwrap_or_else(|| "absent".to_string());
    let user = state
        .user()
        .map(|u| format!("{} <{}> (id {})", u.name, u.email, u.id))
        .unwrap_or_else(|| "none".to_string());

    format!(
        "authenticated: {}\ntoken: {}\nrefresh token: {}\nuser: {}",
        state.is_authenticated(),
        token,
        refresh_token,
        user
    )
}

pub async fn run(cli: Cli) -> Result<(), SessionCliError> {
    let config = resolve_config(&cli)?;
    info!("Using backend {}", config.api_base_url);

    match cli.command {
        Command::Config => {
            println!("api_base_url = {:?}", config.api_base_url);
            println!("timeout_secs = {}", config.timeout_secs);
            Ok(())
        }
        Command::Login {
            email,
            password,
            refresh,
            me,
            keep,
        } => {
            let session = SessionStore::new();
            let orchestrator = AuthOrchestrator::from_config(&config, session)?;
            let steps = LoginSteps { refresh, me, keep };

            login_flow(&orchestrator, &email, &password, steps).await
        }
    }
}

/// Optional steps run after a successful `login`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginSteps {
    pub refresh: bool,
    pub me: bool,
    pub keep: bool,
}

/// Log in, run the requested follow-up calls, then log out unless `keep` is set.
///
/// The logout runs even when a follow-up call fails; that failure is
/// returned afterwards.
pub async fn login_flow<A: AuthApi>(
    orchestrator: &AuthOrchestrator<A>,
    email: &str,
    password: &str,
    steps: LoginSteps,
) -> Result<(), SessionCliError> {
    orchestrator
        .login(email, password)
        .await
        .map_err(CoreError::from)?;
    println!("{}\n", describe_session(&orchestrator.auth()));

    let outcome = follow_up(orchestrator, steps).await;
    if let Err(e) = &outcome {
        warn!("Follow-up call failed: {}", e);
    }

    if !steps.keep {
        orchestrator.logout().await;
        println!("after logout:\n{}", describe_session(&orchestrator.auth()));
    }

    outcome
}

async fn follow_up<A: AuthApi>(
    orchestrator: &AuthOrchestrator<A>,
    steps: LoginSteps,
) -> Result<(), SessionCliError> {
    if steps.refresh {
        orchestrator
            .refresh_access_token()
            .await
            .map_err(CoreError::from)?;
        println!("after refresh:\n{}\n", describe_session(&orchestrator.auth()));
    }

    if steps.me {
        orchestrator
            .current_user()
            .await
            .map_err(CoreError::from)?;
        println!("after /auth/me:\n{}\n", describe_session(&orchestrator.auth()));
    }

    Ok(())
}
