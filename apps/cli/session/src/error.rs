use common::ErrorLocation;

use session_core::error::CoreError;

use thiserror::Error;

/// Errors surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum SessionCliError {
    /// Error from this binary (logger, directories)
    #[error("Session CLI Error: {message} {location}")]
    Cli {
        message: String,
        location: ErrorLocation,
    },

    /// Error from session-core (config, transport, auth)
    #[error(transparent)]
    Core(#[from] CoreError),
}
