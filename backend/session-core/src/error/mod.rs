pub mod api;
pub mod auth;
pub mod config;

pub use api::ApiError;
pub use auth::AuthError;
pub use config::ConfigError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
