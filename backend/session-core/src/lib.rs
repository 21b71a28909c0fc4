pub mod api_client;
pub mod auth_api;
pub mod config;
pub mod error;
pub mod example_api;
pub mod orchestrator;
pub mod session;

#[cfg(test)]
mod tests;

pub const API_HOSTNAME: &str = "api.example.com";
pub const DEFAULT_API_BASE_URL: &str = const_format::concatcp!("https://", API_HOSTNAME);
