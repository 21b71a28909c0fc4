//! Shared primitives for the session workspace.
//!
//! This crate holds the small types every layer needs: error locations,
//! HTTP status classification and the redacted token wrapper. It has no
//! business logic.
//!
//! ## Architecture
//!
//! - **common** (this crate): shared primitives
//! - **session-core**: session store, auth orchestration, REST clients
//! - **session-cli**: command-line wiring around session-core

pub mod error;
pub mod http_status;
pub mod redacted_token;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;
