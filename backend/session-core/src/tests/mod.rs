mod config;
mod error;
mod session_state;
