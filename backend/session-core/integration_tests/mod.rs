mod auth_api;
mod example_api;
mod helpers;
mod orchestrator;
