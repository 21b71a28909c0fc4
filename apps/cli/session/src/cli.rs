//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "session-cli",
    version,
    about = "Sign in to the REST backend and inspect the session"
)]
pub struct Cli {
    /// Directory containing config.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory for the log file (defaults to the platform cache dir)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in, optionally refresh and fetch the profile, then log out
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Exchange the refresh token once after logging in
        #[arg(long)]
        refresh: bool,

        /// Fetch the current profile from /auth/me
        #[arg(long)]
        me: bool,

        /// Keep the server-side session (skip the final logout)
        #[arg(long)]
        keep: bool,
    },

    /// Print the effective configuration
    Config,
}
