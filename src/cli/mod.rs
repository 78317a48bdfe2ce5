//! CLI module
//!
//! Provides subcommands for running the service:
//! - `serve`: run the HTTP server
//! - `migrate`: apply schema migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Simple login API - single-resource account management service
#[derive(Parser)]
#[command(name = "login-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Apply schema migrations and exit
    Migrate,
}
