//! CLI module for the access token service
//!
//! Provides subcommands for the two ways the process runs:
//! - `serve`: the HTTP API plus the browser test form
//! - `sweep`: one-shot removal of expired token records

pub mod serve;
pub mod sweep;

use clap::{Parser, Subcommand};

/// Access token service - issues and lists opaque bearer access tokens
#[derive(Parser)]
#[command(name = "access-token-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Delete expired token records and exit
    Sweep,
}
