//! CLI definitions and terminal clients for the `fdesk` binary.

pub mod chat;
pub mod inbox;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fdesk", version, about = "Live-chat backend and terminal clients")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(long, default_value = "frontdesk.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Override the bind address from configuration
        #[arg(long)]
        bind: Option<String>,
    },

    /// Customer chat widget in the terminal
    Chat,

    /// Admin inbox in the terminal
    Inbox,
}
