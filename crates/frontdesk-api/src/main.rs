//! Frontdesk entry point.
//!
//! Binary name: `fdesk`
//!
//! Parses CLI arguments, loads configuration once, then either starts
//! the HTTP server or runs one of the terminal clients.

mod cli;
mod client;
mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,frontdesk=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = frontdesk_infra::config::load_config(&cli.config).await;

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let state = AppState::init(config);
            let router = http::router::build_router(state);

            let listener = tokio::net::TcpListener::bind(&bind).await?;
            tracing::info!(%bind, "frontdesk listening");
            axum::serve(listener, router).await?;
        }

        Commands::Chat => {
            cli::chat::run(&config).await?;
        }

        Commands::Inbox => {
            cli::inbox::run(&config).await?;
        }
    }

    Ok(())
}
