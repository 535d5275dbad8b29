//! Skylift CLI
//!
//! Command-line interface for deploying a local folder to Cloud Run.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "skylift")]
#[command(about = "Deploy a local folder to Cloud Run", long_about = None)]
struct Cli {
    /// OAuth2 bearer token for the Google Cloud APIs
    #[arg(long, env = "SKYLIFT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skylift=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config { token: cli.token };

    handle_command(cli.command, &config).await
}
