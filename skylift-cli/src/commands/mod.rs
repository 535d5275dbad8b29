//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod deploy;

pub use deploy::DeployArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Deploy a folder containing a Dockerfile to Cloud Run
    Deploy(DeployArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Deploy(args) => deploy::handle_deploy(args, config).await,
    }
}
