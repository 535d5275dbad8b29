//! Deploy command handler
//!
//! Validates the inputs, wires the pipeline together, and renders
//! progress and the final service address.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Args;
use colored::*;

use crate::config::Config;
use skylift_client::GcpClient;
use skylift_core::domain::context::ProjectContext;
use skylift_pipeline::{DeployPhase, Deployer, ProgressReporter};

/// Arguments for the deploy command
#[derive(Args)]
pub struct DeployArgs {
    /// Folder to deploy; must contain a Dockerfile at its root
    pub folder: PathBuf,

    /// Google Cloud project ID
    #[arg(long, env = "SKYLIFT_PROJECT")]
    pub project: String,

    /// Deployment region
    #[arg(long, default_value = "us-central1")]
    pub region: String,

    /// Cloud Run service name
    #[arg(long, default_value = "my-app-service")]
    pub service: String,

    /// Artifact Registry repository ID
    #[arg(long, default_value = "my-app-repo")]
    pub repository: String,

    /// Name for the built image
    #[arg(long, default_value = "custom-app-image")]
    pub image: String,
}

/// Run a full deployment for the given folder
pub async fn handle_deploy(args: DeployArgs, config: &Config) -> Result<()> {
    // Credential and project are preconditions; nothing runs without them.
    let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) else {
        bail!("no access token; pass --token or set SKYLIFT_TOKEN");
    };
    if args.project.is_empty() {
        bail!("project ID cannot be empty");
    }

    let ctx = ProjectContext {
        project: args.project,
        region: args.region,
        service: args.service,
        repository: args.repository,
        image: args.image,
    };

    println!(
        "{}",
        format!(
            "Deploying {} to service {} in {}",
            args.folder.display(),
            ctx.service,
            ctx.region
        )
        .bold()
    );

    let client = GcpClient::new(token, &ctx.region);
    let deployer =
        Deployer::new(Arc::new(client), ctx).with_reporter(Arc::new(ConsoleReporter));

    let outcome = deployer.run(&args.folder).await?;

    let verb = match outcome.phase {
        DeployPhase::Create => "deployed",
        DeployPhase::Update => "updated",
    };
    println!();
    println!("{} Service {} successfully", "✓".green(), verb);
    println!("  URL: {}", outcome.uri.cyan().underline());

    Ok(())
}

/// Prints each pipeline status line as it arrives
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn update(&self, message: &str) {
        println!("  {} {}", "▸".cyan(), message.dimmed());
    }
}
