//! Skylift deployment pipeline
//!
//! Orchestrates a folder-to-Cloud-Run deployment as three strictly
//! sequential stages, each gated on the previous one:
//!
//! 1. Provisioning: ensure bucket, APIs, and image repository exist
//! 2. Build: upload the packaged folder and run the container build
//! 3. Deploy: create or update the service and wait for the rollout
//!
//! Packaging and validation run before any network call. The first
//! failure anywhere aborts the run; rerunning is always safe because
//! every creation treats "already exists" as success.

pub mod api;
pub mod archive;
pub mod build;
pub mod deploy;
pub mod progress;
pub mod provision;

pub use api::CloudApi;
pub use archive::ArchiveError;
pub use build::BuildError;
pub use deploy::{DeployError, DeployOutcome, DeployPhase};
pub use progress::{NullReporter, ProgressReporter};
pub use provision::ProvisionError;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use skylift_client::waiter::PollPolicy;
use skylift_core::domain::context::ProjectContext;

/// Wait budgets for the two polled operations
///
/// Defaults match the provider's pace: repository creation completes in
/// seconds, builds in minutes. Tests shrink the delays to run on virtual
/// budgets instead of wall-clock ones.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicies {
    /// Repository-creation operation polling
    pub repository: PollPolicy,
    /// Build status polling
    pub build: PollPolicy,
}

impl Default for PollPolicies {
    fn default() -> Self {
        Self {
            repository: PollPolicy::new(10, Duration::from_secs(5)),
            build: PollPolicy::new(60, Duration::from_secs(10)),
        }
    }
}

/// A pipeline failure, tagged with the stage that produced it
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Deploy(#[from] DeployError),
}

/// One-shot deployment runner
///
/// Owns everything a run needs: the API client, the immutable project
/// context, the wait budgets, and the progress sink. A `Deployer` can run
/// repeatedly; each `run` call is an independent pipeline.
pub struct Deployer {
    api: Arc<dyn CloudApi>,
    ctx: ProjectContext,
    policies: PollPolicies,
    reporter: Arc<dyn ProgressReporter>,
}

impl Deployer {
    pub fn new(api: Arc<dyn CloudApi>, ctx: ProjectContext) -> Self {
        Self {
            api,
            ctx,
            policies: PollPolicies::default(),
            reporter: Arc::new(NullReporter),
        }
    }

    /// Replace the progress sink
    pub fn with_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the wait budgets
    pub fn with_policies(mut self, policies: PollPolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Run the full pipeline for one folder
    ///
    /// # Arguments
    /// * `folder` - Folder with a `Dockerfile` at its root
    ///
    /// # Returns
    /// The deployed service's address and whether it was created or
    /// updated.
    pub async fn run(&self, folder: &Path) -> Result<DeployOutcome, PipelineError> {
        let api = self.api.as_ref();
        let reporter = self.reporter.as_ref();

        reporter.update("Validating and packaging the folder...");
        let archive = archive::package_folder(folder)?;
        info!(
            "packaged {} files as {}",
            archive.entry_count, archive.object_name
        );

        let bucket = provision::provision(api, &self.ctx, &self.policies, reporter).await?;

        let image = build::build(api, &self.ctx, &bucket, archive, &self.policies, reporter).await?;
        info!("deploying container image {image}");

        let outcome = deploy::deploy(api, &self.ctx, &image, reporter).await?;
        info!("service reachable at {} ({})", outcome.uri, outcome.phase);

        Ok(outcome)
    }
}
