//! Deploy stage
//!
//! Decides between creating and updating the target service by probing
//! for it, submits the matching mutation, waits on the rollout via the
//! provider's bounded server-side wait, and re-fetches the descriptor for
//! the final address.

use thiserror::Error;
use tracing::{debug, info};

use crate::api::CloudApi;
use crate::progress::ProgressReporter;
use skylift_client::ClientError;
use skylift_core::domain::context::ProjectContext;
use skylift_core::dto::run::ServiceRequest;

/// Which path the deploy took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployPhase {
    Create,
    Update,
}

impl std::fmt::Display for DeployPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update => f.write_str("update"),
        }
    }
}

/// Why the deploy stage failed
#[derive(Debug, Error)]
pub enum DeployError {
    /// The existence probe failed with something other than 404
    #[error("failed to probe service: {0}")]
    Probe(#[source] ClientError),

    #[error("service {phase} failed: {source}")]
    Mutation {
        phase: DeployPhase,
        #[source]
        source: ClientError,
    },

    #[error("service {phase} returned no operation to wait on")]
    MissingOperation { phase: DeployPhase },

    #[error("error while waiting for service operation: {0}")]
    Wait(#[source] ClientError),

    /// The rollout operation completed, but in a failed state
    #[error("service rollout failed: {0}")]
    Operation(String),

    #[error("failed to fetch the deployed service: {0}")]
    Describe(#[source] ClientError),

    #[error("deployed service reports no reachable address")]
    MissingUri,
}

/// Terminal outcome of a successful deployment
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    /// Reachable address of the service
    pub uri: String,
    /// Whether the service was created or updated
    pub phase: DeployPhase,
}

/// Create or update the service with the built image
pub async fn deploy(
    api: &dyn CloudApi,
    ctx: &ProjectContext,
    image: &str,
    reporter: &dyn ProgressReporter,
) -> Result<DeployOutcome, DeployError> {
    debug!("probing service {}", ctx.service_path());
    let phase = match api.get_service(ctx).await {
        Ok(_) => DeployPhase::Update,
        Err(e) if e.is_not_found() => DeployPhase::Create,
        Err(e) => return Err(DeployError::Probe(e)),
    };

    reporter.update(&match phase {
        DeployPhase::Create => format!("Creating service {} with the built image...", ctx.service),
        DeployPhase::Update => format!("Updating service {} with the built image...", ctx.service),
    });

    let request = ServiceRequest::with_image(image);
    let operation = match phase {
        DeployPhase::Create => api.create_service(ctx, &request).await,
        DeployPhase::Update => api.patch_service(ctx, &request).await,
    }
    .map_err(|source| DeployError::Mutation { phase, source })?;

    if operation.name.is_empty() {
        return Err(DeployError::MissingOperation { phase });
    }

    info!("service {phase} initiated, operation {}", operation.name);
    reporter.update("Waiting for the service rollout to finish...");
    let done = api
        .wait_service_operation(&operation.name)
        .await
        .map_err(DeployError::Wait)?;
    if let Some(status) = done.error {
        return Err(DeployError::Operation(status.message));
    }

    let service = api.get_service(ctx).await.map_err(DeployError::Describe)?;
    let uri = service
        .address()
        .ok_or(DeployError::MissingUri)?
        .to_string();

    Ok(DeployOutcome { uri, phase })
}
