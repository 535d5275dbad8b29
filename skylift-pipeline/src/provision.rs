//! Provisioning stage
//!
//! Idempotently ensures the resources later stages depend on: the staging
//! bucket, the required APIs, and the image repository. "Already exists"
//! conflicts are success here; the bucket must exist before the upload
//! and the repository before the build pushes to it.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::PollPolicies;
use crate::api::CloudApi;
use crate::progress::ProgressReporter;
use skylift_client::ClientError;
use skylift_client::waiter::{Poll, PollPolicy, WaitError, wait_until};
use skylift_core::domain::context::ProjectContext;

/// Why provisioning failed
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("failed to create or verify bucket: {0}")]
    Bucket(#[source] ClientError),

    #[error("failed to enable required APIs: {0}")]
    EnableApis(#[source] ClientError),

    #[error("failed to create repository: {0}")]
    Repository(#[source] ClientError),

    #[error("error while waiting for repository operation: {0}")]
    RepositoryPoll(#[source] ClientError),

    /// The creation operation completed, but in a failed state
    #[error("repository operation failed: {0}")]
    Operation(String),

    #[error("repository operation still not complete after {attempts} attempts")]
    Timeout { attempts: u32 },
}

/// Ensure bucket, APIs, and repository exist
///
/// # Returns
/// The name of the staging bucket to upload sources to.
pub async fn provision(
    api: &dyn CloudApi,
    ctx: &ProjectContext,
    policies: &PollPolicies,
    reporter: &dyn ProgressReporter,
) -> Result<String, ProvisionError> {
    reporter.update("Creating or verifying the storage bucket...");
    let bucket = match api.create_bucket(ctx).await {
        Ok(name) => {
            info!("bucket {name} created");
            name
        }
        Err(e) if e.is_conflict() => {
            info!("bucket {} already exists, reusing it", ctx.bucket_name());
            ctx.bucket_name()
        }
        Err(e) => return Err(ProvisionError::Bucket(e)),
    };

    reporter.update("Enabling required cloud APIs...");
    api.enable_apis(ctx)
        .await
        .map_err(ProvisionError::EnableApis)?;

    reporter.update("Creating or verifying the image repository...");
    match api.create_repository(ctx).await {
        Ok(operation) => {
            info!(
                "repository creation started, operation {}",
                operation.name
            );
            wait_repository_operation(api, &operation.name, &policies.repository).await?;
        }
        Err(e) if e.is_conflict() => {
            warn!("repository {} already exists: {e}", ctx.repository);
        }
        Err(e) => return Err(ProvisionError::Repository(e)),
    }

    Ok(bucket)
}

/// Poll a repository-creation operation until `done`.
async fn wait_repository_operation(
    api: &dyn CloudApi,
    operation: &str,
    policy: &PollPolicy,
) -> Result<(), ProvisionError> {
    debug!("waiting for repository operation {operation}");

    wait_until(
        policy,
        move || async move {
            let op = api
                .get_repository_operation(operation)
                .await
                .map_err(ProvisionError::RepositoryPoll)?;

            if !op.done {
                return Ok(Poll::Pending(None));
            }
            if let Some(status) = op.error {
                return Err(ProvisionError::Operation(status.message));
            }
            // Done with neither payload nor error is still success.
            Ok(Poll::Ready(()))
        },
        |_| {},
    )
    .await
    .map_err(|e| match e {
        WaitError::Attempt(e) => e,
        WaitError::Timeout { attempts } => ProvisionError::Timeout { attempts },
    })
}
