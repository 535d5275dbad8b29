//! Build stage
//!
//! Uploads the packaged source, triggers a remote container build, and
//! polls it to completion. Builds are slow, so this stage carries the
//! longest wait budget and is the one place per-poll progress is surfaced.

use thiserror::Error;
use tracing::{info, warn};

use crate::PollPolicies;
use crate::api::CloudApi;
use crate::progress::ProgressReporter;
use skylift_client::ClientError;
use skylift_client::waiter::{Poll, PollPolicy, WaitError, wait_until};
use skylift_core::domain::archive::SourceArchive;
use skylift_core::domain::build::{Build, BuildStatus};
use skylift_core::domain::context::ProjectContext;
use skylift_core::domain::operation::RemoteOperation;
use skylift_core::dto::cloudbuild::BuildRequest;

/// Why the build stage failed
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to upload source archive: {0}")]
    Upload(#[source] ClientError),

    #[error("failed to trigger build: {0}")]
    Trigger(#[source] ClientError),

    /// The trigger response carried no `metadata.build.id`
    #[error("could not get a build ID from the trigger response")]
    MissingBuildId,

    #[error("error while polling build {build_id}: {source}")]
    Poll {
        build_id: String,
        #[source]
        source: ClientError,
    },

    /// The build reached a terminal status other than success
    #[error("build {build_id} finished with status {status}")]
    Failed {
        status: BuildStatus,
        build_id: String,
    },

    #[error("build {build_id} still running after {attempts} attempts")]
    TimedOut { attempts: u32, build_id: String },
}

/// Upload the archive, run the build, and return the image to deploy
///
/// The returned reference is the digest-pinned image from the build
/// results when available, otherwise the deterministic target tag.
pub async fn build(
    api: &dyn CloudApi,
    ctx: &ProjectContext,
    bucket: &str,
    archive: SourceArchive,
    policies: &PollPolicies,
    reporter: &dyn ProgressReporter,
) -> Result<String, BuildError> {
    reporter.update(&format!(
        "Uploading {} ({} files) to gs://{bucket}...",
        archive.object_name, archive.entry_count
    ));
    let object = api
        .upload_object(bucket, &archive.object_name, archive.bytes)
        .await
        .map_err(BuildError::Upload)?;
    info!("uploaded source as gs://{bucket}/{object}");

    let target_image = ctx.target_image();
    reporter.update("Triggering the container build...");
    let request = BuildRequest::docker_build(bucket, &object, &target_image);
    let operation = api
        .create_build(&ctx.project, &request)
        .await
        .map_err(BuildError::Trigger)?;
    let build_id = build_id_from(&operation).ok_or(BuildError::MissingBuildId)?;

    reporter.update(&format!("Build {build_id} started, waiting for completion..."));
    let finished = wait_for_build(api, ctx, &build_id, &policies.build, reporter).await?;

    match finished.built_image() {
        Some(image) => Ok(image.to_string()),
        None => {
            warn!("build {build_id} reported no image reference, falling back to {target_image}");
            Ok(target_image)
        }
    }
}

/// The build ID lives in the trigger operation's metadata.
fn build_id_from(operation: &RemoteOperation) -> Option<String> {
    operation
        .metadata
        .as_ref()?
        .get("build")?
        .get("id")?
        .as_str()
        .map(str::to_string)
}

/// Poll the build until a terminal status.
async fn wait_for_build(
    api: &dyn CloudApi,
    ctx: &ProjectContext,
    build_id: &str,
    policy: &PollPolicy,
    reporter: &dyn ProgressReporter,
) -> Result<Build, BuildError> {
    wait_until(
        policy,
        move || async move {
            let build = api
                .get_build(&ctx.project, build_id)
                .await
                .map_err(|source| BuildError::Poll {
                    build_id: build_id.to_string(),
                    source,
                })?;

            if build.status.is_success() {
                Ok(Poll::Ready(build))
            } else if build.status.is_failure() {
                Err(BuildError::Failed {
                    status: build.status,
                    build_id: build_id.to_string(),
                })
            } else {
                Ok(Poll::Pending(Some(format!(
                    "Build in progress (status: {})...",
                    build.status
                ))))
            }
        },
        |status| reporter.update(status),
    )
    .await
    .map_err(|e| match e {
        WaitError::Attempt(e) => e,
        WaitError::Timeout { attempts } => BuildError::TimedOut {
            attempts,
            build_id: build_id.to_string(),
        },
    })
}
