//! Deployment context
//!
//! Immutable inputs shared by every pipeline stage, plus the deterministic
//! resource names derived from them.

use serde::{Deserialize, Serialize};

/// Label value stamped onto every resource the pipeline creates.
pub const CREATED_BY: &str = "skylift";

/// The APIs a deployment needs enabled on the target project.
pub const REQUIRED_APIS: [&str; 4] = [
    "storage.googleapis.com",
    "run.googleapis.com",
    "cloudbuild.googleapis.com",
    "artifactregistry.googleapis.com",
];

/// Immutable inputs to a deployment run
///
/// Everything a stage needs to address the target project is either a field
/// here or derived from one. The context never changes during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectContext {
    /// Google Cloud project ID
    pub project: String,
    /// Region for the bucket, repository, build, and service
    pub region: String,
    /// Cloud Run service name to create or update
    pub service: String,
    /// Artifact Registry repository ID for built images
    pub repository: String,
    /// Image name (without registry host or tag)
    pub image: String,
}

impl ProjectContext {
    /// Deterministic name of the staging bucket for uploaded sources.
    pub fn bucket_name(&self) -> String {
        format!("{}-folder-deploy-data", self.project)
    }

    /// Fully tagged target image the build pushes to.
    pub fn target_image(&self) -> String {
        format!(
            "{}-docker.pkg.dev/{}/{}/{}:latest",
            self.region, self.project, self.repository, self.image
        )
    }

    /// Resource path of the Artifact Registry repository.
    pub fn repository_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/repositories/{}",
            self.project, self.region, self.repository
        )
    }

    /// Resource path of the Cloud Run service.
    pub fn service_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/services/{}",
            self.project, self.region, self.service
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ProjectContext {
        ProjectContext {
            project: "acme-prod".to_string(),
            region: "us-central1".to_string(),
            service: "my-app-service".to_string(),
            repository: "my-app-repo".to_string(),
            image: "custom-app-image".to_string(),
        }
    }

    #[test]
    fn test_bucket_name_is_deterministic() {
        assert_eq!(context().bucket_name(), "acme-prod-folder-deploy-data");
    }

    #[test]
    fn test_target_image() {
        assert_eq!(
            context().target_image(),
            "us-central1-docker.pkg.dev/acme-prod/my-app-repo/custom-app-image:latest"
        );
    }

    #[test]
    fn test_resource_paths() {
        let ctx = context();
        assert_eq!(
            ctx.repository_path(),
            "projects/acme-prod/locations/us-central1/repositories/my-app-repo"
        );
        assert_eq!(
            ctx.service_path(),
            "projects/acme-prod/locations/us-central1/services/my-app-service"
        );
    }
}
