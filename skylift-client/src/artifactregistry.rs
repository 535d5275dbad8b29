//! Artifact Registry endpoints

use crate::GcpClient;
use crate::error::Result;
use skylift_core::domain::context::ProjectContext;
use skylift_core::domain::operation::RemoteOperation;
use skylift_core::dto::artifactregistry::RepositoryCreate;

impl GcpClient {
    /// Create the Docker-format image repository
    ///
    /// # Returns
    /// The long-running operation tracking the creation. A repository that
    /// already exists surfaces as a 409 remote error.
    pub async fn create_repository(&self, ctx: &ProjectContext) -> Result<RemoteOperation> {
        let url = format!(
            "{}/v1/projects/{}/locations/{}/repositories?repositoryId={}",
            self.endpoints().artifactregistry,
            ctx.project,
            ctx.region,
            ctx.repository
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&RepositoryCreate::docker(ctx))
            .send()
            .await?;

        self.handle_envelope(response).await
    }

    /// Fetch a repository-creation operation by name
    pub async fn get_operation(&self, operation: &str) -> Result<RemoteOperation> {
        let url = format!("{}/v1/{}", self.endpoints().artifactregistry, operation);
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;

        self.handle_envelope(response).await
    }
}
