//! Cloud Build endpoints

use crate::GcpClient;
use crate::error::Result;
use skylift_core::domain::build::Build;
use skylift_core::domain::operation::RemoteOperation;
use skylift_core::dto::cloudbuild::BuildRequest;

impl GcpClient {
    /// Trigger a build
    ///
    /// # Returns
    /// The long-running operation whose `metadata.build.id` identifies the
    /// build for subsequent status polls.
    pub async fn create_build(
        &self,
        project: &str,
        request: &BuildRequest,
    ) -> Result<RemoteOperation> {
        let url = format!(
            "{}/v1/projects/{}/builds",
            self.endpoints().cloudbuild,
            project
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        self.handle_envelope(response).await
    }

    /// Fetch a build's current status by ID
    pub async fn get_build(&self, project: &str, build_id: &str) -> Result<Build> {
        let url = format!(
            "{}/v1/projects/{}/builds/{}",
            self.endpoints().cloudbuild,
            project,
            build_id
        );
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;

        self.handle_envelope(response).await
    }
}
