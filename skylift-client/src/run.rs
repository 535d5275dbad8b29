//! Cloud Run endpoints

use crate::GcpClient;
use crate::error::Result;
use skylift_core::domain::context::ProjectContext;
use skylift_core::domain::operation::RemoteOperation;
use skylift_core::domain::service::ServiceDescriptor;
use skylift_core::dto::run::{ServiceRequest, WaitRequest};

impl GcpClient {
    /// Fetch the target service's descriptor
    ///
    /// This endpoint reports failures through the HTTP status rather than
    /// an embedded envelope, so a missing service is a 404 remote error
    /// the caller can branch on with
    /// [`crate::ClientError::is_not_found`].
    pub async fn get_service(&self, ctx: &ProjectContext) -> Result<ServiceDescriptor> {
        let url = format!("{}/v2/{}", self.endpoints().run, ctx.service_path());
        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;

        self.handle_status(response).await
    }

    /// Create the service
    ///
    /// # Returns
    /// The long-running operation tracking the rollout.
    pub async fn create_service(
        &self,
        ctx: &ProjectContext,
        request: &ServiceRequest,
    ) -> Result<RemoteOperation> {
        let url = format!(
            "{}/v2/projects/{}/locations/{}/services?serviceId={}",
            self.endpoints().run,
            ctx.project,
            ctx.region,
            ctx.service
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

    /// Patch the existing service with a new revision
    ///
    /// # Returns
    /// The long-running operation tracking the rollout.
    pub async fn patch_service(
        &self,
        ctx: &ProjectContext,
        request: &ServiceRequest,
    ) -> Result<RemoteOperation> {
        let url = format!("{}/v2/{}", self.endpoints().run, ctx.service_path());
        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        self.handle_envelope(response).await
    }

    /// Server-side wait on a service operation
    ///
    /// Cloud Run offers a `:wait` verb with a bounded timeout, so service
    /// rollouts use one blocking call instead of a poll loop.
    pub async fn wait_operation(&self, operation: &str) -> Result<RemoteOperation> {
        let url = format!("{}/v2/{}:wait", self.endpoints().run, operation);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&WaitRequest::default())
            .send()
            .await?;

        self.handle_envelope(response).await
    }
}
