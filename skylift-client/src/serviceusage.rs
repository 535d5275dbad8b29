//! Service Usage endpoints

use serde_json::Value;

use crate::GcpClient;
use crate::error::Result;
use skylift_core::domain::context::ProjectContext;
use skylift_core::dto::serviceusage::BatchEnableRequest;

impl GcpClient {
    /// Batch-enable the APIs a deployment depends on
    ///
    /// The call returns a long-running operation, but enablement is
    /// effectively immediate for already-enabled APIs and the pipeline
    /// does not wait on it; an embedded error envelope still fails here.
    pub async fn enable_apis(&self, ctx: &ProjectContext) -> Result<()> {
        let url = format!(
            "{}/v1/projects/{}/services:batchEnable",
            self.endpoints().serviceusage,
            ctx.project
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&BatchEnableRequest::required())
            .send()
            .await?;

        let _ack: Value = self.handle_envelope(response).await?;
        Ok(())
    }
}
