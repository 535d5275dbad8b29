//! Cloud Storage endpoints

use serde::Deserialize;

use crate::GcpClient;
use crate::error::Result;
use skylift_core::domain::context::ProjectContext;
use skylift_core::dto::storage::BucketInsert;

#[derive(Debug, Deserialize)]
struct BucketResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ObjectResource {
    name: String,
}

impl GcpClient {
    /// Create the staging bucket for uploaded sources
    ///
    /// Returns the created bucket's name. An already-existing bucket
    /// surfaces as a 409 [`crate::ClientError::Remote`]; the caller decides
    /// whether that is a failure.
    pub async fn create_bucket(&self, ctx: &ProjectContext) -> Result<String> {
        let url = format!(
            "{}/storage/v1/b?project={}",
            self.endpoints().storage,
            ctx.project
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&BucketInsert::for_context(ctx))
            .send()
            .await?;

        let bucket: BucketResource = self.handle_envelope(response).await?;
        Ok(bucket.name)
    }

    /// Upload an object with a media upload
    ///
    /// # Arguments
    /// * `bucket` - Target bucket name
    /// * `object` - Object name to store the bytes under
    /// * `bytes` - Raw object content (a gzipped source tarball here)
    ///
    /// # Returns
    /// The stored object's name as reported by the API.
    pub async fn upload_object(
        &self,
        bucket: &str,
        object: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let url = format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.endpoints().storage,
            bucket,
            object
        );
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/gzip")
            .body(bytes)
            .send()
            .await?;

        let stored: ObjectResource = self.handle_envelope(response).await?;
        Ok(stored.name)
    }
}
