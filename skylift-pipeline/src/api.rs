//! Cloud API seam
//!
//! The pipeline stages talk to the provider through this trait instead of
//! the concrete HTTP client, which is what lets the stage logic and the
//! end-to-end flow run against a scripted fake in tests.

use async_trait::async_trait;

use skylift_client::{GcpClient, error::Result};
use skylift_core::domain::build::Build;
use skylift_core::domain::context::ProjectContext;
use skylift_core::domain::operation::RemoteOperation;
use skylift_core::domain::service::ServiceDescriptor;
use skylift_core::dto::cloudbuild::BuildRequest;
use skylift_core::dto::run::ServiceRequest;

/// The remote operations the pipeline performs, one method per endpoint
#[async_trait]
pub trait CloudApi: Send + Sync {
    /// Create the staging bucket; 409 means it already exists
    async fn create_bucket(&self, ctx: &ProjectContext) -> Result<String>;

    /// Batch-enable the required APIs
    async fn enable_apis(&self, ctx: &ProjectContext) -> Result<()>;

    /// Create the image repository; 409 means it already exists
    async fn create_repository(&self, ctx: &ProjectContext) -> Result<RemoteOperation>;

    /// Poll a repository-creation operation by name
    async fn get_repository_operation(&self, operation: &str) -> Result<RemoteOperation>;

    /// Upload the packaged source archive
    async fn upload_object(&self, bucket: &str, object: &str, bytes: Vec<u8>) -> Result<String>;

    /// Trigger a container build
    async fn create_build(&self, project: &str, request: &BuildRequest)
    -> Result<RemoteOperation>;

    /// Poll a build's status by ID
    async fn get_build(&self, project: &str, build_id: &str) -> Result<Build>;

    /// Fetch the target service; 404 means it does not exist yet
    async fn get_service(&self, ctx: &ProjectContext) -> Result<ServiceDescriptor>;

    /// Create the service
    async fn create_service(
        &self,
        ctx: &ProjectContext,
        request: &ServiceRequest,
    ) -> Result<RemoteOperation>;

    /// Patch the existing service
    async fn patch_service(
        &self,
        ctx: &ProjectContext,
        request: &ServiceRequest,
    ) -> Result<RemoteOperation>;

    /// Server-side bounded wait on a service operation
    async fn wait_service_operation(&self, operation: &str) -> Result<RemoteOperation>;
}

#[async_trait]
impl CloudApi for GcpClient {
    async fn create_bucket(&self, ctx: &ProjectContext) -> Result<String> {
        GcpClient::create_bucket(self, ctx).await
    }

    async fn enable_apis(&self, ctx: &ProjectContext) -> Result<()> {
        GcpClient::enable_apis(self, ctx).await
    }

    async fn create_repository(&self, ctx: &ProjectContext) -> Result<RemoteOperation> {
        GcpClient::create_repository(self, ctx).await
    }

    async fn get_repository_operation(&self, operation: &str) -> Result<RemoteOperation> {
        GcpClient::get_operation(self, operation).await
    }

    async fn upload_object(&self, bucket: &str, object: &str, bytes: Vec<u8>) -> Result<String> {
        GcpClient::upload_object(self, bucket, object, bytes).await
    }

    async fn create_build(
        &self,
        project: &str,
        request: &BuildRequest,
    ) -> Result<RemoteOperation> {
        GcpClient::create_build(self, project, request).await
    }

    async fn get_build(&self, project: &str, build_id: &str) -> Result<Build> {
        GcpClient::get_build(self, project, build_id).await
    }

    async fn get_service(&self, ctx: &ProjectContext) -> Result<ServiceDescriptor> {
        GcpClient::get_service(self, ctx).await
    }

    async fn create_service(
        &self,
        ctx: &ProjectContext,
        request: &ServiceRequest,
    ) -> Result<RemoteOperation> {
        GcpClient::create_service(self, ctx, request).await
    }

    async fn patch_service(
        &self,
        ctx: &ProjectContext,
        request: &ServiceRequest,
    ) -> Result<RemoteOperation> {
        GcpClient::patch_service(self, ctx, request).await
    }

    async fn wait_service_operation(&self, operation: &str) -> Result<RemoteOperation> {
        GcpClient::wait_operation(self, operation).await
    }
}
