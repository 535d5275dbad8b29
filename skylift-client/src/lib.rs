//! Skylift HTTP Client
//!
//! An authenticated JSON client over the Google Cloud REST surfaces the
//! deployment pipeline talks to: Cloud Storage, Service Usage, Artifact
//! Registry, Cloud Build, and Cloud Run.
//!
//! The provider has two error conventions and this crate normalizes both
//! into [`ClientError`]:
//! - most endpoints embed `{error: {code, message}}` in the JSON body,
//!   sometimes under a 200 status;
//! - the Cloud Run service GET signals failures through the HTTP status
//!   itself.
//!
//! # Example
//!
//! ```no_run
//! use skylift_client::GcpClient;
//! use skylift_core::domain::context::ProjectContext;
//!
//! # async fn example() -> skylift_client::Result<()> {
//! let ctx = ProjectContext {
//!     project: "my-project".into(),
//!     region: "us-central1".into(),
//!     service: "my-app-service".into(),
//!     repository: "my-app-repo".into(),
//!     image: "custom-app-image".into(),
//! };
//! let client = GcpClient::new("ya29.token", &ctx.region);
//! let bucket = client.create_bucket(&ctx).await?;
//! println!("bucket: {bucket}");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod waiter;

mod artifactregistry;
mod cloudbuild;
mod run;
mod serviceusage;
mod storage;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Base URLs of the API surfaces the client calls
///
/// Kept as data rather than constants so tests (and private-endpoint
/// deployments) can point the client elsewhere.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub storage: String,
    pub serviceusage: String,
    pub artifactregistry: String,
    pub cloudbuild: String,
    /// Regional Cloud Run host, e.g. "https://us-central1-run.googleapis.com"
    pub run: String,
}

impl Endpoints {
    /// Production endpoints for a region.
    pub fn for_region(region: &str) -> Self {
        Self {
            storage: "https://storage.googleapis.com".to_string(),
            serviceusage: "https://serviceusage.googleapis.com".to_string(),
            artifactregistry: "https://artifactregistry.googleapis.com".to_string(),
            cloudbuild: "https://cloudbuild.googleapis.com".to_string(),
            run: format!("https://{region}-run.googleapis.com"),
        }
    }
}

/// Authenticated client for the cloud APIs
///
/// Every request carries the bearer token the client was built with. The
/// token is externally supplied and never refreshed here; a run that
/// outlives its token fails with a remote 401 like any other error.
#[derive(Debug, Clone)]
pub struct GcpClient {
    token: String,
    http: Client,
    endpoints: Endpoints,
}

impl GcpClient {
    /// Create a client for a region with production endpoints
    pub fn new(token: impl Into<String>, region: &str) -> Self {
        Self::with_endpoints(token, Endpoints::for_region(region))
    }

    /// Create a client with explicit endpoints
    pub fn with_endpoints(token: impl Into<String>, endpoints: Endpoints) -> Self {
        Self {
            token: token.into(),
            http: Client::new(),
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle a response using the embedded-envelope convention
    ///
    /// The body is parsed unconditionally; an `{error: {code, message}}`
    /// member fails the call even when the transport status was 2xx.
    pub(crate) async fn handle_envelope<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let body = response.text().await?;
        let result = decode_envelope(&body);
        if let Err(error) = &result {
            // 409s land here too; callers decide whether they are fatal.
            debug!("API call failed: {}", error);
        }
        result
    }

    /// Handle a response using transport-status semantics
    ///
    /// Used by the Cloud Run service GET, which reports failures through
    /// the HTTP status. The error message prefers the embedded envelope,
    /// then the status reason, then a generic fallback.
    pub(crate) async fn handle_status<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = status_error_message(&body, status);
            debug!("API call failed with status {}: {}", status.as_u16(), message);
            return Err(ClientError::remote(status.as_u16() as i64, message));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

/// Decode a JSON body, normalizing the provider's embedded error envelope.
fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ClientError::Parse(e.to_string()))?;

    if let Some(error) = value.get("error") {
        let code = error.get("code").and_then(Value::as_i64).unwrap_or(0);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown remote error")
            .to_string();
        return Err(ClientError::Remote { code, message });
    }

    serde_json::from_value(value).map_err(|e| ClientError::Parse(e.to_string()))
}

/// Best error message for a non-2xx response body.
fn status_error_message(body: &str, status: reqwest::StatusCode) -> String {
    let embedded = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.get("message")?.as_str().map(str::to_string));

    embedded
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skylift_core::domain::operation::RemoteOperation;

    #[test]
    fn test_decode_envelope_success() {
        let op: RemoteOperation =
            decode_envelope(r#"{"name": "op-1", "done": false}"#).unwrap();
        assert_eq!(op.name, "op-1");
    }

    #[test]
    fn test_decode_envelope_error_wins_over_shape() {
        // The provider embeds errors under 200s; the envelope takes priority.
        let result: Result<RemoteOperation> =
            decode_envelope(r#"{"error": {"code": 409, "message": "already exists"}}"#);
        match result {
            Err(ClientError::Remote { code, message }) => {
                assert_eq!(code, 409);
                assert_eq!(message, "already exists");
            }
            other => panic!("expected remote error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_envelope_invalid_json() {
        let result: Result<RemoteOperation> = decode_envelope("<html>boom</html>");
        assert!(matches!(result, Err(ClientError::Parse(_))));
    }

    #[test]
    fn test_status_error_message_prefers_embedded() {
        let message = status_error_message(
            r#"{"error": {"code": 404, "message": "service not found"}}"#,
            reqwest::StatusCode::NOT_FOUND,
        );
        assert_eq!(message, "service not found");
    }

    #[test]
    fn test_status_error_message_falls_back_to_reason() {
        let message = status_error_message("", reqwest::StatusCode::NOT_FOUND);
        assert_eq!(message, "Not Found");
    }

    #[test]
    fn test_endpoints_for_region() {
        let endpoints = Endpoints::for_region("europe-west1");
        assert_eq!(endpoints.run, "https://europe-west1-run.googleapis.com");
        assert_eq!(endpoints.storage, "https://storage.googleapis.com");
    }
}
