//! Long-running operation types
//!
//! Several Google APIs answer mutations with an operation object that is
//! polled (or waited on) by name until `done`. The shape is shared; the
//! payload schemas differ per API.

use serde::{Deserialize, Serialize};

/// A provider-side long-running operation
///
/// Returned by repository creation, service creation/update, and the
/// service `:wait` call. `response` and `error` are only meaningful once
/// `done` is true.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteOperation {
    /// Fully qualified operation name, used to poll or wait
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub done: bool,
    /// Success payload, present when the operation completed successfully
    #[serde(default)]
    pub response: Option<serde_json::Value>,
    /// Failure status, present when the operation completed in error
    #[serde(default)]
    pub error: Option<OperationStatus>,
    /// API-specific metadata (e.g. the build object on a build trigger)
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Error status carried by a failed operation or an error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationStatus {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_operation_deserializes() {
        let op: RemoteOperation = serde_json::from_str(
            r#"{"name": "projects/p/locations/l/operations/abc"}"#,
        )
        .unwrap();
        assert_eq!(op.name, "projects/p/locations/l/operations/abc");
        assert!(!op.done);
        assert!(op.response.is_none());
        assert!(op.error.is_none());
    }

    #[test]
    fn test_failed_operation_carries_status() {
        let op: RemoteOperation = serde_json::from_str(
            r#"{"name": "op", "done": true, "error": {"code": 7, "message": "denied"}}"#,
        )
        .unwrap();
        assert!(op.done);
        let status = op.error.unwrap();
        assert_eq!(status.code, 7);
        assert_eq!(status.message, "denied");
    }
}
