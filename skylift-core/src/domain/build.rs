//! Cloud Build domain types

use serde::{Deserialize, Serialize};

/// A Cloud Build job, as returned by the builds GET endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Build {
    pub id: String,
    #[serde(default)]
    pub status: BuildStatus,
    #[serde(default)]
    pub results: Option<BuildResults>,
    /// Console URL for the build logs, when the API reports one
    #[serde(default, rename = "logUrl")]
    pub log_url: Option<String>,
}

impl Build {
    /// Digest-pinned reference of the first built image, if the build
    /// reported one.
    pub fn built_image(&self) -> Option<&str> {
        self.results
            .as_ref()
            .and_then(|r| r.images.first())
            .map(|i| i.name.as_str())
    }
}

/// Build execution status, SCREAMING_SNAKE_CASE on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    Pending,
    Queued,
    Working,
    Success,
    Failure,
    InternalError,
    Timeout,
    Cancelled,
    Expired,
    /// Catch-all for statuses this client does not model; never terminal,
    /// so an unrecognized status keeps the build polling.
    #[serde(other)]
    StatusUnknown,
}

impl Default for BuildStatus {
    fn default() -> Self {
        Self::StatusUnknown
    }
}

impl BuildStatus {
    /// True once the build can make no further progress.
    pub fn is_terminal(self) -> bool {
        self.is_success() || self.is_failure()
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Terminal statuses that are not success.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Self::Failure | Self::InternalError | Self::Timeout | Self::Cancelled | Self::Expired
        )
    }

    /// Wire form, for progress and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StatusUnknown => "STATUS_UNKNOWN",
            Self::Pending => "PENDING",
            Self::Queued => "QUEUED",
            Self::Working => "WORKING",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Timeout => "TIMEOUT",
            Self::Cancelled => "CANCELLED",
            Self::Expired => "EXPIRED",
        }
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Artifacts produced by a successful build
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildResults {
    #[serde(default)]
    pub images: Vec<BuiltImage>,
}

/// One pushed image, named with its content digest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltImage {
    pub name: String,
    #[serde(default)]
    pub digest: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(BuildStatus::Success.is_terminal());
        assert!(BuildStatus::Success.is_success());
        assert!(!BuildStatus::Success.is_failure());

        for status in [
            BuildStatus::Failure,
            BuildStatus::InternalError,
            BuildStatus::Timeout,
            BuildStatus::Cancelled,
            BuildStatus::Expired,
        ] {
            assert!(status.is_terminal());
            assert!(status.is_failure());
        }

        for status in [BuildStatus::Pending, BuildStatus::Queued, BuildStatus::Working] {
            assert!(!status.is_terminal());
        }
    }

    #[test]
    fn test_build_wire_format() {
        let build: Build = serde_json::from_str(
            r#"{
                "id": "b-123",
                "status": "SUCCESS",
                "results": {"images": [{"name": "host/p/r/app@sha256:ab", "digest": "sha256:ab"}]}
            }"#,
        )
        .unwrap();
        assert_eq!(build.status, BuildStatus::Success);
        assert_eq!(build.built_image(), Some("host/p/r/app@sha256:ab"));
    }

    #[test]
    fn test_unmodeled_status_deserializes_as_unknown() {
        // The provider may introduce statuses this client has never seen;
        // they must parse and count as still running, not kill the poll.
        let build: Build =
            serde_json::from_str(r#"{"id": "b-9", "status": "QUEUING"}"#).unwrap();
        assert_eq!(build.status, BuildStatus::StatusUnknown);
        assert!(!build.status.is_terminal());
    }

    #[test]
    fn test_build_without_results() {
        let build: Build =
            serde_json::from_str(r#"{"id": "b-456", "status": "WORKING"}"#).unwrap();
        assert_eq!(build.status, BuildStatus::Working);
        assert!(build.built_image().is_none());
    }
}
