//! Cloud Build request bodies

use serde::{Deserialize, Serialize};

const DOCKER_BUILDER: &str = "gcr.io/cloud-builders/docker";

/// Body of the build create call
///
/// Two steps: build the image from the uploaded source, then push it to
/// the registry. Logs go to Cloud Logging only, which avoids requiring a
/// logs bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRequest {
    pub source: BuildSource,
    pub steps: Vec<BuildStep>,
    pub images: Vec<String>,
    pub options: BuildOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSource {
    pub storage_source: StorageSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSource {
    pub bucket: String,
    pub object: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildStep {
    pub name: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOptions {
    pub logging: String,
}

impl BuildRequest {
    /// Docker build-and-push of `target_image` from a staged source object.
    pub fn docker_build(bucket: &str, object: &str, target_image: &str) -> Self {
        Self {
            source: BuildSource {
                storage_source: StorageSource {
                    bucket: bucket.to_string(),
                    object: object.to_string(),
                },
            },
            steps: vec![
                BuildStep {
                    name: DOCKER_BUILDER.to_string(),
                    args: vec![
                        "build".to_string(),
                        "-t".to_string(),
                        target_image.to_string(),
                        ".".to_string(),
                    ],
                },
                BuildStep {
                    name: DOCKER_BUILDER.to_string(),
                    args: vec!["push".to_string(), target_image.to_string()],
                },
            ],
            images: vec![target_image.to_string()],
            options: BuildOptions {
                logging: "CLOUD_LOGGING_ONLY".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docker_build_body() {
        let body = serde_json::to_value(BuildRequest::docker_build(
            "bucket-a",
            "source-1.tar.gz",
            "host/p/r/app:latest",
        ))
        .unwrap();
        assert_eq!(body["source"]["storageSource"]["bucket"], "bucket-a");
        assert_eq!(body["source"]["storageSource"]["object"], "source-1.tar.gz");
        assert_eq!(body["steps"][0]["args"][0], "build");
        assert_eq!(body["steps"][1]["args"][0], "push");
        assert_eq!(body["images"][0], "host/p/r/app:latest");
        assert_eq!(body["options"]["logging"], "CLOUD_LOGGING_ONLY");
    }
}
