//! Cloud Run request bodies

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::context::CREATED_BY;

/// Body of both the service create and the service patch calls
///
/// The patch is partial: only these fields are replaced, which is exactly
/// what rolling out a new image needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub labels: HashMap<String, String>,
    /// Allow unauthenticated invocations without a separate IAM call
    pub invoker_iam_disabled: bool,
    pub template: ServiceTemplate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceTemplate {
    pub containers: Vec<Container>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub image: String,
}

impl ServiceRequest {
    pub fn with_image(image: &str) -> Self {
        Self {
            labels: HashMap::from([("created-by".to_string(), CREATED_BY.to_string())]),
            invoker_iam_disabled: true,
            template: ServiceTemplate {
                containers: vec![Container {
                    image: image.to_string(),
                }],
            },
        }
    }
}

/// Body of the single-shot operation `:wait` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitRequest {
    pub timeout: String,
}

impl Default for WaitRequest {
    fn default() -> Self {
        Self {
            timeout: "600s".to_string(),
        }
    }
}
