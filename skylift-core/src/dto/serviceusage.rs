//! Service Usage request bodies

use serde::{Deserialize, Serialize};

use crate::domain::context::REQUIRED_APIS;

/// Body of the `services:batchEnable` call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEnableRequest {
    pub service_ids: Vec<String>,
}

impl BatchEnableRequest {
    /// Enables the fixed set of APIs a deployment needs.
    pub fn required() -> Self {
        Self {
            service_ids: REQUIRED_APIS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_apis() {
        let body = serde_json::to_value(BatchEnableRequest::required()).unwrap();
        let ids = body["serviceIds"].as_array().unwrap();
        assert_eq!(ids.len(), 4);
        assert!(ids.contains(&serde_json::json!("run.googleapis.com")));
    }
}
