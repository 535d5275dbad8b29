//! Cloud Storage request bodies

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::context::{CREATED_BY, ProjectContext};

/// Body of the bucket insert call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketInsert {
    pub name: String,
    pub location: String,
    pub storage_class: String,
    pub labels: HashMap<String, String>,
}

impl BucketInsert {
    pub fn for_context(ctx: &ProjectContext) -> Self {
        Self {
            name: ctx.bucket_name(),
            location: ctx.region.clone(),
            storage_class: "STANDARD".to_string(),
            labels: HashMap::from([("created-by".to_string(), CREATED_BY.to_string())]),
        }
    }
}
