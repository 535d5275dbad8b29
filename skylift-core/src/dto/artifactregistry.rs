//! Artifact Registry request bodies

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::context::{CREATED_BY, ProjectContext};

/// Body of the repository create call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryCreate {
    pub name: String,
    pub format: String,
    pub description: String,
    pub labels: HashMap<String, String>,
}

impl RepositoryCreate {
    pub fn docker(ctx: &ProjectContext) -> Self {
        Self {
            name: ctx.repository_path(),
            format: "DOCKER".to_string(),
            description: "Container images built from folder deployments".to_string(),
            labels: HashMap::from([("created-by".to_string(), CREATED_BY.to_string())]),
        }
    }
}
