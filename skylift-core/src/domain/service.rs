//! Cloud Run service descriptor

use serde::{Deserialize, Serialize};

/// A Cloud Run service, as returned by the services GET endpoint
///
/// Only the fields the pipeline reads are modeled; everything else the API
/// returns is kept in `extra` so callers can log or inspect it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    #[serde(default)]
    pub name: String,
    /// Main reachable address of the service
    #[serde(default)]
    pub uri: Option<String>,
    /// All addresses the service answers on; older deployments populate
    /// this instead of `uri`
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ServiceDescriptor {
    /// The address to report to the user: `uri`, falling back to the first
    /// entry of `urls`.
    pub fn address(&self) -> Option<&str> {
        self.uri
            .as_deref()
            .or_else(|| self.urls.first().map(|u| u.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_prefers_uri() {
        let service: ServiceDescriptor = serde_json::from_str(
            r#"{"name": "projects/p/locations/l/services/s",
                "uri": "https://s-abc.run.app",
                "urls": ["https://old.run.app"]}"#,
        )
        .unwrap();
        assert_eq!(service.address(), Some("https://s-abc.run.app"));
    }

    #[test]
    fn test_address_falls_back_to_urls() {
        let service: ServiceDescriptor =
            serde_json::from_str(r#"{"name": "s", "urls": ["https://old.run.app"]}"#).unwrap();
        assert_eq!(service.address(), Some("https://old.run.app"));
    }

    #[test]
    fn test_unknown_fields_are_retained() {
        let service: ServiceDescriptor =
            serde_json::from_str(r#"{"name": "s", "generation": 4}"#).unwrap();
        assert_eq!(service.extra.get("generation").and_then(|v| v.as_i64()), Some(4));
    }
}
