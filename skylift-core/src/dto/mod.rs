//! Request bodies for the Google Cloud REST surfaces
//!
//! These DTOs are serialized as the JSON bodies of the mutations the
//! pipeline issues. Field names follow each API's wire format, so most
//! structs are camelCase-renamed.

pub mod artifactregistry;
pub mod cloudbuild;
pub mod run;
pub mod serviceusage;
pub mod storage;
