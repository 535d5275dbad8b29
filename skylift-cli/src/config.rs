//! Configuration module
//!
//! Holds the global CLI settings shared by all commands.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token for the cloud APIs, if one was supplied
    pub token: Option<String>,
}
