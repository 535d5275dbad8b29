//! Skylift Core
//!
//! Core types for the Skylift folder-to-Cloud-Run deployer.
//!
//! This crate contains:
//! - Domain types: deployment context, long-running operations, builds,
//!   service descriptors
//! - DTOs: request bodies sent to the Google Cloud REST surfaces

pub mod domain;
pub mod dto;
