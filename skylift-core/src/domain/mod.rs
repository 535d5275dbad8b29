//! Core domain types
//!
//! This module contains the domain structures shared across Skylift crates.
//! They model the deployment inputs and the provider-side objects the
//! pipeline observes (operations, builds, services).

pub mod archive;
pub mod build;
pub mod context;
pub mod operation;
pub mod service;
