//! Progress reporting seam
//!
//! Stages emit human-readable status lines through this trait. Reporting
//! is best-effort and synchronous; it must never block the pipeline.

/// Receives status updates at stage transitions and build-poll ticks
pub trait ProgressReporter: Send + Sync {
    fn update(&self, message: &str);
}

/// Reporter that discards all updates
///
/// Default for library consumers that only care about the outcome.
#[derive(Debug, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn update(&self, _message: &str) {}
}
