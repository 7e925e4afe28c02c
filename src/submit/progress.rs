//! Reporter trait for interface-agnostic status updates
//!
//! The submission workflow never prints directly; it reports through this
//! trait so different interfaces (CLI, CI wrappers, tests) can decide how
//! progress is presented.

use async_trait::async_trait;

/// Receives user-facing status updates during a submission run.
///
/// - CLI implementations can print to terminal
/// - Test implementations can record messages for assertions
#[async_trait]
pub trait Reporter: Send + Sync {
    /// General status message
    async fn info(&self, message: &str);

    /// Non-fatal condition the user should know about
    async fn warn(&self, message: &str);

    /// A step completed successfully
    async fn success(&self, message: &str);
}

/// No-op reporter for testing or when output isn't needed
pub struct NoopReporter;

#[async_trait]
impl Reporter for NoopReporter {
    async fn info(&self, _message: &str) {}
    async fn warn(&self, _message: &str) {}
    async fn success(&self, _message: &str) {}
}
