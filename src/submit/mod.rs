//! Review submission engine
//!
//! Handles the workflow of submitting a build for store review:
//! 1. Resolution - find the editable version and the build to attach
//! 2. Declaration - export compliance, IDFA, content rights
//! 3. Submission - create the review submission record

mod progress;
mod review;
mod watch;

pub use progress::{NoopReporter, Reporter};
pub use review::SubmitForReview;
pub use watch::{ProcessingWaiter, VersionExpectation};
