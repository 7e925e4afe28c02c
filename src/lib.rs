//! store-review - submit App Store builds for review
//!
//! Orchestrates the final steps of a store submission: resolving the build
//! to submit, declaring export compliance, advertising identifier usage and
//! content rights against it, and creating the review submission itself.
//!
//! Remote access goes through the [`client::ResourceClient`] trait; progress
//! reporting goes through [`submit::Reporter`]. Both are injected so the
//! workflow runs unchanged against the real App Store Connect API, a CI
//! wrapper, or an in-memory fake in tests.

pub mod client;
pub mod error;
pub mod inspect;
pub mod submit;
pub mod types;
