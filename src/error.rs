//! Error types for store-review

use crate::types::Platform;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// All errors produced by the submission workflow
#[derive(Debug, Error)]
pub enum Error {
    /// The platform string did not map to a known platform
    #[error("unknown platform '{0}' (expected ios, osx or appletvos)")]
    UnknownPlatform(String),

    /// No editable version exists for the requested platform
    #[error("cannot submit for review - could not find an editable version for '{0}'")]
    NoEditableVersion(Platform),

    /// An explicitly requested build number does not exist
    #[error("build number '{0}' does not exist")]
    BuildNotFound(String),

    /// The remote reported that build processing failed
    #[error("build {0} failed processing and can not be submitted")]
    BuildProcessingFailed(String),

    /// App Store Connect API returned an error response
    #[error("App Store Connect API error: {0}")]
    Api(String),

    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal invariant violation
    #[error("internal error: {0}")]
    Internal(String),
}
