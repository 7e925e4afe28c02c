//! Core types for store-review

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// An app registered on App Store Connect
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct App {
    /// Opaque App Store Connect identifier
    pub id: String,
    /// Current content rights declaration, if one has been made
    pub content_rights_declaration: Option<ContentRightsDeclaration>,
}

/// Store platform an app ships on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    /// iPhone / iPad
    Ios,
    /// Mac
    MacOs,
    /// Apple TV
    TvOs,
}

impl Platform {
    /// Map a user-supplied platform string to a platform.
    ///
    /// Accepts the conventional build-tool spellings ("ios", "osx",
    /// "appletvos") as well as the plain names.
    pub fn map(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "osx" | "macos" | "mac" => Ok(Self::MacOs),
            "appletvos" | "tvos" => Ok(Self::TvOs),
            _ => Err(Error::UnknownPlatform(value.to_string())),
        }
    }

    /// The identifier the remote API uses for this platform
    pub const fn as_api_str(self) -> &'static str {
        match self {
            Self::Ios => "IOS",
            Self::MacOs => "MAC_OS",
            Self::TvOs => "TV_OS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// An App Store version of an app on one platform
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreVersion {
    /// Opaque version identifier
    pub id: String,
    /// Platform this version ships on
    pub platform: Platform,
    /// Marketing version string (e.g. "1.2.0")
    pub version_string: Option<String>,
    /// Whether the version uses the advertising identifier for tracking
    pub uses_idfa: Option<bool>,
}

/// Backend processing state of an uploaded build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingState {
    /// Still being validated by the backend
    Processing,
    /// Validation failed
    Failed,
    /// Binary was rejected as invalid
    Invalid,
    /// Processing finished, build is selectable
    Valid,
}

impl ProcessingState {
    /// Whether the build has finished processing successfully
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// An uploaded build of an app
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Build {
    /// Opaque build identifier
    pub id: String,
    /// Marketing version the build belongs to (e.g. "1.2.0")
    pub app_version: String,
    /// Build number string (e.g. "42")
    pub version: String,
    /// Export compliance flag; `None` means not yet declared
    pub uses_non_exempt_encryption: Option<bool>,
    /// Backend processing state
    pub processing_state: ProcessingState,
    /// When the build was uploaded
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Advertising identifier declaration attached to a store version
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdfaDeclaration {
    /// Opaque declaration identifier
    pub id: String,
}

/// App-level declaration of third-party content rights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentRightsDeclaration {
    /// App contains content owned by third parties
    UsesThirdPartyContent,
    /// App contains no third-party content
    DoesNotUseThirdPartyContent,
}

/// Compliance answers supplied with a submission.
///
/// Each field models a key that may be absent: `None` means the key was not
/// provided and the corresponding attribute must not be touched. For the
/// advertising identifier in particular, presence of the key is itself
/// meaningful.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionInformation {
    /// Whether the build uses non-exempt encryption
    pub export_compliance_uses_encryption: Option<bool>,
    /// Whether the version uses the advertising identifier
    pub add_id_info_uses_idfa: Option<bool>,
    /// Whether the app contains third-party content
    pub content_rights_contains_third_party_content: Option<bool>,
}

/// Full input to one submission run
#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    /// App Store Connect app identifier
    pub app_id: String,
    /// User-supplied platform string (see [`Platform::map`])
    pub platform: String,
    /// Explicit build number, or the sentinel "latest"
    pub build_number: Option<String>,
    /// Explicit marketing version to filter builds by
    pub app_version: Option<String>,
    /// Local ipa file to derive version expectations from
    pub ipa: Option<PathBuf>,
    /// Local pkg file to derive version expectations from
    pub pkg: Option<PathBuf>,
    /// Compliance answers
    pub submission_information: SubmissionInformation,
}
