//! Remote resource access for App Store Connect
//!
//! Provides the narrow capability set the submission workflow needs from the
//! backend, plus the HTTP adapter implementing it.

mod connect;

pub use connect::ConnectClient;

use crate::error::Result;
use crate::types::{App, Build, ContentRightsDeclaration, IdfaDeclaration, Platform, StoreVersion};
use async_trait::async_trait;

/// Capability set over the App Store Connect backend.
///
/// This trait abstracts every remote operation the submission workflow
/// performs, allowing the same orchestration logic to run against the real
/// API or an in-memory fake in tests.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Look up an app by its identifier
    async fn get_app(&self, app_id: &str) -> Result<App>;

    /// Find the editable store version for an app on a platform, if any
    async fn get_editable_version(
        &self,
        app_id: &str,
        platform: Platform,
    ) -> Result<Option<StoreVersion>>;

    /// List builds of an app, newest first, optionally filtered by
    /// marketing version and build number
    async fn list_builds(
        &self,
        app_id: &str,
        app_version: Option<&str>,
        build_number: Option<&str>,
        platform: Platform,
    ) -> Result<Vec<Build>>;

    /// Attach a build to a store version
    async fn select_build(&self, version_id: &str, build_id: &str) -> Result<()>;

    /// Set the export compliance flag on a build
    async fn update_build(
        &self,
        build_id: &str,
        uses_non_exempt_encryption: Option<bool>,
    ) -> Result<Build>;

    /// Set the advertising identifier usage flag on a store version
    async fn update_version(&self, version_id: &str, uses_idfa: bool) -> Result<StoreVersion>;

    /// Fetch the advertising identifier declaration of a version, if any
    async fn fetch_idfa_declaration(&self, version_id: &str) -> Result<Option<IdfaDeclaration>>;

    /// Delete an advertising identifier declaration
    async fn delete_idfa_declaration(&self, declaration_id: &str) -> Result<()>;

    /// Set the content rights declaration on an app
    async fn update_app(
        &self,
        app_id: &str,
        content_rights: ContentRightsDeclaration,
    ) -> Result<App>;

    /// Create the review submission for a store version
    async fn create_submission(&self, version_id: &str) -> Result<()>;
}
