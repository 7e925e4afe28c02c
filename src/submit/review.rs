//! Review submission orchestration
//!
//! Runs the final steps of putting a build in front of app review: resolve
//! the editable version, resolve and attach a build, declare compliance
//! attributes, create the submission. The workflow is append-forward; a
//! failure aborts the remaining steps but never rolls back earlier updates.

use crate::client::ResourceClient;
use crate::error::{Error, Result};
use crate::inspect::PackageInspector;
use crate::submit::{ProcessingWaiter, Reporter, VersionExpectation};
use crate::types::{App, Build, ContentRightsDeclaration, Platform, StoreVersion, SubmitOptions};
use std::time::Duration;

/// Build number sentinel meaning "newest processed build"
const LATEST: &str = "latest";

/// One self-contained review submission run.
///
/// Holds no state beyond its collaborators; each run owns its resolved
/// app/version/build references only for the duration of [`Self::submit`].
pub struct SubmitForReview<'a> {
    client: &'a dyn ResourceClient,
    inspector: &'a dyn PackageInspector,
    reporter: &'a dyn Reporter,
    waiter: ProcessingWaiter,
}

impl<'a> SubmitForReview<'a> {
    /// Create a submission run with the default 15 second poll interval
    pub fn new(
        client: &'a dyn ResourceClient,
        inspector: &'a dyn PackageInspector,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            client,
            inspector,
            reporter,
            waiter: ProcessingWaiter::default(),
        }
    }

    /// Override the poll interval used while waiting for build processing
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.waiter = ProcessingWaiter::with_poll_interval(poll_interval);
        self
    }

    /// Submit the app for review.
    ///
    /// Sequence: resolve app and editable version, resolve and attach a
    /// build, run the compliance updaters, create the submission record.
    pub async fn submit(&self, options: &SubmitOptions) -> Result<()> {
        let app = self.client.get_app(&options.app_id).await?;
        let platform = Platform::map(&options.platform)?;

        let version = self
            .client
            .get_editable_version(&app.id, platform)
            .await?
            .ok_or(Error::NoEditableVersion(platform))?;

        let build = self.select_build(options, &app, &version, platform).await?;

        self.update_export_compliance(options, &build).await?;
        self.update_idfa(options, &version).await?;
        self.update_content_rights(options, &app).await?;

        self.client.create_submission(&version.id).await?;

        self.reporter
            .success("Successfully submitted the app for review!")
            .await;

        Ok(())
    }

    /// Resolve the build to submit and attach it to the version.
    ///
    /// An explicit build number (other than the "latest" sentinel) is looked
    /// up directly and must exist; otherwise the newest build that finishes
    /// processing is used.
    pub async fn select_build(
        &self,
        options: &SubmitOptions,
        app: &App,
        version: &StoreVersion,
        platform: Platform,
    ) -> Result<Build> {
        let build = match options.build_number.as_deref() {
            Some(number) if number != LATEST => {
                self.reporter
                    .info(&format!("Selecting existing build-number: {number}"))
                    .await;

                self.client
                    .list_builds(&app.id, options.app_version.as_deref(), Some(number), platform)
                    .await?
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::BuildNotFound(number.to_string()))?
            }
            _ => {
                self.reporter.info("Selecting the latest build...").await;
                self.wait_for_build_processing(options, app, platform)
                    .await?
            }
        };

        self.reporter
            .info(&format!(
                "Selecting build {} ({})...",
                build.app_version, build.version
            ))
            .await;

        self.client.select_build(&version.id, &build.id).await?;

        self.reporter.success("Successfully selected build").await;

        Ok(build)
    }

    /// Wait for the newest build to finish processing, warning when it does
    /// not carry the identifiers the local artifacts suggested.
    async fn wait_for_build_processing(
        &self,
        options: &SubmitOptions,
        app: &App,
        platform: Platform,
    ) -> Result<Build> {
        let expected = VersionExpectation::resolve(options, self.inspector);

        let build = self
            .waiter
            .wait_for_build(self.client, app, platform, &expected, self.reporter)
            .await?;

        if !expected.matches(&build) {
            self.reporter
                .warn(&format!(
                    "Uploaded app {} - {}, but received build {} - {}.",
                    expected.app_version.as_deref().unwrap_or("?"),
                    expected.build_number.as_deref().unwrap_or("?"),
                    build.app_version,
                    build.version
                ))
                .await;
        }

        Ok(build)
    }

    /// Declare export compliance on the build.
    ///
    /// The flag is append-once: an already declared build is left untouched.
    /// An undeclared build is updated even when no answer was supplied, so
    /// the attribute is explicitly set exactly once.
    pub async fn update_export_compliance(
        &self,
        options: &SubmitOptions,
        build: &Build,
    ) -> Result<()> {
        let uses_encryption = options
            .submission_information
            .export_compliance_uses_encryption;

        tracing::debug!(build = %build.id, ?uses_encryption, "updating export compliance");

        if build.uses_non_exempt_encryption.is_none() {
            let updated = self.client.update_build(&build.id, uses_encryption).await?;
            tracing::debug!(
                build = %updated.id,
                status = ?updated.uses_non_exempt_encryption,
                "updated export compliance"
            );
        }

        Ok(())
    }

    /// Declare advertising identifier usage on the version.
    ///
    /// A no-op when the answer key is absent. When present, the version flag
    /// is always overwritten; a `false` answer additionally deletes any
    /// existing declaration resource.
    pub async fn update_idfa(&self, options: &SubmitOptions, version: &StoreVersion) -> Result<()> {
        let Some(uses_idfa) = options.submission_information.add_id_info_uses_idfa else {
            return Ok(());
        };

        // Absence or fetch failure both mean "no declaration to delete".
        let declaration = self
            .client
            .fetch_idfa_declaration(&version.id)
            .await
            .ok()
            .flatten();

        tracing::debug!(version = %version.id, uses_idfa, "updating advertising identifier usage");
        self.client.update_version(&version.id, uses_idfa).await?;

        if !uses_idfa {
            if let Some(declaration) = declaration {
                tracing::debug!(declaration = %declaration.id, "deleting IDFA declaration");
                self.client.delete_idfa_declaration(&declaration.id).await?;
            }
        }

        self.reporter
            .success("Successfully updated IDFA declarations")
            .await;

        Ok(())
    }

    /// Declare third-party content rights on the app.
    ///
    /// A no-op when the answer key is absent.
    pub async fn update_content_rights(&self, options: &SubmitOptions, app: &App) -> Result<()> {
        let Some(third_party) = options
            .submission_information
            .content_rights_contains_third_party_content
        else {
            return Ok(());
        };

        let value = if third_party {
            ContentRightsDeclaration::UsesThirdPartyContent
        } else {
            ContentRightsDeclaration::DoesNotUseThirdPartyContent
        };

        self.reporter
            .success("Updating content rights declaration on App Store Connect")
            .await;

        self.client.update_app(&app.id, value).await?;

        Ok(())
    }
}
