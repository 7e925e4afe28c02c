//! Build processing watcher
//!
//! A freshly uploaded build is not immediately selectable: the backend
//! reports it as processing for a while. The watcher polls until a matching
//! build reaches the completed state.

use crate::client::ResourceClient;
use crate::error::{Error, Result};
use crate::inspect::PackageInspector;
use crate::submit::Reporter;
use crate::types::{App, Build, Platform, ProcessingState, SubmitOptions};
use std::time::Duration;

/// Default delay between remote checks
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// The (marketing version, build number) pair a wait expects to see.
///
/// Either side may be absent; absent sides match any build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionExpectation {
    /// Expected marketing version (e.g. "1.2.0")
    pub app_version: Option<String>,
    /// Expected build number (e.g. "42")
    pub build_number: Option<String>,
}

impl VersionExpectation {
    /// Resolve the expectation from submission options.
    ///
    /// The marketing version comes from the explicit option first, then the
    /// ipa, then the pkg. The build number only ever comes from local
    /// artifacts; an explicit `build_number` option routes through direct
    /// lookup instead of the watcher.
    pub fn resolve(options: &SubmitOptions, inspector: &dyn PackageInspector) -> Self {
        let app_version = options
            .app_version
            .clone()
            .or_else(|| options.ipa.as_deref().and_then(|p| inspector.app_version(p)))
            .or_else(|| options.pkg.as_deref().and_then(|p| inspector.app_version(p)));

        let build_number = options
            .ipa
            .as_deref()
            .and_then(|p| inspector.build_number(p))
            .or_else(|| options.pkg.as_deref().and_then(|p| inspector.build_number(p)));

        Self {
            app_version,
            build_number,
        }
    }

    /// Whether a build carries the expected identifiers.
    ///
    /// Only compares the sides the expectation actually has.
    pub fn matches(&self, build: &Build) -> bool {
        self.app_version
            .as_deref()
            .is_none_or(|v| v == build.app_version)
            && self.build_number.as_deref().is_none_or(|n| n == build.version)
    }
}

/// Polls the backend until a build finishes processing.
///
/// The wait is unbounded; callers needing a deadline should wrap the call
/// in `tokio::time::timeout`.
#[derive(Debug, Clone)]
pub struct ProcessingWaiter {
    poll_interval: Duration,
}

impl Default for ProcessingWaiter {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl ProcessingWaiter {
    /// Create a waiter with a custom poll interval
    pub const fn with_poll_interval(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    /// Block until a build matching the expectation completes processing.
    ///
    /// Each poll lists builds filtered by the expectation; a build merely
    /// existing is not enough, it must report the completed state. A
    /// matching build whose processing failed aborts the wait.
    pub async fn wait_for_build(
        &self,
        client: &dyn ResourceClient,
        app: &App,
        platform: Platform,
        expected: &VersionExpectation,
        reporter: &dyn Reporter,
    ) -> Result<Build> {
        loop {
            let builds = client
                .list_builds(
                    &app.id,
                    expected.app_version.as_deref(),
                    expected.build_number.as_deref(),
                    platform,
                )
                .await?;

            if let Some(build) = builds.iter().find(|b| b.processing_state.is_complete()) {
                return Ok(build.clone());
            }

            if let Some(failed) = builds.iter().find(|b| {
                matches!(
                    b.processing_state,
                    ProcessingState::Failed | ProcessingState::Invalid
                )
            }) {
                return Err(Error::BuildProcessingFailed(failed.id.clone()));
            }

            tracing::debug!(
                app = %app.id,
                %platform,
                "no completed build yet, sleeping {:?}",
                self.poll_interval
            );
            reporter
                .info("Waiting for the build to finish processing...")
                .await;
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
