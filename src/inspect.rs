//! Package inspection boundary
//!
//! Extracting the marketing version and build number from local ipa/pkg
//! artifacts is delegated to an inspector so the submission workflow never
//! has to understand package formats itself.

use std::path::Path;

/// Extracts version metadata from a local package file.
///
/// Implementations return `None` when a value can not be determined; the
/// workflow then simply waits without that expectation.
pub trait PackageInspector: Send + Sync {
    /// Marketing version declared by the package (e.g. "1.2.0")
    fn app_version(&self, path: &Path) -> Option<String>;

    /// Build number declared by the package (e.g. "42")
    fn build_number(&self, path: &Path) -> Option<String>;
}

/// Inspector that never reports metadata.
///
/// Used when no local artifacts are available, or when callers prefer to
/// pass explicit versions instead of inspecting files.
pub struct NoopInspector;

impl PackageInspector for NoopInspector {
    fn app_version(&self, _path: &Path) -> Option<String> {
        None
    }

    fn build_number(&self, _path: &Path) -> Option<String> {
        None
    }
}
