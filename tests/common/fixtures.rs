//! Test data factories for store-review types
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use store_review::types::{
    App, Build, IdfaDeclaration, Platform, ProcessingState, StoreVersion, SubmissionInformation,
    SubmitOptions,
};

/// Create an app with no content rights declaration
pub fn make_app(id: &str) -> App {
    App {
        id: id.to_string(),
        content_rights_declaration: None,
    }
}

/// Create an editable iOS store version
pub fn make_version(id: &str) -> StoreVersion {
    StoreVersion {
        id: id.to_string(),
        platform: Platform::Ios,
        version_string: Some("1.0".to_string()),
        uses_idfa: None,
    }
}

/// Create a fully processed build with no compliance declaration
pub fn make_build(id: &str, app_version: &str, version: &str) -> Build {
    Build {
        id: id.to_string(),
        app_version: app_version.to_string(),
        version: version.to_string(),
        uses_non_exempt_encryption: None,
        processing_state: ProcessingState::Valid,
        uploaded_at: None,
    }
}

/// Create a build that is still processing
pub fn make_processing_build(id: &str, app_version: &str, version: &str) -> Build {
    Build {
        processing_state: ProcessingState::Processing,
        ..make_build(id, app_version, version)
    }
}

/// Create a build whose processing failed
pub fn make_failed_build(id: &str, app_version: &str, version: &str) -> Build {
    Build {
        processing_state: ProcessingState::Failed,
        ..make_build(id, app_version, version)
    }
}

/// Create a build with its compliance flag already declared
pub fn make_declared_build(id: &str, app_version: &str, version: &str, encryption: bool) -> Build {
    Build {
        uses_non_exempt_encryption: Some(encryption),
        ..make_build(id, app_version, version)
    }
}

/// Create an IDFA declaration
pub fn make_declaration(id: &str) -> IdfaDeclaration {
    IdfaDeclaration {
        id: id.to_string(),
    }
}

/// Create submit options for an iOS app with no compliance answers
pub fn make_options(app_id: &str) -> SubmitOptions {
    SubmitOptions {
        app_id: app_id.to_string(),
        platform: "ios".to_string(),
        ..Default::default()
    }
}

/// Create submit options carrying all three compliance answers
pub fn make_options_with_answers(
    app_id: &str,
    encryption: Option<bool>,
    idfa: Option<bool>,
    third_party: Option<bool>,
) -> SubmitOptions {
    SubmitOptions {
        submission_information: SubmissionInformation {
            export_compliance_uses_encryption: encryption,
            add_id_info_uses_idfa: idfa,
            content_rights_contains_third_party_content: third_party,
        },
        ..make_options(app_id)
    }
}
