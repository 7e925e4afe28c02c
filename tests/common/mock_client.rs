//! In-memory fake resource client for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use store_review::client::ResourceClient;
use store_review::error::{Error, Result};
use store_review::submit::Reporter;
use store_review::types::{
    App, Build, ContentRightsDeclaration, IdfaDeclaration, Platform, ProcessingState, StoreVersion,
};

/// Call record for `list_builds`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBuildsCall {
    pub app_id: String,
    pub app_version: Option<String>,
    pub build_number: Option<String>,
    pub platform: Platform,
}

/// Call record for `update_build`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBuildCall {
    pub build_id: String,
    pub uses_non_exempt_encryption: Option<bool>,
}

/// Simple in-memory fake of the resource client.
///
/// Features:
/// - Ordered call log for sequencing assertions
/// - Per-method call records for argument verification
/// - Queued `list_builds` responses to simulate eventual consistency
/// - Error injection for failure path testing
pub struct MockResourceClient {
    app: Mutex<App>,
    editable_version: Mutex<Option<StoreVersion>>,
    builds_responses: Mutex<VecDeque<Vec<Build>>>,
    default_builds: Mutex<Vec<Build>>,
    idfa_declaration: Mutex<Option<IdfaDeclaration>>,
    // Call tracking
    call_log: Mutex<Vec<String>>,
    list_builds_calls: Mutex<Vec<ListBuildsCall>>,
    select_build_calls: Mutex<Vec<(String, String)>>,
    update_build_calls: Mutex<Vec<UpdateBuildCall>>,
    update_version_calls: Mutex<Vec<(String, bool)>>,
    delete_declaration_calls: Mutex<Vec<String>>,
    update_app_calls: Mutex<Vec<(String, ContentRightsDeclaration)>>,
    create_submission_calls: Mutex<Vec<String>>,
    // Error injection
    fail_fetch_declaration: Mutex<bool>,
    error_on_update_build: Mutex<Option<String>>,
    error_on_update_version: Mutex<Option<String>>,
    error_on_update_app: Mutex<Option<String>>,
}

impl MockResourceClient {
    /// Create a mock with the given app and an editable version
    pub fn new(app: App, editable_version: Option<StoreVersion>) -> Self {
        Self {
            app: Mutex::new(app),
            editable_version: Mutex::new(editable_version),
            builds_responses: Mutex::new(VecDeque::new()),
            default_builds: Mutex::new(Vec::new()),
            idfa_declaration: Mutex::new(None),
            call_log: Mutex::new(Vec::new()),
            list_builds_calls: Mutex::new(Vec::new()),
            select_build_calls: Mutex::new(Vec::new()),
            update_build_calls: Mutex::new(Vec::new()),
            update_version_calls: Mutex::new(Vec::new()),
            delete_declaration_calls: Mutex::new(Vec::new()),
            update_app_calls: Mutex::new(Vec::new()),
            create_submission_calls: Mutex::new(Vec::new()),
            fail_fetch_declaration: Mutex::new(false),
            error_on_update_build: Mutex::new(None),
            error_on_update_version: Mutex::new(None),
            error_on_update_app: Mutex::new(None),
        }
    }

    // === Response configuration ===

    /// Builds returned once the response queue is drained
    pub fn set_builds(&self, builds: Vec<Build>) {
        *self.default_builds.lock().unwrap() = builds;
    }

    /// Queue a one-shot `list_builds` response (FIFO)
    pub fn push_builds_response(&self, builds: Vec<Build>) {
        self.builds_responses.lock().unwrap().push_back(builds);
    }

    /// Attach an IDFA declaration to the editable version
    pub fn set_idfa_declaration(&self, declaration: Option<IdfaDeclaration>) {
        *self.idfa_declaration.lock().unwrap() = declaration;
    }

    // === Error injection ===

    /// Make `fetch_idfa_declaration` return an error
    pub fn fail_fetch_declaration(&self) {
        *self.fail_fetch_declaration.lock().unwrap() = true;
    }

    /// Make `update_build` return an error
    pub fn fail_update_build(&self, msg: &str) {
        *self.error_on_update_build.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `update_version` return an error
    pub fn fail_update_version(&self, msg: &str) {
        *self.error_on_update_version.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `update_app` return an error
    pub fn fail_update_app(&self, msg: &str) {
        *self.error_on_update_app.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification ===

    /// Ordered names of every operation invoked
    pub fn calls(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }

    /// Get all `list_builds` calls
    pub fn get_list_builds_calls(&self) -> Vec<ListBuildsCall> {
        self.list_builds_calls.lock().unwrap().clone()
    }

    /// Get all `select_build` calls as (version id, build id)
    pub fn get_select_build_calls(&self) -> Vec<(String, String)> {
        self.select_build_calls.lock().unwrap().clone()
    }

    /// Get all `update_build` calls
    pub fn get_update_build_calls(&self) -> Vec<UpdateBuildCall> {
        self.update_build_calls.lock().unwrap().clone()
    }

    /// Get all `update_version` calls as (version id, uses idfa)
    pub fn get_update_version_calls(&self) -> Vec<(String, bool)> {
        self.update_version_calls.lock().unwrap().clone()
    }

    /// Get all deleted declaration ids
    pub fn get_delete_declaration_calls(&self) -> Vec<String> {
        self.delete_declaration_calls.lock().unwrap().clone()
    }

    /// Get all `update_app` calls
    pub fn get_update_app_calls(&self) -> Vec<(String, ContentRightsDeclaration)> {
        self.update_app_calls.lock().unwrap().clone()
    }

    /// Get all `create_submission` calls
    pub fn get_create_submission_calls(&self) -> Vec<String> {
        self.create_submission_calls.lock().unwrap().clone()
    }

    /// Number of mutating calls (selects, updates, deletes, creates)
    pub fn mutation_count(&self) -> usize {
        self.get_select_build_calls().len()
            + self.get_update_build_calls().len()
            + self.get_update_version_calls().len()
            + self.get_delete_declaration_calls().len()
            + self.get_update_app_calls().len()
            + self.get_create_submission_calls().len()
    }

    fn log(&self, name: &str) {
        self.call_log.lock().unwrap().push(name.to_string());
    }
}

#[async_trait]
impl ResourceClient for MockResourceClient {
    async fn get_app(&self, _app_id: &str) -> Result<App> {
        self.log("get_app");
        Ok(self.app.lock().unwrap().clone())
    }

    async fn get_editable_version(
        &self,
        _app_id: &str,
        _platform: Platform,
    ) -> Result<Option<StoreVersion>> {
        self.log("get_editable_version");
        Ok(self.editable_version.lock().unwrap().clone())
    }

    async fn list_builds(
        &self,
        app_id: &str,
        app_version: Option<&str>,
        build_number: Option<&str>,
        platform: Platform,
    ) -> Result<Vec<Build>> {
        self.log("list_builds");
        self.list_builds_calls.lock().unwrap().push(ListBuildsCall {
            app_id: app_id.to_string(),
            app_version: app_version.map(ToString::to_string),
            build_number: build_number.map(ToString::to_string),
            platform,
        });

        if let Some(response) = self.builds_responses.lock().unwrap().pop_front() {
            return Ok(response);
        }
        Ok(self.default_builds.lock().unwrap().clone())
    }

    async fn select_build(&self, version_id: &str, build_id: &str) -> Result<()> {
        self.log("select_build");
        self.select_build_calls
            .lock()
            .unwrap()
            .push((version_id.to_string(), build_id.to_string()));
        Ok(())
    }

    async fn update_build(
        &self,
        build_id: &str,
        uses_non_exempt_encryption: Option<bool>,
    ) -> Result<Build> {
        self.log("update_build");
        self.update_build_calls.lock().unwrap().push(UpdateBuildCall {
            build_id: build_id.to_string(),
            uses_non_exempt_encryption,
        });

        if let Some(msg) = self.error_on_update_build.lock().unwrap().as_ref() {
            return Err(Error::Api(msg.clone()));
        }

        Ok(Build {
            id: build_id.to_string(),
            app_version: String::new(),
            version: String::new(),
            uses_non_exempt_encryption,
            processing_state: ProcessingState::Valid,
            uploaded_at: None,
        })
    }

    async fn update_version(&self, version_id: &str, uses_idfa: bool) -> Result<StoreVersion> {
        self.log("update_version");
        self.update_version_calls
            .lock()
            .unwrap()
            .push((version_id.to_string(), uses_idfa));

        if let Some(msg) = self.error_on_update_version.lock().unwrap().as_ref() {
            return Err(Error::Api(msg.clone()));
        }

        Ok(StoreVersion {
            id: version_id.to_string(),
            platform: Platform::Ios,
            version_string: None,
            uses_idfa: Some(uses_idfa),
        })
    }

    async fn fetch_idfa_declaration(&self, _version_id: &str) -> Result<Option<IdfaDeclaration>> {
        self.log("fetch_idfa_declaration");
        if *self.fail_fetch_declaration.lock().unwrap() {
            return Err(Error::Api("declaration fetch failed".to_string()));
        }
        Ok(self.idfa_declaration.lock().unwrap().clone())
    }

    async fn delete_idfa_declaration(&self, declaration_id: &str) -> Result<()> {
        self.log("delete_idfa_declaration");
        self.delete_declaration_calls
            .lock()
            .unwrap()
            .push(declaration_id.to_string());
        Ok(())
    }

    async fn update_app(
        &self,
        app_id: &str,
        content_rights: ContentRightsDeclaration,
    ) -> Result<App> {
        self.log("update_app");
        self.update_app_calls
            .lock()
            .unwrap()
            .push((app_id.to_string(), content_rights));

        if let Some(msg) = self.error_on_update_app.lock().unwrap().as_ref() {
            return Err(Error::Api(msg.clone()));
        }

        Ok(App {
            id: app_id.to_string(),
            content_rights_declaration: Some(content_rights),
        })
    }

    async fn create_submission(&self, version_id: &str) -> Result<()> {
        self.log("create_submission");
        self.create_submission_calls
            .lock()
            .unwrap()
            .push(version_id.to_string());
        Ok(())
    }
}

/// Reporter that records every message for assertions
#[derive(Default)]
pub struct RecordingReporter {
    infos: Mutex<Vec<String>>,
    warns: Mutex<Vec<String>>,
    successes: Mutex<Vec<String>>,
}

impl RecordingReporter {
    /// Create an empty recording reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// All info messages received so far
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    /// All warning messages received so far
    pub fn warns(&self) -> Vec<String> {
        self.warns.lock().unwrap().clone()
    }

    /// All success messages received so far
    pub fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Reporter for RecordingReporter {
    async fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    async fn warn(&self, message: &str) {
        self.warns.lock().unwrap().push(message.to_string());
    }

    async fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }
}
