//! App Store Connect API adapter
//!
//! Speaks the JSON:API dialect of the App Store Connect v1 API using a
//! caller-supplied bearer token. Token minting and key handling happen
//! outside this crate.

use crate::client::ResourceClient;
use crate::error::{Error, Result};
use crate::types::{
    App, Build, ContentRightsDeclaration, IdfaDeclaration, Platform, ProcessingState, StoreVersion,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Production API base URL
const DEFAULT_BASE_URL: &str = "https://api.appstoreconnect.apple.com/v1";

/// Version states that still accept metadata changes and build selection
const EDITABLE_STATES: &str = "PREPARE_FOR_SUBMISSION,METADATA_REJECTED,DEVELOPER_REJECTED,\
                               REJECTED,INVALID_BINARY,WAITING_FOR_REVIEW";

/// App Store Connect client using reqwest
pub struct ConnectClient {
    client: Client,
    token: String,
    base_url: String,
}

#[derive(Deserialize)]
struct Document<T> {
    data: T,
}

#[derive(Deserialize)]
struct ListDocument<T> {
    data: Vec<T>,
    #[serde(default)]
    included: Vec<IncludedResource>,
}

#[derive(Deserialize)]
struct IncludedResource {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    attributes: serde_json::Value,
}

#[derive(Deserialize)]
struct AppResource {
    id: String,
    attributes: AppAttributes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppAttributes {
    content_rights_declaration: Option<ContentRightsDeclaration>,
}

#[derive(Deserialize)]
struct VersionResource {
    id: String,
    attributes: VersionAttributes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionAttributes {
    platform: Platform,
    version_string: Option<String>,
    uses_idfa: Option<bool>,
}

#[derive(Deserialize)]
struct BuildResource {
    id: String,
    attributes: BuildAttributes,
    #[serde(default)]
    relationships: Option<BuildRelationships>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildAttributes {
    version: String,
    uses_non_exempt_encryption: Option<bool>,
    processing_state: ProcessingState,
    uploaded_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildRelationships {
    pre_release_version: Option<Relationship>,
}

#[derive(Deserialize)]
struct Relationship {
    data: Option<RelationshipData>,
}

#[derive(Deserialize)]
struct RelationshipData {
    id: String,
}

#[derive(Deserialize)]
struct IdfaResource {
    id: String,
}

impl ConnectClient {
    /// Create a client against the production API
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (used in tests)
    pub fn with_base_url(token: String, base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            base_url: base_url.into(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn map_version(resource: VersionResource) -> StoreVersion {
        StoreVersion {
            id: resource.id,
            platform: resource.attributes.platform,
            version_string: resource.attributes.version_string,
            uses_idfa: resource.attributes.uses_idfa,
        }
    }

    /// Map a build resource, resolving its marketing version through the
    /// `included` pre-release version resources when present.
    fn map_build(resource: BuildResource, versions_by_id: &HashMap<String, String>) -> Build {
        let app_version = resource
            .relationships
            .as_ref()
            .and_then(|r| r.pre_release_version.as_ref())
            .and_then(|rel| rel.data.as_ref())
            .and_then(|data| versions_by_id.get(&data.id))
            .cloned()
            .unwrap_or_default();

        Build {
            id: resource.id,
            app_version,
            version: resource.attributes.version,
            uses_non_exempt_encryption: resource.attributes.uses_non_exempt_encryption,
            processing_state: resource.attributes.processing_state,
            uploaded_at: resource.attributes.uploaded_date,
        }
    }

    fn pre_release_versions(included: &[IncludedResource]) -> HashMap<String, String> {
        included
            .iter()
            .filter(|r| r.kind == "preReleaseVersions")
            .filter_map(|r| {
                r.attributes
                    .get("version")
                    .and_then(serde_json::Value::as_str)
                    .map(|v| (r.id.clone(), v.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl ResourceClient for ConnectClient {
    async fn get_app(&self, app_id: &str) -> Result<App> {
        let url = self.api_url(&format!("/apps/{app_id}"));

        let doc: Document<AppResource> = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Api(e.to_string()))?
            .json()
            .await?;

        Ok(App {
            id: doc.data.id,
            content_rights_declaration: doc.data.attributes.content_rights_declaration,
        })
    }

    async fn get_editable_version(
        &self,
        app_id: &str,
        platform: Platform,
    ) -> Result<Option<StoreVersion>> {
        let url = self.api_url(&format!("/apps/{app_id}/appStoreVersions"));

        let doc: ListDocument<VersionResource> = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[
                ("filter[platform]", platform.as_api_str()),
                ("filter[appStoreState]", EDITABLE_STATES),
                ("limit", "1"),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Api(e.to_string()))?
            .json()
            .await?;

        Ok(doc.data.into_iter().next().map(Self::map_version))
    }

    async fn list_builds(
        &self,
        app_id: &str,
        app_version: Option<&str>,
        build_number: Option<&str>,
        platform: Platform,
    ) -> Result<Vec<Build>> {
        let url = self.api_url("/builds");

        let mut query = vec![
            ("filter[app]", app_id),
            ("filter[preReleaseVersion.platform]", platform.as_api_str()),
            ("include", "preReleaseVersion"),
            ("sort", "-uploadedDate"),
        ];
        if let Some(version) = app_version {
            query.push(("filter[preReleaseVersion.version]", version));
        }
        if let Some(number) = build_number {
            query.push(("filter[version]", number));
        }

        let doc: ListDocument<BuildResource> = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&query)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Api(e.to_string()))?
            .json()
            .await?;

        let versions_by_id = Self::pre_release_versions(&doc.included);
        Ok(doc
            .data
            .into_iter()
            .map(|b| Self::map_build(b, &versions_by_id))
            .collect())
    }

    async fn select_build(&self, version_id: &str, build_id: &str) -> Result<()> {
        let url = self.api_url(&format!("/appStoreVersions/{version_id}/relationships/build"));

        self.client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "data": { "type": "builds", "id": build_id }
            }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Api(e.to_string()))?;

        Ok(())
    }

    async fn update_build(
        &self,
        build_id: &str,
        uses_non_exempt_encryption: Option<bool>,
    ) -> Result<Build> {
        let url = self.api_url(&format!("/builds/{build_id}"));

        let doc: Document<BuildResource> = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "data": {
                    "type": "builds",
                    "id": build_id,
                    "attributes": { "usesNonExemptEncryption": uses_non_exempt_encryption }
                }
            }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Api(e.to_string()))?
            .json()
            .await?;

        // Update responses carry no included resources, so the marketing
        // version may come back empty here.
        Ok(Self::map_build(doc.data, &HashMap::new()))
    }

    async fn update_version(&self, version_id: &str, uses_idfa: bool) -> Result<StoreVersion> {
        let url = self.api_url(&format!("/appStoreVersions/{version_id}"));

        let doc: Document<VersionResource> = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "data": {
                    "type": "appStoreVersions",
                    "id": version_id,
                    "attributes": { "usesIdfa": uses_idfa }
                }
            }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Api(e.to_string()))?
            .json()
            .await?;

        Ok(Self::map_version(doc.data))
    }

    async fn fetch_idfa_declaration(&self, version_id: &str) -> Result<Option<IdfaDeclaration>> {
        let url = self.api_url(&format!("/appStoreVersions/{version_id}/idfaDeclaration"));

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let doc: Document<IdfaResource> = response
            .error_for_status()
            .map_err(|e| Error::Api(e.to_string()))?
            .json()
            .await?;

        Ok(Some(IdfaDeclaration { id: doc.data.id }))
    }

    async fn delete_idfa_declaration(&self, declaration_id: &str) -> Result<()> {
        let url = self.api_url(&format!("/idfaDeclarations/{declaration_id}"));

        self.client
            .delete(&url)
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Api(e.to_string()))?;

        Ok(())
    }

    async fn update_app(
        &self,
        app_id: &str,
        content_rights: ContentRightsDeclaration,
    ) -> Result<App> {
        let url = self.api_url(&format!("/apps/{app_id}"));

        let doc: Document<AppResource> = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "data": {
                    "type": "apps",
                    "id": app_id,
                    "attributes": { "contentRightsDeclaration": content_rights }
                }
            }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Api(e.to_string()))?
            .json()
            .await?;

        Ok(App {
            id: doc.data.id,
            content_rights_declaration: doc.data.attributes.content_rights_declaration,
        })
    }

    async fn create_submission(&self, version_id: &str) -> Result<()> {
        let url = self.api_url("/appStoreVersionSubmissions");

        self.client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({
                "data": {
                    "type": "appStoreVersionSubmissions",
                    "relationships": {
                        "appStoreVersion": {
                            "data": { "type": "appStoreVersions", "id": version_id }
                        }
                    }
                }
            }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Api(e.to_string()))?;

        Ok(())
    }
}
