use crate::error::{RemoteResult, RemoteStoreError};
use crate::remote::RemoteProfileStore;
use crate::types::Profile;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for [`HttpRemoteStore`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpRemoteConfig {
    /// Base URL of the document API, e.g. `https://api.example.org/v1`
    pub base_url: String,

    /// Collection holding one document per user
    pub collection: String,

    /// Bearer token of the signed-in user, if any
    pub auth_token: Option<String>,

    pub connect_timeout_ms: u64,

    pub request_timeout_ms: u64,
}

impl Default for HttpRemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            collection: "farmers".to_string(),
            auth_token: None,
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
        }
    }
}

impl HttpRemoteConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must be set".to_string());
        }
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url '{}' is not a valid URL: {e}", self.base_url))?;
        if url.cannot_be_a_base() {
            return Err(format!("base_url '{}' cannot be a base URL", self.base_url));
        }
        if self.collection.trim().is_empty() || self.collection.contains('/') {
            return Err(format!(
                "collection '{}' must be a single non-empty path segment",
                self.collection
            ));
        }
        if self.connect_timeout_ms == 0 || self.request_timeout_ms == 0 {
            return Err("timeouts must be > 0".to_string());
        }
        Ok(())
    }
}

/// [`RemoteProfileStore`] backed by a JSON document API.
///
/// | call   | request                                   |
/// |--------|-------------------------------------------|
/// | fetch  | `GET {base}/{collection}/{userId}`        |
/// | create | `PUT {base}/{collection}/{userId}`        |
/// | update | `PATCH {base}/{collection}/{userId}`      |
/// | exists | `GET`, 404 meaning absent                 |
pub struct HttpRemoteStore {
    client: Client,
    base_url: Url,
    collection: String,
    auth_token: Option<String>,
}

impl HttpRemoteStore {
    pub fn new(config: HttpRemoteConfig) -> RemoteResult<Self> {
        config.validate().map_err(RemoteStoreError::InvalidConfig)?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| RemoteStoreError::InvalidConfig(e.to_string()))?;
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url,
            collection: config.collection,
            auth_token: config.auth_token,
        })
    }

    /// Replace the bearer token after the auth layer refreshes it
    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    fn document_url(&self, user_id: &str) -> RemoteResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteStoreError::InvalidConfig("base_url cannot be a base".into()))?
            .pop_if_empty()
            .push(&self.collection)
            .push(user_id);
        Ok(url)
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_document(&self, user_id: &str) -> RemoteResult<Option<Profile>> {
        let url = self.document_url(user_id)?;
        log::debug!("remote store: GET {url}");
        let response = self.request(reqwest::Method::GET, url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RemoteStoreError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let mut profile: Profile = serde_json::from_str(&body)?;
        // Documents keyed by path may omit the id field.
        if profile.user_id.is_empty() {
            profile.user_id = user_id.to_string();
        } else if profile.user_id != user_id {
            return Err(RemoteStoreError::IdentityMismatch {
                requested: user_id.to_string(),
                found: profile.user_id,
            });
        }
        Ok(Some(profile))
    }

    async fn send_document(&self, method: reqwest::Method, profile: &Profile) -> RemoteResult<()> {
        let url = self.document_url(&profile.user_id)?;
        log::debug!("remote store: {method} {url}");
        let response = self
            .request(method, url.clone())
            .json(profile)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteStoreError::NotFound(profile.user_id.clone()));
        }
        if !status.is_success() {
            return Err(RemoteStoreError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteProfileStore for HttpRemoteStore {
    async fn fetch(&self, user_id: &str) -> RemoteResult<Option<Profile>> {
        self.get_document(user_id).await
    }

    async fn create(&self, profile: &Profile) -> RemoteResult<()> {
        self.send_document(reqwest::Method::PUT, profile).await
    }

    async fn update(&self, profile: &Profile) -> RemoteResult<()> {
        self.send_document(reqwest::Method::PATCH, profile).await
    }

    async fn exists(&self, user_id: &str) -> RemoteResult<bool> {
        Ok(self.get_document(user_id).await?.is_some())
    }
}
