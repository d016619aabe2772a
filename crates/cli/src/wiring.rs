use crate::config::FarmerConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use farmer_profile_store::{
    HttpRemoteStore, JsonFileLocalStore, Profile, RemoteProfileStore, RemoteResult,
    RemoteStoreError,
};
use farmer_reference_data::ReferenceDataClient;
use farmer_sync::SyncManager;
use farmer_text_profile::{ProfileTextFileManager, ValidationThresholds};
use std::path::PathBuf;
use std::sync::Arc;

pub const PROFILE_STORE_FILE: &str = "profiles.json";

/// Stand-in remote used when no cloud endpoint is configured. Every call
/// fails as unavailable, so the flows degrade exactly as they do offline.
struct DetachedRemote;

impl DetachedRemote {
    fn unavailable<T>() -> RemoteResult<T> {
        Err(RemoteStoreError::Unavailable(
            "no remote endpoint configured".to_string(),
        ))
    }
}

#[async_trait]
impl RemoteProfileStore for DetachedRemote {
    async fn fetch(&self, _user_id: &str) -> RemoteResult<Option<Profile>> {
        Self::unavailable()
    }

    async fn create(&self, _profile: &Profile) -> RemoteResult<()> {
        Self::unavailable()
    }

    async fn update(&self, _profile: &Profile) -> RemoteResult<()> {
        Self::unavailable()
    }

    async fn exists(&self, _user_id: &str) -> RemoteResult<bool> {
        Self::unavailable()
    }
}

/// Process-wide handles, built once from the resolved configuration
pub struct App {
    pub config: FarmerConfig,
    pub data_dir: PathBuf,
}

impl App {
    pub fn new(config: FarmerConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        let data_dir = config.resolve_data_dir();
        Ok(Self { config, data_dir })
    }

    pub async fn sync_manager(&self) -> Result<Arc<SyncManager>> {
        let store_path = self.data_dir.join(PROFILE_STORE_FILE);
        let local = JsonFileLocalStore::open(&store_path)
            .await
            .with_context(|| format!("Failed to open profile store {}", store_path.display()))?;

        let remote: Arc<dyn RemoteProfileStore> = if self.config.remote_enabled() {
            let store = HttpRemoteStore::new(self.config.remote.clone())
                .context("Failed to build remote store")?;
            Arc::new(store)
        } else {
            log::info!("No remote endpoint configured; cloud steps will be skipped");
            Arc::new(DetachedRemote)
        };

        Ok(Arc::new(SyncManager::new(Arc::new(local), remote)))
    }

    pub fn text_manager(&self) -> Result<ProfileTextFileManager> {
        ProfileTextFileManager::with_config(
            &self.data_dir,
            self.config.chunking,
            ValidationThresholds::default(),
        )
        .context("Failed to configure text profile")
    }

    pub fn reference_client(&self) -> Result<ReferenceDataClient> {
        if self.config.reference.base_url.trim().is_empty() {
            anyhow::bail!(
                "No reference data endpoint configured (set [reference] base_url or FARMER_REFERENCE_URL)"
            );
        }
        ReferenceDataClient::new(self.config.reference.clone())
            .context("Failed to build reference data client")
    }
}
