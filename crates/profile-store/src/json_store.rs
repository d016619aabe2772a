use crate::error::{Result, StoreError};
use crate::local::{find_by_phone, LocalProfileStore};
use crate::types::Profile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

const STORE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedProfiles {
    schema_version: u32,
    profiles: BTreeMap<String, Profile>,
}

/// [`LocalProfileStore`] persisted as a single JSON file.
///
/// The whole file is rewritten on every mutation through a temp file and a
/// rename, so a crash leaves either the old or the new contents on disk.
/// Profiles are cached in memory behind one mutex, which also serializes
/// writers within the process.
pub struct JsonFileLocalStore {
    path: PathBuf,
    profiles: Mutex<BTreeMap<String, Profile>>,
}

impl JsonFileLocalStore {
    /// Open the store at `path`, loading existing records if the file exists
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let profiles = if tokio::fs::try_exists(&path).await? {
            log::info!("Loading profile store from {}", path.display());
            let bytes = tokio::fs::read(&path).await?;
            let persisted: PersistedProfiles = serde_json::from_slice(&bytes)?;
            if persisted.schema_version != STORE_SCHEMA_VERSION {
                return Err(StoreError::Unavailable(format!(
                    "unsupported profile store schema_version {} (expected {STORE_SCHEMA_VERSION})",
                    persisted.schema_version
                )));
            }
            persisted.profiles
        } else {
            log::debug!("No profile store at {}, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            profiles: Mutex::new(profiles),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, profiles: &BTreeMap<String, Profile>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let persisted = PersistedProfiles {
            schema_version: STORE_SCHEMA_VERSION,
            profiles: profiles.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&persisted)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Apply `mutate` to a copy and only swap it in once it is on disk
    async fn commit<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, Profile>) -> Result<()> + Send,
    {
        let mut guard = self.profiles.lock().await;
        let mut next = guard.clone();
        mutate(&mut next)?;
        self.persist(&next).await?;
        *guard = next;
        Ok(())
    }
}

#[async_trait]
impl LocalProfileStore for JsonFileLocalStore {
    async fn insert_or_replace(&self, profile: &Profile) -> Result<()> {
        profile.validate()?;
        log::debug!("profile store: upsert {}", profile.user_id);
        self.commit(|profiles| {
            profiles.insert(profile.user_id.clone(), profile.clone());
            Ok(())
        })
        .await
    }

    async fn update(&self, profile: &Profile) -> Result<()> {
        profile.validate()?;
        log::debug!("profile store: update {}", profile.user_id);
        self.commit(|profiles| match profiles.get_mut(&profile.user_id) {
            Some(slot) => {
                *slot = profile.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(profile.user_id.clone())),
        })
        .await
    }

    async fn get_by_user_id(&self, user_id: &str) -> Result<Option<Profile>> {
        Ok(self.profiles.lock().await.get(user_id).cloned())
    }

    async fn get_by_phone(&self, phone: &str) -> Result<Option<Profile>> {
        Ok(find_by_phone(self.profiles.lock().await.values(), phone))
    }

    async fn delete_by_user_id(&self, user_id: &str) -> Result<()> {
        log::debug!("profile store: delete {user_id}");
        let present = self.profiles.lock().await.contains_key(user_id);
        if !present {
            return Ok(());
        }
        self.commit(|profiles| {
            profiles.remove(user_id);
            Ok(())
        })
        .await
    }

    async fn delete_all(&self) -> Result<()> {
        log::debug!("profile store: delete all");
        self.commit(|profiles| {
            profiles.clear();
            Ok(())
        })
        .await
    }
}
