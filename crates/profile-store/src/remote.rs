use crate::error::{RemoteResult, RemoteStoreError};
use crate::types::Profile;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Cloud document store holding one [`Profile`] document per `user_id`.
///
/// The signed-in identity used to authorize these calls is established
/// elsewhere; implementations only carry whatever credential they are given.
#[async_trait]
pub trait RemoteProfileStore: Send + Sync {
    /// Fetch the document; `Ok(None)` when it does not exist
    async fn fetch(&self, user_id: &str) -> RemoteResult<Option<Profile>>;

    /// Create the document, overwriting any existing one
    async fn create(&self, profile: &Profile) -> RemoteResult<()>;

    /// Update an existing document; [`RemoteStoreError::NotFound`] if absent
    async fn update(&self, profile: &Profile) -> RemoteResult<()>;

    async fn exists(&self, user_id: &str) -> RemoteResult<bool>;
}

/// In-memory [`RemoteProfileStore`] that can be taken offline.
#[derive(Debug, Default)]
pub struct MemoryRemoteStore {
    documents: RwLock<HashMap<String, Profile>>,
    offline: AtomicBool,
    calls: AtomicUsize,
}

impl MemoryRemoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with [`RemoteStoreError::Unavailable`]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Place a document directly, bypassing the offline switch
    pub async fn seed(&self, profile: Profile) {
        self.documents
            .write()
            .await
            .insert(profile.user_id.clone(), profile);
    }

    /// Read a document directly, bypassing the offline switch
    pub async fn document(&self, user_id: &str) -> Option<Profile> {
        self.documents.read().await.get(user_id).cloned()
    }

    /// Number of trait calls received, including failed ones
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn begin_call(&self) -> RemoteResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteStoreError::Unavailable("network unreachable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteProfileStore for MemoryRemoteStore {
    async fn fetch(&self, user_id: &str) -> RemoteResult<Option<Profile>> {
        self.begin_call()?;
        Ok(self.documents.read().await.get(user_id).cloned())
    }

    async fn create(&self, profile: &Profile) -> RemoteResult<()> {
        self.begin_call()?;
        self.documents
            .write()
            .await
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> RemoteResult<()> {
        self.begin_call()?;
        let mut documents = self.documents.write().await;
        match documents.get_mut(&profile.user_id) {
            Some(slot) => {
                *slot = profile.clone();
                Ok(())
            }
            None => Err(RemoteStoreError::NotFound(profile.user_id.clone())),
        }
    }

    async fn exists(&self, user_id: &str) -> RemoteResult<bool> {
        self.begin_call()?;
        Ok(self.documents.read().await.contains_key(user_id))
    }
}
