use crate::error::{Result, StoreError};
use crate::phone::normalize_phone;
use crate::types::Profile;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// On-device persistence of one [`Profile`] per `user_id`.
///
/// Writes to this store are what make a registration or edit succeed, so
/// implementations must only return `Ok` once the record is durable.
#[async_trait]
pub trait LocalProfileStore: Send + Sync {
    /// Insert, replacing any record with the same `user_id`
    async fn insert_or_replace(&self, profile: &Profile) -> Result<()>;

    /// Replace an existing record; [`StoreError::NotFound`] if there is none
    async fn update(&self, profile: &Profile) -> Result<()>;

    async fn get_by_user_id(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Look up by phone number, compared in normalized form
    async fn get_by_phone(&self, phone: &str) -> Result<Option<Profile>>;

    /// Remove the record for `user_id`; removing nothing is not an error
    async fn delete_by_user_id(&self, user_id: &str) -> Result<()>;

    async fn delete_all(&self) -> Result<()>;
}

pub(crate) fn find_by_phone<'a>(
    profiles: impl IntoIterator<Item = &'a Profile>,
    phone: &str,
) -> Option<Profile> {
    let wanted = normalize_phone(phone)?;
    profiles
        .into_iter()
        .find(|p| p.normalized_phone().as_deref() == Some(wanted.as_str()))
        .cloned()
}

/// In-memory [`LocalProfileStore`].
///
/// Can be switched into an unavailable state to exercise local-failure paths,
/// and counts successful mutations.
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    profiles: RwLock<HashMap<String, Profile>>,
    unavailable: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryLocalStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful mutating calls so far
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store switched off".into()));
        }
        Ok(())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LocalProfileStore for MemoryLocalStore {
    async fn insert_or_replace(&self, profile: &Profile) -> Result<()> {
        self.check_available()?;
        profile.validate()?;
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile.clone());
        self.record_write();
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<()> {
        self.check_available()?;
        profile.validate()?;
        let mut profiles = self.profiles.write().await;
        let Some(slot) = profiles.get_mut(&profile.user_id) else {
            return Err(StoreError::NotFound(profile.user_id.clone()));
        };
        *slot = profile.clone();
        self.record_write();
        Ok(())
    }

    async fn get_by_user_id(&self, user_id: &str) -> Result<Option<Profile>> {
        self.check_available()?;
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn get_by_phone(&self, phone: &str) -> Result<Option<Profile>> {
        self.check_available()?;
        Ok(find_by_phone(self.profiles.read().await.values(), phone))
    }

    async fn delete_by_user_id(&self, user_id: &str) -> Result<()> {
        self.check_available()?;
        if self.profiles.write().await.remove(user_id).is_some() {
            self.record_write();
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.check_available()?;
        self.profiles.write().await.clear();
        self.record_write();
        Ok(())
    }
}
