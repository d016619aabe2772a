use farmer_profile_store::{
    normalize_phone, LocalProfileStore, Profile, RemoteProfileStore, RemoteStoreError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The named reconciliation flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncFlow {
    Login,
    Registration,
    Edit,
    Logout,
    ForceSync,
}

impl fmt::Display for SyncFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Login => "login",
            Self::Registration => "registration",
            Self::Edit => "edit",
            Self::Logout => "logout",
            Self::ForceSync => "force_sync",
        };
        f.write_str(name)
    }
}

/// Orchestrates the local and remote profile stores.
///
/// Holds nothing but the two store handles, so one instance can be shared
/// across tasks. Within a flow the local step always runs before the remote
/// step; if the caller drops the future mid-flow, whatever already landed
/// locally stays.
pub struct SyncManager {
    local: Arc<dyn LocalProfileStore>,
    remote: Arc<dyn RemoteProfileStore>,
}

impl SyncManager {
    pub fn new(local: Arc<dyn LocalProfileStore>, remote: Arc<dyn RemoteProfileStore>) -> Self {
        Self { local, remote }
    }

    /// Pull the cloud profile and make it the local copy.
    ///
    /// Returns `None` when the document is absent, the remote call fails, or
    /// the local write fails.
    pub async fn sync_on_login(&self, user_id: &str) -> Option<Profile> {
        self.pull(SyncFlow::Login, user_id).await
    }

    /// Store a new profile locally, then create the cloud document.
    ///
    /// `true` once the local write succeeds, even if the cloud leg fails.
    pub async fn sync_on_registration(&self, profile: &Profile) -> bool {
        let flow = SyncFlow::Registration;
        log::info!("sync {flow}: user {}", profile.user_id);

        if let Err(e) = self.local.insert_or_replace(profile).await {
            log::warn!("sync {flow}: local write failed for {}: {e}", profile.user_id);
            return false;
        }

        let remote = self.remote.create(profile).await;
        self.settle_remote(flow, &profile.user_id, remote);
        true
    }

    /// Stamp `last_updated`, update the local copy, then the cloud document.
    ///
    /// `true` once the local update succeeds, even if the cloud leg fails.
    /// The caller's profile receives the new stamp only when the local update
    /// succeeds.
    pub async fn sync_on_profile_edit(&self, profile: &mut Profile) -> bool {
        let flow = SyncFlow::Edit;
        let mut stamped = profile.clone();
        stamped.touch();
        log::info!(
            "sync {flow}: user {} at {}",
            stamped.user_id,
            stamped.last_updated
        );

        if let Err(e) = self.local.update(&stamped).await {
            log::warn!("sync {flow}: local update failed for {}: {e}", stamped.user_id);
            return false;
        }
        profile.last_updated = stamped.last_updated;

        let remote = self.remote.update(&stamped).await;
        self.settle_remote(flow, &stamped.user_id, remote);
        true
    }

    /// Flush the local profile to the cloud before signing out.
    ///
    /// Always `true`. Local data is kept; see [`SyncManager::clear_local_data`].
    pub async fn sync_on_logout(&self, user_id: &str) -> bool {
        let flow = SyncFlow::Logout;
        log::info!("sync {flow}: user {user_id}");

        let profile = match self.local.get_by_user_id(user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                log::debug!("sync {flow}: no local profile for {user_id}, nothing to flush");
                return true;
            }
            Err(e) => {
                log::warn!("sync {flow}: local read failed for {user_id}: {e}");
                return true;
            }
        };

        let remote = match self.remote.update(&profile).await {
            Err(e) if e.is_not_found() => self.remote.create(&profile).await,
            other => other,
        };
        self.settle_remote(flow, user_id, remote);
        true
    }

    /// Same reconciliation as [`SyncManager::sync_on_login`], requested by
    /// the user rather than by signing in.
    pub async fn force_sync(&self, user_id: &str) -> Option<Profile> {
        self.pull(SyncFlow::ForceSync, user_id).await
    }

    /// Whether the cloud holds a document for `user_id`; failures read as `false`
    pub async fn profile_exists_in_firestore(&self, user_id: &str) -> bool {
        match self.remote.exists(user_id).await {
            Ok(exists) => exists,
            Err(e) => {
                log::warn!("sync: remote existence check failed for {user_id}: {e}");
                false
            }
        }
    }

    pub async fn get_local_profile(&self, user_id: &str) -> Option<Profile> {
        match self.local.get_by_user_id(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("sync: local read failed for {user_id}: {e}");
                None
            }
        }
    }

    /// Local lookup by phone number in any common formatting
    pub async fn get_local_profile_by_phone(&self, phone: &str) -> Option<Profile> {
        let Some(normalized) = normalize_phone(phone) else {
            log::debug!("sync: '{phone}' is not a phone number");
            return None;
        };
        match self.local.get_by_phone(&normalized).await {
            Ok(profile) => profile,
            Err(e) => {
                log::warn!("sync: local phone lookup failed: {e}");
                None
            }
        }
    }

    /// Delete the local copy for `user_id`. Never called by the sync flows.
    pub async fn clear_local_data(&self, user_id: &str) -> bool {
        log::info!("sync: clearing local data for {user_id}");
        match self.local.delete_by_user_id(user_id).await {
            Ok(()) => true,
            Err(e) => {
                log::warn!("sync: local delete failed for {user_id}: {e}");
                false
            }
        }
    }

    async fn pull(&self, flow: SyncFlow, user_id: &str) -> Option<Profile> {
        log::info!("sync {flow}: user {user_id}");

        let profile = match self.remote.fetch(user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                log::info!("sync {flow}: no cloud profile for {user_id}");
                return None;
            }
            Err(e) => {
                log::warn!("sync {flow}: cloud fetch failed for {user_id}: {e}");
                return None;
            }
        };

        // A document for another account is treated like a malformed payload.
        if profile.user_id != user_id {
            log::warn!(
                "sync {flow}: cloud document for {user_id} carries userId {}, ignoring it",
                profile.user_id
            );
            return None;
        }

        if let Err(e) = self.local.insert_or_replace(&profile).await {
            log::warn!("sync {flow}: local write failed for {user_id}: {e}");
            return None;
        }

        log::info!("sync {flow}: local profile refreshed for {user_id}");
        Some(profile)
    }

    // The dropped remote write is not queued for retry.
    fn settle_remote(&self, flow: SyncFlow, user_id: &str, result: Result<(), RemoteStoreError>) {
        match result {
            Ok(()) => log::info!("sync {flow}: cloud updated for {user_id}"),
            Err(e) => log::warn!("sync {flow}: cloud write skipped for {user_id}: {e}"),
        }
    }
}
