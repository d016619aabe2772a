use crate::manager::{SyncFlow, SyncManager};
use farmer_profile_store::Profile;
use std::sync::Arc;
use tokio::sync::watch;

/// Observable state published by [`ProfileController`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControllerState {
    pub loading: bool,
    /// User-facing message for the last failed call
    pub error: Option<String>,
    /// Profile produced by the last successful call, if it yields one
    pub profile: Option<Profile>,
    pub last_flow: Option<SyncFlow>,
    pub last_success: Option<bool>,
}

/// UI-facing façade over [`SyncManager`].
///
/// Every call flips `loading` on, runs one flow, and publishes the outcome
/// through a `watch` channel. The flows themselves never fail outward, so the
/// controller only has to translate `false`/`None` into a message.
pub struct ProfileController {
    manager: Arc<SyncManager>,
    state: watch::Sender<ControllerState>,
}

impl ProfileController {
    pub fn new(manager: Arc<SyncManager>) -> Self {
        let (state, _) = watch::channel(ControllerState::default());
        Self { manager, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ControllerState {
        self.state.borrow().clone()
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|state| state.error = None);
    }

    pub async fn login(&self, user_id: &str) -> Option<Profile> {
        self.begin(SyncFlow::Login);
        let profile = self.manager.sync_on_login(user_id).await;
        self.finish_with_profile(
            SyncFlow::Login,
            profile.clone(),
            "No profile found for this account",
        );
        profile
    }

    pub async fn refresh(&self, user_id: &str) -> Option<Profile> {
        self.begin(SyncFlow::ForceSync);
        let profile = self.manager.force_sync(user_id).await;
        self.finish_with_profile(
            SyncFlow::ForceSync,
            profile.clone(),
            "Could not refresh your profile. Check your connection and try again",
        );
        profile
    }

    pub async fn register(&self, profile: Profile) -> bool {
        self.begin(SyncFlow::Registration);
        let ok = self.manager.sync_on_registration(&profile).await;
        self.finish(
            SyncFlow::Registration,
            ok,
            ok.then_some(profile),
            "Could not save your profile on this device",
        );
        ok
    }

    pub async fn edit(&self, mut profile: Profile) -> bool {
        self.begin(SyncFlow::Edit);
        let ok = self.manager.sync_on_profile_edit(&mut profile).await;
        self.finish(
            SyncFlow::Edit,
            ok,
            ok.then_some(profile),
            "Could not update your profile",
        );
        ok
    }

    pub async fn logout(&self, user_id: &str) -> bool {
        self.begin(SyncFlow::Logout);
        let ok = self.manager.sync_on_logout(user_id).await;
        self.finish(SyncFlow::Logout, ok, None, "Could not sign out");
        ok
    }

    /// Whether the cloud already knows this user; does not touch `profile`
    pub async fn check_registered(&self, user_id: &str) -> bool {
        self.state.send_modify(|state| state.loading = true);
        let exists = self.manager.profile_exists_in_firestore(user_id).await;
        self.state.send_modify(|state| state.loading = false);
        exists
    }

    fn begin(&self, flow: SyncFlow) {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
            state.last_flow = Some(flow);
            state.last_success = None;
        });
    }

    fn finish_with_profile(&self, flow: SyncFlow, profile: Option<Profile>, failure: &str) {
        let ok = profile.is_some();
        self.finish(flow, ok, profile, failure);
    }

    fn finish(&self, flow: SyncFlow, ok: bool, profile: Option<Profile>, failure: &str) {
        self.state.send_modify(|state| {
            state.loading = false;
            state.last_flow = Some(flow);
            state.last_success = Some(ok);
            state.error = (!ok).then(|| failure.to_string());
            match flow {
                SyncFlow::Logout => state.profile = None,
                _ if ok => state.profile = profile,
                _ => {}
            }
        });
    }
}
