//! # Farmer Sync
//!
//! Keeps the on-device profile and the cloud profile document in step.
//!
//! ## Policy
//!
//! Local writes always win; remote writes are best-effort. A registration or
//! edit succeeds as soon as the local store accepts it, whatever happens to
//! the cloud leg. Login and refresh pull the cloud copy down and overwrite the
//! local one. No flow ever returns an error: failures are logged and folded
//! into a `bool` or an absent profile.
//!
//! ```text
//! ProfileController (observable state)
//!     │
//!     └──> SyncManager
//!            ├─ login / force_sync : remote.fetch ──> local.insert_or_replace
//!            ├─ registration       : local.insert_or_replace ──> remote.create
//!            ├─ edit               : touch ──> local.update ──> remote.update
//!            └─ logout             : local.get ──> remote.update | remote.create
//! ```
//!
//! Flows against the same user are not serialized; callers that need strict
//! ordering per user must serialize their calls.
//!
//! ## Example
//!
//! ```no_run
//! use farmer_profile_store::{MemoryLocalStore, MemoryRemoteStore, Profile};
//! use farmer_sync::SyncManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let manager = SyncManager::new(
//!         Arc::new(MemoryLocalStore::new()),
//!         Arc::new(MemoryRemoteStore::new()),
//!     );
//!
//!     let profile = Profile::new("uid-42", "9876543210");
//!     assert!(manager.sync_on_registration(&profile).await);
//!     assert!(manager.get_local_profile("uid-42").await.is_some());
//! }
//! ```

mod controller;
mod manager;

pub use controller::{ControllerState, ProfileController};
pub use manager::{SyncFlow, SyncManager};
