//! # Farmer Profile Store
//!
//! The farmer [`Profile`] record and the two stores it lives in.
//!
//! ## Architecture
//!
//! ```text
//! Profile
//!     │
//!     ├──> LocalProfileStore  (on-device, authoritative for writes)
//!     │      ├─> MemoryLocalStore
//!     │      └─> JsonFileLocalStore (atomic JSON file)
//!     │
//!     └──> RemoteProfileStore (cloud documents, best-effort)
//!            ├─> MemoryRemoteStore
//!            └─> HttpRemoteStore ({base}/{collection}/{userId})
//! ```
//!
//! Both store contracts are `async` traits so callers can hold them as
//! `Arc<dyn LocalProfileStore>` / `Arc<dyn RemoteProfileStore>` and swap the
//! backing implementation at the process entry point.
//!
//! ## Example
//!
//! ```no_run
//! use farmer_profile_store::{JsonFileLocalStore, LocalProfileStore, Profile};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = JsonFileLocalStore::open("profiles.json").await?;
//!     let profile = Profile::new("uid-42", "+91 98765 43210");
//!     store.insert_or_replace(&profile).await?;
//!
//!     let found = store.get_by_phone("09876543210").await?;
//!     assert_eq!(found.map(|p| p.user_id), Some("uid-42".to_string()));
//!     Ok(())
//! }
//! ```

mod error;
mod http_remote;
mod json_store;
mod local;
mod phone;
mod remote;
mod types;

pub use error::{RemoteResult, RemoteStoreError, Result, StoreError};
pub use http_remote::{HttpRemoteConfig, HttpRemoteStore};
pub use json_store::JsonFileLocalStore;
pub use local::{LocalProfileStore, MemoryLocalStore};
pub use phone::normalize_phone;
pub use remote::{MemoryRemoteStore, RemoteProfileStore};
pub use types::{unix_now_ms, Profile};
