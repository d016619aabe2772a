//! # Farmer Text Profile
//!
//! One free-text profile document per installation, plus the retrieval chunks,
//! diagnostics, and soft validation derived from it.
//!
//! ## Architecture
//!
//! ```text
//! farmer_profile.txt
//!     │
//!     ├──> ProfileTextFileManager (create / write / append / clear / delete)
//!     │
//!     ├──> TextChunker
//!     │      ├─> 500-char windows
//!     │      └─> 50-char overlap snapped to word boundaries
//!     │
//!     ├──> validate_content → ProfileValidation (always valid, with warnings)
//!     │
//!     └──> ProfileStats (bytes, chars, words, lines, chunks, path)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use farmer_text_profile::ProfileTextFileManager;
//!
//! #[tokio::main]
//! async fn main() {
//!     let manager = ProfileTextFileManager::new("/data/farmer");
//!     manager.write_profile("I grow paddy and sugarcane near Mandya.").await;
//!
//!     for chunk in manager.get_chunks_for_embedding().await {
//!         println!("{chunk}");
//!     }
//!     println!("{:?}", manager.validate_profile().await.warnings);
//! }
//! ```

mod chunker;
mod config;
mod error;
mod manager;
mod stats;
mod validation;

pub use chunker::TextChunker;
pub use config::{ChunkingConfig, ValidationThresholds};
pub use error::{Result, TextProfileError};
pub use manager::{ProfileTextFileManager, PROFILE_FILE_NAME};
pub use stats::{line_count, word_count, ProfileStats};
pub use validation::{validate_content, ProfileValidation, ValidationWarning};
