use crate::chunker::TextChunker;
use crate::config::{ChunkingConfig, ValidationThresholds};
use crate::error::{Result, TextProfileError};
use crate::stats::{line_count, word_count, ProfileStats};
use crate::validation::{validate_content, ProfileValidation};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// File name of the profile document inside the data directory
pub const PROFILE_FILE_NAME: &str = "farmer_profile.txt";

/// Manages the single free-text profile document of this installation.
///
/// Public operations never fail outward: they report success as `bool`, or
/// fall back to an empty value, and log the underlying error. Writes go
/// through a temp file and a rename, and are serialized so `append` cannot
/// lose a concurrent write.
pub struct ProfileTextFileManager {
    path: PathBuf,
    chunker: TextChunker,
    thresholds: ValidationThresholds,
    write_lock: Mutex<()>,
}

impl ProfileTextFileManager {
    /// Manager for `<data_dir>/farmer_profile.txt` with default settings
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: absolute(data_dir.as_ref().join(PROFILE_FILE_NAME)),
            chunker: TextChunker::default(),
            thresholds: ValidationThresholds::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_config(
        data_dir: impl AsRef<Path>,
        chunking: ChunkingConfig,
        thresholds: ValidationThresholds,
    ) -> Result<Self> {
        thresholds
            .validate()
            .map_err(TextProfileError::invalid_config)?;
        Ok(Self {
            chunker: TextChunker::new(chunking)?,
            thresholds,
            ..Self::new(data_dir)
        })
    }

    /// Absolute path of the backing document
    #[must_use]
    pub fn get_file_path(&self) -> &Path {
        &self.path
    }

    /// Ensure the document exists without touching existing content
    pub async fn create_or_load_profile_file(&self) -> bool {
        self.report("create", self.try_create().await)
    }

    /// Replace the whole document with `text`
    pub async fn write_profile(&self, text: &str) -> bool {
        let _guard = self.write_lock.lock().await;
        self.report("write", self.write_atomic(text).await)
    }

    /// Concatenate `text` directly after the current content
    pub async fn append_profile(&self, text: &str) -> bool {
        let _guard = self.write_lock.lock().await;
        let result = async {
            let mut content = self.try_read().await?.unwrap_or_default();
            content.push_str(text);
            self.write_atomic(&content).await
        }
        .await;
        self.report("append", result)
    }

    /// Current content, or an empty string when there is no document
    pub async fn read_profile(&self) -> String {
        match self.try_read().await {
            Ok(content) => content.unwrap_or_default(),
            Err(e) => {
                log::warn!("profile text: read failed for {}: {e}", self.path.display());
                String::new()
            }
        }
    }

    pub async fn profile_exists(&self) -> bool {
        tokio::fs::metadata(&self.path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    /// True when the document exists and holds more than whitespace
    pub async fn has_content(&self) -> bool {
        matches!(self.try_read().await, Ok(Some(content)) if !content.trim().is_empty())
    }

    /// Remove the document; succeeds when it was already absent
    pub async fn delete_profile(&self) -> bool {
        let _guard = self.write_lock.lock().await;
        let result = match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        };
        self.report("delete", result)
    }

    /// Keep the document but make it empty
    pub async fn clear_profile(&self) -> bool {
        let _guard = self.write_lock.lock().await;
        self.report("clear", self.write_atomic("").await)
    }

    /// UTF-8 byte length of the content; 0 when empty or absent
    pub async fn get_file_size(&self) -> u64 {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => 0,
        }
    }

    /// Overlapping chunks of the current content for embedding
    pub async fn get_chunks_for_embedding(&self) -> Vec<String> {
        self.chunker.chunk(&self.read_profile().await)
    }

    pub async fn get_profile_stats(&self) -> ProfileStats {
        let content = match self.try_read().await {
            Ok(content) => content,
            Err(e) => {
                log::warn!("profile text: stats read failed for {}: {e}", self.path.display());
                None
            }
        };
        let exists = content.is_some();
        let content = content.unwrap_or_default();

        ProfileStats {
            exists,
            size_bytes: content.len() as u64,
            char_count: content.chars().count(),
            word_count: word_count(&content),
            line_count: line_count(&content),
            chunk_count: self.chunker.chunk(&content).len(),
            file_path: self.path.display().to_string(),
        }
    }

    pub async fn validate_profile(&self) -> ProfileValidation {
        validate_content(&self.read_profile().await, &self.thresholds)
    }

    async fn try_create(&self) -> Result<()> {
        self.ensure_parent().await?;
        tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        Ok(())
    }

    async fn try_read(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_atomic(&self, content: &str) -> Result<()> {
        self.ensure_parent().await?;
        let tmp = self.path.with_extension("txt.tmp");
        tokio::fs::write(&tmp, content.as_bytes()).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        log::debug!(
            "profile text: wrote {} bytes to {}",
            content.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn ensure_parent(&self) -> Result<()> {
        let parent = self.path.parent().ok_or_else(|| {
            TextProfileError::InvalidPath(format!("{} has no parent", self.path.display()))
        })?;
        tokio::fs::create_dir_all(parent).await?;
        Ok(())
    }

    fn report(&self, op: &str, result: Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("profile text: {op} failed for {}: {e}", self.path.display());
                false
            }
        }
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}
