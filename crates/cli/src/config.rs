use anyhow::{anyhow, Context, Result};
use farmer_profile_store::HttpRemoteConfig;
use farmer_reference_data::ReferenceDataConfig;
use farmer_text_profile::ChunkingConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "FARMER_CONFIG";
pub const DATA_DIR_ENV: &str = "FARMER_DATA_DIR";
pub const REMOTE_URL_ENV: &str = "FARMER_REMOTE_URL";
pub const AUTH_TOKEN_ENV: &str = "FARMER_AUTH_TOKEN";
pub const REFERENCE_URL_ENV: &str = "FARMER_REFERENCE_URL";

/// Everything the `farmer` binary needs to wire its stores.
///
/// Layering, lowest first: built-in defaults, the TOML file, environment
/// variables, command-line flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FarmerConfig {
    /// Directory holding the local profile store and the text profile
    pub data_dir: Option<PathBuf>,

    /// Cloud document API; an empty `base_url` keeps the CLI offline
    pub remote: HttpRemoteConfig,

    pub reference: ReferenceDataConfig,

    pub chunking: ChunkingConfig,
}

impl FarmerConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse config TOML")
    }

    /// Load from `explicit`, else `$FARMER_CONFIG`, else the per-user config
    /// file if it exists, else defaults. Returns the file actually read.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        let path = match requested {
            Some(path) => path,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => path,
                None => return Ok((Self::default(), None)),
            },
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok((config, Some(path)))
    }

    /// Overlay environment variables, looked up through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(dir) = non_empty(DATA_DIR_ENV) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = non_empty(REMOTE_URL_ENV) {
            self.remote.base_url = url;
        }
        if let Some(token) = non_empty(AUTH_TOKEN_ENV) {
            self.remote.auth_token = Some(token);
        }
        if let Some(url) = non_empty(REFERENCE_URL_ENV) {
            self.reference.base_url = url;
        }
    }

    pub fn apply_process_env(&mut self) {
        self.apply_env(|key| env::var(key).ok());
    }

    #[must_use]
    pub fn remote_enabled(&self) -> bool {
        !self.remote.base_url.trim().is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        self.chunking
            .validate()
            .map_err(|e| anyhow!("[chunking] {e}"))?;
        if self.remote_enabled() {
            self.remote.validate().map_err(|e| anyhow!("[remote] {e}"))?;
        }
        Ok(())
    }

    /// Configured data dir, else the platform data dir, else `./.farmer`
    #[must_use]
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .map(|dir| dir.join("farmer"))
                .unwrap_or_else(|| PathBuf::from(".farmer"))
        })
    }
}

#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("farmer").join("config.toml"))
}
