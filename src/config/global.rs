//! Global configuration file for CMakeHub.
//!
//! The file lives at `~/.cmakehub/config.toml` and is optional. Every key is
//! optional as well; an absent file behaves like an empty one.
//!
//! ```toml
//! # Where `update-index` fetches the catalog from
//! index_url = "https://example.com/modules.json"
//!
//! # Catalog used when neither --index nor CMH_INDEX is given
//! index_path = "~/work/CMakeHub/modules.json"
//!
//! # Module cache root (CMH_CACHE_DIR still wins)
//! cache_dir = "~/.cache/cmakehub"
//!
//! # Upper bound for a single shallow clone
//! clone_timeout_secs = 600
//! ```

use crate::constants::{CONFIG_FILE_NAME, DATA_DIR_NAME};
use crate::core::CmhError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// User-wide settings read from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Remote catalog URL used by `update-index`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_url: Option<String>,

    /// Catalog path tried after `--index` and `CMH_INDEX`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_path: Option<String>,

    /// Cache root used when `CMH_CACHE_DIR` is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<String>,

    /// Clone timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_timeout_secs: Option<u64>,
}

impl GlobalConfig {
    /// Load from `path` when given, otherwise from `~/.cmakehub/config.toml`.
    ///
    /// A missing default file yields the default configuration. A path that
    /// was given explicitly must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path does not exist, the file cannot
    /// be read, or its TOML is invalid.
    pub async fn load_with_optional(path: Option<PathBuf>, home: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CmhError::ConfigError {
                        message: format!("Config file not found: {}", path.display()),
                    }
                    .into());
                }
                Self::load_from(&path).await
            }
            None => match home.map(Self::default_path_in) {
                Some(path) if path.exists() => Self::load_from(&path).await,
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load and parse a specific config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this schema.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content).map_err(|e| {
            CmhError::ConfigError {
                message: format!("Failed to parse config {}: {e}", path.display()),
            }
            .into()
        })
    }

    /// `<home>/.cmakehub/config.toml`
    #[must_use]
    pub fn default_path_in(home: &Path) -> PathBuf {
        home.join(DATA_DIR_NAME).join(CONFIG_FILE_NAME)
    }
}
