//! Module catalog (`modules.json`) loading, refreshing and persistence
//!
//! The catalog is a JSON object with two keys:
//!
//! ```json
//! {
//!   "modules": [
//!     {
//!       "name": "sanitizers",
//!       "repository": "https://github.com/arsenm/sanitizers-cmake.git",
//!       "path": "cmake/FindSanitizers.cmake",
//!       "version": "master",
//!       "category": "testing",
//!       "platform": [],
//!       "cmake_minimum_required": "3.19",
//!       "dependencies": []
//!     }
//!   ],
//!   "categories": { "testing": "Testing & Quality" }
//! }
//! ```
//!
//! [`IndexStore`] owns one catalog file. It is read fresh on every
//! invocation; nothing is kept between runs. A refresh replaces the file
//! wholesale and keeps the previous copy next to it with a `.backup` suffix.
//!
//! Pure read-only operations over a loaded [`Index`] live in [`query`];
//! structural checks and statistics live in [`validation`].

pub mod query;
pub mod validation;

pub use query::{CompatibilityReport, DependencyStatus, PlatformVerdict, VersionVerdict};
pub use validation::{IndexStats, ModuleValidation, ValidationReport, validate_index};

use crate::constants::{INDEX_BACKUP_SUFFIX, INDEX_FETCH_TIMEOUT};
use crate::core::CmhError;
use crate::utils::fs::temp_sibling;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One catalog entry.
///
/// Records are never mutated after loading. Keys this tool does not know
/// about are kept in `extra` so `info --verbose` can show the full record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Unique key within the catalog
    #[serde(default)]
    pub name: String,

    /// Git URL of the module source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    /// Path of the module's `.cmake` file inside the repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Git ref (branch, tag or commit-ish)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Names of modules this one needs; advisory only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,

    /// Names of modules this one cannot be combined with; advisory only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<String>,

    /// Supported platforms; empty means platform-independent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platform: Vec<String>,

    /// Minimum CMake version, as written in the catalog
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cmake_minimum_required: Option<String>,

    /// Minimum C++ standard (`"17"`, `"20"`, ...)
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub cpp_minimum_required: Option<String>,

    /// Keys not modelled above
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ModuleRecord {
    /// Category key, or `"uncategorized"` when the record has none.
    #[must_use]
    pub fn category_key(&self) -> &str {
        self.category.as_deref().filter(|c| !c.is_empty()).unwrap_or("uncategorized")
    }
}

/// Catalog versions are written both as `"3.19"` and `3.19`.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A loaded catalog: records in catalog order plus category labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub modules: Vec<ModuleRecord>,

    /// Category key to display label
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
}

impl Index {
    /// Display label for a category key, falling back to the key itself.
    #[must_use]
    pub fn category_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.categories.get(key).map_or(key, String::as_str)
    }

    /// Exact, case-sensitive lookup that fails with suggestions.
    ///
    /// # Errors
    ///
    /// Returns [`CmhError::ModuleNotFound`] carrying up to three similar names.
    pub fn require(&self, name: &str) -> Result<&ModuleRecord> {
        query::find(self, name).ok_or_else(|| {
            CmhError::ModuleNotFound {
                name: name.to_string(),
                similar: self.similar_names(name, 3),
            }
            .into()
        })
    }

    /// Catalog names that resemble `name`, best match first.
    #[must_use]
    pub fn similar_names(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .modules
            .iter()
            .map(|m| (strsim::jaro_winkler(&needle, &m.name.to_lowercase()), m.name.as_str()))
            .filter(|(score, _)| *score >= 0.8)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored.into_iter().take(limit).map(|(_, n)| n.to_string()).collect()
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CmhError::IndexParseError`] if the text is not JSON, lacks a
    /// `modules` key, or a record has the wrong shape.
    pub fn from_json(content: &str, origin: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(content).map_err(|e| CmhError::IndexParseError {
            file: origin.to_string(),
            reason: e.to_string(),
        })?;
        if document.get("modules").is_none() {
            return Err(CmhError::IndexParseError {
                file: origin.to_string(),
                reason: "missing top-level 'modules' key".to_string(),
            }
            .into());
        }
        serde_json::from_value(document).map_err(|e| {
            CmhError::IndexParseError {
                file: origin.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// The on-disk catalog file.
#[derive(Debug, Clone)]
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    /// Store backed by the catalog at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// The catalog file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the previous catalog is kept after a refresh.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
        name.push(INDEX_BACKUP_SUFFIX);
        self.path.with_file_name(name)
    }

    /// Read and parse the catalog.
    ///
    /// # Errors
    ///
    /// - [`CmhError::IndexNotFound`] if the file does not exist
    /// - [`CmhError::IndexParseError`] if it is not valid JSON or lacks `modules`
    pub async fn load(&self) -> Result<Index> {
        debug!("Loading module index from {}", self.path.display());
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CmhError::IndexNotFound {
                    searched: self.path.display().to_string(),
                }
                .into());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };

        let index = Index::from_json(&content, &self.path.display().to_string())?;
        debug!("Loaded {} modules", index.modules.len());
        Ok(index)
    }

    /// Download a fresh catalog from `source_url` and replace the local one.
    ///
    /// The local file is only touched after the download parsed and
    /// validated.
    ///
    /// # Errors
    ///
    /// - [`CmhError::NetworkError`] on transport failure, timeout or a non-success status
    /// - [`CmhError::IndexParseError`] if the body is not JSON
    /// - [`CmhError::IndexSchemaError`] if the body lacks `modules` or has malformed records
    pub async fn refresh(&self, source_url: &str) -> Result<Index> {
        info!("Fetching module index from {source_url}");
        let body = fetch_text(source_url).await?;
        self.install_document(&body, source_url).await
    }

    /// Validate a downloaded catalog body and persist it.
    ///
    /// # Errors
    ///
    /// Same parse and schema errors as [`IndexStore::refresh`], plus I/O
    /// errors while writing.
    pub async fn install_document(&self, body: &str, origin: &str) -> Result<Index> {
        let document: Value = serde_json::from_str(body).map_err(|e| CmhError::IndexParseError {
            file: origin.to_string(),
            reason: e.to_string(),
        })?;

        if document.get("modules").is_none() {
            return Err(CmhError::IndexSchemaError {
                origin: origin.to_string(),
                reason: "missing 'modules' key".to_string(),
            }
            .into());
        }

        let index: Index =
            serde_json::from_value(document.clone()).map_err(|e| CmhError::IndexSchemaError {
                origin: origin.to_string(),
                reason: e.to_string(),
            })?;

        self.persist(&document).await?;
        info!("Saved {} modules to {}", index.modules.len(), self.path.display());
        Ok(index)
    }

    /// Replace the catalog file with `document`, keeping the old one as `.backup`.
    ///
    /// The new content is fully written to a temp file before the old file
    /// is moved aside, so the only window without a live catalog is between
    /// two renames.
    ///
    /// # Errors
    ///
    /// Returns an error if any write or rename fails. The temp file is
    /// removed when the final rename fails.
    pub async fn persist(&self, document: &Value) -> Result<()> {
        let mut content =
            serde_json::to_string_pretty(document).context("Failed to serialize module index")?;
        content.push('\n');

        let path = self.path.clone();
        let backup = self.backup_path();
        tokio::task::spawn_blocking(move || persist_blocking(&path, &backup, content.as_bytes()))
            .await
            .context("Failed to join index write task")?
    }
}

fn persist_blocking(path: &Path, backup: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::utils::fs::ensure_dir(parent)?;
    }

    let temp = temp_sibling(path);
    {
        let mut file = std::fs::File::create(&temp)
            .with_context(|| format!("Failed to create {}", temp.display()))?;
        file.write_all(content).with_context(|| format!("Failed to write {}", temp.display()))?;
        file.sync_all().context("Failed to sync module index to disk")?;
    }

    if path.exists() {
        if backup.exists() {
            std::fs::remove_file(backup)
                .with_context(|| format!("Failed to remove old backup {}", backup.display()))?;
        }
        std::fs::rename(path, backup)
            .with_context(|| format!("Failed to back up {}", path.display()))?;
        debug!("Backed up previous index to {}", backup.display());
    }

    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(e).with_context(|| format!("Failed to move new index into {}", path.display()));
    }
    Ok(())
}

async fn fetch_text(url: &str) -> Result<String> {
    let network_error = |reason: String| CmhError::NetworkError {
        operation: format!("fetch {url}"),
        reason,
    };

    let client = reqwest::Client::builder()
        .timeout(INDEX_FETCH_TIMEOUT)
        .user_agent(concat!("cmakehub/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let response = client.get(url).send().await.map_err(|e| network_error(e.to_string()))?;

    if !response.status().is_success() {
        return Err(network_error(format!("HTTP {}", response.status())).into());
    }

    response.text().await.map_err(|e| network_error(e.to_string()).into())
}
