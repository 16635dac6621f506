//! Local module cache
//!
//! Downloaded modules live in a directory tree keyed by module name and
//! version:
//!
//! ```text
//! ~/.cmakehub/cache/
//! ├── sanitizers/
//! │   └── master/
//! │       ├── .cmh_meta.json      # sidecar, written last
//! │       └── cmake/FindSanitizers.cmake
//! └── code-coverage/
//!     ├── main/
//!     └── v1.2.0/
//! ```
//!
//! The sidecar file is the only completeness signal. A version directory
//! without it (for example after a failed clone) is not a cache hit and is
//! reported as incomplete by [`Cache::info`].
//!
//! Entries are never updated in place: a different version is a different
//! directory, and removal happens per module through [`Cache::clear`].
//!
//! # Concurrency
//!
//! There is no locking. Two processes downloading the same module and
//! version at once may both miss the sidecar and clone into the same
//! directory; one of the clones then fails.

pub mod downloader;

pub use downloader::Downloader;

use crate::constants::CACHE_META_FILE;
use crate::core::CmhError;
use crate::utils::fs::{DirStats, atomic_write, get_dir_stats};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, info, warn};

/// Provenance record stored next to every complete cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub module: String,
    pub repository: String,
    pub version: String,
    /// Path of the module file inside the repository
    pub path: String,
    pub downloaded_at: DateTime<Utc>,
}

/// A complete cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub module: String,
    pub version: String,
    /// Directory holding the cloned working tree
    pub path: PathBuf,
    pub metadata: CacheMetadata,
}

impl CacheEntry {
    /// Absolute path of the module's `.cmake` file inside the entry.
    #[must_use]
    pub fn module_file(&self) -> PathBuf {
        self.path.join(&self.metadata.path)
    }
}

/// One version directory under a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedVersion {
    pub name: String,
    /// Whether the sidecar exists
    pub complete: bool,
    pub downloaded_at: Option<DateTime<Utc>>,
}

/// One module directory with its totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedModule {
    pub name: String,
    pub size_bytes: u64,
    pub file_count: u64,
    /// Sorted by name
    pub versions: Vec<CachedVersion>,
}

impl CachedModule {
    /// Most recent sidecar timestamp across the module's versions.
    #[must_use]
    pub fn last_downloaded(&self) -> Option<DateTime<Utc>> {
        self.versions.iter().filter_map(|v| v.downloaded_at).max()
    }
}

/// Snapshot of the whole cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheReport {
    pub root: PathBuf,
    /// `false` when the cache root has never been created
    pub exists: bool,
    /// Sorted by name
    pub modules: Vec<CachedModule>,
}

impl CacheReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.modules.iter().map(|m| m.size_bytes).sum()
    }

    #[must_use]
    pub fn total_files(&self) -> u64 {
        self.modules.iter().map(|m| m.file_count).sum()
    }
}

/// What a [`Cache::clear`] call with the same argument would remove.
///
/// Deletion cannot be undone; callers show this before asking for
/// confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearPreview {
    /// Module directories that would be deleted, sorted
    pub modules: Vec<String>,
    pub size_bytes: u64,
}

impl ClearPreview {
    #[must_use]
    pub fn count(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// The on-disk module cache.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    /// Cache rooted at `dir`. Nothing is created until it is needed.
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
        }
    }

    /// The cache root.
    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.dir
    }

    /// `<root>/<name>`
    ///
    /// # Errors
    ///
    /// Returns [`CmhError::InvalidCacheKey`] when `name` is empty, `.`, `..`
    /// or contains a path separator.
    pub fn module_dir(&self, name: &str) -> Result<PathBuf> {
        validate_key(name)?;
        Ok(self.dir.join(name))
    }

    /// `<root>/<name>/<version>`, with the version encoded by [`version_dir_name`].
    ///
    /// # Errors
    ///
    /// Returns [`CmhError::InvalidCacheKey`] for unusable names or versions.
    pub fn entry_dir(&self, name: &str, version: &str) -> Result<PathBuf> {
        let version_key = version_dir_name(version);
        validate_key(&version_key)?;
        Ok(self.module_dir(name)?.join(version_key))
    }

    /// The complete entry for `(name, version)`, if its sidecar exists.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid keys or an unreadable sidecar.
    pub async fn lookup(&self, name: &str, version: &str) -> Result<Option<CacheEntry>> {
        let dir = self.entry_dir(name, version)?;
        let meta_path = dir.join(CACHE_META_FILE);
        if !meta_path.is_file() {
            debug!("Cache miss for {name}@{version} ({})", dir.display());
            return Ok(None);
        }

        let metadata = read_metadata(&meta_path).await.with_context(|| {
            format!(
                "Corrupt cache metadata for {name}@{version}; remove it with 'cmakehub cache clear {name} --force'"
            )
        })?;
        if metadata.version != version.trim() {
            bail!(
                "Cache entry {} holds version '{}', not '{version}'; remove it with 'cmakehub cache clear {name} --force'",
                dir.display(),
                metadata.version
            );
        }
        debug!("Cache hit for {name}@{version}");
        Ok(Some(CacheEntry {
            module: name.to_string(),
            version: version.to_string(),
            path: dir,
            metadata,
        }))
    }

    /// Write the sidecar, marking the entry in `dir` complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn write_metadata(&self, dir: &Path, metadata: &CacheMetadata) -> Result<()> {
        let content =
            serde_json::to_vec_pretty(metadata).context("Failed to serialize cache metadata")?;
        let path = dir.join(CACHE_META_FILE);
        tokio::task::spawn_blocking(move || atomic_write(&path, &content))
            .await
            .context("Failed to join cache metadata write")?
    }

    /// Enumerate cached modules with sizes, file counts and versions.
    ///
    /// A missing cache root is reported as an empty cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache tree cannot be read.
    pub async fn info(&self) -> Result<CacheReport> {
        let mut modules = Vec::new();
        let exists = self.dir.is_dir();

        if exists {
            for (name, path) in self.module_dirs().await? {
                let DirStats {
                    bytes,
                    files,
                } = get_dir_stats(&path).await?;
                let versions = self.versions_of(&path).await?;
                modules.push(CachedModule {
                    name,
                    size_bytes: bytes,
                    file_count: files,
                    versions,
                });
            }
        }

        Ok(CacheReport {
            root: self.dir.clone(),
            exists,
            modules,
        })
    }

    /// What `clear(module)` would delete.
    ///
    /// # Errors
    ///
    /// Returns [`CmhError::CacheEntryNotFound`] when a named module has no
    /// cache directory.
    pub async fn preview_clear(&self, module: Option<&str>) -> Result<ClearPreview> {
        let targets = self.clear_targets(module).await?;
        let mut size_bytes = 0;
        for (_, path) in &targets {
            size_bytes += get_dir_stats(path).await?.bytes;
        }
        Ok(ClearPreview {
            modules: targets.into_iter().map(|(name, _)| name).collect(),
            size_bytes,
        })
    }

    /// Delete one module's cache (all versions) or every module's cache.
    ///
    /// Returns how many module directories were removed: 1 for a named
    /// module, the number of modules otherwise (0 when the cache is absent).
    ///
    /// # Errors
    ///
    /// Returns [`CmhError::CacheEntryNotFound`] when a named module has no
    /// cache directory, or an I/O error if deletion fails.
    pub async fn clear(&self, module: Option<&str>) -> Result<usize> {
        let targets = self.clear_targets(module).await?;
        for (name, path) in &targets {
            async_fs::remove_dir_all(path)
                .await
                .with_context(|| format!("Failed to remove cache for {name}: {}", path.display()))?;
            debug!("Removed cache directory {}", path.display());
        }
        info!("Cleared {} module cache(s)", targets.len());
        Ok(targets.len())
    }

    async fn clear_targets(&self, module: Option<&str>) -> Result<Vec<(String, PathBuf)>> {
        match module {
            Some(name) => {
                let dir = self.module_dir(name)?;
                if dir.is_dir() {
                    Ok(vec![(name.to_string(), dir)])
                } else {
                    Err(CmhError::CacheEntryNotFound {
                        name: name.to_string(),
                    }
                    .into())
                }
            }
            None => {
                if self.dir.is_dir() {
                    self.module_dirs().await
                } else {
                    Ok(Vec::new())
                }
            }
        }
    }

    /// Top-level directories of the cache root, sorted by name.
    async fn module_dirs(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut dirs = subdirectories(&self.dir).await?;
        dirs.sort();
        Ok(dirs)
    }

    async fn versions_of(&self, module_dir: &Path) -> Result<Vec<CachedVersion>> {
        let mut versions = Vec::new();
        for (name, path) in subdirectories(module_dir).await? {
            let meta_path = path.join(CACHE_META_FILE);
            let complete = meta_path.is_file();
            let downloaded_at = if complete {
                match read_metadata(&meta_path).await {
                    Ok(meta) => Some(meta.downloaded_at),
                    Err(e) => {
                        warn!("Unreadable cache metadata {}: {e}", meta_path.display());
                        None
                    }
                }
            } else {
                None
            };
            versions.push(CachedVersion {
                name,
                complete,
                downloaded_at,
            });
        }
        versions.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(versions)
    }
}

async fn subdirectories(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut result = Vec::new();
    let mut entries = async_fs::read_dir(dir)
        .await
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            result.push((entry.file_name().to_string_lossy().to_string(), entry.path()));
        }
    }
    Ok(result)
}

async fn read_metadata(path: &Path) -> Result<CacheMetadata> {
    let content = async_fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}

/// Directory name used for a version.
///
/// `%`, `/` and `\` are percent-encoded, so distinct refs such as
/// `feature/x` and `feature_x` never share a directory.
#[must_use]
pub fn version_dir_name(version: &str) -> String {
    let mut key = String::with_capacity(version.len());
    for c in version.trim().chars() {
        match c {
            '%' => key.push_str("%25"),
            '/' => key.push_str("%2F"),
            '\\' => key.push_str("%5C"),
            _ => key.push(c),
        }
    }
    key
}

fn validate_key(key: &str) -> Result<()> {
    let reason = if key.trim().is_empty() {
        Some("must not be empty")
    } else if key == "." || key == ".." {
        Some("must not be '.' or '..'")
    } else if key.contains(['/', '\\']) {
        Some("must not contain path separators")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CmhError::InvalidCacheKey {
            key: key.to_string(),
            reason: reason.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}
