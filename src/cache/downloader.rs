//! Populates the cache with shallow clones of module repositories.

use super::{Cache, CacheEntry, CacheMetadata};
use crate::constants::{DEFAULT_MODULE_VERSION, GIT_CLONE_TIMEOUT};
use crate::core::CmhError;
use crate::git;
use crate::index::ModuleRecord;
use crate::utils::progress::Spinner;
use anyhow::{Context, Result};
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info};

/// Downloads modules into a [`Cache`].
///
/// A download for a `(module, version)` pair whose sidecar already exists
/// returns immediately without running git.
#[derive(Debug, Clone)]
pub struct Downloader {
    cache: Cache,
    clone_timeout: Duration,
    show_progress: bool,
}

impl Downloader {
    #[must_use]
    pub fn new(cache: Cache) -> Self {
        Self {
            cache,
            clone_timeout: GIT_CLONE_TIMEOUT,
            show_progress: false,
        }
    }

    #[must_use]
    pub const fn with_clone_timeout(mut self, clone_timeout: Duration) -> Self {
        self.clone_timeout = clone_timeout;
        self
    }

    /// Show a spinner on stderr while cloning.
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    #[must_use]
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// The ref that will be cloned: the override, else the record's
    /// version, else `master`.
    #[must_use]
    pub fn effective_version(record: &ModuleRecord, version_override: Option<&str>) -> String {
        version_override
            .or(record.version.as_deref())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_MODULE_VERSION)
            .to_string()
    }

    /// Make `record` available in the cache at the effective version.
    ///
    /// On a clone failure the partially populated entry directory is left
    /// on disk and no sidecar is written, so the next call will not treat it
    /// as a hit. Clear the module before retrying.
    ///
    /// # Errors
    ///
    /// - [`CmhError::ModuleSourceMissing`] if the record has no repository
    /// - [`CmhError::InvalidCacheKey`] if the name or version cannot be a directory name
    /// - [`CmhError::DownloadFailed`] carrying git's diagnostics if the clone fails
    /// - [`CmhError::GitNotFound`] if git is not installed
    pub async fn download(
        &self,
        record: &ModuleRecord,
        version_override: Option<&str>,
    ) -> Result<CacheEntry> {
        let repository = record
            .repository
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| CmhError::ModuleSourceMissing {
                name: record.name.clone(),
            })?;

        let version = Self::effective_version(record, version_override);
        let target = self.cache.entry_dir(&record.name, &version)?;

        if let Some(entry) = self.cache.lookup(&record.name, &version).await? {
            info!("Using cached {}@{} at {}", record.name, version, entry.path.display());
            return Ok(entry);
        }

        git::ensure_git_available()?;
        tokio::fs::create_dir_all(&target)
            .await
            .with_context(|| format!("Failed to create cache directory: {}", target.display()))?;

        debug!("Cloning {} at {} into {}", repository, version, target.display());
        let spinner =
            Spinner::new(self.show_progress, format!("Downloading {}@{}...", record.name, version));
        let cloned =
            git::shallow_clone(repository, &version, &target, self.clone_timeout, &record.name)
                .await;
        spinner.finish_and_clear();

        if let Err(err) = cloned {
            return Err(match err.downcast::<CmhError>() {
                Ok(CmhError::GitCommandError {
                    stderr,
                    ..
                }) => CmhError::DownloadFailed {
                    module: record.name.clone(),
                    url: repository.to_string(),
                    version,
                    reason: stderr,
                }
                .into(),
                Ok(other) => other.into(),
                Err(other) => other,
            });
        }

        let metadata = CacheMetadata {
            module: record.name.clone(),
            repository: repository.to_string(),
            version: version.clone(),
            path: record.path.clone().unwrap_or_default(),
            downloaded_at: Utc::now(),
        };
        self.cache.write_metadata(&target, &metadata).await?;
        info!("Downloaded {}@{} to {}", record.name, version, target.display());

        Ok(CacheEntry {
            module: record.name.clone(),
            version,
            path: target,
            metadata,
        })
    }
}
