//! Configuration and path resolution for CMakeHub
//!
//! CMakeHub works with three on-disk locations: the module catalog
//! (`modules.json`), the module cache, and the CMake loader script used by
//! `use` snippets and `init`. Each is resolved from a short list of
//! candidates so the tool works from a CMakeHub checkout, from an arbitrary
//! project directory, and from a plain user installation.
//!
//! # Resolution Order
//!
//! **Cache root**
//! 1. `CMH_CACHE_DIR`
//! 2. `cache_dir` from `config.toml`
//! 3. `~/.cmakehub/cache`
//!
//! **Catalog** (first existing file wins)
//! 1. `--index <path>`
//! 2. `CMH_INDEX`
//! 3. `index_path` from `config.toml`
//! 4. `./modules.json`
//! 5. `~/.cmakehub/modules.json`
//!
//! **Loader script** (first existing file wins)
//! 1. `./cmake/hub/loader.cmake`
//! 2. `<catalog dir>/cmake/hub/loader.cmake`
//! 3. `~/.cmakehub/cmake/hub/loader.cmake`
//!
//! The global config file itself comes from `--config`, then `CMH_CONFIG`,
//! then `~/.cmakehub/config.toml`.
//!
//! Environment access goes through a lookup function so resolution can be
//! tested without touching the process environment.

pub mod global;

pub use global::GlobalConfig;

use crate::constants::{
    CACHE_DIR_ENV, CONFIG_PATH_ENV, DATA_DIR_NAME, DEFAULT_INDEX_URL, GIT_CLONE_TIMEOUT,
    INDEX_FILE_NAME, INDEX_PATH_ENV, LOADER_FILE_NAME, LOADER_RELATIVE_DIR,
};
use crate::core::CmhError;
use crate::utils::platform::resolve_path;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Paths given on the command line, which take precedence over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--config <path>`
    pub config_path: Option<PathBuf>,
    /// `--index <path>`
    pub index_path: Option<PathBuf>,
}

/// Fully resolved locations and settings for one invocation.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// `~/.cmakehub`
    pub data_dir: PathBuf,
    /// Module cache root
    pub cache_dir: PathBuf,
    /// Remote catalog URL for `update-index`
    pub index_url: String,
    /// Upper bound for one shallow clone
    pub clone_timeout: Duration,
    /// Catalog locations in lookup order
    pub index_candidates: Vec<PathBuf>,
    /// Catalog explicitly requested through `--index`, `CMH_INDEX` or the config file
    pub explicit_index: Option<PathBuf>,
    /// Directory used for `./` candidates
    pub working_dir: PathBuf,
}

impl HubConfig {
    /// Resolve configuration from the real process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the home or working directory cannot be
    /// determined, or the config file is invalid.
    pub async fn load(overrides: ConfigOverrides) -> Result<Self> {
        let home = crate::utils::get_home_dir()?;
        let working_dir =
            std::env::current_dir().context("Failed to determine current directory")?;
        Self::resolve_with(overrides, &home, &working_dir, |key| std::env::var(key).ok()).await
    }

    /// Resolve configuration with an explicit home directory, working
    /// directory and environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid or a configured path
    /// cannot be expanded.
    pub async fn resolve_with<F>(
        overrides: ConfigOverrides,
        home: &Path,
        working_dir: &Path,
        env: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = home.join(DATA_DIR_NAME);

        let config_path = overrides
            .config_path
            .clone()
            .or_else(|| non_empty(env(CONFIG_PATH_ENV)).map(PathBuf::from));
        let global = GlobalConfig::load_with_optional(config_path, Some(home)).await?;

        let cache_dir = match non_empty(env(CACHE_DIR_ENV)) {
            Some(dir) => PathBuf::from(dir),
            None => match &global.cache_dir {
                Some(dir) => resolve_path(dir)?,
                None => data_dir.join("cache"),
            },
        };
        debug!("Cache root: {}", cache_dir.display());

        let mut index_candidates = Vec::new();
        if let Some(path) = overrides.index_path {
            index_candidates.push(path);
        }
        if let Some(path) = non_empty(env(INDEX_PATH_ENV)) {
            index_candidates.push(PathBuf::from(path));
        }
        if let Some(path) = &global.index_path {
            index_candidates.push(resolve_path(path)?);
        }
        let explicit_index = index_candidates.first().cloned();
        index_candidates.push(working_dir.join(INDEX_FILE_NAME));
        index_candidates.push(data_dir.join(INDEX_FILE_NAME));

        let clone_timeout =
            global.clone_timeout_secs.map_or(GIT_CLONE_TIMEOUT, Duration::from_secs);

        Ok(Self {
            data_dir,
            cache_dir,
            index_url: global.index_url.unwrap_or_else(|| DEFAULT_INDEX_URL.to_string()),
            clone_timeout,
            index_candidates,
            explicit_index,
            working_dir: working_dir.to_path_buf(),
        })
    }

    /// First catalog candidate that exists.
    ///
    /// # Errors
    ///
    /// Returns [`CmhError::IndexNotFound`] listing every candidate when none exists.
    pub fn find_index_path(&self) -> Result<PathBuf> {
        for candidate in &self.index_candidates {
            debug!("Checking for catalog at {}", candidate.display());
            if candidate.is_file() {
                return Ok(candidate.clone());
            }
        }
        Err(CmhError::IndexNotFound {
            searched: join_paths(&self.index_candidates),
        }
        .into())
    }

    /// Where `update-index` writes the refreshed catalog.
    ///
    /// `--local` targets `./modules.json`. Otherwise an explicitly requested
    /// catalog is used even if it does not exist yet, then the first existing
    /// candidate, then `~/.cmakehub/modules.json`.
    #[must_use]
    pub fn index_write_target(&self, local: bool) -> PathBuf {
        if local {
            return self.working_dir.join(INDEX_FILE_NAME);
        }
        if let Some(path) = &self.explicit_index {
            return path.clone();
        }
        self.find_index_path().unwrap_or_else(|_| self.data_dir.join(INDEX_FILE_NAME))
    }

    /// Loader script candidates in lookup order.
    #[must_use]
    pub fn loader_candidates(&self, catalog_path: Option<&Path>) -> Vec<PathBuf> {
        let relative = Path::new(LOADER_RELATIVE_DIR).join(LOADER_FILE_NAME);
        let mut candidates = vec![self.working_dir.join(&relative)];
        if let Some(dir) = catalog_path.and_then(Path::parent) {
            let candidate = dir.join(&relative);
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        candidates.push(self.data_dir.join(&relative));
        candidates
    }

    /// First loader candidate that exists.
    ///
    /// # Errors
    ///
    /// Returns [`CmhError::LoaderNotFound`] listing every candidate when none exists.
    pub fn find_loader_path(&self, catalog_path: Option<&Path>) -> Result<PathBuf> {
        let candidates = self.loader_candidates(catalog_path);
        candidates.iter().find(|c| c.is_file()).cloned().ok_or_else(|| {
            CmhError::LoaderNotFound {
                searched: join_paths(&candidates),
            }
            .into()
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}
