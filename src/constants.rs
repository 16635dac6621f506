//! Global constants used throughout the CMakeHub codebase.
//!
//! Timeouts, well-known file names and environment variable names live here
//! so that the cache, the downloader and the CLI agree on them.

use std::time::Duration;

/// Name of the catalog document.
pub const INDEX_FILE_NAME: &str = "modules.json";

/// Suffix appended to the previous catalog when a fresh one is installed.
pub const INDEX_BACKUP_SUFFIX: &str = ".backup";

/// Default remote location of the catalog.
pub const DEFAULT_INDEX_URL: &str =
    "https://raw.githubusercontent.com/caomengxuan666/CMakeHub/main/modules.json";

/// Sidecar file marking a cache entry as complete.
pub const CACHE_META_FILE: &str = ".cmh_meta.json";

/// Git ref used when neither the caller nor the catalog names a version.
pub const DEFAULT_MODULE_VERSION: &str = "master";

/// Name of the CMake loader script shipped with CMakeHub.
pub const LOADER_FILE_NAME: &str = "loader.cmake";

/// Directory, relative to a project root, holding the loader script.
pub const LOADER_RELATIVE_DIR: &str = "cmake/hub";

/// Name of the per-user CMakeHub directory under the home directory.
pub const DATA_DIR_NAME: &str = ".cmakehub";

/// Name of the global configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the cache root.
pub const CACHE_DIR_ENV: &str = "CMH_CACHE_DIR";

/// Environment variable pointing at a specific catalog file.
pub const INDEX_PATH_ENV: &str = "CMH_INDEX";

/// Environment variable pointing at a specific configuration file.
pub const CONFIG_PATH_ENV: &str = "CMH_CONFIG";

/// Timeout for fetching the remote catalog (30 seconds).
pub const INDEX_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for shallow clones (5 minutes).
///
/// Can be changed through `clone_timeout_secs` in the global config.
pub const GIT_CLONE_TIMEOUT: Duration = Duration::from_secs(300);

/// Timeout for probing the installed CMake version (10 seconds).
pub const CMAKE_PROBE_TIMEOUT: Duration = Duration::from_secs(10);
