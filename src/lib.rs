//! CMakeHub - index, cache and download manager for reusable CMake modules
//!
//! CMakeHub keeps a catalog of third-party CMake modules (`modules.json`),
//! answers queries over it, and materialises modules on disk with shallow
//! git clones so a CMake project can include them by name.
//!
//! # Architecture Overview
//!
//! - The **catalog** is a JSON document with a `modules` list and a
//!   `categories` label map. It is read from the first existing candidate
//!   location and can be refreshed from a remote URL.
//! - The **cache** holds one directory per module and version:
//!   `<cache>/<module>/<version>/`. A `.cmh_meta.json` sidecar marks an entry
//!   as complete; directories without one are never reused.
//! - **Downloads** shell out to the system `git` (`clone --depth 1 --branch`),
//!   so existing credentials and proxies keep working.
//!
//! # Core Modules
//!
//! - [`index`] - Catalog records, loading, refresh with backup, validation, statistics
//! - [`index::query`] - List, search, lookup and compatibility checks (pure)
//! - [`cache`] - Cache layout, sidecar metadata, inspection and clearing
//! - [`cache::downloader`] - Shallow clone of a module into the cache
//! - [`git`] - Git command builder with timeouts and error mapping
//! - [`version`] - Dotted version and C++ standard comparison
//! - [`config`] - Config file, environment overrides and path resolution
//! - [`core`] - Error taxonomy and user-facing error rendering
//! - [`cli`] - The `cmakehub` command-line interface
//! - [`utils`] - Platform detection, filesystem helpers, progress spinners
//!
//! # Cache Layout
//!
//! ```text
//! ~/.cmakehub/cache/            ($CMH_CACHE_DIR)
//! ├── sanitizers/
//! │   └── master/
//! │       ├── .cmh_meta.json
//! │       └── cmake/FindSanitizers.cmake
//! └── code-coverage/
//!     └── main/
//! ```
//!
//! # Concurrency
//!
//! There is no locking. Two processes downloading the same module and
//! version at the same time may both clone into the same directory.

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod git;
pub mod index;
pub mod utils;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
