//! Test utilities for CMakeHub
//!
//! Shared by unit tests and, through the `test-utils` feature, by the
//! integration tests:
//! - [`init_test_logging`] installs a test-writer subscriber once
//! - [`TestGit`] builds local repositories to clone over `file://`
//! - [`fixtures`] provides a sample `modules.json`
//!
//! ```rust,no_run
//! use cmakehub_cli::test_utils::{TestGit, init_test_logging};
//!
//! # fn example() -> anyhow::Result<()> {
//! init_test_logging(None);
//! let dir = tempfile::TempDir::new()?;
//! let repo = TestGit::create_module_repo(dir.path(), "cmake/Hello.cmake")?;
//! println!("clone from {}", repo.file_url());
//! # Ok(())
//! # }
//! ```

pub mod fixtures;
pub mod git_helper;

pub use fixtures::{sample_catalog, sample_catalog_json};
pub use git_helper::TestGit;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging
/// stays off.
///
/// ```bash
/// RUST_LOG=git=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
