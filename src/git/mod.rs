//! Git integration for module downloads
//!
//! CMakeHub never embeds a git implementation. Modules are fetched with the
//! system `git` binary so SSH agents, credential helpers and proxy settings
//! the user already has keep working.
//!
//! The only network operation is a shallow clone of a single ref:
//!
//! ```text
//! git clone --depth 1 --branch <ref> -- <repository> <cache>/<module>/<ref>
//! ```

pub mod command_builder;

pub use command_builder::GitCommand;

use crate::core::CmhError;
use crate::utils::platform::{command_exists, get_git_command};
use anyhow::Result;
use std::path::Path;
use std::time::Duration;

/// Fail with [`CmhError::GitNotFound`] unless git is on `PATH`.
///
/// # Errors
///
/// Returns [`CmhError::GitNotFound`] when git cannot be found.
pub fn ensure_git_available() -> Result<()> {
    if command_exists(get_git_command()) {
        Ok(())
    } else {
        Err(CmhError::GitNotFound.into())
    }
}

/// Shallow-clone `url` at `reference` into `target`.
///
/// `target` must be absent or an empty directory.
///
/// # Errors
///
/// Returns [`CmhError::GitCommandError`] carrying git's stderr when the
/// clone fails or exceeds `clone_timeout`, and [`CmhError::GitNotFound`]
/// when git is missing.
pub async fn shallow_clone(
    url: &str,
    reference: &str,
    target: &Path,
    clone_timeout: Duration,
    context: &str,
) -> Result<()> {
    GitCommand::clone_shallow(url, reference, target)
        .with_timeout(Some(clone_timeout))
        .with_context(context)
        .execute()
        .await
}
