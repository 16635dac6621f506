//! File system helpers for the catalog and the cache.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Creates a directory and all parents, failing if the path is a file.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Writes `content` to a sibling temp file, syncs it, then renames it over `path`.
///
/// Readers never observe a half-written file.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let temp_path = temp_sibling(path);
    {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;
        file.sync_all().with_context(|| "Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Path used for the temporary copy written by [`atomic_write`].
#[must_use]
pub fn temp_sibling(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Size and file count of a directory tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirStats {
    /// Total bytes of regular files
    pub bytes: u64,
    /// Number of regular files
    pub files: u64,
}

impl std::ops::AddAssign for DirStats {
    fn add_assign(&mut self, rhs: Self) {
        self.bytes += rhs.bytes;
        self.files += rhs.files;
    }
}

/// Recursively sums file sizes and counts files under `path`.
///
/// Symlinks are not followed.
pub fn dir_stats(path: &Path) -> Result<DirStats> {
    let mut stats = DirStats::default();
    for entry in WalkDir::new(path).follow_links(false) {
        let entry =
            entry.with_context(|| format!("Failed to traverse directory: {}", path.display()))?;
        if entry.file_type().is_file() {
            let metadata = entry
                .metadata()
                .with_context(|| format!("Failed to stat {}", entry.path().display()))?;
            stats.bytes += metadata.len();
            stats.files += 1;
        }
    }
    Ok(stats)
}

/// Async wrapper around [`dir_stats`] running on the blocking pool.
pub async fn get_dir_stats(path: &Path) -> Result<DirStats> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || dir_stats(&path))
        .await
        .context("Failed to join directory statistics task")?
}

/// Formats a byte count the way cache reports show it (`1.50 MB`).
#[must_use]
pub fn format_megabytes(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let mb = bytes as f64 / (1024.0 * 1024.0);
    format!("{mb:.2} MB")
}
