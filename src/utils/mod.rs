//! Cross-platform utilities for CMakeHub.
//!
//! - [`fs`] - Atomic writes and directory statistics for the cache
//! - [`platform`] - Host platform detection, home directory, path expansion
//! - [`progress`] - Spinners that respect `--no-progress`

pub mod fs;
pub mod platform;
pub mod progress;

pub use fs::{DirStats, atomic_write, dir_stats};
pub use platform::{Platform, get_git_command, get_home_dir, is_windows, resolve_path};
pub use progress::Spinner;
