//! Platform-specific utilities and cross-platform compatibility helpers
//!
//! Catalog entries restrict modules to a set of platform identifiers
//! (`windows`, `macos`, `linux`). This module maps the host onto one of those
//! identifiers and hides the remaining platform differences CMakeHub cares
//! about: the home directory, the git executable name and `~` expansion.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cmakehub_cli::utils::platform::{Platform, get_home_dir};
//!
//! # fn example() -> anyhow::Result<()> {
//! let home = get_home_dir()?;
//! println!("Home directory: {}", home.display());
//! println!("Running on {}", Platform::current());
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Platform identifiers used by the module catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Microsoft Windows
    Windows,
    /// Apple macOS
    MacOs,
    /// Linux and other Unix-like systems
    Linux,
}

impl Platform {
    /// The platform this binary was built for.
    ///
    /// Anything that is neither Windows nor macOS reports as `linux`, matching
    /// how the catalog treats Unix-like hosts.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// The identifier used in `modules.json`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "macos",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win" | "win32" => Ok(Self::Windows),
            "macos" | "darwin" | "osx" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            other => Err(anyhow::anyhow!(
                "Unknown platform '{other}'. Expected one of: windows, macos, linux"
            )),
        }
    }
}

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the user's home directory.
///
/// On Windows this is the user profile directory.
pub fn get_home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        let platform_help = if is_windows() {
            "On Windows: Check that the USERPROFILE environment variable is set"
        } else {
            "On Unix/Linux: Check that the HOME environment variable is set"
        };
        anyhow::anyhow!("Could not determine home directory.\n\n{platform_help}")
    })
}

/// Returns the appropriate Git command name for the current platform.
#[must_use]
pub const fn get_git_command() -> &'static str {
    if is_windows() {
        "git.exe"
    } else {
        "git"
    }
}

/// Checks whether a command is available on `PATH`.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Expands `~` and environment variables in a user-supplied path.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .map_err(|e| anyhow::anyhow!("Failed to expand path '{path}': {e}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
