//! Error handling for CMakeHub
//!
//! This module provides the error taxonomy of CMakeHub and the user-facing
//! rendering of those errors. The error system follows two rules:
//! 1. **Strongly-typed errors** so callers can match on the failure mode
//! 2. **Actionable messages** so every CLI failure names what was missing or
//!    invalid and, where one exists, the command that fixes it
//!
//! # Architecture
//!
//! - [`CmhError`] - Enumerated failure cases of the library
//! - [`ErrorContext`] - Wrapper adding details and a suggestion for display
//! - [`user_friendly_error`] - Converts any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! Library operations return [`anyhow::Result`] with a [`CmhError`] at the
//! root of the chain. Only the binary turns errors into printed diagnostics
//! and an exit status.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cmakehub_cli::core::{CmhError, user_friendly_error};
//!
//! let error = CmhError::CacheEntryNotFound {
//!     name: "sanitizers".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for CMakeHub operations
///
/// # Error Categories
///
/// ## Catalog
/// - [`IndexNotFound`] - No catalog document at any searched location
/// - [`IndexParseError`] - Catalog is not valid JSON or lacks `modules`
/// - [`IndexSchemaError`] - A fetched catalog lacks the `modules` key
/// - [`ModuleNotFound`] - Name absent from the loaded catalog
/// - [`ModuleSourceMissing`] - Catalog entry has no repository URL
///
/// ## Cache and downloads
/// - [`CacheEntryNotFound`] - Module has no cache directory
/// - [`InvalidCacheKey`] - Module name or version cannot be a path component
/// - [`DownloadFailed`] - Shallow clone failed
/// - [`GitNotFound`] / [`GitCommandError`] - Git unavailable or failing
///
/// ## Network
/// - [`NetworkError`] - Remote catalog fetch failed at the transport level
///
/// [`IndexNotFound`]: CmhError::IndexNotFound
/// [`IndexParseError`]: CmhError::IndexParseError
/// [`IndexSchemaError`]: CmhError::IndexSchemaError
/// [`ModuleNotFound`]: CmhError::ModuleNotFound
/// [`ModuleSourceMissing`]: CmhError::ModuleSourceMissing
/// [`CacheEntryNotFound`]: CmhError::CacheEntryNotFound
/// [`InvalidCacheKey`]: CmhError::InvalidCacheKey
/// [`DownloadFailed`]: CmhError::DownloadFailed
/// [`GitNotFound`]: CmhError::GitNotFound
/// [`GitCommandError`]: CmhError::GitCommandError
/// [`NetworkError`]: CmhError::NetworkError
#[derive(Error, Debug)]
pub enum CmhError {
    /// No catalog document could be located
    ///
    /// # Fields
    /// - `searched`: Every candidate path that was checked, in order
    #[error("modules.json not found (searched: {searched})")]
    IndexNotFound {
        /// Comma separated list of searched paths
        searched: String,
    },

    /// The catalog is not valid JSON or is missing required structure
    #[error("Invalid module index {file}: {reason}")]
    IndexParseError {
        /// File or URL the document came from
        file: String,
        /// Parser message or description of the missing structure
        reason: String,
    },

    /// A fetched catalog parsed but does not have the expected shape
    #[error("Invalid module index format from {origin}: {reason}")]
    IndexSchemaError {
        /// URL the document was fetched from
        origin: String,
        /// What was missing
        reason: String,
    },

    /// Module name absent from the catalog
    #[error("Module '{name}' not found")]
    ModuleNotFound {
        /// The requested module name
        name: String,
        /// Catalog names that look similar to the requested one
        similar: Vec<String>,
    },

    /// A module cannot be downloaded because its record has no repository
    #[error("Module '{name}' has no repository URL in the index")]
    ModuleSourceMissing {
        /// The module name
        name: String,
    },

    /// Module has no cache directory
    #[error("Module cache not found: {name}")]
    CacheEntryNotFound {
        /// The module name
        name: String,
    },

    /// Module name or version cannot be used as a cache path component
    #[error("Invalid cache key '{key}': {reason}")]
    InvalidCacheKey {
        /// The rejected name or version
        key: String,
        /// Why it was rejected
        reason: String,
    },

    /// Shallow clone of a module repository failed
    ///
    /// The partially populated entry directory is left on disk.
    #[error("Failed to download module '{module}' at '{version}' from {url}")]
    DownloadFailed {
        /// Module name
        module: String,
        /// Repository URL
        url: String,
        /// Git ref that was requested
        version: String,
        /// Diagnostic text from git
        reason: String,
    },

    /// Git executable not found in PATH
    #[error("Git is not installed or not found in PATH")]
    GitNotFound,

    /// Git command returned a non-zero exit status or timed out
    #[error("Git operation failed: {operation}")]
    GitCommandError {
        /// The git operation that failed (e.g., "clone")
        operation: String,
        /// The error output from the git command
        stderr: String,
    },

    /// Remote fetch failed at the transport level
    #[error("Network error: {operation}")]
    NetworkError {
        /// The network operation that failed
        operation: String,
        /// Reason for the failure
        reason: String,
    },

    /// `init` target already exists
    #[error("Directory '{path}' already exists")]
    ProjectExists {
        /// The directory that already exists
        path: String,
    },

    /// The CMake loader script could not be located
    #[error("loader.cmake not found (searched: {searched})")]
    LoaderNotFound {
        /// Comma separated list of searched paths
        searched: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for CmhError {
    fn clone(&self) -> Self {
        match self {
            Self::IndexNotFound {
                searched,
            } => Self::IndexNotFound {
                searched: searched.clone(),
            },
            Self::IndexParseError {
                file,
                reason,
            } => Self::IndexParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::IndexSchemaError {
                origin,
                reason,
            } => Self::IndexSchemaError {
                origin: origin.clone(),
                reason: reason.clone(),
            },
            Self::ModuleNotFound {
                name,
                similar,
            } => Self::ModuleNotFound {
                name: name.clone(),
                similar: similar.clone(),
            },
            Self::ModuleSourceMissing {
                name,
            } => Self::ModuleSourceMissing {
                name: name.clone(),
            },
            Self::CacheEntryNotFound {
                name,
            } => Self::CacheEntryNotFound {
                name: name.clone(),
            },
            Self::InvalidCacheKey {
                key,
                reason,
            } => Self::InvalidCacheKey {
                key: key.clone(),
                reason: reason.clone(),
            },
            Self::DownloadFailed {
                module,
                url,
                version,
                reason,
            } => Self::DownloadFailed {
                module: module.clone(),
                url: url.clone(),
                version: version.clone(),
                reason: reason.clone(),
            },
            Self::GitNotFound => Self::GitNotFound,
            Self::GitCommandError {
                operation,
                stderr,
            } => Self::GitCommandError {
                operation: operation.clone(),
                stderr: stderr.clone(),
            },
            Self::NetworkError {
                operation,
                reason,
            } => Self::NetworkError {
                operation: operation.clone(),
                reason: reason.clone(),
            },
            Self::ProjectExists {
                path,
            } => Self::ProjectExists {
                path: path.clone(),
            },
            Self::LoaderNotFound {
                searched,
            } => Self::LoaderNotFound {
                searched: searched.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            // io, json and toml errors are not Clone; keep their message
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::JsonError(e) => Self::Other {
                message: format!("JSON error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error wrapper carrying user-facing details and a suggested fix
///
/// ```rust,no_run
/// use cmakehub_cli::core::{CmhError, ErrorContext};
///
/// let ctx = ErrorContext::new(CmhError::GitNotFound)
///     .with_suggestion("Install git from https://git-scm.com/")
///     .with_details("CMakeHub downloads modules with git");
/// ctx.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CmhError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without details or suggestion.
    #[must_use]
    pub const fn new(error: CmhError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions are displayed in green and should name a concrete action.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error, displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// The whole error chain is searched for a [`CmhError`], so errors wrapped
/// with `anyhow::Context` still receive their tailored suggestion. I/O errors
/// get generic filesystem guidance; anything else is reported with its full
/// cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(cmh_error) = error.chain().find_map(|e| e.downcast_ref::<CmhError>()) {
        return create_error_context(cmh_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(CmhError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check file ownership and permissions of the cache and index directories")
                .with_details("CMakeHub could not read or write a file it needs");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(CmhError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(CmhError::Other {
        message,
    })
}

fn create_error_context(error: CmhError) -> ErrorContext {
    match &error {
        CmhError::IndexNotFound { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Run 'cmakehub update-index' to download the module index, or pass --index <path>")
            .with_details("CMakeHub looks for modules.json in --index, $CMH_INDEX, the config file, the current directory and ~/.cmakehub"),

        CmhError::IndexParseError { file, .. } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Fix the JSON in {file}, or replace it with 'cmakehub update-index'"
            ))
            .with_details("The index must be a JSON object with a top-level 'modules' array"),

        CmhError::IndexSchemaError { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Check the index URL; the existing local index was left untouched")
            .with_details("The downloaded document has no top-level 'modules' key"),

        CmhError::ModuleNotFound { similar, .. } => {
            let ctx = ErrorContext::new(error.clone());
            if similar.is_empty() {
                ctx.with_suggestion("Use 'cmakehub list' to see available modules")
            } else {
                ctx.with_suggestion(format!(
                    "Did you mean: {}? Use 'cmakehub list' to see available modules",
                    similar.join(", ")
                ))
            }
        }

        CmhError::ModuleSourceMissing { name } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Add a 'repository' URL for '{name}' to modules.json or update the index"
            )),

        CmhError::CacheEntryNotFound { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Use 'cmakehub cache info' to see cached modules"),

        CmhError::InvalidCacheKey { .. } => ErrorContext::new(error.clone())
            .with_details("Module names and versions become directory names inside the cache"),

        CmhError::DownloadFailed { module, reason, .. } => ErrorContext::new(error.clone())
            .with_details(reason.trim().to_string())
            .with_suggestion(format!(
                "Check the repository URL, version and your network, then run 'cmakehub cache clear {module} --force' before retrying"
            )),

        CmhError::GitNotFound => ErrorContext::new(error.clone())
            .with_suggestion("Install git from https://git-scm.com/ or your package manager (e.g., 'brew install git', 'apt install git')")
            .with_details("CMakeHub downloads modules with 'git clone'"),

        CmhError::GitCommandError { stderr, .. } => ErrorContext::new(error.clone())
            .with_details(stderr.trim().to_string())
            .with_suggestion("Check your git configuration and repository access. Try running the git command manually for more details"),

        CmhError::NetworkError { reason, .. } => ErrorContext::new(error.clone())
            .with_details(reason.clone())
            .with_suggestion("Check your internet connection and that the index URL is reachable"),

        CmhError::ProjectExists { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Choose another project name or remove the existing directory"),

        CmhError::LoaderNotFound { .. } => ErrorContext::new(error.clone())
            .with_suggestion("Run from a CMakeHub checkout or copy loader.cmake to ~/.cmakehub/cmake/hub/"),

        CmhError::ConfigError { .. } | CmhError::TomlError(_) => ErrorContext::new(error.clone())
            .with_suggestion("Check ~/.cmakehub/config.toml (or the file given by --config / $CMH_CONFIG)"),

        _ => ErrorContext::new(error),
    }
}
