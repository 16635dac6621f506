//! Command-line interface for CMakeHub.
//!
//! Each subcommand is a clap `Args` struct with an `execute` method taking a
//! [`CommandContext`], which carries the resolved configuration for the
//! invocation.
//!
//! # Commands
//!
//! - `list` / `search` / `info` - Browse the catalog
//! - `check` - Compatibility of a module with the current environment
//! - `use` - Emit the CMake snippet for a module
//! - `init` - Create a new project wired for CMakeHub
//! - `cache info|clear` - Inspect and clear downloaded modules
//! - `update` - Drop cached copies so the next use downloads again
//! - `update-index` / `validate` / `stats` - Maintain the catalog itself
//!
//! # Global Options
//!
//! - `--verbose` / `--quiet` - Log level (`RUST_LOG` wins when set)
//! - `--no-progress` - Hide spinners during clones and downloads
//! - `--config <path>` - Alternate `config.toml`
//! - `--index <path>` - Use this `modules.json`

mod cache;
mod check;
pub mod common;
mod index;
mod info;
mod init;
mod list;
mod search;
mod update;
mod use_module;

use crate::cache::{Cache, Downloader};
use crate::config::{ConfigOverrides, HubConfig};
use crate::index::{Index, IndexStore};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Resolved settings shared by all commands.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: HubConfig,
    pub show_progress: bool,
    /// Global `--verbose`; some reports print extra detail
    pub verbose: bool,
}

impl CommandContext {
    /// The catalog file this invocation uses.
    ///
    /// # Errors
    ///
    /// Returns `IndexNotFound` when no candidate exists.
    pub fn index_store(&self) -> Result<IndexStore> {
        Ok(IndexStore::new(self.config.find_index_path()?))
    }

    /// Locate and load the catalog.
    ///
    /// # Errors
    ///
    /// Returns `IndexNotFound` or `IndexParseError`.
    pub async fn load_index(&self) -> Result<Index> {
        self.index_store()?.load().await
    }

    #[must_use]
    pub fn cache(&self) -> Cache {
        Cache::with_dir(&self.config.cache_dir)
    }

    #[must_use]
    pub fn downloader(&self) -> Downloader {
        Downloader::new(self.cache())
            .with_clone_timeout(self.config.clone_timeout)
            .with_progress(self.show_progress)
    }
}

/// CMakeHub - index, cache and download manager for reusable CMake modules
#[derive(Parser)]
#[command(
    name = "cmakehub",
    about = "Find, download and use reusable CMake modules",
    version,
    long_about = "CMakeHub manages a catalog of reusable CMake modules (modules.json), \
                  downloads them with shallow git clones into a local cache, and \
                  generates the CMake code needed to use them."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config.toml (default: ~/.cmakehub/config.toml)
    #[arg(long, global = true, env = "CMH_CONFIG")]
    config: Option<PathBuf>,

    /// Path to modules.json, tried before every other location
    #[arg(long, global = true)]
    index: Option<PathBuf>,

    /// Disable progress spinners
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List available modules
    List(list::ListCommand),

    /// Search modules by name, description or tag
    Search(search::SearchCommand),

    /// Show everything the catalog knows about a module
    Info(info::InfoCommand),

    /// Inspect or clear the module cache
    Cache(cache::CacheCommand),

    /// Check whether a module is compatible with this environment
    Check(check::CheckCommand),

    /// Clear cached copies of modules, optionally downloading again
    Update(update::UpdateCommand),

    /// Generate the CMake code for using a module
    #[command(name = "use")]
    Use(use_module::UseCommand),

    /// Create a new C++ project set up for CMakeHub
    Init(init::InitCommand),

    /// Download the latest modules.json
    UpdateIndex(index::UpdateIndexCommand),

    /// Check modules.json for structural problems
    Validate(index::ValidateCommand),

    /// Show catalog statistics
    Stats(index::StatsCommand),
}

impl Cli {
    /// Install the global tracing subscriber on stderr.
    ///
    /// `RUST_LOG` takes precedence; otherwise `--verbose` selects `debug`,
    /// `--quiet` selects `error` and the default is `warn`.
    pub fn init_logging(&self) {
        let default_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(self.verbose)
            .try_init();
    }

    /// Resolve configuration and run the selected command.
    ///
    /// # Errors
    ///
    /// Returns whatever the command fails with; the binary renders it.
    pub async fn execute(self) -> Result<()> {
        let config = HubConfig::load(ConfigOverrides {
            config_path: self.config.clone(),
            index_path: self.index.clone(),
        })
        .await?;
        let ctx = CommandContext {
            config,
            show_progress: !self.no_progress && !self.quiet,
            verbose: self.verbose,
        };

        match self.command {
            Commands::List(cmd) => cmd.execute(&ctx).await,
            Commands::Search(cmd) => cmd.execute(&ctx).await,
            Commands::Info(cmd) => cmd.execute(&ctx).await,
            Commands::Cache(cmd) => cmd.execute(&ctx).await,
            Commands::Check(cmd) => cmd.execute(&ctx).await,
            Commands::Update(cmd) => cmd.execute(&ctx).await,
            Commands::Use(cmd) => cmd.execute(&ctx).await,
            Commands::Init(cmd) => cmd.execute(&ctx).await,
            Commands::UpdateIndex(cmd) => cmd.execute(&ctx).await,
            Commands::Validate(cmd) => cmd.execute(&ctx).await,
            Commands::Stats(cmd) => cmd.execute(&ctx).await,
        }
    }
}
