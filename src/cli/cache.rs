//! `cmakehub cache` - inspect and clear the module cache

use super::CommandContext;
use super::common::{confirm, print_banner, rule};
use crate::cache::{Cache, CacheReport};
use crate::utils::fs::format_megabytes;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

/// Manage downloaded modules.
#[derive(Args, Debug)]
pub struct CacheCommand {
    #[command(subcommand)]
    action: CacheAction,
}

#[derive(Subcommand, Debug)]
enum CacheAction {
    /// Show cached modules with sizes and versions
    Info,

    /// Delete the cache of one module, or of every module
    Clear {
        /// Module to clear; omit to clear everything
        module: Option<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        force: bool,
    },
}

impl CacheCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let cache = ctx.cache();
        match self.action {
            CacheAction::Info => {
                let report = cache.info().await?;
                print_info(&report);
                Ok(())
            }
            CacheAction::Clear {
                module,
                force,
            } => clear(&cache, module.as_deref(), force).await,
        }
    }
}

fn print_info(report: &CacheReport) {
    if !report.exists {
        println!("Cache directory does not exist: {}", report.root.display());
        return;
    }

    print_banner("Cache Information");
    println!();
    println!("Cache Directory: {}", report.root.display());
    println!();

    if report.is_empty() {
        println!("Cache is empty");
        return;
    }

    println!("Cached Modules ({}):", report.modules.len());
    println!("{}", rule('-'));
    for module in &report.modules {
        println!("  {}", module.name.cyan());
        println!(
            "    Size: {} ({} bytes)",
            format_megabytes(module.size_bytes),
            module.size_bytes
        );
        println!("    Files: {}", module.file_count);
        if !module.versions.is_empty() {
            let versions: Vec<String> = module
                .versions
                .iter()
                .map(|v| {
                    if v.complete {
                        v.name.clone()
                    } else {
                        format!("{} (incomplete)", v.name)
                    }
                })
                .collect();
            println!("    Versions: {}", versions.join(", "));
        }
        if let Some(stamp) = module.last_downloaded() {
            println!("    Last Downloaded: {}", stamp.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        println!();
    }

    println!(
        "Total: {} ({} bytes) in {} files",
        format_megabytes(report.total_size()),
        report.total_size(),
        report.total_files()
    );
}

async fn clear(cache: &Cache, module: Option<&str>, force: bool) -> Result<()> {
    let preview = cache.preview_clear(module).await?;
    if preview.is_empty() {
        println!("Cache is empty");
        return Ok(());
    }

    if !force {
        println!(
            "This will remove {} module cache(s) ({}): {}",
            preview.count(),
            format_megabytes(preview.size_bytes),
            preview.modules.join(", ")
        );
        println!("{}", "This cannot be undone.".yellow());
        let prompt = match module {
            Some(name) => format!("Are you sure you want to clear cache for '{name}'?"),
            None => format!(
                "Are you sure you want to clear ALL cache in {}?",
                cache.cache_dir().display()
            ),
        };
        if !confirm(&prompt).await? {
            println!("Cancelled");
            return Ok(());
        }
    }

    let removed = cache.clear(module).await?;
    match module {
        Some(name) => println!("{} Cache cleared for module: {name}", "✓".green()),
        None => println!(
            "{} Cleared {removed} module cache(s) from {}",
            "✓".green(),
            cache.cache_dir().display()
        ),
    }
    Ok(())
}
