//! `cmakehub update` - drop cached copies so modules are fetched again

use super::CommandContext;
use super::common::rule;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

/// Clear cached modules, optionally downloading one again right away.
#[derive(Args, Debug)]
pub struct UpdateCommand {
    /// Module to update; omit to clear every cached module
    module: Option<String>,

    /// Download the module again immediately (requires a module name)
    #[arg(long, requires = "module")]
    download_now: bool,
}

impl UpdateCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        match self.module {
            Some(name) => update_one(ctx, &name, self.download_now).await,
            None => update_all(ctx).await,
        }
    }
}

async fn update_one(ctx: &CommandContext, name: &str, download_now: bool) -> Result<()> {
    let index = ctx.load_index().await?;
    let record = index.require(name)?;
    let cache = ctx.cache();

    println!("Updating module: {}", record.name);
    println!("{}", rule('-'));

    if cache.module_dir(&record.name)?.is_dir() {
        println!("Clearing cache for {}...", record.name);
        cache.clear(Some(&record.name)).await?;
        println!("  {} Cache cleared", "✓".green());
    } else {
        println!("  No existing cache found");
    }

    println!();
    if download_now {
        println!("Downloading {}...", record.name);
        let entry = ctx.downloader().download(record, None).await?;
        println!(
            "{} Module '{}' downloaded successfully ({})",
            "✓".green(),
            record.name,
            entry.path.display()
        );
    } else {
        println!("Next time you use 'cmakehub_use({})' in your project,", record.name);
        println!("CMakeHub will automatically download the latest version.");
        println!();
        println!("To download now, add --download-now flag:");
        println!("  cmakehub update {} --download-now", record.name);
    }

    Ok(())
}

async fn update_all(ctx: &CommandContext) -> Result<()> {
    let cache = ctx.cache();

    println!("Updating all modules...");
    println!("{}", rule('-'));

    let preview = cache.preview_clear(None).await?;
    if preview.is_empty() {
        println!("No cached modules found");
        return Ok(());
    }

    println!("Clearing cache for {} modules...", preview.count());
    let removed = cache.clear(None).await?;
    for name in &preview.modules {
        println!("  {} Cleared: {name}", "✓".green());
    }

    println!();
    println!("All caches cleared ({removed} modules).");
    println!();
    println!("Next time you use cmakehub_use() in your project,");
    println!("CMakeHub will automatically download the latest versions.");
    println!();
    println!("To download specific modules now, use:");
    println!("  cmakehub update <module_name> --download-now");

    Ok(())
}
