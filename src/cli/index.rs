//! Catalog maintenance: `update-index`, `validate` and `stats`

use super::CommandContext;
use super::common::{print_banner, rule};
use crate::index::{IndexStats, IndexStore, ValidationReport, validate_index};
use crate::utils::Spinner;
use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

/// Download the latest modules.json.
///
/// The previous catalog is kept next to the new one as `modules.json.backup`.
/// Nothing is replaced unless the download parses and has a `modules` list.
#[derive(Args, Debug)]
pub struct UpdateIndexCommand {
    /// Catalog URL (default: config `index_url` or the CMakeHub repository)
    #[arg(long)]
    url: Option<String>,

    /// Save to ./modules.json instead of the resolved catalog location
    #[arg(long)]
    local: bool,
}

impl UpdateIndexCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let url = self.url.unwrap_or_else(|| ctx.config.index_url.clone());
        let store = IndexStore::new(ctx.config.index_write_target(self.local));
        let had_previous = store.path().exists();

        println!("Updating CMakeHub modules index...");
        println!("{}", rule('-'));
        println!("Fetching from: {url}");

        let spinner = Spinner::new(ctx.show_progress, "Downloading modules.json...");
        let refreshed = store.refresh(&url).await;
        spinner.finish_and_clear();
        let index = refreshed?;

        println!("{} Downloaded {} modules", "✓".green(), index.modules.len());
        if had_previous {
            println!("{} Backed up existing file to: {}", "✓".green(), store.backup_path().display());
        }
        println!("{} Saved to: {}", "✓".green(), store.path().display());
        println!();

        print_stats(&IndexStats::from_index(&index));
        println!();
        println!("{} Index updated successfully!", "✓".green());
        Ok(())
    }
}

/// Check the catalog for missing fields, bad URLs and duplicates.
///
/// Exits with status 1 when any module has an issue or a name is
/// duplicated; warnings alone do not fail.
#[derive(Args, Debug)]
pub struct ValidateCommand {}

impl ValidateCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let store = ctx.index_store()?;
        println!("Reading modules from: {}", store.path().display());
        let index = store.load().await?;
        println!("Found {} modules", index.modules.len());

        let report = validate_index(&index);
        print_validation(&report);

        if report.is_valid() {
            println!("{} All modules are valid", "✓".green());
            Ok(())
        } else {
            bail!("{}", report.failure_summary())
        }
    }
}

/// Show catalog statistics.
#[derive(Args, Debug)]
pub struct StatsCommand {}

impl StatsCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let index = ctx.load_index().await?;
        print_stats(&IndexStats::from_index(&index));
        Ok(())
    }
}

fn print_stats(stats: &IndexStats) {
    print_banner("Index statistics:");
    println!("  Total modules: {}", stats.total_modules);
    println!("  Categories: {}", stats.category_count());
    println!("  Total stars: {}", stats.total_stars);
    println!();
    println!("Categories:");
    for (category, count) in &stats.per_category {
        println!("  - {category}: {count}");
    }
}

fn print_validation(report: &ValidationReport) {
    println!();
    println!("=== Module Structure Validation ===");
    for module in &report.modules {
        if module.is_valid() {
            println!("{} {}", "✓".green(), module.name);
        } else {
            println!("{} {}", "✗".red(), module.name);
            for issue in &module.issues {
                println!("  - {issue}");
            }
        }
        for warning in &module.warnings {
            println!("  {} {warning}", "⚠".yellow());
        }
    }

    println!();
    println!("=== Summary ===");
    println!("Total modules: {}", report.modules.len());
    println!("Valid structure: {}/{}", report.valid_count(), report.modules.len());

    println!();
    println!("=== Duplicate Check ===");
    if report.duplicates.is_empty() {
        println!("{} No duplicate modules found", "✓".green());
    } else {
        println!("{} Found duplicate modules: {}", "✗".red(), report.duplicates.join(", "));
    }

    println!();
    println!("=== Category Check ===");
    if report.undefined_categories.is_empty() {
        println!("{} All module categories are defined", "✓".green());
    } else {
        println!(
            "{} Modules use undefined categories: {}",
            "⚠".yellow(),
            report.undefined_categories.join(", ")
        );
    }
    println!();
}
