//! `cmakehub list` - browse the catalog by category

use super::CommandContext;
use super::common::{print_banner, print_compact, print_grouped};
use crate::index::query;
use anyhow::Result;
use clap::Args;

/// List available modules, grouped by category.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Only show modules in this category (the key, e.g. `testing`)
    #[arg(short, long)]
    category: Option<String>,

    /// Print module names only, one per line
    #[arg(long)]
    compact: bool,
}

impl ListCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let index = ctx.load_index().await?;
        let modules = query::list(&index, self.category.as_deref());

        if modules.is_empty() {
            println!("No modules found");
            return Ok(());
        }

        if self.compact {
            print_compact(&modules);
        } else {
            print_banner(&format!("Available Modules ({} total)", modules.len()));
            print_grouped(&index, &modules);
        }

        Ok(())
    }
}
