//! `cmakehub search` - keyword search over names, descriptions and tags

use super::CommandContext;
use super::common::{print_banner, print_grouped};
use crate::index::query;
use anyhow::Result;
use clap::Args;

/// Search modules by keyword (case-insensitive).
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Text to look for in the name, description or tags
    keyword: String,

    /// Restrict results to this category key
    #[arg(short, long)]
    category: Option<String>,
}

impl SearchCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let index = ctx.load_index().await?;
        let results = query::search(&index, &self.keyword, self.category.as_deref());

        if results.is_empty() {
            println!("No modules found matching '{}'", self.keyword);
            return Ok(());
        }

        print_banner(&format!("Search Results: '{}' ({} found)", self.keyword, results.len()));
        print_grouped(&index, &results);
        Ok(())
    }
}
