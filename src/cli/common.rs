//! Rendering and prompting shared by the CLI commands

use crate::index::{Index, ModuleRecord};
use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, IsTerminal, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Width of the rules drawn around report headings.
pub const RULE_WIDTH: usize = 80;

/// A line of `ch` spanning [`RULE_WIDTH`] columns.
#[must_use]
pub fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

/// Print `title` between two `=` rules.
pub fn print_banner(title: &str) {
    println!("{}", rule('='));
    println!("{}", title.bold());
    println!("{}", rule('='));
}

/// Ask a yes/no question on stdout; only `y` or `yes` confirms.
///
/// When stdin is not a terminal nothing is read and the answer is no, so
/// scripted runs never delete anything without `--force`.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed or stdin cannot be read.
pub async fn confirm(prompt: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        println!("{prompt} [y/N]: (non-interactive, assuming no)");
        return Ok(false);
    }

    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut response = String::new();
    reader.read_line(&mut response).await?;

    Ok(is_affirmative(&response))
}

fn is_affirmative(response: &str) -> bool {
    matches!(response.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Modules grouped under their category label.
///
/// Groups are ordered by label and modules by name within a group.
#[must_use]
pub fn group_by_category<'a>(
    index: &'a Index,
    modules: &[&'a ModuleRecord],
) -> Vec<(&'a str, Vec<&'a ModuleRecord>)> {
    let mut groups: BTreeMap<&str, Vec<&ModuleRecord>> = BTreeMap::new();
    for module in modules {
        groups.entry(index.category_label(module.category_key())).or_default().push(module);
    }

    groups
        .into_iter()
        .map(|(label, mut members)| {
            members.sort_by(|a, b| a.name.cmp(&b.name));
            (label, members)
        })
        .collect()
}

/// Detailed listing: a heading per category then each name with its description.
pub fn print_grouped(index: &Index, modules: &[&ModuleRecord]) {
    for (label, members) in group_by_category(index, modules) {
        println!();
        println!("{} ({} modules)", label.bold(), members.len());
        println!("{}", rule('-'));
        for module in members {
            println!("  • {}", module.name.cyan());
            if let Some(description) = module.description.as_deref().filter(|d| !d.is_empty()) {
                println!("    {description}");
            }
        }
    }
}

/// One name per line, sorted.
pub fn print_compact(modules: &[&ModuleRecord]) {
    let mut names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
    names.sort_unstable();
    for name in names {
        println!("{name}");
    }
}
