//! `cmakehub info` - everything the catalog says about one module

use super::CommandContext;
use super::common::rule;
use crate::index::ModuleRecord;
use crate::index::query::describe_cpp;
use anyhow::Result;
use clap::Args;
use std::fmt::{self, Write};

/// Show detailed information about a module.
///
/// With the global `--verbose` flag (or `--raw`) the record is also printed
/// as JSON, including keys this tool does not interpret.
#[derive(Args, Debug)]
pub struct InfoCommand {
    /// Module name (exact match)
    module: String,

    /// Append the raw JSON record
    #[arg(long)]
    raw: bool,
}

impl InfoCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let index = ctx.load_index().await?;
        let module = index.require(&self.module)?;
        print!("{}", render(module, self.raw || ctx.verbose)?);
        Ok(())
    }
}

fn field(out: &mut String, label: &str, value: &str) -> fmt::Result {
    writeln!(out, "{label}:\n  {value}\n")
}

fn list(out: &mut String, label: &str, items: &[String]) -> fmt::Result {
    writeln!(out, "{label}:")?;
    for item in items {
        writeln!(out, "  - {item}")?;
    }
    writeln!(out)
}

fn or_na(value: Option<&String>) -> &str {
    value.map_or("N/A", String::as_str)
}

fn render(module: &ModuleRecord, raw: bool) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{}\nModule: {}\n{}\n", rule('='), module.name, rule('='))?;

    field(&mut out, "Description", or_na(module.description.as_ref()))?;
    field(&mut out, "Category", or_na(module.category.as_ref()))?;
    field(&mut out, "Author", or_na(module.author.as_ref()))?;
    field(&mut out, "Repository", or_na(module.repository.as_ref()))?;
    field(&mut out, "Path", or_na(module.path.as_ref()))?;
    field(&mut out, "License", or_na(module.license.as_ref()))?;
    field(&mut out, "Version", or_na(module.version.as_ref()))?;

    if let Some(stars) = module.stars {
        field(&mut out, "Stars", &stars.to_string())?;
    }
    if let Some(updated) = &module.last_updated {
        field(&mut out, "Last Updated", updated)?;
    }
    if let Some(cmake) = &module.cmake_minimum_required {
        field(&mut out, "CMake Minimum Required", cmake)?;
    }
    if let Some(cpp) = &module.cpp_minimum_required {
        field(&mut out, "C++ Minimum Required", &describe_cpp(cpp))?;
    }
    if !module.dependencies.is_empty() {
        list(&mut out, "Dependencies", &module.dependencies)?;
    }
    if !module.conflicts.is_empty() {
        list(&mut out, "Conflicts", &module.conflicts)?;
    }
    if !module.tags.is_empty() {
        field(&mut out, "Tags", &module.tags.join(", "))?;
    }
    if !module.platform.is_empty() {
        field(&mut out, "Platforms", &module.platform.join(", "))?;
    }

    if raw {
        writeln!(out, "Raw JSON:\n{}", serde_json::to_string_pretty(module)?)?;
    }

    Ok(out)
}
