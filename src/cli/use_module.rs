//! `cmakehub use` - generate the CMake code that pulls in a module

use super::CommandContext;
use super::common::rule;
use crate::index::ModuleRecord;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Print, write or append the `cmakehub_use(...)` call for a module.
///
/// Anything after the module name that is not a flag of this command is
/// passed through as a module option, so flags go first:
/// `cmakehub use sanitizers --version v1 SANITIZE_ADDRESS ON`.
#[derive(Args, Debug)]
pub struct UseCommand {
    /// Module name (exact match)
    module: String,

    /// Pin the module to this git ref
    #[arg(long)]
    version: Option<String>,

    /// Write the snippet to this file, replacing its contents
    #[arg(short, long, conflicts_with = "append")]
    output: Option<PathBuf>,

    /// Append the snippet to this file
    #[arg(short, long)]
    append: Option<PathBuf>,

    /// Also download the module into the cache now
    #[arg(long)]
    test: bool,

    /// Extra arguments for cmakehub_use (e.g. `SANITIZE_ADDRESS ON`)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    options: Vec<String>,
}

impl UseCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let index = ctx.load_index().await?;
        let record = index.require(&self.module)?;
        let snippet = render_snippet(record, self.version.as_deref(), &self.options);

        if let Some(path) = &self.append {
            append_snippet(path, &snippet).await?;
            println!("{} Configuration appended to {}", "✓".green(), path.display());
        } else if let Some(path) = &self.output {
            tokio::fs::write(path, &snippet)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Configuration written to {}", "✓".green(), path.display());
        } else {
            print_with_info(record, &snippet);
        }

        if self.test {
            println!();
            println!("Testing download...");
            let entry = ctx.downloader().download(record, self.version.as_deref()).await?;
            println!(
                "{} Module '{}' downloaded successfully ({})",
                "✓".green(),
                record.name,
                entry.path.display()
            );
        }

        Ok(())
    }
}

/// The CMake code that loads CMakeHub and uses `record`.
fn render_snippet(record: &ModuleRecord, version: Option<&str>, options: &[String]) -> String {
    let description =
        record.description.as_deref().filter(|d| !d.trim().is_empty()).unwrap_or("No description");

    let mut snippet = format!(
        "# CMakeHub: {name}\n\
         # {description}\n\
         \n\
         # Include CMakeHub loader\n\
         include(${{CMAKE_CURRENT_SOURCE_DIR}}/cmake/hub/loader.cmake)\n\
         \n\
         # Use module\n\
         cmakehub_use({name}",
        name = record.name,
    );

    if let Some(version) = version {
        snippet.push_str(&format!("\n    VERSION \"{version}\""));
    }
    if !options.is_empty() {
        snippet.push_str("\n    ");
        snippet.push_str(&options.join("\n    "));
    }
    snippet.push(')');
    snippet
}

async fn append_snippet(path: &Path, snippet: &str) -> Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("Failed to open {} for appending", path.display()))?;
    file.write_all(format!("\n\n{snippet}").as_bytes())
        .await
        .with_context(|| format!("Failed to append to {}", path.display()))?;
    file.flush().await?;
    Ok(())
}

fn print_with_info(record: &ModuleRecord, snippet: &str) {
    let na = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());

    println!();
    println!("{}", rule('='));
    println!("Add this to your CMakeLists.txt:");
    println!("{}", rule('='));
    println!();
    println!("{snippet}");
    println!();
    println!("{}", rule('='));
    println!();
    println!("Module Information:");
    println!("  Name: {}", record.name);
    println!("  Description: {}", na(&record.description));
    println!("  Category: {}", na(&record.category));
    println!("  Repository: {}", na(&record.repository));
    println!("  License: {}", na(&record.license));
    if !record.dependencies.is_empty() {
        println!("  Dependencies: {}", record.dependencies.join(", "));
    }
    if !record.conflicts.is_empty() {
        println!("  Conflicts: {}", record.conflicts.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizers() -> ModuleRecord {
        ModuleRecord {
            name: "sanitizers".to_string(),
            description: Some("Sanitizer integration".to_string()),
            ..ModuleRecord::default()
        }
    }

    #[test]
    fn test_snippet_without_version_or_options() {
        let snippet = render_snippet(&sanitizers(), None, &[]);
        assert_eq!(
            snippet,
            "# CMakeHub: sanitizers\n\
             # Sanitizer integration\n\
             \n\
             # Include CMakeHub loader\n\
             include(${CMAKE_CURRENT_SOURCE_DIR}/cmake/hub/loader.cmake)\n\
             \n\
             # Use module\n\
             cmakehub_use(sanitizers)"
        );
    }

    #[test]
    fn test_snippet_with_version_and_options() {
        let options = vec!["SANITIZE_ADDRESS".to_string(), "ON".to_string()];
        let snippet = render_snippet(&sanitizers(), Some("v1.0"), &options);
        assert!(snippet.ends_with(
            "cmakehub_use(sanitizers\n    VERSION \"v1.0\"\n    SANITIZE_ADDRESS\n    ON)"
        ));
    }

    #[test]
    fn test_snippet_missing_description() {
        let record = ModuleRecord {
            name: "bare".to_string(),
            ..ModuleRecord::default()
        };
        assert!(render_snippet(&record, None, &[]).contains("# No description\n"));
    }

    #[tokio::test]
    async fn test_append_adds_blank_line_separator() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("CMakeLists.txt");
        std::fs::write(&path, "project(demo)").unwrap();

        append_snippet(&path, "cmakehub_use(x)").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "project(demo)\n\ncmakehub_use(x)");
    }
}
