//! `cmakehub check` - compatibility of a module with this environment
//!
//! Versions are compared natively. The installed `cmake` is only asked for
//! its version string, and only when `--cmake-version` is not given.

use super::CommandContext;
use super::common::{print_banner, rule};
use crate::constants::CMAKE_PROBE_TIMEOUT;
use crate::index::query::{self, describe_cpp};
use crate::index::{CompatibilityReport, PlatformVerdict, VersionVerdict};
use crate::utils::Platform;
use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Check whether a module can be used on this platform and toolchain.
///
/// Exits with status 1 when the platform is unsupported or a known version
/// is below the module's minimum. Missing dependencies and conflicts are
/// reported but do not fail the check.
#[derive(Args, Debug)]
pub struct CheckCommand {
    /// Module name (exact match)
    module: String,

    /// Platform to check against instead of the host (windows, macos, linux)
    #[arg(long, value_parser = parse_platform)]
    platform: Option<Platform>,

    /// CMake version to check against instead of `cmake --version`
    #[arg(long)]
    cmake_version: Option<String>,

    /// C++ standard in use (11, 14, 17, 20, ...)
    #[arg(long)]
    cpp_standard: Option<String>,
}

fn parse_platform(value: &str) -> std::result::Result<Platform, String> {
    value.parse().map_err(|e: anyhow::Error| e.to_string())
}

impl CheckCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let index = ctx.load_index().await?;
        // Fail with suggestions before probing anything
        index.require(&self.module)?;

        let platform = self.platform.unwrap_or_else(Platform::current);
        let cmake_version = match self.cmake_version {
            Some(version) => Some(version),
            None => probe_cmake_version().await,
        };

        let report = query::check_compatibility(
            &index,
            &self.module,
            platform.as_str(),
            cmake_version.as_deref(),
            self.cpp_standard.as_deref(),
        )
        .ok_or_else(|| anyhow!("Module '{}' disappeared from the index", self.module))?;

        print_report(&report);

        if report.is_compatible() {
            println!("{} Module is compatible", "✓".green());
            Ok(())
        } else {
            Err(anyhow!(
                "Module '{}' is not compatible with this environment",
                report.module
            ))
        }
    }
}

/// Version reported by `cmake --version`, or `None` when cmake is missing,
/// fails, or does not answer within the probe timeout.
async fn probe_cmake_version() -> Option<String> {
    let mut cmd = Command::new("cmake");
    cmd.arg("--version").stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::null());
    cmd.kill_on_drop(true);

    let output = match tokio::time::timeout(CMAKE_PROBE_TIMEOUT, cmd.output()).await {
        Ok(Ok(output)) if output.status.success() => output,
        Ok(Ok(output)) => {
            debug!("cmake --version exited with {:?}", output.status.code());
            return None;
        }
        Ok(Err(e)) => {
            debug!("cmake not available: {e}");
            return None;
        }
        Err(_) => {
            debug!("cmake --version timed out");
            return None;
        }
    };

    parse_cmake_version(&String::from_utf8_lossy(&output.stdout))
}

/// Last word of the first line: `cmake version 3.28.1` gives `3.28.1`.
fn parse_cmake_version(output: &str) -> Option<String> {
    output.lines().next()?.split_whitespace().last().map(str::to_string)
}

fn ok_mark(ok: bool) -> colored::ColoredString {
    if ok { "✓".green() } else { "✗".red() }
}

fn print_report(report: &CompatibilityReport) {
    print_banner(&format!("Compatibility Check: {}", report.module));
    println!();

    println!("Platform Support:");
    println!("  Current:  {}", report.current_platform);
    match &report.platform {
        PlatformVerdict::Independent => {
            println!("  Required: All platforms");
            println!("  Status:   {} Platform-independent", ok_mark(true));
        }
        PlatformVerdict::Supported => {
            println!("  Status:   {} Supported", ok_mark(true));
        }
        PlatformVerdict::Unsupported {
            required,
        } => {
            println!("  Required: {}", required.join(", "));
            println!("  Status:   {} Not supported", ok_mark(false));
        }
    }
    println!();

    print_version("CMake Version", &report.cmake, str::to_string);
    print_version("C++ Standard", &report.cpp, describe_cpp);

    println!("Dependencies:");
    if report.dependencies.is_empty() {
        println!("  None");
    }
    for dep in &report.dependencies {
        if dep.available {
            println!("  - {}: {} available", dep.name, ok_mark(true));
        } else {
            println!("  - {}: {} not in index", dep.name, ok_mark(false));
        }
    }
    let missing: Vec<&str> = report.missing_dependencies().collect();
    if !missing.is_empty() {
        println!("  {} Missing from the index (not required): {}", "⚠".yellow(), missing.join(", "));
    }
    println!();

    println!("Conflicts:");
    if report.conflicts.is_empty() {
        println!("  None");
    }
    for conflict in &report.conflicts {
        println!("  - {conflict}");
    }
    println!();
    println!("{}", rule('-'));
}

fn print_version(title: &str, verdict: &VersionVerdict, show: impl Fn(&str) -> String) {
    println!("{title}:");
    match verdict {
        VersionVerdict::NoRequirement => println!("  Required: None"),
        VersionVerdict::Compatible {
            required,
            current,
        } => {
            println!("  Required: >= {}", show(required));
            println!("  Current:  {}", show(current));
            println!("  Status:   {} Compatible", ok_mark(true));
        }
        VersionVerdict::Incompatible {
            required,
            current,
        } => {
            println!("  Required: >= {}", show(required));
            println!("  Current:  {}", show(current));
            println!("  Status:   {} Too old", ok_mark(false));
        }
        VersionVerdict::Unknown {
            required,
        } => {
            println!("  Required: >= {}", show(required));
            println!("  Current:  unknown");
            println!("  Status:   ? Not checked");
        }
    }
    println!();
}
