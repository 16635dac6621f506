//! Builder for running the system `git` binary
//!
//! Every git invocation goes through [`GitCommand`] so timeouts, logging and
//! error mapping are consistent. Logs use target `git`; commands slower
//! than 100ms are timed under `git::perf`.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::constants::GIT_CLONE_TIMEOUT;
use crate::core::CmhError;
use crate::utils::platform::get_git_command;

/// Fluent builder for one git invocation.
///
/// ```rust,no_run
/// use cmakehub_cli::git::GitCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// GitCommand::clone_shallow("https://github.com/arsenm/sanitizers-cmake.git", "master", "/tmp/sanitizers")
///     .with_context("sanitizers")
///     .execute()
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// Defaults: output captured, 5 minute timeout, terminal prompts disabled.
#[derive(Debug)]
pub struct GitCommand {
    /// Arguments after `git`
    args: Vec<String>,

    /// Extra environment for the child process
    env_vars: Vec<(String, String)>,

    /// `None` waits forever
    timeout_duration: Option<Duration>,

    /// Label prefixed to log lines, usually the module name
    context: Option<String>,
}

impl Default for GitCommand {
    fn default() -> Self {
        Self {
            args: Vec::new(),
            // A credential prompt would otherwise hang until the timeout
            env_vars: vec![("GIT_TERMINAL_PROMPT".to_string(), "0".to_string())],
            timeout_duration: Some(GIT_CLONE_TIMEOUT),
            context: None,
        }
    }
}

impl GitCommand {
    /// A command with no arguments and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a custom timeout (`None` for no timeout).
    #[must_use]
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Label log lines with `context`.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The git subcommand.
    fn operation(&self) -> String {
        self.args.first().cloned().unwrap_or_else(|| "unknown".to_string())
    }

    fn log_prefix(&self) -> String {
        self.context.as_ref().map(|ctx| format!("({ctx}) ")).unwrap_or_default()
    }

    /// Run the command, logging its output.
    ///
    /// # Errors
    ///
    /// - [`CmhError::GitNotFound`] if the git binary cannot be spawned
    /// - [`CmhError::GitCommandError`] on timeout or non-zero exit, carrying stderr
    pub async fn execute(self) -> Result<()> {
        let start = std::time::Instant::now();
        let git_command = get_git_command();
        let full_args = &self.args;
        let prefix = self.log_prefix();
        let operation = self.operation();

        tracing::debug!(target: "git", "{prefix}Executing command: {git_command} {}", full_args.join(" "));

        let mut cmd = Command::new(git_command);
        cmd.args(full_args).stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        for (key, value) in &self.env_vars {
            tracing::trace!(target: "git", "Setting env var: {key}={value}");
            cmd.env(key, value);
        }

        let output_future = cmd.output();
        let result = match self.timeout_duration {
            Some(duration) => match timeout(duration, output_future).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        target: "git",
                        "{prefix}Command timed out after {} seconds: git {}",
                        duration.as_secs(),
                        full_args.join(" ")
                    );
                    return Err(CmhError::GitCommandError {
                        operation,
                        stderr: format!(
                            "Git command timed out after {} seconds. Check your network \
                             connection and repository access, or run it manually: git {}",
                            duration.as_secs(),
                            full_args.join(" ")
                        ),
                    }
                    .into());
                }
            },
            None => output_future.await,
        };

        let output = match result {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CmhError::GitNotFound.into());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to execute git {}", full_args.join(" ")));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            tracing::debug!(target: "git", "{prefix}Command failed with exit code: {:?}", output.status.code());
            if !stderr.is_empty() {
                tracing::debug!(target: "git", "{prefix}Error: {}", stderr.trim());
            }
            return Err(CmhError::GitCommandError {
                operation,
                stderr: if stderr.trim().is_empty() { stdout } else { stderr },
            }
            .into());
        }

        if !stdout.is_empty() {
            tracing::debug!(target: "git", "{prefix}{}", stdout.trim());
        }
        if !stderr.is_empty() {
            tracing::debug!(target: "git", "{prefix}{}", stderr.trim());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(target: "git::perf", "{prefix}Git {operation} took {:.2}s", elapsed.as_secs_f64());
        } else if elapsed.as_millis() > 100 {
            tracing::debug!(target: "git::perf", "{prefix}Git {operation} took {}ms", elapsed.as_millis());
        }

        Ok(())
    }
}

impl GitCommand {
    /// `git clone --depth 1 --branch <reference> -- <url> <target>`
    ///
    /// `--branch` accepts branch and tag names. The `--` keeps a catalog
    /// URL starting with `-` from being read as an option.
    #[must_use]
    pub fn clone_shallow(url: &str, reference: &str, target: impl AsRef<Path>) -> Self {
        Self::new().args([
            "clone".to_string(),
            "--depth".to_string(),
            "1".to_string(),
            "--branch".to_string(),
            reference.to_string(),
            "--".to_string(),
            url.to_string(),
            target.as_ref().display().to_string(),
        ])
    }
}
