//! Git test helper utilities
//!
//! Builds throwaway local repositories that downloads can clone over
//! `file://` instead of the network.

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A git repository on local disk used as a module source in tests.
pub struct TestGit {
    repo_path: PathBuf,
}

impl TestGit {
    fn run_git_command(&self, args: &[&str], action: &str) -> Result<std::process::Output> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .with_context(|| action.to_string())?;

        if !output.status.success() {
            bail!("{} failed: {}", action, String::from_utf8_lossy(&output.stderr));
        }

        Ok(output)
    }

    /// Wrap an existing directory.
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// Create a repository in `dir` whose `main` branch contains
    /// `module_path` (plus a README), committed once.
    pub fn create_module_repo(dir: &Path, module_path: &str) -> Result<Self> {
        let repo = Self::new(dir);
        repo.init()?;
        repo.config_user()?;

        let file = dir.join(module_path);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let stem = Path::new(module_path)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        std::fs::write(&file, format!("message(STATUS \"{stem} loaded\")\n"))?;
        std::fs::write(dir.join("README.md"), format!("# {stem}\n"))?;

        repo.add_all()?;
        repo.commit("Initial commit")?;
        repo.rename_branch("main")?;
        Ok(repo)
    }

    /// Initialize a new git repository
    pub fn init(&self) -> Result<()> {
        self.run_git_command(&["init", "--quiet"], "Failed to initialize git repository")?;
        Ok(())
    }

    /// Configure a committer identity and disable signing
    pub fn config_user(&self) -> Result<()> {
        self.run_git_command(
            &["config", "user.email", "test@cmakehub.example"],
            "Failed to configure git user email",
        )?;
        self.run_git_command(&["config", "user.name", "Test User"], "Failed to configure git user name")?;
        self.run_git_command(&["config", "commit.gpgsign", "false"], "Failed to disable commit signing")?;
        Ok(())
    }

    /// Stage everything
    pub fn add_all(&self) -> Result<()> {
        self.run_git_command(&["add", "."], "Failed to add files to git")?;
        Ok(())
    }

    /// Create a commit with the given message
    pub fn commit(&self, message: &str) -> Result<()> {
        self.run_git_command(&["commit", "--quiet", "-m", message], "Failed to create git commit")?;
        Ok(())
    }

    /// Create a lightweight tag
    pub fn tag(&self, tag_name: &str) -> Result<()> {
        self.run_git_command(&["tag", tag_name], &format!("Failed to create tag: {tag_name}"))?;
        Ok(())
    }

    /// Rename the current branch, whatever the default branch name was
    pub fn rename_branch(&self, branch_name: &str) -> Result<()> {
        self.run_git_command(
            &["branch", "-M", branch_name],
            &format!("Failed to rename branch to {branch_name}"),
        )?;
        Ok(())
    }

    /// Return the repository path
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// `file://` URL of the repository, usable with `git clone --depth`
    pub fn file_url(&self) -> String {
        let path = self.repo_path.display().to_string().replace('\\', "/");
        if path.starts_with('/') {
            format!("file://{path}")
        } else {
            format!("file:///{path}")
        }
    }
}
