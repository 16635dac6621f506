//! Shared harness for driving the `cmakehub` binary in isolation.
//!
//! Every [`TestEnv`] owns a temporary tree with its own home directory,
//! cache and working directory. Environment overrides are set on the child
//! process only.

#![allow(dead_code)]

use assert_cmd::Command;
use cmakehub_cli::constants::{CACHE_DIR_ENV, CACHE_META_FILE, CONFIG_PATH_ENV, INDEX_PATH_ENV};
use cmakehub_cli::test_utils::sample_catalog_json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _temp: TempDir,
    pub home: PathBuf,
    pub cache_dir: PathBuf,
    pub work_dir: PathBuf,
    /// Passed to the binary through `CMH_INDEX`; may not exist
    pub index_path: PathBuf,
}

impl TestEnv {
    /// An environment with no catalog, no cache and no config.
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let work_dir = temp.path().join("work");
        let catalog_dir = temp.path().join("catalog");
        for dir in [&home, &work_dir, &catalog_dir] {
            std::fs::create_dir_all(dir).unwrap();
        }

        Self {
            cache_dir: temp.path().join("cache"),
            index_path: catalog_dir.join("modules.json"),
            home,
            work_dir,
            _temp: temp,
        }
    }

    /// An environment whose catalog is the sample catalog, with `hello`
    /// pointing at `hello_repository`.
    pub fn with_sample_catalog(hello_repository: &str) -> Self {
        let env = Self::new();
        env.write_catalog(&sample_catalog_json(hello_repository));
        env
    }

    pub fn write_catalog(&self, content: &str) {
        std::fs::write(&self.index_path, content).unwrap();
    }

    /// Put a loader script where `init` finds it (`~/.cmakehub/cmake/hub/`).
    pub fn install_loader(&self, content: &str) {
        let dir = self.home.join(".cmakehub/cmake/hub");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("loader.cmake"), content).unwrap();
    }

    /// Create a cache entry by hand; `complete` controls the sidecar.
    pub fn seed_cache_entry(&self, module: &str, version: &str, complete: bool) -> PathBuf {
        let dir = self.cache_dir.join(module).join(version);
        std::fs::create_dir_all(dir.join("cmake")).unwrap();
        std::fs::write(dir.join("cmake").join(format!("{module}.cmake")), "# module\n").unwrap();
        if complete {
            let meta = serde_json::json!({
                "module": module,
                "repository": format!("https://example.com/{module}.git"),
                "version": version,
                "path": format!("cmake/{module}.cmake"),
                "downloaded_at": "2024-01-01T00:00:00Z"
            });
            std::fs::write(dir.join(CACHE_META_FILE), meta.to_string()).unwrap();
        }
        dir
    }

    pub fn cache_entry(&self, module: &str, version: &str) -> PathBuf {
        self.cache_dir.join(module).join(version)
    }

    /// The binary, isolated to this environment, with spinners off.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cmakehub").unwrap();
        cmd.current_dir(&self.work_dir)
            .env("HOME", &self.home)
            .env("USERPROFILE", &self.home)
            .env(CACHE_DIR_ENV, &self.cache_dir)
            .env(INDEX_PATH_ENV, &self.index_path)
            .env("NO_COLOR", "1")
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env_remove(CONFIG_PATH_ENV)
            .env_remove("RUST_LOG")
            .arg("--no-progress");
        cmd
    }

    /// Run with `args` and capture the output.
    pub fn run(&self, args: &[&str]) -> CommandOutput {
        let output = self.command().args(args).output().unwrap();
        CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }

    pub fn path_str(path: &Path) -> &str {
        path.to_str().unwrap()
    }
}

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStdout: {}\nStderr: {}",
            self.code, self.stdout, self.stderr
        );
        self
    }

    pub fn assert_failure(&self) -> &Self {
        assert_eq!(
            self.code,
            Some(1),
            "Expected exit code 1\nStdout: {}\nStderr: {}",
            self.stdout,
            self.stderr
        );
        self
    }

    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{text}'\nActual stdout: {}",
            self.stdout
        );
        self
    }

    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{text}'\nActual stderr: {}",
            self.stderr
        );
        self
    }
}
