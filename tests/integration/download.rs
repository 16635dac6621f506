use crate::common::TestEnv;
use cmakehub_cli::constants::CACHE_META_FILE;
use cmakehub_cli::test_utils::TestGit;
use tempfile::TempDir;

fn hello_repo() -> (TempDir, TestGit) {
    let source = TempDir::new().unwrap();
    let repo = TestGit::create_module_repo(source.path(), "cmake/Hello.cmake").unwrap();
    (source, repo)
}

#[test]
fn test_use_with_test_downloads_into_cache() {
    let (_source, repo) = hello_repo();
    let env = TestEnv::with_sample_catalog(&repo.file_url());

    env.run(&["use", "hello", "--test"])
        .assert_success()
        .assert_stdout_contains("cmakehub_use(hello)")
        .assert_stdout_contains("Module 'hello' downloaded successfully");

    let entry = env.cache_entry("hello", "main");
    assert!(entry.join("cmake/Hello.cmake").is_file());

    let meta: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(entry.join(CACHE_META_FILE)).unwrap())
            .unwrap();
    assert_eq!(meta["module"], "hello");
    assert_eq!(meta["version"], "main");
    assert_eq!(meta["path"], "cmake/Hello.cmake");
    assert_eq!(meta["repository"], repo.file_url().as_str());
    assert!(meta["downloaded_at"].is_string());
}

#[test]
fn test_version_override_clones_tag() {
    let (_source, repo) = hello_repo();
    repo.tag("v1.0").unwrap();
    let env = TestEnv::with_sample_catalog(&repo.file_url());

    env.run(&["use", "hello", "--version", "v1.0", "--test"])
        .assert_success()
        .assert_stdout_contains("VERSION \"v1.0\"");

    assert!(env.cache_entry("hello", "v1.0").join(CACHE_META_FILE).is_file());
    assert!(!env.cache_entry("hello", "main").exists());
}

#[test]
fn test_cached_entry_is_reused_without_git() {
    let (source, repo) = hello_repo();
    let env = TestEnv::with_sample_catalog(&repo.file_url());

    env.run(&["use", "hello", "--test"]).assert_success();
    drop(source);

    env.run(&["use", "hello", "--test"])
        .assert_success()
        .assert_stdout_contains("downloaded successfully");
}

#[test]
fn test_failed_clone_leaves_incomplete_entry() {
    let (_source, repo) = hello_repo();
    let env = TestEnv::with_sample_catalog(&repo.file_url());

    env.run(&["use", "hello", "--version", "missing-ref", "--test"])
        .assert_failure()
        .assert_stderr_contains("Failed to download module 'hello' at 'missing-ref'")
        .assert_stderr_contains("cmakehub cache clear hello --force");

    let entry = env.cache_entry("hello", "missing-ref");
    assert!(entry.is_dir());
    assert!(!entry.join(CACHE_META_FILE).exists());

    env.run(&["cache", "info"]).assert_success().assert_stdout_contains("missing-ref (incomplete)");
}

#[test]
fn test_module_without_repository() {
    let env = TestEnv::with_sample_catalog("https://example.com/hello.git");

    env.run(&["use", "no-source", "--test"])
        .assert_failure()
        .assert_stderr_contains("has no repository URL");
    assert!(!env.cache_dir.join("no-source").exists());
}

#[test]
fn test_update_module_without_cache() {
    let env = TestEnv::with_sample_catalog("https://example.com/hello.git");

    env.run(&["update", "hello"])
        .assert_success()
        .assert_stdout_contains("Updating module: hello")
        .assert_stdout_contains("No existing cache found")
        .assert_stdout_contains("cmakehub update hello --download-now");
}

#[test]
fn test_update_download_now_replaces_entry() {
    let (_source, repo) = hello_repo();
    let env = TestEnv::with_sample_catalog(&repo.file_url());
    let stale = env.seed_cache_entry("hello", "old", true);

    env.run(&["update", "hello", "--download-now"])
        .assert_success()
        .assert_stdout_contains("Cache cleared")
        .assert_stdout_contains("Module 'hello' downloaded successfully");

    assert!(!stale.exists());
    assert!(env.cache_entry("hello", "main").join(CACHE_META_FILE).is_file());
}

#[test]
fn test_update_unknown_module() {
    let env = TestEnv::with_sample_catalog("https://example.com/hello.git");

    env.run(&["update", "helo"])
        .assert_failure()
        .assert_stderr_contains("Module 'helo' not found")
        .assert_stderr_contains("hello");
}

#[test]
fn test_update_all() {
    let env = TestEnv::with_sample_catalog("https://example.com/hello.git");

    env.run(&["update"]).assert_success().assert_stdout_contains("No cached modules found");

    env.seed_cache_entry("hello", "main", true);
    env.seed_cache_entry("sanitizers", "master", false);

    env.run(&["update"])
        .assert_success()
        .assert_stdout_contains("Cleared: hello")
        .assert_stdout_contains("Cleared: sanitizers")
        .assert_stdout_contains("All caches cleared (2 modules).");
    assert!(!env.cache_dir.join("hello").exists());
}
