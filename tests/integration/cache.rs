use crate::common::TestEnv;

#[test]
fn test_info_without_cache_directory() {
    let env = TestEnv::new();

    env.run(&["cache", "info"]).assert_success().assert_stdout_contains("Cache directory does not exist");
}

#[test]
fn test_info_on_empty_cache() {
    let env = TestEnv::new();
    std::fs::create_dir_all(&env.cache_dir).unwrap();

    env.run(&["cache", "info"]).assert_success().assert_stdout_contains("Cache is empty");
}

#[test]
fn test_info_lists_modules_and_versions() {
    let env = TestEnv::new();
    env.seed_cache_entry("sanitizers", "master", true);
    env.seed_cache_entry("sanitizers", "v1.0", true);
    env.seed_cache_entry("hello", "main", false);

    env.run(&["cache", "info"])
        .assert_success()
        .assert_stdout_contains("Cached Modules (2):")
        .assert_stdout_contains("  sanitizers")
        .assert_stdout_contains("Versions: master, v1.0")
        .assert_stdout_contains("Versions: main (incomplete)")
        .assert_stdout_contains("Last Downloaded: 2024-01-01 00:00:00 UTC")
        .assert_stdout_contains("Total: ");
}

#[test]
fn test_clear_one_module_with_force() {
    let env = TestEnv::new();
    env.seed_cache_entry("sanitizers", "master", true);
    env.seed_cache_entry("hello", "main", true);

    env.run(&["cache", "clear", "sanitizers", "--force"])
        .assert_success()
        .assert_stdout_contains("Cache cleared for module: sanitizers");

    assert!(!env.cache_dir.join("sanitizers").exists());
    assert!(env.cache_entry("hello", "main").exists());
}

#[test]
fn test_clear_is_cancelled_without_terminal() {
    let env = TestEnv::new();
    let entry = env.seed_cache_entry("sanitizers", "master", true);

    let output = env.command().args(["cache", "clear", "sanitizers"]).write_stdin("y\n").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("This will remove 1 module cache(s)"), "{stdout}");
    assert!(stdout.contains("Cancelled"), "{stdout}");
    assert!(entry.exists());
}

#[test]
fn test_clear_missing_module_fails() {
    let env = TestEnv::new();
    env.seed_cache_entry("hello", "main", true);

    env.run(&["cache", "clear", "ghost", "--force"])
        .assert_failure()
        .assert_stderr_contains("Module cache not found: ghost")
        .assert_stderr_contains("cmakehub cache info");
}

#[test]
fn test_clear_everything() {
    let env = TestEnv::new();
    env.seed_cache_entry("sanitizers", "master", true);
    env.seed_cache_entry("hello", "main", false);

    env.run(&["cache", "clear", "--force"]).assert_success().assert_stdout_contains("Cleared 2 module cache(s)");

    assert!(env.cache_dir.exists());
    assert_eq!(std::fs::read_dir(&env.cache_dir).unwrap().count(), 0);
}

#[test]
fn test_clear_rejects_path_like_names() {
    let env = TestEnv::new();
    env.seed_cache_entry("hello", "main", true);

    env.run(&["cache", "clear", "../home", "--force"])
        .assert_failure()
        .assert_stderr_contains("Invalid cache key");
    assert!(env.home.exists());
}
