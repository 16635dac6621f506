use crate::common::TestEnv;
use predicates::prelude::*;

const UNUSED_REPO: &str = "https://example.com/hello.git";

#[test]
fn test_list_groups_by_category_label() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["list"])
        .assert_success()
        .assert_stdout_contains("Available Modules (4 total)")
        .assert_stdout_contains("Testing & Quality (2 modules)")
        .assert_stdout_contains("Utilities (2 modules)")
        .assert_stdout_contains("  • sanitizers")
        .assert_stdout_contains("    Address, memory and thread sanitizer integration");
}

#[test]
fn test_list_compact_prints_sorted_names() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.command()
        .args(["list", "--compact"])
        .assert()
        .success()
        .stdout("code-coverage\nhello\nno-source\nsanitizers\n");
}

#[test]
fn test_list_category_filter() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.command()
        .args(["list", "--category", "utilities", "--compact"])
        .assert()
        .success()
        .stdout("hello\nno-source\n");

    env.run(&["list", "--category", "gui"]).assert_success().assert_stdout_contains("No modules found");
}

#[test]
fn test_search_matches_tags_case_insensitively() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    let output = env.run(&["search", "LCOV"]);
    output
        .assert_success()
        .assert_stdout_contains("Search Results: 'LCOV' (1 found)")
        .assert_stdout_contains("code-coverage");
    assert!(!output.stdout.contains("sanitizers"));
}

#[test]
fn test_search_with_category() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    let output = env.run(&["search", "a", "--category", "utilities"]);
    output.assert_success().assert_stdout_contains("(2 found)");
    assert!(!output.stdout.contains("sanitizers"));
}

#[test]
fn test_search_without_results() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.command()
        .args(["search", "zzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No modules found matching 'zzz'"));
}

#[test]
fn test_info_shows_fields() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    let output = env.run(&["info", "sanitizers"]);
    output
        .assert_success()
        .assert_stdout_contains("Module: sanitizers")
        .assert_stdout_contains("Repository:\n  https://github.com/arsenm/sanitizers-cmake.git")
        .assert_stdout_contains("Stars:\n  370")
        .assert_stdout_contains("CMake Minimum Required:\n  3.19")
        .assert_stdout_contains("Tags:\n  asan, msan, tsan");
    assert!(!output.stdout.contains("Raw JSON"));
}

#[test]
fn test_info_verbose_includes_unknown_keys() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["info", "hello", "--verbose"])
        .assert_success()
        .assert_stdout_contains("Raw JSON:")
        .assert_stdout_contains("\"homepage\": \"https://example.com/hello\"");
}

#[test]
fn test_info_unknown_module_suggests_similar() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["info", "sanitizer"])
        .assert_failure()
        .assert_stderr_contains("Module 'sanitizer' not found")
        .assert_stderr_contains("Did you mean: sanitizers");
}
