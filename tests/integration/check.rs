use crate::common::TestEnv;

const UNUSED_REPO: &str = "https://example.com/hello.git";

#[test]
fn test_cmake_version_at_minimum_is_compatible() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["check", "sanitizers", "--cmake-version", "3.19.0"])
        .assert_success()
        .assert_stdout_contains("Compatibility Check: sanitizers")
        .assert_stdout_contains("Platform-independent")
        .assert_stdout_contains("Module is compatible");
}

#[test]
fn test_old_cmake_fails() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["check", "sanitizers", "--cmake-version", "3.10"])
        .assert_failure()
        .assert_stdout_contains("Too old")
        .assert_stderr_contains("not compatible");
}

#[test]
fn test_unsupported_platform_fails() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["check", "code-coverage", "--platform", "windows", "--cpp-standard", "17"])
        .assert_failure()
        .assert_stdout_contains("Required: linux, macos")
        .assert_stdout_contains("Not supported");
}

#[test]
fn test_missing_dependency_is_advisory() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["check", "code-coverage", "--platform", "linux", "--cpp-standard", "17"])
        .assert_success()
        .assert_stdout_contains("sanitizers: ✓ available")
        .assert_stdout_contains("ghost-module: ✗ not in index")
        .assert_stdout_contains("  - legacy-coverage")
        .assert_stdout_contains("Module is compatible");
}

#[test]
fn test_cpp98_is_older_than_cpp11() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["check", "code-coverage", "--platform", "macos", "--cpp-standard", "98"])
        .assert_failure()
        .assert_stdout_contains("Required: >= C++11");
}

#[test]
fn test_unknown_cpp_standard_is_not_a_failure() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["check", "code-coverage", "--platform", "linux"])
        .assert_success()
        .assert_stdout_contains("Not checked");
}

#[test]
fn test_unknown_module() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["check", "ghost-module"]).assert_failure().assert_stderr_contains("not found");
}
