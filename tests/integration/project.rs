use crate::common::TestEnv;

const UNUSED_REPO: &str = "https://example.com/hello.git";

#[test]
fn test_use_prints_snippet_and_module_info() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["use", "code-coverage"])
        .assert_success()
        .assert_stdout_contains("# CMakeHub: code-coverage")
        .assert_stdout_contains("include(${CMAKE_CURRENT_SOURCE_DIR}/cmake/hub/loader.cmake)")
        .assert_stdout_contains("cmakehub_use(code-coverage)")
        .assert_stdout_contains("Module Information:")
        .assert_stdout_contains("  Dependencies: sanitizers, ghost-module")
        .assert_stdout_contains("  Conflicts: legacy-coverage");

    assert!(!env.cache_dir.exists());
}

#[test]
fn test_use_output_writes_file() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["use", "sanitizers", "--version", "v1", "--output", "hub.cmake", "SANITIZE_ADDRESS", "ON"])
        .assert_success()
        .assert_stdout_contains("Configuration written to hub.cmake");

    let content = std::fs::read_to_string(env.work_dir.join("hub.cmake")).unwrap();
    assert!(content.starts_with("# CMakeHub: sanitizers\n# Address, memory and thread sanitizer integration\n"));
    assert!(content.ends_with("cmakehub_use(sanitizers\n    VERSION \"v1\"\n    SANITIZE_ADDRESS\n    ON)"));
}

#[test]
fn test_use_append_keeps_existing_content() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);
    let lists = env.work_dir.join("CMakeLists.txt");
    std::fs::write(&lists, "project(demo)").unwrap();

    env.run(&["use", "hello", "--append", "CMakeLists.txt"])
        .assert_success()
        .assert_stdout_contains("Configuration appended to CMakeLists.txt");

    let content = std::fs::read_to_string(&lists).unwrap();
    assert!(content.starts_with("project(demo)\n\n# CMakeHub: hello\n"));
    assert!(content.ends_with("cmakehub_use(hello)"));
}

#[test]
fn test_init_creates_project() {
    let env = TestEnv::new();
    env.install_loader("# cmakehub loader\n");

    env.run(&["init", "demo"])
        .assert_success()
        .assert_stdout_contains("Initializing project: demo")
        .assert_stdout_contains("Project 'demo' initialized successfully!");

    let project = env.work_dir.join("demo");
    assert_eq!(
        std::fs::read_to_string(project.join("cmake/hub/loader.cmake")).unwrap(),
        "# cmakehub loader\n"
    );
    assert!(
        std::fs::read_to_string(project.join("CMakeLists.txt"))
            .unwrap()
            .contains("project(demo VERSION 1.0.0 LANGUAGES CXX)")
    );
    assert!(project.join("src/main.cpp").is_file());
    assert!(project.join(".gitignore").is_file());
    assert!(project.join("README.md").is_file());
}

#[test]
fn test_init_prefers_loader_in_working_directory() {
    let env = TestEnv::new();
    env.install_loader("# from home\n");
    let local = env.work_dir.join("cmake/hub");
    std::fs::create_dir_all(&local).unwrap();
    std::fs::write(local.join("loader.cmake"), "# from checkout\n").unwrap();

    env.run(&["init", "demo"]).assert_success();

    assert_eq!(
        std::fs::read_to_string(env.work_dir.join("demo/cmake/hub/loader.cmake")).unwrap(),
        "# from checkout\n"
    );
}

#[test]
fn test_init_existing_directory_fails() {
    let env = TestEnv::new();
    env.install_loader("# loader\n");
    std::fs::create_dir_all(env.work_dir.join("demo")).unwrap();
    std::fs::write(env.work_dir.join("demo/keep.txt"), "mine").unwrap();

    env.run(&["init", "demo"])
        .assert_failure()
        .assert_stderr_contains("Directory 'demo' already exists");

    assert!(env.work_dir.join("demo/keep.txt").is_file());
}

#[test]
fn test_init_without_loader_creates_nothing() {
    let env = TestEnv::new();

    env.run(&["init", "demo"])
        .assert_failure()
        .assert_stderr_contains("loader.cmake not found");

    assert!(!env.work_dir.join("demo").exists());
}
