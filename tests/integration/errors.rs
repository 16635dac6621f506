use crate::common::TestEnv;
use cmakehub_cli::test_utils::sample_catalog_json;
use predicates::prelude::*;

#[test]
fn test_missing_catalog_names_remedy() {
    let env = TestEnv::new();

    env.run(&["list"])
        .assert_failure()
        .assert_stderr_contains("modules.json not found")
        .assert_stderr_contains(TestEnv::path_str(&env.index_path))
        .assert_stderr_contains("cmakehub update-index");
}

#[test]
fn test_malformed_catalog() {
    let env = TestEnv::new();
    env.write_catalog("{ \"modules\": [ ");

    env.run(&["list"]).assert_failure().assert_stderr_contains("Invalid module index");
}

#[test]
fn test_catalog_without_modules_key() {
    let env = TestEnv::new();
    env.write_catalog("{ \"categories\": {} }");

    env.run(&["list"])
        .assert_failure()
        .assert_stderr_contains("missing top-level 'modules' key");
}

#[test]
fn test_catalog_in_working_directory_is_found() {
    let env = TestEnv::new();
    std::fs::write(
        env.work_dir.join("modules.json"),
        sample_catalog_json("https://example.com/hello.git"),
    )
    .unwrap();

    env.run(&["list", "--compact"]).assert_success().assert_stdout_contains("sanitizers");
}

#[test]
fn test_index_flag_takes_precedence() {
    let env = TestEnv::with_sample_catalog("https://example.com/hello.git");
    let other = env.work_dir.join("other.json");
    std::fs::write(&other, r#"{"modules": [{"name": "only-one"}]}"#).unwrap();

    env.command()
        .args(["list", "--compact", "--index", TestEnv::path_str(&other)])
        .assert()
        .success()
        .stdout("only-one\n");
}

#[test]
fn test_config_file_supplies_index_path() {
    let env = TestEnv::new();
    let catalog = env.home.join("catalogs/modules.json");
    std::fs::create_dir_all(catalog.parent().unwrap()).unwrap();
    std::fs::write(&catalog, sample_catalog_json("https://example.com/hello.git")).unwrap();

    let config_dir = env.home.join(".cmakehub");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "index_path = \"~/catalogs/modules.json\"\n")
        .unwrap();

    env.run(&["list", "--compact"]).assert_success().assert_stdout_contains("hello");
}

#[test]
fn test_explicit_config_must_exist() {
    let env = TestEnv::with_sample_catalog("https://example.com/hello.git");

    env.command()
        .args(["list", "--config", "/nonexistent/cmakehub/config.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_invalid_config_is_reported() {
    let env = TestEnv::with_sample_catalog("https://example.com/hello.git");
    let config = env.work_dir.join("config.toml");
    std::fs::write(&config, "unknown_key = 1\n").unwrap();

    env.command()
        .env("CMH_CONFIG", &config)
        .args(["list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_cache_dir_from_config() {
    let env = TestEnv::new();
    let config = env.work_dir.join("config.toml");
    let cache = env.work_dir.join("configured-cache");
    std::fs::write(&config, format!("cache_dir = \"{}\"\n", cache.display().to_string().replace('\\', "/")))
        .unwrap();

    env.command()
        .env_remove("CMH_CACHE_DIR")
        .args(["--config", TestEnv::path_str(&config), "cache", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains(cache.display().to_string()));
}
