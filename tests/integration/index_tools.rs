use crate::common::TestEnv;
use cmakehub_cli::test_utils::sample_catalog_json;
use httpmock::prelude::*;

const UNUSED_REPO: &str = "https://example.com/hello.git";
const OLD_CATALOG: &str = r#"{"modules": [{"name": "old-module"}]}"#;
const CATALOG_PATH: &str = "/modules.json";

/// A server answering `GET /modules.json` with `status` and `body`.
fn catalog_server(status: u16, body: &str) -> MockServer {
    let server = MockServer::start();
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(GET).path(CATALOG_PATH);
        then.status(status).header("content-type", "application/json").body(body);
    });
    server
}

#[test]
fn test_stats() {
    let env = TestEnv::with_sample_catalog(UNUSED_REPO);

    env.run(&["stats"])
        .assert_success()
        .assert_stdout_contains("Total modules: 4")
        .assert_stdout_contains("Categories: 2")
        .assert_stdout_contains("Total stars: 491")
        .assert_stdout_contains("  - testing: 2")
        .assert_stdout_contains("  - utilities: 2");
}

#[test]
fn test_validate_reports_issues() {
    let env = TestEnv::with_sample_catalog("file:///tmp/hello");

    env.run(&["validate"])
        .assert_failure()
        .assert_stdout_contains("Found 4 modules")
        .assert_stdout_contains("✓ sanitizers")
        .assert_stdout_contains("✗ hello")
        .assert_stdout_contains("Repository URL must use https://: file:///tmp/hello")
        .assert_stdout_contains("✗ no-source")
        .assert_stdout_contains("Missing required field: repository")
        .assert_stdout_contains("Valid structure: 2/4")
        .assert_stderr_contains("2 of 4 modules failed validation");
}

#[test]
fn test_validate_warnings_do_not_fail() {
    let env = TestEnv::new();
    env.write_catalog(
        r#"{
            "modules": [{
                "name": "extras",
                "description": "Helpers",
                "category": "misc",
                "repository": "https://github.com/example/extras.git",
                "path": "Extras.txt",
                "license": "MIT"
            }],
            "categories": {}
        }"#,
    );

    env.run(&["validate"])
        .assert_success()
        .assert_stdout_contains("Module path should end with .cmake: Extras.txt")
        .assert_stdout_contains("Module has no version specified")
        .assert_stdout_contains("Modules use undefined categories: misc")
        .assert_stdout_contains("All modules are valid");
}

#[test]
fn test_validate_duplicates() {
    let env = TestEnv::new();
    let module = r#"{
        "name": "dup",
        "description": "d",
        "category": "misc",
        "repository": "https://github.com/example/dup.git",
        "path": "Dup.cmake",
        "license": "MIT",
        "version": "main"
    }"#;
    env.write_catalog(&format!(
        r#"{{"modules": [{module}, {module}], "categories": {{"misc": "Misc"}}}}"#
    ));

    let output = env.run(&["validate"]);
    output
        .assert_failure()
        .assert_stdout_contains("Found duplicate modules: dup")
        .assert_stderr_contains("duplicate module names: dup");
    assert!(!output.stderr.contains("0 of 2 modules failed validation"));
}

#[test]
fn test_update_index_replaces_and_backs_up() {
    let env = TestEnv::new();
    env.write_catalog(OLD_CATALOG);
    let server = MockServer::start();
    let catalog = server.mock(|when, then| {
        when.method(GET).path(CATALOG_PATH);
        then.status(200).body(sample_catalog_json(UNUSED_REPO));
    });
    let url = server.url(CATALOG_PATH);

    env.run(&["update-index", "--url", &url])
        .assert_success()
        .assert_stdout_contains(&format!("Fetching from: {url}"))
        .assert_stdout_contains("Downloaded 4 modules")
        .assert_stdout_contains("Backed up existing file to:")
        .assert_stdout_contains("Total modules: 4")
        .assert_stdout_contains("Index updated successfully!");

    let backup = env.index_path.with_file_name("modules.json.backup");
    assert_eq!(std::fs::read_to_string(backup).unwrap(), OLD_CATALOG);
    catalog.assert_hits(1);

    env.command()
        .args(["list", "--compact"])
        .assert()
        .success()
        .stdout("code-coverage\nhello\nno-source\nsanitizers\n");
}

#[test]
fn test_update_index_local() {
    let env = TestEnv::new();
    let server = catalog_server(200, &sample_catalog_json(UNUSED_REPO));
    let url = server.url(CATALOG_PATH);

    env.run(&["update-index", "--local", "--url", &url]).assert_success();

    assert!(env.work_dir.join("modules.json").is_file());
    assert!(!env.index_path.exists());
}

#[test]
fn test_update_index_defaults_to_data_dir() {
    let env = TestEnv::new();
    let server = catalog_server(200, &sample_catalog_json(UNUSED_REPO));
    let url = server.url(CATALOG_PATH);

    let output = env
        .command()
        .env_remove("CMH_INDEX")
        .args(["update-index", "--url", &url])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(env.home.join(".cmakehub/modules.json").is_file());
}

#[test]
fn test_update_index_http_error_keeps_catalog() {
    let env = TestEnv::new();
    env.write_catalog(OLD_CATALOG);
    let server = catalog_server(404, "not here");
    let url = server.url(CATALOG_PATH);

    env.run(&["update-index", "--url", &url])
        .assert_failure()
        .assert_stderr_contains("Network error")
        .assert_stderr_contains("404");

    assert_eq!(std::fs::read_to_string(&env.index_path).unwrap(), OLD_CATALOG);
}

#[test]
fn test_update_index_unreachable_host() {
    let env = TestEnv::new();
    env.write_catalog(OLD_CATALOG);

    env.run(&["update-index", "--url", "http://127.0.0.1:9/modules.json"])
        .assert_failure()
        .assert_stderr_contains("Network error");

    assert_eq!(std::fs::read_to_string(&env.index_path).unwrap(), OLD_CATALOG);
}

#[test]
fn test_update_index_rejects_invalid_json() {
    let env = TestEnv::new();
    env.write_catalog(OLD_CATALOG);
    let server = catalog_server(200, "<html>oops</html>");
    let url = server.url(CATALOG_PATH);

    env.run(&["update-index", "--url", &url])
        .assert_failure()
        .assert_stderr_contains("Invalid module index");

    assert_eq!(std::fs::read_to_string(&env.index_path).unwrap(), OLD_CATALOG);
    assert!(!env.index_path.with_file_name("modules.json.backup").exists());
}

#[test]
fn test_update_index_rejects_document_without_modules() {
    let env = TestEnv::new();
    env.write_catalog(OLD_CATALOG);
    let server = catalog_server(200, r#"{"categories": {}}"#);
    let url = server.url(CATALOG_PATH);

    env.run(&["update-index", "--url", &url])
        .assert_failure()
        .assert_stderr_contains("Invalid module index format")
        .assert_stderr_contains("the existing local index was left untouched");

    assert_eq!(std::fs::read_to_string(&env.index_path).unwrap(), OLD_CATALOG);
}
