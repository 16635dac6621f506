//! Catalog fixtures shared by unit and integration tests.

use serde_json::{Value, json};

/// A small catalog covering the shapes the CLI has to handle.
///
/// `hello_repository` becomes the repository of the downloadable `hello`
/// module; every other repository points at a host that is never contacted.
pub fn sample_catalog(hello_repository: &str) -> Value {
    json!({
        "modules": [
            {
                "name": "sanitizers",
                "description": "Address, memory and thread sanitizer integration",
                "category": "testing",
                "repository": "https://github.com/arsenm/sanitizers-cmake.git",
                "path": "cmake/FindSanitizers.cmake",
                "version": "master",
                "author": "arsenm",
                "license": "MIT",
                "stars": 370,
                "tags": ["asan", "msan", "tsan"],
                "platform": [],
                "cmake_minimum_required": "3.19",
                "dependencies": []
            },
            {
                "name": "code-coverage",
                "description": "Coverage reports for C and C++ targets",
                "category": "testing",
                "repository": "https://github.com/StableCoder/cmake-scripts.git",
                "path": "code-coverage.cmake",
                "version": "main",
                "license": "Apache-2.0",
                "stars": 120,
                "tags": ["gcov", "lcov", "llvm-cov"],
                "platform": ["linux", "macos"],
                "cpp_minimum_required": "11",
                "dependencies": ["sanitizers", "ghost-module"],
                "conflicts": ["legacy-coverage"]
            },
            {
                "name": "hello",
                "description": "Prints a greeting at configure time",
                "category": "utilities",
                "repository": hello_repository,
                "path": "cmake/Hello.cmake",
                "version": "main",
                "license": "MIT",
                "stars": 1,
                "homepage": "https://example.com/hello"
            },
            {
                "name": "no-source",
                "description": "A module without a repository",
                "category": "utilities",
                "path": "NoSource.cmake",
                "license": "MIT"
            }
        ],
        "categories": {
            "testing": "Testing & Quality",
            "utilities": "Utilities"
        }
    })
}

/// Pretty-printed [`sample_catalog`].
pub fn sample_catalog_json(hello_repository: &str) -> String {
    serde_json::to_string_pretty(&sample_catalog(hello_repository))
        .unwrap_or_else(|e| panic!("sample catalog serializes: {e}"))
}
