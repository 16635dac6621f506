//! `cmakehub init` - scaffold a new C++ project that uses CMakeHub
//!
//! The project gets its own copy of `loader.cmake` under `cmake/hub/` so it
//! builds without CMakeHub installed. If any step fails after the project
//! directory was created, the directory is removed again.

use super::CommandContext;
use super::common::rule;
use crate::constants::{LOADER_FILE_NAME, LOADER_RELATIVE_DIR};
use crate::core::CmhError;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::Path;
use tracing::{debug, warn};

/// Create a new project directory with a CMakeLists.txt wired for CMakeHub.
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Project name, also used as the directory name
    name: String,
}

impl InitCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let project_dir = ctx.config.working_dir.join(&self.name);
        if project_dir.exists() {
            return Err(CmhError::ProjectExists {
                path: self.name.clone(),
            }
            .into());
        }

        let catalog = ctx.config.find_index_path().ok();
        let loader = ctx.config.find_loader_path(catalog.as_deref())?;
        debug!("Using loader script {}", loader.display());

        println!("Initializing project: {}", self.name);
        println!("{}", rule('-'));

        if let Err(err) = scaffold(&project_dir, &self.name, &loader).await {
            if let Err(cleanup) = tokio::fs::remove_dir_all(&project_dir).await {
                warn!("Failed to remove {}: {cleanup}", project_dir.display());
            }
            return Err(err);
        }

        println!();
        println!("{}", rule('='));
        println!("{} Project '{}' initialized successfully!", "✓".green(), self.name);
        println!("{}", rule('='));
        println!();
        println!("Next steps:");
        println!("  1. cd {}", self.name);
        println!("  2. mkdir build && cd build");
        println!("  3. cmake ..");
        println!("  4. cmake --build .");
        println!("  5. ./{}", self.name);
        println!();
        println!("To add CMakeHub modules:");
        println!("  cmakehub use <module_name> --append CMakeLists.txt");

        Ok(())
    }
}

async fn scaffold(project_dir: &Path, name: &str, loader: &Path) -> Result<()> {
    let hub_dir = project_dir.join(LOADER_RELATIVE_DIR);
    tokio::fs::create_dir_all(&hub_dir)
        .await
        .with_context(|| format!("Failed to create {}", hub_dir.display()))?;
    tokio::fs::create_dir_all(project_dir.join("src")).await?;
    println!("{} Created directory structure", "✓".green());

    tokio::fs::copy(loader, hub_dir.join(LOADER_FILE_NAME))
        .await
        .with_context(|| format!("Failed to copy {}", loader.display()))?;
    println!("{} Copied {LOADER_FILE_NAME} to {LOADER_RELATIVE_DIR}/", "✓".green());

    let files = [
        ("CMakeLists.txt", cmake_lists(name)),
        ("src/main.cpp", main_cpp(name)),
        (".gitignore", GITIGNORE.to_string()),
        ("README.md", readme(name)),
    ];
    for (relative, content) in files {
        let path = project_dir.join(relative);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{} Created {relative}", "✓".green());
    }

    Ok(())
}

fn cmake_lists(name: &str) -> String {
    format!(
        r#"cmake_minimum_required(VERSION 3.19)
project({name} VERSION 1.0.0 LANGUAGES CXX)

# Set C++ standard
set(CMAKE_CXX_STANDARD 17 CACHE STRING "C++ standard")
set(CMAKE_CXX_STANDARD_REQUIRED ON)

# Include CMakeHub
include(${{CMAKE_CURRENT_SOURCE_DIR}}/cmake/hub/loader.cmake)

# Enable testing
enable_testing()

# Add your modules here
# cmakehub_use(sanitizers)
# cmakehub_use(coverage)

# Add source files
file(GLOB_RECURSE SOURCES "src/*.cpp")
file(GLOB_RECURSE HEADERS "src/*.h")

# Create executable
add_executable(${{PROJECT_NAME}} ${{SOURCES}} ${{HEADERS}})

# Target settings
target_include_directories(${{PROJECT_NAME}} PUBLIC
    ${{CMAKE_CURRENT_SOURCE_DIR}}/src
)

# Optional: Install rules
install(TARGETS ${{PROJECT_NAME}}
    RUNTIME DESTINATION bin
    LIBRARY DESTINATION lib
    ARCHIVE DESTINATION lib
)
"#
    )
}

fn main_cpp(name: &str) -> String {
    format!(
        r#"#include <iostream>

int main() {{
    std::cout << "Hello from {name}!" << std::endl;
    return 0;
}}
"#
    )
}

// No `*.cmake` pattern: it would hide cmake/hub/loader.cmake
const GITIGNORE: &str = "# Build directories
build/
cmake-build-*/
out/

# CMake
CMakeCache.txt
CMakeFiles/
cmake_install.cmake
Makefile

# IDE
.vscode/
.idea/
*.swp
*.swo
*~

# CMakeHub cache
.cmakehub/

# OS
.DS_Store
Thumbs.db
";

fn readme(name: &str) -> String {
    format!(
        r#"# {name}

A C++ project initialized with CMakeHub.

## Build

```bash
mkdir build && cd build
cmake ..
cmake --build .
./{name}
```

## Adding Modules

```bash
# List available modules
cmakehub list

# Search for modules
cmakehub search sanitizer

# Add a module
cmakehub use sanitizers --append CMakeLists.txt

# Check module compatibility
cmakehub check sanitizers
```

## Features

- CMake 3.19+
- C++17 standard
- CMakeHub integration
- Testing enabled
"#
    )
}
