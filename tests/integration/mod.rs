//! Integration test suite for CMakeHub
//!
//! Drives the real `cmakehub` binary against temporary catalogs, caches and
//! home directories. Download tests clone local repositories over
//! `file://`; nothing here touches the network.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **browse**: `list`, `search` and `info`
//! - **check**: Compatibility reports and exit codes
//! - **cache**: `cache info` and `cache clear`
//! - **download**: `use --test` and `update` against local git repositories
//! - **errors**: Catalog discovery, configuration and error rendering
//! - **index_tools**: `update-index`, `validate` and `stats`
//! - **project**: `use` snippet output and `init`

#[path = "../common/mod.rs"]
mod common;

mod browse;
mod cache;
mod check;
mod download;
mod errors;
mod index_tools;
mod project;
