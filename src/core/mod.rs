//! Core types shared across CMakeHub.
//!
//! Currently this is the error taxonomy and its user-facing rendering; see
//! [`error`] for details.

pub mod error;

pub use error::{CmhError, ErrorContext, user_friendly_error};
