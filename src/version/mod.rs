//! Dotted-numeric version comparison for compatibility checks.
//!
//! Catalog entries carry minimum CMake versions (`"3.19"`) and minimum C++
//! standards (`"17"`). Both are compared natively here; no external build tool
//! is consulted.
//!
//! # Ordering Rules
//!
//! - Segments are separated by `.` and compared numerically left to right,
//!   so `3.9 < 3.10 < 3.19` even though `"3.10" < "3.9"` as strings.
//! - Missing trailing segments count as zero: `3.10 == 3.10.0`.
//! - Only the leading digits of a segment are significant, so release
//!   suffixes are ignored: `3.25.1-rc2 == 3.25.1`.
//! - C++ standards are normalised to years before comparing, so
//!   `98 < 03 < 11 < 17 < 20`.
//!
//! # Examples
//!
//! ```rust
//! use cmakehub_cli::version::{DottedVersion, meets_minimum};
//!
//! let old = DottedVersion::parse("3.9");
//! let new = DottedVersion::parse("3.10");
//! assert!(old < new);
//! assert!(meets_minimum("3.25", "3.19"));
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A version made of numeric segments separated by dots.
#[derive(Debug, Clone, Eq)]
pub struct DottedVersion {
    segments: Vec<u64>,
    raw: String,
}

impl DottedVersion {
    /// Parse a version string leniently.
    ///
    /// Surrounding whitespace and a leading `v`/`V` are ignored. A segment
    /// without leading digits counts as zero.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        let body = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

        let segments = body
            .split('.')
            .map(|segment| {
                let digits: String = segment.chars().take_while(char::is_ascii_digit).collect();
                digits.parse::<u64>().unwrap_or(0)
            })
            .collect();

        Self {
            segments,
            raw: trimmed.to_string(),
        }
    }

    fn segment(&self, idx: usize) -> u64 {
        self.segments.get(idx).copied().unwrap_or(0)
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Compare two version strings with dotted-numeric ordering.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    DottedVersion::parse(a).cmp(&DottedVersion::parse(b))
}

/// Returns `true` when `current` is at or above `required`.
#[must_use]
pub fn meets_minimum(current: &str, required: &str) -> bool {
    compare_versions(current, required) != Ordering::Less
}

/// Like [`meets_minimum`], but `None` when `current` does not start with a
/// number (e.g., `"unknown"`).
#[must_use]
pub fn try_meets_minimum(current: &str, required: &str) -> Option<bool> {
    let trimmed = current.trim();
    let body = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
    body.starts_with(|c: char| c.is_ascii_digit()).then(|| meets_minimum(body, required))
}

/// A C++ language standard, stored as its publication year.
///
/// Accepts `"17"`, `"C++17"`, `"c++17"`, `"2017"` and numeric JSON values
/// rendered as strings. Two-digit values from 90 upwards are 19xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CppStandard(u32);

impl CppStandard {
    /// Parse a C++ standard designation, returning `None` when no number is present.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();
        let body = lower
            .strip_prefix("c++")
            .or_else(|| lower.strip_prefix("cxx"))
            .unwrap_or(&lower);

        let digits: String = body.chars().take_while(char::is_ascii_digit).collect();
        let value: u32 = digits.parse().ok()?;

        let year = match value {
            0..=89 => 2000 + value,
            90..=99 => 1900 + value,
            _ => value,
        };
        Some(Self(year))
    }

    /// The publication year (e.g., 2017 for C++17).
    #[must_use]
    pub const fn year(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CppStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C++{:02}", self.0 % 100)
    }
}

/// Returns `Some(true)` when `current` satisfies `required`, `None` when either
/// side is not a recognisable standard.
#[must_use]
pub fn cpp_meets_minimum(current: &str, required: &str) -> Option<bool> {
    let current = CppStandard::parse(current)?;
    let required = CppStandard::parse(required)?;
    Some(current >= required)
}
