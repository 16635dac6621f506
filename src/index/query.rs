//! Read-only queries over a loaded [`Index`].
//!
//! Nothing here touches the filesystem, the network or an external tool.
//! Compatibility verdicts are computed independently of each other so a
//! module that fails one check still reports the others.

use super::{Index, ModuleRecord};
use crate::version::{CppStandard, cpp_meets_minimum, try_meets_minimum};

/// Records in catalog order, optionally restricted to one category.
#[must_use]
pub fn list<'a>(index: &'a Index, category: Option<&str>) -> Vec<&'a ModuleRecord> {
    index
        .modules
        .iter()
        .filter(|m| category.is_none_or(|c| m.category.as_deref() == Some(c)))
        .collect()
}

/// Case-insensitive substring search over name, description and tags.
///
/// A record matches when the keyword occurs in any of the three fields. The
/// category filter is applied afterwards.
#[must_use]
pub fn search<'a>(index: &'a Index, keyword: &str, category: Option<&str>) -> Vec<&'a ModuleRecord> {
    let needle = keyword.to_lowercase();
    index
        .modules
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle)
                || m.description.as_deref().unwrap_or_default().to_lowercase().contains(&needle)
                || m.tags.join(" ").to_lowercase().contains(&needle)
        })
        .filter(|m| category.is_none_or(|c| m.category.as_deref() == Some(c)))
        .collect()
}

/// Exact, case-sensitive lookup by name.
#[must_use]
pub fn find<'a>(index: &'a Index, name: &str) -> Option<&'a ModuleRecord> {
    index.modules.iter().find(|m| m.name == name)
}

/// Platform support of a module on the current platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformVerdict {
    /// The module lists no platforms
    Independent,
    /// The current platform is listed
    Supported,
    /// The current platform is not listed
    Unsupported {
        required: Vec<String>,
    },
}

impl PlatformVerdict {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        !matches!(self, Self::Unsupported { .. })
    }
}

/// Outcome of comparing a current version against a module's floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionVerdict {
    /// The module states no minimum
    NoRequirement,
    /// Current version is at or above the minimum
    Compatible {
        required: String,
        current: String,
    },
    /// Current version is below the minimum
    Incompatible {
        required: String,
        current: String,
    },
    /// There is a minimum but the current version is unknown or unparsable
    Unknown {
        required: String,
    },
}

impl VersionVerdict {
    /// Only a known shortfall counts as incompatible.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        !matches!(self, Self::Incompatible { .. })
    }
}

/// Whether a dependency name exists in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyStatus {
    pub name: String,
    pub available: bool,
}

/// Independent compatibility verdicts for one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityReport {
    pub module: String,
    pub current_platform: String,
    pub platform: PlatformVerdict,
    pub cmake: VersionVerdict,
    pub cpp: VersionVerdict,
    pub dependencies: Vec<DependencyStatus>,
    /// Informational only
    pub conflicts: Vec<String>,
}

impl CompatibilityReport {
    /// `false` when the platform is unsupported or a known version is too old.
    ///
    /// Missing dependencies and conflicts never make a module incompatible.
    #[must_use]
    pub const fn is_compatible(&self) -> bool {
        self.platform.is_ok() && self.cmake.is_ok() && self.cpp.is_ok()
    }

    /// Dependencies that are not in the catalog.
    pub fn missing_dependencies(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().filter(|d| !d.available).map(|d| d.name.as_str())
    }
}

/// Compute platform, version, dependency and conflict verdicts for `module`.
///
/// Returns `None` when the module is not in the catalog.
#[must_use]
pub fn check_compatibility(
    index: &Index,
    module: &str,
    current_platform: &str,
    current_cmake: Option<&str>,
    current_cpp: Option<&str>,
) -> Option<CompatibilityReport> {
    let record = find(index, module)?;

    let platform = if record.platform.is_empty() {
        PlatformVerdict::Independent
    } else if record.platform.iter().any(|p| p.eq_ignore_ascii_case(current_platform)) {
        PlatformVerdict::Supported
    } else {
        PlatformVerdict::Unsupported {
            required: record.platform.clone(),
        }
    };

    let cmake =
        version_verdict(record.cmake_minimum_required.as_deref(), current_cmake, try_meets_minimum);

    let cpp =
        version_verdict(record.cpp_minimum_required.as_deref(), current_cpp, cpp_meets_minimum);

    let dependencies = record
        .dependencies
        .iter()
        .map(|name| DependencyStatus {
            name: name.clone(),
            available: find(index, name).is_some(),
        })
        .collect();

    Some(CompatibilityReport {
        module: record.name.clone(),
        current_platform: current_platform.to_string(),
        platform,
        cmake,
        cpp,
        dependencies,
        conflicts: record.conflicts.clone(),
    })
}

fn version_verdict(
    required: Option<&str>,
    current: Option<&str>,
    meets: impl Fn(&str, &str) -> Option<bool>,
) -> VersionVerdict {
    let Some(required) = required else {
        return VersionVerdict::NoRequirement;
    };
    let Some(current) = current.map(str::trim).filter(|c| !c.is_empty()) else {
        return VersionVerdict::Unknown {
            required: required.to_string(),
        };
    };
    match meets(current, required) {
        Some(true) => VersionVerdict::Compatible {
            required: required.to_string(),
            current: current.to_string(),
        },
        Some(false) => VersionVerdict::Incompatible {
            required: required.to_string(),
            current: current.to_string(),
        },
        None => VersionVerdict::Unknown {
            required: required.to_string(),
        },
    }
}

/// Render a C++ requirement the way reports show it (`C++17`).
#[must_use]
pub fn describe_cpp(value: &str) -> String {
    CppStandard::parse(value).map_or_else(|| value.to_string(), |s| s.to_string())
}
