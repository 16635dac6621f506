//! Structural validation and summary statistics for a catalog.
//!
//! Validation is offline: it checks the shape of each record and the
//! consistency of the catalog as a whole, but never probes repositories.

use super::{Index, ModuleRecord};
use std::collections::{BTreeMap, BTreeSet};

/// Problems found in one record.
///
/// Issues make the catalog invalid; warnings are reported but tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleValidation {
    pub name: String,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

impl ModuleValidation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Result of validating a whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub modules: Vec<ModuleValidation>,
    /// Names that appear more than once, sorted
    pub duplicates: Vec<String>,
    /// Categories used by records but missing from `categories`, sorted
    pub undefined_categories: Vec<String>,
}

impl ValidationReport {
    /// Records without issues.
    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_valid()).count()
    }

    /// `true` when no record has an issue and no name is duplicated.
    ///
    /// Warnings and unlabelled categories do not affect this.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.duplicates.is_empty() && self.modules.iter().all(ModuleValidation::is_valid)
    }

    /// Why the catalog is invalid, e.g. `1 of 3 modules failed validation;
    /// duplicate module names: dup`. Empty when it is valid.
    #[must_use]
    pub fn failure_summary(&self) -> String {
        let mut parts = Vec::new();
        let failed = self.modules.len() - self.valid_count();
        if failed > 0 {
            parts.push(format!("{failed} of {} modules failed validation", self.modules.len()));
        }
        if !self.duplicates.is_empty() {
            parts.push(format!("duplicate module names: {}", self.duplicates.join(", ")));
        }
        parts.join("; ")
    }
}

const REQUIRED_FIELDS: [&str; 6] = ["name", "description", "category", "repository", "path", "license"];

/// Validate every record and the catalog-level invariants.
#[must_use]
pub fn validate_index(index: &Index) -> ValidationReport {
    let modules = index.modules.iter().map(validate_module).collect();

    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for module in &index.modules {
        if !seen.insert(module.name.as_str()) {
            duplicates.insert(module.name.clone());
        }
    }

    let undefined_categories = index
        .modules
        .iter()
        .filter_map(|m| m.category.as_deref())
        .filter(|c| !c.is_empty() && !index.categories.contains_key(*c))
        .map(str::to_string)
        .collect::<BTreeSet<_>>();

    ValidationReport {
        modules,
        duplicates: duplicates.into_iter().collect(),
        undefined_categories: undefined_categories.into_iter().collect(),
    }
}

fn field<'a>(record: &'a ModuleRecord, name: &str) -> Option<&'a str> {
    let value = match name {
        "name" => Some(record.name.as_str()),
        "description" => record.description.as_deref(),
        "category" => record.category.as_deref(),
        "repository" => record.repository.as_deref(),
        "path" => record.path.as_deref(),
        "license" => record.license.as_deref(),
        _ => None,
    };
    value.filter(|v| !v.trim().is_empty())
}

fn validate_module(record: &ModuleRecord) -> ModuleValidation {
    let mut result = ModuleValidation {
        name: if record.name.is_empty() { "<unnamed>".to_string() } else { record.name.clone() },
        ..ModuleValidation::default()
    };

    for name in REQUIRED_FIELDS {
        if field(record, name).is_none() {
            result.issues.push(format!("Missing required field: {name}"));
        }
    }

    if let Some(repo) = field(record, "repository") {
        if !repo.starts_with("https://") {
            result.issues.push(format!("Repository URL must use https://: {repo}"));
        }
        if !repo.ends_with(".git") {
            result.issues.push(format!("Repository URL must end with .git: {repo}"));
        }
    }

    if let Some(path) = field(record, "path").filter(|p| !p.ends_with(".cmake")) {
        result.warnings.push(format!("Module path should end with .cmake: {path}"));
    }

    if record.version.as_deref().is_none_or(|v| v.trim().is_empty()) {
        result.warnings.push("Module has no version specified".to_string());
    }

    result
}

/// Summary numbers shown after an index update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub total_modules: usize,
    pub total_stars: u64,
    /// Category key to module count; records without a category count as `unknown`
    pub per_category: BTreeMap<String, usize>,
}

impl IndexStats {
    /// Compute statistics for `index`.
    #[must_use]
    pub fn from_index(index: &Index) -> Self {
        let mut per_category = BTreeMap::new();
        for module in &index.modules {
            let key = module.category.as_deref().filter(|c| !c.is_empty()).unwrap_or("unknown");
            *per_category.entry(key.to_string()).or_insert(0) += 1;
        }

        Self {
            total_modules: index.modules.len(),
            total_stars: index.modules.iter().filter_map(|m| m.stars).sum(),
            per_category,
        }
    }

    /// Number of distinct categories.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.per_category.len()
    }
}
