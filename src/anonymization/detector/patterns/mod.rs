//! Category registry: header synonyms, display names, display priority, and
//! suppression rules
//!
//! The built-in library is embedded from `patterns/header_synonyms.toml`. A
//! custom library with the same schema can replace it wholesale.

use crate::anonymization::detector::header::{HeaderExclusion, HeaderPattern};
use crate::anonymization::models::Category;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Category definition from TOML
#[derive(Debug, Clone, Deserialize)]
struct CategoryDefinition {
    display_name: String,
    synonyms: Vec<String>,
    #[serde(default)]
    exclusions: Vec<ExclusionDefinition>,
}

/// Exclusion guard for one synonym
#[derive(Debug, Clone, Deserialize)]
struct ExclusionDefinition {
    pattern: String,
    header_contains: Vec<String>,
}

/// Suppression pair from TOML
#[derive(Debug, Clone, Deserialize)]
struct SuppressionDefinition {
    when: String,
    remove: String,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    #[serde(default)]
    display_priority: Vec<String>,
    #[serde(default)]
    suppressions: Vec<SuppressionDefinition>,
    categories: HashMap<String, CategoryDefinition>,
}

/// "If `when` is detected, remove `remove` from the same field's result set"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuppressionRule {
    /// Category whose presence triggers the rule
    pub when: Category,
    /// Category removed when the rule triggers
    pub remove: Category,
}

/// Compiled definition of a single category
#[derive(Debug, Clone)]
pub struct CategoryEntry {
    /// The category
    pub category: Category,
    /// Friendly display name
    pub display_name: String,
    /// Compiled synonym phrases, in library order
    pub patterns: Vec<HeaderPattern>,
}

impl CategoryEntry {
    /// Returns true if any synonym matches the normalized header
    pub fn matches_normalized(&self, normalized_header: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_normalized(normalized_header))
    }
}

/// Immutable registry of every category, built once per process
pub struct CategoryRegistry {
    entries: Vec<CategoryEntry>,
    display_priority: Vec<Category>,
    suppressions: Vec<SuppressionRule>,
}

impl CategoryRegistry {
    /// Load a registry from a TOML pattern library file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Build a registry from TOML content
    ///
    /// Every category must be defined. Categories missing from
    /// `display_priority` are ranked after the listed ones, in detection order.
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut definitions: HashMap<Category, CategoryDefinition> = HashMap::new();
        for (key, def) in library.categories {
            let category: Category = key
                .parse()
                .with_context(|| format!("Invalid category in pattern library: {key}"))?;
            definitions.insert(category, def);
        }

        let mut entries = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let def = definitions.remove(&category).with_context(|| {
                format!("Pattern library is missing category '{}'", category.key())
            })?;
            entries.push(Self::compile_entry(category, def)?);
        }

        let mut display_priority = Vec::with_capacity(Category::ALL.len());
        for key in &library.display_priority {
            let category: Category = key
                .parse()
                .with_context(|| format!("Invalid category in display_priority: {key}"))?;
            if !display_priority.contains(&category) {
                display_priority.push(category);
            }
        }
        for category in Category::ALL {
            if !display_priority.contains(&category) {
                display_priority.push(category);
            }
        }

        let suppressions = library
            .suppressions
            .iter()
            .map(|s| {
                Ok(SuppressionRule {
                    when: s
                        .when
                        .parse()
                        .with_context(|| format!("Invalid suppression category: {}", s.when))?,
                    remove: s
                        .remove
                        .parse()
                        .with_context(|| format!("Invalid suppression category: {}", s.remove))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            categories = entries.len(),
            suppressions = suppressions.len(),
            "Category registry loaded"
        );

        Ok(Self {
            entries,
            display_priority,
            suppressions,
        })
    }

    /// Registry built from the embedded synonym library
    pub fn default_registry() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/header_synonyms.toml");
        Self::from_toml(default_toml)
    }

    fn compile_entry(category: Category, def: CategoryDefinition) -> Result<CategoryEntry> {
        let mut patterns = Vec::with_capacity(def.synonyms.len());
        for synonym in &def.synonyms {
            let exclusion = def
                .exclusions
                .iter()
                .find(|e| e.pattern.eq_ignore_ascii_case(synonym))
                .map(|e| HeaderExclusion::new(&e.header_contains));

            let pattern = HeaderPattern::compile(synonym, exclusion).with_context(|| {
                format!("Invalid synonym for '{}': {synonym}", category.key())
            })?;
            patterns.push(pattern);
        }

        Ok(CategoryEntry {
            category,
            display_name: def.display_name,
            patterns,
        })
    }

    /// All entries, in detection order
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Entry for a category
    pub fn entry(&self, category: Category) -> &CategoryEntry {
        // entries are built from Category::ALL, so the index always exists
        &self.entries[Self::detection_index(category)]
    }

    fn detection_index(category: Category) -> usize {
        Category::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or_default()
    }

    /// Friendly display name for a category
    pub fn display_name(&self, category: Category) -> &str {
        &self.entry(category).display_name
    }

    /// Display rank (lower is shown first)
    pub fn display_rank(&self, category: Category) -> usize {
        self.display_priority
            .iter()
            .position(|c| *c == category)
            .unwrap_or(usize::MAX)
    }

    /// Suppression rules, in library order
    pub fn suppressions(&self) -> &[SuppressionRule] {
        &self.suppressions
    }

    /// Apply suppression rules to a raw match set
    pub fn apply_suppressions(&self, detected: &mut Vec<Category>) {
        for rule in &self.suppressions {
            if detected.contains(&rule.when) {
                detected.retain(|c| *c != rule.remove);
            }
        }
    }

    /// Sort categories by display priority
    pub fn sort_for_display(&self, categories: &mut [Category]) {
        categories.sort_by_key(|c| self.display_rank(*c));
    }

    /// Friendly labels for a set of categories, in display order
    pub fn friendly_labels(&self, categories: &[Category]) -> Vec<String> {
        let mut sorted = categories.to_vec();
        sorted.dedup();
        self.sort_for_display(&mut sorted);
        sorted
            .into_iter()
            .map(|c| self.display_name(c).to_string())
            .collect()
    }
}
