//! Configuration management for `copywacht-core`.
//!
//! This module defines the data structures for scan categories, rewrite
//! passes, funnel pattern groups and per-tool walk specifications. It handles
//! deserialization of the YAML rule configuration and provides utilities for
//! loading and validating it.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Default per-file size cap: files above this are never scanned.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 3 * 1024 * 1024;

/// File-selection rules for one tool surface.
///
/// Each subcommand carries its own `WalkSpec`: the audit scans the broad
/// extension set inside the site scope, the review only looks at copy-bearing
/// source files, and the rewrite passes touch everything they may fix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WalkSpec {
    /// Extension allow-list, with leading dot (e.g. `".mdx"`).
    pub include_extensions: Vec<String>,
    /// Directory names pruned before descent (their contents are never read).
    pub exclude_dirs: Vec<String>,
    /// Size cap in bytes; larger files are skipped.
    pub max_size_bytes: u64,
    /// When set, a path must contain this fragment to be scanned.
    pub scope_fragment: Option<String>,
    /// Paths containing any of these fragments are skipped.
    pub ignore_fragments: Vec<String>,
}

impl Default for WalkSpec {
    fn default() -> Self {
        Self {
            include_extensions: Vec::new(),
            exclude_dirs: Vec::new(),
            max_size_bytes: DEFAULT_MAX_FILE_SIZE,
            scope_fragment: None,
            ignore_fragments: Vec::new(),
        }
    }
}

/// A named bucket of related patterns.
///
/// `id` is the stable control tag: `--only` filtering and the summary-only
/// switch operate on it. `label` is the report heading and is never used for
/// control decisions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CategorySpec {
    pub id: String,
    pub label: String,
    /// When true the report shows only the hit count for this category,
    /// not the individual lines.
    pub summary_only: bool,
    pub patterns: Vec<String>,
}

/// A single search-and-replace rule inside a rewrite pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReplacementSpec {
    pub pattern: String,
    pub replace_with: String,
}

/// An ordered list of replacements sharing one backup suffix.
///
/// Distinct passes must use distinct suffixes so a later pass never
/// overwrites an earlier pass's backups.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RewritePass {
    pub name: String,
    pub backup_suffix: String,
    pub rules: Vec<ReplacementSpec>,
}

/// Pattern groups for the per-file marker probe (call-to-action presence and
/// reflective-question presence).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkerSpec {
    pub cta: Vec<String>,
    pub reflective_question: Vec<String>,
}

/// Walk spec plus category set for the policy audit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditSection {
    pub walk: WalkSpec,
    pub categories: Vec<CategorySpec>,
}

/// Walk spec, category set and marker probe for the tone review.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewSection {
    pub walk: WalkSpec,
    pub categories: Vec<CategorySpec>,
    pub markers: MarkerSpec,
}

/// Walk spec plus the ordered rewrite passes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RewriteSection {
    pub walk: WalkSpec,
    pub passes: Vec<RewritePass>,
}

/// Walk spec plus the soft/hard funnel pattern groups.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FunnelSection {
    pub walk: WalkSpec,
    pub soft: Vec<String>,
    pub hard: Vec<String>,
}

/// Top-level rule configuration for all subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GuardConfig {
    pub audit: AuditSection,
    pub review: ReviewSection,
    pub rewrite: RewriteSection,
    pub funnel: FunnelSection,
}

impl GuardConfig {
    /// Loads the built-in rule sets from the embedded configuration.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: GuardConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Loads a rule configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let config: GuardConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse rules file {}", path.display()))?;
        validate_config(&config)?;
        Ok(config)
    }
}

/// Restricts a category list to ids containing `only` (case-insensitive
/// substring). `None` keeps every category.
pub fn select_categories(categories: &[CategorySpec], only: Option<&str>) -> Vec<CategorySpec> {
    match only {
        None => categories.to_vec(),
        Some(filter) => {
            let needle = filter.to_lowercase();
            categories
                .iter()
                .filter(|c| c.id.to_lowercase().contains(&needle))
                .cloned()
                .collect()
        }
    }
}

/// Validates structural integrity of a rule configuration.
///
/// Regex compilation errors are not checked here; the compiler reports those
/// with category and pattern context when the rules are actually built.
pub fn validate_config(config: &GuardConfig) -> Result<()> {
    let mut errors = Vec::new();

    validate_categories("audit", &config.audit.categories, &mut errors);
    validate_categories("review", &config.review.categories, &mut errors);

    let mut pass_names = HashSet::new();
    let mut suffixes = HashSet::new();
    for pass in &config.rewrite.passes {
        if pass.name.is_empty() {
            errors.push("A rewrite pass has an empty `name` field.".to_string());
        } else if !pass_names.insert(pass.name.clone()) {
            errors.push(format!("Duplicate rewrite pass name: '{}'.", pass.name));
        }
        if pass.backup_suffix.is_empty() {
            errors.push(format!("Rewrite pass '{}' has an empty `backup_suffix`.", pass.name));
        } else if !suffixes.insert(pass.backup_suffix.clone()) {
            errors.push(format!(
                "Rewrite pass '{}' reuses backup suffix '{}'; passes would overwrite each other's backups.",
                pass.name, pass.backup_suffix
            ));
        }
        for rule in &pass.rules {
            if rule.pattern.is_empty() {
                errors.push(format!("Rewrite pass '{}' contains an empty pattern.", pass.name));
            }
        }
    }

    if !errors.is_empty() {
        return Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")));
    }
    Ok(())
}

fn validate_categories(section: &str, categories: &[CategorySpec], errors: &mut Vec<String>) {
    let mut ids = HashSet::new();
    for category in categories {
        if category.id.is_empty() {
            errors.push(format!("A {section} category has an empty `id` field."));
        } else if !ids.insert(category.id.clone()) {
            errors.push(format!("Duplicate {section} category id: '{}'.", category.id));
        }
        if category.patterns.is_empty() {
            errors.push(format!(
                "Category '{}' ({section}) has no patterns.",
                category.id
            ));
        }
        for pattern in &category.patterns {
            if pattern.is_empty() {
                errors.push(format!("Category '{}' ({section}) contains an empty pattern.", category.id));
            }
        }
    }
}
