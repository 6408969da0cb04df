//! compiler.rs - Compiles rule configurations into ready-to-run matchers.
//!
//! Every pattern is compiled exactly once at startup, case-insensitively.
//! Compilation failures are collected and surfaced as a single fatal error
//! naming each offending category and pattern, so a broken rule set never
//! results in a partial run.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::{CategorySpec, ReplacementSpec, MAX_PATTERN_LENGTH};
use crate::errors::CopywachtError;

/// Upper bound for a single compiled regex, same order of magnitude as the
/// input cap so a pathological pattern cannot balloon memory.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A single compiled scan rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled, case-insensitive matcher.
    pub regex: Regex,
    /// Id of the category this rule belongs to.
    pub category_id: String,
    /// The raw pattern string, kept for reporting.
    pub raw_pattern: String,
}

/// All compiled scan rules, in category declaration order and, within a
/// category, pattern declaration order. Scan hits inherit this order.
#[derive(Debug, Default)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

/// A compiled search-and-replace rule.
#[derive(Debug)]
pub struct CompiledReplacement {
    pub regex: Regex,
    pub replace_with: String,
}

fn build_matcher(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
}

/// Compiles the pattern lists of the given categories into `CompiledRules`.
pub fn compile_categories(categories: &[CategorySpec]) -> Result<CompiledRules, CopywachtError> {
    debug!("Starting compilation of {} categories.", categories.len());

    let mut compiled = Vec::new();
    let mut compilation_errors = Vec::new();

    for category in categories {
        for pattern in &category.patterns {
            if pattern.len() > MAX_PATTERN_LENGTH {
                compilation_errors.push(CopywachtError::PatternLengthExceeded(
                    category.id.clone(),
                    pattern.len(),
                    MAX_PATTERN_LENGTH,
                ));
                continue;
            }
            match build_matcher(pattern) {
                Ok(regex) => compiled.push(CompiledRule {
                    regex,
                    category_id: category.id.clone(),
                    raw_pattern: pattern.clone(),
                }),
                Err(e) => compilation_errors.push(CopywachtError::RuleCompilation(
                    category.id.clone(),
                    pattern.clone(),
                    e,
                )),
            }
        }
    }

    if !compilation_errors.is_empty() {
        let message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(CopywachtError::Fatal(format!(
            "Failed to compile {} pattern(s):\n{}",
            compilation_errors.len(),
            message
        )));
    }

    debug!("Finished compiling rules. Total compiled: {}.", compiled.len());
    Ok(CompiledRules { rules: compiled })
}

/// Compiles the replacement list of a rewrite pass. `pass_name` stands in for
/// the category in error messages.
pub fn compile_replacements(
    rules: &[ReplacementSpec],
    pass_name: &str,
) -> Result<Vec<CompiledReplacement>, CopywachtError> {
    let mut compiled = Vec::with_capacity(rules.len());
    for rule in rules {
        let regex = build_matcher(&rule.pattern).map_err(|e| {
            CopywachtError::RuleCompilation(pass_name.to_string(), rule.pattern.clone(), e)
        })?;
        compiled.push(CompiledReplacement {
            regex,
            replace_with: rule.replace_with.clone(),
        });
    }
    Ok(compiled)
}

/// Compiles a flat pattern list (funnel groups, marker probes). `group` names
/// the list in error messages.
pub fn compile_pattern_group(
    patterns: &[String],
    group: &str,
) -> Result<Vec<Regex>, CopywachtError> {
    patterns
        .iter()
        .map(|pattern| {
            build_matcher(pattern).map_err(|e| {
                CopywachtError::RuleCompilation(group.to_string(), pattern.clone(), e)
            })
        })
        .collect()
}
