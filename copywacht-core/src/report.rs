//! report.rs - Grouped, deterministic rendering of scan hits.
//!
//! Categories are ordered by (label, id) so two runs over an unchanged tree
//! produce byte-identical reports. Each category shows at most `show_limit`
//! lines followed by a hidden-remainder count; summary-only categories show
//! the count and nothing else.
//!
//! License: MIT OR Apache-2.0

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

use crate::config::CategorySpec;
use crate::scanner::Hit;

const SECTION_RULE_WIDTH: usize = 90;

/// Writes the grouped per-category report. Returns `true` when any hit was
/// reported, which callers map onto their findings exit code.
pub fn write_report(
    out: &mut impl Write,
    hits: &[Hit],
    categories: &[CategorySpec],
    show_limit: usize,
) -> io::Result<bool> {
    if hits.is_empty() {
        writeln!(out, "0 hits.")?;
        return Ok(false);
    }

    writeln!(out, "Total hits: {}", hits.len())?;

    let mut buckets: HashMap<&str, Vec<&Hit>> = HashMap::new();
    for hit in hits {
        buckets.entry(hit.category_id.as_str()).or_default().push(hit);
    }

    let mut ordered: Vec<&CategorySpec> = categories
        .iter()
        .filter(|c| buckets.contains_key(c.id.as_str()))
        .collect();
    ordered.sort_by(|a, b| (&a.label, &a.id).cmp(&(&b.label, &b.id)));

    for category in ordered {
        let bucket = &buckets[category.id.as_str()];
        writeln!(out)?;
        if category.summary_only {
            writeln!(out, "[{}] {} hits (summary only)", category.label, bucket.len())?;
            continue;
        }
        writeln!(out, "[{}] {} hits", category.label, bucket.len())?;
        writeln!(out, "{}", "-".repeat(SECTION_RULE_WIDTH))?;
        for hit in bucket.iter().take(show_limit) {
            writeln!(out, "{}:{}: {}", hit.path.display(), hit.line_number, hit.line)?;
        }
        if bucket.len() > show_limit {
            writeln!(out, "... ({} more hidden)", bucket.len() - show_limit)?;
        }
    }

    Ok(true)
}

/// Writes the list of CTA pages that never ask a reflective question,
/// sorted lexicographically and capped at `cap` entries.
pub fn write_missing_questions(
    out: &mut impl Write,
    files: &[String],
    cap: usize,
) -> io::Result<()> {
    if files.is_empty() {
        writeln!(out, "none")?;
        return Ok(());
    }
    let mut sorted = files.to_vec();
    sorted.sort();
    for file in sorted.iter().take(cap) {
        writeln!(out, "- {file}")?;
    }
    if sorted.len() > cap {
        writeln!(out, "... ({} more hidden)", sorted.len() - cap)?;
    }
    Ok(())
}

/// Hit counts per category id, in id order. Used for the JSON report.
pub fn category_counts(hits: &[Hit]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for hit in hits {
        *counts.entry(hit.category_id.clone()).or_insert(0) += 1;
    }
    counts
}
