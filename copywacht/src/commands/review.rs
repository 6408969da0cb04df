// copywacht/src/commands/review.rs
//! Tone review: lint copy for autonomy, over-promising and fear framing,
//! plus the cross-file CTA-without-reflective-question aggregate.

use anyhow::Result;
use log::info;
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use copywacht_core::{
    compile_categories, filters, report, scan_file_with_markers, select_categories, FileWalker,
    GuardConfig, Hit, MarkerProbe,
};

use super::{relative_display, EXIT_CLEAN, EXIT_REVIEW_FINDINGS, HEADER_RULE_WIDTH};
use crate::cli::ReviewCommand;

/// Cap on the missing-question list, matching the per-category show limits.
const MISSING_QUESTIONS_CAP: usize = 50;

pub fn run_review(config: &GuardConfig, root: &Path, cmd: &ReviewCommand) -> Result<i32> {
    info!("Starting review of {}", root.display());

    let categories = select_categories(&config.review.categories, cmd.only.as_deref());
    let compiled = compile_categories(&categories)?;
    let probe = MarkerProbe::from_spec(&config.review.markers)?;
    let walker = FileWalker::new(&config.review.walk);

    let mut hits: Vec<Hit> = Vec::new();
    let mut cta_pages: Vec<String> = Vec::new();
    let mut question_pages: HashSet<String> = HashSet::new();

    for path in walker.files(root)? {
        let rel = relative_display(&path, root);
        let (file_hits, markers) = scan_file_with_markers(
            &path,
            &compiled,
            Some(&filters::default_review_filter),
            &probe,
        );
        for mut hit in file_hits {
            hit.path = PathBuf::from(rel.clone());
            hits.push(hit);
        }
        if markers.has_cta {
            cta_pages.push(rel.clone());
        }
        if markers.has_question {
            question_pages.insert(rel);
        }
    }

    let missing: Vec<String> = cta_pages
        .into_iter()
        .filter(|page| !question_pages.contains(page))
        .collect();
    info!("Review found {} hits, {} CTA pages without questions.", hits.len(), missing.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cmd.json {
        let mut missing_sorted = missing.clone();
        missing_sorted.sort();
        let doc = super::JsonReport {
            command: "review",
            root: root.display().to_string(),
            total: hits.len(),
            categories: report::category_counts(&hits),
            hits: &hits,
            cta_pages_missing_question: Some(missing_sorted),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        return Ok(if hits.is_empty() { EXIT_CLEAN } else { EXIT_REVIEW_FINDINGS });
    }

    writeln!(out, "{}", "=".repeat(HEADER_RULE_WIDTH))?;
    writeln!(out, "REVIEW: {}", root.display())?;
    writeln!(out, "{}", "=".repeat(HEADER_RULE_WIDTH))?;
    let found = report::write_report(&mut out, &hits, &categories, cmd.show)?;

    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(HEADER_RULE_WIDTH))?;
    writeln!(out, "CTA pages without a reflective question")?;
    writeln!(out, "{}", "=".repeat(HEADER_RULE_WIDTH))?;
    report::write_missing_questions(&mut out, &missing, MISSING_QUESTIONS_CAP)?;

    Ok(if found { EXIT_REVIEW_FINDINGS } else { EXIT_CLEAN })
}
