// copywacht/src/commands/audit.rs
//! Policy audit: scan the site-copy scope and report hits per category.

use anyhow::Result;
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use copywacht_core::{
    compile_categories, report, scan_file, select_categories, FileWalker, GuardConfig, Hit,
};

use super::{relative_display, EXIT_AUDIT_FINDINGS, EXIT_CLEAN, HEADER_RULE_WIDTH};
use crate::cli::AuditCommand;

pub fn run_audit(config: &GuardConfig, root: &Path, cmd: &AuditCommand) -> Result<i32> {
    info!("Starting audit of {}", root.display());

    let categories = select_categories(&config.audit.categories, cmd.only.as_deref());
    let compiled = compile_categories(&categories)?;
    let walker = FileWalker::new(&config.audit.walk);

    let mut hits: Vec<Hit> = Vec::new();
    let mut files_scanned = 0usize;
    for path in walker.files(root)? {
        files_scanned += 1;
        for mut hit in scan_file(&path, &compiled, None) {
            hit.path = PathBuf::from(relative_display(&hit.path, root));
            hits.push(hit);
        }
    }
    info!("Audit scanned {files_scanned} files, {} hits.", hits.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cmd.json {
        let doc = super::JsonReport {
            command: "audit",
            root: root.display().to_string(),
            total: hits.len(),
            categories: report::category_counts(&hits),
            hits: &hits,
            cta_pages_missing_question: None,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        return Ok(if hits.is_empty() { EXIT_CLEAN } else { EXIT_AUDIT_FINDINGS });
    }

    writeln!(out, "{}", "=".repeat(HEADER_RULE_WIDTH))?;
    writeln!(out, "AUDIT: {}", root.display())?;
    writeln!(out, "{}", "=".repeat(HEADER_RULE_WIDTH))?;
    let found = report::write_report(&mut out, &hits, &categories, cmd.show)?;

    Ok(if found { EXIT_AUDIT_FINDINGS } else { EXIT_CLEAN })
}
