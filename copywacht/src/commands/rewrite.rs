// copywacht/src/commands/rewrite.rs
//! Shared runner for the `apply` and `soften` replacement passes.

use anyhow::{anyhow, Result};
use log::info;
use std::io::{self, Write};
use std::path::Path;

use copywacht_core::{apply_pass, compile_replacements, FileWalker, GuardConfig};

use super::{relative_display, EXIT_CLEAN};
use crate::ui::output;

pub const TERMINOLOGY_PASS: &str = "terminology";
pub const SOFTEN_PASS: &str = "soften";

pub fn run_rewrite(
    config: &GuardConfig,
    root: &Path,
    pass_name: &str,
    dry_run: bool,
    quiet: bool,
) -> Result<i32> {
    let pass = config
        .rewrite
        .passes
        .iter()
        .find(|p| p.name == pass_name)
        .ok_or_else(|| anyhow!("rewrite pass '{pass_name}' is not defined in the rule set"))?;

    info!("Starting {} pass on {} (dry_run: {dry_run})", pass.name, root.display());
    let replacements = compile_replacements(&pass.rules, &pass.name)?;
    let walker = FileWalker::new(&config.rewrite.walk);
    let changed = apply_pass(root, &walker, &replacements, &pass.backup_suffix, dry_run)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for path in &changed {
        writeln!(out, "{}", relative_display(path, root))?;
    }
    drop(out);

    if !quiet {
        if dry_run {
            output::info_msg(format!(
                "{} pass: {} file(s) would change (dry-run, nothing written)",
                pass.name,
                changed.len()
            ));
        } else {
            output::info_msg(format!(
                "{} pass: {} file(s) rewritten (backups: *{})",
                pass.name,
                changed.len(),
                pass.backup_suffix
            ));
        }
    }

    Ok(EXIT_CLEAN)
}
