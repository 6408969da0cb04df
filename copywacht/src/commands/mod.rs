// copywacht/src/commands/mod.rs
//! Per-subcommand runners and the exit-code contract.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use copywacht_core::Hit;

pub mod audit;
pub mod funnel;
pub mod review;
pub mod rewrite;

/// Document emitted by `--json` on the scan commands.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub command: &'static str,
    pub root: String,
    pub total: usize,
    pub categories: BTreeMap<String, usize>,
    pub hits: &'a [Hit],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_pages_missing_question: Option<Vec<String>>,
}

/// Exit codes are a contract with external tooling (CI gates on them) and
/// are stable per subcommand.
pub const EXIT_CLEAN: i32 = 0;
pub const EXIT_CONFIG: i32 = 1;
pub const EXIT_AUDIT_FINDINGS: i32 = 2;
pub const EXIT_FUNNEL_HARD: i32 = 3;
pub const EXIT_REVIEW_FINDINGS: i32 = 4;

/// Width of the `===`/`---` section rules in text reports.
pub(crate) const HEADER_RULE_WIDTH: usize = 90;

/// Renders a path relative to the scan root, with forward slashes.
pub(crate) fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
