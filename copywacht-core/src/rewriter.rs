//! rewriter.rs - In-place replacement passes with single-level backups.
//!
//! For every enumerated file the replacements are applied in list order over
//! the full text; later rules see the output of earlier ones. Unchanged files
//! are left untouched. Changed files get a backup copy first: the copy must
//! complete before the overwrite begins, so an interrupted run never loses
//! the original.
//!
//! License: MIT OR Apache-2.0

use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::compiler::CompiledReplacement;
use crate::errors::CopywachtError;
use crate::scanner::read_lossy;
use crate::walker::FileWalker;

/// Applies one rewrite pass under `root`. Returns the changed paths in walk
/// order. In dry-run mode the comparison and reporting happen but nothing is
/// written, not even backups.
pub fn apply_pass(
    root: &Path,
    walker: &FileWalker,
    replacements: &[CompiledReplacement],
    backup_suffix: &str,
    dry_run: bool,
) -> Result<Vec<PathBuf>, CopywachtError> {
    let mut changed = Vec::new();

    for path in walker.files(root)? {
        let Some(original) = read_lossy(&path) else {
            continue;
        };
        let rewritten = rewrite_text(&original, replacements);
        if rewritten == original {
            continue;
        }

        if !dry_run {
            let backup = backup_path(&path, backup_suffix);
            if let Err(err) = fs::copy(&path, &backup) {
                warn!(
                    "skipping {}: could not write backup {}: {err}",
                    path.display(),
                    backup.display()
                );
                continue;
            }
            if let Err(err) = fs::write(&path, &rewritten) {
                warn!("failed to rewrite {}: {err}", path.display());
                continue;
            }
            info!("rewrote {} (backup at {})", path.display(), backup.display());
        }
        changed.push(path);
    }

    Ok(changed)
}

/// Applies every replacement in order and returns the resulting text.
pub fn rewrite_text(text: &str, replacements: &[CompiledReplacement]) -> String {
    let mut current = text.to_string();
    for replacement in replacements {
        if replacement.regex.is_match(&current) {
            current = replacement
                .regex
                .replace_all(&current, replacement.replace_with.as_str())
                .into_owned();
        }
    }
    current
}

fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_replacements;
    use crate::config::{ReplacementSpec, WalkSpec};
    use std::fs;

    fn replacements(rules: &[(&str, &str)]) -> Vec<CompiledReplacement> {
        let specs: Vec<ReplacementSpec> = rules
            .iter()
            .map(|(pattern, replace_with)| ReplacementSpec {
                pattern: pattern.to_string(),
                replace_with: replace_with.to_string(),
            })
            .collect();
        compile_replacements(&specs, "test").unwrap()
    }

    fn walker() -> FileWalker {
        FileWalker::new(&WalkSpec {
            include_extensions: vec![".md".into()],
            exclude_dirs: vec![],
            max_size_bytes: 1024 * 1024,
            scope_fragment: None,
            ignore_fragments: vec![],
        })
    }

    #[test]
    fn replacements_apply_in_list_order() {
        let reps = replacements(&[("aaa", "bbb"), ("bbb", "ccc")]);
        // The second rule sees the first rule's output.
        assert_eq!(rewrite_text("aaa", &reps), "ccc");
    }

    #[test]
    fn changed_file_gets_backup_before_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("copy.md");
        fs::write(&file, "Wij garanderen 100% DBA-proof werken").unwrap();

        let reps = replacements(&[(r"\bDBA[-\s]?proof\b", "DBA-bewust")]);
        let changed = apply_pass(dir.path(), &walker(), &reps, ".bak", false).unwrap();

        assert_eq!(changed, vec![file.clone()]);
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "Wij garanderen 100% DBA-bewust werken"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("copy.md.bak")).unwrap(),
            "Wij garanderen 100% DBA-proof werken"
        );
    }

    #[test]
    fn unchanged_files_get_no_backup() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clean.md");
        fs::write(&file, "niets te vervangen").unwrap();

        let reps = replacements(&[(r"\bDBA[-\s]?proof\b", "DBA-bewust")]);
        let changed = apply_pass(dir.path(), &walker(), &reps, ".bak", false).unwrap();

        assert!(changed.is_empty());
        assert!(!dir.path().join("clean.md.bak").exists());
    }

    #[test]
    fn dry_run_reports_but_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("copy.md");
        fs::write(&file, "DBA-proof").unwrap();

        let reps = replacements(&[(r"\bDBA[-\s]?proof\b", "DBA-bewust")]);
        let changed = apply_pass(dir.path(), &walker(), &reps, ".bak", true).unwrap();

        assert_eq!(changed.len(), 1);
        assert_eq!(fs::read_to_string(&file).unwrap(), "DBA-proof");
        assert!(!dir.path().join("copy.md.bak").exists());
    }

    #[test]
    fn second_pass_over_rewritten_tree_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("copy.md");
        fs::write(&file, "DBA-proof en gezag").unwrap();

        let reps = replacements(&[
            (r"\bDBA[-\s]?proof\b", "DBA-bewust"),
            (r"\bgezag\b", "rolverdeling"),
        ]);
        let first = apply_pass(dir.path(), &walker(), &reps, ".bak", false).unwrap();
        assert_eq!(first.len(), 1);
        let after_first = fs::read_to_string(&file).unwrap();

        let second = apply_pass(dir.path(), &walker(), &reps, ".bak", false).unwrap();
        assert!(second.is_empty());
        assert_eq!(fs::read_to_string(&file).unwrap(), after_first);
    }
}
