//! funnel.rs - Soft-versus-hard language tally for funnel pages.
//!
//! Counts lines matching the "soft" (tentative) pattern group and lines
//! matching the "hard" (absolute claim) group across the scanned tree.
//! Nothing is mutated; any hard hit is a failure signal regardless of the
//! soft count.
//!
//! License: MIT OR Apache-2.0

use regex::Regex;
use std::path::Path;

use crate::errors::CopywachtError;
use crate::scanner::read_lossy;
use crate::walker::FileWalker;

/// Line counts for both funnel pattern groups.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FunnelTally {
    pub soft: usize,
    pub hard: usize,
}

impl FunnelTally {
    /// The funnel check passes only when no hard-claim line exists.
    pub fn passed(&self) -> bool {
        self.hard == 0
    }
}

/// Scans the tree under `root` and tallies soft and hard lines. A line
/// counts at most once per group, however many patterns in the group match.
pub fn funnel_check(
    root: &Path,
    walker: &FileWalker,
    soft: &[Regex],
    hard: &[Regex],
) -> Result<FunnelTally, CopywachtError> {
    let mut tally = FunnelTally::default();

    for path in walker.files(root)? {
        let Some(text) = read_lossy(&path) else {
            continue;
        };
        for line in text.lines() {
            if soft.iter().any(|re| re.is_match(line)) {
                tally.soft += 1;
            }
            if hard.iter().any(|re| re.is_match(line)) {
                tally.hard += 1;
            }
        }
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_pattern_group;
    use crate::config::WalkSpec;
    use std::fs;

    fn walker() -> FileWalker {
        FileWalker::new(&WalkSpec {
            include_extensions: vec![".md".into()],
            exclude_dirs: vec![],
            max_size_bytes: 1024 * 1024,
            scope_fragment: None,
            ignore_fragments: vec![],
        })
    }

    fn groups() -> (Vec<Regex>, Vec<Regex>) {
        let soft = compile_pattern_group(
            &[r"\bin\s+ontwikkeling\b".into(), r"\bconcept\b".into()],
            "soft",
        )
        .unwrap();
        let hard =
            compile_pattern_group(&[r"\bDBA[-\s]?proof\b".into(), r"\bbouw\s+mee\b".into()], "hard")
                .unwrap();
        (soft, hard)
    }

    #[test]
    fn soft_only_tree_passes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("page.md"),
            "Het platform is in ontwikkeling.\nEen concept, meer niet.\n",
        )
        .unwrap();

        let (soft, hard) = groups();
        let tally = funnel_check(dir.path(), &walker(), &soft, &hard).unwrap();
        assert_eq!(tally, FunnelTally { soft: 2, hard: 0 });
        assert!(tally.passed());
    }

    #[test]
    fn adding_a_hard_line_flips_the_status() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.md");
        fs::write(&page, "Het platform is in ontwikkeling.\n").unwrap();

        let (soft, hard) = groups();
        assert!(funnel_check(dir.path(), &walker(), &soft, &hard)
            .unwrap()
            .passed());

        fs::write(&page, "Het platform is in ontwikkeling.\nWij zijn DBA-proof.\n").unwrap();
        let tally = funnel_check(dir.path(), &walker(), &soft, &hard).unwrap();
        assert_eq!(tally.hard, 1);
        assert!(!tally.passed());

        fs::write(&page, "Het platform is in ontwikkeling.\n").unwrap();
        assert!(funnel_check(dir.path(), &walker(), &soft, &hard)
            .unwrap()
            .passed());
    }

    #[test]
    fn a_line_counts_once_per_group() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("page.md"),
            "Een concept in ontwikkeling.\n",
        )
        .unwrap();

        let (soft, hard) = groups();
        let tally = funnel_check(dir.path(), &walker(), &soft, &hard).unwrap();
        assert_eq!(tally.soft, 1);
    }
}
