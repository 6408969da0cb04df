//! scanner.rs - Line-oriented matching of compiled rules against file text.
//!
//! Files are decoded best-effort: bytes that are not valid UTF-8 are replaced,
//! never fatal. Matching runs against the raw line; the recorded line text is
//! trimmed for display. Hit order is stable: lines ascending, rules in
//! declaration order within a line.
//!
//! License: MIT OR Apache-2.0

use log::warn;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::compiler::{compile_pattern_group, CompiledRules};
use crate::config::MarkerSpec;
use crate::errors::CopywachtError;

/// A single (rule, location) match recorded during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hit {
    pub category_id: String,
    pub pattern: String,
    pub path: PathBuf,
    /// 1-based line number.
    pub line_number: usize,
    /// The matched line, trimmed for display.
    pub line: String,
}

/// Per-file booleans collected in the same pass as the hits.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileMarkers {
    pub has_cta: bool,
    pub has_question: bool,
}

/// Compiled marker patterns for the call-to-action / reflective-question
/// cross-file aggregate.
#[derive(Debug)]
pub struct MarkerProbe {
    cta: Vec<Regex>,
    reflective_question: Vec<Regex>,
}

impl MarkerProbe {
    pub fn from_spec(spec: &MarkerSpec) -> Result<Self, CopywachtError> {
        Ok(Self {
            cta: compile_pattern_group(&spec.cta, "markers.cta")?,
            reflective_question: compile_pattern_group(
                &spec.reflective_question,
                "markers.reflective_question",
            )?,
        })
    }

    fn observe(&self, line: &str, markers: &mut FileMarkers) {
        if !markers.has_cta && self.cta.iter().any(|re| re.is_match(line)) {
            markers.has_cta = true;
        }
        if !markers.has_question && self.reflective_question.iter().any(|re| re.is_match(line)) {
            markers.has_question = true;
        }
    }
}

/// Reads a file as text, replacing undecodable bytes. Read failures are
/// logged and yield `None`; the caller skips the file and the run continues.
pub fn read_lossy(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(err) => {
            warn!("skipping unreadable file {}: {err}", path.display());
            None
        }
    }
}

/// Scans one file and returns its hits in stable order.
///
/// `suppress` is an optional line-level predicate: lines for which it returns
/// `true` are excluded from scanning entirely, before any rule runs.
pub fn scan_file(
    path: &Path,
    rules: &CompiledRules,
    suppress: Option<&dyn Fn(&str) -> bool>,
) -> Vec<Hit> {
    match read_lossy(path) {
        Some(text) => scan_text(path, &text, rules, suppress, None).0,
        None => Vec::new(),
    }
}

/// Like [`scan_file`], but also evaluates the marker probe per line.
pub fn scan_file_with_markers(
    path: &Path,
    rules: &CompiledRules,
    suppress: Option<&dyn Fn(&str) -> bool>,
    probe: &MarkerProbe,
) -> (Vec<Hit>, FileMarkers) {
    match read_lossy(path) {
        Some(text) => scan_text(path, &text, rules, suppress, Some(probe)),
        None => (Vec::new(), FileMarkers::default()),
    }
}

fn scan_text(
    path: &Path,
    text: &str,
    rules: &CompiledRules,
    suppress: Option<&dyn Fn(&str) -> bool>,
    probe: Option<&MarkerProbe>,
) -> (Vec<Hit>, FileMarkers) {
    let mut hits = Vec::new();
    let mut markers = FileMarkers::default();

    for (idx, raw) in text.lines().enumerate() {
        if let Some(pred) = suppress {
            if pred(raw) {
                continue;
            }
        }
        if let Some(probe) = probe {
            probe.observe(raw, &mut markers);
        }
        for rule in &rules.rules {
            if rule.regex.is_match(raw) {
                hits.push(Hit {
                    category_id: rule.category_id.clone(),
                    pattern: rule.raw_pattern.clone(),
                    path: path.to_path_buf(),
                    line_number: idx + 1,
                    line: raw.trim().to_string(),
                });
            }
        }
    }

    (hits, markers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_categories;
    use crate::config::CategorySpec;
    use std::io::Write;

    fn rules(patterns: &[(&str, &str)]) -> CompiledRules {
        let categories: Vec<CategorySpec> = patterns
            .iter()
            .map(|(id, pattern)| CategorySpec {
                id: id.to_string(),
                label: id.to_string(),
                summary_only: false,
                patterns: vec![pattern.to_string()],
            })
            .collect();
        compile_categories(&categories).unwrap()
    }

    #[test]
    fn hits_are_ordered_by_line_then_rule_declaration() {
        let rules = rules(&[("first", "aaa"), ("second", "bbb")]);
        let text = "bbb en aaa\nniets\naaa";
        let (hits, _) = scan_text(Path::new("t.md"), text, &rules, None, None);
        let seen: Vec<(usize, &str)> = hits
            .iter()
            .map(|h| (h.line_number, h.category_id.as_str()))
            .collect();
        assert_eq!(seen, vec![(1, "first"), (1, "second"), (3, "first")]);
    }

    #[test]
    fn matching_sees_raw_line_but_reports_trimmed_text() {
        let rules = rules(&[("trailing", r"einde\s+$")]);
        let text = "de zin heeft een einde   \n";
        let (hits, _) = scan_text(Path::new("t.md"), text, &rules, None, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line, "de zin heeft een einde");
    }

    #[test]
    fn suppressed_lines_are_never_scanned() {
        let rules = rules(&[("claim", "garantie")]);
        let text = "// garantie in commentaar\ngarantie in tekst";
        let suppress = |line: &str| line.trim_start().starts_with("//");
        let (hits, _) = scan_text(Path::new("t.md"), text, &rules, Some(&suppress), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line_number, 2);
    }

    #[test]
    fn marker_probe_tracks_cta_and_question_per_file() {
        let rules = rules(&[("none", "xyzzy")]);
        let probe = MarkerProbe::from_spec(&MarkerSpec {
            cta: vec![r"\bmeld\s+je\s+aan\b".into()],
            reflective_question: vec![r"\?\s*$".into()],
        })
        .unwrap();
        let text = "Meld je aan voor de lijst\nWat kies jij zelf?";
        let (_, markers) = scan_text(Path::new("t.md"), text, &rules, None, Some(&probe));
        assert!(markers.has_cta);
        assert!(markers.has_question);

        let (_, markers) = scan_text(Path::new("t.md"), "Meld je aan", &rules, None, Some(&probe));
        assert!(markers.has_cta);
        assert!(!markers.has_question);
    }

    #[test_log::test]
    fn invalid_utf8_is_decoded_lossily_not_fatally() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.md");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"geldige regel met garantie\n\xFF\xFE rommel\n")
            .unwrap();

        let rules = rules(&[("claim", "garantie")]);
        let hits = scan_file(&path, &rules, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].line_number, 1);
    }

    #[test]
    fn unreadable_file_yields_no_hits() {
        let rules = rules(&[("claim", "garantie")]);
        let hits = scan_file(Path::new("/no/such/file.md"), &rules, None);
        assert!(hits.is_empty());
    }
}
