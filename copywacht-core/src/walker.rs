//! walker.rs - File enumeration with scope and ignore rules.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::WalkSpec;
use crate::errors::CopywachtError;

/// Walks a root directory and yields the files a tool should look at.
///
/// Excluded directories are pruned before descent: their contents are never
/// stat'ed or read, so a `node_modules` tree costs nothing. The walk is
/// sorted by file name, which keeps report ordering stable across runs.
#[derive(Debug, Clone)]
pub struct FileWalker {
    include_extensions: HashSet<String>,
    exclude_dirs: HashSet<String>,
    max_size_bytes: u64,
    scope_fragment: Option<String>,
    ignore_fragments: Vec<String>,
}

impl FileWalker {
    pub fn new(spec: &WalkSpec) -> Self {
        Self {
            include_extensions: spec
                .include_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            exclude_dirs: spec.exclude_dirs.iter().cloned().collect(),
            max_size_bytes: spec.max_size_bytes,
            scope_fragment: spec.scope_fragment.clone(),
            ignore_fragments: spec.ignore_fragments.clone(),
        }
    }

    /// Returns a lazy iterator over all matching files under `root`.
    ///
    /// A missing root is a caller error; everything below that degrades to
    /// a per-file skip (unreadable entries, unstat'able sizes).
    pub fn files<'a>(
        &'a self,
        root: &Path,
    ) -> Result<impl Iterator<Item = PathBuf> + 'a, CopywachtError> {
        if !root.exists() {
            return Err(CopywachtError::RootNotFound(root.to_path_buf()));
        }

        let iter = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                !(entry.file_type().is_dir()
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| self.exclude_dirs.contains(name)))
            })
            .filter_map(move |entry| match entry {
                Ok(e) if e.file_type().is_file() => self.admit(e),
                Ok(_) => None,
                Err(err) => {
                    debug!("skipping unreadable entry: {err}");
                    None
                }
            });
        Ok(iter)
    }

    fn admit(&self, entry: walkdir::DirEntry) -> Option<PathBuf> {
        let path = entry.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))?;
        if !self.include_extensions.contains(&ext) {
            return None;
        }

        let normalized = path.to_string_lossy().replace('\\', "/");
        if let Some(scope) = &self.scope_fragment {
            if !normalized.contains(scope.as_str()) {
                return None;
            }
        }
        if self
            .ignore_fragments
            .iter()
            .any(|frag| normalized.contains(frag.as_str()))
        {
            return None;
        }

        match entry.metadata() {
            Ok(meta) if meta.len() <= self.max_size_bytes => Some(path.to_path_buf()),
            Ok(_) => {
                debug!("skipping oversized file: {}", path.display());
                None
            }
            Err(err) => {
                debug!("skipping file without readable size: {}: {err}", path.display());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalkSpec;
    use std::fs;

    fn spec() -> WalkSpec {
        WalkSpec {
            include_extensions: vec![".md".into(), ".mdx".into()],
            exclude_dirs: vec!["node_modules".into()],
            max_size_bytes: 64,
            scope_fragment: None,
            ignore_fragments: vec![],
        }
    }

    fn collect(walker: &FileWalker, root: &Path) -> Vec<String> {
        walker
            .files(root)
            .unwrap()
            .map(|p| {
                p.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn missing_root_is_an_error() {
        let walker = FileWalker::new(&spec());
        let err = walker
            .files(Path::new("/definitely/not/a/real/root"))
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, CopywachtError::RootNotFound(_)));
    }

    #[test]
    fn filters_by_extension_and_prunes_excluded_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page.md"), "tekst").unwrap();
        fs::write(dir.path().join("script.ts"), "code").unwrap();
        fs::create_dir_all(dir.path().join("nested/node_modules/deep")).unwrap();
        fs::write(
            dir.path().join("nested/node_modules/deep/readme.md"),
            "dba-proof",
        )
        .unwrap();
        fs::write(dir.path().join("nested").join("ok.mdx"), "tekst").unwrap();

        let walker = FileWalker::new(&spec());
        let files = collect(&walker, dir.path());
        assert_eq!(files, vec!["nested/ok.mdx", "page.md"]);
    }

    #[test]
    fn size_cap_skips_large_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("small.md"), "klein").unwrap();
        fs::write(dir.path().join("large.md"), "x".repeat(65)).unwrap();

        let walker = FileWalker::new(&spec());
        let files = collect(&walker, dir.path());
        assert_eq!(files, vec!["small.md"]);
    }

    #[test]
    fn scope_and_ignore_fragments_apply() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("app/(site)/content/blog")).unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("app/(site)/home.md"), "tekst").unwrap();
        fs::write(dir.path().join("app/(site)/content/blog/post.md"), "tekst").unwrap();
        fs::write(dir.path().join("docs/out-of-scope.md"), "tekst").unwrap();

        let mut spec = spec();
        spec.scope_fragment = Some("app/(site)".into());
        spec.ignore_fragments = vec!["content/blog".into()];
        let walker = FileWalker::new(&spec);
        let files = collect(&walker, dir.path());
        assert_eq!(files, vec!["app/(site)/home.md"]);
    }

    #[test]
    fn walk_is_restartable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.md"), "eerste").unwrap();
        fs::write(dir.path().join("b.md"), "tweede").unwrap();

        let walker = FileWalker::new(&spec());
        let first = collect(&walker, dir.path());
        let second = collect(&walker, dir.path());
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
