//! Repository file enumeration.

use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use pokergrid_contracts::{
    SCAN_EXCLUDE_GLOBS, SCAN_IGNORED_FILE_GLOBS, SOURCE_EXTENSION, SOURCE_ROOT,
};
use walkdir::WalkDir;

use crate::util::display_relpath;

/// Sorted, repo-relative, forward-slash paths of every file in the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoTree {
    files: Vec<String>,
}

impl RepoTree {
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<String> = paths.into_iter().map(Into::into).collect();
        files.sort();
        files.dedup();
        Self { files }
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files
            .binary_search_by(|probe| probe.as_str().cmp(path))
            .is_ok()
    }

    pub fn source_files(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .map(String::as_str)
            .filter(|p| is_source_path(p))
    }
}

/// A module the import graph covers: under the source root with the source
/// extension.
pub fn is_source_path(path: &str) -> bool {
    path.starts_with(SOURCE_ROOT) && path.ends_with(SOURCE_EXTENSION)
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).with_context(|| format!("invalid glob: {pat}"))?);
    }
    builder.build().context("build globset")
}

/// Walks `root` without following symlinks. Excluded directories are pruned
/// rather than filtered so their contents are never read.
pub fn scan_repo(root: &Path) -> Result<RepoTree> {
    let pruned = build_globset(SCAN_EXCLUDE_GLOBS)?;
    let ignored = build_globset(SCAN_IGNORED_FILE_GLOBS)?;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let rel = e.path().strip_prefix(root).unwrap_or(e.path());
            !pruned.is_match(rel)
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("walk repo: {}", root.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let rel = display_relpath(root, entry.path());
        if ignored.is_match(&rel) {
            continue;
        }
        files.push(rel);
    }
    tracing::debug!(root = %root.display(), files = files.len(), "scanned repository");
    Ok(RepoTree::from_paths(files))
}
