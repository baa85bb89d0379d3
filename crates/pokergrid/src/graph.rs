//! Import edges of every source module, resolved to repo-relative targets.

use std::collections::BTreeMap;
use std::path::Path;

use pokergrid_contracts::{RECOGNIZED_EXTENSIONS, SOURCE_EXTENSION};

use crate::diagnostics::{CheckId, CheckResult, Diagnostic};
use crate::imports::{is_relative, scan_imports};
use crate::layers::Layer;
use crate::paths;
use crate::scan::RepoTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    pub specifier: String,
    pub target: String,
    pub target_layer: Layer,
}

/// Joins a relative specifier onto the importer's directory and appends the
/// source extension unless the target already names a recognized one.
pub fn resolve_import(importer: &str, specifier: &str) -> String {
    let target = paths::join(paths::dirname(importer), specifier);
    if RECOGNIZED_EXTENSIONS.iter().any(|ext| target.ends_with(ext)) {
        target
    } else {
        format!("{target}{SOURCE_EXTENSION}")
    }
}

pub fn import_edges(importer: &str, source: &str) -> Vec<ImportEdge> {
    scan_imports(source)
        .into_iter()
        .filter(|spec| is_relative(spec))
        .map(|specifier| {
            let target = resolve_import(importer, &specifier);
            let target_layer = Layer::classify(&target);
            ImportEdge {
                specifier,
                target,
                target_layer,
            }
        })
        .collect()
}

/// Outgoing edges keyed by source module, in sorted path order.
#[derive(Debug, Clone, Default)]
pub struct SourceGraph {
    edges: BTreeMap<String, Vec<ImportEdge>>,
}

impl SourceGraph {
    /// Reads every source module in the tree once.
    pub fn load(repo_root: &Path, tree: &RepoTree, check: CheckId) -> CheckResult<Self> {
        let mut edges = BTreeMap::new();
        for rel in tree.source_files() {
            let path = repo_root.join(rel);
            let text = std::fs::read_to_string(&path).map_err(|err| {
                Diagnostic::filesystem(check, "E_SOURCE_READ", format!("read source: {err}"))
                    .with_file(rel)
            })?;
            edges.insert(rel.to_string(), import_edges(rel, &text));
        }
        let graph = Self { edges };
        tracing::debug!(
            sources = graph.edges.len(),
            edges = graph.edge_count(),
            "loaded source graph"
        );
        Ok(graph)
    }

    pub fn from_sources<'s>(sources: impl IntoIterator<Item = (&'s str, &'s str)>) -> Self {
        let edges = sources
            .into_iter()
            .map(|(rel, text)| (rel.to_string(), import_edges(rel, text)))
            .collect();
        Self { edges }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ImportEdge])> {
        self.edges.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn edges_of(&self, source: &str) -> &[ImportEdge] {
        self.edges.get(source).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }
}
