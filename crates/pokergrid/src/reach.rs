//! Dead-module detection: every source module must be reachable from the
//! entry through relative imports.

use std::collections::BTreeSet;

use crate::diagnostics::{CheckId, CheckResult, Diagnostic};
use crate::graph::SourceGraph;
use crate::scan::{is_source_path, RepoTree};

/// Iterative DFS from `entry`; cycles are fine. Returns the number of
/// modules visited.
pub fn check_reachability(tree: &RepoTree, graph: &SourceGraph, entry: &str) -> CheckResult<usize> {
    if !is_source_path(entry) || !tree.contains(entry) {
        return Err(Diagnostic::filesystem(
            CheckId::Reachability,
            "E_ENTRY_MISSING",
            format!("entry module not found: {entry}"),
        )
        .with_file(entry)
        .into());
    }

    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut stack: Vec<(&str, Option<&str>)> = vec![(entry, None)];
    while let Some((file, importer)) = stack.pop() {
        if visited.contains(file) {
            continue;
        }
        if !tree.contains(file) {
            let mut diag = Diagnostic::filesystem(
                CheckId::Reachability,
                "E_IMPORT_TARGET_MISSING",
                format!(
                    "imported module not found: {file} (imported by {})",
                    importer.unwrap_or("<entry>")
                ),
            )
            .with_data("target", file);
            if let Some(importer) = importer {
                diag = diag.with_file(importer);
            }
            return Err(diag.into());
        }
        visited.insert(file);
        for edge in graph.edges_of(file) {
            let target = edge.target.as_str();
            if is_source_path(target) && !visited.contains(target) {
                stack.push((target, Some(file)));
            }
        }
    }

    let dead: Vec<&str> = tree
        .source_files()
        .filter(|f| !visited.contains(f))
        .collect();
    if let Some(first) = dead.first() {
        return Err(Diagnostic::invariant(
            CheckId::Reachability,
            "E_DEAD_MODULE",
            format!("dead/unreferenced module: {first}"),
        )
        .with_file(*first)
        .with_data("dead_count", dead.len())
        .with_data(
            "dead_modules",
            dead.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        )
        .into());
    }
    tracing::debug!(reachable = visited.len(), entry, "reachability complete");
    Ok(visited.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(sources: &[(&'static str, &'static str)]) -> (RepoTree, SourceGraph) {
        let tree = RepoTree::from_paths(sources.iter().map(|(p, _)| *p));
        let graph = SourceGraph::from_sources(sources.iter().copied());
        (tree, graph)
    }

    #[test]
    fn all_modules_reached_through_cycle() {
        let (tree, graph) = fixture(&[
            ("src/app/main.js", "import './a.js';"),
            ("src/app/a.js", "import './b.js';"),
            ("src/app/b.js", "import './a.js'; import '../../data/legend.json';"),
        ]);
        assert_eq!(check_reachability(&tree, &graph, "src/app/main.js").expect("ok"), 3);
    }

    #[test]
    fn unreferenced_module_is_dead() {
        let (tree, graph) = fixture(&[
            ("src/app/main.js", "import './a.js';"),
            ("src/app/a.js", ""),
            ("src/ui/orphan.js", ""),
            ("src/core/zombie.js", ""),
        ]);
        let err = check_reachability(&tree, &graph, "src/app/main.js").expect_err("dead");
        assert_eq!(err.code, "E_DEAD_MODULE");
        assert_eq!(err.file.as_deref(), Some("src/core/zombie.js"));
        assert_eq!(err.data["dead_count"], 2);
    }

    #[test]
    fn missing_entry_is_filesystem_error() {
        let (tree, graph) = fixture(&[("src/app/other.js", "")]);
        let err = check_reachability(&tree, &graph, "src/app/main.js").expect_err("missing");
        assert_eq!(err.code, "E_ENTRY_MISSING");
        assert_eq!(err.kind, crate::diagnostics::Kind::Filesystem);
    }

    #[test]
    fn missing_target_names_importer() {
        let (tree, graph) = fixture(&[("src/app/main.js", "import '../ui/gone';")]);
        let err = check_reachability(&tree, &graph, "src/app/main.js").expect_err("missing");
        assert_eq!(err.code, "E_IMPORT_TARGET_MISSING");
        assert_eq!(err.file.as_deref(), Some("src/app/main.js"));
        assert_eq!(err.data["target"], "src/ui/gone.js");
    }
}
