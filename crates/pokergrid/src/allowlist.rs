use std::collections::BTreeSet;

use pokergrid_contracts::SOURCE_ROOT;

use crate::diagnostics::{CheckId, CheckResult, Diagnostic};
use crate::scan::RepoTree;

/// Everything outside the source root must be explicitly allowed. The first
/// offender in sorted order is reported. Returns the number of paths checked.
pub fn check_allowlist(tree: &RepoTree, allowed: &BTreeSet<String>) -> CheckResult<usize> {
    let mut checked = 0usize;
    for path in tree.files() {
        if path.starts_with(SOURCE_ROOT) {
            continue;
        }
        checked += 1;
        if !allowed.contains(path) {
            return Err(Diagnostic::invariant(
                CheckId::Allowlist,
                "E_UNEXPECTED_FILE",
                format!("unexpected file present: {path}"),
            )
            .with_file(path.as_str())
            .into());
        }
    }
    Ok(checked)
}
