//! POSIX-style path arithmetic on repo-relative strings.

/// Collapses `.` and `..` segments and repeated separators. A relative path
/// that climbs above its start keeps its leading `..` segments.
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            _ => parts.push(seg),
        }
    }
    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Directory part of a relative path; `.` for a bare file name.
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => ".",
    }
}

pub fn join(dir: &str, rel: &str) -> String {
    if rel.starts_with('/') {
        return normalize(rel);
    }
    normalize(&format!("{dir}/{rel}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_dot_segments() {
        assert_eq!(normalize("src/app/./../core/grid.js"), "src/core/grid.js");
        assert_eq!(normalize("src//ui/view.js"), "src/ui/view.js");
        assert_eq!(normalize("./"), ".");
    }

    #[test]
    fn normalize_keeps_escaping_parents() {
        assert_eq!(normalize("src/../../data/x.json"), "../data/x.json");
        assert_eq!(normalize("../../a"), "../../a");
        assert_eq!(normalize("/../a"), "/a");
    }

    #[test]
    fn join_resolves_against_importer_directory() {
        assert_eq!(
            join(dirname("src/adapters/resolveActiveGrid.js"), "../../data/scenarios.json"),
            "data/scenarios.json"
        );
        assert_eq!(join(dirname("main.js"), "./util.js"), "util.js");
    }
}
