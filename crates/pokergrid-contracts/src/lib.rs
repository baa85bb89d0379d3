//! Shared, version-pinned identifiers and the fixed repository layout.
//!
//! These constants are the single source of truth for schema/version strings that
//! appear in machine-readable output, and for the paths the conformance checks
//! treat as fixed configuration.

pub const POKERGRID_CHECK_REPORT_SCHEMA_VERSION: &str = "pokergrid.check.report@0.1.0";
pub const POKERGRID_HASH_REPORT_SCHEMA_VERSION: &str = "pokergrid.hash.report@0.1.0";

pub const LEGEND_PATH: &str = "data/legend.json";
pub const LEGEND_LOCK_PATH: &str = "data/legend.sha256";
pub const SCENARIOS_PATH: &str = "data/scenarios.json";
pub const SCENARIOS_LOCK_PATH: &str = "data/scenarios.sha256";

/// Browser entrypoint; every source module must be reachable from it.
pub const ENTRY_PATH: &str = "src/app/main.js";

pub const SOURCE_ROOT: &str = "src/";
pub const SOURCE_EXTENSION: &str = ".js";

/// Import targets already ending in one of these are not given [`SOURCE_EXTENSION`].
pub const RECOGNIZED_EXTENSIONS: &[&str] = &[".js", ".json"];

/// Non-source paths permitted to exist in the tree. Anything else outside
/// [`SOURCE_ROOT`] is artifact creep.
pub const ALLOWED_PATHS: &[&str] = &[
    ".gitignore",
    "AGENTS.md",
    "README.md",
    "index.html",
    "app_v1.html",
    "package.json",
    "data/legend.json",
    "data/legend.sha256",
    "data/scenarios.json",
    "data/scenarios.sha256",
    "docs/ACCEPTANCETESTSV1.md",
    "docs/ARCHBLUEPRINTV1.md",
    "docs/DATASPECV1.md",
    "docs/INTENTLOCKV1.md",
    "docs/MODULECONTRACTSV1.md",
    "docs/POKERENGINE_MASTERSSOTV015.docx",
    "tests/run_tests.js",
];

/// Directories pruned by the scanner (dependency caches, VCS metadata).
pub const SCAN_EXCLUDE_GLOBS: &[&str] = &["**/node_modules", "**/.git"];

/// OS artifact files ignored at any depth.
pub const SCAN_IGNORED_FILE_GLOBS: &[&str] = &["**/.DS_Store", "**/._*", "**/Thumbs.db"];
