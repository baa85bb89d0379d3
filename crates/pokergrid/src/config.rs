use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pokergrid_contracts::{
    ALLOWED_PATHS, ENTRY_PATH, LEGEND_LOCK_PATH, LEGEND_PATH, SCENARIOS_LOCK_PATH,
    SCENARIOS_PATH,
};
use regex::Regex;

use crate::paths;

/// Lock files hold exactly one lowercase SHA-256 hex digest.
pub const LOCK_PATTERN: &str = "^[0-9a-f]{64}$";

/// A hashed dataset and its sibling lock file, both repo-relative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub name: &'static str,
    pub path: String,
    pub lock_path: String,
}

/// Everything a run needs, resolved once from the fixed layout and the
/// command line.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub repo_root: PathBuf,
    pub entry: String,
    pub legend: Dataset,
    pub scenarios: Dataset,
    pub allowed_paths: BTreeSet<String>,
    pub lock_pattern: Regex,
}

impl HarnessConfig {
    pub fn new(repo_root: &Path) -> Result<Self> {
        let lock_pattern = Regex::new(LOCK_PATTERN).context("compile lock pattern")?;
        Ok(Self {
            repo_root: repo_root.to_path_buf(),
            entry: ENTRY_PATH.to_string(),
            legend: Dataset {
                name: "legend",
                path: LEGEND_PATH.to_string(),
                lock_path: LEGEND_LOCK_PATH.to_string(),
            },
            scenarios: Dataset {
                name: "scenarios",
                path: SCENARIOS_PATH.to_string(),
                lock_path: SCENARIOS_LOCK_PATH.to_string(),
            },
            allowed_paths: ALLOWED_PATHS.iter().map(|p| p.to_string()).collect(),
            lock_pattern,
        })
    }

    pub fn with_entry(mut self, entry: &str) -> Self {
        let entry = entry.replace('\\', "/");
        self.entry = paths::normalize(&entry);
        self
    }

    pub fn datasets(&self) -> [&Dataset; 2] {
        [&self.legend, &self.scenarios]
    }

    pub fn resolve(&self, rel: &str) -> PathBuf {
        self.repo_root.join(rel)
    }
}
