//! Read-only digest listing for intentionally refreshing a lock file.

use anyhow::{Context, Result};
use pokergrid_contracts::POKERGRID_HASH_REPORT_SCHEMA_VERSION;
use serde_json::Value;

use crate::canonical::canonical_sha256_hex;
use crate::config::HarnessConfig;
use crate::report::{DatasetDigest, HashReport};

pub fn hash_report(cfg: &HarnessConfig) -> Result<HashReport> {
    let mut datasets = Vec::new();
    for dataset in cfg.datasets() {
        let path = cfg.resolve(&dataset.path);
        let bytes = std::fs::read(&path).with_context(|| format!("read: {}", path.display()))?;
        let doc: Value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse JSON: {}", path.display()))?;
        let sha256_hex = canonical_sha256_hex(&doc);

        let lock_sha256_hex = std::fs::read_to_string(cfg.resolve(&dataset.lock_path))
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|digest| cfg.lock_pattern.is_match(digest));
        let matches = lock_sha256_hex.as_deref() == Some(sha256_hex.as_str());
        tracing::debug!(dataset = dataset.name, matches, "hashed dataset");

        datasets.push(DatasetDigest {
            path: dataset.path.clone(),
            lock_path: dataset.lock_path.clone(),
            sha256_hex,
            lock_sha256_hex,
            matches,
        });
    }
    Ok(HashReport {
        schema_version: POKERGRID_HASH_REPORT_SCHEMA_VERSION,
        datasets,
    })
}
