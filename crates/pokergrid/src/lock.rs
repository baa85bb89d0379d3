//! Hash-lock verification of the canonical dataset digests.

use serde_json::Value;

use crate::canonical::canonical_sha256_hex;
use crate::config::{Dataset, HarnessConfig};
use crate::diagnostics::{CheckId, CheckResult, Diagnostic};

/// Reads a lock file and checks its trimmed content is a lowercase digest.
pub fn read_lock(cfg: &HarnessConfig, dataset: &Dataset) -> CheckResult<String> {
    let check = CheckId::HashLock;
    let raw = std::fs::read_to_string(cfg.resolve(&dataset.lock_path)).map_err(|err| {
        Diagnostic::filesystem(check, "E_LOCK_READ", format!("read lock file: {err}"))
            .with_file(dataset.lock_path.as_str())
    })?;
    let digest = raw.trim();
    if !cfg.lock_pattern.is_match(digest) {
        return Err(Diagnostic::schema(
            check,
            "E_LOCK_MALFORMED",
            format!(
                "lock file malformed: {} must hold one lowercase sha256 hex digest",
                dataset.lock_path
            ),
        )
        .with_file(dataset.lock_path.as_str())
        .into());
    }
    Ok(digest.to_string())
}

/// Compares the dataset's canonical digest with its lock. Returns the digest.
pub fn verify_lock(cfg: &HarnessConfig, dataset: &Dataset, doc: &Value) -> CheckResult<String> {
    let expected = read_lock(cfg, dataset)?;
    let actual = canonical_sha256_hex(doc);
    if expected != actual {
        return Err(Diagnostic::invariant(
            CheckId::HashLock,
            "E_HASH_MISMATCH",
            format!(
                "hash mismatch for {}: update {} only if the change is intentional",
                dataset.path, dataset.lock_path
            ),
        )
        .with_file(dataset.path.as_str())
        .with_data("lock_path", dataset.lock_path.as_str())
        .with_data("expected", expected)
        .with_data("actual", actual)
        .into());
    }
    tracing::debug!(dataset = dataset.name, digest = %actual, "lock matches");
    Ok(actual)
}
