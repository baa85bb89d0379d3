use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

use crate::diagnostics::{CheckId, Diagnostic};
use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "kebab_case")]
pub enum ReportFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

impl CheckStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::Passed => "passed",
            CheckStatus::Failed => "failed",
            CheckStatus::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub id: CheckId,
    pub status: CheckStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckStats {
    pub files: usize,
    pub source_files: usize,
    pub import_edges: usize,
    pub reachable: usize,
    pub actions: usize,
    pub records: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub schema_version: &'static str,
    pub ok: bool,
    pub repo_root: String,
    pub entry: String,
    pub checks: Vec<CheckOutcome>,
    pub stats: CheckStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<Diagnostic>,
}

impl CheckReport {
    pub fn exit_code(&self) -> u8 {
        self.diagnostic.as_ref().map_or(0, Diagnostic::exit_code)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("ok: {}\n", self.ok));
        out.push_str(&format!("repo_root: {}\n", self.repo_root));
        let s = &self.stats;
        out.push_str(&format!(
            "stats: files={} source_files={} import_edges={} reachable={} actions={} records={}\n",
            s.files, s.source_files, s.import_edges, s.reachable, s.actions, s.records
        ));
        for c in &self.checks {
            out.push_str(&format!("check {}: {}\n", c.id, c.status.as_str()));
        }
        if let Some(d) = &self.diagnostic {
            out.push_str(&format!("{d}\n"));
        }
        out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetDigest {
    pub path: String,
    pub lock_path: String,
    pub sha256_hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_sha256_hex: Option<String>,
    pub matches: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HashReport {
    pub schema_version: &'static str,
    pub datasets: Vec<DatasetDigest>,
}

impl HashReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for d in &self.datasets {
            out.push_str(&format!("{}  {}\n", d.sha256_hex, d.path));
            match &d.lock_sha256_hex {
                Some(_) if d.matches => out.push_str(&format!("  lock {}: ok\n", d.lock_path)),
                Some(lock) => out.push_str(&format!("  lock {}: {lock} (stale)\n", d.lock_path)),
                None => out.push_str(&format!("  lock {}: missing or malformed\n", d.lock_path)),
            }
        }
        out
    }
}

/// Pretty JSON with sorted object keys and a trailing newline.
pub fn canonical_pretty_json_bytes(v: &Value) -> Result<Vec<u8>> {
    let mut out = serde_json::to_vec_pretty(v)?;
    if out.last() != Some(&b'\n') {
        out.push(b'\n');
    }
    Ok(out)
}

/// Writes a report to `out_path` (atomically) or stdout.
pub fn emit(out_path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match out_path {
        Some(path) => util::write_atomic(path, bytes)
            .with_context(|| format!("write report: {}", path.display())),
        None => {
            std::io::Write::write_all(&mut std::io::stdout(), bytes).context("write stdout")
        }
    }
}

pub fn render<T: Serialize>(
    format: ReportFormat,
    report: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<Vec<u8>> {
    match format {
        ReportFormat::Json => canonical_pretty_json_bytes(&serde_json::to_value(report)?),
        ReportFormat::Text => Ok(text(report).into_bytes()),
    }
}
