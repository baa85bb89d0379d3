//! The fail-fast conformance run: a fixed table of check units over one
//! shared session.

use std::time::Instant;

use pokergrid_contracts::POKERGRID_CHECK_REPORT_SCHEMA_VERSION;
use serde_json::Value;

use crate::allowlist::check_allowlist;
use crate::config::HarnessConfig;
use crate::diagnostics::{CheckId, CheckResult, Diagnostic};
use crate::graph::SourceGraph;
use crate::layers::check_layers;
use crate::lock::verify_lock;
use crate::reach::check_reachability;
use crate::report::{CheckOutcome, CheckReport, CheckStats, CheckStatus};
use crate::scan::{scan_repo, RepoTree};
use crate::schema::{self, ActionSet};
use crate::spot_checks::check_core_invariants;

/// Inputs loaded so far. Each accessor loads on first use, so a unit only
/// depends on the configuration, never on which units ran before it.
pub struct Session<'c> {
    cfg: &'c HarnessConfig,
    legend: Option<Value>,
    scenarios: Option<Value>,
    actions: Option<ActionSet>,
    tree: Option<RepoTree>,
    graph: Option<SourceGraph>,
    pub stats: CheckStats,
}

impl<'c> Session<'c> {
    pub fn new(cfg: &'c HarnessConfig) -> Self {
        Self {
            cfg,
            legend: None,
            scenarios: None,
            actions: None,
            tree: None,
            graph: None,
            stats: CheckStats::default(),
        }
    }

    fn legend(&mut self, check: CheckId) -> CheckResult<&Value> {
        let doc = match self.legend.take() {
            Some(doc) => doc,
            None => schema::load_dataset(&self.cfg.repo_root, &self.cfg.legend.path, check)?,
        };
        Ok(self.legend.insert(doc))
    }

    fn scenarios(&mut self, check: CheckId) -> CheckResult<&Value> {
        let doc = match self.scenarios.take() {
            Some(doc) => doc,
            None => schema::load_dataset(&self.cfg.repo_root, &self.cfg.scenarios.path, check)?,
        };
        Ok(self.scenarios.insert(doc))
    }

    fn actions(&mut self, check: CheckId) -> CheckResult<&ActionSet> {
        let set = match self.actions.take() {
            Some(set) => set,
            None => {
                let cfg = self.cfg;
                schema::check_legend(&cfg.legend.path, self.legend(check)?)?
            }
        };
        Ok(self.actions.insert(set))
    }

    fn tree(&mut self, check: CheckId) -> CheckResult<&RepoTree> {
        let tree = match self.tree.take() {
            Some(tree) => tree,
            None => scan_repo(&self.cfg.repo_root).map_err(|err| {
                Diagnostic::filesystem(check, "E_SCAN", format!("{err:#}"))
            })?,
        };
        Ok(self.tree.insert(tree))
    }

    fn sources(&mut self, check: CheckId) -> CheckResult<(&RepoTree, &SourceGraph)> {
        let cfg = self.cfg;
        let tree = match self.tree.take() {
            Some(tree) => tree,
            None => scan_repo(&cfg.repo_root).map_err(|err| {
                Diagnostic::filesystem(check, "E_SCAN", format!("{err:#}"))
            })?,
        };
        let tree: &RepoTree = self.tree.insert(tree);
        let graph = match self.graph.take() {
            Some(graph) => graph,
            None => SourceGraph::load(&cfg.repo_root, tree, check)?,
        };
        Ok((tree, self.graph.insert(graph)))
    }
}

type CheckFn = fn(&mut Session<'_>) -> CheckResult<()>;

/// Run order.
pub const CHECKS: &[(CheckId, CheckFn)] = &[
    (CheckId::CoreInvariants, run_core_invariants),
    (CheckId::LegendSchema, run_legend_schema),
    (CheckId::ScenariosSchema, run_scenarios_schema),
    (CheckId::Allowlist, run_allowlist),
    (CheckId::Layers, run_layers),
    (CheckId::Reachability, run_reachability),
    (CheckId::HashLock, run_hash_lock),
];

fn run_core_invariants(_s: &mut Session<'_>) -> CheckResult<()> {
    check_core_invariants()
}

fn run_legend_schema(s: &mut Session<'_>) -> CheckResult<()> {
    let count = s.actions(CheckId::LegendSchema)?.len();
    s.stats.actions = count;
    Ok(())
}

fn run_scenarios_schema(s: &mut Session<'_>) -> CheckResult<()> {
    let check = CheckId::ScenariosSchema;
    let actions = s.actions(check)?.clone();
    let cfg = s.cfg;
    let records = schema::check_scenarios(&cfg.scenarios.path, s.scenarios(check)?, &actions)?;
    s.stats.records = records;
    Ok(())
}

fn run_allowlist(s: &mut Session<'_>) -> CheckResult<()> {
    let cfg = s.cfg;
    let tree = s.tree(CheckId::Allowlist)?;
    check_allowlist(tree, &cfg.allowed_paths)?;
    let (files, source_files) = (tree.files().len(), tree.source_files().count());
    s.stats.files = files;
    s.stats.source_files = source_files;
    Ok(())
}

fn run_layers(s: &mut Session<'_>) -> CheckResult<()> {
    let (_, graph) = s.sources(CheckId::Layers)?;
    let edges = check_layers(graph)?;
    s.stats.import_edges = edges;
    Ok(())
}

fn run_reachability(s: &mut Session<'_>) -> CheckResult<()> {
    let cfg = s.cfg;
    let (tree, graph) = s.sources(CheckId::Reachability)?;
    let reachable = check_reachability(tree, graph, &cfg.entry)?;
    s.stats.reachable = reachable;
    Ok(())
}

fn run_hash_lock(s: &mut Session<'_>) -> CheckResult<()> {
    let check = CheckId::HashLock;
    let cfg = s.cfg;
    verify_lock(cfg, &cfg.legend, s.legend(check)?)?;
    verify_lock(cfg, &cfg.scenarios, s.scenarios(check)?)?;
    Ok(())
}

/// Runs every unit in order, stopping at the first failure; the remaining
/// units are reported as skipped.
pub fn run_checks(cfg: &HarnessConfig) -> CheckReport {
    let mut session = Session::new(cfg);
    let mut checks = Vec::with_capacity(CHECKS.len());
    let mut failure: Option<Diagnostic> = None;

    for (id, run) in CHECKS {
        if failure.is_some() {
            checks.push(CheckOutcome {
                id: *id,
                status: CheckStatus::Skipped,
            });
            continue;
        }
        let started = Instant::now();
        tracing::info!(check = %id, "running check");
        match run(&mut session) {
            Ok(()) => {
                tracing::debug!(
                    check = %id,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "check passed"
                );
                checks.push(CheckOutcome {
                    id: *id,
                    status: CheckStatus::Passed,
                });
            }
            Err(diag) => {
                tracing::warn!(check = %id, code = %diag.code, "{}", diag.message);
                checks.push(CheckOutcome {
                    id: *id,
                    status: CheckStatus::Failed,
                });
                failure = Some(*diag);
            }
        }
    }

    CheckReport {
        schema_version: POKERGRID_CHECK_REPORT_SCHEMA_VERSION,
        ok: failure.is_none(),
        repo_root: cfg.repo_root.display().to_string(),
        entry: cfg.entry.clone(),
        checks,
        stats: session.stats,
        diagnostic: failure,
    }
}
