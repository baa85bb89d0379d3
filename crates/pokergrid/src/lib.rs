//! Conformance harness for the poker chart repository: file allowlist,
//! layered import graph, reachability from the entry module, dataset
//! schemas and hash locks.

pub mod allowlist;
pub mod canonical;
pub mod check;
pub mod config;
pub mod diagnostics;
pub mod graph;
pub mod hash;
pub mod imports;
pub mod layers;
pub mod lock;
pub mod paths;
pub mod reach;
pub mod report;
pub mod scan;
pub mod schema;
pub mod spot_checks;
pub mod util;
