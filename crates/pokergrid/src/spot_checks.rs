//! Fixed-input spot checks of the domain collaborators the datasets are
//! validated with.

use std::collections::BTreeSet;

use pokergrid_core::active_cells::active_cells;
use pokergrid_core::grid_map::{all_cell_keys, cell_key_at};
use pokergrid_core::state::normalize_state;
use pokergrid_core::{grid_key, is_valid_cell_key, GridState};
use serde_json::json;

use crate::diagnostics::{CheckId, CheckResult, Diagnostic};

fn expect_eq(code: &str, what: &str, expected: &str, actual: &str) -> CheckResult<()> {
    if expected == actual {
        return Ok(());
    }
    Err(Diagnostic::invariant(
        CheckId::CoreInvariants,
        code,
        format!("{what}: expected {expected:?}, got {actual:?}"),
    )
    .with_data("expected", expected)
    .with_data("actual", actual)
    .into())
}

fn grid_key_checks() -> CheckResult<()> {
    let canonical = GridState::new("PREFLOP", "VS_OPEN", "BB", "CO", "STANDARD");
    expect_eq(
        "E_CORE_GRID_KEY",
        "grid_key",
        "PREFLOP:VS_OPEN:BB:CO:STANDARD",
        &grid_key(&canonical),
    )?;
    let padded = GridState::new(" preflop ", "vs_open", " bb", "co ", "Standard");
    expect_eq(
        "E_CORE_GRID_KEY",
        "grid_key of padded lowercase state",
        "PREFLOP:VS_OPEN:BB:CO:STANDARD",
        &grid_key(&padded),
    )
}

fn cell_key_checks() -> CheckResult<()> {
    for (row, col, want) in [('A', 'A', "AA"), ('A', 'K', "AKs"), ('K', 'A', "AKo")] {
        let got = cell_key_at(row, col).unwrap_or_default();
        expect_eq(
            "E_CORE_CELL_KEY_AT",
            &format!("cell_key_at({row}, {col})"),
            want,
            &got,
        )?;
    }

    let keys = all_cell_keys();
    let distinct: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
    let invalid = keys.iter().find(|k| !is_valid_cell_key(k));
    if keys.len() != 169 || distinct.len() != 169 || invalid.is_some() {
        return Err(Diagnostic::invariant(
            CheckId::CoreInvariants,
            "E_CORE_GRID_MAP",
            "13x13 grid must yield 169 distinct valid cell keys",
        )
        .with_data("keys", keys.len())
        .with_data("distinct", distinct.len())
        .with_data("first_invalid", invalid.cloned())
        .into());
    }
    Ok(())
}

fn active_cell_checks() -> CheckResult<()> {
    let grid = json!({ "cells": { "AA": { "action": "raise" }, "AKo": "call" } });
    let cells = active_cells(Some(&grid));
    expect_eq(
        "E_CORE_ACTIVE_CELLS",
        "active_cells size",
        "169",
        &cells.len().to_string(),
    )?;
    for (key, want) in [("AA", "RAISE"), ("AKo", "CALL"), ("72o", "")] {
        let got = cells.get(key).map(|c| c.action.as_str()).unwrap_or("<missing>");
        expect_eq(
            "E_CORE_ACTIVE_CELLS",
            &format!("active_cells[{key}]"),
            want,
            got,
        )?;
    }
    expect_eq(
        "E_CORE_ACTIVE_CELLS",
        "active_cells(None) size",
        "169",
        &active_cells(None).len().to_string(),
    )
}

fn normalize_state_checks() -> CheckResult<()> {
    let state = normalize_state(&GridState::default());
    expect_eq(
        "E_CORE_NORMALIZE_STATE",
        "normalize_state defaults",
        "PREFLOP:RFI:BB:BTN:STANDARD",
        &grid_key(&state),
    )
}

pub fn check_core_invariants() -> CheckResult<()> {
    grid_key_checks()?;
    cell_key_checks()?;
    active_cell_checks()?;
    normalize_state_checks()
}
