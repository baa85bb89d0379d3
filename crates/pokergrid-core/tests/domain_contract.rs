use std::collections::BTreeSet;

use pokergrid_core::active_cells::{active_cells, normalize_cell_value};
use pokergrid_core::grid_map::{all_cell_keys, cell_key_at};
use pokergrid_core::scenario_index::{IndexError, ScenarioIndex};
use pokergrid_core::state::normalize_state;
use pokergrid_core::{grid_key, is_valid_cell_key, GridState};
use serde_json::json;

#[test]
fn grid_key_normalizes_case_and_padding() {
    let state = GridState::new("PREFLOP", "VS_OPEN", "BB", "CO", "STANDARD");
    assert_eq!(grid_key(&state), "PREFLOP:VS_OPEN:BB:CO:STANDARD");

    let messy = GridState::new(" preflop", "vs_open ", "bb", " Co ", "standard");
    assert_eq!(grid_key(&messy), grid_key(&state));
}

#[test]
fn grid_key_round_trips_parsed_ids() {
    let id = "PREFLOP:RFI:BB:BTN:STANDARD";
    let state = GridState::from_key(id).expect("five parts");
    assert_eq!(grid_key(&state), id);

    let lower = GridState::from_key("preflop:rfi:bb:btn:standard").expect("five parts");
    assert_ne!(grid_key(&lower), "preflop:rfi:bb:btn:standard");
}

#[test]
fn cell_key_at_follows_grid_convention() {
    assert_eq!(cell_key_at('A', 'A').as_deref(), Some("AA"));
    assert_eq!(cell_key_at('A', 'K').as_deref(), Some("AKs"));
    assert_eq!(cell_key_at('K', 'A').as_deref(), Some("AKo"));
    assert_eq!(cell_key_at('2', '7').as_deref(), Some("72o"));
    assert_eq!(cell_key_at('X', 'A'), None);
}

#[test]
fn grid_has_169_distinct_valid_keys() {
    let keys = all_cell_keys();
    assert_eq!(keys.len(), 169);
    let distinct: BTreeSet<&String> = keys.iter().collect();
    assert_eq!(distinct.len(), 169);
    assert!(keys.iter().all(|k| is_valid_cell_key(k)));
}

#[test]
fn active_cells_fills_every_cell() {
    let grid = json!({
        "id": "PREFLOP:RFI:BB:BTN:STANDARD",
        "cells": { "AA": { "action": "raise" }, "AKo": "call", "ZZ": "fold" }
    });
    let cells = active_cells(Some(&grid));
    assert_eq!(cells.len(), 169);
    assert_eq!(cells["AA"].action, "RAISE");
    assert_eq!(cells["AKo"].action, "CALL");
    assert_eq!(cells["72o"].action, "");
    assert!(!cells.contains_key("ZZ"));

    let empty = active_cells(None);
    assert_eq!(empty.len(), 169);
    assert!(empty.values().all(|c| c.action.is_empty()));
}

#[test]
fn normalize_cell_value_keeps_extra_fields() {
    let cell = normalize_cell_value(&json!({ "action": " mix ", "freq": 0.5 }));
    assert_eq!(cell.action, "MIX");
    assert_eq!(cell.extra.get("freq"), Some(&json!(0.5)));
    assert!(!cell.extra.contains_key("action"));

    assert_eq!(normalize_cell_value(&json!(null)).action, "");
}

#[test]
fn normalize_state_applies_defaults() {
    let state = normalize_state(&GridState::default());
    assert_eq!(
        grid_key(&state),
        "PREFLOP:RFI:BB:BTN:STANDARD",
        "defaults: {state:?}"
    );
}

#[test]
fn scenario_index_resolves_normalized_keys() {
    let records = vec![
        json!({ "id": "PREFLOP:RFI:BB:BTN:STANDARD", "cells": {} }),
        json!({ "id": "PREFLOP:VS_OPEN:BB:CO:STANDARD", "cells": {} }),
    ];
    let index = ScenarioIndex::build(&records).expect("unique ids");
    assert_eq!(index.len(), 2);
    let hit = index.resolve(" preflop:vs_open:bb:co:standard ").expect("resolves");
    assert_eq!(hit["id"], "PREFLOP:VS_OPEN:BB:CO:STANDARD");
    assert!(index.resolve("PREFLOP:RFI:SB:BTN:STANDARD").is_none());
}

#[test]
fn scenario_index_rejects_duplicates() {
    let records = vec![
        json!({ "id": "PREFLOP:RFI:BB:BTN:STANDARD" }),
        json!({ "id": "preflop:rfi:bb:btn:standard" }),
    ];
    let err = ScenarioIndex::build(&records).expect_err("duplicate");
    assert_eq!(
        err,
        IndexError::DuplicateId {
            id: "PREFLOP:RFI:BB:BTN:STANDARD".to_string(),
            first: 0,
            second: 1,
        }
    );
}
