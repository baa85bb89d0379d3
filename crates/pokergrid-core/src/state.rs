//! Canonical state normalization: every field trimmed and uppercased, with
//! a default for each field left empty.

use crate::router_key::GridState;

pub const DEFAULT_MODE: &str = "PREFLOP";
pub const DEFAULT_SCENARIO: &str = "RFI";
pub const DEFAULT_HERO: &str = "BB";
pub const DEFAULT_FACING: &str = "BTN";
pub const DEFAULT_BUCKET: &str = "STANDARD";

pub fn normalize_state(state: &GridState) -> GridState {
    GridState {
        mode: normalize_field(&state.mode, DEFAULT_MODE),
        scenario: normalize_field(&state.scenario, DEFAULT_SCENARIO),
        hero: normalize_field(&state.hero, DEFAULT_HERO),
        facing: normalize_field(&state.facing, DEFAULT_FACING),
        bucket: normalize_field(&state.bucket, DEFAULT_BUCKET),
    }
}

fn normalize_field(value: &str, default: &str) -> String {
    let v = value.trim().to_uppercase();
    if v.is_empty() {
        default.to_string()
    } else {
        v
    }
}
