//! Canonicalizes a scenario record into a full 169-cell map.
//!
//! Only the canonical record shape is supported: `{ id, cells }` where each
//! cell value is either an action string or an object carrying `action`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::grid_map::all_cell_keys;
use crate::hand_keys::is_valid_cell_key;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActiveCell {
    pub action: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Trimmed, uppercased action of a cell value; empty when there is none.
pub fn normalized_action(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("action") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        },
        _ => String::new(),
    };
    raw.trim().to_uppercase()
}

pub fn normalize_cell_value(value: &Value) -> ActiveCell {
    let mut extra = match value {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };
    extra.remove("action");
    ActiveCell {
        action: normalized_action(value),
        extra,
    }
}

pub fn empty_cells() -> BTreeMap<String, ActiveCell> {
    all_cell_keys()
        .into_iter()
        .map(|key| (key, ActiveCell::default()))
        .collect()
}

/// Always returns the full grid; cells the record does not mention (or
/// mentions under an invalid key) stay empty.
pub fn active_cells(grid: Option<&Value>) -> BTreeMap<String, ActiveCell> {
    let mut out = empty_cells();
    let Some(cells) = grid.and_then(|g| g.get("cells")).and_then(Value::as_object) else {
        return out;
    };
    for (key, value) in cells {
        if !is_valid_cell_key(key) {
            continue;
        }
        out.insert(key.trim().to_string(), normalize_cell_value(value));
    }
    out
}
