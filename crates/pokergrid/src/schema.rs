//! Dataset loading plus the structural and cross-field checks for the
//! legend and scenarios documents.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::Path;

use jsonschema::Draft;
use pokergrid_core::active_cells::normalized_action;
use pokergrid_core::collate::locale_compare;
use pokergrid_core::scenario_index::{IndexError, ScenarioIndex};
use pokergrid_core::{grid_key, is_valid_cell_key, GridState};
use serde_json::Value;

use crate::diagnostics::{CheckId, CheckResult, Diagnostic};

const LEGEND_SCHEMA_BYTES: &[u8] = include_bytes!("../../../spec/pokergrid.legend.schema.json");
const SCENARIOS_SCHEMA_BYTES: &[u8] =
    include_bytes!("../../../spec/pokergrid.scenarios.schema.json");

/// Normalized (trimmed, uppercased) action ids declared by the legend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSet {
    ids: BTreeSet<String>,
}

impl ActionSet {
    pub fn contains(&self, action: &str) -> bool {
        self.ids.contains(action)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

pub fn load_dataset(repo_root: &Path, rel: &str, check: CheckId) -> CheckResult<Value> {
    let bytes = std::fs::read(repo_root.join(rel)).map_err(|err| {
        Diagnostic::filesystem(check, "E_DATASET_READ", format!("read dataset: {err}"))
            .with_file(rel)
    })?;
    serde_json::from_slice(&bytes).map_err(|err| {
        Diagnostic::schema(check, "E_DATASET_PARSE", format!("parse JSON: {err}"))
            .with_file(rel)
            .into()
    })
}

/// Validates `doc` against an embedded JSON Schema and reports the first
/// violation.
pub fn validate_shape(
    check: CheckId,
    code: &str,
    schema_bytes: &[u8],
    file: &str,
    doc: &Value,
) -> CheckResult<()> {
    let schema_json: Value = serde_json::from_slice(schema_bytes).map_err(|err| {
        Diagnostic::schema(check, "E_SCHEMA_BUILD", format!("parse JSON schema: {err}"))
    })?;
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema_json)
        .map_err(|err| {
            Diagnostic::schema(check, "E_SCHEMA_BUILD", format!("build schema validator: {err}"))
        })?;
    let errors: Vec<_> = validator.iter_errors(doc).collect();
    let Some(first) = errors.first() else {
        return Ok(());
    };
    Err(Diagnostic::schema(check, code, format!("{file}: {first}"))
        .with_file(file)
        .with_data("instance_path", first.instance_path().to_string())
        .with_data("schema_path", first.schema_path().to_string())
        .with_data("error_count", errors.len())
        .into())
}

fn array_field<'v>(doc: &'v Value, key: &str) -> &'v [Value] {
    doc.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Shape-checks the legend and collects its action ids.
pub fn check_legend(file: &str, doc: &Value) -> CheckResult<ActionSet> {
    let check = CheckId::LegendSchema;
    validate_shape(check, "E_LEGEND_SHAPE", LEGEND_SCHEMA_BYTES, file, doc)?;

    let mut ids = BTreeSet::new();
    for (index, action) in array_field(doc, "actions").iter().enumerate() {
        let id = match action.get("id") {
            Some(Value::String(s)) => s.trim().to_uppercase(),
            other => {
                return Err(Diagnostic::schema(
                    check,
                    "E_LEGEND_ACTION_ID",
                    format!("actions[{index}].id must be a string"),
                )
                .with_file(file)
                .with_data("index", index)
                .with_data("actual", other.cloned().unwrap_or(Value::Null))
                .into());
            }
        };
        if id.is_empty() {
            return Err(Diagnostic::schema(
                check,
                "E_LEGEND_ACTION_ID",
                format!("actions[{index}].id is empty"),
            )
            .with_file(file)
            .with_data("index", index)
            .into());
        }
        ids.insert(id);
    }
    if ids.is_empty() {
        return Err(Diagnostic::schema(
            check,
            "E_LEGEND_NO_ACTIONS",
            "legend declares no actions",
        )
        .with_file(file)
        .into());
    }
    Ok(ActionSet { ids })
}

/// Shape-checks the scenarios document, then ordering, per-record
/// invariants and id uniqueness. Returns the record count.
pub fn check_scenarios(file: &str, doc: &Value, actions: &ActionSet) -> CheckResult<usize> {
    let check = CheckId::ScenariosSchema;
    validate_shape(check, "E_SCENARIOS_SHAPE", SCENARIOS_SCHEMA_BYTES, file, doc)?;
    let records = array_field(doc, "records");

    let mut ids = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let Some(id) = record.get("id").and_then(Value::as_str) else {
            return Err(Diagnostic::schema(
                check,
                "E_SCENARIO_ID_TYPE",
                format!("records[{index}].id must be a string"),
            )
            .with_file(file)
            .with_data("index", index)
            .into());
        };
        ids.push(id);
    }

    for (index, pair) in ids.windows(2).enumerate() {
        if locale_compare(pair[0], pair[1]) == Ordering::Greater {
            return Err(Diagnostic::invariant(
                check,
                "E_SCENARIOS_UNSORTED",
                format!(
                    "records not sorted by id: {:?} precedes {:?}",
                    pair[0], pair[1]
                ),
            )
            .with_file(file)
            .with_record(pair[1])
            .with_data("index", index + 1)
            .with_data("previous", pair[0])
            .into());
        }
    }

    for (record, id) in records.iter().zip(&ids) {
        check_record(file, id, record, actions)?;
    }

    ScenarioIndex::build(records).map_err(|err| {
        let diag = match &err {
            IndexError::DuplicateId { id, first, second } => Diagnostic::invariant(
                check,
                "E_SCENARIO_DUPLICATE_ID",
                err.to_string(),
            )
            .with_record(id.as_str())
            .with_data("first", *first)
            .with_data("second", *second),
            IndexError::MissingId { index } => {
                Diagnostic::schema(check, "E_SCENARIO_ID_TYPE", err.to_string())
                    .with_data("index", *index)
            }
        };
        diag.with_file(file)
    })?;

    Ok(records.len())
}

fn check_record(file: &str, id: &str, record: &Value, actions: &ActionSet) -> CheckResult<()> {
    let check = CheckId::ScenariosSchema;
    let state = GridState::from_key(id).map_err(|err| {
        Diagnostic::invariant(check, "E_SCENARIO_ID_PARTS", err.to_string())
            .with_file(file)
            .with_record(id)
    })?;
    let canonical = grid_key(&state);
    if canonical != id {
        return Err(Diagnostic::invariant(
            check,
            "E_SCENARIO_ID_ROUNDTRIP",
            format!("record id is not canonical: {id:?} (expected {canonical:?})"),
        )
        .with_file(file)
        .with_record(id)
        .with_data("expected", canonical)
        .with_data("actual", id)
        .into());
    }

    let Some(Value::Object(cells)) = record.get("cells") else {
        return Err(Diagnostic::schema(
            check,
            "E_SCENARIO_CELLS_TYPE",
            format!("record {id}: cells must be an object"),
        )
        .with_file(file)
        .with_record(id)
        .into());
    };

    for (key, value) in cells {
        if !is_valid_cell_key(key) {
            return Err(Diagnostic::invariant(
                check,
                "E_SCENARIO_CELL_KEY",
                format!("record {id}: invalid cell key {key:?}"),
            )
            .with_file(file)
            .with_record(id)
            .with_cell(key.as_str())
            .into());
        }
        let has_action = match value {
            Value::String(_) => true,
            Value::Object(obj) => matches!(obj.get("action"), Some(Value::String(_))),
            _ => false,
        };
        if !has_action {
            return Err(Diagnostic::schema(
                check,
                "E_SCENARIO_CELL_VALUE",
                format!("record {id}: cell {key} must be an action string or an object with an action string"),
            )
            .with_file(file)
            .with_record(id)
            .with_cell(key.as_str())
            .into());
        }
        let action = normalized_action(value);
        if !actions.contains(&action) {
            return Err(Diagnostic::invariant(
                check,
                "E_SCENARIO_ACTION",
                format!("record {id}: cell {key} has action {action:?} not declared in the legend"),
            )
            .with_file(file)
            .with_record(id)
            .with_cell(key.as_str())
            .with_data("action", action)
            .with_data("allowed", actions.iter().collect::<Vec<_>>())
            .into());
        }
    }
    Ok(())
}
