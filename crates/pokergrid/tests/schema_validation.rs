use pokergrid::diagnostics::{CheckId, Kind};
use pokergrid::schema::{check_legend, check_scenarios, ActionSet};
use serde_json::{json, Value};

const LEGEND: &str = "data/legend.json";
const SCENARIOS: &str = "data/scenarios.json";

fn actions() -> ActionSet {
    check_legend(
        LEGEND,
        &json!({ "version": 1, "actions": [{ "id": "raise" }, { "id": " Call " }, { "id": "FOLD" }] }),
    )
    .expect("legend ok")
}

fn scenarios_error(records: Value) -> (String, Kind) {
    let doc = json!({ "version": 1, "records": records });
    let err = check_scenarios(SCENARIOS, &doc, &actions()).expect_err("scenarios rejected");
    assert_eq!(err.check, CheckId::ScenariosSchema);
    (err.code.clone(), err.kind)
}

#[test]
fn legend_ids_are_trimmed_and_uppercased() {
    let set = actions();
    assert_eq!(set.len(), 3);
    assert!(set.contains("RAISE"));
    assert!(set.contains("CALL"));
    assert!(!set.contains("raise"));
}

#[test]
fn legend_shape_violations() {
    let cases = [
        (json!([]), "E_LEGEND_SHAPE"),
        (json!({ "actions": [] }), "E_LEGEND_SHAPE"),
        (json!({ "version": 1.5, "actions": [] }), "E_LEGEND_SHAPE"),
        (json!({ "version": "1", "actions": [] }), "E_LEGEND_SHAPE"),
        (json!({ "version": 1, "actions": {} }), "E_LEGEND_SHAPE"),
        (json!({ "version": 1, "actions": ["RAISE"] }), "E_LEGEND_SHAPE"),
        (json!({ "version": 1, "actions": [{ "id": 7 }] }), "E_LEGEND_ACTION_ID"),
        (json!({ "version": 1, "actions": [{ "label": "x" }] }), "E_LEGEND_ACTION_ID"),
        (json!({ "version": 1, "actions": [{ "id": "  " }] }), "E_LEGEND_ACTION_ID"),
        (json!({ "version": 1, "actions": [] }), "E_LEGEND_NO_ACTIONS"),
    ];
    for (doc, want) in cases {
        let err = check_legend(LEGEND, &doc).expect_err("legend rejected");
        assert_eq!(err.code, want, "doc: {doc}");
        assert_eq!(err.kind, Kind::Schema, "doc: {doc}");
        assert_eq!(err.file.as_deref(), Some(LEGEND));
    }
}

#[test]
fn shape_error_carries_instance_path() {
    let err = check_legend(LEGEND, &json!({ "version": 1, "actions": [{ "id": "A" }, 3] }))
        .expect_err("shape");
    assert_eq!(err.data["instance_path"], "/actions/1");
}

#[test]
fn accepted_records_count() {
    let doc = json!({
        "version": 1,
        "records": [
            { "id": "PREFLOP:RFI:BB:BTN:STANDARD", "cells": { "AA": "raise", " KQs ": { "action": "call" } } },
            { "id": "PREFLOP:VS_OPEN:BB:CO:STANDARD", "cells": {} }
        ]
    });
    assert_eq!(check_scenarios(SCENARIOS, &doc, &actions()).expect("ok"), 2);
}

#[test]
fn record_id_violations() {
    assert_eq!(
        scenarios_error(json!([{ "id": 5, "cells": {} }])),
        ("E_SCENARIO_ID_TYPE".to_string(), Kind::Schema)
    );
    assert_eq!(
        scenarios_error(json!([{ "id": "PREFLOP:RFI:BB:BTN", "cells": {} }])),
        ("E_SCENARIO_ID_PARTS".to_string(), Kind::Invariant)
    );
    assert_eq!(
        scenarios_error(json!([{ "id": "preflop:RFI:BB:BTN:STANDARD", "cells": {} }])),
        ("E_SCENARIO_ID_ROUNDTRIP".to_string(), Kind::Invariant)
    );
    assert_eq!(
        scenarios_error(json!([{ "id": "PREFLOP:RFI:BB:BTN:STANDARD ", "cells": {} }])),
        ("E_SCENARIO_ID_ROUNDTRIP".to_string(), Kind::Invariant)
    );
    assert_eq!(
        scenarios_error(json!([
            { "id": "PREFLOP:RFI:BB:BTN:STANDARD", "cells": {} },
            { "id": "PREFLOP:RFI:BB:BTN:STANDARD", "cells": {} }
        ])),
        ("E_SCENARIO_DUPLICATE_ID".to_string(), Kind::Invariant)
    );
}

#[test]
fn cell_violations() {
    let id = "PREFLOP:RFI:BB:BTN:STANDARD";
    assert_eq!(
        scenarios_error(json!([{ "id": id, "cells": [] }])),
        ("E_SCENARIO_CELLS_TYPE".to_string(), Kind::Schema)
    );
    assert_eq!(
        scenarios_error(json!([{ "id": id }])),
        ("E_SCENARIO_CELLS_TYPE".to_string(), Kind::Schema)
    );
    for bad_key in ["KAs", "AK", "AAs", "A1o", "XX"] {
        let mut cells = serde_json::Map::new();
        cells.insert(bad_key.to_string(), json!("raise"));
        assert_eq!(
            scenarios_error(json!([{ "id": id, "cells": cells }])),
            ("E_SCENARIO_CELL_KEY".to_string(), Kind::Invariant),
            "key {bad_key}"
        );
    }
    assert_eq!(
        scenarios_error(json!([{ "id": id, "cells": { "AA": 1 } }])),
        ("E_SCENARIO_CELL_VALUE".to_string(), Kind::Schema)
    );
    assert_eq!(
        scenarios_error(json!([{ "id": id, "cells": { "AA": { "freq": 1 } } }])),
        ("E_SCENARIO_CELL_VALUE".to_string(), Kind::Schema)
    );
    assert_eq!(
        scenarios_error(json!([{ "id": id, "cells": { "AA": "limp" } }])),
        ("E_SCENARIO_ACTION".to_string(), Kind::Invariant)
    );
}

#[test]
fn ordering_uses_locale_comparison() {
    let doc = json!({
        "version": 1,
        "records": [
            { "id": "PREFLOP:VS_OPEN:BB:CO:STANDARD", "cells": {} },
            { "id": "PREFLOP:VS3BET:BB:CO:STANDARD", "cells": {} }
        ]
    });
    assert_eq!(check_scenarios(SCENARIOS, &doc, &actions()).expect("sorted"), 2);

    let (code, kind) = scenarios_error(json!([
        { "id": "PREFLOP:VS3BET:BB:CO:STANDARD", "cells": {} },
        { "id": "PREFLOP:VS_OPEN:BB:CO:STANDARD", "cells": {} }
    ]));
    assert_eq!((code.as_str(), kind), ("E_SCENARIOS_UNSORTED", Kind::Invariant));
}
