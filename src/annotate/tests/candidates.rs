// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(clippy::unwrap_used, clippy::panic)]

use serde_json::json;

use super::fixtures::*;
use crate::annotate::find_candidates;
use crate::{AnnotateError, Value};

fn candidate_names(value: &Value) -> Vec<String> {
    let schema = farm_schema();
    find_candidates(value, &schema)
        .unwrap()
        .iter()
        .map(|ty| ty.name().to_string())
        .collect()
}

#[test]
fn rejects_arrays() {
    let schema = farm_schema();
    let result = find_candidates(&val(json!([1, 2])), &schema);
    assert!(matches!(
        result,
        Err(AnnotateError::InvalidArgument { .. })
    ));
}

#[test]
fn non_objects_have_no_candidates() {
    for input in [
        Value::from("hello"),
        Value::from(42i64),
        Value::Null,
        Value::Bool(false),
        Value::Timestamp(chrono::Utc::now()),
    ] {
        assert!(candidate_names(&input).is_empty(), "for {input:?}");
    }
}

#[test]
fn empty_objects_match_every_field_bearing_source_type() {
    // Declaration order, not alphabetical. Unions, scalars (built-in and
    // custom) and input object types never appear.
    assert_eq!(
        candidate_names(&Value::new_object()),
        vec!["Building", "Equipment", "Chicken", "Cow", "Animal", "Farm"]
    );
}

#[test]
fn matches_by_field_name_superset() {
    let input = val(json!({ "description": "The house", "cost": 400000 }));
    assert_eq!(candidate_names(&input), vec!["Building"]);
}

#[test]
fn excludes_input_object_types() {
    // FarmInput declares exactly { id, name } but is never a valid target.
    let input = val(json!({ "id": 1, "name": "Henrieta" }));
    assert_eq!(candidate_names(&input), vec!["Chicken", "Cow", "Animal", "Farm"]);
}

#[test]
fn unmatched_shapes_yield_an_empty_list() {
    let input = val(json!({ "id": 1, "flavor": "umami" }));
    assert!(candidate_names(&input).is_empty());
}

#[test]
fn matching_checks_names_only_not_types() {
    // `description` holds a number, but only field presence matters.
    let input = val(json!({ "description": 7 }));
    assert_eq!(candidate_names(&input), vec!["Building"]);
}
