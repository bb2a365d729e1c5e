use dataset_analytics::analytics::analyze_columns;
use dataset_analytics::types::Dataset;
use serde_json::json;

fn dataset(value: serde_json::Value) -> Dataset {
    Dataset::from_json(value).unwrap()
}

#[test]
fn three_record_single_field_summary() {
    let ds = dataset(json!([{"a": 1}, {"a": 2}, {"a": 3}]));
    let report = analyze_columns(&ds).unwrap();

    let a = report.get("a").unwrap();
    assert_eq!(a.count, 3);
    assert_eq!(a.mean, 2.0);
    assert_eq!(a.min, 1.0);
    assert_eq!(a.max, 3.0);
    assert_eq!(a.range, 2.0);
    assert!((a.std_dev - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
}

#[test]
fn dataset_with_no_numeric_values_yields_empty_report() {
    let ds = dataset(json!([{"a": "x"}, {"a": "y"}]));
    let report = analyze_columns(&ds).unwrap();
    assert!(report.is_empty());
}

#[test]
fn sparse_fields_are_counted_per_numeric_occurrence() {
    let ds = dataset(json!([{"a": 1, "b": 10}, {"a": 2}]));
    let report = analyze_columns(&ds).unwrap();

    assert_eq!(report.get("a").unwrap().count, 2);
    assert_eq!(report.get("b").unwrap().count, 1);
    assert_eq!(report.get("b").unwrap().std_dev, 0.0);
}

#[test]
fn empty_dataset_yields_empty_report_without_error() {
    let ds = dataset(json!([]));
    let report = analyze_columns(&ds).unwrap();
    assert!(report.is_empty());
}

#[test]
fn omission_invariant_holds_for_mixed_typed_fields() {
    // "a" is numeric in exactly one record; "b" never is.
    let ds = dataset(json!([
        {"a": "text", "b": true},
        {"a": 5, "b": null},
        {"a": [1, 2], "b": "5"},
    ]));
    let report = analyze_columns(&ds).unwrap();

    assert_eq!(report.field_names(), vec!["a"]);
    assert_eq!(report.get("a").unwrap().count, 1);
}

#[test]
fn range_identity_and_mean_bounds() {
    let ds = dataset(json!([
        {"x": 3.5, "y": -2},
        {"x": 10, "y": -2},
        {"x": 7.25, "y": -2},
    ]));
    let report = analyze_columns(&ds).unwrap();

    for (_, s) in report.iter() {
        assert_eq!(s.range, s.max - s.min);
        assert!(s.min <= s.mean && s.mean <= s.max);
        assert!(s.std_dev >= 0.0);
    }
    // All-identical series: zero spread.
    assert_eq!(report.get("y").unwrap().std_dev, 0.0);
    assert_eq!(report.get("y").unwrap().range, 0.0);
}

#[test]
fn analysis_is_deterministic_and_idempotent() {
    let ds = dataset(json!([
        {"a": 1, "b": 2.5},
        {"b": -1, "c": "x"},
        {"a": 4},
    ]));

    let first = analyze_columns(&ds).unwrap();
    let second = analyze_columns(&ds).unwrap();
    assert_eq!(first, second);

    // The dataset itself is untouched.
    assert_eq!(ds.record_count(), 3);
}

#[test]
fn permuting_records_changes_no_statistics() {
    let ds = dataset(json!([{"a": 1, "b": 10}, {"a": 2}, {"a": 3, "b": 20}]));
    let permuted = dataset(json!([{"a": 3, "b": 20}, {"a": 1, "b": 10}, {"a": 2}]));

    let before = analyze_columns(&ds).unwrap();
    let after = analyze_columns(&permuted).unwrap();

    for (field, summary) in before.iter() {
        assert_eq!(after.get(field), Some(summary));
    }
}

#[test]
fn discovery_order_follows_first_appearance() {
    let ds = dataset(json!([{"z": 1}, {"m": 2, "z": 3}, {"a": 4}]));
    let report = analyze_columns(&ds).unwrap();
    assert_eq!(report.field_names(), vec!["z", "m", "a"]);
}

#[test]
fn report_serializes_with_std_wire_key() {
    let ds = dataset(json!([{"a": 1}, {"a": 3}]));
    let report = analyze_columns(&ds).unwrap();
    let v = serde_json::to_value(&report).unwrap();

    let a = v.get("a").unwrap();
    assert_eq!(a.get("count"), Some(&json!(2)));
    assert_eq!(a.get("mean"), Some(&json!(2.0)));
    assert!(a.get("std").is_some());
    assert!(a.get("standardDeviation").is_none());
}
