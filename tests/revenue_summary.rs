use dataset_analytics::analytics::{analyze, analyze_field, AnalyticsMode, AnalyticsOutput};
use dataset_analytics::types::Dataset;
use serde_json::json;

fn revenue_dataset() -> Dataset {
    Dataset::from_json(json!([
        {"revenue": 10},
        {"revenue": 10},
        {"revenue": 20},
    ]))
    .unwrap()
}

#[test]
fn extended_summary_matches_designated_field() {
    let ds = revenue_dataset();
    let ext = analyze_field(&ds, "revenue").unwrap().unwrap();

    assert_eq!(ext.total_records, 3);
    assert!((ext.avg_revenue - 40.0 / 3.0).abs() < 1e-12);
    assert_eq!(ext.min_revenue, 10.0);
    assert_eq!(ext.max_revenue, 20.0);
    assert_eq!(ext.range, 10.0);
    // Sorted [10, 10, 20]: index 1 is the median, 10 the mode.
    assert_eq!(ext.median, 10.0);
    assert_eq!(ext.mode, 10.0);
    assert!((ext.variance - ext.standard_deviation.powi(2)).abs() < 1e-12);
}

#[test]
fn extended_summary_works_for_any_field_name() {
    let ds = Dataset::from_json(json!([{"units": 4}, {"units": 6}])).unwrap();
    let ext = analyze_field(&ds, "units").unwrap().unwrap();

    assert_eq!(ext.total_records, 2);
    assert_eq!(ext.avg_revenue, 5.0);
}

#[test]
fn extended_summary_skips_non_numeric_occurrences() {
    let ds = Dataset::from_json(json!([
        {"revenue": 10},
        {"revenue": "pending"},
        {"revenue": 30},
    ]))
    .unwrap();
    let ext = analyze_field(&ds, "revenue").unwrap().unwrap();
    assert_eq!(ext.total_records, 2);
    assert_eq!(ext.avg_revenue, 20.0);
}

#[test]
fn numeric_free_field_yields_none() {
    let ds = Dataset::from_json(json!([{"revenue": "n/a"}, {"label": "x"}])).unwrap();
    assert!(analyze_field(&ds, "revenue").unwrap().is_none());
    assert!(analyze_field(&ds, "missing").unwrap().is_none());
}

#[test]
fn mode_tie_break_is_latest_first_seen() {
    let ds = Dataset::from_json(json!([
        {"v": 1}, {"v": 2}, {"v": 1}, {"v": 2},
    ]))
    .unwrap();
    let ext = analyze_field(&ds, "v").unwrap().unwrap();
    assert_eq!(ext.mode, 2.0);
}

#[test]
fn even_length_median_is_upper_middle() {
    let ds = Dataset::from_json(json!([
        {"v": 4}, {"v": 1}, {"v": 3}, {"v": 2},
    ]))
    .unwrap();
    let ext = analyze_field(&ds, "v").unwrap().unwrap();
    assert_eq!(ext.median, 3.0);
}

#[test]
fn analyze_mode_selector_produces_both_shapes() {
    let ds = revenue_dataset();

    let columns = analyze(&ds, &AnalyticsMode::Columns).unwrap();
    let v = serde_json::to_value(&columns).unwrap();
    assert!(v.get("revenue").unwrap().get("std").is_some());

    let field = analyze(&ds, &AnalyticsMode::Field("revenue".to_string())).unwrap();
    let v = serde_json::to_value(&field).unwrap();
    assert_eq!(v.get("totalRecords"), Some(&json!(3)));
    assert_eq!(v.get("median"), Some(&json!(10.0)));
    assert_eq!(v.get("mode"), Some(&json!(10.0)));

    match field {
        AnalyticsOutput::Field(Some(ext)) => assert_eq!(ext.max_revenue, 20.0),
        other => panic!("unexpected output: {other:?}"),
    }
}

#[test]
fn both_modes_agree_on_shared_statistics() {
    let ds = revenue_dataset();

    let report = match analyze(&ds, &AnalyticsMode::Columns).unwrap() {
        AnalyticsOutput::Columns(r) => r,
        other => panic!("unexpected output: {other:?}"),
    };
    let ext = analyze_field(&ds, "revenue").unwrap().unwrap();
    let basic = report.get("revenue").unwrap();

    assert_eq!(basic.count, ext.total_records);
    assert_eq!(basic.mean, ext.avg_revenue);
    assert_eq!(basic.min, ext.min_revenue);
    assert_eq!(basic.max, ext.max_revenue);
    assert_eq!(basic.range, ext.range);
    assert_eq!(basic.std_dev, ext.standard_deviation);
}
