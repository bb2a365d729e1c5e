use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use dataset_analytics::analytics::{analyze_columns, analyze_field};
use dataset_analytics::types::{Dataset, Record};
use serde_json::json;

/// Build a sparse dataset: `fields` numeric fields, each present in roughly
/// two out of three records, plus one string field that never qualifies.
fn synthetic_dataset(records: usize, fields: usize) -> Dataset {
    let mut out = Vec::with_capacity(records);
    for i in 0..records {
        let mut record = Record::new();
        for f in 0..fields {
            if (i + f) % 3 != 0 {
                record.insert(format!("field_{f}"), json!((i * 7 + f) as f64 * 0.5));
            }
        }
        record.insert("label".to_string(), json!("row"));
        out.push(record);
    }
    Dataset::new(out)
}

fn bench_column_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_columns");
    for records in [100usize, 1_000, 10_000] {
        let ds = synthetic_dataset(records, 8);
        group.bench_with_input(BenchmarkId::from_parameter(records), &ds, |b, ds| {
            b.iter(|| analyze_columns(black_box(ds)).unwrap());
        });
    }
    group.finish();
}

fn bench_extended_field(c: &mut Criterion) {
    let ds = synthetic_dataset(10_000, 8);
    c.bench_function("analyze_field_extended", |b| {
        b.iter(|| analyze_field(black_box(&ds), "field_3").unwrap());
    });
}

criterion_group!(benches, bench_column_report, bench_extended_field);
criterion_main!(benches);
