//! JSON benchmarks
//!
//! Compares the modal JSON grammar against serde_json on the same inputs,
//! and measures both output layouts.
//!
//! Run with: cargo bench --bench json

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use modaltext::json::{self, WriterConfig};

// ============================================================================
// Test Data
// ============================================================================

mod data {
    pub fn tiny() -> String {
        r#"{"a":1,"b":[true,false,null]}"#.to_string()
    }

    pub fn records(count: usize) -> String {
        let items: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"id":{i},"name":"item \"{i}\"","price":{i}.25,"tags":["x","y"],"ok":true}}"#
                )
            })
            .collect();
        format!("[{}]", items.join(","))
    }

    pub fn nested(depth: usize) -> String {
        let mut text = String::from("0");
        for i in 0..depth {
            text = format!(r#"{{"level":{i},"next":[{text}]}}"#);
        }
        text
    }
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let inputs = [
        ("tiny", data::tiny()),
        ("records_100", data::records(100)),
        ("nested_64", data::nested(64)),
    ];

    for (name, input) in &inputs {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("modaltext", name), input, |b, input| {
            b.iter(|| json::parse(black_box(input)))
        });
        group.bench_with_input(BenchmarkId::new("serde_json", name), input, |b, input| {
            b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(input)))
        });
    }

    group.finish();
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    let doc = json::parse(&data::records(100));
    let expanded = WriterConfig::expanded();

    group.bench_function("minimized", |b| b.iter(|| black_box(&doc).to_string()));
    group.bench_function("expanded", |b| {
        b.iter(|| black_box(&doc).to_json_string(&expanded))
    });
    group.bench_function("to_value", |b| b.iter(|| black_box(&doc).to_value()));

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let owned: Vec<String> = (0..64).map(|i| data::records(i % 16 + 1)).collect();
    let inputs: Vec<&str> = owned.iter().map(String::as_str).collect();

    group.bench_function("parse_batch_64", |b| {
        b.iter(|| json::parse_batch(black_box(&inputs)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_serialize, bench_batch);
criterion_main!(benches);
