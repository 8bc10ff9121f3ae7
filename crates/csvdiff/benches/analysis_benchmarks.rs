//! Analysis pipeline performance benchmarks.
//!
//! Measures loading, profiling, validation and comparison over generated
//! sales-like data.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use csvdiff::compare::Comparator;
use csvdiff::profile::Preprocessor;
use csvdiff::validation::ValidationEngine;
use csvdiff::{CsvDiff, Thresholds};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate sales-like CSV with nulls, variant spellings and outliers.
fn generate_sales_data(rows: usize, seed: u64) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let regions = ["North", "north", "South", " South", "East", "West"];
    let products = ["widget", "gadget", "gizmo", "doohickey"];

    let mut data = String::from("order_id,region,product,quantity,unit_price,order_date,notes\n");
    for row in 0..rows {
        let quantity: u32 = if rng.gen_ratio(1, 200) {
            rng.gen_range(500..1000)
        } else {
            rng.gen_range(1..20)
        };
        let price = if rng.gen_ratio(1, 20) {
            String::new()
        } else {
            format!("{:.2}", rng.gen_range(1.0..100.0))
        };
        data.push_str(&format!(
            "{},{},{},{},{},2024-{:02}-{:02},{}\n",
            row + 1,
            regions[rng.gen_range(0..regions.len())],
            products[rng.gen_range(0..products.len())],
            quantity,
            price,
            rng.gen_range(1..=12),
            rng.gen_range(1..=28),
            if rng.gen_bool(0.3) { "NA" } else { "ok" },
        ));
    }
    data
}

fn temp_csv(data: &str) -> NamedTempFile {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(data.as_bytes()).unwrap();
    temp
}

/// Benchmark load-then-profile.
fn bench_preprocess(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_sales_data(*rows, 7);
        group.throughput(Throughput::Bytes(data.len() as u64));
        let temp = temp_csv(&data);

        group.bench_with_input(BenchmarkId::new("rows", rows), &temp, |b, temp| {
            let preprocessor = Preprocessor::new();
            b.iter(|| black_box(preprocessor.analyze(temp.path()).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark validation alone, on an already-profiled dataset.
fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let engine = ValidationEngine::new();
    let thresholds = Thresholds::default();

    for rows in [1_000, 10_000].iter() {
        let temp = temp_csv(&generate_sales_data(*rows, 11));
        let dataset = Preprocessor::new().analyze(temp.path()).unwrap();

        group.bench_with_input(BenchmarkId::new("rows", rows), &dataset, |b, dataset| {
            b.iter(|| black_box(engine.validate(dataset, &thresholds).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark positional comparison of two different datasets.
fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");

    for rows in [1_000, 10_000].iter() {
        let first = temp_csv(&generate_sales_data(*rows, 1));
        let second = temp_csv(&generate_sales_data(*rows, 2));
        let a = Preprocessor::new().analyze(first.path()).unwrap();
        let b_data = Preprocessor::new().analyze(second.path()).unwrap();

        group.bench_with_input(BenchmarkId::new("rows", rows), &(a, b_data), |b, (a, b_data)| {
            b.iter(|| black_box(Comparator::new().compare(a, b_data)))
        });
    }

    group.finish();
}

/// Benchmark the full clean pipeline from file to plan.
fn bench_clean_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_pipeline");
    group.sample_size(20);

    let temp = temp_csv(&generate_sales_data(10_000, 3));
    let csvdiff = CsvDiff::new();
    group.bench_function("rows_10000", |b| {
        b.iter(|| black_box(csvdiff.clean(temp.path()).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_preprocess,
    bench_validate,
    bench_compare,
    bench_clean_pipeline
);
criterion_main!(benches);
