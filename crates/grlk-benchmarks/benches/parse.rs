//! Manifest parsing performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use grlk_benchmarks::{criterion_config, synthetic_manifest};
use grlk_core::Constraint;
use grlk_manifest::parse_manifest_str;

/// Benchmark manifest parsing across requirement counts
fn bench_manifest_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("manifest_parsing");
    group.measurement_time(std::time::Duration::from_secs(5));

    for gem_count in [10, 50, 100, 500].iter() {
        group.throughput(Throughput::Elements(*gem_count as u64));

        let content = synthetic_manifest(*gem_count);

        group.bench_with_input(
            BenchmarkId::new("requirements", gem_count),
            &content,
            |b, content| {
                b.iter(|| black_box(parse_manifest_str(content).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark constraint expression parsing
fn bench_constraint_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("constraint_parsing");

    let expressions: Vec<String> = (0..1000)
        .map(|i| {
            let prefixes = ["~> ", ">= ", "= ", "< ", "<= ", "> "];
            format!(
                "{}{}.{}.{}",
                prefixes[i % prefixes.len()],
                i % 10,
                (i / 10) % 10,
                (i / 100) % 10
            )
        })
        .collect();

    group.bench_function("mixed_operators", |b| {
        let mut index = 0;
        b.iter(|| {
            let expr = &expressions[index % expressions.len()];
            index += 1;
            black_box(Constraint::parse(expr))
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_manifest_parsing, bench_constraint_parsing
}
criterion_main!(benches);
