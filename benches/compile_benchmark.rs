//! Benchmarks for outline compilation.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic outlines of configurable width and depth.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use outline_tasks::{compile, flatten, parse_inclusion, CompileOptions, IntervalSet, OutlineNode};

/// Creates a complete tree with `width` children per node, `depth` levels deep.
fn create_outline(width: usize, depth: usize) -> OutlineNode {
    fn level(prefix: &str, width: usize, depth: usize) -> Vec<OutlineNode> {
        if depth == 0 {
            return Vec::new();
        }
        (0..width)
            .map(|i| {
                let label = format!("{}{}.", prefix, i + 1);
                let mut node = OutlineNode::labeled(label.clone());
                node.children = level(&label, width, depth - 1);
                node
            })
            .collect()
    }

    let mut root = OutlineNode::root();
    root.children = level("", width, depth);
    root
}

/// Benchmark flattening at various shapes.
fn bench_flatten(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten");

    for (width, depth) in [(10, 3), (4, 6), (1000, 1)] {
        let outline = create_outline(width, depth);
        group.bench_function(format!("{}x{}", width, depth), |b| {
            b.iter(|| flatten(black_box(&outline)));
        });
    }

    group.finish();
}

/// Benchmark the full pipeline with and without an inclusion filter.
fn bench_compile(c: &mut Criterion) {
    let outline = create_outline(10, 4);
    let options = CompileOptions::new()
        .with_todo_depth(2)
        .with_heading_span(2)
        .with_checklist_span(1)
        .with_title("Bench");
    let filtered = options
        .clone()
        .with_inclusion("0-500,1000-1500,2000-2500,5000-9000");

    c.bench_function("compile_10x4", |b| {
        b.iter(|| compile(Some(black_box(&outline)), &options).unwrap());
    });

    c.bench_function("compile_10x4_filtered", |b| {
        b.iter(|| compile(Some(black_box(&outline)), &filtered).unwrap());
    });
}

/// Benchmark interval membership for many discontiguous ranges.
fn bench_interval_lookup(c: &mut Criterion) {
    let spec: Vec<String> = (0..500).map(|i| format!("{}-{}", i * 10, i * 10 + 4)).collect();
    let set: IntervalSet<usize> = parse_inclusion(&spec.join(",")).unwrap();

    c.bench_function("interval_has_500_ranges", |b| {
        b.iter(|| (0..5000).filter(|i| set.has(black_box(*i))).count());
    });
}

criterion_group!(benches, bench_flatten, bench_compile, bench_interval_lookup);
criterion_main!(benches);
