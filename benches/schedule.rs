//! Benchmarks for production scheduling
//!
//! Measures graph building plus Kahn's reduction on long chains and wide
//! fan-outs, the two extremes of single-parent order sets.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use prodplan::graph::DependencyGraph;
use prodplan::{schedule_production, Order};

/// Each order waits on the previous one, listed last-to-first.
fn create_chain(len: usize) -> Vec<Order> {
    (0..len)
        .rev()
        .map(|i| match i {
            0 => Order::new("step-0", 1.0),
            _ => Order::with_dependency(format!("step-{}", i), 1.0, format!("step-{}", i - 1)),
        })
        .collect()
}

/// A single root with `width` dependents, each with `width` dependents of its own.
fn create_fan_out(width: usize) -> Vec<Order> {
    let mut orders = vec![Order::new("root", 1.0)];
    for i in 0..width {
        let mid = format!("mid-{}", i);
        orders.push(Order::with_dependency(mid.clone(), 1.0, "root"));
        for j in 0..width {
            orders.push(Order::with_dependency(format!("leaf-{}-{}", i, j), 1.0, mid.clone()));
        }
    }
    orders
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule_chain");

    for size in [100, 1_000, 10_000] {
        let orders = create_chain(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &orders, |b, orders| {
            b.iter(|| schedule_production(black_box(orders)))
        });
    }

    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule_fan_out");

    for width in [10, 50, 100] {
        let orders = create_fan_out(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &orders, |b, orders| {
            b.iter(|| schedule_production(black_box(orders)))
        });
    }

    group.finish();
}

fn bench_build_only(c: &mut Criterion) {
    let orders = create_fan_out(100);
    c.bench_function("build_graph_fan_out_100", |b| {
        b.iter(|| DependencyGraph::build(black_box(&orders)).map(|g| g.edge_count()))
    });
}

criterion_group!(benches, bench_chain, bench_fan_out, bench_build_only);
criterion_main!(benches);
