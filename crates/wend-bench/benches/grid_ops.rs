//! Criterion micro-benchmarks for the grid primitives.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wend::grid::{flood_fill, Matrix, PriorityArray, SPREAD_8};
use wend::prelude::CellPos;

/// Benchmark: 10K set/min cycles over a 64K-slot priority array.
fn bench_priority_churn(c: &mut Criterion) {
    // Deterministic pseudo-random slots and priorities.
    let ops: Vec<(usize, i32)> = (0u64..10_000)
        .map(|i| {
            let slot = (i.wrapping_mul(6364136223846793005) % 65_536) as usize;
            let priority = (i.wrapping_mul(1442695040888963407) % 1_000_000) as i32;
            (slot, priority)
        })
        .collect();

    c.bench_function("priority_churn_64k", |b| {
        b.iter(|| {
            let mut pa = PriorityArray::new(65_536, i32::MAX);
            for &(slot, priority) in &ops {
                pa.set(slot, priority);
                black_box(pa.min_index());
            }
        });
    });
}

/// Benchmark: flood a radius-40 disk on a 128x128 grid.
fn bench_flood_disk(c: &mut Criterion) {
    c.bench_function("flood_disk_128", |b| {
        b.iter(|| {
            let mut dist = Matrix::new(128, 128, i32::MAX);
            flood_fill(
                128,
                128,
                [(CellPos::new(64, 64), 0)],
                &SPREAD_8,
                |pos, d| {
                    if dist[pos] != i32::MAX {
                        return None;
                    }
                    dist[pos] = d;
                    (d < 40).then(|| d + 1)
                },
            );
            black_box(dist[CellPos::new(24, 64)])
        });
    });
}

criterion_group!(benches, bench_priority_churn, bench_flood_disk);
criterion_main!(benches);
