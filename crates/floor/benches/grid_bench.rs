//! Criterion benchmarks for occupancy grid operations.
//!
//! Benchmarks:
//!   - is_region_free for a free and a blocked 3x2 footprint on a 40x40 room
//!   - clear of one piece from a densely furnished room
//!   - resize of a furnished room (shrink and grow)
//!
//! Run with: cargo bench -p floor --bench grid_bench

use bevy::math::{IVec2, UVec2};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use floor::config::DEFAULT_MAX_ROOM_SIDE;
use floor::{FurnitureId, GridStore};

/// A room of the largest configurable size with 2x2 pieces on every other
/// block, leaving one-cell aisles.
fn furnished_grid() -> GridStore {
    let side = DEFAULT_MAX_ROOM_SIDE;
    let mut grid = GridStore::new(side, side);
    let mut next = 0;
    for y in (0..side as i32 - 1).step_by(3) {
        for x in (0..side as i32 - 1).step_by(3) {
            grid.occupy(IVec2::new(x, y), UVec2::new(2, 2), FurnitureId(next));
            next += 1;
        }
    }
    grid
}

// ---------------------------------------------------------------------------
// Benchmark: region checks
// ---------------------------------------------------------------------------

fn bench_region_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_region_check");
    group.sample_size(1000);

    let empty = GridStore::new(DEFAULT_MAX_ROOM_SIDE, DEFAULT_MAX_ROOM_SIDE);
    let furnished = furnished_grid();

    group.bench_function("free_3x2", |b| {
        b.iter(|| {
            black_box(empty.is_region_free(
                black_box(IVec2::new(20, 20)),
                black_box(UVec2::new(3, 2)),
                None,
            ))
        });
    });

    group.bench_function("blocked_3x2", |b| {
        b.iter(|| {
            black_box(furnished.is_region_free(
                black_box(IVec2::new(1, 1)),
                black_box(UVec2::new(3, 2)),
                None,
            ))
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: clear and resize
// ---------------------------------------------------------------------------

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_mutation");

    let furnished = furnished_grid();

    group.bench_function("clear_one_piece", |b| {
        b.iter_batched(
            || furnished.clone(),
            |mut grid| black_box(grid.clear(black_box(FurnitureId(50)))),
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("resize_shrink_40_to_20", |b| {
        b.iter(|| black_box(furnished.resize(black_box(20), black_box(20))));
    });

    group.bench_function("resize_grow_40_to_60", |b| {
        b.iter(|| black_box(furnished.resize(black_box(60), black_box(60))));
    });

    group.finish();
}

criterion_group!(benches, bench_region_checks, bench_mutations);
criterion_main!(benches);
