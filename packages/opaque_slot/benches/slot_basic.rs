//! Basic benchmarks for the `opaque_slot` crate.
//!
//! The allocation report at the end doubles as evidence for the core claim:
//! slot operations perform zero heap allocations.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::time::Instant;

use alloc_tracker::Allocator;
use criterion::{Criterion, criterion_group, criterion_main};
use opaque_slot::align::Align8;
use opaque_slot::{OpaqueSlot, Swappable};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

#[global_allocator]
static ALLOCATOR: Allocator<std::alloc::System> = Allocator::system();

type TestItem = u64;
const TEST_VALUE: TestItem = 1024;

type TestSlot = OpaqueSlot<TestItem, { size_of::<TestItem>() }, Align8>;

#[derive(Clone)]
struct Wide {
    data: [u64; 16],
}

impl Swappable for Wide {}

type WideSlot = OpaqueSlot<Wide, { size_of::<Wide>() }, Align8>;

fn entrypoint(c: &mut Criterion) {
    let allocs = alloc_tracker::Session::new();

    let mut group = c.benchmark_group("slot_basic");

    let allocs_op = allocs.operation("new_drop");
    group.bench_function("new_drop", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(TestSlot::new(black_box(TEST_VALUE))));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("read_one");
    group.bench_function("read_one", |b| {
        b.iter_custom(|iters| {
            let slot = TestSlot::new(TEST_VALUE);

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                _ = black_box(*black_box(&slot));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("clone_one");
    group.bench_function("clone_one", |b| {
        b.iter_custom(|iters| {
            let slot = WideSlot::new(Wide { data: [7; 16] });

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(black_box(&slot).clone()));
            }

            let elapsed = start.elapsed();

            _ = black_box(slot.data);

            elapsed
        });
    });

    let allocs_op = allocs.operation("swap_pair");
    group.bench_function("swap_pair", |b| {
        b.iter_custom(|iters| {
            let mut a = WideSlot::new(Wide { data: [1; 16] });
            let mut b_slot = WideSlot::new(Wide { data: [2; 16] });

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                a.swap_with(black_box(&mut b_slot));
            }

            start.elapsed()
        });
    });

    group.finish();

    allocs.print_to_stdout();
}
