use std::env;

use criterion::{black_box, BatchSize, Criterion};

use once_cell::sync::OnceCell;

/// Whether `name` passes the `BENCH_FILTER` substring filter. Everything runs if it is unset.
pub fn should_run_benchmark(name: &str) -> bool {
    static FILTER: OnceCell<Option<String>> = OnceCell::new();

    FILTER
        .get_or_init(|| env::var("BENCH_FILTER").ok())
        .as_deref()
        .map_or(true, |filter| name.contains(filter))
}

/// Benchmarks `test_fn` on fresh inputs from `setup`, named
/// `{bench_name}-{transform_name}-{pattern_name}-{test_len}`.
#[inline(never)]
pub fn bench_fn<I>(
    c: &mut Criterion,
    test_len: usize,
    transform_name: &str,
    pattern_name: &str,
    bench_name: &str,
    setup: impl Fn() -> I,
    test_fn: impl Fn(&mut I),
) {
    let name = format!("{bench_name}-{transform_name}-{pattern_name}-{test_len}");
    if !should_run_benchmark(&name) {
        return;
    }

    let batch_size = if test_len > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    c.bench_function(&name, |b| {
        b.iter_batched_ref(
            &setup,
            |input| {
                test_fn(black_box(&mut *input));
                black_box(input); // side-effect
            },
            batch_size,
        )
    });
}
