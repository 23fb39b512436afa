use std::cmp::Ordering;
use std::convert::Infallible;
use std::env;

use criterion::{black_box, Criterion};

use sortkit::{ComparisonResult, SortDescriptor};

use crate::modules::util;

/// A stable sort entry point, boxed behind a name so sortkit and std can share the harness.
struct SortFn<T> {
    name: &'static str,
    sort_by: fn(&mut [T], &mut dyn FnMut(&T, &T) -> Ordering),
}

fn sort_fns<T>() -> [SortFn<T>; 2] {
    [
        SortFn {
            name: "sortkit_stable",
            sort_by: |v, compare| sortkit::sort_by(v, compare),
        },
        SortFn {
            name: "rust_std_stable",
            sort_by: |v, compare| v.sort_by(compare),
        },
    ]
}

fn measure_comp_count<T: Ord>(
    name: &str,
    test_len: usize,
    sort_fn: &SortFn<T>,
    input: impl Fn() -> Vec<T>,
) {
    let run_count: usize = if test_len <= 20 {
        10_000
    } else if test_len < 10_000 {
        300
    } else {
        10
    };

    let mut comp_count = 0u64;

    for _ in 0..run_count {
        let mut test_data = input();
        (sort_fn.sort_by)(black_box(test_data.as_mut_slice()), &mut |a, b| {
            comp_count += 1;
            a.cmp(b)
        });
    }

    let mean = comp_count / (run_count as u64);
    println!("{name}: mean comparisons: {mean}");
}

pub fn bench<T: Ord>(
    c: &mut Criterion,
    test_len: usize,
    transform_name: &str,
    transform: &fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
) {
    let input = || transform(pattern_provider(test_len));

    for sort_fn in sort_fns::<T>() {
        if env::var("MEASURE_COMP").is_ok() {
            let name = format!(
                "{}-comp-{transform_name}-{pattern_name}-{test_len}",
                sort_fn.name
            );

            if util::should_run_benchmark(&name) {
                measure_comp_count(&name, test_len, &sort_fn, input);
            }
            continue;
        }

        util::bench_fn(
            c,
            test_len,
            transform_name,
            pattern_name,
            sort_fn.name,
            input,
            |v| (sort_fn.sort_by)(v.as_mut_slice(), &mut |a, b| a.cmp(b)),
        );
    }
}

/// Fallible comparators and descriptor chains over `(i32, i32)` pairs, against the infallible
/// `sort_by`.
pub fn bench_chain(
    c: &mut Criterion,
    test_len: usize,
    pattern_name: &str,
    vals: &fn(usize) -> Vec<i32>,
) {
    let input = || {
        vals(test_len)
            .into_iter()
            .map(|val| (val % 16, val))
            .collect::<Vec<_>>()
    };

    util::bench_fn(
        c,
        test_len,
        "pair",
        pattern_name,
        "sortkit_sort_by",
        input,
        |v| sortkit::sort_by(v, |a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1))),
    );

    util::bench_fn(
        c,
        test_len,
        "pair",
        pattern_name,
        "sortkit_try_sort_by",
        input,
        |v| {
            let res = sortkit::try_sort_by(v, |a, b| {
                Ok::<_, Infallible>(ComparisonResult::from_ordering(
                    a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)),
                ))
            });
            let _ = black_box(res);
        },
    );

    let chain = [
        SortDescriptor::<(i32, i32)>::keyed(|p| p.0, true),
        SortDescriptor::keyed(|p: &(i32, i32)| p.1, false),
    ];

    util::bench_fn(
        c,
        test_len,
        "pair",
        pattern_name,
        "sortkit_descriptors",
        input,
        |v| {
            let _ = black_box(sortkit::sort_by_descriptors(v, &chain));
        },
    );
}
