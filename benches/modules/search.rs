use criterion::{black_box, Criterion};

use sort_test_tools::patterns;
use sortkit::SearchOptions;

use crate::modules::util;

/// Searches every probe value once per iteration, with sortkit's options against the matching
/// std `partition_point` calls.
pub fn bench(c: &mut Criterion, test_len: usize, distinct: i32) {
    let vals = patterns::sorted_dup(test_len, distinct);
    let probes = patterns::probes(&vals);
    let pattern_name = format!("d{distinct}");

    let input = || probes.clone();

    let variants: [(&str, SearchOptions); 3] = [
        ("sortkit_search_any", SearchOptions::empty()),
        ("sortkit_search_first", SearchOptions::FIRST_EQUAL),
        (
            "sortkit_search_insert_last",
            SearchOptions::INSERTION_INDEX | SearchOptions::LAST_EQUAL,
        ),
    ];

    for (bench_name, options) in variants {
        util::bench_fn(c, test_len, "i32", &pattern_name, bench_name, input, |probes| {
            for probe in probes.iter() {
                let _ = black_box(sortkit::search(&vals, probe, .., options));
            }
        });
    }

    util::bench_fn(
        c,
        test_len,
        "i32",
        &pattern_name,
        "rust_std_partition_point",
        input,
        |probes| {
            for probe in probes.iter() {
                black_box(vals.partition_point(|x| x < probe));
            }
        },
    );
}
