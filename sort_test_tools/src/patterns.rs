use std::env;
use std::str::FromStr;
use std::sync::Mutex;

use rand::prelude::*;

use zipf::ZipfDistribution;

/// Input patterns for testing and benchmarking the sorts and searches.
///
/// All values derive from one seed per process, see [`random_init_seed`].

// --- Public ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = new_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    // :.:.:.::

    let mut rng = new_rng();
    let dist: rand::distributions::Uniform<i32> = range.into();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    // Few values dominate, https://en.wikipedia.org/wiki/Zipf's_law

    if len == 0 {
        return Vec::new();
    }

    let mut rng = new_rng();
    let dist = ZipfDistribution::new(len, exponent).unwrap();

    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]
    // sorted  unsorted tail

    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;
    v[..sorted_len].sort_unstable();

    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunk_len = (len / saw_count.max(1)).max(1);
    let directions = random_uniform(len / chunk_len + 1, 0..=1);

    for (chunk, direction) in vals.chunks_mut(chunk_len).zip(directions) {
        if direction == 0 {
            chunk.sort_unstable();
        } else {
            chunk.sort_unstable_by(|a, b| b.cmp(a));
        }
    }

    vals
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut vals = random(len);
    let (up, down) = vals.split_at_mut(len / 2);
    up.sort_unstable();
    down.sort_unstable_by(|a, b| b.cmp(a));

    vals
}

/// Sorted values drawn from `0..distinct`, so runs of equal elements are likely.
pub fn sorted_dup(len: usize, distinct: i32) -> Vec<i32> {
    // ..::::
    // ::::::

    let mut vals = random_uniform(len, 0..distinct.max(1));
    vals.sort_unstable();

    vals
}

/// Values worth searching for in the sorted `vals`: every distinct element, the gaps between
/// them and both ends.
pub fn probes(vals: &[i32]) -> Vec<i32> {
    let mut probes = vec![i32::MIN, i32::MAX];

    for window in vals.windows(2) {
        if window[0] < window[1].saturating_sub(1) {
            probes.push(window[0] + 1);
        }
    }

    probes.extend_from_slice(vals);
    if let Some(first) = vals.first() {
        probes.push(first.saturating_sub(1));
    }
    if let Some(last) = vals.last() {
        probes.push(last.saturating_add(1));
    }

    probes.sort_unstable();
    probes.dedup();

    probes
}

/// `count` random subranges of `0..len`.
pub fn random_ranges(len: usize, count: usize) -> Vec<std::ops::Range<usize>> {
    let bounds = random_uniform(count * 2, 0..=(len as i32));

    bounds
        .chunks_exact(2)
        .map(|pair| {
            let (a, b) = (pair[0] as usize, pair[1] as usize);
            a.min(b)..a.max(b)
        })
        .collect()
}

/// Makes every random pattern call draw a fresh seed.
///
/// By default `patterns::random(4)` yields the same values for the whole process. Benchmarks
/// should call this so repeated inputs don't train the branch predictor.
pub fn use_random_seed_each_time() {
    let (seed_type, _) = seed_type_and_value();
    if seed_type == SeedType::ExternalOverride {
        panic!("use_random_seed_each_time conflicts with OVERRIDE_SEED");
    }

    *SEED_TYPE_AND_VALUE.lock().unwrap() = Some((SeedType::RandomEachTime, 0));
}

/// The seed the random patterns derive from. Set `OVERRIDE_SEED` to reproduce a failure.
pub fn random_init_seed() -> u64 {
    seed_type_and_value().1
}

// --- Private ---

#[derive(Copy, Clone, PartialEq, Eq)]
enum SeedType {
    RandomEachTime,
    RandomOncePerProcess,
    ExternalOverride,
}

static SEED_TYPE_AND_VALUE: Mutex<Option<(SeedType, u64)>> = Mutex::new(None);

fn seed_type_and_value() -> (SeedType, u64) {
    let (seed_type, seed) = *SEED_TYPE_AND_VALUE.lock().unwrap().get_or_insert_with(|| {
        match env::var("OVERRIDE_SEED") {
            Ok(seed) => (SeedType::ExternalOverride, u64::from_str(&seed).unwrap()),
            Err(_) => (SeedType::RandomOncePerProcess, thread_rng().gen()),
        }
    });

    match seed_type {
        SeedType::RandomEachTime => (seed_type, thread_rng().gen()),
        _ => (seed_type, seed),
    }
}

fn new_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}
