//! Stable merge sort driven by a fallible comparator or a chain of sort descriptors.
//!
//! The sort never moves elements while comparing. It computes the sorted order as a permutation
//! of indices with a natural merge sort in the style of TimSort: find presorted streaks, extend
//! short ones with insertion sort, and merge adjacent runs while keeping the run stack balanced.
//! Only once every comparison succeeded is the permutation committed, either by cloning into a
//! new vector or by applying it in place with swaps. A failing comparator therefore leaves the
//! input exactly as it was.

use std::cmp::{self, Ordering};
use std::convert::Infallible;

use crate::comparison::ComparisonResult;
use crate::descriptor::{apply_chain, SortDescriptor};
use crate::error::Error;
use crate::sequence::{Sequence, SequenceMut};

/// Streaks shorter than this are extended with insertion sort before merging.
pub const MIN_INSERTION_RUN: usize = 10;

// --- Public ---

/// Sorts `seq` in place with a fallible comparator, preserving the order of elements that compare
/// `Same`.
///
/// Performs *O*(*n* \* log(*n*)) comparisons and allocates two index buffers of at most
/// `seq.len()` entries.
///
/// # Errors
///
/// [`Error::Comparator`] with the first error `compare` returns. `seq` is unchanged in that case.
///
/// # Examples
///
/// ```
/// use sortkit::{try_sort_by, ComparisonResult};
///
/// let mut v = vec!["b1", "a1", "b2", "a2"];
/// try_sort_by(&mut v, |a, b| Ok::<_, ()>(ComparisonResult::of(&a[..1], &b[..1]))).unwrap();
/// assert_eq!(v, ["a1", "a2", "b1", "b2"]);
/// ```
pub fn try_sort_by<S, E, F>(seq: &mut S, compare: F) -> Result<(), Error<E>>
where
    S: SequenceMut + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Result<ComparisonResult, E>,
{
    tracing::trace!(len = seq.len(), "stable sort in place");

    let perm = sorted_permutation(&*seq, compare).map_err(comparator_failed)?;
    apply_permutation(seq, perm);

    Ok(())
}

/// Returns the elements of `seq` in stable sorted order, leaving `seq` untouched.
///
/// # Errors
///
/// [`Error::Comparator`] with the first error `compare` returns.
pub fn try_sorted_by<S, E, F>(seq: &S, compare: F) -> Result<Vec<S::Item>, Error<E>>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
    F: FnMut(&S::Item, &S::Item) -> Result<ComparisonResult, E>,
{
    tracing::trace!(len = seq.len(), "stable sort into copy");

    let perm = sorted_permutation(seq, compare).map_err(comparator_failed)?;

    Ok(perm.into_iter().map(|i| seq.get(i).clone()).collect())
}

/// Sorts `seq` in place by the descriptors of `chain`, earlier descriptors taking priority.
///
/// Elements the whole chain considers the same keep their relative order.
///
/// # Errors
///
/// [`Error::Comparator`] with the first error a descriptor returns. `seq` is unchanged in that
/// case.
pub fn sort_by_descriptors<S, E>(
    seq: &mut S,
    chain: &[SortDescriptor<S::Item, E>],
) -> Result<(), Error<E>>
where
    S: SequenceMut + ?Sized,
{
    try_sort_by(seq, |a, b| apply_chain(chain, a, b))
}

/// Returns the elements of `seq` sorted by the descriptors of `chain`.
///
/// # Errors
///
/// [`Error::Comparator`] with the first error a descriptor returns.
pub fn sorted_by_descriptors<S, E>(
    seq: &S,
    chain: &[SortDescriptor<S::Item, E>],
) -> Result<Vec<S::Item>, Error<E>>
where
    S: Sequence + ?Sized,
    S::Item: Clone,
{
    try_sorted_by(seq, |a, b| apply_chain(chain, a, b))
}

/// Collects `items` and sorts them by the descriptors of `chain`.
///
/// Meant for collections without a meaningful order of their own, such as sets. Ties are kept in
/// iteration order.
///
/// # Errors
///
/// [`Error::Comparator`] with the first error a descriptor returns.
pub fn sorted_from_iter<I, E>(
    items: I,
    chain: &[SortDescriptor<I::Item, E>],
) -> Result<Vec<I::Item>, Error<E>>
where
    I: IntoIterator,
{
    let mut items = items.into_iter().collect::<Vec<_>>();
    sort_by_descriptors(&mut items, chain)?;

    Ok(items)
}

/// Sorts `seq` in place, preserving the order of equal elements.
#[inline]
pub fn sort<S>(seq: &mut S)
where
    S: SequenceMut + ?Sized,
    S::Item: Ord,
{
    sort_by(seq, Ord::cmp);
}

/// Sorts `seq` in place with an [`Ordering`] comparator, preserving the order of equal elements.
///
/// # Examples
///
/// ```
/// let mut v = [5, 4, 1, 3, 2];
/// sortkit::sort_by(&mut v, |a, b| b.cmp(a));
/// assert_eq!(v, [5, 4, 3, 2, 1]);
/// ```
#[inline]
pub fn sort_by<S, F>(seq: &mut S, mut compare: F)
where
    S: SequenceMut + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    let perm = match sorted_permutation(&*seq, |a, b| {
        Ok::<_, Infallible>(ComparisonResult::from_ordering(compare(a, b)))
    }) {
        Ok(perm) => perm,
        Err(never) => match never {},
    };

    apply_permutation(seq, perm);
}

/// Sorts `seq` in place by the key `extract` returns, preserving the order of equal keys.
#[inline]
pub fn sort_by_key<S, K, X>(seq: &mut S, mut extract: X)
where
    S: SequenceMut + ?Sized,
    K: Ord,
    X: FnMut(&S::Item) -> K,
{
    sort_by(seq, |a, b| extract(a).cmp(&extract(b)));
}

/// Returns the elements of `seq` in stable sorted order.
pub fn sorted<S>(seq: &S) -> Vec<S::Item>
where
    S: Sequence + ?Sized,
    S::Item: Ord + Clone,
{
    let perm = match sorted_permutation(seq, |a, b| {
        Ok::<_, Infallible>(ComparisonResult::of(a, b))
    }) {
        Ok(perm) => perm,
        Err(never) => match never {},
    };

    perm.into_iter().map(|i| seq.get(i).clone()).collect()
}

// --- IMPL ---

fn comparator_failed<E>(err: E) -> Error<E> {
    tracing::debug!("comparator failed, sort aborted with input unchanged");
    Error::Comparator(err)
}

/// Returns `perm` such that `seq[perm[0]], seq[perm[1]], ...` is the stable sorted order.
fn sorted_permutation<S, E, F>(seq: &S, mut compare: F) -> Result<Vec<usize>, E>
where
    S: Sequence + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Result<ComparisonResult, E>,
{
    let mut perm = (0..seq.len()).collect::<Vec<_>>();

    merge_sort(&mut perm, &mut |&a: &usize, &b: &usize| -> Result<bool, E> {
        Ok(compare(seq.get(a), seq.get(b))?.is_ascending())
    })?;

    Ok(perm)
}

/// Moves `seq[perm[i]]` to position `i` for every `i`, using at most `seq.len()` swaps.
///
/// `perm` is consumed as scratch space, every entry is reset to its own index once that position
/// holds its final element.
fn apply_permutation<S>(seq: &mut S, mut perm: Vec<usize>)
where
    S: SequenceMut + ?Sized,
{
    debug_assert_eq!(perm.len(), seq.len());

    for start in 0..perm.len() {
        let mut pos = start;

        // Walk the cycle through `start`, pulling each element into place.
        while perm[pos] != start {
            let src = perm[pos];
            seq.swap(pos, src);
            perm[pos] = pos;
            pos = src;
        }

        perm[pos] = pos;
    }
}

#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn merge_sort<E, F>(v: &mut [usize], is_less: &mut F) -> Result<(), E>
where
    F: FnMut(&usize, &usize) -> Result<bool, E>,
{
    let len = v.len();

    if len < 2 {
        // These inputs are always sorted.
        return Ok(());
    }

    // The shorter of two runs is copied out for merging, half the length is always enough.
    let mut buf = Vec::with_capacity(len / 2);
    let mut runs = Vec::new();

    let mut end = 0;
    let mut start = 0;

    while end < len {
        let (streak_end, was_reversed) = find_streak(&v[start..], is_less)?;
        end += streak_end;
        if was_reversed {
            v[start..end].reverse();
        }

        end = provide_sorted_batch(v, start, end, is_less)?;

        // Push this run onto the stack.
        runs.push(TimSortRun {
            start,
            len: end - start,
        });
        start = end;

        // Merge some pairs of adjacent runs to satisfy the invariants.
        while let Some(r) = collapse(&runs, len) {
            let left = runs[r];
            let right = runs[r + 1];
            merge(
                &mut v[left.start..right.start + right.len],
                left.len,
                &mut buf,
                is_less,
            )?;
            runs[r + 1] = TimSortRun {
                start: left.start,
                len: left.len + right.len,
            };
            runs.remove(r);
        }
    }

    // Finally, exactly one run must remain in the stack.
    debug_assert!(runs.len() == 1 && runs[0].start == 0 && runs[0].len == len);

    Ok(())
}

/// Examines the stack of runs and identifies the next pair of runs to merge. If `Some(r)` is
/// returned, `runs[r]` and `runs[r + 1]` must be merged next. `None` means a new run should be
/// built first.
///
/// The invariants are enforced on the top four runs, enforcing them on just the top three is not
/// enough to keep them for the whole stack. If the top run ends at `stop`, a merge is always
/// demanded until the stack is fully collapsed.
#[inline]
fn collapse(runs: &[TimSortRun], stop: usize) -> Option<usize> {
    let n = runs.len();
    if n >= 2
        && (runs[n - 1].start + runs[n - 1].len == stop
            || runs[n - 2].len <= runs[n - 1].len
            || (n >= 3 && runs[n - 3].len <= runs[n - 2].len + runs[n - 1].len)
            || (n >= 4 && runs[n - 4].len <= runs[n - 3].len + runs[n - 2].len))
    {
        if n >= 3 && runs[n - 3].len < runs[n - 1].len {
            Some(n - 3)
        } else {
            Some(n - 2)
        }
    } else {
        None
    }
}

/// Internal type used by merge_sort.
#[derive(Clone, Copy, Debug)]
struct TimSortRun {
    len: usize,
    start: usize,
}

/// Finds a streak of presorted elements starting at the beginning of the slice. Returns the first
/// value that is not part of said streak, and a bool denoting whether the streak was reversed.
///
/// Only strictly descending streaks count as reversed, so reversing them keeps equal elements in
/// order.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn find_streak<E, F>(v: &[usize], is_less: &mut F) -> Result<(usize, bool), E>
where
    F: FnMut(&usize, &usize) -> Result<bool, E>,
{
    let len = v.len();

    if len < 2 {
        return Ok((len, false));
    }

    let mut end = 2;

    if is_less(&v[1], &v[0])? {
        while end < len && is_less(&v[end], &v[end - 1])? {
            end += 1;
        }

        Ok((end, true))
    } else {
        while end < len && !is_less(&v[end], &v[end - 1])? {
            end += 1;
        }

        Ok((end, false))
    }
}

/// Extends the sorted run `v[start..end]` to at least `MIN_INSERTION_RUN` elements, unless the
/// end of `v` comes first. Returns the new end of the run.
fn provide_sorted_batch<E, F>(
    v: &mut [usize],
    start: usize,
    end: usize,
    is_less: &mut F,
) -> Result<usize, E>
where
    F: FnMut(&usize, &usize) -> Result<bool, E>,
{
    let len = v.len();
    debug_assert!(end >= start && end <= len);

    let start_end_diff = end - start;

    if start_end_diff < MIN_INSERTION_RUN && end < len {
        // v[start..end] is already sorted, push elements from the right into it.
        let end = cmp::min(start + MIN_INSERTION_RUN, len);
        let presorted_start = cmp::max(start_end_diff, 1);

        insertion_sort_shift_left(&mut v[start..end], presorted_start, is_less)?;

        return Ok(end);
    }

    Ok(end)
}

/// Sorts `v` assuming `v[..offset]` is already sorted, by shifting each following element left
/// past all elements greater than it.
fn insertion_sort_shift_left<E, F>(v: &mut [usize], offset: usize, is_less: &mut F) -> Result<(), E>
where
    F: FnMut(&usize, &usize) -> Result<bool, E>,
{
    let len = v.len();
    debug_assert!(offset != 0 && offset <= len);

    for i in offset..len {
        let tmp = v[i];
        let mut hole = i;

        // Strictly less, so the new element stays behind its equals.
        while hole > 0 && is_less(&tmp, &v[hole - 1])? {
            v[hole] = v[hole - 1];
            hole -= 1;
        }

        v[hole] = tmp;
    }

    Ok(())
}

/// Merges non-decreasing runs `v[..mid]` and `v[mid..]` using `buf` as temporary storage, and
/// stores the result into `v[..]`.
///
/// If `is_less` fails the contents of `v` are unspecified, the caller discards them.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn merge<E, F>(v: &mut [usize], mid: usize, buf: &mut Vec<usize>, is_less: &mut F) -> Result<(), E>
where
    F: FnMut(&usize, &usize) -> Result<bool, E>,
{
    let len = v.len();
    debug_assert!(mid > 0 && mid < len);

    // The runs are already in order relative to each other.
    if !is_less(&v[mid], &v[mid - 1])? {
        return Ok(());
    }

    // The shorter run is copied into `buf`. Then it and the longer run are traced forwards (or
    // backwards), always moving the lesser (or greater) unconsumed element into `v`. Whatever is
    // left in `buf` once the longer run is consumed fills the remaining gap.
    buf.clear();

    if mid <= len - mid {
        // The left run is shorter.
        buf.extend_from_slice(&v[..mid]);

        let mut left = 0;
        let mut right = mid;
        let mut out = 0;

        while left < buf.len() && right < len {
            // Consume the lesser side.
            // If equal, prefer the left run to maintain stability.
            if is_less(&v[right], &buf[left])? {
                v[out] = v[right];
                right += 1;
            } else {
                v[out] = buf[left];
                left += 1;
            }
            out += 1;
        }

        let rest = &buf[left..];
        v[out..out + rest.len()].copy_from_slice(rest);
    } else {
        // The right run is shorter.
        buf.extend_from_slice(&v[mid..]);

        let mut left = mid;
        let mut right = buf.len();
        let mut out = len;

        while left > 0 && right > 0 {
            out -= 1;
            // Consume the greater side.
            // If equal, prefer the right run to maintain stability.
            if is_less(&buf[right - 1], &v[left - 1])? {
                left -= 1;
                v[out] = v[left];
            } else {
                right -= 1;
                v[out] = buf[right];
            }
        }

        // Either run is consumed, `out == left + right` and only `buf[..right]` may remain.
        v[..right].copy_from_slice(&buf[..right]);
    }

    Ok(())
}
