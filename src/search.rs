//! Binary search over a sorted range of a [`Sequence`].
//!
//! Everything here is built from two bisections: the lower bound, the first index whose element
//! does not compare `Ascending` to the value, and the upper bound, the first index whose element
//! compares `Descending`. [`SearchOptions`] pick which of them answers the query.
//!
//! The searched range must be sorted under the supplied comparator. That is not checked, a search
//! over an unsorted range returns an unspecified index or [`NOT_FOUND`], but never fails or reads
//! out of bounds.

use std::convert::Infallible;
use std::fmt;
use std::iter;
use std::ops::{BitOr, BitOrAssign, Bound, Range, RangeBounds};

use crate::comparison::ComparisonResult;
use crate::error::Error;
use crate::sequence::{Sequence, Splice};

/// Returned by [`search_by`] when no element matches.
///
/// No index into a sequence and no insertion point can be `usize::MAX`, a sequence of
/// `usize::MAX` elements has its last insertion point at `usize::MAX` only if it holds zero sized
/// elements, which this crate can not meaningfully search.
pub const NOT_FOUND: usize = usize::MAX;

/// Set of flags selecting which matching index a search returns.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchOptions(u8);

impl SearchOptions {
    /// Return the lowest index of the run of equal elements.
    pub const FIRST_EQUAL: Self = Self(1 << 0);
    /// Return the highest index of the run of equal elements, or with `INSERTION_INDEX` the index
    /// right after it.
    pub const LAST_EQUAL: Self = Self(1 << 1);
    /// Return the index at which the value would be inserted instead of `NOT_FOUND`.
    pub const INSERTION_INDEX: Self = Self(1 << 2);

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `FIRST_EQUAL` and `LAST_EQUAL` exclude each other, every other combination is valid.
    #[inline]
    pub const fn is_valid(self) -> bool {
        !self.contains(Self::FIRST_EQUAL.union(Self::LAST_EQUAL))
    }
}

impl BitOr for SearchOptions {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for SearchOptions {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for SearchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::FIRST_EQUAL, "FIRST_EQUAL"),
            (Self::LAST_EQUAL, "LAST_EQUAL"),
            (Self::INSERTION_INDEX, "INSERTION_INDEX"),
        ];

        let mut set = f.debug_set();
        for (flag, name) in names {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

// --- Public ---

/// Searches `range` of the sorted `seq` for `value`.
///
/// `compare` is called as `compare(element, value)` and must order the range non-descending.
/// Returns an absolute index into `seq`, or [`NOT_FOUND`]:
///
/// | options | equal element exists | none equal |
/// |---|---|---|
/// | none | index of some equal element | `NOT_FOUND` |
/// | `FIRST_EQUAL` | lowest equal index | `NOT_FOUND` |
/// | `LAST_EQUAL` | highest equal index | `NOT_FOUND` |
/// | `INSERTION_INDEX` | lower bound | lower bound |
/// | `INSERTION_INDEX \| FIRST_EQUAL` | lower bound | lower bound |
/// | `INSERTION_INDEX \| LAST_EQUAL` | upper bound | lower bound |
///
/// An empty range yields `NOT_FOUND`, or `range.start` with `INSERTION_INDEX`. At most
/// *O*(log(*n*)) comparisons are made, the first failing comparison aborts the search.
///
/// # Errors
///
/// [`Error::InvalidOptions`] if both `FIRST_EQUAL` and `LAST_EQUAL` are set,
/// [`Error::InvalidRange`] if `range` is not inside `0..=seq.len()`, [`Error::Comparator`] if
/// `compare` fails. Arguments are checked before the first comparison.
///
/// # Examples
///
/// ```
/// use sortkit::{search_by, ComparisonResult, SearchOptions};
///
/// let v = [0, 1, 2, 2, 3, 4, 4, 6, 7, 7, 7, 8, 9, 9];
/// let cmp = |a: &i32, b: &i32| Ok::<_, ()>(ComparisonResult::of(a, b));
///
/// assert_eq!(search_by(&v, &9, 7..13, SearchOptions::FIRST_EQUAL, cmp), Ok(12));
/// assert_eq!(search_by(&v, &2, 1..8, SearchOptions::LAST_EQUAL, cmp), Ok(3));
/// ```
pub fn search_by<S, V, E, F>(
    seq: &S,
    value: &V,
    range: impl RangeBounds<usize>,
    options: SearchOptions,
    mut compare: F,
) -> Result<usize, Error<E>>
where
    S: Sequence + ?Sized,
    V: ?Sized,
    F: FnMut(&S::Item, &V) -> Result<ComparisonResult, E>,
{
    if !options.is_valid() {
        tracing::debug!(?options, "rejected search options");
        return Err(Error::InvalidOptions);
    }

    let range = resolve_range(&range, seq.len())?;

    tracing::trace!(
        len = seq.len(),
        start = range.start,
        end = range.end,
        ?options,
        "search"
    );

    search_resolved(seq, value, range, options, &mut compare).map_err(comparator_failed)
}

/// [`search_by`] using the [`Ord`] implementation of the elements.
pub fn search<S, T>(
    seq: &S,
    value: &T,
    range: impl RangeBounds<usize>,
    options: SearchOptions,
) -> Result<usize, Error>
where
    S: Sequence<Item = T> + ?Sized,
    T: Ord,
{
    search_by(seq, value, range, options, |elem, value| {
        Ok(ComparisonResult::of(elem, value))
    })
}

/// [`search_by`] comparing the key `extract` derives from each element with `key`.
///
/// The range must be sorted by the extracted key.
pub fn search_by_key<S, K, F>(
    seq: &S,
    key: &K,
    range: impl RangeBounds<usize>,
    options: SearchOptions,
    mut extract: F,
) -> Result<usize, Error>
where
    S: Sequence + ?Sized,
    K: Ord,
    F: FnMut(&S::Item) -> K,
{
    search_by(seq, key, range, options, |elem, key| {
        Ok(ComparisonResult::of(&extract(elem), key))
    })
}

/// Returns the first index in `range` whose element does not compare `Ascending` to `value`, or
/// `range.end` if there is none.
pub fn lower_bound_by<S, V, E, F>(
    seq: &S,
    value: &V,
    range: impl RangeBounds<usize>,
    mut compare: F,
) -> Result<usize, Error<E>>
where
    S: Sequence + ?Sized,
    V: ?Sized,
    F: FnMut(&S::Item, &V) -> Result<ComparisonResult, E>,
{
    let range = resolve_range(&range, seq.len())?;
    tracing::trace!(len = seq.len(), start = range.start, end = range.end, "lower bound");

    lower_bound(seq, value, range, &mut compare).map_err(comparator_failed)
}

/// Returns the first index in `range` whose element compares `Descending` to `value`, or
/// `range.end` if there is none.
pub fn upper_bound_by<S, V, E, F>(
    seq: &S,
    value: &V,
    range: impl RangeBounds<usize>,
    mut compare: F,
) -> Result<usize, Error<E>>
where
    S: Sequence + ?Sized,
    V: ?Sized,
    F: FnMut(&S::Item, &V) -> Result<ComparisonResult, E>,
{
    let range = resolve_range(&range, seq.len())?;
    tracing::trace!(len = seq.len(), start = range.start, end = range.end, "upper bound");

    upper_bound(seq, value, range, &mut compare).map_err(comparator_failed)
}

/// Returns the indices of all elements in `range` that compare `Same` to `value`.
///
/// If there are none the returned range is empty and starts at the lower bound.
pub fn equal_range_by<S, V, E, F>(
    seq: &S,
    value: &V,
    range: impl RangeBounds<usize>,
    mut compare: F,
) -> Result<Range<usize>, Error<E>>
where
    S: Sequence + ?Sized,
    V: ?Sized,
    F: FnMut(&S::Item, &V) -> Result<ComparisonResult, E>,
{
    let range = resolve_range(&range, seq.len())?;
    tracing::trace!(len = seq.len(), start = range.start, end = range.end, "equal range");
    let end = range.end;

    let lower = lower_bound(seq, value, range, &mut compare).map_err(comparator_failed)?;
    let upper = upper_bound(seq, value, lower..end, &mut compare).map_err(comparator_failed)?;

    Ok(lower..upper)
}

/// Inserts `item` into the sorted `seq`, after any elements comparing `Same` to it, and returns
/// the index it was stored at.
///
/// # Errors
///
/// [`Error::Comparator`] if `compare` fails, `seq` is left unchanged in that case.
pub fn insert_sorted_by<S, E, F>(seq: &mut S, item: S::Item, compare: F) -> Result<usize, Error<E>>
where
    S: Splice + ?Sized,
    F: FnMut(&S::Item, &S::Item) -> Result<ComparisonResult, E>,
{
    let index = search_by(
        &*seq,
        &item,
        ..,
        SearchOptions::INSERTION_INDEX | SearchOptions::LAST_EQUAL,
        compare,
    )?;

    seq.replace_range(index..index, iter::once(item));

    Ok(index)
}

/// [`insert_sorted_by`] using the [`Ord`] implementation of the elements.
pub fn insert_sorted<S, T>(seq: &mut S, item: T) -> usize
where
    S: Splice<Item = T> + ?Sized,
    T: Ord,
{
    let mut compare = |elem: &T, item: &T| Ok::<_, Infallible>(ComparisonResult::of(elem, item));
    let index = match upper_bound(&*seq, &item, 0..seq.len(), &mut compare) {
        Ok(index) => index,
        Err(never) => match never {},
    };

    seq.replace_range(index..index, iter::once(item));

    index
}

// --- Private ---

pub(crate) fn resolve_range<E>(
    range: &impl RangeBounds<usize>,
    len: usize,
) -> Result<Range<usize>, Error<E>> {
    let start = match range.start_bound() {
        Bound::Included(&start) => Some(start),
        Bound::Excluded(&start) => start.checked_add(1),
        Bound::Unbounded => Some(0),
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1),
        Bound::Excluded(&end) => Some(end),
        Bound::Unbounded => Some(len),
    };

    match (start, end) {
        (Some(start), Some(end)) if start <= end && end <= len => Ok(start..end),
        (start, end) => {
            let start = start.unwrap_or(usize::MAX);
            let end = end.unwrap_or(usize::MAX);
            tracing::debug!(start, end, len, "rejected search range");

            Err(Error::InvalidRange { start, end, len })
        }
    }
}

fn search_resolved<S, V, E, F>(
    seq: &S,
    value: &V,
    range: Range<usize>,
    options: SearchOptions,
    compare: &mut F,
) -> Result<usize, E>
where
    S: Sequence + ?Sized,
    V: ?Sized,
    F: FnMut(&S::Item, &V) -> Result<ComparisonResult, E>,
{
    let Range { start, end } = range;

    if start == end {
        if options.contains(SearchOptions::INSERTION_INDEX) {
            return Ok(start);
        }
        return Ok(NOT_FOUND);
    }

    if options.contains(SearchOptions::INSERTION_INDEX) {
        let lower = lower_bound(seq, value, start..end, compare)?;

        // Past the lower bound everything compares Same or Descending, so the upper bound only
        // differs from it if the run of equal elements is not empty.
        if options.contains(SearchOptions::LAST_EQUAL)
            && lower < end
            && compare(seq.get(lower), value)?.is_same()
        {
            return upper_bound(seq, value, (lower + 1)..end, compare);
        }

        return Ok(lower);
    }

    if options.contains(SearchOptions::FIRST_EQUAL) {
        let lower = lower_bound(seq, value, start..end, compare)?;
        if lower < end && compare(seq.get(lower), value)?.is_same() {
            return Ok(lower);
        }
        return Ok(NOT_FOUND);
    }

    if options.contains(SearchOptions::LAST_EQUAL) {
        let upper = upper_bound(seq, value, start..end, compare)?;
        if upper > start && compare(seq.get(upper - 1), value)?.is_same() {
            return Ok(upper - 1);
        }
        return Ok(NOT_FOUND);
    }

    // Plain search, stop at the first probe that hits.
    let (mut lo, mut hi) = (start, end);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match compare(seq.get(mid), value)? {
            ComparisonResult::Ascending => lo = mid + 1,
            ComparisonResult::Descending => hi = mid,
            ComparisonResult::Same => return Ok(mid),
        }
    }

    Ok(NOT_FOUND)
}

fn comparator_failed<E>(err: E) -> Error<E> {
    tracing::debug!("comparator failed, search aborted");
    Error::Comparator(err)
}

#[inline]
fn lower_bound<S, V, E, F>(
    seq: &S,
    value: &V,
    range: Range<usize>,
    compare: &mut F,
) -> Result<usize, E>
where
    S: Sequence + ?Sized,
    V: ?Sized,
    F: FnMut(&S::Item, &V) -> Result<ComparisonResult, E>,
{
    partition_point(range, |i| Ok(compare(seq.get(i), value)?.is_ascending()))
}

#[inline]
fn upper_bound<S, V, E, F>(
    seq: &S,
    value: &V,
    range: Range<usize>,
    compare: &mut F,
) -> Result<usize, E>
where
    S: Sequence + ?Sized,
    V: ?Sized,
    F: FnMut(&S::Item, &V) -> Result<ComparisonResult, E>,
{
    partition_point(range, |i| Ok(!compare(seq.get(i), value)?.is_descending()))
}

/// Returns the first index in `range` for which `pred` is false, assuming `pred` is true for a
/// prefix of `range` and false for the rest.
fn partition_point<E, P>(range: Range<usize>, mut pred: P) -> Result<usize, E>
where
    P: FnMut(usize) -> Result<bool, E>,
{
    // Invariant: pred holds for everything before lo and fails for everything from hi on.
    let Range {
        start: mut lo,
        end: mut hi,
    } = range;

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid)? {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }

    Ok(lo)
}
