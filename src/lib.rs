//! Binary search over sorted ranges and stable sorting, driven by caller supplied comparators or
//! chains of sort descriptors.
//!
//! Both halves reduce what the caller asks for to a single comparator
//! `FnMut(&T, &T) -> Result<ComparisonResult, E>`. Comparators may fail, a failure aborts the
//! call and is handed back as [`Error::Comparator`]. Sorting a sequence in place never leaves it
//! half sorted, the new order is only committed after the last comparison succeeded.
//!
//! The algorithms work on anything implementing [`Sequence`] (slices, arrays, `Vec`,
//! `VecDeque`), borrowed for the duration of a single call.

pub mod comparison;
pub mod descriptor;
pub mod error;
pub mod search;
pub mod sequence;
pub mod sort;

pub use comparison::ComparisonResult;
pub use descriptor::{apply_chain, SortDescriptor};
pub use error::Error;
pub use search::{
    equal_range_by, insert_sorted, insert_sorted_by, lower_bound_by, search, search_by,
    search_by_key, upper_bound_by, SearchOptions, NOT_FOUND,
};
pub use sequence::{Sequence, SequenceMut, Splice};
pub use sort::{
    sort, sort_by, sort_by_descriptors, sort_by_key, sorted, sorted_by_descriptors,
    sorted_from_iter, try_sort_by, try_sorted_by,
};
