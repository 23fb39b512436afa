use std::cmp::Ordering;
use std::ops::Range;

/// A stable sort implementation under test.
///
/// Only uses std types, implementations adapt their own comparator and error types.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering;

    /// Must leave `arr` untouched if `compare` fails.
    fn try_sort_by<T, E, F>(arr: &mut [T], compare: F) -> Result<(), E>
    where
        F: FnMut(&T, &T) -> Result<Ordering, E>;

    fn sorted_by<T, F>(arr: &[T], compare: F) -> Vec<T>
    where
        T: Clone,
        F: FnMut(&T, &T) -> Ordering;
}

/// Which index a binary search should report when the value occurs more than once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// Any matching index, `None` if there is none.
    Any,
    First,
    Last,
    /// Where the value would be inserted to keep the range sorted, before equal elements.
    Insertion,
    InsertionFirst,
    /// After equal elements.
    InsertionLast,
}

impl SearchMode {
    pub const ALL: [SearchMode; 6] = [
        SearchMode::Any,
        SearchMode::First,
        SearchMode::Last,
        SearchMode::Insertion,
        SearchMode::InsertionFirst,
        SearchMode::InsertionLast,
    ];

    pub fn is_insertion(self) -> bool {
        matches!(
            self,
            SearchMode::Insertion | SearchMode::InsertionFirst | SearchMode::InsertionLast
        )
    }
}

/// A binary search implementation under test.
pub trait Search {
    fn name() -> String;

    fn search<T>(arr: &[T], value: &T, range: Range<usize>, mode: SearchMode) -> Option<usize>
    where
        T: Ord;

    /// `Ok(None)` means not found, insertion modes always find an index.
    fn try_search_by<T, E, F>(
        arr: &[T],
        value: &T,
        range: Range<usize>,
        mode: SearchMode,
        compare: F,
    ) -> Result<Option<usize>, E>
    where
        F: FnMut(&T, &T) -> Result<Ordering, E>;
}

#[doc(hidden)]
pub use paste;

pub mod patterns;
