use std::cmp::Ordering;

/// Outcome of comparing a left value with a right value.
///
/// `Ascending` means the left value precedes the right one, `Descending` that it follows it. This
/// is the same trichotomy as [`Ordering`], spelled in terms of sort direction, and the two convert
/// into each other losslessly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonResult {
    Ascending,
    Same,
    Descending,
}

impl ComparisonResult {
    /// Compares two values with their [`Ord`] implementation.
    #[inline]
    pub fn of<K: Ord + ?Sized>(a: &K, b: &K) -> Self {
        Self::from_ordering(a.cmp(b))
    }

    #[inline]
    pub const fn from_ordering(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Self::Ascending,
            Ordering::Equal => Self::Same,
            Ordering::Greater => Self::Descending,
        }
    }

    #[inline]
    pub const fn into_ordering(self) -> Ordering {
        match self {
            Self::Ascending => Ordering::Less,
            Self::Same => Ordering::Equal,
            Self::Descending => Ordering::Greater,
        }
    }

    /// Maps the result of a C style comparison function, negative for less, zero for equal and
    /// positive for greater.
    ///
    /// ```
    /// use sortkit::ComparisonResult;
    ///
    /// assert_eq!(ComparisonResult::from_sign(-3), ComparisonResult::Ascending);
    /// assert_eq!(ComparisonResult::from_sign(0), ComparisonResult::Same);
    /// ```
    #[inline]
    pub const fn from_sign(sign: isize) -> Self {
        if sign < 0 {
            Self::Ascending
        } else if sign == 0 {
            Self::Same
        } else {
            Self::Descending
        }
    }

    /// Swaps `Ascending` and `Descending`, `Same` stays.
    #[inline]
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Same => Self::Same,
            Self::Descending => Self::Ascending,
        }
    }

    /// Applies a sort direction, reversing the result for descending order.
    #[inline]
    #[must_use]
    pub const fn directed(self, ascending: bool) -> Self {
        if ascending {
            self
        } else {
            self.reverse()
        }
    }

    #[inline]
    pub const fn is_ascending(self) -> bool {
        matches!(self, Self::Ascending)
    }

    #[inline]
    pub const fn is_same(self) -> bool {
        matches!(self, Self::Same)
    }

    #[inline]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }
}

impl From<Ordering> for ComparisonResult {
    #[inline]
    fn from(ord: Ordering) -> Self {
        Self::from_ordering(ord)
    }
}

impl From<ComparisonResult> for Ordering {
    #[inline]
    fn from(res: ComparisonResult) -> Self {
        res.into_ordering()
    }
}
