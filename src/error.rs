use std::convert::Infallible;

use thiserror::Error as ThisError;

/// Failure of a search or sort call.
///
/// `E` is the error type of the caller supplied comparator or key extractor. Calls driven by
/// [`Ord`] use the default, [`Infallible`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error<E = Infallible> {
    /// The requested range does not lie inside `[0, len]`.
    #[error("range {start}..{end} is out of bounds for sequence of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// `FIRST_EQUAL` and `LAST_EQUAL` were both requested.
    #[error("search options FIRST_EQUAL and LAST_EQUAL are mutually exclusive")]
    InvalidOptions,

    /// A comparator or key extractor failed, the call was aborted.
    #[error("comparator failed")]
    Comparator(#[source] E),
}

impl<E> Error<E> {
    /// Returns the comparator error, if that is what aborted the call.
    pub fn into_comparator(self) -> Option<E> {
        match self {
            Self::Comparator(err) => Some(err),
            _ => None,
        }
    }

    /// Converts the comparator error type, leaving the argument errors as they are.
    pub fn map_comparator<F, O>(self, op: O) -> Error<F>
    where
        O: FnOnce(E) -> F,
    {
        match self {
            Self::InvalidRange { start, end, len } => Error::InvalidRange { start, end, len },
            Self::InvalidOptions => Error::InvalidOptions,
            Self::Comparator(err) => Error::Comparator(op(err)),
        }
    }
}

impl Error<Infallible> {
    /// Widens an argument error from an infallible call to any comparator error type.
    pub fn into_invalid_input<F>(self) -> Error<F> {
        self.map_comparator(|never| match never {})
    }
}
