//! Sort descriptors, reversible ordering rules that combine into tie-break chains.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::comparison::ComparisonResult;

type CompareFn<T, E> = dyn Fn(&T, &T) -> Result<ComparisonResult, E> + Send + Sync;

enum Rule<T, E> {
    /// Compares extracted keys, the extraction is folded into the closure.
    Keyed(Arc<CompareFn<T, E>>),
    /// Caller supplied comparison, `swapped` flips the argument order.
    Custom {
        compare: Arc<CompareFn<T, E>>,
        swapped: bool,
    },
}

impl<T, E> Clone for Rule<T, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Keyed(compare) => Self::Keyed(Arc::clone(compare)),
            Self::Custom { compare, swapped } => Self::Custom {
                compare: Arc::clone(compare),
                swapped: *swapped,
            },
        }
    }
}

/// An immutable ordering rule for values of type `T`.
///
/// A descriptor either orders by a key extracted from each value, using the key's [`Ord`], or by
/// a custom comparison. Either way the result is then applied in ascending or descending
/// direction. `E` is the error type of a fallible extractor or comparison.
///
/// Descriptors are cheap to clone and can be shared between threads. The closures they hold must
/// be `'static`, they may not borrow from the caller.
///
/// # Examples
///
/// ```
/// use sortkit::{apply_chain, ComparisonResult, SortDescriptor};
///
/// let chain: [SortDescriptor<(&str, u32)>; 2] = [
///     SortDescriptor::keyed(|p: &(&str, u32)| p.1, false),
///     SortDescriptor::keyed(|p: &(&str, u32)| p.0.to_owned(), true),
/// ];
///
/// assert_eq!(
///     apply_chain(&chain, &("bob", 40), &("ann", 31)),
///     Ok(ComparisonResult::Ascending)
/// );
/// ```
pub struct SortDescriptor<T, E = Infallible> {
    rule: Rule<T, E>,
    ascending: bool,
    key: Option<Cow<'static, str>>,
}

impl<T, E> SortDescriptor<T, E> {
    /// Orders by the key `extract` returns for each value.
    pub fn keyed<K, X>(extract: X, ascending: bool) -> Self
    where
        K: Ord,
        X: Fn(&T) -> K + Send + Sync + 'static,
    {
        Self::try_keyed(move |value: &T| Ok(extract(value)), ascending)
    }

    /// Orders by a key whose extraction may fail. A failing extraction aborts the comparison.
    pub fn try_keyed<K, X>(extract: X, ascending: bool) -> Self
    where
        K: Ord,
        X: Fn(&T) -> Result<K, E> + Send + Sync + 'static,
    {
        let compare = move |a: &T, b: &T| -> Result<ComparisonResult, E> {
            Ok(ComparisonResult::of(&extract(a)?, &extract(b)?))
        };

        Self {
            rule: Rule::Keyed(Arc::new(compare)),
            ascending,
            key: None,
        }
    }

    /// Orders with a caller supplied comparison.
    pub fn custom<C>(compare: C, ascending: bool) -> Self
    where
        C: Fn(&T, &T) -> Result<ComparisonResult, E> + Send + Sync + 'static,
    {
        Self {
            rule: Rule::Custom {
                compare: Arc::new(compare),
                swapped: false,
            },
            ascending,
            key: None,
        }
    }

    /// Orders with an infallible [`Ordering`] based comparison.
    pub fn custom_by<C>(compare: C, ascending: bool) -> Self
    where
        C: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::custom(
            move |a: &T, b: &T| Ok(ComparisonResult::from_ordering(compare(a, b))),
            ascending,
        )
    }

    /// Attaches a name to the descriptor, usually the path of the key it orders by.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn ascending(&self) -> bool {
        self.ascending
    }

    /// Compares `a` with `b` under this descriptor.
    ///
    /// # Errors
    ///
    /// Whatever the key extractor or custom comparison returns.
    pub fn compare(&self, a: &T, b: &T) -> Result<ComparisonResult, E> {
        let res = match &self.rule {
            Rule::Keyed(compare) => compare(a, b)?,
            Rule::Custom {
                compare,
                swapped: false,
            } => compare(a, b)?,
            Rule::Custom {
                compare,
                swapped: true,
            } => compare(b, a)?,
        };

        Ok(res.directed(self.ascending))
    }

    /// Returns a descriptor with the opposite order.
    ///
    /// Keyed descriptors flip their direction. Custom descriptors keep their direction and swap
    /// the arguments of the comparison instead. Reversing twice gives back the original order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match &self.rule {
            Rule::Keyed(_) => Self {
                rule: self.rule.clone(),
                ascending: !self.ascending,
                key: self.key.clone(),
            },
            Rule::Custom { compare, swapped } => Self {
                rule: Rule::Custom {
                    compare: Arc::clone(compare),
                    swapped: !swapped,
                },
                ascending: self.ascending,
                key: self.key.clone(),
            },
        }
    }
}

impl<T, E> Clone for SortDescriptor<T, E> {
    fn clone(&self) -> Self {
        Self {
            rule: self.rule.clone(),
            ascending: self.ascending,
            key: self.key.clone(),
        }
    }
}

impl<T, E> fmt::Debug for SortDescriptor<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.rule {
            Rule::Keyed(_) => "keyed",
            Rule::Custom { swapped: false, .. } => "custom",
            Rule::Custom { swapped: true, .. } => "custom (swapped)",
        };

        f.debug_struct("SortDescriptor")
            .field("kind", &kind)
            .field("key", &self.key)
            .field("ascending", &self.ascending)
            .finish()
    }
}

/// Compares `a` with `b` under each descriptor of `chain` in turn, returning the first result
/// that is not `Same`.
///
/// If every descriptor considers the values the same, or the chain is empty, the result is
/// `Same`, leaving the order of the two to the stability of the sort.
///
/// # Errors
///
/// The first failure of a descriptor, later descriptors are not evaluated.
pub fn apply_chain<T, E>(
    chain: &[SortDescriptor<T, E>],
    a: &T,
    b: &T,
) -> Result<ComparisonResult, E> {
    for descriptor in chain {
        let res = descriptor.compare(a, b)?;
        if !res.is_same() {
            return Ok(res);
        }
    }

    Ok(ComparisonResult::Same)
}

#[cfg(test)]
mod tests {
    use super::*;

    use ComparisonResult::{Ascending, Descending, Same};

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        last: &'static str,
        first: &'static str,
        age: u32,
    }

    fn person(last: &'static str, first: &'static str, age: u32) -> Person {
        Person { last, first, age }
    }

    #[test]
    fn keyed_direction() {
        let by_age = SortDescriptor::<Person>::keyed(|p| p.age, true);
        let (a, b) = (person("Doe", "Jane", 30), person("Doe", "John", 41));

        assert_eq!(by_age.compare(&a, &b), Ok(Ascending));
        assert_eq!(by_age.compare(&b, &a), Ok(Descending));
        assert_eq!(by_age.compare(&a, &a), Ok(Same));

        let rev = by_age.reversed();
        assert!(!rev.ascending());
        assert_eq!(rev.compare(&a, &b), Ok(Descending));
        assert_eq!(rev.compare(&a, &a), Ok(Same));
    }

    #[test]
    fn custom_reversal_swaps_arguments() {
        let by_len_desc = SortDescriptor::<&str>::custom_by(|a, b| a.len().cmp(&b.len()), false);
        assert_eq!(by_len_desc.compare(&"ab", &"abc"), Ok(Descending));

        let rev = by_len_desc.reversed();
        assert!(!rev.ascending());
        assert_eq!(rev.compare(&"ab", &"abc"), Ok(Ascending));

        let back = rev.reversed();
        for (a, b) in [("", "a"), ("abc", "ab"), ("xy", "zw")] {
            assert_eq!(back.compare(&a, &b), by_len_desc.compare(&a, &b));
        }
    }

    #[test]
    fn chain_breaks_ties_in_order() {
        let chain = [
            SortDescriptor::<Person>::keyed(|p| p.last, true).with_key("last"),
            SortDescriptor::keyed(|p: &Person| p.age, false).with_key("age"),
        ];

        let jane = person("Doe", "Jane", 30);
        let john = person("Doe", "John", 41);
        let ann = person("Abe", "Ann", 99);

        assert_eq!(apply_chain(&chain, &ann, &jane), Ok(Ascending));
        assert_eq!(apply_chain(&chain, &jane, &john), Ok(Descending));
        assert_eq!(apply_chain(&chain, &john, &john), Ok(Same));
        assert_eq!(apply_chain::<Person, Infallible>(&[], &john, &ann), Ok(Same));
        assert_eq!(chain[1].key(), Some("age"));
    }

    #[test]
    fn failing_extractor_stops_chain() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let chain: Vec<SortDescriptor<Person, String>> = vec![
            SortDescriptor::try_keyed(
                |p: &Person| {
                    if p.first.is_empty() {
                        Err(format!("{} has no first name", p.last))
                    } else {
                        Ok(p.first)
                    }
                },
                true,
            ),
            SortDescriptor::custom(
                move |a: &Person, b: &Person| {
                    counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                    Ok(ComparisonResult::of(&a.age, &b.age))
                },
                true,
            ),
        ];

        let res = apply_chain(&chain, &person("Doe", "", 1), &person("Roe", "Rae", 2));
        assert_eq!(res, Err("Doe has no first name".to_owned()));
        assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), 0);
    }

    #[test]
    fn shareable() {
        fn assert_send_sync<X: Send + Sync + Clone>(_: &X) {}

        let desc = SortDescriptor::<u8>::keyed(|v| *v, true).with_key("value");
        assert_send_sync(&desc);
        assert_eq!(
            format!("{desc:?}"),
            "SortDescriptor { kind: \"keyed\", key: Some(\"value\"), ascending: true }"
        );
    }
}
