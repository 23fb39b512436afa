//! Access capabilities the search and sort algorithms need from a collection.
//!
//! The algorithms only ever index. `Sequence` is enough for searching and copy-producing sorts,
//! `SequenceMut` adds what an in-place sort needs to commit its result, and `Splice` adds the bulk
//! range replacement used for sorted insertion.

use std::collections::VecDeque;
use std::ops::Range;

/// A randomly indexable, finite sequence.
pub trait Sequence {
    type Item;

    fn len(&self) -> usize;

    /// Returns the element at `index`. Must be *O*(1).
    ///
    /// # Panics
    ///
    /// May panic if `index >= self.len()`. The algorithms in this crate never do that.
    fn get(&self, index: usize) -> &Self::Item;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sequence whose elements can be replaced and exchanged in place.
pub trait SequenceMut: Sequence {
    /// Stores `item` at `index` and returns the previous element.
    fn set(&mut self, index: usize, item: Self::Item) -> Self::Item;

    fn swap(&mut self, a: usize, b: usize);
}

/// A sequence that can grow and shrink by replacing a range of elements.
pub trait Splice: SequenceMut {
    /// Replaces the elements in `range` with the items of `with`, which may have any length.
    ///
    /// # Panics
    ///
    /// May panic if `range` is not inside `0..=self.len()`.
    fn replace_range<I>(&mut self, range: Range<usize>, with: I)
    where
        I: IntoIterator<Item = Self::Item>;
}

impl<T> Sequence for [T] {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T> SequenceMut for [T] {
    #[inline]
    fn set(&mut self, index: usize, item: T) -> T {
        std::mem::replace(&mut self[index], item)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        <[T]>::swap(self, a, b);
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T, const N: usize> SequenceMut for [T; N] {
    #[inline]
    fn set(&mut self, index: usize, item: T) -> T {
        std::mem::replace(&mut self[index], item)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }
}

impl<T> Sequence for Vec<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T> SequenceMut for Vec<T> {
    #[inline]
    fn set(&mut self, index: usize, item: T) -> T {
        std::mem::replace(&mut self[index], item)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }
}

impl<T> Splice for Vec<T> {
    fn replace_range<I>(&mut self, range: Range<usize>, with: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.splice(range, with);
    }
}

impl<T> Sequence for VecDeque<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }
}

impl<T> SequenceMut for VecDeque<T> {
    #[inline]
    fn set(&mut self, index: usize, item: T) -> T {
        std::mem::replace(&mut self[index], item)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        VecDeque::swap(self, a, b);
    }
}

impl<T> Splice for VecDeque<T> {
    fn replace_range<I>(&mut self, range: Range<usize>, with: I)
    where
        I: IntoIterator<Item = T>,
    {
        // VecDeque has no splice, rebuild the tail instead.
        let tail = self.split_off(range.end);
        self.truncate(range.start);
        self.extend(with);
        self.extend(tail);
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn get(&self, index: usize) -> &S::Item {
        (**self).get(index)
    }
}

impl<S: Sequence + ?Sized> Sequence for &mut S {
    type Item = S::Item;

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn get(&self, index: usize) -> &S::Item {
        (**self).get(index)
    }
}

impl<S: SequenceMut + ?Sized> SequenceMut for &mut S {
    #[inline]
    fn set(&mut self, index: usize, item: S::Item) -> S::Item {
        (**self).set(index, item)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        (**self).swap(a, b);
    }
}
