//! Resizable array list with explicit capacity management.
//!
//! Appends are amortized O(1); inserting or removing at an arbitrary position
//! shifts the tail. Searching and sorting delegate to [`crate::sort`].

use std::cmp::Ordering;

use crate::sort;
use crate::{MatrixError, Result};

const DEFAULT_CAPACITY: usize = 10;

/// Growable list whose capacity follows `max(min, old * 3 / 2 + 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayList<T> {
    elements: Vec<T>,
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ArrayList<T> {
    /// Empty list with the default initial capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Adopt `elements` as the backing store without copying.
    pub fn from_vec(elements: Vec<T>) -> Self {
        Self { elements }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// The live elements.
    #[inline]
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Grow so that at least `min_capacity` elements fit without reallocating.
    pub fn ensure_capacity(&mut self, min_capacity: usize) {
        let old = self.elements.capacity();
        if min_capacity > old {
            let target = min_capacity.max(old * 3 / 2 + 1);
            self.elements.reserve_exact(target - self.elements.len());
        }
    }

    /// Release capacity beyond the current size.
    pub fn trim_to_size(&mut self) {
        self.elements.shrink_to_fit();
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Append `element`.
    pub fn add(&mut self, element: T) {
        self.ensure_capacity(self.elements.len() + 1);
        self.elements.push(element);
    }

    /// Append every element of `other`.
    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, other: I) {
        let iter = other.into_iter();
        self.ensure_capacity(self.elements.len() + iter.size_hint().0);
        for element in iter {
            self.add(element);
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.elements.len() {
            return Err(MatrixError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.elements.len()],
            });
        }
        Ok(())
    }

    /// Insert `element` before position `index`; `index == size` appends.
    pub fn before_insert(&mut self, index: usize, element: T) -> Result<()> {
        if index > self.elements.len() {
            return Err(MatrixError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.elements.len()],
            });
        }
        self.ensure_capacity(self.elements.len() + 1);
        self.elements.insert(index, element);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        Ok(&self.elements[index])
    }

    /// Element at `index`.
    ///
    /// # Panics
    /// Panics if `index >= size()`.
    #[inline]
    pub fn get_quick(&self, index: usize) -> &T {
        &self.elements[index]
    }

    /// Replace the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, element: T) -> Result<T> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.elements[index], element))
    }

    /// Remove and return the element at `index`, shifting the tail left.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;
        Ok(self.elements.remove(index))
    }

    /// Remove the elements in `[from, to]` (inclusive).
    ///
    /// `from == to + 1` names the empty range and removes nothing.
    pub fn remove_range(&mut self, from: usize, to: usize) -> Result<()> {
        if to.checked_add(1) == Some(from) {
            return Ok(());
        }
        if from > to || to >= self.elements.len() {
            return Err(MatrixError::RangeOutOfBounds {
                offset: vec![from],
                extent: vec![to.saturating_add(1).saturating_sub(from)],
                shape: vec![self.elements.len()],
            });
        }
        self.elements.drain(from..=to);
        Ok(())
    }

    /// Reverse the element order in place.
    pub fn reverse(&mut self) {
        self.elements.reverse();
    }

    /// Search the (sorted) list for `key`. See [`sort::binary_search_by`].
    pub fn binary_search_by<F>(&self, key: &T, cmp: F) -> std::result::Result<usize, usize>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::binary_search_by(&self.elements, key, cmp)
    }

    /// Unstable sort with the tuned quicksort.
    pub fn quick_sort_by<F>(&mut self, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::quick_sort_by(&mut self.elements, cmp);
    }
}

impl<T: Clone> ArrayList<T> {
    /// Stable sort with merge sort.
    pub fn sort_by<F>(&mut self, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        sort::merge_sort_by(&mut self.elements, cmp);
    }
}

impl<T: PartialEq> ArrayList<T> {
    /// Index of the first element equal to `element`.
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.elements.iter().position(|e| e == element)
    }

    /// Index of the last element equal to `element`.
    pub fn last_index_of(&self, element: &T) -> Option<usize> {
        self.elements.iter().rposition(|e| e == element)
    }

    pub fn contains(&self, element: &T) -> bool {
        self.index_of(element).is_some()
    }
}

impl<T> From<Vec<T>> for ArrayList<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T> IntoIterator for ArrayList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
