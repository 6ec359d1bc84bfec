//! Physical cell storage.
//!
//! Storage never interprets strides or offsets; it only maps a physical
//! position to a value. Two backends exist:
//!
//! - [`DenseStorage`]: one contiguous `Vec`, a slot per position
//! - [`SparseStorage`]: a hash map from position to value; absent positions
//!   read as the zero element and writing zero removes the entry
//!
//! Matrices hold storage through [`Content`], a shared handle. Every view
//! clones the handle, so the buffer lives as long as its longest holder.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use matrix_traits::Element;

use crate::{MatrixError, Result};

/// Minimal capability set shared by all storage backends.
pub trait CellStore<T> {
    /// Number of addressable physical positions.
    fn len(&self) -> usize;

    /// Returns true if the store has no positions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `pos`.
    fn get(&self, pos: usize) -> T;

    /// Overwrite the value at `pos`.
    fn set(&mut self, pos: usize, value: T);

    /// Number of stored non-zero values.
    fn non_zeros(&self) -> usize;
}

// ============================================================================
// Dense
// ============================================================================

/// Contiguous buffer with one slot per position.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseStorage<T> {
    elements: Vec<T>,
}

impl<T: Element> DenseStorage<T> {
    /// Zero-filled buffer of `len` slots.
    pub fn zeros(len: usize) -> Self {
        Self {
            elements: vec![T::default(); len],
        }
    }
}

impl<T> DenseStorage<T> {
    /// Adopt an existing buffer.
    pub fn from_vec(elements: Vec<T>) -> Self {
        Self { elements }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }
}

impl<T: Element> CellStore<T> for DenseStorage<T> {
    #[inline]
    fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    fn get(&self, pos: usize) -> T {
        self.elements[pos].clone()
    }

    #[inline]
    fn set(&mut self, pos: usize, value: T) {
        self.elements[pos] = value;
    }

    fn non_zeros(&self) -> usize {
        self.elements.iter().filter(|v| !v.is_zero_element()).count()
    }
}

// ============================================================================
// Sparse
// ============================================================================

/// Sizing hints for [`SparseStorage`].
///
/// The table starts with room for `initial_capacity` entries. After a removal
/// leaves it less than `min_load_factor` full (and larger than the initial
/// capacity), it shrinks so that it is about `max_load_factor` full.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseConfig {
    pub initial_capacity: usize,
    pub min_load_factor: f64,
    pub max_load_factor: f64,
}

impl Default for SparseConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 277,
            min_load_factor: 0.2,
            max_load_factor: 0.5,
        }
    }
}

impl SparseConfig {
    /// Create a validated configuration.
    pub fn new(initial_capacity: usize, min_load_factor: f64, max_load_factor: f64) -> Result<Self> {
        let config = Self {
            initial_capacity,
            min_load_factor,
            max_load_factor,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check `initial_capacity > 0` and `0 <= min < max < 1`.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity == 0 {
            return Err(MatrixError::InvalidCapacity(self.initial_capacity));
        }
        let (min, max) = (self.min_load_factor, self.max_load_factor);
        // Written to reject NaN as well.
        if !(min >= 0.0 && min < max && max < 1.0) {
            return Err(MatrixError::InvalidLoadFactors { min, max });
        }
        Ok(())
    }
}

/// Hash map from physical position to non-zero value.
#[derive(Debug, Clone)]
pub struct SparseStorage<T> {
    elements: HashMap<usize, T>,
    len: usize,
    config: SparseConfig,
}

impl<T: Element> SparseStorage<T> {
    /// Empty (all-zero) store of `len` positions.
    pub fn new(len: usize, config: SparseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(len, config))
    }

    pub(crate) fn with_valid_config(len: usize, config: SparseConfig) -> Self {
        Self {
            elements: HashMap::with_capacity(config.initial_capacity.min(len)),
            len,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &SparseConfig {
        &self.config
    }

    /// Current table capacity.
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Release unused table capacity.
    pub fn trim_to_size(&mut self) {
        self.elements.shrink_to_fit();
    }

    fn shrink_if_sparse(&mut self) {
        let capacity = self.elements.capacity();
        if capacity <= self.config.initial_capacity {
            return;
        }
        let used = self.elements.len() as f64;
        if used < capacity as f64 * self.config.min_load_factor {
            let target = (used / self.config.max_load_factor).ceil() as usize;
            let target = target.max(self.config.initial_capacity.min(self.len));
            tracing::trace!(capacity, target, entries = self.elements.len(), "shrinking sparse table");
            self.elements.shrink_to(target);
        }
    }
}

impl<T: Element> CellStore<T> for SparseStorage<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn get(&self, pos: usize) -> T {
        debug_assert!(pos < self.len, "sparse position out of range");
        self.elements.get(&pos).cloned().unwrap_or_default()
    }

    fn set(&mut self, pos: usize, value: T) {
        debug_assert!(pos < self.len, "sparse position out of range");
        if value.is_zero_element() {
            if self.elements.remove(&pos).is_some() {
                self.shrink_if_sparse();
            }
        } else {
            self.elements.insert(pos, value);
        }
    }

    fn non_zeros(&self) -> usize {
        self.elements.len()
    }
}

// ============================================================================
// Storage
// ============================================================================

/// Backend selected for a matrix.
#[derive(Debug, Clone)]
pub enum Storage<T> {
    Dense(DenseStorage<T>),
    Sparse(SparseStorage<T>),
}

impl<T: Element> Storage<T> {
    /// Fresh zero-filled storage of the same kind with `len` positions.
    pub fn like(&self, len: usize) -> Storage<T> {
        match self {
            Storage::Dense(_) => Storage::Dense(DenseStorage::zeros(len)),
            Storage::Sparse(sparse) => {
                Storage::Sparse(SparseStorage::with_valid_config(len, sparse.config))
            }
        }
    }

    #[inline]
    pub fn is_sparse(&self) -> bool {
        matches!(self, Storage::Sparse(_))
    }
}

impl<T: Element> CellStore<T> for Storage<T> {
    #[inline]
    fn len(&self) -> usize {
        match self {
            Storage::Dense(s) => s.len(),
            Storage::Sparse(s) => s.len(),
        }
    }

    #[inline]
    fn get(&self, pos: usize) -> T {
        match self {
            Storage::Dense(s) => s.get(pos),
            Storage::Sparse(s) => s.get(pos),
        }
    }

    #[inline]
    fn set(&mut self, pos: usize, value: T) {
        match self {
            Storage::Dense(s) => s.set(pos, value),
            Storage::Sparse(s) => s.set(pos, value),
        }
    }

    fn non_zeros(&self) -> usize {
        match self {
            Storage::Dense(s) => s.non_zeros(),
            Storage::Sparse(s) => s.non_zeros(),
        }
    }
}

// ============================================================================
// Content handle
// ============================================================================

/// Shared handle to a matrix's storage.
///
/// Handle identity is storage identity: two matrices whose handles are
/// [`Content::ptr_eq`] may share cells.
pub struct Content<T>(Rc<RefCell<Storage<T>>>);

impl<T> Clone for Content<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Content<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Content")
            .field("ptr", &Rc::as_ptr(&self.0))
            .field("holders", &Rc::strong_count(&self.0))
            .finish()
    }
}

impl<T> Content<T> {
    pub fn new(storage: Storage<T>) -> Self {
        Self(Rc::new(RefCell::new(storage)))
    }

    #[inline]
    pub(crate) fn borrow(&self) -> Ref<'_, Storage<T>> {
        self.0.borrow()
    }

    #[inline]
    pub(crate) fn borrow_mut(&self) -> RefMut<'_, Storage<T>> {
        self.0.borrow_mut()
    }

    /// Returns true if both handles refer to the same storage.
    #[inline]
    pub fn ptr_eq(&self, other: &Content<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of matrices and views currently holding this storage.
    pub fn holders(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl<T: Element> Content<T> {
    pub fn is_sparse(&self) -> bool {
        self.borrow().is_sparse()
    }

    /// Number of stored non-zero cells across the whole storage.
    pub fn non_zeros(&self) -> usize {
        self.borrow().non_zeros()
    }
}
