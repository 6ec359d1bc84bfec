//! Elementwise assignment on [`Matrix`].
//!
//! Cells are visited in row-major order. Each read and each write takes its
//! own short borrow of the shared storage, so a closure may freely read other
//! views of the same storage while it runs.

use matrix_traits::Element;

use crate::alias::have_shared_cells;
use crate::matrix::Matrix;
use crate::{MatrixError, Result};

impl<T: Element, const N: usize> Matrix<T, N> {
    /// Set every cell to `value`.
    pub fn assign(&mut self, value: T) -> &mut Self {
        for (_, pos) in self.positions() {
            self.write(pos, value.clone());
        }
        self
    }

    /// Replace every cell `x` with `f(x)`.
    ///
    /// # Example
    /// ```rust
    /// use strided_matrix::Matrix1D;
    ///
    /// let mut v = Matrix1D::from_slice(&[1.0, 2.0, 3.0]);
    /// v.assign_map(|x| x * x);
    /// assert_eq!(v.to_array(), vec![1.0, 4.0, 9.0]);
    /// ```
    pub fn assign_map<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(T) -> T,
    {
        for (_, pos) in self.positions() {
            let value = f(self.read(pos));
            self.write(pos, value);
        }
        self
    }

    /// Copy `other` into `self`, cell for cell.
    ///
    /// If the two may share cells, `other` is first copied so the result is
    /// as if they were independent; `a.assign_from(&a.view_transpose())`
    /// transposes a square matrix in place.
    ///
    /// # Errors
    /// Returns [`MatrixError::ShapeMismatch`] if the shapes differ.
    pub fn assign_from(&mut self, other: &Self) -> Result<&mut Self> {
        self.check_shape(other)?;
        if have_shared_cells(&*self, other) {
            tracing::debug!(
                shape = ?self.shape(),
                "source aliases destination; assigning from a temporary copy"
            );
            let source = other.copy();
            self.copy_cells(&source);
        } else {
            self.copy_cells(other);
        }
        Ok(self)
    }

    fn copy_cells(&mut self, source: &Self) {
        for ((_, dst), (_, src)) in self.positions().zip(source.positions()) {
            let value = source.read(src);
            self.write(dst, value);
        }
    }

    /// Replace every cell `x` with `f(x, y)`, `y` the matching cell of `other`.
    ///
    /// Aliasing between `self` and `other` is not resolved.
    ///
    /// # Errors
    /// Returns [`MatrixError::ShapeMismatch`] before touching any cell if the
    /// shapes differ.
    pub fn assign_with<F>(&mut self, other: &Self, mut f: F) -> Result<&mut Self>
    where
        F: FnMut(T, T) -> T,
    {
        self.check_shape(other)?;
        for ((_, dst), (_, src)) in self.positions().zip(other.positions()) {
            let y = other.read(src);
            let value = f(self.read(dst), y);
            self.write(dst, value);
        }
        Ok(self)
    }

    /// Fill from row-major `values`.
    ///
    /// # Errors
    /// Returns [`MatrixError::ShapeMismatch`] if `values.len() != self.len()`.
    pub fn assign_slice(&mut self, values: &[T]) -> Result<&mut Self> {
        if values.len() != self.len() {
            return Err(MatrixError::ShapeMismatch(
                self.shape().to_vec(),
                vec![values.len()],
            ));
        }
        for ((_, pos), value) in self.positions().zip(values) {
            self.write(pos, value.clone());
        }
        Ok(self)
    }

    /// Exchange the contents of `self` and `other`.
    ///
    /// # Errors
    /// Returns [`MatrixError::ShapeMismatch`] if the shapes differ.
    pub fn swap(&mut self, other: &mut Self) -> Result<()> {
        self.check_shape(&*other)?;
        for ((_, a), (_, b)) in self.positions().zip(other.positions()) {
            let x = self.read(a);
            let y = other.read(b);
            self.write(a, y);
            other.write(b, x);
        }
        Ok(())
    }

    /// Apply `f(coords, value)` to every non-zero cell, writing the result
    /// back only when it differs from the current value.
    ///
    /// Sparse storage therefore sees no writes for unchanged cells, and a
    /// result of zero removes the entry.
    pub fn for_each_non_zero<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut([usize; N], T) -> T,
    {
        for (coords, pos) in self.positions() {
            let value = self.read(pos);
            if value.is_zero_element() {
                continue;
            }
            let updated = f(coords, value.clone());
            if updated != value {
                self.write(pos, updated);
            }
        }
        self
    }
}
