//! Aggregation over [`Matrix`] cells.
//!
//! Aggregates map every cell, then fold the mapped values left to right in
//! row-major order. The combine function should be associative for results
//! that do not depend on visitation order.

use matrix_traits::{Element, Scalar};
use num_traits::Float;

use crate::matrix::Matrix;
use crate::storage::CellStore;
use crate::Result;

impl<T: Element, const N: usize> Matrix<T, N> {
    /// `combine(...combine(map(c0), map(c1))..., map(cN))`, or `None` for an
    /// empty matrix.
    pub fn try_aggregate<U, C, M>(&self, mut combine: C, mut map: M) -> Option<U>
    where
        C: FnMut(U, U) -> U,
        M: FnMut(T) -> U,
    {
        let mut acc: Option<U> = None;
        for (_, pos) in self.positions() {
            let mapped = map(self.read(pos));
            acc = Some(match acc {
                Some(current) => combine(current, mapped),
                None => mapped,
            });
        }
        acc
    }

    /// Like [`try_aggregate`](Self::try_aggregate), returning NaN for an
    /// empty matrix.
    ///
    /// # Example
    /// ```rust
    /// use strided_matrix::Matrix1D;
    ///
    /// let v = Matrix1D::from_slice(&[1.0, -4.0, 2.0]);
    /// let max_abs = v.aggregate(f64::max, |x: f64| x.abs());
    /// assert_eq!(max_abs, 4.0);
    ///
    /// let empty = Matrix1D::<f64>::from_slice(&[]);
    /// assert!(empty.aggregate(|a: f64, b| a + b, |x: f64| x).is_nan());
    /// ```
    pub fn aggregate<U, C, M>(&self, combine: C, map: M) -> U
    where
        U: Float,
        C: FnMut(U, U) -> U,
        M: FnMut(T) -> U,
    {
        self.try_aggregate(combine, map).unwrap_or_else(U::nan)
    }

    /// Binary aggregate: `map` receives matching cells of `self` and `other`.
    ///
    /// Returns NaN for empty matrices.
    ///
    /// # Errors
    /// Returns [`MatrixError::ShapeMismatch`](crate::MatrixError::ShapeMismatch)
    /// if the shapes differ.
    pub fn aggregate_with<U, C, M>(&self, other: &Self, mut combine: C, mut map: M) -> Result<U>
    where
        U: Float,
        C: FnMut(U, U) -> U,
        M: FnMut(T, T) -> U,
    {
        self.check_shape(other)?;
        let mut acc: Option<U> = None;
        for ((_, a), (_, b)) in self.positions().zip(other.positions()) {
            let mapped = map(self.read(a), other.read(b));
            acc = Some(match acc {
                Some(current) => combine(current, mapped),
                None => mapped,
            });
        }
        Ok(acc.unwrap_or_else(U::nan))
    }

    /// Number of cells that differ from the zero element.
    pub fn cardinality(&self) -> usize {
        let storage = self.content().borrow();
        self.positions()
            .filter(|&(_, pos)| !storage.get(pos).is_zero_element())
            .count()
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N> {
    /// Sum of all cells; exactly zero for an empty matrix.
    pub fn z_sum(&self) -> T {
        if self.is_empty() {
            return T::zero();
        }
        self.aggregate(|a: T, b| a + b, |x| x)
    }
}
