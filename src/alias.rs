//! Alias oracle: may two matrices touch the same cells?
//!
//! Every view keeps a handle to the canonical storage of the matrix it was
//! derived from, so unwrapping a view is just reading that handle. Two
//! matrices are reported as sharing cells when their handles point at the
//! same storage. This over-reports (disjoint parts of one buffer count as
//! shared) but never under-reports.

use matrix_traits::Element;

use crate::matrix::Matrix;

/// Returns true if `a` and `b` may share cells.
///
/// # Example
/// ```rust
/// use strided_matrix::{have_shared_cells, Matrix2D};
///
/// let a: Matrix2D<f64> = Matrix2D::new([3, 3]);
/// let row = a.view_row(0).unwrap();
/// assert!(have_shared_cells(&a, &row));
/// assert!(!have_shared_cells(&a, &a.copy()));
/// ```
pub fn have_shared_cells<T: Element, const N: usize, const M: usize>(
    a: &Matrix<T, N>,
    b: &Matrix<T, M>,
) -> bool {
    a.content().ptr_eq(b.content())
}

impl<T: Element, const N: usize> Matrix<T, N> {
    /// Returns true if `self` and `other` may share cells.
    #[inline]
    pub fn shares_storage<const M: usize>(&self, other: &Matrix<T, M>) -> bool {
        have_shared_cells(self, other)
    }
}
