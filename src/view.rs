//! View derivation on [`Matrix`].
//!
//! Every method here wraps a transformed [`IndexModel`](crate::IndexModel)
//! around the parent's storage handle. No cells are copied, and writes
//! through a view are visible through the parent and every sibling view.

use matrix_traits::{Element, Scalar};

use crate::matrix::{Matrix, Matrix1D, Matrix2D};
use crate::sort::{compare_nan_last, merge_sort_by};
use crate::{MatrixError, Result};

/// Stable ordering of `0..keys.len()` by `keys`, NaN last.
fn sorted_order<T: Scalar>(keys: &[T]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    merge_sort_by(&mut order, |&a, &b| compare_nan_last(&keys[a], &keys[b]));
    order
}

fn check_coord(index: usize, size: usize) -> Result<()> {
    if index >= size {
        return Err(MatrixError::IndexOutOfBounds {
            index: vec![index],
            shape: vec![size],
        });
    }
    Ok(())
}

impl<T: Element, const N: usize> Matrix<T, N> {
    /// Axis-permuted view: axis `d` of the result is axis `perm[d]` of `self`.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidPermutation`] if `perm` is not a bijection.
    pub fn view_dice(&self, perm: [usize; N]) -> Result<Self> {
        Ok(self.derive(self.index_model().dice(perm)?))
    }

    /// View with the index order along `axis` reversed.
    pub fn view_flip(&self, axis: usize) -> Result<Self> {
        Ok(self.derive(self.index_model().flip(axis)?))
    }

    /// View of the box `[offset_d, offset_d + extent_d)`.
    ///
    /// # Errors
    /// Returns [`MatrixError::RangeOutOfBounds`] if the box leaves the matrix.
    pub fn view_part(&self, offset: [usize; N], extent: [usize; N]) -> Result<Self> {
        Ok(self.derive(self.index_model().part(offset, extent)?))
    }

    /// View keeping every `factors[d]`-th cell along each axis.
    ///
    /// # Errors
    /// Returns [`MatrixError::ZeroStride`] if a factor is zero.
    pub fn view_strides(&self, factors: [usize; N]) -> Result<Self> {
        Ok(self.derive(self.index_model().strides_by(factors)?))
    }

    /// View of explicitly selected indices; `None` keeps a whole axis.
    ///
    /// Indices may repeat and appear in any order; repeats are kept verbatim.
    ///
    /// # Example
    /// ```rust
    /// use strided_matrix::Matrix2D;
    ///
    /// let m = Matrix2D::from_vec([3, 3], (0..9).collect()).unwrap();
    /// let rows = [2, 0, 2];
    /// let s = m.view_selection([Some(&rows[..]), None]).unwrap();
    /// assert_eq!(s.to_array(), vec![vec![6, 7, 8], vec![0, 1, 2], vec![6, 7, 8]]);
    /// ```
    pub fn view_selection(&self, indices: [Option<&[usize]>; N]) -> Result<Self> {
        Ok(self.derive(self.index_model().select(indices)?))
    }
}

// ============================================================================
// 1-D
// ============================================================================

impl<T: Element> Matrix<T, 1> {
    /// Selection of the cells satisfying `predicate`, in ascending order.
    pub fn view_selection_where<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        let hits: Vec<usize> = (0..self.size(0))
            .filter(|&i| predicate(&self.get_quick([i])))
            .collect();
        self.select_known([Some(&hits[..])])
    }
}

impl<T: Scalar> Matrix<T, 1> {
    /// View of the cells in ascending order, NaN last. Equal cells keep
    /// their relative order.
    pub fn view_sorted(&self) -> Self {
        let order = sorted_order(&self.to_vec());
        self.select_known([Some(&order[..])])
    }
}

// ============================================================================
// 2-D
// ============================================================================

impl<T: Element> Matrix<T, 2> {
    /// Transposed view: `t.get([c, r]) == self.get([r, c])`.
    pub fn view_transpose(&self) -> Self {
        self.derive(self.index_model().permuted([1, 0]))
    }

    /// Row `row` as a vector view.
    pub fn view_row(&self, row: usize) -> Result<Matrix1D<T>> {
        Ok(self.derive(self.index_model().fix_axis(0, row)?))
    }

    /// Column `column` as a vector view.
    pub fn view_column(&self, column: usize) -> Result<Matrix1D<T>> {
        Ok(self.derive(self.index_model().fix_axis(1, column)?))
    }

    /// View with the rows in reverse order.
    pub fn view_row_flip(&self) -> Self {
        self.derive(self.index_model().flipped(0))
    }

    /// View with the columns in reverse order.
    pub fn view_column_flip(&self) -> Self {
        self.derive(self.index_model().flipped(1))
    }

    /// Selection of the rows for which `predicate` holds.
    ///
    /// The predicate sees each row as a view, in ascending row order.
    pub fn view_selection_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Matrix1D<T>) -> bool,
    {
        let hits: Vec<usize> = (0..self.rows())
            .filter(|&r| predicate(&self.derive(self.index_model().drop_axis(0, r))))
            .collect();
        self.select_known([Some(&hits[..]), None])
    }
}

impl<T: Scalar> Matrix<T, 2> {
    /// View with the rows ordered by the values in `column`, NaN last.
    pub fn view_sorted(&self, column: usize) -> Result<Self> {
        check_coord(column, self.columns())?;
        let keys: Vec<T> = (0..self.rows())
            .map(|r| self.get_quick([r, column]))
            .collect();
        let order = sorted_order(&keys);
        Ok(self.select_known([Some(&order[..]), None]))
    }
}

// ============================================================================
// 3-D
// ============================================================================

impl<T: Element> Matrix<T, 3> {
    /// Slice `slice` as a `rows x columns` view.
    pub fn view_slice(&self, slice: usize) -> Result<Matrix2D<T>> {
        Ok(self.derive(self.index_model().fix_axis(0, slice)?))
    }

    /// Row `row` as a `slices x columns` view.
    pub fn view_row(&self, row: usize) -> Result<Matrix2D<T>> {
        Ok(self.derive(self.index_model().fix_axis(1, row)?))
    }

    /// Column `column` as a `slices x rows` view.
    pub fn view_column(&self, column: usize) -> Result<Matrix2D<T>> {
        Ok(self.derive(self.index_model().fix_axis(2, column)?))
    }

    pub fn view_slice_flip(&self) -> Self {
        self.derive(self.index_model().flipped(0))
    }

    pub fn view_row_flip(&self) -> Self {
        self.derive(self.index_model().flipped(1))
    }

    pub fn view_column_flip(&self) -> Self {
        self.derive(self.index_model().flipped(2))
    }

    /// Selection of the slices for which `predicate` holds.
    pub fn view_selection_slices<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Matrix2D<T>) -> bool,
    {
        let hits: Vec<usize> = (0..self.slices())
            .filter(|&s| predicate(&self.derive(self.index_model().drop_axis(0, s))))
            .collect();
        self.select_known([Some(&hits[..]), None, None])
    }
}

impl<T: Scalar> Matrix<T, 3> {
    /// View with the slices ordered by the values at `[row, column]`, NaN last.
    pub fn view_sorted(&self, row: usize, column: usize) -> Result<Self> {
        check_coord(row, self.rows())?;
        check_coord(column, self.columns())?;
        let keys: Vec<T> = (0..self.slices())
            .map(|s| self.get_quick([s, row, column]))
            .collect();
        let order = sorted_order(&keys);
        Ok(self.select_known([Some(&order[..]), None, None]))
    }
}

impl<T: Element, const N: usize> Matrix<T, N> {
    /// Selection whose indices were produced from this matrix's own axes.
    fn select_known(&self, indices: [Option<&[usize]>; N]) -> Self {
        self.derive(self.index_model().selected(indices))
    }
}
