//! Matrix type: an index model over shared storage.
//!
//! [`Matrix`] is both the canonical container and every view derived from it.
//! A canonical matrix owns fresh storage laid out row-major; a view holds a
//! clone of its parent's [`Content`] handle and its own [`IndexModel`].

use matrix_traits::Element;

use crate::index::{IndexModel, Positions};
use crate::list::ArrayList;
use crate::storage::{CellStore, Content, DenseStorage, SparseConfig, SparseStorage, Storage};
use crate::{MatrixError, Result};

/// N-dimensional matrix (or view) over dense or sparse storage.
///
/// Storage is shared by every view of a matrix, so `&mut self` on a mutator
/// only borrows that one handle; it is not exclusive access to the cells.
/// A matrix held through an immutable binding still changes when a view of
/// it is written:
///
/// ```rust
/// use strided_matrix::Matrix2D;
///
/// let m = Matrix2D::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// m.view_column(1).unwrap().assign(-1.0);
/// assert_eq!(m.to_array(), vec![vec![1.0, -1.0], vec![3.0, -1.0]]);
/// ```
///
/// # Type Parameters
/// - `T`: Element type
/// - `N`: Number of dimensions (const generic)
///
/// # Example
/// ```rust
/// use strided_matrix::Matrix;
///
/// let mut m: Matrix<f64, 2> = Matrix::new([2, 3]);
/// m.set([1, 2], 4.0).unwrap();
/// assert_eq!(m.get([1, 2]).unwrap(), 4.0);
/// assert!(m.get([2, 0]).is_err());
/// ```
pub struct Matrix<T, const N: usize> {
    content: Content<T>,
    index: IndexModel<N>,
    is_view: bool,
}

/// One-dimensional matrix (vector).
pub type Matrix1D<T> = Matrix<T, 1>;
/// Two-dimensional matrix.
pub type Matrix2D<T> = Matrix<T, 2>;
/// Three-dimensional matrix.
pub type Matrix3D<T> = Matrix<T, 3>;

impl<T: Element, const N: usize> Matrix<T, N> {
    /// Create a zero-filled dense matrix.
    pub fn new(shape: [usize; N]) -> Self {
        let len = shape.iter().product();
        Self::with_storage(shape, Storage::Dense(DenseStorage::zeros(len)))
    }

    /// Create an all-zero sparse matrix with default sizing.
    pub fn sparse(shape: [usize; N]) -> Self {
        let len = shape.iter().product();
        let storage = SparseStorage::with_valid_config(len, SparseConfig::default());
        Self::with_storage(shape, Storage::Sparse(storage))
    }

    /// Create an all-zero sparse matrix with explicit sizing hints.
    pub fn sparse_with(shape: [usize; N], config: SparseConfig) -> Result<Self> {
        let len = shape.iter().product();
        let storage = SparseStorage::new(len, config)?;
        Ok(Self::with_storage(shape, Storage::Sparse(storage)))
    }

    /// Create a dense matrix from row-major values. The values are copied.
    pub fn from_vec(shape: [usize; N], values: Vec<T>) -> Result<Self> {
        let len: usize = shape.iter().product();
        if values.len() != len {
            return Err(MatrixError::ShapeMismatch(
                shape.to_vec(),
                vec![values.len()],
            ));
        }
        Ok(Self::with_storage(
            shape,
            Storage::Dense(DenseStorage::from_vec(values)),
        ))
    }

    pub(crate) fn with_storage(shape: [usize; N], storage: Storage<T>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), storage.len());
        Self {
            content: Content::new(storage),
            index: IndexModel::row_major(shape),
            is_view: false,
        }
    }

    /// Wrap `index` over this matrix's storage as a view.
    pub(crate) fn derive<const M: usize>(&self, index: IndexModel<M>) -> Matrix<T, M> {
        Matrix {
            content: self.content.clone(),
            index,
            is_view: true,
        }
    }

    // ========================================================================
    // Shape
    // ========================================================================

    /// Returns the size of each dimension.
    #[inline]
    pub fn shape(&self) -> [usize; N] {
        *self.index.size()
    }

    /// Returns the size of dimension `axis`.
    ///
    /// # Panics
    /// Panics if `axis >= N`.
    #[inline]
    pub fn size(&self, axis: usize) -> usize {
        self.index.size()[axis]
    }

    /// Returns the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if some dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        N
    }

    /// Returns true for matrices derived from another matrix.
    #[inline]
    pub fn is_view(&self) -> bool {
        self.is_view
    }

    /// Returns true if the underlying storage is sparse.
    pub fn is_sparse(&self) -> bool {
        self.content.is_sparse()
    }

    #[inline]
    pub fn index_model(&self) -> &IndexModel<N> {
        &self.index
    }

    /// Handle to the storage shared by this matrix and all its views.
    #[inline]
    pub fn content(&self) -> &Content<T> {
        &self.content
    }

    /// `(coords, position)` pairs in row-major order.
    #[inline]
    pub(crate) fn positions(&self) -> Positions<N> {
        self.index.positions()
    }

    pub(crate) fn check_shape<const M: usize>(&self, other: &Matrix<T, M>) -> Result<()> {
        if N != M || self.index.size()[..] != other.index.size()[..] {
            return Err(MatrixError::ShapeMismatch(
                self.shape().to_vec(),
                other.shape().to_vec(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Element access
    // ========================================================================

    #[inline]
    pub(crate) fn read(&self, pos: usize) -> T {
        self.content.borrow().get(pos)
    }

    #[inline]
    pub(crate) fn write(&mut self, pos: usize, value: T) {
        self.content.borrow_mut().set(pos, value);
    }

    /// Get the cell at `coords`.
    ///
    /// # Errors
    /// Returns [`MatrixError::IndexOutOfBounds`] outside the matrix.
    pub fn get(&self, coords: [usize; N]) -> Result<T> {
        self.index.check_index(&coords)?;
        Ok(self.get_quick(coords))
    }

    /// Set the cell at `coords`.
    ///
    /// # Errors
    /// Returns [`MatrixError::IndexOutOfBounds`] outside the matrix.
    pub fn set(&mut self, coords: [usize; N], value: T) -> Result<()> {
        self.index.check_index(&coords)?;
        self.set_quick(coords, value);
        Ok(())
    }

    /// Get the cell at `coords` without checking logical bounds.
    ///
    /// Out-of-range coordinates read an unrelated cell or panic.
    #[inline]
    pub fn get_quick(&self, coords: [usize; N]) -> T {
        self.read(self.index.position(&coords) as usize)
    }

    /// Set the cell at `coords` without checking logical bounds.
    ///
    /// Out-of-range coordinates overwrite an unrelated cell or panic.
    #[inline]
    pub fn set_quick(&mut self, coords: [usize; N], value: T) {
        let pos = self.index.position(&coords) as usize;
        self.write(pos, value);
    }

    // ========================================================================
    // Construction from an existing matrix
    // ========================================================================

    /// View of the whole matrix sharing its storage.
    pub fn view(&self) -> Self {
        self.derive(self.index.clone())
    }

    /// Fresh zero-filled matrix of the same shape and storage kind.
    pub fn like(&self) -> Self {
        self.like_shape(self.shape())
    }

    /// Fresh zero-filled matrix of any rank with the same storage kind.
    pub fn like_shape<const M: usize>(&self, shape: [usize; M]) -> Matrix<T, M> {
        let len = shape.iter().product();
        let storage = self.content.borrow().like(len);
        Matrix::with_storage(shape, storage)
    }

    /// Independent deep copy with the same shape and storage kind.
    pub fn copy(&self) -> Self {
        let mut out = self.like();
        for ((_, src), (_, dst)) in self.positions().zip(out.positions()) {
            let value = self.read(src);
            out.write(dst, value);
        }
        out
    }

    /// Row-major snapshot of all cells.
    pub fn to_vec(&self) -> Vec<T> {
        let storage = self.content.borrow();
        self.positions().map(|(_, pos)| storage.get(pos)).collect()
    }

    /// Append the coordinates and values of all non-zero cells, in row-major
    /// order, to `coords` and `values`. Both lists are cleared first.
    pub fn get_non_zeros(&self, coords: &mut ArrayList<[usize; N]>, values: &mut ArrayList<T>) {
        coords.clear();
        values.clear();
        let storage = self.content.borrow();
        for (c, pos) in self.positions() {
            let value = storage.get(pos);
            if !value.is_zero_element() {
                coords.add(c);
                values.add(value);
            }
        }
    }
}

impl<T: Element, const N: usize> PartialEq for Matrix<T, N> {
    /// Cell-wise equality of shape and values (IEEE semantics for floats).
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
            && self
                .positions()
                .zip(other.positions())
                .all(|((_, a), (_, b))| self.read(a) == other.read(b))
    }
}

// ============================================================================
// Rank-specific construction and export
// ============================================================================

impl<T: Element> Matrix<T, 1> {
    /// Dense vector holding a copy of `values`.
    pub fn from_slice(values: &[T]) -> Self {
        Self::with_storage(
            [values.len()],
            Storage::Dense(DenseStorage::from_vec(values.to_vec())),
        )
    }

    /// Independent copy of the cells.
    pub fn to_array(&self) -> Vec<T> {
        self.to_vec()
    }
}

impl<T: Element> Matrix<T, 2> {
    /// Dense matrix holding a copy of `rows`.
    ///
    /// # Errors
    /// Returns [`MatrixError::RaggedInput`] if rows differ in length.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let columns = rows.first().map_or(0, Vec::len);
        for (entry, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(MatrixError::RaggedInput {
                    entry,
                    len: row.len(),
                    expected: columns,
                });
            }
        }
        let values = rows.iter().flatten().cloned().collect();
        Self::from_vec([rows.len(), columns], values)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.size(0)
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.size(1)
    }

    /// Independent copy of the cells as nested rows.
    pub fn to_array(&self) -> Vec<Vec<T>> {
        (0..self.rows())
            .map(|r| (0..self.columns()).map(|c| self.get_quick([r, c])).collect())
            .collect()
    }
}

impl<T: Element> Matrix<T, 3> {
    /// Dense matrix holding a copy of `slices` (indexed `[slice][row][column]`).
    ///
    /// # Errors
    /// Returns [`MatrixError::RaggedInput`] if the input is not a cuboid.
    pub fn from_slices(slices: &[Vec<Vec<T>>]) -> Result<Self> {
        let rows = slices.first().map_or(0, Vec::len);
        let columns = slices
            .first()
            .and_then(|s| s.first())
            .map_or(0, Vec::len);
        for (s, slice) in slices.iter().enumerate() {
            if slice.len() != rows {
                return Err(MatrixError::RaggedInput {
                    entry: s,
                    len: slice.len(),
                    expected: rows,
                });
            }
            for (r, row) in slice.iter().enumerate() {
                if row.len() != columns {
                    return Err(MatrixError::RaggedInput {
                        entry: s * rows + r,
                        len: row.len(),
                        expected: columns,
                    });
                }
            }
        }
        let values = slices.iter().flatten().flatten().cloned().collect();
        Self::from_vec([slices.len(), rows, columns], values)
    }

    #[inline]
    pub fn slices(&self) -> usize {
        self.size(0)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.size(1)
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.size(2)
    }

    /// Independent copy of the cells as nested slices of rows.
    pub fn to_array(&self) -> Vec<Vec<Vec<T>>> {
        (0..self.slices())
            .map(|s| {
                (0..self.rows())
                    .map(|r| {
                        (0..self.columns())
                            .map(|c| self.get_quick([s, r, c]))
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }
}
