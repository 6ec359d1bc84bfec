//! Storage-selection factory and canonical constructors.

use matrix_traits::{Element, Scalar};

use crate::matrix::{Matrix, Matrix1D, Matrix2D};
use crate::storage::{DenseStorage, SparseConfig, SparseStorage, Storage};
use crate::Result;

/// Which backend new matrices use.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Dense,
    Sparse(SparseConfig),
}

/// Builds canonical matrices over a chosen storage backend.
///
/// # Example
/// ```rust
/// use strided_matrix::MatrixFactory;
///
/// let f = MatrixFactory::sparse();
/// let id = f.identity::<f64>(1000);
/// assert!(id.is_sparse());
/// assert_eq!(id.cardinality(), 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixFactory {
    kind: Kind,
}

impl Default for MatrixFactory {
    fn default() -> Self {
        Self::dense()
    }
}

impl MatrixFactory {
    pub fn dense() -> Self {
        Self { kind: Kind::Dense }
    }

    /// Sparse matrices with the default [`SparseConfig`].
    pub fn sparse() -> Self {
        Self {
            kind: Kind::Sparse(SparseConfig::default()),
        }
    }

    /// Sparse matrices with explicit sizing hints.
    ///
    /// # Errors
    /// Returns a configuration error if `config` is invalid.
    pub fn sparse_with(config: SparseConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            kind: Kind::Sparse(config),
        })
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self.kind, Kind::Sparse(_))
    }

    fn storage<T: Element>(&self, len: usize) -> Storage<T> {
        match self.kind {
            Kind::Dense => Storage::Dense(DenseStorage::zeros(len)),
            Kind::Sparse(config) => Storage::Sparse(SparseStorage::with_valid_config(len, config)),
        }
    }

    /// Zero-filled matrix.
    pub fn make<T: Element, const N: usize>(&self, shape: [usize; N]) -> Matrix<T, N> {
        let len = shape.iter().product();
        Matrix::with_storage(shape, self.storage(len))
    }

    /// Matrix with every cell set to `value`.
    pub fn make_filled<T: Element, const N: usize>(&self, shape: [usize; N], value: T) -> Matrix<T, N> {
        let mut m = self.make(shape);
        m.assign(value);
        m
    }

    /// Matrix holding a copy of the row-major `values`.
    ///
    /// # Errors
    /// Returns [`MatrixError::ShapeMismatch`](crate::MatrixError::ShapeMismatch)
    /// if the length does not match the shape.
    pub fn make_from_vec<T: Element, const N: usize>(
        &self,
        shape: [usize; N],
        values: &[T],
    ) -> Result<Matrix<T, N>> {
        let mut m = self.make(shape);
        m.assign_slice(values)?;
        Ok(m)
    }

    /// Cells `0, 1, 2, ...` in row-major order.
    pub fn ascending<T: Scalar, const N: usize>(&self, shape: [usize; N]) -> Matrix<T, N> {
        let mut m = self.make(shape);
        let mut next = T::zero();
        m.assign_map(|_| {
            let value = next;
            next = next + T::one();
            value
        });
        m
    }

    /// `n x n` identity.
    pub fn identity<T: Scalar>(&self, n: usize) -> Matrix2D<T> {
        let mut m = self.make([n, n]);
        for i in 0..n {
            m.set_quick([i, i], T::one());
        }
        m
    }

    /// Square matrix with `vector` on the diagonal.
    pub fn diagonal<T: Element>(&self, vector: &Matrix1D<T>) -> Matrix2D<T> {
        let n = vector.len();
        let mut m = self.make([n, n]);
        for i in 0..n {
            m.set_quick([i, i], vector.get_quick([i]));
        }
        m
    }

    /// New vector holding the diagonal of `matrix`.
    pub fn diagonal_of<T: Element>(&self, matrix: &Matrix2D<T>) -> Matrix1D<T> {
        let n = matrix.rows().min(matrix.columns());
        let mut v = self.make([n]);
        for i in 0..n {
            v.set_quick([i], matrix.get_quick([i, i]));
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixError;

    #[test]
    fn test_backend_selection() {
        let dense: Matrix2D<f64> = MatrixFactory::dense().make([2, 2]);
        assert!(!dense.is_sparse());
        let sparse: Matrix2D<f64> = MatrixFactory::sparse().make([2, 2]);
        assert!(sparse.is_sparse());
        assert_eq!(MatrixFactory::default(), MatrixFactory::dense());
    }

    #[test]
    fn test_sparse_with_validates() {
        let bad = SparseConfig {
            min_load_factor: 0.6,
            max_load_factor: 0.5,
            ..SparseConfig::default()
        };
        assert!(matches!(
            MatrixFactory::sparse_with(bad),
            Err(MatrixError::InvalidLoadFactors { .. })
        ));
        let good = SparseConfig {
            initial_capacity: 8,
            ..SparseConfig::default()
        };
        assert!(MatrixFactory::sparse_with(good).unwrap().is_sparse());
    }

    #[test]
    fn test_make_filled_and_from_vec() {
        let f = MatrixFactory::dense();
        let m = f.make_filled([2, 3], 1.5);
        assert_eq!(m.to_vec(), vec![1.5; 6]);
        let v = f.make_from_vec([2, 2], &[1, 2, 3, 4]).unwrap();
        assert_eq!(v.to_array(), vec![vec![1, 2], vec![3, 4]]);
        assert!(f.make_from_vec([2, 2], &[1, 2, 3]).is_err());
    }

    #[test]
    fn test_ascending() {
        let m: Matrix<f64, 3> = MatrixFactory::sparse().ascending([2, 2, 2]);
        assert_eq!(m.to_vec(), (0..8).map(|x| x as f64).collect::<Vec<_>>());
        assert_eq!(m.cardinality(), 7);
    }

    #[test]
    fn test_identity_and_diagonals() {
        let f = MatrixFactory::dense();
        let id: Matrix2D<f64> = f.identity(3);
        assert_eq!(id.z_sum(), 3.0);
        assert_eq!(id.get([1, 1]).unwrap(), 1.0);
        assert_eq!(id.get([0, 1]).unwrap(), 0.0);

        let d = f.diagonal(&Matrix1D::from_slice(&[1.0, 2.0]));
        assert_eq!(d.to_array(), vec![vec![1.0, 0.0], vec![0.0, 2.0]]);

        let rect = Matrix2D::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert_eq!(f.diagonal_of(&rect).to_array(), vec![1, 5]);
    }
}
