//! Matrix-vector and matrix-matrix products.
//!
//! Transposed operands are resolved through [`Matrix::view_transpose`], so
//! no operand is ever copied. Results may not share storage with an operand.
//!
//! # Key functions
//!
//! - [`Matrix::mult_vector`]: `z = alpha * A * y + beta * z`
//! - [`Matrix::mult_matrix`]: `C = alpha * A * B + beta * C`
//! - [`Matrix::z_dot_product`]: inner product of two vectors

use matrix_traits::Scalar;

use crate::matrix::{Matrix, Matrix1D, Matrix2D};
use crate::{MatrixError, Result};

/// Write `alpha * sum + beta * current` without reading `current` when
/// `beta` is zero.
#[inline]
fn scaled_update<T: Scalar>(alpha: T, sum: T, beta: T, current: impl FnOnce() -> T) -> T {
    if beta.is_zero() {
        alpha * sum
    } else if beta.is_one() {
        alpha * sum + current()
    } else {
        alpha * sum + beta * current()
    }
}

impl<T: Scalar> Matrix<T, 2> {
    /// `z = alpha * A * y + beta * z`, or with `Aᵗ` if `transpose_a`.
    ///
    /// When `z` is `None` a zero vector of length `rows` is allocated and
    /// `beta` is treated as zero. Pass `Some(z.view())` to keep a handle on
    /// a caller-owned result.
    ///
    /// # Errors
    /// - [`MatrixError::ShapeMismatch`] unless `columns == y.len()` and
    ///   `rows <= z.len()` (after transposition)
    /// - [`MatrixError::AliasedOperand`] if `z` shares storage with `A` or `y`
    pub fn mult_vector(
        &self,
        y: &Matrix1D<T>,
        z: Option<Matrix1D<T>>,
        alpha: T,
        beta: T,
        transpose_a: bool,
    ) -> Result<Matrix1D<T>> {
        if transpose_a {
            tracing::trace!(shape = ?self.shape(), "mult_vector: transposing A through a view");
            return self.view_transpose().mult_vector(y, z, alpha, beta, false);
        }

        let (rows, columns) = (self.rows(), self.columns());
        let (mut z, beta) = match z {
            Some(z) => (z, beta),
            None => (self.like_shape([rows]), T::zero()),
        };
        if columns != y.len() || rows > z.len() {
            return Err(MatrixError::ShapeMismatch(
                vec![rows, columns],
                vec![y.len(), z.len()],
            ));
        }
        if z.shares_storage(self) || z.shares_storage(y) {
            return Err(MatrixError::AliasedOperand);
        }

        for r in 0..rows {
            let mut sum = T::zero();
            for c in 0..columns {
                sum = sum + self.get_quick([r, c]) * y.get_quick([c]);
            }
            let value = scaled_update(alpha, sum, beta, || z.get_quick([r]));
            z.set_quick([r], value);
        }
        Ok(z)
    }

    /// `C = alpha * op(A) * op(B) + beta * C`, `op` transposing when the
    /// matching flag is set.
    ///
    /// When `c` is `None` a zero matrix is allocated and `beta` is treated as
    /// zero.
    ///
    /// # Errors
    /// - [`MatrixError::ShapeMismatch`] if the inner dimensions disagree or
    ///   `C` is not `rows(A) x columns(B)` (after transposition)
    /// - [`MatrixError::AliasedOperand`] if `C` shares storage with `A` or `B`
    ///
    /// # Example
    /// ```rust
    /// use strided_matrix::Matrix2D;
    ///
    /// let a = Matrix2D::from_rows(&[vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();
    /// let b = Matrix2D::from_rows(&[vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]]).unwrap();
    /// let c = a.mult_matrix(&b, None, 1.0, 0.0, false, false).unwrap();
    /// assert_eq!(c.to_array(), vec![vec![10.0, 13.0], vec![28.0, 40.0]]);
    /// ```
    pub fn mult_matrix(
        &self,
        b: &Matrix2D<T>,
        c: Option<Matrix2D<T>>,
        alpha: T,
        beta: T,
        transpose_a: bool,
        transpose_b: bool,
    ) -> Result<Matrix2D<T>> {
        if transpose_a {
            tracing::trace!(shape = ?self.shape(), "mult_matrix: transposing A through a view");
            return self
                .view_transpose()
                .mult_matrix(b, c, alpha, beta, false, transpose_b);
        }
        if transpose_b {
            tracing::trace!(shape = ?b.shape(), "mult_matrix: transposing B through a view");
            return self.mult_matrix(&b.view_transpose(), c, alpha, beta, false, false);
        }

        let (m, n, p) = (self.rows(), self.columns(), b.columns());
        if b.rows() != n {
            return Err(MatrixError::ShapeMismatch(
                self.shape().to_vec(),
                b.shape().to_vec(),
            ));
        }
        let (mut c, beta) = match c {
            Some(c) => (c, beta),
            None => (self.like_shape([m, p]), T::zero()),
        };
        if c.shape() != [m, p] {
            return Err(MatrixError::ShapeMismatch(vec![m, p], c.shape().to_vec()));
        }
        if c.shares_storage(self) || c.shares_storage(b) {
            return Err(MatrixError::AliasedOperand);
        }

        for i in 0..m {
            for j in 0..p {
                let mut sum = T::zero();
                for k in 0..n {
                    sum = sum + self.get_quick([i, k]) * b.get_quick([k, j]);
                }
                let value = scaled_update(alpha, sum, beta, || c.get_quick([i, j]));
                c.set_quick([i, j], value);
            }
        }
        Ok(c)
    }
}

impl<T: Scalar> Matrix<T, 1> {
    /// `Σ self[i] * y[i]`; zero for empty vectors.
    ///
    /// # Errors
    /// Returns [`MatrixError::ShapeMismatch`] if the lengths differ.
    pub fn z_dot_product(&self, y: &Matrix1D<T>) -> Result<T> {
        self.check_shape(y)?;
        let mut sum = T::zero();
        for i in 0..self.len() {
            sum = sum + self.get_quick([i]) * y.get_quick([i]);
        }
        Ok(sum)
    }
}
