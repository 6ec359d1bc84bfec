//! Structural predicates with an explicit numeric tolerance.
//!
//! A [`Property`] is a plain value holding a tolerance `ε`. A cell counts as
//! zero when `|v| <= ε` and two cells are equal when
//! [`Scalar::equals_within`] holds. Three canonical instances are provided
//! as associated constants; there is no setter, so they cannot be changed.
//!
//! Predicates that only make sense for square matrices return
//! [`MatrixError::NonSquare`] instead of `false`.

use matrix_traits::Scalar;
use num_traits::NumCast;

use crate::matrix::{Matrix, Matrix2D};
use crate::{MatrixError, Result};

/// Tolerance-parameterized structural predicates.
///
/// # Example
/// ```rust
/// use strided_matrix::{Matrix2D, Property};
///
/// let a = Matrix2D::from_rows(&[vec![1.0, 0.0], vec![1e-12, 1.0]]).unwrap();
/// assert!(Property::DEFAULT.is_identity(&a));
/// assert!(!Property::ZERO.is_identity(&a));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Property {
    tolerance: f64,
}

impl Default for Property {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Property {
    /// Tolerance `1e-9`.
    pub const DEFAULT: Property = Property { tolerance: 1e-9 };
    /// Exact comparisons.
    pub const ZERO: Property = Property { tolerance: 0.0 };
    /// Tolerance `1e-12`.
    pub const TWELVE: Property = Property { tolerance: 1e-12 };

    /// Predicates with tolerance `|tolerance|`.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[inline]
    fn epsilon<T: Scalar>(&self) -> T {
        <T as NumCast>::from(self.tolerance).unwrap_or_else(T::zero)
    }

    #[inline]
    fn is_negligible<T: Scalar>(&self, value: T) -> bool {
        value.abs() <= self.epsilon()
    }

    /// True if every off-band cell is negligible, where `in_band(r, c)`
    /// marks the cells allowed to hold values.
    fn band_is_zero<T, F>(&self, a: &Matrix2D<T>, in_band: F) -> bool
    where
        T: Scalar,
        F: Fn(usize, usize) -> bool,
    {
        (0..a.rows()).all(|r| {
            (0..a.columns()).all(|c| in_band(r, c) || self.is_negligible(a.get_quick([r, c])))
        })
    }

    // ========================================================================
    // Equality
    // ========================================================================

    /// True if every cell equals `value` within tolerance.
    ///
    /// NaN equals NaN, so a matrix of NaNs equals the NaN value.
    pub fn equals_value<T: Scalar, const N: usize>(&self, a: &Matrix<T, N>, value: T) -> bool {
        let epsilon = self.epsilon();
        a.to_vec()
            .into_iter()
            .all(|x| value.equals_within(x, epsilon))
    }

    /// True if `a` and `b` have the same shape and equal cells within
    /// tolerance.
    pub fn equals<T: Scalar, const N: usize>(&self, a: &Matrix<T, N>, b: &Matrix<T, N>) -> bool {
        if a.shape() != b.shape() {
            return false;
        }
        let epsilon = self.epsilon();
        a.to_vec()
            .into_iter()
            .zip(b.to_vec())
            .all(|(x, y)| x.equals_within(y, epsilon))
    }

    /// Fraction of cells that are non-zero (tolerance ignored).
    pub fn density<T: Scalar, const N: usize>(&self, a: &Matrix<T, N>) -> f64 {
        if a.is_empty() {
            return 0.0;
        }
        a.cardinality() as f64 / a.len() as f64
    }

    // ========================================================================
    // Shape checks
    // ========================================================================

    /// # Errors
    /// Returns [`MatrixError::NonSquare`] if `rows != columns`.
    pub fn check_square<T: Scalar>(&self, a: &Matrix2D<T>) -> Result<()> {
        if a.rows() != a.columns() {
            return Err(MatrixError::NonSquare {
                rows: a.rows(),
                cols: a.columns(),
            });
        }
        Ok(())
    }

    /// # Errors
    /// Returns [`MatrixError::NonRectangular`] if `rows < columns`.
    pub fn check_rectangular<T: Scalar>(&self, a: &Matrix2D<T>) -> Result<()> {
        if a.rows() < a.columns() {
            return Err(MatrixError::NonRectangular {
                rows: a.rows(),
                cols: a.columns(),
            });
        }
        Ok(())
    }

    pub fn is_square<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        a.rows() == a.columns()
    }

    // ========================================================================
    // Zero patterns
    // ========================================================================

    pub fn is_zero<T: Scalar, const N: usize>(&self, a: &Matrix<T, N>) -> bool {
        self.equals_value(a, T::zero())
    }

    /// Off-diagonal cells are negligible.
    pub fn is_diagonal<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        self.band_is_zero(a, |r, c| r == c)
    }

    /// Square, diagonal within tolerance of one, everything else negligible.
    pub fn is_identity<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        if !self.is_square(a) {
            return false;
        }
        let epsilon = self.epsilon();
        self.is_diagonal(a)
            && (0..a.rows()).all(|i| T::one().equals_within(a.get_quick([i, i]), epsilon))
    }

    /// Cells above the diagonal are negligible.
    pub fn is_lower_triangular<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        self.band_is_zero(a, |r, c| r >= c)
    }

    /// Cells below the diagonal are negligible.
    pub fn is_upper_triangular<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        self.band_is_zero(a, |r, c| r <= c)
    }

    pub fn is_triangular<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        self.is_lower_triangular(a) || self.is_upper_triangular(a)
    }

    /// Cells on or above the diagonal are negligible.
    pub fn is_strictly_lower_triangular<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        self.band_is_zero(a, |r, c| r > c)
    }

    /// Cells on or below the diagonal are negligible.
    pub fn is_strictly_upper_triangular<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        self.band_is_zero(a, |r, c| r < c)
    }

    pub fn is_strictly_triangular<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        self.is_strictly_lower_triangular(a) || self.is_strictly_upper_triangular(a)
    }

    /// Triangular with every diagonal cell within tolerance of one.
    pub fn is_unit_triangular<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        let epsilon = self.epsilon();
        self.is_triangular(a)
            && (0..a.rows().min(a.columns()))
                .all(|i| T::one().equals_within(a.get_quick([i, i]), epsilon))
    }

    /// Cells more than one step from the diagonal are negligible.
    pub fn is_tridiagonal<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        self.band_is_zero(a, |r, c| r.abs_diff(c) <= 1)
    }

    /// Values only on the diagonal and the first subdiagonal.
    pub fn is_lower_bidiagonal<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        self.band_is_zero(a, |r, c| r == c || r == c + 1)
    }

    /// Values only on the diagonal and the first superdiagonal.
    pub fn is_upper_bidiagonal<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        self.band_is_zero(a, |r, c| r == c || r + 1 == c)
    }

    // ========================================================================
    // Sign
    // ========================================================================

    /// Every cell is `>= 0` (NaN fails).
    pub fn is_non_negative<T: Scalar, const N: usize>(&self, a: &Matrix<T, N>) -> bool {
        a.to_vec().into_iter().all(|x| x >= T::zero())
    }

    /// Every cell is `> 0` (NaN fails).
    pub fn is_positive<T: Scalar, const N: usize>(&self, a: &Matrix<T, N>) -> bool {
        a.to_vec().into_iter().all(|x| x > T::zero())
    }

    // ========================================================================
    // Square-only predicates
    // ========================================================================

    /// `A == Aᵗ` within tolerance.
    pub fn is_symmetric<T: Scalar>(&self, a: &Matrix2D<T>) -> Result<bool> {
        self.check_square(a)?;
        Ok(self.equals(a, &a.view_transpose()))
    }

    /// `A == -Aᵗ` within tolerance.
    pub fn is_skew_symmetric<T: Scalar>(&self, a: &Matrix2D<T>) -> Result<bool> {
        self.check_square(a)?;
        let n = a.rows();
        Ok((0..n).all(|r| {
            (0..n).all(|c| self.is_negligible(a.get_quick([r, c]) + a.get_quick([c, r])))
        }))
    }

    /// `A * Aᵗ == I` within tolerance.
    pub fn is_orthogonal<T: Scalar>(&self, a: &Matrix2D<T>) -> Result<bool> {
        self.check_square(a)?;
        let product = a.mult_matrix(a, None, T::one(), T::zero(), false, true)?;
        Ok(self.is_identity(&product))
    }

    /// Largest `k` such that some cell `k` rows below the diagonal is not
    /// negligible; zero for diagonal matrices.
    pub fn lower_bandwidth<T: Scalar>(&self, a: &Matrix2D<T>) -> Result<usize> {
        self.check_square(a)?;
        let n = a.rows();
        for k in (0..n).rev() {
            if (0..n - k).any(|i| !self.is_negligible(a.get_quick([i + k, i]))) {
                return Ok(k);
            }
        }
        Ok(0)
    }

    /// Largest `k` such that some cell `k` columns right of the diagonal is
    /// not negligible; zero for diagonal matrices.
    pub fn upper_bandwidth<T: Scalar>(&self, a: &Matrix2D<T>) -> Result<usize> {
        self.check_square(a)?;
        let n = a.rows();
        for k in (0..n).rev() {
            if (0..n - k).any(|i| !self.is_negligible(a.get_quick([i, i + k]))) {
                return Ok(k);
            }
        }
        Ok(0)
    }

    /// One plus the largest diagonal distance holding a non-negligible
    /// value; one for diagonal (and all-zero) matrices, two for tridiagonal.
    pub fn semi_bandwidth<T: Scalar>(&self, a: &Matrix2D<T>) -> Result<usize> {
        self.check_square(a)?;
        let n = a.rows();
        for k in (0..n).rev() {
            let occupied = (0..n - k).any(|i| {
                !self.is_negligible(a.get_quick([i + k, i]))
                    || !self.is_negligible(a.get_quick([i, i + k]))
            });
            if occupied {
                return Ok(k + 1);
            }
        }
        Ok(1)
    }

    /// `2|a_ii|` strictly exceeds the absolute sum of row `i`, for every
    /// diagonal cell. The tolerance does not apply.
    pub fn is_diagonally_dominant_by_row<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        (0..a.rows().min(a.columns())).all(|i| {
            let diag = a.get_quick([i, i]).abs();
            let row_sum = (0..a.columns())
                .map(|c| a.get_quick([i, c]).abs())
                .fold(T::zero(), |acc, x| acc + x);
            diag + diag > row_sum
        })
    }

    /// `2|a_ii|` strictly exceeds the absolute sum of column `i`, for every
    /// diagonal cell. The tolerance does not apply.
    pub fn is_diagonally_dominant_by_column<T: Scalar>(&self, a: &Matrix2D<T>) -> bool {
        (0..a.rows().min(a.columns())).all(|i| {
            let diag = a.get_quick([i, i]).abs();
            let column_sum = (0..a.rows())
                .map(|r| a.get_quick([r, i]).abs())
                .fold(T::zero(), |acc, x| acc + x);
            diag + diag > column_sum
        })
    }

    /// `!(|det A| >= ε)`; NaN determinants count as singular.
    pub fn is_singular<T: Scalar>(&self, a: &Matrix2D<T>) -> Result<bool> {
        self.check_square(a)?;
        Ok(!(determinant(a).abs() >= self.epsilon()))
    }

    /// Overwrite the diagonal so that `a` becomes strictly diagonally
    /// dominant (and therefore non-singular): `a_ii = max(row_sum, col_sum) + i + 1`
    /// with the sums taken over off-diagonal magnitudes.
    pub fn generate_non_singular<T: Scalar>(&self, a: &mut Matrix2D<T>) {
        let min = a.rows().min(a.columns());
        for i in 0..min {
            a.set_quick([i, i], T::zero());
        }
        for i in (0..min).rev() {
            let row_sum = (0..a.columns())
                .map(|c| a.get_quick([i, c]).abs())
                .fold(T::zero(), |acc, x| acc + x);
            let column_sum = (0..a.rows())
                .map(|r| a.get_quick([r, i]).abs())
                .fold(T::zero(), |acc, x| acc + x);
            let bump = <T as NumCast>::from(i + 1).unwrap_or_else(T::one);
            a.set_quick([i, i], row_sum.max(column_sum) + bump);
        }
    }
}

/// Determinant by Gaussian elimination with partial pivoting.
fn determinant<T: Scalar>(a: &Matrix2D<T>) -> T {
    let n = a.rows();
    let mut lu = a.to_array();
    let mut det = T::one();
    for k in 0..n {
        let pivot = (k..n)
            .max_by(|&i, &j| {
                lu[i][k]
                    .abs()
                    .partial_cmp(&lu[j][k].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(k);
        if pivot != k {
            lu.swap(pivot, k);
            det = -det;
        }
        let p = lu[k][k];
        if p.is_zero() {
            return T::zero();
        }
        det = det * p;
        for i in k + 1..n {
            let factor = lu[i][k] / p;
            for j in k + 1..n {
                let update = factor * lu[k][j];
                lu[i][j] = lu[i][j] - update;
            }
        }
    }
    det
}
