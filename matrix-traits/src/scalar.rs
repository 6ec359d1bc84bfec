//! Scalar type bounds for numeric matrix operations.

use num_traits::Float;

use crate::Element;

/// Shared trait bounds for numeric element types.
///
/// Aggregation (with its not-a-number sentinel), multiplication and the
/// structural predicates need `Scalar`. Object matrices only need
/// [`Element`].
pub trait Scalar: Element + Float {
    /// Tolerance equality: `|self - other| <= epsilon`.
    ///
    /// When the difference itself is NaN but both operands are NaN, or both
    /// operands compare equal (equal infinities), the values are equal.
    #[inline]
    fn equals_within(self, other: Self, epsilon: Self) -> bool {
        let mut diff = (self - other).abs();
        if diff.is_nan() && ((self.is_nan() && other.is_nan()) || self == other) {
            diff = Self::zero();
        }
        diff <= epsilon
    }
}

impl<T> Scalar for T where T: Element + Float {}
