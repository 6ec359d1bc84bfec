//! Cell element bound.

use std::fmt::Debug;

/// Trait for values that can be stored in a matrix cell.
///
/// The `Default` value is the cell's zero: sparse storage never keeps it,
/// `cardinality` does not count it and `for_each_non_zero` skips it.
/// Blanket-implemented, so numeric types, `Complex<T>` and object types such
/// as `Option<String>` all qualify without further code.
pub trait Element: Clone + PartialEq + Default + Debug {
    /// Returns true if this value equals the zero (default) value.
    ///
    /// For floats `-0.0` counts as zero and NaN does not.
    #[inline]
    fn is_zero_element(&self) -> bool {
        *self == Self::default()
    }
}

impl<T> Element for T where T: Clone + PartialEq + Default + Debug {}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn assert_element<T: Element>() {}

    #[test]
    fn test_standard_types() {
        assert_element::<f32>();
        assert_element::<f64>();
        assert_element::<i32>();
        assert_element::<u8>();
        assert_element::<Complex64>();
        assert_element::<Option<String>>();
    }

    #[test]
    fn test_float_zero() {
        assert!(0.0f64.is_zero_element());
        assert!((-0.0f64).is_zero_element());
        assert!(!f64::NAN.is_zero_element());
        assert!(!1e-300f64.is_zero_element());
    }

    #[test]
    fn test_object_zero() {
        let none: Option<String> = None;
        assert!(none.is_zero_element());
        assert!(!Some(String::new()).is_zero_element());
        assert!(Complex64::new(0.0, 0.0).is_zero_element());
        assert!(!Complex64::new(0.0, 1.0).is_zero_element());
    }
}
