//! Property-based tests for view composition, aliasing and sorting.

use proptest::prelude::*;
use strided_matrix::sort::{binary_search, compare_nan_last, merge_sort_by, quick_sort};
use strided_matrix::{Matrix, Matrix1D, Matrix2D, Matrix3D};

// ============================================================================
// Test Utilities
// ============================================================================

fn matrix_strategy() -> impl Strategy<Value = Matrix2D<i32>> {
    (1usize..8, 1usize..8).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(-100i32..100, rows * cols)
            .prop_map(move |data| Matrix::from_vec([rows, cols], data).unwrap())
    })
}

fn square_strategy() -> impl Strategy<Value = Matrix2D<i32>> {
    (1usize..8).prop_flat_map(|n| {
        prop::collection::vec(-100i32..100, n * n)
            .prop_map(move |data| Matrix::from_vec([n, n], data).unwrap())
    })
}

fn tensor_strategy() -> impl Strategy<Value = Matrix3D<i32>> {
    (1usize..5, 1usize..5, 1usize..5).prop_flat_map(|(s, r, c)| {
        prop::collection::vec(-100i32..100, s * r * c)
            .prop_map(move |data| Matrix::from_vec([s, r, c], data).unwrap())
    })
}

fn permutation_strategy() -> impl Strategy<Value = [usize; 3]> {
    Just(vec![0usize, 1, 2])
        .prop_shuffle()
        .prop_map(|p| [p[0], p[1], p[2]])
}

// ============================================================================
// View Round-Trips
// ============================================================================

proptest! {
    /// Property: flipping an axis twice restores the original order
    #[test]
    fn prop_flip_twice_is_identity(m in matrix_strategy(), axis in 0usize..2) {
        let back = m.view_flip(axis).unwrap().view_flip(axis).unwrap();
        prop_assert_eq!(back, m);
    }

    /// Property: transposing twice restores the original
    #[test]
    fn prop_transpose_twice_is_identity(m in matrix_strategy()) {
        let back = m.view_transpose().view_transpose();
        prop_assert_eq!(back.shape(), m.shape());
        prop_assert_eq!(back, m);
    }

    /// Property: dicing by a permutation then its inverse is the identity
    #[test]
    fn prop_dice_inverse(m in tensor_strategy(), perm in permutation_strategy()) {
        let mut inverse = [0usize; 3];
        for (i, &p) in perm.iter().enumerate() {
            inverse[p] = i;
        }
        let back = m.view_dice(perm).unwrap().view_dice(inverse).unwrap();
        prop_assert_eq!(back, m);
    }

    /// Property: the full-extent part is indistinguishable from the matrix
    #[test]
    fn prop_full_part_is_identity(m in matrix_strategy()) {
        let part = m.view_part([0, 0], m.shape()).unwrap();
        prop_assert!(part.is_view());
        prop_assert_eq!(part, m);
    }

    /// Property: striding keeps ceil(size / factor) cells per axis
    #[test]
    fn prop_strides_shape_and_cells(m in matrix_strategy(), fr in 1usize..4, fc in 1usize..4) {
        let s = m.view_strides([fr, fc]).unwrap();
        prop_assert_eq!(s.shape(), [m.rows().div_ceil(fr), m.columns().div_ceil(fc)]);
        for r in 0..s.rows() {
            for c in 0..s.columns() {
                prop_assert_eq!(s.get([r, c]).unwrap(), m.get([r * fr, c * fc]).unwrap());
            }
        }
    }
}

// ============================================================================
// Aliasing Properties
// ============================================================================

proptest! {
    /// Property: assigning a transposed view of itself equals transposing a copy
    #[test]
    fn prop_in_place_transpose(m in square_strategy()) {
        let expected = m.copy().view_transpose().copy();
        let mut target = m.view();
        target.assign_from(&m.view_transpose()).unwrap();
        prop_assert_eq!(m, expected);
    }

    /// Property: assigning a flipped view of itself reverses the rows
    #[test]
    fn prop_in_place_row_flip(m in matrix_strategy()) {
        let mut expected = m.to_array();
        expected.reverse();
        let mut target = m.view();
        target.assign_from(&m.view_row_flip()).unwrap();
        prop_assert_eq!(m.to_array(), expected);
    }
}

// ============================================================================
// Sorting Properties
// ============================================================================

proptest! {
    /// Property: quick_sort agrees with the standard library sort
    #[test]
    fn prop_quick_sort_matches_std(mut data in prop::collection::vec(-50i32..50, 0..200)) {
        let mut expected = data.clone();
        expected.sort();
        quick_sort(&mut data);
        prop_assert_eq!(data, expected);
    }

    /// Property: merge sort orders numbers and places NaN last
    #[test]
    fn prop_merge_sort_nan_last(data in prop::collection::vec(prop::option::of(-10.0f64..10.0), 0..100)) {
        let mut values: Vec<f64> = data.iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        merge_sort_by(&mut values, compare_nan_last);
        let numbers = values.iter().take_while(|v| !v.is_nan()).count();
        prop_assert!(values[numbers..].iter().all(|v| v.is_nan()));
        prop_assert!(values[..numbers].windows(2).all(|w| w[0] <= w[1]));
    }

    /// Property: binary_search finds present keys and reports insertion points
    #[test]
    fn prop_binary_search(mut data in prop::collection::vec(-50i32..50, 0..100), key in -60i32..60) {
        data.sort();
        match binary_search(&data, &key) {
            Ok(i) => prop_assert_eq!(data[i], key),
            Err(i) => {
                prop_assert!(data[..i].iter().all(|&v| v < key));
                prop_assert!(data[i..].iter().all(|&v| v > key));
            }
        }
    }

    /// Property: a sorted vector view is ordered and a permutation of its source
    #[test]
    fn prop_sorted_view(data in prop::collection::vec(-100.0f64..100.0, 1..50)) {
        let v = Matrix1D::from_slice(&data);
        let sorted = v.view_sorted().to_vec();
        prop_assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        let mut expected = data.clone();
        expected.sort_by(f64::total_cmp);
        prop_assert_eq!(sorted, expected);
    }
}
