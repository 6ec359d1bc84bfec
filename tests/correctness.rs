use approx::assert_relative_eq;
use num_complex::Complex64;
use strided_matrix::{
    have_shared_cells, ArrayList, ErrorKind, Matrix, Matrix1D, Matrix2D, Matrix3D, MatrixError,
    MatrixFactory, Property, SparseConfig,
};

fn ascending(rows: usize, cols: usize) -> Matrix2D<f64> {
    MatrixFactory::dense().ascending([rows, cols])
}

// ============================================================================
// Aliasing
// ============================================================================

#[test]
fn test_transpose_in_place_through_alias() {
    let mut a = ascending(4, 4);
    let expected: Vec<Vec<f64>> = (0..4)
        .map(|r| (0..4).map(|c| (c * 4 + r) as f64).collect())
        .collect();
    let t = a.view_dice([1, 0]).unwrap();
    a.assign_from(&t).unwrap();
    assert_eq!(a.to_array(), expected);
}

#[test]
fn test_transpose_in_place_sparse() {
    let mut a: Matrix2D<f64> = MatrixFactory::sparse().ascending([3, 3]);
    let t = a.view_transpose();
    a.assign_from(&t).unwrap();
    assert_eq!(a.get([0, 2]).unwrap(), 6.0);
    assert_eq!(a.get([2, 0]).unwrap(), 2.0);
    assert_eq!(a.cardinality(), 8);
}

#[test]
fn test_assign_flipped_part_of_self() {
    let v = Matrix1D::from_slice(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    let mut head = v.view_part([0], [4]).unwrap();
    let shifted = v.view_part([2], [4]).unwrap().view_flip(0).unwrap();
    assert!(have_shared_cells(&head, &shifted));
    head.assign_from(&shifted).unwrap();
    assert_eq!(v.to_array(), vec![5.0, 4.0, 3.0, 2.0, 4.0, 5.0]);
}

#[test]
fn test_views_observe_later_mutation() {
    let m = ascending(3, 4);
    let part = m.view_part([1, 1], [2, 2]).unwrap();
    let t = part.view_transpose();
    let mut writer = m.view();
    writer.set([2, 1], 100.0).unwrap();
    assert_eq!(part.get([1, 0]).unwrap(), 100.0);
    assert_eq!(t.get([0, 1]).unwrap(), 100.0);
}

#[test]
fn test_content_queries_between_writes() {
    let mut m: Matrix2D<f64> = Matrix::sparse([3, 3]);
    let content = m.content().clone();
    assert!(content.is_sparse());
    m.set([1, 1], 2.0).unwrap();
    assert_eq!(content.non_zeros(), 1);
    m.set([2, 0], 3.0).unwrap();
    assert_eq!(content.non_zeros(), 2);
    assert_eq!(content.holders(), 2);
}

// ============================================================================
// Shape enforcement
// ============================================================================

#[test]
fn test_assign_with_mismatch_leaves_target_untouched() {
    let mut a = ascending(3, 3);
    let snapshot = a.to_array();
    let b = ascending(3, 2);
    let result = a.assign_with(&b, |x, y| x - y);
    match result {
        Err(err) => assert_eq!(err.kind(), ErrorKind::ShapeMismatch),
        Ok(_) => panic!("expected a shape mismatch"),
    }
    assert_eq!(a.to_array(), snapshot);
}

#[test]
fn test_bounds_errors() {
    let mut m = ascending(2, 2);
    assert_eq!(m.get([0, 2]).unwrap_err().kind(), ErrorKind::Bounds);
    assert_eq!(m.set([5, 0], 1.0).unwrap_err().kind(), ErrorKind::Bounds);
    assert_eq!(
        m.view_part([1, 1], [2, 1]).unwrap_err().kind(),
        ErrorKind::Bounds
    );
    let idx = [0, 7];
    assert_eq!(
        m.view_selection([None, Some(&idx[..])]).unwrap_err().kind(),
        ErrorKind::Bounds
    );
}

#[test]
fn test_configuration_errors() {
    let m = ascending(2, 2);
    assert_eq!(
        m.view_dice([1, 1]).unwrap_err().kind(),
        ErrorKind::Configuration
    );
    assert_eq!(
        m.view_strides([0, 1]).unwrap_err().kind(),
        ErrorKind::Configuration
    );
    assert_eq!(
        SparseConfig::new(0, 0.2, 0.5).unwrap_err(),
        MatrixError::InvalidCapacity(0)
    );
}

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_empty_aggregate_and_z_sum() {
    let empty: Matrix3D<f64> = Matrix::new([2, 0, 3]);
    assert!(empty.aggregate(|a: f64, b| a + b, |x: f64| x).is_nan());
    assert_eq!(empty.z_sum(), 0.0);
}

#[test]
fn test_aggregate_matches_manual_fold() {
    let m = ascending(5, 7).view_column_flip();
    let expected: f64 = (0..35).map(|x| (x as f64).sqrt()).sum();
    let got = m.aggregate(|a: f64, b| a + b, f64::sqrt);
    assert_relative_eq!(got, expected, epsilon = 1e-10);
}

// ============================================================================
// Multiplication
// ============================================================================

#[test]
fn test_multiply_ascending() {
    let a = ascending(2, 3);
    let b = ascending(3, 2);
    let c = a.mult_matrix(&b, None, 1.0, 0.0, false, false).unwrap();
    assert_eq!(c.to_array(), vec![vec![10.0, 13.0], vec![28.0, 40.0]]);

    let wrong = Matrix2D::new([2, 3]);
    let err = a
        .mult_matrix(&b, Some(wrong), 1.0, 0.0, false, false)
        .unwrap_err();
    assert!(matches!(err, MatrixError::ShapeMismatch(..)));
}

#[test]
fn test_multiply_into_view_of_larger_matrix() {
    let a = ascending(2, 3);
    let b = ascending(3, 2);
    let big: Matrix2D<f64> = Matrix::new([4, 4]);
    let target = big.view_part([1, 1], [2, 2]).unwrap();
    a.mult_matrix(&b, Some(target), 1.0, 0.0, false, false)
        .unwrap();
    assert_eq!(big.get([1, 1]).unwrap(), 10.0);
    assert_eq!(big.get([2, 2]).unwrap(), 40.0);
    assert_eq!(big.z_sum(), 91.0);
}

#[test]
fn test_multiply_vector_against_matrix_product() {
    let a = ascending(3, 4);
    let y = Matrix1D::from_slice(&[1.0, -1.0, 2.0, 0.5]);
    let z = a.mult_vector(&y, None, 1.0, 0.0, false).unwrap();
    let as_column = Matrix2D::from_vec([4, 1], y.to_vec()).unwrap();
    let c = a.mult_matrix(&as_column, None, 1.0, 0.0, false, false).unwrap();
    let column = c.view_column(0).unwrap();
    assert_eq!(z, column.copy());
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_bandwidth_boundaries() {
    let p = Property::DEFAULT;
    let mut sparse_diag: Matrix2D<f64> = Matrix::sparse([4, 4]);
    sparse_diag.set([0, 0], 1.0).unwrap();
    sparse_diag.set([3, 3], 1.0).unwrap();
    assert_eq!(p.lower_bandwidth(&sparse_diag).unwrap(), 0);
    assert_eq!(p.upper_bandwidth(&sparse_diag).unwrap(), 0);
    assert_eq!(p.semi_bandwidth(&sparse_diag).unwrap(), 1);

    let mut tri: Matrix2D<f64> = Matrix::new([6, 6]);
    tri.assign(1.0);
    for r in 0..6usize {
        for c in 0..6 {
            if r.abs_diff(c) > 1 {
                tri.set([r, c], 0.0).unwrap();
            }
        }
    }
    assert_eq!(p.semi_bandwidth(&tri).unwrap(), 2);
}

#[test]
fn test_nan_matrix_equals_nan() {
    let m = Matrix2D::from_rows(&[vec![f64::NAN]]).unwrap();
    assert!(Property::DEFAULT.equals_value(&m, f64::NAN));
}

#[test]
fn test_selection_view_ordering() {
    let m = ascending(4, 4);
    let idx = [3, 0, 3];
    let s = m.view_selection([Some(&idx[..]), Some(&idx[..])]).unwrap();
    assert_eq!(s.shape(), [3, 3]);
    assert_eq!(
        s.to_array(),
        vec![
            vec![15.0, 12.0, 15.0],
            vec![3.0, 0.0, 3.0],
            vec![15.0, 12.0, 15.0],
        ]
    );
}

// ============================================================================
// Object and complex elements
// ============================================================================

#[test]
fn test_complex_elements() {
    let mut m: Matrix2D<Complex64> = Matrix::sparse([2, 2]);
    m.set([0, 1], Complex64::new(1.0, -1.0)).unwrap();
    let t = m.view_transpose();
    assert_eq!(t.get([1, 0]).unwrap(), Complex64::new(1.0, -1.0));
    assert_eq!(m.cardinality(), 1);
    let norm = m.try_aggregate(|a: f64, b| a + b, |z: Complex64| z.norm_sqr());
    assert_eq!(norm, Some(2.0));
}

#[test]
fn test_object_matrix_non_zeros() {
    let mut m: Matrix2D<Option<&str>> = Matrix::new([2, 3]);
    m.set([1, 2], Some("x")).unwrap();
    m.set([0, 0], Some("y")).unwrap();
    let mut coords = ArrayList::new();
    let mut values = ArrayList::new();
    m.view_transpose().get_non_zeros(&mut coords, &mut values);
    assert_eq!(coords.elements(), &[[0, 0], [2, 1]]);
    assert_eq!(values.elements(), &[Some("y"), Some("x")]);
}
