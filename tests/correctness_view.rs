use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strided_matrix::{Matrix, Matrix2D, Matrix3D};

fn make_tensor(shape: [usize; 3], seed: u64) -> Matrix3D<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let len = shape.iter().product();
    let data: Vec<f64> = (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Matrix::from_vec(shape, data).unwrap()
}

fn make_matrix(rows: usize, cols: usize, seed: u64) -> Matrix2D<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Matrix::from_vec([rows, cols], data).unwrap()
}

#[test]
fn test_dice_matches_permuted_coordinates() {
    let m = make_tensor([2, 3, 4], 1);
    let d = m.view_dice([2, 0, 1]).unwrap();
    assert_eq!(d.shape(), [4, 2, 3]);
    for a in 0..4 {
        for b in 0..2 {
            for c in 0..3 {
                assert_eq!(d.get([a, b, c]).unwrap(), m.get([b, c, a]).unwrap());
            }
        }
    }
}

#[test]
fn test_rank_reducing_views_3d() {
    let m = make_tensor([3, 4, 5], 2);
    let slice = m.view_slice(1).unwrap();
    let row = m.view_row(2).unwrap();
    let column = m.view_column(4).unwrap();
    assert_eq!(slice.shape(), [4, 5]);
    assert_eq!(row.shape(), [3, 5]);
    assert_eq!(column.shape(), [3, 4]);
    for s in 0..3 {
        for r in 0..4 {
            assert_eq!(column.get([s, r]).unwrap(), m.get([s, r, 4]).unwrap());
        }
        for c in 0..5 {
            assert_eq!(row.get([s, c]).unwrap(), m.get([s, 2, c]).unwrap());
        }
    }
    for r in 0..4 {
        for c in 0..5 {
            assert_eq!(slice.get([r, c]).unwrap(), m.get([1, r, c]).unwrap());
        }
    }
}

#[test]
fn test_chained_views_3d() {
    let m = make_tensor([4, 6, 5], 3);
    // flip rows, take every other column, then a sub-box
    let v = m
        .view_row_flip()
        .view_strides([1, 1, 2])
        .unwrap()
        .view_part([1, 2, 0], [2, 3, 3])
        .unwrap();
    assert_eq!(v.shape(), [2, 3, 3]);
    for s in 0..2 {
        for r in 0..3 {
            for c in 0..3 {
                let expected = m.get([s + 1, 5 - (r + 2), 2 * c]).unwrap();
                assert_eq!(v.get([s, r, c]).unwrap(), expected);
            }
        }
    }
}

#[test]
fn test_write_through_chained_view() {
    let m = make_tensor([3, 3, 3], 4);
    let original = m.copy();
    let mut v = m.view_column_flip().view_dice([1, 0, 2]).unwrap();
    v.assign_map(|x| 2.0 * x);
    for s in 0..3 {
        for r in 0..3 {
            for c in 0..3 {
                assert_relative_eq!(
                    m.get([s, r, c]).unwrap(),
                    2.0 * original.get([s, r, c]).unwrap()
                );
            }
        }
    }
}

#[test]
fn test_selection_of_strided_view_2d() {
    let m = make_matrix(6, 7, 5);
    let strided = m.view_strides([2, 3]).unwrap();
    assert_eq!(strided.shape(), [3, 3]);
    let rows = [2, 2, 0];
    let cols = [1];
    let sel = strided
        .view_selection([Some(&rows[..]), Some(&cols[..])])
        .unwrap();
    assert_eq!(sel.shape(), [3, 1]);
    assert_eq!(sel.get([0, 0]).unwrap(), m.get([4, 3]).unwrap());
    assert_eq!(sel.get([1, 0]).unwrap(), m.get([4, 3]).unwrap());
    assert_eq!(sel.get([2, 0]).unwrap(), m.get([0, 3]).unwrap());

    // transposing a selection keeps the tables
    let t = sel.view_transpose();
    assert_eq!(t.shape(), [1, 3]);
    assert_eq!(t.get([0, 2]).unwrap(), m.get([0, 3]).unwrap());
}

#[test]
fn test_sorted_rows_view() {
    let m = make_matrix(8, 3, 6);
    let sorted = m.view_sorted(1).unwrap();
    let keys: Vec<f64> = (0..8).map(|r| sorted.get([r, 1]).unwrap()).collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    // rows travel together
    let mut before: Vec<Vec<f64>> = m.to_array();
    let mut after: Vec<Vec<f64>> = sorted.to_array();
    before.sort_by(|a, b| a[1].total_cmp(&b[1]));
    after.sort_by(|a, b| a[1].total_cmp(&b[1]));
    assert_eq!(before, after);
}

#[test]
fn test_sorted_slices_view() {
    let m = make_tensor([5, 2, 2], 7);
    let sorted = m.view_sorted(1, 0).unwrap();
    let keys: Vec<f64> = (0..5).map(|s| sorted.get([s, 1, 0]).unwrap()).collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    assert!(m.view_sorted(2, 0).is_err());
}

#[test]
fn test_selection_predicates() {
    let m = make_matrix(10, 2, 8);
    let positive = m.view_selection_rows(|row| row.get_quick([0]) > 0.0);
    for r in 0..positive.rows() {
        assert!(positive.get([r, 0]).unwrap() > 0.0);
    }
    let expected = (0..10).filter(|&r| m.get_quick([r, 0]) > 0.0).count();
    assert_eq!(positive.rows(), expected);

    let t = make_tensor([4, 2, 2], 9);
    let kept = t.view_selection_slices(|slice| slice.z_sum() < 0.0);
    for s in 0..kept.slices() {
        assert!(kept.view_slice(s).unwrap().z_sum() < 0.0);
    }
}

#[test]
fn test_sparse_views_match_dense() {
    let dense = make_matrix(5, 5, 10);
    let mut sparse: Matrix2D<f64> = Matrix::sparse([5, 5]);
    sparse.assign_from(&dense).unwrap();
    let idx = [4, 1];
    let a = dense
        .view_transpose()
        .view_selection([Some(&idx[..]), None])
        .unwrap();
    let b = sparse
        .view_transpose()
        .view_selection([Some(&idx[..]), None])
        .unwrap();
    assert_eq!(a, b);
    assert!(b.is_sparse());
}
