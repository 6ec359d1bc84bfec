//! Comparator-driven sorting and searching over slices.
//!
//! - [`quick_sort_by`]: Bentley–McIlroy three-way partitioning with
//!   median-of-3 (median-of-9 for large partitions) pivots. Not stable.
//! - [`merge_sort_by`]: top-down merge sort that skips the merge when the
//!   halves are already in order. Stable.
//! - [`binary_search_by`]: returns `Err(insertion_point)` on a miss.
//!
//! Both sorts fall back to insertion sort below [`SMALL`] elements.

use std::cmp::Ordering;

use matrix_traits::Scalar;

/// Partitions shorter than this are insertion sorted.
pub const SMALL: usize = 7;

/// Partitions longer than this use a median-of-9 pivot.
pub const MEDIUM: usize = 40;

/// Natural order for floats with NaN placed after every number.
///
/// NaNs compare equal to each other, so a stable sort keeps their order.
pub fn compare_nan_last<T: Scalar>(a: &T, b: &T) -> Ordering {
    match a.partial_cmp(b) {
        Some(ordering) => ordering,
        None => match (a.is_nan(), b.is_nan()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => Ordering::Equal,
        },
    }
}

fn insertion_sort<T, F>(x: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..x.len() {
        let mut j = i;
        while j > 0 && cmp(&x[j - 1], &x[j]) == Ordering::Greater {
            x.swap(j - 1, j);
            j -= 1;
        }
    }
}

// ============================================================================
// Quicksort
// ============================================================================

/// Sort `x` with a tuned three-way quicksort.
pub fn quick_sort_by<T, F>(x: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    quick_sort_impl(x, &mut cmp);
}

/// Sort `x` in natural order with a tuned three-way quicksort.
pub fn quick_sort<T: Ord>(x: &mut [T]) {
    quick_sort_by(x, T::cmp);
}

/// Index of the median of `x[a]`, `x[b]` and `x[c]`.
fn med3<T, F>(x: &[T], a: usize, b: usize, c: usize, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    use Ordering::{Greater, Less};
    if cmp(&x[a], &x[b]) == Less {
        if cmp(&x[b], &x[c]) == Less {
            b
        } else if cmp(&x[a], &x[c]) == Less {
            c
        } else {
            a
        }
    } else if cmp(&x[b], &x[c]) == Greater {
        b
    } else if cmp(&x[a], &x[c]) == Greater {
        c
    } else {
        a
    }
}

/// Swap `x[a..a + n]` with `x[b..b + n]`.
fn vecswap<T>(x: &mut [T], a: usize, b: usize, n: usize) {
    for i in 0..n {
        x.swap(a + i, b + i);
    }
}

fn quick_sort_impl<T, F>(x: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = x.len();
    if len < SMALL {
        insertion_sort(x, cmp);
        return;
    }

    let mut m = len / 2;
    if len > SMALL {
        let mut l = 0;
        let mut n = len - 1;
        if len > MEDIUM {
            let s = len / 8;
            l = med3(x, l, l + s, l + 2 * s, cmp);
            m = med3(x, m - s, m, m + s, cmp);
            n = med3(x, n - 2 * s, n - s, n, cmp);
        }
        m = med3(x, l, m, n, cmp);
    }

    // Pivot parked at x[0]; it never moves while partitioning. Layout:
    // [0, a) == pivot, [a, b) < pivot, (c, d] > pivot, (d, len) == pivot.
    x.swap(0, m);
    let (mut a, mut b) = (1, 1);
    let (mut c, mut d) = (len - 1, len - 1);
    loop {
        while b <= c {
            let ord = cmp(&x[b], &x[0]);
            if ord == Ordering::Greater {
                break;
            }
            if ord == Ordering::Equal {
                x.swap(a, b);
                a += 1;
            }
            b += 1;
        }
        while c >= b {
            let ord = cmp(&x[c], &x[0]);
            if ord == Ordering::Less {
                break;
            }
            if ord == Ordering::Equal {
                x.swap(c, d);
                d -= 1;
            }
            c -= 1;
        }
        if b > c {
            break;
        }
        x.swap(b, c);
        b += 1;
        c -= 1;
    }

    let s = a.min(b - a);
    vecswap(x, 0, b - s, s);
    let s = (d - c).min(len - d - 1);
    vecswap(x, b, len - s, s);

    let less = b - a;
    if less > 1 {
        quick_sort_impl(&mut x[..less], cmp);
    }
    let greater = d - c;
    if greater > 1 {
        quick_sort_impl(&mut x[len - greater..], cmp);
    }
}

// ============================================================================
// Merge sort
// ============================================================================

/// Stable sort of `x`.
pub fn merge_sort_by<T, F>(x: &mut [T], mut cmp: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut aux = x.to_vec();
    merge_sort_impl(&mut aux, x, &mut cmp);
}

/// Stable sort of `x` in natural order.
pub fn merge_sort<T: Ord + Clone>(x: &mut [T]) {
    merge_sort_by(x, T::cmp);
}

/// Sort into `dest`; `src` holds the same elements on entry and is scratch.
fn merge_sort_impl<T, F>(src: &mut [T], dest: &mut [T], cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = dest.len();
    if len < SMALL {
        insertion_sort(dest, cmp);
        return;
    }

    let mid = len / 2;
    merge_sort_impl(&mut dest[..mid], &mut src[..mid], cmp);
    merge_sort_impl(&mut dest[mid..], &mut src[mid..], cmp);

    if cmp(&src[mid - 1], &src[mid]) != Ordering::Greater {
        dest.clone_from_slice(src);
        return;
    }

    let (mut p, mut q) = (0, mid);
    for slot in dest.iter_mut() {
        if q >= len || (p < mid && cmp(&src[p], &src[q]) != Ordering::Greater) {
            *slot = src[p].clone();
            p += 1;
        } else {
            *slot = src[q].clone();
            q += 1;
        }
    }
}

// ============================================================================
// Binary search
// ============================================================================

/// Search sorted `x` for `key`.
///
/// Returns `Ok(index)` of a matching element, or `Err(insertion_point)`: the
/// index at which `key` would be inserted to keep `x` sorted.
pub fn binary_search_by<T, F>(x: &[T], key: &T, mut cmp: F) -> Result<usize, usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut low, mut high) = (0, x.len());
    while low < high {
        let mid = low + (high - low) / 2;
        match cmp(&x[mid], key) {
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
            Ordering::Equal => return Ok(mid),
        }
    }
    Err(low)
}

/// Search sorted `x` for `key` in natural order.
pub fn binary_search<T: Ord>(x: &[T], key: &T) -> Result<usize, usize> {
    binary_search_by(x, key, T::cmp)
}
