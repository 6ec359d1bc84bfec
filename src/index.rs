//! Index model: maps logical coordinates to physical storage positions.
//!
//! An [`IndexModel`] is pure arithmetic. It never touches storage and never
//! checks that a position exists there; the matrix owning it is responsible
//! for bounds.
//!
//! Two shapes cover every view derivation:
//!
//! - **Affine**: one signed stride per axis, `pos = offset + Σ i_d * stride_d`
//! - **Selection**: an explicit offset table per axis,
//!   `pos = offset + Σ table_d[i_d]`, produced by index selection where the
//!   mapping is no longer affine

use std::rc::Rc;

use crate::{MatrixError, Result};

/// Per-axis mapping from logical index to physical displacement.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisMap<const N: usize> {
    /// Signed stride per axis (may be negative after a flip).
    Affine([isize; N]),
    /// Explicit displacement table per axis.
    Selection([Rc<[isize]>; N]),
}

/// Size, base offset and axis mapping of a matrix or view.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexModel<const N: usize> {
    size: [usize; N],
    offset: isize,
    map: AxisMap<N>,
}

/// Compute row-major strides (last index varies fastest).
pub(crate) fn row_major_strides<const N: usize>(size: &[usize; N]) -> [isize; N] {
    let mut strides = [1isize; N];
    for i in (0..N.saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * size[i + 1] as isize;
    }
    strides
}

fn is_permutation<const N: usize>(perm: &[usize; N]) -> bool {
    let mut seen = [false; N];
    for &p in perm {
        if p >= N || seen[p] {
            return false;
        }
        seen[p] = true;
    }
    true
}

impl<const N: usize> IndexModel<N> {
    /// Canonical row-major model over a freshly allocated buffer.
    pub fn row_major(size: [usize; N]) -> Self {
        Self {
            size,
            offset: 0,
            map: AxisMap::Affine(row_major_strides(&size)),
        }
    }

    /// Affine model with explicit offset and strides.
    pub fn affine(size: [usize; N], offset: isize, strides: [isize; N]) -> Self {
        Self {
            size,
            offset,
            map: AxisMap::Affine(strides),
        }
    }

    #[inline]
    pub fn size(&self) -> &[usize; N] {
        &self.size
    }

    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    #[inline]
    pub fn map(&self) -> &AxisMap<N> {
        &self.map
    }

    /// Returns the strides of an affine model, `None` for a selection.
    #[inline]
    pub fn strides(&self) -> Option<&[isize; N]> {
        match &self.map {
            AxisMap::Affine(strides) => Some(strides),
            AxisMap::Selection(_) => None,
        }
    }

    #[inline]
    pub fn is_selection(&self) -> bool {
        matches!(self.map, AxisMap::Selection(_))
    }

    /// Total number of logical cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.size.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.contains(&0)
    }

    /// Physical displacement of logical index `i` along `axis`.
    #[inline]
    pub fn axis_offset(&self, axis: usize, i: usize) -> isize {
        match &self.map {
            AxisMap::Affine(strides) => i as isize * strides[axis],
            AxisMap::Selection(tables) => tables[axis][i],
        }
    }

    /// Physical position of `coords`. No bounds checking.
    #[inline]
    pub fn position(&self, coords: &[usize; N]) -> isize {
        let mut pos = self.offset;
        match &self.map {
            AxisMap::Affine(strides) => {
                for d in 0..N {
                    pos += coords[d] as isize * strides[d];
                }
            }
            AxisMap::Selection(tables) => {
                for d in 0..N {
                    pos += tables[d][coords[d]];
                }
            }
        }
        pos
    }

    /// Returns true if every coordinate is inside `[0, size_d)`.
    #[inline]
    pub fn contains(&self, coords: &[usize; N]) -> bool {
        coords.iter().zip(self.size.iter()).all(|(&c, &s)| c < s)
    }

    pub(crate) fn check_index(&self, coords: &[usize; N]) -> Result<()> {
        if self.contains(coords) {
            Ok(())
        } else {
            Err(MatrixError::IndexOutOfBounds {
                index: coords.to_vec(),
                shape: self.size.to_vec(),
            })
        }
    }

    fn check_axis(axis: usize) -> Result<()> {
        if axis >= N {
            return Err(MatrixError::InvalidAxis { axis, rank: N });
        }
        Ok(())
    }

    /// Displacement table for every index along `axis`.
    pub fn axis_table(&self, axis: usize) -> Vec<isize> {
        (0..self.size[axis])
            .map(|i| self.axis_offset(axis, i))
            .collect()
    }

    /// Iterator over `(coords, position)` pairs in row-major order.
    pub fn positions(&self) -> Positions<N> {
        Positions {
            tables: std::array::from_fn(|d| self.axis_table(d)),
            offset: self.offset,
            indices: [0; N],
            remaining: self.len(),
        }
    }

    // ========================================================================
    // View derivation
    // ========================================================================

    /// Reorder axes: axis `d` of the result is axis `perm[d]` of `self`.
    pub fn dice(&self, perm: [usize; N]) -> Result<Self> {
        if !is_permutation(&perm) {
            return Err(MatrixError::InvalidPermutation(perm.to_vec()));
        }
        Ok(self.permuted(perm))
    }

    /// [`dice`](Self::dice) for a permutation known to be valid.
    pub(crate) fn permuted(&self, perm: [usize; N]) -> Self {
        let size = std::array::from_fn(|d| self.size[perm[d]]);
        let map = match &self.map {
            AxisMap::Affine(strides) => AxisMap::Affine(std::array::from_fn(|d| strides[perm[d]])),
            AxisMap::Selection(tables) => {
                AxisMap::Selection(std::array::from_fn(|d| tables[perm[d]].clone()))
            }
        };
        Self {
            size,
            offset: self.offset,
            map,
        }
    }

    /// Reverse the order of indices along `axis`.
    pub fn flip(&self, axis: usize) -> Result<Self> {
        Self::check_axis(axis)?;
        Ok(self.flipped(axis))
    }

    /// [`flip`](Self::flip) for an axis known to be valid.
    pub(crate) fn flipped(&self, axis: usize) -> Self {
        let mut flipped = self.clone();
        match &mut flipped.map {
            AxisMap::Affine(strides) => {
                if self.size[axis] > 0 {
                    flipped.offset += (self.size[axis] - 1) as isize * strides[axis];
                    strides[axis] = -strides[axis];
                }
            }
            AxisMap::Selection(tables) => {
                let reversed: Vec<isize> = tables[axis].iter().rev().copied().collect();
                tables[axis] = Rc::from(reversed);
            }
        }
        flipped
    }

    /// Sub-range `[offset_d, offset_d + extent_d)` on every axis.
    pub fn part(&self, offset: [usize; N], extent: [usize; N]) -> Result<Self> {
        for d in 0..N {
            let fits = offset[d]
                .checked_add(extent[d])
                .is_some_and(|end| end <= self.size[d]);
            if !fits {
                return Err(MatrixError::RangeOutOfBounds {
                    offset: offset.to_vec(),
                    extent: extent.to_vec(),
                    shape: self.size.to_vec(),
                });
            }
        }
        let map = match &self.map {
            AxisMap::Affine(strides) => AxisMap::Affine(*strides),
            AxisMap::Selection(tables) => AxisMap::Selection(std::array::from_fn(|d| {
                Rc::from(&tables[d][offset[d]..offset[d] + extent[d]])
            })),
        };
        let base = match &self.map {
            AxisMap::Affine(strides) => (0..N).map(|d| offset[d] as isize * strides[d]).sum(),
            AxisMap::Selection(_) => 0,
        };
        Ok(Self {
            size: extent,
            offset: self.offset + base,
            map,
        })
    }

    /// Keep every `factors[d]`-th index along each axis.
    pub fn strides_by(&self, factors: [usize; N]) -> Result<Self> {
        if let Some(axis) = factors.iter().position(|&f| f == 0) {
            return Err(MatrixError::ZeroStride { axis });
        }
        let size = std::array::from_fn(|d| self.size[d].div_ceil(factors[d]));
        let map = match &self.map {
            AxisMap::Affine(strides) => {
                AxisMap::Affine(std::array::from_fn(|d| strides[d] * factors[d] as isize))
            }
            AxisMap::Selection(tables) => AxisMap::Selection(std::array::from_fn(|d| {
                tables[d].iter().step_by(factors[d]).copied().collect()
            })),
        };
        Ok(Self {
            size,
            offset: self.offset,
            map,
        })
    }

    /// Explicit index selection. `None` keeps every index of that axis.
    ///
    /// Indices may repeat and appear in any order; the result is always a
    /// selection model.
    pub fn select(&self, indices: [Option<&[usize]>; N]) -> Result<Self> {
        for (axis, list) in indices.iter().enumerate() {
            if let Some(list) = list {
                if let Some(&index) = list.iter().find(|&&i| i >= self.size[axis]) {
                    return Err(MatrixError::SelectionOutOfBounds {
                        axis,
                        index,
                        size: self.size[axis],
                    });
                }
            }
        }
        Ok(self.selected(indices))
    }

    /// [`select`](Self::select) for indices known to be in range.
    pub(crate) fn selected(&self, indices: [Option<&[usize]>; N]) -> Self {
        let tables: [Rc<[isize]>; N] = std::array::from_fn(|d| match indices[d] {
            Some(list) => list.iter().map(|&i| self.axis_offset(d, i)).collect(),
            None => Rc::from(self.axis_table(d)),
        });
        let size = std::array::from_fn(|d| tables[d].len());
        Self {
            size,
            offset: self.offset,
            map: AxisMap::Selection(tables),
        }
    }

    /// Fix `axis` at `index`, producing a model of rank `M = N - 1`.
    pub(crate) fn fix_axis<const M: usize>(&self, axis: usize, index: usize) -> Result<IndexModel<M>> {
        Self::check_axis(axis)?;
        if index >= self.size[axis] {
            return Err(MatrixError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.size[axis]],
            });
        }
        Ok(self.drop_axis(axis, index))
    }

    /// [`fix_axis`](Self::fix_axis) for an axis and index known to be valid.
    pub(crate) fn drop_axis<const M: usize>(&self, axis: usize, index: usize) -> IndexModel<M> {
        debug_assert_eq!(M + 1, N, "drop_axis must drop exactly one axis");
        let keep = |d: usize| if d < axis { d } else { d + 1 };
        let size = std::array::from_fn(|d| self.size[keep(d)]);
        let map = match &self.map {
            AxisMap::Affine(strides) => AxisMap::Affine(std::array::from_fn(|d| strides[keep(d)])),
            AxisMap::Selection(tables) => {
                AxisMap::Selection(std::array::from_fn(|d| tables[keep(d)].clone()))
            }
        };
        IndexModel {
            size,
            offset: self.offset + self.axis_offset(axis, index),
            map,
        }
    }
}

/// Iterator over `(coords, position)` pairs of an [`IndexModel`].
///
/// Row-major order: the last index changes fastest.
pub struct Positions<const N: usize> {
    tables: [Vec<isize>; N],
    offset: isize,
    indices: [usize; N],
    remaining: usize,
}

impl<const N: usize> Iterator for Positions<N> {
    type Item = ([usize; N], usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let coords = self.indices;
        let mut pos = self.offset;
        for d in 0..N {
            pos += self.tables[d][coords[d]];
        }

        // Advance indices; the carry out of axis 0 only happens after the last cell.
        for d in (0..N).rev() {
            self.indices[d] += 1;
            if self.indices[d] < self.tables[d].len() {
                break;
            }
            self.indices[d] = 0;
        }

        Some((coords, pos as usize))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const N: usize> ExactSizeIterator for Positions<N> {}
