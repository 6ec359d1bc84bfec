//! Dense and sparse N-dimensional matrices with zero-copy strided views.
//!
//! This crate provides value-semantics containers for 1-D, 2-D and 3-D arrays
//! of numeric or object elements, views that share storage with their parent
//! (transposition, flips, sub-ranges, striding, index selection), and a
//! functional elementwise/aggregate algebra parameterized by caller-supplied
//! closures.
//!
//! # Core Types
//!
//! - [`Matrix`] (aliases [`Matrix1D`], [`Matrix2D`], [`Matrix3D`]): an
//!   [`IndexModel`] over shared [`Storage`]
//! - [`IndexModel`]: per-axis size plus either affine strides or explicit
//!   selection offset tables
//! - [`Storage`]: dense (`Vec`) or sparse (hash map) cell store
//! - [`Property`]: tolerance-parameterized structural predicates
//! - [`ArrayList`]: resizable list used for non-zero enumeration
//!
//! # Views
//!
//! Every derivation is a pure index transform; no element is copied:
//!
//! - [`Matrix::view_dice`], [`Matrix::view_flip`], [`Matrix::view_part`],
//!   [`Matrix::view_strides`], [`Matrix::view_selection`]
//! - rank-specific helpers such as `view_transpose`, `view_row`, `view_column`,
//!   `view_slice` and `view_sorted`
//!
//! # Example
//!
//! ```rust
//! use strided_matrix::Matrix2D;
//!
//! let a = Matrix2D::from_rows(&[vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0]]).unwrap();
//! let t = a.view_transpose();
//! assert_eq!(t.shape(), [3, 2]);
//! assert_eq!(t.get([2, 1]).unwrap(), 5.0);
//!
//! // Views share storage with their parent.
//! let mut row = a.view_row(0).unwrap();
//! row.assign(7.0);
//! assert_eq!(t.get([1, 0]).unwrap(), 7.0);
//! ```
//!
//! # Aliasing
//!
//! [`Matrix::assign_from`] consults the alias oracle ([`have_shared_cells`]):
//! when source and destination may share cells, the source is first copied,
//! so `a.assign_from(&a.view_transpose())` transposes a square matrix in place.

mod alias;
mod factory;
mod format;
mod index;
mod linalg;
mod list;
mod map;
mod matrix;
mod property;
mod reduce;
pub mod sort;
mod storage;
mod view;

// ============================================================================
// Element bounds
// ============================================================================
pub use matrix_traits::{Element, Scalar};

// ============================================================================
// Matrix types
// ============================================================================
pub use matrix::{Matrix, Matrix1D, Matrix2D, Matrix3D};

// ============================================================================
// Index model and storage
// ============================================================================
pub use index::{AxisMap, IndexModel, Positions};
pub use storage::{CellStore, Content, DenseStorage, SparseConfig, SparseStorage, Storage};

// ============================================================================
// Collaborators
// ============================================================================
pub use alias::have_shared_cells;
pub use factory::MatrixFactory;
pub use list::ArrayList;
pub use property::Property;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during matrix operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixError {
    /// Coordinate outside `[0, size)` on a bounds-checked accessor.
    #[error("index {index:?} out of bounds for shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    /// Sub-range not contained in the matrix.
    #[error("range offset={offset:?} extent={extent:?} out of bounds for shape {shape:?}")]
    RangeOutOfBounds {
        offset: Vec<usize>,
        extent: Vec<usize>,
        shape: Vec<usize>,
    },

    /// Index list entry outside the selected axis.
    #[error("selected index {index} out of bounds for axis {axis} of size {size}")]
    SelectionOutOfBounds {
        axis: usize,
        index: usize,
        size: usize,
    },

    /// Operand shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Matrix is not square when a square matrix was required.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Matrix has fewer rows than columns where `rows >= columns` is required.
    #[error("matrix must be rectangular: rows={rows} < cols={cols}")]
    NonRectangular { rows: usize, cols: usize },

    /// Nested input rows do not all have the same length.
    #[error("ragged input: entry {entry} has length {len}, expected {expected}")]
    RaggedInput {
        entry: usize,
        len: usize,
        expected: usize,
    },

    /// Axis permutation is not a bijection over the axes.
    #[error("invalid axis permutation {0:?}")]
    InvalidPermutation(Vec<usize>),

    /// Invalid axis index for the given matrix rank.
    #[error("invalid axis {axis} for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// Stride factors must be positive.
    #[error("invalid stride factor 0 for axis {axis}")]
    ZeroStride { axis: usize },

    /// Requested storage capacity must be positive.
    #[error("invalid capacity {0}")]
    InvalidCapacity(usize),

    /// Sparse load factors must satisfy `0 <= min < max < 1`.
    #[error("invalid load factors: min={min}, max={max}")]
    InvalidLoadFactors { min: f64, max: f64 },

    /// The result matrix shares storage with an operand.
    #[error("result matrix shares storage with an operand")]
    AliasedOperand,
}

/// Coarse classification of [`MatrixError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A coordinate or range argument is outside the matrix.
    Bounds,
    /// Operand dimensions disagree.
    ShapeMismatch,
    /// Structurally invalid arguments (permutations, strides, capacities).
    Configuration,
}

impl MatrixError {
    /// Returns the error category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::IndexOutOfBounds { .. }
            | MatrixError::RangeOutOfBounds { .. }
            | MatrixError::SelectionOutOfBounds { .. } => ErrorKind::Bounds,
            MatrixError::ShapeMismatch(..)
            | MatrixError::NonSquare { .. }
            | MatrixError::NonRectangular { .. }
            | MatrixError::RaggedInput { .. } => ErrorKind::ShapeMismatch,
            MatrixError::InvalidPermutation(_)
            | MatrixError::InvalidAxis { .. }
            | MatrixError::ZeroStride { .. }
            | MatrixError::InvalidCapacity(_)
            | MatrixError::InvalidLoadFactors { .. }
            | MatrixError::AliasedOperand => ErrorKind::Configuration,
        }
    }
}

/// Result type for matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
