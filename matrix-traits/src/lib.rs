//! Shared traits for the strided-matrix workspace.
//!
//! This crate holds the trait bounds used across `strided-matrix`:
//!
//! - [`Element`]: anything that can live in a matrix cell (numbers, complex
//!   numbers, optional objects). The `Default` value plays the role of zero.
//! - [`Scalar`]: floating-point elements that support the numeric algebra
//!   (not-a-number sentinel, absolute values, tolerance equality).

pub mod element;
pub mod scalar;

pub use element::Element;
pub use scalar::Scalar;
