//! Textual representation of matrices.
//!
//! `Display` prints a shape header followed by the cells, one matrix row per
//! line with right-aligned columns:
//!
//! ```text
//! 2 x 3 matrix
//! 0 1  2
//! 3 4 10
//! ```
//!
//! Higher ranks print each trailing `rows x columns` block separated by a
//! blank line.

use std::fmt;

use matrix_traits::Element;

use crate::matrix::Matrix;

impl<T: Element + fmt::Display, const N: usize> fmt::Display for Matrix<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = self.shape();
        let dims: Vec<String> = shape.iter().map(ToString::to_string).collect();
        write!(f, "{} matrix", dims.join(" x "))?;
        if N == 0 || self.is_empty() {
            return Ok(());
        }

        let cells: Vec<String> = self.to_vec().iter().map(ToString::to_string).collect();
        let columns = shape[N - 1];
        let rows = if N >= 2 { shape[N - 2] } else { 1 };

        let mut widths = vec![0; columns];
        for (i, cell) in cells.iter().enumerate() {
            let w = &mut widths[i % columns];
            *w = (*w).max(cell.chars().count());
        }

        for (line, row) in cells.chunks(columns).enumerate() {
            if line > 0 && line % rows == 0 {
                writeln!(f)?;
            }
            writeln!(f)?;
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:>width$}", cell, width = widths[c])?;
            }
        }
        Ok(())
    }
}

impl<T: Element, const N: usize> fmt::Debug for Matrix<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("shape", &self.shape())
            .field("is_view", &self.is_view())
            .field("sparse", &self.is_sparse())
            .field("cells", &self.to_vec())
            .finish()
    }
}
