//! Triplet accumulator for bulk CSR construction

use rayon::prelude::*;

use super::SparseBoolMatrix;
use crate::error::{Error, Result};

/// Collects `(row, col)` entries in any order, then sorts them into CSR.
///
/// `set` is O(1) amortized; duplicates are removed in `build`.
#[derive(Debug, Clone)]
pub struct MatrixBuilder {
    n: usize,
    entries: Vec<(u32, u32)>,
}

impl MatrixBuilder {
    pub fn new(n: usize) -> Self {
        Self::with_capacity(n, 0)
    }

    pub fn with_capacity(n: usize, nnz: usize) -> Self {
        debug_assert!(n <= super::MAX_DIM);
        Self {
            n,
            entries: Vec::with_capacity(nnz),
        }
    }

    /// Dimension of the matrix being built
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Mark `(i, j)` true
    pub fn set(&mut self, i: usize, j: usize) -> Result<()> {
        Error::check_index(i, self.n)?;
        Error::check_index(j, self.n)?;
        self.entries.push((i as u32, j as u32));
        Ok(())
    }

    /// Sort, deduplicate and pack into CSR
    pub fn build(mut self) -> SparseBoolMatrix {
        self.entries.par_sort_unstable();
        self.entries.dedup();

        let mut offsets = vec![0usize; self.n + 1];
        for &(row, _) in &self.entries {
            offsets[row as usize + 1] += 1;
        }
        for i in 0..self.n {
            offsets[i + 1] += offsets[i];
        }

        let cols: Vec<u32> = self.entries.into_iter().map(|(_, col)| col).collect();
        SparseBoolMatrix::from_raw_parts(self.n, offsets, cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sorts_and_dedups() {
        let mut b = MatrixBuilder::new(4);
        for &(i, j) in &[(3, 1), (0, 2), (3, 0), (0, 2), (1, 1), (3, 1)] {
            b.set(i, j).unwrap();
        }
        let m = b.build();
        assert_eq!(m.nnz(), 4);
        assert_eq!(m.row(0), &[2]);
        assert_eq!(m.row(1), &[1]);
        assert!(m.row(2).is_empty());
        assert_eq!(m.row(3), &[0, 1]);
    }

    #[test]
    fn test_matches_incremental_set() {
        let pairs = [(2usize, 0usize), (0, 1), (2, 2), (1, 0), (0, 1)];
        let mut b = MatrixBuilder::new(3);
        let mut m = SparseBoolMatrix::new(3);
        for &(i, j) in &pairs {
            b.set(i, j).unwrap();
            m.set(i, j).unwrap();
        }
        assert_eq!(b.build(), m);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut b = MatrixBuilder::new(2);
        assert!(b.set(2, 0).is_err());
        assert!(b.set(0, 2).is_err());
        assert!(b.build().is_empty());
    }
}
