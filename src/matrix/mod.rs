//! Compressed Sparse Row Boolean Matrix
//!
//! `SparseBoolMatrix` is the single data structure behind both the adjacency
//! relation and the distance index. Only `true` entries are stored:
//!
//! ```text
//! offsets: [0, 2, 3, 3]        (n + 1 entries)
//! cols:    [1, 4, 0]           (nnz entries, sorted + unique per row)
//! ```
//!
//! Row `i` occupies `cols[offsets[i]..offsets[i + 1]]`. Column ids are `u32`,
//! so the dimension is bounded by `u32::MAX`.
//!
//! The semiring operations (`multiply`, `union_in_place`) live in [`ops`];
//! bulk construction from unsorted triplets goes through [`MatrixBuilder`].

pub mod builder;
pub mod ops;

pub use builder::MatrixBuilder;

use crate::error::{Error, Result};

/// Largest dimension representable with `u32` column ids
pub const MAX_DIM: usize = u32::MAX as usize;

/// Square boolean matrix in CSR layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseBoolMatrix {
    n: usize,
    offsets: Vec<usize>,
    cols: Vec<u32>,
}

/// Ordered column indices of one row; cheap to clone, so iteration can restart
pub type RowNonzeros<'a> = std::iter::Copied<std::slice::Iter<'a, u32>>;

impl SparseBoolMatrix {
    /// Empty `n × n` matrix
    pub fn new(n: usize) -> Self {
        debug_assert!(n <= MAX_DIM);
        Self {
            n,
            offsets: vec![0; n + 1],
            cols: Vec::new(),
        }
    }

    /// `n × n` identity (the zero-length path relation)
    pub fn identity(n: usize) -> Self {
        debug_assert!(n <= MAX_DIM);
        Self {
            n,
            offsets: (0..=n).collect(),
            cols: (0..n as u32).collect(),
        }
    }

    /// Build from per-row column lists.
    ///
    /// Rows may be unsorted and contain duplicates; they are normalized here.
    /// Fails if `rows.len() != n` or any column is out of range.
    pub fn from_rows(n: usize, mut rows: Vec<Vec<u32>>) -> Result<Self> {
        if rows.len() != n {
            return Err(Error::DimensionMismatch {
                left: n,
                right: rows.len(),
            });
        }
        for row in rows.iter_mut() {
            row.sort_unstable();
            row.dedup();
            if let Some(&last) = row.last() {
                Error::check_index(last as usize, n)?;
            }
        }
        Ok(Self::from_sorted_rows(n, rows))
    }

    /// Assemble CSR from rows that are already sorted, unique and in range
    pub(crate) fn from_sorted_rows(n: usize, rows: Vec<Vec<u32>>) -> Self {
        debug_assert_eq!(rows.len(), n);
        let nnz: usize = rows.iter().map(|r| r.len()).sum();

        let mut offsets = Vec::with_capacity(n + 1);
        let mut cols = Vec::with_capacity(nnz);
        offsets.push(0);
        for row in rows {
            debug_assert!(row.windows(2).all(|w| w[0] < w[1]));
            cols.extend_from_slice(&row);
            offsets.push(cols.len());
        }

        Self { n, offsets, cols }
    }

    /// Assemble CSR directly from raw arrays (used by [`MatrixBuilder`])
    pub(crate) fn from_raw_parts(n: usize, offsets: Vec<usize>, cols: Vec<u32>) -> Self {
        debug_assert_eq!(offsets.len(), n + 1);
        debug_assert_eq!(offsets[n], cols.len());
        Self { n, offsets, cols }
    }

    /// Matrix dimension
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Number of `true` entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.cols.len()
    }

    /// True if no entry is set
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }

    /// Fraction of the `n²` entries that are set
    pub fn density(&self) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        self.nnz() as f64 / (self.n as f64 * self.n as f64)
    }

    /// Sorted column indices of row `i`.
    ///
    /// Panics if `i >= dim()`; use [`row_nonzeros`](Self::row_nonzeros) for a
    /// checked variant.
    #[inline]
    pub fn row(&self, i: usize) -> &[u32] {
        &self.cols[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Number of entries in row `i` (panics if out of range)
    #[inline]
    pub fn row_len(&self, i: usize) -> usize {
        self.offsets[i + 1] - self.offsets[i]
    }

    /// Longest row
    pub fn max_row_len(&self) -> usize {
        (0..self.n).map(|i| self.row_len(i)).max().unwrap_or(0)
    }

    /// Ordered, restartable iterator over the nonzero columns of row `i`
    pub fn row_nonzeros(&self, i: usize) -> Result<RowNonzeros<'_>> {
        Error::check_index(i, self.n)?;
        Ok(self.row(i).iter().copied())
    }

    /// Lookup entry `(i, j)`: binary search over row `i`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Result<bool> {
        Error::check_index(i, self.n)?;
        Error::check_index(j, self.n)?;
        Ok(self.row(i).binary_search(&(j as u32)).is_ok())
    }

    /// Mark entry `(i, j)` true. Idempotent.
    ///
    /// Inserting into a packed CSR shifts every later entry; prefer
    /// [`MatrixBuilder`] when setting many entries.
    pub fn set(&mut self, i: usize, j: usize) -> Result<()> {
        Error::check_index(i, self.n)?;
        Error::check_index(j, self.n)?;

        let start = self.offsets[i];
        let end = self.offsets[i + 1];
        match self.cols[start..end].binary_search(&(j as u32)) {
            Ok(_) => Ok(()),
            Err(pos) => {
                self.cols.insert(start + pos, j as u32);
                for offset in &mut self.offsets[i + 1..] {
                    *offset += 1;
                }
                Ok(())
            }
        }
    }

    /// All `(row, col)` entries in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.n).flat_map(move |i| self.row(i).iter().map(move |&j| (i, j as usize)))
    }

    /// Raw CSR arrays `(offsets, cols)`
    pub fn as_csr(&self) -> (&[usize], &[u32]) {
        (&self.offsets, &self.cols)
    }
}
