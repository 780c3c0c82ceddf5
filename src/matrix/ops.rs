//! Boolean semiring operations on [`SparseBoolMatrix`]
//!
//! - `multiply`: C = A ⊗ B with OR as sum and AND as product
//! - `union_in_place`: A |= B
//! - `is_subset_of`: entrywise A ⊆ B
//!
//! All three are row-parallel: row `i` of the output depends only on row `i`
//! of the left operand, so rows fan out over rayon and are assembled into a
//! fresh CSR once every row is done. No dense `n × n` buffer is ever built.

use rayon::prelude::*;

use super::SparseBoolMatrix;
use crate::error::{Error, Result};

impl SparseBoolMatrix {
    /// Boolean product `self × rhs`.
    ///
    /// For each nonzero `self[i][k]`, row `k` of `rhs` is unioned into row `i`
    /// of the product. Work is proportional to the sum of `|rhs.row(k)|` over
    /// the nonzeros of `self`.
    pub fn multiply(&self, rhs: &SparseBoolMatrix) -> Result<SparseBoolMatrix> {
        check_same_dim(self, rhs)?;

        let rows: Vec<Vec<u32>> = (0..self.dim())
            .into_par_iter()
            .map_init(Vec::new, |scratch: &mut Vec<u32>, i| {
                let ks = self.row(i);
                match ks.len() {
                    0 => Vec::new(),
                    // Single predecessor: the row is already sorted + unique
                    1 => rhs.row(ks[0] as usize).to_vec(),
                    _ => {
                        scratch.clear();
                        for &k in ks {
                            scratch.extend_from_slice(rhs.row(k as usize));
                        }
                        scratch.sort_unstable();
                        scratch.dedup();
                        scratch.clone()
                    }
                }
            })
            .collect();

        Ok(SparseBoolMatrix::from_sorted_rows(self.dim(), rows))
    }

    /// Merge every entry of `other` into `self`
    pub fn union_in_place(&mut self, other: &SparseBoolMatrix) -> Result<()> {
        check_same_dim(self, other)?;

        if other.is_empty() {
            return Ok(());
        }
        if self.is_empty() {
            *self = other.clone();
            return Ok(());
        }

        let merged: Vec<Vec<u32>> = (0..self.dim())
            .into_par_iter()
            .map(|i| merge_sorted(self.row(i), other.row(i)))
            .collect();

        *self = SparseBoolMatrix::from_sorted_rows(self.dim(), merged);
        Ok(())
    }

    /// True if every entry of `self` is also set in `other`
    pub fn is_subset_of(&self, other: &SparseBoolMatrix) -> Result<bool> {
        check_same_dim(self, other)?;
        if self.nnz() > other.nnz() {
            return Ok(false);
        }
        Ok((0..self.dim())
            .into_par_iter()
            .all(|i| is_sorted_subset(self.row(i), other.row(i))))
    }
}

fn check_same_dim(a: &SparseBoolMatrix, b: &SparseBoolMatrix) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(Error::DimensionMismatch {
            left: a.dim(),
            right: b.dim(),
        });
    }
    Ok(())
}

/// Union of two sorted, duplicate-free slices
pub(crate) fn merge_sorted(a: &[u32], b: &[u32]) -> Vec<u32> {
    if b.is_empty() {
        return a.to_vec();
    }
    if a.is_empty() {
        return b.to_vec();
    }

    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

fn is_sorted_subset(small: &[u32], big: &[u32]) -> bool {
    if small.len() > big.len() {
        return false;
    }
    let mut j = 0;
    for &x in small {
        while j < big.len() && big[j] < x {
            j += 1;
        }
        if j == big.len() || big[j] != x {
            return false;
        }
        j += 1;
    }
    true
}
