//! Exact strategy: sparse boolean matrix powering
//!
//! ```text
//! P_0 = I
//! P_k = P_{k-1} × A          k = 1 ..= d_up
//! V   = ⋃ { P_k : d_low ≤ k ≤ d_up }
//! ```
//!
//! Each layer is a full row-parallel product, so layers are separated by a
//! barrier (layer k+1 reads all of layer k). The cancellation token is polled
//! before every layer.

use tracing::debug;

use super::{BuildStrategy, StrategyKind, StrategyOutput, Window};
use crate::adjacency::AdjacencyMatrix;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::matrix::SparseBoolMatrix;

/// Iterated sparse matrix multiplication
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactStrategy;

impl BuildStrategy for ExactStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Exact
    }

    fn build(
        &self,
        adjacency: &AdjacencyMatrix,
        window: Window,
        ctx: &ExecutionContext,
    ) -> Result<StrategyOutput> {
        let n = adjacency.n();
        let a = adjacency.matrix();

        let mut layer = SparseBoolMatrix::identity(n);
        let mut reach = if window.d_low() == 0 {
            layer.clone()
        } else {
            SparseBoolMatrix::new(n)
        };

        let mut k = 0u32;
        let mut early_exit = false;
        while k < window.d_up() {
            ctx.checkpoint()?;

            layer = layer.multiply(a)?;
            k += 1;

            if layer.is_empty() {
                // Every longer walk would extend one of length k
                early_exit = k < window.d_up();
                debug!(layer = k, "layer empty, stopping");
                break;
            }
            if k >= window.d_low() {
                reach.union_in_place(&layer)?;
            }
            debug!(layer = k, layer_nnz = layer.nnz(), index_nnz = reach.nnz(), "layer done");
        }

        Ok(StrategyOutput {
            matrix: reach,
            layers: k,
            early_exit,
        })
    }
}
