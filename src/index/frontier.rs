//! Frontier strategy: per-source layered expansion
//!
//! For every source `s`, frontier `F_k` holds the nodes reachable from `s` by
//! a walk of exactly `k` edges:
//!
//! ```text
//! F_0     = { s }
//! F_{k+1} = ⋃ { succ(v) : v ∈ F_k }
//! row(s)  = ⋃ { F_k : d_low ≤ k ≤ d_up }
//! ```
//!
//! Expansion stops when the remaining budget `d_up - k` runs out or the
//! frontier empties. This is row `s` of the exact strategy's matrix, computed
//! without materializing the intermediate `P_k` matrices.
//!
//! # Periodic fast-forward
//!
//! `F_{k+1}` depends only on `F_k`, so once a frontier repeats (`F_k == F_j`,
//! `j < k`) the sequence is periodic with period `k - j` from `j` on. The
//! remaining layers up to `d_up` are then read from the recorded period
//! instead of being expanded, which turns large windows on cyclic graphs into
//! `O(period)` work. The history is capped per source; past the cap the
//! expansion simply continues layer by layer.
//!
//! # Parallelism
//!
//! Sources are split into contiguous batches processed in parallel. Each batch
//! owns its scratch marks (two `u32` stamps per node) and polls the
//! cancellation token before starting.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use super::{BuildStrategy, StrategyKind, StrategyOutput, Window};
use crate::adjacency::AdjacencyMatrix;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::matrix::SparseBoolMatrix;

/// Tuning knobs; none of them changes the result
#[derive(Debug, Clone, Copy)]
pub struct FrontierConfig {
    /// Sources per parallel batch (0 = derive from thread count)
    pub batch_size: usize,
    /// Max frontiers remembered per source for periodicity detection
    pub max_history_layers: usize,
    /// Max total frontier entries remembered per source
    pub max_history_entries: usize,
}

impl Default for FrontierConfig {
    fn default() -> Self {
        Self {
            batch_size: 0,
            max_history_layers: 256,
            max_history_entries: 1 << 16,
        }
    }
}

/// Layered frontier expansion per source
#[derive(Debug, Default, Clone, Copy)]
pub struct FrontierStrategy {
    config: FrontierConfig,
}

impl FrontierStrategy {
    pub fn new(config: FrontierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FrontierConfig {
        &self.config
    }

    fn batch_size(&self, n: usize, threads: usize) -> usize {
        if self.config.batch_size > 0 {
            return self.config.batch_size;
        }
        // ~8 batches per worker for load balance, bounded so scratch reuse pays off
        let target = (n / (threads.max(1) * 8)).max(1);
        target.clamp(1, 4096)
    }
}

/// Per-batch stamp arrays
struct Scratch {
    layer_mark: Vec<u32>,
    layer_epoch: u32,
    row_mark: Vec<u32>,
    row_epoch: u32,
}

impl Scratch {
    fn new(n: usize) -> Self {
        Self {
            layer_mark: vec![0; n],
            layer_epoch: 0,
            row_mark: vec![0; n],
            row_epoch: 0,
        }
    }

    fn next_layer_epoch(&mut self) -> u32 {
        if self.layer_epoch == u32::MAX {
            self.layer_mark.iter_mut().for_each(|m| *m = 0);
            self.layer_epoch = 0;
        }
        self.layer_epoch += 1;
        self.layer_epoch
    }

    fn next_row_epoch(&mut self) -> u32 {
        if self.row_epoch == u32::MAX {
            self.row_mark.iter_mut().for_each(|m| *m = 0);
            self.row_epoch = 0;
        }
        self.row_epoch += 1;
        self.row_epoch
    }
}

/// Frontiers seen so far for one source, for periodicity detection
struct History {
    /// `layers[t]` is `F_t`; complete from 0 while `enabled`
    layers: Vec<Vec<u32>>,
    seen: FxHashMap<Vec<u32>, u32>,
    entries: usize,
    enabled: bool,
}

impl History {
    fn new(source: u32) -> Self {
        let first = vec![source];
        let mut seen = FxHashMap::default();
        seen.insert(first.clone(), 0);
        Self {
            layers: vec![first],
            seen,
            entries: 1,
            enabled: true,
        }
    }

    /// Record `F_k`; returns the earlier layer it repeats, if any
    fn record(&mut self, k: u32, frontier: &[u32], config: &FrontierConfig) -> Option<u32> {
        if !self.enabled {
            return None;
        }
        if let Some(&j) = self.seen.get(frontier) {
            return Some(j);
        }
        if self.layers.len() >= config.max_history_layers
            || self.entries + frontier.len() > config.max_history_entries
        {
            // Gaps would break the period lookup, so stop tracking entirely
            self.enabled = false;
            self.layers = Vec::new();
            self.seen = FxHashMap::default();
            return None;
        }
        debug_assert_eq!(self.layers.len(), k as usize);
        self.entries += frontier.len();
        self.layers.push(frontier.to_vec());
        self.seen.insert(frontier.to_vec(), k);
        None
    }
}

/// Expand one frontier by one edge, deduplicating through `layer_mark`
fn expand(adjacency: &AdjacencyMatrix, frontier: &[u32], scratch: &mut Scratch) -> Vec<u32> {
    let epoch = scratch.next_layer_epoch();
    let mut next = Vec::new();
    for &v in frontier {
        for &w in adjacency.successors(v as usize) {
            let mark = &mut scratch.layer_mark[w as usize];
            if *mark != epoch {
                *mark = epoch;
                next.push(w);
            }
        }
    }
    // Sorted so equal sets compare equal in the history
    next.sort_unstable();
    next
}

fn collect(row: &mut Vec<u32>, frontier: &[u32], scratch: &mut Scratch, epoch: u32) {
    for &w in frontier {
        let mark = &mut scratch.row_mark[w as usize];
        if *mark != epoch {
            *mark = epoch;
            row.push(w);
        }
    }
}

impl FrontierStrategy {
    /// Row `source` of the index; returns the row and the layers expanded
    fn source_row(
        &self,
        adjacency: &AdjacencyMatrix,
        source: u32,
        window: Window,
        scratch: &mut Scratch,
    ) -> (Vec<u32>, u32) {
        let row_epoch = scratch.next_row_epoch();
        let mut row = Vec::new();
        let mut frontier = vec![source];
        if window.d_low() == 0 {
            collect(&mut row, &frontier, scratch, row_epoch);
        }

        let mut history = History::new(source);
        let mut k = 0u32;
        while k < window.d_up() {
            let next = expand(adjacency, &frontier, scratch);
            k += 1;
            if next.is_empty() {
                break;
            }
            if k >= window.d_low() {
                collect(&mut row, &next, scratch, row_epoch);
            }

            if let Some(j) = history.record(k, &next, &self.config) {
                // F_m = F_{j + (m - j) mod p} for m >= j
                let period = k - j;
                let from = (k + 1).max(window.d_low());
                if from <= window.d_up() {
                    let to = window.d_up().min(from.saturating_add(period - 1));
                    for m in from..=to {
                        let t = j + (m - j) % period;
                        let layer = std::mem::take(&mut history.layers[t as usize]);
                        collect(&mut row, &layer, scratch, row_epoch);
                        history.layers[t as usize] = layer;
                    }
                }
                break;
            }
            frontier = next;
        }

        row.sort_unstable();
        (row, k)
    }
}

impl BuildStrategy for FrontierStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Frontier
    }

    fn build(
        &self,
        adjacency: &AdjacencyMatrix,
        window: Window,
        ctx: &ExecutionContext,
    ) -> Result<StrategyOutput> {
        let n = adjacency.n();
        let batch = self.batch_size(n, rayon::current_num_threads());
        let ranges: Vec<(usize, usize)> = (0..n)
            .step_by(batch)
            .map(|start| (start, (start + batch).min(n)))
            .collect();

        debug!(n, batches = ranges.len(), batch_size = batch, "frontier expansion");

        let batches: Vec<(Vec<Vec<u32>>, u32)> = ranges
            .par_iter()
            .map(|&(start, end)| -> Result<(Vec<Vec<u32>>, u32)> {
                ctx.checkpoint()?;
                let mut scratch = Scratch::new(n);
                let mut rows = Vec::with_capacity(end - start);
                let mut max_layers = 0u32;
                for source in start..end {
                    let (row, layers) =
                        self.source_row(adjacency, source as u32, window, &mut scratch);
                    max_layers = max_layers.max(layers);
                    rows.push(row);
                }
                Ok((rows, max_layers))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut layers = 0u32;
        let mut rows = Vec::with_capacity(n);
        for (batch_rows, batch_layers) in batches {
            layers = layers.max(batch_layers);
            rows.extend(batch_rows);
        }

        let matrix = SparseBoolMatrix::from_sorted_rows(n, rows);
        Ok(StrategyOutput {
            matrix,
            layers,
            early_exit: layers < window.d_up(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::index::ExactStrategy;

    fn adjacency(n: usize, edges: &[(usize, usize)]) -> AdjacencyMatrix {
        AdjacencyMatrix::from_graph(&Graph::from_edges(n, edges).unwrap()).unwrap()
    }

    fn both(adj: &AdjacencyMatrix, lo: u32, hi: u32, strategy: FrontierStrategy) {
        let ctx = ExecutionContext::new(3).unwrap();
        let w = Window::new(lo, hi).unwrap();
        let exact = ExactStrategy.build(adj, w, &ctx).unwrap().matrix;
        let frontier = strategy.build(adj, w, &ctx).unwrap().matrix;
        assert_eq!(exact, frontier, "window {}", w);
    }

    #[test]
    fn test_chain_window() {
        let adj = adjacency(4, &[(0, 1), (1, 2), (2, 3)]);
        let ctx = ExecutionContext::sequential().unwrap();
        let out = FrontierStrategy::default()
            .build(&adj, Window::new(1, 2).unwrap(), &ctx)
            .unwrap();
        let entries: Vec<(usize, usize)> = out.matrix.iter().collect();
        assert_eq!(entries, vec![(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_self_loop() {
        let adj = adjacency(1, &[(0, 0)]);
        let ctx = ExecutionContext::sequential().unwrap();
        let out = FrontierStrategy::default()
            .build(&adj, Window::new(1, 1).unwrap(), &ctx)
            .unwrap();
        assert!(out.matrix.get(0, 0).unwrap());
    }

    #[test]
    fn test_periodic_fast_forward_matches_exact() {
        // Two cycles of lengths 3 and 4 sharing node 0, plus a tail
        let edges = [(0, 1), (1, 2), (2, 0), (0, 3), (3, 4), (4, 5), (5, 0), (2, 6)];
        let adj = adjacency(7, &edges);
        for &(lo, hi) in &[(0, 0), (0, 5), (3, 3), (4, 20), (17, 40), (11, 11), (0, 64)] {
            both(&adj, lo, hi, FrontierStrategy::default());
        }
    }

    #[test]
    fn test_capped_history_matches_exact() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (1, 3)];
        let adj = adjacency(5, &edges);
        let tiny = FrontierStrategy::new(FrontierConfig {
            batch_size: 1,
            max_history_layers: 2,
            max_history_entries: 3,
        });
        for &(lo, hi) in &[(0, 12), (6, 9), (13, 30)] {
            both(&adj, lo, hi, tiny);
        }
    }

    #[test]
    fn test_early_exit_reported() {
        let adj = adjacency(3, &[(0, 1), (1, 2)]);
        let ctx = ExecutionContext::sequential().unwrap();
        let out = FrontierStrategy::default()
            .build(&adj, Window::new(0, 10).unwrap(), &ctx)
            .unwrap();
        assert_eq!(out.layers, 3);
        assert!(out.early_exit);
    }

    #[test]
    fn test_cancelled() {
        let adj = adjacency(3, &[(0, 1), (1, 2)]);
        let ctx = ExecutionContext::sequential().unwrap();
        ctx.cancellation().cancel();
        let res = FrontierStrategy::default().build(&adj, Window::new(0, 2).unwrap(), &ctx);
        assert!(matches!(res, Err(crate::error::Error::Cancelled)));
    }
}
