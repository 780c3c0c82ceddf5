//! Index construction driver
//!
//! Validates the window, asks the policy for a strategy, runs it on the
//! context's pool and wraps the matrix into a [`DistanceIndex`]. Builds for
//! different windows share only the read-only adjacency matrix.

use std::time::Instant;
use tracing::info;

use super::{
    BuildStats, BuildStrategy, DensityPolicy, DistanceIndex, ExactStrategy, FrontierStrategy,
    SelectionPolicy, StrategyKind, Window,
};
use crate::adjacency::AdjacencyMatrix;
use crate::context::ExecutionContext;
use crate::error::Result;

/// Builds distance indexes on an execution context
pub struct DistanceIndexBuilder {
    ctx: ExecutionContext,
    policy: Box<dyn SelectionPolicy>,
    exact: ExactStrategy,
    frontier: FrontierStrategy,
}

impl DistanceIndexBuilder {
    /// Builder with the default [`DensityPolicy`]
    pub fn new(ctx: ExecutionContext) -> Self {
        Self {
            ctx,
            policy: Box::new(DensityPolicy::default()),
            exact: ExactStrategy,
            frontier: FrontierStrategy::default(),
        }
    }

    pub fn with_policy<P: SelectionPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Box::new(policy);
        self
    }

    pub fn with_frontier(mut self, frontier: FrontierStrategy) -> Self {
        self.frontier = frontier;
        self
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    fn strategy(&self, kind: StrategyKind) -> &dyn BuildStrategy {
        match kind {
            StrategyKind::Exact => &self.exact,
            StrategyKind::Frontier => &self.frontier,
        }
    }

    /// Build the index for `window` with the policy's strategy
    pub fn build(&self, adjacency: &AdjacencyMatrix, window: Window) -> Result<DistanceIndex> {
        let kind = self.policy.select(adjacency, window);
        self.build_with(kind, adjacency, window)
    }

    /// Build the index for `window` with an explicit strategy
    pub fn build_with(
        &self,
        kind: StrategyKind,
        adjacency: &AdjacencyMatrix,
        window: Window,
    ) -> Result<DistanceIndex> {
        // Window is validated on construction; re-check before any work starts
        let window = Window::new(window.d_low(), window.d_up())?;
        self.ctx.checkpoint()?;

        info!(
            n = adjacency.n(),
            edges = adjacency.n_edges(),
            %window,
            strategy = %kind,
            threads = self.ctx.threads(),
            "building distance index"
        );

        let start = Instant::now();
        let strategy = self.strategy(kind);
        let ctx = &self.ctx;
        let output = ctx.install(|| strategy.build(adjacency, window, ctx))?;

        let stats = BuildStats {
            n_nodes: adjacency.n(),
            n_edges: adjacency.n_edges(),
            layers: output.layers,
            early_exit: output.early_exit,
            nnz: output.matrix.nnz(),
            elapsed_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            nnz = stats.nnz,
            layers = stats.layers,
            early_exit = stats.early_exit,
            elapsed_ms = stats.elapsed_ms,
            "distance index ready"
        );

        Ok(DistanceIndex::new(output.matrix, window, kind, stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::graph::Graph;
    use crate::index::FixedPolicy;
    use crate::matrix::SparseBoolMatrix;

    fn chain_adjacency() -> AdjacencyMatrix {
        AdjacencyMatrix::from_graph(&Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap())
            .unwrap()
    }

    #[test]
    fn test_build_reports_stats() {
        let builder = DistanceIndexBuilder::new(ExecutionContext::new(2).unwrap())
            .with_policy(FixedPolicy(StrategyKind::Exact));
        let index = builder
            .build(&chain_adjacency(), Window::new(1, 2).unwrap())
            .unwrap();
        assert_eq!(index.strategy(), StrategyKind::Exact);
        assert_eq!(index.window(), Window::new(1, 2).unwrap());
        assert_eq!(index.stats().nnz, 5);
        assert_eq!(index.stats().n_edges, 3);
        assert_eq!(index.stats().layers, 2);
    }

    #[test]
    fn test_strategies_agree() {
        let builder = DistanceIndexBuilder::new(ExecutionContext::new(2).unwrap());
        let adj = chain_adjacency();
        let w = Window::new(0, 3).unwrap();
        let a = builder.build_with(StrategyKind::Exact, &adj, w).unwrap();
        let b = builder.build_with(StrategyKind::Frontier, &adj, w).unwrap();
        assert_eq!(a.matrix(), b.matrix());
    }

    #[test]
    fn test_zero_window_is_identity() {
        let builder = DistanceIndexBuilder::new(ExecutionContext::sequential().unwrap());
        let index = builder
            .build(&chain_adjacency(), Window::new(0, 0).unwrap())
            .unwrap();
        assert_eq!(index.matrix(), &SparseBoolMatrix::identity(4));
    }

    #[test]
    fn test_cancelled_context_publishes_nothing() {
        let ctx = ExecutionContext::sequential().unwrap();
        ctx.cancellation().cancel();
        let builder = DistanceIndexBuilder::new(ctx);
        let res = builder.build(&chain_adjacency(), Window::new(1, 2).unwrap());
        assert!(matches!(res, Err(Error::Cancelled)));
    }
}
