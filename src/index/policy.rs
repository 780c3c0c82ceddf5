//! Strategy selection policies

use super::{StrategyKind, Window};
use crate::adjacency::AdjacencyMatrix;

/// Chooses the construction strategy for a given adjacency and window
pub trait SelectionPolicy: Send + Sync {
    fn select(&self, adjacency: &AdjacencyMatrix, window: Window) -> StrategyKind;
}

/// Always the same strategy
#[derive(Debug, Clone, Copy)]
pub struct FixedPolicy(pub StrategyKind);

impl SelectionPolicy for FixedPolicy {
    fn select(&self, _adjacency: &AdjacencyMatrix, _window: Window) -> StrategyKind {
        self.0
    }
}

/// Picks the frontier strategy for wide windows or sparse graphs.
///
/// Matrix powering rebuilds a full CSR per layer, which is wasteful when many
/// layers are needed or each layer is tiny. On small, dense graphs with short
/// windows the product is cheap and the exact strategy wins.
#[derive(Debug, Clone, Copy)]
pub struct DensityPolicy {
    /// Use frontier when `d_up` reaches this many layers
    pub max_exact_layers: u32,
    /// Use frontier when the average out-degree is at most this
    pub sparse_avg_degree: f64,
    /// Always use exact below this many nodes
    pub small_graph_nodes: usize,
}

impl Default for DensityPolicy {
    fn default() -> Self {
        Self {
            max_exact_layers: 64,
            sparse_avg_degree: 1.5,
            small_graph_nodes: 256,
        }
    }
}

impl SelectionPolicy for DensityPolicy {
    fn select(&self, adjacency: &AdjacencyMatrix, window: Window) -> StrategyKind {
        if adjacency.n() < self.small_graph_nodes {
            return StrategyKind::Exact;
        }
        if window.d_up() >= self.max_exact_layers
            || adjacency.avg_out_degree() <= self.sparse_avg_degree
        {
            StrategyKind::Frontier
        } else {
            StrategyKind::Exact
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn adjacency(n: usize, degree: usize) -> AdjacencyMatrix {
        let mut edges = Vec::new();
        for u in 0..n {
            for d in 1..=degree {
                edges.push((u, (u + d) % n));
            }
        }
        AdjacencyMatrix::from_graph(&Graph::from_edges(n, &edges).unwrap()).unwrap()
    }

    #[test]
    fn test_fixed() {
        let adj = adjacency(10, 1);
        let w = Window::new(0, 1000).unwrap();
        assert_eq!(FixedPolicy(StrategyKind::Exact).select(&adj, w), StrategyKind::Exact);
    }

    #[test]
    fn test_density_policy() {
        let policy = DensityPolicy::default();
        let short = Window::new(0, 8).unwrap();
        let long = Window::new(0, 500).unwrap();

        // Small graphs always exact
        assert_eq!(policy.select(&adjacency(10, 1), long), StrategyKind::Exact);
        // Sparse
        assert_eq!(policy.select(&adjacency(1000, 1), short), StrategyKind::Frontier);
        // Dense, short window
        assert_eq!(policy.select(&adjacency(1000, 4), short), StrategyKind::Exact);
        // Dense, long window
        assert_eq!(policy.select(&adjacency(1000, 4), long), StrategyKind::Frontier);
    }
}
