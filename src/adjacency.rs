//! Adjacency relation: `Graph` → `SparseBoolMatrix`
//!
//! Entry `(u, v)` is true iff the graph has an edge `u → v`. Built once per
//! graph and read-only afterwards; every index build for that graph shares it.

use tracing::debug;

use crate::error::Result;
use crate::graph::Graph;
use crate::matrix::{MatrixBuilder, SparseBoolMatrix};

/// Immutable adjacency matrix of a graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    matrix: SparseBoolMatrix,
}

impl AdjacencyMatrix {
    /// Set `(u, v)` for every edge of `graph`.
    ///
    /// Fails with `IndexOutOfRange` if an edge endpoint is not a node id.
    pub fn from_graph(graph: &Graph) -> Result<Self> {
        let mut builder = MatrixBuilder::with_capacity(graph.n(), graph.n_edges());
        for &(u, v) in graph.edges() {
            builder.set(u as usize, v as usize)?;
        }
        let matrix = builder.build();

        debug!(
            n = matrix.dim(),
            edges = matrix.nnz(),
            duplicates = graph.n_edges() - matrix.nnz(),
            "adjacency matrix built"
        );

        Ok(Self { matrix })
    }

    /// Wrap an existing matrix as an adjacency relation
    pub fn from_matrix(matrix: SparseBoolMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &SparseBoolMatrix {
        &self.matrix
    }

    /// Number of nodes
    pub fn n(&self) -> usize {
        self.matrix.dim()
    }

    /// Number of distinct edges
    pub fn n_edges(&self) -> usize {
        self.matrix.nnz()
    }

    /// Average out-degree
    pub fn avg_out_degree(&self) -> f64 {
        if self.n() == 0 {
            return 0.0;
        }
        self.n_edges() as f64 / self.n() as f64
    }

    pub fn density(&self) -> f64 {
        self.matrix.density()
    }

    pub fn max_out_degree(&self) -> usize {
        self.matrix.max_row_len()
    }

    /// Out-neighbours of `u` (panics if `u >= n`)
    #[inline]
    pub fn successors(&self, u: usize) -> &[u32] {
        self.matrix.row(u)
    }
}
