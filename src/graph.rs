//! In-memory directed sequence graph consumed by the index pipeline
//!
//! Loaders in [`crate::formats`] produce a [`Graph`]; the core only reads it.
//! Node ids are dense in `[0, n)`. A node may carry a weight (its sequence
//! length), which only matters for the [`Metric::Sequence`] path-length
//! metric, where the graph is first expanded to one node per base.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::matrix::MAX_DIM;

/// Directed graph with optional per-node weights
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    n: usize,
    weights: Vec<Option<u32>>,
    edges: Vec<(u32, u32)>,
}

/// How path length is measured for the window `[d_low, d_up]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Number of edges on the walk
    #[default]
    Edges,
    /// Number of sequence characters, via per-base expansion
    Sequence,
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "edges" => Ok(Metric::Edges),
            "sequence" | "seq" => Ok(Metric::Sequence),
            other => Err(Error::config(format!(
                "unknown metric '{other}' (expected 'edges' or 'sequence')"
            ))),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Edges => write!(f, "edges"),
            Metric::Sequence => write!(f, "sequence"),
        }
    }
}

impl Graph {
    /// Graph with `n` unweighted nodes and no edges
    pub fn new(n: usize) -> Self {
        Self {
            n,
            weights: vec![None; n],
            edges: Vec::new(),
        }
    }

    /// Graph from an edge list; endpoints are checked against `n`
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut graph = Self::new(n);
        for &(u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Number of nodes
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of edges as stored (duplicates included)
    #[inline]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Directed edges `(u, v)`
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Weight of node `v` (sequence length), if known
    pub fn weight(&self, v: usize) -> Option<u32> {
        self.weights.get(v).copied().flatten()
    }

    pub fn set_weight(&mut self, v: usize, weight: u32) -> Result<()> {
        Error::check_index(v, self.n)?;
        self.weights[v] = Some(weight);
        Ok(())
    }

    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<()> {
        Error::check_index(u, self.n)?;
        Error::check_index(v, self.n)?;
        self.edges.push((u as u32, v as u32));
        Ok(())
    }

    /// Check the size limit and that every edge endpoint is a valid node id
    pub fn validate(&self) -> Result<()> {
        if self.n > MAX_DIM {
            return Err(Error::config(format!(
                "graph has {} nodes, more than the supported {}",
                self.n, MAX_DIM
            )));
        }
        if self.weights.len() != self.n {
            return Err(Error::DimensionMismatch {
                left: self.n,
                right: self.weights.len(),
            });
        }
        for &(u, v) in &self.edges {
            Error::check_index(u as usize, self.n)?;
            Error::check_index(v as usize, self.n)?;
        }
        Ok(())
    }

    /// Expand every node into a chain of unit nodes, one per base.
    ///
    /// A node of weight `w` becomes `max(w, 1)` nodes linked in order; an edge
    /// `u → v` connects the last unit of `u` to the first unit of `v`. Walk
    /// length on the expansion counts sequence characters.
    pub fn expand_by_weight(&self) -> Result<ExpandedGraph> {
        let mut first_unit = Vec::with_capacity(self.n + 1);
        let mut total = 0usize;
        for v in 0..self.n {
            first_unit.push(total as u64);
            total += self.weight(v).unwrap_or(0).max(1) as usize;
        }
        first_unit.push(total as u64);

        if total > MAX_DIM {
            return Err(Error::config(format!(
                "expanded graph has {} units, more than the supported {}",
                total, MAX_DIM
            )));
        }

        let mut expanded = Graph::new(total);
        for v in 0..self.n {
            let start = first_unit[v] as usize;
            let end = first_unit[v + 1] as usize;
            for unit in start..end {
                expanded.weights[unit] = Some(1);
                if unit + 1 < end {
                    expanded.edges.push((unit as u32, unit as u32 + 1));
                }
            }
        }
        for &(u, v) in &self.edges {
            let last_of_u = first_unit[u as usize + 1] - 1;
            let first_of_v = first_unit[v as usize];
            expanded.edges.push((last_of_u as u32, first_of_v as u32));
        }

        Ok(ExpandedGraph {
            graph: expanded,
            first_unit,
        })
    }
}

/// Per-base expansion of a weighted [`Graph`]
#[derive(Debug, Clone)]
pub struct ExpandedGraph {
    graph: Graph,
    /// `first_unit[v]` is the first unit id of original node `v`; last entry is the total
    first_unit: Vec<u64>,
}

impl ExpandedGraph {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Units `[start, end)` that original node `v` expanded into
    pub fn units_of(&self, v: usize) -> Result<std::ops::Range<usize>> {
        Error::check_index(v, self.first_unit.len() - 1)?;
        Ok(self.first_unit[v] as usize..self.first_unit[v + 1] as usize)
    }

    /// Original node that unit `u` belongs to
    pub fn node_of(&self, unit: usize) -> Result<usize> {
        Error::check_index(unit, self.graph.n())?;
        // Last boundary <= unit
        let pos = self.first_unit.partition_point(|&start| start as usize <= unit);
        Ok(pos - 1)
    }
}
