//! # Boundreach
//!
//! Distance-bounded reachability on large directed sequence graphs: for a
//! window `[d_low, d_up]`, is there a walk from node `i` to node `j` whose
//! length falls inside the window?
//!
//! The answer for every pair is materialized once into a sparse boolean
//! index, after which each query is a binary search in one CSR row.
//!
//! ```no_run
//! use std::sync::Arc;
//! use boundreach::{AdjacencyMatrix, DistanceIndexBuilder, ExecutionContext, Graph, QueryEngine, Window};
//!
//! # fn main() -> boundreach::Result<()> {
//! let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)])?;
//! let adjacency = AdjacencyMatrix::from_graph(&graph)?;
//! let builder = DistanceIndexBuilder::new(ExecutionContext::new(0)?);
//! let index = builder.build(&adjacency, Window::new(1, 2)?)?;
//!
//! let engine = QueryEngine::new(Arc::new(index));
//! assert!(engine.answer(0, 2)?);
//! assert!(!engine.answer(0, 3)?);
//! # Ok(())
//! # }
//! ```

pub mod adjacency;
pub mod config;
pub mod context;
pub mod error;
pub mod formats;
pub mod graph;
pub mod index;
pub mod matrix;
pub mod pipeline;
pub mod query;
pub mod workload;

pub use adjacency::AdjacencyMatrix;
pub use context::{CancellationToken, ExecutionContext};
pub use error::{Error, Result};
pub use graph::{Graph, Metric};
pub use index::{DistanceIndex, DistanceIndexBuilder, StrategyKind, Window};
pub use matrix::SparseBoolMatrix;
pub use query::{Query, QueryEngine, QueryResult};
