//! Point queries against a built distance index
//!
//! The engine holds the index behind an `Arc`, so any number of threads can
//! answer queries at once without locking: nothing here mutates state.

use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::index::DistanceIndex;

/// One reachability question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Query {
    pub origin: usize,
    pub destination: usize,
}

impl Query {
    pub fn new(origin: usize, destination: usize) -> Self {
        Self {
            origin,
            destination,
        }
    }
}

/// Answered query, in the order the queries were submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub origin: usize,
    pub destination: usize,
    pub result: bool,
}

/// Read-only query front end over a shared index
#[derive(Debug, Clone)]
pub struct QueryEngine {
    index: Arc<DistanceIndex>,
}

impl QueryEngine {
    pub fn new(index: Arc<DistanceIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &DistanceIndex {
        &self.index
    }

    /// Does a walk from `origin` to `destination` with length in the window exist?
    ///
    /// `IndexOutOfRange` if either id is `>= n`.
    #[inline]
    pub fn answer(&self, origin: usize, destination: usize) -> Result<bool> {
        self.index.contains(origin, destination)
    }

    pub fn answer_query(&self, query: &Query) -> Result<QueryResult> {
        Ok(QueryResult {
            origin: query.origin,
            destination: query.destination,
            result: self.answer(query.origin, query.destination)?,
        })
    }

    /// Answer many queries in parallel; results keep the input order.
    ///
    /// Fails on the first out-of-range query.
    pub fn answer_batch(&self, queries: &[Query]) -> Result<Vec<QueryResult>> {
        queries.par_iter().map(|q| self.answer_query(q)).collect()
    }

    /// Number of results that are `true`
    pub fn count_true(results: &[QueryResult]) -> usize {
        results.iter().filter(|r| r.result).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::AdjacencyMatrix;
    use crate::context::ExecutionContext;
    use crate::error::Error;
    use crate::graph::Graph;
    use crate::index::{DistanceIndexBuilder, Window};

    fn engine() -> QueryEngine {
        let graph = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let adj = AdjacencyMatrix::from_graph(&graph).unwrap();
        let index = DistanceIndexBuilder::new(ExecutionContext::sequential().unwrap())
            .build(&adj, Window::new(1, 2).unwrap())
            .unwrap();
        QueryEngine::new(Arc::new(index))
    }

    #[test]
    fn test_answer() {
        let engine = engine();
        assert!(engine.answer(0, 1).unwrap());
        assert!(engine.answer(0, 2).unwrap());
        assert!(!engine.answer(0, 3).unwrap());
        assert!(engine.answer(1, 3).unwrap());
        assert!(!engine.answer(0, 0).unwrap());
        assert!(!engine.answer(2, 2).unwrap());
    }

    #[test]
    fn test_out_of_range_is_error() {
        let engine = engine();
        assert!(matches!(engine.answer(4, 0), Err(Error::IndexOutOfRange { index: 4, dim: 4 })));
        assert!(matches!(engine.answer(0, 4), Err(Error::IndexOutOfRange { .. })));
        assert!(engine.answer_batch(&[Query::new(0, 1), Query::new(9, 0)]).is_err());
    }

    #[test]
    fn test_batch_keeps_order() {
        let engine = engine();
        let queries: Vec<Query> = (0..4)
            .flat_map(|i| (0..4).map(move |j| Query::new(i, j)))
            .collect();
        let results = engine.answer_batch(&queries).unwrap();
        assert_eq!(results.len(), 16);
        for (q, r) in queries.iter().zip(&results) {
            assert_eq!((q.origin, q.destination), (r.origin, r.destination));
            assert_eq!(r.result, engine.answer(q.origin, q.destination).unwrap());
        }
        assert_eq!(QueryEngine::count_true(&results), 5);
    }

    #[test]
    fn test_concurrent_readers() {
        let engine = engine();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || {
                    (0..1000).all(|i| engine.answer(i % 3, i % 3 + 1).unwrap())
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
    }
}
