//! Seeded random query workloads
//!
//! Uniform `(origin, destination)` pairs over `[0, n)`. The generator is an
//! explicitly seeded `StdRng`, so the same seed always yields the same
//! workload.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::query::Query;

/// Random query source
#[derive(Debug, Clone)]
pub struct QueryGenerator {
    rng: StdRng,
    n: usize,
}

impl QueryGenerator {
    /// Generator over node ids `[0, n)`; `n` must be positive
    pub fn new(n: usize, seed: u64) -> Result<Self> {
        if n == 0 {
            return Err(Error::config("cannot generate queries on an empty graph"));
        }
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            n,
        })
    }

    pub fn next_query(&mut self) -> Query {
        let origin = self.rng.random_range(0..self.n);
        let destination = self.rng.random_range(0..self.n);
        Query::new(origin, destination)
    }

    /// `count` queries
    pub fn generate(&mut self, count: usize) -> Vec<Query> {
        (0..count).map(|_| self.next_query()).collect()
    }
}
