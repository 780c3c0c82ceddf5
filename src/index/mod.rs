//! Distance-Bounded Reachability Index
//!
//! Materializes, for every node pair `(i, j)`, whether a directed walk from
//! `i` to `j` exists whose length lies in the window `[d_low, d_up]`.
//!
//! ## Strategies
//!
//! Two interchangeable [`BuildStrategy`] implementations produce the same
//! matrix bit for bit:
//!
//! - **Exact** (`exact`): sparse boolean matrix powering. Layer `k` is
//!   `P_k = P_{k-1} × A`, accumulated into the index when `k` is inside the
//!   window. Stops once a layer is empty (acyclic graphs).
//! - **Frontier** (`frontier`): per-source layered expansion in parallel
//!   source batches, with periodic-frontier fast-forward for cyclic graphs.
//!
//! ## Strategy Selection
//!
//! A [`SelectionPolicy`] picks the strategy from graph size, density and the
//! window. It only affects build time, never the result.
//!
//! ## Lifecycle
//!
//! `DistanceIndex` values only exist once fully built: the builder either
//! returns a complete index or an error, so readers never see a partial one.

pub mod builder;
pub mod exact;
pub mod frontier;
pub mod policy;

pub use builder::DistanceIndexBuilder;
pub use exact::ExactStrategy;
pub use frontier::{FrontierConfig, FrontierStrategy};
pub use policy::{DensityPolicy, FixedPolicy, SelectionPolicy};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::adjacency::AdjacencyMatrix;
use crate::context::ExecutionContext;
use crate::error::{Error, Result};
use crate::matrix::SparseBoolMatrix;

/// Closed path-length window `[d_low, d_up]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Window {
    d_low: u32,
    d_up: u32,
}

impl Window {
    /// Fails with `Config` if `d_low > d_up`
    pub fn new(d_low: u32, d_up: u32) -> Result<Self> {
        if d_low > d_up {
            return Err(Error::config(format!(
                "window lower bound {d_low} exceeds upper bound {d_up}"
            )));
        }
        Ok(Self { d_low, d_up })
    }

    #[inline]
    pub fn d_low(&self) -> u32 {
        self.d_low
    }

    #[inline]
    pub fn d_up(&self) -> u32 {
        self.d_up
    }

    /// True if `len` lies in `[d_low, d_up]`
    #[inline]
    pub fn contains(&self, len: u32) -> bool {
        self.d_low <= len && len <= self.d_up
    }

    /// True if `self` is contained in `other`
    pub fn is_within(&self, other: &Window) -> bool {
        other.d_low <= self.d_low && self.d_up <= other.d_up
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.d_low, self.d_up)
    }
}

/// Which construction strategy built (or should build) an index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Exact,
    Frontier,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Exact => write!(f, "exact"),
            StrategyKind::Frontier => write!(f, "frontier"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "exact" => Ok(StrategyKind::Exact),
            "frontier" | "heuristic" => Ok(StrategyKind::Frontier),
            other => Err(Error::config(format!(
                "unknown strategy '{other}' (expected 'exact' or 'frontier')"
            ))),
        }
    }
}

/// Output of one strategy run
#[derive(Debug)]
pub struct StrategyOutput {
    pub matrix: SparseBoolMatrix,
    /// Path-length layers actually expanded
    pub layers: u32,
    /// True if construction finished without expanding all `d_up` layers
    pub early_exit: bool,
}

/// Index construction algorithm.
///
/// Implementations must agree exactly: for the same adjacency and window the
/// returned matrices are equal.
pub trait BuildStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Build the index matrix. Runs inside `ctx`'s pool and must poll
    /// `ctx.checkpoint()` between units of work.
    fn build(
        &self,
        adjacency: &AdjacencyMatrix,
        window: Window,
        ctx: &ExecutionContext,
    ) -> Result<StrategyOutput>;
}

/// Build statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct BuildStats {
    pub n_nodes: usize,
    pub n_edges: usize,
    pub layers: u32,
    pub early_exit: bool,
    pub nnz: usize,
    pub elapsed_ms: u64,
}

/// Immutable bounded-distance reachability index (always fully built)
#[derive(Debug, Clone)]
pub struct DistanceIndex {
    matrix: SparseBoolMatrix,
    window: Window,
    strategy: StrategyKind,
    stats: BuildStats,
}

impl DistanceIndex {
    pub(crate) fn new(
        matrix: SparseBoolMatrix,
        window: Window,
        strategy: StrategyKind,
        stats: BuildStats,
    ) -> Self {
        Self {
            matrix,
            window,
            strategy,
            stats,
        }
    }

    /// Number of nodes
    pub fn n(&self) -> usize {
        self.matrix.dim()
    }

    /// Number of reachable pairs
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn matrix(&self) -> &SparseBoolMatrix {
        &self.matrix
    }

    /// Lookup `(origin, destination)`; `IndexOutOfRange` for ids `>= n`
    #[inline]
    pub fn contains(&self, origin: usize, destination: usize) -> Result<bool> {
        self.matrix.get(origin, destination)
    }
}
