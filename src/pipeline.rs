//! End-to-end run: load → adjacency → index → queries
//!
//! This is what the binary drives. Each phase is timed and logged; the
//! returned [`RunReport`] carries the timings and the ordered query results.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::adjacency::AdjacencyMatrix;
use crate::config::RunConfig;
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::formats::load_graph;
use crate::graph::{Graph, Metric};
use crate::index::{BuildStats, DistanceIndex, DistanceIndexBuilder, FixedPolicy, StrategyKind};
use crate::query::{Query, QueryEngine, QueryResult};
use crate::workload::QueryGenerator;

/// Timings and results of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub config: RunConfig,
    /// Nodes in the loaded graph
    pub graph_nodes: usize,
    /// Nodes the index is built on (differs under the sequence metric)
    pub index_nodes: usize,
    pub adjacency_edges: usize,
    pub load_ms: u64,
    pub adjacency_ms: u64,
    pub strategy: StrategyKind,
    pub build: BuildStats,
    pub query_ms: u64,
    pub true_count: usize,
    pub results: Vec<QueryResult>,
}

/// Graph the index is built on for `metric`
pub fn graph_for_metric(graph: Graph, metric: Metric) -> Result<Graph> {
    match metric {
        Metric::Edges => Ok(graph),
        Metric::Sequence => Ok(graph.expand_by_weight()?.into_graph()),
    }
}

/// Builder configured from `config` on `ctx`
pub fn index_builder(config: &RunConfig, ctx: ExecutionContext) -> DistanceIndexBuilder {
    let builder = DistanceIndexBuilder::new(ctx);
    match config.strategy.fixed() {
        Some(kind) => builder.with_policy(FixedPolicy(kind)),
        None => builder,
    }
}

/// Load, build the index and answer explicit queries
pub fn run_with_queries(
    config: &RunConfig,
    ctx: ExecutionContext,
    queries: Option<Vec<Query>>,
) -> Result<RunReport> {
    let load_start = Instant::now();
    let loaded = load_graph(&config.graphfile, config.format)?;
    let graph_nodes = loaded.n();
    let graph = graph_for_metric(loaded, config.metric)?;
    let load_ms = load_start.elapsed().as_millis() as u64;

    let adj_start = Instant::now();
    let adjacency = AdjacencyMatrix::from_graph(&graph)?;
    let adjacency_ms = adj_start.elapsed().as_millis() as u64;
    info!(
        nodes = adjacency.n(),
        edges = adjacency.n_edges(),
        elapsed_ms = adjacency_ms,
        "adjacency matrix ready"
    );
    drop(graph);

    let index: Arc<DistanceIndex> =
        Arc::new(index_builder(config, ctx.clone()).build(&adjacency, config.window)?);

    let queries = match queries {
        Some(queries) => queries,
        None if config.query_count == 0 => Vec::new(),
        None => QueryGenerator::new(index.n(), config.seed)?.generate(config.query_count),
    };

    let engine = QueryEngine::new(Arc::clone(&index));
    let query_start = Instant::now();
    let results = ctx.install(|| engine.answer_batch(&queries))?;
    let query_ms = query_start.elapsed().as_millis() as u64;
    let true_count = QueryEngine::count_true(&results);
    info!(
        queries = results.len(),
        reachable = true_count,
        elapsed_ms = query_ms,
        "queries answered"
    );

    Ok(RunReport {
        config: config.clone(),
        graph_nodes,
        index_nodes: index.n(),
        adjacency_edges: adjacency.n_edges(),
        load_ms,
        adjacency_ms,
        strategy: index.strategy(),
        build: index.stats().clone(),
        query_ms,
        true_count,
        results,
    })
}

/// Load, build the index and answer `config.query_count` random queries
pub fn run(config: &RunConfig, ctx: ExecutionContext) -> Result<RunReport> {
    run_with_queries(config, ctx, None)
}
