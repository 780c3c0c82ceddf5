//! CLI commands for boundreach

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use boundreach::adjacency::AdjacencyMatrix;
use boundreach::config::{RunConfig, StrategyChoice};
use boundreach::context::ExecutionContext;
use boundreach::formats::load_graph;
use boundreach::graph::Metric;
use boundreach::pipeline::{graph_for_metric, run, run_with_queries, RunReport};
use boundreach::query::Query;

#[derive(Parser)]
#[command(name = "boundreach")]
#[command(about = "Distance-bounded reachability index for sequence graphs", long_about = None)]
#[command(version = env!("BOUNDREACH_VERSION"))]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Input graph file
    #[arg(short, long)]
    pub graph: PathBuf,

    /// Graph format: txt or gfa
    #[arg(short, long, default_value = "txt")]
    pub mode: String,

    /// Path length metric: edges or sequence
    #[arg(long, default_value = "edges")]
    pub metric: String,

    /// Worker threads (0 = all logical CPUs)
    #[arg(short, long, default_value = "0")]
    pub threads: usize,
}

#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    /// Lower bound of the path length window
    #[arg(short = 'l', long)]
    pub d_low: u32,

    /// Upper bound of the path length window
    #[arg(short = 'u', long)]
    pub d_up: u32,

    /// Build strategy: auto, exact or frontier
    #[arg(long, default_value = "auto")]
    pub strategy: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the index and answer seeded random queries
    Run {
        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        window: WindowArgs,

        /// Number of random queries
        #[arg(short, long, default_value = "1000")]
        queries: usize,

        /// Seed for the query generator
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Print the full report (config, timings, results) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build the index and answer explicit node pairs
    Query {
        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        window: WindowArgs,

        /// Node pair "origin,destination" (repeatable)
        #[arg(short, long = "pair", required = true)]
        pairs: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load the graph and print adjacency statistics
    Stats {
        #[command(flatten)]
        graph: GraphArgs,
    },
}

fn parse_pair(s: &str) -> Result<Query> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        anyhow::bail!("Pair must be in format 'origin,destination', got '{}'", s);
    }
    let origin = parts[0].trim().parse::<usize>().context("Invalid origin id")?;
    let destination = parts[1].trim().parse::<usize>().context("Invalid destination id")?;
    Ok(Query::new(origin, destination))
}

fn run_config(graph: &GraphArgs, window: &WindowArgs) -> Result<RunConfig> {
    let metric: Metric = graph.metric.parse()?;
    let strategy: StrategyChoice = window.strategy.parse()?;
    let config = RunConfig::new(&graph.graph, &graph.mode, window.d_low, window.d_up)?
        .with_metric(metric)
        .with_threads(graph.threads)
        .with_strategy(strategy);
    Ok(config)
}

fn print_summary(report: &RunReport) {
    println!("Graph: {} nodes ({} indexed, metric {})",
             report.graph_nodes, report.index_nodes, report.config.metric);
    println!("Time to load graph (ms): {}", report.load_ms);
    println!("Time to build adjacency matrix (ms): {} ({} edges)",
             report.adjacency_ms, report.adjacency_edges);
    println!("Time to build index matrix (ms): {} (strategy {}, window {}, {} layers, {} pairs)",
             report.build.elapsed_ms, report.strategy, report.config.window,
             report.build.layers, report.build.nnz);
    println!("Time to execute {} queries (ms): {} ({} reachable)",
             report.results.len(), report.query_ms, report.true_count);
}

pub fn execute(command: Commands) -> Result<()> {
    match command {
        Commands::Run { graph, window, queries, seed, json } => {
            let config = run_config(&graph, &window)?.with_queries(queries, seed);
            let ctx = ExecutionContext::new(config.threads)?;
            let report = run(&config, ctx)
                .with_context(|| format!("Run failed for {}", config.graphfile.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report);
            }
        }
        Commands::Query { graph, window, pairs, json } => {
            let config = run_config(&graph, &window)?;
            let queries = pairs.iter().map(|p| parse_pair(p)).collect::<Result<Vec<_>>>()?;
            let ctx = ExecutionContext::new(config.threads)?;
            let report = run_with_queries(&config, ctx, Some(queries))
                .with_context(|| format!("Query failed for {}", config.graphfile.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report.results)?);
            } else {
                for r in &report.results {
                    println!("{}\t{}\t{}", r.origin, r.destination, r.result);
                }
            }
        }
        Commands::Stats { graph } => {
            let metric: Metric = graph.metric.parse()?;
            let format = graph.mode.parse()?;
            let start = Instant::now();
            let loaded = load_graph(&graph.graph, format)
                .with_context(|| format!("Failed to load {}", graph.graph.display()))?;
            let n_loaded = loaded.n();
            let indexed = graph_for_metric(loaded, metric)?;
            let adjacency = AdjacencyMatrix::from_graph(&indexed)?;

            println!("Nodes (loaded): {}", n_loaded);
            println!("Nodes (metric {}): {}", metric, adjacency.n());
            println!("Edges: {}", adjacency.n_edges());
            println!("Avg out-degree: {:.3}", adjacency.avg_out_degree());
            println!("Max out-degree: {}", adjacency.max_out_degree());
            println!("Density: {:.3e}", adjacency.density());
            println!("Elapsed (ms): {}", start.elapsed().as_millis());
        }
    }

    Ok(())
}
