//! Run configuration
//!
//! Everything the pipeline needs, validated once: a `RunConfig` that exists
//! has a well-formed window and a known graph format.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::formats::GraphFormat;
use crate::graph::Metric;
use crate::index::{StrategyKind, Window};

/// Strategy requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyChoice {
    /// Let the density policy decide
    #[default]
    Auto,
    Exact,
    Frontier,
}

impl StrategyChoice {
    pub fn fixed(self) -> Option<StrategyKind> {
        match self {
            StrategyChoice::Auto => None,
            StrategyChoice::Exact => Some(StrategyKind::Exact),
            StrategyChoice::Frontier => Some(StrategyKind::Frontier),
        }
    }
}

impl FromStr for StrategyChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "auto" {
            return Ok(StrategyChoice::Auto);
        }
        Ok(match s.parse::<StrategyKind>()? {
            StrategyKind::Exact => StrategyChoice::Exact,
            StrategyKind::Frontier => StrategyChoice::Frontier,
        })
    }
}

impl fmt::Display for StrategyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyChoice::Auto => write!(f, "auto"),
            StrategyChoice::Exact => write!(f, "exact"),
            StrategyChoice::Frontier => write!(f, "frontier"),
        }
    }
}

/// Validated pipeline configuration
#[derive(Debug, Clone, Serialize)]
pub struct RunConfig {
    pub graphfile: PathBuf,
    pub format: GraphFormat,
    pub metric: Metric,
    pub window: Window,
    pub query_count: usize,
    pub seed: u64,
    /// Worker threads; 0 = one per logical CPU
    pub threads: usize,
    pub strategy: StrategyChoice,
}

impl RunConfig {
    /// Config with defaults for everything but the graph and the window
    pub fn new(graphfile: impl Into<PathBuf>, format: &str, d_low: u32, d_up: u32) -> Result<Self> {
        Ok(Self {
            graphfile: graphfile.into(),
            format: format.parse()?,
            metric: Metric::default(),
            window: Window::new(d_low, d_up)?,
            query_count: 0,
            seed: 0,
            threads: 0,
            strategy: StrategyChoice::default(),
        })
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_queries(mut self, count: usize, seed: u64) -> Self {
        self.query_count = count;
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_strategy(mut self, strategy: StrategyChoice) -> Self {
        self.strategy = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates() {
        let cfg = RunConfig::new("g.txt", "txt", 2, 5).unwrap();
        assert_eq!(cfg.window, Window::new(2, 5).unwrap());
        assert_eq!(cfg.format, GraphFormat::Txt);
        assert_eq!(cfg.strategy, StrategyChoice::Auto);

        assert!(matches!(RunConfig::new("g.txt", "txt", 6, 5), Err(Error::Config(_))));
        assert!(matches!(RunConfig::new("g.vg", "proto", 0, 5), Err(Error::Config(_))));
    }

    #[test]
    fn test_strategy_choice() {
        assert_eq!("auto".parse::<StrategyChoice>().unwrap(), StrategyChoice::Auto);
        assert_eq!("exact".parse::<StrategyChoice>().unwrap().fixed(), Some(StrategyKind::Exact));
        assert_eq!(
            "frontier".parse::<StrategyChoice>().unwrap().fixed(),
            Some(StrategyKind::Frontier)
        );
        assert!("fast".parse::<StrategyChoice>().is_err());
    }

    #[test]
    fn test_serializes() {
        let cfg = RunConfig::new("g.gfa", "gfa", 0, 3)
            .unwrap()
            .with_queries(10, 7)
            .with_metric(Metric::Sequence);
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["format"], "gfa");
        assert_eq!(json["metric"], "sequence");
        assert_eq!(json["window"]["d_up"], 3);
        assert_eq!(json["seed"], 7);
    }
}
