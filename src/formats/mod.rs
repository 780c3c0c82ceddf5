//! Graph input formats
//!
//! - `txt`: vertex count, then one adjacency line per vertex ending with its label
//! - `gfa`: GFA 1 segments (`S`) and links (`L`)
//!
//! Both produce a [`Graph`] with dense ids and per-node sequence lengths.

pub mod gfa;
pub mod txt;

use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::error::{Error, Result};
use crate::graph::Graph;

/// Supported graph file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    Txt,
    Gfa,
}

impl FromStr for GraphFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "txt" => Ok(GraphFormat::Txt),
            "gfa" => Ok(GraphFormat::Gfa),
            other => Err(Error::config(format!(
                "invalid graph format '{other}' (expected 'txt' or 'gfa')"
            ))),
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphFormat::Txt => write!(f, "txt"),
            GraphFormat::Gfa => write!(f, "gfa"),
        }
    }
}

/// Load and validate a graph file
pub fn load_graph<P: AsRef<Path>>(path: P, format: GraphFormat) -> Result<Graph> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let graph = match format {
        GraphFormat::Txt => txt::read_txt(reader)?,
        GraphFormat::Gfa => gfa::read_gfa(reader)?,
    };
    graph.validate()?;

    info!(
        path = %path.display(),
        %format,
        nodes = graph.n(),
        edges = graph.n_edges(),
        "graph loaded"
    );
    Ok(graph)
}
