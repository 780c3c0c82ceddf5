//! # Boundreach CLI
//!
//! Loads a sequence graph, builds the distance-bounded reachability index for
//! a window `[d_low, d_up]` and answers reachability queries against it.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;

fn init_logging(verbose: bool, json: bool) {
    let default = if verbose { "boundreach=debug" } else { "boundreach=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    if let Err(e) = cli::execute(cli.command) {
        tracing::error!("{e:#}");
        eprintln!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}
