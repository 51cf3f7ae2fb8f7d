//! phylocheck CLI entry point

use clap::{Parser, Subcommand};
use phylo_harness::Scenario;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "phylocheck")]
#[command(about = "Checks for a phylogenetic tree-search program and its graph layer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two files line by line, ignoring line endings
    Compare {
        first: PathBuf,
        second: PathBuf,
    },
    /// Run the end-to-end scenarios against the search program
    Run {
        /// Harness config file (defaults to ./phylocheck.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Run only this scenario (search or sampling)
        #[arg(short, long)]
        scenario: Option<Scenario>,

        /// Override the per-run timeout, in seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load a JSON graph document and print its adjacency and flow
    Graph {
        document: PathBuf,

        /// Source node name for the max-flow query
        #[arg(long, requires = "sink")]
        source: Option<String>,

        /// Sink node name for the max-flow query
        #[arg(long, requires = "source")]
        sink: Option<String>,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "phylocheck={0},phylo_graph={0},phylo_harness={0}",
            log_level
        )))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Compare { first, second } => commands::compare(&first, &second),
        Commands::Run {
            config,
            scenario,
            timeout,
            json,
        } => commands::run(config, scenario, timeout, json).await,
        Commands::Graph {
            document,
            source,
            sink,
        } => commands::graph(&document, source.zip(sink)),
        Commands::Version => {
            println!("phylocheck v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
