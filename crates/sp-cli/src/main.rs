use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use common::io::read_sp_graph;
use series_parallel::{recognize, Certificate, Graph};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

/// Decides whether a graph is series-parallel and authenticates the
/// certificate either way.
#[derive(Debug, Parser)]
struct Cli {
    /// Path to the input graph file: two counts `n e`, then `e` vertex pairs.
    input: PathBuf,
    /// Diagnostic verbosity; silent when absent.
    #[arg(long)]
    log_level: Option<Level>,
}

fn run(cli: Cli) -> Result<bool, Box<dyn Error>> {
    let graph = read_sp_graph(&cli.input)?;
    if graph.node_count() == 0 {
        return Err("graph must have at least one vertex".into());
    }
    let graph = Graph::from_petgraph(&graph);

    println!("Read graph with {} vertices and {} edges\n", graph.vertex_count(), graph.edge_count());

    let mut result = recognize(&graph)?;

    println!("=== Series-Parallel Recognition Results ===");
    if result.is_sp {
        println!("The graph IS Series-Parallel.");
    } else {
        println!("The graph is NOT Series-Parallel.");
    }
    match &result.certificate {
        Some(cert @ Certificate::SeriesParallel(_)) => println!("{cert}"),
        Some(cert) => println!("Reason: {cert}"),
        None => {
            eprintln!("ERROR: No certificate generated");
            return Ok(false);
        }
    }

    println!("\n=== Certificate Authentication ===");
    if !result.authenticate(&graph) {
        eprintln!("ERROR: Certificate authentication failed!");
        return Ok(false);
    }
    println!("Certificate authenticated successfully.");
    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(level) = cli.log_level {
        let subscriber = FmtSubscriber::builder().with_max_level(level).with_span_events(FmtSpan::CLOSE).finish();
        subscriber.init();
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
