use std::error::Error;
use std::io::{stdout, BufWriter};

use clap::Parser;
use common::io::write_sp_graph_to;
use evaluation::{chained_blocks, ChainSpec};

/// Emits a random chained-block graph in the recognizer's input format.
#[derive(Debug, Parser)]
struct Cli {
    /// Number of cycle blocks.
    n_cycles: usize,
    /// Length of each cycle.
    cycle_len: usize,
    /// Number of clique blocks.
    n_cliques: usize,
    /// Size of each clique.
    clique_size: usize,
    /// Number of theta gadgets.
    n_theta: usize,
    /// Seed for deterministic output; random when absent.
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let spec = ChainSpec {
        n_cycles: cli.n_cycles,
        cycle_len: cli.cycle_len,
        n_cliques: cli.n_cliques,
        clique_size: cli.clique_size,
        n_theta: cli.n_theta,
    };
    let seed = cli.seed.unwrap_or_else(rand::random);
    let graph = chained_blocks(spec, seed);

    let mut out = BufWriter::new(stdout().lock());
    write_sp_graph_to(&mut out, &graph)?;
    Ok(())
}
