//! Random test-graph construction for the series-parallel recognizer.
//!
//! Graphs are built from cycle blocks, clique blocks, and theta gadgets
//! chained at shared cut vertices, so their block-tree is a path. Cycles keep
//! the graph series-parallel; a clique on four or more vertices plants a K4
//! and a theta gadget plants a K23.

use petgraph::graph::{NodeIndex, UnGraph};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum BlockKind {
    Cycle,
    Clique,
    Theta,
}

/// Parameters of a chained-block graph.
#[derive(Copy, Clone, Debug)]
pub struct ChainSpec {
    /// Number of cycle blocks.
    pub n_cycles: usize,
    /// Length of each cycle (at least 3).
    pub cycle_len: usize,
    /// Number of clique blocks.
    pub n_cliques: usize,
    /// Size of each clique (at least 3; 4 or more makes the graph non-SP).
    pub clique_size: usize,
    /// Number of theta gadgets (two hubs joined by three length-2 paths;
    /// any makes the graph non-SP).
    pub n_theta: usize,
}

/// Builds a random graph whose blocks form a chain, deterministic under
/// `seed`.
///
/// Consecutive blocks share a single vertex; each new block attaches at a
/// random vertex of the previous one that is not itself the previous
/// attachment point, so no vertex ends up in three blocks.
pub fn chained_blocks(spec: ChainSpec, seed: u64) -> UnGraph<(), ()> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut kinds = Vec::new();
    kinds.extend(std::iter::repeat(BlockKind::Cycle).take(spec.n_cycles));
    kinds.extend(std::iter::repeat(BlockKind::Clique).take(spec.n_cliques));
    kinds.extend(std::iter::repeat(BlockKind::Theta).take(spec.n_theta));
    kinds.shuffle(&mut rng);

    let mut graph = UnGraph::new_undirected();
    // The vertices of the previously placed block, minus its own attachment.
    let mut attachable: Vec<NodeIndex> = Vec::new();

    for kind in kinds {
        let anchor = if attachable.is_empty() {
            graph.add_node(())
        } else {
            attachable[rng.gen_range(0..attachable.len())]
        };
        attachable = match kind {
            BlockKind::Cycle => add_cycle(&mut graph, anchor, spec.cycle_len.max(3)),
            BlockKind::Clique => add_clique(&mut graph, anchor, spec.clique_size.max(3)),
            BlockKind::Theta => add_theta(&mut graph, anchor),
        };
    }

    graph
}

fn add_cycle(graph: &mut UnGraph<(), ()>, anchor: NodeIndex, len: usize) -> Vec<NodeIndex> {
    let fresh: Vec<NodeIndex> = (1..len).map(|_| graph.add_node(())).collect();
    let mut prev = anchor;
    for &v in &fresh {
        graph.add_edge(prev, v, ());
        prev = v;
    }
    graph.add_edge(prev, anchor, ());
    fresh
}

fn add_clique(graph: &mut UnGraph<(), ()>, anchor: NodeIndex, size: usize) -> Vec<NodeIndex> {
    let mut vertices = vec![anchor];
    vertices.extend((1..size).map(|_| graph.add_node(())));
    for i in 0..vertices.len() {
        for j in i + 1..vertices.len() {
            graph.add_edge(vertices[i], vertices[j], ());
        }
    }
    vertices.split_off(1)
}

fn add_theta(graph: &mut UnGraph<(), ()>, anchor: NodeIndex) -> Vec<NodeIndex> {
    let hub = graph.add_node(());
    let mut fresh = vec![hub];
    for _ in 0..3 {
        let middle = graph.add_node(());
        graph.add_edge(anchor, middle, ());
        graph.add_edge(middle, hub, ());
        fresh.push(middle);
    }
    fresh
}
