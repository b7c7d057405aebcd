use petgraph::visit::{GraphProp, IntoNeighbors, NodeCompactIndexable};
use petgraph::Undirected;

/// An edge as a pair of vertex ids. Witness paths are sequences of these.
pub type Edge = (usize, usize);

/// Sentinel for "no vertex" in index arrays.
pub(crate) const NO_VERTEX: usize = usize::MAX;

/// An undirected simple graph over vertex ids `0..n`.
///
/// Adjacency sequences preserve insertion order and list every edge once per
/// endpoint. The recognizer and the certificate authenticator both work
/// directly on this representation.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    n: usize,
    e: usize,
    adj: Vec<Vec<usize>>,
}

impl Graph {
    /// Creates a graph with `n` vertices and no edges.
    pub fn with_vertices(n: usize) -> Self {
        Self { n, e: 0, adj: vec![Vec::new(); n] }
    }

    /// Copies a compact undirected petgraph structure.
    pub fn from_petgraph<G>(graph: G) -> Self
    where
        G: NodeCompactIndexable + IntoNeighbors + GraphProp<EdgeType = Undirected>,
    {
        let n = graph.node_bound();
        let mut g = Self::with_vertices(n);
        for u in 0..n {
            for v in graph.neighbors(graph.from_index(u)) {
                let v = graph.to_index(v);
                if u < v {
                    g.add_edge(u, v);
                }
            }
        }
        g
    }

    /// The number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// The number of edges.
    pub fn edge_count(&self) -> usize {
        self.e
    }

    /// The neighbors of `u` in insertion order.
    pub fn neighbors(&self, u: usize) -> &[usize] {
        &self.adj[u]
    }

    /// Whether `{u, v}` is an edge. False for out-of-range arguments.
    pub fn adjacent(&self, u: usize, v: usize) -> bool {
        if u >= self.n || v >= self.n {
            return false;
        }
        self.adj[u].iter().any(|&w| w == v)
    }

    /// Appends the edge `{u, v}` to both adjacency sequences.
    ///
    /// Panics if an endpoint is out of range. Simplicity is not enforced;
    /// parsers are expected to hand over simple graphs only.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.adj[u].push(v);
        self.adj[v].push(u);
        self.e += 1;
    }
}

#[cfg(test)]
mod test {
    use super::Graph;
    use petgraph::graph::UnGraph;

    #[test]
    fn adjacency_is_symmetric_and_ordered() {
        let mut g = Graph::with_vertices(4);
        g.add_edge(0, 2);
        g.add_edge(0, 1);
        g.add_edge(3, 0);
        assert_eq!(g.neighbors(0), [2, 1, 3]);
        assert_eq!(g.neighbors(3), [0]);
        assert!(g.adjacent(0, 3) && g.adjacent(3, 0));
        assert!(!g.adjacent(1, 2));
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn adjacent_rejects_out_of_range() {
        let g = Graph::with_vertices(2);
        assert!(!g.adjacent(0, 2));
        assert!(!g.adjacent(usize::MAX, 0));
    }

    #[test]
    fn from_petgraph_copies_every_edge_once() {
        let pg = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0)]);
        let g = Graph::from_petgraph(&pg);
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
        for (u, v) in [(0, 1), (1, 2), (2, 0)] {
            assert!(g.adjacent(u, v));
        }
    }
}
