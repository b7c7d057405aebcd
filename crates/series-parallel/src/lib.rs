//! This is a library to recognize [series-parallel graphs](https://en.wikipedia.org/wiki/Series%E2%80%93parallel_graph)
//! in linear time, producing a machine-checkable certificate either way.
//!
//! A graph is series-parallel exactly if it is free of K4 as a topological
//! minor. A positive certificate is a binary decomposition tree rebuilding
//! the graph through series, parallel and antiparallel compositions of its
//! edges; a negative certificate is a forbidden-structure witness: a K4 or
//! K23 subdivision, a theta-four configuration across cut vertices, or a
//! block-tree obstruction. Every certificate can be re-checked against the
//! input graph independently of how it was produced.
//!
//! # Examples
//!
//! A triangle is series-parallel.
//! ```rust
//! # use std::error::Error;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use petgraph::graph::UnGraph;
//! use series_parallel::{recognize, Graph};
//!
//! let graph = Graph::from_petgraph(&UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0)]));
//! let mut result = recognize(&graph)?;
//!
//! assert!(result.is_sp);
//! assert!(result.authenticate(&graph));
//! # Ok(())
//! # }
//! ```
//!
//! K4 itself is the smallest graph that is not.
//! ```rust
//! # use std::error::Error;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use series_parallel::{recognize, Certificate, Graph};
//!
//! let mut graph = Graph::with_vertices(4);
//! for (u, v) in [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)] {
//!     graph.add_edge(u, v);
//! }
//! let mut result = recognize(&graph)?;
//!
//! assert!(!result.is_sp);
//! assert!(matches!(result.certificate, Some(Certificate::K4(_))));
//! assert!(result.authenticate(&graph));
//! # Ok(())
//! # }
//! ```
//!
//! # References
//! + \[Duf65\]: R. J. Duffin. "Topology of Series-Parallel Networks". <https://doi.org/10.1016/0022-247X(65)90125-3>.
//! + \[VTL82\]: Jacobo Valdes, Robert E. Tarjan, and Eugene L. Lawler. "The
//!   Recognition of Series Parallel Digraphs". <https://doi.org/10.1137/0211023>.

#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod blocks;
mod certificate;
mod engine;
mod graph;
mod sp_tree;

use std::fmt::{Display, Formatter};

use tracing::instrument;

pub use certificate::Certificate;
pub use certificate::K23Subdivision;
pub use certificate::K4Subdivision;
pub use certificate::SpCertificate;
pub use certificate::SpResult;
pub use certificate::ThetaFour;
pub use certificate::ThreeComponentCut;
pub use certificate::ThreeCutBlock;
pub use graph::Edge;
pub use graph::Graph;
pub use sp_tree::Composition;
pub use sp_tree::SpTree;

/// Decides whether `graph` is series-parallel and returns the verdict with a
/// certificate justifying it.
///
/// Runs in time linear in the number of vertices and edges. Only the part of
/// the graph reachable from vertex 0 takes part in the analysis.
///
/// # Errors
///
/// Returns a `NullGraphError` if the input graph does not contain any nodes.
#[instrument(skip_all)]
pub fn recognize(graph: &Graph) -> Result<SpResult, NullGraphError> {
    if graph.vertex_count() == 0 {
        return Err(NullGraphError);
    }
    let result = match blocks::block_chain(graph) {
        Ok(chain) => engine::recognize_blocks(graph, chain),
        Err(cert) => SpResult { is_sp: false, certificate: Some(cert) },
    };
    Ok(result)
}

/// A graph does not contain any nodes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NullGraphError;

impl Display for NullGraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("graph does not contain any nodes")
    }
}

impl std::error::Error for NullGraphError {}
