use std::fmt::{Display, Formatter};

use tracing::{debug, info, instrument};

use crate::graph::{Edge, Graph, NO_VERTEX};
use crate::sp_tree::{Composition, SpTree};

/// The outcome of a recognition run: the verdict plus the certificate that
/// justifies it.
///
/// A missing certificate only happens for degenerate inputs that produce no
/// blocks (no edges reachable from vertex 0); authentication then fails.
#[derive(Debug)]
pub struct SpResult {
    /// Whether the graph was recognized as series-parallel.
    pub is_sp: bool,
    /// The witness justifying the verdict.
    pub certificate: Option<Certificate>,
}

impl SpResult {
    /// Re-checks the certificate against `g`. See [Certificate::authenticate].
    pub fn authenticate(&mut self, g: &Graph) -> bool {
        match &mut self.certificate {
            Some(cert) => cert.authenticate(g),
            None => {
                info!("no certificate to authenticate");
                false
            }
        }
    }
}

/// A machine-checkable witness for a recognition verdict.
///
/// The set of witness kinds is closed, so certificates are a tagged union
/// with one authenticator per variant rather than a trait object.
#[derive(Debug)]
pub enum Certificate {
    /// The graph is series-parallel; carries the decomposition tree.
    SeriesParallel(SpCertificate),
    /// A subdivision of the complete graph on four vertices.
    K4(K4Subdivision),
    /// A subdivision of the complete bipartite graph K(2,3).
    K23(K23Subdivision),
    /// A theta-four configuration across cut vertices.
    T4(ThetaFour),
    /// A cut vertex whose removal leaves three or more components.
    ThreeComponentCut(ThreeComponentCut),
    /// A biconnected component containing three cut vertices.
    ThreeCutBlock(ThreeCutBlock),
}

impl Certificate {
    /// Verifies the witness against `g`, independently of how it was
    /// produced. The outcome is memoized, so repeated calls are cheap and
    /// yield the same verdict.
    #[instrument(skip_all)]
    pub fn authenticate(&mut self, g: &Graph) -> bool {
        match self {
            Certificate::SeriesParallel(c) => c.authenticate(g),
            Certificate::K4(c) => c.authenticate(g),
            Certificate::K23(c) => c.authenticate(g),
            Certificate::T4(c) => c.authenticate(g),
            Certificate::ThreeComponentCut(c) => c.authenticate(g),
            Certificate::ThreeCutBlock(c) => c.authenticate(g),
        }
    }
}

impl Display for Certificate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Certificate::SeriesParallel(c) => match (c.decomposition.source(), c.decomposition.sink()) {
                (Some(source), Some(sink)) => {
                    write!(f, "SP decomposition tree root: {{{source},{sink}}}")
                }
                _ => write!(f, "empty SP decomposition (trivial)"),
            },
            Certificate::K4(c) => {
                write!(f, "K4 subdivision on vertices {{{},{},{},{}}}", c.a, c.b, c.c, c.d)
            }
            Certificate::K23(c) => {
                write!(f, "K23 subdivision between vertices {{{},{}}}", c.a, c.b)
            }
            Certificate::T4(c) => {
                write!(
                    f,
                    "T4 (theta-4) subdivision with cut vertices {},{} and terminals {},{}",
                    c.c1, c.c2, c.a, c.b
                )
            }
            Certificate::ThreeComponentCut(c) => {
                write!(f, "cut vertex {} splits the graph into >=3 components", c.v)
            }
            Certificate::ThreeCutBlock(c) => {
                write!(f, "biconnected component with 3 cut vertices {{{},{},{}}}", c.c1, c.c2, c.c3)
            }
        }
    }
}

/// A positive certificate: an SP decomposition tree that rebuilds the graph.
#[derive(Debug)]
pub struct SpCertificate {
    /// The decomposition tree. Leaves are graph edges; internal nodes are
    /// series, parallel, or antiparallel compositions, plus dangling nodes
    /// where a cut vertex attaches another block's finished tree.
    pub decomposition: SpTree,
    verified: bool,
}

impl SpCertificate {
    pub(crate) fn new(decomposition: SpTree) -> Self {
        Self { decomposition, verified: false }
    }

    /// Walks the decomposition tree, validating the endpoint-matching rules
    /// of every composition node, rebuilding a graph from the leaves, and
    /// comparing its adjacency sequences with `g`'s as multisets.
    pub fn authenticate(&mut self, g: &Graph) -> bool {
        if self.verified {
            return true;
        }
        let n = g.vertex_count();
        let Some(root) = self.decomposition.root() else {
            info!("authentication failed: decomposition tree does not exist");
            return false;
        };

        let mut n_src = vec![0i64; n];
        let mut n_sink = vec![0i64; n];
        let mut no_edge = vec![false; n];
        let mut swapped = false;
        let mut rebuilt = Graph::with_vertices(n);

        // Two-phase descent with an explicit stack; the tree can be as tall
        // as the longest ear path. `swapped` flips for the right child of an
        // antiparallel node and back once that subtree is done.
        let mut hist = vec![(root, 0u8)];
        while let Some(&(curr, state)) = hist.last() {
            let source = if swapped { curr.sink } else { curr.source };
            let sink = if swapped { curr.source } else { curr.sink };
            match state {
                0 => match (curr.left.as_deref(), curr.right.as_deref()) {
                    (None, None) => {
                        if curr.comp != Composition::Edge {
                            info!("authentication failed: leaf node is not an edge");
                            return false;
                        }
                        if source >= n || sink >= n {
                            info!("authentication failed: edge endpoint out of range");
                            return false;
                        }
                        if no_edge[source] || no_edge[sink] {
                            info!("authentication failed: edge incident on an already merged vertex");
                            return false;
                        }
                        rebuilt.add_edge(source, sink);
                        n_src[source] += 1;
                        n_sink[sink] += 1;
                        hist.pop();
                    }
                    (Some(_), Some(right)) => {
                        if curr.comp == Composition::Antiparallel {
                            swapped = !swapped;
                        }
                        hist.last_mut().unwrap().1 = 1;
                        hist.push((right, 0));
                    }
                    _ => {
                        info!("authentication failed: node has exactly one child");
                        return false;
                    }
                },
                1 => {
                    if curr.comp == Composition::Antiparallel {
                        swapped = !swapped;
                    }
                    let left = curr.left.as_deref().unwrap();
                    hist.last_mut().unwrap().1 = 2;
                    hist.push((left, 0));
                }
                _ => {
                    if source >= n || sink >= n {
                        info!("authentication failed: node endpoint out of range");
                        return false;
                    }
                    let left = curr.left.as_deref().unwrap();
                    let right = curr.right.as_deref().unwrap();
                    let lsource = if swapped { right.sink } else { left.source };
                    let lsink = if swapped { right.source } else { left.sink };
                    let rsource = if swapped { left.sink } else { right.source };
                    let rsink = if swapped { left.source } else { right.sink };

                    match curr.comp {
                        Composition::Edge => {
                            info!("authentication failed: internal node marked as an edge");
                            return false;
                        }
                        Composition::Series => {
                            if lsource != source || rsink != sink || lsink != rsource {
                                info!("authentication failed: series children endpoint mismatch");
                                return false;
                            }
                            if lsink >= n || n_src[lsink] != 1 || n_sink[lsink] != 1 {
                                info!(
                                    middle = lsink,
                                    "authentication failed: series middle vertex has other incident subgraphs"
                                );
                                return false;
                            }
                            no_edge[lsink] = true;
                            n_src[lsink] -= 1;
                            n_sink[lsink] -= 1;
                        }
                        Composition::Parallel => {
                            if lsource != source || rsource != source || lsink != sink || rsink != sink {
                                info!("authentication failed: parallel children endpoint mismatch");
                                return false;
                            }
                            n_src[source] -= 1;
                            n_sink[sink] -= 1;
                        }
                        Composition::Antiparallel => {
                            let ok = if swapped {
                                lsource == sink && rsource == source && lsink == source && rsink == sink
                            } else {
                                lsource == source && rsource == sink && lsink == sink && rsink == source
                            };
                            if !ok {
                                info!("authentication failed: antiparallel children endpoint mismatch");
                                return false;
                            }
                            n_src[source] -= 1;
                            n_sink[sink] -= 1;
                        }
                        Composition::Dangling => {
                            // The right child is a finished component of its
                            // own, attached to the left child's source; its
                            // terminal pair is absorbed here.
                            let (leff_source, leff_sink) =
                                if swapped { (left.sink, left.source) } else { (left.source, left.sink) };
                            // The attachment point is the raw shared vertex;
                            // the absorbed counters follow the orientation the
                            // component was traversed under.
                            let (reff_source, reff_sink) =
                                if swapped { (right.sink, right.source) } else { (right.source, right.sink) };
                            if leff_source != source || leff_sink != sink || right.source != left.source {
                                info!("authentication failed: dangling attachment endpoint mismatch");
                                return false;
                            }
                            if reff_source >= n || reff_sink >= n {
                                info!("authentication failed: dangling component endpoint out of range");
                                return false;
                            }
                            n_src[reff_source] -= 1;
                            n_sink[reff_sink] -= 1;
                        }
                    }
                    hist.pop();
                }
            }
        }

        debug!("decomposition tree well-formed");
        if root.source >= n || root.sink >= n {
            return false;
        }
        n_src[root.source] -= 1;
        n_sink[root.sink] -= 1;

        let mut connected = true;
        for v in 0..n {
            if n_src[v] != 0 {
                debug!(vertex = v, "disconnected SP subgraph sourced here");
                connected = false;
            }
            if n_sink[v] != 0 {
                debug!(vertex = v, "disconnected SP subgraph sinked here");
                connected = false;
            }
        }
        if !connected {
            info!("authentication failed: decomposition contains disconnected SP subgraphs");
            return false;
        }
        debug!("decomposition tree connected");

        for v in 0..n {
            let mut expected = g.neighbors(v).to_vec();
            let mut actual = rebuilt.neighbors(v).to_vec();
            radix_sort(&mut expected);
            radix_sort(&mut actual);
            if expected != actual {
                info!(vertex = v, "authentication failed: rebuilt adjacency differs");
                return false;
            }
        }

        debug!("decomposition tree rebuilds a graph identical to the input");
        self.verified = true;
        true
    }
}

/// Four distinct branch vertices and the six internally disjoint paths of a
/// K4 subdivision.
#[derive(Debug, Default)]
#[allow(missing_docs)]
pub struct K4Subdivision {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub d: usize,
    pub ab: Vec<Edge>,
    pub ac: Vec<Edge>,
    pub ad: Vec<Edge>,
    pub bc: Vec<Edge>,
    pub bd: Vec<Edge>,
    pub cd: Vec<Edge>,
    verified: bool,
}

impl K4Subdivision {
    pub(crate) fn new(a: usize, b: usize, c: usize, d: usize) -> Self {
        Self { a, b, c, d, ..Self::default() }
    }

    /// Checks that the six paths are internally disjoint simple paths of the
    /// graph between four distinct branch vertices.
    pub fn authenticate(&mut self, g: &Graph) -> bool {
        if self.verified {
            return true;
        }
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        debug!(a, b, c, d, "authenticating K4 subdivision");
        if a == b || b == c || c == d || d == a || a == c || b == d {
            info!("authentication failed: branch vertices not distinct");
            return false;
        }
        let mut seen = vec![false; g.vertex_count()];
        trace_path(a, b, &self.ab, g, &mut seen)
            && trace_path(a, c, &self.ac, g, &mut seen)
            && trace_path(a, d, &self.ad, g, &mut seen)
            && trace_path(b, c, &self.bc, g, &mut seen)
            && trace_path(b, d, &self.bd, g, &mut seen)
            && trace_path(c, d, &self.cd, g, &mut seen)
            && {
                self.verified = true;
                true
            }
    }
}

/// Two distinct hubs and three internally disjoint paths of length at least
/// two between them.
#[derive(Debug, Default)]
#[allow(missing_docs)]
pub struct K23Subdivision {
    pub a: usize,
    pub b: usize,
    pub one: Vec<Edge>,
    pub two: Vec<Edge>,
    pub three: Vec<Edge>,
    verified: bool,
}

impl K23Subdivision {
    pub(crate) fn new(a: usize, b: usize) -> Self {
        Self { a, b, ..Self::default() }
    }

    /// Checks three internally disjoint hub-to-hub paths, each with at least
    /// one interior vertex.
    pub fn authenticate(&mut self, g: &Graph) -> bool {
        if self.verified {
            return true;
        }
        let (a, b) = (self.a, self.b);
        debug!(a, b, "authenticating K23 subdivision");
        if a == b {
            info!("authentication failed: hubs not distinct");
            return false;
        }
        let mut seen = vec![false; g.vertex_count()];
        for path in [&self.one, &self.two, &self.three] {
            if !trace_path(a, b, path, g, &mut seen) {
                return false;
            }
            if path.len() < 2 {
                info!("authentication failed: path has no internal vertex");
                return false;
            }
        }
        self.verified = true;
        true
    }
}

/// Two cut vertices `c1`, `c2` and two terminals `a`, `b` realising a
/// theta-four obstruction through five internally disjoint paths.
#[derive(Debug, Default)]
#[allow(missing_docs)]
pub struct ThetaFour {
    pub c1: usize,
    pub c2: usize,
    pub a: usize,
    pub b: usize,
    pub c1a: Vec<Edge>,
    pub c2a: Vec<Edge>,
    pub ab: Vec<Edge>,
    pub c1b: Vec<Edge>,
    pub c2b: Vec<Edge>,
    pub(crate) verified: bool,
}

impl ThetaFour {
    /// Checks that `c1` and `c2` are cut vertices and the five paths are
    /// internally disjoint simple paths of the graph.
    pub fn authenticate(&mut self, g: &Graph) -> bool {
        if self.verified {
            return true;
        }
        let (c1, c2, a, b) = (self.c1, self.c2, self.a, self.b);
        debug!(c1, c2, a, b, "authenticating theta-four");
        if a == b || a == c1 || a == c2 || b == c1 || b == c2 || c1 == c2 {
            info!("authentication failed: vertices not distinct");
            return false;
        }
        if !is_cut_vertex(g, c1) || !is_cut_vertex(g, c2) {
            return false;
        }
        let mut seen = vec![false; g.vertex_count()];
        trace_path(c1, a, &self.c1a, g, &mut seen)
            && trace_path(c2, a, &self.c2a, g, &mut seen)
            && trace_path(a, b, &self.ab, g, &mut seen)
            && trace_path(c1, b, &self.c1b, g, &mut seen)
            && trace_path(c2, b, &self.c2b, g, &mut seen)
            && {
                self.verified = true;
                true
            }
    }
}

/// A cut vertex lying in three or more blocks.
#[derive(Debug)]
pub struct ThreeComponentCut {
    /// The cut vertex whose removal leaves at least three components.
    pub v: usize,
    verified: bool,
}

impl ThreeComponentCut {
    pub(crate) fn new(v: usize) -> Self {
        Self { v, verified: false }
    }

    /// Counts the components left after removing `v`.
    pub fn authenticate(&mut self, g: &Graph) -> bool {
        if self.verified {
            return true;
        }
        debug!(v = self.v, "authenticating three-component cut vertex");
        let comps = num_comps_after_removal(g, self.v);
        if comps < 3 {
            info!(comps, "authentication failed: removal leaves too few components");
            return false;
        }
        self.verified = true;
        true
    }
}

/// Three cut vertices lying in a single biconnected component.
#[derive(Debug)]
#[allow(missing_docs)]
pub struct ThreeCutBlock {
    pub c1: usize,
    pub c2: usize,
    pub c3: usize,
    verified: bool,
}

impl ThreeCutBlock {
    pub(crate) fn new(c1: usize, c2: usize, c3: usize) -> Self {
        Self { c1, c2, c3, verified: false }
    }

    /// Checks the cut-vertex property of all three vertices and their joint
    /// membership in one biconnected component.
    pub fn authenticate(&mut self, g: &Graph) -> bool {
        if self.verified {
            return true;
        }
        debug!(c1 = self.c1, c2 = self.c2, c3 = self.c3, "authenticating block with three cut vertices");
        if !is_cut_vertex(g, self.c1) || !is_cut_vertex(g, self.c2) || !is_cut_vertex(g, self.c3) {
            return false;
        }

        // Re-run a block-finding search and look for one component whose edge
        // set touches all three vertices.
        let n = g.vertex_count();
        if n == 0 {
            return false;
        }
        let cut3 = [self.c1, self.c2, self.c3];
        let mut dfs_no = vec![0usize; n];
        let mut parent = vec![NO_VERTEX; n];
        let mut low = vec![0usize; n];
        let mut comp_edges: Vec<Edge> = Vec::new();

        let mut dfs = vec![(0usize, 0usize)];
        dfs_no[0] = 1;
        low[0] = 1;
        let mut curr_dfs = 2;

        while let Some(&(w, idx)) = dfs.last() {
            if idx >= g.neighbors(w).len() {
                dfs.pop();
                continue;
            }
            let u = g.neighbors(w)[idx];

            if dfs_no[u] == 0 {
                comp_edges.push((w, u));
                parent[u] = w;
                dfs_no[u] = curr_dfs;
                curr_dfs += 1;
                low[u] = dfs_no[u];
                dfs.push((u, 0));
                continue;
            }

            if parent[u] == w {
                if low[u] >= dfs_no[w] {
                    let mut touched = [false; 3];
                    while let Some(e) = comp_edges.pop() {
                        for (i, &cv) in cut3.iter().enumerate() {
                            if e.0 == cv || e.1 == cv {
                                touched[i] = true;
                            }
                        }
                        if e == (w, u) {
                            break;
                        }
                    }
                    if touched.iter().all(|&t| t) {
                        debug!("all three vertices belong to one biconnected component");
                        self.verified = true;
                        return true;
                    }
                }
                low[w] = low[w].min(low[u]);
            } else if dfs_no[u] < dfs_no[w] && u != parent[w] {
                comp_edges.push((w, u));
                low[w] = low[w].min(dfs_no[u]);
            }
            dfs.last_mut().unwrap().1 += 1;
        }

        info!("authentication failed: no block contains all three cut vertices");
        false
    }
}

/// Verifies that `path` is a simple path between `end1` and `end2` whose
/// every edge exists in `g`, and that its interior avoids everything in
/// `seen`. On success the interior is added to `seen` but the endpoints are
/// not, so other paths may share them.
fn trace_path(end1: usize, end2: usize, path: &[Edge], g: &Graph, seen: &mut [bool]) -> bool {
    if path.is_empty() {
        info!("authentication failed: no edges in path");
        return false;
    }
    let n = g.vertex_count();
    if end1 >= n || end2 >= n {
        info!("authentication failed: path endpoint out of range");
        return false;
    }
    let (start, finish) = if path[0].0 == end2 { (end2, end1) } else { (end1, end2) };
    if path[0].0 != start {
        info!("authentication failed: start of path matches neither endpoint");
        return false;
    }
    if path[path.len() - 1].1 != finish {
        info!("authentication failed: end of path does not match the other endpoint");
        return false;
    }

    seen[start] = true;
    let mut prev = start;
    for &(x, y) in path {
        if !g.adjacent(x, y) {
            info!(x, y, "authentication failed: edge does not exist in the graph");
            return false;
        }
        if prev != x {
            info!(x, y, "authentication failed: edge not incident on the previous edge");
            return false;
        }
        prev = y;
        if seen[y] {
            info!(vertex = y, "authentication failed: duplicated vertex");
            return false;
        }
        seen[y] = true;
    }

    seen[start] = false;
    seen[finish] = false;
    true
}

/// The number of connected components left after deleting `v`.
fn num_comps_after_removal(g: &Graph, v: usize) -> usize {
    let n = g.vertex_count();
    let mut comps = 0;
    let mut seen = vec![false; n];
    for start in 0..n {
        if seen[start] || start == v {
            continue;
        }
        comps += 1;
        let mut dfs = vec![start];
        while let Some(w) = dfs.pop() {
            if seen[w] {
                continue;
            }
            seen[w] = true;
            for &u in g.neighbors(w) {
                if !seen[u] && u != v {
                    dfs.push(u);
                }
            }
        }
    }
    comps
}

fn is_cut_vertex(g: &Graph, v: usize) -> bool {
    if num_comps_after_removal(g, v) <= 1 {
        info!(vertex = v, "authentication failed: not a cut vertex");
        return false;
    }
    true
}

/// Base-10 LSD radix sort; adjacency sequences are compared as multisets.
fn radix_sort(v: &mut [usize]) {
    let Some(&max_val) = v.iter().max() else { return };
    let mut output = vec![0usize; v.len()];
    let mut exp = 1usize;
    while max_val / exp > 0 {
        let mut count = [0usize; 10];
        for &x in v.iter() {
            count[(x / exp) % 10] += 1;
        }
        for i in 1..10 {
            count[i] += count[i - 1];
        }
        for i in (0..v.len()).rev() {
            let digit = (v[i] / exp) % 10;
            output[count[digit] - 1] = v[i];
            count[digit] -= 1;
        }
        v.copy_from_slice(&output);
        if exp > max_val / 10 {
            break;
        }
        exp *= 10;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::graph_from_edges;

    #[test]
    fn radix_sort_sorts() {
        let mut v = vec![170, 45, 75, 90, 0, 802, 24, 2, 66];
        radix_sort(&mut v);
        assert_eq!(v, [0, 2, 24, 45, 66, 75, 90, 170, 802]);
        let mut empty: Vec<usize> = vec![];
        radix_sort(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn trace_path_accepts_either_orientation() {
        let g = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let path = [(0, 1), (1, 2), (2, 3)];
        let mut seen = vec![false; 4];
        assert!(trace_path(0, 3, &path, &g, &mut seen));
        // Interior vertices stay marked, endpoints do not.
        assert_eq!(seen, [false, true, true, false]);
        let mut seen = vec![false; 4];
        assert!(trace_path(3, 0, &path, &g, &mut seen));
    }

    #[test]
    fn trace_path_rejects_broken_paths() {
        let g = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let mut seen = vec![false; 4];
        assert!(!trace_path(0, 3, &[], &g, &mut seen));
        // Missing edge in the graph.
        assert!(!trace_path(0, 3, &[(0, 3)], &g, &mut seen));
        // Not chained.
        assert!(!trace_path(0, 3, &[(0, 1), (2, 3)], &g, &mut seen));
        // Wrong finish.
        assert!(!trace_path(0, 2, &[(0, 1), (1, 2), (2, 3)], &g, &mut seen));
    }

    #[test]
    fn trace_path_rejects_repeated_interior_vertices() {
        let g = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let mut seen = vec![false; 3];
        assert!(trace_path(0, 2, &[(0, 1), (1, 2)], &g, &mut seen));
        // A second path through the same interior vertex must fail.
        assert!(!trace_path(0, 2, &[(0, 1), (1, 2)], &g, &mut seen));
    }

    #[test]
    fn num_comps_counts_components_after_removal() {
        let g = graph_from_edges(5, &[(0, 1), (1, 2), (1, 3), (3, 4)]);
        assert_eq!(num_comps_after_removal(&g, 1), 3);
        assert_eq!(num_comps_after_removal(&g, 4), 1);
        assert_eq!(num_comps_after_removal(&g, 0), 1);
    }

    #[test]
    fn direct_k4_authenticates() {
        let g = graph_from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        let mut k4 = K4Subdivision::new(0, 1, 2, 3);
        k4.ab = vec![(0, 1)];
        k4.ac = vec![(0, 2)];
        k4.ad = vec![(0, 3)];
        k4.bc = vec![(1, 2)];
        k4.bd = vec![(1, 3)];
        k4.cd = vec![(2, 3)];
        assert!(k4.authenticate(&g));
        assert!(k4.authenticate(&g));
    }

    #[test]
    fn k4_rejects_non_distinct_vertices() {
        let g = graph_from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        let mut k4 = K4Subdivision::new(0, 1, 2, 0);
        assert!(!k4.authenticate(&g));
    }

    #[test]
    fn k23_requires_internal_vertices() {
        let g = graph_from_edges(5, &[(0, 1), (0, 2), (0, 3), (4, 1), (4, 2), (4, 3), (0, 4)]);
        let mut k23 = K23Subdivision::new(0, 4);
        k23.one = vec![(0, 1), (1, 4)];
        k23.two = vec![(0, 2), (2, 4)];
        k23.three = vec![(0, 4)];
        assert!(!k23.authenticate(&g));
        k23.three = vec![(0, 3), (3, 4)];
        assert!(k23.authenticate(&g));
    }

    #[test]
    fn three_cut_block_needs_a_common_block() {
        // Central triangle {0,1,2} with a pendant triangle on each vertex.
        let g = graph_from_edges(
            9,
            &[
                (0, 1),
                (1, 2),
                (2, 0),
                (0, 3),
                (3, 4),
                (4, 0),
                (1, 5),
                (5, 6),
                (6, 1),
                (2, 7),
                (7, 8),
                (8, 2),
            ],
        );
        let mut cert = ThreeCutBlock::new(0, 1, 2);
        assert!(cert.authenticate(&g));
    }

    #[test]
    fn three_cut_block_rejects_cut_vertices_without_a_common_block() {
        // A chain of four triangles; 2, 4 and 6 are cut vertices but no
        // single block contains all three.
        let g = graph_from_edges(
            9,
            &[
                (0, 1),
                (1, 2),
                (2, 0),
                (2, 3),
                (3, 4),
                (4, 2),
                (4, 5),
                (5, 6),
                (6, 4),
                (6, 7),
                (7, 8),
                (8, 6),
            ],
        );
        let mut cert = ThreeCutBlock::new(2, 4, 6);
        assert!(!cert.authenticate(&g));
    }
}
