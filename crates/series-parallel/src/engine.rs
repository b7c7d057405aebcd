use std::mem;

use tracing::{debug, instrument, trace};

use crate::blocks::BlockChain;
use crate::certificate::{Certificate, K23Subdivision, K4Subdivision, SpCertificate, SpResult, ThetaFour};
use crate::graph::{Edge, Graph, NO_VERTEX};
use crate::sp_tree::{Composition, SpTree};

/// An ear: the tree path closing a back edge, named by that back edge's
/// endpoints. `src` is the deep endpoint, `sink` the shallow one.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Ear {
    src: usize,
    sink: usize,
}

/// A pending ear parked at the vertex where its winning ear sinks. `tail` is
/// filled in when the parking subtree finishes, so the parked ear is followed
/// by the tree path completed after it.
struct PendingEar {
    sp: SpTree,
    end: usize,
    tail: SpTree,
}

/// Maps the index of the K4 path containing the fake edge to the order in
/// which the remaining paths become the theta-four paths `c1a, c2a, c1b,
/// c2b, ab`, drawing from `[ab, ac, ad, bc, bd, cd]`.
const K4_THETA_PATHS: [[usize; 5]; 6] =
    [[1, 3, 2, 4, 5], [0, 3, 2, 5, 4], [0, 4, 1, 5, 3], [0, 1, 4, 5, 2], [0, 2, 3, 5, 1], [1, 2, 3, 4, 0]];

/// Companion table mapping the K4 branch vertices `[a, b, c, d]` to the
/// theta-four vertices `c1, c2, a, b` for each fake-edge path index.
const K4_THETA_VERTS: [[usize; 4]; 6] =
    [[0, 1, 2, 3], [0, 2, 1, 3], [0, 3, 1, 2], [1, 2, 0, 3], [1, 3, 0, 2], [2, 3, 0, 1]];

/// Runs the per-block recognition over an ordered block chain, gluing the
/// per-block trees at cut vertices, and returns the final verdict with its
/// certificate.
#[instrument(skip_all)]
pub(crate) fn recognize_blocks(g: &Graph, chain: BlockChain) -> SpResult {
    Engine::new(g, chain).run()
}

struct Engine<'g> {
    g: &'g Graph,
    blocks: Vec<(usize, usize)>,
    cut_verts: Vec<usize>,
    /// Which block claimed each vertex. Initialized once; the cross-block
    /// skip relies on this surviving from one block pass to the next.
    comp: Vec<usize>,
    dfs_no: Vec<usize>,
    parent: Vec<usize>,
    ear: Vec<Option<Ear>>,
    seq: Vec<SpTree>,
    earliest_outgoing: Vec<usize>,
    num_children: Vec<u32>,
    alert: Vec<usize>,
    vertex_stacks: Vec<Vec<PendingEar>>,
    cut_vertex_attached_tree: Vec<SpTree>,
    cert: Option<Certificate>,
}

impl<'g> Engine<'g> {
    fn new(g: &'g Graph, chain: BlockChain) -> Self {
        let n = g.vertex_count();
        let n_blocks = chain.blocks.len();
        Self {
            g,
            blocks: chain.blocks,
            cut_verts: chain.cut_verts,
            comp: vec![NO_VERTEX; n],
            dfs_no: vec![0; n],
            parent: vec![NO_VERTEX; n],
            ear: vec![None; n],
            seq: (0..n).map(|_| SpTree::default()).collect(),
            earliest_outgoing: vec![NO_VERTEX; n],
            num_children: vec![0; n],
            alert: vec![NO_VERTEX; n],
            vertex_stacks: (0..n).map(|_| Vec::new()).collect(),
            cut_vertex_attached_tree: (0..n_blocks).map(|_| SpTree::default()).collect(),
            cert: None,
        }
    }

    fn run(mut self) -> SpResult {
        let n_blocks = self.blocks.len();
        for block in 0..n_blocks {
            debug!(block, "processing biconnected component");
            self.reset_block_state();

            let (root, next) = self.blocks[block];
            // The chain reordering may leave a representative pair that is
            // not an edge of the graph; the pass then assumes a virtual edge
            // and any certificate mentioning it is rewritten below.
            let fake_edge = !self.g.neighbors(next).contains(&root);
            if fake_edge {
                debug!(root, next, "block pair is not an edge, assuming a virtual one");
            }

            self.run_block_dfs(block, root, next, fake_edge);

            if fake_edge && self.cert.is_some() {
                if self.try_rewrite_k4_to_theta(root, next) {
                    // Rebuild this block's per-vertex state with a second
                    // pass. The rewritten witness is final; the pass would
                    // re-detect the K4 still referencing the virtual edge,
                    // so whatever it reports is discarded.
                    let theta = self.cert.take();
                    self.reset_block_state();
                    self.run_block_dfs(block, root, next, fake_edge);
                    self.cert = theta;
                } else if matches!(self.cert, Some(Certificate::K23(_))) {
                    self.splice_fake_edge_out_of_k23(block, root, next);
                }
            }
            // A certificate is terminal, so each fake-edge rewrite can
            // happen at most once per run.
            if self.cert.is_some() {
                break;
            }

            if self.cut_verts[root] != NO_VERTEX {
                let attached = mem::take(&mut self.cut_vertex_attached_tree[self.cut_verts[root]]);
                self.seq[next].compose(attached, Composition::Dangling);
            }

            let tree = mem::take(&mut self.seq[next]);
            if block < n_blocks - 1 {
                trace!(block, root, %tree, "attaching block tree at its cut vertex");
                self.cut_vertex_attached_tree[self.cut_verts[root]] = tree;
            } else {
                debug!("graph is series-parallel");
                self.cert = Some(Certificate::SeriesParallel(SpCertificate::new(tree)));
            }
        }

        let is_sp = matches!(self.cert, Some(Certificate::SeriesParallel(_)));
        SpResult { is_sp, certificate: self.cert }
    }

    fn reset_block_state(&mut self) {
        for v in 0..self.g.vertex_count() {
            self.dfs_no[v] = 0;
            self.parent[v] = NO_VERTEX;
            self.ear[v] = None;
            self.seq[v] = SpTree::default();
            self.earliest_outgoing[v] = NO_VERTEX;
            self.num_children[v] = 0;
            self.alert[v] = NO_VERTEX;
            // A clean pass consumes every pending entry; an aborted one may
            // not, so clear rather than rely on it.
            self.vertex_stacks[v].clear();
        }
    }

    /// One iterative DFS over the block owning `next`. The adjacency index of
    /// the top frame only advances after a visited neighbor was handled, so a
    /// tree edge is seen a second time when its child subtree completes.
    fn run_block_dfs(&mut self, block: usize, root: usize, next: usize, fake_edge: bool) {
        self.dfs_no[root] = 1;
        self.parent[root] = NO_VERTEX;
        self.dfs_no[next] = 2;
        self.parent[next] = root;
        self.comp[next] = block;
        let mut curr_dfs = 3;

        let mut dfs: Vec<(usize, usize)> = vec![(next, 0)];

        while let Some(&(w, idx)) = dfs.last() {
            let v = self.parent[w];

            if idx >= self.g.neighbors(w).len() {
                // Backing up from w. A pending entry contributed by this
                // subtree gets the completed path as its tail.
                if self.earliest_outgoing[w] != NO_VERTEX {
                    let parked_at = self.earliest_outgoing[w];
                    if let Some(entry) = self.vertex_stacks[parked_at].last_mut() {
                        entry.tail = mem::take(&mut self.seq[w]);
                    }
                }

                if v == root {
                    let closing = if fake_edge { SpTree::default() } else { SpTree::leaf(v, w) };
                    self.seq[w].compose(closing, Composition::Parallel);
                    if self.cut_verts[w] != NO_VERTEX {
                        let attached = mem::take(&mut self.cut_vertex_attached_tree[self.cut_verts[w]]);
                        self.seq[w].compose(attached, Composition::Series);
                    }
                    self.seq[next] = mem::take(&mut self.seq[w]);
                    trace!(%next, tree = %self.seq[next], "block closed");
                    return;
                }

                if self.cut_verts[w] != NO_VERTEX {
                    let attached = &mut self.cut_vertex_attached_tree[self.cut_verts[w]];
                    attached.l_compose(SpTree::leaf(w, v), Composition::Dangling);
                    let attached = mem::take(attached);
                    self.seq[w].compose(attached, Composition::Series);
                } else {
                    self.seq[w].compose(SpTree::leaf(w, v), Composition::Series);
                }
                dfs.pop();
                continue;
            }

            let u = self.g.neighbors(w)[idx];

            // Cross-block adjacency past a cut vertex.
            if self.comp[u] != NO_VERTEX && self.comp[u] != block {
                dfs.last_mut().unwrap().1 += 1;
                continue;
            }

            if self.dfs_no[u] == 0 {
                self.parent[u] = w;
                self.dfs_no[u] = curr_dfs;
                curr_dfs += 1;
                self.comp[u] = block;
                self.num_children[w] += 1;
                dfs.push((u, 0));
                continue;
            }

            let child_back_edge = self.dfs_no[u] < self.dfs_no[w] && u != v;
            if child_back_edge {
                trace!(w, u, "back edge");
            }

            if self.parent[u] == w {
                trace!(w, u, "tree edge returning from child");
                self.update_seq(w, u);
                if self.cert.is_some() {
                    return;
                }
            }

            if self.parent[u] == w || child_back_edge {
                let (ear_f, seq_u) = if child_back_edge {
                    (Some(Ear { src: w, sink: u }), SpTree::leaf(u, w))
                } else {
                    (self.ear[u], mem::take(&mut self.seq[u]))
                };
                if let Some(ear_f) = ear_f {
                    if !self.update_ear_of_parent(w, ear_f, seq_u, child_back_edge) {
                        return;
                    }
                }
            }

            dfs.last_mut().unwrap().1 += 1;
        }
    }

    /// Absorbs pending ears parked at `w` into the completed child sequence
    /// `seq[u]`. A pending ear whose end does not match where the child's ear
    /// path starts interlaces with it, which is a K4 subdivision.
    fn update_seq(&mut self, w: usize, u: usize) {
        while let Some(top_end) = self.vertex_stacks[w].last().map(|e| e.end) {
            if self.seq[u].source() != Some(top_end) {
                debug!(w, u, "pending ear interlaces with the child sequence");
                self.report_k4_stack_pop(w, u, top_end);
                return;
            }
            let entry = self.vertex_stacks[w].pop().unwrap();
            self.seq[u].compose(entry.sp, Composition::Antiparallel);
            self.seq[u].l_compose(entry.tail, Composition::Series);
        }
    }

    /// Lets the ear `ear_f` coming out of child `u` (or a back edge) compete
    /// for vertex `w`. Ears are ordered by the DFS number of their sink, then
    /// non-trivial before trivial, then by the DFS number of their source.
    ///
    /// Returns false when a K4 witness ends the block pass.
    fn update_ear_of_parent(&mut self, w: usize, ear_f: Ear, seq_u: SpTree, child_back_edge: bool) -> bool {
        let ear_w = self.ear[w];
        let ear_w_sink_dfs = ear_w.map_or(usize::MAX, |e| self.dfs_no[e.sink]);

        if self.dfs_no[ear_f.sink] < ear_w_sink_dfs {
            // The new ear strictly wins; the previous winner must be a
            // complete SP subgraph and is parked at its own sink.
            if let Some(prev) = ear_w {
                if prev.src != w {
                    self.k23_test(prev, ear_f, w);
                }
                if self.seq[w].source() != Some(prev.sink) {
                    debug!(w, "previous winning sequence is not closed at its ear sink");
                    let a = self.seq[w].source().unwrap_or(NO_VERTEX);
                    self.report_k4_non_stack_pop(a, w, prev.sink, prev.src, ear_f.sink, ear_f.src);
                    return false;
                }
                trace!(w, parked_at = prev.sink, tree = %self.seq[w], "parking the losing winner");
                let sp = mem::take(&mut self.seq[w]);
                self.vertex_stacks[prev.sink].push(PendingEar { sp, end: w, tail: SpTree::default() });
                self.earliest_outgoing[w] = prev.sink;
            }
            self.ear[w] = Some(ear_f);
            self.seq[w] = seq_u;
            trace!(w, tree = %self.seq[w], "new winning sequence");
            return true;
        }

        // ear_w is real from here on: a sentinel winner loses to any ear.
        let ear_w = match ear_w {
            Some(e) => e,
            None => return true,
        };

        if seq_u.source() != Some(ear_f.sink) {
            debug!(w, "child sequence is not closed at its ear sink");
            let a = seq_u.source().unwrap_or(NO_VERTEX);
            self.report_k4_non_stack_pop(a, w, ear_f.sink, ear_f.src, ear_w.sink, ear_w.src);
            return false;
        }

        if self.dfs_no[ear_f.sink] == ear_w_sink_dfs {
            // Equal sinks merge in parallel.
            if !child_back_edge && ear_w.src != w {
                self.k23_test(ear_f, ear_w, w);
            }
            if self.seq[w].source() != Some(ear_w.sink) {
                debug!(w, "winning sequence is not closed at its ear sink");
                let a = self.seq[w].source().unwrap_or(NO_VERTEX);
                self.report_k4_non_stack_pop(a, w, ear_w.sink, ear_w.src, ear_f.sink, ear_f.src);
                return false;
            }
            self.seq[w].compose(seq_u, Composition::Parallel);
            trace!(w, tree = %self.seq[w], "merged equal-sink sequences");

            if (ear_w.src == w || self.dfs_no[ear_f.src] < self.dfs_no[ear_w.src]) && ear_f.src != w {
                self.ear[w] = Some(ear_f);
            }
        } else {
            // The new ear strictly loses and is parked at its sink, merging
            // with an entry this vertex already parked there.
            if !child_back_edge {
                self.k23_test(ear_f, ear_w, w);
            }
            let parked = &mut self.vertex_stacks[ear_f.sink];
            match parked.last_mut() {
                Some(top) if top.end == w => {
                    trace!(w, at = ear_f.sink, "merging onto the existing pending entry");
                    top.sp.compose(seq_u, Composition::Parallel);
                }
                _ => {
                    trace!(w, at = ear_f.sink, "new pending entry");
                    parked.push(PendingEar { sp: seq_u, end: w, tail: SpTree::default() });
                    let eo_dfs = if self.earliest_outgoing[w] == NO_VERTEX {
                        usize::MAX
                    } else {
                        self.dfs_no[self.earliest_outgoing[w]]
                    };
                    if self.dfs_no[ear_f.sink] < eo_dfs {
                        self.earliest_outgoing[w] = ear_f.sink;
                    }
                }
            }
        }
        true
    }

    /// Outerplanarity-style probe: two distinct non-trivial ears at `w` with
    /// the same sink witness a K23 subdivision. The first such ear only raises
    /// an alert; the violation needs either a sink that is not `w`'s parent
    /// or a second alerting ear.
    fn k23_test(&mut self, ear_found: Ear, ear_winning: Ear, w: usize) {
        trace!(w, ?ear_found, ?ear_winning, "K23 interlacing probe");

        if ear_found.sink != self.parent[w] {
            debug!(w, "non-outerplanar: ear sinks below the parent");
            let mut k23 = K23Subdivision::new(w, ear_found.sink);
            k23.one.push((k23.b, ear_found.src));
            self.walk_up(ear_found.src, k23.a, &mut k23.one);

            self.walk_up(k23.a, k23.b, &mut k23.two);

            self.walk_up(k23.b, ear_winning.sink, &mut k23.three);
            k23.three.push((ear_winning.sink, ear_winning.src));
            self.walk_up(ear_winning.src, k23.a, &mut k23.three);

            self.cert = Some(Certificate::K23(k23));
            return;
        }

        if self.alert[w] != NO_VERTEX {
            debug!(w, "non-outerplanar: second alerting ear");
            let mut k23 = K23Subdivision::new(w, ear_found.sink);
            k23.one.push((k23.b, ear_found.src));
            self.walk_up(ear_found.src, k23.a, &mut k23.one);

            k23.two.push((k23.b, self.alert[w]));
            self.walk_up(self.alert[w], k23.a, &mut k23.two);

            self.walk_up(k23.b, ear_winning.sink, &mut k23.three);
            k23.three.push((ear_winning.sink, ear_winning.src));
            self.walk_up(ear_winning.src, k23.a, &mut k23.three);

            self.cert = Some(Certificate::K23(k23));
        } else {
            self.alert[w] = ear_found.src;
        }
    }

    /// K4 found while popping a pending ear at `w` against the completed
    /// child `u`: the pending ear ends at `a`, the child's ear path starts at
    /// `b`, and the interlacing closes at `w` itself.
    fn report_k4_stack_pop(&mut self, w: usize, u: usize, top_end: usize) {
        let b = self.seq[u].source().unwrap_or(NO_VERTEX);
        let a = top_end;
        let c = w;
        let holding_ear = self.ear[u].unwrap_or(Ear { src: NO_VERTEX, sink: NO_VERTEX });

        let mut k4 = K4Subdivision::new(a, b, c, NO_VERTEX);
        self.walk_up(a, b, &mut k4.ab);
        self.walk_up(b, c, &mut k4.bc);

        // The fourth branch vertex holds a pending ear ending at b somewhere
        // above c; non-matching entries on the way are dead and dropped.
        let mut cc = c;
        while k4.d == NO_VERTEX {
            let p = match self.parent.get(cc) {
                Some(&p) if p != NO_VERTEX => p,
                _ => break,
            };
            k4.cd.push((cc, p));
            cc = p;
            while let Some(top) = self.vertex_stacks[cc].last() {
                if top.end == k4.b {
                    k4.d = cc;
                    break;
                }
                self.vertex_stacks[cc].pop();
            }
        }

        self.walk_up(k4.d, holding_ear.sink, &mut k4.ad);
        k4.ad.push((holding_ear.sink, holding_ear.src));
        self.walk_up(holding_ear.src, k4.a, &mut k4.ad);

        let ear1 = self.pending_path_start(k4.d);
        k4.bd.push((k4.d, ear1));
        self.walk_up(ear1, k4.b, &mut k4.bd);

        let ear2 = self.pending_path_start(k4.c);
        k4.ac.push((k4.c, ear2));
        self.walk_up(ear2, k4.a, &mut k4.ac);

        self.cert = Some(Certificate::K4(k4));
    }

    /// K4 found from an ear whose sequence does not close at its sink. `a`
    /// and `b` are the interlacing endpoints, `d` the losing ear's sink; the
    /// fourth branch vertex holds the pending ear ending at `a` between `b`
    /// and `d`.
    fn report_k4_non_stack_pop(
        &mut self,
        a: usize,
        b: usize,
        d: usize,
        lose_src: usize,
        win_sink: usize,
        win_src: usize,
    ) {
        let mut k4 = K4Subdivision::new(a, b, NO_VERTEX, d);

        let mut earliest_violating_ear = SpTree::default();
        let mut bw = self.parent.get(b).copied().unwrap_or(NO_VERTEX);
        while bw != d && bw != NO_VERTEX {
            while let Some(entry) = self.vertex_stacks[bw].pop() {
                if entry.end == a {
                    earliest_violating_ear = entry.sp;
                    k4.c = bw;
                }
            }
            bw = self.parent.get(bw).copied().unwrap_or(NO_VERTEX);
        }

        self.walk_up(a, b, &mut k4.ab);
        self.walk_up(b, k4.c, &mut k4.bc);
        self.walk_up(k4.c, d, &mut k4.cd);

        k4.ad.push((d, lose_src));
        self.walk_up(lose_src, a, &mut k4.ad);

        self.walk_up(d, win_sink, &mut k4.bd);
        k4.bd.push((win_sink, win_src));
        self.walk_up(win_src, b, &mut k4.bd);

        let ear_path = earliest_violating_ear.underlying_tree_path_source().unwrap_or(NO_VERTEX);
        k4.ac.push((k4.c, ear_path));
        self.walk_up(ear_path, a, &mut k4.ac);

        self.cert = Some(Certificate::K4(k4));
    }

    /// Appends the tree-path edges from `from` up to `to` along DFS parents.
    /// Malformed walks end silently at the root; the authenticator rejects
    /// the resulting path.
    fn walk_up(&self, from: usize, to: usize, path: &mut Vec<Edge>) {
        let mut x = from;
        while x != to {
            let p = match self.parent.get(x) {
                Some(&p) if p != NO_VERTEX => p,
                _ => return,
            };
            path.push((x, p));
            x = p;
        }
    }

    /// Where the witness path stored in the top pending entry at `x` starts.
    fn pending_path_start(&self, x: usize) -> usize {
        self.vertex_stacks
            .get(x)
            .and_then(|s| s.last())
            .and_then(|e| e.sp.underlying_tree_path_source())
            .unwrap_or(NO_VERTEX)
    }

    /// If the K4 witness routes one of its six paths through the virtual
    /// edge, the four branch vertices straddle the cut pair and the witness
    /// becomes a theta-four over the remaining five paths.
    fn try_rewrite_k4_to_theta(&mut self, root: usize, next: usize) -> bool {
        let Some(Certificate::K4(k4)) = self.cert.as_mut() else {
            return false;
        };
        let fake = (root, next);
        let paths = [&k4.ab, &k4.ac, &k4.ad, &k4.bc, &k4.bd, &k4.cd];
        let Some(pnum) = paths.iter().position(|p| path_contains_edge(p, fake).is_some()) else {
            return false;
        };
        debug!(pnum, "fake edge inside a K4 path, rewriting to a theta-four");

        let mut paths = [
            mem::take(&mut k4.ab),
            mem::take(&mut k4.ac),
            mem::take(&mut k4.ad),
            mem::take(&mut k4.bc),
            mem::take(&mut k4.bd),
            mem::take(&mut k4.cd),
        ];
        let verts = [k4.a, k4.b, k4.c, k4.d];
        let path_order = K4_THETA_PATHS[pnum];
        let vert_order = K4_THETA_VERTS[pnum];

        self.cert = Some(Certificate::T4(ThetaFour {
            c1: verts[vert_order[0]],
            c2: verts[vert_order[1]],
            a: verts[vert_order[2]],
            b: verts[vert_order[3]],
            c1a: mem::take(&mut paths[path_order[0]]),
            c2a: mem::take(&mut paths[path_order[1]]),
            c1b: mem::take(&mut paths[path_order[2]]),
            c2b: mem::take(&mut paths[path_order[3]]),
            ab: mem::take(&mut paths[path_order[4]]),
            verified: false,
        }));
        true
    }

    /// If a K23 witness routes a path through the virtual edge, replace that
    /// edge with a detour through a tree child of `next` the witness does not
    /// use. Runs at most once per invocation.
    fn splice_fake_edge_out_of_k23(&mut self, block: usize, root: usize, next: usize) {
        let mut k23 = match self.cert.take() {
            Some(Certificate::K23(k23)) => k23,
            other => {
                self.cert = other;
                return;
            }
        };

        let fake = (root, next);
        let located = [&k23.one, &k23.two, &k23.three]
            .iter()
            .enumerate()
            .find_map(|(pnum, path)| path_contains_edge(path, fake).map(|i| (pnum, i)));

        if let Some((pnum, path_ind)) = located {
            debug!(pnum, "fake edge inside a K23 path, splicing a detour");
            let n = self.g.vertex_count();
            let mut in_k23 = vec![false; n];
            for path in [&k23.one, &k23.two, &k23.three] {
                for &(x, y) in path.iter() {
                    if x < n {
                        in_k23[x] = true;
                    }
                    if y < n {
                        in_k23[y] = true;
                    }
                }
            }

            let mut splice_path: Vec<Edge> = Vec::new();
            for &u2 in self.g.neighbors(next) {
                if self.comp[u2] == block && self.parent[u2] == next && !in_k23[u2] {
                    if let Some(ear_u2) = self.ear[u2] {
                        trace!(u2, "detour through an unused tree child");
                        splice_path.push((ear_u2.src, root));
                        let mut i = ear_u2.src;
                        while i != next {
                            let p = match self.parent.get(i) {
                                Some(&p) if p != NO_VERTEX => p,
                                _ => break,
                            };
                            splice_path.push((p, i));
                            i = p;
                        }
                    }
                    break;
                }
            }
            splice_path.reverse();

            let path = match pnum {
                0 => &mut k23.one,
                1 => &mut k23.two,
                _ => &mut k23.three,
            };
            path.splice(path_ind..=path_ind, splice_path);
        }

        self.cert = Some(Certificate::K23(k23));
    }
}

fn path_contains_edge(path: &[Edge], test: Edge) -> Option<usize> {
    path.iter().position(|&e| e == test || (e.0 == test.1 && e.1 == test.0))
}
