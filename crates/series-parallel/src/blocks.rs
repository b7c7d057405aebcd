use crate::certificate::{Certificate, ThreeComponentCut, ThreeCutBlock};
use crate::graph::{Graph, NO_VERTEX};
use tracing::{debug, instrument};

/// The biconnected components of the reachable part of a graph, ordered as a
/// chain, together with the cut-vertex marking the recognition engine needs.
#[derive(Debug)]
pub(crate) struct BlockChain {
    /// One representative pair per block in chain order. A middle block's
    /// pair is its two cut vertices (the one shared with the next block
    /// first); the first pair is `(cut vertex, entry child)` and the last
    /// names the chain terminus and the vertex it hangs from. A middle pair
    /// need not be an edge of the graph.
    pub(crate) blocks: Vec<(usize, usize)>,
    /// `cut_verts[v]` is the index of the block `v` closed during the search,
    /// or [NO_VERTEX] if `v` is not a cut vertex.
    pub(crate) cut_verts: Vec<usize>,
}

/// Enumerates biconnected components from vertex 0 with an iterative lowpoint
/// search and orders them as a chain.
///
/// Fails with a block-tree obstruction certificate when a cut vertex lies in
/// three or more blocks, or a block contains three or more cut vertices; any
/// other configuration is a path of blocks and is returned in an order where
/// consecutive blocks share exactly one cut vertex, inner blocks first.
#[instrument(skip_all)]
pub(crate) fn block_chain(g: &Graph) -> Result<BlockChain, Certificate> {
    let n = g.vertex_count();
    let root = 0;

    let mut cut_verts = vec![NO_VERTEX; n];
    let mut dfs_no = vec![0usize; n];
    let mut low = vec![0usize; n];
    let mut parent = vec![NO_VERTEX; n];
    let mut blocks: Vec<(usize, usize)> = Vec::new();

    let mut dfs: Vec<(usize, usize)> = vec![(root, 0)];
    dfs_no[root] = 1;
    low[root] = 1;
    let mut curr_dfs = 2;
    let mut root_cut = false;

    while let Some(&(w, idx)) = dfs.last() {
        if idx >= g.neighbors(w).len() {
            dfs.pop();
            continue;
        }
        let u = g.neighbors(w)[idx];

        if dfs_no[u] == 0 {
            parent[u] = w;
            dfs_no[u] = curr_dfs;
            curr_dfs += 1;
            low[u] = dfs_no[u];
            dfs.push((u, 0));
            continue;
        }

        if parent[u] == w {
            // The child's subtree is done; a lowpoint not above w closes a block.
            if low[u] >= dfs_no[w] {
                if cut_verts[w] != NO_VERTEX {
                    if w != root || root_cut {
                        debug!(cut_vertex = w, "cut vertex lies in three or more blocks");
                        return Err(Certificate::ThreeComponentCut(ThreeComponentCut::new(w)));
                    }
                    // The root may own two child subtrees without separating
                    // the block-tree.
                    root_cut = true;
                } else {
                    cut_verts[w] = blocks.len();
                }
                blocks.push((w, u));
            }
            low[w] = low[w].min(low[u]);
        } else if dfs_no[u] < dfs_no[w] && u != parent[w] {
            low[w] = low[w].min(dfs_no[u]);
        }
        dfs.last_mut().unwrap().1 += 1;
    }

    if !root_cut {
        cut_verts[root] = NO_VERTEX;
    }

    let n_blocks = blocks.len();
    debug!(n_blocks, "biconnected components found");

    // A block with three cut vertices shows up as two distinct blocks whose
    // closing vertices walk up into it through the same tree child.
    let mut prev_cut = vec![NO_VERTEX; n_blocks];
    let mut root_one = NO_VERTEX;
    let mut root_two = NO_VERTEX;

    for i in 0..n_blocks.saturating_sub(1) {
        let start = blocks[i].0;
        let mut w = start;
        let mut u = NO_VERTEX;

        while w != root {
            u = w;
            w = parent[w];
            if cut_verts[w] != NO_VERTEX && u == blocks[cut_verts[w]].1 {
                if prev_cut[cut_verts[w]] == NO_VERTEX {
                    prev_cut[cut_verts[w]] = start;
                } else {
                    let cert = ThreeCutBlock::new(w, start, prev_cut[cut_verts[w]]);
                    debug!(c1 = w, c2 = start, c3 = prev_cut[cut_verts[w]], "block with three cut vertices");
                    return Err(Certificate::ThreeCutBlock(cert));
                }
                break;
            }
        }

        if w == root && (u == blocks[n_blocks - 1].1 || u == NO_VERTEX) {
            if root_one == NO_VERTEX {
                root_one = start;
            } else if root_two == NO_VERTEX {
                root_two = start;
            } else {
                let cert = ThreeCutBlock::new(root_one, root_two, start);
                debug!(c1 = root_one, c2 = root_two, c3 = start, "root block with three cut vertices");
                return Err(Certificate::ThreeCutBlock(cert));
            }
        }
    }

    // Reorder into a chain. At most two blocks have no cut-vertex child (the
    // endpoints of the path); one of them is the last-emitted root block, the
    // other marks where the emitted order has to be reversed.
    if n_blocks > 1 {
        let mut second_endpoint = n_blocks - 1;
        for (i, &prev) in prev_cut.iter().enumerate().take(n_blocks - 1).skip(1) {
            if prev == NO_VERTEX {
                second_endpoint = i;
                break;
            }
        }
        debug!(second_endpoint, "ordering blocks as a chain");

        blocks[second_endpoint..n_blocks - 1].reverse();
        if second_endpoint != n_blocks - 1 {
            blocks[n_blocks - 1] = (blocks[n_blocks - 2].1, blocks[n_blocks - 2].0);
        } else {
            let terminus = if blocks[n_blocks - 1].0 == blocks[n_blocks - 2].0 {
                blocks[n_blocks - 1].1
            } else {
                parent[blocks[n_blocks - 2].0]
            };
            blocks[n_blocks - 1] = (terminus, blocks[n_blocks - 2].0);
        }
        // Each middle block bridges the chain between its two cut vertices:
        // the previous block's representative is the one it shares with that
        // block. The resulting pair need not be an edge of the graph; the
        // engine assumes a virtual edge for such blocks.
        for i in 1..n_blocks - 1 {
            blocks[i].1 = blocks[i - 1].0;
        }
    }

    Ok(BlockChain { blocks, cut_verts })
}

#[cfg(test)]
mod test {
    use super::{block_chain, NO_VERTEX};
    use crate::certificate::Certificate;
    use crate::tests::graph_from_edges;

    #[test]
    fn single_edge_is_one_block() {
        let g = graph_from_edges(2, &[(0, 1)]);
        let chain = block_chain(&g).unwrap();
        assert_eq!(chain.blocks, [(0, 1)]);
        assert!(chain.cut_verts.iter().all(|&c| c == NO_VERTEX));
    }

    #[test]
    fn triangle_is_one_block() {
        let g = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let chain = block_chain(&g).unwrap();
        assert_eq!(chain.blocks.len(), 1);
    }

    #[test]
    fn path_blocks_form_a_chain() {
        let g = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let chain = block_chain(&g).unwrap();
        assert_eq!(chain.blocks.len(), 3);
        // Consecutive blocks share exactly one vertex.
        for pair in chain.blocks.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let shared = [a.0, a.1].iter().filter(|v| **v == b.0 || **v == b.1).count();
            assert_eq!(shared, 1, "blocks {a:?} and {b:?} share {shared} vertices");
        }
    }

    #[test]
    fn middle_block_pair_bridges_its_cut_vertices() {
        // Triangle {0,1,2}, a diamond {2,3,4,5} whose cut vertices 2 and 5
        // are not adjacent, and a triangle {5,6,7}.
        let g = graph_from_edges(
            8,
            &[
                (0, 1),
                (1, 2),
                (2, 0),
                (2, 3),
                (3, 5),
                (5, 4),
                (4, 2),
                (3, 4),
                (5, 6),
                (6, 7),
                (7, 5),
            ],
        );
        let chain = block_chain(&g).unwrap();
        assert_eq!(chain.blocks, [(5, 6), (2, 5), (1, 2)]);
        assert!(!g.adjacent(2, 5));
    }

    #[test]
    fn bowtie_has_two_blocks_sharing_the_waist() {
        let g = graph_from_edges(5, &[(0, 1), (1, 2), (0, 2), (2, 3), (3, 4), (2, 4)]);
        let chain = block_chain(&g).unwrap();
        assert_eq!(chain.blocks.len(), 2);
        assert_eq!(chain.cut_verts.iter().filter(|&&c| c != NO_VERTEX).count(), 1);
        assert_ne!(chain.cut_verts[2], NO_VERTEX);
    }

    #[test]
    fn three_leaf_star_is_a_three_component_cut() {
        let g = graph_from_edges(4, &[(0, 1), (0, 2), (0, 3)]);
        let cert = block_chain(&g).unwrap_err();
        match cert {
            Certificate::ThreeComponentCut(c) => assert_eq!(c.v, 0),
            other => panic!("expected three-component cut, got {other}"),
        }
    }

    #[test]
    fn three_triangles_on_a_central_triangle_is_a_three_cut_block() {
        // Central triangle {0,1,2}; a pendant triangle on each of its vertices.
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
        let cert = block_chain(&g).unwrap_err();
        assert!(matches!(cert, Certificate::ThreeCutBlock(_)), "got {cert}");
    }
}
