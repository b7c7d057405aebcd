use std::fmt::{Display, Formatter};

/// Composition kinds of nodes in an SP decomposition tree.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq)]
pub enum Composition {
    /// A leaf carrying a single graph edge.
    Edge,
    /// Concatenates two two-terminal subgraphs sharing one endpoint.
    Series,
    /// Glues two subgraphs at both endpoints, same orientation.
    Parallel,
    /// Glues two subgraphs at both endpoints, right child reversed.
    Antiparallel,
    /// Attaches a subtree hanging off a cut vertex; the left child
    /// contributes the node's endpoints.
    Dangling,
}

#[derive(Debug)]
pub(crate) struct SpNode {
    pub(crate) source: usize,
    pub(crate) sink: usize,
    pub(crate) comp: Composition,
    pub(crate) left: Option<Box<SpNode>>,
    pub(crate) right: Option<Box<SpNode>>,
}

/// A binary tree of series / parallel / antiparallel / dangling compositions
/// whose leaves are graph edges.
///
/// The tree owns its nodes. Composing two trees consumes the argument tree.
/// An empty tree is the identity of both [SpTree::compose] and
/// [SpTree::l_compose].
#[derive(Debug, Default)]
pub struct SpTree {
    root: Option<Box<SpNode>>,
}

impl SpTree {
    /// Creates a single [Composition::Edge] leaf for the edge `{source, sink}`.
    pub fn leaf(source: usize, sink: usize) -> Self {
        Self { root: Some(Box::new(SpNode { source, sink, comp: Composition::Edge, left: None, right: None })) }
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root's source vertex, or `None` for an empty tree.
    pub fn source(&self) -> Option<usize> {
        self.root.as_ref().map(|r| r.source)
    }

    /// The root's sink vertex, or `None` for an empty tree.
    pub fn sink(&self) -> Option<usize> {
        self.root.as_ref().map(|r| r.sink)
    }

    pub(crate) fn root(&self) -> Option<&SpNode> {
        self.root.as_deref()
    }

    /// Becomes the composition with `other` as the right child.
    ///
    /// An empty receiver becomes `other`; an empty `other` is a no-op. The new
    /// root's endpoints follow the composition kind: series takes
    /// `(left.source, right.sink)`, every other kind keeps the left child's
    /// endpoints.
    pub fn compose(&mut self, other: SpTree, comp: Composition) {
        let mut other = other;
        match (self.root.take(), other.root.take()) {
            (None, right) => self.root = right,
            (left @ Some(_), None) => self.root = left,
            (Some(left), Some(right)) => self.root = Some(Self::join(left, right, comp)),
        }
    }

    /// Becomes the composition with `other` as the left child.
    pub fn l_compose(&mut self, other: SpTree, comp: Composition) {
        let mut other = other;
        match (self.root.take(), other.root.take()) {
            (None, right) => self.root = right,
            (left @ Some(_), None) => self.root = left,
            (Some(right), Some(left)) => self.root = Some(Self::join(left, right, comp)),
        }
    }

    fn join(left: Box<SpNode>, right: Box<SpNode>, comp: Composition) -> Box<SpNode> {
        debug_assert_ne!(comp, Composition::Edge, "edge nodes cannot have children");
        let (source, sink) = match comp {
            Composition::Series => (left.source, right.sink),
            _ => (left.source, left.sink),
        };
        Box::new(SpNode { source, sink, comp, left: Some(left), right: Some(right) })
    }

    /// The sink of the leftmost leaf: the deep endpoint of the back edge the
    /// stored ear closes, which is where a witness path through this subtree
    /// starts. `None` for an empty tree.
    pub(crate) fn underlying_tree_path_source(&self) -> Option<usize> {
        let mut node = self.root.as_deref()?;
        while node.comp != Composition::Edge {
            node = node.left.as_deref()?;
        }
        Some(node.sink)
    }
}

impl Drop for SpTree {
    // Trees get as tall as the longest ear path; the default recursive drop
    // would overflow the host stack on long cycles.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        pending.extend(self.root.take());
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl Display for SpTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.root.as_deref() {
            Some(root) => write!(f, "{{{},{}}}", root.source, root.sink),
            None => write!(f, "(empty tree)"),
        }
    }
}
