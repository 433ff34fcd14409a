//! Arena-backed tree of styled text nodes.
//!
//! A [`StyledText`] owns every node of a parsed string. Nodes refer to their
//! parent and children through [`NodeId`] indices into the arena, so there are
//! no reference cycles and no shared ownership. Read access goes through
//! [`NodeRef`] handles, which pair an id with the tree it belongs to.
//!
//! Nodes are stored in document order: a node's index is always greater than
//! its parent's and than any node that precedes it in the source text.

use std::fmt;

use crate::{END_TAG, HYPERLINK_STYLE, START_TAG, START_TAG_CLOSE};

/// Index of a node inside a [`StyledText`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena (and in document order).
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Text(String),
    Styled {
        styles: Vec<String>,
        children: Vec<NodeId>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) closed: bool,
    pub(crate) hyperlink: bool,
    pub(crate) offset: usize,
}

/// Pre-order traversal event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Walk {
    Enter(NodeId),
    Exit(NodeId),
}

/// A parsed string: the synthetic root plus every text and styled node below it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledText {
    nodes: Vec<Node>,
}

const ROOT: NodeId = NodeId(0);

impl StyledText {
    /// Creates a tree holding only the synthetic root.
    ///
    /// The root is already closed so that top-level text is plain.
    pub(crate) fn new() -> Self {
        StyledText {
            nodes: vec![Node {
                kind: NodeKind::Styled {
                    styles: Vec::new(),
                    children: Vec::new(),
                },
                parent: None,
                closed: true,
                hyperlink: false,
                offset: 0,
            }],
        }
    }

    /// Creates a tree whose only content is `text` as one literal leaf.
    pub fn plain(text: impl Into<String>) -> Self {
        let mut tree = StyledText::new();
        tree.push_text(ROOT, text.into(), 0);
        tree
    }

    pub(crate) fn push_text(&mut self, parent: NodeId, text: String, offset: usize) -> NodeId {
        self.push(
            parent,
            Node {
                kind: NodeKind::Text(text),
                parent: Some(parent),
                closed: true,
                hyperlink: false,
                offset,
            },
        )
    }

    pub(crate) fn push_styled(
        &mut self,
        parent: NodeId,
        styles: Vec<String>,
        offset: usize,
    ) -> NodeId {
        let hyperlink = styles.iter().any(|s| s == HYPERLINK_STYLE);
        self.push(
            parent,
            Node {
                kind: NodeKind::Styled {
                    styles,
                    children: Vec::new(),
                },
                parent: Some(parent),
                closed: false,
                hyperlink,
                offset,
            },
        )
    }

    fn push(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        if let NodeKind::Styled { children, .. } = &mut self.nodes[parent.0].kind {
            children.push(id);
        }
        id
    }

    /// Marks a node closed. Returns `false` if it already was.
    pub(crate) fn close(&mut self, id: NodeId) -> bool {
        let node = &mut self.nodes[id.0];
        if node.closed {
            return false;
        }
        node.closed = true;
        true
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The synthetic root node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: ROOT,
        }
    }

    /// Looks up a node by id.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least the root; this reports whether it holds nothing else.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Every node in document order, starting with the root.
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        (0..self.nodes.len()).map(move |i| NodeRef {
            tree: self,
            id: NodeId(i),
        })
    }

    /// Text leaves in document order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.nodes().filter(|n| n.is_leaf())
    }

    /// Concatenation of all leaf texts, i.e. the visible text.
    pub fn plain_text(&self) -> String {
        self.leaves().map(|n| n.text()).collect()
    }

    /// True when every node in the tree has had its end tag matched.
    pub fn is_completely_closed(&self) -> bool {
        self.nodes.iter().all(|n| n.closed)
    }

    /// Serializes the tree back into markup.
    ///
    /// Tag bodies are normalized to single spaces between tokens.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.walk(|event| match event {
            Walk::Enter(id) if id != ROOT => match &self.node(id).kind {
                NodeKind::Text(text) => out.push_str(text),
                NodeKind::Styled { styles, .. } => out.push_str(&start_tag(styles)),
            },
            Walk::Exit(id) if id != ROOT => {
                if let NodeKind::Styled { .. } = self.node(id).kind {
                    out.push_str(END_TAG);
                }
            }
            _ => {}
        });
        out
    }

    /// Depth-first, pre-order traversal with an explicit stack.
    pub(crate) fn walk(&self, mut visit: impl FnMut(Walk)) {
        let mut stack = vec![Walk::Enter(ROOT)];
        while let Some(event) = stack.pop() {
            visit(event);
            if let Walk::Enter(id) = event {
                stack.push(Walk::Exit(id));
                if let NodeKind::Styled { children, .. } = &self.node(id).kind {
                    stack.extend(children.iter().rev().map(|&c| Walk::Enter(c)));
                }
            }
        }
    }
}

/// Builds the start tag for a list of style tokens, e.g. `<+bt bold red>`.
pub(crate) fn start_tag<S: AsRef<str>>(styles: &[S]) -> String {
    let mut tag = String::from(START_TAG);
    for style in styles {
        tag.push(' ');
        tag.push_str(style.as_ref());
    }
    tag.push_str(START_TAG_CLOSE);
    tag
}

impl fmt::Display for StyledText {
    /// Dumps the tree, one node per line, indented four spaces per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0usize;
        let mut result = Ok(());
        self.walk(|event| match event {
            Walk::Enter(id) => {
                if result.is_ok() {
                    let node = NodeRef { tree: self, id };
                    result = writeln!(
                        f,
                        "{:indent$}[{}]{}",
                        "",
                        node.styles().join(", "),
                        node.text(),
                        indent = depth * 4
                    );
                }
                depth += 1;
            }
            Walk::Exit(_) => depth -= 1,
        });
        result
    }
}

/// A borrowed handle to one node of a [`StyledText`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    pub(crate) tree: &'a StyledText,
    pub(crate) id: NodeId,
}

impl<'a> NodeRef<'a> {
    /// This node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to.
    pub fn tree(&self) -> &'a StyledText {
        self.tree
    }

    /// Literal text of a leaf; empty for styled nodes.
    pub fn text(&self) -> &'a str {
        match &self.tree.node(self.id).kind {
            NodeKind::Text(text) => text,
            NodeKind::Styled { .. } => "",
        }
    }

    /// Own style tokens in tag order; empty for leaves.
    pub fn styles(&self) -> &'a [String] {
        match &self.tree.node(self.id).kind {
            NodeKind::Text(_) => &[],
            NodeKind::Styled { styles, .. } => styles,
        }
    }

    /// True when `hyperlink` is one of this node's own tokens.
    pub fn is_hyperlink(&self) -> bool {
        self.tree.node(self.id).hyperlink
    }

    pub fn is_closed(&self) -> bool {
        self.tree.node(self.id).closed
    }

    /// True for literal text nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self.tree.node(self.id).kind, NodeKind::Text(_))
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT
    }

    /// Byte offset in the parsed input where this node's tag or text begins.
    pub fn offset(&self) -> usize {
        self.tree.node(self.id).offset
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.tree.node(self.id).parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Direct children in document order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        let ids: &'a [NodeId] = match &tree.node(self.id).kind {
            NodeKind::Text(_) => &[],
            NodeKind::Styled { children, .. } => children,
        };
        ids.iter().map(move |&id| NodeRef { tree, id })
    }

    /// True if this node and every node below it are closed.
    pub fn is_completely_closed(&self) -> bool {
        let mut stack = vec![*self];
        while let Some(node) = stack.pop() {
            if !node.is_closed() {
                return false;
            }
            stack.extend(node.children());
        }
        true
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("styles", &self.styles())
            .field("text", &self.text())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}
