//! Parse results waiting to be merged, and a builder for producing them

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Comment, IdMinter, Node, NodeBuilder, NodeId, PropertyValue};
use crate::cst::TsSyntaxKind;

/// Counters reported by a parser alongside its output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    pub node_count: usize,
    pub token_count: usize,
    pub comment_count: usize,
    pub max_depth: usize,
}

/// A freshly parsed graph: its root and every node it introduces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutput {
    pub root: NodeId,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub stats: ParseStats,
}

/// Incremental construction of a [`ParseOutput`]
///
/// Children must be added before their parents; every node receives a
/// fresh id from the minter.
#[derive(Debug)]
pub struct GraphBuilder {
    minter: IdMinter,
    nodes: IndexMap<NodeId, Node>,
}

impl GraphBuilder {
    pub fn new(minter: IdMinter) -> Self {
        Self {
            minter,
            nodes: IndexMap::new(),
        }
    }

    /// Fixed token spelled with its canonical text
    pub fn token(&mut self, kind: TsSyntaxKind) -> NodeId {
        let builder = self.start(kind);
        let builder = match kind.canonical_text() {
            Some(text) => builder.text(text),
            None => builder,
        };
        self.add(builder)
    }

    /// Token with source text (identifier, literal)
    pub fn leaf(&mut self, kind: TsSyntaxKind, text: impl Into<String>) -> NodeId {
        let builder = self.start(kind).text(text);
        self.add(builder)
    }

    pub fn node(&mut self, kind: TsSyntaxKind, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        let builder = self.start(kind).children(children);
        self.add(builder)
    }

    /// `SyntaxList` grouping
    pub fn list(&mut self, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.node(TsSyntaxKind::SyntaxList, children)
    }

    /// Node with a raw kind code, including codes outside the grammar
    pub fn raw(&mut self, kind: u16, children: impl IntoIterator<Item = NodeId>) -> NodeId {
        let id = self.minter.mint();
        self.add(Node::builder(id, kind).children(children))
    }

    /// Token with a raw kind code and source text
    pub fn raw_leaf(&mut self, kind: u16, text: impl Into<String>) -> NodeId {
        let id = self.minter.mint();
        self.add(Node::builder(id, kind).text(text))
    }

    /// Builder pre-filled with a fresh id, for nodes that need comments or
    /// properties; finish it with [`GraphBuilder::add`]
    pub fn start(&mut self, kind: TsSyntaxKind) -> NodeBuilder {
        Node::builder(self.minter.mint(), kind.raw())
    }

    pub fn add(&mut self, builder: NodeBuilder) -> NodeId {
        let node = builder.build();
        let id = node.id().clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Replace an already added node with a copy carrying extra comments
    pub fn comment(&mut self, id: &NodeId, leading: bool, comment: Comment) {
        if let Some(node) = self.nodes.get_mut(id) {
            let builder = rebuild(node);
            let builder = if leading {
                builder.leading_comment(comment)
            } else {
                builder.trailing_comment(comment)
            };
            *node = builder.build();
        }
    }

    /// Replace an already added node with a copy carrying a property
    pub fn property(&mut self, id: &NodeId, key: &str, value: PropertyValue) {
        if let Some(node) = self.nodes.get_mut(id) {
            *node = rebuild(node).property(key, value).build();
        }
    }

    /// Minter state, for handing id generation back to the caller
    pub fn minter(&self) -> &IdMinter {
        &self.minter
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn finish(self, root: NodeId) -> ParseOutput {
        let stats = compute_stats(&self.nodes, &root);
        ParseOutput {
            root,
            nodes: self.nodes.into_values().collect(),
            stats,
        }
    }
}

fn rebuild(node: &Node) -> NodeBuilder {
    let mut builder = Node::builder(node.id().clone(), node.kind()).children(node.children().iter());
    if let Some(text) = node.text() {
        builder = builder.text(text);
    }
    for (key, value) in node.properties() {
        builder = builder.property(key.clone(), value.clone());
    }
    for comment in node.leading_comments() {
        builder = builder.leading_comment(comment.clone());
    }
    for comment in node.trailing_comments() {
        builder = builder.trailing_comment(comment.clone());
    }
    builder
}

fn compute_stats(nodes: &IndexMap<NodeId, Node>, root: &NodeId) -> ParseStats {
    let mut stats = ParseStats {
        node_count: nodes.len(),
        ..ParseStats::default()
    };
    for node in nodes.values() {
        if node.syntax_kind().is_some_and(TsSyntaxKind::is_token) {
            stats.token_count += 1;
        }
        stats.comment_count += node.leading_comments().len() + node.trailing_comments().len();
    }

    let mut stack = vec![(root, 1usize)];
    while let Some((id, depth)) = stack.pop() {
        if depth > nodes.len() {
            continue;
        }
        stats.max_depth = stats.max_depth.max(depth);
        if let Some(node) = nodes.get(id) {
            stack.extend(node.children().iter().map(|child| (child, depth + 1)));
        }
    }
    stats
}
