//! Turning concrete trees back into node graphs
//!
//! [`SourceParser`] is the seam for whatever produces graphs from source.
//! [`CstIngester`] is the parser this crate ships: its input is an already
//! built concrete tree, so the reconstruct, ingest, compare loop can be
//! closed without a text parser.
//!
//! Every element of the tree becomes one node, tokens included. Comment
//! tokens become comments on a neighbour: leading comments of the next
//! sibling, trailing comments of the last sibling when nothing follows. On
//! the root, comments before the first and after the last child stay on the
//! root itself.

use rowan::{GreenNode, GreenNodeData, NodeOrToken};
use tracing::debug;

use crate::cst::TsSyntaxKind;
use crate::cst::green::GreenElementRef;
use crate::error::GraftError;
use crate::result::Result;
use crate::store::{Comment, GraphBuilder, IdMinter, NodeId, ParseOutput, Store};

/// Source of fresh node graphs
///
/// Implementations mint every id from `minter`, list children in concrete
/// syntax order with tokens as explicit nodes, and attach comments as
/// leading or trailing lists.
pub trait SourceParser {
    type Input: ?Sized;

    fn parse(&mut self, input: &Self::Input, minter: &mut IdMinter) -> Result<ParseOutput>;
}

/// [`SourceParser`] over concrete trees
#[derive(Debug, Clone, Copy, Default)]
pub struct CstIngester;

enum Item {
    Child(NodeId),
    Comment(Comment),
}

struct Frame<'a> {
    node: &'a GreenNodeData,
    children: Vec<GreenElementRef<'a>>,
    next: usize,
    items: Vec<Item>,
}

impl<'a> Frame<'a> {
    fn new(node: &'a GreenNodeData) -> Self {
        Self {
            node,
            children: node.children().collect(),
            next: 0,
            items: Vec::new(),
        }
    }
}

impl CstIngester {
    pub fn new() -> Self {
        Self
    }

    /// Ingest `tree` as the next version of `store`
    pub fn ingest_into(&mut self, store: &Store, tree: &GreenNode, description: Option<String>) -> Result<Store> {
        let mut minter = IdMinter::for_store(store);
        let output = self.parse(tree, &mut minter)?;
        store.merge_output(output, description)
    }

    fn token(graph: &mut GraphBuilder, raw: u16, text: &str) -> Item {
        match TsSyntaxKind::from_raw(raw) {
            Some(kind) if kind.is_comment() => Item::Comment(Comment::from_raw(text)),
            Some(kind) if kind.canonical_text() == Some(text) => Item::Child(graph.token(kind)),
            Some(kind) => Item::Child(graph.leaf(kind, text)),
            None => Item::Child(graph.raw_leaf(raw, text)),
        }
    }

    /// Create the node for a finished frame and distribute its comments
    fn close(graph: &mut GraphBuilder, frame: Frame<'_>, is_root: bool) -> NodeId {
        let raw = frame.node.kind().0;
        let owns_boundary = is_root && raw != TsSyntaxKind::SyntaxList.raw();

        let mut children: Vec<NodeId> = Vec::new();
        let mut own_leading = Vec::new();
        let mut pending = Vec::new();
        for item in frame.items {
            match item {
                Item::Comment(comment) if owns_boundary && children.is_empty() => {
                    own_leading.push(comment)
                }
                Item::Comment(comment) => pending.push(comment),
                Item::Child(id) => {
                    for comment in pending.drain(..) {
                        graph.comment(&id, true, comment);
                    }
                    children.push(id);
                }
            }
        }

        let mut own_trailing = Vec::new();
        match children.last() {
            Some(last) if !owns_boundary => {
                for comment in pending {
                    graph.comment(last, false, comment);
                }
            }
            _ => own_trailing = pending,
        }

        let id = match TsSyntaxKind::from_raw(raw) {
            Some(kind) => graph.node(kind, children),
            None => graph.raw(raw, children),
        };
        for comment in own_leading {
            graph.comment(&id, true, comment);
        }
        for comment in own_trailing {
            graph.comment(&id, false, comment);
        }
        id
    }
}

impl SourceParser for CstIngester {
    type Input = GreenNode;

    fn parse(&mut self, input: &GreenNode, minter: &mut IdMinter) -> Result<ParseOutput> {
        let mut graph = GraphBuilder::new(minter.clone());
        let mut frames = vec![Frame::new(input)];

        // Post-order over an explicit stack: children are added before
        // their parent
        let mut root = None;
        while let Some(mut frame) = frames.pop() {
            match frame.children.get(frame.next).copied() {
                Some(NodeOrToken::Token(token)) => {
                    frame.next += 1;
                    let item = Self::token(&mut graph, token.kind().0, token.text());
                    frame.items.push(item);
                    frames.push(frame);
                }
                Some(NodeOrToken::Node(node)) => {
                    frame.next += 1;
                    frames.push(frame);
                    frames.push(Frame::new(node));
                }
                None => {
                    let id = Self::close(&mut graph, frame, frames.is_empty());
                    match frames.last_mut() {
                        Some(parent) => parent.items.push(Item::Child(id)),
                        None => root = Some(id),
                    }
                }
            }
        }
        let root = root.ok_or_else(|| GraftError::invalid_structure("tree has no root"))?;

        *minter = graph.minter().clone();
        let output = graph.finish(root);
        debug!(
            "Ingested {} node(s), {} token(s), {} comment(s)",
            output.stats.node_count, output.stats.token_count, output.stats.comment_count
        );
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::green::{self, GreenElement};

    fn t(kind: TsSyntaxKind) -> GreenElement {
        green::canonical(kind)
    }

    fn stmt(name: &str) -> GreenElement {
        green::node(
            TsSyntaxKind::ExpressionStatement,
            vec![green::token(TsSyntaxKind::Identifier, name), t(TsSyntaxKind::Semicolon)],
        )
    }

    fn parse(tree: &GreenNode) -> (Store, ParseOutput) {
        let mut minter = IdMinter::new(0);
        let output = CstIngester.parse(tree, &mut minter).expect("parse");
        assert_eq!(minter.minted() as usize, output.nodes.len());
        let store = Store::new("t.ts")
            .merge_output(output.clone(), None)
            .expect("merge");
        (store, output)
    }

    #[test]
    fn test_every_element_becomes_a_node() {
        let tree = green::node(
            TsSyntaxKind::SourceFile,
            vec![
                green::node(TsSyntaxKind::SyntaxList, vec![stmt("a"), stmt("b")]),
                t(TsSyntaxKind::EndOfFile),
            ],
        )
        .into_node()
        .expect("node");
        let (store, output) = parse(&tree);

        assert_eq!(output.nodes.len(), 9);
        assert_eq!(output.stats.token_count, 5);
        let root = store.lookup(output.root.as_str()).expect("root");
        assert_eq!(root.syntax_kind(), Some(TsSyntaxKind::SourceFile));
        assert_eq!(root.children().len(), 2);
        let eof = store.lookup(root.children()[1].as_str()).expect("eof");
        assert_eq!(eof.text(), Some(""));
    }

    #[test]
    fn test_comments_attach_to_neighbours() {
        let list = green::node(
            TsSyntaxKind::SyntaxList,
            vec![
                green::token(TsSyntaxKind::SingleLineComment, "// first"),
                stmt("a"),
                green::token(TsSyntaxKind::MultiLineComment, "/* tail */"),
            ],
        );
        let tree = green::node(TsSyntaxKind::Block, vec![t(TsSyntaxKind::OpenBrace), list, t(TsSyntaxKind::CloseBrace)])
            .into_node()
            .expect("node");
        let (store, output) = parse(&tree);

        let statement = store
            .nodes()
            .find(|n| n.is(TsSyntaxKind::ExpressionStatement))
            .expect("statement");
        assert_eq!(statement.leading_comments()[0].delimited(), "// first");
        assert_eq!(statement.trailing_comments()[0].delimited(), "/* tail */");
        assert_eq!(output.stats.comment_count, 2);
    }

    #[test]
    fn test_root_keeps_boundary_comments() {
        let tree = green::node(
            TsSyntaxKind::ExpressionStatement,
            vec![
                green::token(TsSyntaxKind::MultiLineComment, "/** doc */"),
                green::token(TsSyntaxKind::Identifier, "x"),
                t(TsSyntaxKind::Semicolon),
            ],
        )
        .into_node()
        .expect("node");
        let (store, output) = parse(&tree);
        let root = store.lookup(output.root.as_str()).expect("root");
        assert_eq!(root.leading_comments().len(), 1);
        assert_eq!(root.children().len(), 2);
    }
}
