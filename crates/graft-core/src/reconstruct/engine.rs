//! Dispatch, comment reattachment and depth guarding

use std::sync::Arc;

use indexmap::IndexSet;
use rowan::{GreenNode, NodeOrToken};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::context::Cx;
use super::emit::Built;
use super::registry;
use crate::cst::green::{self, GreenElement};
use crate::cst::{TsSyntaxKind, TsSyntaxNode};
use crate::diagnostics::Diagnostic;
use crate::error::GraftError;
use crate::result::Result;
use crate::store::{Comment, Node, NodeId, Store};

/// Reconstruction settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconstructOptions {
    /// Deepest nesting accepted before the graph is treated as malformed
    pub max_depth: usize,
    /// Re-attach recorded comments as trivia
    pub include_comments: bool,
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            max_depth: 512,
            include_comments: true,
        }
    }
}

/// A reconstructed concrete tree
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub root_id: NodeId,
    pub green: GreenNode,
    pub diagnostics: Vec<Diagnostic>,
}

impl Reconstruction {
    /// Red tree view for navigation
    pub fn syntax(&self) -> TsSyntaxNode {
        TsSyntaxNode::new_root(self.green.clone())
    }

    /// Concatenated token text, no layout
    pub fn text(&self) -> String {
        self.syntax().text().to_string()
    }
}

/// Reconstruct the subtree rooted at `id`
pub fn reconstruct(store: &Store, id: &str, options: &ReconstructOptions) -> Result<Reconstruction> {
    let node = store.lookup(id)?;
    let mut rec = Recurse::new(store, options);
    let built = rec.build(&node)?;

    let green = match built.element {
        NodeOrToken::Node(root) if !built.leading.is_empty() || !built.trailing.is_empty() => {
            let mut children = built.leading;
            children.extend(root.children().map(green::to_owned));
            children.extend(built.trailing);
            GreenNode::new(root.kind(), children)
        }
        NodeOrToken::Node(root) => root,
        token @ NodeOrToken::Token(_) => {
            let mut children = built.leading;
            children.push(token);
            children.extend(built.trailing);
            GreenNode::new(TsSyntaxKind::SyntaxList.into(), children)
        }
    };

    debug!(
        "Reconstructed '{}' with {} diagnostic(s)",
        node.id(),
        rec.diagnostics.len()
    );

    Ok(Reconstruction {
        root_id: node.id().clone(),
        green,
        diagnostics: rec.diagnostics,
    })
}

/// The recursive "reconstruct a child" capability handed to builders
pub struct Recurse<'s> {
    store: &'s Store,
    options: &'s ReconstructOptions,
    active: IndexSet<NodeId>,
    diagnostics: Vec<Diagnostic>,
}

impl<'s> Recurse<'s> {
    pub fn new(store: &'s Store, options: &'s ReconstructOptions) -> Self {
        Self {
            store,
            options,
            active: IndexSet::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn store(&self) -> &'s Store {
        self.store
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Kind of the node whose builder is reconstructing the current one
    pub fn parent_kind(&self) -> Option<TsSyntaxKind> {
        let parent = self.active.len().checked_sub(2)?;
        let id = self.active.get_index(parent)?;
        self.store.get(id.as_str())?.syntax_kind()
    }

    /// Reconstruct a child by id
    pub fn build_id(&mut self, id: &str) -> Result<Built> {
        let node = self.store.lookup(id)?;
        self.build(&node)
    }

    /// Reconstruct a node and attach its comments
    pub fn build(&mut self, node: &Arc<Node>) -> Result<Built> {
        if self.active.len() >= self.options.max_depth {
            return Err(GraftError::invalid_node(
                node.id().clone(),
                format!("nesting exceeds {} levels", self.options.max_depth),
            ));
        }
        if !self.active.insert(node.id().clone()) {
            return Err(GraftError::invalid_node(
                node.id().clone(),
                "node is its own ancestor",
            ));
        }
        let element = self.dispatch(node);
        self.active.pop();

        let mut built = Built::bare(element?);
        if self.options.include_comments {
            built.leading = node.leading_comments().iter().map(comment_token).collect();
            built.trailing = node.trailing_comments().iter().map(comment_token).collect();
        }
        Ok(built)
    }

    fn dispatch(&mut self, node: &Arc<Node>) -> Result<GreenElement> {
        let builder = node.syntax_kind().and_then(|kind| {
            registry::builder_for(kind).map(|builder| (kind, builder))
        });
        let Some((kind, builder)) = builder else {
            return Ok(self.placeholder(node));
        };

        let mut cx = Cx::new(self, node.clone(), kind)?;
        let element = builder(&mut cx)?;
        cx.finish()?;
        Ok(element)
    }

    fn placeholder(&mut self, node: &Node) -> GreenElement {
        let name = node.kind_name();
        warn!("No builder for {} '{}', emitting placeholder", name, node.id());
        self.diagnostics.push(Diagnostic::unsupported(node.id(), name.clone()));
        green::token(TsSyntaxKind::Placeholder, &placeholder_text(&name))
    }
}

/// Text of the stand-in leaf for an unsupported kind
pub fn placeholder_text(kind_name: &str) -> String {
    format!("/* unsupported: {kind_name} */")
}

fn comment_token(comment: &Comment) -> GreenElement {
    green::token(comment.syntax_kind(), &comment.delimited())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::{CommentKind, NodeId};

    fn store_of(nodes: Vec<Node>, root: &str) -> Store {
        Store::new("test.ts")
            .merge(nodes, NodeId::new(root), None)
            .expect("merge")
    }

    fn node(id: &str, kind: TsSyntaxKind, children: &[&str]) -> Node {
        Node::builder(id, kind.raw())
            .children(children.iter().copied())
            .build()
    }

    fn ident(id: &str, name: &str) -> Node {
        Node::builder(id, TsSyntaxKind::Identifier.raw()).text(name).build()
    }

    #[test]
    fn test_token_root_is_wrapped_in_list() {
        let store = store_of(vec![ident("a", "x")], "a");
        let out = reconstruct(&store, "a", &ReconstructOptions::default()).expect("ok");
        assert_eq!(out.syntax().kind(), TsSyntaxKind::SyntaxList);
        assert_eq!(out.text(), "x");
    }

    #[test]
    fn test_unknown_kind_becomes_placeholder_with_diagnostic() {
        let store = store_of(
            vec![
                ident("a", "ok"),
                Node::builder("b", 4242).build(),
                node("s", TsSyntaxKind::SyntaxList, &["a", "b"]),
            ],
            "s",
        );
        let out = reconstruct(&store, "s", &ReconstructOptions::default()).expect("ok");
        assert_eq!(out.text(), "ok/* unsupported: Unknown(4242) */");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind_name, "Unknown(4242)");
    }

    #[test]
    fn test_root_comments_live_inside_root() {
        let stmt = Node::builder("s", TsSyntaxKind::ExpressionStatement.raw())
            .child("a")
            .leading_comment(Comment::new(CommentKind::SingleLine, "lead"))
            .build();
        let store = store_of(vec![ident("a", "x"), stmt], "s");
        let out = reconstruct(&store, "s", &ReconstructOptions::default()).expect("ok");
        assert_eq!(out.syntax().kind(), TsSyntaxKind::ExpressionStatement);
        assert_eq!(out.text(), "// leadx;");

        let bare = ReconstructOptions {
            include_comments: false,
            ..ReconstructOptions::default()
        };
        let out = reconstruct(&store, "s", &bare).expect("ok");
        assert_eq!(out.text(), "x;");
    }

    #[test]
    fn test_depth_limit() {
        let mut nodes = vec![ident("leaf", "x")];
        let mut child = "leaf".to_string();
        for level in 0..10 {
            let id = format!("p{level}");
            nodes.push(
                Node::builder(id.as_str(), TsSyntaxKind::ParenthesizedExpression.raw())
                    .child(child.as_str())
                    .build(),
            );
            child = id;
        }
        let store = store_of(nodes, "p9");
        let shallow = ReconstructOptions {
            max_depth: 4,
            ..ReconstructOptions::default()
        };
        let err = reconstruct(&store, "p9", &shallow).expect_err("too deep");
        assert_eq!(err.kind(), ErrorKind::InvalidStructure);

        let out = reconstruct(&store, "p9", &ReconstructOptions::default()).expect("ok");
        assert_eq!(out.text(), "((((((((((x))))))))))");
    }

    #[test]
    fn test_missing_required_child() {
        let store = store_of(vec![node("i", TsSyntaxKind::IfStatement, &[])], "i");
        let err = reconstruct(&store, "i", &ReconstructOptions::default()).expect_err("no condition");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredChild);
        assert_eq!(err.node_id().map(NodeId::as_str), Some("i"));
    }
}
