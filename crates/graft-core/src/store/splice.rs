//! Reading through `SyntaxList` groupings
//!
//! Groupings may nest arbitrarily and carry comments of their own. Every
//! consumer that cares about the significant children of a node (the
//! reconstruction engine, the equivalence checker) reads them through
//! [`Store::spliced_children`] so both see the same flat run.

use std::sync::Arc;

use indexmap::IndexSet;

use super::{Comment, Node, NodeId, Store};
use crate::cst::TsSyntaxKind;
use crate::error::GraftError;
use crate::result::Result;

/// Flat children of a node
#[derive(Debug, Default)]
pub struct Spliced {
    pub children: Vec<Arc<Node>>,
    /// Comments that had no child to attach to
    pub orphaned: Vec<Comment>,
}

impl Store {
    /// Children of `node` with groupings spliced in and comment nodes folded
    /// into their neighbours
    ///
    /// A grouping's leading comments move onto its first child and its
    /// trailing comments onto its last. A comment node becomes a leading
    /// comment of the next child, or a trailing comment of the last one.
    pub fn spliced_children(&self, node: &Node) -> Result<Spliced> {
        let mut out = Spliced::default();
        let mut pending = Vec::new();
        let mut visiting = IndexSet::new();
        visiting.insert(node.id().clone());
        self.splice_into(node, &mut visiting, &mut out.children, &mut pending)?;
        if !pending.is_empty() {
            match out.children.last_mut() {
                Some(last) => *last = Arc::new(last.with_comments(&[], &pending)),
                None => out.orphaned = pending,
            }
        }
        Ok(out)
    }

    fn splice_into(
        &self,
        parent: &Node,
        visiting: &mut IndexSet<NodeId>,
        out: &mut Vec<Arc<Node>>,
        pending: &mut Vec<Comment>,
    ) -> Result<()> {
        for id in parent.children() {
            let child = self.lookup(id.as_str())?;
            match child.syntax_kind() {
                Some(TsSyntaxKind::SyntaxList) => {
                    if !visiting.insert(child.id().clone()) {
                        return Err(GraftError::invalid_node(
                            child.id().clone(),
                            "grouping contains itself",
                        ));
                    }
                    let start = out.len();
                    pending.extend_from_slice(child.leading_comments());
                    self.splice_into(&child, visiting, out, pending)?;
                    visiting.pop();
                    if child.trailing_comments().is_empty() {
                        continue;
                    }
                    if out.len() > start {
                        if let Some(last) = out.last_mut() {
                            *last = Arc::new(last.with_comments(&[], child.trailing_comments()));
                        }
                    } else {
                        pending.extend_from_slice(child.trailing_comments());
                    }
                }
                Some(kind) if kind.is_comment() => {
                    pending.push(Comment::from_raw(child.text().unwrap_or_default()));
                    pending.extend_from_slice(child.trailing_comments());
                }
                _ if pending.is_empty() => out.push(child),
                _ => {
                    let comments = std::mem::take(pending);
                    out.push(Arc::new(child.with_comments(&comments, &[])));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CommentKind;

    fn ident(id: &str) -> Node {
        Node::builder(id, TsSyntaxKind::Identifier.raw()).text(id).build()
    }

    #[test]
    fn test_nested_groupings_are_flattened_with_comments_moved() {
        let inner = Node::builder("inner", TsSyntaxKind::SyntaxList.raw())
            .children(["b", "c"])
            .trailing_comment(Comment::new(CommentKind::Block, "tail"))
            .build();
        let outer = Node::builder("outer", TsSyntaxKind::SyntaxList.raw())
            .children(["a", "inner"])
            .leading_comment(Comment::new(CommentKind::SingleLine, "head"))
            .build();
        let block = Node::builder("blk", TsSyntaxKind::Block.raw())
            .child("outer")
            .build();
        let store = Store::new("t.ts")
            .merge(
                vec![ident("a"), ident("b"), ident("c"), inner, outer, block],
                NodeId::new("blk"),
                None,
            )
            .expect("merge");

        let blk = store.lookup("blk").expect("blk");
        let spliced = store.spliced_children(&blk).expect("splice");
        let ids: Vec<_> = spliced.children.iter().map(|n| n.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(spliced.children[0].leading_comments()[0].text, "head");
        assert_eq!(spliced.children[2].trailing_comments()[0].text, "tail");
        assert!(spliced.orphaned.is_empty());
    }

    #[test]
    fn test_comment_nodes_attach_to_the_next_child() {
        let comment = Node::builder("cm", TsSyntaxKind::SingleLineComment.raw())
            .text("// note")
            .build();
        let list = Node::builder("l", TsSyntaxKind::SyntaxList.raw())
            .children(["cm", "a"])
            .build();
        let store = Store::new("t.ts")
            .merge(vec![comment, ident("a"), list], NodeId::new("l"), None)
            .expect("merge");
        let list = store.lookup("l").expect("l");
        let spliced = store.spliced_children(&list).expect("splice");
        assert_eq!(spliced.children.len(), 1);
        assert_eq!(spliced.children[0].leading_comments()[0].delimited(), "// note");
    }

    #[test]
    fn test_comments_with_no_child_are_orphaned() {
        let empty = Node::builder("e", TsSyntaxKind::SyntaxList.raw())
            .leading_comment(Comment::new(CommentKind::Block, "alone"))
            .build();
        let block = Node::builder("blk", TsSyntaxKind::Block.raw()).child("e").build();
        let store = Store::new("t.ts")
            .merge(vec![empty, block], NodeId::new("blk"), None)
            .expect("merge");
        let blk = store.lookup("blk").expect("blk");
        let spliced = store.spliced_children(&blk).expect("splice");
        assert!(spliced.children.is_empty());
        assert_eq!(spliced.orphaned.len(), 1);
    }
}
