//! Structural equivalence of two node graphs
//!
//! Two subtrees are equivalent when a lockstep pre-order walk finds the same
//! kinds, the same token text and the same number of significant children
//! everywhere. A few rewrites that reconstruction is allowed to make are
//! transparent:
//!
//! - `SyntaxList` groupings are spliced into their parent, so nested and flat
//!   groupings compare equal.
//! - A parenthesized wrapper on one side only is unwrapped and the
//!   comparison retried, as are braces around a single-statement `if`
//!   branch.
//! - Optional punctuation is ignored: the trailing `;` of statements and
//!   members, and a `,` directly before a closing token (unless it follows an
//!   array hole, where it is significant).
//! - Comments count only with [`EquivalenceOptions::compare_comments`].
//!
//! The walk uses an explicit stack and stops at the first divergence.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cst::TsSyntaxKind;
use crate::result::Result;
use crate::store::{Comment, Node, NodeId, Store};

/// Equivalence settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquivalenceOptions {
    /// Also require identical leading and trailing comments
    pub compare_comments: bool,
}

/// Outcome of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum Equivalence {
    Equivalent,
    /// First point where the two sides differ, with the id path from each
    /// root down to it
    Diverged {
        left_path: Vec<NodeId>,
        right_path: Vec<NodeId>,
        reason: String,
    },
}

impl Equivalence {
    pub fn is_equivalent(&self) -> bool {
        matches!(self, Equivalence::Equivalent)
    }
}

/// One side of the walk: visited nodes as a parent-pointer arena, so a path
/// is only materialized on divergence
struct Side<'a> {
    store: &'a Store,
    frames: Vec<(Arc<Node>, Option<usize>)>,
}

impl<'a> Side<'a> {
    fn new(store: &'a Store) -> Self {
        Self {
            store,
            frames: Vec::new(),
        }
    }

    fn push(&mut self, node: Arc<Node>, parent: Option<usize>) -> usize {
        self.frames.push((node, parent));
        self.frames.len() - 1
    }

    fn node(&self, frame: usize) -> &Arc<Node> {
        &self.frames[frame].0
    }

    fn path(&self, frame: usize) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(frame);
        while let Some(index) = current {
            let (node, parent) = &self.frames[index];
            path.push(node.id().clone());
            current = *parent;
        }
        path.reverse();
        path
    }

    /// Significant children: groupings spliced, optional punctuation removed
    fn children(&self, node: &Node) -> Result<Vec<Arc<Node>>> {
        let children = self.store.spliced_children(node)?.children;
        Ok(significant(node.syntax_kind(), children))
    }

    /// The single inner child of a wrapper reconstruction may add: a
    /// parenthesized node, or braces around an `if` branch
    fn unwrap_wrapper(&self, frame: usize) -> Result<Option<Arc<Node>>> {
        let node = self.node(frame);
        let (open, close) = if node.syntax_kind().is_some_and(TsSyntaxKind::is_parenthesized) {
            (TsSyntaxKind::OpenParen, TsSyntaxKind::CloseParen)
        } else if node.is(TsSyntaxKind::Block) && self.parent_is(frame, TsSyntaxKind::IfStatement) {
            (TsSyntaxKind::OpenBrace, TsSyntaxKind::CloseBrace)
        } else {
            return Ok(None);
        };
        let mut inner = self
            .children(node)?
            .into_iter()
            .filter(|child| !(child.is(open) || child.is(close)));
        match (inner.next(), inner.next()) {
            (Some(only), None) => Ok(Some(only)),
            _ => Ok(None),
        }
    }

    fn parent_is(&self, frame: usize, kind: TsSyntaxKind) -> bool {
        self.frames[frame]
            .1
            .is_some_and(|parent| self.node(parent).is(kind))
    }

    /// Root with single-child groupings resolved
    fn resolve_root(&self, mut node: Arc<Node>) -> Result<Arc<Node>> {
        while node.is(TsSyntaxKind::SyntaxList) {
            let mut children = self.children(&node)?;
            if children.len() != 1 {
                break;
            }
            node = children.remove(0);
        }
        Ok(node)
    }
}

/// Whether a parent of this kind ends with an optional `;`
fn has_optional_terminator(kind: TsSyntaxKind) -> bool {
    kind.is_statement() || kind.is_member()
}

/// Drop punctuation whose presence does not change the parsed structure
fn significant(parent: Option<TsSyntaxKind>, children: Vec<Arc<Node>>) -> Vec<Arc<Node>> {
    let mut kept: Vec<Arc<Node>> = Vec::with_capacity(children.len());
    let count = children.len();
    for (index, child) in children.iter().enumerate() {
        if child.is(TsSyntaxKind::Comma) {
            let before_close = children
                .get(index + 1)
                .and_then(|next| next.syntax_kind())
                .is_some_and(TsSyntaxKind::is_closing);
            let after_hole = kept
                .last()
                .is_some_and(|prev| prev.is(TsSyntaxKind::OmittedExpression));
            if before_close && !after_hole {
                continue;
            }
        }
        let last = index + 1 == count;
        if last
            && parent.is_some_and(has_optional_terminator)
            && (child.is(TsSyntaxKind::Semicolon)
                || (parent.is_some_and(TsSyntaxKind::is_member) && child.is(TsSyntaxKind::Comma)))
        {
            continue;
        }
        kept.push(child.clone());
    }
    kept
}

/// Token text, a missing text reading as the kind's canonical spelling
fn effective_text(node: &Node) -> Option<&str> {
    node.text()
        .or_else(|| node.syntax_kind().and_then(TsSyntaxKind::canonical_text))
}

fn delimited(comments: &[Comment]) -> Vec<String> {
    comments.iter().map(Comment::delimited).collect()
}

/// Why two nodes differ on their own (children aside)
fn local_mismatch(left: &Node, right: &Node, options: &EquivalenceOptions) -> Option<String> {
    if left.kind() != right.kind() {
        return Some(format!(
            "kind differs: {} vs {}",
            left.kind_name(),
            right.kind_name()
        ));
    }
    let (lt, rt) = (effective_text(left), effective_text(right));
    if lt != rt {
        return Some(format!(
            "text differs: {:?} vs {:?}",
            lt.unwrap_or_default(),
            rt.unwrap_or_default()
        ));
    }
    if options.compare_comments {
        if delimited(left.leading_comments()) != delimited(right.leading_comments()) {
            return Some("leading comments differ".to_string());
        }
        if delimited(left.trailing_comments()) != delimited(right.trailing_comments()) {
            return Some("trailing comments differ".to_string());
        }
    }
    None
}

/// Compare the subtree at `left_id` in `left` with the one at `right_id` in
/// `right`
pub fn check(
    left: &Store,
    left_id: &str,
    right: &Store,
    right_id: &str,
    options: &EquivalenceOptions,
) -> Result<Equivalence> {
    let mut ls = Side::new(left);
    let mut rs = Side::new(right);
    let left_root = ls.resolve_root(left.lookup(left_id)?)?;
    let right_root = rs.resolve_root(right.lookup(right_id)?)?;
    let l0 = ls.push(left_root, None);
    let r0 = rs.push(right_root, None);

    let mut stack = vec![(l0, r0)];
    let mut compared = 0usize;
    while let Some((mut lf, mut rf)) = stack.pop() {
        compared += 1;
        loop {
            let Some(reason) = local_mismatch(ls.node(lf), rs.node(rf), options) else {
                break;
            };
            if let Some(inner) = ls.unwrap_wrapper(lf)? {
                lf = ls.push(inner, Some(lf));
                continue;
            }
            if let Some(inner) = rs.unwrap_wrapper(rf)? {
                rf = rs.push(inner, Some(rf));
                continue;
            }
            return Ok(diverged(&ls, lf, &rs, rf, reason));
        }

        let lc = ls.children(ls.node(lf))?;
        let rc = rs.children(rs.node(rf))?;
        if lc.len() != rc.len() {
            let reason = format!(
                "{} has {} significant children vs {}",
                ls.node(lf).kind_name(),
                lc.len(),
                rc.len()
            );
            return Ok(diverged(&ls, lf, &rs, rf, reason));
        }
        let pairs: Vec<_> = lc
            .into_iter()
            .zip(rc)
            .map(|(l, r)| (ls.push(l, Some(lf)), rs.push(r, Some(rf))))
            .collect();
        stack.extend(pairs.into_iter().rev());
    }

    debug!("Compared {} node pair(s): equivalent", compared);
    Ok(Equivalence::Equivalent)
}

fn diverged(ls: &Side<'_>, lf: usize, rs: &Side<'_>, rf: usize, reason: String) -> Equivalence {
    debug!("Divergence at '{}' / '{}': {}", ls.node(lf).id(), rs.node(rf).id(), reason);
    Equivalence::Diverged {
        left_path: ls.path(lf),
        right_path: rs.path(rf),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::CommentKind;

    fn ident(id: &str, name: &str) -> Node {
        Node::builder(id, TsSyntaxKind::Identifier.raw()).text(name).build()
    }

    fn token(id: &str, kind: TsSyntaxKind) -> Node {
        Node::builder(id, kind.raw()).build()
    }

    fn node(id: &str, kind: TsSyntaxKind, children: &[&str]) -> Node {
        Node::builder(id, kind.raw())
            .children(children.iter().copied())
            .build()
    }

    fn store(nodes: Vec<Node>, root: &str) -> Store {
        Store::new("t.ts")
            .merge(nodes, NodeId::new(root), None)
            .expect("merge")
    }

    #[test]
    fn test_identical_graphs_with_different_ids() {
        let left = store(
            vec![ident("a", "x"), token("s", TsSyntaxKind::Semicolon), node("e", TsSyntaxKind::ExpressionStatement, &["a", "s"])],
            "e",
        );
        let right = store(
            vec![ident("1", "x"), token("2", TsSyntaxKind::Semicolon), node("3", TsSyntaxKind::ExpressionStatement, &["1", "2"])],
            "3",
        );
        let result = check(&left, "e", &right, "3", &EquivalenceOptions::default()).expect("check");
        assert!(result.is_equivalent());
    }

    #[test]
    fn test_trailing_semicolon_is_optional() {
        let left = store(
            vec![ident("a", "x"), token("s", TsSyntaxKind::Semicolon), node("e", TsSyntaxKind::ExpressionStatement, &["a", "s"])],
            "e",
        );
        let right = store(
            vec![ident("a", "x"), node("e", TsSyntaxKind::ExpressionStatement, &["a"])],
            "e",
        );
        let result = check(&left, "e", &right, "e", &EquivalenceOptions::default()).expect("check");
        assert_eq!(result, Equivalence::Equivalent);
    }

    #[test]
    fn test_trailing_comma_before_close_is_optional_except_after_hole() {
        let with_comma = store(
            vec![
                token("o", TsSyntaxKind::OpenBracket),
                ident("a", "x"),
                token("c", TsSyntaxKind::Comma),
                token("k", TsSyntaxKind::CloseBracket),
                node("l", TsSyntaxKind::SyntaxList, &["a", "c"]),
                node("arr", TsSyntaxKind::ArrayLiteralExpression, &["o", "l", "k"]),
            ],
            "arr",
        );
        let without = store(
            vec![
                token("o", TsSyntaxKind::OpenBracket),
                ident("a", "x"),
                token("k", TsSyntaxKind::CloseBracket),
                node("l", TsSyntaxKind::SyntaxList, &["a"]),
                node("arr", TsSyntaxKind::ArrayLiteralExpression, &["o", "l", "k"]),
            ],
            "arr",
        );
        let options = EquivalenceOptions::default();
        assert!(check(&with_comma, "arr", &without, "arr", &options).expect("check").is_equivalent());

        let hole = store(
            vec![
                token("o", TsSyntaxKind::OpenBracket),
                node("h", TsSyntaxKind::OmittedExpression, &[]),
                token("c", TsSyntaxKind::Comma),
                token("k", TsSyntaxKind::CloseBracket),
                node("arr", TsSyntaxKind::ArrayLiteralExpression, &["o", "h", "c", "k"]),
            ],
            "arr",
        );
        let no_hole_comma = store(
            vec![
                token("o", TsSyntaxKind::OpenBracket),
                node("h", TsSyntaxKind::OmittedExpression, &[]),
                token("k", TsSyntaxKind::CloseBracket),
                node("arr", TsSyntaxKind::ArrayLiteralExpression, &["o", "h", "k"]),
            ],
            "arr",
        );
        assert!(!check(&hole, "arr", &no_hole_comma, "arr", &options).expect("check").is_equivalent());
    }

    #[test]
    fn test_parentheses_are_transparent() {
        let wrapped = store(
            vec![
                token("o", TsSyntaxKind::OpenParen),
                ident("a", "x"),
                token("c", TsSyntaxKind::CloseParen),
                node("p", TsSyntaxKind::ParenthesizedExpression, &["o", "a", "c"]),
                node("e", TsSyntaxKind::ExpressionStatement, &["p"]),
            ],
            "e",
        );
        let bare = store(
            vec![ident("a", "x"), node("e", TsSyntaxKind::ExpressionStatement, &["a"])],
            "e",
        );
        let options = EquivalenceOptions::default();
        assert!(check(&wrapped, "e", &bare, "e", &options).expect("check").is_equivalent());
        assert!(check(&bare, "e", &wrapped, "e", &options).expect("check").is_equivalent());
    }

    #[test]
    fn test_braces_around_if_branch_are_transparent() {
        let common = || {
            vec![
                token("if", TsSyntaxKind::IfKw),
                ident("c", "c"),
                ident("x", "x"),
                node("then", TsSyntaxKind::ExpressionStatement, &["x"]),
            ]
        };
        let mut braced = common();
        braced.extend([
            token("ob", TsSyntaxKind::OpenBrace),
            token("cb", TsSyntaxKind::CloseBrace),
            node("l", TsSyntaxKind::SyntaxList, &["then"]),
            node("b", TsSyntaxKind::Block, &["ob", "l", "cb"]),
            node("s", TsSyntaxKind::IfStatement, &["if", "c", "b"]),
        ]);
        let braced = store(braced, "s");
        let mut bare = common();
        bare.push(node("s", TsSyntaxKind::IfStatement, &["if", "c", "then"]));
        let bare = store(bare, "s");

        let options = EquivalenceOptions::default();
        assert!(check(&braced, "s", &bare, "s", &options).expect("check").is_equivalent());
        assert!(check(&bare, "s", &braced, "s", &options).expect("check").is_equivalent());

        // Anywhere else a block is a block
        let loose = store(
            vec![
                ident("x", "x"),
                node("then", TsSyntaxKind::ExpressionStatement, &["x"]),
                node("b", TsSyntaxKind::Block, &["then"]),
            ],
            "b",
        );
        let statement = store(
            vec![ident("x", "x"), node("then", TsSyntaxKind::ExpressionStatement, &["x"])],
            "then",
        );
        assert!(!check(&loose, "b", &statement, "then", &options).expect("check").is_equivalent());
    }

    #[test]
    fn test_divergence_reports_paths_and_reason() {
        let left = store(
            vec![ident("a", "x"), node("e", TsSyntaxKind::ExpressionStatement, &["a"])],
            "e",
        );
        let right = store(
            vec![ident("b", "y"), node("f", TsSyntaxKind::ExpressionStatement, &["b"])],
            "f",
        );
        let result = check(&left, "e", &right, "f", &EquivalenceOptions::default()).expect("check");
        let Equivalence::Diverged { left_path, right_path, reason } = result else {
            panic!("expected divergence");
        };
        assert_eq!(left_path, vec![NodeId::new("e"), NodeId::new("a")]);
        assert_eq!(right_path, vec![NodeId::new("f"), NodeId::new("b")]);
        assert!(reason.contains("text differs"), "{reason}");
    }

    #[test]
    fn test_comments_compared_only_on_request() {
        let plain = store(vec![ident("a", "x")], "a");
        let commented = store(
            vec![Node::builder("a", TsSyntaxKind::Identifier.raw())
                .text("x")
                .leading_comment(Comment::new(CommentKind::Block, "note"))
                .build()],
            "a",
        );
        let loose = EquivalenceOptions::default();
        let strict = EquivalenceOptions { compare_comments: true };
        assert!(check(&plain, "a", &commented, "a", &loose).expect("check").is_equivalent());
        assert!(!check(&plain, "a", &commented, "a", &strict).expect("check").is_equivalent());
    }

    #[test]
    fn test_missing_root_is_not_found() {
        let left = store(vec![ident("a", "x")], "a");
        let err = check(&left, "zz", &left, "a", &EquivalenceOptions::default()).expect_err("missing");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
