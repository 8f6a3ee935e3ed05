//! Input side of a builder: a cursor over a node's flattened children
//!
//! The generic `children` array mirrors concrete-syntax order, not semantic
//! roles, and groupings may nest arbitrarily. [`Cx`] splices every
//! `SyntaxList` into one flat run of slots and lets a builder walk it as a
//! small state machine: look for a marker token, then interpret the slot after
//! it. Each decoding step fails on its own (missing marker, missing child
//! after a marker) instead of relying on index arithmetic.

use std::sync::Arc;

use indexmap::IndexSet;

use super::emit::{Built, Separated};
use super::engine::Recurse;
use crate::cst::TsSyntaxKind;
use crate::diagnostics::Diagnostic;
use crate::error::GraftError;
use crate::result::Result;
use crate::store::{Node, NodeId};

/// Builder context for one node
pub struct Cx<'r, 's> {
    node: Arc<Node>,
    kind: TsSyntaxKind,
    slots: Vec<Arc<Node>>,
    pos: usize,
    rec: &'r mut Recurse<'s>,
}

impl<'r, 's> Cx<'r, 's> {
    pub(crate) fn new(rec: &'r mut Recurse<'s>, node: Arc<Node>, kind: TsSyntaxKind) -> Result<Self> {
        let slots = flatten(rec, &node)?;
        Ok(Self {
            node,
            kind,
            slots,
            pos: 0,
            rec,
        })
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn id(&self) -> &NodeId {
        self.node.id()
    }

    pub fn kind(&self) -> TsSyntaxKind {
        self.kind
    }

    /// Kind of the enclosing node, `None` at the reconstruction root
    pub fn parent_kind(&self) -> Option<TsSyntaxKind> {
        self.rec.parent_kind()
    }

    /// Node text, failing when absent
    pub fn require_text(&self) -> Result<&str> {
        self.node
            .text()
            .filter(|text| !text.is_empty())
            .ok_or_else(|| self.missing("text"))
    }

    /// Error for an absent required child
    pub fn missing(&self, role: &str) -> GraftError {
        GraftError::missing_child(self.node.id().clone(), self.kind.name(), role)
    }

    pub fn peek(&self) -> Option<&Arc<Node>> {
        self.slots.get(self.pos)
    }

    /// Kind of the next slot; codes outside the grammar read as `Unknown`
    pub fn peek_kind(&self) -> Option<TsSyntaxKind> {
        self.peek_kind_at(0)
    }

    pub fn peek_kind_at(&self, offset: usize) -> Option<TsSyntaxKind> {
        self.slots
            .get(self.pos + offset)
            .map(|node| node.syntax_kind().unwrap_or(TsSyntaxKind::Unknown))
    }

    pub fn at(&self, kind: TsSyntaxKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub fn at_any(&self, kinds: &[TsSyntaxKind]) -> bool {
        self.peek_kind().is_some_and(|kind| kinds.contains(&kind))
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.slots.len()
    }

    /// Whether any remaining slot has `kind`
    pub fn has_ahead(&self, kind: TsSyntaxKind) -> bool {
        self.slots[self.pos.min(self.slots.len())..]
            .iter()
            .any(|node| node.is(kind))
    }

    /// Number of slots not yet consumed
    pub fn remaining(&self) -> usize {
        self.slots.len().saturating_sub(self.pos)
    }

    pub fn bump(&mut self) -> Option<Arc<Node>> {
        let node = self.slots.get(self.pos).cloned();
        if node.is_some() {
            self.pos += 1;
        }
        node
    }

    /// Reconstruct an arbitrary node through the engine
    pub fn build(&mut self, node: &Arc<Node>) -> Result<Built> {
        self.rec.build(node)
    }

    /// Reconstruct the next slot if it has `kind`
    pub fn eat(&mut self, kind: TsSyntaxKind) -> Result<Option<Built>> {
        if !self.at(kind) {
            return Ok(None);
        }
        self.next().map(Some)
    }

    /// Reconstruct the next slot if its kind is one of `kinds`
    pub fn eat_any(&mut self, kinds: &[TsSyntaxKind]) -> Result<Option<Built>> {
        if !self.at_any(kinds) {
            return Ok(None);
        }
        self.next().map(Some)
    }

    /// The token of `kind`, taken from the next slot when present and
    /// synthesized otherwise
    pub fn token(&mut self, kind: TsSyntaxKind) -> Result<Built> {
        Ok(self.eat(kind)?.unwrap_or_else(|| Built::token(kind)))
    }

    /// Reconstruct the next slot, failing when there is none
    pub fn expect(&mut self, role: &str) -> Result<Built> {
        match self.bump() {
            Some(node) => self.rec.build(&node),
            None => Err(self.missing(role)),
        }
    }

    /// Reconstruct the next slot, which must satisfy `accept`
    pub fn expect_where(&mut self, accept: fn(TsSyntaxKind) -> bool, role: &str) -> Result<Built> {
        match self.peek_kind() {
            Some(kind) if accept(kind) => self.next(),
            _ => Err(self.missing(role)),
        }
    }

    /// Reconstruct the next slot if it satisfies `accept`
    pub fn opt_where(&mut self, accept: fn(TsSyntaxKind) -> bool) -> Result<Option<Built>> {
        match self.peek_kind() {
            Some(kind) if accept(kind) => self.next().map(Some),
            _ => Ok(None),
        }
    }

    /// Marker token followed by the child it introduces
    ///
    /// With the marker present the child is required. Without it, a next slot
    /// accepted by `fallback` is taken as the child and the marker is
    /// synthesized, so sparse graphs that dropped the punctuation still decode.
    pub fn marked(
        &mut self,
        marker: TsSyntaxKind,
        fallback: fn(TsSyntaxKind) -> bool,
        role: &str,
    ) -> Result<Option<(Built, Built)>> {
        if let Some(marker) = self.eat(marker)? {
            let child = self.expect(role)?;
            return Ok(Some((marker, child)));
        }
        match self.peek_kind() {
            Some(kind) if fallback(kind) && !is_separator_like(kind) => {
                let child = self.next()?;
                Ok(Some((Built::token(marker), child)))
            }
            _ => Ok(None),
        }
    }

    /// Leading decorators and modifier keywords as a `SyntaxList`
    ///
    /// Keyword modifiers are de-duplicated (first occurrence wins); every
    /// decorator is kept.
    pub fn modifiers(&mut self) -> Result<Option<Built>> {
        let mut seen = IndexSet::new();
        let mut items = Vec::new();
        while let Some(kind) = self.peek_kind() {
            if kind == TsSyntaxKind::Decorator {
                items.push(self.next()?);
            } else if kind.is_modifier() && !self.modifier_is_name() {
                let built = self.next()?;
                if seen.insert(kind) {
                    items.push(built);
                } else {
                    self.note(format!("duplicate modifier '{kind}' dropped"));
                }
            } else {
                break;
            }
        }
        if items.is_empty() {
            return Ok(None);
        }
        let children = items.into_iter().flat_map(Built::into_elements).collect();
        Ok(Some(Built::bare(crate::cst::green::node(
            TsSyntaxKind::SyntaxList,
            children,
        ))))
    }

    /// In a member or parameter, a modifier keyword directly followed by a
    /// marker that only follows a name (`static?: T`, `readonly(…)`) is the
    /// name itself
    fn modifier_is_name(&self) -> bool {
        use TsSyntaxKind::*;
        if !(self.kind.is_member() || self.kind == Parameter) {
            return false;
        }
        matches!(
            self.peek_kind_at(1),
            None | Some(Colon | Question | Exclamation | OpenParen | Equals | Semicolon | LessThan | CloseBrace)
        )
    }

    /// Items up to (not including) the first slot whose kind is in `close`,
    /// with the `separator` tokens that followed each item
    pub fn separated(&mut self, separator: TsSyntaxKind, close: &[TsSyntaxKind]) -> Result<Separated> {
        self.separated_by(separator, |kind| !close.contains(&kind))
    }

    /// Items for as long as the next slot satisfies `accept`, with the
    /// `separator` tokens that followed each item
    pub fn separated_where(
        &mut self,
        separator: TsSyntaxKind,
        accept: fn(TsSyntaxKind) -> bool,
    ) -> Result<Separated> {
        self.separated_by(separator, accept)
    }

    /// Shared loop of the separated readers
    ///
    /// A separator with no item before it is dropped; its comments move to
    /// the next item, or to the end of the list when none follows.
    fn separated_by(&mut self, separator: TsSyntaxKind, take: impl Fn(TsSyntaxKind) -> bool) -> Result<Separated> {
        let mut list = Separated::default();
        let mut orphaned = Vec::new();
        while let Some(kind) = self.peek_kind() {
            if kind == separator {
                let stray = self.next()?;
                match list.items.last_mut() {
                    Some((_, slot @ None)) => *slot = Some(stray),
                    _ => {
                        self.note(format!("stray '{separator}' dropped"));
                        orphaned.extend(stray.leading);
                        orphaned.extend(stray.trailing);
                    }
                }
                continue;
            }
            if !take(kind) {
                break;
            }
            let mut item = self.next()?;
            if !orphaned.is_empty() {
                orphaned.append(&mut item.leading);
                item.leading = std::mem::take(&mut orphaned);
            }
            let sep = self.eat(separator)?;
            list.items.push((item, sep));
        }

        if !orphaned.is_empty() {
            match list.items.last_mut() {
                Some((_, Some(sep))) => sep.trailing.append(&mut orphaned),
                Some((item, None)) => item.trailing.append(&mut orphaned),
                None => self.note(format!(
                    "{} comment(s) on a stray '{separator}' dropped",
                    orphaned.len()
                )),
            }
        }
        Ok(list)
    }

    /// Items up to the first slot whose kind is in `close`, no separators
    pub fn until(&mut self, close: &[TsSyntaxKind]) -> Result<Vec<Built>> {
        let mut items = Vec::new();
        while !self.is_done() && !self.at_any(close) {
            items.push(self.next()?);
        }
        Ok(items)
    }

    /// `open items close` where the items run up to `close`
    pub fn delimited(
        &mut self,
        open: TsSyntaxKind,
        separator: TsSyntaxKind,
        close: TsSyntaxKind,
    ) -> Result<(Built, Separated, Built)> {
        let open = self.token(open)?;
        let items = self.separated(separator, &[close])?;
        let close = self.token(close)?;
        Ok((open, items, close))
    }

    /// Record an informational diagnostic against this node
    pub fn note(&mut self, message: String) {
        self.rec
            .push_diagnostic(Diagnostic::dropped(self.node.id(), self.kind.name(), message));
    }

    fn next(&mut self) -> Result<Built> {
        match self.bump() {
            Some(node) => self.rec.build(&node),
            None => Err(self.missing("child")),
        }
    }

    /// Check that the builder consumed every slot
    ///
    /// Leftover punctuation is reported and dropped; anything else would be
    /// silently lost, so it is an error.
    pub(crate) fn finish(mut self) -> Result<()> {
        while let Some(node) = self.bump() {
            let kind = node.syntax_kind();
            if kind.is_some_and(TsSyntaxKind::is_punctuation) {
                let comments = node.leading_comments().len() + node.trailing_comments().len();
                if comments == 0 {
                    self.note(format!("unexpected '{}' dropped", node.kind_name()));
                } else {
                    self.note(format!(
                        "unexpected '{}' dropped with {comments} comment(s)",
                        node.kind_name()
                    ));
                }
                continue;
            }
            return Err(GraftError::invalid_node(
                self.node.id().clone(),
                format!(
                    "{} has no slot for child '{}' ({})",
                    self.kind,
                    node.id(),
                    node.kind_name()
                ),
            ));
        }
        Ok(())
    }
}

fn is_separator_like(kind: TsSyntaxKind) -> bool {
    matches!(
        kind,
        TsSyntaxKind::Comma
            | TsSyntaxKind::Semicolon
            | TsSyntaxKind::CloseParen
            | TsSyntaxKind::CloseBrace
            | TsSyntaxKind::CloseBracket
            | TsSyntaxKind::GreaterThan
    )
}

/// Children of `node` with groupings spliced in; comments that found no
/// child to ride on are reported and dropped
fn flatten(rec: &mut Recurse<'_>, node: &Node) -> Result<Vec<Arc<Node>>> {
    let spliced = rec.store().spliced_children(node)?;
    if !spliced.orphaned.is_empty() {
        rec.push_diagnostic(Diagnostic::dropped(
            node.id(),
            node.kind_name(),
            format!("{} comment(s) with nothing to attach to", spliced.orphaned.len()),
        ));
    }
    Ok(spliced.children)
}

#[cfg(test)]
mod tests {
    use crate::diagnostics::DiagnosticCode;
    use crate::reconstruct::{ReconstructOptions, Reconstruction, reconstruct};
    use crate::store::{Comment, CommentKind, Node, NodeId, Store};
    use crate::cst::TsSyntaxKind;

    fn token(id: &str, kind: TsSyntaxKind) -> Node {
        Node::builder(id, kind.raw()).build()
    }

    fn node(id: &str, kind: TsSyntaxKind, children: &[&str]) -> Node {
        Node::builder(id, kind.raw())
            .children(children.iter().copied())
            .build()
    }

    fn ident(id: &str, name: &str) -> Node {
        Node::builder(id, TsSyntaxKind::Identifier.raw()).text(name).build()
    }

    fn run(nodes: Vec<Node>, root: &str) -> Reconstruction {
        let store = Store::new("test.ts")
            .merge(nodes, NodeId::new(root), None)
            .expect("merge");
        reconstruct(&store, root, &ReconstructOptions::default()).expect("reconstruct")
    }

    fn dropped(out: &Reconstruction) -> Vec<&str> {
        out.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.code == DiagnosticCode::Dropped)
            .map(|diagnostic| diagnostic.message.as_str())
            .collect()
    }

    #[test]
    fn test_duplicate_modifier_is_dropped() {
        let out = run(
            vec![
                token("e1", TsSyntaxKind::ExportKw),
                token("e2", TsSyntaxKind::ExportKw),
                token("kw", TsSyntaxKind::LetKw),
                ident("a", "a"),
                node("d", TsSyntaxKind::VariableDeclaration, &["a"]),
                node("l", TsSyntaxKind::VariableDeclarationList, &["kw", "d"]),
                node("s", TsSyntaxKind::VariableStatement, &["e1", "e2", "l"]),
            ],
            "s",
        );
        assert_eq!(out.text(), "exportleta;");
        assert_eq!(dropped(&out), vec!["duplicate modifier 'ExportKw' dropped"]);
    }

    #[test]
    fn test_stray_separator_comments_move_to_next_item() {
        let comma = Node::builder("c", TsSyntaxKind::Comma.raw())
            .leading_comment(Comment::new(CommentKind::Block, "lead"))
            .build();
        let out = run(
            vec![
                token("kw", TsSyntaxKind::LetKw),
                comma,
                ident("a", "a"),
                node("d", TsSyntaxKind::VariableDeclaration, &["a"]),
                node("l", TsSyntaxKind::VariableDeclarationList, &["kw", "c", "d"]),
            ],
            "l",
        );
        assert_eq!(out.text(), "let/* lead */a");
        assert_eq!(dropped(&out), vec!["stray 'Comma' dropped"]);
    }

    #[test]
    fn test_leftover_punctuation_reports_its_comments() {
        let extra = Node::builder("extra", TsSyntaxKind::Semicolon.raw())
            .trailing_comment(Comment::new(CommentKind::SingleLine, "gone"))
            .build();
        let out = run(
            vec![
                ident("x", "x"),
                token("semi", TsSyntaxKind::Semicolon),
                extra,
                node("s", TsSyntaxKind::ExpressionStatement, &["x", "semi", "extra"]),
            ],
            "s",
        );
        assert_eq!(out.text(), "x;");
        assert_eq!(
            dropped(&out),
            vec!["unexpected 'Semicolon' dropped with 1 comment(s)"]
        );
    }
}
