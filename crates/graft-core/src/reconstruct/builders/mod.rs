//! Per-kind builders
//!
//! Every builder has the same shape: read the node's slots through [`Cx`],
//! re-emit them in the canonical child layout of the kind, and return the
//! finished element. Fixed tokens are re-emitted even when the graph omitted
//! them; optional pieces are emitted only when present.

pub mod bindings;
pub mod classes;
pub mod declarations;
pub mod expressions;
pub mod functions;
pub mod literals;
pub mod modules;
pub mod names;
pub mod statements;
pub mod tokens;
pub mod types;

use super::context::Cx;
use super::emit::{Built, Emitter, Separated, Trailing};
use super::precedence::{self, Precedence};
use crate::cst::TsSyntaxKind;
use crate::result::Result;

/// Kinds reconstructed as opaque stand-ins; accepted in every position so a
/// single unsupported child never derails decoding of its siblings
pub(crate) fn is_opaque(kind: TsSyntaxKind) -> bool {
    use TsSyntaxKind::*;
    matches!(
        kind,
        Placeholder | Unknown | JsxElement | JsxSelfClosingElement | JsxFragment | MappedType
    )
}

/// Kinds that can stand in expression position
pub(crate) fn is_expression(kind: TsSyntaxKind) -> bool {
    use TsSyntaxKind::*;
    kind.is_literal()
        || (280..=310).contains(&kind.raw())
        || matches!(
            kind,
            Identifier
                | PrivateIdentifier
                | ThisKw
                | SuperKw
                | NullKw
                | TrueKw
                | FalseKw
                | UndefinedKw
                | ImportKw
        )
        || is_opaque(kind)
}

/// Kinds that can stand in type position
pub(crate) fn is_type(kind: TsSyntaxKind) -> bool {
    use TsSyntaxKind::*;
    kind.is_type()
        || matches!(
            kind,
            ThisKw | TrueKw | FalseKw | Identifier | QualifiedName | StringLiteral | NumericLiteral
        )
        || is_opaque(kind)
}

/// Type nodes proper, for positions where a missing marker is inferred from
/// the slot alone and a bare name would be ambiguous
pub(crate) fn is_type_node(kind: TsSyntaxKind) -> bool {
    kind.is_type()
}

/// Declaration names and binding targets
pub(crate) fn is_binding_name(kind: TsSyntaxKind) -> bool {
    use TsSyntaxKind::*;
    matches!(
        kind,
        Identifier | ObjectBindingPattern | ArrayBindingPattern | ThisKw
    ) || is_opaque(kind)
}

/// Member and property names; keywords are valid names there
pub(crate) fn is_property_name(kind: TsSyntaxKind) -> bool {
    use TsSyntaxKind::*;
    matches!(
        kind,
        Identifier
            | PrivateIdentifier
            | StringLiteral
            | NumericLiteral
            | BigIntLiteral
            | NoSubstitutionTemplateLiteral
            | ComputedPropertyName
    ) || kind.is_keyword()
        || is_opaque(kind)
}

pub(crate) fn is_block(kind: TsSyntaxKind) -> bool {
    kind == TsSyntaxKind::Block || is_opaque(kind)
}

/// Whether a modifier list built by [`Cx::modifiers`] holds `kind`
pub(crate) fn has_modifier(modifiers: Option<&Built>, kind: TsSyntaxKind) -> bool {
    let Some(rowan::NodeOrToken::Node(list)) = modifiers.map(|mods| &mods.element) else {
        return false;
    };
    crate::cst::green::significant_children(list).any(|child| crate::cst::green::kind_of_ref(child) == kind)
}

/// `<T, U>` when present: `<`, a `SyntaxList` of type parameters, `>`
pub(crate) fn type_parameters(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    if cx.at(TsSyntaxKind::LessThan) {
        let (open, items, close) =
            cx.delimited(TsSyntaxKind::LessThan, TsSyntaxKind::Comma, TsSyntaxKind::GreaterThan)?;
        out.push(open)
            .separated(items, TsSyntaxKind::Comma, Trailing::Never)
            .push(close);
    } else if cx.at(TsSyntaxKind::TypeParameter) {
        let items = run_of(cx, TsSyntaxKind::TypeParameter)?;
        out.token(TsSyntaxKind::LessThan)
            .separated(items, TsSyntaxKind::Comma, Trailing::Never)
            .token(TsSyntaxKind::GreaterThan);
    }
    Ok(())
}

/// `<A, B>` type arguments when present
pub(crate) fn type_arguments(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    if cx.at(TsSyntaxKind::LessThan) {
        let (open, items, close) =
            cx.delimited(TsSyntaxKind::LessThan, TsSyntaxKind::Comma, TsSyntaxKind::GreaterThan)?;
        out.push(open)
            .separated(items, TsSyntaxKind::Comma, Trailing::Never)
            .push(close);
    }
    Ok(())
}

fn is_parameter_slot(kind: TsSyntaxKind) -> bool {
    kind == TsSyntaxKind::Parameter || is_opaque(kind)
}

/// `( params )`, synthesizing the parentheses when the graph left them out
///
/// Only parameters are taken; a slot of any other kind ends the list and is
/// left for the pieces after it.
pub(crate) fn parameters(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    let open = cx.eat(TsSyntaxKind::OpenParen)?;
    let items = if open.is_some() || cx.has_ahead(TsSyntaxKind::CloseParen) {
        cx.separated_where(TsSyntaxKind::Comma, is_parameter_slot)?
    } else {
        run_of(cx, TsSyntaxKind::Parameter)?
    };
    let close = cx.token(TsSyntaxKind::CloseParen)?;
    out.push(open.unwrap_or_else(|| Built::token(TsSyntaxKind::OpenParen)))
        .separated(items, TsSyntaxKind::Comma, Trailing::Preserve)
        .push(close);
    Ok(())
}

/// Opaque slots ahead of a `keyword` that is still to come
///
/// They stay in front of it instead of being read as the piece that
/// follows the keyword.
pub(crate) fn opaque_before(cx: &mut Cx<'_, '_>, out: &mut Emitter, keyword: TsSyntaxKind) -> Result<()> {
    while cx.peek_kind().is_some_and(is_opaque) && cx.has_ahead(keyword) {
        out.push(cx.expect("opaque child")?);
    }
    Ok(())
}

/// Consecutive slots of one kind with their separators, for graphs that
/// dropped the bracketing tokens
pub(crate) fn run_of(cx: &mut Cx<'_, '_>, kind: TsSyntaxKind) -> Result<Separated> {
    let mut list = Separated::default();
    while cx.at(kind) {
        let item = cx.expect(kind.name())?;
        let sep = cx.eat(TsSyntaxKind::Comma)?;
        list.items.push((item, sep));
    }
    Ok(list)
}

/// `: Type` when present
pub(crate) fn type_annotation(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    let pair = cx.marked(TsSyntaxKind::Colon, is_type_node, "type annotation")?;
    out.pair(pair);
    Ok(())
}

/// `= value` when present, the value wrapped if it would bind too loosely
pub(crate) fn initializer(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    let pair = cx.marked(TsSyntaxKind::Equals, is_expression, "initializer")?;
    out.pair(pair.map(|(eq, value)| (eq, precedence::at_least(value, Precedence::Assignment))));
    Ok(())
}

/// Function body, or `;` for a bodiless signature
pub(crate) fn body_or_semicolon(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    match cx.opt_where(is_block)? {
        Some(body) => out.push(body),
        None => out.push(cx.token(TsSyntaxKind::Semicolon)?),
    };
    Ok(())
}

/// Statement-ending `;`, synthesized when absent
pub(crate) fn terminator(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    out.push(cx.token(TsSyntaxKind::Semicolon)?);
    Ok(())
}

/// Member-ending `;` or `,`, synthesized as `;` when absent
pub(crate) fn member_terminator(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    match cx.eat_any(&[TsSyntaxKind::Semicolon, TsSyntaxKind::Comma])? {
        Some(sep) => out.push(sep),
        None => out.token(TsSyntaxKind::Semicolon),
    };
    Ok(())
}

/// `{ items }` where the items form one unseparated `SyntaxList`
pub(crate) fn braced_list(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    let open = cx.token(TsSyntaxKind::OpenBrace)?;
    let items = cx.until(&[TsSyntaxKind::CloseBrace])?;
    let close = cx.token(TsSyntaxKind::CloseBrace)?;
    out.push(open).list(items).push(close);
    Ok(())
}

/// `{ a, b }` where the items are comma-separated
pub(crate) fn braced_separated(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    let (open, items, close) =
        cx.delimited(TsSyntaxKind::OpenBrace, TsSyntaxKind::Comma, TsSyntaxKind::CloseBrace)?;
    out.push(open)
        .separated(items, TsSyntaxKind::Comma, Trailing::Preserve)
        .push(close);
    Ok(())
}
