//! Function declarations, function expressions and arrows

use rowan::NodeOrToken;

use super::{
    body_or_semicolon, is_block, is_expression, is_opaque, is_type, opaque_before, parameters, type_annotation,
    type_parameters,
};
use crate::cst::TsSyntaxKind;
use crate::cst::green::GreenElement;
use crate::reconstruct::context::Cx;
use crate::reconstruct::emit::{Built, Emitter};
use crate::reconstruct::precedence::{self, Precedence};
use crate::result::Result;

fn is_function_name(kind: TsSyntaxKind) -> bool {
    kind == TsSyntaxKind::Identifier || is_opaque(kind)
}

/// Optional name after `function`; an opaque slot stands in for the name
/// only when no identifier follows it
fn function_name(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    while cx.peek_kind().is_some_and(is_opaque) && cx.peek_kind_at(1) == Some(TsSyntaxKind::Identifier) {
        out.push(cx.expect("opaque child")?);
    }
    out.push_opt(cx.opt_where(is_function_name)?);
    Ok(())
}

/// `export async function* name<T>(params): R { … }`, or a bodiless overload
pub fn function_declaration(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::FunctionDeclaration);
    out.modifiers(cx.modifiers()?);
    opaque_before(cx, &mut out, TsSyntaxKind::FunctionKw)?;
    out.push(cx.token(TsSyntaxKind::FunctionKw)?);
    out.push_opt(cx.eat(TsSyntaxKind::Asterisk)?);
    function_name(cx, &mut out)?;
    type_parameters(cx, &mut out)?;
    parameters(cx, &mut out)?;
    type_annotation(cx, &mut out)?;
    body_or_semicolon(cx, &mut out)?;
    Ok(out.finish())
}

pub fn function_expression(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::FunctionExpression);
    out.modifiers(cx.modifiers()?);
    opaque_before(cx, &mut out, TsSyntaxKind::FunctionKw)?;
    out.push(cx.token(TsSyntaxKind::FunctionKw)?);
    out.push_opt(cx.eat(TsSyntaxKind::Asterisk)?);
    function_name(cx, &mut out)?;
    type_parameters(cx, &mut out)?;
    parameters(cx, &mut out)?;
    type_annotation(cx, &mut out)?;
    out.push(cx.expect_where(is_block, "body")?);
    Ok(out.finish())
}

/// `async <T>(a, b): R => body`
///
/// A lone unparenthesized parameter (`x => x`) stays bare when nothing else
/// needs the parentheses. An object literal body is wrapped so it does not
/// read as a block.
pub fn arrow_function(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ArrowFunction);
    out.modifiers(cx.modifiers()?);
    let has_type_parameters = cx.at_any(&[TsSyntaxKind::LessThan, TsSyntaxKind::TypeParameter]);
    type_parameters(cx, &mut out)?;

    let bare = !has_type_parameters
        && cx.at(TsSyntaxKind::Parameter)
        && matches!(
            cx.peek_kind_at(1),
            Some(TsSyntaxKind::EqualsGreaterThan) | None
        )
        && cx.peek().is_some_and(|param| param.children().len() == 1);
    if bare {
        let param = cx.expect("parameter")?;
        out.list(vec![param]);
    } else {
        parameters(cx, &mut out)?;
    }

    return_type(cx, &mut out)?;
    out.push(cx.token(TsSyntaxKind::EqualsGreaterThan)?);
    let body = cx.expect_where(|kind| is_block(kind) || is_expression(kind), "body")?;
    out.push(arrow_body(body));
    Ok(out.finish())
}

/// An arrow's return type; without `:` only a type directly before `=>` is
/// taken, since a bare name could just as well be the body
fn return_type(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    if cx.at(TsSyntaxKind::Colon) {
        return type_annotation(cx, out);
    }
    let before_arrow = cx.peek_kind_at(1) == Some(TsSyntaxKind::EqualsGreaterThan);
    if before_arrow && cx.peek_kind().is_some_and(|kind| is_type(kind) && !is_block(kind)) {
        let ty = cx.expect("return type")?;
        out.token(TsSyntaxKind::Colon).push(ty);
    }
    Ok(())
}

fn arrow_body(body: Built) -> Built {
    if body.kind() == TsSyntaxKind::Block {
        return body;
    }
    let body = precedence::at_least(body, Precedence::Assignment);
    if starts_with_brace(&body.element) {
        body.map(precedence::parenthesize)
    } else {
        body
    }
}

fn starts_with_brace(element: &GreenElement) -> bool {
    match element {
        NodeOrToken::Node(_) => precedence::first_token(element) == Some(TsSyntaxKind::OpenBrace),
        NodeOrToken::Token(_) => false,
    }
}
