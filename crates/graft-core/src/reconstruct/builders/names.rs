//! Names, decorators, and the pieces of a signature

use super::{initializer, is_expression, is_type, type_annotation};
use crate::cst::TsSyntaxKind;
use crate::cst::green::GreenElement;
use crate::reconstruct::context::Cx;
use crate::reconstruct::emit::Emitter;
use crate::reconstruct::precedence::{self, Precedence};
use crate::result::Result;

fn is_entity_name(kind: TsSyntaxKind) -> bool {
    matches!(kind, TsSyntaxKind::Identifier | TsSyntaxKind::QualifiedName) || super::is_opaque(kind)
}

/// `left.right`
pub fn qualified_name(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::QualifiedName);
    out.push(cx.expect_where(is_entity_name, "left name")?);
    out.push(cx.token(TsSyntaxKind::Dot)?);
    out.push(cx.expect_where(|kind| kind == TsSyntaxKind::Identifier || super::is_opaque(kind), "right name")?);
    Ok(out.finish())
}

/// `[expr]` as a property name
pub fn computed_property_name(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ComputedPropertyName);
    out.push(cx.token(TsSyntaxKind::OpenBracket)?);
    let expr = cx.expect_where(is_expression, "expression")?;
    out.push(precedence::at_least(expr, Precedence::Assignment));
    out.push(cx.token(TsSyntaxKind::CloseBracket)?);
    Ok(out.finish())
}

/// `@expr`
pub fn decorator(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::Decorator);
    out.push(cx.token(TsSyntaxKind::At)?);
    let expr = cx.expect_where(is_expression, "expression")?;
    out.push(precedence::at_least(expr, Precedence::LeftHandSide));
    Ok(out.finish())
}

/// `in out const T extends C = D`
pub fn type_parameter(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TypeParameter);
    out.modifiers(cx.modifiers()?);
    out.push(cx.expect_where(|kind| kind == TsSyntaxKind::Identifier || super::is_opaque(kind), "name")?);
    if let Some(extends) = cx.eat(TsSyntaxKind::ExtendsKw)? {
        out.push(extends);
        out.push(cx.expect_where(is_type, "constraint")?);
    }
    let default = cx.marked(TsSyntaxKind::Equals, super::is_type_node, "default type")?;
    out.pair(default);
    Ok(out.finish())
}

/// `@dec public ...name?: T = init`
pub fn parameter(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::Parameter);
    out.modifiers(cx.modifiers()?);
    out.push_opt(cx.eat(TsSyntaxKind::DotDotDot)?);
    out.push(cx.expect_where(super::is_binding_name, "name")?);
    out.push_opt(cx.eat(TsSyntaxKind::Question)?);
    type_annotation(cx, &mut out)?;
    initializer(cx, &mut out)?;
    Ok(out.finish())
}
