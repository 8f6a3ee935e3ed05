//! Classes, interfaces' shared header, and class members

use super::{
    body_or_semicolon, initializer, is_property_name, parameters, terminator, type_annotation,
    type_parameters,
};
use crate::cst::TsSyntaxKind;
use crate::cst::green::GreenElement;
use crate::reconstruct::context::Cx;
use crate::reconstruct::emit::{Emitter, Trailing};
use crate::reconstruct::precedence::{self, Precedence};
use crate::result::Result;
use crate::store::PropertyValue;

/// `name<T> extends A implements B { members }` after the leading keyword
///
/// Shared by classes and interfaces; `name_required` is false only for class
/// expressions and `export default class`.
pub(crate) fn class_like_tail(cx: &mut Cx<'_, '_>, out: &mut Emitter, name_required: bool) -> Result<()> {
    let is_name = |kind: TsSyntaxKind| kind == TsSyntaxKind::Identifier || super::is_opaque(kind);
    if name_required {
        out.push(cx.expect_where(is_name, "name")?);
    } else {
        out.push_opt(cx.opt_where(is_name)?);
    }
    type_parameters(cx, out)?;
    let mut clauses = Vec::new();
    while let Some(clause) = cx.eat(TsSyntaxKind::HeritageClause)? {
        clauses.push(clause);
    }
    if !clauses.is_empty() {
        out.list(clauses);
    }
    super::braced_list(cx, out)?;
    Ok(())
}

pub fn class_declaration(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ClassDeclaration);
    let modifiers = cx.modifiers()?;
    let is_default = super::has_modifier(modifiers.as_ref(), TsSyntaxKind::DefaultKw);
    out.modifiers(modifiers);
    out.push(cx.token(TsSyntaxKind::ClassKw)?);
    class_like_tail(cx, &mut out, !is_default)?;
    Ok(out.finish())
}

pub fn class_expression(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ClassExpression);
    out.modifiers(cx.modifiers()?);
    out.push(cx.token(TsSyntaxKind::ClassKw)?);
    class_like_tail(cx, &mut out, false)?;
    Ok(out.finish())
}

/// `extends A, B` or `implements C`
///
/// Without its keyword, the clause falls back to the `token` property and
/// then to `extends`.
pub fn heritage_clause(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::HeritageClause);
    match cx.eat_any(&[TsSyntaxKind::ExtendsKw, TsSyntaxKind::ImplementsKw])? {
        Some(keyword) => out.push(keyword),
        None => {
            let implements = cx.node().property("token").and_then(PropertyValue::as_str) == Some("implements");
            out.token(if implements {
                TsSyntaxKind::ImplementsKw
            } else {
                TsSyntaxKind::ExtendsKw
            })
        }
    };
    let types = cx.separated(TsSyntaxKind::Comma, &[])?;
    if types.is_empty() {
        return Err(cx.missing("heritage type"));
    }
    let types = types.map_items(|ty| precedence::at_least(ty, Precedence::LeftHandSide));
    out.separated(types, TsSyntaxKind::Comma, Trailing::Never);
    Ok(out.finish())
}

/// `static readonly name?: T = init;`
pub fn property_declaration(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::PropertyDeclaration);
    out.modifiers(cx.modifiers()?);
    out.push(cx.expect_where(is_property_name, "name")?);
    out.push_opt(cx.eat_any(&[TsSyntaxKind::Question, TsSyntaxKind::Exclamation])?);
    type_annotation(cx, &mut out)?;
    initializer(cx, &mut out)?;
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

/// `async *name?<T>(params): R { … }`
pub fn method_declaration(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::MethodDeclaration);
    out.modifiers(cx.modifiers()?);
    out.push_opt(cx.eat(TsSyntaxKind::Asterisk)?);
    out.push(cx.expect_where(is_property_name, "name")?);
    out.push_opt(cx.eat(TsSyntaxKind::Question)?);
    type_parameters(cx, &mut out)?;
    parameters(cx, &mut out)?;
    type_annotation(cx, &mut out)?;
    body_or_semicolon(cx, &mut out)?;
    Ok(out.finish())
}

pub fn constructor(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::Constructor);
    out.modifiers(cx.modifiers()?);
    out.push(cx.token(TsSyntaxKind::ConstructorKw)?);
    parameters(cx, &mut out)?;
    body_or_semicolon(cx, &mut out)?;
    Ok(out.finish())
}

/// `get name(): T { … }` and `set name(v) { … }`
pub fn accessor(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let kind = cx.kind();
    let keyword = if kind == TsSyntaxKind::GetAccessor {
        TsSyntaxKind::GetKw
    } else {
        TsSyntaxKind::SetKw
    };
    let mut out = Emitter::new(kind);
    out.modifiers(cx.modifiers()?);
    out.push(cx.token(keyword)?);
    out.push(cx.expect_where(is_property_name, "name")?);
    parameters(cx, &mut out)?;
    type_annotation(cx, &mut out)?;
    body_or_semicolon(cx, &mut out)?;
    Ok(out.finish())
}

/// `static { … }`
pub fn class_static_block(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ClassStaticBlockDeclaration);
    out.push(cx.token(TsSyntaxKind::StaticKw)?);
    out.push(cx.expect_where(|kind| kind == TsSyntaxKind::Block, "body")?);
    Ok(out.finish())
}

pub fn semicolon_class_element(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::SemicolonClassElement);
    terminator(cx, &mut out)?;
    Ok(out.finish())
}
