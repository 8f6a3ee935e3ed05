//! Variable, interface, type alias, enum and namespace declarations

use super::{initializer, is_binding_name, is_property_name, is_type, terminator, type_annotation, type_parameters};
use crate::cst::TsSyntaxKind;
use crate::cst::green::GreenElement;
use crate::reconstruct::context::Cx;
use crate::reconstruct::emit::{Built, Emitter, Trailing};
use crate::result::Result;
use crate::store::PropertyValue;

/// `name!: T = init`
pub fn variable_declaration(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::VariableDeclaration);
    out.push(cx.expect_where(is_binding_name, "name")?);
    out.push_opt(cx.eat(TsSyntaxKind::Exclamation)?);
    type_annotation(cx, &mut out)?;
    initializer(cx, &mut out)?;
    Ok(out.finish())
}

/// Keyword of a declaration list that lost it, from `declarationKind`
fn declaration_keyword(value: Option<&PropertyValue>) -> TsSyntaxKind {
    match value.and_then(PropertyValue::as_str) {
        Some("var") => TsSyntaxKind::VarKw,
        Some("const") => TsSyntaxKind::ConstKw,
        _ => TsSyntaxKind::LetKw,
    }
}

/// `const a = 1, b = 2`
pub fn variable_declaration_list(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::VariableDeclarationList);
    let keywords = [TsSyntaxKind::VarKw, TsSyntaxKind::LetKw, TsSyntaxKind::ConstKw];
    match cx.eat_any(&keywords)? {
        Some(keyword) => out.push(keyword),
        None => out.token(declaration_keyword(cx.node().property("declarationKind"))),
    };
    let declarations = cx.separated(TsSyntaxKind::Comma, &[])?;
    if declarations.is_empty() {
        return Err(cx.missing("declaration"));
    }
    out.separated(declarations, TsSyntaxKind::Comma, Trailing::Never);
    Ok(out.finish())
}

/// `export const a = 1;`
pub fn variable_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::VariableStatement);
    out.modifiers(cx.modifiers()?);
    out.push(cx.expect_where(
        |kind| kind == TsSyntaxKind::VariableDeclarationList || super::is_opaque(kind),
        "declaration list",
    )?);
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

pub fn interface_declaration(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::InterfaceDeclaration);
    out.modifiers(cx.modifiers()?);
    out.push(cx.token(TsSyntaxKind::InterfaceKw)?);
    super::classes::class_like_tail(cx, &mut out, true)?;
    Ok(out.finish())
}

/// `type Name<T> = Type;`
pub fn type_alias_declaration(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TypeAliasDeclaration);
    out.modifiers(cx.modifiers()?);
    out.push(cx.token(TsSyntaxKind::TypeKw)?);
    out.push(cx.expect_where(|kind| kind == TsSyntaxKind::Identifier || super::is_opaque(kind), "name")?);
    type_parameters(cx, &mut out)?;
    out.push(cx.token(TsSyntaxKind::Equals)?);
    out.push(cx.expect_where(is_type, "aliased type")?);
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

/// `const enum Name { A = 1, B }`
pub fn enum_declaration(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::EnumDeclaration);
    out.modifiers(cx.modifiers()?);
    out.push(cx.token(TsSyntaxKind::EnumKw)?);
    out.push(cx.expect_where(|kind| kind == TsSyntaxKind::Identifier || super::is_opaque(kind), "name")?);
    super::braced_separated(cx, &mut out)?;
    Ok(out.finish())
}

pub fn enum_member(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::EnumMember);
    out.push(cx.expect_where(is_property_name, "name")?);
    initializer(cx, &mut out)?;
    Ok(out.finish())
}

fn is_module_name(kind: TsSyntaxKind) -> bool {
    matches!(kind, TsSyntaxKind::Identifier | TsSyntaxKind::StringLiteral) || super::is_opaque(kind)
}

/// `namespace a { … }`, `namespace a.b { … }`, `declare module "m" { … }`,
/// `declare global { … }`
///
/// A missing keyword is re-derived from the name: a string name is an
/// ambient module, `global` takes none, anything else is a namespace. A
/// dotted name nests one declaration per segment; the inner segments carry
/// neither modifiers nor a keyword.
pub fn module_declaration(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ModuleDeclaration);
    let modifiers = cx.modifiers()?;
    let keyword = cx.eat_any(&[TsSyntaxKind::NamespaceKw, TsSyntaxKind::ModuleKw])?;

    if cx.parent_kind() == Some(TsSyntaxKind::ModuleDeclaration) {
        if modifiers.is_some() || keyword.is_some() {
            cx.note("modifiers of a dotted namespace segment dropped".to_string());
        }
    } else {
        out.modifiers(modifiers);
        let keyword = match keyword {
            Some(keyword) => Some(keyword),
            None => match (cx.peek_kind(), cx.peek().and_then(|name| name.text())) {
                (Some(TsSyntaxKind::StringLiteral), _) => Some(Built::token(TsSyntaxKind::ModuleKw)),
                (Some(TsSyntaxKind::Identifier), Some("global")) => None,
                _ => Some(Built::token(TsSyntaxKind::NamespaceKw)),
            },
        };
        out.push_opt(keyword);
    }

    out.push(cx.expect_where(is_module_name, "name")?);
    if cx.at_any(&[TsSyntaxKind::Dot, TsSyntaxKind::ModuleDeclaration]) {
        out.push(cx.token(TsSyntaxKind::Dot)?);
        out.push(cx.expect_where(|kind| kind == TsSyntaxKind::ModuleDeclaration, "inner namespace")?);
        return Ok(out.finish());
    }
    match cx.eat(TsSyntaxKind::ModuleBlock)? {
        Some(body) => out.push(body),
        None => out.push(cx.token(TsSyntaxKind::Semicolon)?),
    };
    Ok(out.finish())
}

/// `{ statements }` of a namespace
pub fn module_block(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ModuleBlock);
    super::braced_list(cx, &mut out)?;
    Ok(out.finish())
}
