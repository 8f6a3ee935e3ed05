//! Import and export forms

use super::{is_expression, terminator};
use crate::cst::TsSyntaxKind;
use crate::cst::green::GreenElement;
use crate::reconstruct::context::Cx;
use crate::reconstruct::emit::{Built, Emitter};
use crate::reconstruct::precedence::{self, Precedence};
use crate::result::Result;

fn is_module_specifier(kind: TsSyntaxKind) -> bool {
    kind == TsSyntaxKind::StringLiteral || super::is_opaque(kind)
}

/// Names usable in specifiers: identifiers, string names, and `default`
fn is_specifier_name(kind: TsSyntaxKind) -> bool {
    matches!(
        kind,
        TsSyntaxKind::Identifier | TsSyntaxKind::StringLiteral | TsSyntaxKind::DefaultKw
    ) || super::is_opaque(kind)
}

/// `from "module"`, the keyword synthesized when absent
fn from_clause(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    out.push(cx.token(TsSyntaxKind::FromKw)?);
    out.push(cx.expect_where(is_module_specifier, "module specifier")?);
    Ok(())
}

/// `import clause from "m";` or the bare `import "m";`
pub fn import_declaration(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ImportDeclaration);
    out.modifiers(cx.modifiers()?);
    out.push(cx.token(TsSyntaxKind::ImportKw)?);
    match cx.eat(TsSyntaxKind::ImportClause)? {
        Some(clause) => {
            out.push(clause);
            from_clause(cx, &mut out)?;
        }
        None => {
            out.push(cx.expect_where(is_module_specifier, "module specifier")?);
        }
    }
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

/// `type Default, * as ns` / `{ a, b }`
pub fn import_clause(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ImportClause);
    out.push_opt(cx.eat(TsSyntaxKind::TypeKw)?);
    let name = cx.eat(TsSyntaxKind::Identifier)?;
    let comma = cx.eat(TsSyntaxKind::Comma)?;
    let bindings = cx.eat_any(&[TsSyntaxKind::NamespaceImport, TsSyntaxKind::NamedImports])?;
    match (name, bindings) {
        (None, None) => return Err(cx.missing("import binding")),
        (Some(name), Some(bindings)) => {
            out.push(name);
            out.push(comma.unwrap_or_else(|| Built::token(TsSyntaxKind::Comma)));
            out.push(bindings);
        }
        (name, bindings) => {
            if comma.is_some() {
                cx.note("stray ',' dropped".to_string());
            }
            out.push_opt(name);
            out.push_opt(bindings);
        }
    }
    Ok(out.finish())
}

/// `* as name` for imports and re-exports
pub fn namespace_binding(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(cx.kind());
    out.push(cx.token(TsSyntaxKind::Asterisk)?);
    out.push(cx.token(TsSyntaxKind::AsKw)?);
    out.push(cx.expect_where(is_specifier_name, "name")?);
    Ok(out.finish())
}

/// `{ a, b as c }` for imports and exports
pub fn named_bindings(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(cx.kind());
    super::braced_separated(cx, &mut out)?;
    Ok(out.finish())
}

/// `type a as b`
///
/// Two names without `as` between them are the property name and the
/// local name.
pub fn specifier(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(cx.kind());
    if cx.at(TsSyntaxKind::TypeKw) && cx.remaining() > 1 {
        out.push_opt(cx.eat(TsSyntaxKind::TypeKw)?);
    }
    let first = cx.expect_where(is_specifier_name, "name")?;
    let renamed = cx.at(TsSyntaxKind::AsKw) || cx.peek_kind().is_some_and(is_specifier_name);
    out.push(first);
    if renamed {
        out.push(cx.token(TsSyntaxKind::AsKw)?);
        out.push(cx.expect_where(is_specifier_name, "local name")?);
    }
    Ok(out.finish())
}

/// `export default expr;` and `export = expr;`
pub fn export_assignment(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ExportAssignment);
    out.push(cx.token(TsSyntaxKind::ExportKw)?);
    let marker = cx.eat_any(&[TsSyntaxKind::Equals, TsSyntaxKind::DefaultKw])?;
    out.push(marker.unwrap_or_else(|| Built::token(TsSyntaxKind::DefaultKw)));
    let expr = cx.expect_where(is_expression, "expression")?;
    out.push(precedence::at_least(expr, Precedence::Assignment));
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

/// `export type { a } from "m";`, `export * from "m";`
pub fn export_declaration(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ExportDeclaration);
    out.push(cx.token(TsSyntaxKind::ExportKw)?);
    out.push_opt(cx.eat(TsSyntaxKind::TypeKw)?);
    let exports = cx.eat_any(&[
        TsSyntaxKind::Asterisk,
        TsSyntaxKind::NamespaceExport,
        TsSyntaxKind::NamedExports,
    ])?;
    let Some(exports) = exports else {
        return Err(cx.missing("export clause"));
    };
    let needs_source = exports.kind() != TsSyntaxKind::NamedExports;
    out.push(exports);
    if needs_source || cx.at_any(&[TsSyntaxKind::FromKw, TsSyntaxKind::StringLiteral]) {
        from_clause(cx, &mut out)?;
    }
    terminator(cx, &mut out)?;
    Ok(out.finish())
}
