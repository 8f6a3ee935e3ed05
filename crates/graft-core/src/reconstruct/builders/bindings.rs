//! Destructuring patterns

use super::{initializer, is_binding_name, is_property_name};
use crate::cst::TsSyntaxKind;
use crate::cst::green::GreenElement;
use crate::reconstruct::context::Cx;
use crate::reconstruct::emit::{Emitter, Trailing};
use crate::result::Result;

/// `{ a, b: c, ...rest }`
pub fn object_binding_pattern(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ObjectBindingPattern);
    super::braced_separated(cx, &mut out)?;
    Ok(out.finish())
}

/// `[a, , b]`; a hole in last position keeps its comma
pub fn array_binding_pattern(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ArrayBindingPattern);
    let (open, items, close) =
        cx.delimited(TsSyntaxKind::OpenBracket, TsSyntaxKind::Comma, TsSyntaxKind::CloseBracket)?;
    let trailing = if items.last_kind() == Some(TsSyntaxKind::OmittedExpression) {
        Trailing::Always
    } else {
        Trailing::Preserve
    };
    out.push(open)
        .separated(items, TsSyntaxKind::Comma, trailing)
        .push(close);
    Ok(out.finish())
}

/// `...propertyName: name = init`
pub fn binding_element(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::BindingElement);
    out.push_opt(cx.eat(TsSyntaxKind::DotDotDot)?);
    if cx.peek_kind_at(1) == Some(TsSyntaxKind::Colon) {
        out.push(cx.expect_where(is_property_name, "property name")?);
        out.push(cx.token(TsSyntaxKind::Colon)?);
    }
    out.push(cx.expect_where(is_binding_name, "name")?);
    initializer(cx, &mut out)?;
    Ok(out.finish())
}
