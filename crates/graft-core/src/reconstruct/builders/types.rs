//! Type nodes and the members of type literals and interfaces

use super::{
    is_expression, is_property_name, is_type, member_terminator, parameters, type_annotation,
    type_arguments, type_parameters,
};
use crate::cst::TsSyntaxKind;
use crate::cst::green::GreenElement;
use crate::reconstruct::context::Cx;
use crate::reconstruct::emit::{Emitter, Trailing};
use crate::reconstruct::precedence::{self, TypePrecedence};
use crate::result::Result;

fn is_type_name(kind: TsSyntaxKind) -> bool {
    matches!(kind, TsSyntaxKind::Identifier | TsSyntaxKind::QualifiedName) || super::is_opaque(kind)
}

/// `Name<Args>`
pub fn type_reference(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TypeReference);
    out.push(cx.expect_where(is_type_name, "type name")?);
    type_arguments(cx, &mut out)?;
    Ok(out.finish())
}

/// `<T>(params) => R`
pub fn function_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::FunctionType);
    type_parameters(cx, &mut out)?;
    parameters(cx, &mut out)?;
    out.push(cx.token(TsSyntaxKind::EqualsGreaterThan)?);
    out.push(cx.expect_where(is_type, "return type")?);
    Ok(out.finish())
}

/// `abstract new <T>(params) => R`
pub fn constructor_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ConstructorType);
    out.modifiers(cx.modifiers()?);
    out.push(cx.token(TsSyntaxKind::NewKw)?);
    type_parameters(cx, &mut out)?;
    parameters(cx, &mut out)?;
    out.push(cx.token(TsSyntaxKind::EqualsGreaterThan)?);
    out.push(cx.expect_where(is_type, "return type")?);
    Ok(out.finish())
}

/// `typeof name<Args>`
pub fn type_query(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TypeQuery);
    out.push(cx.token(TsSyntaxKind::TypeOfKw)?);
    out.push(cx.expect_where(is_type_name, "expression name")?);
    type_arguments(cx, &mut out)?;
    Ok(out.finish())
}

/// `{ members }`
pub fn type_literal(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TypeLiteral);
    super::braced_list(cx, &mut out)?;
    Ok(out.finish())
}

/// `T[]`
pub fn array_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ArrayType);
    let element = cx.expect_where(is_type, "element type")?;
    out.push(precedence::type_at_least(element, TypePrecedence::Postfix));
    out.push(cx.token(TsSyntaxKind::OpenBracket)?);
    out.push(cx.token(TsSyntaxKind::CloseBracket)?);
    Ok(out.finish())
}

/// `[A, B?, ...C]`
pub fn tuple_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TupleType);
    let (open, items, close) =
        cx.delimited(TsSyntaxKind::OpenBracket, TsSyntaxKind::Comma, TsSyntaxKind::CloseBracket)?;
    out.push(open)
        .separated(items, TsSyntaxKind::Comma, Trailing::Preserve)
        .push(close);
    Ok(out.finish())
}

/// `T?` inside a tuple
pub fn optional_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::OptionalType);
    let inner = cx.expect_where(is_type, "type")?;
    out.push(precedence::type_at_least(inner, TypePrecedence::Postfix));
    out.push(cx.token(TsSyntaxKind::Question)?);
    Ok(out.finish())
}

/// `...T` inside a tuple
pub fn rest_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::RestType);
    out.push(cx.token(TsSyntaxKind::DotDotDot)?);
    out.push(cx.expect_where(is_type, "type")?);
    Ok(out.finish())
}

/// `A | B` and `A & B`: one `SyntaxList` of members and operators
fn composite(cx: &mut Cx<'_, '_>, operator: TsSyntaxKind, min: TypePrecedence) -> Result<GreenElement> {
    let mut out = Emitter::new(cx.kind());
    let leading = cx.eat(operator)?;
    let members = cx
        .separated(operator, &[])?
        .map_items(|member| precedence::type_at_least(member, min));
    if members.is_empty() {
        return Err(cx.missing("member type"));
    }
    out.push_opt(leading)
        .separated(members, operator, Trailing::Never);
    Ok(out.finish())
}

pub fn union_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    composite(cx, TsSyntaxKind::Bar, TypePrecedence::Intersection)
}

pub fn intersection_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    composite(cx, TsSyntaxKind::Ampersand, TypePrecedence::Operator)
}

/// `C extends E ? T : F`
pub fn conditional_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ConditionalType);
    let check = cx.expect_where(is_type, "check type")?;
    out.push(precedence::type_at_least(check, TypePrecedence::Union));
    out.push(cx.token(TsSyntaxKind::ExtendsKw)?);
    let extends = cx.expect_where(is_type, "extends type")?;
    out.push(precedence::type_at_least(extends, TypePrecedence::Union));
    out.push(cx.token(TsSyntaxKind::Question)?);
    out.push(cx.expect_where(is_type, "true type")?);
    out.push(cx.token(TsSyntaxKind::Colon)?);
    out.push(cx.expect_where(is_type, "false type")?);
    Ok(out.finish())
}

/// `infer U`
pub fn infer_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::InferType);
    out.push(cx.token(TsSyntaxKind::InferKw)?);
    out.push(cx.expect_where(
        |kind| kind == TsSyntaxKind::TypeParameter || super::is_opaque(kind),
        "type parameter",
    )?);
    Ok(out.finish())
}

/// `(T)`
pub fn parenthesized_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ParenthesizedType);
    out.push(cx.token(TsSyntaxKind::OpenParen)?);
    out.push(cx.expect_where(is_type, "type")?);
    out.push(cx.token(TsSyntaxKind::CloseParen)?);
    Ok(out.finish())
}

/// `this` in type position
pub fn this_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ThisType);
    out.push(cx.token(TsSyntaxKind::ThisKw)?);
    Ok(out.finish())
}

/// `keyof T`, `unique symbol`, `readonly T[]`
pub fn type_operator(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TypeOperator);
    let operator = cx
        .eat_any(&[TsSyntaxKind::KeyOfKw, TsSyntaxKind::UniqueKw, TsSyntaxKind::ReadonlyKw])?
        .ok_or_else(|| cx.missing("operator"))?;
    out.push(operator);
    let operand = cx.expect_where(is_type, "operand type")?;
    out.push(precedence::type_at_least(operand, TypePrecedence::Operator));
    Ok(out.finish())
}

/// `T[K]`
pub fn indexed_access_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::IndexedAccessType);
    let object = cx.expect_where(is_type, "object type")?;
    out.push(precedence::type_at_least(object, TypePrecedence::Postfix));
    out.push(cx.token(TsSyntaxKind::OpenBracket)?);
    out.push(cx.expect_where(is_type, "index type")?);
    out.push(cx.token(TsSyntaxKind::CloseBracket)?);
    Ok(out.finish())
}

/// `"a"`, `1`, `-1`, `true`, `null` in type position
pub fn literal_type(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::LiteralType);
    out.push(cx.expect_where(is_expression, "literal")?);
    Ok(out.finish())
}

/// `...name?: T` inside a tuple
pub fn named_tuple_member(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::NamedTupleMember);
    out.push_opt(cx.eat(TsSyntaxKind::DotDotDot)?);
    out.push(cx.expect_where(
        |kind| kind == TsSyntaxKind::Identifier || super::is_opaque(kind),
        "name",
    )?);
    out.push_opt(cx.eat(TsSyntaxKind::Question)?);
    out.push(cx.token(TsSyntaxKind::Colon)?);
    out.push(cx.expect_where(is_type, "type")?);
    Ok(out.finish())
}

/// `x is T`
pub fn type_predicate(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TypePredicate);
    out.push(cx.expect_where(
        |kind| {
            matches!(kind, TsSyntaxKind::Identifier | TsSyntaxKind::ThisType | TsSyntaxKind::ThisKw)
                || super::is_opaque(kind)
        },
        "parameter name",
    )?);
    out.push(cx.token(TsSyntaxKind::IsKw)?);
    out.push(cx.expect_where(is_type, "type")?);
    Ok(out.finish())
}

/// `readonly name?: T;`
pub fn property_signature(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::PropertySignature);
    out.modifiers(cx.modifiers()?);
    out.push(cx.expect_where(is_property_name, "name")?);
    out.push_opt(cx.eat(TsSyntaxKind::Question)?);
    type_annotation(cx, &mut out)?;
    member_terminator(cx, &mut out)?;
    Ok(out.finish())
}

/// `name?<T>(params): R;`
pub fn method_signature(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::MethodSignature);
    out.modifiers(cx.modifiers()?);
    out.push(cx.expect_where(is_property_name, "name")?);
    out.push_opt(cx.eat(TsSyntaxKind::Question)?);
    type_parameters(cx, &mut out)?;
    parameters(cx, &mut out)?;
    type_annotation(cx, &mut out)?;
    member_terminator(cx, &mut out)?;
    Ok(out.finish())
}

/// `<T>(params): R;`
pub fn call_signature(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::CallSignature);
    type_parameters(cx, &mut out)?;
    parameters(cx, &mut out)?;
    type_annotation(cx, &mut out)?;
    member_terminator(cx, &mut out)?;
    Ok(out.finish())
}

/// `new <T>(params): R;`
pub fn construct_signature(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ConstructSignature);
    out.push(cx.token(TsSyntaxKind::NewKw)?);
    type_parameters(cx, &mut out)?;
    parameters(cx, &mut out)?;
    type_annotation(cx, &mut out)?;
    member_terminator(cx, &mut out)?;
    Ok(out.finish())
}

/// `readonly [key: K]: V;`
pub fn index_signature(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::IndexSignature);
    out.modifiers(cx.modifiers()?);
    let (open, params, close) =
        cx.delimited(TsSyntaxKind::OpenBracket, TsSyntaxKind::Comma, TsSyntaxKind::CloseBracket)?;
    if params.is_empty() {
        return Err(cx.missing("key parameter"));
    }
    out.push(open)
        .separated(params, TsSyntaxKind::Comma, Trailing::Never)
        .push(close);
    let annotation = cx
        .marked(TsSyntaxKind::Colon, is_type, "value type")?
        .ok_or_else(|| cx.missing("value type"))?;
    out.pair(Some(annotation));
    member_terminator(cx, &mut out)?;
    Ok(out.finish())
}
