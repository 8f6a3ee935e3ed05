//! Expressions and object literal members
//!
//! Operands are re-wrapped through [`precedence`] wherever the position
//! binds tighter than the reconstructed operand, so a graph that carries no
//! parenthesized node still renders with its original grouping.

use rowan::NodeOrToken;

use super::{is_expression, is_property_name, is_type, type_arguments};
use crate::cst::TsSyntaxKind;
use crate::cst::green::{self, GreenElement};
use crate::reconstruct::context::Cx;
use crate::reconstruct::emit::{Built, Emitter, Trailing};
use crate::reconstruct::precedence::{self, Precedence};
use crate::result::Result;

/// Names allowed after `.`: identifiers, `#private`, and any keyword
fn is_member_name(kind: TsSyntaxKind) -> bool {
    matches!(kind, TsSyntaxKind::Identifier | TsSyntaxKind::PrivateIdentifier)
        || kind.is_keyword()
        || super::is_opaque(kind)
}

fn is_template(kind: TsSyntaxKind) -> bool {
    matches!(
        kind,
        TsSyntaxKind::TemplateExpression | TsSyntaxKind::NoSubstitutionTemplateLiteral
    ) || super::is_opaque(kind)
}

fn operand(cx: &mut Cx<'_, '_>, role: &str, min: Precedence) -> Result<Built> {
    let built = cx.expect_where(is_expression, role)?;
    Ok(precedence::at_least(built, min))
}

/// `( args )`, each argument at assignment level
fn arguments(cx: &mut Cx<'_, '_>, out: &mut Emitter) -> Result<()> {
    let (open, args, close) =
        cx.delimited(TsSyntaxKind::OpenParen, TsSyntaxKind::Comma, TsSyntaxKind::CloseParen)?;
    let args = args.map_items(|arg| precedence::at_least(arg, Precedence::Assignment));
    out.push(open)
        .separated(args, TsSyntaxKind::Comma, Trailing::Preserve)
        .push(close);
    Ok(())
}

/// Object of a member access; integer literals need wrapping so the `.` is
/// not read as a decimal point
fn member_object(cx: &mut Cx<'_, '_>) -> Result<Built> {
    let object = operand(cx, "object", Precedence::LeftHandSide)?;
    if object.kind() == TsSyntaxKind::NumericLiteral {
        let text = green::text_of(&object.element);
        let plain = text.bytes().all(|b| b.is_ascii_digit() || b == b'_');
        if plain {
            return Ok(object.map(precedence::parenthesize));
        }
    }
    Ok(object)
}

/// Whether a call sits on the left spine of an element (`new (a.b())()`)
fn contains_call(element: &GreenElement) -> bool {
    use TsSyntaxKind::*;
    let mut current = element.clone();
    loop {
        match green::kind_of(&current) {
            CallExpression => return true,
            PropertyAccessExpression | ElementAccessExpression | TaggedTemplateExpression
            | NonNullExpression => {
                let NodeOrToken::Node(node) = &current else {
                    return false;
                };
                let first = green::significant_children(node).next().map(green::to_owned);
                match first {
                    Some(first) => current = first,
                    None => return false,
                }
            }
            _ => return false,
        }
    }
}

/// `[a, b, , c]`; a hole in last position keeps its comma
pub fn array_literal(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ArrayLiteralExpression);
    let (open, items, close) =
        cx.delimited(TsSyntaxKind::OpenBracket, TsSyntaxKind::Comma, TsSyntaxKind::CloseBracket)?;
    let trailing = if items.last_kind() == Some(TsSyntaxKind::OmittedExpression) {
        Trailing::Always
    } else {
        Trailing::Preserve
    };
    let items = items.map_items(|item| precedence::at_least(item, Precedence::Assignment));
    out.push(open)
        .separated(items, TsSyntaxKind::Comma, trailing)
        .push(close);
    Ok(out.finish())
}

pub fn object_literal(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ObjectLiteralExpression);
    super::braced_separated(cx, &mut out)?;
    Ok(out.finish())
}

/// `a.b`, `a?.b`
pub fn property_access(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::PropertyAccessExpression);
    out.push(member_object(cx)?);
    let dot = cx.eat_any(&[TsSyntaxKind::Dot, TsSyntaxKind::QuestionDot])?;
    out.push(dot.unwrap_or_else(|| Built::token(TsSyntaxKind::Dot)));
    out.push(cx.expect_where(is_member_name, "name")?);
    Ok(out.finish())
}

/// `a[i]`, `a?.[i]`
pub fn element_access(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ElementAccessExpression);
    out.push(member_object(cx)?);
    out.push_opt(cx.eat(TsSyntaxKind::QuestionDot)?);
    out.push(cx.token(TsSyntaxKind::OpenBracket)?);
    out.push(cx.expect_where(is_expression, "argument")?);
    out.push(cx.token(TsSyntaxKind::CloseBracket)?);
    Ok(out.finish())
}

/// `f<T>(a, b)`, `f?.(a)`
pub fn call(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::CallExpression);
    out.push(operand(cx, "callee", Precedence::LeftHandSide)?);
    out.push_opt(cx.eat(TsSyntaxKind::QuestionDot)?);
    type_arguments(cx, &mut out)?;
    arguments(cx, &mut out)?;
    Ok(out.finish())
}

/// `new C<T>(args)`; the argument list is kept only when present
pub fn new(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::NewExpression);
    out.push(cx.token(TsSyntaxKind::NewKw)?);
    let callee = operand(cx, "constructor", Precedence::LeftHandSide)?;
    let callee = if contains_call(&callee.element) {
        callee.map(precedence::parenthesize)
    } else {
        callee
    };
    out.push(callee);
    type_arguments(cx, &mut out)?;
    if !cx.is_done() {
        arguments(cx, &mut out)?;
    }
    Ok(out.finish())
}

/// ``tag<T>`text` ``
pub fn tagged_template(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TaggedTemplateExpression);
    out.push(operand(cx, "tag", Precedence::LeftHandSide)?);
    type_arguments(cx, &mut out)?;
    out.push(cx.expect_where(is_template, "template")?);
    Ok(out.finish())
}

/// `<T>expr`
pub fn type_assertion(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TypeAssertionExpression);
    out.push(cx.token(TsSyntaxKind::LessThan)?);
    out.push(cx.expect_where(is_type, "type")?);
    out.push(cx.token(TsSyntaxKind::GreaterThan)?);
    out.push(operand(cx, "expression", Precedence::Unary)?);
    Ok(out.finish())
}

pub fn parenthesized(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ParenthesizedExpression);
    out.push(cx.token(TsSyntaxKind::OpenParen)?);
    out.push(cx.expect_where(is_expression, "expression")?);
    out.push(cx.token(TsSyntaxKind::CloseParen)?);
    Ok(out.finish())
}

/// `delete x`, `typeof x`, `void x`, `await x`
pub fn keyword_unary(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let kind = cx.kind();
    let keyword = match kind {
        TsSyntaxKind::DeleteExpression => TsSyntaxKind::DeleteKw,
        TsSyntaxKind::TypeOfExpression => TsSyntaxKind::TypeOfKw,
        TsSyntaxKind::VoidExpression => TsSyntaxKind::VoidKw,
        _ => TsSyntaxKind::AwaitKw,
    };
    let mut out = Emitter::new(kind);
    out.push(cx.token(keyword)?);
    out.push(operand(cx, "operand", Precedence::Unary)?);
    Ok(out.finish())
}

/// `-x`, `!x`, `++x`
pub fn prefix_unary(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::PrefixUnaryExpression);
    let op = cx.expect_where(TsSyntaxKind::is_prefix_operator, "operator")?;
    let min = if matches!(op.kind(), TsSyntaxKind::PlusPlus | TsSyntaxKind::MinusMinus) {
        Precedence::LeftHandSide
    } else {
        Precedence::Unary
    };
    out.push(op);
    out.push(operand(cx, "operand", min)?);
    Ok(out.finish())
}

/// `x++`, `x--`
pub fn postfix_unary(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::PostfixUnaryExpression);
    out.push(operand(cx, "operand", Precedence::LeftHandSide)?);
    out.push(cx.expect_where(
        |kind| matches!(kind, TsSyntaxKind::PlusPlus | TsSyntaxKind::MinusMinus),
        "operator",
    )?);
    Ok(out.finish())
}

pub fn binary(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::BinaryExpression);
    let left = cx.expect_where(is_expression, "left operand")?;
    let op = cx.expect_where(TsSyntaxKind::is_binary_operator, "operator")?;
    let right = cx.expect_where(is_expression, "right operand")?;
    let (left, right) = precedence::binary_operands(left, op.kind(), right);
    out.push(left).push(op).push(right);
    Ok(out.finish())
}

/// `c ? a : b`
pub fn conditional(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ConditionalExpression);
    out.push(operand(cx, "condition", Precedence::Coalesce)?);
    out.push(cx.token(TsSyntaxKind::Question)?);
    out.push(operand(cx, "true branch", Precedence::Assignment)?);
    out.push(cx.token(TsSyntaxKind::Colon)?);
    out.push(operand(cx, "false branch", Precedence::Assignment)?);
    Ok(out.finish())
}

/// `` `a${b}c` ``: the head, then a `SyntaxList` of spans
pub fn template_expression(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TemplateExpression);
    match cx.eat(TsSyntaxKind::TemplateHead)? {
        Some(head) => out.push(head),
        None => out.text(TsSyntaxKind::TemplateHead, "`${"),
    };
    let spans = cx.until(&[])?;
    if spans.is_empty() {
        return Err(cx.missing("template span"));
    }
    out.list(spans);
    Ok(out.finish())
}

/// `${expr}` plus the literal text after it
pub fn template_span(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TemplateSpan);
    out.push(cx.expect_where(is_expression, "expression")?);
    let literal = cx.eat_any(&[TsSyntaxKind::TemplateMiddle, TsSyntaxKind::TemplateTail])?;
    match literal {
        Some(literal) => out.push(literal),
        None => out.text(TsSyntaxKind::TemplateTail, "}`"),
    };
    Ok(out.finish())
}

/// `yield`, `yield x`, `yield* x`
pub fn yield_expression(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::YieldExpression);
    out.push(cx.token(TsSyntaxKind::YieldKw)?);
    let star = cx.eat(TsSyntaxKind::Asterisk)?;
    let delegated = star.is_some();
    out.push_opt(star);
    if delegated || !cx.is_done() {
        out.push(operand(cx, "operand", Precedence::Assignment)?);
    }
    Ok(out.finish())
}

/// `...x` in arrays and argument lists
pub fn spread_element(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::SpreadElement);
    out.push(cx.token(TsSyntaxKind::DotDotDot)?);
    out.push(operand(cx, "operand", Precedence::Assignment)?);
    Ok(out.finish())
}

/// Hole in an array literal or pattern
pub fn omitted(_cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    Ok(Emitter::new(TsSyntaxKind::OmittedExpression).finish())
}

/// `Base<T>` in a heritage clause
pub fn expression_with_type_arguments(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ExpressionWithTypeArguments);
    out.push(operand(cx, "expression", Precedence::LeftHandSide)?);
    type_arguments(cx, &mut out)?;
    Ok(out.finish())
}

/// `x as T` and `x satisfies T`
pub fn type_relation(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let kind = cx.kind();
    let keyword = if kind == TsSyntaxKind::AsExpression {
        TsSyntaxKind::AsKw
    } else {
        TsSyntaxKind::SatisfiesKw
    };
    let mut out = Emitter::new(kind);
    out.push(operand(cx, "expression", Precedence::Relational)?);
    out.push(cx.token(keyword)?);
    out.push(cx.expect_where(is_type, "type")?);
    Ok(out.finish())
}

/// `x!`
pub fn non_null(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::NonNullExpression);
    out.push(operand(cx, "expression", Precedence::LeftHandSide)?);
    out.push(cx.token(TsSyntaxKind::Exclamation)?);
    Ok(out.finish())
}

/// `new.target`, `import.meta`
pub fn meta_property(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::MetaProperty);
    out.push(cx.expect_where(
        |kind| matches!(kind, TsSyntaxKind::NewKw | TsSyntaxKind::ImportKw),
        "keyword",
    )?);
    out.push(cx.token(TsSyntaxKind::Dot)?);
    out.push(cx.expect_where(|kind| kind == TsSyntaxKind::Identifier, "name")?);
    Ok(out.finish())
}

/// `name: value`
pub fn property_assignment(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::PropertyAssignment);
    out.push(cx.expect_where(is_property_name, "name")?);
    out.push(cx.token(TsSyntaxKind::Colon)?);
    out.push(operand(cx, "value", Precedence::Assignment)?);
    Ok(out.finish())
}

/// `name` or `name = default` (the latter only valid in patterns)
pub fn shorthand_property_assignment(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ShorthandPropertyAssignment);
    out.push(cx.expect_where(|kind| kind == TsSyntaxKind::Identifier || super::is_opaque(kind), "name")?);
    super::initializer(cx, &mut out)?;
    Ok(out.finish())
}

/// `...source` in an object literal
pub fn spread_assignment(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::SpreadAssignment);
    out.push(cx.token(TsSyntaxKind::DotDotDot)?);
    out.push(operand(cx, "operand", Precedence::Assignment)?);
    Ok(out.finish())
}
