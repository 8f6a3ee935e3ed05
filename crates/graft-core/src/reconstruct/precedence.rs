//! Operator precedence of reconstructed elements
//!
//! Builders assemble operands that were reconstructed independently, so an
//! operand may bind more loosely than its position allows (`a * (b + c)` in a
//! graph that carries no parenthesized node). These helpers measure an
//! element and wrap it in a parenthesized node when it would otherwise
//! re-associate. Existing parentheses are never removed.

use rowan::NodeOrToken;

use super::emit::Built;
use crate::cst::TsSyntaxKind;
use crate::cst::green::{self, GreenElement};

/// Expression binding strength, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Comma,
    Assignment,
    Conditional,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponent,
    Unary,
    Update,
    /// `new X` without an argument list
    NewWithoutArguments,
    /// Calls, member access, `new X()`
    LeftHandSide,
    Primary,
}

/// Precedence of a binary operator token
pub fn of_binary_operator(op: TsSyntaxKind) -> Precedence {
    use TsSyntaxKind::*;
    match op {
        Comma => Precedence::Comma,
        QuestionQuestion => Precedence::Coalesce,
        BarBar => Precedence::LogicalOr,
        AmpersandAmpersand => Precedence::LogicalAnd,
        Bar => Precedence::BitwiseOr,
        Caret => Precedence::BitwiseXor,
        Ampersand => Precedence::BitwiseAnd,
        EqualsEquals | ExclamationEquals | EqualsEqualsEquals | ExclamationEqualsEquals => {
            Precedence::Equality
        }
        LessThan | GreaterThan | LessThanEquals | GreaterThanEquals | InstanceOfKw | InKw => {
            Precedence::Relational
        }
        LessThanLessThan | GreaterThanGreaterThan | GreaterThanGreaterThanGreaterThan => {
            Precedence::Shift
        }
        Plus | Minus => Precedence::Additive,
        Asterisk | Slash | Percent => Precedence::Multiplicative,
        AsteriskAsterisk => Precedence::Exponent,
        kind if kind.is_assignment_operator() => Precedence::Assignment,
        _ => Precedence::Primary,
    }
}

/// Right-associative operators: assignments and `**`
pub fn is_right_associative(op: TsSyntaxKind) -> bool {
    op == TsSyntaxKind::AsteriskAsterisk || op.is_assignment_operator()
}

/// Operator token of a binary expression element
pub fn binary_operator(element: &GreenElement) -> Option<TsSyntaxKind> {
    let NodeOrToken::Node(node) = element else {
        return None;
    };
    if green::kind_of(element) != TsSyntaxKind::BinaryExpression {
        return None;
    }
    green::significant_children(node)
        .nth(1)
        .map(green::kind_of_ref)
}

/// How tightly an expression element binds
pub fn of_expression(element: &GreenElement) -> Precedence {
    use TsSyntaxKind::*;
    match green::kind_of(element) {
        BinaryExpression => binary_operator(element)
            .map(of_binary_operator)
            .unwrap_or(Precedence::Primary),
        AsExpression | SatisfiesExpression => Precedence::Relational,
        ArrowFunction | YieldExpression | SpreadElement => Precedence::Assignment,
        ConditionalExpression => Precedence::Conditional,
        PrefixUnaryExpression | DeleteExpression | TypeOfExpression | VoidExpression
        | AwaitExpression | TypeAssertionExpression => Precedence::Unary,
        PostfixUnaryExpression => Precedence::Update,
        NewExpression => {
            if has_child(element, OpenParen) {
                Precedence::LeftHandSide
            } else {
                Precedence::NewWithoutArguments
            }
        }
        CallExpression | PropertyAccessExpression | ElementAccessExpression
        | TaggedTemplateExpression | NonNullExpression | MetaProperty
        | ExpressionWithTypeArguments => Precedence::LeftHandSide,
        _ => Precedence::Primary,
    }
}

fn has_child(element: &GreenElement, kind: TsSyntaxKind) -> bool {
    match element {
        NodeOrToken::Node(node) => green::significant_children(node).any(|child| green::kind_of_ref(child) == kind),
        NodeOrToken::Token(_) => false,
    }
}

/// Wrap in `( … )` when the operand binds more loosely than `min`
pub fn at_least(built: Built, min: Precedence) -> Built {
    if of_expression(&built.element) < min {
        built.map(parenthesize)
    } else {
        built
    }
}

pub fn parenthesize(element: GreenElement) -> GreenElement {
    green::node(
        TsSyntaxKind::ParenthesizedExpression,
        vec![
            green::canonical(TsSyntaxKind::OpenParen),
            element,
            green::canonical(TsSyntaxKind::CloseParen),
        ],
    )
}

/// Operands of a binary expression
///
/// `??` cannot be mixed with `&&` or `||` without parentheses, and a unary
/// operand on the left of `**` is a syntax error, so both get wrapped even
/// though plain precedence would allow them.
pub fn binary_operands(left: Built, op: TsSyntaxKind, right: Built) -> (Built, Built) {
    let prec = of_binary_operator(op);
    let (left_min, right_min) = if op.is_assignment_operator() {
        (Precedence::LeftHandSide, Precedence::Assignment)
    } else if is_right_associative(op) {
        (next(prec), prec)
    } else {
        (prec, next(prec))
    };

    let left = at_least(left, left_min);
    let right = at_least(right, right_min);
    (guard_mixing(left, op), guard_mixing(right, op))
}

fn guard_mixing(built: Built, op: TsSyntaxKind) -> Built {
    use TsSyntaxKind::*;
    let inner = binary_operator(&built.element);
    let mixes = match (op, inner) {
        (QuestionQuestion, Some(AmpersandAmpersand | BarBar)) => true,
        (AmpersandAmpersand | BarBar, Some(QuestionQuestion)) => true,
        (AsteriskAsterisk, _) => matches!(
            green::kind_of(&built.element),
            PrefixUnaryExpression | DeleteExpression | TypeOfExpression | VoidExpression | AwaitExpression
        ),
        _ => false,
    };
    if mixes {
        built.map(parenthesize)
    } else {
        built
    }
}

fn next(prec: Precedence) -> Precedence {
    use Precedence::*;
    match prec {
        Comma => Assignment,
        Assignment => Conditional,
        Conditional => Coalesce,
        Coalesce => LogicalOr,
        LogicalOr => LogicalAnd,
        LogicalAnd => BitwiseOr,
        BitwiseOr => BitwiseXor,
        BitwiseXor => BitwiseAnd,
        BitwiseAnd => Equality,
        Equality => Relational,
        Relational => Shift,
        Shift => Additive,
        Additive => Multiplicative,
        Multiplicative => Exponent,
        Exponent => Unary,
        Unary => Update,
        Update => NewWithoutArguments,
        NewWithoutArguments => LeftHandSide,
        LeftHandSide | Primary => Primary,
    }
}

/// Type binding strength, loosest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypePrecedence {
    /// Function, constructor and conditional types
    Function,
    Union,
    Intersection,
    /// `keyof T`, `infer U`
    Operator,
    /// `T[]`, `T[K]`
    Postfix,
    Primary,
}

pub fn of_type(element: &GreenElement) -> TypePrecedence {
    use TsSyntaxKind::*;
    match green::kind_of(element) {
        FunctionType | ConstructorType | ConditionalType => TypePrecedence::Function,
        UnionType => TypePrecedence::Union,
        IntersectionType => TypePrecedence::Intersection,
        TypeOperator | InferType => TypePrecedence::Operator,
        ArrayType | IndexedAccessType | OptionalType => TypePrecedence::Postfix,
        _ => TypePrecedence::Primary,
    }
}

/// Wrap a type in `( … )` when it binds more loosely than `min`
pub fn type_at_least(built: Built, min: TypePrecedence) -> Built {
    if of_type(&built.element) < min {
        built.map(|element| {
            green::node(
                TsSyntaxKind::ParenthesizedType,
                vec![
                    green::canonical(TsSyntaxKind::OpenParen),
                    element,
                    green::canonical(TsSyntaxKind::CloseParen),
                ],
            )
        })
    } else {
        built
    }
}

/// First significant token of an element, for statement-start ambiguities
pub fn first_token(element: &GreenElement) -> Option<TsSyntaxKind> {
    match element {
        NodeOrToken::Token(_) => Some(green::kind_of(element)),
        NodeOrToken::Node(node) => {
            let mut current = node.clone();
            loop {
                let first = green::significant_children(&current).next()?;
                match first {
                    NodeOrToken::Token(token) => {
                        return TsSyntaxKind::from_raw(token.kind().0);
                    }
                    NodeOrToken::Node(inner) => current = inner.to_owned(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Built {
        Built::bare(green::token(TsSyntaxKind::Identifier, name))
    }

    fn binary(left: &str, op: TsSyntaxKind, right: &str) -> Built {
        Built::bare(green::node(
            TsSyntaxKind::BinaryExpression,
            vec![
                green::token(TsSyntaxKind::Identifier, left),
                green::canonical(op),
                green::token(TsSyntaxKind::Identifier, right),
            ],
        ))
    }

    #[test]
    fn test_lower_precedence_operand_is_wrapped() {
        let sum = binary("b", TsSyntaxKind::Plus, "c");
        let (left, right) = binary_operands(ident("a"), TsSyntaxKind::Asterisk, sum);
        assert_eq!(green::text_of(&left.element), "a");
        assert_eq!(green::text_of(&right.element), "(b+c)");
    }

    #[test]
    fn test_left_associative_right_operand_is_wrapped() {
        let diff = binary("b", TsSyntaxKind::Minus, "c");
        let (_, right) = binary_operands(ident("a"), TsSyntaxKind::Minus, diff);
        assert_eq!(green::text_of(&right.element), "(b-c)");

        let diff = binary("a", TsSyntaxKind::Minus, "b");
        let (left, _) = binary_operands(diff, TsSyntaxKind::Minus, ident("c"));
        assert_eq!(green::text_of(&left.element), "a-b");
    }

    #[test]
    fn test_assignment_chains_stay_bare() {
        let inner = binary("b", TsSyntaxKind::Equals, "c");
        let (_, right) = binary_operands(ident("a"), TsSyntaxKind::Equals, inner);
        assert_eq!(green::text_of(&right.element), "b=c");
    }

    #[test]
    fn test_coalesce_mixing_is_wrapped() {
        let or = binary("a", TsSyntaxKind::BarBar, "b");
        let (left, _) = binary_operands(or, TsSyntaxKind::QuestionQuestion, ident("c"));
        assert_eq!(green::text_of(&left.element), "(a||b)");
    }

    #[test]
    fn test_union_inside_array_type_is_wrapped() {
        let union = Built::bare(green::node(
            TsSyntaxKind::UnionType,
            vec![green::token(TsSyntaxKind::Identifier, "A")],
        ));
        let wrapped = type_at_least(union, TypePrecedence::Postfix);
        assert_eq!(wrapped.kind(), TsSyntaxKind::ParenthesizedType);
    }

    #[test]
    fn test_first_token_descends() {
        let call = green::node(
            TsSyntaxKind::CallExpression,
            vec![
                green::node(
                    TsSyntaxKind::FunctionExpression,
                    vec![green::canonical(TsSyntaxKind::FunctionKw)],
                ),
                green::canonical(TsSyntaxKind::OpenParen),
            ],
        );
        assert_eq!(first_token(&call), Some(TsSyntaxKind::FunctionKw));
    }
}
