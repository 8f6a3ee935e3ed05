//! Statements, blocks and clauses

use rowan::NodeOrToken;

use super::{is_block, is_expression, terminator};
use crate::cst::TsSyntaxKind;
use crate::cst::green::{self, GreenElement};
use crate::reconstruct::context::Cx;
use crate::reconstruct::emit::{Built, Emitter};
use crate::reconstruct::precedence::{self, Precedence};
use crate::result::Result;

fn is_label(kind: TsSyntaxKind) -> bool {
    kind == TsSyntaxKind::Identifier || super::is_opaque(kind)
}

/// `( expr )` around a condition or discriminant
fn condition(cx: &mut Cx<'_, '_>, out: &mut Emitter, role: &str) -> Result<()> {
    out.push(cx.token(TsSyntaxKind::OpenParen)?);
    out.push(cx.expect_where(is_expression, role)?);
    out.push(cx.token(TsSyntaxKind::CloseParen)?);
    Ok(())
}

/// Statement list followed by the end-of-file token
pub fn source_file(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::SourceFile);
    let statements = cx.until(&[TsSyntaxKind::EndOfFile])?;
    out.list(statements);
    out.push(cx.token(TsSyntaxKind::EndOfFile)?);
    Ok(out.finish())
}

/// `{ … }` for blocks and `switch` case blocks
pub fn block(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(cx.kind());
    super::braced_list(cx, &mut out)?;
    Ok(out.finish())
}

pub fn empty_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::EmptyStatement);
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

/// Expressions whose leftmost piece would be read as a declaration or a
/// block at statement start
fn starts_ambiguously(element: &GreenElement) -> bool {
    use TsSyntaxKind::*;
    let mut current = element.clone();
    loop {
        let NodeOrToken::Node(node) = &current else {
            return false;
        };
        let kind = green::kind_of(&current);
        if matches!(kind, ObjectLiteralExpression | FunctionExpression | ClassExpression) {
            return true;
        }
        if kind == ParenthesizedExpression {
            return false;
        }
        let first = green::significant_children(node).next().map(green::to_owned);
        match first {
            Some(first) => current = first,
            None => return false,
        }
    }
}

/// `expr;`, wrapping an expression that would otherwise start a declaration
pub fn expression_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ExpressionStatement);
    let expr = cx.expect_where(is_expression, "expression")?;
    let expr = if starts_ambiguously(&expr.element) {
        expr.map(precedence::parenthesize)
    } else {
        expr
    };
    out.push(expr);
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

/// Whether a statement ends in an `if` without `else`, so a following
/// `else` would attach to it instead of to an outer `if`
///
/// The trailing statement of loops, labels and `with` is followed, as are
/// `else` branches; anything else closes the chain.
fn has_open_else(element: &GreenElement) -> bool {
    use TsSyntaxKind::*;
    let mut current = element.clone();
    loop {
        let NodeOrToken::Node(node) = &current else {
            return false;
        };
        let next = match green::kind_of(&current) {
            IfStatement => {
                let children: Vec<_> = green::significant_children(node).collect();
                let else_at = children
                    .iter()
                    .position(|child| green::kind_of_ref(*child) == ElseKw);
                match else_at.and_then(|at| children.get(at + 1)) {
                    Some(branch) => green::to_owned(*branch),
                    None => return true,
                }
            }
            WhileStatement | ForStatement | ForInStatement | ForOfStatement | LabeledStatement
            | WithStatement => match green::significant_children(node).last() {
                Some(body) => green::to_owned(body),
                None => return false,
            },
            _ => return false,
        };
        current = next;
    }
}

fn wrap_in_block(statement: Built) -> Built {
    statement.map(|element| {
        green::node(
            TsSyntaxKind::Block,
            vec![
                green::canonical(TsSyntaxKind::OpenBrace),
                green::node(TsSyntaxKind::SyntaxList, vec![element]),
                green::canonical(TsSyntaxKind::CloseBrace),
            ],
        )
    })
}

/// `if (c) a else b`
pub fn if_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::IfStatement);
    out.push(cx.token(TsSyntaxKind::IfKw)?);
    condition(cx, &mut out, "condition")?;
    let then = cx.expect("then statement")?;
    let otherwise = cx.marked(TsSyntaxKind::ElseKw, TsSyntaxKind::is_statement, "else statement")?;
    let then = if otherwise.is_some() && has_open_else(&then.element) {
        wrap_in_block(then)
    } else {
        then
    };
    out.push(then);
    out.pair(otherwise);
    Ok(out.finish())
}

/// `do stmt while (c);`
pub fn do_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::DoStatement);
    out.push(cx.token(TsSyntaxKind::DoKw)?);
    out.push(cx.expect("body")?);
    out.push(cx.token(TsSyntaxKind::WhileKw)?);
    condition(cx, &mut out, "condition")?;
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

pub fn while_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::WhileStatement);
    out.push(cx.token(TsSyntaxKind::WhileKw)?);
    condition(cx, &mut out, "condition")?;
    out.push(cx.expect("body")?);
    Ok(out.finish())
}

/// `for (init; cond; step) stmt`
///
/// Each header part is optional and recognised by its `;`. The step is
/// taken only when a body still follows it.
pub fn for_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ForStatement);
    out.push(cx.token(TsSyntaxKind::ForKw)?);
    out.push(cx.token(TsSyntaxKind::OpenParen)?);
    for _ in 0..2 {
        if !cx.at(TsSyntaxKind::Semicolon) {
            out.push(cx.expect("for header")?);
        }
        out.push(cx.token(TsSyntaxKind::Semicolon)?);
    }
    if !cx.at(TsSyntaxKind::CloseParen) && cx.remaining() >= 2 {
        out.push(cx.expect("incrementor")?);
    }
    out.push(cx.token(TsSyntaxKind::CloseParen)?);
    out.push(cx.expect("body")?);
    Ok(out.finish())
}

/// `for (x in o)` and `for await (x of xs)`
pub fn for_in_of(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let kind = cx.kind();
    let mut out = Emitter::new(kind);
    out.push(cx.token(TsSyntaxKind::ForKw)?);
    if kind == TsSyntaxKind::ForOfStatement {
        out.push_opt(cx.eat(TsSyntaxKind::AwaitKw)?);
    }
    out.push(cx.token(TsSyntaxKind::OpenParen)?);
    out.push(cx.expect("initializer")?);
    let (keyword, min) = if kind == TsSyntaxKind::ForInStatement {
        (TsSyntaxKind::InKw, Precedence::Comma)
    } else {
        (TsSyntaxKind::OfKw, Precedence::Assignment)
    };
    out.push(cx.token(keyword)?);
    let iterable = cx.expect_where(is_expression, "iterable")?;
    out.push(precedence::at_least(iterable, min));
    out.push(cx.token(TsSyntaxKind::CloseParen)?);
    out.push(cx.expect("body")?);
    Ok(out.finish())
}

/// `break label;` and `continue label;`
pub fn jump(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let kind = cx.kind();
    let keyword = if kind == TsSyntaxKind::BreakStatement {
        TsSyntaxKind::BreakKw
    } else {
        TsSyntaxKind::ContinueKw
    };
    let mut out = Emitter::new(kind);
    out.push(cx.token(keyword)?);
    out.push_opt(cx.opt_where(is_label)?);
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

pub fn return_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ReturnStatement);
    out.push(cx.token(TsSyntaxKind::ReturnKw)?);
    out.push_opt(cx.opt_where(is_expression)?);
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

pub fn throw_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::ThrowStatement);
    out.push(cx.token(TsSyntaxKind::ThrowKw)?);
    out.push(cx.expect_where(is_expression, "expression")?);
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

pub fn switch_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::SwitchStatement);
    out.push(cx.token(TsSyntaxKind::SwitchKw)?);
    condition(cx, &mut out, "discriminant")?;
    out.push(cx.expect_where(
        |kind| kind == TsSyntaxKind::CaseBlock || super::is_opaque(kind),
        "case block",
    )?);
    Ok(out.finish())
}

/// `label: stmt`
pub fn labeled_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::LabeledStatement);
    out.push(cx.expect_where(is_label, "label")?);
    out.push(cx.token(TsSyntaxKind::Colon)?);
    out.push(cx.expect("statement")?);
    Ok(out.finish())
}

/// `try { } catch (e) { } finally { }`
pub fn try_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::TryStatement);
    out.push(cx.token(TsSyntaxKind::TryKw)?);
    out.push(cx.expect_where(is_block, "try block")?);
    let catch = cx.eat(TsSyntaxKind::CatchClause)?;
    let finally = cx.marked(TsSyntaxKind::FinallyKw, is_block, "finally block")?;
    if catch.is_none() && finally.is_none() {
        return Err(cx.missing("catch or finally clause"));
    }
    out.push_opt(catch);
    out.pair(finally);
    Ok(out.finish())
}

pub fn debugger_statement(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::DebuggerStatement);
    out.push(cx.token(TsSyntaxKind::DebuggerKw)?);
    terminator(cx, &mut out)?;
    Ok(out.finish())
}

/// `case expr: statements`
pub fn case_clause(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::CaseClause);
    out.push(cx.token(TsSyntaxKind::CaseKw)?);
    out.push(cx.expect_where(is_expression, "case expression")?);
    out.push(cx.token(TsSyntaxKind::Colon)?);
    let statements = cx.until(&[])?;
    out.list(statements);
    Ok(out.finish())
}

/// `default: statements`
pub fn default_clause(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::DefaultClause);
    out.push(cx.token(TsSyntaxKind::DefaultKw)?);
    out.push(cx.token(TsSyntaxKind::Colon)?);
    let statements = cx.until(&[])?;
    out.list(statements);
    Ok(out.finish())
}

/// `catch (e: unknown) { … }`, the binding being optional
pub fn catch_clause(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let mut out = Emitter::new(TsSyntaxKind::CatchClause);
    out.push(cx.token(TsSyntaxKind::CatchKw)?);
    let open = cx.eat(TsSyntaxKind::OpenParen)?;
    if open.is_some() || cx.at(TsSyntaxKind::VariableDeclaration) {
        out.push(open.unwrap_or_else(|| Built::token(TsSyntaxKind::OpenParen)));
        out.push(cx.expect_where(
            |kind| kind == TsSyntaxKind::VariableDeclaration || super::is_opaque(kind),
            "catch binding",
        )?);
        out.push(cx.token(TsSyntaxKind::CloseParen)?);
    }
    out.push(cx.expect_where(is_block, "catch block")?);
    Ok(out.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn if_without_else() -> GreenElement {
        green::node(
            TsSyntaxKind::IfStatement,
            vec![
                green::canonical(TsSyntaxKind::IfKw),
                green::canonical(TsSyntaxKind::OpenParen),
                green::token(TsSyntaxKind::Identifier, "b"),
                green::canonical(TsSyntaxKind::CloseParen),
                green::token(TsSyntaxKind::Identifier, "x"),
            ],
        )
    }

    #[test]
    fn test_open_else_detection() {
        assert!(has_open_else(&if_without_else()));
        let closed = green::node(
            TsSyntaxKind::IfStatement,
            vec![
                green::canonical(TsSyntaxKind::IfKw),
                green::canonical(TsSyntaxKind::OpenParen),
                green::token(TsSyntaxKind::Identifier, "a"),
                green::canonical(TsSyntaxKind::CloseParen),
                green::token(TsSyntaxKind::Identifier, "x"),
                green::canonical(TsSyntaxKind::ElseKw),
                green::token(TsSyntaxKind::Identifier, "y"),
            ],
        );
        assert!(!has_open_else(&closed));
    }

    #[test]
    fn test_open_else_found_through_loop_bodies() {
        let while_loop = green::node(
            TsSyntaxKind::WhileStatement,
            vec![
                green::canonical(TsSyntaxKind::WhileKw),
                green::canonical(TsSyntaxKind::OpenParen),
                green::token(TsSyntaxKind::Identifier, "c"),
                green::canonical(TsSyntaxKind::CloseParen),
                if_without_else(),
            ],
        );
        assert!(has_open_else(&while_loop));

        let labeled = green::node(
            TsSyntaxKind::LabeledStatement,
            vec![
                green::token(TsSyntaxKind::Identifier, "outer"),
                green::canonical(TsSyntaxKind::Colon),
                while_loop,
            ],
        );
        assert!(has_open_else(&labeled));

        let braced = wrap_in_block(Built::bare(labeled));
        assert!(!has_open_else(&braced.element));

        let do_loop = green::node(
            TsSyntaxKind::DoStatement,
            vec![
                green::canonical(TsSyntaxKind::DoKw),
                if_without_else(),
                green::canonical(TsSyntaxKind::WhileKw),
                green::canonical(TsSyntaxKind::OpenParen),
                green::token(TsSyntaxKind::Identifier, "c"),
                green::canonical(TsSyntaxKind::CloseParen),
                green::canonical(TsSyntaxKind::Semicolon),
            ],
        );
        assert!(!has_open_else(&do_loop));
    }

    #[test]
    fn test_object_literal_statement_is_ambiguous() {
        let object = green::node(
            TsSyntaxKind::ObjectLiteralExpression,
            vec![
                green::canonical(TsSyntaxKind::OpenBrace),
                green::node(TsSyntaxKind::SyntaxList, vec![]),
                green::canonical(TsSyntaxKind::CloseBrace),
            ],
        );
        let access = green::node(
            TsSyntaxKind::PropertyAccessExpression,
            vec![
                object,
                green::canonical(TsSyntaxKind::Dot),
                green::token(TsSyntaxKind::Identifier, "x"),
            ],
        );
        assert!(starts_ambiguously(&access));
        assert!(!starts_ambiguously(&green::token(TsSyntaxKind::Identifier, "x")));
    }
}
