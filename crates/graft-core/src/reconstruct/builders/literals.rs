//! Literal tokens whose text comes from the graph

use crate::cst::TsSyntaxKind;
use crate::cst::green::{self, GreenElement};
use crate::reconstruct::context::Cx;
use crate::result::Result;
use crate::store::PropertyValue;

pub fn numeric(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let text = cx.require_text()?.trim();
    Ok(green::token(TsSyntaxKind::NumericLiteral, text))
}

/// BigInt literal, re-adding the `n` suffix when absent
pub fn big_int(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let text = cx.require_text()?.trim();
    let text = if text.ends_with('n') {
        text.to_string()
    } else {
        format!("{text}n")
    };
    Ok(green::token(TsSyntaxKind::BigIntLiteral, &text))
}

pub fn regular_expression(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let text = cx.require_text()?;
    if !text.starts_with('/') || text.len() < 2 {
        return Err(cx.missing("pattern delimiters"));
    }
    Ok(green::token(TsSyntaxKind::RegularExpressionLiteral, text))
}

/// Quote style of a string literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    fn char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    fn from_property(value: Option<&PropertyValue>) -> Self {
        match value.and_then(PropertyValue::as_str) {
            Some("single") | Some("'") => Quote::Single,
            _ => Quote::Double,
        }
    }
}

/// Quote style of already-quoted text, `None` when the text is a raw value
pub fn quote_of(text: &str) -> Option<Quote> {
    let quote = match text.chars().next()? {
        '\'' => Quote::Single,
        '"' => Quote::Double,
        _ => return None,
    };
    let closed = text.len() >= 2 && text.ends_with(quote.char()) && !ends_escaped(text);
    closed.then_some(quote)
}

/// Whether the final character is escaped by an odd run of backslashes
fn ends_escaped(text: &str) -> bool {
    let body = &text[..text.len() - 1];
    body.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Wrap a raw string value in quotes, escaping what the quote requires
pub fn quote(value: &str, quote: Quote) -> String {
    let q = quote.char();
    let mut out = String::with_capacity(value.len() + 2);
    out.push(q);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
    out
}

/// String literal, keeping the recorded quote style
///
/// Quoted text is kept as written. Unquoted text is a raw value: it gets the
/// quotes named by the `quoteStyle` property (double by default).
pub fn string(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let text = cx.node().text().unwrap_or_default();
    let spelled = match quote_of(text) {
        Some(_) => text.to_string(),
        None => quote(text, Quote::from_property(cx.node().property("quoteStyle"))),
    };
    Ok(green::token(TsSyntaxKind::StringLiteral, &spelled))
}

/// Which template delimiters a template piece carries
fn template_delimiters(kind: TsSyntaxKind) -> (&'static str, &'static str) {
    match kind {
        TsSyntaxKind::TemplateHead => ("`", "${"),
        TsSyntaxKind::TemplateMiddle => ("}", "${"),
        TsSyntaxKind::TemplateTail => ("}", "`"),
        _ => ("`", "`"),
    }
}

/// Whether `body` can sit between template delimiters as written: no bare
/// backtick, no bare `${`, no escape left dangling at the end
fn is_template_body(body: &str) -> bool {
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return false;
                }
            }
            '`' => return false,
            '$' if chars.peek() == Some(&'{') => return false,
            _ => {}
        }
    }
    true
}

/// Raw template text with `\`, `` ` `` and `${` escaped
fn escape_template(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    out
}

/// Source spelling of a template piece
///
/// Text that already carries well-formed delimiters is kept as written.
/// Anything else is a raw value: it is escaped and then delimited.
fn spell_template(kind: TsSyntaxKind, text: &str) -> String {
    let (open, close) = template_delimiters(kind);
    let delimited = text.len() >= open.len() + close.len()
        && text.starts_with(open)
        && text.ends_with(close)
        && is_template_body(&text[open.len()..text.len() - close.len()]);
    if delimited {
        text.to_string()
    } else {
        format!("{open}{}{close}", escape_template(text))
    }
}

/// Template pieces and backtick strings, re-applying `` ` ``, `${` and `}`
pub fn template_piece(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let kind = cx.kind();
    let spelled = spell_template(kind, cx.node().text().unwrap_or_default());
    Ok(green::token(kind, &spelled))
}
