//! Rendering reconstructed trees to text
//!
//! A reconstructed tree carries no whitespace, so rendering decides all of
//! the layout. [`Printer`] is the seam for plugging in a real formatter;
//! [`TokenPrinter`] is the built-in one. It lowers the tree into the
//! [`FormatElement`](format_element::FormatElement) IR and writes it out:
//!
//! - [`Layout::Compact`]: one line per top-level statement, single spaces
//!   where the grammar wants them
//! - [`Layout::Readable`]: compact, plus statements and members inside
//!   braces on their own indented lines
//! - [`Layout::Minified`]: a space only where two tokens would otherwise
//!   merge into one
//!
//! Single-line comments always end their line.

pub mod format_element;
mod lower;
pub mod writer;

use std::fmt;
use std::str::FromStr;

use rowan::GreenNode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GraftError;
use crate::result::Result;

pub use lower::{UNATTACHED, lower};
use writer::{Writer, WriterOptions};

/// Line layout of rendered output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Compact,
    #[default]
    Readable,
    Minified,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Compact, Layout::Readable, Layout::Minified];

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Compact => "compact",
            Layout::Readable => "readable",
            Layout::Minified => "minified",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layout {
    type Err = GraftError;

    fn from_str(s: &str) -> Result<Self> {
        Layout::ALL
            .into_iter()
            .find(|layout| layout.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                GraftError::config_error(format!(
                    "unknown layout '{s}' (expected compact, readable or minified)"
                ))
            })
    }
}

/// Render settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub layout: Layout,
    pub include_comments: bool,
    /// Spaces per indentation level
    pub indent_size: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            layout: Layout::Readable,
            include_comments: true,
            indent_size: 2,
        }
    }
}

/// Turns a concrete tree into source text
///
/// Implementations must be deterministic: the same tree and options always
/// produce the same text.
pub trait Printer {
    fn render(&self, node: &GreenNode, options: &RenderOptions) -> Result<String>;
}

/// Built-in printer working from token kinds alone
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenPrinter;

impl TokenPrinter {
    pub fn new() -> Self {
        Self
    }
}

impl Printer for TokenPrinter {
    fn render(&self, node: &GreenNode, options: &RenderOptions) -> Result<String> {
        let elements = lower(node, options)?;
        let mut writer = Writer::new(WriterOptions {
            indent_size: options.indent_size,
            ..WriterOptions::default()
        });
        let text = writer.print(&elements);
        debug!(
            "Rendered {} element(s) into {} line(s), {} layout",
            elements.len(),
            writer.line_number(),
            options.layout
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::TsSyntaxKind;
    use crate::cst::green::{self, GreenElement};
    use crate::error::ErrorKind;

    fn ident(name: &str) -> GreenElement {
        green::token(TsSyntaxKind::Identifier, name)
    }

    fn t(kind: TsSyntaxKind) -> GreenElement {
        green::canonical(kind)
    }

    fn list(children: Vec<GreenElement>) -> GreenElement {
        green::node(TsSyntaxKind::SyntaxList, children)
    }

    fn root(statements: Vec<GreenElement>) -> GreenNode {
        green::node(
            TsSyntaxKind::SourceFile,
            vec![list(statements), t(TsSyntaxKind::EndOfFile)],
        )
        .into_node()
        .expect("node")
    }

    /// `let x = -(-y);` spelled without the parentheses: `let x = - -y;`
    fn negation() -> GreenElement {
        use TsSyntaxKind::*;
        let inner = green::node(PrefixUnaryExpression, vec![t(Minus), ident("y")]);
        let outer = green::node(PrefixUnaryExpression, vec![t(Minus), inner]);
        let decl = green::node(VariableDeclaration, vec![ident("x"), t(Equals), outer]);
        let decls = green::node(VariableDeclarationList, vec![t(LetKw), list(vec![decl])]);
        green::node(VariableStatement, vec![decls, t(Semicolon)])
    }

    /// `function f(a) { if (a) { return a; } }`
    fn function() -> GreenElement {
        use TsSyntaxKind::*;
        let ret = green::node(ReturnStatement, vec![t(ReturnKw), ident("a"), t(Semicolon)]);
        let then = green::node(Block, vec![t(OpenBrace), list(vec![ret]), t(CloseBrace)]);
        let cond = green::node(IfStatement, vec![t(IfKw), t(OpenParen), ident("a"), t(CloseParen), then]);
        let body = green::node(Block, vec![t(OpenBrace), list(vec![cond]), t(CloseBrace)]);
        let param = green::node(Parameter, vec![ident("a")]);
        green::node(
            FunctionDeclaration,
            vec![t(FunctionKw), ident("f"), t(OpenParen), list(vec![param]), t(CloseParen), body],
        )
    }

    fn render(tree: &GreenNode, layout: Layout) -> String {
        let options = RenderOptions {
            layout,
            ..RenderOptions::default()
        };
        TokenPrinter.render(tree, &options).expect("render")
    }

    #[test]
    fn test_readable_layout() {
        let tree = root(vec![negation(), function()]);
        insta::assert_snapshot!(render(&tree, Layout::Readable), @r"
        let x = - -y;
        function f(a) {
          if (a) {
            return a;
          }
        }
        ");
    }

    #[test]
    fn test_compact_layout() {
        let tree = root(vec![negation(), function()]);
        insta::assert_snapshot!(render(&tree, Layout::Compact), @r"
        let x = - -y;
        function f(a) { if (a) { return a; } }
        ");
    }

    #[test]
    fn test_minified_layout_keeps_tokens_apart() {
        let tree = root(vec![negation(), function()]);
        insta::assert_snapshot!(
            render(&tree, Layout::Minified),
            @"let x=- -y;function f(a){if(a){return a;}}"
        );
    }

    #[test]
    fn test_single_line_comment_ends_the_line() {
        use TsSyntaxKind::*;
        let stmt = green::node(
            ExpressionStatement,
            vec![
                green::token(SingleLineComment, "// call"),
                ident("run"),
                t(Semicolon),
            ],
        );
        let tree = root(vec![stmt]);
        assert_eq!(render(&tree, Layout::Minified), "// call\nrun;");

        let options = RenderOptions {
            include_comments: false,
            ..RenderOptions::default()
        };
        assert_eq!(TokenPrinter.render(&tree, &options).expect("render"), "run;");
    }

    #[test]
    fn test_unknown_kind_fails() {
        let tree = GreenNode::new(
            TsSyntaxKind::SourceFile.into(),
            vec![rowan::NodeOrToken::Token(rowan::GreenToken::new(
                rowan::SyntaxKind(4242),
                "?",
            ))],
        );
        let err = TokenPrinter
            .render(&tree, &RenderOptions::default())
            .expect_err("unknown kind");
        assert_eq!(err.kind(), ErrorKind::RenderFailed);
        assert!(err.to_string().contains("SourceFile > Unknown(4242)"), "{err}");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let tree = root(vec![negation(), function()]);
        for layout in Layout::ALL {
            assert_eq!(render(&tree, layout), render(&tree, layout));
        }
    }

    #[test]
    fn test_layout_parsing() {
        assert_eq!("Compact".parse::<Layout>().expect("layout"), Layout::Compact);
        assert!("pretty".parse::<Layout>().is_err());
    }
}
