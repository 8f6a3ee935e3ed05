//! Format elements for building rendered output
//!
//! The IR distinguishes static ASCII text (punctuation and keywords, spelled
//! by the kind table) from dynamic text taken from the tree (names, literals,
//! comments), so the writer can take a bulk-copy fast path for the former and
//! only measure Unicode width for the latter.
//!
//! # Example
//!
//! ```rust,ignore
//! use graft_core::printer::format_element::{token, text, space, hard_line_break};
//! use rowan::TextSize;
//!
//! let elements = vec![
//!     token("let"),
//!     space(),
//!     text("größe", TextSize::from(4)),
//!     token(";"),
//!     hard_line_break(),
//! ];
//! ```

use rowan::TextSize;
use std::fmt;

/// Building block of rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatElement {
    /// Static ASCII text: keywords, operators, punctuation
    ///
    /// Must not contain `\n`, `\r` or `\t`.
    Token(&'static str),

    /// Text from the tree: identifiers, literals, comments
    ///
    /// May contain Unicode and line breaks. The position is the offset of the
    /// token in the unformatted tree text.
    Text {
        text: Box<str>,
        source_position: TextSize,
    },

    /// Always inserts a newline
    HardLineBreak,

    /// Single ASCII space
    Space,

    /// Increase indentation level for the following lines
    Indent,

    /// Decrease indentation level for the following lines
    Dedent,
}

impl FormatElement {
    /// Check if this element produces no characters
    pub fn is_empty(&self) -> bool {
        match self {
            FormatElement::Token(s) => s.is_empty(),
            FormatElement::Text { text, .. } => text.is_empty(),
            FormatElement::Space | FormatElement::HardLineBreak => false,
            FormatElement::Indent | FormatElement::Dedent => true,
        }
    }
}

impl fmt::Display for FormatElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatElement::Token(s) => write!(f, "{}", s),
            FormatElement::Text { text, .. } => write!(f, "{}", text),
            FormatElement::HardLineBreak => writeln!(f),
            FormatElement::Space => write!(f, " "),
            FormatElement::Indent | FormatElement::Dedent => Ok(()),
        }
    }
}

/// Token for static, ASCII-only text
///
/// # Panics
///
/// In debug builds, panics if `text` is not ASCII or contains newlines,
/// tabs or carriage returns.
pub fn token(text: &'static str) -> FormatElement {
    debug_assert!(text.is_ascii(), "Token must be ASCII only, got: {:?}", text);
    debug_assert!(
        !text.contains(['\n', '\r', '\t']),
        "Token cannot contain newlines/tabs, use HardLineBreak/Space instead: {:?}",
        text
    );
    FormatElement::Token(text)
}

/// Text element from tree content
pub fn text(text: &str, position: TextSize) -> FormatElement {
    FormatElement::Text {
        text: text.into(),
        source_position: position,
    }
}

pub fn hard_line_break() -> FormatElement {
    FormatElement::HardLineBreak
}

pub fn space() -> FormatElement {
    FormatElement::Space
}

pub fn indent() -> FormatElement {
    FormatElement::Indent
}

pub fn dedent() -> FormatElement {
    FormatElement::Dedent
}
