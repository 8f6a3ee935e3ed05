//! Concrete Syntax Tree (CST) for reconstructed sources
//!
//! Reconstruction produces a Rowan green tree over [`TsLanguage`]. Unlike a
//! parser-produced CST, the reconstructed tree carries no whitespace: it holds
//! the significant tokens in source order, the `SyntaxList` groupings the
//! grammar uses for ordered runs of siblings, and comment trivia. Layout is
//! the printer's job.
//!
//! ## Architecture
//!
//! - **Green Tree**: immutable, position-independent, cheap to clone (`Arc`
//!   internally). Builders assemble it bottom-up.
//! - **Red Tree**: [`TsSyntaxNode`], created on demand for navigation with
//!   parent pointers.
//!
//! ## Example
//!
//! ```rust,ignore
//! use graft_core::cst::{TsSyntaxKind, TsSyntaxNode, green};
//!
//! let tree = green::node(TsSyntaxKind::ExpressionStatement, vec![
//!     green::token(TsSyntaxKind::Identifier, "run"),
//!     green::token(TsSyntaxKind::Semicolon, ";"),
//! ]);
//! let root = TsSyntaxNode::new_root(tree.into_node().unwrap());
//! assert_eq!(root.text().to_string(), "run;");
//! ```

mod language;
mod syntax_kind;

pub mod green;

pub use language::{TsLanguage, TsSyntaxElement, TsSyntaxNode, TsSyntaxToken};
pub use syntax_kind::TsSyntaxKind;
