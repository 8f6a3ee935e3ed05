//! Rowan language implementation for the target grammar
//!
//! This module implements the `rowan::Language` trait, which connects
//! `TsSyntaxKind` to Rowan's generic CST infrastructure.

use rowan::Language;

use super::TsSyntaxKind;

/// Language implementation for reconstructed syntax trees
///
/// This is a zero-sized type that implements `rowan::Language` to provide
/// the connection between our syntax kinds and Rowan's generic tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TsLanguage;

impl Language for TsLanguage {
    type Kind = TsSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        // Codes outside the grammar only reach a green tree through a bug in a
        // builder; they surface as `Unknown` so the validator can report them.
        TsSyntaxKind::from_raw(raw.0).unwrap_or(TsSyntaxKind::Unknown)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

/// Red tree node over the target grammar
pub type TsSyntaxNode = rowan::SyntaxNode<TsLanguage>;
/// Red tree token over the target grammar
pub type TsSyntaxToken = rowan::SyntaxToken<TsLanguage>;
/// Red tree element over the target grammar
pub type TsSyntaxElement = rowan::SyntaxElement<TsLanguage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        let kinds = [
            TsSyntaxKind::SingleLineComment,
            TsSyntaxKind::OpenBrace,
            TsSyntaxKind::Identifier,
            TsSyntaxKind::ClassKw,
            TsSyntaxKind::SourceFile,
            TsSyntaxKind::BinaryExpression,
        ];

        for &kind in &kinds {
            let raw = TsLanguage::kind_to_raw(kind);
            let back = TsLanguage::kind_from_raw(raw);
            assert_eq!(kind, back, "Roundtrip failed for {kind:?}");
        }
    }

    #[test]
    fn test_kind_values() {
        assert_eq!(TsLanguage::kind_to_raw(TsSyntaxKind::OpenBrace).0, 10);
        assert_eq!(TsLanguage::kind_to_raw(TsSyntaxKind::Identifier).0, 80);
        assert_eq!(TsLanguage::kind_to_raw(TsSyntaxKind::SourceFile).0, 200);
    }

    #[test]
    fn test_out_of_grammar_code_is_unknown() {
        let kind = TsLanguage::kind_from_raw(rowan::SyntaxKind(4242));
        assert_eq!(kind, TsSyntaxKind::Unknown);
    }
}
