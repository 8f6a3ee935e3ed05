//! Small helpers for building and inspecting green trees

use rowan::{GreenNode, GreenNodeData, GreenToken, GreenTokenData, NodeOrToken};

use super::TsSyntaxKind;

/// Owned green element
pub type GreenElement = NodeOrToken<GreenNode, GreenToken>;
/// Borrowed green element, as yielded by `GreenNodeData::children`
pub type GreenElementRef<'a> = NodeOrToken<&'a GreenNodeData, &'a GreenTokenData>;

pub fn token(kind: TsSyntaxKind, text: &str) -> GreenElement {
    NodeOrToken::Token(GreenToken::new(kind.into(), text))
}

/// Token spelled with the kind's canonical text
pub fn canonical(kind: TsSyntaxKind) -> GreenElement {
    token(kind, kind.canonical_text().unwrap_or_default())
}

pub fn node(kind: TsSyntaxKind, children: Vec<GreenElement>) -> GreenElement {
    NodeOrToken::Node(GreenNode::new(kind.into(), children))
}

/// Kind of an owned element
pub fn kind_of(element: &GreenElement) -> TsSyntaxKind {
    let raw = match element {
        NodeOrToken::Node(node) => node.kind(),
        NodeOrToken::Token(token) => token.kind(),
    };
    TsSyntaxKind::from_raw(raw.0).unwrap_or(TsSyntaxKind::Unknown)
}

/// Kind of a borrowed element
pub fn kind_of_ref(element: GreenElementRef<'_>) -> TsSyntaxKind {
    let raw = match element {
        NodeOrToken::Node(node) => node.kind(),
        NodeOrToken::Token(token) => token.kind(),
    };
    TsSyntaxKind::from_raw(raw.0).unwrap_or(TsSyntaxKind::Unknown)
}

/// Raw code of a borrowed element, without mapping it into the grammar
pub fn raw_kind_of_ref(element: GreenElementRef<'_>) -> u16 {
    match element {
        NodeOrToken::Node(node) => node.kind().0,
        NodeOrToken::Token(token) => token.kind().0,
    }
}

pub fn to_owned(element: GreenElementRef<'_>) -> GreenElement {
    match element {
        NodeOrToken::Node(node) => NodeOrToken::Node(node.to_owned()),
        NodeOrToken::Token(token) => NodeOrToken::Token(token.to_owned()),
    }
}

/// Children of a node that are not comment trivia
pub fn significant_children(node: &GreenNodeData) -> impl Iterator<Item = GreenElementRef<'_>> {
    node.children()
        .filter(|child| !kind_of_ref(*child).is_comment())
}

/// Concatenated token text of an element, comments excluded
pub fn text_of(element: &GreenElement) -> String {
    let mut out = String::new();
    match element {
        NodeOrToken::Node(node) => collect_text(node, &mut out),
        NodeOrToken::Token(token) => out.push_str(token.text()),
    }
    out
}

fn collect_text(node: &GreenNodeData, out: &mut String) {
    for child in significant_children(node) {
        match child {
            NodeOrToken::Node(inner) => collect_text(inner, out),
            NodeOrToken::Token(token) => out.push_str(token.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_inspect() {
        let stmt = node(
            TsSyntaxKind::ExpressionStatement,
            vec![
                token(TsSyntaxKind::MultiLineComment, "/* c */"),
                token(TsSyntaxKind::Identifier, "run"),
                canonical(TsSyntaxKind::Semicolon),
            ],
        );

        assert_eq!(kind_of(&stmt), TsSyntaxKind::ExpressionStatement);
        assert_eq!(text_of(&stmt), "run;");

        let green = stmt.into_node().expect("node");
        let kinds: Vec<_> = significant_children(&green).map(kind_of_ref).collect();
        assert_eq!(kinds, vec![TsSyntaxKind::Identifier, TsSyntaxKind::Semicolon]);
    }

    #[test]
    fn test_to_owned_preserves_kind() {
        let list = node(TsSyntaxKind::SyntaxList, vec![token(TsSyntaxKind::Identifier, "a")]);
        let green = list.into_node().expect("node");
        let first = green.children().next().expect("child");
        assert_eq!(kind_of(&to_owned(first)), TsSyntaxKind::Identifier);
    }
}
