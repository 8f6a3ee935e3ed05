//! Output side of a builder: reconstructed elements and the node assembler

use crate::cst::TsSyntaxKind;
use crate::cst::green::{self, GreenElement};

/// A reconstructed child together with its comment trivia
///
/// Comments travel beside the element rather than inside it, so the parent
/// places them as siblings and wrappers such as parentheses go around the
/// element only.
#[derive(Debug, Clone)]
pub struct Built {
    pub element: GreenElement,
    pub leading: Vec<GreenElement>,
    pub trailing: Vec<GreenElement>,
}

impl Built {
    pub fn bare(element: GreenElement) -> Self {
        Self {
            element,
            leading: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// Canonical token with no trivia
    pub fn token(kind: TsSyntaxKind) -> Self {
        Self::bare(green::canonical(kind))
    }

    pub fn kind(&self) -> TsSyntaxKind {
        green::kind_of(&self.element)
    }

    /// Rewrite the element, keeping the trivia in place
    pub fn map(self, f: impl FnOnce(GreenElement) -> GreenElement) -> Self {
        Self {
            element: f(self.element),
            leading: self.leading,
            trailing: self.trailing,
        }
    }

    pub fn has_trivia(&self) -> bool {
        !self.leading.is_empty() || !self.trailing.is_empty()
    }

    /// Element with its trivia as a flat sibling run
    pub fn into_elements(self) -> Vec<GreenElement> {
        let mut out = self.leading;
        out.push(self.element);
        out.extend(self.trailing);
        out
    }
}

/// Items of a separated list, each with the separator that followed it
#[derive(Debug, Default)]
pub struct Separated {
    pub items: Vec<(Built, Option<Built>)>,
}

impl Separated {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn has_trailing_separator(&self) -> bool {
        matches!(self.items.last(), Some((_, Some(_))))
    }

    pub fn last_kind(&self) -> Option<TsSyntaxKind> {
        self.items.last().map(|(item, _)| item.kind())
    }

    /// Rewrite every item, keeping separators
    pub fn map_items(self, mut f: impl FnMut(Built) -> Built) -> Self {
        Self {
            items: self
                .items
                .into_iter()
                .map(|(item, separator)| (f(item), separator))
                .collect(),
        }
    }
}

/// When a separated list ends with a separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trailing {
    /// Keep a trailing separator only if the input had one
    Preserve,
    /// Never emit one
    Never,
    /// Always emit one after a non-empty list
    Always,
}

/// Assembles the children of one concrete node
#[derive(Debug)]
pub struct Emitter {
    kind: TsSyntaxKind,
    children: Vec<GreenElement>,
}

impl Emitter {
    pub fn new(kind: TsSyntaxKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Canonical token
    pub fn token(&mut self, kind: TsSyntaxKind) -> &mut Self {
        self.children.push(green::canonical(kind));
        self
    }

    pub fn text(&mut self, kind: TsSyntaxKind, text: &str) -> &mut Self {
        self.children.push(green::token(kind, text));
        self
    }

    pub fn push(&mut self, built: Built) -> &mut Self {
        self.children.extend(built.into_elements());
        self
    }

    pub fn push_opt(&mut self, built: Option<Built>) -> &mut Self {
        if let Some(built) = built {
            self.push(built);
        }
        self
    }

    /// Marker and the child it introduces, e.g. `:` and a type
    pub fn pair(&mut self, pair: Option<(Built, Built)>) -> &mut Self {
        if let Some((marker, child)) = pair {
            self.push(marker);
            self.push(child);
        }
        self
    }

    pub fn element(&mut self, element: GreenElement) -> &mut Self {
        self.children.push(element);
        self
    }

    /// Items as a `SyntaxList` without separators
    pub fn list(&mut self, items: Vec<Built>) -> &mut Self {
        let children = items.into_iter().flat_map(Built::into_elements).collect();
        self.children.push(green::node(TsSyntaxKind::SyntaxList, children));
        self
    }

    /// Items as a `SyntaxList`, separators re-inserted between them
    pub fn separated(&mut self, list: Separated, separator: TsSyntaxKind, trailing: Trailing) -> &mut Self {
        let count = list.items.len();
        let mut children = Vec::new();
        for (index, (item, sep)) in list.items.into_iter().enumerate() {
            children.extend(item.into_elements());
            let last = index + 1 == count;
            let keep = match (last, trailing) {
                (false, _) => true,
                (true, Trailing::Preserve) => sep.is_some(),
                (true, Trailing::Never) => false,
                (true, Trailing::Always) => true,
            };
            match (keep, sep) {
                (true, Some(sep)) => children.extend(sep.into_elements()),
                (true, None) => children.push(green::canonical(separator)),
                // A dropped separator leaves its comments behind the item
                (false, Some(sep)) => {
                    children.extend(sep.leading);
                    children.extend(sep.trailing);
                }
                (false, None) => {}
            }
        }
        self.children.push(green::node(TsSyntaxKind::SyntaxList, children));
        self
    }

    /// Modifier list, only when non-empty
    pub fn modifiers(&mut self, modifiers: Option<Built>) -> &mut Self {
        self.push_opt(modifiers)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn finish(self) -> GreenElement {
        green::node(self.kind, self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Built {
        Built::bare(green::token(TsSyntaxKind::Identifier, name))
    }

    #[test]
    fn test_push_places_trivia_around_element() {
        let mut built = ident("x");
        built.leading.push(green::token(TsSyntaxKind::SingleLineComment, "// a"));
        let mut out = Emitter::new(TsSyntaxKind::ExpressionStatement);
        out.push(built).token(TsSyntaxKind::Semicolon);

        let node = out.finish().into_node().expect("node");
        let kinds: Vec<_> = node.children().map(green::kind_of_ref).collect();
        assert_eq!(
            kinds,
            vec![
                TsSyntaxKind::SingleLineComment,
                TsSyntaxKind::Identifier,
                TsSyntaxKind::Semicolon
            ]
        );
    }

    #[test]
    fn test_separated_trailing_policies() {
        let list = || Separated {
            items: vec![
                (ident("a"), Some(Built::token(TsSyntaxKind::Comma))),
                (ident("b"), Some(Built::token(TsSyntaxKind::Comma))),
            ],
        };

        let render = |trailing| {
            let mut out = Emitter::new(TsSyntaxKind::ArrayLiteralExpression);
            out.separated(list(), TsSyntaxKind::Comma, trailing);
            green::text_of(&out.finish())
        };

        assert_eq!(render(Trailing::Preserve), "a,b,");
        assert_eq!(render(Trailing::Never), "a,b");
        assert_eq!(render(Trailing::Always), "a,b,");
    }

    #[test]
    fn test_dropped_separator_keeps_comments() {
        let mut comma = Built::token(TsSyntaxKind::Comma);
        comma.trailing.push(green::token(TsSyntaxKind::MultiLineComment, "/* last */"));
        let list = Separated {
            items: vec![
                (ident("a"), Some(Built::token(TsSyntaxKind::Comma))),
                (ident("b"), Some(comma)),
            ],
        };
        let mut out = Emitter::new(TsSyntaxKind::VariableDeclarationList);
        out.separated(list, TsSyntaxKind::Comma, Trailing::Never);
        assert_eq!(green::text_of(&out.finish()), "a,b/* last */");
    }

    #[test]
    fn test_missing_separators_are_synthesized() {
        let list = Separated {
            items: vec![(ident("a"), None), (ident("b"), None)],
        };
        let mut out = Emitter::new(TsSyntaxKind::UnionType);
        out.separated(list, TsSyntaxKind::Bar, Trailing::Never);
        assert_eq!(green::text_of(&out.finish()), "a|b");
    }
}
