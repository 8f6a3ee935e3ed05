//! Graph nodes and their attached records

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::cst::TsSyntaxKind;

/// Opaque node identifier, unique within a store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

/// Delimiter class of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommentKind {
    /// `// ...`
    SingleLine,
    /// `/* ... */`
    Block,
    /// `/** ... */`
    DocBlock,
}

/// A comment attached to a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
}

impl Comment {
    pub fn new(kind: CommentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Classify raw comment text by its opening delimiter
    pub fn from_raw(text: &str) -> Self {
        let kind = if text.starts_with("/**") && text != "/**/" {
            CommentKind::DocBlock
        } else if text.starts_with("/*") {
            CommentKind::Block
        } else {
            CommentKind::SingleLine
        };
        Self::new(kind, text)
    }

    /// Comment text with the delimiters of its class, adding them if absent
    ///
    /// A `*/` inside a block body is broken up so the comment cannot end
    /// early.
    pub fn delimited(&self) -> String {
        match self.kind {
            CommentKind::SingleLine => {
                if self.text.starts_with("//") {
                    self.text.trim_end_matches(['\n', '\r']).to_string()
                } else {
                    format!("// {}", self.text.trim())
                }
            }
            CommentKind::Block => {
                if self.text.starts_with("/*") && self.text.ends_with("*/") && self.text.len() >= 4 {
                    format!("/*{}*/", close_safe(&self.text[2..self.text.len() - 2]))
                } else {
                    format!("/* {} */", close_safe(self.text.trim()))
                }
            }
            CommentKind::DocBlock => {
                if self.text.starts_with("/**") && self.text.ends_with("*/") && self.text.len() >= 5 {
                    format!("/**{}*/", close_safe(&self.text[3..self.text.len() - 2]))
                } else {
                    format!("/** {} */", close_safe(self.text.trim()))
                }
            }
        }
    }

    /// Token kind used to carry this comment in a concrete tree
    pub fn syntax_kind(&self) -> TsSyntaxKind {
        match self.kind {
            CommentKind::SingleLine => TsSyntaxKind::SingleLineComment,
            CommentKind::Block | CommentKind::DocBlock => TsSyntaxKind::MultiLineComment,
        }
    }
}

/// Block comment body with every `*/` broken up as `* /`
fn close_safe(body: &str) -> String {
    body.replace("*/", "* /")
}

/// Auxiliary property value
///
/// Restricted to scalars and lists so every persisted format can carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }
}

/// A node of the syntax graph
///
/// Nodes are immutable once built. Stores share them as `Arc<Node>`, so a
/// handle obtained from a store can never observe or cause mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    id: NodeId,
    kind: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default)]
    children: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    properties: IndexMap<String, PropertyValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    leading_comments: Vec<Comment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    trailing_comments: Vec<Comment>,
}

impl Node {
    /// Start building a node with a raw kind code
    pub fn builder(id: impl Into<NodeId>, kind: u16) -> NodeBuilder {
        NodeBuilder {
            node: Node {
                id: id.into(),
                kind,
                text: None,
                children: Vec::new(),
                properties: IndexMap::new(),
                leading_comments: Vec::new(),
                trailing_comments: Vec::new(),
            },
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Raw kind code
    pub fn kind(&self) -> u16 {
        self.kind
    }

    /// Kind resolved against the grammar, `None` for codes outside it
    pub fn syntax_kind(&self) -> Option<TsSyntaxKind> {
        TsSyntaxKind::from_raw(self.kind)
    }

    /// Display name of the kind
    pub fn kind_name(&self) -> String {
        TsSyntaxKind::name_of_raw(self.kind)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn properties(&self) -> &IndexMap<String, PropertyValue> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    pub fn leading_comments(&self) -> &[Comment] {
        &self.leading_comments
    }

    pub fn trailing_comments(&self) -> &[Comment] {
        &self.trailing_comments
    }

    pub fn has_comments(&self) -> bool {
        !self.leading_comments.is_empty() || !self.trailing_comments.is_empty()
    }

    pub fn is(&self, kind: TsSyntaxKind) -> bool {
        self.kind == kind.raw()
    }

    /// Copy of this node with comments added around its own
    ///
    /// Used when a grouping node is spliced into its parent and its comments
    /// move onto the first and last grouped element.
    pub fn with_comments(&self, leading: &[Comment], trailing: &[Comment]) -> Node {
        let mut node = self.clone();
        if !leading.is_empty() {
            let mut merged = leading.to_vec();
            merged.append(&mut node.leading_comments);
            node.leading_comments = merged;
        }
        node.trailing_comments.extend_from_slice(trailing);
        node
    }
}

/// Consuming builder for [`Node`]
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.node.text = Some(text.into());
        self
    }

    pub fn child(mut self, id: impl Into<NodeId>) -> Self {
        self.node.children.push(id.into());
        self
    }

    pub fn children<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<NodeId>,
    {
        self.node.children.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.node.properties.insert(key.into(), value);
        self
    }

    pub fn leading_comment(mut self, comment: Comment) -> Self {
        self.node.leading_comments.push(comment);
        self
    }

    pub fn trailing_comment(mut self, comment: Comment) -> Self {
        self.node.trailing_comments.push(comment);
        self
    }

    pub fn build(self) -> Node {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let node = Node::builder("n1", TsSyntaxKind::StringLiteral.raw())
            .text("'hi'")
            .property("quoteStyle", PropertyValue::Text("single".into()))
            .leading_comment(Comment::new(CommentKind::SingleLine, "// note"))
            .build();

        assert_eq!(node.id().as_str(), "n1");
        assert_eq!(node.syntax_kind(), Some(TsSyntaxKind::StringLiteral));
        assert_eq!(node.text(), Some("'hi'"));
        assert_eq!(
            node.property("quoteStyle").and_then(PropertyValue::as_str),
            Some("single")
        );
        assert!(node.has_comments());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_unknown_kind_name() {
        let node = Node::builder("x", 4242).build();
        assert_eq!(node.syntax_kind(), None);
        assert_eq!(node.kind_name(), "Unknown(4242)");
    }

    #[test]
    fn test_comment_delimiters_added_from_class() {
        assert_eq!(Comment::new(CommentKind::SingleLine, "note").delimited(), "// note");
        assert_eq!(Comment::new(CommentKind::Block, "note").delimited(), "/* note */");
        assert_eq!(Comment::new(CommentKind::DocBlock, "note").delimited(), "/** note */");
    }

    #[test]
    fn test_comment_delimiters_kept_when_present() {
        assert_eq!(Comment::new(CommentKind::SingleLine, "// a\n").delimited(), "// a");
        assert_eq!(Comment::new(CommentKind::Block, "/*a*/").delimited(), "/*a*/");
        assert_eq!(Comment::new(CommentKind::DocBlock, "/** a */").delimited(), "/** a */");
    }

    #[test]
    fn test_block_comment_cannot_close_early() {
        assert_eq!(Comment::new(CommentKind::Block, "a */ b").delimited(), "/* a * / b */");
        assert_eq!(Comment::new(CommentKind::Block, "/* a */ b */").delimited(), "/* a * / b */");
        assert_eq!(Comment::new(CommentKind::DocBlock, "/** x */ y */").delimited(), "/** x * / y */");
        assert_eq!(Comment::new(CommentKind::Block, "/**/").delimited(), "/**/");
    }

    #[test]
    fn test_comment_from_raw_classifies() {
        assert_eq!(Comment::from_raw("// x").kind, CommentKind::SingleLine);
        assert_eq!(Comment::from_raw("/* x */").kind, CommentKind::Block);
        assert_eq!(Comment::from_raw("/** x */").kind, CommentKind::DocBlock);
        assert_eq!(Comment::from_raw("/**/").kind, CommentKind::Block);
    }
}
