//! Lowering a concrete tree into format elements
//!
//! Lowering runs in two passes. The first walks the green tree and collects
//! the visible tokens, each tagged with the node that owns it (the nearest
//! ancestor that is not a `SyntaxList`) and with layout marks computed when
//! a node is left: where a body opens and closes, where a statement or
//! member ends. The second pass picks the separator between every pair of
//! adjacent tokens from the layout and those marks.

use rowan::{GreenNode, NodeOrToken, TextSize};

use super::format_element::{self as fe, FormatElement};
use super::{Layout, RenderOptions};
use crate::cst::TsSyntaxKind;
use crate::cst::green::GreenElementRef;
use crate::error::GraftError;
use crate::result::Result;

/// Node id reported by render failures before the caller attaches the id of
/// the rendered root
pub const UNATTACHED: &str = "?";

/// A visible token with the context the separator rules need
#[derive(Debug, Clone)]
struct Tok<'a> {
    kind: TsSyntaxKind,
    text: &'a str,
    position: TextSize,
    owner: usize,
    owner_kind: TsSyntaxKind,
    indent_after: bool,
    dedent_before: bool,
    dedent_after: bool,
    /// Last token of a top-level statement
    ends_top_item: bool,
    /// Last token of a statement or member inside a braced body
    ends_body_item: bool,
}

impl Tok<'_> {
    fn owned_by(&self, kinds: &[TsSyntaxKind]) -> bool {
        kinds.contains(&self.owner_kind)
    }

    /// `<`/`>` used as a comparison rather than as a type bracket
    fn is_comparison(&self) -> bool {
        self.owner_kind == TsSyntaxKind::BinaryExpression
    }

    fn is_angle(&self) -> bool {
        matches!(self.kind, TsSyntaxKind::LessThan | TsSyntaxKind::GreaterThan) && !self.is_comparison()
    }

    /// `?`/`:` of a conditional expression or type
    fn is_conditional(&self) -> bool {
        self.owned_by(&[TsSyntaxKind::ConditionalExpression, TsSyntaxKind::ConditionalType])
    }
}

struct Frame {
    kind: TsSyntaxKind,
    parent: Option<usize>,
    owner: usize,
    start: usize,
}

enum Step<'a> {
    Visit(GreenElementRef<'a>, usize),
    Leave(usize),
}

/// Kinds whose braces hold statements or members, one per line in
/// [`Layout::Readable`]
fn is_body(kind: TsSyntaxKind) -> bool {
    matches!(
        kind,
        TsSyntaxKind::Block
            | TsSyntaxKind::ModuleBlock
            | TsSyntaxKind::CaseBlock
            | TsSyntaxKind::CaseClause
            | TsSyntaxKind::DefaultClause
            | TsSyntaxKind::ClassDeclaration
            | TsSyntaxKind::ClassExpression
            | TsSyntaxKind::InterfaceDeclaration
    )
}

fn is_item(kind: TsSyntaxKind) -> bool {
    kind.is_statement()
        || kind.is_member()
        || matches!(kind, TsSyntaxKind::CaseClause | TsSyntaxKind::DefaultClause)
}

fn path_of(frames: &[Frame], mut frame: Option<usize>) -> Vec<&'static str> {
    let mut path = Vec::new();
    while let Some(index) = frame {
        path.push(frames[index].kind.name());
        frame = frames[index].parent;
    }
    path.reverse();
    path
}

fn unknown_kind(frames: &[Frame], parent: Option<usize>, raw: u16) -> GraftError {
    let name = TsSyntaxKind::name_of_raw(raw);
    let mut path: Vec<String> = path_of(frames, parent).into_iter().map(String::from).collect();
    path.push(name.clone());
    GraftError::render_failed(
        UNATTACHED,
        name,
        format!("cannot render unknown kind at {}", path.join(" > ")),
    )
}

fn resolve(raw: u16) -> Option<TsSyntaxKind> {
    TsSyntaxKind::from_raw(raw).filter(|kind| *kind != TsSyntaxKind::Unknown)
}

/// First pass: visible tokens with layout marks
fn collect<'a>(root: &'a GreenNode, include_comments: bool) -> Result<Vec<Tok<'a>>> {
    let root_kind = resolve(root.kind().0).ok_or_else(|| unknown_kind(&[], None, root.kind().0))?;
    let mut frames = vec![Frame {
        kind: root_kind,
        parent: None,
        owner: 0,
        start: 0,
    }];
    let mut tokens: Vec<Tok<'a>> = Vec::new();
    let mut offset = TextSize::from(0);

    let mut stack: Vec<Step<'a>> = vec![Step::Leave(0)];
    stack.extend(root.children().rev().map(|child| Step::Visit(child, 0)));

    while let Some(step) = stack.pop() {
        match step {
            Step::Visit(NodeOrToken::Token(token), parent) => {
                let kind = resolve(token.kind().0)
                    .ok_or_else(|| unknown_kind(&frames, Some(parent), token.kind().0))?;
                let position = offset;
                offset += token.text_len();
                if token.text().is_empty() || (kind.is_comment() && !include_comments) {
                    continue;
                }
                let owner = frames[parent].owner;
                tokens.push(Tok {
                    kind,
                    text: token.text(),
                    position,
                    owner,
                    owner_kind: frames[owner].kind,
                    indent_after: false,
                    dedent_before: false,
                    dedent_after: false,
                    ends_top_item: false,
                    ends_body_item: false,
                });
            }
            Step::Visit(NodeOrToken::Node(node), parent) => {
                let kind = resolve(node.kind().0)
                    .ok_or_else(|| unknown_kind(&frames, Some(parent), node.kind().0))?;
                let index = frames.len();
                let owner = if kind == TsSyntaxKind::SyntaxList {
                    frames[parent].owner
                } else {
                    index
                };
                frames.push(Frame {
                    kind,
                    parent: Some(parent),
                    owner,
                    start: tokens.len(),
                });
                stack.push(Step::Leave(index));
                stack.extend(node.children().rev().map(|child| Step::Visit(child, index)));
            }
            Step::Leave(index) => mark(&frames, index, &mut tokens),
        }
    }
    Ok(tokens)
}

/// Layout marks for the node in `frames[index]`, whose tokens are the tail
/// of `tokens` starting at the frame's start
fn mark(frames: &[Frame], index: usize, tokens: &mut [Tok<'_>]) {
    let frame = &frames[index];
    if frame.kind == TsSyntaxKind::SyntaxList || frame.start >= tokens.len() {
        return;
    }
    let range = frame.start..tokens.len();
    let last = tokens.len() - 1;

    if is_body(frame.kind) {
        let open = range
            .clone()
            .find(|&i| tokens[i].owner == index && tokens[i].kind == TsSyntaxKind::OpenBrace);
        let close = range
            .clone()
            .rev()
            .find(|&i| tokens[i].owner == index && tokens[i].kind == TsSyntaxKind::CloseBrace);
        if let (Some(open), Some(close)) = (open, close)
            && close > open + 1
        {
            tokens[open].indent_after = true;
            tokens[close].dedent_before = true;
        }
    }

    if matches!(frame.kind, TsSyntaxKind::CaseClause | TsSyntaxKind::DefaultClause) {
        let colon = range
            .clone()
            .find(|&i| tokens[i].owner == index && tokens[i].kind == TsSyntaxKind::Colon);
        if let Some(colon) = colon
            && colon < last
        {
            tokens[colon].indent_after = true;
            tokens[last].dedent_after = true;
        }
    }

    if is_item(frame.kind)
        && let Some(parent) = frame.parent
    {
        let container = frames[frames[parent].owner].kind;
        if container == TsSyntaxKind::SourceFile {
            tokens[last].ends_top_item = true;
        } else if is_body(container) {
            tokens[last].ends_body_item = true;
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$' | '#') || !c.is_ascii()
}

/// Whether writing `next` directly after `prev` would lex differently
fn would_fuse(prev: &Tok<'_>, next: &Tok<'_>) -> bool {
    let (Some(last), Some(first)) = (prev.text.chars().last(), next.text.chars().next()) else {
        return false;
    };
    if is_word_char(last) && is_word_char(first) {
        return true;
    }
    if last == '/' && matches!(first, '/' | '*') {
        return true;
    }
    // Closing type brackets may touch (`A<B<C>>`)
    if prev.is_angle() && next.is_angle() {
        return false;
    }
    if !prev.kind.is_punctuation() {
        return false;
    }
    let joined = format!("{}{}", prev.text, next.text);
    TsSyntaxKind::ALL
        .iter()
        .filter(|kind| kind.is_punctuation())
        .filter_map(|kind| kind.canonical_text())
        .any(|punct| punct.len() > prev.text.len() && joined.starts_with(punct))
}

/// `(` that belongs to the name before it: calls and signatures
fn hugs_open_paren(prev: &Tok<'_>, next: &Tok<'_>) -> bool {
    use TsSyntaxKind::*;
    if next.owned_by(&[CallExpression, NewExpression]) {
        return true;
    }
    let signature = next.owned_by(&[
        FunctionDeclaration,
        FunctionExpression,
        MethodDeclaration,
        MethodSignature,
        Constructor,
        GetAccessor,
        SetAccessor,
    ]);
    signature
        && (matches!(
            prev.kind,
            Identifier | PrivateIdentifier | StringLiteral | NumericLiteral | CloseBracket | ConstructorKw
        ) || prev.is_angle()
            || (prev.kind == Question && !prev.is_conditional()))
}

/// Separator rules for the compact and readable layouts
fn wants_space(prev: &Tok<'_>, next: &Tok<'_>) -> bool {
    use TsSyntaxKind::*;
    if prev.kind.is_comment() || next.kind.is_comment() {
        return true;
    }

    let tight_after = match prev.kind {
        OpenParen | OpenBracket | Dot | QuestionDot | DotDotDot | At | TemplateHead | TemplateMiddle => true,
        LessThan => !prev.is_comparison(),
        GreaterThan => prev.owner_kind == TypeAssertionExpression,
        kind if kind.is_prefix_operator() => prev.owner_kind == PrefixUnaryExpression,
        _ => false,
    };
    if tight_after {
        return false;
    }

    match next.kind {
        CloseParen | CloseBracket | Semicolon | Comma | Dot | QuestionDot => false,
        TemplateMiddle | TemplateTail => false,
        CloseBrace => prev.kind != OpenBrace,
        Colon | Question => next.is_conditional(),
        GreaterThan => next.is_comparison(),
        LessThan => next.is_comparison() || !matches!(prev.kind, Identifier | PrivateIdentifier),
        PlusPlus | MinusMinus => next.owner_kind != PostfixUnaryExpression,
        Exclamation => next.owner_kind != NonNullExpression,
        OpenParen => !hugs_open_paren(prev, next),
        OpenBracket => !next.owned_by(&[ElementAccessExpression, ArrayType, IndexedAccessType]),
        NoSubstitutionTemplateLiteral => next.owner_kind != TaggedTemplateExpression,
        _ => true,
    }
}

fn element(tok: &Tok<'_>) -> FormatElement {
    match tok.kind.canonical_text() {
        Some(canonical) if canonical == tok.text => fe::token(canonical),
        _ => fe::text(tok.text, tok.position),
    }
}

/// Lower `root` into format elements for the given layout
pub fn lower(root: &GreenNode, options: &RenderOptions) -> Result<Vec<FormatElement>> {
    let tokens = collect(root, options.include_comments)?;
    let readable = options.layout == Layout::Readable;
    let mut elements = Vec::with_capacity(tokens.len() * 2);
    let mut pending_break = false;
    let mut prev: Option<&Tok<'_>> = None;

    for tok in &tokens {
        if readable && tok.dedent_before {
            elements.push(fe::dedent());
            pending_break = true;
        }
        if let Some(prev) = prev {
            if pending_break {
                elements.push(fe::hard_line_break());
            } else {
                let spaced = match options.layout {
                    Layout::Minified => false,
                    Layout::Compact | Layout::Readable => wants_space(prev, tok),
                };
                if spaced || would_fuse(prev, tok) {
                    elements.push(fe::space());
                }
            }
        }
        pending_break = false;
        elements.push(element(tok));

        if readable && tok.indent_after {
            elements.push(fe::indent());
            pending_break = true;
        }
        if readable && tok.dedent_after {
            elements.push(fe::dedent());
        }
        if tok.kind == TsSyntaxKind::SingleLineComment
            || (tok.ends_top_item && options.layout != Layout::Minified)
            || (tok.ends_body_item && readable)
        {
            pending_break = true;
        }
        prev = Some(tok);
    }
    Ok(elements)
}
