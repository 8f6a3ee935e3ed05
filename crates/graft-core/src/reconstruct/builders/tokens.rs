//! Leaf kinds spelled the same way every time, names, and bare groupings

use crate::cst::TsSyntaxKind;
use crate::cst::green::{self, GreenElement};
use crate::reconstruct::context::Cx;
use crate::reconstruct::emit::Emitter;
use crate::result::Result;
use crate::store::Comment;

/// Punctuation and keywords: the kind's canonical spelling, whatever the
/// recorded text says
pub fn fixed(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    Ok(green::canonical(cx.kind()))
}

/// Comment that reached the engine as a node rather than as attached trivia
pub fn comment(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let comment = Comment::from_raw(cx.require_text()?);
    Ok(green::token(comment.syntax_kind(), &comment.delimited()))
}

pub fn identifier(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let text = cx.require_text()?;
    Ok(green::token(TsSyntaxKind::Identifier, text))
}

/// `#name`, re-adding the sigil when the recorded text lacks it
pub fn private_identifier(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let text = cx.require_text()?;
    let text = if text.starts_with('#') {
        text.to_string()
    } else {
        format!("#{text}")
    };
    Ok(green::token(TsSyntaxKind::PrivateIdentifier, &text))
}

/// A grouping reconstructed on its own: children in order, no decoding
pub fn syntax_list(cx: &mut Cx<'_, '_>) -> Result<GreenElement> {
    let items = cx.until(&[])?;
    let mut out = Emitter::new(TsSyntaxKind::SyntaxList);
    for item in items {
        out.push(item);
    }
    Ok(out.finish())
}
