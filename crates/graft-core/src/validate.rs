//! Pre-emission check for residual placeholders
//!
//! Reconstruction degrades gracefully: an unsupported kind becomes a
//! placeholder leaf and a diagnostic. Before a tree is emitted, the validator
//! walks it and turns any residual placeholder or unknown element into a
//! single error listing every occurrence.

use std::fmt;

use rowan::{GreenNode, NodeOrToken};
use serde::Serialize;
use tracing::debug;

use crate::cst::TsSyntaxKind;
use crate::cst::green::{self, GreenElementRef};
use crate::error::GraftError;
use crate::reconstruct::Reconstruction;
use crate::result::Result;
use crate::store::NodeId;

/// One residual placeholder or unknown element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// Kind names from the root down to the element itself
    pub path: Vec<String>,
    pub kind_name: String,
    pub text: String,
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.join(" > "))?;
        if !self.text.is_empty() {
            write!(f, " `{}`", self.text)?;
        }
        Ok(())
    }
}

fn is_residual(raw: u16) -> bool {
    matches!(
        TsSyntaxKind::from_raw(raw),
        None | Some(TsSyntaxKind::Placeholder | TsSyntaxKind::Unknown)
    )
}

/// Every placeholder or unknown element under `root`, in pre-order
pub fn find_residuals(root: &GreenNode) -> Vec<Occurrence> {
    let mut found = Vec::new();
    let root_name = TsSyntaxKind::name_of_raw(root.kind().0);
    if is_residual(root.kind().0) {
        found.push(Occurrence {
            path: vec![root_name.clone()],
            kind_name: root_name.clone(),
            text: String::new(),
        });
    }

    // Explicit stack of (element, path to its parent); children pushed in
    // reverse so they pop in source order
    let mut stack: Vec<(GreenElementRef<'_>, usize)> = Vec::new();
    let mut paths: Vec<Vec<String>> = vec![vec![root_name]];
    for child in root.children().rev() {
        stack.push((child, 0));
    }
    while let Some((element, parent_path)) = stack.pop() {
        let raw = green::raw_kind_of_ref(element);
        let name = TsSyntaxKind::name_of_raw(raw);
        let mut path = paths[parent_path].clone();
        path.push(name.clone());
        match element {
            NodeOrToken::Token(token) => {
                if is_residual(raw) {
                    found.push(Occurrence {
                        path,
                        kind_name: name,
                        text: token.text().to_string(),
                    });
                }
            }
            NodeOrToken::Node(node) => {
                if is_residual(raw) {
                    found.push(Occurrence {
                        path: path.clone(),
                        kind_name: name,
                        text: String::new(),
                    });
                }
                paths.push(path);
                let index = paths.len() - 1;
                for child in node.children().rev() {
                    stack.push((child, index));
                }
            }
        }
    }
    found
}

/// Check a reconstructed tree; fails listing every residual element
pub fn validate(reconstruction: &Reconstruction) -> Result<()> {
    validate_tree(&reconstruction.root_id, &reconstruction.green)
}

pub fn validate_tree(root_id: &NodeId, root: &GreenNode) -> Result<()> {
    let occurrences = find_residuals(root);
    if occurrences.is_empty() {
        debug!("Validated reconstruction of '{}'", root_id);
        return Ok(());
    }
    Err(GraftError::Unsupported {
        root_id: root_id.clone(),
        occurrences,
    })
}
