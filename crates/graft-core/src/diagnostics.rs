//! Non-fatal findings collected while reconstructing a tree

use serde::Serialize;
use std::fmt;

use crate::store::NodeId;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Category of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticCode {
    /// No builder is registered for the node's kind
    UnsupportedKind,
    /// A child or comment was dropped because the layout has no slot for it
    Dropped,
}

/// A finding attached to one node of the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub node_id: NodeId,
    pub kind_name: String,
    pub message: String,
}

impl Diagnostic {
    pub fn unsupported(node_id: &NodeId, kind_name: impl Into<String>) -> Self {
        let kind_name = kind_name.into();
        Self {
            severity: Severity::Warning,
            code: DiagnosticCode::UnsupportedKind,
            node_id: node_id.clone(),
            message: format!("no builder registered for {kind_name}, emitted a placeholder"),
            kind_name,
        }
    }

    pub fn dropped(node_id: &NodeId, kind_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code: DiagnosticCode::Dropped,
            node_id: node_id.clone(),
            kind_name: kind_name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} '{}': {}",
            self.severity, self.kind_name, self.node_id, self.message
        )
    }
}
