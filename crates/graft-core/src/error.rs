//! Error types and handling for graph storage and reconstruction

use std::path::PathBuf;
use thiserror::Error;

use crate::store::NodeId;
use crate::validate::Occurrence;

/// Main error type for graft operations
#[derive(Debug, Error)]
pub enum GraftError {
    /// A referenced id is absent from the store
    #[error("Node '{id}' not found ({context})")]
    NotFound { id: NodeId, context: String },

    /// A graph invariant is violated: dangling reference, missing root,
    /// malformed store shape, cycle or runaway nesting
    #[error("Invalid structure{}: {message}", at_node(.node_id))]
    InvalidStructure {
        node_id: Option<NodeId>,
        message: String,
    },

    /// The validator found placeholder or unknown elements in a reconstructed tree
    #[error(
        "Reconstruction of '{root_id}' contains {} unsupported element(s): {}",
        .occurrences.len(),
        summarize(.occurrences)
    )]
    Unsupported {
        root_id: NodeId,
        occurrences: Vec<Occurrence>,
    },

    /// A builder's required structural child is absent
    #[error("{kind} '{node_id}' is missing required {role}")]
    MissingRequiredChild {
        node_id: NodeId,
        kind: String,
        role: String,
    },

    /// The printer rejected a reconstructed tree
    #[error("Render of {kind} '{node_id}' failed: {message}")]
    RenderFailed {
        node_id: NodeId,
        kind: String,
        message: String,
    },

    /// Serialized store could not be encoded or decoded
    #[error("Persistence error for path '{}': {message}", .path.display())]
    Persist { path: PathBuf, message: String },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{}': {source}", .path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn at_node(node_id: &Option<NodeId>) -> String {
    match node_id {
        Some(id) => format!(" at '{id}'"),
        None => String::new(),
    }
}

fn summarize(occurrences: &[Occurrence]) -> String {
    occurrences
        .iter()
        .map(|occurrence| occurrence.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidStructure,
    UnsupportedKind,
    MissingRequiredChild,
    RenderFailed,
    Persist,
    Config,
    Io,
}

impl GraftError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraftError::NotFound { .. } => ErrorKind::NotFound,
            GraftError::InvalidStructure { .. } => ErrorKind::InvalidStructure,
            GraftError::Unsupported { .. } => ErrorKind::UnsupportedKind,
            GraftError::MissingRequiredChild { .. } => ErrorKind::MissingRequiredChild,
            GraftError::RenderFailed { .. } => ErrorKind::RenderFailed,
            GraftError::Persist { .. } => ErrorKind::Persist,
            GraftError::ConfigError { .. } => ErrorKind::Config,
            GraftError::IoError { .. } => ErrorKind::Io,
        }
    }

    /// Check if this error only affects one request (other roots or files can
    /// still be processed)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::UnsupportedKind | ErrorKind::MissingRequiredChild | ErrorKind::RenderFailed
        )
    }

    /// Create a not-found error
    pub fn not_found(id: impl Into<NodeId>, context: impl Into<String>) -> Self {
        Self::NotFound {
            id: id.into(),
            context: context.into(),
        }
    }

    /// Create a structural error not tied to a single node
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            node_id: None,
            message: message.into(),
        }
    }

    /// Create a structural error located at a node
    pub fn invalid_node(node_id: impl Into<NodeId>, message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            node_id: Some(node_id.into()),
            message: message.into(),
        }
    }

    /// Create a missing-required-child error
    pub fn missing_child(
        node_id: impl Into<NodeId>,
        kind: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self::MissingRequiredChild {
            node_id: node_id.into(),
            kind: kind.into(),
            role: role.into(),
        }
    }

    /// Create a render failure
    pub fn render_failed(
        node_id: impl Into<NodeId>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::RenderFailed {
            node_id: node_id.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a persistence error
    pub fn persist(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Persist {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Attach a render failure to the node whose rendering was requested
    pub fn for_request(self, id: &NodeId) -> Self {
        match self {
            GraftError::RenderFailed { kind, message, .. } => GraftError::RenderFailed {
                node_id: id.clone(),
                kind,
                message,
            },
            other => other,
        }
    }

    /// Node the error is attached to, when there is one
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            GraftError::NotFound { id, .. } => Some(id),
            GraftError::InvalidStructure { node_id, .. } => node_id.as_ref(),
            GraftError::Unsupported { root_id, .. } => Some(root_id),
            GraftError::MissingRequiredChild { node_id, .. }
            | GraftError::RenderFailed { node_id, .. } => Some(node_id),
            _ => None,
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for GraftError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            GraftError::not_found("n1", "lookup").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            GraftError::invalid_structure("no versions").kind(),
            ErrorKind::InvalidStructure
        );
        assert_eq!(
            GraftError::missing_child("n2", "IfStatement", "condition").kind(),
            ErrorKind::MissingRequiredChild
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(GraftError::missing_child("n2", "IfStatement", "condition").is_recoverable());
        assert!(!GraftError::invalid_structure("dangling").is_recoverable());
        assert!(!GraftError::not_found("n1", "lookup").is_recoverable());
    }

    #[test]
    fn test_messages_carry_ids() {
        let err = GraftError::invalid_node("n7", "cycle through node");
        assert_eq!(err.to_string(), "Invalid structure at 'n7': cycle through node");
        assert_eq!(err.node_id().map(NodeId::as_str), Some("n7"));

        let err = GraftError::invalid_structure("store has no versions");
        assert_eq!(err.to_string(), "Invalid structure: store has no versions");

        let err = GraftError::missing_child("n2", "IfStatement", "condition");
        assert_eq!(err.to_string(), "IfStatement 'n2' is missing required condition");
    }
}
