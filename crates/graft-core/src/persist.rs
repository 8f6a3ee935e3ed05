//! Reading and writing stores
//!
//! A store persists as `{fileName, nodes, versions}` in JSON, YAML or TOML,
//! chosen by file extension. Every format decodes to a loose value first and
//! goes through [`Store::from_value`], so malformed documents fail the same
//! way whatever their syntax and a loaded store always satisfies the
//! closed-graph invariant.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::GraftError;
use crate::result::Result;
use crate::store::{ParseOutput, Store};

/// Serialization format of a persisted document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// Format implied by a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("toml") => Ok(Format::Toml),
            _ => Err(GraftError::persist(
                path,
                "unsupported file extension (expected .json, .yaml, .yml or .toml)",
            )),
        }
    }
}

fn encode<T: Serialize>(value: &T, format: Format, path: &Path) -> Result<String> {
    let encoded = match format {
        Format::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        Format::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
    };
    encoded.map_err(|message| GraftError::persist(path, message))
}

fn decode<T: DeserializeOwned>(text: &str, format: Format, path: &Path) -> Result<T> {
    let decoded = match format {
        Format::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        Format::Toml => toml::from_str(text).map_err(|e| e.to_string()),
    };
    decoded.map_err(|message| GraftError::persist(path, message))
}

/// Serialize a store in the given format
pub fn to_string(store: &Store, format: Format) -> Result<String> {
    encode(store, format, Path::new(store.file_name()))
}

/// Decode a store from text in the given format
pub fn from_str(text: &str, format: Format) -> Result<Store> {
    let value: serde_json::Value = decode(text, format, Path::new(""))?;
    Store::from_value(value)
}

/// Write a store to `path`, in the format its extension names
pub fn save(store: &Store, path: &Path) -> Result<()> {
    let format = Format::from_path(path)?;
    let text = encode(store, format, path)?;
    fs::write(path, text).map_err(|err| GraftError::io_error(path, err))?;
    debug!(
        "Saved {} node(s), {} version(s) to {}",
        store.node_count(),
        store.versions().len(),
        path.display()
    );
    Ok(())
}

/// Read a store from `path`
pub fn load(path: &Path) -> Result<Store> {
    let format = Format::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|err| GraftError::io_error(path, err))?;
    let value: serde_json::Value = decode(&text, format, path)?;
    let store = Store::from_value(value)?;
    debug!(
        "Loaded {} node(s), {} version(s) from {}",
        store.node_count(),
        store.versions().len(),
        path.display()
    );
    Ok(store)
}

/// Read a serialized parse result, ready to merge
pub fn load_fragment(path: &Path) -> Result<ParseOutput> {
    let format = Format::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|err| GraftError::io_error(path, err))?;
    let value: serde_json::Value = decode(&text, format, path)?;
    serde_json::from_value(value)
        .map_err(|err| GraftError::invalid_structure(format!("malformed fragment: {err}")))
}

/// Write a parse result to `path`
pub fn save_fragment(output: &ParseOutput, path: &Path) -> Result<()> {
    let format = Format::from_path(path)?;
    let text = encode(output, format, path)?;
    fs::write(path, text).map_err(|err| GraftError::io_error(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::TsSyntaxKind;
    use crate::error::ErrorKind;
    use crate::store::{Comment, CommentKind, Node, NodeId, PropertyValue};
    use tempfile::TempDir;

    fn sample() -> Store {
        let ident = Node::builder("a", TsSyntaxKind::Identifier.raw())
            .text("run")
            .leading_comment(Comment::new(CommentKind::DocBlock, "/** go */"))
            .build();
        let semi = Node::builder("s", TsSyntaxKind::Semicolon.raw()).build();
        let stmt = Node::builder("e", TsSyntaxKind::ExpressionStatement.raw())
            .children(["a", "s"])
            .property("flags", PropertyValue::List(vec![PropertyValue::Integer(1), PropertyValue::Bool(true)]))
            .build();
        Store::new("run.ts")
            .merge(vec![ident, semi, stmt], NodeId::new("e"), Some("first".into()))
            .expect("merge")
    }

    #[test]
    fn test_round_trip_every_format() {
        let store = sample();
        for format in [Format::Json, Format::Yaml, Format::Toml] {
            let text = to_string(&store, format).expect("encode");
            let back = from_str(&text, format).expect("decode");
            assert_eq!(back, store, "{format:?}");
        }
    }

    #[test]
    fn test_save_and_load_by_extension() {
        let dir = TempDir::new().expect("tempdir");
        let store = sample();
        for name in ["s.json", "s.yaml", "s.yml", "s.toml"] {
            let path = dir.path().join(name);
            save(&store, &path).expect("save");
            assert_eq!(load(&path).expect("load"), store, "{name}");
        }
    }

    #[test]
    fn test_unknown_extension() {
        let err = Format::from_path(Path::new("store.xml")).expect_err("xml");
        assert_eq!(err.kind(), ErrorKind::Persist);
    }

    #[test]
    fn test_malformed_shapes_are_invalid_structure() {
        let missing_versions = r#"{"fileName": "x.ts", "nodes": {}}"#;
        let err = from_str(missing_versions, Format::Json).expect_err("no versions");
        assert_eq!(err.kind(), ErrorKind::InvalidStructure);

        let dangling = r#"
fileName: x.ts
nodes:
  r: {id: r, kind: 320, children: [gone]}
versions:
  - {createdAt: "2024-01-01T00:00:00Z", rootNodeId: r}
"#;
        let err = from_str(dangling, Format::Yaml).expect_err("dangling");
        assert_eq!(err.kind(), ErrorKind::InvalidStructure);
    }

    #[test]
    fn test_syntax_errors_are_persist_errors() {
        let err = from_str("{ not json", Format::Json).expect_err("syntax");
        assert_eq!(err.kind(), ErrorKind::Persist);
    }
}
