//! Versioned node store
//!
//! A [`Store`] holds every node ever merged into it plus an append-only list
//! of [`Version`]s, each naming the root of one parse. Nodes are shared as
//! `Arc<Node>` inside `Arc` maps: [`Store::merge`] returns a new store value
//! and never touches the one it was called on, so a store observed by a
//! reader stays valid for as long as the reader holds it.
//!
//! The store is kind-agnostic. It enforces the closed-graph invariant (every
//! child id and every version root resolves) and nothing about node shapes.

mod fragment;
mod minter;
mod node;
mod splice;
mod version;

pub use fragment::{GraphBuilder, ParseOutput, ParseStats};
pub use minter::IdMinter;
pub use node::{Comment, CommentKind, Node, NodeBuilder, NodeId, PropertyValue};
pub use splice::Spliced;
pub use version::Version;

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::GraftError;
use crate::result::Result;

/// Graph of nodes with version history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    file_name: String,
    nodes: Arc<IndexMap<NodeId, Arc<Node>>>,
    versions: Arc<Vec<Version>>,
}

impl Store {
    /// Empty store for a source file
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            nodes: Arc::default(),
            versions: Arc::default(),
        }
    }

    /// Build a store from a loosely structured value (a decoded document of
    /// any format), rejecting absent or malformed fields
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let serde_json::Value::Object(mut fields) = value else {
            return Err(GraftError::invalid_structure("store is not a map"));
        };

        let file_name = match fields.remove("fileName") {
            None => String::new(),
            Some(serde_json::Value::String(name)) => name,
            Some(_) => return Err(GraftError::invalid_structure("fileName is not a string")),
        };

        let nodes = match fields.remove("nodes") {
            None => return Err(GraftError::invalid_structure("store has no nodes field")),
            Some(serde_json::Value::Object(entries)) => {
                let mut nodes = IndexMap::with_capacity(entries.len());
                for (key, raw) in entries {
                    let node: Node = serde_json::from_value(raw).map_err(|err| {
                        GraftError::invalid_node(key.as_str(), format!("malformed node: {err}"))
                    })?;
                    if node.id().as_str() != key {
                        return Err(GraftError::invalid_node(
                            key.as_str(),
                            format!("entry holds node '{}'", node.id()),
                        ));
                    }
                    nodes.insert(NodeId::new(key), Arc::new(node));
                }
                nodes
            }
            Some(_) => return Err(GraftError::invalid_structure("nodes is not a map")),
        };

        let versions = match fields.remove("versions") {
            None => return Err(GraftError::invalid_structure("store has no versions field")),
            Some(serde_json::Value::Array(entries)) => entries
                .into_iter()
                .enumerate()
                .map(|(index, raw)| {
                    serde_json::from_value::<Version>(raw).map_err(|err| {
                        GraftError::invalid_structure(format!("malformed version {index}: {err}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(GraftError::invalid_structure("versions is not a list")),
        };

        let store = Self {
            file_name,
            nodes: Arc::new(nodes),
            versions: Arc::new(versions),
        };
        store.check_integrity()?;
        Ok(store)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Merge a parse result, stamping the new version with the current time
    pub fn merge(
        &self,
        new_nodes: impl IntoIterator<Item = Node>,
        new_root: NodeId,
        description: Option<String>,
    ) -> Result<Store> {
        self.merge_at(new_nodes, new_root, description, Utc::now())
    }

    /// Merge a parse result with an explicit version timestamp
    pub fn merge_at(
        &self,
        new_nodes: impl IntoIterator<Item = Node>,
        new_root: NodeId,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Store> {
        let mut nodes = (*self.nodes).clone();
        let mut added = Vec::new();
        for node in new_nodes {
            let id = node.id().clone();
            if nodes.insert(id.clone(), Arc::new(node)).is_some() {
                warn!("Merge replaced existing node '{}'", id);
            }
            added.push(id);
        }

        for id in &added {
            if let Some(node) = nodes.get(id) {
                check_children(&nodes, node)?;
            }
        }
        if !nodes.contains_key(&new_root) {
            return Err(GraftError::invalid_node(
                new_root,
                "version root does not resolve",
            ));
        }

        let mut versions = (*self.versions).clone();
        versions.push(Version::new(new_root, description, created_at));

        debug!(
            "Merged {} node(s) into '{}', now {} version(s)",
            added.len(),
            self.file_name,
            versions.len()
        );

        Ok(Store {
            file_name: self.file_name.clone(),
            nodes: Arc::new(nodes),
            versions: Arc::new(versions),
        })
    }

    /// Merge a parser's output
    pub fn merge_output(&self, output: ParseOutput, description: Option<String>) -> Result<Store> {
        self.merge(output.nodes, output.root, description)
    }

    /// Node by id
    pub fn lookup(&self, id: &str) -> Result<Arc<Node>> {
        self.nodes
            .get(id)
            .cloned()
            .ok_or_else(|| GraftError::not_found(id, "store lookup"))
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Node>> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Root node of the last version
    pub fn latest_root(&self) -> Result<Arc<Node>> {
        let version = self
            .versions
            .last()
            .ok_or_else(|| GraftError::invalid_structure("store has no versions"))?;
        self.lookup(version.root_node_id.as_str())
    }

    pub fn latest_version(&self) -> Option<&Version> {
        self.versions.last()
    }

    pub fn version(&self, index: usize) -> Option<&Version> {
        self.versions.get(index)
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<Node>> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Verify the closed-graph invariant
    pub fn check_integrity(&self) -> Result<()> {
        for node in self.nodes.values() {
            check_children(&self.nodes, node)?;
        }
        for (index, version) in self.versions.iter().enumerate() {
            if !self.nodes.contains_key(&version.root_node_id) {
                return Err(GraftError::invalid_node(
                    version.root_node_id.clone(),
                    format!("root of version {index} does not resolve"),
                ));
            }
        }
        Ok(())
    }

    /// Ids reachable from `root`, pre-order, each listed once
    pub fn reachable(&self, root: &str) -> Result<Vec<NodeId>> {
        let mut seen = IndexSet::new();
        let mut stack = vec![self.lookup(root)?];
        while let Some(node) = stack.pop() {
            if !seen.insert(node.id().clone()) {
                continue;
            }
            for child in node.children().iter().rev() {
                stack.push(self.lookup(child.as_str())?);
            }
        }
        Ok(seen.into_iter().collect())
    }
}

fn check_children(nodes: &IndexMap<NodeId, Arc<Node>>, node: &Node) -> Result<()> {
    match node.children().iter().find(|child| !nodes.contains_key(*child)) {
        Some(missing) => Err(GraftError::invalid_node(
            node.id().clone(),
            format!("child '{missing}' does not resolve"),
        )),
        None => Ok(()),
    }
}
