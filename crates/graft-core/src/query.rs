//! Read-only navigation over a store
//!
//! The free functions answer one question each by scanning the store.
//! [`QueryIndex`] precomputes the reverse edges for callers that ask for
//! parents repeatedly.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::result::Result;
use crate::store::{Node, NodeId, Store};

/// Distinct version roots in version order
pub fn roots(store: &Store) -> Result<Vec<Arc<Node>>> {
    let ids: IndexSet<&NodeId> = store.versions().iter().map(|v| &v.root_node_id).collect();
    ids.into_iter().map(|id| store.lookup(id.as_str())).collect()
}

pub fn node(store: &Store, id: &str) -> Result<Arc<Node>> {
    store.lookup(id)
}

/// Ordered children of a node
pub fn children(store: &Store, id: &str) -> Result<Vec<Arc<Node>>> {
    store
        .lookup(id)?
        .children()
        .iter()
        .map(|child| store.lookup(child.as_str()))
        .collect()
}

/// Every node listing `id` among its children, in store order
pub fn parents(store: &Store, id: &str) -> Result<Vec<Arc<Node>>> {
    store.lookup(id)?;
    Ok(store
        .nodes()
        .filter(|node| node.children().iter().any(|child| child.as_str() == id))
        .cloned()
        .collect())
}

pub fn latest_root(store: &Store) -> Result<Arc<Node>> {
    store.latest_root()
}

/// Reverse edges of a store snapshot
#[derive(Debug)]
pub struct QueryIndex<'s> {
    store: &'s Store,
    parents: HashMap<&'s str, Vec<Arc<Node>>>,
}

impl<'s> QueryIndex<'s> {
    pub fn build(store: &'s Store) -> Self {
        let mut parents: HashMap<&'s str, Vec<Arc<Node>>> = HashMap::new();
        for node in store.nodes() {
            let mut seen = IndexSet::new();
            for child in node.children() {
                if seen.insert(child.as_str()) {
                    parents.entry(child.as_str()).or_default().push(node.clone());
                }
            }
        }
        Self { store, parents }
    }

    pub fn store(&self) -> &'s Store {
        self.store
    }

    pub fn parents(&self, id: &str) -> Result<Vec<Arc<Node>>> {
        self.store.lookup(id)?;
        Ok(self.parents.get(id).cloned().unwrap_or_default())
    }

    pub fn children(&self, id: &str) -> Result<Vec<Arc<Node>>> {
        children(self.store, id)
    }

    /// Whether `id` is referenced by no node at all
    pub fn is_detached(&self, id: &str) -> bool {
        !self.parents.contains_key(id)
    }
}
