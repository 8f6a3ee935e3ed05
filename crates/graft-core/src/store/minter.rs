//! Fresh id generation for parse results

use super::NodeId;

/// Mints parse-fresh node ids
///
/// Ids have the form `g{generation}n{counter}`. The generation is the number
/// of versions the target store holds when the parse starts, so ids minted
/// for successive merges never collide. Ids carry no content hash: two
/// identical subtrees parsed twice get distinct ids.
#[derive(Debug, Clone)]
pub struct IdMinter {
    prefix: String,
    next: u64,
}

impl IdMinter {
    pub fn new(generation: usize) -> Self {
        Self::with_prefix(format!("g{generation}n"))
    }

    /// Minter for ids that will be merged into `store` next
    pub fn for_store(store: &super::Store) -> Self {
        Self::new(store.versions().len())
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
        }
    }

    pub fn mint(&mut self) -> NodeId {
        let id = NodeId::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        id
    }

    /// Number of ids minted so far
    pub fn minted(&self) -> u64 {
        self.next
    }
}
