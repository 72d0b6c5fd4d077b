//! Stable name indexing.
//!
//! Topology documents address segments by string id; the graph stores them
//! in contiguous slots. `NameIndex` maps between the two in O(1).

use std::collections::HashMap;

use sld_core::SegmentId;

use crate::error::GraphError;

/// Bidirectional map between segment names and `SegmentId`s.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    /// Contiguous list of names (slot -> name).
    names: Vec<String>,

    /// Reverse lookup: name -> id.
    by_name: HashMap<String, SegmentId>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id for `name`. Names are global and must be unique.
    pub fn insert(&mut self, name: impl Into<String>) -> Result<SegmentId, GraphError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(GraphError::DuplicateName { name });
        }
        let id = SegmentId::from_slot(self.names.len());
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        Ok(id)
    }

    pub fn get(&self, name: &str) -> Option<SegmentId> {
        self.by_name.get(name).copied()
    }

    /// Name for an id (None if the id was never allocated here).
    pub fn name(&self, id: SegmentId) -> Option<&str> {
        self.names.get(id.slot()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_contiguous() {
        let mut idx = NameIndex::new();
        let a = idx.insert("w_a").unwrap();
        let b = idx.insert("s_b").unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(idx.get("s_b"), Some(b));
        assert_eq!(idx.name(a), Some("w_a"));
        assert_eq!(idx.len(), 2);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut idx = NameIndex::new();
        idx.insert("w_a").unwrap();
        assert_eq!(
            idx.insert("w_a"),
            Err(GraphError::DuplicateName { name: "w_a".into() })
        );
    }

    #[test]
    fn unknown_lookups() {
        let idx = NameIndex::new();
        assert!(idx.get("nope").is_none());
        assert!(idx.name(SegmentId::from_index(7)).is_none());
        assert!(idx.is_empty());
    }
}
