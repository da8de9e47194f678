// SPDX-License-Identifier: MIT OR Apache-2.0
//! Midpoint chain collection.

use crate::error::EasingError;
use crate::host::{ObjectIndex, ObjectStore};
use crate::Result;
use std::collections::HashSet;

/// Ordered objects sharing one animated value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    objects: Vec<ObjectIndex>,
    focus: usize,
}

impl Chain {
    /// Chain of a single object
    pub fn singleton(object: ObjectIndex) -> Self {
        Self {
            objects: vec![object],
            focus: 0,
        }
    }

    /// Collect the chain `object` belongs to.
    ///
    /// Walks forward from the object's leader along the `next` linkage. A
    /// linkage that revisits an object is reported as
    /// [`EasingError::CyclicChain`] instead of looping forever.
    pub fn collect(store: &(impl ObjectStore + ?Sized), object: ObjectIndex) -> Result<Self> {
        let Some(leader) = store.leader_index(object) else {
            return Ok(Self::singleton(object));
        };

        let mut objects = Vec::new();
        let mut visited = HashSet::new();
        let mut focus = None;
        let mut current = Some(leader);

        while let Some(index) = current {
            if !visited.insert(index) {
                return Err(EasingError::CyclicChain { leader });
            }
            if index == object {
                focus = Some(objects.len());
            }
            objects.push(index);
            current = store.next_index(index);
        }

        let focus = focus.ok_or(EasingError::FocusNotInChain { object, leader })?;
        Ok(Self { objects, focus })
    }

    /// Objects in chain order
    pub fn objects(&self) -> &[ObjectIndex] {
        &self.objects
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Always false; a chain holds at least one object
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// First object of the chain
    pub fn leader(&self) -> ObjectIndex {
        self.objects[0]
    }

    /// Offset of the queried object within the chain
    pub fn focus_position(&self) -> usize {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeStore;

    #[test]
    fn test_unlinked_object_is_singleton() {
        let store = FakeStore::with_objects(3);
        let chain = Chain::collect(&store, ObjectIndex(2)).unwrap();
        assert_eq!(chain.objects(), &[ObjectIndex(2)]);
        assert_eq!(chain.focus_position(), 0);
    }

    #[test]
    fn test_chain_focus_position() {
        let mut store = FakeStore::with_objects(6);
        store.link(&[1, 4, 2, 5]);

        let chain = Chain::collect(&store, ObjectIndex(2)).unwrap();
        assert_eq!(
            chain.objects(),
            &[ObjectIndex(1), ObjectIndex(4), ObjectIndex(2), ObjectIndex(5)]
        );
        assert_eq!(chain.focus_position(), 2);
        assert_eq!(chain.leader(), ObjectIndex(1));

        let from_leader = Chain::collect(&store, ObjectIndex(1)).unwrap();
        assert_eq!(from_leader.focus_position(), 0);
    }

    #[test]
    fn test_cyclic_chain_is_rejected() {
        let mut store = FakeStore::with_objects(3);
        store.link(&[0, 1, 2]);
        store.objects[2].next = Some(ObjectIndex(1));

        let result = Chain::collect(&store, ObjectIndex(1));
        assert!(matches!(result, Err(EasingError::CyclicChain { .. })));
    }

    #[test]
    fn test_focus_missing_from_chain() {
        let mut store = FakeStore::with_objects(3);
        store.link(&[0, 1]);
        store.objects[2].leader = Some(ObjectIndex(0));

        let result = Chain::collect(&store, ObjectIndex(2));
        assert!(matches!(result, Err(EasingError::FocusNotInChain { .. })));
    }
}
