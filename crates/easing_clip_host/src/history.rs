// SPDX-License-Identifier: MIT OR Apache-2.0
//! Undo journal keeping bincode snapshots of track values.

use crate::document::Document;
use crate::error::{HostError, Result};
use easing_clip::{Chain, ObjectIndex, TrackState, UndoScope};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum undo history depth
const MAX_HISTORY: usize = 100;

/// Serialized track state of a set of objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Serialized tracks
    pub data: Vec<u8>,
}

impl StateSnapshot {
    /// Create from serializable value
    pub fn from_value<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self {
            data: bincode::serialize(value)?,
        })
    }

    /// Deserialize to value
    pub fn to_value<T: for<'de> Deserialize<'de>>(&self) -> Result<T> {
        Ok(bincode::deserialize(&self.data)?)
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// One recorded undo step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoEntry {
    /// Object the entry was recorded for
    pub object: ObjectIndex,
    /// Objects covered by the snapshot
    pub scope: UndoScope,
    /// Track state before the edit
    pub before: StateSnapshot,
}

/// Undo history
#[derive(Debug)]
pub struct UndoHistory {
    entries: VecDeque<UndoEntry>,
    max_depth: usize,
    memory_used: usize,
}

impl UndoHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::with_max_depth(MAX_HISTORY)
    }

    /// Create with custom maximum depth
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_depth,
            memory_used: 0,
        }
    }

    /// Snapshot `object`, or its whole midpoint chain, before an edit
    pub fn record(
        &mut self,
        document: &Document,
        object: ObjectIndex,
        scope: UndoScope,
    ) -> Result<()> {
        let objects = match scope {
            UndoScope::Object => vec![object],
            UndoScope::MidpointChain => Chain::collect(document, object)?.objects().to_vec(),
        };
        let before = StateSnapshot::from_value(&document.capture(&objects))?;
        tracing::debug!("Recorded undo for {} object(s), {} bytes", objects.len(), before.size());

        self.memory_used += before.size();
        self.entries.push_back(UndoEntry { object, scope, before });

        while self.entries.len() > self.max_depth {
            if let Some(old) = self.entries.pop_front() {
                self.memory_used = self.memory_used.saturating_sub(old.before.size());
            }
        }
        Ok(())
    }

    /// Restore the document to the state before the last edit
    pub fn undo(&mut self, document: &mut Document) -> Result<UndoEntry> {
        let entry = self.entries.pop_back().ok_or(HostError::NothingToUndo)?;
        self.memory_used = self.memory_used.saturating_sub(entry.before.size());

        let captured: Vec<(ObjectIndex, Vec<TrackState>)> = entry.before.to_value()?;
        document.restore(captured);
        tracing::info!("Undid edit of {:?}", entry.object);
        Ok(entry)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Number of recorded entries
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Bytes held by snapshots
    pub fn memory_used(&self) -> usize {
        self.memory_used
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ObjectData;
    use easing_clip::{ObjectStore, TrackIndex};

    fn chain_document() -> (Document, Vec<ObjectIndex>) {
        let mut doc = Document::new();
        let indices: Vec<ObjectIndex> = (0..3)
            .map(|i| {
                doc.add_object(ObjectData::new(format!("Object {i}"), vec![TrackState::default()]))
            })
            .collect();
        doc.link_chain(&indices).unwrap();
        (doc, indices)
    }

    #[test]
    fn test_undo_restores_chain() {
        let (mut doc, indices) = chain_document();
        let mut history = UndoHistory::new();

        history.record(&doc, indices[0], UndoScope::MidpointChain).unwrap();
        for &index in &indices {
            doc.write_track(index, TrackIndex(0), 7, 7);
        }

        let entry = history.undo(&mut doc).unwrap();
        assert_eq!(entry.scope, UndoScope::MidpointChain);
        for &index in &indices {
            assert_eq!(doc.read_track(index, TrackIndex(0)), Some(TrackState::default()));
        }
        assert!(!history.can_undo());
        assert_eq!(history.memory_used(), 0);
    }

    #[test]
    fn test_object_scope_covers_one_object() {
        let (mut doc, indices) = chain_document();
        let mut history = UndoHistory::new();

        history.record(&doc, indices[1], UndoScope::Object).unwrap();
        doc.write_track(indices[1], TrackIndex(0), 1, 2);
        doc.write_track(indices[2], TrackIndex(0), 3, 4);
        history.undo(&mut doc).unwrap();

        assert_eq!(doc.read_track(indices[1], TrackIndex(0)), Some(TrackState::default()));
        assert_eq!(
            doc.read_track(indices[2], TrackIndex(0)).map(|s| (s.left, s.right)),
            Some((3, 4))
        );
    }

    #[test]
    fn test_nothing_to_undo() {
        let (mut doc, _) = chain_document();
        let mut history = UndoHistory::new();
        assert!(matches!(history.undo(&mut doc), Err(HostError::NothingToUndo)));
    }

    #[test]
    fn test_depth_limit() {
        let (doc, indices) = chain_document();
        let mut history = UndoHistory::with_max_depth(2);
        for _ in 0..5 {
            history.record(&doc, indices[0], UndoScope::Object).unwrap();
        }
        assert_eq!(history.depth(), 2);
    }
}
