// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory timeline document: objects, midpoint links and track values.

use crate::error::{HostError, Result};
use easing_clip::{ObjectIndex, ObjectStore, TrackIndex, TrackScale, TrackState};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One timeline object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectData {
    /// Object name
    pub name: String,
    /// First object of the midpoint chain, if linked
    #[serde(default)]
    pub leader: Option<ObjectIndex>,
    /// Following object in the midpoint chain
    #[serde(default)]
    pub next: Option<ObjectIndex>,
    /// Trackbar states
    pub tracks: Vec<TrackState>,
}

impl Default for ObjectData {
    fn default() -> Self {
        Self {
            name: "Object".to_string(),
            leader: None,
            next: None,
            tracks: Vec::new(),
        }
    }
}

impl ObjectData {
    /// Create an unlinked object with the given name and tracks
    pub fn new(name: impl Into<String>, tracks: Vec<TrackState>) -> Self {
        Self {
            name: name.into(),
            tracks,
            ..Default::default()
        }
    }
}

/// Document holding all objects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// All objects, in timeline order
    pub objects: IndexMap<ObjectIndex, ObjectData>,
    /// Value scale per track index; missing tracks use the default scale
    #[serde(default)]
    pub scales: Vec<TrackScale>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its index
    pub fn add_object(&mut self, data: ObjectData) -> ObjectIndex {
        let index = ObjectIndex(
            self.objects
                .keys()
                .map(|index| index.0 + 1)
                .max()
                .unwrap_or(0),
        );
        self.objects.insert(index, data);
        index
    }

    /// Get an object by index
    pub fn get(&self, index: ObjectIndex) -> Option<&ObjectData> {
        self.objects.get(&index)
    }

    /// Get a mutable reference to an object by index
    pub fn get_mut(&mut self, index: ObjectIndex) -> Option<&mut ObjectData> {
        self.objects.get_mut(&index)
    }

    /// Link objects into one midpoint chain, in the given order
    pub fn link_chain(&mut self, order: &[ObjectIndex]) -> Result<()> {
        if let Some(missing) = order.iter().find(|index| !self.objects.contains_key(*index)) {
            return Err(HostError::ObjectNotFound(*missing));
        }
        let Some(&leader) = order.first() else {
            return Ok(());
        };
        for (pos, index) in order.iter().enumerate() {
            if let Some(object) = self.objects.get_mut(index) {
                object.leader = Some(leader);
                object.next = order.get(pos + 1).copied();
            }
        }
        Ok(())
    }

    /// Tracks of the listed objects, for undo snapshots
    pub fn capture(&self, order: &[ObjectIndex]) -> Vec<(ObjectIndex, Vec<TrackState>)> {
        order
            .iter()
            .filter_map(|&index| self.get(index).map(|object| (index, object.tracks.clone())))
            .collect()
    }

    /// Restore tracks captured by [`Document::capture`]
    pub fn restore(&mut self, captured: Vec<(ObjectIndex, Vec<TrackState>)>) {
        for (index, tracks) in captured {
            if let Some(object) = self.get_mut(index) {
                object.tracks = tracks;
            }
        }
    }
}

impl ObjectStore for Document {
    fn leader_index(&self, object: ObjectIndex) -> Option<ObjectIndex> {
        self.get(object)?.leader
    }

    fn next_index(&self, object: ObjectIndex) -> Option<ObjectIndex> {
        self.get(object)?.next
    }

    fn read_track(&self, object: ObjectIndex, track: TrackIndex) -> Option<TrackState> {
        self.get(object)?.tracks.get(track.0).copied()
    }

    fn write_track(&mut self, object: ObjectIndex, track: TrackIndex, left: i32, right: i32) {
        let Some(state) = self
            .get_mut(object)
            .and_then(|data| data.tracks.get_mut(track.0))
        else {
            tracing::warn!("Write to missing track {:?} of {:?}", track, object);
            return;
        };
        state.left = left;
        state.right = right;
    }

    fn track_scale(&self, object: ObjectIndex, track: TrackIndex) -> Option<TrackScale> {
        self.read_track(object, track)?;
        Some(self.scales.get(track.0).copied().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easing_clip::{Chain, TrackMode};

    fn track(left: i32, right: i32) -> TrackState {
        TrackState {
            mode: TrackMode::builtin(1),
            param: 0,
            left,
            right,
        }
    }

    fn document(count: usize) -> (Document, Vec<ObjectIndex>) {
        let mut doc = Document::new();
        let indices = (0..count)
            .map(|i| doc.add_object(ObjectData::new(format!("Object {i}"), vec![track(0, 0)])))
            .collect();
        (doc, indices)
    }

    #[test]
    fn test_add_object_indices() {
        let (mut doc, indices) = document(3);
        assert_eq!(indices, vec![ObjectIndex(0), ObjectIndex(1), ObjectIndex(2)]);
        doc.objects.shift_remove(&ObjectIndex(1));
        assert_eq!(doc.add_object(ObjectData::default()), ObjectIndex(3));
    }

    #[test]
    fn test_link_chain() {
        let (mut doc, indices) = document(4);
        doc.link_chain(&[indices[2], indices[0], indices[3]]).unwrap();

        let chain = Chain::collect(&doc, indices[0]).unwrap();
        assert_eq!(chain.objects(), &[indices[2], indices[0], indices[3]]);
        assert_eq!(chain.focus_position(), 1);
        assert_eq!(doc.leader_index(indices[1]), None);

        let missing = doc.link_chain(&[indices[0], ObjectIndex(42)]);
        assert!(matches!(missing, Err(HostError::ObjectNotFound(ObjectIndex(42)))));
    }

    #[test]
    fn test_write_and_read_track() {
        let (mut doc, indices) = document(1);
        doc.write_track(indices[0], TrackIndex(0), 5, 6);
        assert_eq!(doc.read_track(indices[0], TrackIndex(0)), Some(track(5, 6)));

        // Missing tracks are ignored
        doc.write_track(indices[0], TrackIndex(3), 1, 1);
        assert_eq!(doc.read_track(indices[0], TrackIndex(3)), None);
    }

    #[test]
    fn test_track_scale_defaults() {
        let (mut doc, indices) = document(1);
        assert_eq!(doc.track_scale(indices[0], TrackIndex(0)), Some(TrackScale::default()));
        assert_eq!(doc.track_scale(indices[0], TrackIndex(1)), None);

        let scale = TrackScale {
            denominator: 100,
            precision: 10,
            min: -1000,
            max: 1000,
        };
        doc.scales.push(scale);
        assert_eq!(doc.track_scale(indices[0], TrackIndex(0)), Some(scale));
    }

    #[test]
    fn test_capture_and_restore() {
        let (mut doc, indices) = document(2);
        let captured = doc.capture(&indices);
        doc.write_track(indices[1], TrackIndex(0), 9, 9);
        doc.restore(captured);
        assert_eq!(doc.read_track(indices[1], TrackIndex(0)), Some(track(0, 0)));
    }
}
