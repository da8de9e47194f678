// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory host fakes for unit tests.

use crate::commands::EasingCommand;
use crate::host::{
    ClipboardText, MenuSurface, ObjectIndex, ObjectStore, ScriptRegistry, TrackIndex, TrackScale,
    TrackState, UndoJournal, UndoScope,
};
use crate::menu::MenuEntry;
use crate::spec::{EasingSpec, TrackMode};
use crate::Result;

/// Tracks given to every fake object
const TRACKS: usize = 2;

#[derive(Debug, Clone, Default)]
pub struct FakeObject {
    pub leader: Option<ObjectIndex>,
    pub next: Option<ObjectIndex>,
    pub tracks: Vec<TrackState>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    pub objects: Vec<FakeObject>,
    pub scale: TrackScale,
}

impl FakeStore {
    pub fn with_objects(count: usize) -> Self {
        let object = FakeObject {
            tracks: vec![TrackState::default(); TRACKS],
            ..FakeObject::default()
        };
        Self {
            objects: vec![object; count],
            scale: TrackScale::default(),
        }
    }

    /// Link objects into one midpoint chain in the given order
    pub fn link(&mut self, order: &[usize]) {
        let Some(&first) = order.first() else {
            return;
        };
        for (pos, &index) in order.iter().enumerate() {
            let object = &mut self.objects[index];
            object.leader = Some(ObjectIndex(first));
            object.next = order.get(pos + 1).map(|&next| ObjectIndex(next));
        }
    }

    /// Set track 0 of an object
    pub fn set_track(&mut self, index: usize, mode: TrackMode, left: i32, right: i32) {
        self.objects[index].tracks[0] = TrackState {
            mode,
            param: 0,
            left,
            right,
        };
    }

    /// Left/right pairs of one track across all objects
    pub fn pairs(&self, track: TrackIndex) -> Vec<(i32, i32)> {
        self.objects
            .iter()
            .map(|object| {
                let state = object.tracks[track.0];
                (state.left, state.right)
            })
            .collect()
    }
}

impl ObjectStore for FakeStore {
    fn leader_index(&self, object: ObjectIndex) -> Option<ObjectIndex> {
        self.objects.get(object.0)?.leader
    }

    fn next_index(&self, object: ObjectIndex) -> Option<ObjectIndex> {
        self.objects.get(object.0)?.next
    }

    fn read_track(&self, object: ObjectIndex, track: TrackIndex) -> Option<TrackState> {
        self.objects.get(object.0)?.tracks.get(track.0).copied()
    }

    fn write_track(&mut self, object: ObjectIndex, track: TrackIndex, left: i32, right: i32) {
        if let Some(state) = self
            .objects
            .get_mut(object.0)
            .and_then(|o| o.tracks.get_mut(track.0))
        {
            state.left = left;
            state.right = right;
        }
    }

    fn track_scale(&self, object: ObjectIndex, track: TrackIndex) -> Option<TrackScale> {
        self.read_track(object, track).map(|_| self.scale)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeScripts {
    blob: Vec<u8>,
    specs: Vec<EasingSpec>,
    pub load_calls: usize,
    pub refuse_load: bool,
}

impl FakeScripts {
    pub fn new(blob: &[u8], specs: Vec<EasingSpec>) -> Self {
        Self {
            blob: blob.to_vec(),
            specs,
            ..Self::default()
        }
    }
}

impl ScriptRegistry for FakeScripts {
    fn script_names_blob(&self) -> Vec<u8> {
        self.blob.clone()
    }

    fn script_descriptor(&self, index: usize) -> Option<EasingSpec> {
        self.specs.get(index).copied()
    }

    fn load_script_descriptor(&mut self, index: usize) {
        self.load_calls += 1;
        if self.refuse_load {
            return;
        }
        if let Some(spec) = self.specs.get_mut(index) {
            spec.is_loaded = true;
        }
    }
}

/// Store plus journal, clipboard and a scripted menu choice
#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    pub store: FakeStore,
    pub undo: Vec<(ObjectIndex, UndoScope)>,
    pub clipboard: Option<String>,
    pub choice: Option<EasingCommand>,
    pub shown: Vec<MenuEntry>,
}

impl FakeHost {
    pub fn with_objects(count: usize) -> Self {
        Self {
            store: FakeStore::with_objects(count),
            ..Self::default()
        }
    }
}

impl ObjectStore for FakeHost {
    fn leader_index(&self, object: ObjectIndex) -> Option<ObjectIndex> {
        self.store.leader_index(object)
    }

    fn next_index(&self, object: ObjectIndex) -> Option<ObjectIndex> {
        self.store.next_index(object)
    }

    fn read_track(&self, object: ObjectIndex, track: TrackIndex) -> Option<TrackState> {
        self.store.read_track(object, track)
    }

    fn write_track(&mut self, object: ObjectIndex, track: TrackIndex, left: i32, right: i32) {
        self.store.write_track(object, track, left, right);
    }

    fn track_scale(&self, object: ObjectIndex, track: TrackIndex) -> Option<TrackScale> {
        self.store.track_scale(object, track)
    }
}

impl UndoJournal for FakeHost {
    fn push_undo_entry(&mut self, object: ObjectIndex, scope: UndoScope) {
        self.undo.push((object, scope));
    }
}

impl ClipboardText for FakeHost {
    fn read_text(&mut self) -> Option<String> {
        self.clipboard.clone()
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.clipboard = Some(text.to_string());
        Ok(())
    }
}

impl MenuSurface for FakeHost {
    fn choose(&mut self, entries: &[MenuEntry]) -> Option<EasingCommand> {
        self.shown = entries.to_vec();
        self.choice
    }
}
