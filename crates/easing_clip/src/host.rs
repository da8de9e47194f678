// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interfaces to the host application.
//!
//! The engine never touches the host's memory layout. Everything it reads or
//! writes goes through these traits:
//! - [`ObjectStore`] for objects, midpoint links and track values
//! - [`ScriptRegistry`] for script easings and their descriptors
//! - [`UndoJournal`] for recording an undo entry before a batch edit
//! - [`ClipboardText`] for plain-text clipboard access
//! - [`MenuSurface`] for showing the context menu

use crate::commands::EasingCommand;
use crate::menu::MenuEntry;
use crate::spec::{EasingSpec, TrackMode};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Index of a timeline object in the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectIndex(pub usize);

/// Index of a trackbar within an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackIndex(pub usize);

/// Stored state of one trackbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackState {
    /// Encoded easing mode
    pub mode: TrackMode,
    /// Integer easing parameter
    pub param: i32,
    /// Value at the start of the object (host-internal units)
    pub left: i32,
    /// Value at the end of the object (host-internal units)
    pub right: i32,
}

/// Conversion between host-internal integers and displayed numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackScale {
    /// Internal units per displayed unit
    pub denominator: i32,
    /// Displayed resolution, in steps per displayed unit
    pub precision: i32,
    /// Smallest internal value
    pub min: i32,
    /// Largest internal value
    pub max: i32,
}

impl Default for TrackScale {
    fn default() -> Self {
        Self {
            denominator: 1,
            precision: 1,
            min: i32::MIN,
            max: i32::MAX,
        }
    }
}

/// Scope of an undo entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UndoScope {
    /// Only the named object
    Object,
    /// The named object and every object linked to it as midpoints
    MidpointChain,
}

/// Read/write access to the host's object storage
pub trait ObjectStore {
    /// First object of the midpoint chain this object belongs to
    fn leader_index(&self, object: ObjectIndex) -> Option<ObjectIndex>;

    /// Object following this one in its midpoint chain
    fn next_index(&self, object: ObjectIndex) -> Option<ObjectIndex>;

    /// Read one trackbar of an object
    fn read_track(&self, object: ObjectIndex, track: TrackIndex) -> Option<TrackState>;

    /// Overwrite the left/right values of one trackbar
    fn write_track(&mut self, object: ObjectIndex, track: TrackIndex, left: i32, right: i32);

    /// Value scale of one trackbar
    fn track_scale(&self, object: ObjectIndex, track: TrackIndex) -> Option<TrackScale>;
}

/// Source of script easing names and descriptors
pub trait ScriptRegistry {
    /// Script names as NUL-terminated records, either `name\0` or `name\x01dir\0`
    fn script_names_blob(&self) -> Vec<u8>;

    /// Descriptor of a script easing, `None` when the index is out of range
    fn script_descriptor(&self, index: usize) -> Option<EasingSpec>;

    /// Ask the host to load a descriptor that is not loaded yet
    fn load_script_descriptor(&mut self, index: usize);
}

/// Host undo journal
pub trait UndoJournal {
    /// Record the current state of `object` before it is modified
    fn push_undo_entry(&mut self, object: ObjectIndex, scope: UndoScope);
}

/// Plain-text clipboard
pub trait ClipboardText {
    /// Current clipboard text, if any
    fn read_text(&mut self) -> Option<String>;

    /// Replace the clipboard contents
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Popup menu display
pub trait MenuSurface {
    /// Show the entries and return the chosen command, or `None` if dismissed
    fn choose(&mut self, entries: &[MenuEntry]) -> Option<EasingCommand>;
}

/// Everything the context menu needs from the host
pub trait Host: ObjectStore + UndoJournal + ClipboardText + MenuSurface {}

impl<T: ObjectStore + UndoJournal + ClipboardText + MenuSurface> Host for T {}
