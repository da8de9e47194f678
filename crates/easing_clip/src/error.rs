// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the easing engine.

use crate::host::{ObjectIndex, TrackIndex};
use thiserror::Error;

/// Errors raised while reading or writing easing values
#[derive(Debug, Error)]
pub enum EasingError {
    /// The `next` linkage of a midpoint chain loops back on itself
    #[error("Midpoint chain starting at {leader:?} is cyclic")]
    CyclicChain {
        /// Leader the walk started from
        leader: ObjectIndex,
    },

    /// The queried object was not reached while walking its chain
    #[error("Object {object:?} is not part of the chain led by {leader:?}")]
    FocusNotInChain {
        /// Object the chain was collected for
        object: ObjectIndex,
        /// Leader named by that object
        leader: ObjectIndex,
    },

    /// An object or one of its tracks does not exist
    #[error("Track {track:?} of object {object:?} not found")]
    TrackNotFound {
        /// Object index
        object: ObjectIndex,
        /// Track index
        track: TrackIndex,
    },

    /// The host reports no value scale for a track
    #[error("No value scale for track {track:?} of object {object:?}")]
    ScaleNotFound {
        /// Object index
        object: ObjectIndex,
        /// Track index
        track: TrackIndex,
    },

    /// A value sequence does not match the layout of its chain
    #[error("Expected {expected} values, got {actual}")]
    ValueCountMismatch {
        /// Length required by the chain layout
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// Writing to the clipboard failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Settings could not be parsed
    #[error("Settings error: {0}")]
    Settings(#[from] ron::error::SpannedError),

    /// Settings could not be serialized
    #[error("Settings serialization error: {0}")]
    SettingsWrite(#[from] ron::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for easing operations
pub type Result<T> = std::result::Result<T, EasingError>;
