// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors raised by the stand-in host.

use easing_clip::{EasingError, ObjectIndex};
use thiserror::Error;

/// Host errors
#[derive(Debug, Error)]
pub enum HostError {
    /// Error from the easing engine
    #[error(transparent)]
    Easing(#[from] EasingError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session file could not be parsed
    #[error("Session parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Session could not be serialized
    #[error("Session serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// Undo snapshot could not be encoded or decoded
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    /// Session file written by a newer version
    #[error("Session version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest version understood
        supported: u32,
    },

    /// Object index not present in the document
    #[error("Object {0:?} not found")]
    ObjectNotFound(ObjectIndex),

    /// Unknown command identifier
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Nothing to undo
    #[error("Nothing to undo")]
    NothingToUndo,
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
