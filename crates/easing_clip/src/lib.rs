// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing value copy/paste engine.
//!
//! This crate powers the easing context menu of a host setting dialog:
//! - Resolving track modes to easing names and capabilities
//! - Collecting midpoint chains of linked objects
//! - Reading and writing a chain's values as one flat sequence
//! - Formatting value spans for previews and the clipboard
//! - Parsing clipboard text back into values
//! - Paste and transform commands and the menu built from them
//!
//! ## Architecture
//!
//! The engine never touches host memory. All document, clipboard, undo and
//! menu access goes through the traits in [`host`], so any host (or a test
//! fake) can drive it.

pub mod chain;
pub mod clipboard;
pub mod commands;
pub mod error;
pub mod host;
pub mod menu;
pub mod settings;
pub mod span;
pub mod spec;
pub mod values;

#[cfg(test)]
pub(crate) mod test_support;

pub use chain::Chain;
pub use clipboard::parse_values;
pub use commands::{CommandContext, EasingCommand, CATALOGUE};
pub use error::{EasingError, Result};
pub use host::{
    ClipboardText, Host, MenuSurface, ObjectIndex, ObjectStore, ScriptRegistry, TrackIndex,
    TrackScale, TrackState, UndoJournal, UndoScope,
};
pub use menu::{EasingMenu, MenuEntry, MenuState};
pub use settings::FormatSettings;
pub use span::{FormattedValueSpan, Section};
pub use spec::{EasingResolver, EasingSpec, ResolvedEasing, TrackMode};
pub use values::{
    apply_values, collect_values, convert_display_to_internal, internal_to_display, ValueShape,
};
