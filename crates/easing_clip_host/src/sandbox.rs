// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host side of the easing menu: document access, undo, clipboard and a
//! console menu surface.

use crate::document::Document;
use crate::history::UndoHistory;
use easing_clip::{
    ClipboardText, EasingCommand, MenuEntry, MenuSurface, ObjectIndex, ObjectStore, TrackIndex,
    TrackScale, TrackState, UndoJournal, UndoScope,
};
use std::fmt::Write;

/// Render menu entries as text, one per line.
///
/// Items show their command identifier, a `-` when disabled, and the label
/// with its tab expanded.
pub fn render_entries(entries: &[MenuEntry]) -> String {
    let mut out = String::new();
    render_into(&mut out, entries, 0);
    out
}

fn render_into(out: &mut String, entries: &[MenuEntry], depth: usize) {
    let indent = "    ".repeat(depth);
    for entry in entries {
        match entry {
            MenuEntry::Item { label, enabled, command } => {
                let marker = if *enabled { ' ' } else { '-' };
                let label = label.replace('\t', "    ");
                let _ = writeln!(out, "{indent}{marker} {:<22} {label}", command.id());
            }
            MenuEntry::Submenu { label, enabled, items } => {
                let marker = if *enabled { ' ' } else { '-' };
                let _ = writeln!(out, "{indent}{marker} {label} >");
                render_into(out, items, depth + 1);
            }
            MenuEntry::Separator => {
                let _ = writeln!(out, "{indent}  ----");
            }
        }
    }
}

/// In-memory host wrapping a document
#[derive(Debug)]
pub struct Sandbox {
    /// Document being edited
    pub document: Document,
    /// Undo journal
    pub history: UndoHistory,
    /// Clipboard contents
    pub clipboard: Option<String>,
    /// Command chosen when the menu is shown
    pub choice: Option<EasingCommand>,
    /// Print the menu to stdout when shown
    pub echo_menu: bool,
    /// Entries of the last menu shown
    pub last_menu: Vec<MenuEntry>,
}

impl Sandbox {
    /// Create a sandbox over a document
    pub fn new(document: Document) -> Self {
        Self {
            document,
            history: UndoHistory::new(),
            clipboard: None,
            choice: None,
            echo_menu: false,
            last_menu: Vec::new(),
        }
    }

    /// Undo the last recorded edit
    pub fn undo(&mut self) -> crate::error::Result<()> {
        self.history.undo(&mut self.document).map(|_| ())
    }
}

impl ObjectStore for Sandbox {
    fn leader_index(&self, object: ObjectIndex) -> Option<ObjectIndex> {
        self.document.leader_index(object)
    }

    fn next_index(&self, object: ObjectIndex) -> Option<ObjectIndex> {
        self.document.next_index(object)
    }

    fn read_track(&self, object: ObjectIndex, track: TrackIndex) -> Option<TrackState> {
        self.document.read_track(object, track)
    }

    fn write_track(&mut self, object: ObjectIndex, track: TrackIndex, left: i32, right: i32) {
        self.document.write_track(object, track, left, right);
    }

    fn track_scale(&self, object: ObjectIndex, track: TrackIndex) -> Option<TrackScale> {
        self.document.track_scale(object, track)
    }
}

impl UndoJournal for Sandbox {
    fn push_undo_entry(&mut self, object: ObjectIndex, scope: UndoScope) {
        if let Err(e) = self.history.record(&self.document, object, scope) {
            tracing::warn!("Failed to record undo for {:?}: {}", object, e);
        }
    }
}

impl ClipboardText for Sandbox {
    fn read_text(&mut self) -> Option<String> {
        self.clipboard.clone()
    }

    fn write_text(&mut self, text: &str) -> easing_clip::Result<()> {
        self.clipboard = Some(text.to_string());
        Ok(())
    }
}

impl MenuSurface for Sandbox {
    fn choose(&mut self, entries: &[MenuEntry]) -> Option<EasingCommand> {
        if self.echo_menu {
            print!("{}", render_entries(entries));
        }
        self.last_menu = entries.to_vec();
        let choice = self.choice?;

        match MenuEntry::find(entries, choice) {
            Some(MenuEntry::Item { enabled: true, .. }) => Some(choice),
            Some(_) => {
                tracing::info!("{} is disabled", choice.id());
                None
            }
            None => {
                tracing::info!("{} is not offered here", choice.id());
                None
            }
        }
    }
}
