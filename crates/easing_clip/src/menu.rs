// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing context menu: gathers a chain's values, builds the entries and
//! runs the chosen command.

use crate::chain::Chain;
use crate::clipboard::parse_values;
use crate::commands::{CommandContext, EasingCommand, CATALOGUE};
use crate::error::EasingError;
use crate::host::{
    Host, ObjectIndex, ObjectStore, ScriptRegistry, TrackIndex, TrackScale, UndoScope,
};
use crate::settings::FormatSettings;
use crate::span::FormattedValueSpan;
use crate::spec::{EasingResolver, TrackMode};
use crate::values::{apply_values, collect_values, ValueShape};
use crate::Result;

/// Label of the paste entry or submenu
pub const PASTE_LABEL: &str = "Paste";

/// One entry of the context menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// A selectable command
    Item {
        /// Command name and preview, separated by a tab
        label: String,
        /// Disabled entries are shown but cannot be chosen
        enabled: bool,
        /// Command run when chosen
        command: EasingCommand,
    },
    /// A nested menu, one level deep
    Submenu {
        /// Submenu title
        label: String,
        /// Whether the submenu can be opened
        enabled: bool,
        /// Entries of the submenu
        items: Vec<MenuEntry>,
    },
    /// Divider line
    Separator,
}

impl MenuEntry {
    fn item(command: EasingCommand, ctx: &CommandContext<'_>) -> Self {
        Self::Item {
            label: command.label(ctx),
            enabled: command.is_effective(ctx),
            command,
        }
    }

    /// Commands reachable from this entry, including disabled ones
    pub fn commands(&self) -> Vec<EasingCommand> {
        match self {
            Self::Item { command, .. } => vec![*command],
            Self::Submenu { items, .. } => items.iter().flat_map(Self::commands).collect(),
            Self::Separator => Vec::new(),
        }
    }

    /// Find the entry for `command`, searching submenus
    pub fn find(entries: &[MenuEntry], command: EasingCommand) -> Option<&MenuEntry> {
        entries.iter().find_map(|entry| match entry {
            Self::Item { command: c, .. } if *c == command => Some(entry),
            Self::Submenu { items, .. } => Self::find(items, command),
            _ => None,
        })
    }
}

/// Everything gathered for one menu invocation
#[derive(Debug, Clone)]
pub struct MenuState {
    /// Object the menu was opened on
    pub object: ObjectIndex,
    /// Track the menu was opened on
    pub track: TrackIndex,
    /// Midpoint chain of the object
    pub chain: Chain,
    /// Easing mode of the chain's leader
    pub mode: TrackMode,
    /// Display name of the easing
    pub easing_name: String,
    /// Value layout
    pub shape: ValueShape,
    /// Section position within `values`
    pub focus: usize,
    /// Current values, host-internal
    pub values: Vec<i32>,
    /// Value scale of the track
    pub scale: TrackScale,
    /// Parsed clipboard
    pub clipboard: FormattedValueSpan,
    /// Display options
    pub settings: FormatSettings,
}

impl MenuState {
    /// Command context over this state
    pub fn context(&self) -> CommandContext<'_> {
        CommandContext {
            mode: self.mode,
            shape: self.shape,
            focus: self.focus,
            values: &self.values,
            scale: self.scale,
            clipboard: &self.clipboard,
            settings: &self.settings,
        }
    }

    /// Current values with the section set
    pub fn current_span(&self) -> FormattedValueSpan {
        self.context().current_span()
    }

    /// Text written to the clipboard by Copy
    pub fn copy_text(&self) -> String {
        self.context().copy_text()
    }

    /// Build the menu entries in priority order.
    ///
    /// Copy comes first. Applicable paste commands follow as a single entry,
    /// or as a submenu when more than one applies; an empty clipboard leaves
    /// a disabled paste submenu. Transform commands come after a separator.
    pub fn entries(&self) -> Vec<MenuEntry> {
        let ctx = self.context();
        let mut entries = vec![MenuEntry::item(EasingCommand::Copy, &ctx)];

        let mut pastes: Vec<MenuEntry> = CATALOGUE
            .iter()
            .filter(|command| command.is_paste() && command.is_applicable(&ctx))
            .map(|&command| MenuEntry::item(command, &ctx))
            .collect();
        let paste = match pastes.len() {
            0 => MenuEntry::Submenu {
                label: PASTE_LABEL.to_string(),
                enabled: false,
                items: Vec::new(),
            },
            1 => pastes.remove(0),
            _ => MenuEntry::Submenu {
                label: PASTE_LABEL.to_string(),
                enabled: true,
                items: pastes,
            },
        };
        entries.push(paste);

        let transforms: Vec<MenuEntry> = CATALOGUE
            .iter()
            .filter(|command| {
                command.is_mutating() && !command.is_paste() && command.is_applicable(&ctx)
            })
            .map(|&command| MenuEntry::item(command, &ctx))
            .collect();
        if !transforms.is_empty() {
            entries.push(MenuEntry::Separator);
            entries.extend(transforms);
        }
        entries
    }
}

/// Context menu for easing values
#[derive(Debug, Clone, Default)]
pub struct EasingMenu {
    settings: FormatSettings,
}

impl EasingMenu {
    /// Create a menu with display options
    pub fn new(settings: FormatSettings) -> Self {
        Self { settings }
    }

    /// Display options
    pub fn settings(&self) -> &FormatSettings {
        &self.settings
    }

    /// Gather the chain, easing, values and clipboard for one object/track
    pub fn prepare<R: ScriptRegistry>(
        &self,
        resolver: &mut EasingResolver<R>,
        store: &(impl ObjectStore + ?Sized),
        object: ObjectIndex,
        track: TrackIndex,
        clipboard_text: Option<&str>,
    ) -> Result<MenuState> {
        let chain = Chain::collect(store, object)?;
        let leader = chain.leader();
        let state = store
            .read_track(leader, track)
            .ok_or(EasingError::TrackNotFound { object: leader, track })?;
        let scale = store
            .track_scale(leader, track)
            .ok_or(EasingError::ScaleNotFound { object: leader, track })?;

        let easing = resolver.resolve(state.mode);
        let shape = ValueShape::classify(state.mode, &easing.spec, chain.len());
        let focus = match shape {
            ValueShape::Chain => chain.focus_position(),
            ValueShape::Static | ValueShape::TwoPoint => 0,
        };
        let values = collect_values(store, &chain, track, shape)?;
        let clipboard = clipboard_text.map(parse_values).unwrap_or_default();

        tracing::trace!(
            "Easing {:?} on {:?}: {:?} values {:?}, clipboard {:?}",
            easing.name,
            object,
            shape,
            values,
            clipboard.values()
        );

        Ok(MenuState {
            object,
            track,
            chain,
            mode: state.mode,
            easing_name: easing.name,
            shape,
            focus,
            values,
            scale,
            clipboard,
            settings: self.settings.clone(),
        })
    }

    /// Show the menu for one object/track and run the chosen command.
    ///
    /// Failing to read the chain or its values shows no menu. Returns the
    /// executed command, or `None` if nothing ran.
    pub fn open<R, H>(
        &self,
        resolver: &mut EasingResolver<R>,
        host: &mut H,
        object: ObjectIndex,
        track: TrackIndex,
    ) -> Result<Option<EasingCommand>>
    where
        R: ScriptRegistry,
        H: Host + ?Sized,
    {
        let clipboard = host.read_text();
        let state = match self.prepare(resolver, &*host, object, track, clipboard.as_deref()) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("No easing menu for {:?}: {}", object, e);
                return Ok(None);
            }
        };

        let entries = state.entries();
        tracing::debug!("Easing menu for {:?} with {} entries", object, entries.len());

        let Some(command) = host.choose(&entries) else {
            return Ok(None);
        };
        match MenuEntry::find(&entries, command) {
            Some(MenuEntry::Item { enabled: true, .. }) => {}
            Some(_) => {
                tracing::debug!("Ignoring {} which is disabled", command.id());
                return Ok(None);
            }
            None => {
                tracing::debug!("Ignoring {} which was not offered", command.id());
                return Ok(None);
            }
        }

        Ok(self.execute(&state, command, host)?.then_some(command))
    }

    /// Run a command against prepared state.
    ///
    /// Mutating commands record one undo entry for the chain's leader before
    /// writing. Returns false when the command does not apply.
    pub fn execute<H: Host + ?Sized>(
        &self,
        state: &MenuState,
        command: EasingCommand,
        host: &mut H,
    ) -> Result<bool> {
        let ctx = state.context();
        if !command.is_applicable(&ctx) {
            tracing::debug!("{} does not apply to {:?}", command.id(), state.object);
            return Ok(false);
        }

        if command == EasingCommand::Copy {
            let text = state.copy_text();
            tracing::debug!("Copied {:?}", text);
            host.write_text(&text)?;
            return Ok(true);
        }

        let values = command.result(&ctx);
        let scope = if state.chain.len() > 1 {
            UndoScope::MidpointChain
        } else {
            UndoScope::Object
        };
        host.push_undo_entry(state.chain.leader(), scope);
        apply_values(host, &state.chain, state.track, state.shape, &values)?;
        tracing::debug!(
            "{} on {:?}: {:?} -> {:?}",
            command.id(),
            state.object,
            state.values,
            values
        );
        Ok(true)
    }
}
