// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing kinds and their capabilities.
//!
//! A track's mode selects either one of the built-in easings or a script
//! easing. [`EasingResolver`] turns a mode into a display name and an
//! [`EasingSpec`], caching script names and descriptors for the lifetime of
//! the resolver.

use crate::host::ScriptRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Encoded easing mode of a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TrackMode {
    /// Kind in the low 4 bits plus the accelerate/decelerate flags
    pub bits: u16,
    /// Script easing index, used when the kind is [`TrackMode::SCRIPT_KIND`]
    #[serde(default)]
    pub script_index: u16,
}

impl TrackMode {
    /// Mask selecting the easing kind
    pub const KIND_MASK: u16 = 0x0f;
    /// Accelerate flag
    pub const ACCELERATE: u16 = 0x20;
    /// Decelerate flag
    pub const DECELERATE: u16 = 0x40;
    /// Kind value reserved for script easings
    pub const SCRIPT_KIND: u8 = 0x0f;
    /// Kind of the "no movement" easing
    pub const STATIC_KIND: u8 = 0;
    /// Kind of the instant (step) easing
    pub const INSTANT_KIND: u8 = 3;

    /// Mode for a built-in easing kind
    pub const fn builtin(kind: u8) -> Self {
        Self {
            bits: kind as u16 & Self::KIND_MASK,
            script_index: 0,
        }
    }

    /// Mode for a script easing
    pub const fn script(index: u16) -> Self {
        Self {
            bits: Self::SCRIPT_KIND as u16,
            script_index: index,
        }
    }

    /// Set the accelerate/decelerate flags
    pub const fn with_speed(mut self, accelerate: bool, decelerate: bool) -> Self {
        self.bits &= !(Self::ACCELERATE | Self::DECELERATE);
        if accelerate {
            self.bits |= Self::ACCELERATE;
        }
        if decelerate {
            self.bits |= Self::DECELERATE;
        }
        self
    }

    /// Easing kind, 0-15
    pub const fn kind(&self) -> u8 {
        (self.bits & Self::KIND_MASK) as u8
    }

    /// Whether this mode names a script easing
    pub const fn is_script(&self) -> bool {
        self.kind() == Self::SCRIPT_KIND
    }

    /// Whether the value never moves
    pub const fn is_static(&self) -> bool {
        self.kind() == Self::STATIC_KIND
    }

    /// Whether the value jumps at the start of each section
    pub const fn is_instant(&self) -> bool {
        self.kind() == Self::INSTANT_KIND
    }

    /// Accelerate flag
    pub const fn accelerate(&self) -> bool {
        self.bits & Self::ACCELERATE != 0
    }

    /// Decelerate flag
    pub const fn decelerate(&self) -> bool {
        self.bits & Self::DECELERATE != 0
    }
}

/// Capabilities of an easing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EasingSpec {
    /// Accepts the accelerate/decelerate flags
    pub accepts_speed: bool,
    /// Takes an integer parameter
    pub accepts_param: bool,
    /// Uses exactly one left and one right value regardless of chain length
    pub is_two_point: bool,
    /// Descriptor has been loaded by the host
    pub is_loaded: bool,
}

impl EasingSpec {
    const fn builtin(accepts_speed: bool, accepts_param: bool, is_two_point: bool) -> Self {
        Self {
            accepts_speed,
            accepts_param,
            is_two_point,
            is_loaded: true,
        }
    }
}

/// Display names of the built-in easings, indexed by kind
pub const BUILTIN_NAMES: [&str; 9] = [
    "Static",
    "Linear",
    "Curve",
    "Instant",
    "Ignore midpoints",
    "Move by amount",
    "Random",
    "Accelerate/decelerate",
    "Repeat",
];

/// Capabilities of the built-in easings, indexed by kind.
/// Kinds 4 and up are two-point except kind 7.
pub const BUILTIN_SPECS: [EasingSpec; 9] = [
    EasingSpec::builtin(false, false, false),
    EasingSpec::builtin(true, false, false),
    EasingSpec::builtin(true, false, false),
    EasingSpec::builtin(false, false, false),
    EasingSpec::builtin(true, false, true),
    EasingSpec::builtin(true, false, true),
    EasingSpec::builtin(false, true, true),
    EasingSpec::builtin(false, false, false),
    EasingSpec::builtin(true, true, true),
];

/// Name record of a script easing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptName {
    /// Script name
    pub name: String,
    /// Subdirectory the script was found in
    pub directory: Option<String>,
}

impl fmt::Display for ScriptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.directory {
            Some(dir) => write!(f, "{}@{}", self.name, dir),
            None => f.write_str(&self.name),
        }
    }
}

/// Parse a NUL-delimited script name blob.
///
/// Records are `name\0` or `name\x01dir\0`; an empty record ends the table.
pub fn parse_script_names(blob: &[u8]) -> Vec<ScriptName> {
    blob.split(|&b| b == 0)
        .take_while(|record| !record.is_empty())
        .map(|record| {
            let mut parts = record.splitn(2, |&b| b == 1);
            let name = String::from_utf8_lossy(parts.next().unwrap_or_default()).into_owned();
            let directory = parts
                .next()
                .map(|dir| String::from_utf8_lossy(dir).into_owned());
            ScriptName { name, directory }
        })
        .collect()
}

/// An easing resolved from a track mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEasing {
    /// Display name
    pub name: String,
    /// Capabilities
    pub spec: EasingSpec,
}

/// Resolves track modes to easing names and capabilities
pub struct EasingResolver<R> {
    registry: R,
    names: Option<Vec<ScriptName>>,
    descriptors: HashMap<usize, EasingSpec>,
}

impl<R: ScriptRegistry> EasingResolver<R> {
    /// Create a resolver over a script registry
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            names: None,
            descriptors: HashMap::new(),
        }
    }

    /// Resolve a mode to its name and capabilities
    pub fn resolve(&mut self, mode: TrackMode) -> ResolvedEasing {
        if mode.is_script() {
            let index = usize::from(mode.script_index);
            ResolvedEasing {
                name: self.script_name(index),
                spec: self.script_spec(index),
            }
        } else {
            let kind = usize::from(mode.kind());
            match (BUILTIN_NAMES.get(kind), BUILTIN_SPECS.get(kind)) {
                (Some(name), Some(spec)) => ResolvedEasing {
                    name: (*name).to_string(),
                    spec: *spec,
                },
                _ => ResolvedEasing {
                    name: format!("Unknown easing {kind}"),
                    spec: EasingSpec::default(),
                },
            }
        }
    }

    /// Display name of a script easing
    pub fn script_name(&mut self, index: usize) -> String {
        let registry = &self.registry;
        let names = self
            .names
            .get_or_insert_with(|| parse_script_names(&registry.script_names_blob()));
        names
            .get(index)
            .map_or_else(|| format!("Script {index}"), ToString::to_string)
    }

    /// Capabilities of a script easing, loading the descriptor on first use
    pub fn script_spec(&mut self, index: usize) -> EasingSpec {
        if let Some(spec) = self.descriptors.get(&index) {
            return *spec;
        }

        let spec = match self.registry.script_descriptor(index) {
            Some(spec) if spec.is_loaded => Some(spec),
            Some(_) => {
                tracing::debug!("Loading descriptor of script easing {index}");
                self.registry.load_script_descriptor(index);
                self.registry
                    .script_descriptor(index)
                    .filter(|spec| spec.is_loaded)
            }
            None => None,
        };

        match spec {
            Some(spec) => {
                self.descriptors.insert(index, spec);
                spec
            }
            None => {
                tracing::warn!("Descriptor of script easing {index} is unavailable");
                EasingSpec::default()
            }
        }
    }
}
