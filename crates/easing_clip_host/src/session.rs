// SPDX-License-Identifier: MIT OR Apache-2.0
//! Session files: a document, its script easings and display options.

use crate::document::{Document, ObjectData};
use crate::error::{HostError, Result};
use crate::scripts::{ScriptEntry, ScriptTable};
use easing_clip::{EasingSpec, FormatSettings, ObjectIndex, TrackMode, TrackScale, TrackState};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current session format version
pub const SESSION_FORMAT_VERSION: u32 = 1;

/// Everything the stand-in host loads from disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Format version
    pub version: u32,
    /// Objects and tracks
    pub document: Document,
    /// Installed script easings
    #[serde(default)]
    pub scripts: ScriptTable,
    /// Display options; defaults when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<FormatSettings>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            version: SESSION_FORMAT_VERSION,
            document: Document::default(),
            scripts: ScriptTable::default(),
            settings: None,
        }
    }
}

impl Session {
    /// Parse a session from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        let session: Session = ron::from_str(text)?;

        if session.version > SESSION_FORMAT_VERSION {
            return Err(HostError::UnsupportedVersion {
                found: session.version,
                supported: SESSION_FORMAT_VERSION,
            });
        }
        Ok(session)
    }

    /// Load a session file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let session = Self::from_ron(&content)?;
        tracing::info!(
            "Loaded session {:?} with {} objects",
            path,
            session.document.objects.len()
        );
        Ok(session)
    }

    /// Save the session to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved session to {:?}", path);
        Ok(())
    }

    /// Display options in effect
    pub fn format_settings(&self) -> FormatSettings {
        self.settings.clone().unwrap_or_default()
    }

    /// Sample session: a four-object midpoint chain on track 0 and a lone
    /// object using a script easing
    pub fn sample() -> Result<Self> {
        let mut document = Document::new();
        document.scales = vec![
            TrackScale {
                denominator: 10,
                precision: 10,
                min: -20_000,
                max: 20_000,
            },
            TrackScale {
                denominator: 100,
                precision: 100,
                min: 0,
                max: 10_000,
            },
        ];

        let linear = TrackMode::builtin(1);
        let chain: Vec<ObjectIndex> = [(0, 125), (125, 40), (40, 300), (300, 300)]
            .iter()
            .enumerate()
            .map(|(i, &(left, right))| {
                let position = TrackState {
                    mode: linear,
                    param: 0,
                    left,
                    right,
                };
                let opacity = TrackState {
                    mode: TrackMode::builtin(0),
                    param: 0,
                    left: 10_000,
                    right: 10_000,
                };
                document.add_object(ObjectData::new(
                    format!("Clip {}", i + 1),
                    vec![position, opacity],
                ))
            })
            .collect();
        document.link_chain(&chain)?;

        document.add_object(ObjectData::new(
            "Title",
            vec![TrackState {
                mode: TrackMode::script(0),
                param: 0,
                left: -50,
                right: 50,
            }],
        ));

        let scripts = ScriptTable::new(vec![ScriptEntry {
            directory: Some("motion".to_string()),
            lazy: true,
            ..ScriptEntry::new(
                "bounce",
                EasingSpec {
                    accepts_param: true,
                    ..EasingSpec::default()
                },
            )
        }]);

        Ok(Self {
            document,
            scripts,
            ..Self::default()
        })
    }
}
