// SPDX-License-Identifier: MIT OR Apache-2.0
//! Display options for menu previews and copied text.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling how values are shown and copied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Values shown on each side of the section in menu previews
    pub preview_trail: usize,
    /// Show rising/falling arrows in menu previews
    pub zigzag: bool,
    /// Mark values cut off a preview with an ellipsis
    pub ellipsis: bool,
    /// Show rising/falling arrows in copied text
    pub copy_zigzag: bool,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            preview_trail: 2,
            zigzag: true,
            ellipsis: true,
            copy_zigzag: false,
        }
    }
}

impl FormatSettings {
    /// Parse settings from RON text; missing fields keep their defaults
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Load settings from a RON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_ron(&content)?;
        tracing::debug!("Loaded format settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to a RON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config = ron::ser::PrettyConfig::default().struct_names(true);
        let content = ron::ser::to_string_pretty(self, config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Preview trail as a signed trim count
    pub(crate) fn trail(&self) -> isize {
        isize::try_from(self.preview_trail).unwrap_or(isize::MAX)
    }
}
