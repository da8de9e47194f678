// SPDX-License-Identifier: MIT OR Apache-2.0
//! Script easing table with lazily loaded descriptors.

use easing_clip::{EasingSpec, ScriptRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One installed script easing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Script name
    pub name: String,
    /// Subdirectory the script was found in
    #[serde(default)]
    pub directory: Option<String>,
    /// Capabilities once the descriptor is loaded
    #[serde(default)]
    pub spec: EasingSpec,
    /// Descriptor is only available after an explicit load
    #[serde(default)]
    pub lazy: bool,
    /// Descriptor never loads
    #[serde(default)]
    pub broken: bool,
}

impl ScriptEntry {
    /// Create an eagerly loaded script entry
    pub fn new(name: impl Into<String>, spec: EasingSpec) -> Self {
        Self {
            name: name.into(),
            directory: None,
            spec,
            lazy: false,
            broken: false,
        }
    }
}

/// Script easings known to the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptTable {
    /// Installed scripts, by index
    pub entries: Vec<ScriptEntry>,
    #[serde(skip)]
    loaded: HashSet<usize>,
}

impl ScriptTable {
    /// Create a table from entries
    pub fn new(entries: Vec<ScriptEntry>) -> Self {
        Self {
            entries,
            loaded: HashSet::new(),
        }
    }

    fn is_loaded(&self, index: usize, entry: &ScriptEntry) -> bool {
        !entry.broken && (!entry.lazy || self.loaded.contains(&index))
    }
}

impl ScriptRegistry for ScriptTable {
    fn script_names_blob(&self) -> Vec<u8> {
        let mut blob = Vec::new();
        for entry in &self.entries {
            blob.extend_from_slice(entry.name.as_bytes());
            if let Some(directory) = &entry.directory {
                blob.push(0x01);
                blob.extend_from_slice(directory.as_bytes());
            }
            blob.push(0);
        }
        blob.push(0);
        blob
    }

    fn script_descriptor(&self, index: usize) -> Option<EasingSpec> {
        let entry = self.entries.get(index)?;
        Some(EasingSpec {
            is_loaded: self.is_loaded(index, entry),
            ..entry.spec
        })
    }

    fn load_script_descriptor(&mut self, index: usize) {
        match self.entries.get(index) {
            Some(entry) if entry.broken => {
                tracing::debug!("Script {} failed to load", entry.name);
            }
            Some(entry) => {
                tracing::debug!("Loaded script {}", entry.name);
                self.loaded.insert(index);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easing_clip::spec::parse_script_names;
    use easing_clip::{EasingResolver, TrackMode};

    fn table() -> ScriptTable {
        let two_point = EasingSpec {
            is_two_point: true,
            ..EasingSpec::default()
        };
        ScriptTable::new(vec![
            ScriptEntry::new("bounce", EasingSpec::default()),
            ScriptEntry {
                directory: Some("extra".to_string()),
                lazy: true,
                ..ScriptEntry::new("step", two_point)
            },
            ScriptEntry {
                broken: true,
                ..ScriptEntry::new("broken", two_point)
            },
        ])
    }

    #[test]
    fn test_names_blob() {
        let names = parse_script_names(&table().script_names_blob());
        let shown: Vec<String> = names.iter().map(ToString::to_string).collect();
        assert_eq!(shown, vec!["bounce", "step@extra", "broken"]);
    }

    #[test]
    fn test_lazy_descriptor() {
        let mut scripts = table();
        assert!(scripts.script_descriptor(0).is_some_and(|spec| spec.is_loaded));
        assert!(scripts.script_descriptor(1).is_some_and(|spec| !spec.is_loaded));
        scripts.load_script_descriptor(1);
        assert!(scripts.script_descriptor(1).is_some_and(|spec| spec.is_loaded));
        assert_eq!(scripts.script_descriptor(7), None);
    }

    #[test]
    fn test_resolver_over_table() {
        let mut resolver = EasingResolver::new(table());

        let step = resolver.resolve(TrackMode::script(1));
        assert_eq!(step.name, "step@extra");
        assert!(step.spec.is_two_point);

        // Falls back to an empty spec
        let broken = resolver.resolve(TrackMode::script(2));
        assert!(!broken.spec.is_two_point);
    }
}
