use crate::error::Result;
use crate::types::Label;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Volumes and labels collected under one aggregation key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEntry {
    /// Volume identifiers, in processing order
    pub uids: Vec<String>,
    /// One-hot label of each volume, parallel to `uids`
    pub truth: Vec<Label>,
}

impl LabelEntry {
    pub fn len(&self) -> usize {
        self.uids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uids.is_empty()
    }

    /// Iterates over `(volume id, label)` pairs
    pub fn pairs(&self) -> impl Iterator<Item = (&str, Label)> + '_ {
        self.uids.iter().map(String::as_str).zip(self.truth.iter().copied())
    }
}

/// Aggregation key → labelled volumes, in first-insertion order of keys
///
/// Entries only grow: pushing to an existing key appends to its lists.
///
/// Serialized as `{ key: { "uids": [...], "truth": [[1,0] | [0,1], ...] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMapping {
    entries: Vec<(String, LabelEntry)>,
    positions: HashMap<String, usize>,
}

impl LabelMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a labelled volume under a key, creating the entry if absent
    pub fn push(&mut self, key: &str, volume_id: &str, label: Label) {
        let position = match self.positions.get(key) {
            Some(&position) => position,
            None => {
                self.entries.push((key.to_string(), LabelEntry::default()));
                self.positions.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[position].1;
        entry.uids.push(volume_id.to_string());
        entry.truth.push(label);
    }

    /// Returns the entry for a key
    pub fn get(&self, key: &str) -> Option<&LabelEntry> {
        self.positions.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys and entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelEntry)> + '_ {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Total number of labelled volumes across all keys
    pub fn volume_count(&self) -> usize {
        self.entries.iter().map(|(_, entry)| entry.len()).sum()
    }

    /// Renders the mapping as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the mapping as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Reads a mapping previously written with [`LabelMapping::write_json`]
    pub fn read_json(path: &Path) -> Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

impl Serialize for LabelMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabelMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = LabelMapping;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a map of aggregation keys to label entries")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut mapping = LabelMapping::new();
                while let Some((key, entry)) = access.next_entry::<String, LabelEntry>()? {
                    if entry.uids.len() != entry.truth.len() {
                        return Err(serde::de::Error::custom(format!(
                            "entry '{}' has {} uids but {} labels",
                            key,
                            entry.uids.len(),
                            entry.truth.len()
                        )));
                    }
                    for (uid, label) in entry.pairs() {
                        mapping.push(&key, uid, label);
                    }
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}
