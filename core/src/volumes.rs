//! Per-volume reconciliation table
//!
//! Holds the reconciled findings of every eligible volume so labels can be
//! derived later under any [`AggregationOptions`](crate::AggregationOptions)
//! without re-reading images or clinical tables.

use crate::error::Result;
use crate::imaging::ImagingRecord;
use crate::reconcile::{Findings, ModalityFindings};
use crate::types::BiopsyOutcome;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// Imaging record with its reconciled findings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeEntry {
    #[serde(flatten)]
    pub record: ImagingRecord,
    #[serde(default)]
    pub dbt_score: Option<u8>,
    #[serde(default)]
    pub dbt_outcome: Option<BiopsyOutcome>,
    #[serde(default)]
    pub mri_score: Option<u8>,
    #[serde(default)]
    pub mri_outcome: Option<BiopsyOutcome>,
}

impl VolumeEntry {
    pub fn new(record: ImagingRecord, findings: Findings) -> Self {
        Self {
            record,
            dbt_score: findings.dbt.score,
            dbt_outcome: findings.dbt.biopsy,
            mri_score: findings.mri.score,
            mri_outcome: findings.mri.biopsy,
        }
    }

    /// Returns the reconciled findings
    pub fn findings(&self) -> Findings {
        Findings {
            dbt: ModalityFindings {
                score: self.dbt_score,
                biopsy: self.dbt_outcome,
            },
            mri: ModalityFindings {
                score: self.mri_score,
                biopsy: self.mri_outcome,
            },
        }
    }
}

/// Volume id → [`VolumeEntry`], in insertion order
///
/// Inserting an existing volume id replaces its entry in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeTable {
    entries: Vec<VolumeEntry>,
    positions: HashMap<String, usize>,
}

impl VolumeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry keyed by its volume id
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(&mut self, entry: VolumeEntry) -> Option<VolumeEntry> {
        match self.positions.get(&entry.record.volume_id) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position], entry)),
            None => {
                self.positions
                    .insert(entry.record.volume_id.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, volume_id: &str) -> Option<&VolumeEntry> {
        self.positions
            .get(volume_id)
            .map(|&position| &self.entries[position])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, VolumeEntry> {
        self.entries.iter()
    }

    /// Renders the table as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    pub fn read_json(path: &Path) -> Result<Self> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

impl<'a> IntoIterator for &'a VolumeTable {
    type Item = &'a VolumeEntry;
    type IntoIter = std::slice::Iter<'a, VolumeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for VolumeTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.record.volume_id, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VolumeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = VolumeTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a map of volume ids to volume entries")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut table = VolumeTable::new();
                while let Some((volume_id, mut entry)) =
                    access.next_entry::<String, VolumeEntry>()?
                {
                    entry.record.volume_id = volume_id;
                    table.insert(entry);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}
