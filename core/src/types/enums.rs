use crate::error::TruthError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Imaging modality of a clinical finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    /// Digital breast tomosynthesis
    Dbt,
    /// Breast MRI
    Mri,
}

impl Modality {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Modality::Dbt => "dbt",
            Modality::Mri => "mri",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Breast laterality as reported by the imaging metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Laterality {
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "B")]
    Bilateral,
    #[serde(rename = "U")]
    Unpaired,
}

impl Laterality {
    /// Returns the DICOM code string ("R", "L", "B", "U")
    pub fn code(&self) -> &'static str {
        match self {
            Laterality::Right => "R",
            Laterality::Left => "L",
            Laterality::Bilateral => "B",
            Laterality::Unpaired => "U",
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Laterality::Right => "right",
            Laterality::Left => "left",
            Laterality::Bilateral => "bilateral",
            Laterality::Unpaired => "unpaired",
        }
    }

    /// Parses a DICOM laterality code, case-insensitively
    ///
    /// Returns `None` for empty or unrecognized values.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "R" => Some(Laterality::Right),
            "L" => Some(Laterality::Left),
            "B" => Some(Laterality::Bilateral),
            "U" => Some(Laterality::Unpaired),
            _ => None,
        }
    }

    /// Checks this laterality against a clinical-table breast code
    ///
    /// The clinical tables encode the right breast as `1` and the left as `2`.
    /// No other pairing matches.
    pub fn matches_clinical_code(&self, code: &str) -> bool {
        matches!(
            (self, code.trim()),
            (Laterality::Right, "1") | (Laterality::Left, "2")
        )
    }
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Classification of a free-text biopsy outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BiopsyOutcome {
    Benign,
    Malignant,
    Unknown,
}

impl BiopsyOutcome {
    /// Binary decision carried by this outcome, if any
    ///
    /// `Unknown` carries no decision.
    pub fn decision(&self) -> Option<Label> {
        match self {
            BiopsyOutcome::Benign => Some(Label::Benign),
            BiopsyOutcome::Malignant => Some(Label::Malignant),
            BiopsyOutcome::Unknown => None,
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            BiopsyOutcome::Benign => "BENIGN",
            BiopsyOutcome::Malignant => "MALIGNANT",
            BiopsyOutcome::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for BiopsyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Resolved two-class ground-truth label
///
/// Ordered so that `Malignant > Benign`, which lets the modality
/// combination rules use `max` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Benign,
    Malignant,
}

impl Label {
    /// One-hot encoding `[benign, malignant]`
    pub fn one_hot(&self) -> [u8; 2] {
        match self {
            Label::Benign => [1, 0],
            Label::Malignant => [0, 1],
        }
    }

    /// Decodes a one-hot pair
    pub fn from_one_hot(pair: [u8; 2]) -> Option<Self> {
        match pair {
            [1, 0] => Some(Label::Benign),
            [0, 1] => Some(Label::Malignant),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Benign => write!(f, "benign"),
            Label::Malignant => write!(f, "malignant"),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.one_hot().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pair = <[u8; 2]>::deserialize(deserializer)?;
        Label::from_one_hot(pair).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid one-hot label {:?}", pair))
        })
    }
}

/// Ground-truth definition used to derive a binary label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroundTruthPolicy {
    /// Biopsy-proven malignancy, short-circuited to benign for low scores
    #[default]
    Biopsy,
    /// Radiology score of 4 or more is malignant
    Acr4Plus,
}

impl GroundTruthPolicy {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            GroundTruthPolicy::Biopsy => "biopsy",
            GroundTruthPolicy::Acr4Plus => "acr4+",
        }
    }
}

impl FromStr for GroundTruthPolicy {
    type Err = TruthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "biopsy" => Ok(GroundTruthPolicy::Biopsy),
            "acr4+" | "acr4plus" => Ok(GroundTruthPolicy::Acr4Plus),
            _ => Err(TruthError::UnsupportedPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for GroundTruthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Granularity at which resolved labels are keyed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    VolumeWise,
    BreastWise,
    PatientWise,
}

impl Scope {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Scope::VolumeWise => "volume-wise",
            Scope::BreastWise => "breast-wise",
            Scope::PatientWise => "patient-wise",
        }
    }
}

impl FromStr for Scope {
    type Err = TruthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "volume-wise" => Ok(Scope::VolumeWise),
            "breast-wise" => Ok(Scope::BreastWise),
            "patient-wise" => Ok(Scope::PatientWise),
            _ => Err(TruthError::UnsupportedScope(s.to_string())),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}
