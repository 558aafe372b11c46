use crate::clinical::schema::{read_table, TableSchema};
use crate::error::{Result, TruthError};
use crate::types::Modality;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Directory holding the reviewed EA1141 clinical tables
pub const CLINICAL_SUBDIR: &str = "EA1141-Reviewed-Clinical-Data-and-Data-Dictionaries";
/// Global radiology-score table file name
pub const GLOBAL_SCORES_FILE: &str = "ea1141_year0_screening_derived.csv";
/// DBT lesion outcome table file name
pub const DBT_OUTCOMES_FILE: &str = "ea1141_year0_tomolesions_outcome.csv";
/// MRI lesion outcome table file name
pub const MRI_OUTCOMES_FILE: &str = "ea1141_year0_mrilesions_outcome.csv";

/// Global radiology scores of one subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClinicalRecord {
    pub subject: String,
    pub dbt_score: Option<u8>,
    pub mri_score: Option<u8>,
}

impl ClinicalRecord {
    /// Returns the global score for a modality
    pub fn score(&self, modality: Modality) -> Option<u8> {
        match modality {
            Modality::Dbt => self.dbt_score,
            Modality::Mri => self.mri_score,
        }
    }
}

/// One lesion row of a biopsy-outcome table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRow {
    /// Breast code as written in the table (`1` right, `2` left)
    pub laterality_code: String,
    /// Free-text outcome
    pub outcome: String,
}

/// Read-only index over the clinical outcome tables
///
/// Built once per run and passed by reference to the reconciler.
#[derive(Debug, Clone, Default)]
pub struct ClinicalIndex {
    records: HashMap<String, ClinicalRecord>,
    dbt_outcomes: HashMap<String, Vec<OutcomeRow>>,
    mri_outcomes: HashMap<String, Vec<OutcomeRow>>,
}

impl ClinicalIndex {
    /// Builds the index from the contents of the three tables
    ///
    /// # Errors
    ///
    /// Returns `TruthError::Schema` if a required column is missing and
    /// `TruthError::Csv` if a table is malformed.
    pub fn from_tables(
        global_scores: &str,
        dbt_outcomes: &str,
        mri_outcomes: &str,
        schema: &TableSchema,
    ) -> Result<Self> {
        Self::from_bytes(
            global_scores.as_bytes(),
            dbt_outcomes.as_bytes(),
            mri_outcomes.as_bytes(),
            schema,
        )
    }

    /// Builds the index from three table files
    ///
    /// # Errors
    ///
    /// Returns `TruthError::IoError` if a file cannot be read and
    /// `TruthError::Csv` if its content is not valid UTF-8.
    pub fn from_files(
        global_scores: &Path,
        dbt_outcomes: &Path,
        mri_outcomes: &Path,
        schema: &TableSchema,
    ) -> Result<Self> {
        Self::from_bytes(
            &fs::read(global_scores)?,
            &fs::read(dbt_outcomes)?,
            &fs::read(mri_outcomes)?,
            schema,
        )
    }

    fn from_bytes(
        global_scores: &[u8],
        dbt_outcomes: &[u8],
        mri_outcomes: &[u8],
        schema: &TableSchema,
    ) -> Result<Self> {
        let index = Self {
            records: parse_global_scores(global_scores, schema)?,
            dbt_outcomes: parse_outcomes(dbt_outcomes, Modality::Dbt, schema)?,
            mri_outcomes: parse_outcomes(mri_outcomes, Modality::Mri, schema)?,
        };

        info!(
            "Indexed {} subjects, {} DBT and {} MRI outcome rows",
            index.records.len(),
            index.dbt_outcomes.values().map(Vec::len).sum::<usize>(),
            index.mri_outcomes.values().map(Vec::len).sum::<usize>()
        );

        Ok(index)
    }

    /// Builds the index from a directory holding the standard EA1141 files
    ///
    /// The files are looked up directly in `dir`, then in its
    /// [`CLINICAL_SUBDIR`] subdirectory.
    pub fn from_dir(dir: &Path, schema: &TableSchema) -> Result<Self> {
        let nested = dir.join(CLINICAL_SUBDIR);
        let base = if !dir.join(GLOBAL_SCORES_FILE).is_file() && nested.is_dir() {
            nested
        } else {
            dir.to_path_buf()
        };
        debug!("Reading clinical tables from {}", base.display());

        Self::from_files(
            &base.join(GLOBAL_SCORES_FILE),
            &base.join(DBT_OUTCOMES_FILE),
            &base.join(MRI_OUTCOMES_FILE),
            schema,
        )
    }

    /// Looks up the global scores of a subject
    ///
    /// # Errors
    ///
    /// Returns `TruthError::MissingSubject` if the subject has no row in the
    /// global score table. A present subject with two null scores is not an
    /// error.
    pub fn record(&self, subject: &str) -> Result<&ClinicalRecord> {
        self.records
            .get(subject)
            .ok_or_else(|| TruthError::MissingSubject(subject.to_string()))
    }

    /// Returns all outcome rows of a subject for one modality, in table order
    pub fn outcomes(&self, subject: &str, modality: Modality) -> &[OutcomeRow] {
        let table = match modality {
            Modality::Dbt => &self.dbt_outcomes,
            Modality::Mri => &self.mri_outcomes,
        };
        table.get(subject).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of subjects in the global score table
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_global_scores(
    data: &[u8],
    schema: &TableSchema,
) -> Result<HashMap<String, ClinicalRecord>> {
    let (index, rows) = read_table("global-scores", data, schema)?;
    let dbt_col = index.position(&schema.dbt_score_column)?;
    let mri_col = index.position(&schema.mri_score_column)?;

    let mut records = HashMap::new();
    for row in &rows {
        let subject = index.subject(row);
        if records.contains_key(subject) {
            warn!("Duplicate global score row for subject {}, keeping the first", subject);
            continue;
        }
        records.insert(
            subject.to_string(),
            ClinicalRecord {
                subject: subject.to_string(),
                dbt_score: parse_score(&row[dbt_col]),
                mri_score: parse_score(&row[mri_col]),
            },
        );
    }

    Ok(records)
}

fn parse_outcomes(
    data: &[u8],
    modality: Modality,
    schema: &TableSchema,
) -> Result<HashMap<String, Vec<OutcomeRow>>> {
    let (table, laterality_name, outcome_name) = match modality {
        Modality::Dbt => (
            "dbt-outcomes",
            &schema.dbt_laterality_column,
            &schema.dbt_outcome_column,
        ),
        Modality::Mri => (
            "mri-outcomes",
            &schema.mri_laterality_column,
            &schema.mri_outcome_column,
        ),
    };
    let (index, rows) = read_table(table, data, schema)?;
    let laterality_col = index.position(laterality_name)?;
    let outcome_col = index.position(outcome_name)?;

    let mut outcomes: HashMap<String, Vec<OutcomeRow>> = HashMap::new();
    for row in &rows {
        let subject = index.subject(row);
        outcomes
            .entry(subject.to_string())
            .or_default()
            .push(OutcomeRow {
                laterality_code: row[laterality_col].to_string(),
                outcome: row[outcome_col].to_string(),
            });
    }

    Ok(outcomes)
}

/// Parses a radiology score cell; empty or non-numeric cells are null
fn parse_score(cell: &str) -> Option<u8> {
    if cell.is_empty() {
        return None;
    }
    match cell.parse::<u8>() {
        Ok(score) => Some(score),
        Err(_) => {
            debug!("Ignoring non-numeric radiology score '{}'", cell);
            None
        }
    }
}
