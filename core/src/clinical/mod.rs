//! Clinical table indexing
//!
//! Parses the global radiology-score table and the per-modality biopsy
//! outcome tables into a read-only [`ClinicalIndex`] keyed by subject.

mod index;
mod schema;

pub use index::{
    ClinicalIndex, ClinicalRecord, OutcomeRow, CLINICAL_SUBDIR, DBT_OUTCOMES_FILE,
    GLOBAL_SCORES_FILE, MRI_OUTCOMES_FILE,
};
pub use schema::{
    read_table, ColumnIndex, TableSchema, MRI_BIRADS, MRI_LESION_BREAST, MRI_LESION_OUTCOME,
    TOMO_BIRADS, TOMO_LESION_BREAST, TOMO_LESION_OUTCOME,
};
