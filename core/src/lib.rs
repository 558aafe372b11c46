pub mod cli;
pub mod clinical;
pub mod error;
pub mod imaging;
pub mod mapping;
pub mod pipeline;
pub mod reconcile;
pub mod types;
pub mod volumes;

pub use clinical::{ClinicalIndex, ClinicalRecord, OutcomeRow, TableSchema};
pub use cli::report::TextReport;
pub use error::{Result, TruthError};
pub use imaging::ImagingRecord;
pub use mapping::{aggregation_key, LabelEntry, LabelMapping};
pub use pipeline::{build_label_mapping, label_records, reconcile_volumes};
pub use reconcile::{resolve_label, Findings, ModalityFindings, Reconciler};
pub use types::*;
pub use volumes::{VolumeEntry, VolumeTable};
