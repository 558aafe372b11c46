//! Imaging volume discovery
//!
//! Locates each patient's first DBT study, filters reconstructed volumes,
//! and extracts the [`ImagingRecord`] fields needed for reconciliation.
//! Pixel data is never decoded.

pub mod eligibility;
pub mod record;
pub mod scan;
pub mod tags;

pub use eligibility::{check_eligibility, Ineligible};
pub use record::{subject_from_patient_id, ImagingRecord, ROOT_PLACEHOLDER};
pub use scan::{collect_dicom_files, enumerate_volumes, find_first_study_files, is_dicom_file};
