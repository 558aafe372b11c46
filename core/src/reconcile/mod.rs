//! Label reconciliation
//!
//! Matches a subject's clinical findings to the breast seen in an imaging
//! record, then combines the DBT and MRI findings into one label under an
//! [`AggregationOptions`](crate::AggregationOptions) policy.

mod aggregate;
mod gate;
mod vocabulary;

pub use aggregate::{combine, resolve_label, ACR_MALIGNANT_ABOVE, BIOPSY_REQUIRED_FROM};
pub use gate::{gate_modality, Findings, ModalityFindings, Reconciler};
pub use vocabulary::{classify_outcome, BENIGN_TERMS, MALIGNANT_TERMS};
