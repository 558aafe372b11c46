//! Core type definitions for label reconciliation
//!
//! This module provides the fundamental types used throughout the truthmap library:
//! - [`Modality`]: Clinical finding source (DBT or MRI)
//! - [`Laterality`]: Breast laterality as encoded in imaging metadata
//! - [`BiopsyOutcome`]: Classified free-text biopsy outcome
//! - [`Label`]: Resolved benign/malignant ground truth
//! - [`GroundTruthPolicy`]: Ground-truth definition (biopsy, acr4+)
//! - [`Scope`]: Aggregation key granularity
//! - [`AggregationOptions`]: Configuration for label aggregation

mod enums;
mod options;

pub use enums::{BiopsyOutcome, GroundTruthPolicy, Label, Laterality, Modality, Scope};
pub use options::AggregationOptions;
