use crate::clinical::{ClinicalIndex, OutcomeRow};
use crate::error::Result;
use crate::reconcile::vocabulary::classify_outcome;
use crate::types::{BiopsyOutcome, Laterality, Modality};
use log::debug;
use serde::{Deserialize, Serialize};

/// Radiology score and biopsy outcome of one modality after laterality gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModalityFindings {
    pub score: Option<u8>,
    pub biopsy: Option<BiopsyOutcome>,
}

/// Reconciled DBT and MRI findings for one imaging record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Findings {
    pub dbt: ModalityFindings,
    pub mri: ModalityFindings,
}

impl Findings {
    /// Returns the findings of one modality
    pub fn get(&self, modality: Modality) -> &ModalityFindings {
        match modality {
            Modality::Dbt => &self.dbt,
            Modality::Mri => &self.mri,
        }
    }
}

/// Derives laterality-gated findings from a [`ClinicalIndex`]
#[derive(Debug, Clone, Copy)]
pub struct Reconciler<'a> {
    index: &'a ClinicalIndex,
}

impl<'a> Reconciler<'a> {
    pub fn new(index: &'a ClinicalIndex) -> Self {
        Self { index }
    }

    /// Reconciles the clinical findings of a subject against one breast
    ///
    /// Each modality is gated independently, DBT first.
    ///
    /// # Errors
    ///
    /// Returns `TruthError::MissingSubject` if the subject is absent from the
    /// global score table.
    pub fn reconcile(&self, subject: &str, laterality: Option<Laterality>) -> Result<Findings> {
        let record = self.index.record(subject)?;
        let gate = |modality| {
            gate_modality(
                record.score(modality),
                self.index.outcomes(subject, modality),
                laterality,
            )
        };

        let findings = Findings {
            dbt: gate(Modality::Dbt),
            mri: gate(Modality::Mri),
        };
        debug!(
            "Subject {} ({:?}): {:?}",
            subject,
            laterality.map(|l| l.code()),
            findings
        );

        Ok(findings)
    }
}

/// Scans a subject's outcome rows for one modality
///
/// A row on the observed breast sets the biopsy outcome. A row on any other
/// breast, or any row when the imaging laterality is unknown, nulls both the
/// score and the outcome. Rows are applied in table order, so the last row
/// decides the outcome. A nulled score is never restored by a later matching
/// row. Without rows the global score is kept and the biopsy outcome stays
/// null.
pub fn gate_modality(
    global_score: Option<u8>,
    rows: &[OutcomeRow],
    laterality: Option<Laterality>,
) -> ModalityFindings {
    let mut findings = ModalityFindings {
        score: global_score,
        biopsy: None,
    };

    for row in rows {
        let on_breast = laterality.is_some_and(|l| l.matches_clinical_code(&row.laterality_code));
        if on_breast {
            findings.biopsy = Some(classify_outcome(&row.outcome));
        } else {
            findings = ModalityFindings::default();
        }
    }

    findings
}
