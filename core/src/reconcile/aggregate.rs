use crate::reconcile::gate::Findings;
use crate::types::{AggregationOptions, GroundTruthPolicy, Label};

/// Scores above this value are malignant under the acr4+ policy
pub const ACR_MALIGNANT_ABOVE: u8 = 3;

/// Scores below this value are benign under the biopsy policy without
/// consulting biopsy outcomes
pub const BIOPSY_REQUIRED_FROM: u8 = 3;

/// Combines a DBT and an MRI value under the modality flags
///
/// | `dbt_only` | `mri_excluded` | result                              |
/// |------------|----------------|-------------------------------------|
/// | false      | any            | `max(dbt, mri)`                     |
/// | true       | true           | `dbt`, or `None` when `mri > dbt`   |
/// | true       | false          | `dbt`                               |
///
/// # Example
///
/// ```
/// use truthmap_core::reconcile::combine;
///
/// assert_eq!(combine(2, 4, false, true), Some(4));
/// assert_eq!(combine(2, 4, true, true), None);
/// assert_eq!(combine(2, 4, true, false), Some(2));
/// ```
pub fn combine<T: Ord + Copy>(dbt: T, mri: T, dbt_only: bool, mri_excluded: bool) -> Option<T> {
    match (dbt_only, mri_excluded) {
        (false, _) => Some(dbt.max(mri)),
        (true, true) if mri > dbt => None,
        (true, _) => Some(dbt),
    }
}

/// Resolves the ground-truth label of one imaging record
///
/// Returns `None` when no label can be assigned: a null radiology score in
/// either modality, a discarded MRI-dominant case, or (biopsy policy) no
/// usable biopsy outcome in either modality.
pub fn resolve_label(findings: &Findings, options: &AggregationOptions) -> Option<Label> {
    let (dbt_score, mri_score) = (findings.dbt.score?, findings.mri.score?);
    let global_score = combine(dbt_score, mri_score, options.dbt_only, options.mri_excluded)?;

    match options.policy {
        GroundTruthPolicy::Acr4Plus => Some(if global_score > ACR_MALIGNANT_ABOVE {
            Label::Malignant
        } else {
            Label::Benign
        }),
        GroundTruthPolicy::Biopsy => {
            if global_score < BIOPSY_REQUIRED_FROM {
                return Some(Label::Benign);
            }
            biopsy_label(findings, options)
        }
    }
}

/// Combines the biopsy decisions of both modalities
///
/// A modality without a decision counts as benign once the other modality
/// has one.
fn biopsy_label(findings: &Findings, options: &AggregationOptions) -> Option<Label> {
    let dbt = findings.dbt.biopsy.and_then(|b| b.decision());
    let mri = findings.mri.biopsy.and_then(|b| b.decision());
    if dbt.is_none() && mri.is_none() {
        return None;
    }

    combine(
        dbt.unwrap_or(Label::Benign),
        mri.unwrap_or(Label::Benign),
        options.dbt_only,
        options.mri_excluded,
    )
}
