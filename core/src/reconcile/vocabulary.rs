use crate::types::BiopsyOutcome;

/// Outcome fragments that denote a benign finding
pub const BENIGN_TERMS: [&str; 6] = [
    "BIRADS 1",
    "BIRADS 2",
    "BIRADS 3",
    "Benign",
    "No biopsy",
    "BI-RADS score downgraded",
];

/// Outcome fragments that denote a malignant finding
pub const MALIGNANT_TERMS: [&str; 2] = ["Invasive", "DCIS"];

/// Classifies a free-text biopsy outcome by substring containment
///
/// Matching is case-sensitive. The benign vocabulary is checked first, so a
/// text containing terms from both lists is benign.
///
/// # Example
///
/// ```
/// use truthmap_core::reconcile::classify_outcome;
/// use truthmap_core::BiopsyOutcome;
///
/// assert_eq!(classify_outcome("Invasive lobular carcinoma"), BiopsyOutcome::Malignant);
/// assert_eq!(classify_outcome("Benign, previously DCIS"), BiopsyOutcome::Benign);
/// assert_eq!(classify_outcome("Lost to follow-up"), BiopsyOutcome::Unknown);
/// ```
pub fn classify_outcome(text: &str) -> BiopsyOutcome {
    if BENIGN_TERMS.iter().any(|term| text.contains(term)) {
        BiopsyOutcome::Benign
    } else if MALIGNANT_TERMS.iter().any(|term| text.contains(term)) {
        BiopsyOutcome::Malignant
    } else {
        BiopsyOutcome::Unknown
    }
}
