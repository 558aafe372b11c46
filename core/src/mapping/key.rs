use crate::imaging::ImagingRecord;
use crate::types::Scope;

/// Builds the aggregation key of an imaging record
///
/// - volume-wise: the volume identifier
/// - breast-wise: `{subject}_{study}_{LATERALITY}`
/// - patient-wise: `{subject}_{study}`
///
/// Returns `None` for a breast-wise key when the record has no laterality.
///
/// # Example
///
/// ```
/// use truthmap_core::{aggregation_key, ImagingRecord, Laterality, Scope};
///
/// let record = ImagingRecord::new("1.2.3", "EA1141-1001", "20190101", Some(Laterality::Right));
/// assert_eq!(
///     aggregation_key(&record, Scope::BreastWise).as_deref(),
///     Some("EA1141-1001_20190101_R")
/// );
/// ```
pub fn aggregation_key(record: &ImagingRecord, scope: Scope) -> Option<String> {
    match scope {
        Scope::VolumeWise => Some(record.volume_id.clone()),
        Scope::BreastWise => record.laterality.map(|laterality| {
            format!(
                "{}_{}_{}",
                record.subject,
                record.study_id,
                laterality.code().to_uppercase()
            )
        }),
        Scope::PatientWise => Some(format!("{}_{}", record.subject, record.study_id)),
    }
}
