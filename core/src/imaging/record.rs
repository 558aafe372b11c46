use crate::error::{Result, TruthError};
use crate::imaging::tags::{
    get_int_value, get_string_value, nested_item, COLUMNS, FRAME_ANATOMY_SEQUENCE,
    FRAME_LATERALITY, NUMBER_OF_FRAMES, PATIENT_ID, ROWS, SERIES_DESCRIPTION,
    SERIES_INSTANCE_UID, SHARED_FUNCTIONAL_GROUPS_SEQUENCE, SOP_INSTANCE_UID, STUDY_INSTANCE_UID,
};
use crate::types::Laterality;
use dicom_object::InMemDicomObject;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder substituted for the image root in stored paths
pub const ROOT_PLACEHOLDER: &str = "$ROOT$";

/// One eligible imaging volume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagingRecord {
    /// SOP Instance UID; the volume-wise key
    pub volume_id: String,

    /// Subject identifier used to query the clinical tables
    pub subject: String,

    /// Study directory name (the study date)
    pub study_id: String,

    /// Frame laterality, if present
    pub laterality: Option<Laterality>,

    #[serde(default)]
    pub patient_id: Option<String>,

    #[serde(default)]
    pub study_instance_uid: Option<String>,

    #[serde(default)]
    pub series_instance_uid: Option<String>,

    #[serde(default)]
    pub series_description: Option<String>,

    /// Volume shape as (frames, rows, columns)
    #[serde(default)]
    pub image_shape: Option<[u32; 3]>,

    /// File path with the image root replaced by `$ROOT$`
    #[serde(default)]
    pub image_path: Option<String>,
}

impl ImagingRecord {
    /// Creates a record with only the fields used for reconciliation
    pub fn new(
        volume_id: &str,
        subject: &str,
        study_id: &str,
        laterality: Option<Laterality>,
    ) -> Self {
        Self {
            volume_id: volume_id.to_string(),
            subject: subject.to_string(),
            study_id: study_id.to_string(),
            laterality,
            patient_id: None,
            study_instance_uid: None,
            series_instance_uid: None,
            series_description: None,
            image_shape: None,
            image_path: None,
        }
    }

    /// Creates a record from an opened DICOM object
    ///
    /// The study identifier is the name of the file's parent directory.
    ///
    /// # Errors
    ///
    /// Returns `TruthError::InvalidValue` if SOPInstanceUID or PatientID is
    /// missing.
    pub fn from_dicom(path: &Path, image_root: &Path, dcm: &InMemDicomObject) -> Result<Self> {
        let volume_id = get_string_value(dcm, SOP_INSTANCE_UID)
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| {
                TruthError::InvalidValue(format!("{}: missing SOPInstanceUID", path.display()))
            })?;
        let patient_id = get_string_value(dcm, PATIENT_ID)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                TruthError::InvalidValue(format!("{}: missing PatientID", path.display()))
            })?;
        let study_id = path
            .parent()
            .and_then(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            volume_id,
            subject: subject_from_patient_id(&patient_id).to_string(),
            study_id,
            laterality: frame_laterality(dcm).and_then(|l| Laterality::from_str(&l)),
            patient_id: Some(patient_id),
            study_instance_uid: get_string_value(dcm, STUDY_INSTANCE_UID),
            series_instance_uid: get_string_value(dcm, SERIES_INSTANCE_UID),
            series_description: get_string_value(dcm, SERIES_DESCRIPTION),
            image_shape: image_shape(dcm),
            image_path: Some(rooted_path(path, image_root)),
        })
    }
}

/// Subject identifier: the last `-`-separated segment of the PatientID
pub fn subject_from_patient_id(patient_id: &str) -> &str {
    patient_id.rsplit('-').next().unwrap_or(patient_id)
}

/// SharedFunctionalGroupsSequence[0] → FrameAnatomySequence[0] → FrameLaterality
fn frame_laterality(dcm: &InMemDicomObject) -> Option<String> {
    nested_item(
        dcm,
        &[SHARED_FUNCTIONAL_GROUPS_SEQUENCE, FRAME_ANATOMY_SEQUENCE],
    )
    .and_then(|item| get_string_value(item, FRAME_LATERALITY))
}

fn image_shape(dcm: &InMemDicomObject) -> Option<[u32; 3]> {
    let frames = get_int_value(dcm, NUMBER_OF_FRAMES)?;
    let rows = get_int_value(dcm, ROWS)?;
    let columns = get_int_value(dcm, COLUMNS)?;
    Some([
        u32::try_from(frames).ok()?,
        u32::try_from(rows).ok()?,
        u32::try_from(columns).ok()?,
    ])
}

/// Renders `path` relative to `image_root` as `$ROOT$/a/b/c.dcm`
fn rooted_path(path: &Path, image_root: &Path) -> String {
    match path.strip_prefix(image_root) {
        Ok(relative) => {
            let parts: Vec<_> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            format!("{}/{}", ROOT_PLACEHOLDER, parts.join("/"))
        }
        Err(_) => path.display().to_string(),
    }
}
