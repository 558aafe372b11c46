use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Core Image Tags
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
pub const NUMBER_OF_FRAMES: Tag = Tag(0x0028, 0x0008);
pub const ROWS: Tag = Tag(0x0028, 0x0010);
pub const COLUMNS: Tag = Tag(0x0028, 0x0011);

// Functional Group Tags
pub const SHARED_FUNCTIONAL_GROUPS_SEQUENCE: Tag = Tag(0x5200, 0x9229);
pub const PIXEL_MEASURES_SEQUENCE: Tag = Tag(0x0028, 0x9110);
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);
pub const FRAME_ANATOMY_SEQUENCE: Tag = Tag(0x0020, 0x9071);
pub const FRAME_LATERALITY: Tag = Tag(0x0020, 0x9072);

// View Tags
pub const VIEW_CODE_SEQUENCE: Tag = Tag(0x0054, 0x0220);
pub const VIEW_MODIFIER_CODE_SEQUENCE: Tag = Tag(0x0054, 0x0222);
pub const CODE_MEANING: Tag = Tag(0x0008, 0x0104);

// Identification Tags
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get integer value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to i32
pub fn get_int_value(dcm: &InMemDicomObject, tag: Tag) -> Option<i32> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<i32>().ok())
}

/// Helper to get floating-point value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to f64
pub fn get_float_value(dcm: &InMemDicomObject, tag: Tag) -> Option<f64> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_float64().ok())
}

/// Returns the first item of a sequence element
pub fn first_item(dcm: &InMemDicomObject, tag: Tag) -> Option<&InMemDicomObject> {
    dcm.element(tag)
        .ok()
        .and_then(|seq| seq.items())
        .and_then(|items| items.first())
}

/// Follows the first item of each sequence in `path`
///
/// `nested_item(dcm, &[A, B])` is item `A[0] → B[0]`.
pub fn nested_item<'a>(dcm: &'a InMemDicomObject, path: &[Tag]) -> Option<&'a InMemDicomObject> {
    path.iter()
        .try_fold(dcm, |item, &tag| first_item(item, tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::value::{DataSetSequence, PrimitiveValue};
    use dicom_core::{DataElement, VR};

    #[test]
    fn test_tag_values() {
        assert_eq!(MODALITY, Tag(0x0008, 0x0060));
        assert_eq!(NUMBER_OF_FRAMES, Tag(0x0028, 0x0008));
        assert_eq!(FRAME_LATERALITY, Tag(0x0020, 0x9072));
        assert_eq!(SLICE_THICKNESS, Tag(0x0018, 0x0050));
    }

    #[test]
    fn test_nested_item() {
        let inner = InMemDicomObject::from_element_iter([DataElement::new(
            SLICE_THICKNESS,
            VR::DS,
            PrimitiveValue::from("1.0"),
        )]);
        let outer = InMemDicomObject::from_element_iter([DataElement::new(
            PIXEL_MEASURES_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![inner]),
        )]);
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            SHARED_FUNCTIONAL_GROUPS_SEQUENCE,
            VR::SQ,
            DataSetSequence::from(vec![outer]),
        ));

        let item = nested_item(
            &dcm,
            &[SHARED_FUNCTIONAL_GROUPS_SEQUENCE, PIXEL_MEASURES_SEQUENCE],
        )
        .unwrap();
        assert_eq!(get_float_value(item, SLICE_THICKNESS), Some(1.0));
        assert!(nested_item(&dcm, &[FRAME_ANATOMY_SEQUENCE]).is_none());
    }
}
