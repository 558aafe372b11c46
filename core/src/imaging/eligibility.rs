use crate::imaging::tags::{
    get_float_value, get_int_value, get_string_value, nested_item, CODE_MEANING, MODALITY,
    NUMBER_OF_FRAMES, PIXEL_MEASURES_SEQUENCE, SERIES_DESCRIPTION,
    SHARED_FUNCTIONAL_GROUPS_SEQUENCE, SLICE_THICKNESS, VIEW_CODE_SEQUENCE,
    VIEW_MODIFIER_CODE_SEQUENCE,
};
use dicom_object::InMemDicomObject;
use std::fmt;

/// Slice thickness (mm) of slabbed reconstructions, which are excluded
pub const SLAB_THICKNESS_MM: i64 = 10;

/// Reason a DICOM object is not an eligible DBT volume
#[derive(Debug, Clone, PartialEq)]
pub enum Ineligible {
    /// Modality is not MG
    Modality(Option<String>),
    /// Single-frame image
    NotVolume(i32),
    /// Projection series (raw DBT projections)
    Projection,
    /// Slabbed reconstruction
    Slab(f64),
    /// Spot compression view
    SpotCompression,
}

impl fmt::Display for Ineligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ineligible::Modality(m) => {
                write!(f, "modality {}", m.as_deref().unwrap_or("missing"))
            }
            Ineligible::NotVolume(frames) => write!(f, "{} frame(s), not a volume", frames),
            Ineligible::Projection => write!(f, "projection series"),
            Ineligible::Slab(thickness) => write!(f, "slab of {} mm", thickness),
            Ineligible::SpotCompression => write!(f, "spot compression view"),
        }
    }
}

/// Checks that a DICOM object is a reconstructed DBT volume
///
/// # Algorithm
///
/// 1. Modality must be "MG"
/// 2. NumberOfFrames > 1
/// 3. SeriesDescription must not contain "Projection"
/// 4. Shared SliceThickness, truncated to whole mm, must not be 10 (a missing
///    value passes)
/// 5. First view modifier must not be exactly "Spot Compression"
pub fn check_eligibility(dcm: &InMemDicomObject) -> Result<(), Ineligible> {
    let modality = get_string_value(dcm, MODALITY);
    if modality.as_deref() != Some("MG") {
        return Err(Ineligible::Modality(modality));
    }

    let frames = get_int_value(dcm, NUMBER_OF_FRAMES).unwrap_or(1);
    if frames <= 1 {
        return Err(Ineligible::NotVolume(frames));
    }

    if get_string_value(dcm, SERIES_DESCRIPTION)
        .unwrap_or_default()
        .contains("Projection")
    {
        return Err(Ineligible::Projection);
    }

    if let Some(thickness) = slice_thickness(dcm) {
        if thickness.trunc() as i64 == SLAB_THICKNESS_MM {
            return Err(Ineligible::Slab(thickness));
        }
    }

    if view_modifier(dcm).as_deref() == Some("Spot Compression") {
        return Err(Ineligible::SpotCompression);
    }

    Ok(())
}

/// SharedFunctionalGroupsSequence[0] → PixelMeasuresSequence[0] → SliceThickness
fn slice_thickness(dcm: &InMemDicomObject) -> Option<f64> {
    nested_item(
        dcm,
        &[SHARED_FUNCTIONAL_GROUPS_SEQUENCE, PIXEL_MEASURES_SEQUENCE],
    )
    .and_then(|item| get_float_value(item, SLICE_THICKNESS))
}

/// ViewCodeSequence[0] → ViewModifierCodeSequence[0] → CodeMeaning
fn view_modifier(dcm: &InMemDicomObject) -> Option<String> {
    nested_item(dcm, &[VIEW_CODE_SEQUENCE, VIEW_MODIFIER_CODE_SEQUENCE])
        .and_then(|item| get_string_value(item, CODE_MEANING))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::value::{DataSetSequence, PrimitiveValue};
    use dicom_core::{DataElement, VR};
    use rstest::rstest;

    fn volume() -> InMemDicomObject {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("MG")));
        dcm.put(DataElement::new(
            NUMBER_OF_FRAMES,
            VR::IS,
            PrimitiveValue::from("60"),
        ));
        dcm.put(DataElement::new(
            SERIES_DESCRIPTION,
            VR::LO,
            PrimitiveValue::from("R CC Tomosynthesis Reconstruction"),
        ));
        dcm
    }

    fn sequence(tag: dicom_core::Tag, item: InMemDicomObject) -> DataElement<InMemDicomObject> {
        DataElement::new(tag, VR::SQ, DataSetSequence::from(vec![item]))
    }

    fn with_slice_thickness(mut dcm: InMemDicomObject, thickness: &str) -> InMemDicomObject {
        let measures = InMemDicomObject::from_element_iter([DataElement::new(
            SLICE_THICKNESS,
            VR::DS,
            PrimitiveValue::from(thickness),
        )]);
        let shared =
            InMemDicomObject::from_element_iter([sequence(PIXEL_MEASURES_SEQUENCE, measures)]);
        dcm.put(sequence(SHARED_FUNCTIONAL_GROUPS_SEQUENCE, shared));
        dcm
    }

    #[test]
    fn test_eligible_volume() {
        assert_eq!(check_eligibility(&volume()), Ok(()));
        assert_eq!(check_eligibility(&with_slice_thickness(volume(), "1")), Ok(()));
    }

    #[test]
    fn test_wrong_modality() {
        let mut dcm = volume();
        dcm.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("MR")));
        assert_eq!(
            check_eligibility(&dcm),
            Err(Ineligible::Modality(Some("MR".to_string())))
        );
    }

    #[test]
    fn test_single_frame() {
        let mut dcm = volume();
        dcm.put(DataElement::new(
            NUMBER_OF_FRAMES,
            VR::IS,
            PrimitiveValue::from("1"),
        ));
        assert_eq!(check_eligibility(&dcm), Err(Ineligible::NotVolume(1)));
    }

    #[test]
    fn test_projection_series() {
        let mut dcm = volume();
        dcm.put(DataElement::new(
            SERIES_DESCRIPTION,
            VR::LO,
            PrimitiveValue::from("L MLO Tomosynthesis Projection"),
        ));
        assert_eq!(check_eligibility(&dcm), Err(Ineligible::Projection));
    }

    #[test]
    fn test_slab_excluded() {
        let dcm = with_slice_thickness(volume(), "10");
        assert_eq!(check_eligibility(&dcm), Err(Ineligible::Slab(10.0)));
    }

    #[rstest]
    #[case("Spot Compression", Err(Ineligible::SpotCompression))]
    #[case("spot compression", Ok(()))]
    #[case("Magnification", Ok(()))]
    fn test_view_modifier(#[case] meaning: &str, #[case] expected: Result<(), Ineligible>) {
        let mut dcm = volume();
        let modifier = InMemDicomObject::from_element_iter([DataElement::new(
            CODE_MEANING,
            VR::LO,
            PrimitiveValue::from(meaning),
        )]);
        let view = InMemDicomObject::from_element_iter([sequence(
            VIEW_MODIFIER_CODE_SEQUENCE,
            modifier,
        )]);
        dcm.put(sequence(VIEW_CODE_SEQUENCE, view));

        assert_eq!(check_eligibility(&dcm), expected);
    }
}
