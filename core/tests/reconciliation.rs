use tempfile::TempDir;
use truthmap_core::{
    build_label_mapping, label_records, reconcile_volumes, AggregationOptions, BiopsyOutcome,
    ClinicalIndex, GroundTruthPolicy, ImagingRecord, Label, LabelMapping, Laterality, Scope,
    TableSchema, TruthError, VolumeTable,
};

const SUBJECT: &str = "EA1141-1001";
const STUDY: &str = "20190101";

fn global_table(dbt: &str, mri: &str) -> String {
    format!(
        "CASE,TOMO_BIRADS_YR0,MRI_BIRADS_YR0,Subject_DE\n1,{},{},{}\n",
        dbt, mri, SUBJECT
    )
}

const EMPTY_DBT: &str = "TOMO_LESIONBREAST_YR0,TOMO_LESIONOUTCOME_YR0,Subject_DE\n";
const EMPTY_MRI: &str = "MRI_LESIONBREAST_YR0,MRI_LESIONOUTCOME_YR0,Subject_DE\n";

fn right_volume(volume_id: &str) -> ImagingRecord {
    ImagingRecord::new(volume_id, SUBJECT, STUDY, Some(Laterality::Right))
}

fn acr4plus_dbt_only() -> AggregationOptions {
    AggregationOptions::parse("acr4+", "volume-wise", true, true).unwrap()
}

#[test]
fn dbt_dominant_case_is_malignant() {
    let index = ClinicalIndex::from_tables(
        &global_table("4", "2"),
        EMPTY_DBT,
        EMPTY_MRI,
        &TableSchema::default(),
    )
    .unwrap();

    let mapping = label_records(vec![right_volume("1.2.3")], &index, &acr4plus_dbt_only()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&mapping.to_json_string().unwrap()).unwrap();

    assert_eq!(json["1.2.3"]["uids"], serde_json::json!(["1.2.3"]));
    assert_eq!(json["1.2.3"]["truth"], serde_json::json!([[0, 1]]));
}

#[test]
fn mri_dominant_case_is_discarded() {
    let index = ClinicalIndex::from_tables(
        &global_table("2", "4"),
        EMPTY_DBT,
        EMPTY_MRI,
        &TableSchema::default(),
    )
    .unwrap();

    let mapping = label_records(vec![right_volume("1.2.3")], &index, &acr4plus_dbt_only()).unwrap();
    assert!(mapping.is_empty());
    assert_eq!(mapping.to_json_string().unwrap(), "{}");
}

#[test]
fn low_score_biopsy_case_is_benign_regardless_of_text() {
    let dbt = format!(
        "TOMO_LESIONBREAST_YR0,TOMO_LESIONOUTCOME_YR0,Subject_DE\n1,Invasive carcinoma,{}\n",
        SUBJECT
    );
    let index = ClinicalIndex::from_tables(
        &global_table("2", "1"),
        &dbt,
        EMPTY_MRI,
        &TableSchema::default(),
    )
    .unwrap();

    let options = AggregationOptions::parse("biopsy", "volume-wise", true, true).unwrap();
    let mapping = label_records(vec![right_volume("1.2.3")], &index, &options).unwrap();
    assert_eq!(mapping.get("1.2.3").unwrap().truth, vec![Label::Benign]);
}

#[test]
fn breast_wise_key_format() {
    let index = ClinicalIndex::from_tables(
        &global_table("5", "3"),
        EMPTY_DBT,
        EMPTY_MRI,
        &TableSchema::default(),
    )
    .unwrap();

    let options = acr4plus_dbt_only().with_scope(Scope::BreastWise);
    let mapping = label_records(
        vec![right_volume("1.2.3"), right_volume("1.2.4")],
        &index,
        &options,
    )
    .unwrap();

    let entry = mapping.get("EA1141-1001_20190101_R").unwrap();
    assert_eq!(entry.uids, vec!["1.2.3", "1.2.4"]);
    assert_eq!(entry.truth, vec![Label::Malignant, Label::Malignant]);
}

#[test]
fn mismatching_last_row_poisons_modality() {
    let dbt = format!(
        "TOMO_LESIONBREAST_YR0,TOMO_LESIONOUTCOME_YR0,Subject_DE\n\
         1,Invasive ductal carcinoma,{s}\n\
         2,Benign,{s}\n",
        s = SUBJECT
    );
    let index = ClinicalIndex::from_tables(
        &global_table("5", "1"),
        &dbt,
        EMPTY_MRI,
        &TableSchema::default(),
    )
    .unwrap();

    let table = reconcile_volumes(vec![right_volume("1.2.3")], &index).unwrap();
    let entry = table.get("1.2.3").unwrap();
    assert_eq!(entry.dbt_score, None);
    assert_eq!(entry.dbt_outcome, None);
    assert_eq!(entry.mri_score, Some(1));

    let mapping = build_label_mapping(&table, &acr4plus_dbt_only());
    assert!(mapping.is_empty());
}

#[test]
fn matching_row_after_mismatch_keeps_score_null() {
    let dbt = format!(
        "TOMO_LESIONBREAST_YR0,TOMO_LESIONOUTCOME_YR0,Subject_DE\n\
         2,Benign,{s}\n\
         1,DCIS,{s}\n",
        s = SUBJECT
    );
    let index = ClinicalIndex::from_tables(
        &global_table("5", "1"),
        &dbt,
        EMPTY_MRI,
        &TableSchema::default(),
    )
    .unwrap();

    let table = reconcile_volumes(vec![right_volume("1.2.3")], &index).unwrap();
    let entry = table.get("1.2.3").unwrap();
    assert_eq!(entry.dbt_score, None);
    assert_eq!(entry.dbt_outcome, Some(BiopsyOutcome::Malignant));

    let mapping = build_label_mapping(&table, &AggregationOptions::default());
    assert!(mapping.is_empty());
}

#[test]
fn reordered_columns_give_identical_labels() {
    let reordered_global = format!(
        "MRI_BIRADS_YR0,CASE,TOMO_BIRADS_YR0,Subject_DE\n3,1,5,{}\n",
        SUBJECT
    );
    let dbt = format!(
        "TOMO_LESIONOUTCOME_YR0,TOMO_LESIONBREAST_YR0,Subject_DE\nDCIS,1,{}\n",
        SUBJECT
    );
    let options = AggregationOptions::default();

    let original = ClinicalIndex::from_tables(
        &global_table("5", "3"),
        &format!(
            "TOMO_LESIONBREAST_YR0,TOMO_LESIONOUTCOME_YR0,Subject_DE\n1,DCIS,{}\n",
            SUBJECT
        ),
        EMPTY_MRI,
        &TableSchema::default(),
    )
    .unwrap();
    let reordered =
        ClinicalIndex::from_tables(&reordered_global, &dbt, EMPTY_MRI, &TableSchema::default())
            .unwrap();

    let a = label_records(vec![right_volume("1.2.3")], &original, &options).unwrap();
    let b = label_records(vec![right_volume("1.2.3")], &reordered, &options).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.get("1.2.3").unwrap().truth, vec![Label::Malignant]);
}

#[test]
fn missing_required_column_aborts() {
    let global = format!("TOMO_BIRADS_YR0,Subject_DE\n4,{}\n", SUBJECT);
    let err =
        ClinicalIndex::from_tables(&global, EMPTY_DBT, EMPTY_MRI, &TableSchema::default())
            .unwrap_err();
    assert!(matches!(err, TruthError::Schema { ref column, .. } if column == "MRI_BIRADS_YR0"));
}

#[test]
fn volume_table_file_feeds_every_configuration() {
    let temp_dir = TempDir::new().unwrap();
    let volumes_path = temp_dir.path().join("volumes.json");
    let labels_path = temp_dir.path().join("labels.json");

    let index = ClinicalIndex::from_tables(
        &global_table("4", "5"),
        EMPTY_DBT,
        EMPTY_MRI,
        &TableSchema::default(),
    )
    .unwrap();
    let records = vec![
        right_volume("1.2.3"),
        ImagingRecord::new("1.2.4", SUBJECT, STUDY, Some(Laterality::Left)),
    ];
    reconcile_volumes(records, &index)
        .unwrap()
        .write_json(&volumes_path)
        .unwrap();

    let table = VolumeTable::read_json(&volumes_path).unwrap();
    assert_eq!(table.len(), 2);

    // MRI outranks DBT: dropped with mri_excluded, kept from DBT without it
    let excluded = build_label_mapping(&table, &acr4plus_dbt_only());
    assert!(excluded.is_empty());

    let options = AggregationOptions::default()
        .with_policy(GroundTruthPolicy::Acr4Plus)
        .with_scope(Scope::PatientWise)
        .dbt_only(false);
    let mapping = build_label_mapping(&table, &options);
    mapping.write_json(&labels_path).unwrap();

    let loaded = LabelMapping::read_json(&labels_path).unwrap();
    let entry = loaded.get("EA1141-1001_20190101").unwrap();
    assert_eq!(entry.uids, vec!["1.2.3", "1.2.4"]);
    assert_eq!(entry.truth, vec![Label::Malignant, Label::Malignant]);
}
