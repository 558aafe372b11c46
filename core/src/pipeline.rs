//! Batch orchestration
//!
//! Records are processed strictly in order: later volumes with the same
//! aggregation key append to earlier ones.

use crate::clinical::ClinicalIndex;
use crate::error::Result;
use crate::imaging::ImagingRecord;
use crate::mapping::{aggregation_key, LabelMapping};
use crate::reconcile::{resolve_label, Reconciler};
use crate::types::AggregationOptions;
use crate::volumes::{VolumeEntry, VolumeTable};
use log::{debug, info, warn};

/// Reconciles imaging records against the clinical index
///
/// Records whose subject is missing from the clinical tables are skipped
/// with a warning; any other error aborts the batch.
pub fn reconcile_volumes<I>(records: I, index: &ClinicalIndex) -> Result<VolumeTable>
where
    I: IntoIterator<Item = ImagingRecord>,
{
    let reconciler = Reconciler::new(index);
    let mut table = VolumeTable::new();
    let mut skipped = 0usize;

    for record in records {
        match reconciler.reconcile(&record.subject, record.laterality) {
            Ok(findings) => {
                if table.insert(VolumeEntry::new(record, findings)).is_some() {
                    warn!("Duplicate volume id, replacing earlier entry");
                }
            }
            Err(e) if e.is_recoverable() => {
                warn!("Skipping volume {}: {}", record.volume_id, e);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Reconciled {} volumes ({} skipped for missing subjects)",
        table.len(),
        skipped
    );
    Ok(table)
}

/// Derives the keyed label mapping from reconciled volumes
///
/// Volumes without a resolvable label are left out, as are breast-wise
/// volumes without laterality.
pub fn build_label_mapping(table: &VolumeTable, options: &AggregationOptions) -> LabelMapping {
    let mut mapping = LabelMapping::new();
    let mut unlabelled = 0usize;

    for entry in table {
        let record = &entry.record;
        let Some(label) = resolve_label(&entry.findings(), options) else {
            debug!("No label for volume {}", record.volume_id);
            unlabelled += 1;
            continue;
        };
        let Some(key) = aggregation_key(record, options.scope) else {
            warn!(
                "Volume {} has no laterality, cannot key it {}",
                record.volume_id, options.scope
            );
            unlabelled += 1;
            continue;
        };
        mapping.push(&key, &record.volume_id, label);
    }

    info!(
        "Labelled {} volumes under {} {} keys ({} {}, {} left out)",
        mapping.volume_count(),
        mapping.len(),
        options.scope,
        options.policy,
        if options.dbt_only { "dbt-only" } else { "dbt+mri" },
        unlabelled
    );
    mapping
}

/// Reconciles and labels a batch of imaging records in one pass
pub fn label_records<I>(
    records: I,
    index: &ClinicalIndex,
    options: &AggregationOptions,
) -> Result<LabelMapping>
where
    I: IntoIterator<Item = ImagingRecord>,
{
    let table = reconcile_volumes(records, index)?;
    Ok(build_label_mapping(&table, options))
}
