use crate::error::Result;
use crate::imaging::eligibility::check_eligibility;
use crate::imaging::record::ImagingRecord;
use dicom_object::open_file;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Lists the DICOM files of each patient's first study
///
/// Expects `<root>/<patient>/<study>/<file>`. For each patient only the study
/// directory with the smallest name (the earliest study date) is used.
/// Patients and files are returned in name order.
pub fn find_first_study_files(image_root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for patient_dir in sorted_entries(image_root)? {
        if !patient_dir.is_dir() {
            continue;
        }
        let first_study = sorted_entries(&patient_dir)?
            .into_iter()
            .find(|path| path.is_dir());

        match first_study {
            Some(study_dir) => {
                debug!("Using study {}", study_dir.display());
                files.extend(collect_dicom_files(&study_dir)?);
            }
            None => debug!("No study directory under {}", patient_dir.display()),
        }
    }

    Ok(files)
}

/// Opens every file of each patient's first study and keeps eligible DBT volumes
///
/// Unreadable files and files without the identifiers a record needs are
/// skipped with a warning.
pub fn enumerate_volumes(image_root: &Path) -> Result<Vec<ImagingRecord>> {
    let files = find_first_study_files(image_root)?;
    info!("Found {} DICOM files", files.len());

    let mut records = Vec::new();
    for (i, path) in files.iter().enumerate() {
        debug!("{}/{}: {}", i + 1, files.len(), path.display());

        match read_volume(path, image_root) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    info!("Kept {} eligible volumes", records.len());
    Ok(records)
}

/// Reads one file, returning `None` for ineligible objects
fn read_volume(path: &Path, image_root: &Path) -> Result<Option<ImagingRecord>> {
    let dcm = open_file(path)?;

    if let Err(reason) = check_eligibility(&dcm) {
        debug!("Ineligible {}: {}", path.display(), reason);
        return Ok(None);
    }

    ImagingRecord::from_dicom(path, image_root, &dcm).map(Some)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

/// Lists DICOM files directly inside a directory, in name order
///
/// Accepts `.dcm`/`.dicom` extensions (any case) and extensionless files
/// carrying the DICOM preamble.
pub fn collect_dicom_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in sorted_entries(directory)? {
        if !path.is_file() {
            continue;
        }
        match path.extension() {
            Some(ext) => {
                if ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom") {
                    files.push(path);
                }
            }
            None => {
                if is_dicom_file(&path) {
                    debug!("Found headerless DICOM file: {}", path.display());
                    files.push(path);
                }
            }
        }
    }

    Ok(files)
}

/// Checks for the "DICM" magic after the 128-byte preamble
pub fn is_dicom_file(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut buffer = [0u8; 132];
    match file.read_exact(&mut buffer) {
        Ok(()) => &buffer[128..132] == b"DICM",
        Err(_) => false,
    }
}
