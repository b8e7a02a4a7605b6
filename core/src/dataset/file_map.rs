use crate::error::{BratsError, Result};
use crate::types::Modality;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Map from modality to the file holding that volume
pub type ModalityFileMap = HashMap<Modality, PathBuf>;

/// Resolves the volume files inside a patient directory
///
/// Lists the immediate entries of `patient_dir` (non-recursive) and
/// classifies each file name via [`Modality::classify`]. Files that do not
/// classify are skipped silently; a missing mapping entry is how the
/// caller learns a modality is absent. The map is recomputed on every
/// call, never cached.
///
/// # Errors
///
/// - [`BratsError::DirectoryNotFound`] if `patient_dir` does not exist or
///   is not a directory
/// - [`BratsError::DuplicateModality`] if two files classify to the same
///   modality
pub fn resolve_patient_files(patient_dir: &Path) -> Result<ModalityFileMap> {
    if !patient_dir.is_dir() {
        return Err(BratsError::DirectoryNotFound(patient_dir.to_path_buf()));
    }

    let mut files = ModalityFileMap::new();
    for entry in fs::read_dir(patient_dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(modality) = Modality::classify(&file_name.to_string_lossy()) else {
            continue;
        };
        if files.insert(modality, entry.path()).is_some() {
            return Err(BratsError::DuplicateModality {
                modality,
                dir: patient_dir.to_path_buf(),
            });
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    fn patient_fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "Brats18_2013_2_1_t1.nii.gz");
        touch(dir.path(), "Brats18_2013_2_1_t2.nii.gz");
        touch(dir.path(), "Brats18_2013_2_1_t1ce.nii.gz");
        touch(dir.path(), "Brats18_2013_2_1_flair.nii.gz");
        touch(dir.path(), "Brats18_2013_2_1_seg.nii.gz");
        dir
    }

    #[test]
    fn resolves_one_file_per_modality() {
        let dir = patient_fixture();
        let files = resolve_patient_files(dir.path()).unwrap();

        assert_eq!(files.len(), 5);
        for modality in Modality::ALL {
            let path = files.get(&modality).unwrap();
            assert_eq!(
                path,
                &dir.path()
                    .join(format!("Brats18_2013_2_1_{}.nii.gz", modality))
            );
        }
    }

    #[test]
    fn skips_unclassified_files() {
        let dir = patient_fixture();
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "survival.csv");

        let files = resolve_patient_files(dir.path()).unwrap();
        assert_eq!(files.len(), 5);
    }

    #[test]
    fn fails_on_duplicate_modality() {
        let dir = patient_fixture();
        touch(dir.path(), "extra_t1.nii.gz");

        let err = resolve_patient_files(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            BratsError::DuplicateModality {
                modality: Modality::T1,
                ..
            }
        ));
    }

    #[test]
    fn fails_on_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no_such_patient");

        let err = resolve_patient_files(&missing).unwrap_err();
        assert!(matches!(err, BratsError::DirectoryNotFound(_)));
    }

    #[test]
    fn fails_on_plain_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not_a_directory");
        File::create(&file).unwrap();

        let err = resolve_patient_files(&file).unwrap_err();
        assert!(matches!(err, BratsError::DirectoryNotFound(_)));
    }
}
