//! Conversion of patients into compressed training records
//!
//! Each patient becomes one compressed NPZ archive holding the flattened
//! multi-modality tensor and the flattened segmentation volume as two
//! named arrays. Patients are independent, so the pipeline fans the work
//! out over a fixed-size worker pool; a failing patient never stops the
//! rest of the batch.

use crate::dataset::{Patient, PatientLoader};
use crate::error::{BratsError, Result};
use log::{error, info, warn};
use ndarray::Array1;
use ndarray_npy::NpzWriter;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use threadpool::ThreadPool;

/// Archive entry holding the flattened multi-modality tensor
pub const MRI_FEATURE: &str = "train/mri";

/// Archive entry holding the flattened segmentation volume
pub const SEG_FEATURE: &str = "train/seg";

/// Default number of conversion workers
pub const DEFAULT_POOL_SIZE: usize = 8;

/// Canonical record path for one patient
pub fn record_path(output_dir: &Path, id: &str) -> PathBuf {
    output_dir.join(format!("{id}.npz"))
}

/// Outcome of a conversion run
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Ids whose record was written
    pub converted: Vec<String>,
    /// Ids that failed, with the error that stopped each one
    pub failed: Vec<(String, BratsError)>,
}

impl ConversionReport {
    /// Returns whether every patient converted
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Serializes one patient into a compressed record file
///
/// Both tensors are flattened in row-major order and written as the named
/// arrays [`MRI_FEATURE`] (`f32`) and [`SEG_FEATURE`] (`i64`) of one
/// compressed archive. The archive is first written to a temporary
/// sibling path and renamed into place on success, so a failure never
/// leaves a truncated record behind; an existing record of the same name
/// is overwritten.
pub fn write_patient_record(patient: &Patient, output_dir: &Path) -> Result<PathBuf> {
    let final_path = record_path(output_dir, &patient.id);
    let tmp_path = output_dir.join(format!(".{}.npz.tmp", patient.id));

    let write = (|| -> Result<()> {
        let mut npz = NpzWriter::new_compressed(File::create(&tmp_path)?);
        let mri: Array1<f32> = patient.mri.iter().copied().collect();
        let seg: Array1<i64> = patient.seg.iter().copied().collect();
        npz.add_array(MRI_FEATURE, &mri)?;
        npz.add_array(SEG_FEATURE, &seg)?;
        npz.finish()?;
        Ok(())
    })();

    if let Err(e) = write {
        // Do not leave the partial archive around.
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, &final_path)?;
    Ok(final_path)
}

/// Converts a single patient end to end
pub fn convert_patient<L>(loader: &L, id: &str, output_dir: &Path) -> Result<PathBuf>
where
    L: PatientLoader + ?Sized,
{
    info!("converting patient {id}");
    let patient = loader.load(id)?;
    write_patient_record(&patient, output_dir)
}

/// Converts every patient in `ids`, fanning out over a worker pool
///
/// The output directory is created once, before any work is dispatched;
/// an existing directory is not an error. Each id is one unit of work,
/// processed start to finish by a single worker with no shared mutable
/// state beyond the output directory. A failing patient is logged with
/// its id and recorded in the report without disturbing the in-flight or
/// queued tasks. The pool size only affects throughput, never which
/// records are produced.
pub fn convert_all<L>(
    ids: &[String],
    loader: Arc<L>,
    output_dir: &Path,
    pool_size: usize,
) -> Result<ConversionReport>
where
    L: PatientLoader + Send + Sync + 'static,
{
    fs::create_dir_all(output_dir)?;

    let pool = ThreadPool::new(pool_size.max(1));
    let (sender, receiver) = mpsc::channel();

    for id in ids {
        let sender = sender.clone();
        let loader = Arc::clone(&loader);
        let id = id.clone();
        let output_dir = output_dir.to_path_buf();
        pool.execute(move || {
            let outcome = convert_patient(loader.as_ref(), &id, &output_dir);
            // The receiver only disappears when the caller gave up on the
            // whole run; there is nothing left to report the outcome to.
            let _ = sender.send((id, outcome));
        });
    }
    drop(sender);

    let mut report = ConversionReport::default();
    for (id, outcome) in receiver {
        match outcome {
            Ok(path) => {
                info!("wrote {}", path.display());
                report.converted.push(id);
            }
            Err(e) => {
                error!("patient {id} failed: {e}");
                report.failed.push((id, e));
            }
        }
    }

    if !report.is_complete() {
        warn!(
            "{} of {} patients failed to convert",
            report.failed.len(),
            ids.len()
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, Array4};
    use ndarray_npy::NpzReader;
    use rstest::rstest;
    use std::collections::HashSet;
    use tempfile::TempDir;

    /// Loader producing small deterministic volumes, failing on request
    struct SyntheticLoader {
        fail_ids: HashSet<String>,
    }

    impl SyntheticLoader {
        fn new() -> Self {
            Self {
                fail_ids: HashSet::new(),
            }
        }

        fn failing_on(id: &str) -> Self {
            Self {
                fail_ids: std::iter::once(id.to_owned()).collect(),
            }
        }
    }

    impl PatientLoader for SyntheticLoader {
        fn load(&self, id: &str) -> Result<Patient> {
            if self.fail_ids.contains(id) {
                return Err(BratsError::Nifti(format!("unreadable volume for {id}")));
            }
            let mri = Array4::from_shape_fn((2, 2, 2, 2), |(c, x, y, z)| {
                (c * 8 + x * 4 + y * 2 + z) as f32
            });
            let seg = Array3::from_shape_fn((2, 2, 2), |(x, y, z)| (x * 4 + y * 2 + z) as i64);
            Ok(Patient {
                id: id.to_owned(),
                mri,
                seg,
            })
        }
    }

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("patient_{i:02}")).collect()
    }

    #[test]
    fn record_round_trips_through_npz() {
        let dir = TempDir::new().unwrap();
        let loader = SyntheticLoader::new();

        let path = convert_patient(&loader, "patient_00", dir.path()).unwrap();
        assert_eq!(path, record_path(dir.path(), "patient_00"));

        let mut npz = NpzReader::new(File::open(&path).unwrap()).unwrap();
        let mri: Array1<f32> = npz.by_name(&format!("{MRI_FEATURE}.npy")).unwrap();
        let seg: Array1<i64> = npz.by_name(&format!("{SEG_FEATURE}.npy")).unwrap();

        assert_eq!(mri.len(), 16);
        assert_eq!(seg.len(), 8);
        // Row-major flattening preserves element order.
        assert_eq!(mri[0], 0.0);
        assert_eq!(mri[1], 1.0);
        assert_eq!(mri[15], 15.0);
        assert_eq!(seg[7], 7);
    }

    #[test]
    fn no_temporary_file_is_left_behind() {
        let dir = TempDir::new().unwrap();
        let loader = SyntheticLoader::new();

        convert_patient(&loader, "patient_00", dir.path()).unwrap();

        let leftovers: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(8)]
    fn pool_size_does_not_affect_outputs(#[case] pool_size: usize) {
        let dir = TempDir::new().unwrap();
        let all = ids(8);

        let report =
            convert_all(&all, Arc::new(SyntheticLoader::new()), dir.path(), pool_size).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.converted.len(), 8);
        for id in &all {
            assert!(record_path(dir.path(), id).is_file());
        }
    }

    #[test]
    fn one_failure_does_not_stop_the_batch() {
        let dir = TempDir::new().unwrap();
        let all = ids(5);
        let loader = Arc::new(SyntheticLoader::failing_on("patient_02"));

        let report = convert_all(&all, loader, dir.path(), 2).unwrap();

        assert_eq!(report.converted.len(), 4);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "patient_02");
        assert!(!record_path(dir.path(), "patient_02").exists());
        assert!(record_path(dir.path(), "patient_04").is_file());
    }

    #[test]
    fn output_directory_creation_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("records");
        let all = ids(2);

        convert_all(&all, Arc::new(SyntheticLoader::new()), &out, 2).unwrap();
        // The directory already exists on the second run; the records are
        // overwritten without error.
        let report = convert_all(&all, Arc::new(SyntheticLoader::new()), &out, 2).unwrap();

        assert!(report.is_complete());
        assert_eq!(report.converted.len(), 2);
    }
}
