//! Data set discovery and per-patient volume access
//!
//! [`resolve_patient_files`] turns an unstructured patient directory into
//! a typed modality-to-file mapping; [`BratsDataset`] builds on it to
//! expose the training patients of one BraTS release as in-memory tensors.

mod file_map;
mod patient;

pub use file_map::{resolve_patient_files, ModalityFileMap};
pub use patient::{Patient, PatientLoader};

use crate::error::{BratsError, Result};
use crate::types::{Modality, MRI_SHAPE};
use log::debug;
use ndarray::{Array4, Axis};
use std::fs;
use std::path::{Path, PathBuf};

/// NIfTI-backed accessor for one BraTS training release
#[derive(Debug, Clone)]
pub struct BratsDataset {
    train_dir: PathBuf,
}

impl BratsDataset {
    /// Opens the data set rooted at `root` for the given release year
    ///
    /// When `root` contains a `BraTS<year>` subdirectory the patients are
    /// read from there; otherwise `root` itself is treated as the
    /// directory of patient directories.
    ///
    /// # Errors
    ///
    /// Returns [`BratsError::DirectoryNotFound`] if `root` is not a
    /// directory.
    pub fn open<P: AsRef<Path>>(root: P, year: u16) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(BratsError::DirectoryNotFound(root.to_path_buf()));
        }

        let year_dir = root.join(format!("BraTS{year}"));
        let train_dir = if year_dir.is_dir() {
            year_dir
        } else {
            root.to_path_buf()
        };
        debug!("BraTS training directory: {}", train_dir.display());
        Ok(Self { train_dir })
    }

    /// Directory the patients are read from
    pub fn train_dir(&self) -> &Path {
        &self.train_dir
    }

    /// Directory holding one patient's volume files
    pub fn patient_dir(&self, id: &str) -> PathBuf {
        self.train_dir.join(id)
    }

    /// The canonical patient id set
    ///
    /// Patient ids are the names of the immediate subdirectories of the
    /// training directory, sorted for a stable enumeration order. Plain
    /// files are ignored.
    pub fn patient_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.train_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                ids.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Loads one patient's volumes
    ///
    /// The four imaging volumes are stacked into the combined tensor in
    /// channel order; the segmentation volume is converted to integer
    /// labels.
    ///
    /// # Errors
    ///
    /// Fails with [`BratsError::MissingModality`] when the patient
    /// directory lacks one of the five volumes, and propagates resolution
    /// and read errors otherwise.
    pub fn patient(&self, id: &str) -> Result<Patient> {
        let dir = self.patient_dir(id);
        let files = resolve_patient_files(&dir)?;

        // Fail on absent modalities before reading any volume.
        let missing = |modality| BratsError::MissingModality {
            id: id.to_owned(),
            modality,
        };
        let mut channel_paths = Vec::with_capacity(Modality::MRI_CHANNELS.len());
        for modality in Modality::MRI_CHANNELS {
            channel_paths.push(files.get(&modality).ok_or_else(|| missing(modality))?);
        }
        let seg_path = files
            .get(&Modality::Seg)
            .ok_or_else(|| missing(Modality::Seg))?;

        let mut mri = Array4::zeros(MRI_SHAPE);
        for (channel, path) in channel_paths.into_iter().enumerate() {
            let volume = patient::read_volume(path)?;
            mri.index_axis_mut(Axis(0), channel).assign(&volume);
        }
        let seg = patient::read_volume(seg_path)?.mapv(|value| value as i64);

        Ok(Patient {
            id: id.to_owned(),
            mri,
            seg,
        })
    }
}

impl PatientLoader for BratsDataset {
    fn load(&self, id: &str) -> Result<Patient> {
        self.patient(id)
    }
}
