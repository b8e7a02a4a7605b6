use crate::error::{BratsError, Result};
use crate::types::IMAGE_SHAPE;
use ndarray::{Array3, Array4, Ix3};
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};
use std::path::Path;

/// One patient's volumes, loaded into memory
#[derive(Debug, Clone)]
pub struct Patient {
    /// Patient identifier (equal to the patient's directory name)
    pub id: String,
    /// Combined multi-modality tensor, `[4, 240, 240, 155]` in channel order
    pub mri: Array4<f32>,
    /// Segmentation label volume, `[240, 240, 155]`
    pub seg: Array3<i64>,
}

/// Source of per-patient volume data
///
/// The conversion pipeline only sees this trait. The NIfTI-backed
/// [`BratsDataset`](super::BratsDataset) is the production implementation;
/// tests substitute loaders producing synthetic arrays.
pub trait PatientLoader {
    /// Loads the volumes for one patient
    fn load(&self, id: &str) -> Result<Patient>;
}

/// Reads a single-modality volume and checks its geometry
pub(super) fn read_volume(path: &Path) -> Result<Array3<f32>> {
    let object = ReaderOptions::new().read_file(path)?;
    let volume = object.into_volume().into_ndarray::<f32>()?;

    let found = volume.shape().to_vec();
    let volume = volume
        .into_dimensionality::<Ix3>()
        .map_err(|_| unexpected_shape(path, &found))?;
    if volume.dim() != IMAGE_SHAPE {
        return Err(unexpected_shape(path, &found));
    }
    Ok(volume)
}

fn unexpected_shape(path: &Path, found: &[usize]) -> BratsError {
    BratsError::UnexpectedShape {
        path: path.to_path_buf(),
        found: found.to_vec(),
        expected: vec![IMAGE_SHAPE.0, IMAGE_SHAPE.1, IMAGE_SHAPE.2],
    }
}
