use crate::types::Modality;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for bratskit operations
pub type Result<T> = std::result::Result<T, BratsError>;

/// Error types for bratskit operations
#[derive(Error, Debug)]
pub enum BratsError {
    /// Path is missing or not a directory
    #[error("Not a directory: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Two files in one patient directory classify to the same modality
    #[error("Duplicate {} volume in {}", .modality, .dir.display())]
    DuplicateModality { modality: Modality, dir: PathBuf },

    /// A required volume is absent from a patient directory
    #[error("Patient {id} has no {modality} volume")]
    MissingModality { id: String, modality: Modality },

    /// Volume does not have the expected geometry
    #[error("{}: volume shape {:?} does not match expected {:?}", .path.display(), .found, .expected)]
    UnexpectedShape {
        path: PathBuf,
        found: Vec<usize>,
        expected: Vec<usize>,
    },

    /// More held-out ids requested than the data set provides
    #[error("Requested {requested} held-out ids but only {available} are available")]
    InsufficientIds { requested: usize, available: usize },

    /// NIfTI reading error
    #[error("NIfTI error: {0}")]
    Nifti(String),

    /// Record serialization error
    #[error("Record error: {0}")]
    Record(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// Convert nifti-rs errors
impl From<nifti::NiftiError> for BratsError {
    fn from(e: nifti::NiftiError) -> Self {
        BratsError::Nifti(format!("{}", e))
    }
}

// Convert record archive errors
impl From<ndarray_npy::WriteNpzError> for BratsError {
    fn from(e: ndarray_npy::WriteNpzError) -> Self {
        BratsError::Record(format!("{}", e))
    }
}
