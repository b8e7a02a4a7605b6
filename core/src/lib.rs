pub mod cli;
pub mod convert;
pub mod dataset;
pub mod error;
pub mod partition;
pub mod types;

pub use convert::{convert_all, convert_patient, ConversionReport, DEFAULT_POOL_SIZE};
pub use dataset::{resolve_patient_files, BratsDataset, ModalityFileMap, Patient, PatientLoader};
pub use error::{BratsError, Result};
pub use partition::{plan_partition, write_partition, Partition};
pub use types::*;
