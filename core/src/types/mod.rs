//! Core type definitions for the BraTS data set
//!
//! This module provides the fundamental types used throughout the bratskit
//! library:
//! - [`Modality`]: the closed set of per-patient volume kinds
//! - the volume geometry constants ([`IMAGE_SHAPE`], [`MRI_SHAPE`], ...)

mod modality;
mod volume;

pub use modality::Modality;
pub use volume::{IMAGE_LEN, IMAGE_SHAPE, MRI_CHANNEL_COUNT, MRI_LEN, MRI_SHAPE};
