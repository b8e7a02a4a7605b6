//! Volume geometry shared by every BraTS release.

/// Spatial shape of a single-modality volume (width, height, depth)
pub const IMAGE_SHAPE: (usize, usize, usize) = (240, 240, 155);

/// Number of imaging modalities stacked into the combined MRI tensor
pub const MRI_CHANNEL_COUNT: usize = 4;

/// Shape of the combined multi-modality tensor
///
/// The four imaging modalities are stacked along the leading axis in
/// channel order ([`Modality::channel`](super::Modality::channel)).
pub const MRI_SHAPE: (usize, usize, usize, usize) = (
    MRI_CHANNEL_COUNT,
    IMAGE_SHAPE.0,
    IMAGE_SHAPE.1,
    IMAGE_SHAPE.2,
);

/// Element count of one flattened single-modality volume
pub const IMAGE_LEN: usize = IMAGE_SHAPE.0 * IMAGE_SHAPE.1 * IMAGE_SHAPE.2;

/// Element count of the flattened multi-modality tensor
pub const MRI_LEN: usize = MRI_CHANNEL_COUNT * IMAGE_LEN;
