use std::fmt;

/// Image modality classification
///
/// The five kinds of per-patient volumes stored in a BraTS patient
/// directory (T1, T2, T1CE, FLAIR, and the segmentation map). The
/// segmentation map is not an image in the strict sense, but it is stored
/// in the data set as another file just as though it were one, so it is a
/// member of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    T1,
    T2,
    T1ce,
    Flair,
    Seg,
}

impl Modality {
    /// All modalities, in classification precedence order
    ///
    /// The order (t1, t2, t1ce, flair, seg) is part of the contract:
    /// [`Modality::classify`] checks the anchored tokens in exactly this
    /// order, which keeps classification deterministic for file names
    /// containing more than one token.
    pub const ALL: [Modality; 5] = [
        Modality::T1,
        Modality::T2,
        Modality::T1ce,
        Modality::Flair,
        Modality::Seg,
    ];

    /// The four imaging modalities, in channel order
    pub const MRI_CHANNELS: [Modality; 4] = [
        Modality::T1,
        Modality::T2,
        Modality::T1ce,
        Modality::Flair,
    ];

    /// Returns the stable lowercase name used in file names and display
    pub fn name(&self) -> &'static str {
        match self {
            Modality::T1 => "t1",
            Modality::T2 => "t2",
            Modality::T1ce => "t1ce",
            Modality::Flair => "flair",
            Modality::Seg => "seg",
        }
    }

    /// Anchored file-name token for this modality
    ///
    /// The trailing separator is a correctness requirement, not a cosmetic
    /// one: `patient_t1ce.nii` contains the substring `t1` but not the
    /// token `t1.`, so it can only classify as T1CE.
    fn token(&self) -> &'static str {
        match self {
            Modality::T1 => "t1.",
            Modality::T2 => "t2.",
            Modality::T1ce => "t1ce.",
            Modality::Flair => "flair.",
            Modality::Seg => "seg.",
        }
    }

    /// Channel index of this modality in the combined MRI tensor
    ///
    /// Returns `None` for [`Modality::Seg`], which is a label volume and
    /// is never stacked into the tensor.
    pub fn channel(&self) -> Option<usize> {
        match self {
            Modality::T1 => Some(0),
            Modality::T2 => Some(1),
            Modality::T1ce => Some(2),
            Modality::Flair => Some(3),
            Modality::Seg => None,
        }
    }

    /// Returns whether this is one of the four imaging modalities
    pub fn is_image(&self) -> bool {
        !matches!(self, Modality::Seg)
    }

    /// Determines the modality of a file from its name
    ///
    /// Returns the first modality in [`Modality::ALL`] order whose
    /// anchored token appears in `file_name`, or `None` if the file is not
    /// a recognized volume. Classification failure is not an error; the
    /// caller simply skips the file.
    pub fn classify(file_name: &str) -> Option<Modality> {
        Modality::ALL
            .iter()
            .copied()
            .find(|modality| file_name.contains(modality.token()))
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
