use armvision_core::{in_range, BinaryMask, ColorRange, FrameView};

use crate::TargetError;

/// Binary pattern searched for inside the candidate mask.
///
/// Built once from the reference image and shared read-only afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceMask {
    mask: BinaryMask,
}

impl ReferenceMask {
    /// Threshold a reference image into strict binary form.
    pub fn from_frame(frame: &FrameView<'_>, threshold: &ColorRange) -> Result<Self, TargetError> {
        Self::from_mask(in_range(frame, threshold))
    }

    pub fn from_mask(mask: BinaryMask) -> Result<Self, TargetError> {
        if mask.is_empty() {
            return Err(TargetError::EmptyReference {
                width: mask.width(),
                height: mask.height(),
            });
        }
        Ok(Self { mask })
    }

    pub fn width(&self) -> u32 {
        self.mask.width()
    }

    pub fn height(&self) -> u32 {
        self.mask.height()
    }

    /// Integer half extents added to a match corner to get its center.
    pub fn half_extent(&self) -> (u32, u32) {
        (self.width() / 2, self.height() / 2)
    }

    pub fn as_mask(&self) -> &BinaryMask {
        &self.mask
    }
}
