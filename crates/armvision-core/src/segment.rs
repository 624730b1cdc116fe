//! Color thresholding followed by square-kernel dilation.

use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate_mut;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{BinaryMask, ColorRange, FrameView};

/// Dilation applied after thresholding.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DilationParams {
    /// Side of the square structuring element in pixels. Even sizes behave
    /// like the next larger odd size.
    pub kernel_size: u32,
    /// Number of times the element is applied. `0` disables dilation.
    pub iterations: u32,
}

impl Default for DilationParams {
    fn default() -> Self {
        Self {
            kernel_size: 5,
            iterations: 3,
        }
    }
}

impl DilationParams {
    pub const NONE: Self = Self {
        kernel_size: 1,
        iterations: 0,
    };

    /// Largest kernel whose radius fits the `u8` the morphology ops take.
    pub const MAX_KERNEL_SIZE: u32 = 2 * u8::MAX as u32 + 1;

    /// Chebyshev radius of the structuring element, saturating at
    /// [`MAX_KERNEL_SIZE`](Self::MAX_KERNEL_SIZE).
    pub fn radius(&self) -> u8 {
        (self.kernel_size / 2).min(u8::MAX as u32) as u8
    }

    pub fn is_noop(&self) -> bool {
        self.iterations == 0 || self.radius() == 0
    }
}

/// Thresholds frames into binary masks.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorSegmenter {
    dilation: DilationParams,
}

impl ColorSegmenter {
    pub fn new(dilation: DilationParams) -> Self {
        Self { dilation }
    }

    /// Segmenter that only thresholds.
    pub fn threshold_only() -> Self {
        Self::new(DilationParams::NONE)
    }

    pub fn dilation(&self) -> &DilationParams {
        &self.dilation
    }

    /// Mask of pixels inside `range`, dilated according to the params.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(self, frame), fields(width = frame.width(), height = frame.height()))
    )]
    pub fn segment(&self, frame: &FrameView<'_>, range: &ColorRange) -> BinaryMask {
        let mut mask = in_range(frame, range);
        dilate_in_place(&mut mask, &self.dilation);
        mask
    }
}

/// Plain inclusive threshold of every pixel against `range`.
pub fn in_range(frame: &FrameView<'_>, range: &ColorRange) -> BinaryMask {
    let width = frame.width() as u32;
    BinaryMask::from_fn(width, frame.height() as u32, |x, y| {
        range.contains(frame.bgr(x as usize, y as usize))
    })
}

/// Dilate `mask` with a square element, `iterations` times.
pub fn dilate_in_place(mask: &mut BinaryMask, params: &DilationParams) {
    if params.is_noop() {
        return;
    }
    let radius = params.radius();
    for _ in 0..params.iterations {
        dilate_mut(mask.as_gray_mut(), Norm::LInf, radius);
    }
}
