//! Core types for the armvision marker pipeline.
//!
//! Frames are borrowed 3-channel buffers ([`FrameView`]); everything derived
//! from them is a [`BinaryMask`] or a point. Color bounds are always given in
//! BGR order regardless of how the frame is laid out.

mod color;
mod frame;
mod logger;
mod mask;
mod moments;
mod segment;

pub use color::{ColorPalette, ColorRange, MarkerColor};
pub use frame::{ChannelOrder, FrameError, FrameView};
pub use mask::{BinaryMask, MASK_ON};
pub use moments::{CentroidEstimator, MaskMoments, PixelPoint};
pub use segment::{dilate_in_place, in_range, ColorSegmenter, DilationParams};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_verbosity};
