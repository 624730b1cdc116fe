//! Glue between the `image` crate and the pipeline types.

use std::io::Cursor;
use std::path::Path;

use image::{ImageError, ImageReader, RgbImage};

use crate::core::{BinaryMask, ChannelOrder, ColorRange, FrameView};
use crate::target::ReferenceMask;
use crate::PipelineError;

/// Borrow an `image::RgbImage` as a frame.
pub fn frame_view(img: &RgbImage) -> Result<FrameView<'_>, PipelineError> {
    Ok(FrameView::new(
        img.width() as usize,
        img.height() as usize,
        img.as_raw(),
        ChannelOrder::Rgb,
    )?)
}

/// Decode an encoded frame (PNG, JPEG, ...) from memory.
pub fn decode_frame(bytes: &[u8]) -> Result<RgbImage, PipelineError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PipelineError::FrameDecode(ImageError::IoError(e)))?
        .decode()
        .map(|img| img.to_rgb8())
        .map_err(PipelineError::FrameDecode)
}

/// Read and decode a frame from disk.
pub fn load_frame(path: &Path) -> Result<RgbImage, PipelineError> {
    read_rgb(path).map_err(PipelineError::FrameDecode)
}

/// Load the reference image and threshold it into the target pattern.
pub fn load_reference(path: &Path, threshold: &ColorRange) -> Result<ReferenceMask, PipelineError> {
    let img = read_rgb(path).map_err(|source| PipelineError::ReferenceLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let frame = frame_view(&img)?;
    ReferenceMask::from_frame(&frame, threshold).map_err(|source| PipelineError::ReferenceMask {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a mask as an 8-bit grayscale image; the format follows the extension.
pub fn save_mask(mask: &BinaryMask, path: &Path) -> Result<(), ImageError> {
    mask.as_gray().save(path)
}

fn read_rgb(path: &Path) -> Result<RgbImage, ImageError> {
    Ok(ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?
        .to_rgb8())
}
