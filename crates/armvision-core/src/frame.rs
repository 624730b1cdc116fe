use serde::{Deserialize, Serialize};

/// Channel layout of an interleaved 3-channel frame buffer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Blue, green, red. This is what the camera bridge delivers.
    #[default]
    Bgr,
    /// Red, green, blue, as produced by the `image` crate.
    Rgb,
}

/// Errors for frame buffers that do not describe a valid 3-channel image.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("invalid frame dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid frame buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },
}

/// Borrowed view over an 8-bit, 3-channel, row-major frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    width: usize,
    height: usize,
    data: &'a [u8],
    order: ChannelOrder,
}

impl<'a> FrameView<'a> {
    pub fn new(
        width: usize,
        height: usize,
        data: &'a [u8],
        order: ChannelOrder,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions { width, height });
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or(FrameError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(FrameError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
            order,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Pixel at `(x, y)` normalized to BGR order.
    #[inline]
    pub fn bgr(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * self.width + x) * 3;
        bgr_from(self.order, &self.data[idx..idx + 3])
    }

    /// Iterate all pixels in row-major order, normalized to BGR.
    pub fn bgr_pixels(&self) -> impl Iterator<Item = [u8; 3]> + 'a {
        let order = self.order;
        self.data.chunks_exact(3).map(move |px| bgr_from(order, px))
    }
}

#[inline]
fn bgr_from(order: ChannelOrder, px: &[u8]) -> [u8; 3] {
    match order {
        ChannelOrder::Bgr => [px[0], px[1], px[2]],
        ChannelOrder::Rgb => [px[2], px[1], px[0]],
    }
}
