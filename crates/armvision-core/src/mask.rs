use image::{GrayImage, Luma};

/// Foreground value written into masks.
pub const MASK_ON: u8 = 255;

/// Strictly binary single-channel mask: every pixel is 0 or [`MASK_ON`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryMask {
    image: GrayImage,
}

impl BinaryMask {
    /// All-background mask of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::new(width, height),
        }
    }

    /// Build a mask from a predicate evaluated at every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let image = GrayImage::from_fn(width, height, |x, y| {
            Luma([if f(x, y) { MASK_ON } else { 0 }])
        });
        Self { image }
    }

    /// Binarize an arbitrary grayscale image (non-zero becomes foreground).
    pub fn from_gray(mut image: GrayImage) -> Self {
        for p in image.pixels_mut() {
            p.0[0] = if p.0[0] > 0 { MASK_ON } else { 0 };
        }
        Self { image }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y).0[0] != 0
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        self.image
            .put_pixel(x, y, Luma([if on { MASK_ON } else { 0 }]));
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.image.as_raw().iter().filter(|&&v| v != 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.image.as_raw().iter().all(|&v| v == 0)
    }

    /// Inclusive bounding box `(x0, y0, x1, y1)` of the foreground.
    pub fn bounding_box(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bbox: Option<(u32, u32, u32, u32)> = None;
        for (x, y, p) in self.image.enumerate_pixels() {
            if p.0[0] == 0 {
                continue;
            }
            bbox = Some(match bbox {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
        bbox
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.image
    }

    pub(crate) fn as_gray_mut(&mut self) -> &mut GrayImage {
        &mut self.image
    }

    pub fn into_gray(self) -> GrayImage {
        self.image
    }
}
