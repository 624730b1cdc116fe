//! Spatial moments and mask centroids.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::BinaryMask;

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance in pixels.
    pub fn distance_sq(self, other: PixelPoint) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    pub fn to_point(self) -> Point2<f64> {
        Point2::new(self.x as f64, self.y as f64)
    }
}

/// Raw spatial moments up to first order, weighted by pixel value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaskMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl MaskMoments {
    pub fn of(mask: &BinaryMask) -> Self {
        let mut m = MaskMoments::default();
        for (x, y, p) in mask.as_gray().enumerate_pixels() {
            let v = p.0[0];
            if v == 0 {
                continue;
            }
            let v = v as f64;
            m.m00 += v;
            m.m10 += v * x as f64;
            m.m01 += v * y as f64;
        }
        m
    }

    /// Sub-pixel centroid, `None` for a zero-mass mask.
    pub fn centroid(&self) -> Option<Point2<f64>> {
        if self.m00 == 0.0 {
            return None;
        }
        Some(Point2::new(self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// Centroid of a binary mask in integer pixels.
///
/// Coordinates are truncated, matching the reference output. A mask with no
/// foreground has no centroid; [`CentroidEstimator::locate_or_origin`] keeps
/// the historical `(0, 0)` substitute for callers that need it, which is
/// indistinguishable from a marker sitting on the image origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct CentroidEstimator;

impl CentroidEstimator {
    pub fn locate(&self, mask: &BinaryMask) -> Option<PixelPoint> {
        let c = MaskMoments::of(mask).centroid()?;
        Some(PixelPoint::new(c.x.trunc() as i32, c.y.trunc() as i32))
    }

    pub fn locate_or_origin(&self, mask: &BinaryMask) -> PixelPoint {
        self.locate(mask).unwrap_or(PixelPoint::ORIGIN)
    }
}
