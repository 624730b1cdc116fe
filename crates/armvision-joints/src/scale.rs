use armvision_core::PixelPoint;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Physical distance between the yellow and blue markers in the reference rig.
pub const DEFAULT_REFERENCE_SEPARATION: f64 = 2.0;

/// Physical units per pixel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// Sentinel for frames where the reference markers coincide.
    pub const ZERO: Self = Self(0.0);

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn apply(self, p: PixelPoint) -> Point2<f64> {
        p.to_point() * self.0
    }
}

/// Derives the scale factor from two markers a known distance apart.
#[derive(Clone, Copy, Debug)]
pub struct ScaleCalibrator {
    separation: f64,
}

impl Default for ScaleCalibrator {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_SEPARATION)
    }
}

impl ScaleCalibrator {
    pub fn new(separation: f64) -> Self {
        Self { separation }
    }

    pub fn separation(&self) -> f64 {
        self.separation
    }

    /// `separation / |a - b|`, or `None` when the points coincide.
    pub fn calibrate(&self, a: PixelPoint, b: PixelPoint) -> Option<ScaleFactor> {
        let d2 = a.distance_sq(b);
        if d2 == 0 {
            return None;
        }
        Some(ScaleFactor(self.separation / (d2 as f64).sqrt()))
    }

    /// Like [`calibrate`](Self::calibrate) but yields [`ScaleFactor::ZERO`]
    /// for coincident points, so every metric coordinate collapses to zero.
    pub fn calibrate_or_zero(&self, a: PixelPoint, b: PixelPoint) -> ScaleFactor {
        self.calibrate(a, b).unwrap_or(ScaleFactor::ZERO)
    }
}
