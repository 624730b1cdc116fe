use armvision_core::{CentroidEstimator, ColorSegmenter, FrameView, MarkerColor, PixelPoint};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::params::JointParams;
use crate::result::{JointEstimate, JointVector};
use crate::scale::ScaleCalibrator;

/// Measures arm markers on a single frame.
///
/// Holds only read-only configuration; every call is independent.
#[derive(Clone, Debug)]
pub struct JointAngleEstimator {
    params: JointParams,
    segmenter: ColorSegmenter,
    calibrator: ScaleCalibrator,
}

impl Default for JointAngleEstimator {
    fn default() -> Self {
        Self::new(JointParams::default())
    }
}

impl JointAngleEstimator {
    pub fn new(params: JointParams) -> Self {
        let segmenter = ColorSegmenter::new(params.dilation);
        let calibrator = ScaleCalibrator::new(params.reference_separation);
        Self {
            params,
            segmenter,
            calibrator,
        }
    }

    pub fn params(&self) -> &JointParams {
        &self.params
    }

    /// Centroid of one marker color, `None` when it is not in the frame.
    pub fn locate_marker(&self, frame: &FrameView<'_>, color: MarkerColor) -> Option<PixelPoint> {
        let mask = self.segmenter.segment(frame, self.params.palette.range(color));
        let centroid = CentroidEstimator.locate(&mask);
        if centroid.is_none() {
            debug!("{} marker not visible", color.name());
        }
        centroid
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(width = frame.width(), height = frame.height()))
    )]
    pub fn estimate(&self, frame: &FrameView<'_>) -> JointEstimate {
        let estimate = JointEstimate::from_markers(
            &self.calibrator,
            self.locate_marker(frame, MarkerColor::Yellow),
            self.locate_marker(frame, MarkerColor::Blue),
            self.locate_marker(frame, MarkerColor::Green),
            self.locate_marker(frame, MarkerColor::Red),
        );
        if estimate.scale.is_none() {
            debug!(
                "scale unresolved, falling back to {:.6}",
                estimate.fallback_scale.value()
            );
        }
        estimate
    }

    /// Shorthand for `estimate(frame).joint_vector()`.
    pub fn joint_vector(&self, frame: &FrameView<'_>) -> JointVector {
        self.estimate(frame).joint_vector()
    }
}
