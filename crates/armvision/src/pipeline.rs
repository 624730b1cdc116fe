use image::RgbImage;
use log::{info, warn};
use serde::Serialize;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::PipelineConfig;
use crate::core::{BinaryMask, ChannelOrder, ColorSegmenter, FrameView, MarkerColor};
use crate::io::{frame_view, load_reference};
use crate::joints::{JointAngleEstimator, JointEstimate, JointVector};
use crate::target::{TargetError, TargetLocator, TargetMatch};
use crate::PipelineError;

/// Per-frame output.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameResult {
    /// `[blue_dx, blue_dy, green_dx, green_dy, red_dx, red_dy, base_x, base_y]`.
    pub joints: JointVector,
    /// Target center `[x, y]` in pixels, `None` when the search could not run.
    pub target: Option<[f64; 2]>,
    pub estimate: JointEstimate,
    pub target_match: Option<TargetMatch>,
    /// Why the target search did not run.
    #[serde(skip)]
    pub target_error: Option<TargetError>,
}

impl FrameResult {
    /// Joint output carries substituted values; see
    /// [`JointEstimate::is_degenerate`].
    pub fn is_degenerate(&self) -> bool {
        self.estimate.is_degenerate()
    }
}

/// Joint estimator and target locator with their resources loaded.
///
/// Construction does all file I/O; [`process`](Self::process) only touches
/// the frame it is given.
#[derive(Clone, Debug)]
pub struct Pipeline {
    joints: JointAngleEstimator,
    target: TargetLocator,
    channel_order: ChannelOrder,
}

impl Pipeline {
    pub fn new(joints: JointAngleEstimator, target: TargetLocator) -> Self {
        Self {
            joints,
            target,
            channel_order: ChannelOrder::Bgr,
        }
    }

    pub fn with_channel_order(mut self, order: ChannelOrder) -> Self {
        self.channel_order = order;
        self
    }

    /// Validate `cfg` and load the reference image. Fails if the reference
    /// cannot be read or thresholds to nothing.
    pub fn from_config(cfg: &PipelineConfig) -> Result<Self, PipelineError> {
        cfg.validate()?;
        let target_params = cfg.target_params();
        let reference = load_reference(&cfg.reference_image, &target_params.reference_threshold)?;
        info!(
            "loaded reference {} ({}x{}, {} px on)",
            cfg.reference_image.display(),
            reference.width(),
            reference.height(),
            reference.as_mask().count()
        );
        let joints = JointAngleEstimator::new(cfg.joint_params());
        let target = TargetLocator::new(reference, target_params);
        Ok(Self::new(joints, target).with_channel_order(cfg.channel_order))
    }

    pub fn joints(&self) -> &JointAngleEstimator {
        &self.joints
    }

    pub fn target(&self) -> &TargetLocator {
        &self.target
    }

    /// Run both estimators on one frame.
    ///
    /// The joint estimate never fails. A failed target search (frame smaller
    /// than the reference) leaves `target` empty and keeps the joints.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(width = frame.width(), height = frame.height()))
    )]
    pub fn process(&self, frame: &FrameView<'_>) -> FrameResult {
        let estimate = self.joints.estimate(frame);
        let (target_match, target_error) = match self.target.locate(frame) {
            Ok(m) => (Some(m), None),
            Err(err) => {
                warn!("target search skipped: {err}");
                (None, Some(err))
            }
        };
        FrameResult {
            joints: estimate.joint_vector(),
            target: target_match.map(|m| m.offset.to_array()),
            estimate,
            target_match,
            target_error,
        }
    }

    pub fn process_image(&self, img: &RgbImage) -> Result<FrameResult, PipelineError> {
        Ok(self.process(&frame_view(img)?))
    }

    /// Process an interleaved buffer laid out in the configured channel order.
    pub fn process_raw(
        &self,
        width: usize,
        height: usize,
        pixels: &[u8],
    ) -> Result<FrameResult, PipelineError> {
        let frame = FrameView::new(width, height, pixels, self.channel_order)?;
        Ok(self.process(&frame))
    }

    /// The masks the pipeline works on: dilated marker masks and the raw
    /// target mask.
    pub fn masks(&self, frame: &FrameView<'_>) -> Vec<(MarkerColor, BinaryMask)> {
        let palette = &self.joints.params().palette;
        let segmenter = ColorSegmenter::new(self.joints.params().dilation);
        MarkerColor::ALL
            .into_iter()
            .map(|color| {
                let mask = match color {
                    MarkerColor::Orange => self.target.candidate_mask(frame),
                    _ => segmenter.segment(frame, palette.range(color)),
                };
                (color, mask)
            })
            .collect()
    }
}
