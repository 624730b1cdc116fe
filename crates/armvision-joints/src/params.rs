use armvision_core::{ColorPalette, DilationParams};
use serde::{Deserialize, Serialize};

use crate::scale::DEFAULT_REFERENCE_SEPARATION;

/// Configuration for [`JointAngleEstimator`](crate::JointAngleEstimator).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JointParams {
    /// Color bounds of the arm markers (orange is not used here).
    pub palette: ColorPalette,
    /// Dilation applied to every marker mask before taking its centroid.
    pub dilation: DilationParams,
    /// Physical distance between the yellow base and the blue marker.
    pub reference_separation: f64,
}

impl Default for JointParams {
    fn default() -> Self {
        Self {
            palette: ColorPalette::default(),
            dilation: DilationParams::default(),
            reference_separation: DEFAULT_REFERENCE_SEPARATION,
        }
    }
}
