//! Arm configuration from colored markers.
//!
//! The yellow marker is the base of the arm; blue, green and red sit on the
//! three joints further out. Per frame:
//! 1. Segment each marker color and take the mask centroid.
//! 2. Derive a metric scale from the known yellow-to-blue distance.
//! 3. Express each joint as `base - joint` in metric units.
//!
//! ```
//! use armvision_core::{ChannelOrder, FrameView};
//! use armvision_joints::JointAngleEstimator;
//!
//! let pixels = vec![0u8; 64 * 48 * 3];
//! let frame = FrameView::new(64, 48, &pixels, ChannelOrder::Bgr).unwrap();
//! let estimate = JointAngleEstimator::default().estimate(&frame);
//! assert!(estimate.displacements().is_none());
//! assert_eq!(estimate.joint_vector().as_slice(), &[0.0; 8]);
//! ```

mod estimator;
mod params;
mod result;
mod scale;

pub use estimator::JointAngleEstimator;
pub use params::JointParams;
pub use result::{JointDisplacements, JointEstimate, JointVector};
pub use scale::{ScaleCalibrator, ScaleFactor, DEFAULT_REFERENCE_SEPARATION};
