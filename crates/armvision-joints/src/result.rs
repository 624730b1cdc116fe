use armvision_core::{MarkerColor, PixelPoint};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::scale::{ScaleCalibrator, ScaleFactor};

/// Flat joint output:
/// `[blue_dx, blue_dy, green_dx, green_dy, red_dx, red_dy, base_x, base_y]`.
///
/// Each displacement is `base - marker` in metric units; the last two values
/// are the metric position of the base marker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointVector(pub [f64; JointVector::LEN]);

impl JointVector {
    pub const LEN: usize = 8;

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}

/// Metric displacements when every marker and the scale are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointDisplacements {
    pub scale: ScaleFactor,
    pub base: Point2<f64>,
    /// `base - blue`, `base - green`, `base - red`.
    pub joints: [Vector2<f64>; 3],
}

/// Everything measured on one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointEstimate {
    /// Yellow base marker.
    pub base: Option<PixelPoint>,
    pub blue: Option<PixelPoint>,
    pub green: Option<PixelPoint>,
    pub red: Option<PixelPoint>,
    /// Scale from the visible yellow and blue markers.
    pub scale: Option<ScaleFactor>,
    /// Scale recomputed with missing markers placed at the origin. This is
    /// what [`joint_vector`](Self::joint_vector) uses.
    pub fallback_scale: ScaleFactor,
}

impl JointEstimate {
    pub(crate) fn from_markers(
        calibrator: &ScaleCalibrator,
        base: Option<PixelPoint>,
        blue: Option<PixelPoint>,
        green: Option<PixelPoint>,
        red: Option<PixelPoint>,
    ) -> Self {
        let scale = base.zip(blue).and_then(|(a, b)| calibrator.calibrate(a, b));
        let fallback_scale = calibrator
            .calibrate_or_zero(base.unwrap_or_default(), blue.unwrap_or_default());
        Self {
            base,
            blue,
            green,
            red,
            scale,
            fallback_scale,
        }
    }

    /// Markers whose mask came back empty.
    pub fn missing(&self) -> Vec<MarkerColor> {
        [
            (MarkerColor::Yellow, self.base),
            (MarkerColor::Blue, self.blue),
            (MarkerColor::Green, self.green),
            (MarkerColor::Red, self.red),
        ]
        .into_iter()
        .filter_map(|(color, p)| p.is_none().then_some(color))
        .collect()
    }

    /// True when any marker is missing or the scale could not be derived, i.e.
    /// when [`joint_vector`](Self::joint_vector) carries substituted values.
    pub fn is_degenerate(&self) -> bool {
        self.scale.is_none() || self.green.is_none() || self.red.is_none()
    }

    /// Strict output: `None` unless every marker and the scale are resolved.
    pub fn displacements(&self) -> Option<JointDisplacements> {
        let scale = self.scale?;
        let base = scale.apply(self.base?);
        let joint = |p: PixelPoint| base - scale.apply(p);
        Some(JointDisplacements {
            scale,
            base,
            joints: [joint(self.blue?), joint(self.green?), joint(self.red?)],
        })
    }

    /// Always-populated output; missing markers count as `(0, 0)`.
    pub fn joint_vector(&self) -> JointVector {
        let scale = self.fallback_scale;
        let base = scale.apply(self.base.unwrap_or_default());
        let joint = |p: Option<PixelPoint>| base - scale.apply(p.unwrap_or_default());
        let b = joint(self.blue);
        let g = joint(self.green);
        let r = joint(self.red);
        JointVector([b.x, b.y, g.x, g.y, r.x, r.y, base.x, base.y])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: i32, y: i32) -> Option<PixelPoint> {
        Some(PixelPoint::new(x, y))
    }

    #[test]
    fn displacement_is_base_minus_marker() {
        let est = JointEstimate::from_markers(
            &ScaleCalibrator::new(2.0),
            p(0, 0),
            p(0, 100),
            p(50, 100),
            p(50, 0),
        );
        let v = est.joint_vector();
        let expected = [0.0, -2.0, -1.0, -2.0, -1.0, 0.0, 0.0, 0.0];
        for (a, b) in v.as_slice().iter().zip(expected) {
            assert_relative_eq!(*a, b, epsilon = 1e-12);
        }
        let d = est.displacements().expect("all markers visible");
        assert_relative_eq!(d.joints[1].x, -1.0, epsilon = 1e-12);
        assert!(!est.is_degenerate());
    }

    #[test]
    fn missing_marker_keeps_vector_but_drops_strict_output() {
        let est = JointEstimate::from_markers(
            &ScaleCalibrator::new(2.0),
            p(10, 10),
            p(10, 60),
            None,
            p(40, 10),
        );
        assert_eq!(est.missing(), vec![MarkerColor::Green]);
        assert!(est.is_degenerate());
        assert!(est.displacements().is_none());
        let v = est.joint_vector();
        assert_eq!(v.as_slice().len(), JointVector::LEN);
        // green treated as the origin: base - 0
        assert_relative_eq!(v.0[2], v.0[6], epsilon = 1e-12);
        assert_relative_eq!(v.0[3], v.0[7], epsilon = 1e-12);
    }

    #[test]
    fn missing_blue_uses_origin_for_fallback_scale() {
        let est = JointEstimate::from_markers(
            &ScaleCalibrator::new(2.0),
            p(30, 40),
            None,
            None,
            None,
        );
        assert!(est.scale.is_none());
        assert_relative_eq!(est.fallback_scale.value(), 2.0 / 50.0, epsilon = 1e-12);
        assert_eq!(est.missing().len(), 3);
    }

    #[test]
    fn vector_serializes_as_flat_array() {
        let v = JointVector([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let json = serde_json::to_string(&v).expect("json");
        assert_eq!(json, "[1.0,2.0,3.0,4.0,5.0,6.0,7.0,8.0]");
    }
}
