use armvision_core::{in_range, BinaryMask, FrameView, PixelPoint};
use image::{ImageBuffer, Luma};
use imageproc::template_matching::{find_extremes, match_template};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::params::{MatchConvention, MatchMethod, TargetParams};
use crate::reference::ReferenceMask;
use crate::TargetError;

/// Center of the matched template in candidate-mask pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetOffset {
    pub x: f64,
    pub y: f64,
}

impl TargetOffset {
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Outcome of one template search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetMatch {
    /// Reported target center, built according to the configured convention.
    pub offset: TargetOffset,
    /// Top-left corner of the best-scoring window.
    pub best_corner: PixelPoint,
    pub best_score: f32,
    /// Top-left corners of the lowest and highest scores.
    pub min_corner: PixelPoint,
    pub max_corner: PixelPoint,
}

/// Finds the reference pattern inside the target-colored part of a frame.
#[derive(Clone, Debug)]
pub struct TargetLocator {
    reference: ReferenceMask,
    params: TargetParams,
}

impl TargetLocator {
    pub fn new(reference: ReferenceMask, params: TargetParams) -> Self {
        Self { reference, params }
    }

    pub fn reference(&self) -> &ReferenceMask {
        &self.reference
    }

    pub fn params(&self) -> &TargetParams {
        &self.params
    }

    /// Pixels of the target color, without dilation.
    pub fn candidate_mask(&self, frame: &FrameView<'_>) -> BinaryMask {
        in_range(frame, &self.params.color)
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(width = frame.width(), height = frame.height()))
    )]
    pub fn locate(&self, frame: &FrameView<'_>) -> Result<TargetMatch, TargetError> {
        self.locate_in_mask(&self.candidate_mask(frame))
    }

    pub fn locate_in_mask(&self, mask: &BinaryMask) -> Result<TargetMatch, TargetError> {
        let (tw, th) = (self.reference.width(), self.reference.height());
        if tw > mask.width() || th > mask.height() {
            return Err(TargetError::ReferenceTooLarge {
                template_width: tw,
                template_height: th,
                mask_width: mask.width(),
                mask_height: mask.height(),
            });
        }
        if mask.is_empty() {
            debug!("no target-colored pixels in frame");
        }

        let method = self.params.method;
        let mut scores = match_template(
            mask.as_gray(),
            self.reference.as_mask().as_gray(),
            method.as_imageproc(),
        );
        clamp_scores(&mut scores, method);

        let extremes = find_extremes(&scores);
        let min_corner = corner(extremes.min_value_location);
        let max_corner = corner(extremes.max_value_location);
        let (best_corner, best_score) = if method.lower_is_better() {
            (min_corner, extremes.min_value)
        } else {
            (max_corner, extremes.max_value)
        };

        let (hx, hy) = self.reference.half_extent();
        let (hx, hy) = (hx as f64, hy as f64);
        let offset = match self.params.convention {
            MatchConvention::Legacy => TargetOffset {
                x: min_corner.x as f64 + hx,
                y: max_corner.y as f64 + hy,
            },
            MatchConvention::BestMatch => TargetOffset {
                x: best_corner.x as f64 + hx,
                y: best_corner.y as f64 + hy,
            },
        };

        Ok(TargetMatch {
            offset,
            best_corner,
            best_score,
            min_corner,
            max_corner,
        })
    }
}

/// Clamp normalized scores to their nominal range. Saturated windows then
/// tie, and `find_extremes` keeps the first of them in row-major order.
///
/// Squared-error ratios are capped at `1.0`, zero-energy windows included.
/// Correlation ratios just above `1.0` in magnitude snap to `±1.0`; anything
/// further out, and zero-energy windows, become `0.0`.
fn clamp_scores(scores: &mut ImageBuffer<Luma<f32>, Vec<f32>>, method: MatchMethod) {
    for p in scores.pixels_mut() {
        p.0[0] = clamp_score(p.0[0], method);
    }
}

fn clamp_score(v: f32, method: MatchMethod) -> f32 {
    match method {
        MatchMethod::SumOfSquaredErrors => {
            if v.is_finite() {
                v
            } else {
                f32::INFINITY
            }
        }
        MatchMethod::SumOfSquaredErrorsNormalized => {
            if v.is_finite() && v < 1.0 {
                v
            } else {
                1.0
            }
        }
        MatchMethod::CrossCorrelationNormalized => {
            if !v.is_finite() {
                0.0
            } else if v.abs() < 1.0 {
                v
            } else if v.abs() < 1.125 {
                v.signum()
            } else {
                0.0
            }
        }
    }
}

fn corner((x, y): (u32, u32)) -> PixelPoint {
    PixelPoint::new(x as i32, y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use armvision_core::{ChannelOrder, ColorRange};

    const ORANGE: [u8; 3] = [70, 140, 160];
    const WHITE: [u8; 3] = [255, 255, 255];

    /// Hollow 12x8 rectangle with a bar through the middle.
    fn pattern(x: u32, y: u32) -> bool {
        x < 2 || y < 2 || x >= 10 || y >= 6 || x == 5
    }

    const PW: u32 = 12;
    const PH: u32 = 8;

    fn bgr_buffer(w: u32, h: u32, mut paint: impl FnMut(u32, u32) -> Option<[u8; 3]>) -> Vec<u8> {
        let mut data = vec![0u8; (w * h * 3) as usize];
        for y in 0..h {
            for x in 0..w {
                if let Some(bgr) = paint(x, y) {
                    let idx = ((y * w + x) * 3) as usize;
                    data[idx..idx + 3].copy_from_slice(&bgr);
                }
            }
        }
        data
    }

    fn reference() -> ReferenceMask {
        let data = bgr_buffer(PW, PH, |x, y| pattern(x, y).then_some(WHITE));
        let frame =
            FrameView::new(PW as usize, PH as usize, &data, ChannelOrder::Bgr).expect("frame");
        ReferenceMask::from_frame(&frame, &ColorRange::REFERENCE_WHITE).expect("reference")
    }

    fn scene(at: (u32, u32)) -> Vec<u8> {
        bgr_buffer(100, 100, |x, y| {
            let inside = x >= at.0 && y >= at.1 && x < at.0 + PW && y < at.1 + PH;
            (inside && pattern(x - at.0, y - at.1)).then_some(ORANGE)
        })
    }

    fn locator(method: MatchMethod, convention: MatchConvention) -> TargetLocator {
        let params = TargetParams {
            method,
            convention,
            ..TargetParams::default()
        };
        TargetLocator::new(reference(), params)
    }

    #[test]
    fn best_match_finds_pattern_center() {
        let data = scene((30, 40));
        let frame = FrameView::new(100, 100, &data, ChannelOrder::Bgr).expect("frame");
        for method in [
            MatchMethod::SumOfSquaredErrors,
            MatchMethod::SumOfSquaredErrorsNormalized,
            MatchMethod::CrossCorrelationNormalized,
        ] {
            let m = locator(method, MatchConvention::BestMatch)
                .locate(&frame)
                .expect("match");
            assert_eq!(m.best_corner, PixelPoint::new(30, 40), "{method:?}");
            assert_eq!(m.offset.to_array(), [36.0, 44.0], "{method:?}");
        }
    }

    /// Pattern at (30,40) plus `band` fully target-colored rows at the top.
    fn banded_scene(band: u32) -> Vec<u8> {
        let pattern_scene = scene((30, 40));
        bgr_buffer(100, 100, |x, y| {
            let idx = ((y * 100 + x) * 3) as usize;
            (y < band || pattern_scene[idx..idx + 3] == ORANGE).then_some(ORANGE)
        })
    }

    #[test]
    fn legacy_y_follows_first_saturated_window() {
        // Squared-error ratios saturate at 1.0. With `band` rows on top, the
        // first window at or above 1.0 sits where only two of its rows are
        // covered (68 template px vs 24 window px: 44 / sqrt(68 * 24) > 1),
        // or at (0, 0) when that window is empty or barely covered.
        let loc = locator(MatchMethod::SumOfSquaredErrorsNormalized, MatchConvention::Legacy);
        for (band, max_corner) in [(0, (0, 0)), (1, (0, 0)), (3, (0, 1)), (5, (0, 3))] {
            let data = banded_scene(band);
            let frame = FrameView::new(100, 100, &data, ChannelOrder::Bgr).expect("frame");
            let m = loc.locate(&frame).expect("match");
            assert_eq!(m.min_corner, PixelPoint::new(30, 40), "band {band}");
            assert_eq!(
                m.max_corner,
                PixelPoint::new(max_corner.0, max_corner.1),
                "band {band}"
            );
            assert_eq!(
                m.offset.to_array(),
                [36.0, max_corner.1 as f64 + 4.0],
                "band {band}"
            );
        }
    }

    #[test]
    fn best_match_ignores_saturated_windows() {
        let data = banded_scene(3);
        let frame = FrameView::new(100, 100, &data, ChannelOrder::Bgr).expect("frame");
        let m = locator(MatchMethod::SumOfSquaredErrorsNormalized, MatchConvention::BestMatch)
            .locate(&frame)
            .expect("match");
        assert_eq!(m.offset.to_array(), [36.0, 44.0]);
        assert_eq!(m.best_score, 0.0);
    }

    #[test]
    fn squared_error_ratio_is_capped_at_one() {
        let method = MatchMethod::SumOfSquaredErrorsNormalized;
        assert_relative_eq!(clamp_score(0.25, method), 0.25);
        assert_eq!(clamp_score(1.0, method), 1.0);
        assert_eq!(clamp_score(1.96, method), 1.0);
        assert_eq!(clamp_score(f32::INFINITY, method), 1.0);
        assert_eq!(clamp_score(f32::NAN, method), 1.0);
    }

    #[test]
    fn correlation_ratio_snaps_or_zeroes() {
        let method = MatchMethod::CrossCorrelationNormalized;
        assert_relative_eq!(clamp_score(0.8, method), 0.8);
        assert_eq!(clamp_score(1.05, method), 1.0);
        assert_eq!(clamp_score(-1.05, method), -1.0);
        assert_eq!(clamp_score(1.5, method), 0.0);
        assert_eq!(clamp_score(f32::NAN, method), 0.0);
    }

    #[test]
    fn plain_squared_error_keeps_finite_scores() {
        let method = MatchMethod::SumOfSquaredErrors;
        assert_relative_eq!(clamp_score(1.3e6, method), 1.3e6);
        assert_eq!(clamp_score(f32::NAN, method), f32::INFINITY);
    }

    #[test]
    fn offset_stays_inside_shifted_mask_bounds() {
        let loc = locator(MatchMethod::SumOfSquaredErrors, MatchConvention::BestMatch);
        for at in [(0, 0), (88, 92), (3, 71), (50, 10)] {
            let data = scene(at);
            let frame = FrameView::new(100, 100, &data, ChannelOrder::Bgr).expect("frame");
            let m = loc.locate(&frame).expect("match");
            let (x, y) = (m.offset.x, m.offset.y);
            assert!((6.0..=(100 - PW + 6) as f64).contains(&x), "{at:?} -> {x}");
            assert!((4.0..=(100 - PH + 4) as f64).contains(&y), "{at:?} -> {y}");
        }
    }

    #[test]
    fn empty_frame_still_yields_in_bounds_offset() {
        let data = vec![0u8; 40 * 30 * 3];
        let frame = FrameView::new(40, 30, &data, ChannelOrder::Bgr).expect("frame");
        for convention in [MatchConvention::Legacy, MatchConvention::BestMatch] {
            let m = locator(MatchMethod::SumOfSquaredErrorsNormalized, convention)
                .locate(&frame)
                .expect("match");
            assert!(m.offset.x >= 6.0 && m.offset.x <= (40 - PW + 6) as f64);
            assert!(m.offset.y >= 4.0 && m.offset.y <= (30 - PH + 4) as f64);
        }
    }

    #[test]
    fn reference_larger_than_frame_is_an_error() {
        let data = vec![0u8; 10 * 10 * 3];
        let frame = FrameView::new(10, 10, &data, ChannelOrder::Bgr).expect("frame");
        let err = locator(MatchMethod::default(), MatchConvention::default())
            .locate(&frame)
            .unwrap_err();
        assert!(matches!(err, TargetError::ReferenceTooLarge { .. }));
    }
}
