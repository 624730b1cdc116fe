use serde::{Deserialize, Serialize};

/// Inclusive per-channel bounds, always expressed in BGR order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl ColorRange {
    pub const fn new(lower: [u8; 3], upper: [u8; 3]) -> Self {
        Self { lower, upper }
    }

    /// Bright pixels used to binarize the reference image.
    pub const REFERENCE_WHITE: Self = Self::new([200, 200, 200], [255, 255, 255]);

    #[inline]
    pub fn contains(&self, bgr: [u8; 3]) -> bool {
        (0..3).all(|c| self.lower[c] <= bgr[c] && bgr[c] <= self.upper[c])
    }
}

/// Marker colors painted on the arm and the target.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Yellow,
    Blue,
    Green,
    Red,
    Orange,
}

impl MarkerColor {
    pub const ALL: [MarkerColor; 5] = [
        MarkerColor::Yellow,
        MarkerColor::Blue,
        MarkerColor::Green,
        MarkerColor::Red,
        MarkerColor::Orange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MarkerColor::Yellow => "yellow",
            MarkerColor::Blue => "blue",
            MarkerColor::Green => "green",
            MarkerColor::Red => "red",
            MarkerColor::Orange => "orange",
        }
    }
}

/// Color bounds for every marker.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPalette {
    pub yellow: ColorRange,
    pub blue: ColorRange,
    pub green: ColorRange,
    pub red: ColorRange,
    pub orange: ColorRange,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            yellow: ColorRange::new([0, 100, 100], [0, 255, 255]),
            blue: ColorRange::new([100, 0, 0], [255, 0, 0]),
            green: ColorRange::new([0, 100, 0], [0, 255, 0]),
            red: ColorRange::new([0, 0, 100], [0, 0, 255]),
            orange: ColorRange::new([50, 100, 110], [90, 185, 220]),
        }
    }
}

impl ColorPalette {
    pub fn range(&self, color: MarkerColor) -> &ColorRange {
        match color {
            MarkerColor::Yellow => &self.yellow,
            MarkerColor::Blue => &self.blue,
            MarkerColor::Green => &self.green,
            MarkerColor::Red => &self.red,
            MarkerColor::Orange => &self.orange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let r = ColorRange::new([10, 20, 30], [10, 40, 50]);
        assert!(r.contains([10, 20, 30]));
        assert!(r.contains([10, 40, 50]));
        assert!(!r.contains([11, 30, 40]));
        assert!(!r.contains([10, 19, 40]));
    }

    #[test]
    fn default_palette_separates_pure_colors() {
        let p = ColorPalette::default();
        let pure_yellow = [0u8, 255, 255];
        let pure_blue = [255u8, 0, 0];
        assert!(p.yellow.contains(pure_yellow));
        assert!(!p.blue.contains(pure_yellow));
        assert!(!p.green.contains(pure_yellow));
        assert!(p.blue.contains(pure_blue));
        assert!(!p.red.contains(pure_blue));
    }

    #[test]
    fn palette_fills_missing_fields_from_defaults() {
        let p: ColorPalette =
            serde_json::from_str(r#"{"red": {"lower": [0, 0, 50], "upper": [0, 0, 255]}}"#)
                .expect("parse palette");
        assert_eq!(p.red.lower, [0, 0, 50]);
        assert_eq!(p.blue, ColorPalette::default().blue);
    }
}
