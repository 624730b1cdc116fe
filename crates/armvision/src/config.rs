use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{ChannelOrder, ColorPalette, ColorRange, DilationParams};
use crate::joints::{JointParams, DEFAULT_REFERENCE_SEPARATION};
use crate::target::{MatchConvention, MatchMethod, TargetParams};
use crate::PipelineError;

/// Everything the pipeline needs, loaded once at startup.
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Layout of raw frame buffers handed to [`Pipeline::process_raw`](crate::Pipeline::process_raw).
    pub channel_order: ChannelOrder,
    pub palette: ColorPalette,
    pub dilation: DilationParams,
    /// Physical yellow-to-blue distance.
    pub reference_separation: f64,
    /// Reference pattern for the target. Relative paths in a config file are
    /// resolved against the directory holding that file.
    pub reference_image: PathBuf,
    pub reference_threshold: ColorRange,
    pub match_method: MatchMethod,
    pub match_convention: MatchConvention,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_order: ChannelOrder::Bgr,
            palette: ColorPalette::default(),
            dilation: DilationParams::default(),
            reference_separation: DEFAULT_REFERENCE_SEPARATION,
            reference_image: PathBuf::from("image_crop.png"),
            reference_threshold: ColorRange::REFERENCE_WHITE,
            match_method: MatchMethod::default(),
            match_convention: MatchConvention::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, PipelineError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, PipelineError> {
        let raw = fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg = Self::from_json_str(&raw)?;
        if cfg.reference_image.is_relative() {
            if let Some(dir) = path.parent() {
                cfg.reference_image = dir.join(&cfg.reference_image);
            }
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(self.reference_separation.is_finite() && self.reference_separation > 0.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "reference_separation must be positive, got {}",
                self.reference_separation
            )));
        }
        if !(1..=DilationParams::MAX_KERNEL_SIZE).contains(&self.dilation.kernel_size) {
            return Err(PipelineError::InvalidConfig(format!(
                "dilation.kernel_size must be in 1..={}, got {}",
                DilationParams::MAX_KERNEL_SIZE,
                self.dilation.kernel_size
            )));
        }
        let ranges = [
            ("palette.yellow", &self.palette.yellow),
            ("palette.blue", &self.palette.blue),
            ("palette.green", &self.palette.green),
            ("palette.red", &self.palette.red),
            ("palette.orange", &self.palette.orange),
            ("reference_threshold", &self.reference_threshold),
        ];
        for (name, range) in ranges {
            if (0..3).any(|c| range.lower[c] > range.upper[c]) {
                return Err(PipelineError::InvalidConfig(format!(
                    "{name}: lower bound exceeds upper bound"
                )));
            }
        }
        Ok(())
    }

    pub fn joint_params(&self) -> JointParams {
        JointParams {
            palette: self.palette,
            dilation: self.dilation,
            reference_separation: self.reference_separation,
        }
    }

    pub fn target_params(&self) -> TargetParams {
        TargetParams {
            color: self.palette.orange,
            reference_threshold: self.reference_threshold,
            method: self.match_method,
            convention: self.match_convention,
        }
    }
}
