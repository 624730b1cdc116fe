use armvision_core::{ColorPalette, ColorRange};
use imageproc::template_matching::MatchTemplateMethod;
use serde::{Deserialize, Serialize};

/// Similarity measure used for template matching.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    SumOfSquaredErrors,
    /// Squared error divided by the energy of template and window.
    #[default]
    SumOfSquaredErrorsNormalized,
    CrossCorrelationNormalized,
}

impl MatchMethod {
    /// Squared-error scores are minimized, correlation scores maximized.
    pub fn lower_is_better(self) -> bool {
        match self {
            MatchMethod::SumOfSquaredErrors | MatchMethod::SumOfSquaredErrorsNormalized => true,
            MatchMethod::CrossCorrelationNormalized => false,
        }
    }

    pub(crate) fn as_imageproc(self) -> MatchTemplateMethod {
        match self {
            MatchMethod::SumOfSquaredErrors => MatchTemplateMethod::SumOfSquaredErrors,
            MatchMethod::SumOfSquaredErrorsNormalized => {
                MatchTemplateMethod::SumOfSquaredErrorsNormalized
            }
            MatchMethod::CrossCorrelationNormalized => {
                MatchTemplateMethod::CrossCorrelationNormalized
            }
        }
    }
}

/// How the reported location is read off the score surface.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchConvention {
    /// x from the lowest-score location, y from the highest-score location.
    /// Kept for consumers that expect the historical output.
    #[default]
    Legacy,
    /// Both coordinates from the single best-scoring location.
    BestMatch,
}

/// Configuration for [`TargetLocator`](crate::TargetLocator).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetParams {
    /// Color of the target object in the frame.
    pub color: ColorRange,
    /// Threshold turning the reference image into a strict binary mask.
    pub reference_threshold: ColorRange,
    pub method: MatchMethod,
    pub convention: MatchConvention,
}

impl Default for TargetParams {
    fn default() -> Self {
        Self {
            color: ColorPalette::default().orange,
            reference_threshold: ColorRange::REFERENCE_WHITE,
            method: MatchMethod::default(),
            convention: MatchConvention::default(),
        }
    }
}
