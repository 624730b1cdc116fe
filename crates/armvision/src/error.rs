use std::path::PathBuf;

use crate::core::FrameError;
use crate::target::TargetError;

/// Errors produced while setting up or running the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to load reference image {path}: {source}")]
    ReferenceLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unusable reference image {path}: {source}")]
    ReferenceMask {
        path: PathBuf,
        #[source]
        source: TargetError,
    },

    #[error("failed to decode frame: {0}")]
    FrameDecode(#[source] image::ImageError),

    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl PipelineError {
    /// Errors confined to a single frame; the driver skips the frame and
    /// keeps going. Everything else prevents the pipeline from running.
    pub fn is_frame_local(&self) -> bool {
        matches!(self, PipelineError::FrameDecode(_) | PipelineError::Frame(_))
    }
}
