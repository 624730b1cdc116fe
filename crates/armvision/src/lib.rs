//! High-level facade for the `armvision-*` crates.
//!
//! This crate provides:
//! - re-exports of the core, joint and target crates
//! - [`PipelineConfig`]: JSON configuration with the reference-rig defaults
//! - [`Pipeline`]: loads the reference pattern once, then runs the joint
//!   estimator and the target locator on each frame
//! - [`io`]: `image` crate decoding and mask export
//!
//! ## Quickstart
//!
//! ```no_run
//! use armvision::{io, Pipeline, PipelineConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = PipelineConfig::from_json_file(Path::new("armvision.json"))?;
//! let pipeline = Pipeline::from_config(&cfg)?;
//!
//! let frame = io::load_frame(Path::new("frame.png"))?;
//! let result = pipeline.process_image(&frame)?;
//! println!("joints: {:?}", result.joints.as_slice());
//! if let Some([x, y]) = result.target {
//!     println!("target: ({x}, {y})");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Degenerate frames
//!
//! A marker color missing from the frame does not fail the frame. The flat
//! [`JointVector`](joints::JointVector) then treats that marker as sitting at
//! pixel `(0, 0)`, and a zero yellow-to-blue distance turns the scale into
//! `0`. Check [`FrameResult::is_degenerate`] or use
//! [`JointEstimate::displacements`](joints::JointEstimate::displacements)
//! when substituted values are not acceptable.

pub use armvision_core as core;
pub use armvision_joints as joints;
pub use armvision_target as target;

mod config;
mod error;
pub mod io;
mod pipeline;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{FrameResult, Pipeline};
