//! Target localization by template matching.
//!
//! The frame is thresholded with the target color (no dilation), then a
//! binary reference pattern is slid over the resulting mask. The reported
//! offset is the matched window corner plus half the reference size.
//!
//! The default [`MatchConvention::Legacy`] reads x from the lowest-scoring
//! window and y from the highest-scoring one, which reproduces the output
//! existing consumers were built against. [`MatchConvention::BestMatch`]
//! takes both coordinates from the best window.

mod error;
mod locator;
mod params;
mod reference;

pub use error::TargetError;
pub use locator::{TargetLocator, TargetMatch, TargetOffset};
pub use params::{MatchConvention, MatchMethod, TargetParams};
pub use reference::ReferenceMask;
