#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// control points of tone curves.
pub mod control_points;

/// tone curves fitted through control points.
pub mod curve;

pub mod curve_jitter;

/// intensity domain of pixel values.
pub mod domain;

/// Error types for the augmentation module.
pub mod error;

pub mod interpolation;

/// module containing parallelization utilities.
pub mod parallel;

/// jitter ranges of the curve parameters.
pub mod range;

/// remap image channels through tone curves.
pub mod remap;

/// composition of single-argument image transforms.
pub mod transform;

pub use crate::curve_jitter::{CurveJitter, CurveJitterConfig};
pub use crate::error::AugmentError;
pub use crate::transform::{Compose, Transform};
