#![deny(missing_docs)]
//! Image types for tone curve augmentation.

/// image representation for augmentation purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
