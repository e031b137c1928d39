use tonejitter_image::ImageError;

/// An error type for the augmentation module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AugmentError {
    /// A jitter amount given as a single number was negative.
    #[error("If {name} is a single number, it must be non negative, got {value}")]
    NegativeJitter {
        /// Name of the parameter.
        name: &'static str,
        /// The offending amount.
        value: f32,
    },

    /// A jitter range given as `(min, max)` is unordered or outside its bound.
    #[error("{name} values should be between [{lower}, {upper}], got [{min}, {max}]")]
    InvalidJitterRange {
        /// Name of the parameter.
        name: &'static str,
        /// Requested lower end.
        min: f32,
        /// Requested upper end.
        max: f32,
        /// Smallest allowed value.
        lower: f32,
        /// Largest allowed value.
        upper: f32,
    },

    /// A range cannot be sampled uniformly, its ends or its width are not finite.
    #[error("Cannot sample uniformly from [{0}, {1}]")]
    UnsampleableRange(f32, f32),

    /// A curve needs both endpoint anchors.
    #[error("At least 2 control points are required, got {0}")]
    TooFewControlPoints(usize),

    /// More control points than midpoint insertion can keep distinct.
    #[error("At most {1} control points are supported, got {0}")]
    TooManyControlPoints(usize, usize),

    /// The intensity domain is empty or not finite.
    #[error("Invalid intensity domain [{0}, {1}]")]
    InvalidDomain(f32, f32),

    /// Control points are not finite or their x-coordinates are not strictly increasing.
    #[error("Invalid control points: {0}")]
    InvalidControlPoints(String),

    /// The number of curves does not match the number of image channels.
    #[error("Expected {expected} curves, one per channel, got {actual}")]
    ChannelMismatch {
        /// Channels of the image.
        expected: usize,
        /// Curves supplied.
        actual: usize,
    },

    /// Error from the image container.
    #[error(transparent)]
    Image(#[from] ImageError),
}
