use crate::error::AugmentError;

/// The closed intensity range `[lo, hi]` that pixel values live in.
///
/// Curves operate on the normalized range `[0, 1]`; the domain maps pixel
/// values in and out of it.
///
/// # Examples
///
/// ```
/// use tonejitter_augment::domain::IntensityDomain;
///
/// let domain = IntensityDomain::new(0.0, 255.0).unwrap();
/// assert_eq!(domain.normalize(51.0), 0.2);
/// assert_eq!(domain.normalize(300.0), 1.0);
/// assert_eq!(domain.denormalize(1.0), 255.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityDomain {
    lo: f32,
    hi: f32,
}

impl IntensityDomain {
    /// The `[0, 1]` domain of float images.
    pub const UNIT: Self = Self { lo: 0.0, hi: 1.0 };

    /// The `[0, 255]` domain of 8-bit images.
    pub const U8: Self = Self { lo: 0.0, hi: 255.0 };

    /// Create a new domain.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::InvalidDomain`] if the bounds or their distance are
    /// not finite, or `lo >= hi`.
    pub fn new(lo: f32, hi: f32) -> Result<Self, AugmentError> {
        if !(hi - lo).is_finite() || lo >= hi {
            return Err(AugmentError::InvalidDomain(lo, hi));
        }
        Ok(Self { lo, hi })
    }

    /// Lower bound of the domain.
    pub fn lo(&self) -> f32 {
        self.lo
    }

    /// Upper bound of the domain.
    pub fn hi(&self) -> f32 {
        self.hi
    }

    /// Map a pixel value to `[0, 1]`.
    ///
    /// Values outside the domain are clipped and NaN maps to `0`.
    pub fn normalize(&self, value: f32) -> f32 {
        if value.is_nan() {
            return 0.0;
        }
        (value.clamp(self.lo, self.hi) - self.lo) / (self.hi - self.lo)
    }

    /// Map a normalized value back to the domain, clipping to `[lo, hi]`.
    pub fn denormalize(&self, t: f32) -> f32 {
        (self.lo + t * (self.hi - self.lo)).clamp(self.lo, self.hi)
    }
}

impl Default for IntensityDomain {
    fn default() -> Self {
        Self::UNIT
    }
}
