use rand::distr::{Distribution, Uniform};
use rand::Rng;

use crate::error::AugmentError;

/// How much a curve parameter may deviate, as given by the user.
///
/// A single amount `a` expands to `[center - a, center + a]`; an explicit
/// pair is taken as-is after validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Jitter {
    /// Symmetric amount around the parameter's center. Must be non negative.
    Amount(f32),
    /// Explicit `(min, max)` interval.
    Range(f32, f32),
}

impl From<f32> for Jitter {
    fn from(amount: f32) -> Self {
        Jitter::Amount(amount)
    }
}

impl From<(f32, f32)> for Jitter {
    fn from((min, max): (f32, f32)) -> Self {
        Jitter::Range(min, max)
    }
}

impl std::fmt::Display for Jitter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Jitter::Amount(a) => write!(f, "{a}"),
            Jitter::Range(min, max) => write!(f, "({min}, {max})"),
        }
    }
}

/// Rules for resolving a [`Jitter`] into a [`JitterRange`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct JitterRule {
    pub name: &'static str,
    pub center: f32,
    pub bound: (f32, f32),
    pub clip_first_on_zero: bool,
}

impl JitterRule {
    pub const BLACK_POINT: Self = Self {
        name: "black_point",
        center: 0.0,
        bound: (-1.0, 1.0),
        clip_first_on_zero: false,
    };

    pub const WHITE_POINT: Self = Self {
        name: "white_point",
        center: 1.0,
        bound: (0.0, f32::INFINITY),
        clip_first_on_zero: true,
    };

    pub const SLOPE: Self = Self {
        name: "slope",
        center: 1.0,
        bound: (0.0, f32::INFINITY),
        clip_first_on_zero: true,
    };

    pub fn resolve(&self, jitter: Jitter) -> Result<JitterRange, AugmentError> {
        match jitter {
            Jitter::Amount(value) => {
                if value.is_nan() || value < 0.0 {
                    return Err(AugmentError::NegativeJitter {
                        name: self.name,
                        value,
                    });
                }
                let mut min = self.center - value;
                if self.clip_first_on_zero {
                    min = min.max(0.0);
                }
                let max = self.center + value;
                if !(max - min).is_finite() {
                    let (lower, upper) = self.bound;
                    return Err(AugmentError::InvalidJitterRange {
                        name: self.name,
                        min,
                        max,
                        lower,
                        upper,
                    });
                }
                Ok(JitterRange { min, max })
            }
            Jitter::Range(min, max) => {
                let (lower, upper) = self.bound;
                // NaN fails every comparison and is rejected here too
                if !(lower <= min && min <= max && max <= upper) || !(max - min).is_finite() {
                    return Err(AugmentError::InvalidJitterRange {
                        name: self.name,
                        min,
                        max,
                        lower,
                        upper,
                    });
                }
                Ok(JitterRange { min, max })
            }
        }
    }
}

/// A validated closed interval `[min, max]` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterRange {
    /// Lower end.
    pub min: f32,
    /// Upper end.
    pub max: f32,
}

impl JitterRange {
    /// A range holding the single value `value`.
    pub fn fixed(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Whether sampling can return more than one value.
    pub fn is_random(&self) -> bool {
        self.min < self.max
    }

    /// Draw a value uniformly from the range.
    ///
    /// Fixed ranges return their value without consuming randomness.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::UnsampleableRange`] if an end or the width of
    /// the range is not finite.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<f32, AugmentError> {
        if !self.is_random() {
            return Ok(self.min);
        }
        let uniform = Uniform::new_inclusive(self.min, self.max)
            .map_err(|_| AugmentError::UnsampleableRange(self.min, self.max))?;
        Ok(uniform.sample(rng))
    }
}

impl std::fmt::Display for JitterRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{Jitter, JitterRange, JitterRule};
    use crate::error::AugmentError;

    #[test]
    fn resolve_amount() -> Result<(), AugmentError> {
        let white = JitterRule::WHITE_POINT.resolve(Jitter::Amount(0.1))?;
        assert!((white.min - 0.9).abs() < 1e-6);
        assert!((white.max - 1.1).abs() < 1e-6);

        let black = JitterRule::BLACK_POINT.resolve(Jitter::Amount(0.1))?;
        assert!((black.min + 0.1).abs() < 1e-6);
        assert!((black.max - 0.1).abs() < 1e-6);

        // the lower end of the slope never goes below zero
        let slope = JitterRule::SLOPE.resolve(Jitter::Amount(1.5))?;
        assert_eq!(slope.min, 0.0);
        assert_eq!(slope.max, 2.5);

        Ok(())
    }

    #[test]
    fn resolve_zero_is_fixed() -> Result<(), AugmentError> {
        let slope = JitterRule::SLOPE.resolve(Jitter::Amount(0.0))?;
        assert_eq!(slope, JitterRange::fixed(1.0));
        assert!(!slope.is_random());
        Ok(())
    }

    #[test]
    fn resolve_negative_amount() {
        let res = JitterRule::SLOPE.resolve(Jitter::Amount(-0.5));
        assert_eq!(
            res,
            Err(AugmentError::NegativeJitter {
                name: "slope",
                value: -0.5
            })
        );
    }

    #[test]
    fn resolve_pair() -> Result<(), AugmentError> {
        let black = JitterRule::BLACK_POINT.resolve(Jitter::Range(-0.2, 0.05))?;
        assert_eq!(black, JitterRange { min: -0.2, max: 0.05 });

        // unordered
        assert!(JitterRule::BLACK_POINT.resolve(Jitter::Range(0.3, 0.1)).is_err());
        // outside the bound
        assert!(JitterRule::BLACK_POINT.resolve(Jitter::Range(-1.5, 0.1)).is_err());
        assert!(JitterRule::SLOPE.resolve(Jitter::Range(-0.1, 1.0)).is_err());
        assert!(JitterRule::SLOPE.resolve(Jitter::Range(f32::NAN, 1.0)).is_err());
        assert!(JitterRule::SLOPE.resolve(Jitter::Range(0.0, f32::INFINITY)).is_err());

        Ok(())
    }

    #[test]
    fn resolve_unbounded_amount() {
        let res = JitterRule::BLACK_POINT.resolve(Jitter::Amount(f32::MAX));
        assert!(matches!(res, Err(AugmentError::InvalidJitterRange { .. })));

        let res = JitterRule::WHITE_POINT.resolve(Jitter::Amount(f32::INFINITY));
        assert!(matches!(res, Err(AugmentError::InvalidJitterRange { .. })));
    }

    #[test]
    fn sample_non_finite_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let range = JitterRange {
            min: -f32::MAX,
            max: f32::MAX,
        };
        assert_eq!(
            range.sample(&mut rng),
            Err(AugmentError::UnsampleableRange(-f32::MAX, f32::MAX))
        );
    }

    #[test]
    fn sample_within_range() -> Result<(), AugmentError> {
        let mut rng = StdRng::seed_from_u64(7);
        let range = JitterRange { min: 0.5, max: 1.5 };
        for _ in 0..1000 {
            let v = range.sample(&mut rng)?;
            assert!((0.5..=1.5).contains(&v));
        }
        assert_eq!(JitterRange::fixed(0.25).sample(&mut rng)?, 0.25);

        Ok(())
    }
}
