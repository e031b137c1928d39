//! Randomized non-linear color jitter.
//!
//! Linear color augmentations (brightness, contrast) are largely undone by
//! the input normalization of a network. This transform instead remaps every
//! channel through its own random tone curve, in the spirit of gamma
//! correction and S-curves, described by constraints rather than by a
//! parameterization:
//!
//! * the new black point lies within a range (e.g. `-0.1..=0.1`),
//! * the new white point lies within a range (e.g. `0.9..=1.1`),
//! * the slope of the curve is bounded (e.g. `0.5..=1.5`),
//! * the curve is smooth.
//!
//! The black and white points are sampled first, interior control points are
//! inserted recursively between neighbours so the slope constraint holds on
//! both sides, and a smooth curve is fitted through them.
//!
//! # Example
//!
//! ```
//! use tonejitter_image::{Image, ImageSize};
//! use tonejitter_augment::curve_jitter::{CurveJitter, CurveJitterConfig};
//! use tonejitter_augment::domain::IntensityDomain;
//!
//! let image = Image::<u8, 3>::from_size_val(
//!     ImageSize { width: 32, height: 16 },
//!     128,
//! ).unwrap();
//!
//! let config = CurveJitterConfig::default()
//!     .with_domain(IntensityDomain::U8)
//!     .with_random_seed(42);
//! let mut jitter = CurveJitter::new(config).unwrap();
//!
//! let augmented = jitter.apply(&image).unwrap();
//! assert_eq!(augmented.size(), image.size());
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use tonejitter_image::{Image, ImageDtype};

use crate::control_points::{ControlPoints, MAX_SAMPLED_POINTS};
use crate::curve::ToneCurve;
use crate::domain::IntensityDomain;
use crate::error::AugmentError;
use crate::interpolation::CurveInterpolation;
use crate::range::{Jitter, JitterRange, JitterRule};
use crate::remap;

/// Configuration of a [`CurveJitter`].
///
/// The defaults jitter the black point by `±0.1`, the white point by `±0.1`
/// and allow slopes in `[0.5, 1.5]`, over the `[0, 1]` intensity domain.
///
/// The default domain suits float images. Integer images must set their own
/// domain (e.g. [`IntensityDomain::U8`]); otherwise every value is clipped
/// to `0` or `1`.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveJitterConfig {
    /// Control points per channel, endpoints included. At least 2, at most
    /// [`MAX_SAMPLED_POINTS`].
    pub num_control_points: usize,
    /// Jitter of the output value at the lower end of the domain, around 0.
    pub black_point: Jitter,
    /// Jitter of the output value at the upper end of the domain, around 1.
    pub white_point: Jitter,
    /// Jitter of the slope between neighbouring control points, around 1.
    pub slope: Jitter,
    /// How the curve is fitted through the control points.
    pub interpolation: CurveInterpolation,
    /// Intensity domain of the pixel values.
    pub domain: IntensityDomain,
    /// Optional fixed seed for reproducible curves.
    pub random_seed: Option<u64>,
}

impl Default for CurveJitterConfig {
    fn default() -> Self {
        Self {
            num_control_points: 5,
            black_point: Jitter::Amount(0.1),
            white_point: Jitter::Amount(0.1),
            slope: Jitter::Amount(0.5),
            interpolation: CurveInterpolation::default(),
            domain: IntensityDomain::default(),
            random_seed: None,
        }
    }
}

impl CurveJitterConfig {
    /// A configuration where one amount drives every jitter.
    ///
    /// A strength of `0` yields the identity curve.
    pub fn from_strength(strength: f32) -> Self {
        Self {
            black_point: Jitter::Amount(strength),
            white_point: Jitter::Amount(strength),
            slope: Jitter::Amount(strength),
            ..Default::default()
        }
    }

    /// Set the number of control points per channel.
    pub fn with_num_control_points(mut self, num_control_points: usize) -> Self {
        self.num_control_points = num_control_points;
        self
    }

    /// Set the black point jitter.
    pub fn with_black_point(mut self, black_point: impl Into<Jitter>) -> Self {
        self.black_point = black_point.into();
        self
    }

    /// Set the white point jitter.
    pub fn with_white_point(mut self, white_point: impl Into<Jitter>) -> Self {
        self.white_point = white_point.into();
        self
    }

    /// Set the slope jitter.
    pub fn with_slope(mut self, slope: impl Into<Jitter>) -> Self {
        self.slope = slope.into();
        self
    }

    /// Set the interpolation method.
    pub fn with_interpolation(mut self, interpolation: CurveInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set the intensity domain.
    pub fn with_domain(mut self, domain: IntensityDomain) -> Self {
        self.domain = domain;
        self
    }

    /// Pin the random source.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }
}

/// Validated parameters for sampling curves.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveParams {
    /// Control points per channel, endpoints included.
    pub num_control_points: usize,
    /// Range of the new black point.
    pub black_point: JitterRange,
    /// Range of the new white point.
    pub white_point: JitterRange,
    /// Range of the slope between neighbouring control points.
    pub slope: JitterRange,
    /// Curve fitting method.
    pub interpolation: CurveInterpolation,
}

impl CurveParams {
    /// Sample one tone curve.
    ///
    /// # Errors
    ///
    /// Fails if fewer than two control points are configured.
    pub fn sample_curve<R: Rng>(&self, rng: &mut R) -> Result<ToneCurve, AugmentError> {
        let points = ControlPoints::sample(
            self.num_control_points,
            &self.black_point,
            &self.white_point,
            &self.slope,
            rng,
        )?;
        Ok(ToneCurve::new(points, self.interpolation))
    }

    /// Sample one tone curve per channel.
    pub fn sample_curves<R: Rng>(
        &self,
        channels: usize,
        rng: &mut R,
    ) -> Result<Vec<ToneCurve>, AugmentError> {
        (0..channels).map(|_| self.sample_curve(rng)).collect()
    }

    /// Whether every sampled curve is the identity.
    pub fn is_identity(&self) -> bool {
        self.black_point == JitterRange::fixed(0.0)
            && self.white_point == JitterRange::fixed(1.0)
            && self.slope == JitterRange::fixed(1.0)
    }
}

/// Randomly map the color channels of an image in a non-linear fashion.
///
/// Each call to [`CurveJitter::apply`] draws a fresh curve per channel. With a
/// pinned seed the sequence of curves is reproducible: two transforms built
/// from the same configuration produce identical outputs for identical inputs.
#[derive(Debug, Clone)]
pub struct CurveJitter {
    config: CurveJitterConfig,
    params: CurveParams,
    rng: StdRng,
}

impl CurveJitter {
    /// Create a new transform from its configuration.
    ///
    /// # Errors
    ///
    /// * [`AugmentError::NegativeJitter`] if a single jitter amount is negative.
    /// * [`AugmentError::InvalidJitterRange`] if a `(min, max)` jitter is unordered
    ///   or out of bounds (`[-1, 1]` for the black point, `[0, inf)` otherwise).
    /// * [`AugmentError::TooFewControlPoints`] if fewer than two control points are
    ///   configured.
    /// * [`AugmentError::TooManyControlPoints`] if more than [`MAX_SAMPLED_POINTS`]
    ///   control points are configured.
    pub fn new(config: CurveJitterConfig) -> Result<Self, AugmentError> {
        if config.num_control_points < 2 {
            return Err(AugmentError::TooFewControlPoints(config.num_control_points));
        }

        if config.num_control_points > MAX_SAMPLED_POINTS {
            return Err(AugmentError::TooManyControlPoints(
                config.num_control_points,
                MAX_SAMPLED_POINTS,
            ));
        }

        let params = CurveParams {
            num_control_points: config.num_control_points,
            black_point: JitterRule::BLACK_POINT.resolve(config.black_point)?,
            white_point: JitterRule::WHITE_POINT.resolve(config.white_point)?,
            slope: JitterRule::SLOPE.resolve(config.slope)?,
            interpolation: config.interpolation,
        };

        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        log::debug!(
            "created curve jitter: black_point={} white_point={} slope={} points={} interpolation={} seed={:?}",
            params.black_point,
            params.white_point,
            params.slope,
            params.num_control_points,
            params.interpolation,
            config.random_seed,
        );

        Ok(Self {
            config,
            params,
            rng,
        })
    }

    /// The configuration the transform was built from.
    pub fn config(&self) -> &CurveJitterConfig {
        &self.config
    }

    /// The validated sampling parameters.
    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    /// Restart the random stream from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.config.random_seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Draw one tone curve per channel from the internal random stream.
    pub fn sample_curves(&mut self, channels: usize) -> Result<Vec<ToneCurve>, AugmentError> {
        let curves = self.params.sample_curves(channels, &mut self.rng)?;
        log::debug!("sampled {} tone curves", curves.len());
        Ok(curves)
    }

    /// Draw one lookup table of `levels` entries per channel.
    ///
    /// Entry `i` holds the normalized output for input `i / levels`, unclipped.
    pub fn sample_lookup_tables(
        &mut self,
        channels: usize,
        levels: usize,
    ) -> Result<Vec<Vec<f32>>, AugmentError> {
        Ok(self
            .sample_curves(channels)?
            .iter()
            .map(|curve| curve.lookup_table(levels))
            .collect())
    }

    /// Apply a random tone curve to every channel of the image.
    ///
    /// # Arguments
    ///
    /// * `src` - The input image with shape (H, W, C), values in the configured domain.
    ///
    /// # Returns
    ///
    /// A new image of the same size, values within the configured domain.
    /// Input values outside the domain are clipped before remapping, so an
    /// integer image under the default `[0, 1]` domain comes out as `0`s and `1`s.
    pub fn apply<T: ImageDtype, const C: usize>(
        &mut self,
        src: &Image<T, C>,
    ) -> Result<Image<T, C>, AugmentError> {
        let mut dst = Image::from_size_val(src.size(), T::default())?;
        self.apply_into(src, &mut dst)?;
        Ok(dst)
    }

    /// Apply a random tone curve to every channel, writing into `dst`.
    ///
    /// # Errors
    ///
    /// Fails if `src` and `dst` have different sizes.
    pub fn apply_into<T: ImageDtype, const C: usize>(
        &mut self,
        src: &Image<T, C>,
        dst: &mut Image<T, C>,
    ) -> Result<(), AugmentError> {
        if T::LEVELS.is_some() && self.config.domain == IntensityDomain::UNIT {
            log::debug!("integer image remapped over the [0, 1] domain, values are clipped to 0 or 1");
        }
        let curves = self.sample_curves(C)?;
        remap::apply_curves(src, &curves, &self.config.domain, dst)
    }

    /// Apply a random tone curve drawn from a caller owned random source.
    ///
    /// The internal random stream is left untouched, so workers of a data
    /// loader can share one transform and keep independent streams.
    pub fn apply_with_rng<T: ImageDtype, const C: usize, R: Rng>(
        &self,
        src: &Image<T, C>,
        rng: &mut R,
    ) -> Result<Image<T, C>, AugmentError> {
        let curves = self.params.sample_curves(C, rng)?;
        let mut dst = Image::from_size_val(src.size(), T::default())?;
        remap::apply_curves(src, &curves, &self.config.domain, &mut dst)?;
        Ok(dst)
    }
}

impl std::fmt::Display for CurveJitter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "CurveJitter(white_point={}, black_point={}, slope={})",
            self.params.white_point, self.params.black_point, self.params.slope
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use tonejitter_image::{Image, ImageSize};

    use super::{CurveJitter, CurveJitterConfig};
    use crate::domain::IntensityDomain;
    use crate::error::AugmentError;
    use crate::range::{Jitter, JitterRange};

    fn gradient() -> Result<Image<u8, 3>, AugmentError> {
        let data = (0..64 * 4 * 3).map(|i| (i % 256) as u8).collect();
        Ok(Image::new(
            ImageSize {
                width: 64,
                height: 4,
            },
            data,
        )?)
    }

    #[test]
    fn default_params() -> Result<(), AugmentError> {
        let jitter = CurveJitter::new(CurveJitterConfig::default())?;
        let params = jitter.params();
        assert_eq!(params.num_control_points, 5);
        assert!((params.black_point.min + 0.1).abs() < 1e-6);
        assert!((params.white_point.max - 1.1).abs() < 1e-6);
        assert_eq!(params.slope, JitterRange { min: 0.5, max: 1.5 });
        assert!(!params.is_identity());
        Ok(())
    }

    #[test]
    fn invalid_configuration() {
        let res = CurveJitter::new(CurveJitterConfig::from_strength(-0.1));
        assert!(matches!(res, Err(AugmentError::NegativeJitter { .. })));

        let res = CurveJitter::new(CurveJitterConfig::default().with_num_control_points(1));
        assert!(matches!(res, Err(AugmentError::TooFewControlPoints(1))));

        let res = CurveJitter::new(CurveJitterConfig::default().with_black_point(Jitter::Range(0.5, -0.5)));
        assert!(matches!(res, Err(AugmentError::InvalidJitterRange { .. })));

        let res = CurveJitter::new(CurveJitterConfig::default().with_num_control_points(5000));
        assert!(matches!(res, Err(AugmentError::TooManyControlPoints(5000, _))));

        // amounts whose range width overflows are rejected up front
        let res = CurveJitter::new(CurveJitterConfig::from_strength(f32::MAX));
        assert!(matches!(res, Err(AugmentError::InvalidJitterRange { .. })));

        let res = CurveJitter::new(CurveJitterConfig::from_strength(f32::INFINITY));
        assert!(matches!(res, Err(AugmentError::InvalidJitterRange { .. })));

        let res = CurveJitter::new(CurveJitterConfig::default().with_slope(Jitter::Range(0.0, f32::INFINITY)));
        assert!(matches!(res, Err(AugmentError::InvalidJitterRange { .. })));
    }

    #[test]
    fn extreme_slope_never_panics() -> Result<(), AugmentError> {
        let config = CurveJitterConfig::default()
            .with_slope(Jitter::Range(0.0, f32::MAX))
            .with_num_control_points(65)
            .with_domain(IntensityDomain::U8)
            .with_random_seed(4);
        let mut jitter = CurveJitter::new(config)?;

        let image = gradient()?;
        for _ in 0..10 {
            // huge slopes may fail to produce a curve, but never abort
            if let Ok(out) = jitter.apply(&image) {
                assert_eq!(out.size(), image.size());
            }
        }
        Ok(())
    }

    #[test]
    fn integer_image_under_unit_domain_is_clipped() -> Result<(), AugmentError> {
        let mut jitter = CurveJitter::new(CurveJitterConfig::from_strength(0.0))?;
        let out = jitter.apply(&gradient()?)?;
        assert!(out.as_slice().iter().all(|&v| v <= 1));
        Ok(())
    }

    #[test]
    fn zero_strength_is_identity() -> Result<(), AugmentError> {
        let config = CurveJitterConfig::from_strength(0.0).with_domain(IntensityDomain::U8);
        let mut jitter = CurveJitter::new(config)?;
        assert!(jitter.params().is_identity());

        let image = gradient()?;
        assert_eq!(jitter.apply(&image)?, image);
        Ok(())
    }

    #[test]
    fn same_seed_same_output() -> Result<(), AugmentError> {
        let config = CurveJitterConfig::default()
            .with_domain(IntensityDomain::U8)
            .with_random_seed(1234);
        let image = gradient()?;

        let a = CurveJitter::new(config.clone())?.apply(&image)?;
        let b = CurveJitter::new(config)?.apply(&image)?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn reseed_restarts_stream() -> Result<(), AugmentError> {
        let config = CurveJitterConfig::default()
            .with_domain(IntensityDomain::U8)
            .with_random_seed(9);
        let image = gradient()?;

        let mut jitter = CurveJitter::new(config)?;
        let first = jitter.apply(&image)?;
        let second = jitter.apply(&image)?;
        assert_ne!(first, second);

        jitter.reseed(9);
        assert_eq!(jitter.apply(&image)?, first);
        Ok(())
    }

    #[test]
    fn apply_with_rng_leaves_internal_stream() -> Result<(), AugmentError> {
        let config = CurveJitterConfig::default()
            .with_domain(IntensityDomain::U8)
            .with_random_seed(5);
        let image = gradient()?;

        let mut jitter = CurveJitter::new(config.clone())?;
        let mut worker_rng = StdRng::seed_from_u64(77);
        let from_worker = jitter.apply_with_rng(&image, &mut worker_rng)?;
        let from_internal = jitter.apply(&image)?;

        let expected = CurveJitter::new(config)?.apply(&image)?;
        assert_eq!(from_internal, expected);

        let again = jitter.apply_with_rng(&image, &mut StdRng::seed_from_u64(77))?;
        assert_eq!(from_worker, again);
        Ok(())
    }

    #[test]
    fn endpoints_anchored_without_endpoint_jitter() -> Result<(), AugmentError> {
        let config = CurveJitterConfig::default()
            .with_black_point(Jitter::Amount(0.0))
            .with_white_point(Jitter::Amount(0.0))
            .with_slope(Jitter::Amount(0.8))
            .with_random_seed(3);
        let mut jitter = CurveJitter::new(config)?;

        let image = Image::<f32, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        )?;
        for _ in 0..20 {
            let out = jitter.apply(&image)?;
            assert_eq!(out.as_slice(), image.as_slice());
        }
        Ok(())
    }

    #[test]
    fn lookup_tables_per_channel() -> Result<(), AugmentError> {
        let mut jitter = CurveJitter::new(CurveJitterConfig::default().with_random_seed(0))?;
        let tables = jitter.sample_lookup_tables(3, 256)?;
        assert_eq!(tables.len(), 3);
        assert!(tables.iter().all(|t| t.len() == 256));
        assert_ne!(tables[0], tables[1]);
        Ok(())
    }

    #[test]
    fn display_like_repr() -> Result<(), AugmentError> {
        let jitter = CurveJitter::new(CurveJitterConfig::from_strength(0.0))?;
        assert_eq!(
            jitter.to_string(),
            "CurveJitter(white_point=[1, 1], black_point=[0, 0], slope=[1, 1])"
        );
        Ok(())
    }
}
