use tonejitter_image::{Image, ImageDtype, ImageError};

use crate::curve::ToneCurve;
use crate::domain::IntensityDomain;
use crate::error::AugmentError;
use crate::parallel;

/// Remap a single pixel value through a curve.
///
/// The value is clipped to the domain, normalized, mapped, clipped to
/// `[0, 1]` and mapped back to the domain.
pub fn remap_value(curve: &ToneCurve, domain: &IntensityDomain, value: f32) -> f32 {
    let t = domain.normalize(value);
    let y = curve.evaluate(t);
    // NaN never escapes: clamp keeps it, so fall back to the lower bound
    let y = if y.is_nan() { 0.0 } else { y.clamp(0.0, 1.0) };
    domain.denormalize(y)
}

/// Build a lookup table over every raw value of an integral pixel type.
///
/// Entry `v` holds the remapped value of pixel value `v`.
///
/// # Returns
///
/// `None` for pixel types without discrete levels.
///
/// # Examples
///
/// ```
/// use tonejitter_augment::curve::ToneCurve;
/// use tonejitter_augment::domain::IntensityDomain;
/// use tonejitter_augment::remap::build_lut;
///
/// let lut = build_lut::<u8>(&ToneCurve::identity(), &IntensityDomain::U8).unwrap();
/// assert_eq!(lut.len(), 256);
/// assert_eq!(lut[128], 128);
/// ```
pub fn build_lut<T: ImageDtype>(curve: &ToneCurve, domain: &IntensityDomain) -> Option<Vec<T>> {
    let levels = T::LEVELS?;
    let lut = (0..levels)
        .map(|v| T::from_f32(remap_value(curve, domain, v as f32)))
        .collect();
    Some(lut)
}

/// Remap each channel of an image through its own tone curve.
///
/// Integral pixel types go through a per-channel lookup table, float types
/// evaluate the curve per pixel. Values outside the domain are clipped
/// rather than rejected.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `curves` - One curve per channel.
/// * `domain` - The intensity domain of the pixel values.
/// * `dst` - The output image with shape (H, W, C).
///
/// # Errors
///
/// Returns [`AugmentError::ChannelMismatch`] if there is not exactly one curve
/// per channel, and [`ImageError::InvalidImageSize`] if `src` and `dst` differ in size.
///
/// # Examples
///
/// ```
/// use tonejitter_image::{Image, ImageSize};
/// use tonejitter_augment::curve::ToneCurve;
/// use tonejitter_augment::domain::IntensityDomain;
/// use tonejitter_augment::interpolation::CurveInterpolation;
/// use tonejitter_augment::remap::apply_curves;
///
/// let src = Image::<f32, 1>::new(
///     ImageSize { width: 3, height: 1 },
///     vec![0.0, 0.5, 1.0],
/// ).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// let darken = ToneCurve::from_pairs(
///     &[(0.0, 0.0), (1.0, 0.5)],
///     CurveInterpolation::Linear,
/// ).unwrap();
///
/// apply_curves(&src, &[darken], &IntensityDomain::UNIT, &mut dst).unwrap();
/// assert_eq!(dst.as_slice(), &[0.0, 0.25, 0.5]);
/// ```
pub fn apply_curves<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    curves: &[ToneCurve],
    domain: &IntensityDomain,
    dst: &mut Image<T, C>,
) -> Result<(), AugmentError> {
    if curves.len() != C {
        return Err(AugmentError::ChannelMismatch {
            expected: C,
            actual: curves.len(),
        });
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        )
        .into());
    }

    let luts = curves
        .iter()
        .map(|curve| build_lut::<T>(curve, domain))
        .collect::<Option<Vec<_>>>();

    match luts {
        Some(luts) => {
            parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
                for ((s, d), lut) in src_pixel.iter().zip(dst_pixel.iter_mut()).zip(&luts) {
                    let idx = (s.to_f32() as usize).min(lut.len() - 1);
                    *d = lut[idx];
                }
            });
        }
        None => {
            parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
                for ((s, d), curve) in src_pixel.iter().zip(dst_pixel.iter_mut()).zip(curves) {
                    *d = T::from_f32(remap_value(curve, domain, s.to_f32()));
                }
            });
        }
    }

    Ok(())
}
