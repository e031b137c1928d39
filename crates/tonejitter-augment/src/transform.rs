use tonejitter_image::{Image, ImageDtype};

use crate::curve_jitter::CurveJitter;
use crate::error::AugmentError;

/// A single-argument image transform, composable inside a pipeline.
///
/// Closures of the shape `FnMut(&Image<T, C>) -> Result<Image<T, C>, AugmentError>`
/// are transforms too.
pub trait Transform<T, const C: usize> {
    /// Transform the image into a new image.
    fn apply(&mut self, src: &Image<T, C>) -> Result<Image<T, C>, AugmentError>;
}

impl<T, const C: usize, F> Transform<T, C> for F
where
    F: FnMut(&Image<T, C>) -> Result<Image<T, C>, AugmentError>,
{
    fn apply(&mut self, src: &Image<T, C>) -> Result<Image<T, C>, AugmentError> {
        self(src)
    }
}

impl<T: ImageDtype, const C: usize> Transform<T, C> for CurveJitter {
    fn apply(&mut self, src: &Image<T, C>) -> Result<Image<T, C>, AugmentError> {
        CurveJitter::apply(self, src)
    }
}

/// An ordered list of transforms applied one after the other.
///
/// # Examples
///
/// ```
/// use tonejitter_image::{Image, ImageSize};
/// use tonejitter_augment::curve_jitter::{CurveJitter, CurveJitterConfig};
/// use tonejitter_augment::error::AugmentError;
/// use tonejitter_augment::transform::{Compose, Transform};
///
/// let image = Image::<f32, 3>::from_size_val(
///     ImageSize { width: 4, height: 4 },
///     0.5,
/// ).unwrap();
///
/// let jitter = CurveJitter::new(CurveJitterConfig::default().with_random_seed(0)).unwrap();
///
/// let mut pipeline = Compose::new()
///     .then(jitter)
///     .then(|img: &Image<f32, 3>| -> Result<_, AugmentError> { Ok(img.clone()) });
///
/// let out = pipeline.apply(&image).unwrap();
/// assert_eq!(out.size(), image.size());
/// ```
pub struct Compose<T, const C: usize> {
    transforms: Vec<Box<dyn Transform<T, C> + Send>>,
}

impl<T, const C: usize> Compose<T, C> {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Append a transform to the pipeline.
    pub fn then(mut self, transform: impl Transform<T, C> + Send + 'static) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    /// Number of transforms in the pipeline.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether the pipeline holds no transforms.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl<T, const C: usize> Default for Compose<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const C: usize> Transform<T, C> for Compose<T, C> {
    fn apply(&mut self, src: &Image<T, C>) -> Result<Image<T, C>, AugmentError> {
        let mut image = src.clone();
        for transform in self.transforms.iter_mut() {
            image = transform.apply(&image)?;
        }
        Ok(image)
    }
}
