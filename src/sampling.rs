//! Dense sampling of a fitted curve for rendering.
//!
//! The curve covers the observed data plus an extrapolated margin on each side:
//! ```text
//! [x_min - e·x_range, x_max + e·x_range]
//! ```
//! Samples are evenly spaced, both ends included, and always in increasing `x`.
use crate::{
    error::{Error, Result},
    normalization::Normalizer,
    value::{Linspace, Point, Value},
    Polynomial,
};

/// An ordered set of `(x, y)` points along a fitted curve.
///
/// Derived from a fit, never mutated. Refitting produces a new curve.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct SampledCurve<T: Value = f64> {
    points: Vec<Point<T>>,
}
impl<T: Value> SampledCurve<T> {
    /// Samples `function` at `samples` evenly spaced points spanning the
    /// normalizer's domain, widened by `extrapolation · x_range` on each side.
    ///
    /// `function` is evaluated in original coordinates; if it carries its own
    /// normalizer, that one maps each sample before evaluation.
    ///
    /// # Errors
    /// - [`Error::InvalidConfig`] if `samples < 2`, or `extrapolation` is negative or not finite
    ///
    /// # Example
    /// ```
    /// # use slicefit::{Polynomial, normalization::Normalizer, sampling::SampledCurve};
    /// let n = Normalizer::new(0.0, 2.0).unwrap();
    /// let line = Polynomial::borrowed(&[0.0, 1.0]);
    ///
    /// let curve = SampledCurve::new(&line, &n, 1.5, 5).unwrap();
    /// assert_eq!(curve.x_bounds(), Some((-3.0, 5.0)));
    /// assert_eq!(curve.len(), 5);
    /// ```
    pub fn new(
        function: &Polynomial<'_, T>,
        normalizer: &Normalizer<T>,
        extrapolation: T,
        samples: usize,
    ) -> Result<Self> {
        if samples < 2 {
            return Err(Error::InvalidConfig("samples must be at least 2"));
        }

        if !extrapolation.is_finite_value() || extrapolation < T::zero() {
            return Err(Error::InvalidConfig(
                "extrapolation must be finite and non-negative",
            ));
        }

        let margin = extrapolation * normalizer.x_range();
        let start = normalizer.x_min() - margin;
        let end = normalizer.x_max() + margin;

        let points = function.solve(Linspace::new(start, end, samples));
        Ok(Self { points })
    }

    /// The sampled points, in increasing `x`
    #[must_use]
    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    /// Consumes the curve, returning its points
    #[must_use]
    pub fn into_points(self) -> Vec<Point<T>> {
        self.points
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the curve has no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last sampled x, or `None` for an empty curve
    #[must_use]
    pub fn x_bounds(&self) -> Option<(T, T)> {
        Some((self.points.first()?.x, self.points.last()?.x))
    }

    /// Returns an iterator over the sampled points
    pub fn iter(&self) -> std::slice::Iter<'_, Point<T>> {
        self.points.iter()
    }
}
impl<'a, T: Value> IntoIterator for &'a SampledCurve<T> {
    type Item = &'a Point<T>;
    type IntoIter = std::slice::Iter<'a, Point<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
