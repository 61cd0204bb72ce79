//! Domain normalization for the independent variable.
//!
//! Large x-values raised to high powers overflow or swamp the normal
//! equations, so every fit is solved against `x' = (x - x_min) / x_range`,
//! which maps the observed data onto `[0, 1]`.
//!
//! The [`Normalizer`] is captured once per fit; the same instance is used to
//! score the fit, to sample the curve, and to map coefficients back to the
//! original x-axis.
use crate::{
    error::{Error, Result},
    value::{CoordExt, Point, Value},
};

/// Affine map from the observed x-domain onto `[0, 1]`.
///
/// Invariant: `x_range > 0` and finite. Construct with
/// [`Normalizer::from_points`] or [`Normalizer::new`], both of which enforce it.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Normalizer<T: Value = f64> {
    x_min: T,
    x_range: T,
}
impl<T: Value> Normalizer<T> {
    /// Creates a normalizer for the domain `x_min..=x_max`.
    ///
    /// # Errors
    /// - [`Error::DegenerateInput`] if `x_max == x_min`
    /// - [`Error::NonFinite`] if either bound is not finite
    pub fn new(x_min: T, x_max: T) -> Result<Self> {
        if !x_min.is_finite_value() || !x_max.is_finite_value() {
            return Err(Error::NonFinite);
        }

        let x_range = x_max - x_min;
        if !x_range.is_finite_value() {
            return Err(Error::NonFinite);
        }

        if x_range <= T::zero() {
            return Err(Error::DegenerateInput);
        }

        Ok(Self { x_min, x_range })
    }

    /// Creates a normalizer from the x-extent of a point set.
    ///
    /// # Errors
    /// - [`Error::NoData`] if `points` is empty
    /// - [`Error::DegenerateInput`] if every x-value is the same
    /// - [`Error::NonFinite`] if any coordinate is NaN or infinite
    ///
    /// # Example
    /// ```
    /// # use slicefit::{normalization::Normalizer, value::Point};
    /// let points = [Point::new(10.0, 0.0), Point::new(30.0, 1.0), Point::new(20.0, 4.0)];
    /// let n = Normalizer::from_points(&points).unwrap();
    /// assert_eq!(n.normalize(20.0), 0.5);
    /// ```
    pub fn from_points(points: &[Point<T>]) -> Result<Self> {
        if !points.all_finite() {
            return Err(Error::NonFinite);
        }

        let (x_min, x_max) = points.x_range().ok_or(Error::NoData)?;
        Self::new(x_min, x_max)
    }

    /// Smallest observed x
    pub fn x_min(&self) -> T {
        self.x_min
    }

    /// Largest observed x
    pub fn x_max(&self) -> T {
        self.x_min + self.x_range
    }

    /// Width of the observed x-domain. Always positive.
    pub fn x_range(&self) -> T {
        self.x_range
    }

    /// Maps an original x onto the normalized axis.
    ///
    /// Not clamped: values outside the observed domain land outside `[0, 1]`,
    /// which is what extrapolated sampling relies on.
    pub fn normalize(&self, x: T) -> T {
        (x - self.x_min) / self.x_range
    }

    /// Maps a normalized x back to the original axis.
    pub fn denormalize(&self, x: T) -> T {
        self.x_min + x * self.x_range
    }

    /// Normalizes the x-channel of a point set, preserving order and y-values.
    pub fn normalize_points(&self, points: &[Point<T>]) -> Vec<Point<T>> {
        points
            .iter()
            .map(|p| Point::new(self.normalize(p.x), p.y))
            .collect()
    }

    /// Rewrites ascending normalized-space coefficients as coefficients of the original x.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// With `x' = αx + β` where `α = 1 / x_range` and `β = -x_min / x_range`:
    /// ```math
    /// Σ cᵢ (αx + β)ⁱ = Σᵢ Σⱼ cᵢ C(i, j) αʲ βⁱ⁻ʲ xʲ
    /// ```
    /// </div>
    ///
    /// Binomial coefficients are built row by row (Pascal's triangle) so high
    /// degrees never go through a factorial.
    #[must_use]
    pub fn denormalize_coefs(&self, coefs: &[T]) -> Vec<T> {
        let alpha = T::one() / self.x_range;
        let beta = -self.x_min * alpha;

        let mut unnorm = vec![T::zero(); coefs.len()];
        let mut binom = vec![T::one()];
        for (i, &c) in coefs.iter().enumerate() {
            if i > 0 {
                let mut next = vec![T::one(); i + 1];
                for j in 1..i {
                    next[j] = binom[j - 1] + binom[j];
                }
                binom = next;
            }

            // alpha^j * beta^(i-j), built without powi so a zero beta stays exact
            let mut alpha_j = T::one();
            for j in 0..=i {
                let mut beta_ij = T::one();
                for _ in 0..(i - j) {
                    beta_ij *= beta;
                }

                unnorm[j] += c * binom[j] * alpha_j * beta_ij;
                alpha_j *= alpha;
            }
        }

        unnorm
    }
}
impl<T: Value> std::fmt::Display for Normalizer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x' = (x - {}) / {}", self.x_min, self.x_range)
    }
}
