//! Scoring a fitted polynomial against the samples it was fitted to.
//!
//! Every function takes the observed `y` and the fitted `y_fit` as two
//! iterators of equal length, in the same order.
//!
//! # Goodness of fit
//! - [`r_squared`]: Share of the variation in `y` the fit explains, clamped to `[0, 1]`.
//! - [`adjusted_r_squared`]: R² with a penalty per coefficient, for comparing degrees.
//! - [`residual_variance`]: Unbiased estimate of the noise variance left after the fit.
//!
//! # Error metrics
//! Lower is better for all of these, and all are in the units of `y` (or `y²`):
//! - [`mean_absolute_error`]
//! - [`mean_squared_error`]
//! - [`root_mean_squared_error`]
//!
//! # Examples
//!
//! ```rust
//! use slicefit::statistics::{r_squared, root_mean_squared_error};
//!
//! let y = [2.0, 4.0, 6.0, 8.0];
//! let y_fit = [2.1, 3.9, 6.0, 8.2];
//!
//! let r2 = r_squared(y.into_iter(), y_fit.into_iter()).unwrap();
//! assert!(r2 > 0.99 && r2 <= 1.0);
//!
//! let rmse = root_mean_squared_error(y.into_iter(), y_fit.into_iter());
//! assert!(rmse < 0.2);
//! ```
use crate::{
    error::{Error, Result},
    value::Value,
};

/// Running sums over `(y, y_fit)` pairs
struct Residuals<T: Value> {
    n: T,
    sum_squared: T,
    sum_absolute: T,
}
impl<T: Value> Residuals<T> {
    fn collect(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> Self {
        y.zip(y_fit).fold(
            Self {
                n: T::zero(),
                sum_squared: T::zero(),
                sum_absolute: T::zero(),
            },
            |mut acc, (y, y_fit)| {
                let e = y - y_fit;
                acc.n += T::one();
                acc.sum_squared += e * e;
                acc.sum_absolute += Value::abs(e);
                acc
            },
        )
    }
}

/// Estimates the variance of the noise left in the data after the fit.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// σ² = SS_res / (n - k)
/// where
///   SS_res = Σ (y_i - y_fit_i)², n = number of samples, k = number of coefficients
/// ```
/// </div>
///
/// An interpolating fit (`n == k`) has no degrees of freedom left, and returns zero.
///
/// # Example
/// ```rust
/// # use slicefit::statistics::residual_variance;
/// // Residuals 0.5, -0.5, 0.5 over 3 samples with 2 coefficients
/// let y = [1.0, 2.0, 4.0];
/// let y_fit = [0.5, 2.5, 3.5];
/// let variance = residual_variance(y.into_iter(), y_fit.into_iter(), 2.0);
/// assert_eq!(variance, 0.75);
/// ```
pub fn residual_variance<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
    k: T,
) -> T {
    let r = Residuals::collect(y, y_fit);
    if r.n == k {
        T::zero()
    } else {
        r.sum_squared / (r.n - k)
    }
}

/// Coefficient of determination of a fit.
///
/// `1` means the fit passes through every sample; `0` means it does no better
/// than the horizontal line `y = mean(y)`.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = clamp(1 - SS_res / SS_tot, 0, 1)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - mean(y))²
/// ```
///
/// When every observed `y` is the same value `c`, the ratio has no value. The data is
/// checked for this directly, since `mean(y)` can round away from `c` and leave `SS_tot`
/// a tiny nonzero number. The fit then scores `1` if it reproduces the samples, meaning
/// `SS_res ≤ ε · n · max(1, c²)`, and is rejected otherwise.
///
/// A non-finite `SS_res` (a degraded solve) scores `0`.
/// </div>
///
/// # Errors
/// - [`Error::NoData`] if there are no samples
/// - [`Error::UndefinedFitQuality`] if every `y` is the same and the fit misses the samples
///
/// # Example
/// ```rust
/// # use slicefit::statistics::r_squared;
/// let y = [0.0, 2.0, 4.0];
/// let flat = [2.0, 2.0, 2.0];
/// assert_eq!(r_squared(y.into_iter(), flat.into_iter()).unwrap(), 0.0);
/// ```
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> Result<T> {
    r_squared_with_n(y, y_fit).map(|(r2, _)| r2)
}

/// R² with a penalty for each coefficient in the model.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R²_adj = R² - (1 - R²) · k / (n - k)
/// ```
/// with `R²` from [`r_squared`], `n` samples and `k` coefficients.
/// </div>
///
/// Unlike R² this is not clamped, and goes negative for a poor fit.
/// It is NaN when `n <= k` and R² is below 1.
///
/// # Errors
/// Same as [`r_squared`].
///
/// # Example
/// ```rust
/// # use slicefit::statistics::{adjusted_r_squared, r_squared};
/// let y = [1.0, 3.0, 2.0, 5.0, 4.0];
/// let y_fit = [1.4, 2.2, 3.0, 3.8, 4.6];
/// let r2 = r_squared(y.into_iter(), y_fit.into_iter()).unwrap();
/// let r2_adj = adjusted_r_squared(y.into_iter(), y_fit.into_iter(), 2.0).unwrap();
/// assert!(r2_adj < r2);
/// ```
pub fn adjusted_r_squared<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
    k: T,
) -> Result<T> {
    let (r2, n) = r_squared_with_n(y, y_fit)?;
    if r2 == T::one() {
        return Ok(r2);
    }
    if n <= k {
        return Ok(<T as num_traits::float::FloatCore>::nan());
    }

    Ok(r2 - (T::one() - r2) * k / (n - k))
}

/// Returns (R², n)
fn r_squared_with_n<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> Result<(T, T)> {
    let pairs: Vec<(T, T)> = y.zip(y_fit).collect();
    if pairs.is_empty() {
        return Err(Error::NoData);
    }

    let n = T::from_positive_int(pairs.len());
    let y_mean = mean(pairs.iter().map(|&(y, _)| y));

    let ss_residual = Residuals::collect(pairs.iter().map(|p| p.0), pairs.iter().map(|p| p.1)).sum_squared;
    let ss_total = pairs
        .iter()
        .fold(T::zero(), |acc, &(y, _)| acc + Value::powi(y - y_mean, 2));

    if !ss_residual.is_finite_value() {
        return Ok((T::zero(), n));
    }

    // The mean of identical values can round away from them, leaving a tiny nonzero ss_total
    let first = pairs[0].0;
    let flat = pairs.iter().all(|&(y, _)| y == first);
    if flat || ss_total == T::zero() {
        let scale = nalgebra::RealField::max(T::one(), first * first);
        return if ss_residual <= T::epsilon() * n * scale {
            Ok((T::one(), n))
        } else {
            Err(Error::UndefinedFitQuality)
        };
    }

    let r2 = T::one() - ss_residual / ss_total;
    Ok((nalgebra::RealField::clamp(r2, T::zero(), T::one()), n))
}

/// Arithmetic mean of a sequence. NaN for an empty sequence.
///
/// ```rust
/// # use slicefit::statistics::mean;
/// assert_eq!(mean([1.0, 2.0, 6.0].into_iter()), 3.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let (sum, count) = data.fold((T::zero(), T::zero()), |(sum, count), v| (sum + v, count + T::one()));
    sum / count
}

/// Mean absolute error, `Σ |y_i - y_fit_i| / n`. NaN for empty input.
///
/// # Example
/// ```rust
/// # use slicefit::statistics::mean_absolute_error;
/// let y = [0.0, 1.0, 2.0, 3.0];
/// let y_fit = [0.5, 1.0, 1.0, 3.5];
/// assert_eq!(mean_absolute_error(y.into_iter(), y_fit.into_iter()), 0.5);
/// ```
pub fn mean_absolute_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let r = Residuals::collect(y, y_fit);
    r.sum_absolute / r.n
}

/// Mean squared error, `Σ (y_i - y_fit_i)² / n`. NaN for empty input.
///
/// This is in units of `y²` and depends on the scale of the data; use
/// [`r_squared`] to judge how good a fit is.
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    let r = Residuals::collect(y, y_fit);
    r.sum_squared / r.n
}

/// Root mean squared error, `√MSE`, in the units of `y`.
pub fn root_mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    nalgebra::ComplexField::sqrt(mean_squared_error(y, y_fit))
}
