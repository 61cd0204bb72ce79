//! Tunable constants for a fit.
//!
//! Every field has a default, so a config file only needs to name what it changes:
//! ```
//! # use slicefit::FitConfig;
//! let config: FitConfig = serde_json::from_str(r#"{ "samples": 200 }"#).unwrap();
//! assert_eq!(config.samples, 200);
//! assert_eq!(config.extrapolation, 1.5);
//! ```
use serde::{Deserialize, Serialize};

use crate::{
    display, precision,
    error::{Error, Result},
    solver,
};

/// Default number of points in a sampled curve
pub const DEFAULT_SAMPLES: usize = 500;

/// Default extrapolation, as a multiple of the data's x-range added on each side
pub const DEFAULT_EXTRAPOLATION: f64 = 1.5;

/// Default relative disagreement allowed between the original-x coefficients and the solved curve
pub const DEFAULT_COEFFICIENT_TOLERANCE: f64 = 1e-6;

/// Numerical and presentation settings for [`crate::CurveFit`].
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FitConfig {
    /// Pivot magnitude below which the solver treats a column as singular.
    pub tolerance: f64,

    /// Significant digits kept on each solved coefficient.
    pub precision: usize,

    /// Largest disagreement, relative to `max(1, max |y_fit|)`, allowed between the
    /// original-x coefficients and the solved curve at the data's x-values.
    /// A fit that exceeds it is marked degraded.
    pub coefficient_tolerance: f64,

    /// Number of points in the sampled curve, both ends included.
    pub samples: usize,

    /// How far the sampled curve extends past the data, in multiples of the x-range.
    pub extrapolation: f64,

    /// Coefficient magnitude below which a term is left out of the equation.
    pub term_threshold: f64,

    /// Decimals shown on each coefficient in the equation.
    pub display_precision: usize,
}
impl Default for FitConfig {
    fn default() -> Self {
        Self {
            tolerance: solver::DEFAULT_TOLERANCE,
            precision: precision::DEFAULT_PRECISION,
            coefficient_tolerance: DEFAULT_COEFFICIENT_TOLERANCE,
            samples: DEFAULT_SAMPLES,
            extrapolation: DEFAULT_EXTRAPOLATION,
            term_threshold: display::DEFAULT_THRESHOLD,
            display_precision: display::DEFAULT_PRECISION,
        }
    }
}
impl FitConfig {
    /// Sets the solver's pivot tolerance
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the significant digits kept on each coefficient
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the relative disagreement allowed between the two coefficient views
    #[must_use]
    pub fn with_coefficient_tolerance(mut self, coefficient_tolerance: f64) -> Self {
        self.coefficient_tolerance = coefficient_tolerance;
        self
    }

    /// Sets the number of points in the sampled curve
    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Sets the extrapolation factor
    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: f64) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Sets the magnitude below which equation terms are dropped
    #[must_use]
    pub fn with_term_threshold(mut self, term_threshold: f64) -> Self {
        self.term_threshold = term_threshold;
        self
    }

    /// Sets the decimals shown on each coefficient in the equation
    #[must_use]
    pub fn with_display_precision(mut self, display_precision: usize) -> Self {
        self.display_precision = display_precision;
        self
    }

    /// Checks that every field is in range.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] naming the first field that is out of range.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::InvalidConfig("tolerance must be positive and finite"));
        }

        if !(1..=precision::MAX_PRECISION).contains(&self.precision) {
            return Err(Error::InvalidConfig("precision must be between 1 and 17"));
        }

        if !(self.coefficient_tolerance.is_finite() && self.coefficient_tolerance > 0.0) {
            return Err(Error::InvalidConfig(
                "coefficient tolerance must be positive and finite",
            ));
        }

        if self.samples < 2 {
            return Err(Error::InvalidConfig("samples must be at least 2"));
        }

        if !(self.extrapolation.is_finite() && self.extrapolation >= 0.0) {
            return Err(Error::InvalidConfig(
                "extrapolation must be finite and non-negative",
            ));
        }

        if !(self.term_threshold.is_finite() && self.term_threshold >= 0.0) {
            return Err(Error::InvalidConfig(
                "term threshold must be finite and non-negative",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FitConfig::default();
        assert_eq!(config.tolerance, 1e-14);
        assert_eq!(config.precision, 15);
        assert_eq!(config.coefficient_tolerance, 1e-6);
        assert_eq!(config.samples, 500);
        assert_eq!(config.extrapolation, 1.5);
        assert_eq!(config.term_threshold, 1e-9);
        assert_eq!(config.display_precision, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = FitConfig::default()
            .with_samples(50)
            .with_extrapolation(0.0)
            .with_precision(6)
            .with_tolerance(1e-10)
            .with_coefficient_tolerance(1e-3)
            .with_term_threshold(1e-6)
            .with_display_precision(2);
        assert_eq!(config.samples, 50);
        assert_eq!(config.extrapolation, 0.0);
        assert_eq!(config.precision, 6);
        assert_eq!(config.tolerance, 1e-10);
        assert_eq!(config.coefficient_tolerance, 1e-3);
        assert_eq!(config.term_threshold, 1e-6);
        assert_eq!(config.display_precision, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let base = FitConfig::default();
        assert_eq!(
            base.with_samples(1).validate(),
            Err(Error::InvalidConfig("samples must be at least 2"))
        );
        assert!(base.with_precision(0).validate().is_err());
        assert!(base.with_precision(18).validate().is_err());
        assert!(base.with_tolerance(0.0).validate().is_err());
        assert!(base.with_tolerance(f64::NAN).validate().is_err());
        assert!(base.with_coefficient_tolerance(0.0).validate().is_err());
        assert!(base.with_coefficient_tolerance(f64::INFINITY).validate().is_err());
        assert!(base.with_extrapolation(-0.5).validate().is_err());
        assert!(base.with_extrapolation(f64::INFINITY).validate().is_err());
        assert!(base.with_term_threshold(-1.0).validate().is_err());
    }

    #[test]
    fn test_json() {
        let config: FitConfig =
            serde_json::from_str(r#"{ "display-precision": 2, "extrapolation": 0.5 }"#).unwrap();
        assert_eq!(config.display_precision, 2);
        assert_eq!(config.extrapolation, 0.5);
        assert_eq!(config.samples, DEFAULT_SAMPLES);

        let json = serde_json::to_string(&config).unwrap();
        let back: FitConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        assert!(serde_json::from_str::<FitConfig>(r#"{ "sample": 3 }"#).is_err());

        let config: FitConfig = serde_json::from_str(r#"{ "coefficient-tolerance": 1e-9 }"#).unwrap();
        assert_eq!(config.coefficient_tolerance, 1e-9);
    }
}
