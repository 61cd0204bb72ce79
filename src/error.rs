//! Error types for polynomial curve fitting
//!
//! This module defines the failure modes encountered when validating, fitting,
//! or scoring a point set, along with a convenient `Result` alias.
//!
//! Numerical degradation of the solver is deliberately *not* an error; see
//! [`crate::solver::Solution::degraded`].

/// Errors that can occur during polynomial curve fitting.
///
/// Input validation errors ([`Error::NoData`], [`Error::DegenerateInput`],
/// [`Error::InsufficientData`], [`Error::InvalidDegree`]) are raised before any
/// linear system is built, so a caller's previous fit is never disturbed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Cannot perform curve fitting because there is no data.
    #[error("No data available for fitting")]
    NoData,

    /// Every x-value in the point set is identical.
    ///
    /// The normalization range would be zero, so no fit can be made.
    #[error("All x-values are identical; the data has no horizontal range to fit over")]
    DegenerateInput,

    /// Fewer points than the requested degree needs.
    ///
    /// A polynomial of degree `d` needs at least `d + 1` points.
    #[error("A degree {degree} fit needs at least {} points, but only {points} were given", .degree + 1)]
    InsufficientData {
        /// Number of points supplied
        points: usize,
        /// Requested polynomial degree
        degree: usize,
    },

    /// The requested degree is not a valid fitting degree (must be at least 1).
    #[error("Polynomial degree `{0}` is not supported; the degree must be at least 1")]
    InvalidDegree(usize),

    /// The data has zero variance in `y`, and the fit does not reproduce it.
    ///
    /// R² is undefined in that case.
    #[error("R² is undefined: every y-value is identical but the fit does not pass through them")]
    UndefinedFitQuality,

    /// The input contains NaN or infinite coordinates.
    #[error("Point set contains non-finite coordinates")]
    NonFinite,

    /// The linear system handed to the solver is not square, or the
    /// right-hand side does not match it.
    #[error("Cannot solve a {rows}x{cols} system against a right-hand side of length {rhs}")]
    DimensionMismatch {
        /// Rows of the coefficient matrix
        rows: usize,
        /// Columns of the coefficient matrix
        cols: usize,
        /// Length of the right-hand side
        rhs: usize,
    },

    /// A [`crate::FitConfig`] value is out of range.
    #[error("Invalid fit configuration: {0}")]
    InvalidConfig(&'static str),

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,
}

/// Result type for the polynomial curve fitting
pub type Result<T> = std::result::Result<T, Error>;
