use std::borrow::Cow;

use nalgebra::{DMatrix, DVector};

use crate::{
    basis::MonomialBasis,
    config::FitConfig,
    display::Equation,
    error::{Error, Result},
    normalization::Normalizer,
    precision::{self, round_coefficients},
    sampling::SampledCurve,
    solver::{GaussianSolver, Solution},
    statistics,
    value::{CoordExt, Point, Value},
    Polynomial,
};

/// A request to fit one polynomial to one point set.
///
/// # Example
/// ```
/// # use slicefit::{FitRequest, value::points_from_tuples};
/// let points = points_from_tuples::<f64>(&[(0.0, 1.0), (1.0, 2.0), (2.0, 5.0), (3.0, 10.0)]);
/// let result = FitRequest::new(&points, 2).fit().unwrap();
///
/// assert_eq!(result.coefficients.len(), 3);
/// assert!((result.coefficients[2] - 1.0).abs() < 1e-4);
/// assert!(!result.degraded);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FitRequest<'data, T: Value = f64> {
    /// The observed samples, in any order
    pub points: Cow<'data, [Point<T>]>,

    /// Requested polynomial degree, at least 1
    pub degree: usize,

    /// Significant digits kept on each coefficient
    pub precision: usize,
}
impl<'data, T: Value> FitRequest<'data, T> {
    /// Creates a request with the default precision of 15 significant digits.
    pub fn new(points: impl Into<Cow<'data, [Point<T>]>>, degree: usize) -> Self {
        Self {
            points: points.into(),
            degree,
            precision: precision::DEFAULT_PRECISION,
        }
    }

    /// Sets the significant digits kept on each coefficient
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Checks the request without solving anything, returning the domain normalizer.
    ///
    /// Checks run in this order, and the first failure is returned:
    /// 1. [`Error::NoData`] if there are no points
    /// 2. [`Error::InvalidDegree`] if `degree` is 0
    /// 3. [`Error::InsufficientData`] if there are not more points than the degree
    /// 4. [`Error::NonFinite`] if any coordinate is NaN or infinite
    /// 5. [`Error::DegenerateInput`] if every x-value is the same
    ///
    /// # Errors
    /// See above.
    pub fn validate(&self) -> Result<Normalizer<T>> {
        if self.points.is_empty() {
            return Err(Error::NoData);
        }

        if self.degree == 0 {
            return Err(Error::InvalidDegree(self.degree));
        }

        if self.points.len() <= self.degree {
            return Err(Error::InsufficientData {
                points: self.points.len(),
                degree: self.degree,
            });
        }

        Normalizer::from_points(&self.points)
    }

    /// Runs the fit with the default [`FitConfig`].
    ///
    /// # Errors
    /// See [`CurveFit::with_config`].
    pub fn fit(&self) -> Result<FitResult<T>> {
        self.fit_with(&FitConfig::default())
    }

    /// Runs the fit with the given configuration; the request's precision wins over the config's.
    ///
    /// # Errors
    /// See [`CurveFit::with_config`].
    pub fn fit_with(&self, config: &FitConfig) -> Result<FitResult<T>> {
        let config = config.with_precision(self.precision);
        let fit = CurveFit::with_config(&*self.points, self.degree, &config)?;
        Ok(fit.result())
    }
}

/// The outcome of a fit.
///
/// Produced atomically; a refit replaces it wholesale.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitResult<T: Value = f64> {
    /// Ascending coefficients in terms of the original `x`. Index `i` is the coefficient of `x^i`.
    pub coefficients: Vec<T>,

    /// Coefficient of determination, in `[0, 1]`
    pub r2: T,

    /// True if the coefficients are approximate: the solver hit a near-singular pivot,
    /// or the coefficients disagree with the solved curve (see [`CurveFit::degraded`])
    pub degraded: bool,
}

/// A polynomial least-squares fit of a point set.
///
/// The fit is solved on the normalized axis `x' = (x - x_min) / x_range` and
/// keeps both views of its coefficients:
/// - [`CurveFit::normalized_coefficients`]: what the solver produced, used for scoring and sampling
/// - [`CurveFit::coefficients`]: the same polynomial in terms of the original `x`, used for display
///
/// # Example
/// ```
/// # use slicefit::{CurveFit, value::points_from_tuples};
/// let data = points_from_tuples::<f64>(&[(0.0, 1.0), (1.0, 3.0), (2.0, 7.0)]);
/// let fit = CurveFit::new(&data, 2).unwrap();
///
/// assert_eq!(fit.equation().to_plain(), "y = x^2 + x + 1");
/// assert!((fit.r_squared() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFit<'data, T: Value = f64> {
    data: Cow<'data, [Point<T>]>,
    normalizer: Normalizer<T>,
    function: Polynomial<'static, T>,
    monomial: Vec<T>,
    r2: T,
    near_singular: Vec<usize>,
    monomial_error: T,
    degraded: bool,
    config: FitConfig,
}
impl<'data, T: Value> CurveFit<'data, T> {
    /// Turns a dataset into a basis matrix and y-values vector.
    fn create_matrix(data: &[Point<T>], basis: &MonomialBasis<T>, k: usize) -> (DMatrix<T>, DVector<T>) {
        basis.design_matrix(data, k)
    }

    /// Reduce the n by k / 1 by n into a k by k and k by 1 system.
    fn invert_matrix(matrix: &DMatrix<T>, b: &DVector<T>) -> (DMatrix<T>, DVector<T>) {
        let xtx = matrix.transpose() * matrix;
        let xtb = matrix.transpose() * b;
        (xtx, xtb)
    }

    /// Solves the normal equations by Gaussian elimination.
    fn solve_matrix(xtx: &DMatrix<T>, xtb: &DVector<T>, tolerance: T) -> Result<Solution<T>> {
        GaussianSolver::new(tolerance).solve(xtx, xtb)
    }

    /// Returns the largest `|monomial(x) - function(x)|` over the data's x-values,
    /// and `max(1, max |function(x)|)` to scale it by.
    fn monomial_agreement(data: &[Point<T>], function: &Polynomial<'_, T>, monomial: &[T]) -> (T, T) {
        let monomial = Polynomial::borrowed(monomial);
        data.x_iter().fold((T::zero(), T::one()), |(error, scale), x| {
            let y_fit = function.y(x);
            let e = Value::abs(monomial.y(x) - y_fit);
            let error = if e > error || !e.is_finite_value() { e } else { error };
            (error, nalgebra::RealField::max(scale, Value::abs(y_fit)))
        })
    }

    /// Creates a new polynomial curve fit for the given data and degree, with the default [`FitConfig`].
    ///
    /// # Errors
    /// See [`CurveFit::with_config`].
    ///
    /// # Example
    /// ```
    /// # use slicefit::{CurveFit, value::Point};
    /// let data = vec![Point::new(0.0, 1.0), Point::new(1.0, 3.0), Point::new(2.0, 7.0)];
    /// let fit = CurveFit::new(&data, 2).unwrap();
    /// println!("Coefficients: {:?}", fit.coefficients());
    /// ```
    pub fn new(data: impl Into<Cow<'data, [Point<T>]>>, degree: usize) -> Result<Self> {
        Self::with_config(data, degree, &FitConfig::default())
    }

    /// Creates a new polynomial curve fit for the given data and degree.
    ///
    /// # Errors
    /// Returns an [`Error`] in the following cases, all of them detected before anything is solved:
    /// - `Error::InvalidConfig`: a `config` field is out of range
    /// - `Error::NoData`: `data` is empty
    /// - `Error::InvalidDegree`: `degree` is 0
    /// - `Error::InsufficientData`: `degree >= data.len()`
    /// - `Error::NonFinite`: a coordinate is NaN or infinite
    /// - `Error::DegenerateInput`: every x-value is identical
    ///
    /// And after solving:
    /// - `Error::UndefinedFitQuality`: every y-value is identical but the fit does not reproduce them
    /// - `Error::CastFailed`: a config value could not be represented in `T`
    ///
    /// A near-singular system is **not** an error: the fit is returned with
    /// [`CurveFit::degraded`] set. So is a fit whose original-x coefficients drift
    /// from the solved curve by more than `config.coefficient_tolerance`.
    ///
    /// # Behavior
    /// 1. Normalizes x onto `[0, 1]`
    /// 2. Builds the design matrix `A[i][j] = x'ᵢʲ` and reduces it to `AᵀA · c = Aᵀb`
    /// 3. Solves by Gaussian elimination with partial pivoting
    /// 4. Rounds each coefficient to `config.precision` significant digits
    /// 5. Scores the rounded polynomial against the data (R²)
    /// 6. Converts the coefficients back to the original `x`, and checks them against the curve
    pub fn with_config(
        data: impl Into<Cow<'data, [Point<T>]>>,
        degree: usize,
        config: &FitConfig,
    ) -> Result<Self> {
        config.validate()?;

        let request = FitRequest {
            points: data.into(),
            degree,
            precision: config.precision,
        };
        let normalizer = request.validate()?;
        let data = request.points;

        let basis = MonomialBasis::normalized(normalizer);
        let k = basis.k(degree);

        let (m, b) = Self::create_matrix(&data, &basis, k);
        let (xtx, xtb) = Self::invert_matrix(&m, &b);
        let solution = Self::solve_matrix(&xtx, &xtb, T::try_cast(config.tolerance)?)?;

        let normalized = round_coefficients(solution.coefficients(), config.precision)?;
        let monomial = round_coefficients(&normalizer.denormalize_coefs(&normalized), config.precision)?;
        let non_finite = normalized.iter().any(|c| !c.is_finite_value());

        let function = Polynomial::normalized(normalizer, normalized);
        let r2 = statistics::r_squared(data.y_iter(), data.iter().map(|p| function.y(p.x)))?;

        // Expanding around x_min cancels badly for high degrees or far-offset data
        let (monomial_error, y_scale) = Self::monomial_agreement(&data, &function, &monomial);
        let agrees = monomial_error <= T::try_cast(config.coefficient_tolerance)? * y_scale;
        if !agrees {
            log::warn!(
                "original-x coefficients drift from the fitted curve by {monomial_error:e} (scale {y_scale:e}); marking the fit degraded"
            );
        }
        let degraded = solution.degraded() || non_finite || !agrees;

        log::debug!(
            "fit degree {degree} to {} points over [{}, {}]: r² = {r2}, degraded = {degraded}",
            data.len(),
            normalizer.x_min(),
            normalizer.x_max(),
        );
        log::trace!("normalized coefficients: {:?}", function.coefficients());

        Ok(Self {
            data,
            normalizer,
            function,
            monomial,
            r2,
            near_singular: solution.near_singular_pivots().to_vec(),
            monomial_error,
            degraded,
            config: *config,
        })
    }

    /// Returns an owned version of this curve fit, with a full copy of the data.
    #[must_use]
    pub fn to_owned(&self) -> CurveFit<'static, T> {
        CurveFit {
            data: Cow::Owned(self.data.to_vec()),
            normalizer: self.normalizer,
            function: self.function.clone(),
            monomial: self.monomial.clone(),
            r2: self.r2,
            near_singular: self.near_singular.clone(),
            monomial_error: self.monomial_error,
            degraded: self.degraded,
            config: self.config,
        }
    }

    /// Returns the degree of the fitted polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.function.degree()
    }

    /// Ascending coefficients in terms of the original `x`.
    ///
    /// For example in `y(x) = 2x^2 - 3x + 1`;
    /// coefficients = [1.0, -3.0, 2.0]
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.monomial
    }

    /// Ascending coefficients of the normalized variable `x'`, as solved and rounded.
    #[must_use]
    pub fn normalized_coefficients(&self) -> &[T] {
        self.function.coefficients()
    }

    /// The domain normalizer captured from the data
    #[must_use]
    pub fn normalizer(&self) -> &Normalizer<T> {
        &self.normalizer
    }

    /// The configuration this fit was made with
    #[must_use]
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// The source data
    #[must_use]
    pub fn data(&self) -> &[Point<T>] {
        &self.data
    }

    /// `(x_min, x_max)` of the source data
    #[must_use]
    pub fn x_range(&self) -> (T, T) {
        (self.normalizer.x_min(), self.normalizer.x_max())
    }

    /// Calculates the R-squared value for the model compared to its source data.
    ///
    /// R-squared is a number between 0 and 1 that tells you how well the model explains the data:
    /// - `0` means the model explains none of the variation.
    /// - `1` means the model explains all the variation.
    ///
    /// See [`statistics::r_squared`] for the exact definition.
    #[must_use]
    pub fn r_squared(&self) -> T {
        self.r2
    }

    /// True if the coefficients are approximate. That is the case when:
    /// - the solver hit a near-singular pivot (see [`CurveFit::near_singular_pivots`])
    /// - a solved coefficient is not finite
    /// - [`CurveFit::coefficients`] disagree with the solved curve at the data's x-values by more than
    ///   `coefficient_tolerance · max(1, max |y_fit|)` (see [`CurveFit::monomial_error`])
    ///
    /// [`CurveFit::y`], R² and the sampled curve always use the solved curve,
    /// so they stay accurate when only the last condition holds.
    #[must_use]
    pub fn degraded(&self) -> bool {
        self.degraded
    }

    /// Largest `|monomial(x) - y_fit(x)|` over the data's x-values, where `monomial` is built
    /// from [`CurveFit::coefficients`] and `y_fit` is the solved curve.
    #[must_use]
    pub fn monomial_error(&self) -> T {
        self.monomial_error
    }

    /// Pivot columns the solver found below its tolerance
    #[must_use]
    pub fn near_singular_pivots(&self) -> &[usize] {
        &self.near_singular
    }

    /// Evaluates the fitted curve at any `x`, inside or outside the data's range.
    pub fn y(&self, x: T) -> T {
        self.function.y(x)
    }

    /// Evaluates the fitted curve at each of the given x-values.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<Point<T>> {
        self.function.solve(x)
    }

    /// The fitted curve evaluated at each source x
    #[must_use]
    pub fn solution(&self) -> Vec<Point<T>> {
        self.solve(self.data.x_iter())
    }

    /// Calculates the residuals of the fit, as `(x, y - y_fit)` for each source point.
    #[must_use]
    pub fn residuals(&self) -> Vec<Point<T>> {
        self.data
            .iter()
            .map(|p| Point::new(p.x, p.y - self.y(p.x)))
            .collect()
    }

    /// Computes the residual variance of the fit.
    ///
    /// See [`statistics::residual_variance`] for more details.
    #[must_use]
    pub fn residual_variance(&self) -> T {
        let k = T::from_positive_int(self.monomial.len());
        statistics::residual_variance(self.data.y_iter(), self.solution().y_iter(), k)
    }

    /// Computes the mean squared error of the fit against its source data.
    ///
    /// See [`statistics::mean_squared_error`] for more details.
    #[must_use]
    pub fn mean_squared_error(&self) -> T {
        statistics::mean_squared_error(self.data.y_iter(), self.solution().y_iter())
    }

    /// Computes the root mean squared error of the fit against its source data.
    ///
    /// See [`statistics::root_mean_squared_error`] for more details.
    #[must_use]
    pub fn root_mean_squared_error(&self) -> T {
        statistics::root_mean_squared_error(self.data.y_iter(), self.solution().y_iter())
    }

    /// Computes the mean absolute error of the fit against its source data.
    ///
    /// See [`statistics::mean_absolute_error`] for more details.
    #[must_use]
    pub fn mean_absolute_error(&self) -> T {
        statistics::mean_absolute_error(self.data.y_iter(), self.solution().y_iter())
    }

    /// Computes R² adjusted for the number of coefficients.
    ///
    /// NaN when there are exactly as many points as coefficients and R² is below 1.
    /// See [`statistics::adjusted_r_squared`] for more details.
    #[must_use]
    pub fn adjusted_r_squared(&self) -> T {
        let k = T::from_positive_int(self.monomial.len());
        statistics::adjusted_r_squared(self.data.y_iter(), self.solution().y_iter(), k)
            .unwrap_or_else(|_| <T as num_traits::float::FloatCore>::nan())
    }

    /// Samples the curve using the fit's configured extrapolation and sample count.
    ///
    /// # Errors
    /// Returns [`Error::CastFailed`] if the extrapolation factor cannot be represented in `T`.
    pub fn sample_curve(&self) -> Result<SampledCurve<T>> {
        let extrapolation = T::try_cast(self.config.extrapolation)?;
        self.sample_curve_with(extrapolation, self.config.samples)
    }

    /// Samples `samples` evenly spaced points over
    /// `[x_min - extrapolation·x_range, x_max + extrapolation·x_range]`.
    ///
    /// # Errors
    /// See [`SampledCurve::new`].
    pub fn sample_curve_with(&self, extrapolation: T, samples: usize) -> Result<SampledCurve<T>> {
        SampledCurve::new(&self.function, &self.normalizer, extrapolation, samples)
    }

    /// Returns a reference to the fitted polynomial, over the normalized axis.
    #[must_use]
    pub fn as_polynomial(&self) -> &Polynomial<'static, T> {
        &self.function
    }

    /// The fitted polynomial in terms of the original `x`.
    #[must_use]
    pub fn as_monomial(&self) -> Polynomial<'static, T> {
        Polynomial::owned(self.monomial.clone())
    }

    /// The fitted equation, in terms of the original `x`.
    ///
    /// Uses the configured term threshold and display precision.
    #[must_use]
    pub fn equation(&self) -> Equation {
        let threshold = T::try_cast(self.config.term_threshold).unwrap_or(T::zero());
        Equation::with_options(&self.monomial, threshold, self.config.display_precision)
    }

    /// The coefficients, R² and degraded flag as a standalone result.
    #[must_use]
    pub fn result(&self) -> FitResult<T> {
        FitResult {
            coefficients: self.monomial.clone(),
            r2: self.r2,
            degraded: self.degraded,
        }
    }

    /// Returns the properties of the curve fit.
    ///
    /// This is a comprehensive summary of the fit's characteristics.
    #[must_use]
    pub fn properties(&self) -> FitProperties<T> {
        FitProperties {
            degree: self.degree(),
            data_points: self.data.len(),
            coefficients: self.monomial.clone(),
            normalized_coefficients: self.normalized_coefficients().to_vec(),
            r_squared: self.r2,
            adjusted_r_squared: self.adjusted_r_squared(),
            mse: self.mean_squared_error(),
            rmse: self.root_mean_squared_error(),
            monomial_error: self.monomial_error,
            degraded: self.degraded,
        }
    }
}

impl<T: Value> From<CurveFit<'_, T>> for FitResult<T> {
    fn from(fit: CurveFit<'_, T>) -> Self {
        FitResult {
            coefficients: fit.monomial,
            r2: fit.r2,
            degraded: fit.degraded,
        }
    }
}

impl<T: Value> std::fmt::Display for CurveFit<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.equation())
    }
}

/// A set of diagnostic properties for a curve fit.
///
/// Can be serialized to JSON or other formats.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct FitProperties<T: Value> {
    /// The degree of the fitted polynomial.
    pub degree: usize,

    /// The number of data points used in the fit.
    pub data_points: usize,

    /// The coefficients of the fitted polynomial, in terms of the original `x`.
    pub coefficients: Vec<T>,

    /// The coefficients of the fitted polynomial, in terms of the normalized `x'`.
    pub normalized_coefficients: Vec<T>,

    /// The R² value of the fit.
    pub r_squared: T,

    /// The adjusted R² value of the fit.
    pub adjusted_r_squared: T,

    /// The mean squared error of the fit.
    pub mse: T,

    /// The root mean squared error of the fit.
    pub rmse: T,

    /// Largest disagreement between `coefficients` and the solved curve at the data's x-values.
    pub monomial_error: T,

    /// Whether the coefficients are approximate. See [`CurveFit::degraded`].
    pub degraded: bool,
}
