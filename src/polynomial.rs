use std::borrow::Cow;

use crate::{
    basis::MonomialBasis,
    display::Equation,
    normalization::Normalizer,
    value::{Linspace, Point, Value},
};

/// A polynomial function in ascending monomial form, optionally over a normalized domain.
///
/// Unlike [`crate::CurveFit`], this struct is **not tied to any dataset**, making it a canonical
/// function that can be evaluated for **any x-value** without range restrictions.
///
/// `coefficients[j]` is the coefficient of `x^j` (or `x'^j` when normalized).
///
/// # Type Parameters
/// - `'a`: Lifetime for borrowed coefficients, if used.
/// - `T`: Numeric type for the coefficients, default is `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<'a, T: Value = f64> {
    basis: MonomialBasis<T>,
    coefficients: Cow<'a, [T]>,
}
impl<'a, T: Value> Polynomial<'a, T> {
    /// Creates a polynomial over plain `x` from borrowed coefficients.
    ///
    /// Usable in const contexts; see [`crate::function!`].
    ///
    /// # Example
    /// ```
    /// # use slicefit::Polynomial;
    /// const P: Polynomial<'static> = Polynomial::borrowed(&[1.0, 2.0, 3.0]);
    /// assert_eq!(P.y(2.0), 17.0);
    /// ```
    #[must_use]
    pub const fn borrowed(coefficients: &'a [T]) -> Self {
        Self {
            basis: MonomialBasis::default(),
            coefficients: Cow::Borrowed(coefficients),
        }
    }

    /// Creates a polynomial over plain `x` from owned coefficients.
    #[must_use]
    pub fn owned(coefficients: Vec<T>) -> Polynomial<'static, T> {
        Polynomial {
            basis: MonomialBasis::default(),
            coefficients: Cow::Owned(coefficients),
        }
    }

    /// Creates a polynomial evaluated on the normalized axis of `normalizer`.
    ///
    /// `coefficients[j]` multiplies `x'^j` where `x' = (x - x_min) / x_range`.
    #[must_use]
    pub fn normalized(normalizer: Normalizer<T>, coefficients: impl Into<Cow<'a, [T]>>) -> Self {
        Self {
            basis: MonomialBasis::normalized(normalizer),
            coefficients: coefficients.into(),
        }
    }

    /// Converts the polynomial into an owned version.
    #[must_use]
    pub fn into_owned(self) -> Polynomial<'static, T> {
        Polynomial {
            basis: self.basis,
            coefficients: Cow::Owned(self.coefficients.into_owned()),
        }
    }

    /// Returns the ascending coefficients.
    ///
    /// For example in `y(x) = 2x^2 - 3x + 1`;
    /// coefficients = [1.0, -3.0, 2.0]
    #[must_use]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Returns the degree of the polynomial (`coefficients.len() - 1`).
    ///
    /// An empty coefficient list is treated as the zero polynomial, of degree 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// The domain normalizer, if the coefficients are in normalized space.
    #[must_use]
    pub fn normalizer(&self) -> Option<&Normalizer<T>> {
        self.basis.normalizer()
    }

    /// Evaluates the polynomial at a given (original) x-value.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// `x` is normalized first if the polynomial has a normalizer, then evaluated with Horner's method:
    /// ```math
    /// y(x) = c₀ + x'(c₁ + x'(c₂ + …))
    /// ```
    /// </div>
    ///
    /// # Example
    /// ```
    /// # use slicefit::Polynomial;
    /// let poly = Polynomial::borrowed(&[1.0, 2.0, 3.0]); // Represents 1 + 2x + 3x^2
    /// let y = poly.y(2.0); // evaluates 1 + 2*2 + 3*2^2 = 17.0
    /// assert_eq!(y, 17.0);
    /// ```
    pub fn y(&self, x: T) -> T {
        let x = self.basis.normalize_x(x);
        self.basis.evaluate(x, &self.coefficients)
    }

    /// Evaluates the polynomial at each of the given x-values.
    pub fn solve(&self, x: impl IntoIterator<Item = T>) -> Vec<Point<T>> {
        x.into_iter().map(|x| Point::new(x, self.y(x))).collect()
    }

    /// Evaluates the polynomial at `n` evenly spaced points over `start..=end`.
    ///
    /// Good for generating synthetic data sets:
    /// ```
    /// # use slicefit::function;
    /// function!(f(x) = 2.0 x^2 + 1.0);
    /// let data = f.solve_linspace(0.0, 3.0, 4);
    /// assert_eq!(data[3].y, 19.0);
    /// ```
    pub fn solve_linspace(&self, start: T, end: T, n: usize) -> Vec<Point<T>> {
        self.solve(Linspace::new(start, end, n))
    }

    /// Rewrites the polynomial with coefficients in terms of the original `x`.
    ///
    /// A polynomial without a normalizer is returned unchanged.
    ///
    /// # Example
    /// ```
    /// # use slicefit::{Polynomial, normalization::Normalizer};
    /// // y = 1 + 9x'^2 with x' = x / 3
    /// let n = Normalizer::<f64>::new(0.0, 3.0).unwrap();
    /// let p = Polynomial::normalized(n, vec![1.0, 0.0, 9.0]);
    ///
    /// let m = p.as_monomial();
    /// assert!((m.coefficients()[2] - 1.0).abs() < 1e-12);
    /// assert!((m.y(2.0) - p.y(2.0)).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn as_monomial(&self) -> Polynomial<'static, T> {
        match self.basis.normalizer() {
            Some(normalizer) => Polynomial::owned(normalizer.denormalize_coefs(&self.coefficients)),
            None => Polynomial::owned(self.coefficients.to_vec()),
        }
    }

    /// Returns the structured equation, in terms of the original `x`.
    #[must_use]
    pub fn equation(&self) -> Equation {
        Equation::new(self.as_monomial().coefficients())
    }
}
impl<T: Value> std::fmt::Display for Polynomial<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.equation())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_close, function};

    #[test]
    fn test_borrowed_and_owned() {
        let coefs = [3.0, 0.0, -2.0];
        let p = Polynomial::borrowed(&coefs);
        assert_eq!(p.degree(), 2);
        assert_eq!(p.coefficients(), &coefs);
        assert!(p.normalizer().is_none());

        let owned = p.clone().into_owned();
        assert_eq!(owned, Polynomial::owned(coefs.to_vec()));
        assert_eq!(owned.y(1.0), 1.0);
    }

    #[test]
    fn test_zero_polynomial() {
        let p = Polynomial::<f64>::owned(vec![]);
        assert_eq!(p.degree(), 0);
        assert_eq!(p.y(12.0), 0.0);
        assert_eq!(p.to_string(), "y = 0");
    }

    #[test]
    fn test_function_macro() {
        function!(f(x) = 5.0 x^3 - 4.0 x + 2.5);
        assert_eq!(f.coefficients(), &[2.5, -4.0, 0.0, 5.0]);
        assert_eq!(f.y(2.0), 34.5);
        assert_eq!(f.to_string(), "y = 5x³ − 4x + 2.5");
    }

    #[test]
    fn test_normalized_evaluation() {
        // x' = (x - 10) / 10, y = x'^2
        let n = Normalizer::new(10.0, 20.0).unwrap();
        let p = Polynomial::normalized(n, vec![0.0, 0.0, 1.0]);
        assert_eq!(p.y(10.0), 0.0);
        assert_eq!(p.y(15.0), 0.25);
        assert_eq!(p.y(0.0), 1.0);

        let m = p.as_monomial();
        for x in [-5.0, 0.0, 12.5, 20.0, 31.0] {
            assert_close!(m.y(x), p.y(x), 1e-9);
        }

        // (x - 10)² / 100 = 0.01x² - 0.2x + 1
        assert_eq!(p.to_string(), "y = 0.01x² − 0.2x + 1");
    }

    #[test]
    fn test_solve() {
        let p = Polynomial::borrowed(&[1.0, 1.0]);
        let points = p.solve([0.0, 2.0, -1.0]);
        assert_eq!(
            points,
            vec![Point::new(0.0, 1.0), Point::new(2.0, 3.0), Point::new(-1.0, 0.0)]
        );

        let grid = p.solve_linspace(0.0, 1.0, 3);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[1], Point::new(0.5, 1.5));
    }
}
