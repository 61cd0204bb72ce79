//! Macros for building synthetic data and checking fits in unit tests.
//!
//! # General Purpose Macros
//!
//! ### [`crate::function!`]
//!
//! DSL for generating polynomials. Great for generating synthetic data sets!
//! ```rust
//! slicefit::function!(const F(x) = 5.0 x^4 - 4.0 x^3 + 2.5);
//! let data = F.solve_linspace(0.0, 10.0, 11);
//! assert_eq!(data.len(), 11);
//! ```
//!
//! # Fit quality assertions
//!
//! ### [`crate::assert_close`]
//! Asserts that two floating-point values are approximately equal.
//! - Uses the machine epsilon for the floating-point type as the tolerance, unless one is given.
//!
//! ### [`crate::assert_all_close`]
//! Element-wise [`crate::assert_close`] over two sequences of the same length.
//!
//! ### [`crate::assert_y`]
//! Asserts that a fit or function produces an expected `y` at a given `x`.
//!
//! ### [`crate::assert_r_squared`]
//! Asserts that a fit's R² against its source data is above a threshold.
//! See [`crate::CurveFit::r_squared`] for more details.

/// Macro to generate a polynomial function in ascending monomial form.
///
/// This is good for using as a data source for testing
/// - Terms can be listed in any order
/// - Same-power terms are summed
/// - Missing terms are 0
///
/// The only major limitation is that it needs a space between the coefficient and the variable:
/// - `20.0 x^3` is valid, but `20.0x^3` is not.
/// - `x` on its own is not valid; write `1.0 x`.
///
/// Syntax:
/// ```text
/// function!(
///     [const | static]?
///     [<name>(<x>) = ]?
///     [ [+]? <coef> [ x [ ^ <deg> ]? ]? ]+
/// )
/// ```
///
/// # Example
/// ```
/// # use slicefit::function;
/// function!(test(x) = 20.0 x^3 + 3.0 x^2 - 2.0 x + 4.0); // Normal let-binding
/// function!(const TEST2(x) = 1.0 x^2 - 1.0); // const can live outside functions
/// let test3 = function!(2.0 x - 2.0); // No binding
///
/// assert_eq!(test.y(1.0), 25.0);
/// assert_eq!(TEST2.y(3.0), 8.0);
/// assert_eq!(test3.y(1.0), 0.0);
/// ```
#[macro_export]
macro_rules! function {
    ($( $(+)? $c0:literal $(x $( ^ $d0:literal )?)? )+) => { {
        const LEN: usize = {
            let mut len = 0; $(
                let d2 = 1 $(+ 1 $(* $d0 as usize)?)?;
                if d2 > len { len = d2; }
            )+
            len
        };

        const COEFS: [f64; LEN] = {
            let mut coefs = [0.0; LEN];
            // coef alone is power 0, 1 if just x, or the power if specified
            $( coefs[ 0 $(+ 1 $(* $d0 as usize)?)? ] += $c0 as f64; )+
            coefs
        };

        $crate::Polynomial::borrowed(&COEFS)
    }};

    ($name:ident (x) = $($rest:tt)+ ) => {
        let $name: $crate::Polynomial = $crate::function!($($rest)+);
    };

    (const $name:ident (x) = $($rest:tt)+ ) => {
        const $name: $crate::Polynomial<'static> = $crate::function!($($rest)+);
    };

    (static $name:ident (x) = $($rest:tt)+ ) => {
        static $name: $crate::Polynomial<'static> = $crate::function!($($rest)+);
    };
}

/// Asserts that two floating-point values are approximately equal.
///
/// - `assert_close!(a, b)` uses the machine epsilon of the value type as an absolute tolerance.
/// - `assert_close!(a, b, tolerance)` uses the given absolute tolerance.
///
/// # Example
/// ```
/// # use slicefit::assert_close;
/// assert_close!(1.0 + 1e-16, 1.0);
/// assert_close!(0.1 + 0.2, 0.3, 1e-12);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr) => {{
        let a = $a;
        $crate::assert_close!(a, $b, $crate::test::epsilon_of(a))
    }};

    ($a:expr, $b:expr, $tolerance:expr) => { #[allow(clippy::float_cmp)] {
        let (a, b, tolerance) = ($a, $b, $tolerance);
        assert!(
            a == b || $crate::value::Value::abs(a - b) <= tolerance,
            "Values not close: {a} != {b} (tolerance {tolerance})"
        );
    }};
}

/// Asserts that two sequences of floating-point values are approximately equal element-wise.
///
/// # Parameters
/// - `$src`: Source sequence (implements `len()` and `iter()`).
/// - `$dst`: Destination sequence (same length as `$src`).
/// - `$tolerance`: *(optional)* Absolute tolerance. Defaults to machine epsilon.
///
/// # Panics
/// - If the lengths differ.
/// - If any pair of elements differ by more than the tolerance.
///
/// # Examples
/// ```
/// # use slicefit::assert_all_close;
/// let a = vec![1.0, 2.0, 3.0];
/// let b = [1.0 + 1e-16, 2.0, 3.0];
///
/// assert_all_close!(a, b);
/// assert_all_close!(a, [1.0001, 2.0, 3.0], 1e-3);
/// ```
#[macro_export]
macro_rules! assert_all_close {
    ($src:expr, $dst:expr) => {{
        let (src, dst) = (&$src, &$dst);
        assert_eq!(src.len(), dst.len(), "{} elements - length mismatch", src.len());
        for (s, d) in src.iter().zip(dst.iter()) {
            $crate::assert_close!(*s, *d);
        }
    }};

    ($src:expr, $dst:expr, $tolerance:expr) => {{
        let (src, dst, tolerance) = (&$src, &$dst, $tolerance);
        assert_eq!(src.len(), dst.len(), "{} elements - length mismatch", src.len());
        for (s, d) in src.iter().zip(dst.iter()) {
            $crate::assert_close!(*s, *d, tolerance);
        }
    }};
}

/// Asserts that a fit or function produces an expected `y` at a given `x`.
///
/// The tolerance defaults to machine epsilon.
///
/// # Example
/// ```
/// # use slicefit::{function, assert_y};
/// function!(poly(x) = 1.0 + 2.0 x^1 + 3.0 x^2);
/// assert_y!(poly, 2.0, 17.0);
/// ```
#[macro_export]
macro_rules! assert_y {
    ($function:expr, $x:expr, $expected:expr $(, $tolerance:expr)?) => {{
        let function = &$function;
        let x = $x;
        $crate::assert_close!(function.y(x), $expected $(, $tolerance)?);
    }};
}

/// Macro for asserting that a fitted curve meets a minimum R² threshold in tests.
/// This is a measure of how well the curve explains how wiggly the data is.
///
/// See [`crate::CurveFit::r_squared`] for more details.
///
/// # Syntax
///
/// `assert_r_squared!(<CurveFit>, <threshold>)`
///
/// - `CurveFit`: The fitted curve to test.
/// - `threshold`: Minimum acceptable R² value (between 0.0 and 1.0). Defaults to `0.9` if omitted.
///
/// # Example
/// ```rust
/// # use slicefit::{CurveFit, assert_r_squared, value::points_from_tuples};
/// let data = points_from_tuples(&[(0.0, 1.1), (1.0, 1.9), (2.0, 5.2), (3.0, 9.8)]);
/// let fit = CurveFit::new(&data, 2).unwrap();
/// assert_r_squared!(fit, 0.95);
/// ```
#[macro_export]
macro_rules! assert_r_squared {
    ($fit:expr) => {
        $crate::assert_r_squared!($fit, 0.9)
    };

    ($fit:expr, $r2:expr) => {{
        let fit = &$fit;
        let threshold = $r2;
        let r2 = fit.r_squared();

        if r2 < threshold || !$crate::value::Value::is_finite_value(&r2) {
            panic!(
                "R² = {r2} is below {threshold} (degree {}, degraded: {})",
                fit.degree(),
                fit.degraded()
            );
        }
    }};
}

/// Machine epsilon for the type of `value`; used by [`crate::assert_close`].
#[doc(hidden)]
pub fn epsilon_of<T: crate::value::Value>(_value: T) -> T {
    T::epsilon()
}

/// Adds seeded gaussian noise to the `y` channel of a point set.
#[cfg(test)]
pub(crate) fn apply_normal_noise(
    points: Vec<crate::value::Point<f64>>,
    std_dev: f64,
    seed: u64,
) -> Vec<crate::value::Point<f64>> {
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, std_dev).expect("std_dev must be finite and non-negative");
    points
        .into_iter()
        .map(|p| crate::value::Point::new(p.x, p.y + normal.sample(&mut rng)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::value::CoordExt;

    #[test]
    fn test_function_macro_forms() {
        function!(a(x) = 1.0 x^2 + 2.0 x^2 - 3.0);
        assert_eq!(a.coefficients(), &[-3.0, 0.0, 3.0]);

        let b = function!(+ 4.0 x - 1.0 x);
        assert_eq!(b.coefficients(), &[0.0, 3.0]);

        function!(const C(x) = 7.0);
        assert_eq!(C.degree(), 0);
        assert_eq!(C.y(100.0), 7.0);
    }

    #[test]
    fn test_assert_y_macro() {
        // 1 + 2*2 + 3*4 = 17
        function!(poly(x) = 1.0 + 2.0 x^1 + 3.0 x^2);
        assert_y!(poly, 2.0, 17.0);
        assert_y!(poly, 0.5, 2.75, 1e-12);
    }

    #[test]
    fn test_assert_close_macro() {
        assert_close!(1.0 + 1e-16, 1.0);
        assert_close!(1.0_f32, 1.0_f32 + f32::EPSILON / 2.0);
        assert_close!(100.0, 100.05, 0.1);
    }

    #[test]
    #[should_panic(expected = "Values not close")]
    fn test_assert_close_macro_fails() {
        assert_close!(1.0, 1.1, 1e-3);
    }

    #[test]
    fn test_assert_all_close_macro() {
        let a = vec![1.0, 2.0, 3.0];
        assert_all_close!(a, [1.0, 2.0, 3.0]);
        assert_all_close!(a, [1.01, 1.99, 3.0], 0.05);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_assert_all_close_length_mismatch() {
        assert_all_close!(vec![1.0, 2.0], [1.0]);
    }

    #[test]
    fn test_noise_is_seeded() {
        function!(f(x) = 2.0 x + 1.0);
        let clean = f.solve_linspace(0.0, 10.0, 50);

        let a = apply_normal_noise(clean.clone(), 0.5, 42);
        let b = apply_normal_noise(clean.clone(), 0.5, 42);
        let c = apply_normal_noise(clean.clone(), 0.5, 7);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.x(), clean.x());
    }
}
