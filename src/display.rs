//! Utilities for displaying and formatting polynomials
//!
//! This module turns ascending coefficient vectors into human-readable
//! equations such as `y = −x² + 2`.
//!
//! # Key Concepts
//! - **[`Equation`]**: The structured form, a list of [`Term`]s in descending power.
//! - **[`Term`]**: A single polynomial term with a sign, a numeral, and a power.
//! - **[`Sign`]**: Tracks whether a term is positive or negative.
//! - **[`Notation`]**: How an [`Equation`] is rendered to text.
//!
//! # Renderings
//! | Notation              | Output                 |
//! |-----------------------|------------------------|
//! | [`Notation::Unicode`] | `y = −x² + 2`          |
//! | [`Notation::Markup`]  | `y = −x<sup>2</sup> + 2` |
//! | [`Notation::Plain`]   | `y = -x^2 + 2`         |
//!
//! # Helpers
//! - [`format_coefficient`]: Formats a numeric coefficient, suppressing unit numerals.
//! - [`unicode::superscript`]: Converts a number to a Unicode superscript for exponents.
use crate::value::Value;

pub mod unicode;

/// Default number of decimals shown on each coefficient
pub const DEFAULT_PRECISION: usize = 4;

/// Default magnitude below which a coefficient is left out of the equation
pub const DEFAULT_THRESHOLD: f64 = 1e-9;

/// Default range in which scientific notation is not used
#[must_use]
pub fn default_fixed_range<T: Value>() -> Option<std::ops::Range<T>> {
    const RANGE: std::ops::Range<f64> = 1e-3..1e6;
    let s = T::try_cast(RANGE.start).ok()?;
    let e = T::try_cast(RANGE.end).ok()?;
    Some(s..e)
}

/// Represents the sign of a polynomial term.
///
/// Used when formatting polynomial expressions to determine how a term
/// should be connected to the rest of the polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`−` or `-` when displayed, depending on the notation).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// # Example
    /// ```
    /// # use slicefit::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if coef.is_sign_negative() {
            Self::Negative
        } else {
            Self::Positive
        }
    }
}

/// Text conventions used to render an [`Equation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// Typographic minus and superscript exponents: `y = −x² + 2`
    #[default]
    Unicode,

    /// Typographic minus and `<sup>` exponents: `y = −x<sup>2</sup> + 2`
    Markup,

    /// ASCII only: `y = -x^2 + 2`
    Plain,
}
impl Notation {
    /// The character written for a negative sign
    #[must_use]
    pub fn minus(self) -> char {
        match self {
            Notation::Unicode | Notation::Markup => unicode::MINUS,
            Notation::Plain => '-',
        }
    }

    /// The character written for a positive connector
    #[must_use]
    pub fn plus(self) -> char {
        '+'
    }

    /// Formats `x` raised to `power`.
    ///
    /// Power 0 is an empty string, power 1 is a bare `x`.
    ///
    /// ```
    /// # use slicefit::display::Notation;
    /// assert_eq!(Notation::Unicode.variable(3), "x³");
    /// assert_eq!(Notation::Markup.variable(3), "x<sup>3</sup>");
    /// assert_eq!(Notation::Plain.variable(3), "x^3");
    /// assert_eq!(Notation::Plain.variable(1), "x");
    /// ```
    #[must_use]
    pub fn variable(self, power: usize) -> String {
        match power {
            0 => String::new(),
            1 => "x".to_string(),
            _ => match self {
                Notation::Unicode => format!("x{}", unicode::superscript(&power.to_string())),
                Notation::Markup => format!("x<sup>{power}</sup>"),
                Notation::Plain => format!("x^{power}"),
            },
        }
    }
}

/// Represents a single term of a polynomial for display purposes.
///
/// The numeral is the formatted magnitude of the coefficient, or `None` when a
/// unit coefficient is suppressed (`x²` rather than `1x²`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The sign of the term
    pub sign: Sign,

    /// The formatted magnitude of the coefficient, if shown
    pub coefficient: Option<String>,

    /// The power of `x`
    pub power: usize,
}

impl Term {
    /// Creates a new polynomial term.
    ///
    /// # Example
    /// ```
    /// # use slicefit::display::{Term, Sign};
    /// let term = Term::new(Sign::Negative, Some("3".to_string()), 2);
    /// assert_eq!(term.body(Default::default()), "3x²");
    /// ```
    #[must_use]
    pub fn new(sign: Sign, coefficient: Option<String>, power: usize) -> Self {
        Self {
            sign,
            coefficient,
            power,
        }
    }

    /// The unsigned text of the term in the given notation
    #[must_use]
    pub fn body(&self, notation: Notation) -> String {
        let numeral = self.coefficient.as_deref().unwrap_or_default();
        format!("{numeral}{}", notation.variable(self.power))
    }
}

/// Formats a numeric coefficient for display in a polynomial term.
///
/// - Returns `None` if the magnitude is exactly `1` and `power != 0` (`x` instead of `1x`).
///   A coefficient that only rounds to `1` keeps its numeral, so `1.00004x` shows as `1x`.
/// - Formats positionally if the magnitude is in `[1e-3, 1e6)`.
/// - Formats in scientific notation otherwise.
///
/// The sign is not included; see [`Sign::from_coef`].
///
/// # Example
/// ```
/// # use slicefit::display::format_coefficient;
/// assert_eq!(format_coefficient(2.5, 1, 4), Some("2.5".to_string()));
/// assert_eq!(format_coefficient(-1.0, 2, 4), None);
/// assert_eq!(format_coefficient(-1.0, 0, 4), Some("1".to_string()));
/// assert_eq!(format_coefficient(1e7, 1, 2), Some("1e7".to_string()));
/// ```
pub fn format_coefficient<T: Value>(coef: T, power: usize, precision: usize) -> Option<String> {
    if Value::abs(coef) == T::one() && power != 0 {
        return None;
    }

    Some(unicode::float(Value::abs(coef), default_fixed_range(), precision))
}

/// Exact zeros are always negligible. NaN never is, so a degraded fit stays visible.
fn is_negligible<T: Value>(coef: T, threshold: T) -> bool {
    coef == T::zero() || Value::abs(coef) < threshold
}

/// The structured form of a polynomial equation.
///
/// Terms are kept in descending power, with negligible coefficients already removed.
///
/// # Example
/// ```
/// # use slicefit::display::Equation;
/// let eq = Equation::new(&[2.0, 0.0, -1.0]);
/// assert_eq!(eq.to_unicode(), "y = −x² + 2");
/// assert_eq!(eq.to_markup(), "y = −x<sup>2</sup> + 2");
/// assert_eq!(eq.to_plain(), "y = -x^2 + 2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    terms: Vec<Term>,
}
impl Equation {
    /// Builds an equation from ascending coefficients with the default threshold and precision.
    pub fn new<T: Value>(coefficients: &[T]) -> Self {
        let threshold = T::try_cast(DEFAULT_THRESHOLD).unwrap_or(T::zero());
        Self::with_options(coefficients, threshold, DEFAULT_PRECISION)
    }

    /// Builds an equation from ascending coefficients.
    ///
    /// - Coefficients with `|c| < threshold` are left out
    /// - Numerals show at most `precision` decimals
    pub fn with_options<T: Value>(coefficients: &[T], threshold: T, precision: usize) -> Self {
        let terms = coefficients
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| !is_negligible(**c, threshold))
            .map(|(power, &c)| {
                let numeral = format_coefficient(c, power, precision);
                Term::new(Sign::from_coef(c), numeral, power)
            })
            .collect();

        Self { terms }
    }

    /// The terms, highest power first
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// True if every coefficient was negligible, in which case the equation reads `y = 0`
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Writes the equation into the provided buffer.
    ///
    /// The first term carries a bare sign (`−x²`), later terms are joined
    /// with ` + ` or ` − `.
    ///
    /// # Errors
    /// Returns an error if writing to `buffer` fails.
    pub fn write<B: std::fmt::Write>(&self, buffer: &mut B, notation: Notation) -> std::fmt::Result {
        write!(buffer, "y = ")?;

        let mut terms = self.terms.iter();
        let Some(first) = terms.next() else {
            return write!(buffer, "0");
        };

        // Extract the first term to avoid leading '+'
        if first.sign == Sign::Negative {
            write!(buffer, "{}", notation.minus())?;
        }
        write!(buffer, "{}", first.body(notation))?;

        for term in terms {
            let sign = match term.sign {
                Sign::Positive => notation.plus(),
                Sign::Negative => notation.minus(),
            };
            write!(buffer, " {sign} {}", term.body(notation))?;
        }

        Ok(())
    }

    /// Renders the equation in the given notation
    #[must_use]
    pub fn render(&self, notation: Notation) -> String {
        let mut buffer = String::new();
        // Writing to a String cannot fail
        let _ = self.write(&mut buffer, notation);
        buffer
    }

    /// `y = −x² + 2`
    #[must_use]
    pub fn to_unicode(&self) -> String {
        self.render(Notation::Unicode)
    }

    /// `y = −x<sup>2</sup> + 2`
    #[must_use]
    pub fn to_markup(&self) -> String {
        self.render(Notation::Markup)
    }

    /// `y = -x^2 + 2`
    #[must_use]
    pub fn to_plain(&self) -> String {
        self.render(Notation::Plain)
    }
}
impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write(f, Notation::Unicode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_from_coef() {
        assert_eq!(Sign::from_coef(1.0), Sign::Positive);
        assert_eq!(Sign::from_coef(-1.0), Sign::Negative);
        assert_eq!(Sign::from_coef(0.0), Sign::Positive);
    }

    #[test]
    fn test_format_coefficient() {
        assert_eq!(format_coefficient(2.5, 1, 4), Some("2.5".to_string()));
        assert_eq!(format_coefficient(-2.5, 1, 4), Some("2.5".to_string()));
        assert_eq!(format_coefficient(1.0, 0, 4), Some("1".to_string()));
        assert_eq!(format_coefficient(1.0, 1, 4), None);
        assert_eq!(format_coefficient(1.000_01, 3, 4), Some("1".to_string()));
        assert_eq!(format_coefficient(-0.999_99, 1, 4), Some("1".to_string()));
        assert_eq!(format_coefficient(1.000_01, 0, 4), Some("1".to_string()));
        assert_eq!(format_coefficient(1e-5, 2, 2), Some("1e-5".to_string()));
        assert_eq!(format_coefficient(123_456.789, 1, 4), Some("123456.789".to_string()));
    }

    #[test]
    fn test_sample_equation() {
        let eq = Equation::new(&[2.0, 0.0, -1.0]);
        assert_eq!(eq.to_unicode(), "y = −x² + 2");
        assert_eq!(eq.to_markup(), "y = −x<sup>2</sup> + 2");
        assert_eq!(eq.to_plain(), "y = -x^2 + 2");
        assert_eq!(eq.to_string(), eq.to_unicode());

        assert_eq!(
            eq.terms(),
            &[
                Term::new(Sign::Negative, None, 2),
                Term::new(Sign::Positive, Some("2".to_string()), 0),
            ]
        );
    }

    #[test]
    fn test_negligible_terms_omitted() {
        let eq = Equation::new(&[1e-12, 3.0, -4e-10, 0.5]);
        assert_eq!(eq.to_plain(), "y = 0.5x^3 + 3x");
    }

    #[test]
    fn test_all_negligible() {
        let eq = Equation::new(&[0.0, 1e-10, -5e-10]);
        assert!(eq.is_zero());
        assert_eq!(eq.to_unicode(), "y = 0");
        assert_eq!(eq.to_plain(), "y = 0");
    }

    #[test]
    fn test_connectors() {
        let eq = Equation::new(&[-1.0, -1.0, 2.25, -3.0]);
        assert_eq!(eq.to_unicode(), "y = −3x³ + 2.25x² − x − 1");
        assert_eq!(eq.to_plain(), "y = -3x^3 + 2.25x^2 - x - 1");
    }

    #[test]
    fn test_linear_and_constant() {
        assert_eq!(Equation::new(&[0.0, 1.0]).to_plain(), "y = x");
        assert_eq!(Equation::new(&[-7.0]).to_plain(), "y = -7");
        assert_eq!(Equation::new(&[1.0, 0.0]).to_plain(), "y = 1");
    }

    #[test]
    fn test_custom_options() {
        let eq = Equation::with_options(&[0.01, 2.0 / 3.0], 0.1, 2);
        assert_eq!(eq.to_plain(), "y = 0.67x");

        // Exact zeros are dropped even with no threshold
        let eq = Equation::with_options(&[0.0, 2.0], 0.0, 4);
        assert_eq!(eq.to_plain(), "y = 2x");

        let big = Equation::new(&[0.0, 0.0, 2.5e7]);
        assert_eq!(big.to_plain(), "y = 2.5e7x^2");
    }

    #[test]
    fn test_near_one_keeps_numeral() {
        assert_eq!(Equation::new(&[0.0, 1.00004]).to_plain(), "y = 1x");
        assert_eq!(Equation::new(&[0.0, -0.99996]).to_plain(), "y = -1x");
        assert_eq!(Equation::new(&[0.0, 1.0]).to_plain(), "y = x");
        assert_eq!(Equation::new(&[0.0, 0.0, -1.0]).to_plain(), "y = -x^2");
    }

    #[test]
    fn test_high_powers() {
        let mut coefs = vec![0.0; 13];
        coefs[12] = 1.0;
        assert_eq!(Equation::new(&coefs).to_unicode(), "y = x¹²");
        assert_eq!(Equation::new(&coefs).to_markup(), "y = x<sup>12</sup>");
    }
}
