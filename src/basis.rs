//! The monomial basis used to build the least-squares system.
//!
//! Every fit is expressed in ascending powers, `1, x', x'², …, x'ᵈ`, where
//! `x'` is the normalized x (see [`crate::normalization`]). Index `j` of a
//! coefficient vector is always the coefficient of power `j`: the design
//! matrix, the solver, evaluation, and the formatter all share that order.
use nalgebra::{DMatrix, DVector, MatrixViewMut};

use crate::{
    normalization::Normalizer,
    value::{Point, Value},
};

/// Monomial basis, optionally on a normalized domain.
///
/// - [`MonomialBasis::default`] evaluates powers of `x` directly.
/// - [`MonomialBasis::normalized`] evaluates powers of `x' = (x - x_min) / x_range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonomialBasis<T: Value = f64> {
    normalizer: Option<Normalizer<T>>,
}
impl<T: Value> MonomialBasis<T> {
    /// Creates a plain monomial basis (no normalization).
    #[must_use]
    pub const fn default() -> Self {
        Self { normalizer: None }
    }

    /// Creates a monomial basis over the normalized domain of `normalizer`.
    #[must_use]
    pub const fn normalized(normalizer: Normalizer<T>) -> Self {
        Self {
            normalizer: Some(normalizer),
        }
    }

    /// Returns the domain normalizer, if any.
    pub fn normalizer(&self) -> Option<&Normalizer<T>> {
        self.normalizer.as_ref()
    }

    /// Returns the number of basis functions for a given degree (`degree + 1`).
    #[inline(always)]
    pub fn k(&self, degree: usize) -> usize {
        degree + 1
    }

    /// Maps an x-value onto the axis this basis is evaluated on.
    #[inline(always)]
    pub fn normalize_x(&self, x: T) -> T {
        match &self.normalizer {
            Some(normalizer) => normalizer.normalize(x),
            None => x,
        }
    }

    /// Fills one design-matrix row with `x⁰, x¹, …`, one power per column.
    ///
    /// `x` must already be normalized. Powers are built by repeated
    /// multiplication, so `row[j] == x^j` for every column.
    #[inline(always)]
    pub fn fill_matrix_row<R: nalgebra::Dim, C: nalgebra::Dim, RS: nalgebra::Dim, CS: nalgebra::Dim>(
        &self,
        x: T,
        mut row: MatrixViewMut<T, R, C, RS, CS>,
    ) {
        let mut power = T::one();
        for j in 0..row.ncols() {
            row[j] = power;
            power *= x;
        }
    }

    /// Evaluates `Σ cⱼ xʲ` at an already normalized `x`, using Horner's method.
    pub fn evaluate(&self, x: T, coefficients: &[T]) -> T {
        let mut y = T::zero();
        for &coef in coefficients.iter().rev() {
            y = y * x + coef;
        }
        y
    }

    /// Builds the `n × k` design matrix `A` and the target vector `b` for a point set.
    ///
    /// Each x is normalized through this basis first; `A[(i, j)] = x'ᵢʲ` and `b[i] = yᵢ`.
    pub fn design_matrix(&self, points: &[Point<T>], k: usize) -> (DMatrix<T>, DVector<T>) {
        let mut bigx = DMatrix::zeros(points.len(), k);
        let b = DVector::from_iterator(points.len(), points.iter().map(|p| p.y));

        for (row, point) in bigx.row_iter_mut().zip(points.iter()) {
            let x = self.normalize_x(point.x);
            self.fill_matrix_row(x, row);
        }

        (bigx, b)
    }
}
