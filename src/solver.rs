//! Dense linear solver for the normal equations.
//!
//! [`GaussianSolver`] solves `AᵀA · c = Aᵀb` by Gaussian elimination with
//! partial pivoting on the augmented matrix `[AᵀA | Aᵀb]`.
//!
//! The solver never refuses a system. When a pivot falls below the tolerance
//! the affected elimination or division step is skipped and the column is
//! recorded in [`Solution::near_singular_pivots`], so callers can tell a
//! trustworthy solution from a best-effort one via [`Solution::degraded`].
use nalgebra::{DMatrix, DVector};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Default pivot tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-14;

/// The result of a solve: one value per unknown, plus degradation diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<T: Value = f64> {
    coefficients: Vec<T>,
    near_singular: Vec<usize>,
}
impl<T: Value> Solution<T> {
    /// The solved unknowns, in the column order of the system.
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// Consumes the solution, returning the unknowns.
    pub fn into_coefficients(self) -> Vec<T> {
        self.coefficients
    }

    /// Pivot columns whose magnitude fell below the tolerance, ascending.
    pub fn near_singular_pivots(&self) -> &[usize] {
        &self.near_singular
    }

    /// True if any step was skipped, or if the result is not finite.
    ///
    /// A degraded solution is still returned in full, but is approximate.
    pub fn degraded(&self) -> bool {
        !self.near_singular.is_empty() || self.coefficients.iter().any(|c| !c.is_finite_value())
    }
}

/// Gaussian elimination with partial pivoting.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// For each pivot column `i`:
/// 1. Swap in the row `k ≥ i` with the largest `|aug[k][i]|`.
/// 2. If `|aug[i][i]| ≥ tol`, subtract `aug[k][i] / aug[i][i]` times row `i` from every row `k > i`.
///    Otherwise the column is left as-is.
///
/// Then back-substitute from the last row upward:
/// ```math
/// cᵢ = (aug[i][n] - Σ_{j>i} aug[i][j]·cⱼ) / aug[i][i]      if |aug[i][i]| > tol
/// cᵢ =  aug[i][n] - Σ_{j>i} aug[i][j]·cⱼ                   otherwise
/// ```
/// </div>
///
/// # Example
/// ```
/// # use slicefit::solver::GaussianSolver;
/// # use nalgebra::{DMatrix, DVector};
/// let a = DMatrix::from_row_slice(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]);
/// let b = DVector::from_row_slice(&[3.0, 5.0]);
///
/// let solution = GaussianSolver::default().solve(&a, &b).unwrap();
/// assert!(!solution.degraded());
/// assert!((solution.coefficients()[0] - 0.8).abs() < 1e-12);
/// assert!((solution.coefficients()[1] - 1.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianSolver<T: Value = f64> {
    tolerance: T,
}
impl<T: Value> Default for GaussianSolver<T> {
    fn default() -> Self {
        Self {
            tolerance: T::try_cast(DEFAULT_TOLERANCE).unwrap_or(T::epsilon()),
        }
    }
}
impl<T: Value> GaussianSolver<T> {
    /// Creates a solver with a custom pivot tolerance.
    pub fn new(tolerance: T) -> Self {
        Self { tolerance }
    }

    /// The pivot tolerance
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Solves the square system `a · c = b`.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if `a` is not square or `b` does not match it.
    /// Near-singular systems are not an error; see [`Solution::degraded`].
    pub fn solve(&self, a: &DMatrix<T>, b: &DVector<T>) -> Result<Solution<T>> {
        let (rows, cols) = a.shape();
        if rows != cols || b.len() != rows {
            return Err(Error::DimensionMismatch {
                rows,
                cols,
                rhs: b.len(),
            });
        }

        let n = rows;
        let mut aug = DMatrix::from_fn(n, n + 1, |r, c| if c < n { a[(r, c)] } else { b[r] });
        let mut near_singular = Vec::new();

        //
        // Forward elimination
        for i in 0..n {
            let mut max_row = i;
            let mut max_val = Value::abs(aug[(i, i)]);
            for k in (i + 1)..n {
                let candidate = Value::abs(aug[(k, i)]);
                if candidate > max_val {
                    max_val = candidate;
                    max_row = k;
                }
            }

            if max_row != i {
                aug.swap_rows(i, max_row);
            }

            let pivot = aug[(i, i)];
            if Value::abs(pivot) < self.tolerance {
                near_singular.push(i);
                continue;
            }

            for k in (i + 1)..n {
                let factor = aug[(k, i)] / pivot;
                for j in i..=n {
                    let delta = factor * aug[(i, j)];
                    aug[(k, j)] -= delta;
                }
            }
        }

        //
        // Back substitution
        let mut coefficients = vec![T::zero(); n];
        for i in (0..n).rev() {
            let mut sum = aug[(i, n)];
            for j in (i + 1)..n {
                sum -= aug[(i, j)] * coefficients[j];
            }

            let pivot = aug[(i, i)];
            coefficients[i] = if Value::abs(pivot) > self.tolerance {
                sum / pivot
            } else {
                if !near_singular.contains(&i) {
                    near_singular.push(i);
                }
                sum
            };
        }

        near_singular.sort_unstable();
        let solution = Solution {
            coefficients,
            near_singular,
        };

        if solution.degraded() {
            log::warn!(
                "near-singular {n}x{n} system (pivot columns {:?}); solution is approximate",
                solution.near_singular
            );
        }

        Ok(solution)
    }
}
