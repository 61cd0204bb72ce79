//! Numeric types, points, and iteration utilities for fitted curves.
//!
//! # Traits
//!
//! - [`Value`]: Extends `nalgebra::RealField` and `FloatCore` with a few
//!   helpers (`try_cast`, `abs`, `powi`) that resolve the method ambiguity
//!   between the two.
//! - [`CoordExt`]: Access to the x/y channels of a point set.
//!
//! # Types
//!
//! - [`Point`]: One observed `(x, y)` sample.
//! - [`Linspace`]: An iterator over `n` evenly spaced values, both ends included.
//!
//! # Example
//!
//! ```rust
//! use slicefit::value::{CoordExt, Linspace, Point};
//!
//! let points = vec![Point::new(3.0, 1.0), Point::new(-1.0, 2.0)];
//! assert_eq!(points.x_range(), Some((-1.0, 3.0)));
//!
//! let xs: Vec<f64> = Linspace::new(0.0, 1.0, 5).collect();
//! assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
//! ```
use crate::error::{Error, Result};

/// Numeric type for curves
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
    + std::fmt::Display
{
    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// Check if the value is negative
    fn is_sign_negative(&self) -> bool {
        self < &Self::zero()
    }

    /// Check if the value is neither NaN nor infinite
    fn is_finite_value(&self) -> bool {
        num_traits::float::FloatCore::is_finite(*self)
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
        + std::fmt::Display
{
}

/// One observed `(independent, dependent)` sample.
///
/// Points come from the upstream slicing step and are never mutated here.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point<T = f64> {
    /// Independent coordinate
    pub x: T,

    /// Dependent coordinate
    pub y: T,
}
impl<T> Point<T> {
    /// Creates a new point
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}
impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

/// Converts a slice of `(x, y)` tuples into points, preserving order.
pub fn points_from_tuples<T: Copy>(data: &[(T, T)]) -> Vec<Point<T>> {
    data.iter().copied().map(Point::from).collect()
}

/// Iterator over `n` evenly spaced values between `start` and `end`, inclusive.
///
/// Each value is computed as `start + i * step` rather than accumulated, so
/// there is no drift, and the last value is exactly `end`.
#[derive(Debug, Clone)]
pub struct Linspace<T: Value> {
    start: T,
    end: T,
    step: T,
    n: usize,
    index: usize,
}
impl<T: Value> Linspace<T> {
    /// Creates a new iterator over `n` evenly spaced values in `start..=end`
    ///
    /// `n == 1` yields only `start`; `n == 0` yields nothing.
    pub fn new(start: T, end: T, n: usize) -> Self {
        let step = if n > 1 {
            (end - start) / T::from_positive_int(n - 1)
        } else {
            T::zero()
        };

        Self {
            start,
            end,
            step,
            n,
            index: 0,
        }
    }

    /// Returns the distance between consecutive values
    pub fn step(&self) -> T {
        self.step
    }
}
impl<T: Value> Iterator for Linspace<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.n {
            return None;
        }

        let value = if self.index + 1 == self.n && self.n > 1 {
            self.end
        } else {
            self.start + T::from_positive_int(self.index) * self.step
        };
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.n - self.index;
        (remaining, Some(remaining))
    }
}
impl<T: Value> ExactSizeIterator for Linspace<T> {}

/// Extension trait for accessing the `x` and `y` channels of a point set.
///
/// # Examples
///
/// ```
/// # use slicefit::value::{CoordExt, Point};
/// let data = vec![Point::new(1.5, -2.0), Point::new(2.0, 3.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0]);
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the x-coordinates.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }

    /// Returns `(min, max)` of the x-coordinates, or `None` if there are no points.
    fn x_range(&self) -> Option<(T, T)> {
        self.x_iter().fold(None, |acc: Option<(T, T)>, x| {
            Some(match acc {
                Some((min, max)) => (
                    nalgebra::RealField::min(min, x),
                    nalgebra::RealField::max(max, x),
                ),
                None => (x, x),
            })
        })
    }

    /// Returns `(min, max)` of the y-coordinates, or `None` if there are no points.
    fn y_range(&self) -> Option<(T, T)> {
        self.y_iter().fold(None, |acc: Option<(T, T)>, y| {
            Some(match acc {
                Some((min, max)) => (
                    nalgebra::RealField::min(min, y),
                    nalgebra::RealField::max(max, y),
                ),
                None => (y, y),
            })
        })
    }

    /// Returns true if every coordinate is finite.
    fn all_finite(&self) -> bool {
        self.x_iter().chain(self.y_iter()).all(|v| v.is_finite_value())
    }
}
impl<T: Value> CoordExt<T> for [Point<T>] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.y)
    }
}
impl<T: Value> CoordExt<T> for Vec<Point<T>> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.y)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        let values: Vec<f64> = Linspace::new(-1.0, 1.0, 5).collect();
        assert_eq!(values, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);

        let values: Vec<f64> = Linspace::new(0.0, 0.3, 4).collect();
        assert_eq!(values.len(), 4);
        assert_eq!(*values.last().unwrap(), 0.3);
    }

    #[test]
    fn test_linspace_edge_cases() {
        assert_eq!(Linspace::new(0.0, 1.0, 0).count(), 0);
        assert_eq!(Linspace::new(2.0, 5.0, 1).collect::<Vec<_>>(), vec![2.0]);

        let it = Linspace::new(0.0, 1.0, 500);
        assert_eq!(it.len(), 500);
    }

    #[test]
    fn test_coord_ranges() {
        let points = points_from_tuples(&[(2.0, 5.0), (-3.0, 1.0), (7.0, -4.0)]);
        assert_eq!(points.x_range(), Some((-3.0, 7.0)));
        assert_eq!(points.y_range(), Some((-4.0, 5.0)));
        assert_eq!(points.x(), vec![2.0, -3.0, 7.0]);

        let empty: Vec<Point<f64>> = vec![];
        assert_eq!(empty.x_range(), None);
    }

    #[test]
    fn test_all_finite() {
        let ok = points_from_tuples(&[(0.0, 1.0), (1.0, 2.0)]);
        assert!(ok.all_finite());

        let bad = points_from_tuples(&[(0.0, f64::NAN), (1.0, 2.0)]);
        assert!(!bad.all_finite());
    }

    #[test]
    fn test_point_conversions() {
        let p: Point = (1.0, 2.0).into();
        assert_eq!(p, Point::new(1.0, 2.0));
    }
}
