//! # Slicefit
//! ## Polynomial curve fitting for sliced point clouds
//!
//! A slicing step upstream reduces a point cloud to a set of `(x, y)` samples.
//! This crate fits a least-squares polynomial of a chosen degree to those samples, and hands
//! back everything a report or chart needs:
//! - Coefficients in terms of the original `x`, lowest power first
//! - The R² of the fit, always in `[0, 1]`
//! - A dense curve sampled past both ends of the data
//! - The equation, as Unicode, markup, or plain text
//!
//! ```rust
//! # use slicefit::{CurveFit, value::points_from_tuples};
//! let data = points_from_tuples(&[(0.0, 1.0), (1.0, 2.0), (2.0, 5.0), (3.0, 10.0)]);
//! let fit = CurveFit::new(&data, 2).expect("Failed to create fit");
//!
//! assert_eq!(fit.equation().to_unicode(), "y = x² + 1");
//! assert!(fit.r_squared() > 0.999);
//!
//! let curve = fit.sample_curve().unwrap();
//! assert_eq!(curve.len(), 500);
//! ```
//!
//! # Core Concepts
//! - A [`Polynomial`] is a mathematical function returning a value `y` for a given input `x`.
//!     - It is not tied to any data, and can be evaluated anywhere
//! - A [`CurveFit`] is a polynomial fitted to a set of data points.
//!     - It is solved over a normalized axis, `x' = (x - x_min) / x_range`, see [`normalization`]
//!     - It keeps its source data, so it can score itself and report residuals
//!     - A near-singular solve does not fail; it sets [`CurveFit::degraded`] instead
//!     - So do original-x coefficients that drift from the solved curve, see [`CurveFit::monomial_error`]
//! - A [`FitRequest`] and [`FitResult`] are the plain-data form of the same operation
//! - A [`FitConfig`] holds the tunable constants, and can be loaded from JSON
//!
//! # Implementation Details
//!
//! The normal equations `AᵀA · c = Aᵀb` are built with `nalgebra` and solved by Gaussian
//! elimination with partial pivoting, see [`solver`]. Coefficients are then rounded to a
//! fixed number of significant digits, see [`precision`].
//!
//! # Testing utilities
//!
//! This crate includes a set of macros for building synthetic data and checking fits. See [`test`].
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar

pub mod test;

pub mod basis;
pub mod config;
pub mod display;
pub mod error;
pub mod normalization;
pub mod precision;
pub mod sampling;
pub mod solver;
pub mod statistics;
pub mod value;

mod fit;
pub use fit::*;

mod polynomial;
pub use polynomial::Polynomial;

pub use config::FitConfig;

pub use nalgebra;
