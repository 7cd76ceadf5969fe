//! Forward-mode automatic differentiation drivers.
//!
//! This crate computes derivatives of scalar functions written against
//! [`Real`](algebra_core::Real):
//!
//! - **Exact drivers** ([`forward`]): [`derivative`],
//!   [`second_derivative`], [`directional_derivative`], [`gradient`] and
//!   [`hessian`], by seeding [`Dual`] and `Dual<Dual<_>>` tangents
//! - **Finite-difference oracles** ([`finite_diff`]): [`forward_diff`],
//!   [`central_diff`] and [`numerical_hessian`], for cross-checking
//!
//! The `*_into` forms read a column-vector [`Matrix`] and write into a
//! caller-owned one; a buffer of the wrong shape is a caller bug and
//! panics before the target is evaluated.
//!
//! # Single-variable differentiation
//!
//! ```
//! use autodiff::{derivative, Dual};
//!
//! // Define a function
//! fn f(x: Dual<f64>) -> Dual<f64> {
//!     x * x + 2.0 * x
//! }
//!
//! // Compute f and f' at x=3
//! let (y, dy) = derivative(f, 3.0);
//! assert_eq!(y, 15.0);   // f(3) = 15
//! assert_eq!(dy, 8.0);   // f'(3) = 8
//! ```
//!
//! # Gradients and Hessians
//!
//! Write the target once, generic over the numeric type, and instantiate
//! it at the dual type each driver needs:
//!
//! ```
//! use autodiff::{central_diff, gradient, hessian, Dual, Real};
//!
//! // log-density of N(μ, σ²) at 0
//! fn log_normal<S: Real>(p: &[S]) -> S {
//!     let (mu, sigma) = (p[0], p[1]);
//!     let ln_2pi = S::from_f64((2.0 * std::f64::consts::PI).ln());
//!     S::from_f64(-0.5) * (mu * mu / (sigma * sigma) + ln_2pi) - sigma.ln()
//! }
//!
//! let x = [5.0, 2.0];
//! let (_, grad) = gradient(log_normal::<Dual<f64>>, &x);
//! assert!((grad[0] + 1.25).abs() < 1e-12);
//! assert!((grad[1] - 2.625).abs() < 1e-12);
//!
//! let fd = central_diff(log_normal::<Dual<f64>>, &x, 1e-8);
//! assert!((fd[1] - grad[1]).abs() < 1e-6);
//!
//! let h = hessian(log_normal::<Dual<Dual<f64>>>, &x);
//! assert_eq!(h.hessian[(0, 1)], h.hessian[(1, 0)]);
//! ```
//!
//! # Logging
//!
//! Drivers emit [`tracing`] events: one `debug` event per call with the
//! dimension (and step, for finite differences), and a `trace` event
//! per seeded evaluation. Nothing is printed unless the application
//! installs a subscriber.

pub mod finite_diff;
pub mod forward;

pub use algebra_core::{ApproxEq, Dual, Matrix, Real, ShapeError};
pub use finite_diff::{
    central_diff, central_diff_into, forward_diff, forward_diff_into, numerical_hessian,
    FiniteDiffConfig,
};
pub use forward::{
    derivative, directional_derivative, gradient, gradient_into, hessian, hessian_into,
    second_derivative, SecondOrder,
};
