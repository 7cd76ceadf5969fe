#![deny(missing_docs)]
//! # algebra-core: numeric abstractions for forward-mode AD
//!
//! This crate provides the algebra that the `autodiff` drivers are
//! built on:
//!
//! - [`Real`]: a base numeric type closed under field operations and
//!   the elementary functions
//! - [`ApproxEq`]: componentwise equality within an absolute tolerance
//! - [`Dual`]: a value paired with its derivative, generic over any
//!   [`Real`] (and itself a [`Real`], so duals nest)
//! - [`Matrix`]: a dense, row-major buffer for vectors and Hessians
//!
//! ## Quick start
//!
//! ```rust
//! use algebra_core::{Dual, Real};
//!
//! // Write the function once, generic over the numeric type.
//! fn f<S: Real>(x: S) -> S {
//!     x.sin() * x
//! }
//!
//! // Plain evaluation.
//! let y: f64 = f(2.0);
//!
//! // First derivative: seed the tangent with 1.
//! let d = f(Dual::variable(2.0));
//! assert_eq!(d.value, y);
//! assert!((d.deriv - (2.0_f64.cos() * 2.0 + 2.0_f64.sin())).abs() < 1e-12);
//!
//! // Second derivative: nest the dual.
//! let x = Dual::new(Dual::variable(2.0), Dual::constant(1.0));
//! let dd = f(x);
//! let expected = 2.0 * 2.0_f64.cos() - 2.0 * 2.0_f64.sin();
//! assert!((dd.deriv.deriv - expected).abs() < 1e-12);
//! ```
//!
//! ## Standard library implementations
//!
//! [`Real`] and [`ApproxEq`] are implemented for `f32` and `f64` by
//! forwarding to [`num_traits::Float`]. [`Dual<T>`] implements both
//! whenever `T` does.

use num_traits::{Float, One, Zero};
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

pub mod dual;
pub mod elementary;
pub mod matrix;

pub use dual::Dual;
pub use matrix::{Matrix, ShapeError};

/// Equality within an absolute tolerance.
///
/// Laws (not enforced by type system):
///
/// - **Reflexive** for finite values: `a.approx_eq(&a, eps)`
/// - **Symmetric**: `a.approx_eq(&b, eps) == b.approx_eq(&a, eps)`
///
/// Composite types compare componentwise; every component must pass.
///
/// # Example
///
/// ```rust
/// use algebra_core::{ApproxEq, Dual};
///
/// assert!(1.0_f64.approx_eq(&(1.0 + 1e-12), 1e-10));
/// assert!(!Dual::new(1.0, 2.0).approx_eq(&Dual::new(1.0, 2.1), 1e-10));
/// ```
pub trait ApproxEq {
    /// Whether every component of `self` is within `eps` of `other`.
    fn approx_eq(&self, other: &Self, eps: f64) -> bool;
}

/// A **real** base numeric type.
///
/// A `Real` is closed under `+ - * /` and negation, has additive and
/// multiplicative identities, and supports the elementary functions
/// the dual-number chain rules need. Because [`Dual<T>`] is itself a
/// `Real` whenever `T` is, every rule written against this trait
/// applies recursively to nested duals.
///
/// Laws (not enforced by type system):
///
/// - `from_f64(v).to_f64() == v` up to the precision of `Self`
/// - `to_f64` returns the primal value, discarding any tangent parts
/// - Domain errors (`sqrt(-1)`, `ln(0)`, `1/0`) follow IEEE-754 and
///   produce NaN or infinities rather than panicking
///
/// # Example
///
/// ```rust
/// use algebra_core::Real;
///
/// fn softplus<S: Real>(x: S) -> S {
///     (S::one() + x.exp()).ln()
/// }
///
/// assert!((softplus(0.0_f64) - 2.0_f64.ln()).abs() < 1e-15);
/// ```
pub trait Real:
    Copy
    + Debug
    + Display
    + PartialEq
    + Zero
    + One
    + ApproxEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lift a plain constant.
    fn from_f64(v: f64) -> Self;

    /// The primal value as `f64`.
    fn to_f64(self) -> f64;

    /// Square root.
    fn sqrt(self) -> Self;

    /// `self` raised to a constant power.
    fn powf(self, a: f64) -> Self;

    /// Sine.
    fn sin(self) -> Self;

    /// Cosine.
    fn cos(self) -> Self;

    /// Tangent.
    fn tan(self) -> Self;

    /// Arctangent.
    fn atan(self) -> Self;

    /// Exponential.
    fn exp(self) -> Self;

    /// Natural logarithm.
    fn ln(self) -> Self;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Sign of the primal value: `-1`, `0` or `1` (NaN stays NaN).
    fn signum(self) -> Self;

    /// Hyperbolic sine.
    fn sinh(self) -> Self;

    /// Hyperbolic cosine.
    fn cosh(self) -> Self;

    /// Hyperbolic tangent.
    fn tanh(self) -> Self;

    /// Inverse hyperbolic tangent.
    fn atanh(self) -> Self;

    /// Multiplicative inverse.
    fn recip(self) -> Self {
        Self::one() / self
    }

    /// Natural logarithm of the absolute value.
    fn ln_abs(self) -> Self {
        self.abs().ln()
    }
}

// Floats: forward to num_traits::Float

macro_rules! impl_real_float {
    ( $( $t:ty ),+ ) => {
        $(
            impl ApproxEq for $t {
                fn approx_eq(&self, other: &Self, eps: f64) -> bool {
                    ((*self - *other) as f64).abs() <= eps
                }
            }

            impl Real for $t {
                fn from_f64(v: f64) -> Self {
                    v as $t
                }

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn sqrt(self) -> Self {
                    Float::sqrt(self)
                }

                fn powf(self, a: f64) -> Self {
                    Float::powf(self, a as $t)
                }

                fn sin(self) -> Self {
                    Float::sin(self)
                }

                fn cos(self) -> Self {
                    Float::cos(self)
                }

                fn tan(self) -> Self {
                    Float::tan(self)
                }

                fn atan(self) -> Self {
                    Float::atan(self)
                }

                fn exp(self) -> Self {
                    Float::exp(self)
                }

                fn ln(self) -> Self {
                    Float::ln(self)
                }

                fn abs(self) -> Self {
                    Float::abs(self)
                }

                fn signum(self) -> Self {
                    if Float::is_nan(self) || self == 0.0 {
                        self
                    } else {
                        Float::signum(self)
                    }
                }

                fn sinh(self) -> Self {
                    Float::sinh(self)
                }

                fn cosh(self) -> Self {
                    Float::cosh(self)
                }

                fn tanh(self) -> Self {
                    Float::tanh(self)
                }

                fn atanh(self) -> Self {
                    Float::atanh(self)
                }

                fn recip(self) -> Self {
                    Float::recip(self)
                }
            }
        )+
    };
}

impl_real_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn cube<S: Real>(x: S) -> S {
        x * x * x
    }

    #[test]
    fn float_approx_eq_is_absolute() {
        assert!(1.0_f64.approx_eq(&1.000_000_000_01, 1e-10));
        assert!(!1.0_f64.approx_eq(&1.001, 1e-10));
        assert!(1e6_f64.approx_eq(&(1e6 + 1e-11), 1e-10));
    }

    #[test]
    fn float_approx_eq_rejects_nan() {
        assert!(!f64::NAN.approx_eq(&f64::NAN, 1.0));
    }

    #[test]
    fn float_real_forwards_to_float() {
        assert_eq!(Real::sqrt(9.0_f64), 3.0);
        assert_eq!(Real::powf(2.0_f64, 10.0), 1024.0);
        assert_eq!(Real::exp(0.0_f64), 1.0);
        assert_eq!(Real::ln(1.0_f64), 0.0);
        assert_eq!(Real::recip(4.0_f64), 0.25);
    }

    #[test]
    fn signum_keeps_zero() {
        assert_eq!(Real::signum(0.0_f64), 0.0);
        assert_eq!(Real::signum(-3.0_f64), -1.0);
        assert_eq!(Real::signum(2.5_f32), 1.0);
        assert!(Real::signum(f64::NAN).is_nan());
    }

    #[test]
    fn ln_abs_of_negative() {
        assert_eq!(Real::ln_abs(-1.0_f64), 0.0);
        assert!((Real::ln_abs(-2.0_f64) - 2.0_f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn generic_code_runs_on_f32_and_f64() {
        assert_eq!(cube(2.0_f32), 8.0);
        assert_eq!(cube(2.0_f64), 8.0);
        assert_eq!(Real::to_f64(<f32 as Real>::from_f64(0.5)), 0.5);
    }
}
