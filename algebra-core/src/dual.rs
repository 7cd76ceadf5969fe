//! Dual numbers for forward-mode automatic differentiation.
//!
//! A dual number represents a value and its derivative simultaneously,
//! enabling automatic computation of derivatives through operator
//! overloading.
//!
//! # Mathematical Background
//!
//! A dual number has the form `a + a′·ε` where `ε² = 0` (and `a′` denotes
//! the derivative). Arithmetic operations on dual numbers follow these
//! algebraic rules:
//!
//! - `(a + a′·ε) + (b + b′·ε) = (a+b) + (a′+b′)·ε`
//! - `-(a + a′·ε) = -a + (-a′)·ε`
//! - `(a + a′·ε) - (b + b′·ε) = (a-b) + (a′-b′)·ε`
//! - `(a + a′·ε) * (b + b′·ε) = ab + (ab′ + a′b)·ε`
//! - `(a + a′·ε) / (b + b′·ε) = a/b + ((a′b - ab′)/b²)·ε`
//!
//! A plain scalar `c` behaves as the constant `c + 0·ε`.
//!
//! # Nesting
//!
//! The component type `T` is any [`Real`], and [`Dual<T>`] is itself a
//! [`Real`] (see [`crate::elementary`]). `Dual<Dual<f64>>` therefore
//! carries two independent tangent directions, and its `deriv.deriv`
//! component is a second derivative:
//!
//! ```
//! use algebra_core::Dual;
//!
//! // f(x) = x³ at x=2: inner tangent on value, outer tangent on deriv.
//! let x = Dual::new(Dual::variable(2.0), Dual::constant(1.0));
//! let f = x * x * x;
//!
//! assert_eq!(f.value.value, 8.0);  // f(2)
//! assert_eq!(f.value.deriv, 12.0); // f'(2) = 3x²
//! assert_eq!(f.deriv.value, 12.0); // f'(2) again, via the outer slot
//! assert_eq!(f.deriv.deriv, 12.0); // f''(2) = 6x
//! ```
//!
//! # Example
//!
//! ```
//! use algebra_core::Dual;
//!
//! // Compute f(x) = x² + 2x at x=3
//! let x = Dual::variable(3.0_f64);
//!
//! let f = x * x + 2.0 * x;
//!
//! assert_eq!(f.value, 15.0);    // f(3) = 9 + 6 = 15
//! assert_eq!(f.deriv, 8.0);     // f'(3) = 2*3 + 2 = 8
//! ```

use crate::{ApproxEq, Real};
use num_traits::{One, Zero};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A dual number representing a value and its derivative.
///
/// `Dual(value, deriv)` represents `value + deriv·ε` where `ε² = 0`.
/// `deriv = 1` marks the active input being differentiated with respect
/// to; `deriv = 0` marks a constant or an inactive input.
///
/// Dual numbers are plain values: every operation returns a new dual
/// and never mutates its operands. There is no ordering; compare with
/// `==` or [`ApproxEq::approx_eq`].
///
/// # Type Parameter
///
/// - `T`: The component type (`f64`, `f32`, or another `Dual`)
///
/// # Examples
///
/// ## Basic Usage
///
/// ```
/// use algebra_core::Dual;
///
/// let x = Dual::variable(5.0);
/// let y = x * x;  // y = x²
///
/// assert_eq!(y.value, 25.0);  // 5² = 25
/// assert_eq!(y.deriv, 10.0);  // d/dx(x²) at x=5 is 2*5 = 10
/// ```
///
/// ## Quotient Rule
///
/// ```
/// use algebra_core::Dual;
///
/// // f(x) = (x + 1) / (x + 2) at x=3
/// let x = Dual::variable(3.0_f64);
/// let f = (x + 1.0) / (x + 2.0);
///
/// assert_eq!(f.value, 0.8);
/// assert!((f.deriv - 0.04_f64).abs() < 1e-12); // 1/(x+2)²
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dual<T> {
    /// The primal value
    pub value: T,
    /// The derivative (tangent)
    pub deriv: T,
}

impl<T> Dual<T> {
    /// Create a new dual number with explicit value and derivative.
    ///
    /// # Example
    ///
    /// ```
    /// use algebra_core::Dual;
    ///
    /// let d = Dual::new(3.0, 1.0);
    /// assert_eq!(d.value, 3.0);
    /// assert_eq!(d.deriv, 1.0);
    /// ```
    pub fn new(value: T, deriv: T) -> Self {
        Dual { value, deriv }
    }

    /// Create a constant (derivative = 0).
    ///
    /// # Example
    ///
    /// ```
    /// use algebra_core::Dual;
    ///
    /// let c = Dual::constant(5.0);
    /// assert_eq!(c.value, 5.0);
    /// assert_eq!(c.deriv, 0.0);
    /// ```
    pub fn constant(value: T) -> Self
    where
        T: Zero,
    {
        Dual {
            value,
            deriv: T::zero(),
        }
    }

    /// Create a variable (derivative = 1).
    ///
    /// Use this for the input you're differentiating with respect to.
    ///
    /// # Example
    ///
    /// ```
    /// use algebra_core::Dual;
    ///
    /// let x = Dual::variable(3.0);
    /// assert_eq!(x.value, 3.0);
    /// assert_eq!(x.deriv, 1.0);  // dx/dx = 1
    /// ```
    pub fn variable(value: T) -> Self
    where
        T: One,
    {
        Dual {
            value,
            deriv: T::one(),
        }
    }
}

impl<T: Real> Dual<T> {
    /// Reciprocal (multiplicative inverse).
    ///
    /// For `g = b + b′·ε`, computes `1/g = (1/b) + (-b′/b²)·ε`.
    ///
    /// # Example
    ///
    /// ```
    /// use algebra_core::Dual;
    ///
    /// let x = Dual::variable(2.0);
    /// let f = x.recip();
    ///
    /// assert_eq!(f.value, 0.5);
    /// assert_eq!(f.deriv, -0.25);    // d/dx(1/x) at x=2 is -1/4
    /// ```
    pub fn recip(self) -> Self {
        let b = self.value;
        Dual {
            value: b.recip(),
            deriv: -(self.deriv / (b * b)),
        }
    }

    /// `self + a` for a plain scalar `a`.
    pub fn add_scalar(self, a: T) -> Self {
        Dual {
            value: self.value + a,
            deriv: self.deriv,
        }
    }

    /// `self - a` for a plain scalar `a`.
    pub fn sub_scalar(self, a: T) -> Self {
        Dual {
            value: self.value - a,
            deriv: self.deriv,
        }
    }

    /// `a - self` for a plain scalar `a`.
    pub fn scalar_sub(self, a: T) -> Self {
        Dual {
            value: a - self.value,
            deriv: -self.deriv,
        }
    }

    /// `self * a` for a plain scalar `a`.
    ///
    /// ```
    /// use algebra_core::Dual;
    ///
    /// let y = Dual::new(1.5, 1.0).mul_scalar(4.0);
    /// assert_eq!(y, Dual::new(6.0, 4.0));
    /// ```
    pub fn mul_scalar(self, a: T) -> Self {
        Dual {
            value: self.value * a,
            deriv: self.deriv * a,
        }
    }

    /// `self / a` for a plain scalar `a`, the quotient rule with `a′ = 0`.
    ///
    /// Agrees with `self / Dual::constant(a)` for every `a`, zero included.
    pub fn div_scalar(self, a: T) -> Self {
        Dual {
            value: self.value / a,
            deriv: (self.deriv * a - self.value * T::zero()) / (a * a),
        }
    }

    /// `a / self` for a plain scalar `a`: `a/b + (-a·b′/b²)·ε`.
    ///
    /// ```
    /// use algebra_core::Dual;
    ///
    /// let y = Dual::variable(2.0).scalar_div(3.0);
    /// assert_eq!(y.value, 1.5);
    /// assert_eq!(y.deriv, -0.75);
    /// ```
    pub fn scalar_div(self, a: T) -> Self {
        let b = self.value;
        Dual {
            value: a / b,
            deriv: -(a * self.deriv) / (b * b),
        }
    }
}

/// Addition: (a + a′·ε) + (b + b′·ε) = (a+b) + (a′+b′)·ε
impl<T: Add<Output = T>> Add for Dual<T> {
    type Output = Dual<T>;

    fn add(self, rhs: Self) -> Self::Output {
        Dual {
            value: self.value + rhs.value,
            deriv: self.deriv + rhs.deriv,
        }
    }
}

/// Subtraction: (a + a′·ε) - (b + b′·ε) = (a-b) + (a′-b′)·ε
impl<T: Sub<Output = T>> Sub for Dual<T> {
    type Output = Dual<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        Dual {
            value: self.value - rhs.value,
            deriv: self.deriv - rhs.deriv,
        }
    }
}

/// Multiplication: (a + a′·ε) * (b + b′·ε) = ab + (ab′ + a′b)·ε
///
/// This implements the product rule: d/dx(f·g) = f·g′ + f′·g
impl<T: Mul<Output = T> + Add<Output = T> + Clone> Mul for Dual<T> {
    type Output = Dual<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        Dual {
            value: self.value.clone() * rhs.value.clone(),
            deriv: self.value * rhs.deriv + self.deriv * rhs.value,
        }
    }
}

/// Division: (a + a′·ε) / (b + b′·ε) = a/b + ((a′b - ab′)/b²)·ε
///
/// A zero divisor is not intercepted; the components become infinite
/// or NaN exactly as the underlying float division would.
impl<T: Real> Div for Dual<T> {
    type Output = Dual<T>;

    fn div(self, rhs: Self) -> Self::Output {
        let b = rhs.value;
        Dual {
            value: self.value / b,
            deriv: (self.deriv * b - self.value * rhs.deriv) / (b * b),
        }
    }
}

/// Negation: -(a + a′·ε) = -a + (-a′)·ε
impl<T: Neg<Output = T>> Neg for Dual<T> {
    type Output = Dual<T>;

    fn neg(self) -> Self::Output {
        Dual {
            value: -self.value,
            deriv: -self.deriv,
        }
    }
}

impl<T: Zero> Zero for Dual<T> {
    fn zero() -> Self {
        Dual {
            value: T::zero(),
            deriv: T::zero(),
        }
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero() && self.deriv.is_zero()
    }
}

impl<T: Real> One for Dual<T> {
    fn one() -> Self {
        Dual::constant(T::one())
    }
}

impl<T: Zero> Sum for Dual<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<T: ApproxEq> ApproxEq for Dual<T> {
    fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.value.approx_eq(&other.value, eps) && self.deriv.approx_eq(&other.deriv, eps)
    }
}

impl<T: fmt::Display> fmt::Display for Dual<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}ε", self.value, self.deriv)
    }
}

// Scalar operands on either side, for the float component types.

macro_rules! impl_scalar_ops {
    ( $( $t:ty ),+ ) => {
        $(
            impl Add<$t> for Dual<$t> {
                type Output = Dual<$t>;

                fn add(self, rhs: $t) -> Self::Output {
                    self.add_scalar(rhs)
                }
            }

            impl Add<Dual<$t>> for $t {
                type Output = Dual<$t>;

                fn add(self, rhs: Dual<$t>) -> Self::Output {
                    rhs.add_scalar(self)
                }
            }

            impl Sub<$t> for Dual<$t> {
                type Output = Dual<$t>;

                fn sub(self, rhs: $t) -> Self::Output {
                    self.sub_scalar(rhs)
                }
            }

            impl Sub<Dual<$t>> for $t {
                type Output = Dual<$t>;

                fn sub(self, rhs: Dual<$t>) -> Self::Output {
                    rhs.scalar_sub(self)
                }
            }

            impl Mul<$t> for Dual<$t> {
                type Output = Dual<$t>;

                fn mul(self, rhs: $t) -> Self::Output {
                    self.mul_scalar(rhs)
                }
            }

            impl Mul<Dual<$t>> for $t {
                type Output = Dual<$t>;

                fn mul(self, rhs: Dual<$t>) -> Self::Output {
                    rhs.mul_scalar(self)
                }
            }

            impl Div<$t> for Dual<$t> {
                type Output = Dual<$t>;

                fn div(self, rhs: $t) -> Self::Output {
                    self.div_scalar(rhs)
                }
            }

            impl Div<Dual<$t>> for $t {
                type Output = Dual<$t>;

                fn div(self, rhs: Dual<$t>) -> Self::Output {
                    rhs.scalar_div(self)
                }
            }
        )+
    };
}

impl_scalar_ops!(f32, f64);
