//! Elementary functions over dual numbers.
//!
//! Each function `g` lifts to duals by the chain rule:
//!
//! ```text
//! g(a + a′·ε) = g(a) + (a′·g′(a))·ε
//! ```
//!
//! The rules are written against [`Real`], so the component type may
//! itself be a dual. Evaluating a rule at `Dual<Dual<T>>` differentiates
//! the rule expression a second time, which is how the Hessian drivers
//! obtain second derivatives without any second-order formulas.
//!
//! | function  | value       | derivative         |
//! |-----------|-------------|--------------------|
//! | `sqrt`    | `√a`        | `a′/(2√a)`         |
//! | `powf(k)` | `aᵏ`        | `k·a′·aᵏ⁻¹`        |
//! | `sin`     | `sin a`     | `a′·cos a`         |
//! | `cos`     | `cos a`     | `−a′·sin a`        |
//! | `tan`     | `tan a`     | `a′/cos² a`        |
//! | `atan`    | `atan a`    | `a′/(1+a²)`        |
//! | `exp`     | `eᵃ`        | `a′·eᵃ`            |
//! | `ln`      | `ln a`      | `a′/a`             |
//! | `ln_abs`  | `ln abs(a)` | `a′/a`             |
//! | `abs`     | `abs(a)`    | `a′·sign(a)`       |
//! | `sinh`    | `sinh a`    | `a′·cosh a`        |
//! | `cosh`    | `cosh a`    | `a′·sinh a`        |
//! | `tanh`    | `tanh a`    | `a′·(1−tanh² a)`   |
//! | `atanh`   | `atanh a`   | `a′/(1−a²)`        |
//!
//! Out-of-domain arguments are not checked: `sqrt` of a negative value,
//! `ln` of zero and the like produce NaN or infinities in both
//! components, as the float operations do.
//!
//! # Example
//!
//! ```
//! use algebra_core::Dual;
//!
//! // d/dx exp(sin x) at x = 0 is cos(0)·exp(sin 0) = 1
//! let y = Dual::variable(0.0_f64).sin().exp();
//! assert_eq!(y.value, 1.0);
//! assert_eq!(y.deriv, 1.0);
//! ```

use crate::{Dual, Real};

impl<T: Real> Dual<T> {
    /// Square root.
    ///
    /// For `f = a + a′·ε`, computes `√f = √a + (a′/(2√a))·ε`.
    ///
    /// # Example
    ///
    /// ```
    /// use algebra_core::Dual;
    ///
    /// let x = Dual::variable(4.0_f64);
    /// let f = x.sqrt();
    ///
    /// assert_eq!(f.value, 2.0);
    /// assert_eq!(f.deriv, 0.25);  // 1/(2√4)
    /// ```
    pub fn sqrt(self) -> Self {
        let root = self.value.sqrt();
        Dual {
            value: root,
            deriv: self.deriv / (root + root),
        }
    }

    /// Power with a constant exponent.
    ///
    /// For `f = a + a′·ε`, computes `fᵏ = aᵏ + (k·a′·aᵏ⁻¹)·ε`.
    ///
    /// # Example
    ///
    /// ```
    /// use algebra_core::Dual;
    ///
    /// let f = Dual::variable(2.0_f64).powf(3.0);
    /// assert_eq!(f.value, 8.0);
    /// assert_eq!(f.deriv, 12.0);
    /// ```
    pub fn powf(self, k: f64) -> Self {
        Dual {
            value: self.value.powf(k),
            deriv: T::from_f64(k) * self.deriv * self.value.powf(k - 1.0),
        }
    }

    /// Sine function.
    ///
    /// For `f = a + a′·ε`, computes `sin(f) = sin(a) + (a′·cos(a))·ε`.
    pub fn sin(self) -> Self {
        Dual {
            value: self.value.sin(),
            deriv: self.deriv * self.value.cos(),
        }
    }

    /// Cosine function.
    ///
    /// For `f = a + a′·ε`, computes `cos(f) = cos(a) + (-a′·sin(a))·ε`.
    pub fn cos(self) -> Self {
        Dual {
            value: self.value.cos(),
            deriv: -self.deriv * self.value.sin(),
        }
    }

    /// Tangent: derivative `a′/cos²(a)`.
    pub fn tan(self) -> Self {
        let c = self.value.cos();
        Dual {
            value: self.value.tan(),
            deriv: self.deriv / (c * c),
        }
    }

    /// Arctangent: derivative `a′/(1 + a²)`.
    pub fn atan(self) -> Self {
        let a = self.value;
        Dual {
            value: a.atan(),
            deriv: self.deriv / (T::one() + a * a),
        }
    }

    /// Exponential function.
    ///
    /// For `f = a + a′·ε`, computes `exp(f) = exp(a) + (a′·exp(a))·ε`.
    ///
    /// # Example
    ///
    /// ```
    /// use algebra_core::Dual;
    ///
    /// let x = Dual::variable(0.0_f64);
    /// let f = x.exp();
    ///
    /// assert_eq!(f.value, 1.0);   // e⁰ = 1
    /// assert_eq!(f.deriv, 1.0);   // d/dx(eˣ) at x=0 is e⁰ = 1
    /// ```
    pub fn exp(self) -> Self {
        let exp_val = self.value.exp();
        Dual {
            value: exp_val,
            deriv: self.deriv * exp_val,
        }
    }

    /// Natural logarithm.
    ///
    /// For `f = a + a′·ε`, computes `ln(f) = ln(a) + (a′/a)·ε`.
    pub fn ln(self) -> Self {
        Dual {
            value: self.value.ln(),
            deriv: self.deriv / self.value,
        }
    }

    /// Logarithm of the absolute value.
    ///
    /// Defined for negative arguments too; the derivative is `a′/a` on
    /// both sides of zero.
    ///
    /// ```
    /// use algebra_core::Dual;
    ///
    /// let f = Dual::variable(-2.0_f64).ln_abs();
    /// assert_eq!(f.value, 2.0_f64.ln());
    /// assert_eq!(f.deriv, -0.5);
    /// ```
    pub fn ln_abs(self) -> Self {
        Dual {
            value: self.value.ln_abs(),
            deriv: self.deriv / self.value,
        }
    }

    /// Absolute value: derivative `a′·sign(a)`, zero at `a = 0`.
    pub fn abs(self) -> Self {
        Dual {
            value: self.value.abs(),
            deriv: self.deriv * self.value.signum(),
        }
    }

    /// Sign of the primal value, as a constant.
    pub fn signum(self) -> Self {
        Dual::constant(self.value.signum())
    }

    /// Hyperbolic sine.
    pub fn sinh(self) -> Self {
        Dual {
            value: self.value.sinh(),
            deriv: self.deriv * self.value.cosh(),
        }
    }

    /// Hyperbolic cosine.
    pub fn cosh(self) -> Self {
        Dual {
            value: self.value.cosh(),
            deriv: self.deriv * self.value.sinh(),
        }
    }

    /// Hyperbolic tangent.
    ///
    /// For `f = a + a′·ε`, computes `tanh(f) = tanh(a) + (a′·(1 − tanh²(a)))·ε`.
    pub fn tanh(self) -> Self {
        let t = self.value.tanh();
        Dual {
            value: t,
            deriv: self.deriv * (T::one() - t * t),
        }
    }

    /// Inverse hyperbolic tangent: derivative `a′/(1 − a²)`.
    pub fn atanh(self) -> Self {
        let a = self.value;
        Dual {
            value: a.atanh(),
            deriv: self.deriv / (T::one() - a * a),
        }
    }
}

impl<T: Real> Real for Dual<T> {
    fn from_f64(v: f64) -> Self {
        Dual::constant(T::from_f64(v))
    }

    fn to_f64(self) -> f64 {
        self.value.to_f64()
    }

    fn sqrt(self) -> Self {
        Dual::sqrt(self)
    }

    fn powf(self, a: f64) -> Self {
        Dual::powf(self, a)
    }

    fn sin(self) -> Self {
        Dual::sin(self)
    }

    fn cos(self) -> Self {
        Dual::cos(self)
    }

    fn tan(self) -> Self {
        Dual::tan(self)
    }

    fn atan(self) -> Self {
        Dual::atan(self)
    }

    fn exp(self) -> Self {
        Dual::exp(self)
    }

    fn ln(self) -> Self {
        Dual::ln(self)
    }

    fn abs(self) -> Self {
        Dual::abs(self)
    }

    fn signum(self) -> Self {
        Dual::signum(self)
    }

    fn sinh(self) -> Self {
        Dual::sinh(self)
    }

    fn cosh(self) -> Self {
        Dual::cosh(self)
    }

    fn tanh(self) -> Self {
        Dual::tanh(self)
    }

    fn atanh(self) -> Self {
        Dual::atanh(self)
    }

    fn recip(self) -> Self {
        Dual::recip(self)
    }

    fn ln_abs(self) -> Self {
        Dual::ln_abs(self)
    }
}
