//! Algebraic laws and chain rules of `Dual<f64>`, checked on sampled
//! values.

use algebra_core::{ApproxEq, Dual, Matrix};
use num_traits::{One, Zero};
use proptest::prelude::*;

fn dual() -> impl Strategy<Value = Dual<f64>> {
    (-1e3..1e3_f64, -1e3..1e3_f64).prop_map(|(v, d)| Dual::new(v, d))
}

/// `|a - b| <= eps`
fn close(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// `|a - b| <= eps·max(1, |b|)`
fn rel_close(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps * b.abs().max(1.0)
}

const EPS: f64 = 1e-10;

proptest! {
    #[test]
    fn addition_commutes(x in dual(), y in dual()) {
        prop_assert_eq!(x + y, y + x);
    }

    #[test]
    fn multiplication_commutes(x in dual(), y in dual()) {
        prop_assert_eq!(x * y, y * x);
    }

    #[test]
    fn identities(x in dual()) {
        prop_assert_eq!(x + Dual::new(0.0, 0.0), x);
        prop_assert_eq!(x * Dual::new(1.0, 0.0), x);
        prop_assert_eq!(x + Dual::zero(), x);
        prop_assert_eq!(x * Dual::one(), x);
    }

    #[test]
    fn negation_is_an_involution(x in dual()) {
        prop_assert_eq!(-(-x), x);
    }

    #[test]
    fn subtraction_is_adding_the_negation(x in dual(), y in dual()) {
        prop_assert_eq!(x - y, x + (-y));
    }

    #[test]
    fn division_undoes_multiplication(x in dual(), v in 0.5..10.0_f64, d in -10.0..10.0_f64) {
        let y = Dual::new(v, d);
        let r = (x * y) / y;
        prop_assert!(rel_close(r.value, x.value, 1e-9));
        prop_assert!(rel_close(r.deriv, x.deriv, 1e-9));
    }

    #[test]
    fn scalar_forms_match_constant_duals(x in dual(), a in -100.0..100.0_f64) {
        let c = Dual::constant(a);
        prop_assert_eq!(x + a, x + c);
        prop_assert_eq!(a - x, c - x);
        prop_assert_eq!(a * x, c * x);
        prop_assume!(a != 0.0);
        prop_assert_eq!(x / a, x / c);
    }

    #[test]
    fn sqrt_and_powf(v in 0.01..100.0_f64, k in -3.0..3.0_f64) {
        let x = Dual::variable(v);
        prop_assert!(close(x.sqrt().deriv, 0.5 / v.sqrt(), EPS));
        prop_assert!(close(x.powf(k).deriv, k * v.powf(k - 1.0), EPS));
    }

    #[test]
    fn trigonometric(v in -10.0..10.0_f64) {
        let x = Dual::variable(v);
        prop_assert!(close(x.sin().deriv, v.cos(), EPS));
        prop_assert!(close(x.cos().deriv, -v.sin(), EPS));
        prop_assert!(close(x.atan().deriv, 1.0 / (1.0 + v * v), EPS));
    }

    #[test]
    fn tangent(v in -1.2..1.2_f64) {
        let t = v.tan();
        prop_assert!(close(Dual::variable(v).tan().deriv, 1.0 + t * t, EPS));
    }

    #[test]
    fn exponential_and_logarithms(v in 0.01..100.0_f64, neg in proptest::bool::ANY) {
        let x = Dual::variable(v);
        prop_assert!(close(x.ln().deriv, 1.0 / v, EPS));

        let w = if neg { -v } else { v };
        let y = Dual::variable(w);
        prop_assert!(close(y.ln_abs().deriv, 1.0 / w, EPS));
        prop_assert!(close(y.ln_abs().value, v.ln(), EPS));
    }

    #[test]
    fn exponential(v in -5.0..5.0_f64) {
        prop_assert!(close(Dual::variable(v).exp().deriv, v.exp(), EPS));
    }

    #[test]
    fn hyperbolic(v in -5.0..5.0_f64) {
        let x = Dual::variable(v);
        let sech2 = 1.0 / (v.cosh() * v.cosh());
        prop_assert!(close(x.sinh().deriv, v.cosh(), EPS));
        prop_assert!(close(x.cosh().deriv, v.sinh(), EPS));
        prop_assert!(close(x.tanh().deriv, sech2, EPS));
    }

    #[test]
    fn inverse_hyperbolic_tangent(v in -0.9..0.9_f64) {
        prop_assert!(close(Dual::variable(v).atanh().deriv, 1.0 / (1.0 - v * v), EPS));
    }

    #[test]
    fn chain_rule_scales_by_inner_derivative(v in -2.0..2.0_f64, d in -5.0..5.0_f64) {
        // sin(x) with tangent d has derivative d·cos(v)
        let y = Dual::new(v, d).sin();
        prop_assert!(close(y.deriv, d * v.cos(), EPS));
    }

    #[test]
    fn matmul_identity(data in proptest::collection::vec(-10.0..10.0_f64, 6)) {
        let a = Matrix::from_vec(2, 3, data).unwrap();
        let left = Matrix::identity(2).matmul(&a).unwrap();
        let right = a.matmul(&Matrix::identity(3)).unwrap();
        prop_assert!(left.approx_eq(&a, 0.0));
        prop_assert!(right.approx_eq(&a, 0.0));
        prop_assert_eq!(a.transpose().transpose(), a);
    }
}
