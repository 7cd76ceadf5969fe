//! Example walking through the elementary-function library on duals.
//!
//! Each line prints `f(a)` and `f'(a)` from one seeded evaluation next
//! to the closed-form derivative, then nests duals for higher orders.
//!
//! Run with: `cargo run --example dual_transcendentals`

use autodiff::{derivative, second_derivative, Dual};

fn show(name: &str, a: f64, f: fn(Dual<f64>) -> Dual<f64>, expected: f64) {
    let (y, dy) = derivative(f, a);
    println!("  {name:<14} at {a:>5}: f = {y:>10.6}  f' = {dy:>10.6}  (expected {expected:.6})");
}

fn main() {
    println!("=== Dual Numbers: Elementary Functions ===\n");

    println!("First derivatives (seed deriv = 1):");
    show("sqrt(x)", 9.0, |x| x.sqrt(), 1.0 / 6.0);
    show("x^2.5", 4.0, |x| x.powf(2.5), 2.5 * 4.0_f64.powf(1.5));
    show("tan(x)", 0.5, |x| x.tan(), 1.0 / 0.5_f64.cos().powi(2));
    show("atan(x)", 1.0, |x| x.atan(), 0.5);
    show("ln|x|", -2.0, |x| x.ln_abs(), -0.5);
    show("sinh(x)", 1.0, |x| x.sinh(), 1.0_f64.cosh());
    show("cosh(x)", 1.0, |x| x.cosh(), 1.0_f64.sinh());
    show("tanh(x)", 0.0, |x| x.tanh(), 1.0);
    show("atanh(x)", 0.5, |x| x.atanh(), 1.0 / 0.75);
    println!();

    // Sigmoid σ(x) = 1 / (1 + e^(-x)), σ' = σ(1 - σ)
    println!("Sigmoid with a scalar on the left:");
    let s = 1.0 / (1.0 + (-Dual::variable(0.0_f64)).exp());
    println!("  σ(0) = {}", s);
    println!("  σ'(0) = {} (expected: 0.25)", s.deriv);
    println!();

    // f(x) = ln(sin(e^x)) at x=0
    println!("Composition f(x) = ln(sin(e^x)) at x=0:");
    let f = Dual::variable(0.0_f64).exp().sin().ln();
    println!("  f(0) = {}", f.value);
    println!("  f'(0) = {} (expected: cot(1) = {})", f.deriv, 1.0 / 1.0_f64.tan());
    println!();

    // Nesting: Dual<Dual<f64>> carries f''
    println!("Second derivatives via Dual<Dual<f64>>:");
    let (y, dy, ddy) = second_derivative(|x: Dual<Dual<f64>>| x.tanh(), 0.5);
    let t = 0.5_f64.tanh();
    println!("  tanh at 0.5: f = {y:.6}, f' = {dy:.6}, f'' = {ddy:.6}");
    println!("  (expected f'' = -2·tanh·sech² = {:.6})", -2.0 * t * (1.0 - t * t));

    let (_, _, ddy) = second_derivative(|x: Dual<Dual<f64>>| x.sqrt() * x.exp(), 1.0);
    println!("  √x·eˣ at 1: f'' = {ddy:.6} (expected {:.6})", 1.75 * 1.0_f64.exp());
    println!();

    // Three levels: the e₁e₂e₃ coefficient is f'''
    println!("Third derivative via Dual<Dual<Dual<f64>>>:");
    let a = 0.3_f64;
    let x = Dual::new(
        Dual::new(Dual::variable(a), Dual::constant(1.0)),
        Dual::new(Dual::constant(1.0), Dual::constant(0.0)),
    );
    let f = x.sin();
    println!("  sin''' at {a} = {:.6} (expected -cos = {:.6})", f.deriv.deriv.deriv, -a.cos());
    println!();

    // Degenerate points propagate IEEE values instead of failing
    println!("Out-of-domain arguments:");
    let r = Dual::variable(-1.0_f64).sqrt();
    println!("  sqrt(-1) = {}", r);
    let l = Dual::variable(0.0_f64).ln();
    println!("  ln(0)    = {}", l);
}
