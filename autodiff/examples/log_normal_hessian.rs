//! Example cross-checking exact and finite-difference derivatives.
//!
//! The target is the Gaussian log-density evaluated at zero,
//! `f(μ, σ) = −½(μ²/σ² + ln 2π) − ln σ`, at `(μ, σ) = (5, 2)`. The exact
//! gradient and Hessian come from dual seeding; the finite-difference
//! drivers serve as oracles.
//!
//! Run with: `RUST_LOG=autodiff=debug cargo run --example log_normal_hessian`

use autodiff::{gradient, hessian, Dual, FiniteDiffConfig, Real};
use tracing_subscriber::EnvFilter;

fn log_normal<S: Real>(p: &[S]) -> S {
    let (mu, sigma) = (p[0], p[1]);
    let ln_2pi = S::from_f64((2.0 * std::f64::consts::PI).ln());
    S::from_f64(-0.5) * (mu * mu / (sigma * sigma) + ln_2pi) - sigma.ln()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let x = [5.0_f64, 2.0];
    let (mu, sigma) = (x[0], x[1]);
    let cfg = FiniteDiffConfig::default();

    println!("=== Log-normal: f(μ, σ) at (5, 2) ===\n");

    let (value, grad) = gradient(log_normal::<Dual<f64>>, &x);
    let fwd = cfg.forward_diff(log_normal::<Dual<f64>>, &x);
    let cen = cfg.central_diff(log_normal::<Dual<f64>>, &x);

    println!("f(5, 2) = {value:.6}");
    println!();
    println!("Gradient        exact        forward      central      closed form");
    println!(
        "  ∂f/∂μ   {:>12.8} {:>12.8} {:>12.8} {:>12.8}",
        grad[0],
        fwd[0],
        cen[0],
        -mu / (sigma * sigma)
    );
    println!(
        "  ∂f/∂σ   {:>12.8} {:>12.8} {:>12.8} {:>12.8}",
        grad[1],
        fwd[1],
        cen[1],
        mu * mu / sigma.powi(3) - 1.0 / sigma
    );
    println!();

    let exact = hessian(log_normal::<Dual<Dual<f64>>>, &x);
    let numeric = cfg.numerical_hessian(log_normal::<Dual<f64>>, &x);

    println!("Hessian (dual seeding):");
    print!("{}", exact.hessian);
    println!("Hessian (finite differences, h = {}):", cfg.hessian_step);
    print!("{}", numeric);
    println!(
        "Closed form: ∂μμ = {}, ∂μσ = {}, ∂σσ = {}",
        -1.0 / (sigma * sigma),
        2.0 * mu / sigma.powi(3),
        -3.0 * mu * mu / sigma.powi(4) + 1.0 / (sigma * sigma)
    );
    println!();

    println!("Gradient from the Hessian's diagonal seeds: {:?}", exact.gradient);
    println!("Symmetric: {}", exact.hessian.is_symmetric());
}
