//! Finite-difference derivatives, used as oracles for the exact drivers.
//!
//! The targets are the same first-order dual targets the exact drivers
//! take. They are evaluated with every tangent slot zero and only the
//! primal value of the result is read, so the results are plain `T`.
//!
//! | driver               | stencil                                          | error  |
//! |----------------------|--------------------------------------------------|--------|
//! | [`forward_diff`]     | `(f(x + hεᵢ) − f(x)) / h`                        | `O(h)` |
//! | [`central_diff`]     | `(f(x + hεᵢ) − f(x − hεᵢ)) / 2h`                 | `O(h²)`|
//! | [`numerical_hessian`]| `(f(x + hεᵢ + hεⱼ) − f(x + hεᵢ) − f(x + hεⱼ) + f(x)) / h²` | `O(h)` |
//!
//! Non-differentiable points are not detected. The step is the caller's
//! choice; [`FiniteDiffConfig`] carries sensible defaults.

use algebra_core::{Dual, Matrix, Real};
use tracing::{debug, trace};

use crate::forward::{column_buffers, require};

/// Forward-difference gradient with step `h`.
///
/// Evaluates `f` at `x` once and at each of the `N` forward-shifted
/// points.
///
/// # Example
///
/// ```
/// use algebra_core::Dual;
/// use autodiff::forward_diff;
///
/// let f = |p: &[Dual<f64>]| p[0] * p[0] + p[1];
/// let g = forward_diff(f, &[1.0, 5.0], 1e-6);
/// assert!((g[0] - 2.0).abs() < 1e-5);
/// assert!((g[1] - 1.0).abs() < 1e-6);
/// ```
pub fn forward_diff<T, F>(f: F, x: &[T], h: f64) -> Vec<T>
where
    T: Real,
    F: Fn(&[Dual<T>]) -> Dual<T>,
{
    let n = x.len();
    debug!(dim = n, step = h, "forward difference");

    let step = T::from_f64(h);
    let mut points = constants(x);
    let fx = f(&points).value;

    (0..n)
        .map(|i| {
            points[i].value = x[i] + step;
            let fi = f(&points).value;
            points[i].value = x[i];
            trace!(direction = i, "forward step");
            (fi - fx) / step
        })
        .collect()
}

/// Central-difference gradient with step `h`.
///
/// Two evaluations per input, none at `x` itself.
///
/// # Example
///
/// ```
/// use algebra_core::Dual;
/// use autodiff::central_diff;
///
/// let f = |p: &[Dual<f64>]| p[0].sin();
/// let g = central_diff(f, &[0.0], 1e-6);
/// assert!((g[0] - 1.0).abs() < 1e-9);
/// ```
pub fn central_diff<T, F>(f: F, x: &[T], h: f64) -> Vec<T>
where
    T: Real,
    F: Fn(&[Dual<T>]) -> Dual<T>,
{
    let n = x.len();
    debug!(dim = n, step = h, "central difference");

    let step = T::from_f64(h);
    let mut points = constants(x);

    (0..n)
        .map(|i| {
            points[i].value = x[i] + step;
            let up = f(&points).value;
            points[i].value = x[i] - step;
            let down = f(&points).value;
            points[i].value = x[i];
            trace!(direction = i, "central step");
            (up - down) / (step + step)
        })
        .collect()
}

/// Finite-difference Hessian with step `h`.
///
/// `f(x)` and the `N` single-shift values are computed once and reused;
/// each upper-triangle pair then costs one more evaluation, and the
/// lower triangle is mirrored.
pub fn numerical_hessian<T, F>(f: F, x: &[T], h: f64) -> Matrix<T>
where
    T: Real,
    F: Fn(&[Dual<T>]) -> Dual<T>,
{
    let n = x.len();
    debug!(dim = n, step = h, "numerical hessian");

    let step = T::from_f64(h);
    let mut points = constants(x);
    let fx = f(&points).value;

    let shifted: Vec<T> = x.iter().map(|&v| v + step).collect();
    let single: Vec<T> = (0..n)
        .map(|i| {
            points[i].value = shifted[i];
            let fi = f(&points).value;
            points[i].value = x[i];
            fi
        })
        .collect();

    let mut hess = Matrix::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            if i == j {
                points[i].value = shifted[i] + step;
            } else {
                points[i].value = shifted[i];
                points[j].value = shifted[j];
            }
            let fij = f(&points).value;
            points[i].value = x[i];
            points[j].value = x[j];

            let v = (fij - single[i] - single[j] + fx) / (step * step);
            trace!(i, j, "hessian stencil");
            hess[(i, j)] = v;
            hess[(j, i)] = v;
        }
    }
    hess
}

/// [`forward_diff`] reading from and writing into column-vector buffers.
///
/// # Panics
///
/// Before any evaluation, if `input` is not a column vector or `grad`
/// does not have the same shape.
pub fn forward_diff_into<T, F>(f: F, input: &Matrix<T>, grad: &mut Matrix<T>, h: f64)
where
    T: Real,
    F: Fn(&[Dual<T>]) -> Dual<T>,
{
    require(column_buffers(input, grad));
    let g = forward_diff(f, input.as_slice(), h);
    grad.as_mut_slice().copy_from_slice(&g);
}

/// [`central_diff`] reading from and writing into column-vector buffers.
///
/// # Panics
///
/// Before any evaluation, if `input` is not a column vector or `grad`
/// does not have the same shape.
pub fn central_diff_into<T, F>(f: F, input: &Matrix<T>, grad: &mut Matrix<T>, h: f64)
where
    T: Real,
    F: Fn(&[Dual<T>]) -> Dual<T>,
{
    require(column_buffers(input, grad));
    let g = central_diff(f, input.as_slice(), h);
    grad.as_mut_slice().copy_from_slice(&g);
}

fn constants<T: Real>(x: &[T]) -> Vec<Dual<T>> {
    x.iter().map(|&v| Dual::constant(v)).collect()
}

/// Step sizes for the finite-difference drivers.
///
/// The defaults suit `f64` targets of moderate scale: `1e-8` for
/// gradients, where the stencils divide by `h` once, and `1e-5` for
/// the Hessian stencil, which divides by `h²`.
///
/// # Example
///
/// ```
/// use algebra_core::Dual;
/// use autodiff::FiniteDiffConfig;
///
/// let cfg = FiniteDiffConfig::default().with_gradient_step(1e-7);
/// assert_eq!(cfg.gradient_step, 1e-7);
/// assert_eq!(cfg.hessian_step, 1e-5);
///
/// let f = |p: &[Dual<f64>]| p[0] * p[1];
/// let g = cfg.central_diff(f, &[2.0, 3.0]);
/// assert!((g[0] - 3.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDiffConfig {
    /// Step for [`forward_diff`] and [`central_diff`].
    pub gradient_step: f64,
    /// Step for [`numerical_hessian`].
    pub hessian_step: f64,
}

impl FiniteDiffConfig {
    /// Default gradient step.
    pub const GRADIENT_STEP: f64 = 1e-8;
    /// Default Hessian step.
    pub const HESSIAN_STEP: f64 = 1e-5;

    /// Replace the gradient step.
    pub fn with_gradient_step(mut self, h: f64) -> Self {
        self.gradient_step = h;
        self
    }

    /// Replace the Hessian step.
    pub fn with_hessian_step(mut self, h: f64) -> Self {
        self.hessian_step = h;
        self
    }

    /// [`forward_diff`] with the configured gradient step.
    pub fn forward_diff<T, F>(&self, f: F, x: &[T]) -> Vec<T>
    where
        T: Real,
        F: Fn(&[Dual<T>]) -> Dual<T>,
    {
        forward_diff(f, x, self.gradient_step)
    }

    /// [`central_diff`] with the configured gradient step.
    pub fn central_diff<T, F>(&self, f: F, x: &[T]) -> Vec<T>
    where
        T: Real,
        F: Fn(&[Dual<T>]) -> Dual<T>,
    {
        central_diff(f, x, self.gradient_step)
    }

    /// [`numerical_hessian`] with the configured Hessian step.
    pub fn numerical_hessian<T, F>(&self, f: F, x: &[T]) -> Matrix<T>
    where
        T: Real,
        F: Fn(&[Dual<T>]) -> Dual<T>,
    {
        numerical_hessian(f, x, self.hessian_step)
    }
}

impl Default for FiniteDiffConfig {
    fn default() -> Self {
        FiniteDiffConfig {
            gradient_step: Self::GRADIENT_STEP,
            hessian_step: Self::HESSIAN_STEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forward::{gradient, hessian};
    use algebra_core::ApproxEq;
    use std::cell::Cell;

    fn tanh_sin<S: Real>(p: &[S]) -> S {
        p[0].tanh() + p[1].sin()
    }

    fn mixed<S: Real>(p: &[S]) -> S {
        // exp(x)·y + y²·z
        let (x, y, z) = (p[0], p[1], p[2]);
        x.exp() * y + y * y * z
    }

    #[test]
    fn forward_diff_near_exact_gradient() {
        let x = [0.5, 0.0];
        let (_, exact) = gradient(tanh_sin::<Dual<f64>>, &x);
        let approx = forward_diff(tanh_sin::<Dual<f64>>, &x, 1e-8);
        for (a, e) in approx.iter().zip(&exact) {
            assert!((a - e).abs() < 1e-4, "{a} vs {e}");
        }
    }

    #[test]
    fn central_diff_near_exact_gradient() {
        let x = [0.5, 0.0];
        let (_, exact) = gradient(tanh_sin::<Dual<f64>>, &x);
        let approx = central_diff(tanh_sin::<Dual<f64>>, &x, 1e-8);
        for (a, e) in approx.iter().zip(&exact) {
            assert!((a - e).abs() < 1e-6, "{a} vs {e}");
        }
    }

    #[test]
    fn numerical_hessian_near_exact_hessian() {
        let x = [0.3, -1.2, 0.7];
        let exact = hessian(mixed::<Dual<Dual<f64>>>, &x).hessian;
        let approx = numerical_hessian(mixed::<Dual<f64>>, &x, 1e-5);
        assert!(approx.is_symmetric());
        assert!(approx.approx_eq(&exact, 1e-3));
    }

    #[test]
    fn evaluation_counts() {
        let calls = Cell::new(0);
        let f = |p: &[Dual<f64>]| {
            calls.set(calls.get() + 1);
            mixed(p)
        };
        let x = [0.3, -1.2, 0.7];

        forward_diff(&f, &x, 1e-6);
        assert_eq!(calls.replace(0), 4);

        central_diff(&f, &x, 1e-6);
        assert_eq!(calls.replace(0), 6);

        numerical_hessian(&f, &x, 1e-4);
        assert_eq!(calls.replace(0), 1 + 3 + 6);
    }

    #[test]
    fn targets_see_zero_tangents() {
        let f = |p: &[Dual<f64>]| {
            assert!(p.iter().all(|d| d.deriv == 0.0));
            p[0] * p[0]
        };
        forward_diff(f, &[1.0], 1e-6);
        central_diff(f, &[1.0], 1e-6);
        numerical_hessian(f, &[1.0], 1e-4);
    }

    #[test]
    fn into_forms_fill_buffers() {
        let input = Matrix::column(vec![0.5, 0.0]);
        let mut fwd = Matrix::zeros(2, 1);
        let mut cen = Matrix::zeros(2, 1);
        forward_diff_into(tanh_sin::<Dual<f64>>, &input, &mut fwd, 1e-8);
        central_diff_into(tanh_sin::<Dual<f64>>, &input, &mut cen, 1e-8);
        assert!(fwd.approx_eq(&cen, 1e-4));
        assert!((cen[(1, 0)] - 1.0).abs() < 1e-6);
        assert_eq!(input.as_slice(), &[0.5, 0.0]);
    }

    #[test]
    #[should_panic(expected = "expected a 2x1 matrix, got 3x1")]
    fn into_forms_check_shapes() {
        let input = Matrix::column(vec![0.5, 0.0]);
        let mut grad = Matrix::zeros(3, 1);
        central_diff_into(tanh_sin::<Dual<f64>>, &input, &mut grad, 1e-8);
    }

    #[test]
    fn config_defaults_and_builders() {
        let cfg = FiniteDiffConfig::default();
        assert_eq!(cfg.gradient_step, 1e-8);
        assert_eq!(cfg.hessian_step, 1e-5);

        let cfg = cfg.with_gradient_step(1e-6).with_hessian_step(1e-4);
        assert_eq!(
            cfg,
            FiniteDiffConfig {
                gradient_step: 1e-6,
                hessian_step: 1e-4
            }
        );
    }

    #[test]
    fn config_methods_use_configured_steps() {
        let cfg = FiniteDiffConfig::default().with_gradient_step(1e-3);
        let f = |p: &[Dual<f64>]| p[0] * p[0];
        // Forward difference of x² is exactly 2x + h.
        let g = cfg.forward_diff(f, &[1.0]);
        assert!((g[0] - 2.001).abs() < 1e-9);
        assert_eq!(cfg.central_diff(f, &[1.0]), central_diff(f, &[1.0], 1e-3));
        assert_eq!(
            cfg.numerical_hessian(f, &[1.0]),
            numerical_hessian(f, &[1.0], 1e-5)
        );
    }

    #[test]
    fn empty_input_gives_empty_results() {
        let f = |_: &[Dual<f64>]| Dual::constant(1.0);
        assert!(forward_diff(f, &[], 1e-6).is_empty());
        assert!(central_diff(f, &[], 1e-6).is_empty());
        assert_eq!(numerical_hessian(f, &[], 1e-4).shape(), (0, 0));
    }
}
