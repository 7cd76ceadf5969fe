//! Exact derivatives by forward-mode seeding.
//!
//! Every driver copies the caller's point into a scratch vector of
//! duals, sets one tangent slot to 1, evaluates the target, reads the
//! tangent of the result and clears the slot again. The caller's input
//! is never touched and the scratch vector is dropped on every exit
//! path.
//!
//! Targets are ordinary functions over duals. Writing the target once,
//! generic over [`Real`], lets the same code serve every driver:
//!
//! ```
//! use algebra_core::{Dual, Real};
//! use autodiff::{gradient, hessian};
//!
//! fn rosenbrock<S: Real>(p: &[S]) -> S {
//!     let (x, y) = (p[0], p[1]);
//!     let a = S::one() - x;
//!     let b = y - x * x;
//!     a * a + S::from_f64(100.0) * b * b
//! }
//!
//! let (value, grad) = gradient(rosenbrock::<Dual<f64>>, &[1.0, 1.0]);
//! assert_eq!(value, 0.0);
//! assert_eq!(grad, vec![0.0, 0.0]);
//!
//! let h = hessian(rosenbrock::<Dual<Dual<f64>>>, &[1.0, 1.0]);
//! assert_eq!(h.hessian.as_slice(), &[802.0, -400.0, -400.0, 200.0]);
//! ```
//!
//! # Cost
//!
//! A gradient over `N` inputs takes `N` evaluations of the target, one
//! per direction. A Hessian takes `N(N+1)/2`, one per upper-triangle
//! pair; the lower triangle is mirrored, so the result is symmetric
//! exactly.

use algebra_core::{Dual, Matrix, Real, ShapeError};
use tracing::{debug, trace};

/// Value, gradient and Hessian of a scalar function at one point.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondOrder<T> {
    /// `f(x)`
    pub value: T,
    /// `∇f(x)`, harvested from the diagonal seeds.
    pub gradient: Vec<T>,
    /// `∇²f(x)`, `N × N` and symmetric.
    pub hessian: Matrix<T>,
}

/// Value and first derivative of a univariate function.
///
/// # Example
///
/// ```
/// use autodiff::derivative;
///
/// let (y, dy) = derivative(|x| x * x * x, 2.0_f64);
/// assert_eq!(y, 8.0);
/// assert_eq!(dy, 12.0);
/// ```
pub fn derivative<T, F>(f: F, x: T) -> (T, T)
where
    T: Real,
    F: Fn(Dual<T>) -> Dual<T>,
{
    debug!(x = ?x, "derivative");
    let r = f(Dual::variable(x));
    (r.value, r.deriv)
}

/// Value, first and second derivative of a univariate function.
///
/// The argument is seeded as `Dual<Dual<T>>` with both tangents set, so
/// the outer tangent of the inner tangent is `f″(x)`.
///
/// # Example
///
/// ```
/// use algebra_core::Dual;
/// use autodiff::second_derivative;
///
/// let (y, dy, ddy) = second_derivative(|x: Dual<Dual<f64>>| x.sin(), 0.0);
/// assert_eq!((y, dy, ddy), (0.0, 1.0, 0.0));
/// ```
pub fn second_derivative<T, F>(f: F, x: T) -> (T, T, T)
where
    T: Real,
    F: Fn(Dual<Dual<T>>) -> Dual<Dual<T>>,
{
    debug!(x = ?x, "second derivative");
    let r = f(Dual::new(Dual::variable(x), Dual::constant(T::one())));
    (r.value.value, r.value.deriv, r.deriv.deriv)
}

/// Derivative of `f` at `x` along `direction` (a Jacobian-vector
/// product for a scalar target) in one evaluation.
///
/// # Panics
///
/// If `direction.len() != x.len()`.
///
/// # Example
///
/// ```
/// use algebra_core::Dual;
/// use autodiff::directional_derivative;
///
/// let f = |p: &[Dual<f64>]| p[0] * p[1];
/// let (v, dv) = directional_derivative(f, &[3.0, 4.0], &[1.0, 1.0]);
/// assert_eq!(v, 12.0);
/// assert_eq!(dv, 7.0);
/// ```
pub fn directional_derivative<T, F>(f: F, x: &[T], direction: &[T]) -> (T, T)
where
    T: Real,
    F: Fn(&[Dual<T>]) -> Dual<T>,
{
    require(same_length(x.len(), direction.len()));
    debug!(dim = x.len(), "directional derivative");

    let seeded: Vec<Dual<T>> = x
        .iter()
        .zip(direction)
        .map(|(&v, &d)| Dual::new(v, d))
        .collect();
    let r = f(&seeded);
    (r.value, r.deriv)
}

/// Exact gradient by `N` directional evaluations.
///
/// Returns `(f(x), ∇f(x))`. For `N = 0` the target is evaluated once
/// and the gradient is empty.
///
/// # Example
///
/// ```
/// use algebra_core::{Dual, Real};
/// use autodiff::gradient;
///
/// // f(x, y) = x² + 2xy + y²
/// fn f<S: Real>(p: &[S]) -> S {
///     let (x, y) = (p[0], p[1]);
///     x * x + S::from_f64(2.0) * x * y + y * y
/// }
///
/// let (value, grad) = gradient(f::<Dual<f64>>, &[3.0, 4.0]);
/// assert_eq!(value, 49.0);
/// assert_eq!(grad, vec![14.0, 14.0]);
/// ```
pub fn gradient<T, F>(f: F, x: &[T]) -> (T, Vec<T>)
where
    T: Real,
    F: Fn(&[Dual<T>]) -> Dual<T>,
{
    let n = x.len();
    debug!(dim = n, "gradient");

    let mut seeded: Vec<Dual<T>> = x.iter().map(|&v| Dual::constant(v)).collect();
    let mut grad = Vec::with_capacity(n);
    let mut value = None;

    for i in 0..n {
        seeded[i].deriv = T::one();
        let r = f(&seeded);
        seeded[i].deriv = T::zero();

        trace!(direction = i, partial = ?r.deriv, "seeded evaluation");
        value.get_or_insert(r.value);
        grad.push(r.deriv);
    }

    let value = value.unwrap_or_else(|| f(&seeded).value);
    (value, grad)
}

/// [`gradient`] reading from and writing into column-vector buffers.
///
/// Returns `f(input)`; `grad` receives `∇f(input)`.
///
/// # Panics
///
/// Before any evaluation, if `input` is not a column vector or `grad`
/// does not have the same shape.
pub fn gradient_into<T, F>(f: F, input: &Matrix<T>, grad: &mut Matrix<T>) -> T
where
    T: Real,
    F: Fn(&[Dual<T>]) -> Dual<T>,
{
    require(column_buffers(input, grad));
    let (value, g) = gradient(f, input.as_slice());
    grad.as_mut_slice().copy_from_slice(&g);
    value
}

/// Exact Hessian by nested seeding.
///
/// For each pair `i ≤ j` the inner tangent of `xᵢ` and the outer
/// tangent of `xⱼ` are set to 1; `deriv.deriv` of the result is
/// `∂²f/∂xᵢ∂xⱼ`. Diagonal seeds also expose `∂f/∂xᵢ` in `deriv.value`,
/// which fills [`SecondOrder::gradient`] at no extra cost.
///
/// # Example
///
/// ```
/// use algebra_core::Dual;
/// use autodiff::hessian;
///
/// // f(x, y) = x²y
/// let f = |p: &[Dual<Dual<f64>>]| p[0] * p[0] * p[1];
/// let r = hessian(f, &[3.0, 2.0]);
///
/// assert_eq!(r.value, 18.0);
/// assert_eq!(r.gradient, vec![12.0, 9.0]);
/// assert_eq!(r.hessian.as_slice(), &[4.0, 6.0, 6.0, 0.0]);
/// ```
pub fn hessian<T, F>(f: F, x: &[T]) -> SecondOrder<T>
where
    T: Real,
    F: Fn(&[Dual<Dual<T>>]) -> Dual<Dual<T>>,
{
    let n = x.len();
    debug!(dim = n, evaluations = n * (n + 1) / 2, "hessian");

    let mut seeded: Vec<Dual<Dual<T>>> = x
        .iter()
        .map(|&v| Dual::constant(Dual::constant(v)))
        .collect();
    let mut hess = Matrix::zeros(n, n);
    let mut grad = vec![T::zero(); n];
    let mut value = None;

    for i in 0..n {
        for j in i..n {
            seeded[i].value.deriv = T::one();
            seeded[j].deriv.value = T::one();
            let r = f(&seeded);
            seeded[i].value.deriv = T::zero();
            seeded[j].deriv.value = T::zero();

            let h = r.deriv.deriv;
            trace!(i, j, second = ?h, "seeded evaluation");
            hess[(i, j)] = h;
            hess[(j, i)] = h;
            if i == j {
                grad[i] = r.deriv.value;
            }
            value.get_or_insert(r.value.value);
        }
    }

    let value = value.unwrap_or_else(|| f(&seeded).value.value);
    SecondOrder {
        value,
        gradient: grad,
        hessian: hess,
    }
}

/// [`hessian`] reading a column-vector buffer and writing an `N × N` one.
///
/// Returns `f(input)`.
///
/// # Panics
///
/// Before any evaluation, if `input` is not a column vector or `hess`
/// is not `N × N` for `N = input.rows()`.
pub fn hessian_into<T, F>(f: F, input: &Matrix<T>, hess: &mut Matrix<T>) -> T
where
    T: Real,
    F: Fn(&[Dual<Dual<T>>]) -> Dual<Dual<T>>,
{
    require(square_buffer(input, hess));
    let r = hessian(f, input.as_slice());
    hess.as_mut_slice().copy_from_slice(r.hessian.as_slice());
    r.value
}

// Shape preconditions shared with the finite-difference drivers. A
// violation is a caller bug, so it panics before any evaluation.

pub(crate) fn require<V>(checked: Result<V, ShapeError>) -> V {
    match checked {
        Ok(v) => v,
        Err(err) => panic!("driver precondition violated: {err}"),
    }
}

pub(crate) fn same_length(n: usize, m: usize) -> Result<(), ShapeError> {
    if n != m {
        return Err(ShapeError::Expected {
            expected_rows: n,
            expected_cols: 1,
            rows: m,
            cols: 1,
        });
    }
    Ok(())
}

pub(crate) fn column_buffers<T>(input: &Matrix<T>, out: &Matrix<T>) -> Result<usize, ShapeError> {
    let n = column_input(input)?;
    expect_shape(out, n, 1)?;
    Ok(n)
}

pub(crate) fn square_buffer<T>(input: &Matrix<T>, out: &Matrix<T>) -> Result<usize, ShapeError> {
    let n = column_input(input)?;
    expect_shape(out, n, n)?;
    Ok(n)
}

fn column_input<T>(input: &Matrix<T>) -> Result<usize, ShapeError> {
    if !input.is_column() {
        return Err(ShapeError::NotColumn {
            rows: input.rows(),
            cols: input.cols(),
        });
    }
    Ok(input.rows())
}

fn expect_shape<T>(m: &Matrix<T>, rows: usize, cols: usize) -> Result<(), ShapeError> {
    if m.shape() != (rows, cols) {
        return Err(ShapeError::Expected {
            expected_rows: rows,
            expected_cols: cols,
            rows: m.rows(),
            cols: m.cols(),
        });
    }
    Ok(())
}
