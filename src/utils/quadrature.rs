//! # Quadrature Helpers
//!
//! One-dimensional integration rules shared by the coordinate map and the
//! ANEC integrator.
//!
//! - `adaptive_simpson`: recursive Simpson with Richardson correction, used
//!   on smooth integrands where an error bound is wanted.
//! - `trapezoid`: composite rule over possibly non-uniform samples, used
//!   where some samples may have been discarded.
//! - `finite_trapezoid`: drops non-finite samples, counts them, then applies
//!   `trapezoid` to what is left.

use crate::error::{Result, WormholeError};

/// Maximum recursion depth for adaptive Simpson
pub const MAX_SIMPSON_DEPTH: u32 = 48;

/// Why an adaptive integration did not produce a value
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuadratureFailure {
    /// Recursion hit `MAX_SIMPSON_DEPTH` before meeting the tolerance
    DepthExceeded { at: f64 },
    /// The integrand returned NaN or ±∞
    NonFinite { at: f64 },
}

impl std::fmt::Display for QuadratureFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuadratureFailure::DepthExceeded { at } => {
                write!(f, "adaptive Simpson did not converge near x={at}")
            }
            QuadratureFailure::NonFinite { at } => {
                write!(f, "integrand is not finite at x={at}")
            }
        }
    }
}

/// Integrate `f` over [a, b] to absolute tolerance `tol`.
pub fn adaptive_simpson<F>(f: &F, a: f64, b: f64, tol: f64) -> std::result::Result<f64, QuadratureFailure>
where
    F: Fn(f64) -> f64,
{
    let fa = finite(f, a)?;
    let fb = finite(f, b)?;
    let m = 0.5 * (a + b);
    let fm = finite(f, m)?;
    let whole = (b - a) / 6.0 * (fa + 4.0 * fm + fb);
    simpson_step(f, a, b, fa, fm, fb, whole, tol, MAX_SIMPSON_DEPTH)
}

#[allow(clippy::too_many_arguments)]
fn simpson_step<F>(
    f: &F,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    tol: f64,
    depth: u32,
) -> std::result::Result<f64, QuadratureFailure>
where
    F: Fn(f64) -> f64,
{
    let m = 0.5 * (a + b);
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = finite(f, lm)?;
    let frm = finite(f, rm)?;
    let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
    let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
    let delta = left + right - whole;

    if delta.abs() <= 15.0 * tol {
        return Ok(left + right + delta / 15.0);
    }
    if depth == 0 {
        return Err(QuadratureFailure::DepthExceeded { at: m });
    }
    let l = simpson_step(f, a, m, fa, flm, fm, left, 0.5 * tol, depth - 1)?;
    let r = simpson_step(f, m, b, fm, frm, fb, right, 0.5 * tol, depth - 1)?;
    Ok(l + r)
}

#[inline]
fn finite<F: Fn(f64) -> f64>(f: &F, x: f64) -> std::result::Result<f64, QuadratureFailure> {
    let y = f(x);
    if y.is_finite() {
        Ok(y)
    } else {
        Err(QuadratureFailure::NonFinite { at: x })
    }
}

/// Composite trapezoid rule over paired samples (xs ascending).
pub fn trapezoid(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| 0.5 * (y[0] + y[1]) * (x[1] - x[0]))
        .sum()
}

/// Trapezoid sum over the finite samples of a grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FiniteSum {
    pub value: f64,
    pub discarded: usize,
    pub total: usize,
}

impl FiniteSum {
    pub fn discarded_fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.discarded as f64 / self.total as f64
        }
    }

    /// More than `threshold` of the samples were dropped
    pub fn is_low_confidence(&self, threshold: f64) -> bool {
        self.discarded_fraction() > threshold
    }
}

/// Trapezoid over the pairs whose `y` is finite. Fewer than two finite
/// samples is a `NumericalDegeneracy`.
pub fn finite_trapezoid(xs: &[f64], ys: &[f64]) -> Result<FiniteSum> {
    debug_assert_eq!(xs.len(), ys.len());
    let total = xs.len();
    let (kept_x, kept_y): (Vec<f64>, Vec<f64>) = xs
        .iter()
        .zip(ys)
        .filter(|(_, y)| y.is_finite())
        .map(|(&x, &y)| (x, y))
        .unzip();
    let discarded = total - kept_x.len();
    if kept_x.len() < 2 {
        return Err(WormholeError::NumericalDegeneracy { discarded, total });
    }
    Ok(FiniteSum {
        value: trapezoid(&kept_x, &kept_y),
        discarded,
        total,
    })
}

/// `n` evenly spaced points over [a, b] inclusive
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => {
            let step = (b - a) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { b } else { a + step * i as f64 })
                .collect()
        }
    }
}
