//! # Shape Function Catalog
//!
//! ## Role
//! Closed-form shape functions b(r) and their derivatives b'(r).
//! Each family satisfies b(l0) = l0 and has b'(l0) < 0, so every valid
//! member flares out at the throat.
//!
//! | Family        | b(r)                                  | b'(l0)    |
//! |---------------|---------------------------------------|-----------|
//! | `PowerLaw`    | l0 (l0/r)^n                           | -n        |
//! | `Exponential` | l0 exp(-(r - l0)/λ)                   | -l0/λ     |
//! | `Tanh`        | l0 (1 - tanh((r - l0)/(σ l0)))        | -1/σ      |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WormholeError};

/// Shape function family tag (no parameters)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeFamily {
    PowerLaw,
    Exponential,
    Tanh,
}

impl ShapeFamily {
    pub const ALL: [ShapeFamily; 3] = [
        ShapeFamily::PowerLaw,
        ShapeFamily::Exponential,
        ShapeFamily::Tanh,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ShapeFamily::PowerLaw => "power-law",
            ShapeFamily::Exponential => "exponential",
            ShapeFamily::Tanh => "tanh",
        }
    }

    /// Name of the family's single parameter
    pub fn parameter_name(self) -> &'static str {
        match self {
            ShapeFamily::PowerLaw => "n",
            ShapeFamily::Exponential => "lambda",
            ShapeFamily::Tanh => "sigma",
        }
    }

    /// Default sweep range (inclusive) for the family parameter
    pub fn default_range(self) -> (f64, f64) {
        match self {
            ShapeFamily::PowerLaw => (0.1, 0.99),
            ShapeFamily::Exponential => (0.5, 5.0),
            ShapeFamily::Tanh => (0.1, 1.0),
        }
    }

    /// Evenly spaced parameter values over the default range
    pub fn default_grid(self, n_points: usize) -> Vec<f64> {
        let (lo, hi) = self.default_range();
        match n_points {
            0 => Vec::new(),
            1 => vec![lo],
            n => (0..n)
                .map(|i| lo + (hi - lo) * i as f64 / (n - 1) as f64)
                .collect(),
        }
    }
}

impl fmt::Display for ShapeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeFamily {
    type Err = WormholeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "power-law" | "powerlaw" => Ok(ShapeFamily::PowerLaw),
            "exponential" | "exp" => Ok(ShapeFamily::Exponential),
            "tanh" => Ok(ShapeFamily::Tanh),
            other => Err(WormholeError::invalid_configuration(format!(
                "unknown shape function '{other}'"
            ))),
        }
    }
}

/// A parameterized shape function b(r).
///
/// Construct through [`ShapeFunction::new`] or the family helpers, which reject
/// non-positive parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "kebab-case")]
pub enum ShapeFunction {
    PowerLaw { n: f64 },
    Exponential { lambda: f64 },
    Tanh { sigma: f64 },
}

impl ShapeFunction {
    /// Build a shape function from a family tag and its parameter
    pub fn new(family: ShapeFamily, param: f64) -> Result<Self> {
        if !param.is_finite() || param <= 0.0 {
            return Err(WormholeError::invalid_configuration(format!(
                "{} parameter {} must be positive and finite, got {}",
                family,
                family.parameter_name(),
                param
            )));
        }
        Ok(match family {
            ShapeFamily::PowerLaw => ShapeFunction::PowerLaw { n: param },
            ShapeFamily::Exponential => ShapeFunction::Exponential { lambda: param },
            ShapeFamily::Tanh => ShapeFunction::Tanh { sigma: param },
        })
    }

    pub fn power_law(n: f64) -> Result<Self> {
        Self::new(ShapeFamily::PowerLaw, n)
    }

    pub fn exponential(lambda: f64) -> Result<Self> {
        Self::new(ShapeFamily::Exponential, lambda)
    }

    pub fn tanh(sigma: f64) -> Result<Self> {
        Self::new(ShapeFamily::Tanh, sigma)
    }

    /// Re-check the parameter (values built by hand or deserialized bypass `new`)
    pub fn validate(&self) -> Result<()> {
        Self::new(self.family(), self.parameter()).map(|_| ())
    }

    pub fn family(&self) -> ShapeFamily {
        match self {
            ShapeFunction::PowerLaw { .. } => ShapeFamily::PowerLaw,
            ShapeFunction::Exponential { .. } => ShapeFamily::Exponential,
            ShapeFunction::Tanh { .. } => ShapeFamily::Tanh,
        }
    }

    pub fn parameter(&self) -> f64 {
        match *self {
            ShapeFunction::PowerLaw { n } => n,
            ShapeFunction::Exponential { lambda } => lambda,
            ShapeFunction::Tanh { sigma } => sigma,
        }
    }

    /// b(r) for throat radius `l0`
    #[inline]
    pub fn value(&self, r: f64, l0: f64) -> f64 {
        match *self {
            ShapeFunction::PowerLaw { n } => l0 * (l0 / r).powf(n),
            ShapeFunction::Exponential { lambda } => l0 * (-(r - l0) / lambda).exp(),
            ShapeFunction::Tanh { sigma } => l0 * (1.0 - ((r - l0) / (sigma * l0)).tanh()),
        }
    }

    /// b'(r) = db/dr for throat radius `l0`
    #[inline]
    pub fn derivative(&self, r: f64, l0: f64) -> f64 {
        match *self {
            ShapeFunction::PowerLaw { n } => -n * (l0 / r).powf(n + 1.0),
            ShapeFunction::Exponential { lambda } => -(l0 / lambda) * (-(r - l0) / lambda).exp(),
            ShapeFunction::Tanh { sigma } => {
                let sech = 1.0 / ((r - l0) / (sigma * l0)).cosh();
                -sech * sech / sigma
            }
        }
    }

    /// (b(r), b'(r)) in one call
    #[inline]
    pub fn evaluate(&self, r: f64, l0: f64) -> (f64, f64) {
        (self.value(r, l0), self.derivative(r, l0))
    }
}

impl fmt::Display for ShapeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}={})",
            self.family(),
            self.family().parameter_name(),
            self.parameter()
        )
    }
}
