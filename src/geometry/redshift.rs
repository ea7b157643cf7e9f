//! # Redshift Functions
//!
//! Closed-form redshift functions Φ(r) with first and second derivatives.
//! Φ must stay finite everywhere, otherwise the spacetime has a horizon.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WormholeError};

/// Φ and its first two radial derivatives at one point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RedshiftValue {
    pub phi: f64,
    pub phi_prime: f64,
    pub phi_double_prime: f64,
}

/// Redshift function Φ(r)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RedshiftFunction {
    /// Φ = 0: all tidal structure comes from the shape function
    #[default]
    Zero,
    /// Φ = Φ0: rescales coordinate time only
    Constant { phi0: f64 },
    /// Φ = A exp(-(r - l0)² / (2w²)): tidal hump centered on the throat
    GaussianHump { amplitude: f64, width: f64 },
}

impl RedshiftFunction {
    pub fn validate(&self) -> Result<()> {
        match *self {
            RedshiftFunction::Zero => Ok(()),
            RedshiftFunction::Constant { phi0 } => {
                if phi0.is_finite() {
                    Ok(())
                } else {
                    Err(WormholeError::invalid_configuration(format!(
                        "constant redshift must be finite, got {phi0}"
                    )))
                }
            }
            RedshiftFunction::GaussianHump { amplitude, width } => {
                if !amplitude.is_finite() {
                    return Err(WormholeError::invalid_configuration(format!(
                        "redshift amplitude must be finite, got {amplitude}"
                    )));
                }
                if !(width.is_finite() && width > 0.0) {
                    return Err(WormholeError::invalid_configuration(format!(
                        "redshift width must be positive, got {width}"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Φ(r)
    #[inline]
    pub fn phi(&self, r: f64, l0: f64) -> f64 {
        self.evaluate(r, l0).phi
    }

    /// Φ, Φ', Φ'' at r
    pub fn evaluate(&self, r: f64, l0: f64) -> RedshiftValue {
        match *self {
            RedshiftFunction::Zero => RedshiftValue::default(),
            RedshiftFunction::Constant { phi0 } => RedshiftValue {
                phi: phi0,
                ..RedshiftValue::default()
            },
            RedshiftFunction::GaussianHump { amplitude, width } => {
                let x = r - l0;
                let w2 = width * width;
                let phi = amplitude * (-(x * x) / (2.0 * w2)).exp();
                RedshiftValue {
                    phi,
                    phi_prime: -phi * x / w2,
                    phi_double_prime: phi * (x * x - w2) / (w2 * w2),
                }
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, RedshiftFunction::Zero)
    }
}

impl fmt::Display for RedshiftFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedshiftFunction::Zero => f.write_str("zero"),
            RedshiftFunction::Constant { phi0 } => write!(f, "constant(phi0={phi0})"),
            RedshiftFunction::GaussianHump { amplitude, width } => {
                write!(f, "gaussian(A={amplitude}, w={width})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_redshift() {
        let v = RedshiftFunction::Zero.evaluate(3.0, 1.0);
        assert_eq!(v, RedshiftValue::default());
    }

    #[test]
    fn test_gaussian_derivatives() {
        let f = RedshiftFunction::GaussianHump {
            amplitude: 0.1,
            width: 0.7,
        };
        let h = 1e-5;
        for r in [1.0, 1.3, 2.2] {
            let v = f.evaluate(r, 1.0);
            let fd1 = (f.phi(r + h, 1.0) - f.phi(r - h, 1.0)) / (2.0 * h);
            let fd2 = (f.phi(r + h, 1.0) - 2.0 * v.phi + f.phi(r - h, 1.0)) / (h * h);
            assert!((fd1 - v.phi_prime).abs() < 1e-8);
            assert!((fd2 - v.phi_double_prime).abs() < 1e-4);
        }
        // peak sits on the throat
        assert!((f.phi(1.0, 1.0) - 0.1).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_width() {
        let f = RedshiftFunction::GaussianHump {
            amplitude: 0.1,
            width: 0.0,
        };
        assert!(f.validate().is_err());
        assert!(RedshiftFunction::Constant { phi0: f64::NAN }.validate().is_err());
    }
}
