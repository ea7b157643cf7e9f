//! # Morris-Thorne Metric
//!
//! ## Role
//! The static, spherically symmetric wormhole metric
//!
//! ```text
//! ds² = -e^{2Φ(r)} c²dt² + dr²/(1 - b(r)/r) + r²(dθ² + sin²θ dφ²)
//! ```
//!
//! A `MorrisThorneMetric` can only be built for a traversable geometry:
//! throat at b(l0) = l0, flare-out b'(l0) < 1, Φ finite, and b(r) < r away
//! from the throat. Both sheets of the wormhole share the same r ≥ l0.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WormholeError};
use crate::geometry::redshift::{RedshiftFunction, RedshiftValue};
use crate::geometry::shape::ShapeFunction;

/// Relative tolerance on b(l0) = l0
pub const THROAT_TOLERANCE: f64 = 1e-10;

/// Points in the [l0, 3 l0] traversability check
const CHECK_POINTS: usize = 100;

/// Check points closer to the throat than this (relative) skip the b(r) < r test
const CHECK_THROAT_MARGIN: f64 = 1.001;

/// Everything needed to build a metric: shape, throat radius, redshift.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WormholeConfig {
    pub shape: ShapeFunction,
    pub throat_radius: f64,
    #[serde(default)]
    pub redshift: RedshiftFunction,
}

impl WormholeConfig {
    /// Zero-redshift configuration
    pub fn new(shape: ShapeFunction, throat_radius: f64) -> Self {
        Self {
            shape,
            throat_radius,
            redshift: RedshiftFunction::Zero,
        }
    }

    pub fn with_redshift(mut self, redshift: RedshiftFunction) -> Self {
        self.redshift = redshift;
        self
    }
}

impl std::fmt::Display for WormholeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} l0={}", self.shape, self.throat_radius)?;
        if !self.redshift.is_zero() {
            write!(f, " Φ={}", self.redshift)?;
        }
        Ok(())
    }
}

/// Diagonal metric coefficients at one point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricComponents {
    pub g_tt: f64,
    pub g_rr: f64,
    pub g_theta_theta: f64,
    pub g_phi_phi: f64,
}

impl MetricComponents {
    /// As a 4x4 matrix in (t, r, θ, φ) order
    pub fn to_matrix(&self) -> [[f64; 4]; 4] {
        let mut g = [[0.0; 4]; 4];
        g[0][0] = self.g_tt;
        g[1][1] = self.g_rr;
        g[2][2] = self.g_theta_theta;
        g[3][3] = self.g_phi_phi;
        g
    }

    /// Inverse of a diagonal metric
    pub fn inverse(&self) -> MetricComponents {
        MetricComponents {
            g_tt: 1.0 / self.g_tt,
            g_rr: 1.0 / self.g_rr,
            g_theta_theta: 1.0 / self.g_theta_theta,
            g_phi_phi: 1.0 / self.g_phi_phi,
        }
    }
}

/// Validated Morris-Thorne wormhole geometry
#[derive(Clone, Debug)]
pub struct MorrisThorneMetric {
    config: WormholeConfig,
}

impl MorrisThorneMetric {
    /// Validate the configuration and build the metric.
    ///
    /// Parameter problems fail with `InvalidConfiguration`; geometric
    /// problems fail with `NonTraversableGeometry`.
    pub fn new(config: WormholeConfig) -> Result<Self> {
        let l0 = config.throat_radius;
        if !(l0.is_finite() && l0 > 0.0) {
            return Err(WormholeError::invalid_configuration(format!(
                "throat radius must be positive, got {l0}"
            )));
        }
        config.shape.validate()?;
        config.redshift.validate()?;

        let metric = Self { config };
        metric.check_traversable()?;
        Ok(metric)
    }

    fn check_traversable(&self) -> Result<()> {
        let l0 = self.l0();

        for i in 0..CHECK_POINTS {
            let r = l0 + 2.0 * l0 * i as f64 / (CHECK_POINTS - 1) as f64;
            // g_tt must stay finite and nonzero, otherwise there is a horizon
            let lapse = (2.0 * self.phi(r)).exp();
            if !(lapse.is_finite() && lapse > 0.0) {
                return Err(WormholeError::non_traversable(format!(
                    "redshift function diverges at r={r} (horizon present)"
                )));
            }
        }

        let b_throat = self.b(l0);
        if (b_throat - l0).abs() > THROAT_TOLERANCE * l0 {
            return Err(WormholeError::non_traversable(format!(
                "throat condition violated: b(l0)={b_throat} != l0={l0}"
            )));
        }

        let flare = self.flare_out_parameter();
        if flare.is_nan() || flare >= 1.0 {
            return Err(WormholeError::non_traversable(format!(
                "flare-out condition violated: b'(l0)={flare} >= 1"
            )));
        }

        for i in 0..CHECK_POINTS {
            let r = l0 + 2.0 * l0 * i as f64 / (CHECK_POINTS - 1) as f64;
            if r <= l0 * CHECK_THROAT_MARGIN {
                continue;
            }
            if self.b(r) >= r {
                return Err(WormholeError::non_traversable(format!(
                    "shape function reaches b(r) >= r at r={r}"
                )));
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &WormholeConfig {
        &self.config
    }

    /// Throat radius l0
    #[inline]
    pub fn l0(&self) -> f64 {
        self.config.throat_radius
    }

    pub fn shape(&self) -> &ShapeFunction {
        &self.config.shape
    }

    pub fn redshift(&self) -> &RedshiftFunction {
        &self.config.redshift
    }

    #[inline]
    pub fn b(&self, r: f64) -> f64 {
        self.config.shape.value(r, self.l0())
    }

    #[inline]
    pub fn b_prime(&self, r: f64) -> f64 {
        self.config.shape.derivative(r, self.l0())
    }

    #[inline]
    pub fn phi(&self, r: f64) -> f64 {
        self.config.redshift.phi(r, self.l0())
    }

    #[inline]
    pub fn redshift_at(&self, r: f64) -> RedshiftValue {
        self.config.redshift.evaluate(r, self.l0())
    }

    /// 1 - b(r)/r, which vanishes at the throat
    #[inline]
    pub fn radial_factor(&self, r: f64) -> f64 {
        1.0 - self.b(r) / r
    }

    /// b'(l0); must be < 1 for the throat to open outward
    pub fn flare_out_parameter(&self) -> f64 {
        self.b_prime(self.l0())
    }

    /// Metric coefficients at areal radius `r` and polar angle `theta`.
    ///
    /// g_rr diverges at the throat.
    pub fn components(&self, r: f64, theta: f64) -> MetricComponents {
        let sin_theta = theta.sin();
        MetricComponents {
            g_tt: -(2.0 * self.phi(r)).exp(),
            g_rr: 1.0 / self.radial_factor(r),
            g_theta_theta: r * r,
            g_phi_phi: (r * sin_theta) * (r * sin_theta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn power_law(n: f64) -> WormholeConfig {
        WormholeConfig::new(ShapeFunction::power_law(n).unwrap(), 1.0)
    }

    #[test]
    fn test_signature() {
        let metric = MorrisThorneMetric::new(power_law(0.5)).unwrap();
        let g = metric.components(2.0, FRAC_PI_2);
        assert!(g.g_tt < 0.0);
        assert!(g.g_rr > 0.0);
        assert!(g.g_theta_theta > 0.0);
        assert!(g.g_phi_phi > 0.0);
    }

    #[test]
    fn test_inverse_metric() {
        let metric = MorrisThorneMetric::new(power_law(0.5)).unwrap();
        let g = metric.components(2.0, 1.1).to_matrix();
        let g_inv = metric.components(2.0, 1.1).inverse().to_matrix();
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += g[i][k] * g_inv[k][j];
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((sum - expected).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_flare_out_parameter() {
        let metric = MorrisThorneMetric::new(power_law(0.5)).unwrap();
        assert!((metric.flare_out_parameter() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_throat_radius() {
        let cfg = WormholeConfig::new(ShapeFunction::tanh(0.2).unwrap(), -1.0);
        assert!(matches!(
            MorrisThorneMetric::new(cfg),
            Err(WormholeError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_hand_built_shape_is_revalidated() {
        let cfg = WormholeConfig::new(ShapeFunction::Tanh { sigma: -0.1 }, 1.0);
        assert!(matches!(
            MorrisThorneMetric::new(cfg),
            Err(WormholeError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_divergent_redshift_is_horizon() {
        let cfg = power_law(0.5).with_redshift(RedshiftFunction::Constant { phi0: 400.0 });
        assert!(matches!(
            MorrisThorneMetric::new(cfg),
            Err(WormholeError::NonTraversableGeometry { .. })
        ));
    }

    #[test]
    fn test_redshift_variants_traversable() {
        let cfg = power_law(0.5).with_redshift(RedshiftFunction::GaussianHump {
            amplitude: 0.1,
            width: 1.0,
        });
        let metric = MorrisThorneMetric::new(cfg).unwrap();
        let g = metric.components(1.0, FRAC_PI_2);
        assert!((g.g_tt + (0.2f64).exp()).abs() < 1e-12);
    }
}
