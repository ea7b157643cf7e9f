//! # Model Parameters
//!
//! ## Role
//! Pure data structures for physical constants and integration settings.
//! Nothing here is global: every computation receives its constants explicitly,
//! so the same core runs in SI or geometric units.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WormholeError};

/// Physical constants threaded through every stress-energy evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicalConstants {
    /// Gravitational constant (m³ kg⁻¹ s⁻²)
    pub g: f64,
    /// Speed of light (m/s)
    pub c: f64,
}

impl PhysicalConstants {
    /// SI values used by the reference runs
    pub const SI: Self = Self {
        g: 6.674e-11,
        c: 2.998e8,
    };

    /// Geometric units (G = c = 1)
    pub const GEOMETRIC: Self = Self { g: 1.0, c: 1.0 };

    pub fn new(g: f64, c: f64) -> Result<Self> {
        if !(g.is_finite() && g > 0.0) {
            return Err(WormholeError::invalid_configuration(format!(
                "gravitational constant must be positive, got {g}"
            )));
        }
        if !(c.is_finite() && c > 0.0) {
            return Err(WormholeError::invalid_configuration(format!(
                "speed of light must be positive, got {c}"
            )));
        }
        Ok(Self { g, c })
    }

    /// Energy-density scale c²/(8πG).
    ///
    /// Multiplying a geometric curvature term (1/m²) by this gives J/m³.
    #[inline]
    pub fn energy_scale(&self) -> f64 {
        self.c * self.c / (8.0 * std::f64::consts::PI * self.g)
    }

    /// Geometric mass GM/c² (m) for a mass in kg
    #[inline]
    pub fn geometric_mass(&self, mass_kg: f64) -> f64 {
        self.g * mass_kg / (self.c * self.c)
    }

    /// Force scale c⁴/G converting geometric surface terms (1/m) to J/m²
    #[inline]
    pub fn surface_scale(&self) -> f64 {
        self.c.powi(4) / self.g
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::SI
    }
}

/// How far along the geodesic the ANEC integral extends.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum IntegrationExtent {
    /// Integrate to the proper distance of areal radius `factor * l0`
    RadiusFactor(f64),
    /// Stop at the smallest radius beyond which |integrand| stays below
    /// `relative * peak`, never beyond `max_radius_factor * l0`
    DecayThreshold {
        relative: f64,
        max_radius_factor: f64,
    },
}

impl IntegrationExtent {
    /// Largest areal radius (in units of l0) the coordinate map must cover
    pub fn max_radius_factor(&self) -> f64 {
        match *self {
            IntegrationExtent::RadiusFactor(f) => f,
            IntegrationExtent::DecayThreshold {
                max_radius_factor, ..
            } => max_radius_factor,
        }
    }
}

/// Settings for the coordinate map and the ANEC quadrature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnecParams {
    pub constants: PhysicalConstants,

    /// Integration extent along the geodesic. Default: 3 l0 in areal radius.
    pub extent: IntegrationExtent,

    /// Quadrature samples over [-L, L]. Always odd so that l = 0 is sampled.
    /// Default: 2001
    pub n_points: usize,

    /// Entries in the r <-> l table (excluding the throat entry). Default: 2000
    pub map_samples: usize,

    /// Offset from the throat where the map quadrature starts, in units of l0.
    /// Default: 1e-6
    pub throat_offset: f64,

    /// Absolute tolerance for each adaptive Simpson interval. Default: 1e-10
    pub map_tolerance: f64,

    /// Fraction of discarded samples above which a result is low-confidence.
    /// Default: 0.05
    pub confidence_threshold: f64,
}

impl Default for AnecParams {
    fn default() -> Self {
        Self {
            constants: PhysicalConstants::SI,
            extent: IntegrationExtent::RadiusFactor(3.0),
            n_points: 2001,
            map_samples: 2000,
            throat_offset: 1e-6,
            map_tolerance: 1e-10,
            confidence_threshold: 0.05,
        }
    }
}

impl AnecParams {
    /// Validate settings, forcing `n_points` odd.
    pub fn validated(mut self) -> Result<Self> {
        self.constants = PhysicalConstants::new(self.constants.g, self.constants.c)?;

        let factor = self.extent.max_radius_factor();
        if !(factor.is_finite() && factor > 1.0) {
            return Err(WormholeError::invalid_configuration(format!(
                "integration radius factor must exceed 1, got {factor}"
            )));
        }
        if let IntegrationExtent::DecayThreshold { relative, .. } = self.extent {
            if !(relative > 0.0 && relative < 1.0) {
                return Err(WormholeError::invalid_configuration(format!(
                    "decay threshold must lie in (0, 1), got {relative}"
                )));
            }
        }
        if self.n_points < 3 {
            return Err(WormholeError::invalid_configuration(
                "ANEC quadrature needs at least 3 points",
            ));
        }
        if self.n_points % 2 == 0 {
            self.n_points += 1;
        }
        if self.map_samples < 2 {
            return Err(WormholeError::invalid_configuration(
                "coordinate map needs at least 2 samples",
            ));
        }
        if !(self.throat_offset > 0.0 && self.throat_offset < factor - 1.0) {
            return Err(WormholeError::invalid_configuration(format!(
                "throat offset {} outside (0, {})",
                self.throat_offset,
                factor - 1.0
            )));
        }
        if self.map_tolerance.is_nan() || self.map_tolerance <= 0.0 {
            return Err(WormholeError::invalid_configuration(
                "map tolerance must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(WormholeError::invalid_configuration(format!(
                "confidence threshold must lie in [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_scale_si() {
        let k = PhysicalConstants::SI.energy_scale();
        // c²/(8πG) ≈ 5.36e25 in SI
        assert!((k / 5.3584e25 - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_non_positive_constants() {
        assert!(PhysicalConstants::new(0.0, 1.0).is_err());
        assert!(PhysicalConstants::new(1.0, -1.0).is_err());
        assert!(PhysicalConstants::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_even_point_count_made_odd() {
        let params = AnecParams {
            n_points: 1000,
            ..AnecParams::default()
        }
        .validated()
        .unwrap();
        assert_eq!(params.n_points, 1001);
    }

    #[test]
    fn test_invalid_extent_rejected() {
        let params = AnecParams {
            extent: IntegrationExtent::RadiusFactor(0.5),
            ..AnecParams::default()
        };
        assert!(params.validated().is_err());

        let params = AnecParams {
            extent: IntegrationExtent::DecayThreshold {
                relative: 2.0,
                max_radius_factor: 10.0,
            },
            ..AnecParams::default()
        };
        assert!(params.validated().is_err());
    }

    #[test]
    fn test_nan_tolerance_rejected() {
        for map_tolerance in [f64::NAN, 0.0, -1e-10] {
            let params = AnecParams {
                map_tolerance,
                ..AnecParams::default()
            };
            assert!(params.validated().is_err(), "tolerance={map_tolerance}");
        }
    }
}
