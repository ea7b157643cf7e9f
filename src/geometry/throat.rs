//! # Throat Geometry
//!
//! Geometric properties at and near the throat: proper circumference,
//! embedding-diagram height, flare-out parameter, radial tidal acceleration
//! and the Ricci scalar.
//!
//! The embedding surface z(r) satisfies dz/dr = sqrt(b / (r - b)), which has
//! the same integrable 1/sqrt(r - l0) singularity as the proper distance, so
//! it is integrated in u = sqrt(r - l0) as well.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WormholeError};
use crate::geometry::metric::MorrisThorneMetric;
use crate::model::parameters::PhysicalConstants;
use crate::model::stress_energy::EinsteinSolver;
use crate::utils::quadrature::adaptive_simpson;

/// Relative offset from the throat covered by the leading-order term
const EMBEDDING_OFFSET: f64 = 1e-8;

const EMBEDDING_TOLERANCE: f64 = 1e-10;

/// Throat summary for one metric
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThroatProperties {
    pub throat_radius: f64,
    pub circumference: f64,
    pub area: f64,
    pub flare_out_parameter: f64,
    pub exotic_matter_required: bool,
    /// Radial tidal acceleration per unit separation at the throat (1/s²)
    pub tidal_acceleration: f64,
    /// Ricci scalar at the throat (1/m²)
    pub ricci_scalar: f64,
}

/// Geometry analyzer borrowing a validated metric
pub struct ThroatGeometry<'a> {
    metric: &'a MorrisThorneMetric,
    constants: PhysicalConstants,
}

impl<'a> ThroatGeometry<'a> {
    pub fn new(metric: &'a MorrisThorneMetric, constants: PhysicalConstants) -> Self {
        Self { metric, constants }
    }

    /// Proper circumference 2πr of the sphere at areal radius r
    pub fn circumference(&self, r: f64) -> f64 {
        2.0 * PI * r
    }

    pub fn flare_out_parameter(&self) -> f64 {
        self.metric.flare_out_parameter()
    }

    /// Height z(r) of the embedding surface above the throat plane.
    pub fn embedding_height(&self, r: f64) -> Result<f64> {
        let l0 = self.metric.l0();
        if r < l0 {
            return Err(WormholeError::coordinate_mapping(format!(
                "embedding height requested inside the throat: r={r} < l0={l0}"
            )));
        }
        let eps = EMBEDDING_OFFSET * l0;
        let flare = self.flare_out_parameter();
        // r - b ≈ (1 - b'(l0)) (r - l0) near the throat
        let lead = |dr: f64| 2.0 * (dr * l0 / (1.0 - flare)).sqrt();
        if r - l0 <= eps {
            return Ok(lead(r - l0));
        }

        let dz_du = |u: f64| {
            let r = l0 + u * u;
            let b = self.metric.b(r);
            2.0 * u * (b / (r - b)).sqrt()
        };
        let tail = adaptive_simpson(&dz_du, eps.sqrt(), (r - l0).sqrt(), EMBEDDING_TOLERANCE)
            .map_err(|e| WormholeError::coordinate_mapping(e.to_string()))?;
        Ok(lead(eps) + tail)
    }

    /// Radial tidal acceleration per unit separation for a static observer (1/s²).
    ///
    /// Vanishes for zero redshift; the shape-function term survives at the
    /// throat as (b' - 1) Φ' / (2 l0).
    pub fn tidal_acceleration(&self, r: f64) -> f64 {
        let (b, bp) = self.metric.shape().evaluate(r, self.metric.l0());
        let phi = self.metric.redshift_at(r);
        let (p1, p2) = (phi.phi_prime, phi.phi_double_prime);
        let c2 = self.constants.c * self.constants.c;
        c2 * ((1.0 - b / r) * (p2 + p1 * p1) - (bp * r - b) * p1 / (2.0 * r * r))
    }

    pub fn ricci_scalar(&self, r: f64) -> f64 {
        EinsteinSolver::new(self.metric, self.constants).ricci_scalar(r)
    }

    pub fn properties(&self) -> ThroatProperties {
        let l0 = self.metric.l0();
        let flare = self.flare_out_parameter();
        ThroatProperties {
            throat_radius: l0,
            circumference: self.circumference(l0),
            area: 4.0 * PI * l0 * l0,
            flare_out_parameter: flare,
            exotic_matter_required: flare < 1.0,
            tidal_acceleration: self.tidal_acceleration(l0),
            ricci_scalar: self.ricci_scalar(l0),
        }
    }
}
