//! # ANEC Integrator
//!
//! ## Role
//! Evaluates the averaged null energy condition along the radial null
//! geodesic that crosses the throat:
//!
//! ```text
//! ANEC = ∫_{-L}^{L} e^{-Φ(r(l))} (p_r(r(l)) - ρ(r(l))) dl
//! ```
//!
//! l is proper radial distance (negative on the mirrored sheet), so the
//! integral runs straight through the throat. The coordinate map supplies
//! r(l); stress-energy comes from the closed-form Einstein solver.
//!
//! ## Quadrature
//! Composite trapezoid on an odd, mirror-symmetric grid over [-L, L] so that
//! l = 0 is always sampled. Non-finite samples are dropped and counted; the
//! result is flagged low-confidence when too many were dropped.

use serde::{Deserialize, Serialize};
use tracing::{info_span, warn};

use crate::error::Result;
use crate::geometry::metric::{MorrisThorneMetric, WormholeConfig};
use crate::model::coordinate_map::{CoordinateMap, MapSettings};
use crate::model::parameters::{AnecParams, IntegrationExtent};
use crate::model::stress_energy::EinsteinSolver;
use crate::utils::quadrature::{finite_trapezoid, linspace};

pub use crate::utils::quadrature::FiniteSum;

/// Sign of the ANEC integral
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnecStatus {
    Satisfied,
    Violated,
}

impl AnecStatus {
    pub fn from_value(value: f64) -> Self {
        if value >= 0.0 {
            AnecStatus::Satisfied
        } else {
            AnecStatus::Violated
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnecStatus::Satisfied => "SATISFIED",
            AnecStatus::Violated => "VIOLATED",
        }
    }
}

impl std::fmt::Display for AnecStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one ANEC evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnecResult {
    /// ∫ e^{-Φ}(p_r - ρ) dl over [-L, L] (J/m² in SI)
    pub anec_value: f64,
    /// ρ(l0)
    pub throat_density: f64,
    /// ρ(l0) + p_r(l0)
    pub throat_null_energy: f64,
    pub status: AnecStatus,
    /// Half-width L of the proper-distance interval
    pub extent: f64,
    pub discarded_sample_count: usize,
    pub total_sample_count: usize,
    pub low_confidence: bool,
}

impl AnecResult {
    pub fn is_satisfied(&self) -> bool {
        self.status == AnecStatus::Satisfied
    }

    pub fn discarded_fraction(&self) -> f64 {
        if self.total_sample_count == 0 {
            0.0
        } else {
            self.discarded_sample_count as f64 / self.total_sample_count as f64
        }
    }
}

/// Coordinate map plus stress-energy for one wormhole, ready to integrate.
#[derive(Clone, Debug)]
pub struct AnecIntegrator {
    metric: MorrisThorneMetric,
    map: CoordinateMap,
    params: AnecParams,
    extent: f64,
}

impl AnecIntegrator {
    /// Build the coordinate map and resolve the integration extent.
    pub fn new(metric: MorrisThorneMetric, params: &AnecParams) -> Result<Self> {
        let params = params.clone().validated()?;
        let l0 = metric.l0();

        let map = CoordinateMap::build(
            &metric,
            MapSettings {
                r_max: params.extent.max_radius_factor() * l0,
                epsilon: params.throat_offset * l0,
                samples: params.map_samples,
                tolerance: params.map_tolerance,
            },
        )?;

        let mut integrator = Self {
            metric,
            map,
            params,
            extent: 0.0,
        };
        integrator.extent = integrator.resolve_extent();
        Ok(integrator)
    }

    fn resolve_extent(&self) -> f64 {
        match self.params.extent {
            IntegrationExtent::RadiusFactor(_) => self.map.l_max(),
            IntegrationExtent::DecayThreshold { relative, .. } => {
                let samples = self.map.samples();
                let magnitudes: Vec<f64> =
                    samples.iter().map(|s| self.integrand_at_radius(s.r).abs()).collect();
                let peak = magnitudes
                    .iter()
                    .copied()
                    .filter(|y| y.is_finite())
                    .fold(0.0f64, f64::max);
                let threshold = relative * peak;

                // |y| must stay below the threshold from L outward; a zero
                // crossing of the integrand is not decay.
                magnitudes
                    .iter()
                    .rposition(|&y| y >= threshold)
                    .and_then(|i| samples.get(i + 1))
                    .map(|s| s.l)
                    .unwrap_or_else(|| self.map.l_max())
            }
        }
    }

    pub fn metric(&self) -> &MorrisThorneMetric {
        &self.metric
    }

    pub fn map(&self) -> &CoordinateMap {
        &self.map
    }

    pub fn params(&self) -> &AnecParams {
        &self.params
    }

    /// Half-width L of the integration interval
    pub fn extent(&self) -> f64 {
        self.extent
    }

    pub fn solver(&self) -> EinsteinSolver<'_> {
        EinsteinSolver::new(&self.metric, self.params.constants)
    }

    #[inline]
    fn integrand_at_radius(&self, r: f64) -> f64 {
        let t = self.solver().at(r);
        (-self.metric.phi(r)).exp() * (t.radial_pressure - t.energy_density)
    }

    /// e^{-Φ}(p_r - ρ) at proper distance `l` (either sheet)
    #[inline]
    pub fn integrand(&self, l: f64) -> f64 {
        self.integrand_at_radius(self.map.r_of_l(l))
    }

    fn finite_sum(&self, ls: &[f64]) -> Result<FiniteSum> {
        let ys: Vec<f64> = ls.iter().map(|&l| self.integrand(l)).collect();
        finite_trapezoid(ls, &ys)
    }

    /// Trapezoid over `n` uniform samples of [a, b]
    pub fn integrate_interval(&self, a: f64, b: f64, n: usize) -> Result<FiniteSum> {
        self.finite_sum(&linspace(a, b, n))
    }

    /// Grid over [-L, L] built from the half grid over [0, L], so l and -l
    /// are sampled exactly in pairs.
    fn symmetric_grid(&self) -> Vec<f64> {
        let half = linspace(0.0, self.extent, self.params.n_points / 2 + 1);
        let mut grid: Vec<f64> = half.iter().skip(1).rev().map(|l| -l).collect();
        grid.extend_from_slice(&half);
        grid
    }

    /// Full ANEC evaluation over [-L, L]
    pub fn integrate(&self) -> Result<AnecResult> {
        let _span = info_span!("anec_integrate", shape = %self.metric.shape()).entered();

        let sum = self.finite_sum(&self.symmetric_grid())?;
        let low_confidence = sum.is_low_confidence(self.params.confidence_threshold);
        if low_confidence {
            warn!(
                config = %self.metric.config(),
                discarded = sum.discarded,
                total = sum.total,
                "more than {:.1}% of ANEC samples were non-finite",
                100.0 * self.params.confidence_threshold
            );
        }

        let solver = self.solver();
        Ok(AnecResult {
            anec_value: sum.value,
            throat_density: solver.throat_density(),
            throat_null_energy: solver.throat_null_energy(),
            status: AnecStatus::from_value(sum.value),
            extent: self.extent,
            discarded_sample_count: sum.discarded,
            total_sample_count: sum.total,
            low_confidence,
        })
    }
}

/// Validate, map and integrate one configuration.
pub fn evaluate(config: &WormholeConfig, params: &AnecParams) -> Result<AnecResult> {
    let metric = MorrisThorneMetric::new(*config)?;
    AnecIntegrator::new(metric, params)?.integrate()
}
