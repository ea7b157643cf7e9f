//! # Coordinate Map (areal radius r <-> proper distance l)
//!
//! ## Role
//! The proper radial distance from the throat is
//!
//! ```text
//! l(r) = ∫_{l0}^{r} dr' / sqrt(1 - b(r')/r')
//! ```
//!
//! The integrand diverges at the throat (1 - b/r -> 0) but the integral is
//! finite. Substituting u = sqrt(r - l0) gives
//!
//! ```text
//! dl/du = 2u / sqrt(1 - b(r)/r),   r = l0 + u²
//! ```
//!
//! which tends to 2 sqrt(l0 / (1 - b'(l0))) at the throat. The table covers
//! [l0, l0 + ε] with that leading-order value and integrates the rest interval
//! by interval with adaptive Simpson, so the throat itself is never evaluated.
//!
//! ## Lookups
//! Both directions interpolate u linearly against l, then r = l0 + u².
//! Because the same piecewise-linear (u, l) relation is used both ways, the
//! forward and inverse lookups are exact inverses of each other inside the
//! table. Negative l maps to the mirrored sheet: r(l) = r(|l|).

use tracing::{info_span, warn};

use crate::error::{Result, WormholeError};
use crate::geometry::metric::MorrisThorneMetric;
use crate::utils::quadrature::adaptive_simpson;

/// ε above this fraction of the mapped range triggers a warning
const LARGE_OFFSET_FRACTION: f64 = 0.01;

/// One table entry
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapSample {
    /// sqrt(r - l0)
    pub u: f64,
    /// Areal radius
    pub r: f64,
    /// Proper distance from the throat (≥ 0)
    pub l: f64,
}

/// Monotonic r <-> l table for one metric
#[derive(Clone, Debug)]
pub struct CoordinateMap {
    l0: f64,
    samples: Vec<MapSample>,
}

/// Build settings for a coordinate map
#[derive(Clone, Copy, Debug)]
pub struct MapSettings {
    /// Largest areal radius covered
    pub r_max: f64,
    /// Absolute offset ε from the throat where quadrature starts
    pub epsilon: f64,
    /// Number of integrated entries
    pub samples: usize,
    /// Absolute tolerance per Simpson interval
    pub tolerance: f64,
}

impl CoordinateMap {
    /// Integrate the r <-> l relation for `metric` out to `settings.r_max`.
    pub fn build(metric: &MorrisThorneMetric, settings: MapSettings) -> Result<Self> {
        let _span = info_span!("coordinate_map_build", shape = %metric.shape()).entered();

        let l0 = metric.l0();
        let MapSettings {
            r_max,
            epsilon,
            samples,
            tolerance,
        } = settings;

        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(WormholeError::coordinate_mapping(format!(
                "throat offset must be positive, got {epsilon}"
            )));
        }
        if r_max.is_nan() || r_max <= l0 + epsilon {
            return Err(WormholeError::coordinate_mapping(format!(
                "r_max={r_max} does not extend beyond l0 + ε = {}",
                l0 + epsilon
            )));
        }
        if samples < 2 {
            return Err(WormholeError::coordinate_mapping(
                "coordinate map needs at least 2 samples",
            ));
        }
        if epsilon > LARGE_OFFSET_FRACTION * (r_max - l0) {
            warn!(
                epsilon,
                range = r_max - l0,
                "throat offset is large relative to the mapped range; near-throat accuracy degrades"
            );
        }

        let flare = metric.flare_out_parameter();
        let dl_du = |u: f64| {
            let r = l0 + u * u;
            2.0 * u / metric.radial_factor(r).sqrt()
        };

        let u_start = epsilon.sqrt();
        let u_end = (r_max - l0).sqrt();

        let mut table = Vec::with_capacity(samples + 1);
        table.push(MapSample {
            u: 0.0,
            r: l0,
            l: 0.0,
        });
        // leading order: 1 - b/r ≈ (1 - b'(l0)) (r - l0) / l0
        table.push(MapSample {
            u: u_start,
            r: l0 + epsilon,
            l: 2.0 * (epsilon * l0 / (1.0 - flare)).sqrt(),
        });

        let step = (u_end - u_start) / (samples - 1) as f64;
        for i in 1..samples {
            let u_prev = table[i].u;
            let u = if i == samples - 1 {
                u_end
            } else {
                u_start + step * i as f64
            };
            let dl = adaptive_simpson(&dl_du, u_prev, u, tolerance)
                .map_err(|e| WormholeError::coordinate_mapping(e.to_string()))?;
            let l = table[i].l + dl;
            if !l.is_finite() || l <= table[i].l {
                return Err(WormholeError::coordinate_mapping(format!(
                    "proper distance stopped increasing at r={}",
                    l0 + u * u
                )));
            }
            table.push(MapSample { u, r: l0 + u * u, l });
        }

        Ok(Self { l0, samples: table })
    }

    /// Throat radius
    pub fn l0(&self) -> f64 {
        self.l0
    }

    /// All entries, throat first
    pub fn samples(&self) -> &[MapSample] {
        &self.samples
    }

    /// Largest areal radius in the table
    pub fn r_max(&self) -> f64 {
        self.last().r
    }

    /// Proper distance from the throat to `r_max`
    pub fn l_max(&self) -> f64 {
        self.last().l
    }

    fn last(&self) -> &MapSample {
        // the table always holds the throat entry plus at least two more
        &self.samples[self.samples.len() - 1]
    }

    /// Forward lookup r -> l (≥ 0). Clamped to [l0, r_max].
    pub fn l_of_r(&self, r: f64) -> f64 {
        if r <= self.l0 {
            return 0.0;
        }
        if r >= self.r_max() {
            return self.l_max();
        }
        let u = (r - self.l0).sqrt();
        let idx = self.samples.partition_point(|s| s.u < u);
        if idx == 0 {
            return 0.0;
        }
        let lo = &self.samples[idx - 1];
        let hi = &self.samples[idx];
        let t = (u - lo.u) / (hi.u - lo.u);
        lo.l + t * (hi.l - lo.l)
    }

    /// Inverse lookup l -> r for either sheet. |l| is clamped to l_max.
    pub fn r_of_l(&self, l: f64) -> f64 {
        let a = l.abs();
        if a >= self.l_max() {
            return self.r_max();
        }
        let idx = self.samples.partition_point(|s| s.l < a);
        if idx == 0 {
            return self.l0;
        }
        let lo = &self.samples[idx - 1];
        let hi = &self.samples[idx];
        let t = (a - lo.l) / (hi.l - lo.l);
        let u = lo.u + t * (hi.u - lo.u);
        self.l0 + u * u
    }
}
