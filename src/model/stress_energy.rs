//! # Einstein Stress-Energy Solver
//!
//! ## Role
//! Closed-form stress-energy of a Morris-Thorne wormhole, read off the
//! Einstein equations in the static orthonormal frame. With E = c²/(8πG):
//!
//! ```text
//! ρ   =  E b' / r²
//! p_r = -E [ b/r³ - 2 (1 - b/r) Φ'/r ]
//! p_t =  E [ (1 - b/r)(Φ'' + Φ'² + Φ'/r) - (b'r - b)(rΦ' + 1) / (2r³) ]
//! ```
//!
//! Nothing is differentiated numerically; b' and Φ', Φ'' come from the
//! closed-form catalogs.
//!
//! ## Energy conditions
//! Pointwise NEC (radial and tangential null directions), WEC, SEC and DEC,
//! plus the fraction of a sampled radial range where each one fails.

use serde::{Deserialize, Serialize};

use crate::geometry::metric::MorrisThorneMetric;
use crate::model::parameters::PhysicalConstants;
use crate::utils::quadrature::linspace;

/// ρ, p_r, p_t at one radius
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StressEnergy {
    pub energy_density: f64,
    pub radial_pressure: f64,
    pub tangential_pressure: f64,
}

impl StressEnergy {
    /// ρ + p_r, the radial null contraction
    #[inline]
    pub fn radial_null_energy(&self) -> f64 {
        self.energy_density + self.radial_pressure
    }

    /// ρ + p_t
    #[inline]
    pub fn tangential_null_energy(&self) -> f64 {
        self.energy_density + self.tangential_pressure
    }

    /// Which energy conditions hold at this point
    pub fn conditions(&self) -> EnergyConditions {
        let rho = self.energy_density;
        let pr = self.radial_pressure;
        let pt = self.tangential_pressure;

        let nec_radial = rho + pr >= 0.0;
        let nec_tangential = rho + pt >= 0.0;
        let nec = nec_radial && nec_tangential;
        EnergyConditions {
            nec_radial,
            nec_tangential,
            wec: nec && rho >= 0.0,
            sec: nec && rho + pr + 2.0 * pt >= 0.0,
            dec: rho >= pr.abs() && rho >= pt.abs(),
        }
    }
}

/// Pointwise energy-condition flags (true = satisfied)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyConditions {
    pub nec_radial: bool,
    pub nec_tangential: bool,
    pub wec: bool,
    pub sec: bool,
    pub dec: bool,
}

impl EnergyConditions {
    pub fn nec(&self) -> bool {
        self.nec_radial && self.nec_tangential
    }
}

/// Fraction of sampled radii where each condition fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViolationFractions {
    pub nec: f64,
    pub wec: f64,
    pub sec: f64,
    pub dec: f64,
    pub samples: usize,
}

/// Stress-energy of one metric in one unit system
#[derive(Clone, Copy, Debug)]
pub struct EinsteinSolver<'a> {
    metric: &'a MorrisThorneMetric,
    constants: PhysicalConstants,
}

impl<'a> EinsteinSolver<'a> {
    pub fn new(metric: &'a MorrisThorneMetric, constants: PhysicalConstants) -> Self {
        Self { metric, constants }
    }

    pub fn metric(&self) -> &MorrisThorneMetric {
        self.metric
    }

    pub fn constants(&self) -> PhysicalConstants {
        self.constants
    }

    /// Full stress-energy profile at areal radius `r`
    pub fn at(&self, r: f64) -> StressEnergy {
        let e = self.constants.energy_scale();
        let (b, bp) = self.metric.shape().evaluate(r, self.metric.l0());
        let phi = self.metric.redshift_at(r);
        let (p1, p2) = (phi.phi_prime, phi.phi_double_prime);
        let factor = 1.0 - b / r;
        let r2 = r * r;
        let r3 = r2 * r;

        StressEnergy {
            energy_density: e * bp / r2,
            radial_pressure: -e * (b / r3 - 2.0 * factor * p1 / r),
            tangential_pressure: e
                * (factor * (p2 + p1 * p1 + p1 / r) - (bp * r - b) * (r * p1 + 1.0) / (2.0 * r3)),
        }
    }

    #[inline]
    pub fn energy_density(&self, r: f64) -> f64 {
        self.constants.energy_scale() * self.metric.b_prime(r) / (r * r)
    }

    #[inline]
    pub fn radial_pressure(&self, r: f64) -> f64 {
        self.at(r).radial_pressure
    }

    #[inline]
    pub fn tangential_pressure(&self, r: f64) -> f64 {
        self.at(r).tangential_pressure
    }

    /// ρ(l0) = E b'(l0) / l0²
    pub fn throat_density(&self) -> f64 {
        self.energy_density(self.metric.l0())
    }

    /// ρ(l0) + p_r(l0) = E (b'(l0) - 1) / l0², negative whenever the throat flares out
    pub fn throat_null_energy(&self) -> f64 {
        let l0 = self.metric.l0();
        self.constants.energy_scale() * (self.metric.flare_out_parameter() - 1.0) / (l0 * l0)
    }

    /// Ricci scalar (1/m²) from the metric functions directly
    pub fn ricci_scalar(&self, r: f64) -> f64 {
        let (b, bp) = self.metric.shape().evaluate(r, self.metric.l0());
        let phi = self.metric.redshift_at(r);
        let (p1, p2) = (phi.phi_prime, phi.phi_double_prime);
        let r2 = r * r;

        2.0 * bp / r2 - 2.0 * (1.0 - b / r) * (p2 + p1 * p1) + p1 * (bp * r + 3.0 * b - 4.0 * r) / r2
    }

    pub fn energy_conditions(&self, r: f64) -> EnergyConditions {
        self.at(r).conditions()
    }

    /// Violation fractions over `n` evenly spaced radii in [r_start, r_end]
    pub fn violation_fractions(&self, r_start: f64, r_end: f64, n: usize) -> ViolationFractions {
        if n == 0 {
            return ViolationFractions::default();
        }
        let mut counts = [0usize; 4];
        for r in linspace(r_start, r_end, n) {
            let c = self.energy_conditions(r);
            for (slot, ok) in counts.iter_mut().zip([c.nec(), c.wec, c.sec, c.dec]) {
                if !ok {
                    *slot += 1;
                }
            }
        }
        let total = n as f64;
        ViolationFractions {
            nec: counts[0] as f64 / total,
            wec: counts[1] as f64 / total,
            sec: counts[2] as f64 / total,
            dec: counts[3] as f64 / total,
            samples: n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::metric::WormholeConfig;
    use crate::geometry::redshift::RedshiftFunction;
    use crate::geometry::shape::{ShapeFamily, ShapeFunction};

    fn metric(shape: ShapeFunction) -> MorrisThorneMetric {
        MorrisThorneMetric::new(WormholeConfig::new(shape, 1.0)).unwrap()
    }

    #[test]
    fn test_throat_density_negative_for_catalog() {
        for family in ShapeFamily::ALL {
            for p in family.default_grid(20) {
                let m = metric(ShapeFunction::new(family, p).unwrap());
                let solver = EinsteinSolver::new(&m, PhysicalConstants::SI);
                let rho = solver.throat_density();
                assert!(rho < 0.0, "{}: rho(l0)={rho}", m.shape());
                assert!(solver.throat_null_energy() < 0.0);
            }
        }
    }

    #[test]
    fn test_throat_density_reference_value() {
        let m = metric(ShapeFunction::tanh(0.1).unwrap());
        let solver = EinsteinSolver::new(&m, PhysicalConstants::SI);
        let rho = solver.throat_density();
        assert!((rho / -5.358425e26 - 1.0).abs() < 1e-3, "rho={rho}");
    }

    #[test]
    fn test_throat_null_energy_matches_pointwise() {
        let m = metric(ShapeFunction::exponential(0.5).unwrap());
        let solver = EinsteinSolver::new(&m, PhysicalConstants::GEOMETRIC);
        let at = solver.at(1.0);
        let closed = solver.throat_null_energy();
        assert!((at.radial_null_energy() - closed).abs() < 1e-9 * closed.abs());
    }

    #[test]
    fn test_ricci_identity() {
        let shapes = [
            ShapeFunction::tanh(0.3).unwrap(),
            ShapeFunction::power_law(0.7).unwrap(),
        ];
        let redshifts = [
            RedshiftFunction::Zero,
            RedshiftFunction::GaussianHump {
                amplitude: 0.2,
                width: 0.8,
            },
        ];
        for shape in shapes {
            for redshift in redshifts {
                let cfg = WormholeConfig::new(shape, 1.0).with_redshift(redshift);
                let m = MorrisThorneMetric::new(cfg).unwrap();
                let solver = EinsteinSolver::new(&m, PhysicalConstants::GEOMETRIC);
                let e = PhysicalConstants::GEOMETRIC.energy_scale();
                for r in [1.0, 1.2, 1.9, 2.8] {
                    let t = solver.at(r);
                    let from_trace = (t.energy_density
                        - t.radial_pressure
                        - 2.0 * t.tangential_pressure)
                        / e;
                    let direct = solver.ricci_scalar(r);
                    assert!(
                        (from_trace - direct).abs() < 1e-10 * (1.0 + direct.abs()),
                        "{cfg} r={r}: {from_trace} vs {direct}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_constant_redshift_matches_zero() {
        let shape = ShapeFunction::power_law(0.5).unwrap();
        let a = metric(shape);
        let b = MorrisThorneMetric::new(
            WormholeConfig::new(shape, 1.0).with_redshift(RedshiftFunction::Constant { phi0: 0.3 }),
        )
        .unwrap();
        let sa = EinsteinSolver::new(&a, PhysicalConstants::SI);
        let sb = EinsteinSolver::new(&b, PhysicalConstants::SI);
        for r in [1.0, 1.5, 2.5] {
            assert_eq!(sa.at(r), sb.at(r));
        }
    }

    #[test]
    fn test_nec_violated_at_throat() {
        let m = metric(ShapeFunction::tanh(0.2).unwrap());
        let solver = EinsteinSolver::new(&m, PhysicalConstants::SI);
        let c = solver.energy_conditions(1.0);
        assert!(!c.nec_radial);
        assert!(!c.nec());
        assert!(!c.wec);
        assert!(!c.dec);

        let v = solver.violation_fractions(1.0, 3.0, 200);
        assert_eq!(v.samples, 200);
        assert!(v.nec > 0.0 && v.nec <= 1.0);
        // WEC implies NEC, so it fails at least as often
        assert!(v.wec >= v.nec);
    }
}
