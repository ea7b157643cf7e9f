//! # Thin-Shell Wormholes
//!
//! ## Role
//! Comparison model: two Schwarzschild exteriors cut at r = a > 2m and glued
//! along the shell. The Israel junction conditions put all the exotic matter
//! on the shell (m = GM/c² is the geometric mass):
//!
//! ```text
//! σ = -(c⁴/G) sqrt(1 - 2m/a) / (2π a)
//! P =  (c⁴/G) (1 - m/a) / (4π a sqrt(1 - 2m/a))
//! ```
//!
//! σ < 0 always; σ + P < 0 whenever a > 3m. A radial null ray crossing the
//! shell picks up ∫ T_kk dλ = σ, which is always negative, so the ANEC fails
//! for every thin shell.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WormholeError};
use crate::model::anec::AnecStatus;
use crate::model::parameters::PhysicalConstants;

/// Shell radius (m) and mass (kg) of a thin-shell wormhole
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThinShellConfig {
    pub shell_radius: f64,
    pub mass_kg: f64,
}

impl std::fmt::Display for ThinShellConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "thin-shell(a={}, M={} kg)", self.shell_radius, self.mass_kg)
    }
}

/// Validated thin-shell wormhole
#[derive(Clone, Copy, Debug)]
pub struct ThinShellWormhole {
    config: ThinShellConfig,
    constants: PhysicalConstants,
}

/// Everything a comparison table needs for one shell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThinShellSummary {
    pub config: ThinShellConfig,
    pub schwarzschild_radius: f64,
    /// σ (J/m²)
    pub surface_energy_density: f64,
    /// P (N/m)
    pub surface_pressure: f64,
    pub nec_violated: bool,
    pub wec_violated: bool,
    pub radial_anec: f64,
    pub generator_anec: f64,
    pub status: AnecStatus,
}

impl ThinShellWormhole {
    pub fn new(config: ThinShellConfig, constants: PhysicalConstants) -> Result<Self> {
        let a = config.shell_radius;
        if !(a.is_finite() && a > 0.0) {
            return Err(WormholeError::invalid_configuration(format!(
                "shell radius must be positive, got {a}"
            )));
        }
        if !(config.mass_kg.is_finite() && config.mass_kg >= 0.0) {
            return Err(WormholeError::invalid_configuration(format!(
                "shell mass must be non-negative, got {}",
                config.mass_kg
            )));
        }
        let shell = Self { config, constants };
        if a <= shell.schwarzschild_radius() {
            return Err(WormholeError::non_traversable(format!(
                "shell radius a={a} is inside the horizon r_s={}",
                shell.schwarzschild_radius()
            )));
        }
        Ok(shell)
    }

    pub fn config(&self) -> ThinShellConfig {
        self.config
    }

    /// m = GM/c²
    pub fn geometric_mass(&self) -> f64 {
        self.constants.geometric_mass(self.config.mass_kg)
    }

    /// 2GM/c²
    pub fn schwarzschild_radius(&self) -> f64 {
        2.0 * self.geometric_mass()
    }

    fn lapse(&self) -> f64 {
        (1.0 - self.schwarzschild_radius() / self.config.shell_radius).sqrt()
    }

    pub fn surface_energy_density(&self) -> f64 {
        let a = self.config.shell_radius;
        -self.constants.surface_scale() * self.lapse() / (2.0 * PI * a)
    }

    pub fn surface_pressure(&self) -> f64 {
        let a = self.config.shell_radius;
        let m = self.geometric_mass();
        self.constants.surface_scale() * (1.0 - m / a) / (4.0 * PI * a * self.lapse())
    }

    /// σ + P
    pub fn null_energy(&self) -> f64 {
        self.surface_energy_density() + self.surface_pressure()
    }

    /// ANEC for a radial null ray through the shell
    pub fn radial_crossing_anec(&self) -> f64 {
        self.surface_energy_density()
    }

    /// ANEC along an equatorial null generator of the shell, (σ + P) 2πa
    pub fn generator_anec(&self) -> f64 {
        self.null_energy() * 2.0 * PI * self.config.shell_radius
    }

    pub fn summary(&self) -> ThinShellSummary {
        let sigma = self.surface_energy_density();
        let radial = self.radial_crossing_anec();
        ThinShellSummary {
            config: self.config,
            schwarzschild_radius: self.schwarzschild_radius(),
            surface_energy_density: sigma,
            surface_pressure: self.surface_pressure(),
            nec_violated: self.null_energy() < 0.0,
            wec_violated: sigma < 0.0 || self.null_energy() < 0.0,
            radial_anec: radial,
            generator_anec: self.generator_anec(),
            status: AnecStatus::from_value(radial),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(a: f64, mass_kg: f64) -> Result<ThinShellWormhole> {
        ThinShellWormhole::new(
            ThinShellConfig {
                shell_radius: a,
                mass_kg,
            },
            PhysicalConstants::SI,
        )
    }

    #[test]
    fn test_shell_violates_nec_and_anec() {
        for (a, m) in [(2.0, 0.3), (2.0, 0.4), (3.0, 0.5), (5.0, 1.0), (10.0, 2.0)] {
            let s = shell(a, m).unwrap().summary();
            assert!(s.surface_energy_density < 0.0);
            assert!(s.nec_violated);
            assert!(s.radial_anec < 0.0);
            assert_eq!(s.status, AnecStatus::Violated);
        }
    }

    #[test]
    fn test_massless_shell_closed_form() {
        let s = ThinShellWormhole::new(
            ThinShellConfig {
                shell_radius: 2.0,
                mass_kg: 0.0,
            },
            PhysicalConstants::GEOMETRIC,
        )
        .unwrap();
        assert!((s.surface_energy_density() + 1.0 / (4.0 * PI)).abs() < 1e-12);
        assert!((s.surface_pressure() - 1.0 / (8.0 * PI)).abs() < 1e-12);
        assert!((s.generator_anec() + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_nec_sign_change_at_three_m() {
        // geometric units: NEC holds for 2m < a < 3m, fails beyond
        let mk = |a: f64| {
            ThinShellWormhole::new(
                ThinShellConfig {
                    shell_radius: a,
                    mass_kg: 1.0,
                },
                PhysicalConstants::GEOMETRIC,
            )
            .unwrap()
        };
        assert!(mk(2.5).null_energy() > 0.0);
        assert!(mk(3.5).null_energy() < 0.0);
    }

    #[test]
    fn test_rejects_invalid_shells() {
        assert!(matches!(
            shell(-1.0, 0.3),
            Err(WormholeError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            shell(1.0, -0.3),
            Err(WormholeError::InvalidConfiguration { .. })
        ));
        let inside = ThinShellWormhole::new(
            ThinShellConfig {
                shell_radius: 1.5,
                mass_kg: 1.0,
            },
            PhysicalConstants::GEOMETRIC,
        );
        assert!(matches!(
            inside,
            Err(WormholeError::NonTraversableGeometry { .. })
        ));
    }
}
