//! # Reference Comparison
//!
//! Evaluates the fixed reference catalog in one batch: seven Morris-Thorne
//! configurations at l0 = 1 (three tanh, two exponential, two power-law) and
//! five Schwarzschild thin shells for comparison.

use rayon::prelude::*;
use tracing::{info, instrument};

use crate::error::Result;
use crate::geometry::metric::WormholeConfig;
use crate::geometry::shape::{ShapeFamily, ShapeFunction};
use crate::geometry::thin_shell::{ThinShellConfig, ThinShellSummary, ThinShellWormhole};
use crate::model::parameters::AnecParams;
use crate::pipelines::optimizer::{ConfigurationOptimizer, OptimizationRun};

/// (family, parameter) pairs of the Morris-Thorne reference set
pub const REFERENCE_SHAPES: [(ShapeFamily, f64); 7] = [
    (ShapeFamily::Tanh, 0.1),
    (ShapeFamily::Tanh, 0.15),
    (ShapeFamily::Tanh, 0.2),
    (ShapeFamily::Exponential, 0.5),
    (ShapeFamily::Exponential, 1.0),
    (ShapeFamily::PowerLaw, 0.5),
    (ShapeFamily::PowerLaw, 0.8),
];

/// (shell radius m, mass kg) of the thin-shell reference set
pub const REFERENCE_SHELLS: [(f64, f64); 5] =
    [(2.0, 0.3), (2.0, 0.4), (3.0, 0.5), (5.0, 1.0), (10.0, 2.0)];

/// Throat radius of every reference configuration
pub const REFERENCE_THROAT_RADIUS: f64 = 1.0;

pub fn reference_configurations() -> Vec<WormholeConfig> {
    REFERENCE_SHAPES
        .iter()
        .filter_map(|&(family, p)| ShapeFunction::new(family, p).ok())
        .map(|shape| WormholeConfig::new(shape, REFERENCE_THROAT_RADIUS))
        .collect()
}

pub fn reference_thin_shells() -> Vec<ThinShellConfig> {
    REFERENCE_SHELLS
        .iter()
        .map(|&(shell_radius, mass_kg)| ThinShellConfig {
            shell_radius,
            mass_kg,
        })
        .collect()
}

/// Both halves of the comparison
#[derive(Clone, Debug)]
pub struct ReferenceComparison {
    pub morris_thorne: OptimizationRun,
    pub thin_shells: Vec<(ThinShellConfig, Result<ThinShellSummary>)>,
}

impl ReferenceComparison {
    pub fn satisfied_count(&self) -> usize {
        self.morris_thorne.satisfied_count()
    }

    pub fn violated_count(&self) -> usize {
        self.morris_thorne.violated_count()
    }

    /// Thin shells whose radial-crossing ANEC is negative
    pub fn thin_shell_violations(&self) -> usize {
        self.thin_shells
            .iter()
            .filter(|(_, s)| matches!(s, Ok(summary) if summary.radial_anec < 0.0))
            .count()
    }
}

pub struct ReferencePipeline {
    params: AnecParams,
}

impl ReferencePipeline {
    pub fn new(params: AnecParams) -> Self {
        Self { params }
    }

    #[instrument(skip_all)]
    pub fn run(&self) -> ReferenceComparison {
        let morris_thorne = ConfigurationOptimizer::new(self.params.clone())
            .run(&reference_configurations());

        let constants = self.params.constants;
        let thin_shells: Vec<_> = reference_thin_shells()
            .into_par_iter()
            .map(|cfg| (cfg, ThinShellWormhole::new(cfg, constants).map(|s| s.summary())))
            .collect();

        let comparison = ReferenceComparison {
            morris_thorne,
            thin_shells,
        };
        info!(
            satisfied = comparison.satisfied_count(),
            violated = comparison.violated_count(),
            thin_shell_violations = comparison.thin_shell_violations(),
            "reference comparison finished"
        );
        comparison
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(reference_configurations().len(), 7);
        assert_eq!(reference_thin_shells().len(), 5);
    }

    #[test]
    fn test_catalog_is_traversable() {
        use crate::geometry::metric::MorrisThorneMetric;
        for cfg in reference_configurations() {
            assert!(MorrisThorneMetric::new(cfg).is_ok(), "{cfg}");
        }
    }
}
