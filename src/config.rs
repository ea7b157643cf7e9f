//! # Configuration Logic
//!
//! ## Role
//! CLI argument parsing and validation.
//!
//! Global flags control the quadrature and output; the subcommand picks the
//! workload:
//!
//! ```bash
//! wormhole-anec evaluate --shape tanh --param 0.1
//! wormhole-anec sweep --top 5 --json sweep.json
//! wormhole-anec --threads 4 reference
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::error::{Result, WormholeError};
use crate::geometry::metric::WormholeConfig;
use crate::geometry::redshift::RedshiftFunction;
use crate::geometry::shape::{ShapeFamily, ShapeFunction};
use crate::model::parameters::{AnecParams, IntegrationExtent, PhysicalConstants};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RedshiftKind {
    #[default]
    Zero,
    Constant,
    #[value(alias = "gaussian-hump")]
    Gaussian,
}

#[derive(Debug, Parser)]
#[command(
    name = "wormhole-anec",
    about = "ANEC evaluation for Morris-Thorne traversable wormholes",
    version,
    propagate_version = true
)]
pub struct Config {
    /// Quadrature samples over [-L, L] (made odd)
    #[arg(long, default_value_t = 2001, global = true)]
    pub points: usize,

    /// Integrate out to areal radius factor * l0
    #[arg(long = "radius-factor", default_value_t = 3.0, global = true)]
    pub radius_factor: f64,

    /// Stop once |integrand| stays below this fraction of its peak
    /// (radius factor becomes the cap)
    #[arg(long = "decay-threshold", global = true)]
    pub decay_threshold: Option<f64>,

    /// Entries in the r <-> l table
    #[arg(long = "map-samples", default_value_t = 2000, global = true)]
    pub map_samples: usize,

    /// Discarded-sample fraction that marks a result low-confidence
    #[arg(long = "confidence-threshold", default_value_t = 0.05, global = true)]
    pub confidence_threshold: f64,

    /// Use geometric units (G = c = 1) instead of SI
    #[arg(long, global = true)]
    pub geometric: bool,

    /// Number of threads (default: all cores)
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Also write the results as JSON
    #[arg(long, value_name = "FILE", global = true)]
    pub json: Option<PathBuf>,

    /// Log spans and progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate one configuration in detail
    Evaluate {
        /// power-law, exponential or tanh
        #[arg(long)]
        shape: ShapeFamily,

        /// Family parameter (n, lambda or sigma)
        #[arg(long)]
        param: f64,

        /// Throat radius (m)
        #[arg(long, default_value_t = 1.0)]
        l0: f64,

        #[arg(long, value_enum, default_value_t = RedshiftKind::Zero)]
        redshift: RedshiftKind,

        /// Constant redshift value
        #[arg(long, default_value_t = 0.0)]
        phi0: f64,

        /// Gaussian redshift amplitude
        #[arg(long, default_value_t = 0.1)]
        amplitude: f64,

        /// Gaussian redshift width (m)
        #[arg(long, default_value_t = 1.0)]
        width: f64,
    },

    /// Sweep the default parameter grids and rank the results
    Sweep {
        /// Throat radius (m)
        #[arg(long, default_value_t = 1.0)]
        l0: f64,

        /// Show only the best N configurations
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Grid points per shape family
        #[arg(long = "grid-points", default_value_t = 20)]
        grid_points: usize,
    },

    /// Evaluate the reference configurations and the thin-shell comparison
    Reference,
}

impl Config {
    pub fn parse_and_validate() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.points < 3 {
            return Err(WormholeError::config(format!(
                "--points must be at least 3, got {}",
                self.points
            )));
        }
        if self.threads == Some(0) {
            return Err(WormholeError::config("--threads must be at least 1"));
        }
        if let Command::Sweep { grid_points, .. } = self.command {
            if grid_points == 0 {
                return Err(WormholeError::config("--grid-points must be at least 1"));
            }
        }
        self.anec_params().map(|_| ())
    }

    pub fn nthreads(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Validated quadrature settings from the global flags
    pub fn anec_params(&self) -> Result<AnecParams> {
        let extent = match self.decay_threshold {
            Some(relative) => IntegrationExtent::DecayThreshold {
                relative,
                max_radius_factor: self.radius_factor,
            },
            None => IntegrationExtent::RadiusFactor(self.radius_factor),
        };
        AnecParams {
            constants: if self.geometric {
                PhysicalConstants::GEOMETRIC
            } else {
                PhysicalConstants::SI
            },
            extent,
            n_points: self.points,
            map_samples: self.map_samples,
            confidence_threshold: self.confidence_threshold,
            ..AnecParams::default()
        }
        .validated()
        .map_err(|e| WormholeError::config(e.to_string()))
    }
}

impl Command {
    /// The configuration named by `evaluate`
    pub fn descriptor(&self) -> Option<Result<WormholeConfig>> {
        let Command::Evaluate {
            shape,
            param,
            l0,
            redshift,
            phi0,
            amplitude,
            width,
        } = *self
        else {
            return None;
        };
        let redshift = match redshift {
            RedshiftKind::Zero => RedshiftFunction::Zero,
            RedshiftKind::Constant => RedshiftFunction::Constant { phi0 },
            RedshiftKind::Gaussian => RedshiftFunction::GaussianHump { amplitude, width },
        };
        Some(
            ShapeFunction::new(shape, param)
                .map(|s| WormholeConfig::new(s, l0).with_redshift(redshift)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_arguments() {
        let config = Config::try_parse_from([
            "wormhole-anec",
            "evaluate",
            "--shape",
            "tanh",
            "--param",
            "0.15",
            "--redshift",
            "gaussian",
            "--width",
            "0.5",
        ])
        .unwrap();
        config.validate().unwrap();
        let descriptor = config.command.descriptor().unwrap().unwrap();
        assert_eq!(descriptor.shape, ShapeFunction::Tanh { sigma: 0.15 });
        assert_eq!(
            descriptor.redshift,
            RedshiftFunction::GaussianHump {
                amplitude: 0.1,
                width: 0.5
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let config = Config::try_parse_from([
            "wormhole-anec",
            "sweep",
            "--top",
            "3",
            "--points",
            "1000",
            "--threads",
            "2",
        ])
        .unwrap();
        let params = config.anec_params().unwrap();
        assert_eq!(params.n_points, 1001);
        assert_eq!(config.nthreads(), 2);
        assert!(config.command.descriptor().is_none());
    }

    #[test]
    fn test_decay_threshold_extent() {
        let config = Config::try_parse_from([
            "wormhole-anec",
            "--decay-threshold",
            "0.001",
            "--radius-factor",
            "8",
            "reference",
        ])
        .unwrap();
        assert_eq!(
            config.anec_params().unwrap().extent,
            IntegrationExtent::DecayThreshold {
                relative: 0.001,
                max_radius_factor: 8.0
            }
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        let config =
            Config::try_parse_from(["wormhole-anec", "--radius-factor", "0.5", "reference"])
                .unwrap();
        assert!(matches!(config.validate(), Err(WormholeError::Config { .. })));

        let config =
            Config::try_parse_from(["wormhole-anec", "--threads", "0", "reference"]).unwrap();
        assert!(config.validate().is_err());

        assert!(Config::try_parse_from(["wormhole-anec", "evaluate", "--shape", "cubic", "--param", "1"])
            .is_err());
    }
}
