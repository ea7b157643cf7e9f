//! # Wormhole ANEC Library
//!
//! Numerical evaluation of the averaged null energy condition (ANEC) for
//! Morris-Thorne traversable wormholes, along radial null geodesics that
//! cross the throat.
//!
//! ## Modules
//! - `config`: CLI argument parsing and validation
//! - `error`: Error types and result aliases
//! - `geometry`: Shape/redshift catalogs, metric, throat and thin-shell models
//! - `io`: Text tables and JSON output
//! - `model`: Coordinate map, stress-energy, ANEC integral
//! - `pipelines`: Grid sweep with ranking, reference comparison
//! - `utils`: Quadrature rules and progress telemetry
//!
//! ## Module Structure
//! ```text
//! wormhole_anec
//! ├── geometry    # b(r), Φ(r), metric validation, throat diagnostics
//! ├── model       # r <-> l map, Einstein solver, ANEC integrator
//! ├── pipelines   # sweep + ranking, reference batch
//! ├── io          # reports
//! └── utils       # quadrature, telemetry
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod model;
pub mod pipelines;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, WormholeError};
pub use geometry::metric::{MorrisThorneMetric, WormholeConfig};
pub use geometry::redshift::RedshiftFunction;
pub use geometry::shape::{ShapeFamily, ShapeFunction};
pub use geometry::thin_shell::{ThinShellConfig, ThinShellWormhole};
pub use model::anec::{evaluate, AnecIntegrator, AnecResult, AnecStatus};
pub use model::coordinate_map::CoordinateMap;
pub use model::parameters::{AnecParams, IntegrationExtent, PhysicalConstants};
pub use model::stress_energy::EinsteinSolver;
pub use pipelines::{ConfigurationOptimizer, OptimizationRun, ReferencePipeline};
