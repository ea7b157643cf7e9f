//! # Model Module
//!
//! Numerical core for one wormhole configuration.
//!
//! ## Core Algorithms
//! - `CoordinateMap`: r <-> l table through the throat singularity
//! - `EinsteinSolver`: closed-form ρ, p_r, p_t and energy conditions
//! - `AnecIntegrator`: the ANEC line integral over [-L, L]
//! - `Parameters`: physical constants and quadrature settings

pub mod anec;
pub mod coordinate_map;
pub mod parameters;
pub mod stress_energy;

pub use anec::{AnecIntegrator, AnecResult, AnecStatus};
pub use parameters::{AnecParams, IntegrationExtent, PhysicalConstants};
