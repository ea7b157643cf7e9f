//! # Utilities Module
//!
//! ## Role
//! Cross-cutting helpers that don't belong in domain-specific modules.
//!
//! ## Sub-modules
//! - `quadrature`: adaptive Simpson, trapezoid, linspace
//! - `telemetry`: atomic progress counters for parallel sweeps

pub mod quadrature;
pub mod telemetry;
