//! # Geometry Module
//!
//! Closed-form spacetime geometry: shape and redshift catalogs, the validated
//! Morris-Thorne metric, throat diagnostics and the thin-shell comparison model.

pub mod metric;
pub mod redshift;
pub mod shape;
pub mod thin_shell;
pub mod throat;

pub use metric::{MorrisThorneMetric, WormholeConfig};
pub use redshift::RedshiftFunction;
pub use shape::{ShapeFamily, ShapeFunction};
