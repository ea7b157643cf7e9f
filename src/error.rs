//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.
//!
//! Every variant except `Config` and `Io` is local to a single wormhole
//! configuration: the sweep records it against that configuration and keeps going.

use thiserror::Error;

/// Main error type for wormhole ANEC evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WormholeError {
    /// Malformed shape or redshift parameters (non-positive scale, non-finite value)
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Throat, flare-out, horizon or b(r) < r condition failed
    #[error("Non-traversable geometry: {message}")]
    NonTraversableGeometry { message: String },

    /// Quadrature failure while building the r <-> l table
    #[error("Coordinate mapping error: {message}")]
    CoordinateMapping { message: String },

    /// Too few finite integrand samples to form an integral
    #[error("Numerical degeneracy: {discarded} of {total} samples were non-finite")]
    NumericalDegeneracy { discarded: usize, total: usize },

    /// Configuration errors (invalid CLI arguments)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O errors (report output)
    #[error("I/O error: {0}")]
    Io(String),
}

/// Type alias for Results using WormholeError
pub type Result<T> = std::result::Result<T, WormholeError>;

impl WormholeError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a non-traversable geometry error
    pub fn non_traversable(message: impl Into<String>) -> Self {
        Self::NonTraversableGeometry {
            message: message.into(),
        }
    }

    /// Create a coordinate mapping error
    pub fn coordinate_mapping(message: impl Into<String>) -> Self {
        Self::CoordinateMapping {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Short machine-readable tag, used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidConfiguration { .. } => "invalid_configuration",
            Self::NonTraversableGeometry { .. } => "non_traversable_geometry",
            Self::CoordinateMapping { .. } => "coordinate_mapping",
            Self::NumericalDegeneracy { .. } => "numerical_degeneracy",
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
        }
    }
}

impl From<std::io::Error> for WormholeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
