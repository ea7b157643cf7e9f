//! # Pipeline Module
//!
//! Batch orchestration over many configurations: the grid sweep with ranking
//! and the reference comparison run.

pub mod optimizer;
pub mod reference;

pub use optimizer::{ConfigurationOptimizer, Evaluation, OptimizationRun};
pub use reference::{ReferenceComparison, ReferencePipeline};
