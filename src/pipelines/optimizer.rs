//! # Configuration Optimizer
//!
//! ## Role
//! Sweeps a grid of wormhole descriptors, evaluates the ANEC for each one in
//! parallel and ranks the results.
//!
//! ## Behavior
//! - Every descriptor is evaluated independently; a failure is recorded
//!   against its descriptor and the sweep continues.
//! - Output order matches input order (rayon `collect` on an indexed iterator).
//! - Ranking: descending ANEC value, ties broken by smaller |ρ(l0)|.

use std::cmp::Ordering;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, info_span, instrument};

use crate::error::{Result, WormholeError};
use crate::geometry::metric::WormholeConfig;
use crate::geometry::shape::{ShapeFamily, ShapeFunction};
use crate::model::anec::{self, AnecResult};
use crate::model::parameters::AnecParams;
use crate::utils::telemetry::{Stage, SweepProgress};

/// Points per family in the default sweep grid
pub const DEFAULT_GRID_POINTS: usize = 20;

/// A descriptor is exactly the configuration it describes
pub type ConfigDescriptor = WormholeConfig;

/// One descriptor and what happened when it was evaluated
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub descriptor: ConfigDescriptor,
    pub outcome: Result<AnecResult>,
}

impl Evaluation {
    pub fn result(&self) -> Option<&AnecResult> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&WormholeError> {
        self.outcome.as_ref().err()
    }
}

/// Evaluations in input order plus the derived ranking
#[derive(Clone, Debug)]
pub struct OptimizationRun {
    evaluations: Vec<Evaluation>,
    /// Indices of successful evaluations, best first
    ranking: Vec<usize>,
}

impl OptimizationRun {
    /// Rank a finished set of evaluations
    pub fn from_evaluations(evaluations: Vec<Evaluation>) -> Self {
        let mut ranking: Vec<usize> = evaluations
            .iter()
            .enumerate()
            .filter(|(_, e)| e.outcome.is_ok())
            .map(|(i, _)| i)
            .collect();

        ranking.sort_by(|&a, &b| match (evaluations[a].result(), evaluations[b].result()) {
            (Some(ra), Some(rb)) => compare_results(ra, rb),
            _ => Ordering::Equal,
        });

        Self {
            evaluations,
            ranking,
        }
    }

    /// All evaluations in input order
    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    /// 1-based rank of the evaluation at `index`, if it succeeded
    pub fn rank_of(&self, index: usize) -> Option<usize> {
        self.ranking.iter().position(|&i| i == index).map(|p| p + 1)
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// Successful evaluations, best first
    pub fn ranked(&self) -> Vec<(&ConfigDescriptor, &AnecResult)> {
        self.ranking
            .iter()
            .filter_map(|&i| {
                let e = &self.evaluations[i];
                e.result().map(|r| (&e.descriptor, r))
            })
            .collect()
    }

    /// Top `n` of the ranking (fewer if fewer succeeded)
    pub fn best(&self, n: usize) -> Vec<(&ConfigDescriptor, &AnecResult)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }

    /// Failed evaluations in input order
    pub fn failures(&self) -> Vec<(&ConfigDescriptor, &WormholeError)> {
        self.evaluations
            .iter()
            .filter_map(|e| e.error().map(|err| (&e.descriptor, err)))
            .collect()
    }

    pub fn satisfied_count(&self) -> usize {
        self.evaluations
            .iter()
            .filter_map(Evaluation::result)
            .filter(|r| r.is_satisfied())
            .count()
    }

    pub fn violated_count(&self) -> usize {
        self.ranking.len() - self.satisfied_count()
    }
}

/// Descending ANEC, then smaller |ρ(l0)|
fn compare_results(a: &AnecResult, b: &AnecResult) -> Ordering {
    b.anec_value
        .total_cmp(&a.anec_value)
        .then_with(|| a.throat_density.abs().total_cmp(&b.throat_density.abs()))
}

/// Grid sweep driver
pub struct ConfigurationOptimizer {
    params: AnecParams,
    progress: Arc<SweepProgress>,
}

impl ConfigurationOptimizer {
    pub fn new(params: AnecParams) -> Self {
        Self {
            params,
            progress: SweepProgress::new(),
        }
    }

    /// Share an existing progress blackboard
    pub fn with_progress(mut self, progress: Arc<SweepProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn params(&self) -> &AnecParams {
        &self.params
    }

    pub fn progress(&self) -> &Arc<SweepProgress> {
        &self.progress
    }

    /// `points` evenly spaced parameters per family over the default ranges
    pub fn grid(throat_radius: f64, points: usize) -> Vec<ConfigDescriptor> {
        ShapeFamily::ALL
            .iter()
            .flat_map(|&family| {
                family
                    .default_grid(points)
                    .into_iter()
                    .filter_map(move |p| ShapeFunction::new(family, p).ok())
            })
            .map(|shape| WormholeConfig::new(shape, throat_radius))
            .collect()
    }

    /// The three 20-point family grids
    pub fn default_grid(throat_radius: f64) -> Vec<ConfigDescriptor> {
        Self::grid(throat_radius, DEFAULT_GRID_POINTS)
    }

    pub fn evaluate(&self, descriptor: &ConfigDescriptor) -> Evaluation {
        let outcome = anec::evaluate(descriptor, &self.params);
        if let Err(e) = &outcome {
            tracing::debug!(config = %descriptor, error = %e, "evaluation failed");
        }
        self.progress.record(
            outcome.is_ok(),
            outcome.as_ref().map(AnecResult::is_satisfied).unwrap_or(false),
        );
        Evaluation {
            descriptor: *descriptor,
            outcome,
        }
    }

    /// Evaluate every descriptor and rank the successes.
    #[instrument(skip_all, fields(n_configs = descriptors.len()))]
    pub fn run(&self, descriptors: &[ConfigDescriptor]) -> OptimizationRun {
        self.progress.set_total(descriptors.len());
        self.progress.set_stage(Stage::Evaluating);

        let evaluations: Vec<Evaluation> = info_span!("evaluate_configs")
            .in_scope(|| descriptors.par_iter().map(|d| self.evaluate(d)).collect());

        self.progress.set_stage(Stage::Ranking);
        let run = info_span!("rank_results").in_scope(|| OptimizationRun::from_evaluations(evaluations));

        info!(
            succeeded = run.ranking.len(),
            failed = run.failures().len(),
            satisfied = run.satisfied_count(),
            "sweep finished"
        );
        run
    }
}
