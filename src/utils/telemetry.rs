//! # Sweep Progress Blackboard
//!
//! Thread-safe progress tracking for configuration sweeps.
//! Atomic counters are bumped from inside rayon parallel iterators and read
//! back as a snapshot for logging; workers never wait on each other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Processing stage of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Stage {
    Initializing = 0,
    Evaluating = 1,
    Ranking = 2,
    WritingOutput = 3,
    Complete = 4,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Initializing => "Initializing",
            Stage::Evaluating => "Evaluating",
            Stage::Ranking => "Ranking",
            Stage::WritingOutput => "Writing Output",
            Stage::Complete => "Complete",
        }
    }

    fn from_u64(val: u64) -> Self {
        match val {
            0 => Stage::Initializing,
            1 => Stage::Evaluating,
            2 => Stage::Ranking,
            3 => Stage::WritingOutput,
            _ => Stage::Complete,
        }
    }
}

/// Shared progress state. Relaxed ordering throughout: readers only need
/// eventually consistent counts.
pub struct SweepProgress {
    stage: AtomicU64,
    total: AtomicU64,
    evaluated: AtomicU64,
    failed: AtomicU64,
    satisfied: AtomicU64,
    start_time: Instant,
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub stage: Stage,
    pub total: u64,
    pub evaluated: u64,
    pub failed: u64,
    pub satisfied: u64,
    pub elapsed_secs: f64,
}

impl SweepProgress {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[inline]
    pub fn set_stage(&self, stage: Stage) {
        self.stage.store(stage as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn stage(&self) -> Stage {
        Stage::from_u64(self.stage.load(Ordering::Relaxed))
    }

    pub fn set_total(&self, total: usize) {
        self.total.store(total as u64, Ordering::Relaxed);
    }

    /// Record one finished evaluation
    #[inline]
    pub fn record(&self, succeeded: bool, satisfied: bool) {
        self.evaluated.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            self.failed.fetch_add(1, Ordering::Relaxed);
        } else if satisfied {
            self.satisfied.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            stage: self.stage(),
            total: self.total.load(Ordering::Relaxed),
            evaluated: self.evaluated.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            satisfied: self.satisfied.load(Ordering::Relaxed),
            elapsed_secs: self.elapsed_secs(),
        }
    }
}

impl Default for SweepProgress {
    fn default() -> Self {
        Self {
            stage: AtomicU64::new(Stage::Initializing as u64),
            total: AtomicU64::new(0),
            evaluated: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            satisfied: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }
}

impl ProgressSnapshot {
    /// One-line summary for logs
    pub fn progress_line(&self) -> String {
        let pct = if self.total > 0 {
            (self.evaluated as f64 / self.total as f64 * 100.0).min(100.0)
        } else {
            0.0
        };
        format!(
            "{} {}/{} ({:.0}%) | {} satisfied, {} failed | {}",
            self.stage.as_str(),
            self.evaluated,
            self.total,
            pct,
            self.satisfied,
            self.failed,
            format_duration(self.elapsed_secs)
        )
    }
}

/// Format duration in human-readable form
fn format_duration(secs: f64) -> String {
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        format!("{:.0}m{:.0}s", mins, secs % 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_parallel_counts() {
        let progress = SweepProgress::new();
        progress.set_total(100);
        (0..100).into_par_iter().for_each(|i| {
            progress.record(i % 10 != 0, i % 2 == 0);
        });
        let snap = progress.snapshot();
        assert_eq!(snap.evaluated, 100);
        assert_eq!(snap.failed, 10);
        // even, not a multiple of ten
        assert_eq!(snap.satisfied, 40);
    }

    #[test]
    fn test_stage_round_trip() {
        let progress = SweepProgress::default();
        assert_eq!(progress.stage(), Stage::Initializing);
        progress.set_stage(Stage::Ranking);
        assert_eq!(progress.stage(), Stage::Ranking);
        assert!(progress.snapshot().progress_line().starts_with("Ranking"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.25), "250ms");
        assert_eq!(format_duration(12.34), "12.3s");
        assert_eq!(format_duration(125.0), "2m5s");
    }
}
