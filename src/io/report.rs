//! # Result Reports
//!
//! Plain text tables for stdout and serde records for the JSON dump.
//! Records borrow from the run so nothing is copied until serialization.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::geometry::metric::WormholeConfig;
use crate::geometry::thin_shell::{ThinShellConfig, ThinShellSummary};
use crate::geometry::throat::ThroatProperties;
use crate::model::anec::AnecResult;
use crate::model::stress_energy::ViolationFractions;
use crate::pipelines::optimizer::OptimizationRun;
use crate::pipelines::reference::ReferenceComparison;

/// One row of a sweep dump
#[derive(Serialize)]
pub struct EvaluationRecord<'a> {
    /// 1-based rank among successes
    pub rank: Option<usize>,
    pub config: &'a WormholeConfig,
    pub result: Option<&'a AnecResult>,
    pub error_kind: Option<&'static str>,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct SweepReport<'a> {
    pub total: usize,
    pub satisfied: usize,
    pub violated: usize,
    pub failed: usize,
    pub evaluations: Vec<EvaluationRecord<'a>>,
}

impl<'a> SweepReport<'a> {
    pub fn new(run: &'a OptimizationRun) -> Self {
        let evaluations = run
            .evaluations()
            .iter()
            .enumerate()
            .map(|(i, e)| EvaluationRecord {
                rank: run.rank_of(i),
                config: &e.descriptor,
                result: e.result(),
                error_kind: e.error().map(|err| err.kind()),
                error: e.error().map(|err| err.to_string()),
            })
            .collect();
        Self {
            total: run.len(),
            satisfied: run.satisfied_count(),
            violated: run.violated_count(),
            failed: run.failures().len(),
            evaluations,
        }
    }
}

#[derive(Serialize)]
pub struct ThinShellRecord<'a> {
    pub config: &'a ThinShellConfig,
    pub summary: Option<&'a ThinShellSummary>,
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct ReferenceReport<'a> {
    pub morris_thorne: SweepReport<'a>,
    pub thin_shells: Vec<ThinShellRecord<'a>>,
}

impl<'a> ReferenceReport<'a> {
    pub fn new(comparison: &'a ReferenceComparison) -> Self {
        Self {
            morris_thorne: SweepReport::new(&comparison.morris_thorne),
            thin_shells: comparison
                .thin_shells
                .iter()
                .map(|(config, outcome)| ThinShellRecord {
                    config,
                    summary: outcome.as_ref().ok(),
                    error: outcome.as_ref().err().map(|e| e.to_string()),
                })
                .collect(),
        }
    }
}

/// Single-configuration dump for `evaluate`
#[derive(Serialize)]
pub struct SingleReport<'a> {
    pub config: &'a WormholeConfig,
    pub result: &'a AnecResult,
    pub throat: &'a ThroatProperties,
    pub violations: &'a ViolationFractions,
}

/// Serialize `value` as pretty JSON to `path`.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON output {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).context("Failed to serialize results")?;
    writer.write_all(b"\n")?;
    writer.flush().context("Failed to flush JSON output")?;
    Ok(())
}

fn config_label(config: &WormholeConfig) -> String {
    config.to_string()
}

fn result_row(rank: &str, config: &WormholeConfig, r: &AnecResult) -> String {
    format!(
        "{:>4}  {:<34} {:>14.6e} {:>14.6e} {:>9.4} {:<10}{}\n",
        rank,
        config_label(config),
        r.anec_value,
        r.throat_density,
        r.extent,
        r.status.as_str(),
        if r.low_confidence { " (low confidence)" } else { "" }
    )
}

fn table_header() -> String {
    format!(
        "{:>4}  {:<34} {:>14} {:>14} {:>9} {:<10}\n",
        "#", "configuration", "ANEC", "rho(l0)", "L", "status"
    )
}

/// Ranked table of a sweep, optionally limited to the best `top`
pub fn format_run(run: &OptimizationRun, top: Option<usize>) -> String {
    let ranked = match top {
        Some(n) => run.best(n),
        None => run.ranked(),
    };
    let mut out = table_header();
    for (i, (config, result)) in ranked.iter().enumerate() {
        out.push_str(&result_row(&(i + 1).to_string(), config, result));
    }

    let failures = run.failures();
    if !failures.is_empty() {
        out.push_str(&format!("\n{} configuration(s) failed:\n", failures.len()));
        for (config, err) in failures {
            out.push_str(&format!("  {:<34} {}\n", config_label(config), err));
        }
    }
    out.push_str(&format!(
        "\n{} evaluated: {} satisfied, {} violated, {} failed\n",
        run.len(),
        run.satisfied_count(),
        run.violated_count(),
        run.failures().len()
    ));
    out
}

/// Reference batch: Morris-Thorne rows in catalog order, then the thin shells
pub fn format_reference(comparison: &ReferenceComparison) -> String {
    let mut out = String::from("Morris-Thorne reference configurations\n");
    out.push_str(&table_header());
    for e in comparison.morris_thorne.evaluations() {
        match &e.outcome {
            Ok(r) => out.push_str(&result_row("-", &e.descriptor, r)),
            Err(err) => out.push_str(&format!(
                "{:>4}  {:<34} {}\n",
                "-",
                config_label(&e.descriptor),
                err
            )),
        }
    }
    out.push_str(&format!(
        "{} satisfied, {} violated\n\nThin-shell comparison\n",
        comparison.satisfied_count(),
        comparison.violated_count()
    ));
    out.push_str(&format!(
        "{:<28} {:>14} {:>14} {:>14} {:<10}\n",
        "shell", "sigma", "P", "radial ANEC", "status"
    ));
    for (config, outcome) in &comparison.thin_shells {
        match outcome {
            Ok(s) => out.push_str(&format!(
                "{:<28} {:>14.6e} {:>14.6e} {:>14.6e} {:<10}\n",
                config.to_string(),
                s.surface_energy_density,
                s.surface_pressure,
                s.radial_anec,
                s.status.as_str()
            )),
            Err(err) => out.push_str(&format!("{:<28} {}\n", config.to_string(), err)),
        }
    }
    out
}

/// Detailed block for one configuration
pub fn format_single(
    config: &WormholeConfig,
    result: &AnecResult,
    throat: &ThroatProperties,
    violations: &ViolationFractions,
) -> String {
    let mut out = format!("configuration        {}\n", config_label(config));
    out.push_str(&format!("ANEC                 {:.6e}\n", result.anec_value));
    out.push_str(&format!("status               {}\n", result.status));
    out.push_str(&format!("rho(l0)              {:.6e}\n", result.throat_density));
    out.push_str(&format!("rho + p_r at l0      {:.6e}\n", result.throat_null_energy));
    out.push_str(&format!("extent L             {:.6}\n", result.extent));
    out.push_str(&format!(
        "samples              {} ({} discarded{})\n",
        result.total_sample_count,
        result.discarded_sample_count,
        if result.low_confidence { ", low confidence" } else { "" }
    ));
    out.push_str(&format!("b'(l0)               {:.6}\n", throat.flare_out_parameter));
    out.push_str(&format!("circumference        {:.6}\n", throat.circumference));
    out.push_str(&format!("tidal accel (1/s^2)  {:.6e}\n", throat.tidal_acceleration));
    out.push_str(&format!("Ricci at throat      {:.6e}\n", throat.ricci_scalar));
    out.push_str(&format!(
        "violation fractions  NEC {:.3}  WEC {:.3}  SEC {:.3}  DEC {:.3}\n",
        violations.nec, violations.wec, violations.sec, violations.dec
    ));
    out
}
