//! # wormhole-anec: ANEC evaluation for traversable wormholes
//!
//! ## Usage
//! ```bash
//! # One configuration with throat diagnostics
//! wormhole-anec evaluate --shape tanh --param 0.1
//!
//! # Ranked sweep of the default grids
//! wormhole-anec sweep --top 10 --json sweep.json
//!
//! # Reference set plus thin-shell comparison, with span timings
//! wormhole-anec --verbose reference
//! ```

use std::time::Instant;

use anyhow::Context;

use wormhole_anec::config::{Command, Config};
use wormhole_anec::geometry::throat::ThroatGeometry;
use wormhole_anec::io::report::{self, ReferenceReport, SingleReport, SweepReport};
use wormhole_anec::model::anec::AnecIntegrator;
use wormhole_anec::model::parameters::AnecParams;
use wormhole_anec::pipelines::{ConfigurationOptimizer, ReferencePipeline};
use wormhole_anec::utils::telemetry::{Stage, SweepProgress};
use wormhole_anec::MorrisThorneMetric;

/// Samples used for energy-condition violation fractions over [l0, r_max]
const VIOLATION_SAMPLES: usize = 500;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber for hierarchical span output
fn init_profiling() {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Warnings only, no span events
fn init_quiet_logging() {
    use tracing_subscriber::{
        filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr)
                .with_filter(LevelFilter::WARN),
        )
        .init();
}

fn run() -> anyhow::Result<()> {
    let start = Instant::now();

    // Parse and validate configuration
    let config = Config::parse_and_validate()?;

    if config.verbose {
        init_profiling();
    } else {
        init_quiet_logging();
    }

    // Configure thread pool
    let n_threads = config.nthreads();
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
        .ok();

    let params = config.anec_params()?;
    if config.verbose {
        eprintln!("wormhole-anec v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Threads: {}", n_threads);
    }

    match &config.command {
        Command::Evaluate { .. } => run_evaluate(&config, &params)?,
        Command::Sweep {
            l0,
            top,
            grid_points,
        } => run_sweep(&config, &params, *l0, *top, *grid_points)?,
        Command::Reference => run_reference(&config, &params)?,
    }

    if config.verbose {
        eprintln!("Completed in {:.2}s", start.elapsed().as_secs_f64());
    }
    Ok(())
}

fn run_evaluate(config: &Config, params: &AnecParams) -> anyhow::Result<()> {
    let descriptor = config
        .command
        .descriptor()
        .context("evaluate subcommand expected")??;

    let metric = MorrisThorneMetric::new(descriptor)?;
    let integrator = AnecIntegrator::new(metric, params)?;
    let result = integrator.integrate()?;

    let metric = integrator.metric();
    let throat = ThroatGeometry::new(metric, params.constants).properties();
    let violations = integrator.solver().violation_fractions(
        metric.l0(),
        integrator.map().r_max(),
        VIOLATION_SAMPLES,
    );

    print!(
        "{}",
        report::format_single(&descriptor, &result, &throat, &violations)
    );
    if let Some(path) = &config.json {
        report::write_json(
            path,
            &SingleReport {
                config: &descriptor,
                result: &result,
                throat: &throat,
                violations: &violations,
            },
        )?;
    }
    Ok(())
}

fn run_sweep(
    config: &Config,
    params: &AnecParams,
    l0: f64,
    top: usize,
    grid_points: usize,
) -> anyhow::Result<()> {
    let progress = SweepProgress::new();
    let descriptors = ConfigurationOptimizer::grid(l0, grid_points);
    let optimizer = ConfigurationOptimizer::new(params.clone()).with_progress(progress.clone());
    let run = optimizer.run(&descriptors);

    print!("{}", report::format_run(&run, Some(top)));
    if let Some(path) = &config.json {
        progress.set_stage(Stage::WritingOutput);
        report::write_json(path, &SweepReport::new(&run))?;
    }
    progress.set_stage(Stage::Complete);
    if config.verbose {
        eprintln!("{}", progress.snapshot().progress_line());
    }
    Ok(())
}

fn run_reference(config: &Config, params: &AnecParams) -> anyhow::Result<()> {
    let comparison = ReferencePipeline::new(params.clone()).run();

    print!("{}", report::format_reference(&comparison));
    if let Some(path) = &config.json {
        report::write_json(path, &ReferenceReport::new(&comparison))?;
    }
    Ok(())
}
