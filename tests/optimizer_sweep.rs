//! Integration tests for the configuration sweep: failure isolation,
//! ranking order, best-N queries and the JSON dump.

use wormhole_anec::io::report::{self, SweepReport};
use wormhole_anec::pipelines::optimizer::ConfigurationOptimizer;
use wormhole_anec::utils::telemetry::{Stage, SweepProgress};
use wormhole_anec::{
    AnecParams, RedshiftFunction, ShapeFamily, ShapeFunction, WormholeConfig, WormholeError,
};

fn mixed_descriptors() -> Vec<WormholeConfig> {
    vec![
        WormholeConfig::new(ShapeFunction::Tanh { sigma: 0.2 }, 1.0),
        WormholeConfig::new(ShapeFunction::PowerLaw { n: -0.5 }, 1.0),
        WormholeConfig::new(ShapeFunction::Exponential { lambda: 1.0 }, 1.0),
        WormholeConfig::new(ShapeFunction::Tanh { sigma: 0.0 }, 1.0),
        WormholeConfig::new(ShapeFunction::PowerLaw { n: 0.5 }, 1.0),
        WormholeConfig::new(ShapeFunction::Tanh { sigma: 0.1 }, 1.0)
            .with_redshift(RedshiftFunction::Constant { phi0: 400.0 }),
        WormholeConfig::new(ShapeFunction::Tanh { sigma: 0.1 }, 1.0),
    ]
}

#[test]
fn test_invalid_configurations_are_recorded_not_ranked() {
    let run = ConfigurationOptimizer::new(AnecParams::default()).run(&mixed_descriptors());

    assert_eq!(run.len(), 7);
    let failures = run.failures();
    assert_eq!(failures.len(), 3);
    assert!(matches!(
        failures[0].1,
        WormholeError::InvalidConfiguration { .. }
    ));
    assert!(matches!(
        failures[1].1,
        WormholeError::InvalidConfiguration { .. }
    ));
    assert!(matches!(
        failures[2].1,
        WormholeError::NonTraversableGeometry { .. }
    ));

    let ranked = run.ranked();
    assert_eq!(ranked.len(), 4);
    for (descriptor, _) in &ranked {
        assert!(descriptor.shape.parameter() > 0.0);
        assert!(descriptor.redshift.is_zero());
    }
}

#[test]
fn test_ranking_is_descending() {
    let run = ConfigurationOptimizer::new(AnecParams::default()).run(&mixed_descriptors());
    let ranked = run.ranked();
    for pair in ranked.windows(2) {
        assert!(pair[0].1.anec_value >= pair[1].1.anec_value);
    }
    assert_eq!(ranked[0].0.shape, ShapeFunction::Tanh { sigma: 0.1 });
    assert_eq!(ranked[3].0.shape, ShapeFunction::PowerLaw { n: 0.5 });

    let best = run.best(2);
    assert_eq!(best.len(), 2);
    assert_eq!(best[1].0.shape, ShapeFunction::Tanh { sigma: 0.2 });
    assert_eq!(run.best(100).len(), 4);
    assert_eq!(run.satisfied_count(), 3);
    assert_eq!(run.violated_count(), 1);
}

#[test]
fn test_input_order_preserved() {
    let descriptors = mixed_descriptors();
    let run = ConfigurationOptimizer::new(AnecParams::default()).run(&descriptors);
    for (e, d) in run.evaluations().iter().zip(&descriptors) {
        assert_eq!(&e.descriptor, d);
    }
}

#[test]
fn test_default_sweep_and_progress() {
    let progress = SweepProgress::new();
    let optimizer =
        ConfigurationOptimizer::new(AnecParams::default()).with_progress(progress.clone());
    let grid = ConfigurationOptimizer::grid(1.0, 5);
    assert_eq!(grid.len(), 15);

    let run = optimizer.run(&grid);
    assert!(run.failures().is_empty());

    let snap = progress.snapshot();
    assert_eq!(snap.total, 15);
    assert_eq!(snap.evaluated, 15);
    assert_eq!(snap.failed, 0);
    assert_eq!(snap.satisfied as usize, run.satisfied_count());
    assert_eq!(snap.stage, Stage::Ranking);

    // every tanh member satisfies, every sub-unity power law violates
    for (descriptor, result) in run.ranked() {
        match descriptor.shape.family() {
            ShapeFamily::Tanh => assert!(result.is_satisfied(), "{descriptor}"),
            ShapeFamily::PowerLaw => assert!(!result.is_satisfied(), "{descriptor}"),
            ShapeFamily::Exponential => {}
        }
    }
}

#[test]
fn test_json_dump() {
    let run = ConfigurationOptimizer::new(AnecParams::default()).run(&mixed_descriptors());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sweep.json");
    report::write_json(&path, &SweepReport::new(&run)).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["total"], 7);
    assert_eq!(value["failed"], 3);
    assert_eq!(value["satisfied"], 3);

    let rows = value["evaluations"].as_array().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[1]["error_kind"], "invalid_configuration");
    assert!(rows[1]["result"].is_null());
    assert!(rows[1]["rank"].is_null());
    assert_eq!(rows[6]["rank"], 1);
    assert_eq!(rows[6]["config"]["shape"]["family"], "tanh");
    assert_eq!(rows[6]["result"]["status"], "SATISFIED");
}

#[test]
fn test_json_to_missing_directory_fails() {
    let run = ConfigurationOptimizer::new(AnecParams::default()).run(&[]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("sweep.json");
    let err = report::write_json(&path, &SweepReport::new(&run)).unwrap_err();
    assert!(err.to_string().contains("Failed to create JSON output"));
}
