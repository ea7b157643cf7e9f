//! Integration tests for the r <-> l coordinate map across the catalog.

use wormhole_anec::model::coordinate_map::{CoordinateMap, MapSettings};
use wormhole_anec::{MorrisThorneMetric, ShapeFamily, ShapeFunction, WormholeConfig};

fn settings(l0: f64, factor: f64) -> MapSettings {
    MapSettings {
        r_max: factor * l0,
        epsilon: 1e-6 * l0,
        samples: 2000,
        tolerance: 1e-10,
    }
}

#[test]
fn test_round_trip_over_catalog() {
    for family in ShapeFamily::ALL {
        for p in family.default_grid(6) {
            for l0 in [0.5, 1.0, 4.0] {
                let shape = ShapeFunction::new(family, p).unwrap();
                let metric = MorrisThorneMetric::new(WormholeConfig::new(shape, l0)).unwrap();
                let map = CoordinateMap::build(&metric, settings(l0, 3.0)).unwrap();
                for i in 0..=200 {
                    let r = l0 + 2.0 * l0 * i as f64 / 200.0;
                    let back = map.r_of_l(map.l_of_r(r));
                    assert!(
                        (back - r).abs() / r < 1e-3,
                        "{shape} l0={l0}: r={r} -> {back}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_power_law_n1_matches_closed_form() {
    let l0 = 2.0;
    let metric =
        MorrisThorneMetric::new(WormholeConfig::new(ShapeFunction::PowerLaw { n: 1.0 }, l0))
            .unwrap();
    let map = CoordinateMap::build(&metric, settings(l0, 3.0)).unwrap();
    for i in 1..=50 {
        let r = l0 + 4.0 * i as f64 / 50.0;
        let exact = (r * r - l0 * l0).sqrt();
        let got = map.l_of_r(r);
        assert!((got - exact).abs() < 1e-4 * exact, "r={r}: {got} vs {exact}");
    }
}

#[test]
fn test_clamps_beyond_table() {
    let metric =
        MorrisThorneMetric::new(WormholeConfig::new(ShapeFunction::Tanh { sigma: 0.3 }, 1.0))
            .unwrap();
    let map = CoordinateMap::build(&metric, settings(1.0, 3.0)).unwrap();
    assert_eq!(map.l_of_r(10.0), map.l_max());
    assert_eq!(map.r_of_l(100.0), map.r_max());
    assert_eq!(map.r_of_l(-100.0), map.r_max());
    assert_eq!(map.l_of_r(0.5), 0.0);
}

#[test]
fn test_scales_with_throat_radius() {
    // every catalog family is self-similar in r/l0 except the exponential
    let shape = ShapeFunction::Tanh { sigma: 0.2 };
    let small = CoordinateMap::build(
        &MorrisThorneMetric::new(WormholeConfig::new(shape, 1.0)).unwrap(),
        settings(1.0, 3.0),
    )
    .unwrap();
    let large = CoordinateMap::build(
        &MorrisThorneMetric::new(WormholeConfig::new(shape, 5.0)).unwrap(),
        settings(5.0, 3.0),
    )
    .unwrap();
    assert!((large.l_max() / small.l_max() - 5.0).abs() < 1e-6);
}
