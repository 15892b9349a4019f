//! Prediction Engine Property Tests
//!
//! Exercises the public `predict` API against the invariants the calculator
//! promises: absent results for zero intake, exact DMI and cost totals, the
//! physiological ceiling, the live-weight-loss floor and the methane line.

use rivel::feed_library::load_feed_library;
use rivel::prediction_engine::{predict, round_to, summarize, ModelPreset};
use rivel::types::{AnimalState, FeedLibrary, ModelVariant};

fn both_variants() -> [(FeedLibrary, ModelPreset); 2] {
    [
        (load_feed_library(ModelVariant::Standard), ModelPreset::STANDARD),
        (load_feed_library(ModelVariant::Composition), ModelPreset::COMPOSITION),
    ]
}

/// Deterministic spread of rations, from sparse to very rich.
fn sample_rations(len: usize) -> Vec<Vec<f64>> {
    let mut rations = Vec::new();
    for seed in 0..40u32 {
        let ration: Vec<f64> = (0..len)
            .map(|i| {
                let step = (seed * 7 + i as u32 * 13) % 41;
                f64::from(step) * 0.5
            })
            .collect();
        rations.push(ration);
    }
    let mut single = vec![0.0; len];
    single[len - 1] = 0.5;
    rations.push(single);
    rations.push(vec![20.0; len]);
    rations
}

const COWS: [(f64, f64); 4] = [(400.0, 15.0), (560.0, 34.0), (650.0, 45.0), (750.0, 55.0)];

// ============================================================================
// Absent result
// ============================================================================

#[test]
fn zero_intake_is_absent_for_any_cow() {
    for (library, preset) in both_variants() {
        let zeros = vec![0.0; library.len()];
        for (weight, milk) in COWS {
            let cow = AnimalState::new(weight, milk);
            assert!(predict(&cow, &library, &zeros, &preset).is_none());
        }
    }
}

#[test]
fn composition_variant_all_zero_is_absent() {
    let library = load_feed_library(ModelVariant::Composition);
    let cow = AnimalState::new(560.0, 34.0);
    assert_eq!(
        predict(&cow, &library, &[0.0; 6], &ModelPreset::COMPOSITION),
        None
    );
}

// ============================================================================
// Totals
// ============================================================================

#[test]
fn dmi_equals_sum_of_intakes() {
    for (library, preset) in both_variants() {
        let cow = AnimalState::new(560.0, 34.0);
        for ration in sample_rations(library.len()) {
            let p = predict(&cow, &library, &ration, &preset).expect("non-zero ration");
            let sum: f64 = ration.iter().sum();
            assert_eq!(p.dmi_kg, sum);
            assert_eq!(summarize(&p).dmi_kg, round_to(sum, 1));
        }
    }
}

#[test]
fn cost_equals_dot_product() {
    for (library, preset) in both_variants() {
        let cow = AnimalState::new(560.0, 34.0);
        for ration in sample_rations(library.len()) {
            let p = predict(&cow, &library, &ration, &preset).expect("non-zero ration");
            let expected: f64 = library
                .iter()
                .zip(&ration)
                .map(|(feed, kg)| feed.cost_per_kg * kg)
                .sum();
            assert!((p.feed_cost - expected).abs() < 1e-9);
            assert_eq!(summarize(&p).feed_cost, round_to(expected, 2));
        }
    }
}

// ============================================================================
// Bounds
// ============================================================================

#[test]
fn milk_never_exceeds_physiological_ceiling() {
    for (library, preset) in both_variants() {
        for (weight, milk) in COWS {
            let cow = AnimalState::new(weight, milk);
            for ration in sample_rations(library.len()) {
                let p = predict(&cow, &library, &ration, &preset).expect("non-zero ration");
                assert!(
                    p.milk_yield_kg <= milk * preset.milk_ceiling_multiplier,
                    "{} kg exceeds ceiling for {milk} kg cow ({})",
                    p.milk_yield_kg,
                    preset.variant
                );
            }
        }
    }
}

#[test]
fn rich_ration_hits_ceiling() {
    let library = load_feed_library(ModelVariant::Standard);
    let cow = AnimalState::new(560.0, 20.0);
    let p = predict(&cow, &library, &vec![20.0; library.len()], &ModelPreset::STANDARD).unwrap();
    assert!((p.milk_yield_kg - 20.0 * 1.18).abs() < 1e-9);
}

#[test]
fn lwg_never_below_floor() {
    for (library, preset) in both_variants() {
        for (weight, milk) in COWS {
            let cow = AnimalState::new(weight, milk);
            for ration in sample_rations(library.len()) {
                let p = predict(&cow, &library, &ration, &preset).expect("non-zero ration");
                assert!(p.lwg_kg >= preset.lwg_floor_kg);
            }
        }
    }
}

#[test]
fn tiny_ration_on_heavy_cow_sits_on_floor() {
    // Energy balance must be below -28 × 1.2 MJ for the floor to bind
    let library = load_feed_library(ModelVariant::Standard);
    let cow = AnimalState::new(750.0, 55.0);
    let mut ration = vec![0.0; library.len()];
    ration[6] = 0.5;
    let p = predict(&cow, &library, &ration, &ModelPreset::STANDARD).unwrap();
    assert!(p.energy_balance_mj / 28.0 > -1.2, "precondition: floor not binding here");

    let starving = ModelPreset {
        energy_offset_mj: 40.0,
        ..ModelPreset::STANDARD
    };
    let p = predict(&cow, &library, &ration, &starving).unwrap();
    assert_eq!(p.lwg_kg, -1.2);
}

// ============================================================================
// Methane
// ============================================================================

#[test]
fn methane_is_linear_in_dmi() {
    for (library, preset) in both_variants() {
        let cow = AnimalState::new(560.0, 34.0);
        for dmi in [0.5_f64, 12.0, 17.5, 20.0] {
            let mut ration = vec![0.0; library.len()];
            ration[2] = dmi;
            let p = predict(&cow, &library, &ration, &preset).unwrap();
            let expected = (21.0 * dmi + preset.methane_offset_g).round_ties_even() as i64;
            assert_eq!(summarize(&p).methane_g, expected);
        }
    }
}

#[test]
fn methane_at_twenty_kg() {
    let cow = AnimalState::new(560.0, 34.0);
    let a = load_feed_library(ModelVariant::Standard);
    let mut ration = vec![0.0; a.len()];
    ration[0] = 20.0;
    let p = predict(&cow, &a, &ration, &ModelPreset::STANDARD).unwrap();
    assert_eq!(summarize(&p).methane_g, 600);

    let b = load_feed_library(ModelVariant::Composition);
    let p = predict(&cow, &b, &ration[..b.len()], &ModelPreset::COMPOSITION).unwrap();
    assert_eq!(summarize(&p).methane_g, 620);
}

// ============================================================================
// Scenario & purity
// ============================================================================

#[test]
fn spring_ryegrass_scenario_matches_hand_calculation() {
    let library = load_feed_library(ModelVariant::Standard);
    let cow = AnimalState::new(560.0, 34.0);
    let mut ration = vec![0.0; library.len()];
    ration[0] = 12.0;

    let p = predict(&cow, &library, &ration, &ModelPreset::STANDARD).unwrap();

    let me = 12.2 * 12.0;
    let maintenance = 0.08 * 560f64.powf(0.75);
    let from_me = f64::max(0.0, (me - maintenance - 10.0) / 5.0);
    let mp = 220.0 * 12.0 * 0.64 + me * 2.5;
    let milk = from_me.min(mp / 95.0).min(34.0 * 1.18);
    let fat = 4.1 + 0.04 * (0.23 * 12.0 / 12.0);
    let protein = 3.3 + 0.008 * (mp / milk);
    let solids = milk * (fat + protein) / 100.0;

    assert!((p.me_intake_mj - 146.4).abs() < 1e-9);
    assert!((p.milk_from_energy_kg - from_me).abs() < 1e-9);
    assert!((p.milk_yield_kg - milk).abs() < 1e-9);
    assert!((p.milk_solids_kg - solids).abs() < 1e-9);

    let s = summarize(&p);
    assert_eq!(s.dmi_kg, 12.0);
    assert_eq!(s.milk_solids_kg, round_to(solids, 2));
    assert_eq!(s.feed_cost, 2.76);
}

#[test]
fn predict_is_idempotent() {
    for (library, preset) in both_variants() {
        let cow = AnimalState::new(610.0, 38.5);
        for ration in sample_rations(library.len()) {
            let first = predict(&cow, &library, &ration, &preset);
            let second = predict(&cow, &library, &ration, &preset);
            assert_eq!(
                serde_json::to_vec(&first).unwrap(),
                serde_json::to_vec(&second).unwrap()
            );
        }
    }
}
