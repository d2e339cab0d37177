use std::collections::BTreeMap;

use proptest::prelude::*;
use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use tirage_engine::{ItemRange, RuleSet};
use tirage_scoring::{EntityScores, ScoreProfile};
use tirage_training::{Chromosome, FitnessEvaluator, GridGenerator};

fn rules(primary_count: usize, secondary_count: usize) -> RuleSet {
    RuleSet {
        primary_count,
        primary_range: ItemRange::new(1, 50),
        secondary_count,
        secondary_range: ItemRange::new(1, 12),
        ..RuleSet::default()
    }
}

fn scores() -> impl Strategy<Value = EntityScores> {
    (
        prop::collection::btree_map(1..=50u32, 0.01f32..100.0, 1..20),
        prop::collection::btree_map(1..=12u32, 0.01f32..100.0, 1..6),
    )
        .prop_map(|(primary, secondary)| EntityScores::new(primary, secondary))
}

fn weights(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(0.01f32..1.0, len)
}

proptest! {
    #[test]
    fn grids_are_sorted_unique_and_bounded(
        profile in prop::collection::vec(scores(), 1..4),
        primary_count in 0..=5usize,
        secondary_count in 0..=2usize,
        seed: u64,
    ) {
        let len = profile.len();
        let primary_keys = profile
            .iter()
            .flat_map(|s| s.primary.keys().copied())
            .collect::<Vec<_>>();
        let profile = ScoreProfile::new(profile);
        let rules = rules(primary_count, secondary_count);
        let generator = GridGenerator::new(&profile, &rules);
        let mut rng = Pcg64::seed_from_u64(seed);
        let chromosome = Chromosome::new(vec![0.5; len]);

        for _ in 0..10 {
            let grid = generator.generate(&chromosome, &mut rng).unwrap();
            prop_assert!(grid.primary().windows(2).all(|w| w[0] < w[1]));
            prop_assert!(grid.secondary().windows(2).all(|w| w[0] < w[1]));
            prop_assert!(grid.primary().len() <= primary_count);
            prop_assert!(grid.secondary().len() <= secondary_count);
            prop_assert!(grid.primary().iter().all(|n| primary_keys.contains(n)));
            prop_assert!(grid.secondary().iter().all(|n| (1..=12).contains(n)));
            if primary_count > 0 {
                prop_assert!(!grid.primary().is_empty());
            }
        }
    }

    #[test]
    fn aggregate_is_linear_in_weights(
        profile in prop::collection::vec(scores(), 2..4),
        scale in 0.1f32..10.0,
    ) {
        let len = profile.len();
        let profile = ScoreProfile::new(profile);
        let rules = rules(5, 2);
        let generator = GridGenerator::new(&profile, &rules);
        let base = generator.aggregate(&Chromosome::new(vec![1.0; len]));
        let scaled = generator.aggregate(&Chromosome::new(vec![scale; len]));
        let expected = base
            .primary
            .iter()
            .map(|(&item, &score)| (item, score * scale))
            .collect::<BTreeMap<_, _>>();
        prop_assert_eq!(scaled.primary.len(), expected.len());
        for (item, score) in &scaled.primary {
            let want = expected[item];
            prop_assert!((score - want).abs() <= want.abs() * 1e-4 + 1e-4);
        }
    }

    #[test]
    fn fitness_stays_within_grid_size(
        profile in prop::collection::vec(scores(), 1..4),
        seed: u64,
    ) {
        let len = profile.len();
        let profile = ScoreProfile::new(profile);
        let rules = rules(5, 2);
        let generator = GridGenerator::new(&profile, &rules);
        let mut rng = Pcg64::seed_from_u64(seed);
        let chromosome = Chromosome::random(&mut rng, len);
        let fitness = FitnessEvaluator::new(20)
            .evaluate(&generator, &chromosome, &mut rng);
        // a random weight of exactly zero on every module is the only failure mode
        if let Ok(fitness) = fitness {
            prop_assert!(fitness >= 1.0);
            prop_assert!(fitness <= 7.0);
        }
    }

    #[test]
    fn chromosome_length_matches_module_count(len in 0..32usize, seed: u64) {
        let chromosome = Chromosome::random(&mut Pcg64::seed_from_u64(seed), len);
        prop_assert_eq!(chromosome.len(), len);
        prop_assert!(chromosome.weights().iter().all(|w| (0.0..1.0).contains(w)));
    }
}

proptest! {
    #[test]
    fn positive_weights_always_sample(weights in weights(3), seed: u64) {
        let rules = rules(5, 2);
        let profile = ScoreProfile::new(vec![
            EntityScores::from_fn(&rules, |_, _| 1.0),
            EntityScores::from_fn(&rules, |_, item| if item % 2 == 0 { 2.0 } else { 1.0 }),
            EntityScores::default(),
        ]);
        let generator = GridGenerator::new(&profile, &rules);
        let grid = generator
            .generate(&Chromosome::new(weights), &mut Pcg64::seed_from_u64(seed));
        prop_assert!(grid.is_ok());
    }
}
