use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use tirage_engine::{GameRules, HistoricalDraw, ItemRange, Pool, RuleSet};
use tirage_scoring::{
    BoxedScoringModule, EntityScores, ModuleError, ModuleManager, ScoreProfile, ScoringModule,
    builtin::{self, Uniform},
};
use tirage_training::{
    Chromosome, GeneticParams, GridGenerator, SearchStrategy, StopCondition, TrainingConfig,
    TrainingError, train_on_draws,
};

/// Module that scores nothing.
#[derive(Debug, Clone)]
struct EmptyScores(&'static str);

impl ScoringModule for EmptyScores {
    fn id(&self) -> &str {
        self.0
    }

    fn name(&self) -> String {
        self.0.to_owned()
    }

    fn clone_boxed(&self) -> BoxedScoringModule {
        Box::new(self.clone())
    }

    fn entity_scores(
        &self,
        _draws: &[HistoricalDraw],
        _rules: &RuleSet,
    ) -> Result<EntityScores, ModuleError> {
        Ok(EntityScores::default())
    }
}

fn synthetic_draws(count: u32) -> Vec<HistoricalDraw> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 3).unwrap();
    (0..count)
        .map(|i| {
            let primary = (0..5).map(|k| (i * 7 + k * 11) % 50 + 1).collect();
            let secondary = vec![i % 12 + 1, (i + 5) % 12 + 1];
            HistoricalDraw::new(start + chrono::Days::new(u64::from(i) * 3), primary, secondary)
        })
        .collect()
}

#[test]
fn empty_modules_cannot_sample() {
    let rules = RuleSet {
        primary_count: 5,
        primary_range: ItemRange::new(1, 50),
        secondary_count: 2,
        secondary_range: ItemRange::new(1, 12),
        ..RuleSet::default()
    };
    let mut modules = ModuleManager::default();
    for id in ["a", "b", "c"] {
        modules.push(EmptyScores(id));
    }
    let err = train_on_draws(
        &synthetic_draws(10),
        &rules,
        &modules,
        &TrainingConfig::default(),
        &mut Pcg64::seed_from_u64(0),
    )
    .unwrap_err();
    assert!(matches!(err, TrainingError::InvalidSamplingWeights(e) if e.pool == Pool::Primary));
}

#[test]
fn sampling_follows_aggregated_scores() {
    let rules = RuleSet {
        primary_count: 1,
        primary_range: ItemRange::new(1, 2),
        ..RuleSet::default()
    };
    let profile = ScoreProfile::new(vec![EntityScores::new(
        BTreeMap::from([(1, 10.0), (2, 1.0)]),
        BTreeMap::new(),
    )]);
    let generator = GridGenerator::new(&profile, &rules);
    let chromosome = Chromosome::new(vec![1.0]);
    let mut rng = Pcg64::seed_from_u64(2024);

    let trials = 10_000;
    let mut ones = 0;
    for _ in 0..trials {
        let grid = generator.generate(&chromosome, &mut rng).unwrap();
        assert!(grid.secondary().is_empty());
        if grid.primary() == [1] {
            ones += 1;
        }
    }
    let frequency = f64::from(ones) / f64::from(trials);
    assert!((frequency - 10.0 / 11.0).abs() < 0.05, "frequency {frequency}");
}

#[test]
fn uniform_module_end_to_end() {
    let rules = GameRules::lookup("euromillions");
    let mut modules = ModuleManager::default();
    modules.push(Uniform);
    let config = TrainingConfig {
        generations: 10,
        ..TrainingConfig::default()
    };
    let outcome = train_on_draws(
        &synthetic_draws(20),
        &rules,
        &modules,
        &config,
        &mut Pcg64::seed_from_u64(7),
    )
    .unwrap();

    let primary = outcome.final_grid.primary();
    assert!((1..=5).contains(&primary.len()));
    assert!(primary.iter().all(|n| (1..=50).contains(n)));
    assert!(primary.is_sorted_by(|a, b| a < b));
    assert!(outcome.final_grid.secondary().iter().all(|n| (1..=12).contains(n)));
    assert_eq!(outcome.module_weights.len(), 1);
    assert_eq!(outcome.module_weights[0].0, "Uniform");
    assert_eq!(outcome.best.chromosome.len(), 1);
    assert!((0.0..=7.0).contains(&outcome.best.fitness));
}

#[test]
fn seeded_training_is_reproducible() {
    let rules = GameRules::lookup("euromillions");
    let modules = ModuleManager::new(builtin::all_scoring_modules());
    let draws = synthetic_draws(60);
    let config = TrainingConfig {
        generations: 6,
        population_size: 4,
        ..TrainingConfig::default()
    };
    let run = |seed| {
        train_on_draws(&draws, &rules, &modules, &config, &mut Pcg64::seed_from_u64(seed))
            .unwrap()
    };
    let a = run(99);
    let b = run(99);
    assert_eq!(a.best, b.best);
    assert_eq!(a.final_grid, b.final_grid);
    assert_eq!(a.module_weights, b.module_weights);
    assert_eq!(a.best.chromosome.len(), modules.len());
}

#[test]
fn best_fitness_is_monotonic() {
    let rules = GameRules::lookup("loto");
    let modules = ModuleManager::new(builtin::builtin_scoring_modules());
    let draws = synthetic_draws(30)
        .into_iter()
        .map(|d| {
            let secondary = vec![d.secondary[0] % 10 + 1];
            let primary = d.primary.iter().map(|n| (n - 1) % 49 + 1).collect();
            HistoricalDraw::new(d.date, primary, secondary)
        })
        .collect::<Vec<_>>();
    for strategy in [
        SearchStrategy::RandomRestart,
        SearchStrategy::Genetic(GeneticParams::default()),
    ] {
        let config = TrainingConfig {
            generations: 12,
            population_size: 5,
            strategy,
            ..TrainingConfig::default()
        };
        let outcome =
            train_on_draws(&draws, &rules, &modules, &config, &mut Pcg64::seed_from_u64(3))
                .unwrap();
        assert_eq!(outcome.generations_run, 12);
        assert!(
            outcome
                .history
                .windows(2)
                .all(|w| w[0].best_fitness <= w[1].best_fitness)
        );
        assert_eq!(outcome.history[11].best_fitness, outcome.best.fitness);
    }
}

#[test]
fn evaluation_budget_stops_training() {
    let rules = GameRules::lookup("euromillions");
    let mut modules = ModuleManager::default();
    modules.push(Uniform);
    let config = TrainingConfig {
        generations: 100,
        population_size: 3,
        stop: StopCondition::default().with_max_evaluations(10),
        ..TrainingConfig::default()
    };
    let outcome = train_on_draws(
        &synthetic_draws(20),
        &rules,
        &modules,
        &config,
        &mut Pcg64::seed_from_u64(1),
    )
    .unwrap();
    assert!(outcome.stopped_early);
    assert_eq!(outcome.evaluations, 10);
    assert_eq!(outcome.generations_run, 3);
}

#[test]
fn generation_cap_is_only_an_upper_bound() {
    let rules = GameRules::lookup("euromillions");
    let mut modules = ModuleManager::default();
    modules.push(Uniform);
    let config = TrainingConfig {
        generations: usize::MAX,
        stop: StopCondition::default().with_max_evaluations(3),
        ..TrainingConfig::default()
    };
    let outcome = train_on_draws(
        &synthetic_draws(10),
        &rules,
        &modules,
        &config,
        &mut Pcg64::seed_from_u64(4),
    )
    .unwrap();
    assert!(outcome.stopped_early);
    assert_eq!(outcome.evaluations, 3);
    assert_eq!(outcome.generations_run, 2);
}

#[test]
fn failing_module_aborts_training() {
    #[derive(Debug, Clone)]
    struct Negative;

    impl ScoringModule for Negative {
        fn id(&self) -> &str {
            "negative"
        }

        fn name(&self) -> String {
            "Negative".to_owned()
        }

        fn clone_boxed(&self) -> BoxedScoringModule {
            Box::new(self.clone())
        }

        fn entity_scores(
            &self,
            _draws: &[HistoricalDraw],
            rules: &RuleSet,
        ) -> Result<EntityScores, ModuleError> {
            Ok(EntityScores::from_fn(rules, |_, _| -1.0))
        }
    }

    let rules = GameRules::lookup("euromillions");
    let mut modules = ModuleManager::default();
    modules.push(Uniform);
    modules.push(Negative);
    let err = train_on_draws(
        &synthetic_draws(5),
        &rules,
        &modules,
        &TrainingConfig::default(),
        &mut Pcg64::seed_from_u64(0),
    )
    .unwrap_err();
    assert!(matches!(err, TrainingError::InvalidModuleOutput(e) if e.module == "Negative"));
}
