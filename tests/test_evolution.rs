use genblend::{
    blend::Blender,
    breeding::ChildBuilder,
    bundle::{Chord, FeatureBundle, MelodicEvent},
    error::GeneticError,
    evolution::{BlendChallenge, Challenge, EvolutionLauncher, EvolutionOptions, LogLevel},
    fitness::BlendWeights,
    rng::RandomNumberGenerator,
    scale::{KeySignature, TimeSignature},
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Three ascending notes, one chord, uniform rhythm.
fn minimal_source() -> FeatureBundle {
    FeatureBundle {
        melody: vec![
            MelodicEvent::note(60, 1.0),
            MelodicEvent::note(62, 1.0),
            MelodicEvent::note(64, 1.0),
        ],
        motifs: Vec::new(),
        chords: vec![Chord::new(vec![60, 64, 67], 1.0)],
        chord_blocks: Vec::new(),
        rhythm: vec![1.0, 1.0, 1.0],
        rhythm_profile: vec![1.0, 1.0, 1.0],
        chromatic_intervals: vec![2, 2],
        key_signature: KeySignature::c_major(),
        time_signature: TimeSignature::new(4, 4),
        tempo: 120.0,
    }
}

fn melodic_source() -> FeatureBundle {
    FeatureBundle::builder()
        .tempo(96.0)
        .note(60, 1.0)
        .note(64, 1.0)
        .note(67, 1.0)
        .note(64, 1.0)
        .chord(vec![48, 52, 55], 4.0)
        .note(65, 1.0)
        .note(69, 1.0)
        .note(72, 1.0)
        .note(69, 1.0)
        .chord(vec![53, 57, 60], 4.0)
        .note(67, 2.0)
        .note(65, 1.0)
        .note(64, 1.0)
        .chord(vec![55, 59, 62], 4.0)
        .build()
}

fn stepwise_source() -> FeatureBundle {
    FeatureBundle::builder()
        .tempo(132.0)
        .time_signature(TimeSignature::new(3, 4))
        .note(72, 0.5)
        .note(71, 0.5)
        .note(69, 0.5)
        .note(71, 0.5)
        .rest(1.0)
        .chord(vec![57, 60, 64], 3.0)
        .note(72, 1.0)
        .note(74, 1.0)
        .note(72, 1.0)
        .chord(vec![50, 53, 57], 3.0)
        .build()
}

#[test]
fn test_identical_minimal_sources_converge() {
    init_tracing();
    let mut rng = RandomNumberGenerator::from_seed(20);
    let source = minimal_source();
    let challenge = BlendChallenge::new(&source, &source, BlendWeights::unchecked(0.5, 0.5));
    let launcher = EvolutionLauncher::new(ChildBuilder::default(), challenge);

    let options = EvolutionOptions::builder()
        .num_generations(10)
        .population_size(20)
        .log_level(LogLevel::Minimal)
        .build();
    let population = launcher.init_population(&source, &source, 20, &mut rng);
    let best = launcher.evolve(population, &options, &mut rng).unwrap();

    assert!(best.score > 0.9, "best score {}", best.score);
    assert_eq!(best.score, challenge.score(&best.pheno));
}

#[test]
fn test_best_fitness_never_regresses() {
    init_tracing();
    let mut rng = RandomNumberGenerator::from_seed(33);
    let (s1, s2) = (melodic_source(), stepwise_source());
    let challenge = BlendChallenge::new(&s1, &s2, BlendWeights::unchecked(0.6, 0.4));
    let launcher = EvolutionLauncher::new(ChildBuilder::default(), challenge);

    let options = EvolutionOptions::builder()
        .num_generations(20)
        .population_size(30)
        .log_level(LogLevel::Verbose)
        .build();
    let population = launcher.init_population(&s1, &s2, 30, &mut rng);
    let report = launcher
        .evolve_with_history(population, &options, &mut rng)
        .unwrap();

    assert_eq!(report.history.len(), 20);
    for pair in report.history.windows(2) {
        assert!(
            pair[1].best_score >= pair[0].best_score,
            "generation {} regressed: {} -> {}",
            pair[1].generation,
            pair[0].best_score,
            pair[1].best_score
        );
    }
    assert!(report.best.score >= report.history[19].best_score);
    assert!(report
        .history
        .iter()
        .all(|stats| stats.elite_size == 6 && stats.mean_score <= stats.best_score + 1e-12));
}

#[test]
fn test_tiny_population_keeps_two_survivors() {
    let mut rng = RandomNumberGenerator::from_seed(8);
    let (s1, s2) = (melodic_source(), stepwise_source());
    let challenge = BlendChallenge::new(&s1, &s2, BlendWeights::default());
    let launcher = EvolutionLauncher::new(ChildBuilder::default(), challenge);

    let options = EvolutionOptions::builder()
        .num_generations(4)
        .population_size(3)
        .build();
    let population = launcher.init_population(&s1, &s2, 3, &mut rng);
    let report = launcher
        .evolve_with_history(population, &options, &mut rng)
        .unwrap();
    assert!(report.history.iter().all(|stats| stats.elite_size == 2));
}

#[test]
fn test_blender_end_to_end() {
    init_tracing();
    let (s1, s2) = (melodic_source(), stepwise_source());
    let options = EvolutionOptions::builder()
        .num_generations(8)
        .population_size(24)
        .build();
    let blender = Blender::new(options);

    let mut rng = RandomNumberGenerator::from_seed(7);
    let outcome = blender.blend(&s1, &s2, 0.75, &mut rng).unwrap();

    assert!((0.0..=1.0 + 1e-9).contains(&outcome.score));
    assert!((outcome.tempo - (96.0 * 0.75 + 132.0 * 0.25)).abs() < 1e-9);
    assert_eq!(outcome.time_signature, TimeSignature::new(4, 4));
    assert_eq!(outcome.history.len(), 8);
    assert_eq!(outcome.best.rhythm.len(), outcome.best.melody.len());

    // the sources are only borrowed
    assert_eq!(s1, melodic_source());
    assert_eq!(s2, stepwise_source());
}

#[test]
fn test_blender_is_reproducible_with_seed() {
    let (s1, s2) = (melodic_source(), stepwise_source());
    let options = EvolutionOptions::builder()
        .num_generations(5)
        .population_size(16)
        .build();
    let blender = Blender::new(options);

    let a = blender
        .blend(&s1, &s2, 0.3, &mut RandomNumberGenerator::from_seed(55))
        .unwrap();
    let b = blender
        .blend(&s1, &s2, 0.3, &mut RandomNumberGenerator::from_seed(55))
        .unwrap();
    assert_eq!(a.best, b.best);
    assert_eq!(a.score, b.score);
}

#[test]
fn test_blender_rejects_out_of_range_weight() {
    let source = minimal_source();
    let blender = Blender::new(EvolutionOptions::default());
    let mut rng = RandomNumberGenerator::from_seed(1);

    match blender.blend(&source, &source, -0.2, &mut rng) {
        Err(GeneticError::InvalidWeights(msg)) => assert!(msg.contains("-0.2")),
        other => panic!("Expected InvalidWeights error, got {:?}", other.map(|o| o.score)),
    }
}
