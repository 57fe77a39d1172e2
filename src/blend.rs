//! # Blender
//!
//! The outer entry point: validates the caller's weight, breeds an initial
//! population from the two sources, evolves it, and hands back the winner
//! together with the tempo and meter a renderer needs.
//!
//! ```rust
//! use genblend::blend::Blender;
//! use genblend::bundle::FeatureBundle;
//! use genblend::evolution::EvolutionOptions;
//! use genblend::rng::RandomNumberGenerator;
//!
//! let source = FeatureBundle::builder()
//!     .note(60, 1.0)
//!     .note(62, 1.0)
//!     .note(64, 1.0)
//!     .chord(vec![48, 52, 55], 3.0)
//!     .build();
//!
//! let options = EvolutionOptions::builder()
//!     .num_generations(5)
//!     .population_size(20)
//!     .build();
//! let blender = Blender::new(options);
//! let mut rng = RandomNumberGenerator::from_seed(42);
//!
//! let outcome = blender.blend(&source, &source, 0.5, &mut rng).unwrap();
//! assert!(outcome.score >= 0.0 && outcome.score <= 1.0 + 1e-9);
//! assert_eq!(outcome.tempo, 120.0);
//! ```

use std::fmt::Debug;

use tracing::info;

use crate::breeding::ChildBuilder;
use crate::bundle::FeatureBundle;
use crate::error::Result;
use crate::evolution::{BlendChallenge, EvolutionLauncher, EvolutionOptions, GenerationStats};
use crate::fitness::BlendWeights;
use crate::rng::RandomNumberGenerator;
use crate::scale::{DiatonicScale, ScaleProvider, TimeSignature};

/// Everything produced by one blending run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone)]
pub struct BlendOutcome {
    pub best: FeatureBundle,
    pub score: f64,
    /// Weighted average of the source tempos, in BPM.
    pub tempo: f64,
    pub time_signature: TimeSignature,
    pub history: Vec<GenerationStats>,
}

impl BlendOutcome {
    /// The score rounded to four decimal places, for display.
    pub fn rounded_score(&self) -> f64 {
        (self.score * 10_000.0).round() / 10_000.0
    }
}

/// Runs the full initialize-then-evolve pipeline.
#[derive(Debug, Clone)]
pub struct Blender<S = DiatonicScale> {
    options: EvolutionOptions,
    child_builder: ChildBuilder<S>,
}

impl Blender<DiatonicScale> {
    pub fn new(options: EvolutionOptions) -> Self {
        Self::with_child_builder(options, ChildBuilder::default())
    }
}

impl<S> Blender<S>
where
    S: ScaleProvider + Debug + Send + Sync,
{
    pub fn with_child_builder(options: EvolutionOptions, child_builder: ChildBuilder<S>) -> Self {
        Self {
            options,
            child_builder,
        }
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    /// Blends `source1` (weight `w1`) with `source2` (weight `1 - w1`).
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidWeights` when `w1` is outside `[0, 1]`,
    /// and configuration errors from [`EvolutionOptions::validate`].
    pub fn blend(
        &self,
        source1: &FeatureBundle,
        source2: &FeatureBundle,
        w1: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<BlendOutcome> {
        let weights = BlendWeights::new(w1)?;
        self.options.validate()?;

        let challenge = BlendChallenge::new(source1, source2, weights);
        let launcher = EvolutionLauncher::new(&self.child_builder, challenge);

        let population = launcher.init_population(
            source1,
            source2,
            self.options.get_population_size(),
            rng,
        );
        let report = launcher.evolve_with_history(population, &self.options, rng)?;

        let outcome = BlendOutcome {
            tempo: weighted_tempo(source1, source2, weights),
            time_signature: dominant_time_signature(source1, source2, weights),
            score: report.best.score,
            best: report.best.pheno,
            history: report.history,
        };

        info!(
            score = outcome.rounded_score(),
            tempo = outcome.tempo,
            time_signature = %outcome.time_signature,
            "blend complete"
        );
        Ok(outcome)
    }
}

/// Weighted average of the two source tempos.
pub fn weighted_tempo(source1: &FeatureBundle, source2: &FeatureBundle, weights: BlendWeights) -> f64 {
    (source1.tempo * weights.w1 + source2.tempo * weights.w2) / (weights.w1 + weights.w2)
}

/// The meter of the more heavily weighted source.
///
/// On equal weights the source whose `"n/d"` string sorts greater or equal
/// wins, with `source1` taking exact ties.
pub fn dominant_time_signature(
    source1: &FeatureBundle,
    source2: &FeatureBundle,
    weights: BlendWeights,
) -> TimeSignature {
    if weights.w1 > weights.w2 {
        return source1.time_signature;
    }
    if weights.w2 > weights.w1 {
        return source2.time_signature;
    }
    if source1.time_signature.ratio_string() >= source2.time_signature.ratio_string() {
        source1.time_signature
    } else {
        source2.time_signature
    }
}
