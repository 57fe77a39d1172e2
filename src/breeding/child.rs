use std::fmt::Debug;

use tracing::trace;

use super::crossover::{chord_block_crossover, melody_crossover};
use super::mutation::{mutate_pitch, mutate_rhythm, MutationRates};
use super::BreedStrategy;
use crate::bundle::{chromatic_intervals, melody_rhythm, FeatureBundle};
use crate::rng::RandomNumberGenerator;
use crate::scale::{DiatonicScale, ScaleProvider};

/// # ChildBuilder
///
/// Produces one offspring from two parents:
///
/// 1. look up the scale pitches of `parent1`'s key,
/// 2. clone `parent1` as the template (every sequence is an owned copy),
/// 3. replace melody and chords by crossover,
/// 4. rebuild `rhythm` from the new melody's durations,
/// 5. mutate rhythm (palette: `parent1`'s rhythm profile) and pitches (palette: the scale),
/// 6. recompute `chromatic_intervals` from the mutated melody.
///
/// The template keeps `parent1`'s motifs and chord blocks untouched.
///
/// ## Example
///
/// ```rust
/// use genblend::breeding::ChildBuilder;
/// use genblend::bundle::FeatureBundle;
/// use genblend::rng::RandomNumberGenerator;
///
/// let parent = FeatureBundle::builder()
///     .note(60, 1.0)
///     .note(62, 1.0)
///     .note(64, 1.0)
///     .build();
/// let mut rng = RandomNumberGenerator::from_seed(1);
///
/// let child = ChildBuilder::default().build_child(&parent, &parent, &mut rng);
/// assert_eq!(child.rhythm.len(), child.melody.len());
/// ```
#[derive(Debug, Clone)]
pub struct ChildBuilder<S = DiatonicScale> {
    scale_provider: S,
    rates: MutationRates,
}

impl<S: ScaleProvider> ChildBuilder<S> {
    pub fn new(scale_provider: S) -> Self {
        Self {
            scale_provider,
            rates: MutationRates::default(),
        }
    }

    pub fn with_rates(mut self, rates: MutationRates) -> Self {
        self.rates = rates;
        self
    }

    pub fn rates(&self) -> MutationRates {
        self.rates
    }

    pub fn build_child(
        &self,
        parent1: &FeatureBundle,
        parent2: &FeatureBundle,
        rng: &mut RandomNumberGenerator,
    ) -> FeatureBundle {
        let scale = self.scale_provider.scale_pitches(&parent1.key_signature);

        let mut child = parent1.clone();
        child.melody = melody_crossover(parent1, parent2, rng);
        child.chords = chord_block_crossover(parent1, parent2, rng);
        child.rhythm = melody_rhythm(&child.melody);

        mutate_rhythm(
            &mut child.rhythm,
            &parent1.rhythm_profile,
            self.rates.rhythm,
            rng,
        );
        mutate_pitch(&mut child.melody, &scale, self.rates.pitch, rng);
        child.chromatic_intervals = chromatic_intervals(&child.melody);

        trace!(
            melody = child.melody.len(),
            chords = child.chords.len(),
            "built child"
        );
        child
    }
}

impl Default for ChildBuilder<DiatonicScale> {
    fn default() -> Self {
        Self::new(DiatonicScale::default())
    }
}

impl<S> BreedStrategy<FeatureBundle> for ChildBuilder<S>
where
    S: ScaleProvider + Debug + Send + Sync,
{
    fn breed(
        &self,
        parent1: &FeatureBundle,
        parent2: &FeatureBundle,
        rng: &mut RandomNumberGenerator,
    ) -> FeatureBundle {
        self.build_child(parent1, parent2, rng)
    }
}
