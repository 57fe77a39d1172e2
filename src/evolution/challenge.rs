use crate::bundle::FeatureBundle;
use crate::fitness::{breakdown, fitness, BlendWeights, FitnessBreakdown};

/// Scores one individual; higher is better.
pub trait Challenge<P> {
    fn score(&self, phenotype: &P) -> f64;
}

/// Scores candidates against the weighted blend of two source bundles.
///
/// The sources are borrowed for the whole run and never modified.
#[derive(Debug, Clone, Copy)]
pub struct BlendChallenge<'a> {
    source1: &'a FeatureBundle,
    source2: &'a FeatureBundle,
    weights: BlendWeights,
}

impl<'a> BlendChallenge<'a> {
    pub fn new(
        source1: &'a FeatureBundle,
        source2: &'a FeatureBundle,
        weights: BlendWeights,
    ) -> Self {
        Self {
            source1,
            source2,
            weights,
        }
    }

    pub fn sources(&self) -> (&'a FeatureBundle, &'a FeatureBundle) {
        (self.source1, self.source2)
    }

    pub fn weights(&self) -> BlendWeights {
        self.weights
    }

    /// The partial scores behind [`Challenge::score`].
    pub fn breakdown(&self, candidate: &FeatureBundle) -> FitnessBreakdown {
        breakdown(
            candidate,
            self.source1,
            self.source2,
            self.weights.w1,
            self.weights.w2,
        )
    }
}

impl Challenge<FeatureBundle> for BlendChallenge<'_> {
    fn score(&self, phenotype: &FeatureBundle) -> f64 {
        fitness(
            phenotype,
            self.source1,
            self.source2,
            self.weights.w1,
            self.weights.w2,
        )
    }
}
