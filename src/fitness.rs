//! # Fitness
//!
//! Scores a candidate bundle against two source bundles blended by weights
//! `w1` and `w2`. The score combines four partial similarities, each floored
//! at zero:
//!
//! | term | weight | compares |
//! |------|--------|----------|
//! | motif     | 0.30 | pitch-delta contours of the melodies |
//! | harmonic  | 0.30 | sets of chord root pitch classes |
//! | rhythmic  | 0.30 | duration sequences |
//! | chromatic | 0.10 | mean chromatic interval against the weighted target |
//!
//! Empty melodies, chord lists or rhythms never fail; the affected term scores
//! 0 (or 1 for a zero chromatic target), so degenerate candidates are ranked
//! low rather than rejected.
//!
//! ```rust
//! use genblend::bundle::FeatureBundle;
//! use genblend::fitness::fitness;
//!
//! let source = FeatureBundle::builder()
//!     .note(60, 1.0)
//!     .note(62, 1.0)
//!     .note(64, 1.0)
//!     .chord(vec![60, 64, 67], 1.0)
//!     .build();
//!
//! let score = fitness(&source, &source, &source, 0.5, 0.5);
//! assert!(score > 0.99 && score <= 1.0 + 1e-9);
//! ```

use crate::bundle::FeatureBundle;
use crate::error::{GeneticError, Result};

pub const MOTIF_WEIGHT: f64 = 0.30;
pub const HARMONIC_WEIGHT: f64 = 0.30;
pub const RHYTHMIC_WEIGHT: f64 = 0.30;
pub const CHROMATIC_WEIGHT: f64 = 0.10;

/// Keeps the rhythmic baseline strictly positive.
const RHYTHM_EPSILON: f64 = 1e-6;

/// The two blend coefficients.
///
/// The engine itself accepts any pair; [`BlendWeights::new`] is the checked
/// constructor used at the outer boundary.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendWeights {
    pub w1: f64,
    pub w2: f64,
}

impl BlendWeights {
    /// Builds `(w1, 1 - w1)`, rejecting `w1` outside `[0, 1]`.
    pub fn new(w1: f64) -> Result<Self> {
        if !w1.is_finite() || !(0.0..=1.0).contains(&w1) {
            return Err(GeneticError::InvalidWeights(format!(
                "w1 must lie in [0, 1], got {}",
                w1
            )));
        }
        Ok(Self { w1, w2: 1.0 - w1 })
    }

    /// Builds the pair as given, without validation.
    pub fn unchecked(w1: f64, w2: f64) -> Self {
        Self { w1, w2 }
    }

    /// The same blend seen from the other source.
    pub fn swapped(self) -> Self {
        Self {
            w1: self.w2,
            w2: self.w1,
        }
    }
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self { w1: 0.5, w2: 0.5 }
    }
}

/// The four partial scores behind a fitness value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessBreakdown {
    pub motif: f64,
    pub harmonic: f64,
    pub rhythmic: f64,
    pub chromatic: f64,
}

impl FitnessBreakdown {
    pub fn total(&self) -> f64 {
        MOTIF_WEIGHT * self.motif
            + HARMONIC_WEIGHT * self.harmonic
            + RHYTHMIC_WEIGHT * self.rhythmic
            + CHROMATIC_WEIGHT * self.chromatic
    }
}

/// Scores `candidate` against the weighted blend of `source1` and `source2`.
pub fn fitness(
    candidate: &FeatureBundle,
    source1: &FeatureBundle,
    source2: &FeatureBundle,
    w1: f64,
    w2: f64,
) -> f64 {
    breakdown(candidate, source1, source2, w1, w2).total()
}

/// Computes every partial score of [`fitness`].
pub fn breakdown(
    candidate: &FeatureBundle,
    source1: &FeatureBundle,
    source2: &FeatureBundle,
    w1: f64,
    w2: f64,
) -> FitnessBreakdown {
    let blend = |similarity: fn(&FeatureBundle, &FeatureBundle) -> f64| {
        w1 * similarity(candidate, source1) + w2 * similarity(candidate, source2)
    };

    FitnessBreakdown {
        motif: blend(motif_interval_similarity),
        harmonic: blend(harmonic_similarity),
        rhythmic: blend(rhythmic_similarity),
        chromatic: chromatic_score(candidate, source1, source2, w1, w2),
    }
}

/// Similarity of the pitch-delta sequences of two melodies.
///
/// Deltas are taken between successive notes with rests skipped, truncated
/// to the shorter sequence. A melody with fewer than two notes scores 0.
pub fn motif_interval_similarity(candidate: &FeatureBundle, source: &FeatureBundle) -> f64 {
    let candidate_deltas = pitch_deltas(candidate);
    let source_deltas = pitch_deltas(source);
    if candidate_deltas.is_empty() || source_deltas.is_empty() {
        return 0.0;
    }

    let m = candidate_deltas.len().min(source_deltas.len());
    let distance = candidate_deltas[..m]
        .iter()
        .zip(&source_deltas[..m])
        .map(|(a, b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt();

    (1.0 - distance / (12.0 * m as f64)).max(0.0)
}

/// Share of the candidate's chord roots that also occur in the source.
pub fn harmonic_similarity(candidate: &FeatureBundle, source: &FeatureBundle) -> f64 {
    let candidate_roots = candidate.chord_roots();
    let source_roots = source.chord_roots();
    let shared = candidate_roots.intersection(&source_roots).count();

    shared as f64 / candidate_roots.len().max(1) as f64
}

/// Compares the spread of rhythm differences against the source's mean duration.
pub fn rhythmic_similarity(candidate: &FeatureBundle, source: &FeatureBundle) -> f64 {
    if candidate.rhythm.is_empty() || source.rhythm.is_empty() {
        return 0.0;
    }

    let m = candidate.rhythm.len().min(source.rhythm.len());
    let differences: Vec<f64> = candidate.rhythm[..m]
        .iter()
        .zip(&source.rhythm[..m])
        .map(|(a, b)| a - b)
        .collect();

    let baseline = mean(&source.rhythm).powi(2) + RHYTHM_EPSILON;
    (1.0 - variance(&differences) / baseline).max(0.0)
}

/// Closeness of the candidate's mean chromatic interval to the weighted
/// mean of the sources. A zero target always scores 1.
pub fn chromatic_score(
    candidate: &FeatureBundle,
    source1: &FeatureBundle,
    source2: &FeatureBundle,
    w1: f64,
    w2: f64,
) -> f64 {
    let target = w1 * mean_interval(source1) + w2 * mean_interval(source2);
    if target == 0.0 {
        return 1.0;
    }

    (1.0 - (mean_interval(candidate) - target).abs() / target).max(0.0)
}

fn pitch_deltas(bundle: &FeatureBundle) -> Vec<f64> {
    bundle
        .note_pitches()
        .windows(2)
        .map(|pair| f64::from(pair[1]) - f64::from(pair[0]))
        .collect()
}

fn mean_interval(bundle: &FeatureBundle) -> f64 {
    let intervals: Vec<f64> = bundle
        .chromatic_intervals
        .iter()
        .map(|&interval| f64::from(interval))
        .collect();
    mean(&intervals)
}

/// Arithmetic mean; 0 for an empty slice.
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance; 0 for an empty slice.
fn variance(values: &[f64]) -> f64 {
    let mu = mean(values);
    mean(&values.iter().map(|v| (v - mu).powi(2)).collect::<Vec<_>>())
}
