//! Crossover of melodic and harmonic material between two parents.

use crate::bundle::{Chord, FeatureBundle, MelodicEvent};
use crate::rng::RandomNumberGenerator;

/// Number of chords taken from a parent that has no chord blocks.
pub const FALLBACK_CHORD_SPAN: usize = 4;

/// Splices the head of `parent1`'s melody onto the tail of `parent2`'s.
///
/// Each parent is cut at the start of one of its motifs, chosen uniformly,
/// or at the middle of its melody when it has none. The result is
/// `parent1[..cut1]` followed by `parent2[cut2..]`.
pub fn melody_crossover(
    parent1: &FeatureBundle,
    parent2: &FeatureBundle,
    rng: &mut RandomNumberGenerator,
) -> Vec<MelodicEvent> {
    let cut1 = cut_point(parent1, rng);
    let cut2 = cut_point(parent2, rng);

    let mut melody = Vec::with_capacity(cut1 + parent2.melody.len() - cut2);
    melody.extend_from_slice(&parent1.melody[..cut1]);
    melody.extend_from_slice(&parent2.melody[cut2..]);
    melody
}

/// Joins one measure of `parent1`'s harmony with one measure of `parent2`'s.
///
/// A parent without chord blocks contributes its first (`parent1`) or
/// last (`parent2`) [`FALLBACK_CHORD_SPAN`] chords instead.
pub fn chord_block_crossover(
    parent1: &FeatureBundle,
    parent2: &FeatureBundle,
    rng: &mut RandomNumberGenerator,
) -> Vec<Chord> {
    let head: &[Chord] = match rng.choose(&parent1.chord_blocks) {
        Some(block) => block.as_slice(),
        None => &parent1.chords[..parent1.chords.len().min(FALLBACK_CHORD_SPAN)],
    };
    let tail: &[Chord] = match rng.choose(&parent2.chord_blocks) {
        Some(block) => block.as_slice(),
        None => {
            let len = parent2.chords.len();
            &parent2.chords[len.saturating_sub(FALLBACK_CHORD_SPAN)..]
        }
    };

    head.iter().chain(tail).cloned().collect()
}

fn cut_point(parent: &FeatureBundle, rng: &mut RandomNumberGenerator) -> usize {
    let len = parent.melody.len();
    match rng.choose(&parent.motifs) {
        Some(motif) => motif.start.min(len),
        None => len / 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::MotifSpan;

    fn melody_bundle(pitches: &[u8]) -> FeatureBundle {
        pitches
            .iter()
            .fold(FeatureBundle::builder(), |b, &p| b.note(p, 1.0))
            .build()
    }

    #[test]
    fn test_melody_crossover_midpoints() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let p1 = melody_bundle(&[60, 61, 62, 63]);
        let p2 = melody_bundle(&[70, 72, 71, 75, 74]);
        assert!(p1.motifs.is_empty() && p2.motifs.is_empty());
        let child = melody_crossover(&p1, &p2, &mut rng);
        let pitches: Vec<u8> = child.iter().filter_map(MelodicEvent::pitch).collect();
        assert_eq!(pitches, vec![60, 61, 71, 75, 74]);
    }

    #[test]
    fn test_melody_crossover_at_motif_starts() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        let mut p1 = melody_bundle(&[60, 61, 62, 63, 64, 65]);
        p1.motifs = vec![MotifSpan::new(1, 5)];
        let mut p2 = melody_bundle(&[70, 71, 72, 73]);
        p2.motifs = vec![MotifSpan::new(3, 4)];
        let child = melody_crossover(&p1, &p2, &mut rng);
        let pitches: Vec<u8> = child.iter().filter_map(MelodicEvent::pitch).collect();
        assert_eq!(pitches, vec![60, 73]);
    }

    #[test]
    fn test_melody_crossover_clamps_stale_motif() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let mut p1 = melody_bundle(&[60, 61]);
        p1.motifs = vec![MotifSpan::new(8, 12)];
        let p2 = melody_bundle(&[70, 71]);
        let child = melody_crossover(&p1, &p2, &mut rng);
        assert_eq!(child.len(), 3);
    }

    #[test]
    fn test_melody_crossover_empty_parents() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        let empty = FeatureBundle::builder().build();
        assert!(melody_crossover(&empty, &empty, &mut rng).is_empty());
    }

    #[test]
    fn test_chord_crossover_fallback_spans() {
        let mut rng = RandomNumberGenerator::from_seed(8);
        let chords: Vec<Chord> = (0..6).map(|i| Chord::new(vec![60 + i], 1.0)).collect();
        let mut p1 = FeatureBundle::builder().build();
        p1.chords = chords.clone();
        let mut p2 = FeatureBundle::builder().build();
        p2.chords = chords.clone();

        let child = chord_block_crossover(&p1, &p2, &mut rng);
        let expected: Vec<Chord> = chords[..4].iter().chain(&chords[2..]).cloned().collect();
        assert_eq!(child, expected);
    }

    #[test]
    fn test_chord_crossover_uses_blocks() {
        let mut rng = RandomNumberGenerator::from_seed(21);
        let block_a = vec![Chord::new(vec![60, 64, 67], 4.0)];
        let block_b = vec![
            Chord::new(vec![55, 59, 62], 2.0),
            Chord::new(vec![57, 60, 64], 2.0),
        ];
        let mut p1 = FeatureBundle::builder().build();
        p1.chord_blocks = vec![block_a.clone()];
        let mut p2 = FeatureBundle::builder().build();
        p2.chord_blocks = vec![block_b.clone()];

        let child = chord_block_crossover(&p1, &p2, &mut rng);
        assert_eq!(child.len(), 3);
        assert_eq!(child[0], block_a[0]);
        assert_eq!(&child[1..], &block_b[..]);
    }

    #[test]
    fn test_chord_crossover_short_fallback() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let mut p1 = FeatureBundle::builder().build();
        p1.chords = vec![Chord::new(vec![60], 1.0)];
        let p2 = FeatureBundle::builder().build();
        assert_eq!(chord_block_crossover(&p1, &p2, &mut rng).len(), 1);
    }
}
