use std::collections::HashMap;

use super::{chromatic_intervals, Chord, FeatureBundle, MelodicEvent, MotifSpan};
use crate::scale::{KeySignature, TimeSignature};

/// Default number of consecutive notes compared when detecting motifs.
pub const DEFAULT_MOTIF_WINDOW: usize = 4;

/// Assembles a [`FeatureBundle`] from events that were already extracted
/// from a score, deriving every secondary field.
///
/// Melodic events and chords are appended in extraction order; `rhythm`
/// interleaves their durations in that same order. Chords are timed on their
/// own cursor, independent of the melody, and each chord is assigned to the
/// measure in which its onset falls.
///
/// # Example
///
/// ```rust
/// use genblend::bundle::FeatureBundle;
/// use genblend::scale::TimeSignature;
///
/// let bundle = FeatureBundle::builder()
///     .time_signature(TimeSignature::new(3, 4))
///     .note(60, 1.0)
///     .chord(vec![48, 52, 55], 3.0)
///     .note(62, 1.0)
///     .note(64, 1.0)
///     .build();
///
/// assert_eq!(bundle.rhythm, vec![1.0, 3.0, 1.0, 1.0]);
/// assert_eq!(bundle.chromatic_intervals, vec![2, 2]);
/// assert_eq!(bundle.chord_blocks.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FeatureBundleBuilder {
    melody: Vec<MelodicEvent>,
    chords: Vec<Chord>,
    rhythm: Vec<f64>,
    key_signature: KeySignature,
    time_signature: TimeSignature,
    tempo: f64,
    motif_window: usize,
}

impl Default for FeatureBundleBuilder {
    fn default() -> Self {
        Self {
            melody: Vec::new(),
            chords: Vec::new(),
            rhythm: Vec::new(),
            key_signature: KeySignature::default(),
            time_signature: TimeSignature::default(),
            tempo: 120.0,
            motif_window: DEFAULT_MOTIF_WINDOW,
        }
    }
}

impl FeatureBundleBuilder {
    pub fn key_signature(mut self, key: KeySignature) -> Self {
        self.key_signature = key;
        self
    }

    /// Sets the meter. Chord measures are computed at `build` time, so the
    /// call order relative to `chord` does not matter.
    pub fn time_signature(mut self, time_signature: TimeSignature) -> Self {
        self.time_signature = time_signature;
        self
    }

    pub fn tempo(mut self, bpm: f64) -> Self {
        self.tempo = bpm;
        self
    }

    /// Sets the motif window. Windows shorter than 2 disable motif detection.
    pub fn motif_window(mut self, window: usize) -> Self {
        self.motif_window = window;
        self
    }

    pub fn note(mut self, pitch: u8, duration: f64) -> Self {
        self.melody.push(MelodicEvent::note(pitch, duration));
        self.rhythm.push(duration);
        self
    }

    pub fn rest(mut self, duration: f64) -> Self {
        self.melody.push(MelodicEvent::rest(duration));
        self.rhythm.push(duration);
        self
    }

    pub fn chord(mut self, pitches: Vec<u8>, duration: f64) -> Self {
        self.chords.push(Chord::new(pitches, duration));
        self.rhythm.push(duration);
        self
    }

    pub fn build(self) -> FeatureBundle {
        let chord_blocks = self.chord_blocks();
        let motifs = detect_motifs(&self.melody, self.motif_window);
        let rhythm_profile = rhythm_profile(&self.rhythm);
        let chromatic_intervals = chromatic_intervals(&self.melody);

        FeatureBundle {
            melody: self.melody,
            motifs,
            chords: self.chords,
            chord_blocks,
            rhythm: self.rhythm,
            rhythm_profile,
            chromatic_intervals,
            key_signature: self.key_signature,
            time_signature: self.time_signature,
            tempo: self.tempo,
        }
    }

    fn chord_blocks(&self) -> Vec<Vec<Chord>> {
        let bar = self.time_signature.bar_length();
        let mut blocks: Vec<Vec<Chord>> = Vec::new();
        let mut current_measure = None;
        let mut onset = 0.0;

        for chord in &self.chords {
            let measure = if bar > 0.0 {
                (onset / bar).floor() as usize
            } else {
                0
            };
            if current_measure == Some(measure) {
                if let Some(block) = blocks.last_mut() {
                    block.push(chord.clone());
                }
            } else {
                blocks.push(vec![chord.clone()]);
                current_measure = Some(measure);
            }
            onset += chord.duration;
        }
        blocks
    }
}

/// Finds every window of `window` successive notes whose up/down/level
/// contour occurs more than once in the melody.
///
/// Rests are skipped when forming windows. Each span runs from the melody
/// index of the window's first note to one past its last note, so a span
/// may enclose rests.
pub fn detect_motifs(melody: &[MelodicEvent], window: usize) -> Vec<MotifSpan> {
    let notes: Vec<(usize, i32)> = melody
        .iter()
        .enumerate()
        .filter_map(|(index, event)| event.pitch().map(|pitch| (index, i32::from(pitch))))
        .collect();
    if window < 2 || notes.len() < window {
        return Vec::new();
    }

    let contours: Vec<Vec<i8>> = notes
        .windows(window)
        .map(|slice| {
            slice
                .windows(2)
                .map(|pair| (pair[1].1 - pair[0].1).signum() as i8)
                .collect()
        })
        .collect();

    let mut counts: HashMap<&[i8], usize> = HashMap::new();
    for contour in &contours {
        *counts.entry(contour.as_slice()).or_insert(0) += 1;
    }

    notes
        .windows(window)
        .zip(&contours)
        .filter(|(_, contour)| counts.get(contour.as_slice()).copied().unwrap_or(0) > 1)
        .map(|(slice, _)| MotifSpan::new(slice[0].0, slice[window - 1].0 + 1))
        .collect()
}

/// Multiset of durations, equal values grouped together in order of first appearance.
pub fn rhythm_profile(rhythm: &[f64]) -> Vec<f64> {
    let mut groups: Vec<(f64, usize)> = Vec::new();
    for &duration in rhythm {
        match groups.iter_mut().find(|(value, _)| *value == duration) {
            Some((_, count)) => *count += 1,
            None => groups.push((duration, 1)),
        }
    }
    groups
        .into_iter()
        .flat_map(|(value, count)| std::iter::repeat(value).take(count))
        .collect()
}
