//! # FeatureBundle
//!
//! The `FeatureBundle` is the individual evolved by the engine: melody, chords,
//! rhythm and the musical context of one piece. Every sequence field is an
//! owned `Vec`, so a clone never shares storage with its source and in-place
//! mutation of a child cannot leak into a parent.
//!
//! Bundles are usually assembled with [`FeatureBundleBuilder`], which derives
//! motifs, chord blocks, the rhythm profile and chromatic intervals from a
//! stream of already-extracted events.

pub mod builder;

pub use builder::FeatureBundleBuilder;

use std::collections::BTreeSet;

use crate::scale::{KeySignature, TimeSignature};

/// One event of the melodic line.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MelodicEvent {
    /// A pitched note: MIDI pitch and duration in quarter notes.
    Note { pitch: u8, duration: f64 },
    /// A rest, duration in quarter notes.
    Rest { duration: f64 },
}

impl MelodicEvent {
    pub fn note(pitch: u8, duration: f64) -> Self {
        MelodicEvent::Note { pitch, duration }
    }

    pub fn rest(duration: f64) -> Self {
        MelodicEvent::Rest { duration }
    }

    pub fn duration(&self) -> f64 {
        match self {
            MelodicEvent::Note { duration, .. } | MelodicEvent::Rest { duration } => *duration,
        }
    }

    /// The pitch of a note, `None` for a rest.
    pub fn pitch(&self) -> Option<u8> {
        match self {
            MelodicEvent::Note { pitch, .. } => Some(*pitch),
            MelodicEvent::Rest { .. } => None,
        }
    }
}

/// A half-open span `[start, end)` of melody indices sharing a repeated contour.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotifSpan {
    pub start: usize,
    pub end: usize,
}

impl MotifSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Simultaneous pitches sounding for one duration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    pub pitches: Vec<u8>,
    pub duration: f64,
}

impl Chord {
    pub fn new(pitches: Vec<u8>, duration: f64) -> Self {
        Self { pitches, duration }
    }

    /// Root pitch class of the chord, `None` when it holds no pitches.
    ///
    /// The root is the pitch class with the most chord tones a third, fifth or
    /// seventh above it. Ties go to the lowest sounding pitch.
    pub fn root(&self) -> Option<u8> {
        let bass = *self.pitches.iter().min()?;
        let classes: BTreeSet<u8> = self.pitches.iter().map(|p| p % 12).collect();

        let stacked_above = |root: u8| {
            classes
                .iter()
                .filter(|&&pc| matches!((pc + 12 - root) % 12, 3 | 4 | 7 | 10 | 11))
                .count()
        };

        let mut best = bass % 12;
        let mut best_support = stacked_above(best);
        for &pc in &classes {
            let support = stacked_above(pc);
            if support > best_support {
                best = pc;
                best_support = support;
            }
        }
        Some(best)
    }
}

/// The candidate genome: melodic, harmonic and rhythmic material plus context.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBundle {
    pub melody: Vec<MelodicEvent>,
    pub motifs: Vec<MotifSpan>,
    pub chords: Vec<Chord>,
    /// One group of chords per measure.
    pub chord_blocks: Vec<Vec<Chord>>,
    pub rhythm: Vec<f64>,
    /// Duration multiset used as the rhythm mutation palette.
    pub rhythm_profile: Vec<f64>,
    pub chromatic_intervals: Vec<u32>,
    pub key_signature: KeySignature,
    pub time_signature: TimeSignature,
    pub tempo: f64,
}

impl FeatureBundle {
    pub fn builder() -> FeatureBundleBuilder {
        FeatureBundleBuilder::default()
    }

    /// Pitches of the melody's notes in order, rests skipped.
    pub fn note_pitches(&self) -> Vec<u8> {
        self.melody.iter().filter_map(MelodicEvent::pitch).collect()
    }

    /// Distinct root pitch classes of all chords.
    pub fn chord_roots(&self) -> BTreeSet<u8> {
        self.chords.iter().filter_map(Chord::root).collect()
    }
}

/// Absolute semitone distance between successive notes.
///
/// Rests are skipped, so `[C, rest, E]` yields `[4]`.
pub fn chromatic_intervals(melody: &[MelodicEvent]) -> Vec<u32> {
    let pitches: Vec<u8> = melody.iter().filter_map(MelodicEvent::pitch).collect();
    pitches
        .windows(2)
        .map(|pair| u32::from(pair[0].abs_diff(pair[1])))
        .collect()
}

/// Durations of the melody's events, rests included.
pub fn melody_rhythm(melody: &[MelodicEvent]) -> Vec<f64> {
    melody.iter().map(MelodicEvent::duration).collect()
}
