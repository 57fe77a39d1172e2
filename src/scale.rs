//! # Musical Context
//!
//! Key and meter types carried by every [`FeatureBundle`](crate::bundle::FeatureBundle),
//! plus the [`ScaleProvider`] seam the child builder uses to turn a key into
//! the pitch palette for pitch mutation.
//!
//! ```rust
//! use genblend::scale::{DiatonicScale, KeySignature, ScaleProvider};
//!
//! let pitches = DiatonicScale::default().scale_pitches(&KeySignature::c_major());
//! assert_eq!(pitches, vec![60, 62, 64, 65, 67, 69, 71]);
//! ```

use std::fmt;

/// Major or (natural) minor tonality.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Major,
    Minor,
}

impl Mode {
    /// Semitone offsets of the seven scale degrees above the tonic.
    pub fn intervals(self) -> [u8; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => [0, 2, 3, 5, 7, 8, 10],
        }
    }
}

/// A key: tonic pitch class (0 = C, 1 = C#, ... 11 = B) and mode.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySignature {
    pub tonic: u8,
    pub mode: Mode,
}

impl KeySignature {
    pub fn new(tonic: u8, mode: Mode) -> Self {
        Self {
            tonic: tonic % 12,
            mode,
        }
    }

    pub fn c_major() -> Self {
        Self::new(0, Mode::Major)
    }
}

impl Default for KeySignature {
    fn default() -> Self {
        Self::c_major()
    }
}

/// A meter such as 3/4 or 6/8.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator: u8,
}

impl TimeSignature {
    pub fn new(numerator: u8, denominator: u8) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Length of one measure in quarter notes.
    pub fn bar_length(&self) -> f64 {
        if self.denominator == 0 {
            return 0.0;
        }
        f64::from(self.numerator) * 4.0 / f64::from(self.denominator)
    }

    /// The `"n/d"` form, used for the equal-weight tie-break when merging meters.
    pub fn ratio_string(&self) -> String {
        format!("{}/{}", self.numerator, self.denominator)
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Supplies the allowed pitches for a key.
///
/// The child builder calls this once per child, keyed by the first parent's
/// key signature, and draws replacement pitches from the result. Any
/// `Fn(&KeySignature) -> Vec<u8>` closure is a provider too.
pub trait ScaleProvider {
    fn scale_pitches(&self, key: &KeySignature) -> Vec<u8>;
}

impl<F> ScaleProvider for F
where
    F: Fn(&KeySignature) -> Vec<u8>,
{
    fn scale_pitches(&self, key: &KeySignature) -> Vec<u8> {
        self(key)
    }
}

/// Seven diatonic MIDI pitches starting at the tonic in a fixed octave.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct DiatonicScale {
    /// Scientific octave of the tonic; 4 places C at MIDI 60.
    octave: u8,
}

impl DiatonicScale {
    pub fn new(octave: u8) -> Self {
        Self {
            octave: octave.min(9),
        }
    }
}

impl Default for DiatonicScale {
    fn default() -> Self {
        Self::new(4)
    }
}

impl ScaleProvider for DiatonicScale {
    fn scale_pitches(&self, key: &KeySignature) -> Vec<u8> {
        let tonic = 12 * (u16::from(self.octave) + 1) + u16::from(key.tonic % 12);
        key.mode
            .intervals()
            .iter()
            .map(|&step| tonic + u16::from(step))
            .filter(|&pitch| pitch <= 127)
            .map(|pitch| pitch as u8)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_minor_pitches() {
        let key = KeySignature::new(9, Mode::Minor);
        let pitches = DiatonicScale::default().scale_pitches(&key);
        assert_eq!(pitches, vec![69, 71, 72, 74, 76, 77, 79]);
    }

    #[test]
    fn test_key_wraps_tonic() {
        assert_eq!(KeySignature::new(14, Mode::Major).tonic, 2);
    }

    #[test]
    fn test_top_octave_is_clipped() {
        let key = KeySignature::new(7, Mode::Major);
        let pitches = DiatonicScale::new(9).scale_pitches(&key);
        assert!(pitches.iter().all(|&p| p <= 127));
        assert!(pitches.len() < 7);
    }

    #[test]
    fn test_closure_provider() {
        let provider = |_: &KeySignature| vec![48, 50];
        assert_eq!(provider.scale_pitches(&KeySignature::c_major()), vec![48, 50]);
    }

    #[test]
    fn test_bar_length() {
        assert_eq!(TimeSignature::new(4, 4).bar_length(), 4.0);
        assert_eq!(TimeSignature::new(6, 8).bar_length(), 3.0);
        assert_eq!(TimeSignature::new(3, 0).bar_length(), 0.0);
    }

    #[test]
    fn test_ratio_string() {
        assert_eq!(TimeSignature::new(3, 4).ratio_string(), "3/4");
        assert_eq!(TimeSignature::default().to_string(), "4/4");
    }
}
