//! Equal-tempered note frequencies

/// The twelve notes of the western chromatic scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Letter {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl Letter {
    /// Make a pitch with this letter and the given octave.
    pub fn oct(self, octave: i8) -> Pitch {
        Pitch::new(self, octave)
    }
    /// Get the frequency of this letter in the given octave.
    ///
    /// A4 is 440 Hz.
    pub fn frequency(&self, octave: i8) -> f64 {
        440.0 * 2f64.powf(((octave as i16 - 4) * 12 + (*self as i16 - 9)) as f64 / 12.0)
    }
}

/// A letter-octave pair representing a frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    /// The letter of the pitch
    pub letter: Letter,
    /// The octave of the pitch
    pub octave: i8,
}

impl Pitch {
    /// Make a new pitch with the given letter and octave
    pub fn new(letter: Letter, octave: i8) -> Self {
        Self { letter, octave }
    }
    /// Get the frequency of this pitch
    pub fn frequency(&self) -> f64 {
        self.letter.frequency(self.octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn d_major_triad_frequencies() {
        assert!((Letter::A.frequency(4) - 440.0).abs() < 1e-9);
        assert!((Letter::D.frequency(4) - 293.66).abs() < 0.01);
        assert!((Letter::Fs.frequency(4) - 369.99).abs() < 0.01);
        assert!((Letter::D.frequency(3) * 2.0 - Letter::D.frequency(4)).abs() < 1e-9);
    }

    #[test]
    fn pitch_matches_letter() {
        let pitch = Letter::Fs.oct(3);
        assert_eq!(pitch, Pitch::new(Letter::Fs, 3));
        assert_eq!(pitch.frequency(), Letter::Fs.frequency(3));
    }
}
