//! Named chords
//!
//! A chord is not a fixed list of frequencies. It is a rule that produces a
//! freshly detuned set of frequencies every time it is asked for one.

use std::{fmt, str::FromStr};

use rand::Rng;

use crate::note::{Letter, Pitch};

/// How a chord's notes are distributed across voices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Voicing {
    /// Each voice picks a note at random and is detuned by up to ±0.5%
    #[default]
    Sampled,
    /// Voice `i` takes note `i mod n` and is detuned by up to ±0.8%
    Cycled,
}

impl Voicing {
    /// The maximum relative detune applied to each voice
    pub fn detune(&self) -> f64 {
        match self {
            Voicing::Sampled => 0.005,
            Voicing::Cycled => 0.008,
        }
    }
}

/// A chord that can be referred to by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chord {
    /// D major spread over several octaves
    Thx,
}

/// Error returned when parsing a chord name that is not in the chord table
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chord `{0}`")]
pub struct UnknownChord(pub String);

impl FromStr for Chord {
    type Err = UnknownChord;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "THX" => Ok(Chord::Thx),
            _ => Err(UnknownChord(s.into())),
        }
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Chord {
    /// Get the name this chord is looked up by
    pub fn name(&self) -> &'static str {
        match self {
            Chord::Thx => "THX",
        }
    }
    /// Get the pitches a voicing draws from
    pub fn pitches(&self, voicing: Voicing) -> Vec<Pitch> {
        use Letter::*;
        match (self, voicing) {
            (Chord::Thx, Voicing::Sampled) => vec![
                D.oct(3),
                D.oct(4),
                D.oct(5),
                Fs.oct(3),
                Fs.oct(4),
                A.oct(3),
                A.oct(4),
            ],
            (Chord::Thx, Voicing::Cycled) => vec![
                D.oct(3),
                D.oct(4),
                D.oct(5),
                D.oct(6),
                Fs.oct(3),
                Fs.oct(4),
                Fs.oct(5),
                A.oct(3),
                A.oct(4),
                A.oct(5),
            ],
        }
    }
    /// Generate one detuned frequency per voice
    pub fn frequencies<R>(&self, voices: usize, voicing: Voicing, rng: &mut R) -> Vec<f64>
    where
        R: Rng + ?Sized,
    {
        let notes: Vec<f64> = self
            .pitches(voicing)
            .iter()
            .map(Pitch::frequency)
            .collect();
        let detune = voicing.detune();
        (0..voices)
            .map(|i| {
                let note = match voicing {
                    Voicing::Sampled => notes[rng.gen_range(0..notes.len())],
                    Voicing::Cycled => notes[i % notes.len()],
                };
                note * (1.0 + rng.gen_range(-detune..detune))
            })
            .collect()
    }
}

/// Look up a chord by name and generate its frequencies
///
/// Unknown names produce no frequencies.
pub fn chord_frequencies<R>(name: &str, voices: usize, voicing: Voicing, rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    match name.parse::<Chord>() {
        Ok(chord) => chord.frequencies(voices, voicing, rng),
        Err(e) => {
            log::debug!("{e}, no voices generated");
            Vec::new()
        }
    }
}
