//! Frequency planning
//!
//! Turns a [`FrequencySpec`] into one frequency per voice.

use rand::Rng;

use crate::{
    chord::{chord_frequencies, Voicing},
    section::{FrequencySpec, SectionConfig, Spread},
};

/// Distribute `voices` frequencies over `[min, max]`
///
/// A single evenly spread voice sits at `min`.
pub fn range_frequencies<R>(min: f64, max: f64, voices: usize, spread: Spread, rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    match spread {
        _ if voices == 0 => Vec::new(),
        Spread::Even if voices == 1 => vec![min],
        Spread::Even => {
            let step = (max - min) / (voices - 1) as f64;
            (0..voices).map(|i| min + step * i as f64).collect()
        }
        Spread::Random => (0..voices)
            .map(|_| min + rng.gen::<f64>() * (max - min))
            .collect(),
    }
}

/// Plan one frequency per voice from a chord name or range
///
/// Unknown chord names plan no frequencies at all.
pub fn plan_frequencies<R>(
    spec: &FrequencySpec,
    voices: usize,
    spread: Spread,
    voicing: Voicing,
    rng: &mut R,
) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    match spec {
        FrequencySpec::Chord(name) => chord_frequencies(name, voices, voicing, rng),
        FrequencySpec::Range { min, max } => range_frequencies(*min, *max, voices, spread, rng),
    }
}

/// The start and end frequencies planned for a section
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionFrequencies {
    /// One start frequency per voice
    pub start: Vec<f64>,
    /// The frequencies voices move toward
    pub end: Vec<f64>,
}

impl SectionFrequencies {
    /// Plan a section's frequencies
    ///
    /// End ranges are always spread randomly, whatever the start spread is.
    pub fn plan<R>(config: &SectionConfig, voicing: Voicing, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        SectionFrequencies {
            start: plan_frequencies(&config.start, config.voices, config.start_spread, voicing, rng),
            end: plan_frequencies(&config.end, config.voices, Spread::Random, voicing, rng),
        }
    }
    /// Check whether any voice can be scheduled
    pub fn is_playable(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty()
    }
}
