//! Section configuration

use crate::gen::Waveform;

/// Where a section's frequencies come from
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FrequencySpec {
    /// A chord from the chord table, looked up by name
    Chord(String),
    /// A range of frequencies in Hz
    Range {
        /// The lowest frequency
        min: f64,
        /// The highest frequency
        max: f64,
    },
}

impl FrequencySpec {
    /// Refer to a chord by name
    pub fn chord(name: impl Into<String>) -> Self {
        FrequencySpec::Chord(name.into())
    }
    /// Make a frequency range
    pub fn range(min: f64, max: f64) -> Self {
        FrequencySpec::Range { min, max }
    }
}

/// How voices are distributed across a frequency range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Spread {
    /// Evenly spaced from the bottom of the range to the top, inclusive
    #[default]
    Even,
    /// Uniformly random within the range
    Random,
}

/// How a voice moves from its start frequency to the end frequencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum MovementMode {
    /// One linear ramp to the voice's end frequency
    #[default]
    Direct,
    /// Stepped ramps to randomly chosen end frequencies
    Random,
}

/// Master-bus settings applied while a section plays
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterSettings {
    /// High-pass cut-off in Hz
    pub highpass: f64,
    /// Low-pass cut-off in Hz
    pub lowpass: f64,
    /// Reverb wet level
    pub reverb: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        FilterSettings {
            highpass: 60.0,
            lowpass: 7000.0,
            reverb: 0.3,
        }
    }
}

/// One segment of a custom sound
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SectionConfig {
    /// Where voices start
    pub start: FrequencySpec,
    /// How voices are spread over a start range
    pub start_spread: Spread,
    /// Where voices end
    ///
    /// End ranges are always spread randomly.
    pub end: FrequencySpec,
    /// The number of simultaneous oscillators
    pub voices: usize,
    /// The oscillator shape
    pub waveform: Waveform,
    /// How voices move toward the end frequencies
    pub movement: MovementMode,
    /// The section length in seconds
    pub duration: f64,
    /// Filter and reverb settings
    pub eq: FilterSettings,
}

impl Default for SectionConfig {
    fn default() -> Self {
        SectionConfig::new(FrequencySpec::range(220.0, 440.0), FrequencySpec::range(440.0, 880.0))
    }
}

impl SectionConfig {
    /// Create a five second, five voice section between two frequency specs
    pub fn new(start: FrequencySpec, end: FrequencySpec) -> Self {
        SectionConfig {
            start,
            start_spread: Spread::Even,
            end,
            voices: 5,
            waveform: Waveform::Sine,
            movement: MovementMode::Direct,
            duration: 5.0,
            eq: FilterSettings::default(),
        }
    }
    /// Set the number of voices
    pub fn voices(self, voices: usize) -> Self {
        SectionConfig { voices, ..self }
    }
    /// Set the start spread
    pub fn spread(self, start_spread: Spread) -> Self {
        SectionConfig {
            start_spread,
            ..self
        }
    }
    /// Set the waveform
    pub fn waveform(self, waveform: Waveform) -> Self {
        SectionConfig { waveform, ..self }
    }
    /// Set the movement mode
    pub fn movement(self, movement: MovementMode) -> Self {
        SectionConfig { movement, ..self }
    }
    /// Set the duration in seconds
    pub fn duration(self, duration: f64) -> Self {
        SectionConfig { duration, ..self }
    }
    /// Set the filter and reverb settings
    pub fn eq(self, eq: FilterSettings) -> Self {
        SectionConfig { eq, ..self }
    }
    /// Check that the section has a length and at least one voice
    pub fn is_complete(&self) -> bool {
        self.duration > 0.0 && self.voices > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "json")]
    #[test]
    fn deserialize_with_defaults() {
        let config: SectionConfig = serde_json::from_str(
            r#"{
                "start": { "range": { "min": 100, "max": 300 } },
                "end": { "chord": "THX" },
                "voices": 12,
                "waveform": "sawtooth",
                "movement": "random"
            }"#,
        )
        .unwrap();
        assert_eq!(config.start, FrequencySpec::range(100.0, 300.0));
        assert_eq!(config.end, FrequencySpec::chord("THX"));
        assert_eq!(config.voices, 12);
        assert_eq!(config.waveform, Waveform::Sawtooth);
        assert_eq!(config.movement, MovementMode::Random);
        assert_eq!(config.start_spread, Spread::Even);
        assert_eq!(config.duration, 5.0);
        assert_eq!(config.eq, FilterSettings::default());
    }

    #[test]
    fn completeness() {
        assert!(SectionConfig::default().is_complete());
        assert!(!SectionConfig::default().voices(0).is_complete());
        assert!(!SectionConfig::default().duration(0.0).is_complete());
    }
}
