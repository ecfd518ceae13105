//! Fully scheduled pieces

use crate::{automation::Timeline, gen::Waveform};

/// One oscillator and everything scheduled on it
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceTrack {
    /// The oscillator shape
    pub waveform: Waveform,
    /// When the oscillator starts, in seconds
    pub start: f64,
    /// When the oscillator stops, in seconds
    pub stop: f64,
    /// The oscillator's frequency
    pub frequency: Timeline,
    /// The voice's gain
    pub gain: Timeline,
}

impl VoiceTrack {
    /// Create a voice that plays from `start` to `stop` with nothing scheduled yet
    pub fn new(waveform: Waveform, start: f64, stop: f64) -> Self {
        VoiceTrack {
            waveform,
            start,
            stop,
            frequency: Timeline::new(440.0),
            gain: Timeline::new(1.0),
        }
    }
}

/// A filter on the master bus
#[derive(Debug, Clone, PartialEq)]
pub struct FilterStage {
    /// Cut-off frequency in Hz
    pub cutoff: Timeline,
    /// Resonance in decibels
    pub q: f64,
}

impl FilterStage {
    /// The cut-off a filter holds until something is scheduled
    pub const DEFAULT_CUTOFF: f64 = 350.0;
    /// The resonance a filter has unless set otherwise
    pub const DEFAULT_Q: f64 = 1.0;
    /// Create a filter with a fixed cut-off and resonance
    pub fn fixed(cutoff: f64, q: f64) -> Self {
        FilterStage {
            cutoff: Timeline::new(cutoff),
            q,
        }
    }
}

impl Default for FilterStage {
    fn default() -> Self {
        FilterStage::fixed(Self::DEFAULT_CUTOFF, Self::DEFAULT_Q)
    }
}

/// Voices plus the master-bus chain they play through
///
/// The bus runs voices into the master gain, then the low-pass, the
/// high-pass and finally the reverb. Missing stages are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    /// Every voice in the piece
    pub voices: Vec<VoiceTrack>,
    /// Gain applied to the sum of all voices
    pub master_gain: Timeline,
    /// Optional low-pass filter
    pub lowpass: Option<FilterStage>,
    /// Optional high-pass filter
    pub highpass: Option<FilterStage>,
    /// Optional reverb wet level
    pub reverb: Option<Timeline>,
    /// The length of the piece in seconds
    pub duration: f64,
}

impl Score {
    /// Create an empty score with a unity master gain and no effects
    pub fn new(duration: f64) -> Self {
        Score {
            voices: Vec::new(),
            master_gain: Timeline::new(1.0),
            lowpass: None,
            highpass: None,
            reverb: None,
            duration,
        }
    }
    /// Check whether the score has anything to play
    pub fn is_silent(&self) -> bool {
        self.voices.is_empty()
    }
    /// Sample one voice's frequency at a fixed interval over the whole piece
    ///
    /// Returns [`None`] if there is no such voice.
    pub fn frequency_trace(&self, voice: usize, interval: f64) -> Option<Vec<(f64, f64)>> {
        let track = self.voices.get(voice)?;
        Some(track.frequency.trace(track.start, track.stop, interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_follows_voice_frequency() {
        let mut score = Score::new(2.0);
        let mut track = VoiceTrack::new(Waveform::Sine, 0.0, 2.0);
        track
            .frequency
            .set_value_at(100.0, 0.0)
            .linear_ramp_to(300.0, 2.0);
        score.voices.push(track);
        let trace = score.frequency_trace(0, 1.0).unwrap();
        assert_eq!(trace, [(0.0, 100.0), (1.0, 200.0), (2.0, 300.0)]);
        assert!(score.frequency_trace(1, 1.0).is_none());
        assert!(!score.is_silent());
    }
}
