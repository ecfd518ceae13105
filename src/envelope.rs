//! Amplitude envelopes written into gain timelines

use crate::automation::Timeline;

/// Something that shapes a voice's gain over a span of time
pub trait Envelope {
    /// Write the envelope into `gain` for a span starting at `start`
    fn apply(&self, gain: &mut Timeline, start: f64, duration: f64);
}

/// A short linear attack to `level`, then a linear fade to silence at the
/// end of the section
///
/// With `level` at one over the voice count, the voices of a section sum
/// to roughly full scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionEnvelope {
    /// Attack time in seconds
    pub attack: f64,
    /// Peak gain
    pub level: f64,
}

impl SectionEnvelope {
    /// The attack used for custom sections
    pub const ATTACK: f64 = 0.1;
    /// Create the envelope for one of `voices` voices
    pub fn for_voices(voices: usize) -> Self {
        SectionEnvelope {
            attack: Self::ATTACK,
            level: 1.0 / voices.max(1) as f64,
        }
    }
}

impl Envelope for SectionEnvelope {
    fn apply(&self, gain: &mut Timeline, start: f64, duration: f64) {
        gain.set_value_at(0.0, start)
            .linear_ramp_to(self.level, start + self.attack)
            .linear_ramp_to(0.0, start + duration);
    }
}

/// A fade in, a long hold, then an exponential fade over the last part of
/// the piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwellEnvelope {
    /// Fade-in time in seconds
    pub attack: f64,
    /// Held gain
    pub level: f64,
    /// Fraction of the total duration spent fading out
    pub fade: f64,
    /// The gain the fade-out ends on
    pub floor: f64,
}

impl SwellEnvelope {
    /// Create the envelope for one of `voices` voices
    pub fn for_voices(voices: usize) -> Self {
        SwellEnvelope {
            attack: 0.2,
            level: 1.0 / voices.max(1) as f64,
            fade: 0.3,
            floor: 0.001,
        }
    }
    /// Get the time the fade-out starts, relative to the start
    pub fn fade_start(&self, duration: f64) -> f64 {
        duration - duration * self.fade
    }
}

impl Envelope for SwellEnvelope {
    fn apply(&self, gain: &mut Timeline, start: f64, duration: f64) {
        gain.set_value_at(0.0, start)
            .linear_ramp_to(self.level, start + self.attack)
            .set_value_at(self.level, start + self.fade_start(duration))
            .exponential_ramp_to(self.floor, start + duration);
    }
}
