//! The deep note preset
//!
//! Thirty sawtooth voices start in a tight cluster, wander through a wide
//! range, then glide onto a detuned D major chord and hold it while the
//! whole piece fades out.

use rand::Rng;

use crate::{
    chord::{Chord, Voicing},
    envelope::{Envelope, SwellEnvelope},
    gen::Waveform,
    note::Letter,
    schedule::{schedule_voice, Movement, RANGE_WALK_STEPS},
    score::{FilterStage, Score, VoiceTrack},
};

/// One stretch of the preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresetSection {
    /// Length in seconds
    pub duration: f64,
    /// How every voice moves during the section
    pub movement: Movement,
}

/// A deep note swell
///
/// [`DeepNote::default`] is the canonical 31 second version. Unlike custom
/// sections, the voices here carry on from one section to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepNote {
    /// The number of voices
    pub voices: usize,
    /// The oscillator shape of every voice
    pub waveform: Waveform,
    /// The frequency the starting cluster is built around
    pub center: f64,
    /// The lowest starting frequency, as a multiple of the center
    pub cluster_base: f64,
    /// The spacing between starting frequencies, as a multiple of the center
    pub cluster_step: f64,
    /// The sections, played in order
    pub sections: Vec<PresetSection>,
    /// The chord every voice ends on
    pub chord: Chord,
    /// The gain envelope applied once across the whole piece
    pub swell: SwellEnvelope,
    /// Gain applied to the sum of all voices
    pub master_gain: f64,
    /// Low-pass cut-off in Hz and Q in decibels
    pub lowpass: (f64, f64),
    /// High-pass cut-off in Hz and Q in decibels
    pub highpass: (f64, f64),
}

impl Default for DeepNote {
    fn default() -> Self {
        let voices = 30;
        let center = Letter::D.frequency(4) / 1.5;
        DeepNote {
            voices,
            waveform: Waveform::Sawtooth,
            center,
            cluster_base: 0.98,
            cluster_step: 0.004,
            sections: vec![
                PresetSection {
                    duration: 10.0,
                    movement: Movement::RangeWalk {
                        steps: RANGE_WALK_STEPS,
                        min: center * 0.7,
                        max: center * 1.8,
                    },
                },
                PresetSection {
                    duration: 8.0,
                    movement: Movement::Direct,
                },
                PresetSection {
                    duration: 13.0,
                    movement: Movement::Direct,
                },
            ],
            chord: Chord::Thx,
            swell: SwellEnvelope::for_voices(voices),
            master_gain: 0.8,
            lowpass: (7000.0, 1.7),
            highpass: (60.0, 1.9),
        }
    }
}

impl DeepNote {
    /// Get the length of the piece in seconds
    pub fn duration(&self) -> f64 {
        self.sections.iter().map(|s| s.duration).sum()
    }
    /// Get the starting frequency of every voice
    pub fn cluster(&self) -> Vec<f64> {
        (0..self.voices)
            .map(|i| self.center * (self.cluster_base + i as f64 * self.cluster_step))
            .collect()
    }
    /// Schedule the piece
    pub fn score<R>(&self, rng: &mut R) -> Score
    where
        R: Rng + ?Sized,
    {
        let duration = self.duration();
        let final_chord = self.chord.frequencies(self.voices, Voicing::Cycled, rng);

        let mut voices: Vec<VoiceTrack> = self
            .cluster()
            .into_iter()
            .map(|start_frequency| {
                let mut track = VoiceTrack::new(self.waveform, 0.0, duration);
                track.frequency.set_value_at(start_frequency, 0.0);
                self.swell.apply(&mut track.gain, 0.0, duration);
                track
            })
            .collect();

        let mut time = 0.0;
        for section in &self.sections {
            for (i, track) in voices.iter_mut().enumerate() {
                let current = track.frequency.value_at(time);
                schedule_voice(
                    i,
                    current,
                    &final_chord,
                    &section.movement,
                    section.duration,
                    time,
                    rng,
                )
                .apply_ramps(&mut track.frequency);
            }
            time += section.duration;
        }

        let mut score = Score::new(duration);
        score.voices = voices;
        score.master_gain.set_value_at(self.master_gain, 0.0);
        score.lowpass = Some(FilterStage::fixed(self.lowpass.0, self.lowpass.1));
        score.highpass = Some(FilterStage::fixed(self.highpass.0, self.highpass.1));
        log::debug!(
            "deep note: {} voices over {:.1}s",
            score.voices.len(),
            duration
        );
        score
    }
}
