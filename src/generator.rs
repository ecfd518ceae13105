//! The custom multi-section generator

use rand::Rng;

use crate::{
    automation::Timeline,
    chord::Voicing,
    envelope::{Envelope, SectionEnvelope},
    plan::SectionFrequencies,
    schedule::{schedule_voice, Movement, CHORD_WALK_STEPS},
    score::{FilterStage, Score, VoiceTrack},
    section::{MovementMode, SectionConfig},
};

/// The reverb wet level before any section sets one
pub const DEFAULT_REVERB: f64 = 0.3;

/// Plays a list of sections back to back
///
/// Every section gets its own voices, which start when the section starts
/// and stop when it ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generator {
    sections: Vec<SectionConfig>,
}

impl Generator {
    /// Create a generator with no sections
    pub fn new() -> Self {
        Self::default()
    }
    /// Append a section
    pub fn add_section(&mut self, section: SectionConfig) {
        self.sections.push(section);
    }
    /// Get the sections
    pub fn sections(&self) -> &[SectionConfig] {
        &self.sections
    }
    /// Remove every section
    pub fn clear(&mut self) {
        self.sections.clear();
    }
    /// Get the combined length of every complete section in seconds
    pub fn total_duration(&self) -> f64 {
        self.complete_sections().map(|s| s.duration).sum()
    }
    /// Check whether any section can be played
    pub fn is_playable(&self) -> bool {
        self.complete_sections().next().is_some()
    }
    fn complete_sections(&self) -> impl Iterator<Item = &SectionConfig> {
        self.sections.iter().filter(|s| s.is_complete())
    }
    /// Plan and schedule every section
    ///
    /// Sections without a length or without voices are skipped with a
    /// warning and take up no time.
    pub fn score<R>(&self, rng: &mut R) -> Score
    where
        R: Rng + ?Sized,
    {
        let mut score = Score::new(self.total_duration());
        let mut lowpass = FilterStage::default();
        let mut highpass = FilterStage::default();
        let mut reverb = Timeline::new(DEFAULT_REVERB);

        let mut time = 0.0;
        for (index, section) in self.sections.iter().enumerate() {
            if !section.is_complete() {
                log::warn!("Incomplete configuration for section: {index}");
                continue;
            }
            lowpass.cutoff.set_value_at(section.eq.lowpass, time);
            highpass.cutoff.set_value_at(section.eq.highpass, time);
            reverb.set_value_at(section.eq.reverb, time);

            let freqs = SectionFrequencies::plan(section, Voicing::Sampled, rng);
            if freqs.is_playable() {
                score
                    .voices
                    .extend(schedule_section(section, &freqs, time, rng));
            } else {
                log::warn!(
                    "section {index} has no playable frequencies ({} start, {} end)",
                    freqs.start.len(),
                    freqs.end.len()
                );
            }
            time += section.duration;
        }

        score.lowpass = Some(lowpass);
        score.highpass = Some(highpass);
        score.reverb = Some(reverb);
        log::debug!(
            "scheduled {} voices over {} sections, {:.2}s",
            score.voices.len(),
            self.sections.len(),
            score.duration
        );
        score
    }
}

impl From<Vec<SectionConfig>> for Generator {
    fn from(sections: Vec<SectionConfig>) -> Self {
        Generator { sections }
    }
}

impl Extend<SectionConfig> for Generator {
    fn extend<T: IntoIterator<Item = SectionConfig>>(&mut self, iter: T) {
        self.sections.extend(iter);
    }
}

fn schedule_section<R>(
    section: &SectionConfig,
    freqs: &SectionFrequencies,
    start: f64,
    rng: &mut R,
) -> Vec<VoiceTrack>
where
    R: Rng + ?Sized,
{
    let movement = match section.movement {
        MovementMode::Direct => Movement::Direct,
        MovementMode::Random => Movement::ChordWalk {
            steps: CHORD_WALK_STEPS,
        },
    };
    let envelope = SectionEnvelope::for_voices(section.voices);
    let stop = start + section.duration;
    freqs
        .start
        .iter()
        .enumerate()
        .map(|(i, &start_frequency)| {
            let mut track = VoiceTrack::new(section.waveform, start, stop);
            schedule_voice(
                i,
                start_frequency,
                &freqs.end,
                &movement,
                section.duration,
                start,
                rng,
            )
            .apply(&mut track.frequency);
            envelope.apply(&mut track.gain, start, section.duration);
            track
        })
        .collect()
}

/// Parse a JSON array of sections into a generator
#[cfg(feature = "json")]
pub fn from_json(json: &str) -> crate::Result<Generator> {
    let sections: Vec<SectionConfig> = serde_json::from_str(json)?;
    Ok(sections.into())
}

#[cfg(test)]
mod tests {
    use rand::{rngs::SmallRng, SeedableRng};

    use super::*;
    use crate::{
        gen::Waveform,
        section::{FilterSettings, FrequencySpec},
    };

    fn two_sections() -> Generator {
        let mut generator = Generator::new();
        generator.add_section(
            SectionConfig::new(FrequencySpec::range(100.0, 300.0), FrequencySpec::chord("THX"))
                .voices(3)
                .duration(4.0)
                .waveform(Waveform::Sawtooth),
        );
        generator.add_section(
            SectionConfig::new(FrequencySpec::range(200.0, 400.0), FrequencySpec::range(400.0, 800.0))
                .voices(5)
                .duration(2.0)
                .movement(MovementMode::Random)
                .eq(FilterSettings {
                    highpass: 120.0,
                    lowpass: 5000.0,
                    reverb: 0.5,
                }),
        );
        generator
    }

    #[test]
    fn sections_play_back_to_back() {
        let generator = two_sections();
        assert_eq!(generator.total_duration(), 6.0);
        let score = generator.score(&mut SmallRng::seed_from_u64(1));
        assert_eq!(score.duration, 6.0);
        assert_eq!(score.voices.len(), 8);

        let first = &score.voices[..3];
        assert!(first.iter().all(|v| v.start == 0.0 && v.stop == 4.0));
        assert!(first.iter().all(|v| v.waveform == Waveform::Sawtooth));
        let starts: Vec<f64> = first.iter().map(|v| v.frequency.value_at(0.0)).collect();
        assert_eq!(starts, [100.0, 200.0, 300.0]);

        let second = &score.voices[3..];
        assert!(second.iter().all(|v| v.start == 4.0 && v.stop == 6.0));
        assert!(second.iter().all(|v| v.frequency.events().len() == 1 + CHORD_WALK_STEPS));
    }

    #[test]
    fn voice_gain_peaks_at_share_of_section() {
        let score = two_sections().score(&mut SmallRng::seed_from_u64(2));
        let voice = &score.voices[0];
        assert!((voice.gain.value_at(0.1) - 1.0 / 3.0).abs() < 1e-9);
        assert!(voice.gain.value_at(4.0).abs() < 1e-9);
        let voice = &score.voices[3];
        assert!((voice.gain.value_at(4.1) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn eq_changes_at_section_boundaries() {
        let score = two_sections().score(&mut SmallRng::seed_from_u64(3));
        let lowpass = score.lowpass.unwrap();
        let highpass = score.highpass.unwrap();
        let reverb = score.reverb.unwrap();
        assert_eq!(lowpass.cutoff.value_at(1.0), 7000.0);
        assert_eq!(lowpass.cutoff.value_at(5.0), 5000.0);
        assert_eq!(highpass.cutoff.value_at(1.0), 60.0);
        assert_eq!(highpass.cutoff.value_at(4.0), 120.0);
        assert_eq!(reverb.value_at(0.0), 0.3);
        assert_eq!(reverb.value_at(4.5), 0.5);
    }

    #[test]
    fn unknown_chord_section_schedules_no_voices() {
        let mut generator = Generator::new();
        generator.add_section(SectionConfig::new(
            FrequencySpec::chord("Cmaj"),
            FrequencySpec::range(100.0, 200.0),
        ));
        let score = generator.score(&mut SmallRng::seed_from_u64(0));
        assert!(score.is_silent());
        assert_eq!(score.duration, 5.0);
    }

    #[test]
    fn incomplete_sections_are_skipped() {
        let mut generator = two_sections();
        generator.add_section(SectionConfig::default().voices(0));
        generator.add_section(SectionConfig::default().duration(0.0));
        assert!(generator.is_playable());
        assert_eq!(generator.total_duration(), 6.0);
        let score = generator.score(&mut SmallRng::seed_from_u64(4));
        assert_eq!(score.duration, 6.0);
        assert_eq!(score.voices.len(), 8);

        let mut empty = Generator::new();
        empty.add_section(SectionConfig::default().voices(0));
        assert!(!empty.is_playable());
        assert!(empty.score(&mut SmallRng::seed_from_u64(4)).is_silent());
    }

    #[cfg(feature = "json")]
    #[test]
    fn sections_from_json() {
        let generator = from_json(
            r#"[
                { "start": { "chord": "THX" }, "end": { "range": { "min": 50, "max": 60 } }, "duration": 3 },
                { "voices": 2 }
            ]"#,
        )
        .unwrap();
        assert_eq!(generator.sections().len(), 2);
        assert_eq!(generator.total_duration(), 8.0);
        assert!(from_json("{").is_err());

        let generator = from_json(r#"[{ "voices": 0 }, { "duration": 0 }]"#).unwrap();
        assert_eq!(generator.sections().len(), 2);
        assert!(!generator.is_playable());
    }
}
