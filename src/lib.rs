#![warn(missing_docs)]

/*!
This crate recreates a "deep note": a cluster of detuned oscillators that
swells from a spread of frequencies onto a target chord.

Planning and scheduling are pure. A [`FrequencySpec`] is turned into one
frequency per voice by [`plan_frequencies`], and [`schedule_voice`] turns a
voice's start frequency and the end frequencies into timed ramps. Both the
fixed [`DeepNote`] preset and the multi-section [`Generator`] produce a
[`Score`], which [`render`] turns into an [`AudioBuffer`] for a given
[`RenderContext`]. With the `wav` feature, buffers can be written out as
16-bit WAV files.

Every random choice is drawn from a caller-supplied [`rand::Rng`], so seeded
generators give repeatable output.
*/

pub mod automation;
pub mod chord;
mod codec;
pub mod envelope;
mod error;
pub mod fields;
pub mod filter;
pub mod gen;
pub mod generator;
mod mixer;
pub mod note;
pub mod plan;
pub mod preset;
pub mod render;
pub mod reverb;
pub mod schedule;
pub mod score;
pub mod section;
pub mod source;

#[cfg(feature = "wav")]
#[cfg_attr(docsrs, doc(cfg(feature = "wav")))]
pub use codec::wav;
#[doc(inline)]
pub use {
    automation::{Automation, Timeline},
    chord::{Chord, Voicing},
    error::*,
    fields::SectionFields,
    gen::Waveform,
    generator::Generator,
    mixer::Mixer,
    plan::plan_frequencies,
    preset::DeepNote,
    render::{render, AudioBuffer, RenderContext},
    schedule::{schedule_voice, Movement, VoicePlan},
    score::Score,
    section::{FilterSettings, FrequencySpec, MovementMode, SectionConfig, Spread},
    source::Source,
};

/// Linearly interpolate two numbers
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}
