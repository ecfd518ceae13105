//! Offline rendering of a [`Score`]

use crate::{
    automation::Automation,
    gen::Oscillator,
    mixer::Mixer,
    reverb::Reverb,
    score::Score,
    source::{DynamicSource, Source},
};

/// The most output channels a render produces
pub const MAX_CHANNELS: u16 = 2;

/// Where a score is rendered to
///
/// Passed explicitly to [`render`] so nothing depends on a shared audio
/// context. Output is mono or stereo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderContext {
    /// Frames per second
    pub sample_rate: u32,
    /// Output channel count
    pub channels: u16,
}

impl Default for RenderContext {
    fn default() -> Self {
        RenderContext {
            sample_rate: 44100,
            channels: 2,
        }
    }
}

impl RenderContext {
    /// Create a context with the given sample rate and channel count
    ///
    /// The channel count is clamped to `1..=MAX_CHANNELS`.
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        RenderContext {
            sample_rate,
            channels,
        }
        .clamped()
    }
    fn clamped(self) -> Self {
        RenderContext {
            channels: self.channels.clamp(1, MAX_CHANNELS),
            ..self
        }
    }
    /// Get the number of frames needed to hold `duration` seconds
    pub fn frames(&self, duration: f64) -> usize {
        (duration.max(0.0) * self.sample_rate as f64).ceil() as usize
    }
}

/// Rendered audio with one sample vector per channel
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Create a silent buffer
    pub fn new(channels: u16, frames: usize, sample_rate: u32) -> Self {
        AudioBuffer {
            sample_rate,
            channels: vec![vec![0.0; frames]; channels as usize],
        }
    }
    /// Create a buffer from per-channel samples
    ///
    /// Every channel should hold the same number of samples. Longer
    /// channels are truncated to the shortest.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        let frames = channels.iter().map(Vec::len).min().unwrap_or(0);
        let channels = channels
            .into_iter()
            .map(|mut channel| {
                channel.truncate(frames);
                channel
            })
            .collect();
        AudioBuffer {
            sample_rate,
            channels,
        }
    }
    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
    /// Get the number of channels
    pub fn channels(&self) -> usize {
        self.channels.len()
    }
    /// Get the number of frames
    pub fn frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }
    /// Get the length in seconds
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }
    /// Get one channel's samples
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }
    /// Get the largest absolute sample
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0, |peak, s| peak.max(s.abs()))
    }
    /// Iterate over samples frame by frame, channels interleaved
    pub fn interleaved(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.frames()).flat_map(move |i| self.channels.iter().map(move |c| c[i]))
    }
}

fn voice_mixer(score: &Score) -> Mixer {
    let mut mixer = Mixer::new();
    for voice in &score.voices {
        let freq = voice.frequency.cursor_from(voice.start);
        let gain = voice.gain.cursor_from(voice.start);
        mixer.add(
            Oscillator::new(voice.waveform, freq)
                .amplify(gain)
                .scheduled(voice.start, voice.stop),
        );
    }
    mixer
}

fn master_bus(score: &Score) -> DynamicSource {
    let mut bus: DynamicSource =
        Box::new(voice_mixer(score).amplify(score.master_gain.cursor_from(0.0)));
    if let Some(lowpass) = &score.lowpass {
        bus = Box::new(bus.low_pass(lowpass.cutoff.cursor_from(0.0), lowpass.q));
    }
    if let Some(highpass) = &score.highpass {
        bus = Box::new(bus.high_pass(highpass.cutoff.cursor_from(0.0), highpass.q));
    }
    bus
}

/// Render a score into a buffer
///
/// The buffer holds exactly the score's duration. Mono contexts get the
/// average of the stereo bus. A channel count outside `1..=MAX_CHANNELS`
/// is clamped.
pub fn render(score: &Score, ctx: &RenderContext) -> AudioBuffer {
    let ctx = ctx.clamped();
    let frames = ctx.frames(score.duration);
    let sample_rate = ctx.sample_rate as f64;
    let mut buffer = AudioBuffer::new(ctx.channels, frames, ctx.sample_rate);

    let mut bus = master_bus(score);
    let mut reverb = score
        .reverb
        .as_ref()
        .map(|wet| (Reverb::new(sample_rate), wet.cursor_from(0.0)));

    for i in 0..frames {
        let dry = bus.next(sample_rate).unwrap_or(0.0);
        let [left, right] = match &mut reverb {
            Some((reverb, wet)) => {
                let wet = wet.next_value(sample_rate).unwrap_or(0.0);
                reverb.process(dry, wet)
            }
            None => [dry, dry],
        };
        match buffer.channels.as_mut_slice() {
            [mono] => mono[i] = ((left + right) / 2.0) as f32,
            [l, r] => {
                l[i] = left as f32;
                r[i] = right as f32;
            }
            _ => {}
        }
    }
    log::debug!(
        "rendered {} voices into {} frames at {} Hz, peak {:.3}",
        score.voices.len(),
        frames,
        ctx.sample_rate,
        buffer.peak()
    );
    buffer
}
