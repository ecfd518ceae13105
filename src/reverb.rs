//! Algorithmic reverb
//!
//! Parallel feedback comb filters into series allpass filters, tuned the
//! Freeverb way. The dry signal always passes at unity and the reverb tail
//! is added on top at the wet level.

#[derive(Debug, Clone)]
struct Comb {
    buffer: Vec<f64>,
    index: usize,
    feedback: f64,
    damp: f64,
    store: f64,
}

impl Comb {
    fn new(size: usize, feedback: f64, damp: f64) -> Self {
        Comb {
            buffer: vec![0.0; size.max(1)],
            index: 0,
            feedback,
            damp,
            store: 0.0,
        }
    }
    fn process(&mut self, input: f64) -> f64 {
        let output = self.buffer[self.index];
        self.store = output * (1.0 - self.damp) + self.store * self.damp;
        self.buffer[self.index] = input + self.store * self.feedback;
        self.index = (self.index + 1) % self.buffer.len();
        output
    }
}

#[derive(Debug, Clone)]
struct Allpass {
    buffer: Vec<f64>,
    index: usize,
}

impl Allpass {
    const FEEDBACK: f64 = 0.5;
    fn new(size: usize) -> Self {
        Allpass {
            buffer: vec![0.0; size.max(1)],
            index: 0,
        }
    }
    fn process(&mut self, input: f64) -> f64 {
        let delayed = self.buffer[self.index];
        self.buffer[self.index] = input + delayed * Self::FEEDBACK;
        self.index = (self.index + 1) % self.buffer.len();
        delayed - input
    }
}

// Delay lengths in samples at 44.1 kHz
const COMB_TUNING: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];
const ALLPASS_TUNING: [usize; 4] = [556, 441, 341, 225];
const STEREO_SPREAD: usize = 23;
const INPUT_GAIN: f64 = 0.015;

#[derive(Debug, Clone)]
struct Channel {
    combs: Vec<Comb>,
    allpasses: Vec<Allpass>,
}

impl Channel {
    fn new(sample_rate: f64, spread: usize, feedback: f64, damp: f64) -> Self {
        let scale = |tuning: usize| ((tuning + spread) as f64 * sample_rate / 44100.0) as usize;
        Channel {
            combs: COMB_TUNING
                .iter()
                .map(|&t| Comb::new(scale(t), feedback, damp))
                .collect(),
            allpasses: ALLPASS_TUNING
                .iter()
                .map(|&t| Allpass::new(scale(t)))
                .collect(),
        }
    }
    fn process(&mut self, input: f64) -> f64 {
        let sum: f64 = self.combs.iter_mut().map(|comb| comb.process(input)).sum();
        self.allpasses
            .iter_mut()
            .fold(sum, |acc, allpass| allpass.process(acc))
    }
}

/// A mono-in, stereo-out reverb with a unity dry path
#[derive(Debug, Clone)]
pub struct Reverb {
    left: Channel,
    right: Channel,
}

impl Reverb {
    /// Create a reverb with a medium room and moderate damping
    pub fn new(sample_rate: f64) -> Self {
        Self::with_room(sample_rate, 0.5, 0.5)
    }
    /// Create a reverb with the given room size and damping, both in [0, 1]
    pub fn with_room(sample_rate: f64, room_size: f64, damping: f64) -> Self {
        let feedback = room_size.clamp(0.0, 1.0) * 0.28 + 0.7;
        let damp = damping.clamp(0.0, 1.0) * 0.4;
        Reverb {
            left: Channel::new(sample_rate, 0, feedback, damp),
            right: Channel::new(sample_rate, STEREO_SPREAD, feedback, damp),
        }
    }
    /// Process one input sample, mixing in the tail at `wet`
    pub fn process(&mut self, input: f64, wet: f64) -> [f64; 2] {
        let scaled = input * INPUT_GAIN;
        let left = self.left.process(scaled);
        let right = self.right.process(scaled);
        [input + wet * left, input + wet * right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_passes_through_without_wet() {
        let mut reverb = Reverb::new(44100.0);
        for i in 0..1000 {
            let input = (i as f64 * 0.01).sin();
            assert_eq!(reverb.process(input, 0.0), [input, input]);
        }
    }

    #[test]
    fn impulse_leaves_a_tail() {
        let mut reverb = Reverb::new(44100.0);
        reverb.process(1.0, 1.0);
        let tail: f64 = (0..22050)
            .map(|_| {
                let [l, r] = reverb.process(0.0, 1.0);
                l.abs() + r.abs()
            })
            .sum();
        assert!(tail > 0.0);
    }

    #[test]
    fn channels_decorrelate() {
        let mut reverb = Reverb::new(44100.0);
        reverb.process(1.0, 1.0);
        let differs = (0..4000).any(|_| {
            let [l, r] = reverb.process(0.0, 1.0);
            (l - r).abs() > 1e-12
        });
        assert!(differs);
    }
}
