//! Biquad filters
//!
//! Coefficients follow the Audio EQ Cookbook as used by browser
//! `BiquadFilterNode`s, where the Q of low- and high-pass filters is given
//! in decibels.

use std::f64::consts::PI;

/// The response of a [`Biquad`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Pass frequencies below the cut-off
    Lowpass,
    /// Pass frequencies above the cut-off
    Highpass,
}

/// A second order IIR filter in transposed direct form II
#[derive(Debug, Clone)]
pub struct Biquad {
    kind: FilterKind,
    q: f64,
    cutoff: f64,
    sample_rate: f64,
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    z1: f64,
    z2: f64,
}

impl Biquad {
    /// Create a filter with the given response and Q in decibels
    ///
    /// Coefficients are computed on the first call to [`Biquad::set_cutoff`].
    pub fn new(kind: FilterKind, q: f64) -> Self {
        Biquad {
            kind,
            q,
            cutoff: f64::NAN,
            sample_rate: f64::NAN,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            z1: 0.0,
            z2: 0.0,
        }
    }
    /// Get the kind of filter
    pub fn kind(&self) -> FilterKind {
        self.kind
    }
    /// Set the cut-off frequency, recomputing coefficients if it changed
    pub fn set_cutoff(&mut self, cutoff: f64, sample_rate: f64) {
        if cutoff == self.cutoff && sample_rate == self.sample_rate {
            return;
        }
        self.cutoff = cutoff;
        self.sample_rate = sample_rate;

        let nyquist = sample_rate / 2.0;
        let w0 = 2.0 * PI * cutoff.clamp(1.0, nyquist * 0.999) / sample_rate;
        let (sin_w0, cos_w0) = w0.sin_cos();
        let alpha = sin_w0 / (2.0 * 10f64.powf(self.q / 20.0));

        let (b0, b1, b2) = match self.kind {
            FilterKind::Lowpass => {
                let b1 = 1.0 - cos_w0;
                (b1 / 2.0, b1, b1 / 2.0)
            }
            FilterKind::Highpass => {
                let b1 = -(1.0 + cos_w0);
                (-b1 / 2.0, b1, -b1 / 2.0)
            }
        };
        let a0 = 1.0 + alpha;
        self.b0 = b0 / a0;
        self.b1 = b1 / a0;
        self.b2 = b2 / a0;
        self.a1 = -2.0 * cos_w0 / a0;
        self.a2 = (1.0 - alpha) / a0;
    }
    /// Filter one sample
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b0 * input + self.z1;
        self.z1 = self.b1 * input - self.a1 * output + self.z2;
        self.z2 = self.b2 * input - self.a2 * output;
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(kind: FilterKind, cutoff: f64, input: impl Fn(usize) -> f64) -> f64 {
        let mut biquad = Biquad::new(kind, 1.7);
        biquad.set_cutoff(cutoff, 44100.0);
        let mut peak = 0.0f64;
        for i in 0..44100 {
            let out = biquad.process(input(i));
            if i > 40000 {
                peak = peak.max(out.abs());
            }
        }
        peak
    }

    #[test]
    fn lowpass_passes_dc() {
        let out = settle(FilterKind::Lowpass, 7000.0, |_| 1.0);
        assert!((out - 1.0).abs() < 1e-6, "{out}");
    }

    #[test]
    fn highpass_blocks_dc() {
        let out = settle(FilterKind::Highpass, 60.0, |_| 1.0);
        assert!(out < 1e-3, "{out}");
    }

    #[test]
    fn lowpass_attenuates_nyquist() {
        let out = settle(FilterKind::Lowpass, 1000.0, |i| if i % 2 == 0 { 1.0 } else { -1.0 });
        assert!(out < 0.01, "{out}");
    }
}
