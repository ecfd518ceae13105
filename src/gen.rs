//! Wave generation

use std::{f64::consts::TAU, fmt, str::FromStr};

use crate::{automation::Automation, source::Source};

/// The oscillator shapes a voice can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[allow(missing_docs)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Get the amplitude of a 1 Hz wave at the given time
    ///
    /// This is in the range [-1.0, 1.0]
    pub fn one_hz(&self, time: f64) -> f64 {
        match self {
            Waveform::Sine => (time * TAU).sin(),
            Waveform::Square => {
                if (time * 2.0).floor() as i64 % 2 == 0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * (time - (time + 0.5).floor()),
            Waveform::Triangle => 2.0 * Waveform::Sawtooth.one_hz(time + 0.25).abs() - 1.0,
        }
    }
    /// The name used in configuration
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown waveform name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown waveform `{0}`")]
pub struct UnknownWaveform(pub String);

impl FromStr for Waveform {
    type Err = UnknownWaveform;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "sine" => Waveform::Sine,
            "square" => Waveform::Square,
            "sawtooth" => Waveform::Sawtooth,
            "triangle" => Waveform::Triangle,
            _ => return Err(UnknownWaveform(s.into())),
        })
    }
}

/// A [`Source`] that outputs a wave whose frequency follows an [`Automation`]
#[derive(Debug, Clone)]
pub struct Oscillator<F> {
    waveform: Waveform,
    freq: F,
    phase: f64,
}

impl<F> Oscillator<F>
where
    F: Automation,
{
    /// Create a new oscillator with the given waveform and frequency
    pub fn new(waveform: Waveform, freq: F) -> Self {
        Oscillator {
            waveform,
            freq,
            phase: 0.0,
        }
    }
}

impl<F> Source for Oscillator<F>
where
    F: Automation,
{
    fn next(&mut self, sample_rate: f64) -> Option<f64> {
        let freq = self.freq.next_value(sample_rate)?;
        let res = self.waveform.one_hz(self.phase);
        self.phase = (self.phase + freq / sample_rate).fract();
        Some(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveforms_stay_in_range() {
        for waveform in [
            Waveform::Sine,
            Waveform::Square,
            Waveform::Sawtooth,
            Waveform::Triangle,
        ] {
            for i in 0..100 {
                let a = waveform.one_hz(i as f64 / 37.0);
                assert!((-1.0..=1.0).contains(&a), "{waveform} gave {a}");
            }
        }
    }

    #[test]
    fn waveform_shapes() {
        assert!(Waveform::Sine.one_hz(0.25) > 0.999);
        assert_eq!(Waveform::Square.one_hz(0.1), 1.0);
        assert_eq!(Waveform::Square.one_hz(0.6), -1.0);
        assert_eq!(Waveform::Sawtooth.one_hz(0.0), 0.0);
        assert!((Waveform::Triangle.one_hz(0.25) - 1.0).abs() < 1e-9);
        assert!(Waveform::Triangle.one_hz(0.0).abs() < 1e-9);
    }

    #[test]
    fn waveform_names() {
        assert_eq!("sawtooth".parse(), Ok(Waveform::Sawtooth));
        assert!("noise".parse::<Waveform>().is_err());
        assert_eq!(Waveform::Triangle.to_string(), "triangle");
    }

    #[test]
    fn oscillator_period() {
        let sample_rate = 400.0;
        let mut osc = Oscillator::new(Waveform::Sine, 100.0);
        let samples: Vec<f64> = (0..8).map(|_| osc.next(sample_rate).unwrap()).collect();
        assert!(samples[0].abs() < 1e-9);
        assert!((samples[1] - 1.0).abs() < 1e-9);
        assert!((samples[4] - samples[0]).abs() < 1e-9);
    }
}
