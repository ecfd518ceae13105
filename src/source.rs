//! Audio sources

use crate::{
    automation::Automation,
    filter::{Biquad, FilterKind},
};

/// A mono audio source
pub trait Source {
    /// Get the next sample
    ///
    /// Returning [`None`] indicates the source has no samples left
    fn next(&mut self, sample_rate: f64) -> Option<f64>;
    /// Amplify the source by some multiplier
    fn amplify<A>(self, amp: A) -> Amplify<Self, A>
    where
        Self: Sized,
        A: Automation,
    {
        Amplify { source: self, amp }
    }
    /// Play the source only between `start` and `stop` seconds
    ///
    /// The source outputs silence before `start` without being advanced,
    /// and ends at `stop`.
    fn scheduled(self, start: f64, stop: f64) -> Scheduled<Self>
    where
        Self: Sized,
    {
        Scheduled {
            source: self,
            start,
            stop,
            time: 0.0,
        }
    }
    /// Apply a low-pass filter with the given cut-off frequency and Q
    fn low_pass<F>(self, cutoff: F, q: f64) -> Filtered<Self, F>
    where
        Self: Sized,
        F: Automation,
    {
        Filtered {
            source: self,
            cutoff,
            biquad: Biquad::new(FilterKind::Lowpass, q),
        }
    }
    /// Apply a high-pass filter with the given cut-off frequency and Q
    fn high_pass<F>(self, cutoff: F, q: f64) -> Filtered<Self, F>
    where
        Self: Sized,
        F: Automation,
    {
        Filtered {
            source: self,
            cutoff,
            biquad: Biquad::new(FilterKind::Highpass, q),
        }
    }
}

impl<S> Source for Box<S>
where
    S: Source + ?Sized,
{
    fn next(&mut self, sample_rate: f64) -> Option<f64> {
        (**self).next(sample_rate)
    }
}

pub(crate) type DynamicSource = Box<dyn Source + Send + 'static>;

/// A source that returns a constant value
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constant(pub f64);

impl Source for Constant {
    fn next(&mut self, _sample_rate: f64) -> Option<f64> {
        Some(self.0)
    }
}

/// Source returned from [`Source::amplify`]
#[derive(Debug, Clone)]
pub struct Amplify<S, A> {
    source: S,
    amp: A,
}

impl<S, A> Source for Amplify<S, A>
where
    S: Source,
    A: Automation,
{
    fn next(&mut self, sample_rate: f64) -> Option<f64> {
        let sample = self.source.next(sample_rate)?;
        let amp = self.amp.next_value(sample_rate)?;
        Some(sample * amp)
    }
}

/// Source returned from [`Source::scheduled`]
#[derive(Debug, Clone)]
pub struct Scheduled<S> {
    source: S,
    start: f64,
    stop: f64,
    time: f64,
}

impl<S> Source for Scheduled<S>
where
    S: Source,
{
    fn next(&mut self, sample_rate: f64) -> Option<f64> {
        if self.time >= self.stop {
            return None;
        }
        let sample = if self.time < self.start {
            0.0
        } else {
            self.source.next(sample_rate)?
        };
        self.time += 1.0 / sample_rate;
        Some(sample)
    }
}

/// Source returned from [`Source::low_pass`] and [`Source::high_pass`]
#[derive(Debug, Clone)]
pub struct Filtered<S, F> {
    source: S,
    cutoff: F,
    biquad: Biquad,
}

impl<S, F> Source for Filtered<S, F>
where
    S: Source,
    F: Automation,
{
    fn next(&mut self, sample_rate: f64) -> Option<f64> {
        let cutoff = self.cutoff.next_value(sample_rate)?;
        let sample = self.source.next(sample_rate)?;
        self.biquad.set_cutoff(cutoff, sample_rate);
        Some(self.biquad.process(sample))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::Timeline;

    #[test]
    fn scheduled_is_silent_then_ends() {
        let mut source = Constant(1.0).scheduled(0.5, 1.0);
        let samples: Vec<f64> = std::iter::from_fn(|| source.next(4.0)).collect();
        assert_eq!(samples, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn amplify_follows_automation() {
        let mut gain = Timeline::new(0.0);
        gain.set_value_at(0.0, 0.0).linear_ramp_to(1.0, 1.0);
        let mut source = Constant(2.0).amplify(gain.cursor_from(0.0));
        let samples: Vec<f64> = (0..3).map(|_| source.next(2.0).unwrap()).collect();
        assert_eq!(samples, [0.0, 1.0, 2.0]);
    }

    #[test]
    fn boxed_sources_chain() {
        let boxed: DynamicSource = Box::new(Constant(0.5));
        let mut source = boxed.amplify(2.0);
        assert_eq!(source.next(44100.0), Some(1.0));
    }
}
