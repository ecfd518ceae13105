use crate::source::*;

/// A [`Source`] that sums any number of sources
///
/// Sources are dropped once they end. The mixer itself never ends, so it
/// outputs silence when it has nothing left to play.
#[derive(Default)]
pub struct Mixer {
    sources: Vec<DynamicSource>,
}

impl Mixer {
    /// Create an empty mixer
    pub fn new() -> Self {
        Self::default()
    }
    /// Add a source to the mix
    pub fn add<S>(&mut self, source: S)
    where
        S: Source + Send + 'static,
    {
        self.sources.push(Box::new(source));
    }
    /// Get the number of sources still playing
    pub fn len(&self) -> usize {
        self.sources.len()
    }
    /// Check whether every source has finished
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Source for Mixer {
    fn next(&mut self, sample_rate: f64) -> Option<f64> {
        let mut sum = 0.0;
        self.sources.retain_mut(|source| {
            if let Some(sample) = source.next(sample_rate) {
                sum += sample;
                true
            } else {
                false
            }
        });
        Some(sum)
    }
}
