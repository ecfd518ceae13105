//! Trajectory scheduling
//!
//! Turns a voice's start frequency and a set of end frequencies into the
//! frequency ramps the voice follows over a section.

use rand::Rng;

use crate::automation::Timeline;

/// The number of steps in a [`Movement::ChordWalk`] for custom sections
pub const CHORD_WALK_STEPS: usize = 20;
/// The number of steps in the deep note's opening [`Movement::RangeWalk`]
pub const RANGE_WALK_STEPS: usize = 2;

/// How a voice's frequency evolves over a section
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    /// One linear ramp to `end[index % end.len()]`, arriving at the section's end
    Direct,
    /// `steps` equal ramps, each to a frequency drawn from the end frequencies
    ChordWalk {
        /// The number of ramps
        steps: usize,
    },
    /// `steps` equal ramps, each to a frequency drawn from `[min, max]`
    ///
    /// The end frequencies are ignored.
    RangeWalk {
        /// The number of ramps
        steps: usize,
        /// The lowest frequency a ramp may target
        min: f64,
        /// The highest frequency a ramp may target
        max: f64,
    },
}

/// A frequency a voice arrives at, and when
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampPoint {
    /// Arrival time in seconds
    pub time: f64,
    /// Target frequency in Hz
    pub frequency: f64,
}

/// The frequency trajectory of one voice over one section
#[derive(Debug, Clone, PartialEq)]
pub struct VoicePlan {
    /// The frequency the voice starts at
    pub start_frequency: f64,
    /// When the section starts
    pub start_time: f64,
    /// Linear ramps, in time order
    pub ramps: Vec<RampPoint>,
}

impl VoicePlan {
    /// Write the start frequency and every ramp into a timeline
    pub fn apply(&self, timeline: &mut Timeline) {
        timeline.set_value_at(self.start_frequency, self.start_time);
        self.apply_ramps(timeline);
    }
    /// Write only the ramps into a timeline
    ///
    /// Used when a voice carries on from a previous section.
    pub fn apply_ramps(&self, timeline: &mut Timeline) {
        for ramp in &self.ramps {
            timeline.linear_ramp_to(ramp.frequency, ramp.time);
        }
    }
    /// Get the frequency the voice ends the section on
    pub fn end_frequency(&self) -> f64 {
        self.ramps
            .last()
            .map_or(self.start_frequency, |ramp| ramp.frequency)
    }
}

/// Schedule the frequency trajectory of voice `index`
///
/// `Direct` and `ChordWalk` movements produce no ramps when there are no
/// end frequencies.
pub fn schedule_voice<R>(
    index: usize,
    start_frequency: f64,
    end: &[f64],
    movement: &Movement,
    duration: f64,
    start_time: f64,
    rng: &mut R,
) -> VoicePlan
where
    R: Rng + ?Sized,
{
    let ramps = match *movement {
        Movement::Direct if end.is_empty() => Vec::new(),
        Movement::Direct => vec![RampPoint {
            time: start_time + duration,
            frequency: end[index % end.len()],
        }],
        Movement::ChordWalk { .. } if end.is_empty() => Vec::new(),
        Movement::ChordWalk { steps } => walk(steps, duration, start_time, || {
            end[rng.gen_range(0..end.len())]
        }),
        Movement::RangeWalk { steps, min, max } => walk(steps, duration, start_time, || {
            min + rng.gen::<f64>() * (max - min)
        }),
    };
    VoicePlan {
        start_frequency,
        start_time,
        ramps,
    }
}

fn walk(steps: usize, duration: f64, start_time: f64, mut target: impl FnMut() -> f64) -> Vec<RampPoint> {
    let step_time = duration / steps as f64;
    (1..=steps)
        .map(|step| RampPoint {
            time: start_time + step as f64 * step_time,
            frequency: target(),
        })
        .collect()
}
