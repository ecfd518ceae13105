//! Parameter automation
//!
//! A [`Timeline`] records the same kind of events a browser `AudioParam`
//! accepts: instant value changes and linear or exponential ramps that end
//! at a given time. It can be evaluated at any point in time, and a
//! [`TimelineCursor`] walks it sample by sample while rendering.

use crate::lerp;

/// A value that changes once per sample
pub trait Automation {
    /// Get the next value
    ///
    /// Returning [`None`] ends whatever is being automated
    fn next_value(&mut self, sample_rate: f64) -> Option<f64>;
}

impl Automation for f64 {
    fn next_value(&mut self, _sample_rate: f64) -> Option<f64> {
        Some(*self)
    }
}

/// How a [`SetPoint`] is approached from the event before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ramp {
    /// Jump to the value at the event's time
    Set,
    /// Ramp linearly, arriving at the event's time
    Linear,
    /// Ramp geometrically, arriving at the event's time
    Exponential,
}

/// A single automation event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetPoint {
    /// When the value is reached, in seconds
    pub time: f64,
    /// The value
    pub value: f64,
    /// How the value is approached
    pub ramp: Ramp,
}

/// A schedule of automation events for one parameter
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    default: f64,
    events: Vec<SetPoint>,
}

impl Timeline {
    /// Create an empty timeline that holds `default` until its first event
    pub fn new(default: f64) -> Self {
        Timeline {
            default,
            events: Vec::new(),
        }
    }
    /// Jump to `value` at `time`
    pub fn set_value_at(&mut self, value: f64, time: f64) -> &mut Self {
        self.insert(SetPoint {
            time,
            value,
            ramp: Ramp::Set,
        })
    }
    /// Ramp linearly from the previous event to `value`, arriving at `time`
    pub fn linear_ramp_to(&mut self, value: f64, time: f64) -> &mut Self {
        self.insert(SetPoint {
            time,
            value,
            ramp: Ramp::Linear,
        })
    }
    /// Ramp geometrically from the previous event to `value`, arriving at `time`
    pub fn exponential_ramp_to(&mut self, value: f64, time: f64) -> &mut Self {
        self.insert(SetPoint {
            time,
            value,
            ramp: Ramp::Exponential,
        })
    }
    /// Events at equal times keep the order they were added in
    fn insert(&mut self, point: SetPoint) -> &mut Self {
        let index = self.events.partition_point(|e| e.time <= point.time);
        self.events.insert(index, point);
        self
    }
    /// Get the scheduled events in time order
    pub fn events(&self) -> &[SetPoint] {
        &self.events
    }
    /// Get the value held before the first event
    pub fn default_value(&self) -> f64 {
        self.default
    }
    /// Get the time of the last event, or zero if there are none
    pub fn end_time(&self) -> f64 {
        self.events.last().map_or(0.0, |e| e.time)
    }
    /// Get the value of the parameter at some time
    pub fn value_at(&self, time: f64) -> f64 {
        let index = self.events.partition_point(|e| e.time <= time);
        let (start_time, start_value) = match index.checked_sub(1) {
            Some(i) => (self.events[i].time, self.events[i].value),
            None => (0.0, self.default),
        };
        let Some(next) = self.events.get(index) else {
            return start_value;
        };
        let span = next.time - start_time;
        if span <= 0.0 {
            return start_value;
        }
        let t = ((time - start_time) / span).clamp(0.0, 1.0);
        match next.ramp {
            Ramp::Set => start_value,
            Ramp::Linear => lerp(start_value, next.value, t),
            // Ramps between values of different sign, or away from zero, hold
            Ramp::Exponential if start_value * next.value <= 0.0 => start_value,
            Ramp::Exponential => start_value * (next.value / start_value).powf(t),
        }
    }
    /// Walk the timeline sample by sample, starting at `time`
    pub fn cursor_from(&self, time: f64) -> TimelineCursor {
        TimelineCursor {
            timeline: self.clone(),
            time,
        }
    }
    /// Sample the timeline at a fixed interval over `[start, end]`
    ///
    /// The trace is empty unless `interval` is positive and finite.
    pub fn trace(&self, start: f64, end: f64, interval: f64) -> Vec<(f64, f64)> {
        if !(interval > 0.0 && interval.is_finite()) {
            return Vec::new();
        }
        let steps = ((end - start) / interval).floor().max(0.0) as usize;
        (0..=steps)
            .map(|i| {
                let time = start + i as f64 * interval;
                (time, self.value_at(time))
            })
            .collect()
    }
}

/// An [`Automation`] that reads a [`Timeline`] one sample at a time
#[derive(Debug, Clone)]
pub struct TimelineCursor {
    timeline: Timeline,
    time: f64,
}

impl Automation for TimelineCursor {
    fn next_value(&mut self, sample_rate: f64) -> Option<f64> {
        let value = self.timeline.value_at(self.time);
        self.time += 1.0 / sample_rate;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn holds_default_before_events() {
        let mut timeline = Timeline::new(350.0);
        timeline.set_value_at(7000.0, 2.0);
        assert_eq!(timeline.value_at(0.0), 350.0);
        assert_eq!(timeline.value_at(1.999), 350.0);
        assert_eq!(timeline.value_at(2.0), 7000.0);
        assert_eq!(timeline.value_at(100.0), 7000.0);
    }

    #[test]
    fn linear_ramp_from_previous_event() {
        let mut timeline = Timeline::new(0.0);
        timeline
            .set_value_at(100.0, 1.0)
            .linear_ramp_to(300.0, 3.0);
        assert!(close(timeline.value_at(1.0), 100.0));
        assert!(close(timeline.value_at(2.0), 200.0));
        assert!(close(timeline.value_at(3.0), 300.0));
        assert!(close(timeline.value_at(4.0), 300.0));
    }

    #[test]
    fn exponential_ramp_is_geometric() {
        let mut timeline = Timeline::new(0.0);
        timeline
            .set_value_at(1.0, 0.0)
            .exponential_ramp_to(0.01, 2.0);
        assert!(close(timeline.value_at(1.0), 0.1));
        assert!(close(timeline.value_at(2.0), 0.01));
    }

    #[test]
    fn exponential_ramp_from_zero_holds() {
        let mut timeline = Timeline::new(0.0);
        timeline.exponential_ramp_to(1.0, 1.0);
        assert_eq!(timeline.value_at(0.5), 0.0);
        assert_eq!(timeline.value_at(1.0), 1.0);
    }

    #[test]
    fn events_stay_sorted() {
        let mut timeline = Timeline::new(0.0);
        timeline
            .linear_ramp_to(5.0, 5.0)
            .set_value_at(1.0, 1.0)
            .set_value_at(2.0, 1.0);
        let times: Vec<f64> = timeline.events().iter().map(|e| e.time).collect();
        assert_eq!(times, [1.0, 1.0, 5.0]);
        assert_eq!(timeline.value_at(1.0), 2.0);
        assert!(close(timeline.value_at(3.0), 3.5));
        assert_eq!(timeline.end_time(), 5.0);
    }

    #[test]
    fn cursor_steps_by_sample() {
        let mut timeline = Timeline::new(0.0);
        timeline.set_value_at(0.0, 0.0).linear_ramp_to(4.0, 1.0);
        let mut cursor = timeline.cursor_from(0.0);
        let values: Vec<f64> = (0..5).map(|_| cursor.next_value(4.0).unwrap()).collect();
        assert_eq!(values, [0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn trace_samples_at_interval() {
        let mut timeline = Timeline::new(0.0);
        timeline.set_value_at(0.0, 0.0).linear_ramp_to(1.0, 1.0);
        let trace = timeline.trace(0.0, 1.0, 0.5);
        assert_eq!(trace, [(0.0, 0.0), (0.5, 0.5), (1.0, 1.0)]);
    }

    #[test]
    fn trace_needs_positive_interval() {
        let timeline = Timeline::new(1.0);
        assert!(timeline.trace(0.0, 1.0, 0.0).is_empty());
        assert!(timeline.trace(0.0, 1.0, -0.5).is_empty());
        assert!(timeline.trace(0.0, 1.0, f64::NAN).is_empty());
        assert!(timeline.trace(0.0, 1.0, f64::INFINITY).is_empty());
    }
}
