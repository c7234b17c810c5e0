use crate::error::{DiarmergeError, Result};
use serde::{Deserialize, Serialize};

/// Half-open time interval `[start, end)` in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: f64,
    pub end: f64,
}

impl TimeInterval {
    /// Build an interval, rejecting non-finite bounds and `end <= start`
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(DiarmergeError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    #[allow(dead_code)]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// True when `other` lies entirely inside this interval
    #[allow(dead_code)]
    pub fn contains(&self, other: &TimeInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Anything that occupies a span of the timeline
pub trait Timed {
    fn interval(&self) -> TimeInterval;

    fn start(&self) -> f64 {
        self.interval().start
    }

    fn end(&self) -> f64 {
        self.interval().end
    }
}

impl Timed for TimeInterval {
    fn interval(&self) -> TimeInterval {
        *self
    }
}

/// Length of the intersection of `a` and `b`, zero when disjoint
pub fn overlap(a: &TimeInterval, b: &TimeInterval) -> f64 {
    (a.end.min(b.end) - a.start.max(b.start)).max(0.0)
}

/// Stable sort by start time; equal starts keep their input order
pub fn sort_by_start<T: Timed>(items: &mut [T]) {
    items.sort_by(|a, b| a.start().total_cmp(&b.start()));
}
