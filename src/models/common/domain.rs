#[cfg(test)]
#[path = "../../../tests/unit/models/common/domain_test.rs"]
mod domain_test;

use crate::models::common::Timestamp;
use hashbrown::HashSet;

/// Specifies location type as an index into the cost matrix.
pub type Location = usize;

/// Specifies a skill required by a job or offered by a vehicle.
pub type Skill = usize;

/// Specifies a set of skills.
pub type Skills = HashSet<Skill>;

/// Represents a time window.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimeWindow {
    /// Start of time window.
    pub start: Timestamp,
    /// End of time window.
    pub end: Timestamp,
}

impl TimeWindow {
    /// Creates a new [`TimeWindow`].
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Returns unlimited time window.
    pub fn max() -> Self {
        Self { start: 0, end: Timestamp::MAX }
    }

    /// Checks whether time window contains given time.
    pub fn contains(&self, time: Timestamp) -> bool {
        self.start <= time && time <= self.end
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::max()
    }
}
