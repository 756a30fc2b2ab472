use crate::models::common::{Amount, Location, Skills, TimeWindow};

/// Represents a vehicle of the fleet.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// Start location of the vehicle shift.
    pub start: Location,
    /// End location of the vehicle shift.
    pub end: Location,
    /// Vehicle capacity, same dimension as job demand.
    pub capacity: Amount,
    /// Skills offered by the vehicle, tested as a superset of job skills.
    pub skills: Skills,
    /// Shift time window within which all travel and service must happen.
    pub time_window: TimeWindow,
}

impl Vehicle {
    /// Creates a new instance of [`Vehicle`] with open shift and no skills.
    pub fn new(start: Location, end: Location, capacity: Amount) -> Self {
        Self { start, end, capacity, skills: Skills::default(), time_window: TimeWindow::max() }
    }

    /// Sets vehicle skills.
    pub fn with_skills(mut self, skills: Skills) -> Self {
        self.skills = skills;
        self
    }

    /// Sets vehicle shift time window.
    pub fn with_time_window(mut self, time_window: TimeWindow) -> Self {
        self.time_window = time_window;
        self
    }
}
