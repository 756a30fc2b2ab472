use crate::models::common::{Amount, Duration, Location, Skills, TimeWindow};

/// Represents an atomic service request at some location.
#[derive(Clone, Debug)]
pub struct Job {
    /// Location index of the job.
    pub location: Location,
    /// Job demand, elementwise additive.
    pub amount: Amount,
    /// Skills required to serve the job.
    pub skills: Skills,
    /// Service duration spent on site.
    pub service: Duration,
    /// Time windows during which service can start, sorted and non-overlapping.
    pub time_windows: Vec<TimeWindow>,
}

impl Job {
    /// Creates a new instance of [`Job`] with wide open time window and no extra
    /// requirements.
    pub fn new(location: Location, amount: Amount) -> Self {
        Self { location, amount, skills: Skills::default(), service: 0, time_windows: vec![TimeWindow::max()] }
    }

    /// Sets job skills.
    pub fn with_skills(mut self, skills: Skills) -> Self {
        self.skills = skills;
        self
    }

    /// Sets service duration.
    pub fn with_service(mut self, service: Duration) -> Self {
        self.service = service;
        self
    }

    /// Sets job time windows.
    pub fn with_time_windows(mut self, time_windows: Vec<TimeWindow>) -> Self {
        self.time_windows = time_windows;
        self
    }
}
