#[cfg(test)]
#[path = "../../tests/unit/models/domain_test.rs"]
mod domain_test;

use crate::models::common::Amount;
use crate::models::problem::{CostMatrix, Job, Vehicle};
use crate::utils::GenericResult;

/// An immutable description of a problem instance: fleet, jobs and the travel cost
/// matrix, together with a few quantities derived once at construction time.
pub struct Input {
    jobs: Vec<Job>,
    vehicles: Vec<Vehicle>,
    matrix: CostMatrix,
    amount_size: usize,
    amount_lower_bound: Amount,
    double_amount_lower_bound: Amount,
}

impl Input {
    /// Creates a new instance of [`Input`], validating basic model consistency.
    pub fn new(jobs: Vec<Job>, vehicles: Vec<Vehicle>, matrix: CostMatrix) -> GenericResult<Self> {
        let amount_size = jobs
            .first()
            .map(|job| job.amount.size())
            .or_else(|| vehicles.first().map(|vehicle| vehicle.capacity.size()))
            .unwrap_or_default();

        for (idx, job) in jobs.iter().enumerate() {
            if job.amount.size() != amount_size {
                return Err(format!("job {idx} has amount of dimension {}, expected {amount_size}", job.amount.size())
                    .into());
            }
            if (0..amount_size).any(|dim| job.amount.get(dim) < 0) {
                return Err(format!("job {idx} has negative demand").into());
            }
            if job.location >= matrix.size() {
                return Err(format!("job {idx} location is outside of the cost matrix").into());
            }
            if job.time_windows.is_empty() {
                return Err(format!("job {idx} has no time windows").into());
            }
            if job.time_windows.windows(2).any(|pair| pair[0].end > pair[1].start)
                || job.time_windows.iter().any(|tw| tw.start > tw.end)
            {
                return Err(format!("job {idx} time windows must be sorted and non-overlapping").into());
            }
        }

        for (idx, vehicle) in vehicles.iter().enumerate() {
            if vehicle.capacity.size() != amount_size {
                return Err(format!("vehicle {idx} has capacity of dimension {}", vehicle.capacity.size()).into());
            }
            if vehicle.start >= matrix.size() || vehicle.end >= matrix.size() {
                return Err(format!("vehicle {idx} start or end is outside of the cost matrix").into());
            }
        }

        let amount_lower_bound = jobs
            .iter()
            .map(|job| job.amount)
            .reduce(|left, right| left.component_min(&right))
            .unwrap_or_else(|| Amount::zero(amount_size));

        Ok(Self {
            jobs,
            vehicles,
            matrix,
            amount_size,
            amount_lower_bound,
            double_amount_lower_bound: amount_lower_bound + amount_lower_bound,
        })
    }

    /// Returns all jobs.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Returns job by its index.
    pub fn job(&self, idx: usize) -> &Job {
        &self.jobs[idx]
    }

    /// Returns all vehicles.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Returns vehicle by its index.
    pub fn vehicle(&self, idx: usize) -> &Vehicle {
        &self.vehicles[idx]
    }

    /// Returns the travel cost matrix.
    pub fn matrix(&self) -> &CostMatrix {
        &self.matrix
    }

    /// Returns the dimension of job demand and vehicle capacity vectors.
    pub fn amount_size(&self) -> usize {
        self.amount_size
    }

    /// Returns the componentwise minimum job demand over all jobs.
    pub fn amount_lower_bound(&self) -> &Amount {
        &self.amount_lower_bound
    }

    /// Returns the doubled componentwise minimum job demand.
    pub fn double_amount_lower_bound(&self) -> &Amount {
        &self.double_amount_lower_bound
    }

    /// Checks whether given vehicle offers all skills required by given job.
    pub fn vehicle_ok_with_job(&self, vehicle: usize, job: usize) -> bool {
        self.jobs[job].skills.is_subset(&self.vehicles[vehicle].skills)
    }
}
