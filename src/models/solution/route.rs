#[cfg(test)]
#[path = "../../../tests/unit/models/solution/route_test.rs"]
mod route_test;

use crate::models::common::{Location, Timestamp};
use crate::models::Input;
use crate::utils::GenericResult;

/// A route executed by one vehicle together with its time window profiles.
///
/// Per position, `earliest` keeps the earliest feasible service start respecting
/// preceding travel and time windows, and `latest` the latest start which still lets
/// every subsequent job complete on time. The profiles make single insertion checks
/// O(1) and segment checks O(segment length), at the price of O(route length)
/// maintenance on mutation.
#[derive(Clone, Debug)]
pub struct TwRoute {
    /// Index of the vehicle executing this route.
    pub vehicle: usize,
    /// Ordered job indices.
    pub route: Vec<usize>,
    /// Earliest feasible service start per position.
    pub earliest: Vec<Timestamp>,
    /// Latest service start per position which keeps all downstream jobs on time.
    pub latest: Vec<Timestamp>,
    /// Index of the time window chosen per position.
    pub tw_ranks: Vec<usize>,
}

impl TwRoute {
    /// Creates an empty route for given vehicle.
    pub fn new(vehicle: usize) -> Self {
        Self { vehicle, route: vec![], earliest: vec![], latest: vec![], tw_ranks: vec![] }
    }

    /// Creates a route from a job sequence, rejecting sequences which cannot be
    /// scheduled within vehicle shift and job time windows.
    pub fn with_route(input: &Input, vehicle: usize, route: Vec<usize>) -> GenericResult<Self> {
        let mut tw_route = Self { vehicle, route, earliest: vec![], latest: vec![], tw_ranks: vec![] };

        if tw_route.rebuild(input) {
            Ok(tw_route)
        } else {
            Err(format!("route of vehicle {vehicle} violates time window constraints").into())
        }
    }

    /// Checks whether inserting given job at given rank keeps every downstream job
    /// on time.
    pub fn is_valid_addition_for_tw(&self, input: &Input, job_idx: usize, rank: usize) -> bool {
        let vehicle = input.vehicle(self.vehicle);
        let matrix = input.matrix();
        let job = input.job(job_idx);

        let (time, loc) = self.departure_before(input, rank);
        let arrival = time.saturating_add(matrix.duration(loc, job.location));

        let bound = if rank == self.route.len() {
            vehicle
                .time_window
                .end
                .saturating_sub(matrix.duration(job.location, vehicle.end))
                .saturating_sub(job.service)
        } else {
            let next = input.job(self.route[rank]).location;
            self.latest[rank].saturating_sub(matrix.duration(job.location, next)).saturating_sub(job.service)
        };

        job.time_windows.iter().any(|tw| arrival <= tw.end && arrival.max(tw.start) <= bound)
    }

    /// Checks whether replacing positions `first_rank..last_rank` with given job
    /// sequence keeps the route schedulable. An empty sequence turns this into a
    /// removal check, `first_rank == last_rank` into a pure insertion check.
    pub fn is_valid_addition_for_tw_seq<I>(&self, input: &Input, jobs: I, first_rank: usize, last_rank: usize) -> bool
    where
        I: Iterator<Item = usize>,
    {
        debug_assert!(first_rank <= last_rank && last_rank <= self.route.len());

        let vehicle = input.vehicle(self.vehicle);
        let matrix = input.matrix();

        let (mut time, mut loc) = self.departure_before(input, first_rank);
        let mut count = 0;

        for job_idx in jobs {
            let job = input.job(job_idx);
            let arrival = time.saturating_add(matrix.duration(loc, job.location));

            match job.time_windows.iter().find(|tw| tw.end >= arrival) {
                Some(tw) => {
                    time = arrival.max(tw.start).saturating_add(job.service);
                    loc = job.location;
                    count += 1;
                }
                None => return false,
            }
        }

        if last_rank == self.route.len() {
            if count == 0 && first_rank == 0 {
                // Route becomes empty, the vehicle is simply not used.
                return true;
            }
            time.saturating_add(matrix.duration(loc, vehicle.end)) <= vehicle.time_window.end
        } else {
            let next = input.job(self.route[last_rank]).location;
            time.saturating_add(matrix.duration(loc, next)) <= self.latest[last_rank]
        }
    }

    /// Checks whether removing `count` jobs starting at given rank keeps the rest of
    /// the route schedulable.
    pub fn is_valid_removal(&self, input: &Input, rank: usize, count: usize) -> bool {
        self.is_valid_addition_for_tw_seq(input, std::iter::empty(), rank, rank + count)
    }

    /// Inserts given job at given rank and updates the profiles. The insertion must
    /// have been validated beforehand.
    pub fn add(&mut self, input: &Input, job_idx: usize, rank: usize) {
        debug_assert!(self.is_valid_addition_for_tw(input, job_idx, rank));

        let job = input.job(job_idx);
        let (time, loc) = self.departure_before(input, rank);
        let arrival = time.saturating_add(input.matrix().duration(loc, job.location));
        let tw_rank =
            job.time_windows.iter().position(|tw| tw.end >= arrival).unwrap_or(job.time_windows.len() - 1);

        self.route.insert(rank, job_idx);
        self.tw_ranks.insert(rank, tw_rank);
        self.earliest.insert(rank, 0);
        self.latest.insert(rank, Timestamp::MAX);

        self.update_earliest_from(input, rank);
        self.update_latest_from(input, rank);
    }

    /// Removes `count` jobs starting at given rank and updates the profiles. The
    /// removal must have been validated beforehand.
    pub fn remove(&mut self, input: &Input, rank: usize, count: usize) {
        debug_assert!(self.is_valid_removal(input, rank, count));

        self.route.drain(rank..rank + count);
        self.earliest.drain(rank..rank + count);
        self.latest.drain(rank..rank + count);
        self.tw_ranks.drain(rank..rank + count);

        if self.route.is_empty() {
            return;
        }

        if rank < self.route.len() {
            self.update_earliest_from(input, rank);
        }
        if rank > 0 {
            self.update_latest_from(input, rank - 1);
        }
    }

    /// Replaces positions `first_rank..last_rank` with given job sequence and rebuilds
    /// the profiles. The replacement must have been validated beforehand.
    pub fn replace<I>(&mut self, input: &Input, jobs: I, first_rank: usize, last_rank: usize)
    where
        I: Iterator<Item = usize>,
    {
        self.route.splice(first_rank..last_rank, jobs).for_each(drop);

        let feasible = self.rebuild(input);
        debug_assert!(feasible, "route replacement violates time window constraints");
    }

    /// Recomputes both profiles from scratch, returning false when the sequence cannot
    /// be scheduled.
    fn rebuild(&mut self, input: &Input) -> bool {
        let vehicle = input.vehicle(self.vehicle);
        let matrix = input.matrix();
        let len = self.route.len();

        self.earliest.clear();
        self.latest.clear();
        self.tw_ranks.clear();

        let mut time = vehicle.time_window.start;
        let mut loc = vehicle.start;

        for &job_idx in &self.route {
            let job = input.job(job_idx);
            let arrival = time.saturating_add(matrix.duration(loc, job.location));

            let tw_rank = match job.time_windows.iter().position(|tw| tw.end >= arrival) {
                Some(tw_rank) => tw_rank,
                None => return false,
            };

            let start = arrival.max(job.time_windows[tw_rank].start);
            self.earliest.push(start);
            self.tw_ranks.push(tw_rank);

            time = start.saturating_add(job.service);
            loc = job.location;
        }

        if len > 0 && time.saturating_add(matrix.duration(loc, vehicle.end)) > vehicle.time_window.end {
            return false;
        }

        self.latest = vec![0; len];
        for idx in (0..len).rev() {
            let candidate = self.latest_candidate_at(input, idx);
            if self.earliest[idx] > candidate {
                return false;
            }
            self.latest[idx] = candidate;
        }

        true
    }

    /// Returns departure time and location of the stop preceding given rank.
    fn departure_before(&self, input: &Input, rank: usize) -> (Timestamp, Location) {
        let vehicle = input.vehicle(self.vehicle);

        if rank == 0 {
            (vehicle.time_window.start, vehicle.start)
        } else {
            let job = input.job(self.route[rank - 1]);
            (self.earliest[rank - 1].saturating_add(job.service), job.location)
        }
    }

    fn earliest_candidate_at(&self, input: &Input, idx: usize) -> Timestamp {
        let job = input.job(self.route[idx]);
        let (time, loc) = self.departure_before(input, idx);
        let arrival = time.saturating_add(input.matrix().duration(loc, job.location));

        arrival.max(job.time_windows[self.tw_ranks[idx]].start)
    }

    fn latest_candidate_at(&self, input: &Input, idx: usize) -> Timestamp {
        let vehicle = input.vehicle(self.vehicle);
        let matrix = input.matrix();
        let job = input.job(self.route[idx]);

        let bound = if idx == self.route.len() - 1 {
            vehicle.time_window.end.saturating_sub(matrix.duration(job.location, vehicle.end))
        } else {
            let next = input.job(self.route[idx + 1]).location;
            self.latest[idx + 1].saturating_sub(matrix.duration(job.location, next))
        };

        bound.saturating_sub(job.service).min(job.time_windows[self.tw_ranks[idx]].end)
    }

    /// Propagates earliest starts forward from given rank until they settle.
    fn update_earliest_from(&mut self, input: &Input, rank: usize) {
        for idx in rank..self.route.len() {
            let candidate = self.earliest_candidate_at(input, idx);
            if idx != rank && candidate == self.earliest[idx] {
                break;
            }
            debug_assert!(candidate <= self.latest[idx]);
            self.earliest[idx] = candidate;
        }
    }

    /// Propagates latest starts backward from given rank until they settle.
    fn update_latest_from(&mut self, input: &Input, rank: usize) {
        for idx in (0..=rank).rev() {
            let candidate = self.latest_candidate_at(input, idx);
            if idx != rank && candidate == self.latest[idx] {
                break;
            }
            debug_assert!(self.earliest[idx] <= candidate);
            self.latest[idx] = candidate;
        }
    }
}
