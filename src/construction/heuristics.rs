#[cfg(test)]
#[path = "../../tests/unit/construction/heuristics_test.rs"]
mod heuristics_test;

use crate::models::common::Gain;
use crate::models::solution::TwRoute;
use crate::models::Input;

/// Direction in which [`single_route_heuristic`] rebuilds a route.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Grow the route from the vehicle start location.
    Forward,
    /// Grow the route towards the vehicle end location.
    Backward,
}

/// Returns the cost change of inserting given job at given rank into the route of
/// given vehicle. Inserting into an empty route pays both depot edges.
pub fn addition_cost(input: &Input, job: usize, vehicle: usize, route: &[usize], rank: usize) -> Gain {
    let matrix = input.matrix();
    let v = input.vehicle(vehicle);
    let loc = input.job(job).location;

    let prev = if rank == 0 { v.start } else { input.job(route[rank - 1]).location };
    let next = if rank == route.len() { v.end } else { input.job(route[rank]).location };
    let reconnect = if route.is_empty() { 0 } else { matrix.cost(prev, next) };

    matrix.cost(prev, loc) + matrix.cost(loc, next) - reconnect
}

/// Returns the cost change of inserting the ordered pair `(first, second)` at given
/// rank into the route of given vehicle.
pub fn edge_addition_cost(
    input: &Input,
    first: usize,
    second: usize,
    vehicle: usize,
    route: &[usize],
    rank: usize,
) -> Gain {
    let matrix = input.matrix();
    let v = input.vehicle(vehicle);
    let first_loc = input.job(first).location;
    let second_loc = input.job(second).location;

    let prev = if rank == 0 { v.start } else { input.job(route[rank - 1]).location };
    let next = if rank == route.len() { v.end } else { input.job(route[rank]).location };
    let reconnect = if route.is_empty() { 0 } else { matrix.cost(prev, next) };

    matrix.cost(prev, first_loc) + matrix.cost(first_loc, second_loc) + matrix.cost(second_loc, next) - reconnect
}

/// Rebuilds a single route over its own job set with a deterministic nearest addition
/// strategy: repeatedly extend the route at one side with the cheapest feasible job,
/// growing from the vehicle start (forward) or towards the vehicle end (backward).
///
/// Jobs which no longer fit anywhere are dropped, so the result can be shorter than
/// the original route; callers interested in straightening only are expected to
/// reject such results.
pub fn single_route_heuristic(input: &Input, tw_route: &TwRoute, direction: Direction) -> TwRoute {
    let mut remaining = tw_route.route.clone();
    let mut result = TwRoute::new(tw_route.vehicle);

    while !remaining.is_empty() {
        let rank = match direction {
            Direction::Forward => result.route.len(),
            Direction::Backward => 0,
        };

        let best = remaining
            .iter()
            .enumerate()
            .filter(|(_, &job)| result.is_valid_addition_for_tw(input, job, rank))
            .min_by_key(|(_, &job)| (addition_cost(input, job, tw_route.vehicle, &result.route, rank), job))
            .map(|(idx, _)| idx);

        match best {
            Some(idx) => {
                let job = remaining.swap_remove(idx);
                result.add(input, job, rank);
            }
            None => break,
        }
    }

    result
}
