//! A library of neighborhood operators used by the local search driver.
//!
//! Every operator is a candidate modification between a source and a target route,
//! parameterized by vehicle indices and ranks. Operators are transient values: they
//! carry no references into the solution, cache their gain at construction time and
//! answer validity questions against borrowed state.

use crate::models::common::{Gain, Location};
use crate::models::solution::TwSolution;
use crate::models::Input;
use crate::solver::SolutionState;

mod cross_exchange;
pub use self::cross_exchange::CrossExchange;

mod exchange;
pub use self::exchange::Exchange;

mod or_opt;
pub use self::or_opt::OrOpt;

mod relocate;
pub use self::relocate::Relocate;

mod reverse_two_opt;
pub use self::reverse_two_opt::ReverseTwoOpt;

mod two_opt;
pub use self::two_opt::TwoOpt;

/// A candidate local modification between a source and a target route.
pub trait LocalOperator {
    /// Returns the cost reduction achieved by applying this operator, cached at
    /// construction time. Positive means improvement.
    fn gain(&self) -> Gain;

    /// Checks whether the modification preserves capacity, skill and time window
    /// constraints on both routes.
    fn is_valid(&self, input: &Input, state: &SolutionState, sol: &TwSolution) -> bool;

    /// Mutates the two routes in place to realize the modification.
    fn apply(&self, input: &Input, sol: &mut TwSolution);

    /// Returns vehicles whose routes may have freed capacity or time, used as a hint
    /// by the insertion heuristic.
    fn addition_candidates(&self) -> Vec<usize>;
}

/// Returns the location visited right before given rank.
pub(crate) fn previous_location(input: &Input, vehicle: usize, route: &[usize], rank: usize) -> Location {
    if rank == 0 {
        input.vehicle(vehicle).start
    } else {
        input.job(route[rank - 1]).location
    }
}

/// Returns the location visited right after given rank.
pub(crate) fn next_location(input: &Input, vehicle: usize, route: &[usize], rank: usize) -> Location {
    if rank + 1 == route.len() {
        input.vehicle(vehicle).end
    } else {
        input.job(route[rank + 1]).location
    }
}

pub(crate) fn job_location(input: &Input, route: &[usize], rank: usize) -> Location {
    input.job(route[rank]).location
}
