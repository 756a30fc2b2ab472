#[cfg(test)]
#[path = "../../../tests/unit/solver/search/relocate_test.rs"]
mod relocate_test;

use super::*;
use crate::construction::addition_cost;

/// Removes the single job at source rank and inserts it into the target route.
pub struct Relocate {
    s_vehicle: usize,
    s_rank: usize,
    t_vehicle: usize,
    t_rank: usize,
    gain: Gain,
}

impl Relocate {
    /// Creates a new instance of [`Relocate`].
    pub fn new(
        input: &Input,
        state: &SolutionState,
        sol: &TwSolution,
        s_vehicle: usize,
        s_rank: usize,
        t_vehicle: usize,
        t_rank: usize,
    ) -> Self {
        let job = sol[s_vehicle].route[s_rank];

        let s_gain = state.node_gains[s_vehicle][s_rank];
        let t_gain = -addition_cost(input, job, t_vehicle, &sol[t_vehicle].route, t_rank);

        Self { s_vehicle, s_rank, t_vehicle, t_rank, gain: s_gain + t_gain }
    }
}

impl LocalOperator for Relocate {
    fn gain(&self) -> Gain {
        self.gain
    }

    fn is_valid(&self, input: &Input, state: &SolutionState, sol: &TwSolution) -> bool {
        let job = sol[self.s_vehicle].route[self.s_rank];
        let t_amount = state.total_amount(self.t_vehicle) + input.job(job).amount;

        input.vehicle_ok_with_job(self.t_vehicle, job)
            && input.vehicle(self.t_vehicle).capacity.can_fit(&t_amount)
            && sol[self.t_vehicle].is_valid_addition_for_tw(input, job, self.t_rank)
            && sol[self.s_vehicle].is_valid_removal(input, self.s_rank, 1)
    }

    fn apply(&self, input: &Input, sol: &mut TwSolution) {
        let job = sol[self.s_vehicle].route[self.s_rank];

        sol[self.t_vehicle].add(input, job, self.t_rank);
        sol[self.s_vehicle].remove(input, self.s_rank, 1);
    }

    fn addition_candidates(&self) -> Vec<usize> {
        vec![self.s_vehicle]
    }
}
