#[cfg(test)]
#[path = "../../../tests/unit/solver/search/exchange_test.rs"]
mod exchange_test;

use super::*;
use std::iter::once;

/// Swaps the single job at source rank with the single job at target rank.
pub struct Exchange {
    s_vehicle: usize,
    s_rank: usize,
    t_vehicle: usize,
    t_rank: usize,
    gain: Gain,
}

impl Exchange {
    /// Creates a new instance of [`Exchange`].
    pub fn new(
        input: &Input,
        _state: &SolutionState,
        sol: &TwSolution,
        s_vehicle: usize,
        s_rank: usize,
        t_vehicle: usize,
        t_rank: usize,
    ) -> Self {
        let matrix = input.matrix();
        let s_route = sol[s_vehicle].route.as_slice();
        let t_route = sol[t_vehicle].route.as_slice();

        let s_loc = job_location(input, s_route, s_rank);
        let t_loc = job_location(input, t_route, t_rank);

        let s_prev = previous_location(input, s_vehicle, s_route, s_rank);
        let s_next = next_location(input, s_vehicle, s_route, s_rank);
        let s_gain = matrix.cost(s_prev, s_loc) + matrix.cost(s_loc, s_next)
            - matrix.cost(s_prev, t_loc)
            - matrix.cost(t_loc, s_next);

        let t_prev = previous_location(input, t_vehicle, t_route, t_rank);
        let t_next = next_location(input, t_vehicle, t_route, t_rank);
        let t_gain = matrix.cost(t_prev, t_loc) + matrix.cost(t_loc, t_next)
            - matrix.cost(t_prev, s_loc)
            - matrix.cost(s_loc, t_next);

        Self { s_vehicle, s_rank, t_vehicle, t_rank, gain: s_gain + t_gain }
    }
}

impl LocalOperator for Exchange {
    fn gain(&self) -> Gain {
        self.gain
    }

    fn is_valid(&self, input: &Input, state: &SolutionState, sol: &TwSolution) -> bool {
        let s_job = sol[self.s_vehicle].route[self.s_rank];
        let t_job = sol[self.t_vehicle].route[self.t_rank];

        let s_amount = state.total_amount(self.s_vehicle) - input.job(s_job).amount + input.job(t_job).amount;
        let t_amount = state.total_amount(self.t_vehicle) - input.job(t_job).amount + input.job(s_job).amount;

        input.vehicle_ok_with_job(self.s_vehicle, t_job)
            && input.vehicle_ok_with_job(self.t_vehicle, s_job)
            && input.vehicle(self.s_vehicle).capacity.can_fit(&s_amount)
            && input.vehicle(self.t_vehicle).capacity.can_fit(&t_amount)
            && sol[self.s_vehicle].is_valid_addition_for_tw_seq(input, once(t_job), self.s_rank, self.s_rank + 1)
            && sol[self.t_vehicle].is_valid_addition_for_tw_seq(input, once(s_job), self.t_rank, self.t_rank + 1)
    }

    fn apply(&self, input: &Input, sol: &mut TwSolution) {
        let s_job = sol[self.s_vehicle].route[self.s_rank];
        let t_job = sol[self.t_vehicle].route[self.t_rank];

        sol[self.s_vehicle].replace(input, once(t_job), self.s_rank, self.s_rank + 1);
        sol[self.t_vehicle].replace(input, once(s_job), self.t_rank, self.t_rank + 1);
    }

    fn addition_candidates(&self) -> Vec<usize> {
        vec![self.s_vehicle, self.t_vehicle]
    }
}
