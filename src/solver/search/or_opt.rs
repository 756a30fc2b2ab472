#[cfg(test)]
#[path = "../../../tests/unit/solver/search/or_opt_test.rs"]
mod or_opt_test;

use super::*;
use crate::construction::edge_addition_cost;

/// Relocates a pair of consecutive jobs from the source route into the target route.
pub struct OrOpt {
    s_vehicle: usize,
    s_rank: usize,
    t_vehicle: usize,
    t_rank: usize,
    gain: Gain,
}

impl OrOpt {
    /// Creates a new instance of [`OrOpt`].
    pub fn new(
        input: &Input,
        state: &SolutionState,
        sol: &TwSolution,
        s_vehicle: usize,
        s_rank: usize,
        t_vehicle: usize,
        t_rank: usize,
    ) -> Self {
        let s_route = sol[s_vehicle].route.as_slice();
        let (first, second) = (s_route[s_rank], s_route[s_rank + 1]);

        let s_gain = state.edge_gains[s_vehicle][s_rank];
        let t_gain = -edge_addition_cost(input, first, second, t_vehicle, &sol[t_vehicle].route, t_rank);

        Self { s_vehicle, s_rank, t_vehicle, t_rank, gain: s_gain + t_gain }
    }
}

impl LocalOperator for OrOpt {
    fn is_valid(&self, input: &Input, state: &SolutionState, sol: &TwSolution) -> bool {
        let s_route = sol[self.s_vehicle].route.as_slice();
        let pair = [s_route[self.s_rank], s_route[self.s_rank + 1]];

        let t_amount =
            state.total_amount(self.t_vehicle) + input.job(pair[0]).amount + input.job(pair[1]).amount;

        pair.iter().all(|&job| input.vehicle_ok_with_job(self.t_vehicle, job))
            && input.vehicle(self.t_vehicle).capacity.can_fit(&t_amount)
            && sol[self.s_vehicle].is_valid_removal(input, self.s_rank, 2)
            && sol[self.t_vehicle].is_valid_addition_for_tw_seq(
                input,
                pair.iter().copied(),
                self.t_rank,
                self.t_rank,
            )
    }

    fn gain(&self) -> Gain {
        self.gain
    }

    fn apply(&self, input: &Input, sol: &mut TwSolution) {
        let pair = [sol[self.s_vehicle].route[self.s_rank], sol[self.s_vehicle].route[self.s_rank + 1]];

        sol[self.s_vehicle].remove(input, self.s_rank, 2);
        sol[self.t_vehicle].replace(input, pair.into_iter(), self.t_rank, self.t_rank);
    }

    fn addition_candidates(&self) -> Vec<usize> {
        vec![self.s_vehicle]
    }
}
