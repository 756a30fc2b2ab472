#[cfg(test)]
#[path = "../../../tests/unit/solver/search/cross_exchange_test.rs"]
mod cross_exchange_test;

use super::*;

/// Swaps two consecutive jobs on the source route with two consecutive jobs on the
/// target route.
pub struct CrossExchange {
    s_vehicle: usize,
    s_rank: usize,
    t_vehicle: usize,
    t_rank: usize,
    gain: Gain,
}

impl CrossExchange {
    /// Creates a new instance of [`CrossExchange`].
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

        let (s_first, s_second) = (job_location(input, s_route, s_rank), job_location(input, s_route, s_rank + 1));
        let (t_first, t_second) = (job_location(input, t_route, t_rank), job_location(input, t_route, t_rank + 1));

        let s_prev = previous_location(input, s_vehicle, s_route, s_rank);
        let s_next = next_location(input, s_vehicle, s_route, s_rank + 1);
        let s_gain = matrix.cost(s_prev, s_first) + matrix.cost(s_first, s_second) + matrix.cost(s_second, s_next)
            - matrix.cost(s_prev, t_first)
            - matrix.cost(t_first, t_second)
            - matrix.cost(t_second, s_next);

        let t_prev = previous_location(input, t_vehicle, t_route, t_rank);
        let t_next = next_location(input, t_vehicle, t_route, t_rank + 1);
        let t_gain = matrix.cost(t_prev, t_first) + matrix.cost(t_first, t_second) + matrix.cost(t_second, t_next)
            - matrix.cost(t_prev, s_first)
            - matrix.cost(s_first, s_second)
            - matrix.cost(s_second, t_next);

        Self { s_vehicle, s_rank, t_vehicle, t_rank, gain: s_gain + t_gain }
    }
}

impl LocalOperator for CrossExchange {
    fn gain(&self) -> Gain {
        self.gain
    }

    fn is_valid(&self, input: &Input, state: &SolutionState, sol: &TwSolution) -> bool {
        let s_route = sol[self.s_vehicle].route.as_slice();
        let t_route = sol[self.t_vehicle].route.as_slice();

        let s_pair = [s_route[self.s_rank], s_route[self.s_rank + 1]];
        let t_pair = [t_route[self.t_rank], t_route[self.t_rank + 1]];

        let s_pair_amount = input.job(s_pair[0]).amount + input.job(s_pair[1]).amount;
        let t_pair_amount = input.job(t_pair[0]).amount + input.job(t_pair[1]).amount;

        let s_amount = state.total_amount(self.s_vehicle) - s_pair_amount + t_pair_amount;
        let t_amount = state.total_amount(self.t_vehicle) - t_pair_amount + s_pair_amount;

        t_pair.iter().all(|&job| input.vehicle_ok_with_job(self.s_vehicle, job))
            && s_pair.iter().all(|&job| input.vehicle_ok_with_job(self.t_vehicle, job))
            && input.vehicle(self.s_vehicle).capacity.can_fit(&s_amount)
            && input.vehicle(self.t_vehicle).capacity.can_fit(&t_amount)
            && sol[self.s_vehicle].is_valid_addition_for_tw_seq(
                input,
                t_pair.iter().copied(),
                self.s_rank,
                self.s_rank + 2,
            )
            && sol[self.t_vehicle].is_valid_addition_for_tw_seq(
                input,
                s_pair.iter().copied(),
                self.t_rank,
                self.t_rank + 2,
            )
    }

    fn apply(&self, input: &Input, sol: &mut TwSolution) {
        let s_pair = [sol[self.s_vehicle].route[self.s_rank], sol[self.s_vehicle].route[self.s_rank + 1]];
        let t_pair = [sol[self.t_vehicle].route[self.t_rank], sol[self.t_vehicle].route[self.t_rank + 1]];

        sol[self.s_vehicle].replace(input, t_pair.into_iter(), self.s_rank, self.s_rank + 2);
        sol[self.t_vehicle].replace(input, s_pair.into_iter(), self.t_rank, self.t_rank + 2);
    }

    fn addition_candidates(&self) -> Vec<usize> {
        vec![self.s_vehicle, self.t_vehicle]
    }
}
