#[cfg(test)]
#[path = "../../../tests/unit/solver/search/two_opt_test.rs"]
mod two_opt_test;

use super::*;

/// Splits both routes after the given ranks and swaps the tails (2-opt*).
pub struct TwoOpt {
    s_vehicle: usize,
    s_rank: usize,
    t_vehicle: usize,
    t_rank: usize,
    gain: Gain,
}

impl TwoOpt {
    /// Creates a new instance of [`TwoOpt`].
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
        let (s_len, t_len) = (s_route.len(), t_route.len());

        let s_end = input.vehicle(s_vehicle).end;
        let t_end = input.vehicle(t_vehicle).end;

        let s_split = job_location(input, s_route, s_rank);
        let t_split = job_location(input, t_route, t_rank);

        // Only the split edges and the final edges to the vehicle ends change; the
        // interiors of both tails are traveled unmodified on the other route.
        let old_s = if s_rank + 1 < s_len {
            matrix.cost(s_split, job_location(input, s_route, s_rank + 1))
                + matrix.cost(job_location(input, s_route, s_len - 1), s_end)
        } else {
            matrix.cost(s_split, s_end)
        };
        let old_t = if t_rank + 1 < t_len {
            matrix.cost(t_split, job_location(input, t_route, t_rank + 1))
                + matrix.cost(job_location(input, t_route, t_len - 1), t_end)
        } else {
            matrix.cost(t_split, t_end)
        };

        let new_s = if t_rank + 1 < t_len {
            matrix.cost(s_split, job_location(input, t_route, t_rank + 1))
                + matrix.cost(job_location(input, t_route, t_len - 1), s_end)
        } else {
            matrix.cost(s_split, s_end)
        };
        let new_t = if s_rank + 1 < s_len {
            matrix.cost(t_split, job_location(input, s_route, s_rank + 1))
                + matrix.cost(job_location(input, s_route, s_len - 1), t_end)
        } else {
            matrix.cost(t_split, t_end)
        };

        Self { s_vehicle, s_rank, t_vehicle, t_rank, gain: old_s + old_t - new_s - new_t }
    }
}

impl LocalOperator for TwoOpt {
    fn gain(&self) -> Gain {
        self.gain
    }

    fn is_valid(&self, input: &Input, state: &SolutionState, sol: &TwSolution) -> bool {
        let s_route = sol[self.s_vehicle].route.as_slice();
        let t_route = sol[self.t_vehicle].route.as_slice();

        let s_amount = state.fwd_amounts[self.s_vehicle][self.s_rank]
            + state.bwd_amount_at(self.t_vehicle, self.t_rank + 1);
        let t_amount = state.fwd_amounts[self.t_vehicle][self.t_rank]
            + state.bwd_amount_at(self.s_vehicle, self.s_rank + 1);

        input.vehicle(self.s_vehicle).capacity.can_fit(&s_amount)
            && input.vehicle(self.t_vehicle).capacity.can_fit(&t_amount)
            && state.bwd_skill_rank[self.t_vehicle][self.s_vehicle] <= self.t_rank + 1
            && state.bwd_skill_rank[self.s_vehicle][self.t_vehicle] <= self.s_rank + 1
            && sol[self.s_vehicle].is_valid_addition_for_tw_seq(
                input,
                t_route[self.t_rank + 1..].iter().copied(),
                self.s_rank + 1,
                s_route.len(),
            )
            && sol[self.t_vehicle].is_valid_addition_for_tw_seq(
                input,
                s_route[self.s_rank + 1..].iter().copied(),
                self.t_rank + 1,
                t_route.len(),
            )
    }

    fn apply(&self, input: &Input, sol: &mut TwSolution) {
        let s_tail = sol[self.s_vehicle].route[self.s_rank + 1..].to_vec();
        let t_tail = sol[self.t_vehicle].route[self.t_rank + 1..].to_vec();

        let s_len = sol[self.s_vehicle].route.len();
        let t_len = sol[self.t_vehicle].route.len();

        sol[self.s_vehicle].replace(input, t_tail.into_iter(), self.s_rank + 1, s_len);
        sol[self.t_vehicle].replace(input, s_tail.into_iter(), self.t_rank + 1, t_len);
    }

    fn addition_candidates(&self) -> Vec<usize> {
        vec![self.s_vehicle, self.t_vehicle]
    }
}
