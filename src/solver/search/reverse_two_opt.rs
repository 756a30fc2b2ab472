#[cfg(test)]
#[path = "../../../tests/unit/solver/search/reverse_two_opt_test.rs"]
mod reverse_two_opt_test;

use super::*;

/// Splits both routes and reconnects them with reversed segments: the source keeps its
/// prefix and continues with the reversed target head, the target starts with the
/// reversed source tail followed by its own tail.
pub struct ReverseTwoOpt {
    s_vehicle: usize,
    s_rank: usize,
    t_vehicle: usize,
    t_rank: usize,
    gain: Gain,
}

impl ReverseTwoOpt {
    /// Creates a new instance of [`ReverseTwoOpt`].
    pub fn new(
        input: &Input,
        state: &SolutionState,
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
        let (t_start, t_end) = (input.vehicle(t_vehicle).start, input.vehicle(t_vehicle).end);

        let s_split = job_location(input, s_route, s_rank);
        let t_split = job_location(input, t_route, t_rank);

        let fwd_s = &state.fwd_costs[s_vehicle];
        let bwd_s = &state.bwd_costs[s_vehicle];
        let fwd_t = &state.fwd_costs[t_vehicle];
        let bwd_t = &state.bwd_costs[t_vehicle];

        // Reversed segments change their internal traversal cost on asymmetric
        // matrices, hence the cumulative forward/backward cost profiles.
        let old_s = if s_rank + 1 < s_len {
            matrix.cost(s_split, job_location(input, s_route, s_rank + 1)) + (fwd_s[s_len - 1] - fwd_s[s_rank + 1])
                + matrix.cost(job_location(input, s_route, s_len - 1), s_end)
        } else {
            matrix.cost(s_split, s_end)
        };

        let new_s = matrix.cost(s_split, t_split) + bwd_t[t_rank]
            + matrix.cost(job_location(input, t_route, 0), s_end);

        let old_t = matrix.cost(t_start, job_location(input, t_route, 0))
            + fwd_t[t_rank]
            + if t_rank + 1 < t_len {
                matrix.cost(t_split, job_location(input, t_route, t_rank + 1))
            } else {
                matrix.cost(t_split, t_end)
            };

        let new_t = if s_rank + 1 < s_len {
            matrix.cost(t_start, job_location(input, s_route, s_len - 1)) + (bwd_s[s_len - 1] - bwd_s[s_rank + 1])
                + if t_rank + 1 < t_len {
                    matrix.cost(job_location(input, s_route, s_rank + 1), job_location(input, t_route, t_rank + 1))
                } else {
                    matrix.cost(job_location(input, s_route, s_rank + 1), t_end)
                }
        } else if t_rank + 1 < t_len {
            matrix.cost(t_start, job_location(input, t_route, t_rank + 1))
        } else {
            // Target route becomes empty.
            0
        };

        Self { s_vehicle, s_rank, t_vehicle, t_rank, gain: old_s + old_t - new_s - new_t }
    }
}

impl LocalOperator for ReverseTwoOpt {
    fn gain(&self) -> Gain {
        self.gain
    }

    fn is_valid(&self, input: &Input, state: &SolutionState, sol: &TwSolution) -> bool {
        let s_route = sol[self.s_vehicle].route.as_slice();
        let t_route = sol[self.t_vehicle].route.as_slice();

        let s_amount =
            state.fwd_amounts[self.s_vehicle][self.s_rank] + state.fwd_amounts[self.t_vehicle][self.t_rank];
        let t_amount = state.bwd_amount_at(self.s_vehicle, self.s_rank + 1)
            + state.bwd_amount_at(self.t_vehicle, self.t_rank + 1);

        input.vehicle(self.s_vehicle).capacity.can_fit(&s_amount)
            && input.vehicle(self.t_vehicle).capacity.can_fit(&t_amount)
            && state.fwd_skill_rank[self.t_vehicle][self.s_vehicle] >= self.t_rank + 1
            && state.bwd_skill_rank[self.s_vehicle][self.t_vehicle] <= self.s_rank + 1
            && sol[self.s_vehicle].is_valid_addition_for_tw_seq(
                input,
                t_route[..self.t_rank + 1].iter().rev().copied(),
                self.s_rank + 1,
                s_route.len(),
            )
            && sol[self.t_vehicle].is_valid_addition_for_tw_seq(
                input,
                s_route[self.s_rank + 1..].iter().rev().copied(),
                0,
                self.t_rank + 1,
            )
    }

    fn apply(&self, input: &Input, sol: &mut TwSolution) {
        let t_head: Vec<_> = sol[self.t_vehicle].route[..self.t_rank + 1].iter().rev().copied().collect();
        let s_tail: Vec<_> = sol[self.s_vehicle].route[self.s_rank + 1..].iter().rev().copied().collect();

        let s_len = sol[self.s_vehicle].route.len();

        sol[self.s_vehicle].replace(input, t_head.into_iter(), self.s_rank + 1, s_len);
        sol[self.t_vehicle].replace(input, s_tail.into_iter(), 0, self.t_rank + 1);
    }

    fn addition_candidates(&self) -> Vec<usize> {
        vec![self.s_vehicle, self.t_vehicle]
    }
}
