//! The local search improvement engine.
//!
//! [`LocalSearch`] owns a feasible solution and improves it in rounds: it enumerates
//! inter-route operator candidates per ordered vehicle pair, keeps the best candidate
//! per pair, applies the best candidate overall, refreshes the caches of the two
//! touched routes and retries unassigned jobs, until no candidate has positive gain.

#[cfg(test)]
#[path = "../../tests/unit/solver/local_search_test.rs"]
mod local_search_test;

use crate::construction::{addition_cost, single_route_heuristic, Direction};
use crate::models::common::{Amount, Cost, Gain};
use crate::models::solution::{TwRoute, TwSolution};
use crate::models::Input;
use crate::utils::GenericResult;
use hashbrown::HashSet;

pub mod search;
use self::search::*;

mod state;
pub use self::state::SolutionState;

/// Summary figures of a solution.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SolutionIndicators {
    /// Number of jobs assigned to no route.
    pub unassigned: usize,
    /// Total travel cost over all routes.
    pub cost: Cost,
    /// Number of routes with a non-empty job sequence.
    pub used_vehicles: usize,
}

/// A local search engine which improves a feasible solution until no cost-reducing
/// inter-route modification is admissible.
pub struct LocalSearch<'a> {
    input: &'a Input,
    sol: TwSolution,
    state: SolutionState,
}

impl<'a> LocalSearch<'a> {
    /// Creates a new instance of [`LocalSearch`] from an initial solution given as one
    /// job sequence per vehicle. Sequences violating capacity, skill or time window
    /// constraints are rejected; jobs left out of all sequences start as unassigned.
    pub fn new(input: &'a Input, routes: Vec<Vec<usize>>) -> GenericResult<Self> {
        if routes.len() != input.vehicles().len() {
            return Err(format!(
                "expected one route per vehicle, got {} routes for {} vehicles",
                routes.len(),
                input.vehicles().len()
            )
            .into());
        }

        let mut assigned = HashSet::new();
        for (vehicle, route) in routes.iter().enumerate() {
            let mut running = Amount::zero(input.amount_size());

            for &job in route {
                if job >= input.jobs().len() {
                    return Err(format!("route of vehicle {vehicle} references unknown job {job}").into());
                }
                if !assigned.insert(job) {
                    return Err(format!("job {job} is assigned more than once").into());
                }
                if !input.vehicle_ok_with_job(vehicle, job) {
                    return Err(format!("vehicle {vehicle} lacks skills required by job {job}").into());
                }

                running += input.job(job).amount;
                if !input.vehicle(vehicle).capacity.can_fit(&running) {
                    return Err(format!("route of vehicle {vehicle} exceeds its capacity").into());
                }
            }
        }

        let sol = routes
            .into_iter()
            .enumerate()
            .map(|(vehicle, route)| TwRoute::with_route(input, vehicle, route))
            .collect::<GenericResult<TwSolution>>()?;

        let mut state = SolutionState::new(input);
        state.setup(input, &sol);

        Ok(Self { input, sol, state })
    }

    /// Returns the current solution.
    pub fn solution(&self) -> &TwSolution {
        &self.sol
    }

    /// Returns the current solution state caches.
    pub fn state(&self) -> &SolutionState {
        &self.state
    }

    /// Returns summary figures of the current solution.
    pub fn indicators(&self) -> SolutionIndicators {
        SolutionIndicators {
            unassigned: self.state.unassigned.len(),
            cost: self.state.route_costs.iter().sum(),
            used_vehicles: self.sol.iter().filter(|tw_route| !tw_route.route.is_empty()).count(),
        }
    }

    /// Runs the engine until a local optimum is reached.
    pub fn run(&mut self) {
        let vehicles = self.input.vehicles().len();

        let mut best_ops: Vec<Vec<Option<Box<dyn LocalOperator>>>> =
            (0..vehicles).map(|_| (0..vehicles).map(|_| None).collect()).collect();
        let mut best_gains: Vec<Vec<Gain>> = vec![vec![0; vehicles]; vehicles];

        // Source/target pairs to test, all of them at first.
        let mut s_t_pairs: Vec<(usize, usize)> = (0..vehicles)
            .flat_map(|s| (0..vehicles).filter(move |&t| t != s).map(move |t| (s, t)))
            .collect();

        let mut rounds = 0usize;
        let mut best_gain: Gain = 1;

        while best_gain > 0 {
            self.explore_exchange(&s_t_pairs, &mut best_gains, &mut best_ops);
            self.explore_cross_exchange(&s_t_pairs, &mut best_gains, &mut best_ops);
            self.explore_two_opt(&s_t_pairs, &mut best_gains, &mut best_ops);
            self.explore_reverse_two_opt(&s_t_pairs, &mut best_gains, &mut best_ops);
            self.explore_relocate(&s_t_pairs, &mut best_gains, &mut best_ops);
            self.explore_or_opt(&s_t_pairs, &mut best_gains, &mut best_ops);

            // Find best overall gain.
            best_gain = 0;
            let mut best_source = 0;
            let mut best_target = 0;

            for s in 0..vehicles {
                for t in 0..vehicles {
                    if s != t && best_gains[s][t] > best_gain {
                        best_gain = best_gains[s][t];
                        best_source = s;
                        best_target = t;
                    }
                }
            }

            if best_gain > 0 {
                let op = match best_ops[best_source][best_target].take() {
                    Some(op) => op,
                    None => {
                        debug_assert!(false, "positive gain recorded without an operator");
                        break;
                    }
                };

                op.apply(self.input, &mut self.sol);
                rounds += 1;

                tracing::debug!(
                    "round {}: applied operator on pair ({}, {}) with gain {}",
                    rounds,
                    best_source,
                    best_target,
                    best_gain
                );

                let previous_cost =
                    self.state.route_costs[best_source] + self.state.route_costs[best_target];
                self.state.update_route_cost(self.input, &self.sol[best_source].route, best_source);
                self.state.update_route_cost(self.input, &self.sol[best_target].route, best_target);
                let new_cost = self.state.route_costs[best_source] + self.state.route_costs[best_target];

                debug_assert_eq!(new_cost + best_gain, previous_cost, "operator gain does not match cost change");

                self.straighten_route(best_source);
                self.straighten_route(best_target);

                // Amounts must be fresh before trying additions; the additions then
                // keep fixing amounts themselves upon each insertion.
                self.state.update_amounts(self.input, &self.sol[best_source].route, best_source);
                self.state.update_amounts(self.input, &self.sol[best_target].route, best_target);

                self.try_job_additions(&op.addition_candidates(), 0.);

                self.state.update_costs(self.input, &self.sol[best_source].route, best_source);
                self.state.update_costs(self.input, &self.sol[best_target].route, best_target);

                self.state.update_skills(self.input, &self.sol[best_source].route, best_source);
                self.state.update_skills(self.input, &self.sol[best_target].route, best_target);

                self.state.set_node_gains(self.input, &self.sol[best_source].route, best_source);
                self.state.set_node_gains(self.input, &self.sol[best_target].route, best_target);
                self.state.set_edge_gains(self.input, &self.sol[best_source].route, best_source);
                self.state.set_edge_gains(self.input, &self.sol[best_target].route, best_target);

                // Set gains to zero for what needs to be recomputed in the next round.
                s_t_pairs.clear();
                best_gains[best_source] = vec![0; vehicles];
                best_gains[best_target] = vec![0; vehicles];

                s_t_pairs.push((best_source, best_target));
                s_t_pairs.push((best_target, best_source));

                for v in 0..vehicles {
                    if v == best_source || v == best_target {
                        continue;
                    }
                    s_t_pairs.push((best_source, v));
                    s_t_pairs.push((v, best_source));
                    best_gains[v][best_source] = 0;
                    best_gains[best_source][v] = 0;

                    s_t_pairs.push((best_target, v));
                    s_t_pairs.push((v, best_target));
                    best_gains[v][best_target] = 0;
                    best_gains[best_target][v] = 0;
                }
            }
        }

        tracing::debug!("local search converged after {} improving rounds", rounds);
    }

    fn explore_exchange(
        &self,
        s_t_pairs: &[(usize, usize)],
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Box<dyn LocalOperator>>>],
    ) {
        for &(s, t) in s_t_pairs {
            // This operator is symmetric.
            if t <= s || self.sol[s].route.is_empty() || self.sol[t].route.is_empty() {
                continue;
            }

            for s_rank in 0..self.sol[s].route.len() {
                for t_rank in 0..self.sol[t].route.len() {
                    let op = Exchange::new(self.input, &self.state, &self.sol, s, s_rank, t, t_rank);
                    self.maybe_record(op, s, t, best_gains, best_ops);
                }
            }
        }
    }

    fn explore_cross_exchange(
        &self,
        s_t_pairs: &[(usize, usize)],
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Box<dyn LocalOperator>>>],
    ) {
        for &(s, t) in s_t_pairs {
            // This operator is symmetric.
            if t <= s || self.sol[s].route.len() < 2 || self.sol[t].route.len() < 2 {
                continue;
            }

            for s_rank in 0..self.sol[s].route.len() - 1 {
                for t_rank in 0..self.sol[t].route.len() - 1 {
                    let op = CrossExchange::new(self.input, &self.state, &self.sol, s, s_rank, t, t_rank);
                    self.maybe_record(op, s, t, best_gains, best_ops);
                }
            }
        }
    }

    fn explore_two_opt(
        &self,
        s_t_pairs: &[(usize, usize)],
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Box<dyn LocalOperator>>>],
    ) {
        for &(s, t) in s_t_pairs {
            // This operator is symmetric.
            if t <= s {
                continue;
            }

            for s_rank in 0..self.sol[s].route.len() {
                let s_free = self.free_amount(s, s_rank);

                for t_rank in (0..self.sol[t].route.len()).rev() {
                    if !s_free.can_fit(&self.state.bwd_amounts[t][t_rank]) {
                        break;
                    }
                    let op = TwoOpt::new(self.input, &self.state, &self.sol, s, s_rank, t, t_rank);
                    self.maybe_record(op, s, t, best_gains, best_ops);
                }
            }
        }
    }

    fn explore_reverse_two_opt(
        &self,
        s_t_pairs: &[(usize, usize)],
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Box<dyn LocalOperator>>>],
    ) {
        for &(s, t) in s_t_pairs {
            for s_rank in 0..self.sol[s].route.len() {
                let s_free = self.free_amount(s, s_rank);

                for t_rank in 0..self.sol[t].route.len() {
                    if !s_free.can_fit(&self.state.fwd_amounts[t][t_rank]) {
                        break;
                    }
                    let op = ReverseTwoOpt::new(self.input, &self.state, &self.sol, s, s_rank, t, t_rank);
                    self.maybe_record(op, s, t, best_gains, best_ops);
                }
            }
        }
    }

    fn explore_relocate(
        &self,
        s_t_pairs: &[(usize, usize)],
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Box<dyn LocalOperator>>>],
    ) {
        for &(s, t) in s_t_pairs {
            // Don't try to move things out of an empty vehicle or into a full one.
            let t_floor = self.state.total_amount(t) + *self.input.amount_lower_bound();
            if self.sol[s].route.is_empty() || !self.input.vehicle(t).capacity.can_fit(&t_floor) {
                continue;
            }

            for s_rank in 0..self.sol[s].route.len() {
                if self.state.node_gains[s][s_rank] <= best_gains[s][t] {
                    // Except if addition cost in target route is negative, overall
                    // gain can't exceed the current best gain.
                    continue;
                }

                for t_rank in 0..=self.sol[t].route.len() {
                    let op = Relocate::new(self.input, &self.state, &self.sol, s, s_rank, t, t_rank);
                    self.maybe_record(op, s, t, best_gains, best_ops);
                }
            }
        }
    }

    fn explore_or_opt(
        &self,
        s_t_pairs: &[(usize, usize)],
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Box<dyn LocalOperator>>>],
    ) {
        for &(s, t) in s_t_pairs {
            // Don't try to move things out of a near-empty vehicle or into a full one.
            let t_floor = self.state.total_amount(t) + *self.input.double_amount_lower_bound();
            if self.sol[s].route.len() < 2 || !self.input.vehicle(t).capacity.can_fit(&t_floor) {
                continue;
            }

            for s_rank in 0..self.sol[s].route.len() - 1 {
                if self.state.edge_gains[s][s_rank] <= best_gains[s][t] {
                    // Except if addition cost in target route is negative, overall
                    // gain can't exceed the current best gain.
                    continue;
                }

                for t_rank in 0..=self.sol[t].route.len() {
                    let op = OrOpt::new(self.input, &self.state, &self.sol, s, s_rank, t, t_rank);
                    self.maybe_record(op, s, t, best_gains, best_ops);
                }
            }
        }
    }

    fn maybe_record(
        &self,
        op: impl LocalOperator + 'static,
        s: usize,
        t: usize,
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Box<dyn LocalOperator>>>],
    ) {
        if op.is_valid(self.input, &self.state, &self.sol) && op.gain() > best_gains[s][t] {
            best_gains[s][t] = op.gain();
            best_ops[s][t] = Some(Box::new(op));
        }
    }

    /// Re-runs the construction helper in both directions on given route and adopts
    /// the result when it serves the same number of jobs for a strictly lower cost.
    fn straighten_route(&mut self, vehicle: usize) {
        if self.sol[vehicle].route.is_empty() {
            return;
        }

        let before_cost = self.state.route_costs[vehicle];

        let mut candidate = single_route_heuristic(self.input, &self.sol[vehicle], Direction::Forward);
        let other = single_route_heuristic(self.input, &self.sol[vehicle], Direction::Backward);

        if other.route.len() > candidate.route.len()
            || (other.route.len() == candidate.route.len()
                && self.state.route_cost_for_vehicle(self.input, vehicle, &other.route)
                    < self.state.route_cost_for_vehicle(self.input, vehicle, &candidate.route))
        {
            candidate = other;
        }

        if candidate.route.len() == self.sol[vehicle].route.len() {
            let after_cost = self.state.route_cost_for_vehicle(self.input, vehicle, &candidate.route);

            if after_cost < before_cost {
                tracing::trace!("straightened route {} from {} to {}", vehicle, before_cost, after_cost);
                self.sol[vehicle] = candidate;
                self.state.route_costs[vehicle] = after_cost;
            }
        }
    }

    /// Repeatedly inserts unassigned jobs into the candidate routes, picking per sweep
    /// the job and rank minimizing addition cost reduced by `regret_coeff` times the
    /// cost of the second-best route, until no insertion is feasible.
    ///
    /// The driver always calls this with a zero coefficient (pure cheapest insertion);
    /// the parameter exists for construction heuristics built on top.
    pub fn try_job_additions(&mut self, routes: &[usize], regret_coeff: f64) {
        loop {
            let mut best_cost = f64::MAX;
            let mut best_job = 0;
            let mut best_route = 0;
            let mut best_rank = 0;

            for &job in &self.state.unassigned {
                let amount = self.input.job(job).amount;
                let mut best_costs = vec![Cost::MAX; routes.len()];
                let mut best_ranks = vec![0; routes.len()];

                for (idx, &vehicle) in routes.iter().enumerate() {
                    let capacity = &self.input.vehicle(vehicle).capacity;

                    if self.input.vehicle_ok_with_job(vehicle, job)
                        && capacity.can_fit(&(self.state.total_amount(vehicle) + amount))
                    {
                        for rank in 0..=self.sol[vehicle].route.len() {
                            if self.sol[vehicle].is_valid_addition_for_tw(self.input, job, rank) {
                                let current_cost =
                                    addition_cost(self.input, job, vehicle, &self.sol[vehicle].route, rank);

                                if current_cost < best_costs[idx] {
                                    best_costs[idx] = current_cost;
                                    best_ranks[idx] = rank;
                                }
                            }
                        }
                    }
                }

                let mut smallest = Cost::MAX;
                let mut second_smallest = Cost::MAX;
                let mut smallest_idx = usize::MAX;

                for (idx, &cost) in best_costs.iter().enumerate() {
                    if cost < smallest {
                        smallest_idx = idx;
                        second_smallest = smallest;
                        smallest = cost;
                    } else if cost < second_smallest {
                        second_smallest = cost;
                    }
                }

                // Find best route for current job based on cost of addition and
                // regret cost of not adding.
                for (idx, &cost) in best_costs.iter().enumerate() {
                    if cost == Cost::MAX {
                        continue;
                    }
                    let regret_cost = if idx == smallest_idx { second_smallest } else { smallest };
                    let eval = cost as f64 - regret_coeff * regret_cost as f64;

                    if eval < best_cost {
                        best_cost = eval;
                        best_job = job;
                        best_route = routes[idx];
                        best_rank = best_ranks[idx];
                    }
                }
            }

            let job_added = best_cost < f64::MAX;
            if !job_added {
                break;
            }

            self.sol[best_route].add(self.input, best_job, best_rank);

            tracing::trace!("re-inserted job {} into route {} at rank {}", best_job, best_route, best_rank);

            // Update amounts after addition.
            let job_amount = self.input.job(best_job).amount;
            let zero = Amount::zero(self.input.amount_size());
            {
                let fwd = &mut self.state.fwd_amounts[best_route];
                let previous_cumul = if best_rank == 0 { zero } else { fwd[best_rank - 1] };
                fwd.insert(best_rank, previous_cumul + job_amount);
                fwd[best_rank + 1..].iter_mut().for_each(|fwd_amount| *fwd_amount += job_amount);
            }
            {
                let state = &mut self.state;
                let total = state.fwd_amounts[best_route][state.fwd_amounts[best_route].len() - 1];
                state.bwd_amounts[best_route].insert(best_rank, zero);
                for rank in 0..=best_rank {
                    let before = if rank == 0 { zero } else { state.fwd_amounts[best_route][rank - 1] };
                    state.bwd_amounts[best_route][rank] = total - before;
                }
            }

            // Update cost after addition.
            self.state.update_route_cost(self.input, &self.sol[best_route].route, best_route);

            self.state.unassigned.remove(&best_job);
        }
    }

    /// Returns remaining capacity of given vehicle after serving positions `0..=rank`.
    fn free_amount(&self, vehicle: usize, rank: usize) -> Amount {
        self.input.vehicle(vehicle).capacity - self.state.fwd_amounts[vehicle][rank]
    }
}
