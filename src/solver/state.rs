#[cfg(test)]
#[path = "../../tests/unit/solver/state_test.rs"]
mod state_test;

use crate::models::common::{Amount, Cost, Gain};
use crate::models::solution::TwSolution;
use crate::models::Input;
use std::collections::BTreeSet;

/// Caches derived from the current solution, all indexed by vehicle. The driver keeps
/// them consistent by refreshing only the routes touched by an applied operator.
pub struct SolutionState {
    /// Cumulative demand of jobs at positions `0..=i` per route.
    pub fwd_amounts: Vec<Vec<Amount>>,
    /// Demand of jobs at positions `i..end` per route.
    pub bwd_amounts: Vec<Vec<Amount>>,
    /// Cumulative travel cost from the first job up to position `i`, route order.
    pub fwd_costs: Vec<Vec<Cost>>,
    /// Cumulative travel cost from position `i` down to the first job, reverse order.
    pub bwd_costs: Vec<Vec<Cost>>,
    /// Per ordered vehicle pair `(v1, v2)`: number of leading jobs of route `v1` all
    /// serviceable by vehicle `v2`.
    pub fwd_skill_rank: Vec<Vec<usize>>,
    /// Per ordered vehicle pair `(v1, v2)`: smallest rank from which every job of
    /// route `v1` is serviceable by vehicle `v2`.
    pub bwd_skill_rank: Vec<Vec<usize>>,
    /// Cost saved by removing the single job at position `i`.
    pub node_gains: Vec<Vec<Gain>>,
    /// Cost saved by removing the pair at positions `(i, i + 1)`.
    pub edge_gains: Vec<Vec<Gain>>,
    /// Scalar travel cost per route.
    pub route_costs: Vec<Cost>,
    /// Jobs currently assigned to no route.
    pub unassigned: BTreeSet<usize>,
    amount_size: usize,
}

impl SolutionState {
    /// Creates a state sized for given input with all caches empty.
    pub fn new(input: &Input) -> Self {
        let vehicles = input.vehicles().len();

        Self {
            fwd_amounts: vec![vec![]; vehicles],
            bwd_amounts: vec![vec![]; vehicles],
            fwd_costs: vec![vec![]; vehicles],
            bwd_costs: vec![vec![]; vehicles],
            fwd_skill_rank: vec![vec![0; vehicles]; vehicles],
            bwd_skill_rank: vec![vec![0; vehicles]; vehicles],
            node_gains: vec![vec![]; vehicles],
            edge_gains: vec![vec![]; vehicles],
            route_costs: vec![0; vehicles],
            unassigned: BTreeSet::default(),
            amount_size: input.amount_size(),
        }
    }

    /// Populates every cache from given solution.
    pub fn setup(&mut self, input: &Input, sol: &TwSolution) {
        self.unassigned = (0..input.jobs().len()).collect();
        sol.iter().flat_map(|tw_route| tw_route.route.iter()).for_each(|job| {
            self.unassigned.remove(job);
        });

        for (vehicle, tw_route) in sol.iter().enumerate() {
            let route = tw_route.route.as_slice();

            self.update_amounts(input, route, vehicle);
            self.update_costs(input, route, vehicle);
            self.update_skills(input, route, vehicle);
            self.update_route_cost(input, route, vehicle);
            self.set_node_gains(input, route, vehicle);
            self.set_edge_gains(input, route, vehicle);
        }
    }

    /// Returns total demand currently assigned to given vehicle.
    pub fn total_amount(&self, vehicle: usize) -> Amount {
        self.fwd_amounts[vehicle].last().copied().unwrap_or_else(|| Amount::zero(self.amount_size))
    }

    /// Returns demand of jobs at positions `rank..end`, where `rank` may point one
    /// past the last position.
    pub fn bwd_amount_at(&self, vehicle: usize, rank: usize) -> Amount {
        self.bwd_amounts[vehicle].get(rank).copied().unwrap_or_else(|| Amount::zero(self.amount_size))
    }

    /// Recomputes forward and backward amounts for given route.
    pub fn update_amounts(&mut self, input: &Input, route: &[usize], vehicle: usize) {
        let mut running = Amount::zero(self.amount_size);
        self.fwd_amounts[vehicle] = route
            .iter()
            .map(|&job| {
                running += input.job(job).amount;
                running
            })
            .collect();

        let total = self.total_amount(vehicle);
        self.bwd_amounts[vehicle] = self.fwd_amounts[vehicle]
            .iter()
            .enumerate()
            .map(|(rank, &fwd)| total - fwd + input.job(route[rank]).amount)
            .collect();
    }

    /// Recomputes cumulative forward and backward travel costs for given route.
    pub fn update_costs(&mut self, input: &Input, route: &[usize], vehicle: usize) {
        let matrix = input.matrix();

        let mut fwd = Vec::with_capacity(route.len());
        let mut bwd = Vec::with_capacity(route.len());
        fwd.extend(route.first().map(|_| 0));
        bwd.extend(route.first().map(|_| 0));

        for pair in route.windows(2) {
            let from = input.job(pair[0]).location;
            let to = input.job(pair[1]).location;
            fwd.push(fwd[fwd.len() - 1] + matrix.cost(from, to));
            bwd.push(bwd[bwd.len() - 1] + matrix.cost(to, from));
        }

        self.fwd_costs[vehicle] = fwd;
        self.bwd_costs[vehicle] = bwd;
    }

    /// Recomputes skill ranks of given route against every other vehicle.
    pub fn update_skills(&mut self, input: &Input, route: &[usize], vehicle: usize) {
        for other in 0..input.vehicles().len() {
            if other == vehicle {
                continue;
            }

            let leading =
                route.iter().position(|&job| !input.vehicle_ok_with_job(other, job)).unwrap_or(route.len());
            let trailing = route.iter().rev().take_while(|&&job| input.vehicle_ok_with_job(other, job)).count();

            self.fwd_skill_rank[vehicle][other] = leading;
            self.bwd_skill_rank[vehicle][other] = route.len() - trailing;
        }
    }

    /// Recomputes the cost saved by removing each single job of given route.
    pub fn set_node_gains(&mut self, input: &Input, route: &[usize], vehicle: usize) {
        let matrix = input.matrix();
        let v = input.vehicle(vehicle);

        self.node_gains[vehicle] = (0..route.len())
            .map(|rank| {
                let loc = input.job(route[rank]).location;
                let prev = if rank == 0 { v.start } else { input.job(route[rank - 1]).location };
                let next = if rank + 1 == route.len() { v.end } else { input.job(route[rank + 1]).location };
                let reconnect = if route.len() > 1 { matrix.cost(prev, next) } else { 0 };

                matrix.cost(prev, loc) + matrix.cost(loc, next) - reconnect
            })
            .collect();
    }

    /// Recomputes the cost saved by removing each consecutive pair of given route.
    pub fn set_edge_gains(&mut self, input: &Input, route: &[usize], vehicle: usize) {
        let matrix = input.matrix();
        let v = input.vehicle(vehicle);

        self.edge_gains[vehicle] = (0..route.len().saturating_sub(1))
            .map(|rank| {
                let first = input.job(route[rank]).location;
                let second = input.job(route[rank + 1]).location;
                let prev = if rank == 0 { v.start } else { input.job(route[rank - 1]).location };
                let next = if rank + 2 == route.len() { v.end } else { input.job(route[rank + 2]).location };
                let reconnect = if route.len() > 2 { matrix.cost(prev, next) } else { 0 };

                matrix.cost(prev, first) + matrix.cost(first, second) + matrix.cost(second, next) - reconnect
            })
            .collect();
    }

    /// Recomputes the scalar travel cost of given route.
    pub fn update_route_cost(&mut self, input: &Input, route: &[usize], vehicle: usize) {
        self.route_costs[vehicle] = self.route_cost_for_vehicle(input, vehicle, route);
    }

    /// Returns the travel cost of given job sequence when executed by given vehicle.
    /// An empty sequence costs nothing as the vehicle is not used.
    pub fn route_cost_for_vehicle(&self, input: &Input, vehicle: usize, route: &[usize]) -> Cost {
        let matrix = input.matrix();
        let v = input.vehicle(vehicle);

        match (route.first(), route.last()) {
            (Some(&first), Some(&last)) => {
                let internal: Cost = route
                    .windows(2)
                    .map(|pair| matrix.cost(input.job(pair[0]).location, input.job(pair[1]).location))
                    .sum();

                matrix.cost(v.start, input.job(first).location)
                    + internal
                    + matrix.cost(input.job(last).location, v.end)
            }
            _ => 0,
        }
    }
}
