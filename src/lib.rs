//! This crate implements the local search improvement stage of a solver for the
//! [`Vehicle Routing Problem`](https://en.wikipedia.org/wiki/Vehicle_routing_problem)
//! with time windows (VRPTW).
//!
//! # Key points
//!
//! Given a feasible assignment of jobs to vehicle routes, the engine iteratively rewrites
//! pairs of routes using a library of neighborhood operators (exchange, cross-exchange,
//! 2-opt*, reverse 2-opt*, relocate, or-opt) until no cost-reducing modification remains,
//! re-inserting previously unassigned jobs along the way with a regret-based insertion
//! heuristic.
//!
//! The crate deliberately stays on the inner side of a solver: input parsing, matrix
//! providers, serialization and the construction heuristic which produces the initial
//! routes are expected to live in the surrounding application.
//!
//! # Modeling
//!
//! Model definitions can be split into three groups:
//!
//! - [`common`] contains common models: time, load and cost primitives
//! - [`problem`] contains problem definition models: job, vehicle, cost matrix
//! - [`solution`] contains models used to represent a solution: time window route
//!
//! [`common`]: ./models/common/index.html
//! [`problem`]: ./models/problem/index.html
//! [`solution`]: ./models/solution/index.html
//!
//! # Example
//!
//! ```
//! use vrptw_core::prelude::*;
//!
//! let matrix = CostMatrix::new(3, vec![0, 4, 4, 4, 0, 6, 4, 6, 0])?;
//! let jobs = vec![Job::new(1, Amount::new(&[1])), Job::new(2, Amount::new(&[1]))];
//! let vehicles = vec![Vehicle::new(0, 0, Amount::new(&[10]))];
//! let input = Input::new(jobs, vehicles, matrix)?;
//!
//! let mut engine = LocalSearch::new(&input, vec![vec![0, 1]])?;
//! engine.run();
//!
//! let indicators = engine.indicators();
//! assert_eq!(indicators.unassigned, 0);
//! assert_eq!(indicators.used_vehicles, 1);
//! # Ok::<(), GenericError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

pub mod prelude;

pub mod construction;
pub mod models;
pub mod solver;
pub mod utils;
