//! This module re-exports a commonly used subset of the library API.

pub use crate::construction::{single_route_heuristic, Direction};
pub use crate::models::common::{Amount, Cost, Duration, Gain, Location, Skill, Skills, TimeWindow, Timestamp};
pub use crate::models::problem::{CostMatrix, Job, Vehicle};
pub use crate::models::solution::{TwRoute, TwSolution};
pub use crate::models::Input;
pub use crate::solver::search::LocalOperator;
pub use crate::solver::{LocalSearch, SolutionIndicators, SolutionState};
pub use crate::utils::{GenericError, GenericResult};
