//! Construction helpers consumed by the improvement engine.

mod heuristics;
pub use self::heuristics::{addition_cost, edge_addition_cost, single_route_heuristic, Direction};
