//! Solution models.

mod route;
pub use self::route::TwRoute;

/// A solution as an ordered sequence of routes, one per vehicle of the fleet.
pub type TwSolution = Vec<TwRoute>;
