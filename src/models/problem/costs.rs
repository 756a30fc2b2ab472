#[cfg(test)]
#[path = "../../../tests/unit/models/problem/costs_test.rs"]
mod costs_test;

use crate::models::common::{Cost, Duration, Location};
use crate::utils::GenericResult;

/// A dense square matrix of travel costs between location indices. The same values
/// serve as travel durations for time window propagation.
#[derive(Clone, Debug)]
pub struct CostMatrix {
    size: usize,
    values: Vec<Cost>,
}

impl CostMatrix {
    /// Creates a new instance of [`CostMatrix`] from row-major values.
    pub fn new(size: usize, values: Vec<Cost>) -> GenericResult<Self> {
        if values.len() != size * size {
            return Err(format!("cost matrix expects {} values, got {}", size * size, values.len()).into());
        }

        Ok(Self { size, values })
    }

    /// Returns matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns travel cost between two locations.
    pub fn cost(&self, from: Location, to: Location) -> Cost {
        self.values[from * self.size + to]
    }

    /// Returns travel duration between two locations.
    pub fn duration(&self, from: Location, to: Location) -> Duration {
        self.cost(from, to)
    }
}
