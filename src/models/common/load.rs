#[cfg(test)]
#[path = "../../../tests/unit/models/common/load_test.rs"]
mod load_test;

use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

const AMOUNT_DIMENSION_SIZE: usize = 8;

/// A multi dimensional quantity used to represent job demand or vehicle capacity.
/// All arithmetic and comparisons are elementwise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Amount {
    values: [i64; AMOUNT_DIMENSION_SIZE],
    size: usize,
}

impl Amount {
    /// Creates a new instance of [`Amount`] from given values.
    pub fn new(values: &[i64]) -> Self {
        assert!(values.len() <= AMOUNT_DIMENSION_SIZE);

        let mut amount = Self { values: [0; AMOUNT_DIMENSION_SIZE], size: values.len() };
        amount.values[..values.len()].copy_from_slice(values);

        amount
    }

    /// Creates an empty amount of given dimension.
    pub fn zero(size: usize) -> Self {
        assert!(size <= AMOUNT_DIMENSION_SIZE);

        Self { values: [0; AMOUNT_DIMENSION_SIZE], size }
    }

    /// Returns amount dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns value at given dimension index.
    pub fn get(&self, idx: usize) -> i64 {
        assert!(idx < self.size);
        self.values[idx]
    }

    /// Returns true if `other` fits into this amount seen as a capacity, i.e. every
    /// component of `other` is less than or equal to the corresponding component here.
    pub fn can_fit(&self, other: &Self) -> bool {
        debug_assert_eq!(self.size, other.size);
        self.values.iter().zip(other.values.iter()).all(|(capacity, load)| capacity >= load)
    }

    /// Returns the componentwise minimum of two amounts.
    pub fn component_min(&self, other: &Self) -> Self {
        debug_assert_eq!(self.size, other.size);

        let mut result = *self;
        result.values.iter_mut().zip(other.values.iter()).for_each(|(left, right)| *left = (*left).min(*right));

        result
    }

    /// Returns true if any component is non-zero.
    pub fn is_not_empty(&self) -> bool {
        self.values.iter().any(|&value| value != 0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        debug_assert_eq!(self.size, rhs.size);
        self.values.iter_mut().zip(rhs.values.iter()).for_each(|(left, right)| *left += right);
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        debug_assert_eq!(self.size, rhs.size);
        self.values.iter_mut().zip(rhs.values.iter()).for_each(|(left, right)| *left -= right);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(mut iter: I) -> Self {
        let first = iter.next().unwrap_or_default();
        iter.fold(first, |acc, item| acc + item)
    }
}
