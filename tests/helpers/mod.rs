//! Shared helpers for unit tests.

/// Test macros.
#[cfg(test)]
#[macro_use]
pub mod macros;
