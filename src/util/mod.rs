//! A set of utility functions used when operating the ladder.

pub mod number;
