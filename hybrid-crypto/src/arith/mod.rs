//! # Arithmetic Module
//!
//! Big-integer helpers shared by the knapsack and curve engines: gcd, modular
//! inverse, modular subtraction and uniform sampling of [`BigUint`] ranges.

pub mod helper;
pub mod sampling;

pub use helper::{extended_gcd, gcd, mod_inverse, sub_mod};
pub use sampling::{random_below, random_range_inclusive};
