//! Internal utilities for the directory crate.

pub mod validation;

pub use validation::*;
