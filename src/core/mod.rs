//! Core tuning tables shared across the game systems.

pub mod constants;

pub use constants::*;
