//! Multi-stage missions: generation, objectives and the runner that chains
//! battles into a success-or-failure verdict.

#![allow(unused_imports)]

pub mod runner;
pub mod types;

pub use runner::*;
pub use types::*;
