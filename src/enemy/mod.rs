//! AI-controlled enemies: archetype data, the limb sub-model, the behavior
//! state machine and the spawning factory.

#![allow(unused_imports)]

pub mod ai;
pub mod factory;
pub mod types;

pub use ai::*;
pub use factory::*;
pub use types::*;
