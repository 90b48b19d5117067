//! Player ranger: stats, damage math, skills and progression.

#![allow(unused_imports)]

pub mod creation;
pub mod skills;
pub mod types;

pub use creation::*;
pub use skills::*;
pub use types::*;
