//! The commodity market: price simulation nudged by battle outcomes, and
//! buy/sell bookkeeping against the player's investments.

#![allow(unused_imports)]

pub mod trading;
pub mod types;

pub use trading::*;
pub use types::*;
