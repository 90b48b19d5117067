//! Turn-based battle: the combo minigame, player action resolution and the
//! engine loop that alternates half-turns until a terminal outcome.

#![allow(unused_imports)]

pub mod actions;
pub mod combo;
pub mod engine;
pub mod types;

pub use actions::*;
pub use combo::*;
pub use engine::*;
pub use types::*;
