//! Console frontend: the only module that touches the terminal.

#![allow(unused_imports)]

pub mod console;

pub use console::*;
