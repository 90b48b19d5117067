//! Megaforce - Terminal Ranger Combat Simulator Library
//!
//! This module exposes the game logic for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod battle;
pub mod character;
pub mod core;
pub mod enemy;
pub mod market;
pub mod mission;
pub mod save_manager;
pub mod utils;

// UI module is tightly coupled to the terminal
pub mod ui;
