//! # Rendering Module
//!
//! Macroquad presentation of game snapshots.

pub mod display;

pub use display::*;
