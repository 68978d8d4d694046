//! # Utilities Module
//!
//! Injectable randomness shared by generation and enemy AI.

pub mod random;

pub use random::*;
