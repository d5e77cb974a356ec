//! telemetry/mod.rs
//! Counters and timers for benchmark phases.

pub mod counters;
pub mod timers;

pub use counters::*;
pub use timers::*;
