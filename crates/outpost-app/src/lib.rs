//! OUTPOST headless host.
//!
//! Wires the simulation engine to logging collaborators and runs it on a
//! fixed-rate game-loop thread.

pub mod game_loop;
pub mod host;
pub mod state;

pub use outpost_core as core;
