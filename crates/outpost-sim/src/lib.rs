//! Simulation engine for OUTPOST.
//!
//! Owns the hecs ECS world, runs wave systems on host-driven ticks,
//! and produces GameStateSnapshots for the host.

pub mod engine;
pub mod governor;
pub mod scoring;
pub mod systems;
pub mod wave_composer;
pub mod weapons;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use outpost_core as core;
