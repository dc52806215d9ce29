//! Core types and definitions for the Last Outpost simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, configuration, state snapshots, events, constants
//! and the collaborator traits. It has no ECS logic and no runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod services;
pub mod state;
pub mod types;
