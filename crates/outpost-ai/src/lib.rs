//! Enemy AI for Last Outpost.
//!
//! Steering, gun state machines and archetype capability profiles, all as
//! plain data and pure functions.

pub mod gunnery;
pub mod profiles;
pub mod steering;

pub use outpost_core as core;

#[cfg(test)]
mod tests;
