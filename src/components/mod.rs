//! Simulation Components
//!
//! Components and registries for agents and rooms.

pub mod agent;
pub mod world;

pub use agent::*;
pub use world::*;
