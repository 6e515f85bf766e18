//! Enclave Simulation Engine Library
//!
//! A discrete-step simulation of a small closed society: agents occupy rooms
//! connected in a graph, consume a shared regenerating food resource, build
//! pairwise trust by talking, and are constrained by room capacity.
//!
//! Each step runs in two strictly ordered phases: every living agent first
//! decides an action from a consistent start-of-step snapshot, then all
//! decisions are resolved sequentially in agent construction order against
//! shared room state. Passive dynamics (occupancy rebuild, food regeneration,
//! hunger accrual) run once at the end of the step.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod actions;
pub mod components;
pub mod config;
pub mod output;
pub mod sim;
pub mod systems;

pub use actions::Action;
pub use components::agent::{AgentId, AgentRoster, Alive, Hunger, Position, Trust};
pub use components::world::{Room, RoomRegistry, SimClock, SimParams};
pub use config::{Config, ConfigError};
pub use sim::Simulation;
pub use systems::decide::DecidedActions;

/// Seeded random number generator resource
///
/// The single source of randomness for the whole run; a run is reproducible
/// bit-for-bit given the same seed and configuration.
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
