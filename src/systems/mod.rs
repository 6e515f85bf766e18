//! Step Systems
//!
//! The three phases of a simulation step, wired into one chained schedule.

use bevy_ecs::prelude::*;

pub mod decide;
pub mod resolve;
pub mod upkeep;

pub use decide::{choose_action, decide_actions, DecidedActions};
pub use resolve::resolve_actions;
pub use upkeep::{accrue_hunger, advance_clock, rebuild_occupancy, regenerate_food};

/// Build the per-step schedule
///
/// Strict chaining enforces the phase protocol: all decisions are collected
/// before any mutation, resolution runs sequentially, and passive dynamics
/// see the step's final positions.
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            decide_actions,
            resolve_actions,
            rebuild_occupancy,
            regenerate_food,
            accrue_hunger,
            advance_clock,
        )
            .chain(),
    );
    schedule
}
