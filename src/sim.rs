//! Simulation Facade
//!
//! Builds the ECS world from a validated configuration and drives it one
//! step at a time. The facade owns all rooms and agents; callers only read
//! the state it exposes through snapshots and the per-step action batch.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::actions::Action;
use crate::components::agent::{AgentId, AgentRoster, Alive, Hunger, Position, Trust};
use crate::components::world::{Room, RoomRegistry, SimClock, SimParams};
use crate::config::{Config, ConfigError};
use crate::systems::decide::DecidedActions;
use crate::systems::{build_schedule, rebuild_occupancy};
use crate::SimRng;

/// The simulation engine: owns the world and the per-step schedule
pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Simulation {
    /// Build a simulation from a configuration, using the config's seed
    /// (falling back to 42 when none is given)
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let seed = config.simulation.seed.unwrap_or(42);
        Self::from_config_seeded(config, seed)
    }

    /// Build a simulation from a configuration with an explicit seed
    ///
    /// Fails fast with the full violation list if the configuration is
    /// invalid; no partially constructed world is ever stepped.
    pub fn from_config_seeded(config: &Config, seed: u64) -> Result<Self, ConfigError> {
        config.ensure_valid()?;

        let mut world = World::new();

        let mut rooms = RoomRegistry::new();
        for room_config in &config.rooms {
            rooms.register(Room::new(
                room_config.id,
                room_config.capacity,
                room_config.connected_to.clone(),
                room_config.initial_food,
            ));
        }
        world.insert_resource(rooms);

        // Spawn agents in declaration order; the roster fixes this as the
        // resolution order for the rest of the run.
        let mut roster = AgentRoster::new();
        for agent_config in &config.agents {
            let entity = world
                .spawn((
                    AgentId(agent_config.id),
                    Position::new(agent_config.location),
                    Hunger::new(agent_config.initial_hunger),
                    Alive(true),
                    Trust::new(),
                ))
                .id();
            roster.push(AgentId(agent_config.id), entity);
        }
        world.insert_resource(roster);

        world.insert_resource(SimParams {
            food_regen_rate: config.environment.food_regen_rate,
            hunger_increase_rate: config.environment.hunger_increase_rate,
            eat_amount: config.environment.eat_amount,
            trust_increase: config.environment.trust_increase,
            crowding_penalty: config.environment.crowding_penalty,
            crowding_threshold: config.environment.crowding_threshold,
            crowding_factor: config.environment.crowding_factor,
        });
        world.insert_resource(SimClock::new());
        world.insert_resource(DecidedActions::new());
        world.insert_resource(SimRng(SmallRng::seed_from_u64(seed)));

        // Occupant lists must be valid before the first decision phase.
        let mut init = Schedule::default();
        init.add_systems(rebuild_occupancy);
        init.run(&mut world);

        Ok(Self {
            world,
            schedule: build_schedule(),
        })
    }

    /// Execute one simulation step, returning the decision batch in agent
    /// construction order
    pub fn step(&mut self) -> Vec<(AgentId, Action)> {
        self.schedule.run(&mut self.world);
        self.world
            .resource::<DecidedActions>()
            .iter()
            .collect()
    }

    /// Number of steps executed so far
    pub fn current_step(&self) -> u64 {
        self.world.resource::<SimClock>().current_step
    }

    /// Read-only view of a room
    pub fn room(&self, room_id: u32) -> Option<&Room> {
        self.world.resource::<RoomRegistry>().get(room_id)
    }

    /// All room IDs, ascending
    pub fn room_ids(&self) -> Vec<u32> {
        self.world.resource::<RoomRegistry>().room_ids()
    }

    /// Read-only access to the world for snapshot capture
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
