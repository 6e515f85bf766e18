//! Passive Dynamics
//!
//! Phase C of a step, applied once after all agents have resolved: rebuild
//! room occupancy from agent positions, regenerate food, accrue hunger, and
//! advance the clock.

use bevy_ecs::prelude::*;

use crate::components::agent::{AgentId, Alive, Hunger, Position};
use crate::components::world::{RoomRegistry, SimClock, SimParams};

/// System: rebuild every room's occupant list from living agents' positions
///
/// Occupant lists are derived state. This rebuild is the sole source of
/// truth for occupancy going forward; roster order makes the lists
/// deterministic.
pub fn rebuild_occupancy(
    roster: Res<crate::components::agent::AgentRoster>,
    mut rooms: ResMut<RoomRegistry>,
    query: Query<(&AgentId, &Position, &Alive)>,
) {
    rooms.clear_occupants();

    for (_, entity) in roster.iter() {
        let Ok((agent_id, position, alive)) = query.get(entity) else {
            continue;
        };
        if !alive.0 {
            continue;
        }
        if let Some(room) = rooms.get_mut(position.room_id) {
            room.occupants.push(agent_id.0);
        }
    }
}

/// System: regenerate food in every room, capped at the 1.0 ceiling
pub fn regenerate_food(params: Res<SimParams>, mut rooms: ResMut<RoomRegistry>) {
    let ids = rooms.room_ids();
    for id in ids {
        if let Some(room) = rooms.get_mut(id) {
            room.regenerate(params.food_regen_rate);
        }
    }
}

/// System: accrue hunger for every living agent
///
/// Adds the base rate, plus a crowding penalty proportional to how far the
/// room's occupancy ratio exceeds the crowding threshold when the penalty is
/// enabled. Runs after `rebuild_occupancy` so ratios reflect this step's
/// final positions.
pub fn accrue_hunger(
    params: Res<SimParams>,
    rooms: Res<RoomRegistry>,
    mut query: Query<(&Position, &mut Hunger, &Alive)>,
) {
    for (position, mut hunger, alive) in query.iter_mut() {
        if !alive.0 {
            continue;
        }

        let mut increase = params.hunger_increase_rate;
        if params.crowding_penalty {
            if let Some(room) = rooms.get(position.room_id) {
                let ratio = room.occupancy_ratio();
                if ratio > params.crowding_threshold {
                    increase += (ratio - params.crowding_threshold) * params.crowding_factor;
                }
            }
        }

        hunger.accrue(increase);
    }
}

/// System: advance the step counter
pub fn advance_clock(mut clock: ResMut<SimClock>) {
    clock.advance();
}
