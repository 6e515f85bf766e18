//! Resolution Phase
//!
//! Phase B of a step: apply the decision batch sequentially in agent
//! construction order. Effects are visible immediately to agents resolved
//! later in the same step: a second EAT in the same room sees the depleted
//! food, and a MOVE into a room filled up earlier this phase is rejected.

use bevy_ecs::prelude::*;
use std::collections::HashMap;

use crate::actions::Action;
use crate::components::agent::{Alive, Hunger, Position, Trust};
use crate::components::world::{RoomRegistry, SimParams};

use super::decide::DecidedActions;

/// System: resolve all decided actions in roster order
///
/// Capacity is enforced against live occupancy as of this phase, not the
/// pre-step snapshot: when two agents race for one free slot, the first in
/// roster order wins and the second simply stays put. A decision with an
/// invalid target (non-connected room, absent TALK partner) is a silent
/// no-op; a single bad decision never aborts the run.
pub fn resolve_actions(
    params: Res<SimParams>,
    roster: Res<crate::components::agent::AgentRoster>,
    decided: Res<DecidedActions>,
    mut rooms: ResMut<RoomRegistry>,
    mut query: Query<(&mut Position, &mut Hunger, &mut Trust, &Alive)>,
) {
    // Live occupant counts, seeded from current positions and updated as
    // moves succeed.
    let mut occupancy: HashMap<u32, u32> = HashMap::new();
    for (_, entity) in roster.iter() {
        if let Ok((position, _, _, alive)) = query.get(entity) {
            if alive.0 {
                *occupancy.entry(position.room_id).or_insert(0) += 1;
            }
        }
    }

    for (agent_id, entity) in roster.iter() {
        let Some(action) = decided.get(agent_id) else {
            continue;
        };
        let Ok((mut position, mut hunger, mut trust, alive)) = query.get_mut(entity) else {
            continue;
        };
        if !alive.0 {
            continue;
        }

        match action {
            Action::Eat => {
                let Some(room) = rooms.get_mut(position.room_id) else {
                    continue;
                };
                let eaten = room.consume(params.eat_amount);
                hunger.feed(eaten);
            }
            Action::Move { destination } => {
                let Some(current) = rooms.get(position.room_id) else {
                    continue;
                };
                if !current.is_connected_to(destination) {
                    continue;
                }
                let Some(dest) = rooms.get(destination) else {
                    continue;
                };
                let dest_count = occupancy.get(&destination).copied().unwrap_or(0);
                if dest_count >= dest.capacity {
                    // Room filled up, possibly earlier this same phase.
                    // The agent stays put; no retry, no alternate action.
                    continue;
                }

                if let Some(count) = occupancy.get_mut(&position.room_id) {
                    *count = count.saturating_sub(1);
                }
                *occupancy.entry(destination).or_insert(0) += 1;
                position.room_id = destination;
            }
            Action::Talk { target } => {
                let Some(room) = rooms.get(position.room_id) else {
                    continue;
                };
                // Validated against the same start-of-step occupant list the
                // policy decided from.
                if target == agent_id.0 || !room.occupants.contains(&target) {
                    continue;
                }
                trust.raise(target, params.trust_increase);
            }
            Action::Idle => {}
        }
    }
}
