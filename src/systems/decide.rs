//! Decision Phase
//!
//! Phase A of a step: every living agent picks exactly one action from a
//! consistent start-of-step snapshot of its current room. All decisions are
//! collected before any mutation occurs, so no agent decides based on a room
//! already changed by an agent processed earlier in the same step.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::actions::Action;
use crate::components::agent::{AgentId, Alive, Hunger, Position};
use crate::components::world::{Room, RoomRegistry};
use crate::SimRng;

/// Hunger above which an agent abandons a nearly empty room to seek food
pub const HUNGER_URGENT: f32 = 0.6;
/// Room food below which the room counts as critically low
pub const FOOD_CRITICAL: f32 = 0.2;
/// Hunger above which an agent eats when usable food is present
pub const HUNGER_MODERATE: f32 = 0.4;
/// Room food above which eating is worthwhile
pub const FOOD_USABLE: f32 = 0.1;

/// Resource: the decision batch for the current step
///
/// One `(agent, action)` pair per living agent, in roster order. Written by
/// the decide system, read by the resolve system, and returned to the caller
/// as the step's action record.
#[derive(Resource, Debug, Default)]
pub struct DecidedActions {
    decisions: Vec<(AgentId, Action)>,
}

impl DecidedActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.decisions.clear();
    }

    pub fn push(&mut self, agent_id: AgentId, action: Action) {
        self.decisions.push((agent_id, action));
    }

    /// Decisions in roster order
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, Action)> + '_ {
        self.decisions.iter().copied()
    }

    /// The action decided by a specific agent this step
    pub fn get(&self, agent_id: AgentId) -> Option<Action> {
        self.decisions
            .iter()
            .find(|(id, _)| *id == agent_id)
            .map(|&(_, action)| action)
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    /// Take the batch, leaving the resource empty
    pub fn drain(&mut self) -> Vec<(AgentId, Action)> {
        std::mem::take(&mut self.decisions)
    }
}

/// The decision policy: map an agent's own state and its current room to one
/// action, using only local information.
///
/// Priority order, first satisfied rule wins:
/// 1. urgently hungry in a nearly empty room with an exit: move to seek food
/// 2. moderately hungry with usable food: eat
/// 3. company present: talk to a random other occupant
/// 4. an exit exists: wander to a random connected room
/// 5. any food at all: eat
/// 6. nothing to do: idle
pub fn choose_action(agent_id: AgentId, hunger: f32, room: &Room, rng: &mut SmallRng) -> Action {
    if hunger > HUNGER_URGENT && room.food < FOOD_CRITICAL {
        if let Some(&destination) = room.connected.choose(rng) {
            return Action::Move { destination };
        }
    }

    if hunger > HUNGER_MODERATE && room.food > FOOD_USABLE {
        return Action::Eat;
    }

    let others = room.other_occupants(agent_id.0);
    if let Some(&target) = others.choose(rng) {
        return Action::Talk { target };
    }

    if let Some(&destination) = room.connected.choose(rng) {
        return Action::Move { destination };
    }

    if room.food > 0.0 {
        return Action::Eat;
    }

    Action::Idle
}

/// System: collect one decision per living agent, in roster order
///
/// Roster order also fixes the order of RNG draws, which keeps runs
/// reproducible for a given seed.
pub fn decide_actions(
    roster: Res<crate::components::agent::AgentRoster>,
    rooms: Res<RoomRegistry>,
    mut rng: ResMut<SimRng>,
    mut decided: ResMut<DecidedActions>,
    query: Query<(&Position, &Hunger, &Alive)>,
) {
    decided.clear();

    for (agent_id, entity) in roster.iter() {
        let Ok((position, hunger, alive)) = query.get(entity) else {
            continue;
        };
        if !alive.0 {
            continue;
        }
        let Some(room) = rooms.get(position.room_id) else {
            continue;
        };

        let action = choose_action(agent_id, hunger.0, room, &mut rng.0);
        decided.push(agent_id, action);
    }
}
