//! Agent Components
//!
//! Components for individual agents: identity, location, hunger, liveness,
//! and the trust an agent holds toward others.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for an agent
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

/// Component: an agent's current room
///
/// Mutated only by the resolution phase; everything else reads.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub room_id: u32,
}

impl Position {
    pub fn new(room_id: u32) -> Self {
        Self { room_id }
    }
}

/// Component: hunger level, 0.0 = sated, 1.0 = maximally hungry
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Hunger(pub f32);

impl Hunger {
    pub fn new(value: f32) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Reduce hunger by the amount of food eaten, floored at 0.0
    pub fn feed(&mut self, eaten: f32) {
        self.0 = (self.0 - eaten).max(0.0);
    }

    /// Increase hunger, clamped to 1.0
    pub fn accrue(&mut self, amount: f32) {
        self.0 = (self.0 + amount).min(1.0);
    }
}

/// Component: liveness gate
///
/// A dead agent takes no actions and is excluded from occupancy. Nothing in
/// the engine clears this flag today, but every system treats it as the gate
/// for participation.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Alive(pub bool);

/// Component: trust this agent holds toward others
///
/// An owned map from other agent IDs to a score in [0.0, 1.0], raised only
/// by TALK and monotonically non-decreasing. Never holds an entry for the
/// owning agent itself.
#[derive(Component, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trust {
    toward: HashMap<u32, f32>,
}

impl Trust {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trust toward another agent (0.0 when never interacted)
    pub fn get(&self, target: u32) -> f32 {
        self.toward.get(&target).copied().unwrap_or(0.0)
    }

    /// Raise trust toward the target, clamped to the 1.0 ceiling
    pub fn raise(&mut self, target: u32, increment: f32) {
        let entry = self.toward.entry(target).or_insert(0.0);
        *entry = (*entry + increment).min(1.0);
    }

    /// All trust entries, in ascending target ID order
    pub fn entries_sorted(&self) -> Vec<(u32, f32)> {
        let mut entries: Vec<(u32, f32)> = self.toward.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_unstable_by_key(|&(id, _)| id);
        entries
    }

    pub fn is_empty(&self) -> bool {
        self.toward.is_empty()
    }
}

/// Resource: all agents in construction order
///
/// The fixed, deterministic iteration order for both the decision phase and
/// the resolution phase. Capacity arbitration depends on this order, so it
/// never changes after setup.
#[derive(Resource, Debug, Default)]
pub struct AgentRoster {
    entries: Vec<(AgentId, Entity)>,
}

impl AgentRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an agent; call in construction order only
    pub fn push(&mut self, id: AgentId, entity: Entity) {
        self.entries.push((id, entity));
    }

    /// Agents in construction order
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, Entity)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
