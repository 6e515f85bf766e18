//! World Components
//!
//! Rooms, the room registry, and global simulation resources.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A room in the world: a node in the connection graph holding a shared
/// food resource and a bounded number of occupants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier
    pub id: u32,
    /// Maximum simultaneous occupants
    pub capacity: u32,
    /// Available shared food, always in [0.0, 1.0]
    pub food: f32,
    /// Adjacent room IDs (for movement)
    pub connected: Vec<u32>,
    /// Agent IDs currently located here. Derived state: rebuilt from agent
    /// positions at the end of every step, never the source of truth.
    pub occupants: Vec<u32>,
}

impl Room {
    pub fn new(id: u32, capacity: u32, connected: Vec<u32>, food: f32) -> Self {
        Self {
            id,
            capacity,
            food: food.clamp(0.0, 1.0),
            connected,
            occupants: Vec::new(),
        }
    }

    /// Check if another room is directly reachable from here
    pub fn is_connected_to(&self, other_id: u32) -> bool {
        self.connected.contains(&other_id)
    }

    /// Occupant IDs other than the given agent
    pub fn other_occupants(&self, agent_id: u32) -> Vec<u32> {
        self.occupants
            .iter()
            .copied()
            .filter(|&id| id != agent_id)
            .collect()
    }

    /// Consume up to `amount` food, returning how much was actually eaten
    pub fn consume(&mut self, amount: f32) -> f32 {
        let eaten = amount.min(self.food);
        self.food -= eaten;
        eaten
    }

    /// Regenerate food, capped at the 1.0 ceiling
    pub fn regenerate(&mut self, rate: f32) {
        self.food = (self.food + rate).min(1.0);
    }

    /// Current occupants divided by capacity
    pub fn occupancy_ratio(&self) -> f32 {
        self.occupants.len() as f32 / self.capacity as f32
    }
}

/// Resource: registry of all rooms in the world
///
/// Owned and exclusively mutated by the step systems; external callers only
/// read. Rooms are never added or removed during a run.
#[derive(Resource, Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<u32, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a room
    pub fn register(&mut self, room: Room) {
        self.rooms.insert(room.id, room);
    }

    /// Get a room by ID
    pub fn get(&self, room_id: u32) -> Option<&Room> {
        self.rooms.get(&room_id)
    }

    /// Get mutable room
    pub fn get_mut(&mut self, room_id: u32) -> Option<&mut Room> {
        self.rooms.get_mut(&room_id)
    }

    /// Number of registered rooms
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All rooms, in ascending ID order
    pub fn iter_sorted(&self) -> impl Iterator<Item = &Room> {
        let mut ids: Vec<u32> = self.rooms.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter().filter_map(|id| self.rooms.get(&id))
    }

    /// All room IDs, ascending
    pub fn room_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.rooms.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Clear every room's occupant list before a rebuild
    pub fn clear_occupants(&mut self) {
        for room in self.rooms.values_mut() {
            room.occupants.clear();
        }
    }
}

/// Resource: global environment parameters, fixed for the life of the run
#[derive(Resource, Debug, Clone)]
pub struct SimParams {
    /// Food added to every room per step, capped at 1.0
    pub food_regen_rate: f32,
    /// Base hunger added to every living agent per step
    pub hunger_increase_rate: f32,
    /// Maximum food consumed by a single EAT action
    pub eat_amount: f32,
    /// Trust gained toward the target of a TALK action
    pub trust_increase: f32,
    /// Whether crowded rooms accelerate hunger
    pub crowding_penalty: bool,
    /// Occupancy ratio above which the crowding penalty applies
    pub crowding_threshold: f32,
    /// Penalty per unit of excess occupancy ratio
    pub crowding_factor: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            food_regen_rate: 0.05,
            hunger_increase_rate: 0.05,
            eat_amount: 0.3,
            trust_increase: 0.05,
            crowding_penalty: true,
            crowding_threshold: 0.75,
            crowding_factor: 0.1,
        }
    }
}

/// Resource: current simulation step counter
#[derive(Resource, Debug, Default)]
pub struct SimClock {
    pub current_step: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self) {
        self.current_step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_is_bounded_by_available_food() {
        let mut room = Room::new(0, 2, vec![1], 0.2);
        let eaten = room.consume(0.3);
        assert!((eaten - 0.2).abs() < f32::EPSILON);
        assert_eq!(room.food, 0.0);

        // Nothing left to eat
        let eaten = room.consume(0.3);
        assert_eq!(eaten, 0.0);
    }

    #[test]
    fn test_regenerate_caps_at_ceiling() {
        let mut room = Room::new(0, 2, vec![], 0.98);
        room.regenerate(0.05);
        assert_eq!(room.food, 1.0);
    }

    #[test]
    fn test_registry_sorted_iteration() {
        let mut registry = RoomRegistry::new();
        registry.register(Room::new(2, 1, vec![], 1.0));
        registry.register(Room::new(0, 1, vec![], 1.0));
        registry.register(Room::new(1, 1, vec![], 1.0));

        let ids: Vec<u32> = registry.iter_sorted().map(|r| r.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_other_occupants_excludes_self() {
        let mut room = Room::new(0, 4, vec![], 1.0);
        room.occupants = vec![1, 2, 3];
        assert_eq!(room.other_occupants(2), vec![1, 3]);
        assert_eq!(room.other_occupants(9), vec![1, 2, 3]);
    }
}
