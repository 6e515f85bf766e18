//! Output Schemas
//!
//! Serialization structs for per-step state records. Numeric fields are
//! rounded for presentation only; the underlying simulation state is never
//! rounded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of an agent's state at a specific timestep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    pub id: u32,
    pub location: u32,
    pub hunger: f32,
    pub alive: bool,
    /// Trust toward other agents, keyed by target ID
    pub trust: BTreeMap<u32, f32>,
}

/// Snapshot of a room's state at a specific timestep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomState {
    pub id: u32,
    pub food: f32,
    pub agent_count: usize,
    pub agents: Vec<u32>,
}

/// Record of an action taken by an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub agent_id: u32,
    pub action: String,
    pub target: Option<u32>,
}

/// Complete log of a single simulation step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLog {
    pub timestep: u64,
    pub agents: Vec<AgentState>,
    pub rooms: Vec<RoomState>,
    pub actions: Vec<ActionRecord>,
}

/// Metadata about the simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub seed: u64,
    pub total_steps: u64,
    pub num_agents: usize,
    pub num_rooms: usize,
}

/// Min/mean/max/final statistics for a tracked quantity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesStats {
    pub mean: f32,
    pub min: f32,
    pub max: f32,
    pub final_value: f32,
}

/// Survival counts at the end of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurvivalStats {
    pub alive: usize,
    pub total: usize,
    pub rate: f32,
}

/// End-of-run summary statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps_logged: usize,
    pub avg_hunger: SeriesStats,
    pub avg_food: SeriesStats,
    pub action_distribution: BTreeMap<String, u64>,
    pub survival: SurvivalStats,
}
