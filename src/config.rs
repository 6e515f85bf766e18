//! Configuration System
//!
//! Loads the declarative scenario (rooms, agents, environment parameters)
//! from a TOML file and validates it before any world is built. An invalid
//! configuration reports every violation at once and never reaches the
//! simulation.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default scenario file path
pub const DEFAULT_SCENARIO_PATH: &str = "scenario.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub environment: EnvironmentConfig,
    pub rooms: Vec<RoomConfig>,
    pub agents: Vec<AgentConfig>,
}

/// Simulation run parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of steps to run
    pub steps: u64,
    /// Random seed; when absent the CLI supplies one
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { steps: 50, seed: None }
    }
}

/// Environment parameters shared by all rooms and agents
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub food_regen_rate: f32,
    pub hunger_increase_rate: f32,
    pub eat_amount: f32,
    pub trust_increase: f32,
    /// Whether crowded rooms accelerate hunger
    pub crowding_penalty: bool,
    pub crowding_threshold: f32,
    pub crowding_factor: f32,
}

impl Default for EnvironmentConfig {
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

fn default_initial_food() -> f32 {
    1.0
}

/// Configuration for a single room
#[derive(Debug, Clone, Deserialize)]
pub struct RoomConfig {
    pub id: u32,
    pub capacity: u32,
    pub connected_to: Vec<u32>,
    #[serde(default = "default_initial_food")]
    pub initial_food: f32,
}

/// Configuration for a single agent
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    pub id: u32,
    /// Starting room
    pub location: u32,
    #[serde(default)]
    pub initial_hunger: f32,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate the configuration for logical consistency
    ///
    /// Returns every violation found, not just the first, so a user can fix
    /// a broken scenario in one pass.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let room_ids: Vec<u32> = self.rooms.iter().map(|r| r.id).collect();
        let mut seen_rooms = std::collections::HashSet::new();
        for room in &self.rooms {
            if !seen_rooms.insert(room.id) {
                errors.push(format!("Room id {} is declared more than once", room.id));
            }
            if room.capacity == 0 {
                errors.push(format!("Room {} must have positive capacity", room.id));
            }
            if !(0.0..=1.0).contains(&room.initial_food) {
                errors.push(format!(
                    "Room {} initial_food {} must be within [0.0, 1.0]",
                    room.id, room.initial_food
                ));
            }
            for &connected_id in &room.connected_to {
                if !room_ids.contains(&connected_id) {
                    errors.push(format!(
                        "Room {} connects to non-existent room {}",
                        room.id, connected_id
                    ));
                }
            }
        }

        if self.rooms.is_empty() {
            errors.push("At least one room must be declared".to_string());
        }

        let mut seen_agents = std::collections::HashSet::new();
        for agent in &self.agents {
            if !seen_agents.insert(agent.id) {
                errors.push(format!("Agent id {} is declared more than once", agent.id));
            }
            if !room_ids.contains(&agent.location) {
                errors.push(format!(
                    "Agent {} starts in non-existent room {}",
                    agent.id, agent.location
                ));
            }
            if !(0.0..=1.0).contains(&agent.initial_hunger) {
                errors.push(format!(
                    "Agent {} initial_hunger {} must be within [0.0, 1.0]",
                    agent.id, agent.initial_hunger
                ));
            }
        }

        // Movement is capacity-gated, so an overfilled starting room could
        // never drain back under its limit. Reject it up front.
        for room in &self.rooms {
            let starting = self
                .agents
                .iter()
                .filter(|a| a.location == room.id)
                .count();
            if starting as u64 > u64::from(room.capacity) {
                errors.push(format!(
                    "Room {} starts with {} agents but has capacity {}",
                    room.id, starting, room.capacity
                ));
            }
        }

        if self.environment.food_regen_rate < 0.0 {
            errors.push("Food regeneration rate must be non-negative".to_string());
        }
        if self.environment.hunger_increase_rate < 0.0 {
            errors.push("Hunger increase rate must be non-negative".to_string());
        }
        if self.environment.eat_amount <= 0.0 {
            errors.push("Eat amount must be positive".to_string());
        }
        if self.environment.trust_increase < 0.0 {
            errors.push("Trust increase must be non-negative".to_string());
        }
        if self.environment.crowding_threshold < 0.0 {
            errors.push("Crowding threshold must be non-negative".to_string());
        }
        if self.environment.crowding_factor < 0.0 {
            errors.push("Crowding factor must be non-negative".to_string());
        }
        if self.simulation.steps == 0 {
            errors.push("Number of simulation steps must be positive".to_string());
        }

        errors
    }

    /// Validate, converting any violations into a fatal error
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_toml() -> &'static str {
        r#"
            [simulation]
            steps = 10
            seed = 42

            [environment]
            food_regen_rate = 0.05
            hunger_increase_rate = 0.05
            eat_amount = 0.3
            trust_increase = 0.05

            [[rooms]]
            id = 0
            capacity = 2
            connected_to = [1]

            [[rooms]]
            id = 1
            capacity = 4
            connected_to = [0]
            initial_food = 0.5

            [[agents]]
            id = 0
            location = 0

            [[agents]]
            id = 1
            location = 1
            initial_hunger = 0.3
        "#
    }

    #[test]
    fn test_parse_valid_scenario() {
        let config = Config::from_toml(valid_toml()).unwrap();
        assert_eq!(config.simulation.steps, 10);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.rooms.len(), 2);
        assert_eq!(config.rooms[1].initial_food, 0.5);
        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.agents[1].initial_hunger, 0.3);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_toml(
            r#"
            [[rooms]]
            id = 0
            capacity = 1
            connected_to = []

            [[agents]]
            id = 0
            location = 0
        "#,
        )
        .unwrap();

        assert_eq!(config.simulation.steps, 50);
        assert_eq!(config.environment.eat_amount, 0.3);
        assert!(config.environment.crowding_penalty);
        assert_eq!(config.rooms[0].initial_food, 1.0);
        assert_eq!(config.agents[0].initial_hunger, 0.0);
    }

    #[test]
    fn test_dangling_references_rejected() {
        let config = Config::from_toml(
            r#"
            [[rooms]]
            id = 0
            capacity = 2
            connected_to = [7]

            [[agents]]
            id = 0
            location = 9
        "#,
        )
        .unwrap();

        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("non-existent room 7"));
        assert!(errors[1].contains("non-existent room 9"));
        assert!(matches!(config.ensure_valid(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_all_violations_reported_at_once() {
        let config = Config::from_toml(
            r#"
            [simulation]
            steps = 0

            [environment]
            food_regen_rate = -0.1
            eat_amount = 0.0

            [[rooms]]
            id = 0
            capacity = 0
            connected_to = []
            initial_food = 1.5

            [[rooms]]
            id = 0
            capacity = 1
            connected_to = []

            [[agents]]
            id = 3
            location = 0
            initial_hunger = -0.5

            [[agents]]
            id = 3
            location = 0
        "#,
        )
        .unwrap();

        let errors = config.validate();
        // duplicate room, zero capacity, out-of-range food, duplicate agent,
        // out-of-range hunger, both room declarations overfilled, negative
        // regen, non-positive eat, zero steps
        assert_eq!(errors.len(), 10);
    }

    #[test]
    fn test_parse_error_surfaces() {
        assert!(matches!(
            Config::from_toml("not toml at all ["),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("does/not/exist.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
