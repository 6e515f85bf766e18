//! Run Logging
//!
//! Captures per-step state records from the world and exports the completed
//! run as JSON or CSV. The engine itself persists nothing; file output is
//! owned entirely by this sink and the caller.

use bevy_ecs::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::components::agent::{AgentId, AgentRoster, Alive, Hunger, Position, Trust};
use crate::components::world::RoomRegistry;
use crate::systems::decide::DecidedActions;

use super::schemas::{
    ActionRecord, AgentState, RoomState, RunMetadata, RunSummary, SeriesStats, StepLog,
    SurvivalStats,
};

/// Round to three decimals for presentation
fn round3(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

/// Capture a complete step record from the world
///
/// Agents appear in roster order and rooms in ascending ID order, so two
/// identical runs produce byte-identical records.
pub fn capture_step(world: &mut World, timestep: u64) -> StepLog {
    let mut agents = Vec::new();
    {
        let mut roster_entries = Vec::new();
        {
            let roster = world.resource::<AgentRoster>();
            roster_entries.extend(roster.iter());
        }
        let mut query = world.query::<(&AgentId, &Position, &Hunger, &Alive, &Trust)>();
        for (_, entity) in roster_entries {
            let Ok((agent_id, position, hunger, alive, trust)) = query.get(world, entity) else {
                continue;
            };
            let trust_map: BTreeMap<u32, f32> = trust
                .entries_sorted()
                .into_iter()
                .map(|(id, value)| (id, round3(value)))
                .collect();
            agents.push(AgentState {
                id: agent_id.0,
                location: position.room_id,
                hunger: round3(hunger.0),
                alive: alive.0,
                trust: trust_map,
            });
        }
    }

    let rooms: Vec<RoomState> = world
        .resource::<RoomRegistry>()
        .iter_sorted()
        .map(|room| RoomState {
            id: room.id,
            food: round3(room.food),
            agent_count: room.occupants.len(),
            agents: room.occupants.clone(),
        })
        .collect();

    let actions: Vec<ActionRecord> = world
        .resource::<DecidedActions>()
        .iter()
        .map(|(agent_id, action)| ActionRecord {
            agent_id: agent_id.0,
            action: action.name().to_string(),
            target: action.target(),
        })
        .collect();

    StepLog {
        timestep,
        agents,
        rooms,
        actions,
    }
}

/// Accumulates step records for a whole run and exports them
#[derive(Debug)]
pub struct RunLog {
    pub metadata: RunMetadata,
    pub steps: Vec<StepLog>,
    /// Record every Nth step (1 = every step)
    log_interval: u64,
}

impl RunLog {
    pub fn new(metadata: RunMetadata, log_interval: u64) -> Self {
        Self {
            metadata,
            steps: Vec::new(),
            log_interval: log_interval.max(1),
        }
    }

    /// Record a step if it falls on the log interval
    pub fn record(&mut self, world: &mut World, timestep: u64) {
        if timestep % self.log_interval != 0 {
            return;
        }
        self.steps.push(capture_step(world, timestep));
    }

    /// Export the complete run as pretty-printed JSON
    pub fn export_json(&self, path: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::json!({
            "metadata": self.metadata,
            "steps": self.steps,
        });
        let content = serde_json::to_string_pretty(&body)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        fs::write(path, content)?;
        Ok(path.to_path_buf())
    }

    /// Export the run as three CSV files (agents, rooms, actions)
    pub fn export_csv(
        &self,
        dir: impl AsRef<Path>,
        prefix: &str,
    ) -> std::io::Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let mut written = Vec::new();

        let agent_path = dir.join(format!("{prefix}_agents.csv"));
        {
            let mut file = fs::File::create(&agent_path)?;
            writeln!(file, "timestep,agent_id,location,hunger,alive,trust")?;
            for step in &self.steps {
                for agent in &step.agents {
                    let trust: Vec<String> = agent
                        .trust
                        .iter()
                        .map(|(id, value)| format!("{id}:{value}"))
                        .collect();
                    writeln!(
                        file,
                        "{},{},{},{},{},{}",
                        step.timestep,
                        agent.id,
                        agent.location,
                        agent.hunger,
                        agent.alive,
                        trust.join(";")
                    )?;
                }
            }
        }
        written.push(agent_path);

        let room_path = dir.join(format!("{prefix}_rooms.csv"));
        {
            let mut file = fs::File::create(&room_path)?;
            writeln!(file, "timestep,room_id,food,agent_count,agents")?;
            for step in &self.steps {
                for room in &step.rooms {
                    let agents: Vec<String> =
                        room.agents.iter().map(|id| id.to_string()).collect();
                    writeln!(
                        file,
                        "{},{},{},{},{}",
                        step.timestep,
                        room.id,
                        room.food,
                        room.agent_count,
                        agents.join(";")
                    )?;
                }
            }
        }
        written.push(room_path);

        let action_path = dir.join(format!("{prefix}_actions.csv"));
        {
            let mut file = fs::File::create(&action_path)?;
            writeln!(file, "timestep,agent_id,action,target")?;
            for step in &self.steps {
                for action in &step.actions {
                    let target = action
                        .target
                        .map(|t| t.to_string())
                        .unwrap_or_default();
                    writeln!(
                        file,
                        "{},{},{},{}",
                        step.timestep, action.agent_id, action.action, target
                    )?;
                }
            }
        }
        written.push(action_path);

        Ok(written)
    }

    /// Compute end-of-run summary statistics from the recorded steps
    pub fn summary(&self) -> RunSummary {
        if self.steps.is_empty() {
            return RunSummary::default();
        }

        let avg_hunger_per_step: Vec<f32> = self
            .steps
            .iter()
            .filter_map(|step| {
                let alive: Vec<&_> = step.agents.iter().filter(|a| a.alive).collect();
                if alive.is_empty() {
                    None
                } else {
                    Some(alive.iter().map(|a| a.hunger).sum::<f32>() / alive.len() as f32)
                }
            })
            .collect();

        let avg_food_per_step: Vec<f32> = self
            .steps
            .iter()
            .map(|step| {
                step.rooms.iter().map(|r| r.food).sum::<f32>() / step.rooms.len().max(1) as f32
            })
            .collect();

        let mut action_distribution: BTreeMap<String, u64> = BTreeMap::new();
        for step in &self.steps {
            for action in &step.actions {
                *action_distribution.entry(action.action.clone()).or_default() += 1;
            }
        }

        let last = &self.steps[self.steps.len() - 1];
        let alive = last.agents.iter().filter(|a| a.alive).count();
        let total = last.agents.len();

        RunSummary {
            steps_logged: self.steps.len(),
            avg_hunger: series_stats(&avg_hunger_per_step),
            avg_food: series_stats(&avg_food_per_step),
            action_distribution,
            survival: SurvivalStats {
                alive,
                total,
                rate: if total > 0 {
                    alive as f32 / total as f32
                } else {
                    0.0
                },
            },
        }
    }

    /// Print summary statistics to the console
    pub fn print_summary(&self) {
        let summary = self.summary();

        if summary.steps_logged == 0 {
            println!("No steps logged");
            return;
        }

        println!("SIMULATION SUMMARY");
        println!();
        println!("Steps logged: {}", summary.steps_logged);

        println!();
        println!("Hunger statistics:");
        println!("  Mean:  {:.3}", summary.avg_hunger.mean);
        println!("  Min:   {:.3}", summary.avg_hunger.min);
        println!("  Max:   {:.3}", summary.avg_hunger.max);
        println!("  Final: {:.3}", summary.avg_hunger.final_value);

        println!();
        println!("Food statistics:");
        println!("  Mean:  {:.3}", summary.avg_food.mean);
        println!("  Min:   {:.3}", summary.avg_food.min);
        println!("  Max:   {:.3}", summary.avg_food.max);
        println!("  Final: {:.3}", summary.avg_food.final_value);

        println!();
        println!("Action distribution:");
        for (action, count) in &summary.action_distribution {
            println!("  {}: {}", action, count);
        }

        println!();
        println!(
            "Survival: {}/{} ({:.1}%)",
            summary.survival.alive,
            summary.survival.total,
            summary.survival.rate * 100.0
        );
    }
}

fn series_stats(values: &[f32]) -> SeriesStats {
    if values.is_empty() {
        return SeriesStats::default();
    }
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    SeriesStats {
        mean,
        min,
        max,
        final_value: values[values.len() - 1],
    }
}
