//! Enclave Simulation Engine
//!
//! Runs a discrete-step simulation of a small closed society: agents in a
//! room graph share a regenerating food resource, build pairwise trust by
//! talking, and are constrained by room capacity.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use enclave_sim::config::{Config, DEFAULT_SCENARIO_PATH};
use enclave_sim::output::{RunLog, RunMetadata};
use enclave_sim::Simulation;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "enclave_sim")]
#[command(about = "A closed-society room and agent simulation")]
struct Args {
    /// Path to the scenario configuration file
    #[arg(long, default_value = DEFAULT_SCENARIO_PATH)]
    config: PathBuf,

    /// Number of steps to simulate (overrides the scenario)
    #[arg(long)]
    steps: Option<u64>,

    /// Random seed for reproducibility (overrides the scenario)
    #[arg(long)]
    seed: Option<u64>,

    /// Record every Nth step in the run log
    #[arg(long, default_value_t = 1)]
    log_interval: u64,

    /// Directory for exported run logs
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Export the run log as JSON
    #[arg(long)]
    export_json: bool,

    /// Export the run log as CSV files
    #[arg(long)]
    export_csv: bool,

    /// Print per-step action and state detail
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    println!("Enclave Simulation Engine");
    println!("=========================");

    println!("Loading scenario from {}...", args.config.display());
    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load scenario: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let violations = config.validate();
    if !violations.is_empty() {
        eprintln!("Scenario validation errors:");
        for violation in &violations {
            eprintln!("  - {}", violation);
        }
        return ExitCode::FAILURE;
    }

    let steps = args.steps.unwrap_or(config.simulation.steps);
    let seed = args.seed.or(config.simulation.seed).unwrap_or(42);

    println!("  Rooms: {}", config.rooms.len());
    println!("  Agents: {}", config.agents.len());
    println!("  Steps: {}", steps);
    println!("  Seed: {}", seed);
    println!();

    let mut sim = match Simulation::from_config_seeded(&config, seed) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Could not build simulation: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut run_log = RunLog::new(
        RunMetadata {
            seed,
            total_steps: steps,
            num_agents: config.agents.len(),
            num_rooms: config.rooms.len(),
        },
        args.log_interval,
    );

    println!("Starting simulation...");
    println!();

    for step in 0..steps {
        let decisions = sim.step();
        run_log.record(sim.world_mut(), step);

        if args.verbose {
            print_step_detail(&mut sim, step, &decisions);
        } else if step > 0 && step % 10 == 0 {
            let moves = decisions
                .iter()
                .filter(|(_, a)| a.name() == "MOVE")
                .count();
            let talks = decisions
                .iter()
                .filter(|(_, a)| a.name() == "TALK")
                .count();
            println!(
                "[Step {:>4}] {} decisions (moves: {}, talks: {})",
                step,
                decisions.len(),
                moves,
                talks
            );
        }
    }

    println!();
    println!("Simulation complete. Ran {} steps.", sim.current_step());
    println!();
    run_log.print_summary();

    if args.export_json {
        let path = args.log_dir.join("simulation.json");
        match run_log.export_json(&path) {
            Ok(path) => println!("Wrote {}", path.display()),
            Err(e) => eprintln!("Warning: could not write JSON log: {}", e),
        }
    }

    if args.export_csv {
        match run_log.export_csv(&args.log_dir, "simulation") {
            Ok(files) => {
                for file in files {
                    println!("Wrote {}", file.display());
                }
            }
            Err(e) => eprintln!("Warning: could not write CSV logs: {}", e),
        }
    }

    ExitCode::SUCCESS
}

/// Print full action and state detail for one step
fn print_step_detail(
    sim: &mut Simulation,
    step: u64,
    decisions: &[(enclave_sim::AgentId, enclave_sim::Action)],
) {
    println!("{}", "=".repeat(60));
    println!("Step {}", step);
    println!("{}", "=".repeat(60));

    println!("Actions:");
    for (agent_id, action) in decisions {
        match action.target() {
            Some(target) => println!("  Agent {}: {} -> {}", agent_id.0, action.name(), target),
            None => println!("  Agent {}: {}", agent_id.0, action.name()),
        }
    }

    let snapshot = enclave_sim::output::capture_step(sim.world_mut(), step);

    println!("Agent states:");
    for agent in &snapshot.agents {
        let trust: Vec<String> = agent
            .trust
            .iter()
            .map(|(id, value)| format!("{}:{:.2}", id, value))
            .collect();
        let trust = if trust.is_empty() {
            "none".to_string()
        } else {
            trust.join(", ")
        };
        println!(
            "  Agent {}: room={}, hunger={:.2}, trust=[{}]",
            agent.id, agent.location, agent.hunger, trust
        );
    }

    println!("Room states:");
    for room in &snapshot.rooms {
        println!(
            "  Room {}: food={:.2}, agents={:?} ({}/{})",
            room.id,
            room.food,
            room.agents,
            room.agent_count,
            sim.room(room.id).map(|r| r.capacity).unwrap_or(0)
        );
    }
    println!();
}
