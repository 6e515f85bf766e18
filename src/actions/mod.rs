//! Action Definitions
//!
//! The closed set of actions an agent can take in a single step.

use serde::{Deserialize, Serialize};

/// An action chosen by the decision policy, resolved in agent order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Consume food in the current room
    Eat,
    /// Relocate to a connected room
    Move { destination: u32 },
    /// Raise trust toward another agent present in the same room
    Talk { target: u32 },
    /// Do nothing this step
    Idle,
}

impl Action {
    /// Action name for records and display
    pub fn name(&self) -> &'static str {
        match self {
            Action::Eat => "EAT",
            Action::Move { .. } => "MOVE",
            Action::Talk { .. } => "TALK",
            Action::Idle => "IDLE",
        }
    }

    /// The room or agent the action is directed at, if any
    pub fn target(&self) -> Option<u32> {
        match self {
            Action::Move { destination } => Some(*destination),
            Action::Talk { target } => Some(*target),
            Action::Eat | Action::Idle => None,
        }
    }
}
