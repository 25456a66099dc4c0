use std::time::Duration;

use super::types::{DeathReason, GridCoord, WorldPos};

/// Change-set entries emitted by the simulation, in the order they happened.
///
/// Payloads are owned copies; the presentation layer may keep them around while
/// the authoritative state moves on.
#[derive(Clone, Debug, PartialEq)]
pub enum SnakeEvent {
    /// Emitted before the tick is committed. `prev_positions[i]` is where segment
    /// `i` of the new body animates from, `next_positions[i]` where it ends up.
    MoveStarted {
        prev_positions: Vec<WorldPos>,
        next_positions: Vec<WorldPos>,
        duration: Duration,
    },
    /// The tick is committed and the state can be read back as ground truth.
    Moved,
    AteFood {
        position: GridCoord,
    },
    GameOver {
        reason: DeathReason,
    },
    OrientationChanged {
        forward: GridCoord,
        up: GridCoord,
    },
}

impl SnakeEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SnakeEvent::MoveStarted { .. } => "move_started",
            SnakeEvent::Moved => "moved",
            SnakeEvent::AteFood { .. } => "ate_food",
            SnakeEvent::GameOver { .. } => "game_over",
            SnakeEvent::OrientationChanged { .. } => "orientation_changed",
        }
    }
}

/// Value copy of everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSnapshot {
    pub tick: u64,
    pub segment_positions: Vec<WorldPos>,
    pub segment_directions: Vec<GridCoord>,
    pub food_position: Option<WorldPos>,
    pub length: usize,
    pub target_length: usize,
    pub forward: GridCoord,
    pub up: GridCoord,
    pub score: u32,
    pub active: bool,
}
