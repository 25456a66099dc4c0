mod body;
mod bot_controller;
mod events;
mod game_state;
mod grid;
mod orientation;
mod session;
mod settings;
mod tick_clock;
mod types;

pub use body::{INITIAL_LENGTH, PlannedMove, Segment, Snake};
pub use bot_controller::BotController;
pub use events::{SnakeEvent, SnakeSnapshot};
pub use game_state::SnakeGameState;
pub use grid::WorldGrid;
pub use orientation::{Orientation, Rebuilt};
pub use session::{SessionOptions, SessionSummary, SnakeCommand, SnakePresenter, SnakeSession, StopReason};
pub use settings::{
    DEFAULT_CELL_SIZE, DEFAULT_EAT_RADIUS, DEFAULT_GRID_EXTENT, DEFAULT_TICK_INTERVAL_MS,
    DEFAULT_TURN_COOLDOWN_MS, MAX_GRID_EXTENT, MIN_GRID_EXTENT, SnakeSettings,
};
pub use tick_clock::TickClock;
pub use types::{CellState, DeathReason, GridCoord, GridSize, Turn, WorldPos};
