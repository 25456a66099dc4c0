use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval};

use crate::games::SessionRng;
use crate::log;
use super::bot_controller::BotController;
use super::events::{SnakeEvent, SnakeSnapshot};
use super::game_state::SnakeGameState;
use super::types::{DeathReason, GridCoord, Turn};

/// Requests queued by the presentation layer. They are applied between ticks,
/// never during one.
#[derive(Clone, Debug, PartialEq)]
pub enum SnakeCommand {
    Turn(Turn),
    SetOrientation { forward: GridCoord, up: GridCoord },
    Restart,
    SpawnFood,
    Shutdown,
}

/// Implemented by whatever draws the game. Called once per applied command or
/// tick with the produced events and a snapshot taken after them.
pub trait SnakePresenter: Send + Sync + Clone + 'static {
    fn present(
        &self,
        events: Vec<SnakeEvent>,
        snapshot: SnakeSnapshot,
    ) -> impl Future<Output = ()> + Send;
}

#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Minimum time between two accepted turns.
    pub turn_cooldown: Duration,
    pub autopilot: bool,
    pub restart_on_game_over: bool,
    pub max_ticks: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            turn_cooldown: Duration::ZERO,
            autopilot: false,
            restart_on_game_over: false,
            max_ticks: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    GameOver,
    TickLimit,
    Shutdown,
}

#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub stop_reason: StopReason,
    pub total_ticks: u64,
    pub games_finished: u32,
    pub best_score: u32,
    pub last_game_over: Option<DeathReason>,
    pub final_snapshot: SnakeSnapshot,
}

pub struct SnakeSession;

impl SnakeSession {
    /// Owns the game state for the lifetime of the session. Ticks and commands
    /// are handled by the same `select!` loop, so at most one tick is ever in
    /// flight and turns are serialized against it.
    pub async fn run(
        mut state: SnakeGameState,
        mut rng: SessionRng,
        options: SessionOptions,
        presenter: impl SnakePresenter,
        mut command_rx: mpsc::UnboundedReceiver<SnakeCommand>,
    ) -> SessionSummary {
        let mut tick_timer = interval(state.tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut last_turn_at: Option<Instant> = None;
        let mut commands_open = true;
        let mut total_ticks: u64 = 0;
        let mut games_finished: u32 = 0;
        let mut best_score: u32 = 0;
        let mut last_game_over = None;

        log!(
            "Session started: seed {}, grid {:?}, tick {:?}, autopilot {}",
            rng.seed(),
            state.grid_size(),
            state.tick_interval(),
            options.autopilot
        );

        let stop_reason = loop {
            tokio::select! {
                _ = tick_timer.tick() => {
                    let mut events = Vec::new();
                    if options.autopilot
                        && let Some(turn) = BotController::calculate_turn(&state)
                    {
                        events.extend(state.turn(turn, true));
                    }

                    events.extend(state.tick(&mut rng));
                    total_ticks += 1;

                    let game_over = events.iter().find_map(|e| match e {
                        SnakeEvent::GameOver { reason } => Some(*reason),
                        _ => None,
                    });
                    presenter.present(events, state.snapshot()).await;

                    if let Some(reason) = game_over {
                        games_finished += 1;
                        best_score = best_score.max(state.score());
                        last_game_over = Some(reason);

                        if !options.restart_on_game_over {
                            break StopReason::GameOver;
                        }
                        state.restart(&mut rng);
                        presenter.present(Vec::new(), state.snapshot()).await;
                    }

                    if options.max_ticks.is_some_and(|max| total_ticks >= max) {
                        break StopReason::TickLimit;
                    }
                }
                command = command_rx.recv(), if commands_open => {
                    let Some(command) = command else {
                        commands_open = false;
                        continue;
                    };

                    let events = match command {
                        SnakeCommand::Turn(turn) => {
                            let can_accept = last_turn_at
                                .is_none_or(|at| at.elapsed() >= options.turn_cooldown);
                            state.turn(turn, can_accept)
                        }
                        SnakeCommand::SetOrientation { forward, up } => {
                            let can_accept = last_turn_at
                                .is_none_or(|at| at.elapsed() >= options.turn_cooldown);
                            state.set_orientation(forward, up, can_accept)
                        }
                        SnakeCommand::Restart => {
                            state.restart(&mut rng);
                            Vec::new()
                        }
                        SnakeCommand::SpawnFood => {
                            state.spawn_food(&mut rng);
                            Vec::new()
                        }
                        SnakeCommand::Shutdown => break StopReason::Shutdown,
                    };

                    if events
                        .iter()
                        .any(|e| matches!(e, SnakeEvent::OrientationChanged { .. }))
                    {
                        last_turn_at = Some(Instant::now());
                    }
                    presenter.present(events, state.snapshot()).await;
                }
            }
        };

        best_score = best_score.max(state.score());
        log!(
            "Session stopped: {:?} after {} ticks, {} games finished, best score {}",
            stop_reason,
            total_ticks,
            games_finished,
            best_score
        );

        SessionSummary {
            stop_reason,
            total_ticks,
            games_finished,
            best_score,
            last_game_over,
            final_snapshot: state.snapshot(),
        }
    }
}
