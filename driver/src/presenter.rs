use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use common::games::snake::{SnakeEvent, SnakePresenter, SnakeSnapshot};
use common::{log, log_debug};

/// Headless presenter: writes the event stream to the log instead of drawing it.
#[derive(Clone, Default)]
pub struct LogPresenter {
    frames: Arc<AtomicU64>,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }
}

pub fn describe_event(event: &SnakeEvent) -> String {
    match event {
        SnakeEvent::MoveStarted {
            prev_positions,
            next_positions,
            duration,
        } => {
            let head = next_positions
                .first()
                .map(|p| format!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z))
                .unwrap_or_else(|| "-".to_string());
            format!(
                "{}: {} segments over {:?}, head -> {}",
                event.name(),
                prev_positions.len(),
                duration,
                head
            )
        }
        SnakeEvent::Moved => event.name().to_string(),
        SnakeEvent::AteFood { position } => format!(
            "{} at ({}, {}, {})",
            event.name(),
            position.x,
            position.y,
            position.z
        ),
        SnakeEvent::GameOver { reason } => format!("{}: {:?}", event.name(), reason),
        SnakeEvent::OrientationChanged { forward, up } => format!(
            "{}: forward ({}, {}, {}), up ({}, {}, {})",
            event.name(),
            forward.x,
            forward.y,
            forward.z,
            up.x,
            up.y,
            up.z
        ),
    }
}

impl SnakePresenter for LogPresenter {
    fn present(
        &self,
        events: Vec<SnakeEvent>,
        snapshot: SnakeSnapshot,
    ) -> impl Future<Output = ()> + Send {
        self.frames.fetch_add(1, Ordering::Relaxed);
        async move {
            for event in &events {
                match event {
                    SnakeEvent::AteFood { .. } => {
                        log!("[tick {}] {}, score {}", snapshot.tick, describe_event(event), snapshot.score)
                    }
                    SnakeEvent::GameOver { .. } => log!(
                        "[tick {}] {}, final length {}, score {}",
                        snapshot.tick,
                        describe_event(event),
                        snapshot.length,
                        snapshot.score
                    ),
                    _ => log_debug!("[tick {}] {}", snapshot.tick, describe_event(event)),
                }
            }
        }
    }
}
