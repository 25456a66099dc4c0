use super::game_state::SnakeGameState;
use super::types::{GridCoord, Turn};

/// Autopilot used for unattended runs. Picks the safe move that brings the head
/// closest to the food; `None` means keep going straight.
pub struct BotController;

impl BotController {
    pub fn calculate_turn(state: &SnakeGameState) -> Option<Turn> {
        if !state.is_active() {
            return None;
        }

        let orientation = state.snake().orientation();
        let head = state.head();

        let mut candidates: Vec<(Option<Turn>, GridCoord)> = vec![(None, head + orientation.forward())];
        for turn in Turn::ALL {
            let (forward, _) = orientation.turned(turn);
            candidates.push((Some(turn), head + forward));
        }

        let safe: Vec<(Option<Turn>, GridCoord)> = candidates
            .into_iter()
            .filter(|(_, destination)| !state.grid().get(*destination).is_blocking())
            .collect();

        if safe.is_empty() {
            return None;
        }

        match state.food() {
            Some(food) => safe
                .iter()
                .min_by_key(|(_, destination)| {
                    (
                        destination.chebyshev_distance(food),
                        destination.manhattan_distance(food),
                        Self::blocked_neighbours(state, *destination),
                    )
                })
                .and_then(|(turn, _)| *turn),
            None => safe
                .iter()
                .min_by_key(|(_, destination)| Self::blocked_neighbours(state, *destination))
                .and_then(|(turn, _)| *turn),
        }
    }

    fn blocked_neighbours(state: &SnakeGameState, cell: GridCoord) -> usize {
        const NEIGHBOURS: [GridCoord; 6] = [
            GridCoord::UNIT_X,
            GridCoord::new(-1, 0, 0),
            GridCoord::UNIT_Y,
            GridCoord::new(0, -1, 0),
            GridCoord::UNIT_Z,
            GridCoord::new(0, 0, -1),
        ];

        NEIGHBOURS
            .iter()
            .filter(|offset| {
                let neighbour = cell + **offset;
                neighbour != state.head() && state.grid().get(neighbour).is_blocking()
            })
            .count()
    }
}
