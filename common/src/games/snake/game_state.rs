use std::time::Duration;

use crate::games::SessionRng;
use crate::{log, log_debug, log_warn};
use super::events::{SnakeEvent, SnakeSnapshot};
use super::grid::WorldGrid;
use super::orientation::Orientation;
use super::settings::SnakeSettings;
use super::tick_clock::TickClock;
use super::body::Snake;
use super::types::{CellState, DeathReason, GridCoord, GridSize, Turn, WorldPos};

/// Authoritative state of one 3D snake game: grid, snake, food and the tick
/// transition. Every command returns the events it produced, in order.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    grid: WorldGrid,
    snake: Snake,
    food: Option<GridCoord>,
    active: bool,
    eat_radius: u32,
    tick_interval: Duration,
    score: u32,
    tick_count: u64,
    game_over_reason: Option<DeathReason>,
    rejected_bases: u32,
}

impl SnakeGameState {
    pub fn new(settings: &SnakeSettings, rng: &mut SessionRng) -> Result<Self, String> {
        settings.validate()?;
        let grid = WorldGrid::new(settings.grid_size, settings.cell_size, settings.origin)?;
        let snake = Snake::new(grid.center(), Orientation::canonical());

        let mut state = Self {
            grid,
            snake,
            food: None,
            active: true,
            eat_radius: settings.eat_radius,
            tick_interval: settings.tick_interval,
            score: 0,
            tick_count: 0,
            game_over_reason: None,
            rejected_bases: 0,
        };
        state.restart(rng);
        Ok(state)
    }

    /// Resets every field to the canonical starting state and places fresh food.
    pub fn restart(&mut self, rng: &mut SessionRng) {
        self.grid.clear();
        self.snake = Snake::new(self.grid.center(), Orientation::canonical());
        for segment in self.snake.segments() {
            self.grid.set(segment.position, CellState::SnakeOccupied);
        }

        self.food = None;
        self.active = true;
        self.score = 0;
        self.tick_count = 0;
        self.game_over_reason = None;
        self.rejected_bases = 0;

        self.spawn_food(rng);
    }

    pub fn tick(&mut self, rng: &mut SessionRng) -> Vec<SnakeEvent> {
        if !self.active {
            return Vec::new();
        }

        self.snake.reaffirm_head_direction();
        let new_head = self.snake.next_head();

        match self.grid.get(new_head) {
            CellState::Wall => return self.end_game(DeathReason::WallCollision),
            CellState::SnakeOccupied => return self.end_game(DeathReason::SelfCollision),
            CellState::Empty | CellState::Food => {}
        }

        let mut events = Vec::new();
        let ate_food = self.try_consume_food(new_head, &mut events);

        let planned = self.snake.plan_move(new_head, ate_food);
        events.push(SnakeEvent::MoveStarted {
            prev_positions: planned.from.iter().map(|p| self.grid.to_world(*p)).collect(),
            next_positions: planned
                .segments
                .iter()
                .map(|s| self.grid.to_world(s.position))
                .collect(),
            duration: self.tick_interval,
        });

        for cell in &planned.vacated {
            if self.grid.get(*cell) == CellState::SnakeOccupied {
                self.grid.set(*cell, CellState::Empty);
            }
        }
        for segment in &planned.segments {
            self.grid.set(segment.position, CellState::SnakeOccupied);
        }
        self.snake.commit(planned);
        self.tick_count += 1;

        if ate_food {
            self.spawn_food(rng);
        }

        events.push(SnakeEvent::Moved);
        events
    }

    /// Feeds a frame delta into `clock` and runs every tick that became due.
    /// Stops early once the game is over; the remaining due ticks are dropped.
    pub fn advance(&mut self, clock: &mut TickClock, delta: Duration, rng: &mut SessionRng) -> Vec<SnakeEvent> {
        let mut events = Vec::new();
        for _ in 0..clock.advance(delta) {
            if !self.active {
                clock.reset();
                break;
            }
            events.extend(self.tick(rng));
        }
        events
    }

    fn try_consume_food(&mut self, new_head: GridCoord, events: &mut Vec<SnakeEvent>) -> bool {
        let Some(food) = self.food else {
            return false;
        };
        if new_head.chebyshev_distance(food) > self.eat_radius {
            return false;
        }

        if self.grid.get(food) == CellState::Food {
            self.grid.set(food, CellState::Empty);
        }
        self.food = None;
        self.snake.grow();
        self.score += 1;

        log_debug!(
            "Ate food at ({}, {}, {}) from ({}, {}, {}). Target length: {}",
            food.x,
            food.y,
            food.z,
            new_head.x,
            new_head.y,
            new_head.z,
            self.snake.target_length()
        );
        events.push(SnakeEvent::AteFood { position: food });
        true
    }

    fn end_game(&mut self, reason: DeathReason) -> Vec<SnakeEvent> {
        self.active = false;
        self.game_over_reason = Some(reason);
        log!(
            "Game over: {:?} after {} ticks, length {}",
            reason,
            self.tick_count,
            self.snake.len()
        );
        vec![SnakeEvent::GameOver { reason }]
    }

    /// Places food on a uniformly chosen empty cell. Returns the new food cell,
    /// or `None` when food already exists or the board is full.
    pub fn spawn_food(&mut self, rng: &mut SessionRng) -> Option<GridCoord> {
        if self.food.is_some() {
            return None;
        }

        let empty = self.grid.empty_cells();
        let Some(cell) = rng.pick(&empty) else {
            log_warn!("No empty cell left for food");
            return None;
        };

        self.grid.set(cell, CellState::Food);
        self.food = Some(cell);
        log_debug!("Food spawned at ({}, {}, {})", cell.x, cell.y, cell.z);
        Some(cell)
    }

    /// `can_accept` is the host's debounce verdict; a rejected turn changes nothing.
    pub fn turn(&mut self, turn: Turn, can_accept: bool) -> Vec<SnakeEvent> {
        let (forward, up) = self.snake.orientation().turned(turn);
        self.set_orientation(forward, up, can_accept)
    }

    pub fn turn_left(&mut self) -> Vec<SnakeEvent> {
        self.turn(Turn::Left, true)
    }

    pub fn turn_right(&mut self) -> Vec<SnakeEvent> {
        self.turn(Turn::Right, true)
    }

    pub fn turn_up(&mut self) -> Vec<SnakeEvent> {
        self.turn(Turn::Up, true)
    }

    pub fn turn_down(&mut self) -> Vec<SnakeEvent> {
        self.turn(Turn::Down, true)
    }

    pub fn set_orientation(&mut self, forward: GridCoord, up: GridCoord, can_accept: bool) -> Vec<SnakeEvent> {
        if !self.active || !can_accept {
            return Vec::new();
        }

        let current = self.snake.orientation();
        let rebuilt = Orientation::from_vectors(forward, up);
        let orientation = rebuilt.orientation;

        if rebuilt.degenerate || !orientation.is_orthonormal() {
            self.rejected_bases += 1;
            log_warn!(
                "Rejected basis: forward {:?}, up {:?} are not perpendicular axis vectors",
                orientation.forward(),
                orientation.up()
            );
            return Vec::new();
        }

        let into_neck = self.snake.neck_direction() == Some(orientation.forward());
        if current.is_reversal(orientation.forward()) || into_neck || orientation == current {
            return Vec::new();
        }

        self.snake.set_orientation(orientation);
        vec![SnakeEvent::OrientationChanged {
            forward: orientation.forward(),
            up: orientation.up(),
        }]
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid.size()
    }

    pub fn cell_size(&self) -> f32 {
        self.grid.cell_size()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn eat_radius(&self) -> u32 {
        self.eat_radius
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn target_length(&self) -> usize {
        self.snake.target_length()
    }

    pub fn head(&self) -> GridCoord {
        self.snake.head()
    }

    pub fn forward(&self) -> GridCoord {
        self.snake.orientation().forward()
    }

    pub fn up(&self) -> GridCoord {
        self.snake.orientation().up()
    }

    pub fn right(&self) -> GridCoord {
        self.snake.orientation().right()
    }

    pub fn food(&self) -> Option<GridCoord> {
        self.food
    }

    /// World position of the food, or the zero vector when there is none.
    pub fn food_world_position(&self) -> WorldPos {
        self.food
            .map(|f| self.grid.to_world(f))
            .unwrap_or(WorldPos::ZERO)
    }

    pub fn segment_world_positions(&self) -> Vec<WorldPos> {
        self.snake
            .positions()
            .map(|p| self.grid.to_world(p))
            .collect()
    }

    pub fn segment_directions(&self) -> Vec<GridCoord> {
        self.snake.segments().iter().map(|s| s.direction).collect()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn game_over_reason(&self) -> Option<DeathReason> {
        self.game_over_reason
    }

    pub fn rejected_bases(&self) -> u32 {
        self.rejected_bases
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            tick: self.tick_count,
            segment_positions: self.segment_world_positions(),
            segment_directions: self.segment_directions(),
            food_position: self.food.map(|f| self.grid.to_world(f)),
            length: self.snake.len(),
            target_length: self.snake.target_length(),
            forward: self.forward(),
            up: self.up(),
            score: self.score,
            active: self.active,
        }
    }

    #[cfg(test)]
    pub(crate) fn replace_snake(&mut self, snake: Snake) {
        self.place_food(None);
        for position in self.snake.positions().collect::<Vec<_>>() {
            self.grid.set(position, CellState::Empty);
        }
        for position in snake.positions() {
            self.grid.set(position, CellState::SnakeOccupied);
        }
        self.snake = snake;
    }

    #[cfg(test)]
    pub(crate) fn place_food(&mut self, cell: Option<GridCoord>) {
        if let Some(old) = self.food.take() {
            self.grid.set(old, CellState::Empty);
        }
        if let Some(cell) = cell {
            self.grid.set(cell, CellState::Food);
            self.food = Some(cell);
        }
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut WorldGrid {
        &mut self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::body::Segment;

    fn create_state(settings: SnakeSettings) -> (SnakeGameState, SessionRng) {
        let mut rng = SessionRng::new(42);
        let state = SnakeGameState::new(&settings, &mut rng).unwrap();
        (state, rng)
    }

    fn default_state() -> (SnakeGameState, SessionRng) {
        create_state(SnakeSettings::default())
    }

    fn snake_along(cells: &[(i32, i32, i32)], forward: GridCoord, up: GridCoord, target: usize) -> Snake {
        let orientation = Orientation::from_vectors(forward, up).orientation;
        let segments = cells
            .iter()
            .map(|&(x, y, z)| Segment {
                position: GridCoord::new(x, y, z),
                direction: forward,
            })
            .collect();
        Snake::from_segments(segments, target, orientation)
    }

    fn assert_grid_matches(state: &SnakeGameState) {
        assert_eq!(state.grid().count(CellState::SnakeOccupied), state.len());
        for position in state.snake().positions() {
            assert_eq!(state.grid().get(position), CellState::SnakeOccupied);
        }
        match state.food() {
            Some(food) => {
                assert_eq!(state.grid().count(CellState::Food), 1);
                assert_eq!(state.grid().get(food), CellState::Food);
            }
            None => assert_eq!(state.grid().count(CellState::Food), 0),
        }
    }

    #[test]
    fn test_new_state_is_canonical() {
        let (state, _) = default_state();
        assert!(state.is_active());
        assert_eq!(state.head(), GridCoord::new(5, 5, 5));
        assert_eq!(state.len(), 2);
        assert_eq!(state.target_length(), 2);
        assert_eq!(state.forward(), GridCoord::new(0, 0, 1));
        assert_eq!(state.up(), GridCoord::new(0, 1, 0));
        assert_eq!(state.right(), GridCoord::new(1, 0, 0));
        assert!(state.food().is_some());
        assert_grid_matches(&state);
    }

    #[test]
    fn test_invalid_settings_fail() {
        let mut rng = SessionRng::new(1);
        let settings = SnakeSettings {
            grid_size: GridSize::new(0, 10, 10),
            ..SnakeSettings::default()
        };
        assert!(SnakeGameState::new(&settings, &mut rng).is_err());
    }

    #[test]
    fn test_tick_moves_head_forward() {
        let (mut state, mut rng) = default_state();
        state.place_food(Some(GridCoord::new(0, 0, 0)));

        let events = state.tick(&mut rng);

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SnakeEvent::MoveStarted { .. }));
        assert_eq!(events[1], SnakeEvent::Moved);
        assert_eq!(state.head(), GridCoord::new(5, 5, 6));
        assert_eq!(state.snake().segments()[1].position, GridCoord::new(5, 5, 5));
        assert_eq!(state.grid().get(GridCoord::new(5, 5, 4)), CellState::Empty);
        assert_eq!(state.tick_count(), 1);
        assert_grid_matches(&state);
    }

    #[test]
    fn test_move_started_carries_value_snapshot() {
        let (mut state, mut rng) = default_state();
        state.place_food(Some(GridCoord::new(0, 0, 0)));
        let before = state.segment_world_positions();

        let events = state.tick(&mut rng);

        let SnakeEvent::MoveStarted {
            prev_positions,
            next_positions,
            duration,
        } = &events[0]
        else {
            panic!("expected MoveStarted first, got {:?}", events[0]);
        };
        assert_eq!(prev_positions, &before);
        assert_eq!(next_positions, &state.segment_world_positions());
        assert_eq!(*duration, state.tick_interval());
    }

    #[test]
    fn test_chebyshev_radius_consumes_without_overlap() {
        let (mut state, mut rng) = default_state();
        state.replace_snake(snake_along(
            &[(5, 5, 4), (5, 5, 3)],
            GridCoord::UNIT_Z,
            GridCoord::UNIT_Y,
            2,
        ));
        state.place_food(Some(GridCoord::new(6, 7, 5)));

        let events = state.tick(&mut rng);

        assert_eq!(state.head(), GridCoord::new(5, 5, 5));
        assert_eq!(
            events[0],
            SnakeEvent::AteFood {
                position: GridCoord::new(6, 7, 5)
            }
        );
        assert!(matches!(events[1], SnakeEvent::MoveStarted { .. }));
        assert_eq!(events[2], SnakeEvent::Moved);
        assert_eq!(state.target_length(), 3);
        assert_eq!(state.score(), 1);
        assert!(state.food().is_some());
        assert_grid_matches(&state);
    }

    #[test]
    fn test_food_outside_radius_is_not_eaten() {
        let (mut state, mut rng) = default_state();
        state.place_food(Some(GridCoord::new(5, 9, 6)));

        let events = state.tick(&mut rng);

        assert!(!events.iter().any(|e| matches!(e, SnakeEvent::AteFood { .. })));
        assert_eq!(state.food(), Some(GridCoord::new(5, 9, 6)));
        assert_eq!(state.target_length(), 2);
    }

    #[test]
    fn test_zero_radius_requires_exact_overlap() {
        let (mut state, mut rng) = create_state(SnakeSettings {
            eat_radius: 0,
            ..SnakeSettings::default()
        });
        state.place_food(Some(GridCoord::new(5, 6, 6)));
        state.tick(&mut rng);
        assert_eq!(state.target_length(), 2);

        state.place_food(Some(GridCoord::new(5, 5, 7)));
        state.tick(&mut rng);
        assert_eq!(state.target_length(), 3);
    }

    #[test]
    fn test_growth_scenario() {
        let (mut state, mut rng) = default_state();
        state.place_food(Some(GridCoord::new(5, 5, 6)));

        state.tick(&mut rng);

        assert_eq!(state.target_length(), 3);
        assert_eq!(state.len(), 3);
        let positions: Vec<GridCoord> = state.snake().positions().collect();
        assert_eq!(
            positions,
            vec![GridCoord::new(5, 5, 6), GridCoord::new(5, 5, 5), GridCoord::new(5, 5, 4)]
        );
        assert_grid_matches(&state);

        state.place_food(Some(GridCoord::new(0, 0, 0)));
        state.tick(&mut rng);
        assert_eq!(state.len(), 3);
        assert_eq!(state.grid().get(GridCoord::new(5, 5, 4)), CellState::Empty);
        assert_grid_matches(&state);
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let (mut state, mut rng) = default_state();
        state.replace_snake(snake_along(
            &[(5, 5, 9), (5, 5, 8)],
            GridCoord::UNIT_Z,
            GridCoord::UNIT_Y,
            2,
        ));
        state.place_food(Some(GridCoord::new(0, 0, 0)));

        let events = state.tick(&mut rng);

        assert_eq!(
            events,
            vec![SnakeEvent::GameOver {
                reason: DeathReason::WallCollision
            }]
        );
        assert!(!state.is_active());
        assert_eq!(state.head(), GridCoord::new(5, 5, 9));
        assert_eq!(state.game_over_reason(), Some(DeathReason::WallCollision));
        assert_eq!(state.tick_count(), 0);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let (mut state, mut rng) = default_state();
        state.replace_snake(snake_along(
            &[(5, 5, 5), (5, 5, 6), (6, 5, 6), (6, 5, 5), (6, 5, 4)],
            GridCoord::UNIT_X,
            GridCoord::UNIT_Y,
            5,
        ));
        state.place_food(Some(GridCoord::new(0, 0, 0)));

        let events = state.tick(&mut rng);

        assert_eq!(
            events,
            vec![SnakeEvent::GameOver {
                reason: DeathReason::SelfCollision
            }]
        );
        assert!(!state.is_active());
    }

    #[test]
    fn test_inactive_game_ignores_commands() {
        let (mut state, mut rng) = default_state();
        state.replace_snake(snake_along(
            &[(5, 5, 9), (5, 5, 8)],
            GridCoord::UNIT_Z,
            GridCoord::UNIT_Y,
            2,
        ));
        state.tick(&mut rng);
        assert!(!state.is_active());

        assert!(state.tick(&mut rng).is_empty());
        assert!(state.turn_left().is_empty());
        assert_eq!(state.forward(), GridCoord::UNIT_Z);
        assert_eq!(state.head(), GridCoord::new(5, 5, 9));
    }

    #[test]
    fn test_turn_emits_orientation_changed() {
        let (mut state, _) = default_state();

        let events = state.turn_right();

        assert_eq!(
            events,
            vec![SnakeEvent::OrientationChanged {
                forward: GridCoord::UNIT_X,
                up: GridCoord::UNIT_Y
            }]
        );
        assert_eq!(state.segment_directions()[0], GridCoord::UNIT_X);
        assert_eq!(state.right(), -GridCoord::UNIT_Z);
    }

    #[test]
    fn test_turn_applies_on_next_tick() {
        let (mut state, mut rng) = default_state();
        state.place_food(Some(GridCoord::new(0, 0, 0)));

        state.turn_up();
        state.tick(&mut rng);

        assert_eq!(state.head(), GridCoord::new(5, 6, 5));
        assert_eq!(state.segment_directions()[0], GridCoord::UNIT_Y);
        assert_eq!(state.segment_directions()[1], GridCoord::UNIT_Y);
        assert_eq!(state.snake().segments()[1].position, GridCoord::new(5, 5, 5));
    }

    #[test]
    fn test_reversal_is_rejected() {
        let (mut state, _) = default_state();

        let events = state.set_orientation(GridCoord::new(0, 0, -1), GridCoord::UNIT_Y, true);

        assert!(events.is_empty());
        assert_eq!(state.forward(), GridCoord::new(0, 0, 1));
        assert_eq!(state.up(), GridCoord::UNIT_Y);
    }

    #[test]
    fn test_gated_turn_is_rejected() {
        let (mut state, _) = default_state();

        assert!(state.turn(Turn::Left, false).is_empty());
        assert_eq!(state.forward(), GridCoord::UNIT_Z);
    }

    #[test]
    fn test_parallel_basis_is_rejected_and_counted() {
        let (mut state, _) = default_state();

        let events = state.set_orientation(GridCoord::UNIT_Y, GridCoord::UNIT_Y, true);

        assert!(events.is_empty());
        assert_eq!(state.forward(), GridCoord::UNIT_Z);
        assert_eq!(state.right(), GridCoord::UNIT_X);
        assert_eq!(state.rejected_bases(), 1);
    }

    #[test]
    fn test_diagonal_basis_is_rejected() {
        let (mut state, mut rng) = default_state();
        state.place_food(Some(GridCoord::new(0, 0, 0)));

        let events = state.set_orientation(GridCoord::new(1, 1, 0), GridCoord::UNIT_Y, true);

        assert!(events.is_empty());
        assert_eq!(state.rejected_bases(), 1);
        assert!(state.snake().orientation().is_orthonormal());

        state.tick(&mut rng);
        assert_eq!(state.head(), GridCoord::new(5, 5, 6));
    }

    #[test]
    fn test_turn_into_neck_is_rejected() {
        let (mut state, mut rng) = default_state();
        state.place_food(Some(GridCoord::new(0, 0, 0)));

        assert_eq!(state.turn_up().len(), 1);
        assert!(state.turn_up().is_empty());
        assert_eq!(state.forward(), GridCoord::UNIT_Y);

        let events = state.tick(&mut rng);
        assert_eq!(events.last(), Some(&SnakeEvent::Moved));
        assert_eq!(state.head(), GridCoord::new(5, 6, 5));
        assert!(state.is_active());
    }

    #[test]
    fn test_restart_clears_rejected_bases() {
        let (mut state, mut rng) = default_state();
        state.set_orientation(GridCoord::new(1, 0, 1), GridCoord::UNIT_Y, true);
        assert_eq!(state.rejected_bases(), 1);

        state.restart(&mut rng);
        assert_eq!(state.rejected_bases(), 0);
    }

    #[test]
    fn test_advance_runs_due_ticks() {
        let (mut state, mut rng) = default_state();
        state.place_food(Some(GridCoord::new(0, 0, 0)));
        let mut clock = TickClock::new(state.tick_interval());

        assert!(state.advance(&mut clock, Duration::from_millis(150), &mut rng).is_empty());

        let events = state.advance(&mut clock, Duration::from_millis(300), &mut rng);
        let moves = events.iter().filter(|e| matches!(e, SnakeEvent::Moved)).count();
        assert_eq!(moves, 2);
        assert_eq!(state.head(), GridCoord::new(5, 5, 7));
    }

    #[test]
    fn test_advance_stops_at_game_over() {
        let (mut state, mut rng) = default_state();
        state.place_food(Some(GridCoord::new(0, 0, 0)));
        let mut clock = TickClock::new(state.tick_interval());

        let events = state.advance(&mut clock, Duration::from_secs(10), &mut rng);

        let game_overs = events
            .iter()
            .filter(|e| matches!(e, SnakeEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(events.last(), Some(&SnakeEvent::GameOver { reason: DeathReason::WallCollision }));
        assert_eq!(state.tick_count(), 4);
        assert_eq!(clock.progress(), 0.0);
    }

    #[test]
    fn test_restart_twice_matches_restart_once() {
        let (mut state, mut rng) = default_state();
        state.turn_left();
        state.tick(&mut rng);
        state.tick(&mut rng);

        state.restart(&mut rng);
        let once = (state.head(), state.len(), state.forward(), state.up(), state.target_length());
        state.restart(&mut rng);
        let twice = (state.head(), state.len(), state.forward(), state.up(), state.target_length());

        assert_eq!(once, twice);
        assert_eq!(twice.0, GridCoord::new(5, 5, 5));
        assert_eq!(twice.1, 2);
        assert_eq!(twice.2, GridCoord::new(0, 0, 1));
        assert_eq!(state.score(), 0);
        assert_eq!(state.tick_count(), 0);
        assert!(state.is_active());
        assert_grid_matches(&state);
    }

    #[test]
    fn test_spawn_is_exclusive() {
        let (mut state, mut rng) = default_state();
        let food = state.food();
        assert!(food.is_some());

        assert_eq!(state.spawn_food(&mut rng), None);
        assert_eq!(state.food(), food);
        assert_eq!(state.grid().count(CellState::Food), 1);
    }

    #[test]
    fn test_spawn_on_full_board_places_nothing() {
        let (mut state, mut rng) = create_state(SnakeSettings {
            grid_size: GridSize::new(3, 3, 3),
            ..SnakeSettings::default()
        });
        state.place_food(None);
        for cell in state.grid().empty_cells() {
            state.grid_mut().set(cell, CellState::SnakeOccupied);
        }

        assert_eq!(state.spawn_food(&mut rng), None);
        assert_eq!(state.food(), None);
        assert_eq!(state.food_world_position(), WorldPos::ZERO);
    }

    #[test]
    fn test_food_world_position_matches_grid() {
        let (mut state, _) = default_state();
        state.place_food(Some(GridCoord::new(1, 2, 3)));
        assert_eq!(
            state.food_world_position(),
            state.grid().to_world(GridCoord::new(1, 2, 3))
        );
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let mut rng = SessionRng::new(2024);
        let mut turn_rng = SessionRng::new(99);
        let mut state = SnakeGameState::new(
            &SnakeSettings {
                grid_size: GridSize::new(6, 6, 6),
                ..SnakeSettings::default()
            },
            &mut rng,
        )
        .unwrap();

        for _ in 0..2000 {
            if turn_rng.random_range(0..4) == 0 {
                let turn = turn_rng.pick(&Turn::ALL).unwrap();
                state.turn(turn, true);
            }

            let events = state.tick(&mut rng);
            let game_over = events.iter().filter(|e| matches!(e, SnakeEvent::GameOver { .. })).count();
            let moved = events.iter().filter(|e| matches!(e, SnakeEvent::Moved)).count();
            assert_eq!(game_over + moved, 1);

            assert!(state.len() <= state.target_length());
            assert_grid_matches(&state);
            assert!(state.snake().orientation().is_orthonormal());
            assert_eq!(state.rejected_bases(), 0);

            if !state.is_active() {
                state.restart(&mut rng);
            }
        }
    }
}
