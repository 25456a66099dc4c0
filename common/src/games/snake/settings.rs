use std::time::Duration;

use super::types::{GridSize, WorldPos};

pub const DEFAULT_GRID_EXTENT: i32 = 10;
pub const DEFAULT_CELL_SIZE: f32 = 1.0;
pub const DEFAULT_EAT_RADIUS: u32 = 3;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;
pub const DEFAULT_TURN_COOLDOWN_MS: u64 = 100;

pub const MIN_GRID_EXTENT: i32 = 3;
pub const MAX_GRID_EXTENT: i32 = 64;

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSettings {
    pub grid_size: GridSize,
    pub cell_size: f32,
    pub origin: WorldPos,
    /// Food within this Chebyshev distance of the new head is eaten.
    pub eat_radius: u32,
    pub tick_interval: Duration,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            grid_size: GridSize::new(DEFAULT_GRID_EXTENT, DEFAULT_GRID_EXTENT, DEFAULT_GRID_EXTENT),
            cell_size: DEFAULT_CELL_SIZE,
            origin: WorldPos::ZERO,
            eat_radius: DEFAULT_EAT_RADIUS,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

impl SnakeSettings {
    pub fn validate(&self) -> Result<(), String> {
        let GridSize { x, y, z } = self.grid_size;
        for (axis, extent) in [("x", x), ("y", y), ("z", z)] {
            if !(MIN_GRID_EXTENT..=MAX_GRID_EXTENT).contains(&extent) {
                return Err(format!(
                    "Grid size along {} must be between {} and {}, got {}",
                    axis, MIN_GRID_EXTENT, MAX_GRID_EXTENT, extent
                ));
            }
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(format!("Cell size must be positive, got {}", self.cell_size));
        }
        if self.tick_interval.is_zero() {
            return Err("Tick interval must be greater than zero".to_string());
        }
        Ok(())
    }
}
