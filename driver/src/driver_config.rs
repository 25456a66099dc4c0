use std::time::Duration;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::games::snake::{
    DEFAULT_CELL_SIZE, DEFAULT_EAT_RADIUS, DEFAULT_GRID_EXTENT, DEFAULT_TICK_INTERVAL_MS,
    DEFAULT_TURN_COOLDOWN_MS, GridSize, SessionOptions, SnakeSettings, WorldPos,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "snake3d_config.yaml";

pub fn get_config_manager(
    file_path: &str,
) -> ConfigManager<FileContentConfigProvider, DriverConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(file_path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct DriverConfig {
    pub grid_size: GridSize,
    pub cell_size: f32,
    pub eat_radius: u32,
    pub tick_interval_ms: u64,
    pub turn_cooldown_ms: u64,
    #[serde(default)]
    pub autopilot: bool,
    #[serde(default)]
    pub restart_on_game_over: bool,
    #[serde(default)]
    pub max_ticks: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            grid_size: GridSize::new(DEFAULT_GRID_EXTENT, DEFAULT_GRID_EXTENT, DEFAULT_GRID_EXTENT),
            cell_size: DEFAULT_CELL_SIZE,
            eat_radius: DEFAULT_EAT_RADIUS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            turn_cooldown_ms: DEFAULT_TURN_COOLDOWN_MS,
            autopilot: false,
            restart_on_game_over: false,
            max_ticks: None,
            seed: None,
        }
    }
}

impl Validate for DriverConfig {
    fn validate(&self) -> Result<(), String> {
        self.to_settings().validate()?;
        if self.max_ticks == Some(0) {
            return Err("max_ticks must be positive when set".to_string());
        }
        Ok(())
    }
}

impl DriverConfig {
    pub fn to_settings(&self) -> SnakeSettings {
        SnakeSettings {
            grid_size: self.grid_size,
            cell_size: self.cell_size,
            origin: WorldPos::ZERO,
            eat_radius: self.eat_radius,
            tick_interval: Duration::from_millis(self.tick_interval_ms),
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            turn_cooldown: Duration::from_millis(self.turn_cooldown_ms),
            autopilot: self.autopilot,
            restart_on_game_over: self.restart_on_game_over,
            max_ticks: self.max_ticks,
        }
    }
}
