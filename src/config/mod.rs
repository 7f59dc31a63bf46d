mod plugin;

use std::path::Path;

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use plugin::ConfigPlugin;
use serde::Deserialize;

use crate::entity::EntityKind;

/// Path of the config file relative to the working directory.
pub const CONFIG_PATH: &str = "assets/config/game.config.toml";

/// The shipped config, embedded for WASM builds and tests.
pub const EMBEDDED_CONFIG: &str = include_str!("../../assets/config/game.config.toml");

#[derive(Asset, TypePath, Deserialize, Debug, Clone)]
pub struct GameConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub player: PlayerConfig,
  pub fire: FireConfig,
  pub ai: AiConfig,
  pub level: LevelConfig,
}

impl GameConfig {
  pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
    toml::from_str(source).map_err(ConfigError::Parse)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let source = std::fs::read_to_string(path)?;
    Self::from_toml_str(&source)
  }

  /// The config compiled into the binary.
  pub fn embedded() -> Result<Self, ConfigError> {
    Self::from_toml_str(EMBEDDED_CONFIG)
  }
}

#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
  pub viewport_width: f32,
  pub viewport_height: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PhysicsConfig {
  pub gravity: f32,
  pub length_unit: f32,
  pub crush_speed: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlayerConfig {
  pub collider_radius: f32,
  pub collider_length: f32,
  pub sensor_thickness: f32,
  pub max_fuel: f32,
  pub initial_fuel: f32,
  pub min_drain: f32,
  pub drain_coefficient: f32,
  pub walk_speed: f32,
  pub acceleration: f32,
  pub air_acceleration: f32,
  pub ground_damping: f32,
  pub fall_acceleration: f32,
  pub jump_speed: f32,
  pub terminal_velocity: f32,
  pub spirit_speed_multiplier: f32,
  pub climb_speed: f32,
  pub spirit_blend: f32,
  pub spirit_linger: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FireConfig {
  pub default_spread_delay: f32,
  pub default_burn_duration: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AiConfig {
  pub seed: u64,
  /// Probability of stepping left on a wander roll.
  pub wander_left: f32,
  /// Probability of stepping right on a wander roll. Staying is the rest.
  pub wander_right: f32,
  pub corpse_linger: f32,
  pub guard: ArchetypeConfig,
  pub civilian: ArchetypeConfig,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct ArchetypeConfig {
  pub speed: f32,
  pub sight_range: f32,
  pub chase_range: f32,
  pub attack_range: f32,
  pub fear_range: f32,
  pub cooldown_min: f32,
  pub cooldown_max: f32,
  pub attack_cooldown: f32,
  pub spawn_cooldown: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LevelConfig {
  pub spawn_x: f32,
  pub spawn_y: f32,
  pub world_bottom: f32,
  #[serde(default)]
  pub objects: Vec<LevelObject>,
}

/// One designer-placed object. Flammable kinds fall back to the `[fire]`
/// defaults when no timers are given.
#[derive(Deserialize, Debug, Clone)]
pub struct LevelObject {
  pub kind: EntityKind,
  pub x: f32,
  pub y: f32,
  pub width: f32,
  pub height: f32,
  pub spread_delay: Option<f32>,
  pub burn_duration: Option<f32>,
  pub fuel_bonus: Option<f32>,
  pub checkpoint: Option<usize>,
}

/// Error loading the game config.
#[derive(Debug)]
pub enum ConfigError {
  Io(std::io::Error),
  Parse(toml::de::Error),
}

impl From<std::io::Error> for ConfigError {
  fn from(err: std::io::Error) -> Self {
    Self::Io(err)
  }
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "failed to read config: {}", e),
      Self::Parse(e) => write!(f, "failed to parse config: {}", e),
    }
  }
}

impl std::error::Error for ConfigError {}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<GameConfig>);

#[derive(Resource, Debug, Clone)]
pub struct ConfigLoaded {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub player: PlayerConfig,
  pub fire: FireConfig,
  pub ai: AiConfig,
  pub level: LevelConfig,
}

impl From<GameConfig> for ConfigLoaded {
  fn from(config: GameConfig) -> Self {
    Self {
      window: config.window,
      camera: config.camera,
      physics: config.physics,
      player: config.player,
      fire: config.fire,
      ai: config.ai,
      level: config.level,
    }
  }
}
