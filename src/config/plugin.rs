#[cfg(not(target_family = "wasm"))]
use bevy::{asset::AssetEvent, ecs::message::MessageReader};
use bevy::{prelude::*, window::PrimaryWindow};
#[cfg(not(target_family = "wasm"))]
use bevy_common_assets::toml::TomlAssetPlugin;

#[cfg(not(target_family = "wasm"))]
use super::ConfigHandle;
use super::{ConfigLoaded, GameConfig};

/// Installs the parsed config as [`ConfigLoaded`] and keeps it in sync with
/// the file on disk (native only).
pub struct ConfigPlugin {
  config: GameConfig,
  hot_reload: bool,
}

impl ConfigPlugin {
  pub fn new(config: GameConfig) -> Self {
    Self {
      config,
      hot_reload: true,
    }
  }

  /// Skips the asset watcher; used by headless runs without an asset server.
  pub fn without_hot_reload(mut self) -> Self {
    self.hot_reload = false;
    self
  }
}

impl Plugin for ConfigPlugin {
  fn build(&self, app: &mut App) {
    app.insert_resource(ConfigLoaded::from(self.config.clone()));

    // Native: asset-based config with hot-reload
    #[cfg(not(target_family = "wasm"))]
    if self.hot_reload {
      app
        .add_plugins(TomlAssetPlugin::<GameConfig>::new(&["config.toml"]))
        .add_systems(PreStartup, watch_config_file)
        .add_systems(Update, watch_config_changes);
    }

    app.add_systems(Update, update_window_on_config_change);
  }
}

#[cfg(not(target_family = "wasm"))]
fn watch_config_file(mut commands: Commands, asset_server: Res<AssetServer>) {
  let handle: Handle<GameConfig> = asset_server.load("config/game.config.toml");
  commands.insert_resource(ConfigHandle(handle));
}

#[cfg(not(target_family = "wasm"))]
fn watch_config_changes(
  mut commands: Commands,
  config_handle: Res<ConfigHandle>,
  mut messages: MessageReader<AssetEvent<GameConfig>>,
  configs: Res<Assets<GameConfig>>,
) {
  for event in messages.read() {
    if let AssetEvent::Modified { id } = event {
      if config_handle.0.id() == *id {
        if let Some(config) = configs.get(&config_handle.0) {
          info!("Config reloaded!");
          commands.insert_resource(ConfigLoaded::from(config.clone()));
        }
      }
    }
  }
}

fn update_window_on_config_change(
  config: Res<ConfigLoaded>,
  mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
  if config.is_changed() {
    if let Ok(mut window) = windows.single_mut() {
      window
        .resolution
        .set(config.window.width as f32, config.window.height as f32);
      window.title.clone_from(&config.window.title);
    }
  }
}
