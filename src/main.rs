use bevy::{
  prelude::*,
  window::{PresentMode, WindowResolution},
};
use emberwake::config::{self, ConfigError, GameConfig};
use emberwake::sim::GameplayPlugins;
use emberwake::{camera, input, physics, render};

fn main() -> Result<(), ConfigError> {
  // WASM: set up panic hook for better error messages
  #[cfg(target_family = "wasm")]
  console_error_panic_hook::set_once();

  // WASM: embedded config (no filesystem access)
  #[cfg(target_family = "wasm")]
  let config = GameConfig::embedded()?;
  #[cfg(not(target_family = "wasm"))]
  let config = GameConfig::load(config::CONFIG_PATH)?;

  let mut app = App::new();

  app.insert_resource(Time::<Fixed>::from_hz(60.0));

  app
    .add_plugins(
      DefaultPlugins
        .set(ImagePlugin::default_nearest())
        .set(WindowPlugin {
          primary_window: Some(Window {
            resolution: WindowResolution::new(config.window.width, config.window.height),
            title: config.window.title.clone(),
            // WASM: only Fifo (vsync) is supported on WebGL2
            #[cfg(target_family = "wasm")]
            present_mode: PresentMode::Fifo,
            #[cfg(not(target_family = "wasm"))]
            present_mode: PresentMode::AutoVsync,
            #[cfg(target_family = "wasm")]
            canvas: Some("#bevy".to_string()),
            #[cfg(target_family = "wasm")]
            fit_canvas_to_parent: true,
            ..default()
          }),
          ..default()
        })
        .disable::<bevy::pbr::PbrPlugin>(),
    )
    .add_plugins(physics::PhysicsPlugin {
      length_unit: config.physics.length_unit,
    })
    .add_plugins(config::ConfigPlugin::new(config))
    .add_plugins(GameplayPlugins)
    .add_plugins(input::InputPlugin)
    .add_plugins(camera::CameraPlugin)
    .add_plugins(render::RenderPlugin);

  #[cfg(feature = "visual_debug")]
  app.add_plugins(emberwake::debug_overlay::DebugOverlayPlugin);

  app.run();
  Ok(())
}
