use bevy::{camera::ScalingMode, prelude::*};

use crate::config::ConfigLoaded;
use crate::player::Avatar;

#[derive(Component)]
pub struct GameCamera;

/// Camera smoothing factor (higher = snappier)
#[derive(Resource)]
pub struct CameraSmoothness(pub f32);

impl Default for CameraSmoothness {
  fn default() -> Self {
    Self(8.0)
  }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<CameraSmoothness>()
      .add_systems(Startup, setup_camera)
      .add_systems(PostUpdate, camera_follow.before(bevy::transform::TransformSystems::Propagate));
  }
}

pub fn setup_camera(mut commands: Commands, config: Res<ConfigLoaded>) {
  commands.spawn((
    GameCamera,
    Camera2d,
    Camera {
      clear_color: ClearColorConfig::Custom(Color::srgb(0.05, 0.04, 0.08)),
      ..default()
    },
    Projection::Orthographic(OrthographicProjection {
      near: -1000.0,
      far: 1000.0,
      scale: 1.0,
      viewport_origin: Vec2::new(0.5, 0.5),
      scaling_mode: ScalingMode::AutoMin {
        min_width: config.camera.viewport_width,
        min_height: config.camera.viewport_height,
      },
      area: Rect::default(),
    }),
  ));
}

fn camera_follow(
  avatars: Query<&Transform, (With<Avatar>, Without<GameCamera>)>,
  mut cameras: Query<&mut Transform, With<GameCamera>>,
  smoothness: Res<CameraSmoothness>,
  time: Res<Time>,
) {
  let Ok(avatar) = avatars.single() else {
    return;
  };
  let Ok(mut camera) = cameras.single_mut() else {
    return;
  };
  let blend = (smoothness.0 * time.delta_secs()).clamp(0.0, 1.0);
  let target = avatar.translation.truncate();
  let current = camera.translation.truncate();
  let next = current.lerp(target, blend);
  camera.translation.x = next.x;
  camera.translation.y = next.y;
}
