use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{
  Avatar, AvatarState, ClimbContacts, GroundContacts, MovementConfig, MovementRequest,
  SpiritContacts,
};
use super::fuel::FuelTank;
use crate::collision::Fixture;
use crate::config::PlayerConfig;
use crate::entity::{EntityKind, LevelEntity};

/// Entities making up one spawned avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarColliders {
  pub body: Entity,
  pub ground_sensor: Entity,
  pub top_sensor: Entity,
}

/// Spawns the avatar body with its feet and head sensors.
pub fn spawn_avatar(commands: &mut Commands, player: &PlayerConfig, position: Vec2) -> AvatarColliders {
  // Rapier capsule_y uses half_height (cylinder part) and radius
  let half_height = player.collider_length / 2.0;
  let extent = half_height + player.collider_radius;
  let sensor_half = player.sensor_thickness / 2.0;

  let body = commands
    .spawn((
      Avatar,
      EntityKind::Avatar,
      LevelEntity,
      Transform::from_translation(position.extend(10.0)),
      Visibility::default(),
      RigidBody::Dynamic,
      Collider::capsule_y(half_height, player.collider_radius),
      LockedAxes::ROTATION_LOCKED,
      Velocity::default(),
      GravityScale(1.0),
      Friction::coefficient(0.0),
      ActiveEvents::COLLISION_EVENTS,
      ActiveHooks::FILTER_CONTACT_PAIRS,
    ))
    .insert((
      AvatarState::default(),
      FuelTank::new(player.initial_fuel, player.max_fuel),
      MovementRequest::default(),
      MovementConfig::from(player),
      GroundContacts::default(),
      ClimbContacts::default(),
      SpiritContacts::default(),
    ))
    .id();

  let ground_sensor = commands
    .spawn((
      Fixture::ground_sensor(body),
      ChildOf(body),
      Transform::from_xyz(0.0, -extent, 0.0),
      Collider::cuboid(player.collider_radius * 0.8, sensor_half),
      Sensor,
      ActiveEvents::COLLISION_EVENTS,
    ))
    .id();

  let top_sensor = commands
    .spawn((
      Fixture::top_sensor(body),
      ChildOf(body),
      Transform::from_xyz(0.0, extent, 0.0),
      Collider::cuboid(player.collider_radius * 0.8, sensor_half),
      Sensor,
      ActiveEvents::COLLISION_EVENTS,
    ))
    .id();

  info!("Spawned avatar at {:?}", position);
  AvatarColliders {
    body,
    ground_sensor,
    top_sensor,
  }
}
