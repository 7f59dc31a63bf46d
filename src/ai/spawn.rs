use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::agent::{ArchetypeProfile, NpcAgent};
use super::fsm::Archetype;
use crate::collision::Fixture;
use crate::entity::{EntityKind, LevelEntity};

/// Spawns an NPC body with a head sensor that detects falling objects.
pub fn spawn_npc(
  commands: &mut Commands,
  archetype: Archetype,
  profile: &ArchetypeProfile,
  position: Vec2,
  size: Vec2,
) -> Entity {
  let kind = match archetype {
    Archetype::Guard => EntityKind::Guard,
    Archetype::Civilian => EntityKind::Civilian,
  };
  let half = size / 2.0;

  let npc = commands
    .spawn((
      kind,
      NpcAgent::new(archetype, profile),
      LevelEntity,
      Transform::from_translation(position.extend(5.0)),
      Visibility::default(),
      RigidBody::Dynamic,
      Collider::cuboid(half.x, half.y),
      LockedAxes::ROTATION_LOCKED,
      Velocity::default(),
      ActiveEvents::COLLISION_EVENTS,
      ActiveHooks::FILTER_CONTACT_PAIRS,
    ))
    .id();

  commands.spawn((
    Fixture::top_sensor(npc),
    ChildOf(npc),
    Transform::from_xyz(0.0, half.y, 0.0),
    Collider::cuboid(half.x * 0.8, 2.0),
    Sensor,
    ActiveEvents::COLLISION_EVENTS,
  ));

  npc
}
