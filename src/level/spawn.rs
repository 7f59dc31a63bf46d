use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::CheckpointSet;
use crate::ai::{Archetype, ArchetypeProfile, spawn_npc};
use crate::config::{ConfigLoaded, LevelObject};
use crate::entity::{EntityKind, LevelEntity};
use crate::fire::Flammable;
use crate::player::{AvatarColliders, FuelPickup, spawn_avatar};

/// Height above a checkpoint pickup where the avatar reappears.
const RESPAWN_LIFT: f32 = 48.0;

/// Spawns every configured object, then the avatar at the last reached
/// checkpoint (or the level start).
pub fn build_level(
  commands: &mut Commands,
  config: &ConfigLoaded,
  last_checkpoint: Option<usize>,
  checkpoints: &mut CheckpointSet,
) -> AvatarColliders {
  checkpoints.clear();
  for object in &config.level.objects {
    if let Some(entity) = spawn_level_object(commands, object, config) {
      trace!("Spawned {:?} as {entity}", object.kind);
    }
    if let (EntityKind::Fuel, Some(index)) = (object.kind, object.checkpoint) {
      checkpoints.insert(index, Vec2::new(object.x, object.y));
    }
  }

  let start = last_checkpoint
    .and_then(|index| checkpoints.position(index))
    .map(|at| at + Vec2::Y * RESPAWN_LIFT)
    .unwrap_or(Vec2::new(config.level.spawn_x, config.level.spawn_y));

  info!(
    "Level built: {} objects, {} checkpoints",
    config.level.objects.len(),
    checkpoints.len()
  );
  spawn_avatar(commands, &config.player, start)
}

/// Spawns one designer-placed object. Returns `None` for kinds that cannot
/// be placed as level objects.
pub fn spawn_level_object(
  commands: &mut Commands,
  object: &LevelObject,
  config: &ConfigLoaded,
) -> Option<Entity> {
  let position = Vec2::new(object.x, object.y);
  let half = Vec2::new(object.width, object.height) / 2.0;
  let base = (
    object.kind,
    LevelEntity,
    Transform::from_translation(position.extend(0.0)),
    Visibility::default(),
    Collider::cuboid(half.x, half.y),
  );

  let entity = match object.kind {
    EntityKind::Avatar => {
      warn!("Avatar placed as level object ignored; the level spawn point is used instead");
      return None;
    }
    EntityKind::Platform => commands.spawn((base, RigidBody::Fixed)).id(),
    EntityKind::Wood | EntityKind::BurnablePlatform | EntityKind::Rope | EntityKind::Fuel => {
      let flammable = Flammable::new(
        object.spread_delay.unwrap_or(config.fire.default_spread_delay),
        object.burn_duration.unwrap_or(config.fire.default_burn_duration),
      );
      let mut entity = commands.spawn((
        base,
        RigidBody::Fixed,
        flammable,
        ActiveEvents::COLLISION_EVENTS,
        ActiveHooks::FILTER_CONTACT_PAIRS,
        // Touching fixed flammables still need contacts for fire to spread
        ActiveCollisionTypes::default() | ActiveCollisionTypes::STATIC_STATIC,
      ));
      if object.kind == EntityKind::Fuel {
        entity.insert(FuelPickup {
          bonus: object.fuel_bonus.unwrap_or(0.0),
          checkpoint: object.checkpoint,
        });
      }
      entity.id()
    }
    EntityKind::Stone => commands
      .spawn((
        base,
        RigidBody::Dynamic,
        Velocity::default(),
        ActiveEvents::COLLISION_EVENTS,
        ActiveHooks::FILTER_CONTACT_PAIRS,
      ))
      .id(),
    EntityKind::Guard | EntityKind::Civilian => {
      let archetype = if object.kind == EntityKind::Guard {
        Archetype::Guard
      } else {
        Archetype::Civilian
      };
      let profile = ArchetypeProfile::from_config(&config.ai, archetype);
      spawn_npc(
        commands,
        archetype,
        &profile,
        position,
        Vec2::new(object.width, object.height),
      )
    }
    EntityKind::Goal => commands
      .spawn((
        base,
        RigidBody::Fixed,
        ActiveEvents::COLLISION_EVENTS,
        ActiveHooks::FILTER_CONTACT_PAIRS,
      ))
      .id(),
  };
  Some(entity)
}
