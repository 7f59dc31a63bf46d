use bevy::prelude::*;

use super::spawn::build_level;
use super::{CheckpointProgress, CheckpointSet, FailureCause, LevelOutcome, ResetLevel};
use crate::config::ConfigLoaded;
use crate::entity::LevelEntity;
use crate::fire::FireContacts;
use crate::player::{Avatar, AvatarState, FuelTank};

pub fn spawn_level(
  mut commands: Commands,
  config: Res<ConfigLoaded>,
  progress: Res<CheckpointProgress>,
  mut checkpoints: ResMut<CheckpointSet>,
) {
  build_level(&mut commands, &config, progress.last_reached, &mut checkpoints);
}

/// Tears the level down and rebuilds it from config.
pub fn reset_level(
  mut commands: Commands,
  mut resets: MessageReader<ResetLevel>,
  entities: Query<Entity, With<LevelEntity>>,
  config: Res<ConfigLoaded>,
  progress: Res<CheckpointProgress>,
  mut checkpoints: ResMut<CheckpointSet>,
  mut outcome: ResMut<LevelOutcome>,
  mut fire: ResMut<FireContacts>,
) {
  if resets.is_empty() {
    return;
  }
  resets.clear();

  for entity in &entities {
    commands.entity(entity).despawn();
  }
  fire.clear();
  outcome.reset();
  info!("Resetting level (checkpoint {:?})", progress.last_reached);
  build_level(&mut commands, &config, progress.last_reached, &mut checkpoints);
}

/// Fails the level when the avatar runs dry, dies or leaves the world.
pub fn check_failure_conditions(
  mut outcome: ResMut<LevelOutcome>,
  mut avatars: Query<(&FuelTank, &mut AvatarState, &Transform), With<Avatar>>,
  config: Res<ConfigLoaded>,
) {
  for (tank, mut state, transform) in &mut avatars {
    let cause = if transform.translation.y < config.level.world_bottom {
      state.alive = false;
      Some(FailureCause::FellOutOfWorld)
    } else if !state.alive {
      Some(FailureCause::Died)
    } else if tank.is_empty() {
      Some(FailureCause::FuelExhausted)
    } else {
      None
    };

    if let Some(cause) = cause {
      if outcome.fail(cause) {
        info!("Level failed: {:?}", cause);
      }
    }
  }
}
