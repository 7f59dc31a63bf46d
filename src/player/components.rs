use std::collections::HashMap;

use bevy::prelude::*;

use crate::config::PlayerConfig;

#[derive(Component)]
pub struct Avatar;

/// Flags read by animation and the contact filter.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct AvatarState {
  pub grounded: bool,
  pub climbing: bool,
  pub spirit_mode: bool,
  pub alive: bool,
  /// Seconds of spirit mode left once no spirit source is overlapped.
  pub spirit_timer: f32,
}

impl Default for AvatarState {
  fn default() -> Self {
    Self {
      grounded: false,
      climbing: false,
      spirit_mode: false,
      alive: true,
      spirit_timer: 0.0,
    }
  }
}

/// Requested movement for this tick, written by input or tests.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct MovementRequest {
  /// -1 (left) ..= 1 (right)
  pub horizontal: f32,
  /// -1 (down) ..= 1 (up)
  pub vertical: f32,
  pub jump: bool,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
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
}

impl From<&PlayerConfig> for MovementConfig {
  fn from(player: &PlayerConfig) -> Self {
    Self {
      walk_speed: player.walk_speed,
      acceleration: player.acceleration,
      air_acceleration: player.air_acceleration,
      ground_damping: player.ground_damping,
      fall_acceleration: player.fall_acceleration,
      jump_speed: player.jump_speed,
      terminal_velocity: player.terminal_velocity,
      spirit_speed_multiplier: player.spirit_speed_multiplier,
      climb_speed: player.climb_speed,
      spirit_blend: player.spirit_blend,
    }
  }
}

/// Colliders currently touched, counted per collider entity.
///
/// A boolean cannot express "standing across two platforms": the flag must
/// only clear when the last contact ends.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactSet {
  counts: HashMap<Entity, u32>,
}

impl ContactSet {
  pub fn insert(&mut self, collider: Entity) {
    *self.counts.entry(collider).or_insert(0) += 1;
  }

  /// Ignores colliders that were never inserted.
  pub fn remove(&mut self, collider: Entity) {
    if let Some(count) = self.counts.get_mut(&collider) {
      *count -= 1;
      if *count == 0 {
        self.counts.remove(&collider);
      }
    }
  }

  pub fn contains(&self, collider: Entity) -> bool {
    self.counts.contains_key(&collider)
  }

  pub fn is_empty(&self) -> bool {
    self.counts.is_empty()
  }

  pub fn len(&self) -> usize {
    self.counts.len()
  }

  pub fn clear(&mut self) {
    self.counts.clear();
  }
}

/// Ground fixtures under the feet sensor.
#[derive(Component, Debug, Default, Deref, DerefMut)]
pub struct GroundContacts(pub ContactSet);

/// Climbable colliders overlapping the body.
#[derive(Component, Debug, Default, Deref, DerefMut)]
pub struct ClimbContacts(pub ContactSet);

/// Spirit-granting flammables overlapping the body.
#[derive(Component, Debug, Default, Deref, DerefMut)]
pub struct SpiritContacts(pub ContactSet);
