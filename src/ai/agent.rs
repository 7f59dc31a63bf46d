use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::fsm::{AiState, Archetype, Perception, next_state};
use crate::config::{AiConfig, ArchetypeConfig};

/// Tuning for one NPC archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeProfile {
  pub speed: f32,
  pub sight_range: f32,
  pub chase_range: f32,
  pub attack_range: f32,
  pub fear_range: f32,
  pub cooldown_min: f32,
  pub cooldown_max: f32,
  pub attack_cooldown: f32,
  pub spawn_cooldown: f32,
  pub wander_left: f32,
  pub wander_right: f32,
}

impl ArchetypeProfile {
  pub fn from_config(ai: &AiConfig, archetype: Archetype) -> Self {
    let ArchetypeConfig {
      speed,
      sight_range,
      chase_range,
      attack_range,
      fear_range,
      cooldown_min,
      cooldown_max,
      attack_cooldown,
      spawn_cooldown,
    } = match archetype {
      Archetype::Guard => ai.guard,
      Archetype::Civilian => ai.civilian,
    };
    Self {
      speed,
      sight_range,
      chase_range: chase_range.max(sight_range),
      attack_range,
      fear_range,
      cooldown_min: cooldown_min.max(0.0),
      cooldown_max: cooldown_max.max(cooldown_min.max(0.0)),
      attack_cooldown,
      spawn_cooldown,
      wander_left: ai.wander_left,
      wander_right: ai.wander_right,
    }
  }

  /// Builds a perception from positions relative to the NPC.
  pub fn perceive(
    &self,
    agent: &NpcAgent,
    target: Option<(Entity, Vec2)>,
    nearest_fire: Option<Vec2>,
  ) -> Perception {
    let target = target.filter(|(_, offset)| offset.length() <= self.chase_range);
    let distance = target.map(|(_, offset)| offset.length());
    Perception {
      spawn_ready: agent.spawn_timer <= 0.0,
      target: target.map(|(entity, _)| entity),
      target_sighted: distance.is_some_and(|d| d <= self.sight_range),
      in_attack_range: distance.is_some_and(|d| d <= self.attack_range),
      attack_ready: agent.attack_timer <= 0.0,
      fire_near: nearest_fire.is_some_and(|offset| offset.length() <= self.fear_range),
    }
  }
}

/// Single random source for NPC decisions.
#[derive(Resource, Deref, DerefMut)]
pub struct AiRng(pub StdRng);

impl AiRng {
  pub fn seeded(seed: u64) -> Self {
    Self(StdRng::seed_from_u64(seed))
  }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct NpcAgent {
  pub archetype: Archetype,
  pub state: AiState,
  /// Decisions only happen once this reaches zero.
  pub move_cooldown: f32,
  pub attack_timer: f32,
  pub spawn_timer: f32,
  /// Horizontal intent: -1, 0 or 1.
  pub direction: f32,
  pub alive: bool,
  /// Time left before a dead NPC is removed.
  pub corpse_timer: f32,
}

impl NpcAgent {
  pub fn new(archetype: Archetype, profile: &ArchetypeProfile) -> Self {
    Self {
      archetype,
      state: AiState::Spawn,
      move_cooldown: 0.0,
      attack_timer: 0.0,
      spawn_timer: profile.spawn_cooldown,
      direction: 0.0,
      alive: true,
      corpse_timer: 0.0,
    }
  }

  /// Marks the NPC dead and starts the corpse timer. Returns `false` if it
  /// already was dead.
  pub fn kill(&mut self, corpse_linger: f32) -> bool {
    if !self.alive {
      return false;
    }
    self.alive = false;
    self.direction = 0.0;
    self.corpse_timer = corpse_linger.max(0.0);
    true
  }

  pub fn tick(&mut self, dt: f32) {
    self.move_cooldown = (self.move_cooldown - dt).max(0.0);
    self.attack_timer = (self.attack_timer - dt).max(0.0);
    self.spawn_timer = (self.spawn_timer - dt).max(0.0);
  }

  pub fn can_decide(&self) -> bool {
    self.alive && self.move_cooldown <= 0.0
  }

  /// Runs one decision: state transition, movement roll and a fresh
  /// cooldown. Returns the previous state when it changed.
  pub fn decide(
    &mut self,
    profile: &ArchetypeProfile,
    perception: &Perception,
    rng: &mut impl Rng,
  ) -> Option<AiState> {
    let previous = self.state;
    self.state = next_state(previous, self.archetype, perception);
    if self.state == AiState::Attack && previous != AiState::Attack {
      self.attack_timer = profile.attack_cooldown;
    }

    if self.state == AiState::Wander {
      self.direction = wander_roll(rng, profile.wander_left, profile.wander_right);
    } else if self.state == AiState::Spawn {
      self.direction = 0.0;
    }

    self.move_cooldown = if profile.cooldown_max > profile.cooldown_min {
      rng.random_range(profile.cooldown_min..=profile.cooldown_max)
    } else {
      profile.cooldown_min
    };

    (self.state != previous).then_some(previous)
  }

  /// Points directed states at (or away from) their stimulus.
  pub fn steer(&mut self, target_offset: Option<Vec2>, fire_offset: Option<Vec2>) {
    let toward = |offset: Option<Vec2>| offset.map_or(0.0, |o| o.x.signum());
    match self.state {
      AiState::Chase | AiState::Attack => self.direction = toward(target_offset),
      AiState::Escape => self.direction = -toward(fire_offset),
      AiState::Spawn | AiState::Wander => {}
    }
  }
}

/// Picks left (-1), right (1) or stay (0) with the given probabilities.
pub fn wander_roll(rng: &mut impl Rng, left: f32, right: f32) -> f32 {
  let roll: f32 = rng.random();
  if roll < left {
    -1.0
  } else if roll < left + right {
    1.0
  } else {
    0.0
  }
}
