//! Headless app scaffolding shared by the e2e tests.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use emberwake::ai::AiRng;
use emberwake::collision::{ContactEvent, Fixture, FixtureRole};
use emberwake::config::{ConfigPlugin, GameConfig, LevelObject};
use emberwake::entity::EntityKind;
use emberwake::player::Avatar;
use emberwake::sim::GameplayPlugins;

pub const TICK_HZ: f64 = 60.0;

/// Embedded config with an empty level and the avatar at the origin.
pub fn test_config(objects: Vec<LevelObject>) -> GameConfig {
  let mut config = GameConfig::embedded().unwrap();
  config.level.spawn_x = 0.0;
  config.level.spawn_y = 0.0;
  config.level.objects = objects;
  config
}

pub fn object(kind: EntityKind, x: f32, y: f32) -> LevelObject {
  LevelObject {
    kind,
    x,
    y,
    width: 40.0,
    height: 40.0,
    spread_delay: None,
    burn_duration: None,
    fuel_bonus: None,
    checkpoint: None,
  }
}

/// Gameplay plugins on `MinimalPlugins`, one fixed tick per `update`.
///
/// The first update runs `Startup` (level spawn) with zero elapsed time.
pub fn headless_app(config: GameConfig) -> App {
  let mut app = App::new();
  app
    .add_plugins(MinimalPlugins)
    .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
      1.0 / TICK_HZ,
    )))
    .insert_resource(AiRng::seeded(config.ai.seed))
    .add_plugins(ConfigPlugin::new(config).without_hot_reload())
    .add_plugins(GameplayPlugins);
  app.update();
  app
}

pub fn step(app: &mut App, ticks: usize) {
  for _ in 0..ticks {
    app.update();
  }
}

/// Seconds to fixed ticks, rounded up.
pub fn ticks(seconds: f32) -> usize {
  (seconds as f64 * TICK_HZ).ceil() as usize
}

pub fn avatar(app: &mut App) -> Entity {
  app
    .world_mut()
    .query_filtered::<Entity, With<Avatar>>()
    .single(app.world())
    .unwrap()
}

pub fn sensor(app: &mut App, owner: Entity, role: FixtureRole) -> Entity {
  app
    .world_mut()
    .query::<(Entity, &Fixture)>()
    .iter(app.world())
    .find(|(_, fixture)| fixture.owner == owner && fixture.role == role)
    .map(|(entity, _)| entity)
    .unwrap()
}

/// Finds the object of `kind` placed at `x`.
pub fn find(app: &mut App, kind: EntityKind, x: f32) -> Entity {
  app
    .world_mut()
    .query::<(Entity, &EntityKind, &Transform)>()
    .iter(app.world())
    .find(|(_, k, t)| **k == kind && (t.translation.x - x).abs() < 0.01)
    .map(|(entity, ..)| entity)
    .unwrap()
}

pub fn begin(app: &mut App, a: Entity, b: Entity) {
  app.world_mut().write_message(ContactEvent::Begin(a, b));
}

pub fn end(app: &mut App, a: Entity, b: Entity) {
  app.world_mut().write_message(ContactEvent::End(a, b));
}
