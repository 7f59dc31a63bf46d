//! E2E tests for fuel pickups, checkpoints, fuel exhaustion and level reset.
//!
//! Run: cargo test --test fuel_checkpoint_e2e

mod common;

use bevy::prelude::*;
use common::*;
use emberwake::config::GameConfig;
use emberwake::entity::EntityKind;
use emberwake::level::{CheckpointProgress, FailureCause, LevelOutcome, ResetLevel};
use emberwake::player::{Avatar, FuelTank};

fn pickup(x: f32, bonus: f32, checkpoint: Option<usize>) -> emberwake::config::LevelObject {
  let mut fuel = object(EntityKind::Fuel, x, 0.0);
  fuel.fuel_bonus = Some(bonus);
  fuel.checkpoint = checkpoint;
  fuel
}

/// No passive drain, so fuel values are exact.
fn no_drain(mut config: GameConfig) -> GameConfig {
  config.player.min_drain = 0.0;
  config.player.drain_coefficient = 0.0;
  config
}

fn set_tank(app: &mut App, avatar: Entity, tank: FuelTank) {
  *app.world_mut().get_mut::<FuelTank>(avatar).unwrap() = tank;
}

fn fuel(app: &App, avatar: Entity) -> f32 {
  app.world().get::<FuelTank>(avatar).unwrap().fuel()
}

#[test]
fn pickup_bonus_is_clamped_to_capacity() {
  let mut app = headless_app(no_drain(test_config(vec![pickup(100.0, 40.0, None)])));
  let avatar = avatar(&mut app);
  let fuel_block = find(&mut app, EntityKind::Fuel, 100.0);
  set_tank(&mut app, avatar, FuelTank::new(30.0, 50.0));

  begin(&mut app, avatar, fuel_block);
  step(&mut app, 1);
  assert_eq!(fuel(&app, avatar), 50.0);
}

#[test]
fn lit_pickup_is_collected_once() {
  let mut app = headless_app(no_drain(test_config(vec![pickup(100.0, 10.0, None)])));
  let avatar = avatar(&mut app);
  let fuel_block = find(&mut app, EntityKind::Fuel, 100.0);
  set_tank(&mut app, avatar, FuelTank::new(20.0, 100.0));

  begin(&mut app, avatar, fuel_block);
  step(&mut app, 1);
  end(&mut app, avatar, fuel_block);
  step(&mut app, 1);
  begin(&mut app, fuel_block, avatar);
  step(&mut app, 1);
  assert_eq!(fuel(&app, avatar), 30.0);
}

#[test]
fn new_checkpoint_is_signalled_and_saved() {
  let mut app = headless_app(test_config(vec![pickup(100.0, 10.0, Some(0))]));
  let avatar = avatar(&mut app);
  let fuel_block = find(&mut app, EntityKind::Fuel, 100.0);

  begin(&mut app, avatar, fuel_block);
  step(&mut app, 1);
  assert_eq!(
    app.world().resource::<LevelOutcome>().checkpoint_reached_index(),
    0
  );
  assert_eq!(
    *app.world().resource::<CheckpointProgress>(),
    CheckpointProgress::at(0)
  );

  step(&mut app, 1);
  assert_eq!(
    app.world().resource::<LevelOutcome>().checkpoint_reached_index(),
    -1,
    "signal lasts a single tick"
  );
}

#[test]
fn saved_checkpoint_is_not_signalled_again() {
  let mut app = headless_app(test_config(vec![pickup(100.0, 10.0, Some(2))]));
  app.insert_resource(CheckpointProgress::at(2));
  let avatar = avatar(&mut app);
  let fuel_block = find(&mut app, EntityKind::Fuel, 100.0);

  begin(&mut app, avatar, fuel_block);
  step(&mut app, 1);
  assert_eq!(
    app.world().resource::<LevelOutcome>().checkpoint_reached_index(),
    -1
  );
}

#[test]
fn empty_tank_fails_the_level() {
  let mut app = headless_app(test_config(vec![]));
  let avatar = avatar(&mut app);
  set_tank(&mut app, avatar, FuelTank::new(0.0, 50.0));
  step(&mut app, 1);

  let outcome = app.world().resource::<LevelOutcome>();
  assert!(outcome.is_failure());
  assert!(!outcome.is_complete());
  assert_eq!(outcome.failure_cause(), Some(FailureCause::FuelExhausted));
}

#[test]
fn idle_drain_is_slow_but_steady() {
  let mut app = headless_app(test_config(vec![]));
  let avatar = avatar(&mut app);
  let before = fuel(&app, avatar);
  step(&mut app, ticks(1.0));
  let after = fuel(&app, avatar);
  assert!(after < before);
  assert!(before - after < 1.0);
}

#[test]
fn reset_respawns_at_saved_checkpoint() {
  let mut app = headless_app(test_config(vec![pickup(100.0, 10.0, Some(0))]));
  let first = avatar(&mut app);
  let fuel_block = find(&mut app, EntityKind::Fuel, 100.0);
  begin(&mut app, first, fuel_block);
  step(&mut app, 1);
  set_tank(&mut app, first, FuelTank::new(0.0, 50.0));
  step(&mut app, 1);
  assert!(app.world().resource::<LevelOutcome>().is_failure());

  app.world_mut().write_message(ResetLevel);
  step(&mut app, 1);

  assert!(app.world().get_entity(first).is_err());
  assert!(!app.world().resource::<LevelOutcome>().is_terminal());

  let respawned = avatar(&mut app);
  let transform = app.world().get::<Transform>(respawned).unwrap();
  assert_eq!(transform.translation.x, 100.0);
  assert!(transform.translation.y > 0.0);

  let config = GameConfig::embedded().unwrap();
  assert_eq!(fuel(&app, respawned), config.player.initial_fuel);

  let fresh = find(&mut app, EntityKind::Fuel, 100.0);
  assert_ne!(fresh, fuel_block);
  assert_eq!(
    app
      .world_mut()
      .query_filtered::<Entity, With<Avatar>>()
      .iter(app.world())
      .count(),
    1
  );
}
