//! E2E tests for fire spreading across touching flammables.
//!
//! Run: cargo test --test fire_spread_e2e

mod common;

use bevy::prelude::*;
use common::*;
use emberwake::entity::EntityKind;
use emberwake::fire::{FireContacts, Flammable};

fn two_logs() -> (App, Entity, Entity) {
  let mut a = object(EntityKind::Wood, 200.0, 0.0);
  a.spread_delay = Some(1.0);
  a.burn_duration = Some(3.0);
  let mut b = object(EntityKind::Wood, 240.0, 0.0);
  b.spread_delay = Some(1.0);
  b.burn_duration = Some(3.0);

  let mut app = headless_app(test_config(vec![a, b]));
  let a = find(&mut app, EntityKind::Wood, 200.0);
  let b = find(&mut app, EntityKind::Wood, 240.0);
  (app, a, b)
}

fn flammable(app: &App, entity: Entity) -> Flammable {
  *app.world().get::<Flammable>(entity).unwrap()
}

fn ignite(app: &mut App, entity: Entity) {
  app
    .world_mut()
    .get_mut::<Flammable>(entity)
    .unwrap()
    .activate_burn_timer();
}

#[test]
fn neighbour_ignites_only_after_spread_delay() {
  let (mut app, a, b) = two_logs();
  ignite(&mut app, a);
  begin(&mut app, a, b);

  step(&mut app, ticks(0.5));
  assert!(flammable(&app, b).is_unlit(), "must not ignite before spread delay");
  assert!(app.world().resource::<FireContacts>().contains(a, b));

  step(&mut app, ticks(0.6));
  assert!(flammable(&app, b).is_burning(), "must ignite once spread delay elapsed");
}

#[test]
fn separated_logs_do_not_spread() {
  let (mut app, a, b) = two_logs();
  ignite(&mut app, a);
  begin(&mut app, a, b);
  step(&mut app, ticks(0.2));
  end(&mut app, a, b);
  step(&mut app, ticks(1.5));

  assert!(flammable(&app, b).is_unlit());
  assert!(app.world().resource::<FireContacts>().is_empty());
}

#[test]
fn burnt_objects_are_removed_and_forgotten() {
  let (mut app, a, b) = two_logs();
  ignite(&mut app, a);
  begin(&mut app, a, b);

  step(&mut app, ticks(2.9));
  assert!(app.world().get_entity(a).is_ok(), "still burning before burn duration");

  step(&mut app, ticks(0.3));
  assert!(app.world().get_entity(a).is_err(), "removed after burning out");
  assert!(!app.world().resource::<FireContacts>().contains(a, b));
  assert!(flammable(&app, b).is_burning());
}

#[test]
fn avatar_touch_ignites_wood() {
  let (mut app, a, _) = two_logs();
  let avatar = avatar(&mut app);
  begin(&mut app, avatar, a);
  step(&mut app, 1);
  assert!(flammable(&app, a).is_burning());
}

#[test]
fn burn_ratio_decreases_while_burning() {
  let (mut app, a, _) = two_logs();
  ignite(&mut app, a);
  let mut last = flammable(&app, a).burn_ratio();
  for _ in 0..10 {
    step(&mut app, 10);
    let ratio = flammable(&app, a).burn_ratio();
    assert!(ratio <= last);
    last = ratio;
  }
  assert!(last < 1.0);
}
