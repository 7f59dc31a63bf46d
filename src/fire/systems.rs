use bevy::prelude::*;

use super::{FireContacts, Flammable};

/// Ignites unlit flammables touching a neighbour that may spread.
///
/// Ignitions are collected first and applied afterwards, so fire advances at
/// most one hop per tick regardless of pair iteration order.
pub fn spread_fire(mut contacts: ResMut<FireContacts>, mut flammables: Query<&mut Flammable>) {
  contacts.retain(|a, b| flammables.contains(a) && flammables.contains(b));

  let mut ignitions = Vec::new();
  for (a, b) in contacts.iter() {
    let Ok([first, second]) = flammables.get_many([a, b]) else {
      continue;
    };
    if first.can_spread_fire() && second.is_unlit() {
      ignitions.push((b, a));
    }
    if second.can_spread_fire() && first.is_unlit() {
      ignitions.push((a, b));
    }
  }

  for (target, source) in ignitions {
    if let Ok(mut flammable) = flammables.get_mut(target) {
      if flammable.activate_burn_timer() {
        debug!("Fire spread {:?} -> {:?}", source, target);
      }
    }
  }
}

pub fn tick_burning(time: Res<Time>, mut flammables: Query<(Entity, &mut Flammable)>) {
  let dt = time.delta_secs();
  for (entity, mut flammable) in &mut flammables {
    if !flammable.is_burning() {
      continue;
    }
    if flammable.tick(dt) {
      debug!("{:?} burnt out", entity);
    }
  }
}

/// Despawns burnt entities together with their physics bodies.
///
/// Runs as a separate pass after all timers advanced; nothing is removed
/// while the flammable query is being iterated.
pub fn remove_burnt(
  mut commands: Commands,
  mut contacts: ResMut<FireContacts>,
  flammables: Query<(Entity, &Flammable)>,
) {
  let burnt: Vec<Entity> = flammables
    .iter()
    .filter(|(_, flammable)| flammable.is_burnt())
    .map(|(entity, _)| entity)
    .collect();

  for entity in burnt {
    contacts.forget(entity);
    commands.entity(entity).despawn();
  }
}
