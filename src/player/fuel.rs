//! Avatar fuel and the pickups that refill it.

use bevy::prelude::*;

/// Fuel in `[0, max]`. Every mutation clamps.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FuelTank {
  fuel: f32,
  max: f32,
  initial: f32,
}

impl FuelTank {
  pub fn new(initial: f32, max: f32) -> Self {
    let max = max.max(0.0);
    let initial = initial.clamp(0.0, max);
    Self {
      fuel: initial,
      max,
      initial,
    }
  }

  pub fn fuel(&self) -> f32 {
    self.fuel
  }

  pub fn max_fuel(&self) -> f32 {
    self.max
  }

  pub fn ratio(&self) -> f32 {
    if self.max <= 0.0 {
      0.0
    } else {
      self.fuel / self.max
    }
  }

  pub fn is_empty(&self) -> bool {
    self.fuel <= 0.0
  }

  /// Adds a pickup bonus; overflow past capacity is lost.
  pub fn add_fuel(&mut self, bonus: f32) {
    let total = self.fuel + bonus.max(0.0);
    if total > self.max {
      log::trace!("Fuel overflow discarded: {:.1}", total - self.max);
    }
    self.fuel = total.min(self.max);
  }

  /// Burns `max(min_drain, coefficient * speed)` per second for `dt`.
  pub fn sub_fuel(&mut self, min_drain: f32, coefficient: f32, speed: f32, dt: f32) {
    let rate = (coefficient * speed).max(min_drain);
    self.fuel = (self.fuel - rate * dt.max(0.0)).max(0.0);
  }

  pub fn reset(&mut self) {
    self.fuel = self.initial;
  }
}

/// A flammable that refills fuel when the avatar ignites it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FuelPickup {
  pub bonus: f32,
  /// Index in the level's checkpoint sequence, if this pickup is one.
  pub checkpoint: Option<usize>,
}
