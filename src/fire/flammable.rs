//! Per-object burn state machine.
//!
//! ```text
//! Unlit --activate_burn_timer--> Burning --burn_timer <= 0--> Burnt
//! ```
//!
//! `Burnt` is terminal. Two clocks run while burning: the spread timer gates
//! when the object may ignite neighbours, the burn timer counts down to
//! destruction.

use bevy::prelude::*;

/// Smallest accepted burn duration; keeps `burn_ratio` finite.
const MIN_BURN_DURATION: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnState {
  Unlit,
  Burning,
  Burnt,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Flammable {
  spread_delay: f32,
  burn_duration: f32,
  spread_timer: f32,
  burn_timer: f32,
  burning: bool,
  burnt: bool,
}

impl Flammable {
  pub fn new(spread_delay: f32, burn_duration: f32) -> Self {
    let spread_delay = spread_delay.max(0.0);
    let burn_duration = burn_duration.max(MIN_BURN_DURATION);
    Self {
      spread_delay,
      burn_duration,
      spread_timer: spread_delay,
      burn_timer: burn_duration,
      burning: false,
      burnt: false,
    }
  }

  pub fn state(&self) -> BurnState {
    if self.burnt {
      BurnState::Burnt
    } else if self.burning {
      BurnState::Burning
    } else {
      BurnState::Unlit
    }
  }

  #[inline]
  pub fn is_burning(&self) -> bool {
    self.burning
  }

  #[inline]
  pub fn is_burnt(&self) -> bool {
    self.burnt
  }

  #[inline]
  pub fn is_unlit(&self) -> bool {
    !self.burning && !self.burnt
  }

  pub fn spread_delay(&self) -> f32 {
    self.spread_delay
  }

  pub fn burn_duration(&self) -> f32 {
    self.burn_duration
  }

  pub fn spread_timer(&self) -> f32 {
    self.spread_timer
  }

  pub fn burn_timer(&self) -> f32 {
    self.burn_timer
  }

  /// Lights the object, or re-arms the spread grace period if it is already
  /// burning. The burn timer is never reset. Returns `true` only on the
  /// `Unlit -> Burning` transition.
  pub fn activate_burn_timer(&mut self) -> bool {
    if self.burnt {
      return false;
    }
    let ignited = !self.burning;
    if !ignited {
      log::trace!("Spread grace re-armed ({:.2}s)", self.spread_delay);
    }
    self.burning = true;
    self.spread_timer = self.spread_delay;
    ignited
  }

  /// Whether this object may ignite a touching neighbour right now.
  pub fn can_spread_fire(&self) -> bool {
    self.burning && !self.burnt && self.spread_timer <= 0.0
  }

  /// Advances both clocks. Returns `true` on the tick the object burns out;
  /// the caller then removes it from the world.
  pub fn tick(&mut self, dt: f32) -> bool {
    if !self.burning || self.burnt {
      return false;
    }
    let dt = dt.max(0.0);
    self.spread_timer = (self.spread_timer - dt).max(0.0);
    self.burn_timer -= dt;
    if self.burn_timer <= 0.0 {
      self.burn_timer = 0.0;
      self.burning = false;
      self.burnt = true;
      return true;
    }
    false
  }

  /// Remaining burn fraction in `[0, 1]`; 1 while unlit.
  pub fn burn_ratio(&self) -> f32 {
    (self.burn_timer / self.burn_duration).clamp(0.0, 1.0)
  }

  /// Remaining spread grace fraction in `[0, 1]`; 0 once spreading is
  /// possible.
  pub fn spread_ratio(&self) -> f32 {
    if self.spread_delay <= 0.0 {
      return 0.0;
    }
    (self.spread_timer / self.spread_delay).clamp(0.0, 1.0)
  }
}
