//! Level outcome flags exposed to presentation and persistence.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
  FuelExhausted,
  Crushed,
  CaughtByGuard,
  FellOutOfWorld,
  Died,
}

/// Terminal flags plus the per-tick checkpoint signal.
///
/// `complete` and `failure` are mutually exclusive: whichever is reached
/// first sticks until [`LevelOutcome::reset`].
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct LevelOutcome {
  complete: bool,
  failure: Option<FailureCause>,
  checkpoint_reached: Option<usize>,
}

impl LevelOutcome {
  pub fn is_complete(&self) -> bool {
    self.complete
  }

  pub fn is_failure(&self) -> bool {
    self.failure.is_some()
  }

  pub fn failure_cause(&self) -> Option<FailureCause> {
    self.failure
  }

  pub fn is_terminal(&self) -> bool {
    self.complete || self.failure.is_some()
  }

  /// Marks the level won. Returns `true` only on the first transition.
  pub fn complete(&mut self) -> bool {
    if self.is_terminal() {
      return false;
    }
    self.complete = true;
    true
  }

  /// Marks the level lost. Ignored once the level is won or already lost.
  pub fn fail(&mut self, cause: FailureCause) -> bool {
    if self.is_terminal() {
      return false;
    }
    self.failure = Some(cause);
    true
  }

  pub fn signal_checkpoint(&mut self, index: usize) {
    self.checkpoint_reached = Some(index);
  }

  pub fn checkpoint_reached(&self) -> Option<usize> {
    self.checkpoint_reached
  }

  /// Checkpoint reached this tick, `-1` when none.
  pub fn checkpoint_reached_index(&self) -> i32 {
    self
      .checkpoint_reached
      .map_or(-1, |index| i32::try_from(index).unwrap_or(i32::MAX))
  }

  /// Clears the per-tick checkpoint signal.
  pub fn begin_tick(&mut self) {
    self.checkpoint_reached = None;
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }
}
