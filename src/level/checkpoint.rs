//! Checkpoint bookkeeping.
//!
//! [`CheckpointProgress`] is the save-state handed to the simulation. The
//! core only reads it to suppress redundant signals; [`persist_checkpoint`]
//! plays the persistence collaborator and records what the core signalled.

use bevy::prelude::*;

use super::LevelOutcome;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointProgress {
  pub last_reached: Option<usize>,
}

impl CheckpointProgress {
  pub fn at(index: usize) -> Self {
    Self {
      last_reached: Some(index),
    }
  }

  /// Whether reaching `index` is news.
  pub fn is_new(&self, index: usize) -> bool {
    self.last_reached != Some(index)
  }
}

/// Respawn position per checkpoint index, filled when the level spawns.
#[derive(Resource, Debug, Default, Clone)]
pub struct CheckpointSet {
  positions: Vec<Option<Vec2>>,
}

impl CheckpointSet {
  pub fn insert(&mut self, index: usize, position: Vec2) {
    if self.positions.len() <= index {
      self.positions.resize(index + 1, None);
    }
    self.positions[index] = Some(position);
  }

  pub fn position(&self, index: usize) -> Option<Vec2> {
    self.positions.get(index).copied().flatten()
  }

  pub fn len(&self) -> usize {
    self.positions.iter().filter(|p| p.is_some()).count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Nearest checkpoint after `last` in sequence order.
  pub fn next_unreached(&self, last: Option<usize>) -> Option<(usize, Vec2)> {
    let start = last.map_or(0, |index| index + 1);
    self
      .positions
      .iter()
      .enumerate()
      .skip(start)
      .find_map(|(index, position)| position.map(|p| (index, p)))
  }

  pub fn clear(&mut self) {
    self.positions.clear();
  }
}

pub fn persist_checkpoint(outcome: Res<LevelOutcome>, mut progress: ResMut<CheckpointProgress>) {
  if let Some(index) = outcome.checkpoint_reached() {
    if progress.is_new(index) {
      info!("Checkpoint {} saved", index);
      progress.last_reached = Some(index);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn same_checkpoint_is_not_new() {
    let progress = CheckpointProgress::at(2);
    assert!(!progress.is_new(2));
    assert!(progress.is_new(1));
    assert!(CheckpointProgress::default().is_new(0));
  }

  #[test]
  fn next_unreached_follows_order() {
    let mut set = CheckpointSet::default();
    set.insert(2, Vec2::new(20.0, 0.0));
    set.insert(0, Vec2::new(0.0, 0.0));
    assert_eq!(set.len(), 2);
    assert_eq!(set.next_unreached(None), Some((0, Vec2::ZERO)));
    assert_eq!(set.next_unreached(Some(0)), Some((2, Vec2::new(20.0, 0.0))));
    assert_eq!(set.next_unreached(Some(2)), None);
  }
}
