//! NPC state machine as an explicit transition table.

use bevy::prelude::*;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiState {
  #[default]
  Spawn,
  Wander,
  Chase,
  Attack,
  Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
  /// Hunts the avatar.
  Guard,
  /// Runs from fire.
  Civilian,
}

impl Archetype {
  const fn bit(self) -> u8 {
    match self {
      Self::Guard => 1,
      Self::Civilian => 2,
    }
  }
}

/// What an NPC knows about its surroundings at decision time.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Perception {
  pub spawn_ready: bool,
  /// Live avatar within chase range.
  pub target: Option<Entity>,
  /// The target is close enough to be noticed.
  pub target_sighted: bool,
  pub in_attack_range: bool,
  pub attack_ready: bool,
  /// A burning object within fear range.
  pub fire_near: bool,
}

struct Transition {
  from: AiState,
  archetypes: u8,
  when: fn(&Perception) -> bool,
  to: AiState,
}

const ANY: u8 = Archetype::Guard.bit() | Archetype::Civilian.bit();
const GUARD: u8 = Archetype::Guard.bit();
const CIVILIAN: u8 = Archetype::Civilian.bit();

/// First matching row wins. Losing the target comes first so Chase/Attack
/// can never hold without one.
const TRANSITIONS: &[Transition] = &[
  Transition {
    from: AiState::Chase,
    archetypes: ANY,
    when: |p| p.target.is_none(),
    to: AiState::Wander,
  },
  Transition {
    from: AiState::Attack,
    archetypes: ANY,
    when: |p| p.target.is_none(),
    to: AiState::Wander,
  },
  Transition {
    from: AiState::Spawn,
    archetypes: ANY,
    when: |p| p.spawn_ready,
    to: AiState::Wander,
  },
  Transition {
    from: AiState::Wander,
    archetypes: GUARD,
    when: |p| p.target.is_some() && p.target_sighted,
    to: AiState::Chase,
  },
  Transition {
    from: AiState::Chase,
    archetypes: GUARD,
    when: |p| p.in_attack_range && p.attack_ready,
    to: AiState::Attack,
  },
  Transition {
    from: AiState::Attack,
    archetypes: GUARD,
    when: |p| !p.in_attack_range,
    to: AiState::Chase,
  },
  Transition {
    from: AiState::Wander,
    archetypes: CIVILIAN,
    when: |p| p.fire_near,
    to: AiState::Escape,
  },
  Transition {
    from: AiState::Escape,
    archetypes: CIVILIAN,
    when: |p| !p.fire_near,
    to: AiState::Wander,
  },
];

/// Next state for `state`, or `state` itself when no row matches.
pub fn next_state(state: AiState, archetype: Archetype, perception: &Perception) -> AiState {
  TRANSITIONS
    .iter()
    .find(|t| t.from == state && t.archetypes & archetype.bit() != 0 && (t.when)(perception))
    .map_or(state, |t| t.to)
}
