//! Entity taxonomy and capability table.
//!
//! Every gameplay object carries exactly one [`EntityKind`]. Game rules never
//! branch on concrete kinds directly; they ask for [`Capabilities`], which
//! keeps the collision policy a lookup over explicit flags.

use bevy::prelude::*;
use bitflags::bitflags;
use serde::Deserialize;

bitflags! {
  /// What an entity can take part in.
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
  pub struct Capabilities: u16 {
    /// Carries a burn/spread state machine.
    const FLAMMABLE = 1 << 0;
    /// Can be climbed; never a physical collider for the avatar.
    const CLIMBABLE = 1 << 1;
    /// Kills the avatar on contact while alive.
    const HOSTILE = 1 << 2;
    /// Touching it completes the level.
    const GOAL = 1 << 3;
    /// Collectible trigger granting fuel; never solid.
    const PICKUP = 1 << 4;
    /// Crushes what its underside lands on.
    const HEAVY = 1 << 5;
    /// Stays solid for the avatar even in spirit mode.
    const SUPPORT = 1 << 6;
    /// Driven by the finite-state AI.
    const NPC = 1 << 7;
    /// The player-controlled avatar.
    const AVATAR = 1 << 8;
  }
}

/// Concrete kind of a gameplay object.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
  Avatar,
  /// Static, non-flammable ground.
  Platform,
  /// Flammable block the avatar can ghost through in spirit mode.
  Wood,
  /// Flammable platform that stays solid in spirit mode.
  BurnablePlatform,
  /// Flammable fuel pickup, optionally a checkpoint.
  Fuel,
  /// Climbable, flammable rope segment.
  Rope,
  /// Heavy falling object.
  Stone,
  Guard,
  Civilian,
  Goal,
}

impl EntityKind {
  pub const fn capabilities(self) -> Capabilities {
    match self {
      Self::Avatar => Capabilities::AVATAR,
      Self::Platform => Capabilities::empty(),
      Self::Wood => Capabilities::FLAMMABLE,
      Self::BurnablePlatform => Capabilities::FLAMMABLE.union(Capabilities::SUPPORT),
      Self::Fuel => Capabilities::FLAMMABLE.union(Capabilities::PICKUP),
      Self::Rope => Capabilities::FLAMMABLE.union(Capabilities::CLIMBABLE),
      Self::Stone => Capabilities::HEAVY,
      Self::Guard => Capabilities::NPC.union(Capabilities::HOSTILE),
      Self::Civilian => Capabilities::NPC,
      Self::Goal => Capabilities::GOAL,
    }
  }

  #[inline]
  pub const fn has(self, caps: Capabilities) -> bool {
    self.capabilities().contains(caps)
  }

  /// Flammables that suck the avatar into spirit mode on touch.
  #[inline]
  pub const fn grants_spirit(self) -> bool {
    self.has(Capabilities::FLAMMABLE)
      && !self.has(Capabilities::SUPPORT)
      && !self.has(Capabilities::CLIMBABLE)
  }
}

/// Marker for everything spawned from the level description; despawned on
/// reset.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct LevelEntity;
