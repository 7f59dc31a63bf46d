//! Game-rule interpretation of physics contacts.
//!
//! Two entry points, both pure:
//!
//! - [`on_begin`]/[`on_end`] turn a touching pair into one-shot
//!   [`ContactReaction`]s. They run once per contact start/stop.
//! - [`solver_enabled`] decides whether the solver may push the pair apart.
//!   Rapier calls it every step, so it has no side effects.
//!
//! Dispatch is total: every pair falls through to "no reaction" unless a
//! rule matches.

use bevy::prelude::*;

use super::FixtureRole;
use crate::entity::{Capabilities, EntityKind};
use crate::fire::BurnState;
use crate::level::FailureCause;

/// Snapshot of one side of a contact, taken when the event is processed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Participant {
  pub collider: Entity,
  pub owner: Entity,
  pub kind: EntityKind,
  pub role: FixtureRole,
  pub burn: Option<BurnState>,
  pub pickup: Option<PickupInfo>,
  pub velocity: Vec2,
  pub alive: bool,
}

impl Participant {
  pub fn new(collider: Entity, owner: Entity, kind: EntityKind, role: FixtureRole) -> Self {
    Self {
      collider,
      owner,
      kind,
      role,
      burn: None,
      pickup: None,
      velocity: Vec2::ZERO,
      alive: true,
    }
  }

  #[inline]
  fn has(&self, caps: Capabilities) -> bool {
    self.kind.has(caps)
  }

  #[inline]
  fn is_body(&self) -> bool {
    self.role == FixtureRole::Body
  }

  fn is_unlit(&self) -> bool {
    self.burn == Some(BurnState::Unlit)
  }

  fn is_flammable_body(&self) -> bool {
    self.is_body() && self.burn.is_some() && self.burn != Some(BurnState::Burnt)
  }

  fn is_falling_heavy(&self, crush_speed: f32) -> bool {
    self.is_body() && self.has(Capabilities::HEAVY) && self.velocity.y < -crush_speed
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickupInfo {
  pub bonus: f32,
  pub checkpoint: Option<usize>,
}

/// Game state the rules read but never write.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolicyContext {
  pub level_finished: bool,
  pub last_checkpoint: Option<usize>,
  pub crush_speed: f32,
}

/// One game-rule consequence of a contact, applied after all contacts of
/// the tick are interpreted.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum ContactReaction {
  /// Two flammables started touching.
  TrackFirePair(Entity, Entity),
  /// Two flammables stopped touching.
  UntrackFirePair(Entity, Entity),
  Ignite {
    target: Entity,
  },
  CollectFuel {
    avatar: Entity,
    pickup: Entity,
    bonus: f32,
  },
  CheckpointReached {
    index: usize,
  },
  /// Avatar overlaps a spirit-granting flammable (`collider`).
  SpiritTouch {
    avatar: Entity,
    collider: Entity,
  },
  SpiritRelease {
    avatar: Entity,
    collider: Entity,
  },
  GroundTouch {
    avatar: Entity,
    collider: Entity,
  },
  GroundRelease {
    avatar: Entity,
    collider: Entity,
  },
  ClimbTouch {
    avatar: Entity,
    collider: Entity,
  },
  ClimbRelease {
    avatar: Entity,
    collider: Entity,
  },
  AvatarKilled {
    avatar: Entity,
    cause: FailureCause,
  },
  NpcKilled {
    npc: Entity,
  },
  GoalReached,
}

/// One side of an ending contact. The collider may already be gone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndSide<'a> {
  Live(&'a Participant),
  Stale(Entity),
}

impl<'a> EndSide<'a> {
  /// `Live` when the collider could still be resolved.
  pub fn resolved(participant: Option<&'a Participant>, collider: Entity) -> Self {
    participant.map_or(Self::Stale(collider), Self::Live)
  }

  pub fn collider(&self) -> Entity {
    match self {
      Self::Live(p) => p.collider,
      Self::Stale(collider) => *collider,
    }
  }

  fn live(&self) -> Option<&Participant> {
    match self {
      Self::Live(p) => Some(p),
      Self::Stale(_) => None,
    }
  }
}

/// Reactions for a contact that just started.
pub fn on_begin(a: &Participant, b: &Participant, ctx: &PolicyContext) -> Vec<ContactReaction> {
  let mut out = Vec::new();
  if a.owner == b.owner {
    return out;
  }

  if a.is_flammable_body() && b.is_flammable_body() {
    out.push(ContactReaction::TrackFirePair(a.owner, b.owner));
  }

  begin_directed(a, b, ctx, &mut out);
  begin_directed(b, a, ctx, &mut out);
  out
}

/// Rules where `this` is the acting side.
fn begin_directed(
  this: &Participant,
  other: &Participant,
  ctx: &PolicyContext,
  out: &mut Vec<ContactReaction>,
) {
  match (this.kind, this.role) {
    (EntityKind::Avatar, FixtureRole::GroundSensor) => {
      if other.is_body() && !other.has(Capabilities::AVATAR) {
        out.push(ContactReaction::GroundTouch {
          avatar: this.owner,
          collider: other.collider,
        });
      }
    }
    (EntityKind::Avatar, FixtureRole::TopSensor) => {
      if other.is_falling_heavy(ctx.crush_speed) && !ctx.level_finished {
        out.push(ContactReaction::AvatarKilled {
          avatar: this.owner,
          cause: FailureCause::Crushed,
        });
      }
    }
    (EntityKind::Avatar, FixtureRole::Body) => avatar_body_rules(this, other, ctx, out),
    (EntityKind::Guard | EntityKind::Civilian, FixtureRole::TopSensor) => {
      if this.alive && other.is_falling_heavy(ctx.crush_speed) {
        out.push(ContactReaction::NpcKilled { npc: this.owner });
      }
    }
    _ => {}
  }
}

fn avatar_body_rules(
  avatar: &Participant,
  other: &Participant,
  ctx: &PolicyContext,
  out: &mut Vec<ContactReaction>,
) {
  if !other.is_body() {
    return;
  }

  if other.has(Capabilities::FLAMMABLE) && other.is_unlit() {
    out.push(ContactReaction::Ignite {
      target: other.owner,
    });
    if let Some(pickup) = other.pickup {
      out.push(ContactReaction::CollectFuel {
        avatar: avatar.owner,
        pickup: other.owner,
        bonus: pickup.bonus,
      });
      if let Some(index) = pickup.checkpoint {
        if ctx.last_checkpoint != Some(index) {
          out.push(ContactReaction::CheckpointReached { index });
        }
      }
    }
  }

  if other.kind.grants_spirit() && other.burn != Some(BurnState::Burnt) {
    out.push(ContactReaction::SpiritTouch {
      avatar: avatar.owner,
      collider: other.collider,
    });
  }

  if other.has(Capabilities::CLIMBABLE) {
    out.push(ContactReaction::ClimbTouch {
      avatar: avatar.owner,
      collider: other.collider,
    });
  }

  if other.has(Capabilities::HOSTILE) && other.alive && !ctx.level_finished {
    out.push(ContactReaction::AvatarKilled {
      avatar: avatar.owner,
      cause: FailureCause::CaughtByGuard,
    });
  }

  if other.has(Capabilities::GOAL) {
    out.push(ContactReaction::GoalReached);
  }
}

/// Reactions for a contact that just ended.
pub fn on_end(a: EndSide<'_>, b: EndSide<'_>) -> Vec<ContactReaction> {
  let mut out = Vec::new();

  if let (Some(pa), Some(pb)) = (a.live(), b.live()) {
    if pa.owner != pb.owner && pa.burn.is_some() && pb.burn.is_some() {
      out.push(ContactReaction::UntrackFirePair(pa.owner, pb.owner));
    }
  }

  end_directed(a, b, &mut out);
  end_directed(b, a, &mut out);
  out
}

fn end_directed(this: EndSide<'_>, other: EndSide<'_>, out: &mut Vec<ContactReaction>) {
  let Some(this) = this.live() else {
    return;
  };
  let collider = other.collider();
  match (this.kind, this.role) {
    (EntityKind::Avatar, FixtureRole::GroundSensor) => {
      out.push(ContactReaction::GroundRelease {
        avatar: this.owner,
        collider,
      });
    }
    (EntityKind::Avatar, FixtureRole::Body) => {
      // Releases are unconditional: the sets ignore colliders they never held,
      // and a stale collider has no kind left to test.
      out.push(ContactReaction::ClimbRelease {
        avatar: this.owner,
        collider,
      });
      out.push(ContactReaction::SpiritRelease {
        avatar: this.owner,
        collider,
      });
    }
    _ => {}
  }
}

/// Whether the solver should resolve a contact between `a` and `b`.
pub fn solver_enabled(a: EntityKind, b: EntityKind, spirit_mode: bool) -> bool {
  !vetoes(a, b, spirit_mode) && !vetoes(b, a, spirit_mode)
}

fn vetoes(this: EntityKind, other: EntityKind, spirit_mode: bool) -> bool {
  let mine = this.capabilities();
  let theirs = other.capabilities();

  // Fuel objects are collectible triggers for everyone.
  if theirs.contains(Capabilities::PICKUP) {
    return true;
  }
  if mine.contains(Capabilities::AVATAR) {
    if theirs.contains(Capabilities::CLIMBABLE) {
      return true;
    }
    if spirit_mode
      && theirs.contains(Capabilities::FLAMMABLE)
      && !theirs.contains(Capabilities::SUPPORT)
    {
      return true;
    }
  }
  if mine.contains(Capabilities::NPC) && theirs.contains(Capabilities::GOAL) {
    return true;
  }
  mine.contains(Capabilities::HOSTILE) && theirs.contains(Capabilities::CLIMBABLE)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn e(n: u32) -> Entity {
    Entity::from_raw_u32(n).unwrap()
  }

  fn ctx() -> PolicyContext {
    PolicyContext {
      level_finished: false,
      last_checkpoint: None,
      crush_speed: 100.0,
    }
  }

  fn avatar() -> Participant {
    Participant::new(e(1), e(1), EntityKind::Avatar, FixtureRole::Body)
  }

  fn avatar_sensor(role: FixtureRole) -> Participant {
    Participant::new(e(2), e(1), EntityKind::Avatar, role)
  }

  fn flammable(n: u32, kind: EntityKind, burn: BurnState) -> Participant {
    Participant {
      burn: Some(burn),
      ..Participant::new(e(n), e(n), kind, FixtureRole::Body)
    }
  }

  fn fuel(n: u32, bonus: f32, checkpoint: Option<usize>) -> Participant {
    Participant {
      pickup: Some(PickupInfo { bonus, checkpoint }),
      ..flammable(n, EntityKind::Fuel, BurnState::Unlit)
    }
  }

  #[test]
  fn touching_flammables_are_tracked() {
    let a = flammable(10, EntityKind::Wood, BurnState::Burning);
    let b = flammable(11, EntityKind::Wood, BurnState::Unlit);
    let reactions = on_begin(&a, &b, &ctx());
    assert_eq!(reactions, vec![ContactReaction::TrackFirePair(e(10), e(11))]);
  }

  #[test]
  fn avatar_ignites_and_collects_fuel() {
    let reactions = on_begin(&avatar(), &fuel(20, 40.0, None), &ctx());
    assert!(reactions.contains(&ContactReaction::Ignite { target: e(20) }));
    assert!(reactions.contains(&ContactReaction::CollectFuel {
      avatar: e(1),
      pickup: e(20),
      bonus: 40.0,
    }));
    assert!(reactions.contains(&ContactReaction::SpiritTouch {
      avatar: e(1),
      collider: e(20),
    }));
  }

  #[test]
  fn lit_pickup_grants_nothing() {
    let lit = Participant {
      burn: Some(BurnState::Burning),
      ..fuel(20, 40.0, Some(0))
    };
    let reactions = on_begin(&lit, &avatar(), &ctx());
    assert!(
      !reactions
        .iter()
        .any(|r| matches!(r, ContactReaction::CollectFuel { .. } | ContactReaction::Ignite { .. }))
    );
  }

  #[test]
  fn checkpoint_signalled_once() {
    let reactions = on_begin(&avatar(), &fuel(20, 10.0, Some(1)), &ctx());
    assert!(reactions.contains(&ContactReaction::CheckpointReached { index: 1 }));
  }

  #[test]
  fn saved_checkpoint_is_not_resignalled() {
    let saved = PolicyContext {
      last_checkpoint: Some(2),
      ..ctx()
    };
    let reactions = on_begin(&avatar(), &fuel(20, 10.0, Some(2)), &saved);
    assert!(
      !reactions
        .iter()
        .any(|r| matches!(r, ContactReaction::CheckpointReached { .. }))
    );
    assert!(reactions.contains(&ContactReaction::Ignite { target: e(20) }));
  }

  #[test]
  fn burnable_platform_and_rope_do_not_grant_spirit() {
    for kind in [EntityKind::BurnablePlatform, EntityKind::Rope] {
      let reactions = on_begin(&avatar(), &flammable(30, kind, BurnState::Burning), &ctx());
      assert!(
        !reactions
          .iter()
          .any(|r| matches!(r, ContactReaction::SpiritTouch { .. })),
        "{:?} must not grant spirit mode",
        kind
      );
    }
  }

  #[test]
  fn rope_is_climbed() {
    let rope = flammable(31, EntityKind::Rope, BurnState::Unlit);
    let reactions = on_begin(&rope, &avatar(), &ctx());
    assert!(reactions.contains(&ContactReaction::ClimbTouch {
      avatar: e(1),
      collider: e(31),
    }));
  }

  #[test]
  fn ground_sensor_counts_any_non_avatar_body() {
    let platform = Participant::new(e(40), e(40), EntityKind::Platform, FixtureRole::Body);
    let reactions = on_begin(&avatar_sensor(FixtureRole::GroundSensor), &platform, &ctx());
    assert_eq!(
      reactions,
      vec![ContactReaction::GroundTouch {
        avatar: e(1),
        collider: e(40),
      }]
    );
  }

  #[test]
  fn ground_release_survives_stale_collider() {
    let sensor = avatar_sensor(FixtureRole::GroundSensor);
    let reactions = on_end(EndSide::Live(&sensor), EndSide::Stale(e(41)));
    assert_eq!(
      reactions,
      vec![ContactReaction::GroundRelease {
        avatar: e(1),
        collider: e(41),
      }]
    );
  }

  #[test]
  fn live_guard_kills_dead_guard_does_not() {
    let guard = Participant::new(e(50), e(50), EntityKind::Guard, FixtureRole::Body);
    let reactions = on_begin(&avatar(), &guard, &ctx());
    assert!(reactions.contains(&ContactReaction::AvatarKilled {
      avatar: e(1),
      cause: FailureCause::CaughtByGuard,
    }));

    let dead = Participant {
      alive: false,
      ..guard
    };
    assert!(on_begin(&avatar(), &dead, &ctx()).is_empty());
  }

  #[test]
  fn no_death_after_level_complete() {
    let finished = PolicyContext {
      level_finished: true,
      ..ctx()
    };
    let guard = Participant::new(e(50), e(50), EntityKind::Guard, FixtureRole::Body);
    assert!(on_begin(&avatar(), &guard, &finished).is_empty());
  }

  #[test]
  fn falling_stone_crushes_npc_and_avatar() {
    let stone = Participant {
      velocity: Vec2::new(0.0, -250.0),
      ..Participant::new(e(60), e(60), EntityKind::Stone, FixtureRole::Body)
    };
    let npc_top = Participant::new(e(61), e(62), EntityKind::Civilian, FixtureRole::TopSensor);
    assert_eq!(
      on_begin(&stone, &npc_top, &ctx()),
      vec![ContactReaction::NpcKilled { npc: e(62) }]
    );

    let avatar_top = avatar_sensor(FixtureRole::TopSensor);
    assert_eq!(
      on_begin(&avatar_top, &stone, &ctx()),
      vec![ContactReaction::AvatarKilled {
        avatar: e(1),
        cause: FailureCause::Crushed,
      }]
    );
  }

  #[test]
  fn resting_stone_is_harmless() {
    let stone = Participant {
      velocity: Vec2::new(0.0, -20.0),
      ..Participant::new(e(60), e(60), EntityKind::Stone, FixtureRole::Body)
    };
    let npc_top = Participant::new(e(61), e(62), EntityKind::Guard, FixtureRole::TopSensor);
    assert!(on_begin(&stone, &npc_top, &ctx()).is_empty());
  }

  #[test]
  fn goal_completes_only_for_avatar() {
    let goal = Participant::new(e(70), e(70), EntityKind::Goal, FixtureRole::Body);
    assert_eq!(
      on_begin(&goal, &avatar(), &ctx()),
      vec![ContactReaction::GoalReached]
    );
    let guard = Participant::new(e(50), e(50), EntityKind::Guard, FixtureRole::Body);
    assert!(on_begin(&goal, &guard, &ctx()).is_empty());
  }

  #[test]
  fn platform_pairs_have_no_rules() {
    let a = Participant::new(e(80), e(80), EntityKind::Platform, FixtureRole::Body);
    let b = Participant::new(e(81), e(81), EntityKind::Platform, FixtureRole::Body);
    assert!(on_begin(&a, &b, &ctx()).is_empty());
    assert!(on_end(EndSide::Live(&a), EndSide::Live(&b)).is_empty());
    assert!(solver_enabled(EntityKind::Platform, EntityKind::Platform, true));
  }

  #[test]
  fn spirit_mode_ghosts_through_fire_but_not_platforms() {
    assert!(!solver_enabled(EntityKind::Avatar, EntityKind::Wood, true));
    assert!(solver_enabled(EntityKind::Avatar, EntityKind::Wood, false));
    assert!(solver_enabled(EntityKind::Avatar, EntityKind::BurnablePlatform, true));
    assert!(solver_enabled(EntityKind::BurnablePlatform, EntityKind::Avatar, true));
  }

  #[test]
  fn static_filter_rules() {
    assert!(!solver_enabled(EntityKind::Avatar, EntityKind::Rope, false));
    assert!(!solver_enabled(EntityKind::Stone, EntityKind::Fuel, false));
    assert!(!solver_enabled(EntityKind::Fuel, EntityKind::Avatar, false));
    assert!(!solver_enabled(EntityKind::Guard, EntityKind::Goal, false));
    assert!(!solver_enabled(EntityKind::Civilian, EntityKind::Goal, false));
    assert!(solver_enabled(EntityKind::Avatar, EntityKind::Goal, false));
    assert!(!solver_enabled(EntityKind::Rope, EntityKind::Guard, false));
    assert!(solver_enabled(EntityKind::Rope, EntityKind::Civilian, false));
    assert!(solver_enabled(EntityKind::Avatar, EntityKind::Guard, true));
  }
}
