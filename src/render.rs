//! Placeholder visuals: one coloured quad per gameplay object, tinted by the
//! exposed burn state.

use bevy::color::{Alpha, Mix};
use bevy::prelude::*;
use bevy_rapier2d::prelude::Collider;

use crate::ai::NpcAgent;
use crate::entity::EntityKind;
use crate::fire::Flammable;
use crate::player::AvatarState;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(
      Update,
      (attach_sprites, tint_flammables, tint_avatar, tint_npcs),
    );
  }
}

fn base_color(kind: EntityKind) -> Color {
  match kind {
    EntityKind::Avatar => Color::srgb(1.0, 0.6, 0.2),
    EntityKind::Platform => Color::srgb(0.35, 0.35, 0.4),
    EntityKind::Wood => Color::srgb(0.55, 0.35, 0.15),
    EntityKind::BurnablePlatform => Color::srgb(0.45, 0.3, 0.15),
    EntityKind::Fuel => Color::srgb(0.9, 0.8, 0.2),
    EntityKind::Rope => Color::srgb(0.7, 0.6, 0.4),
    EntityKind::Stone => Color::srgb(0.5, 0.5, 0.5),
    EntityKind::Guard => Color::srgb(0.2, 0.4, 0.9),
    EntityKind::Civilian => Color::srgb(0.4, 0.8, 0.5),
    EntityKind::Goal => Color::srgb(1.0, 1.0, 1.0),
  }
}

fn attach_sprites(
  mut commands: Commands,
  added: Query<(Entity, &EntityKind, &Collider), Added<EntityKind>>,
) {
  for (entity, kind, collider) in &added {
    let size = collider
      .as_cuboid()
      .map(|c| c.half_extents() * 2.0)
      .or_else(|| {
        collider
          .as_capsule()
          .map(|c| Vec2::new(c.radius() * 2.0, c.height() + c.radius() * 2.0))
      })
      .unwrap_or(Vec2::splat(16.0));
    commands
      .entity(entity)
      .insert(Sprite::from_color(base_color(*kind), size));
  }
}

fn tint_flammables(mut flammables: Query<(&Flammable, &EntityKind, &mut Sprite), Changed<Flammable>>) {
  for (flammable, kind, mut sprite) in &mut flammables {
    if flammable.is_burning() {
      let heat = 1.0 - flammable.burn_ratio();
      sprite.color = base_color(*kind).mix(&Color::srgb(1.0, 0.25, 0.0), 0.5 + heat * 0.5);
    }
  }
}

fn tint_avatar(mut avatars: Query<(&AvatarState, &mut Sprite), Changed<AvatarState>>) {
  for (state, mut sprite) in &mut avatars {
    let alpha = if state.spirit_mode { 0.5 } else { 1.0 };
    sprite.color = base_color(EntityKind::Avatar).with_alpha(alpha);
  }
}

fn tint_npcs(mut npcs: Query<(&NpcAgent, &EntityKind, &mut Sprite), Changed<NpcAgent>>) {
  for (agent, kind, mut sprite) in &mut npcs {
    if !agent.alive {
      sprite.color = base_color(*kind).with_alpha(0.3);
    }
  }
}
