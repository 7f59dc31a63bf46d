//! Emberwake: a 2D physics platformer about a living flame.
//!
//! The gameplay simulation (fire spread, fuel, contact rules, NPC AI) lives in
//! [`sim::GameplayPlugins`] and runs headless. Rendering, input and the rapier
//! backend are added on top by the binary.

pub mod ai;
pub mod camera;
pub mod collision;
pub mod config;
#[cfg(feature = "visual_debug")]
pub mod debug_overlay;
pub mod entity;
pub mod fire;
pub mod input;
pub mod level;
pub mod physics;
pub mod player;
pub mod render;
pub mod sim;
