//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Logical fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod math;
pub mod rules;
pub mod state;
pub mod tick;

pub use collision::{aabb_overlap, circle_overlap, radial_impulse};
pub use entity::{Boost, EdgeRule, Entity, EntityData, EntityKind, Limits};
pub use math::normalize_or_zero;
pub use state::{EffectTag, GamePhase, GameSession};
pub use tick::{Intent, TickInput, tick};
