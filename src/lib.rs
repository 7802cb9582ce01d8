//! Arcade Sim - frame-stepped 2D entity simulation for small canvas games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `config`: Per-variant tuning, validated before a session starts
//! - `input`: Pointer events to player intents
//! - `render`: Draw command stream consumed by a presentation sink
//! - `platform`: Browser canvas sink (wasm32 only)

pub mod config;
pub mod input;
pub mod platform;
pub mod render;
pub mod sim;

pub use config::{Bounds, ConfigError, GameConfig, Span, Variant};
pub use input::{InputAdapter, InputEvent};
pub use render::{DrawCmd, DrawList, PresentationSink, render};
pub use sim::{GamePhase, GameSession, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// One logical simulation step. Motion is expressed in pixels per tick.
    pub const TICK_DT: f32 = 1.0;
    /// Below this length a direction vector is treated as zero
    pub const NORMALIZE_EPSILON: f32 = 1e-6;

    /// Chomper defaults
    pub const CHOMPER_WIDTH: f32 = 800.0;
    pub const CHOMPER_HEIGHT: f32 = 600.0;
    pub const PLAYER_START_RADIUS: f32 = 30.0;
    pub const PLAYER_MIN_RADIUS: f32 = 15.0;
    pub const PLAYER_MAX_RADIUS: f32 = 90.0;
    pub const PLAYER_BASE_SPEED: f32 = 3.0;
    pub const PLAYER_BOOST_SPEED: f32 = 7.0;
    pub const PLAYER_GROW: f32 = 2.0;
    pub const PLAYER_SHRINK: f32 = 3.0;
    pub const PLAYER_BOOST_MAX_FRAMES: u32 = 20;
    pub const FOOD_COUNT: u32 = 20;
    pub const POISON_COUNT: u32 = 8;
    pub const POISON_THRESHOLD: u32 = 10;

    /// Fuego Fury defaults
    pub const FUEGO_WIDTH: f32 = 800.0;
    pub const FUEGO_HEIGHT: f32 = 600.0;
    pub const CATCHER_WIDTH: f32 = 150.0;
    pub const CATCHER_HEIGHT: f32 = 100.0;
    /// Catcher centre sits this far above the bottom edge
    pub const CATCHER_LIFT: f32 = 120.0;
    pub const FALLING_SIZE: f32 = 40.0;
    pub const FALLING_SPAWN_MARGIN: f32 = 80.0;
    pub const FALLING_SPAWN_Y: f32 = -50.0;
    pub const EFFECT_DURATION_FRAMES: u32 = 20;
    pub const MISS_THRESHOLD: u32 = 10;
    pub const SPARK_LIFE: u32 = 30;
    pub const SPARK_DRAG: f32 = 0.95;
    pub const SPARK_BURST: u32 = 200;
    pub const SPARK_AMBIENT_INTERVAL: u64 = 2;
    pub const SPARK_AMBIENT_POINTS: u32 = 3;
    pub const SPARK_AMBIENT_PER_POINT: u32 = 2;
    /// Maximum live sparks
    pub const MAX_SPARKS: usize = 512;

    /// Ricochet defaults
    pub const RICOCHET_SIZE: f32 = 600.0;
    pub const ORB_COUNT: u32 = 10;
    pub const SHOCK_GROWTH: f32 = 8.0;
    pub const SHOCK_MAX_RADIUS: f32 = 200.0;
    /// Impulse at the ring centre and at the ring edge
    pub const SHOCK_FORCE_NEAR: f32 = 4.0;
    pub const SHOCK_FORCE_FAR: f32 = 0.5;

    /// Rocket Boost defaults
    pub const ROCKET_WIDTH: f32 = 500.0;
    pub const ROCKET_HEIGHT: f32 = 700.0;
    pub const STAR_COUNT: u32 = 80;
    pub const STAR_RADIUS: f32 = 1.5;
    pub const ROCKET_SPEED: f32 = 3.0;
    pub const ROCKET_BOOST_SPEED: f32 = 8.0;
    pub const ROCKET_BOOST_MAX_FRAMES: u32 = 90;
    /// Rocket re-enters this far below the bottom edge
    pub const ROCKET_ENTRY_OFFSET: f32 = 150.0;
    /// Rocket loops once its centre rises above this y
    pub const ROCKET_EXIT_Y: f32 = -200.0;
    pub const FLAME_MIN: f32 = 40.0;
    pub const FLAME_MAX: f32 = 70.0;
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Re-map `value` from `[in_min, in_max]` onto `[out_min, out_max]` (unclamped)
#[inline]
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span.abs() < consts::NORMALIZE_EPSILON {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}
