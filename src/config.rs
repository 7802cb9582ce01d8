//! Per-variant game configuration
//!
//! Defaults match the tuning each game shipped with. Every session validates its
//! config up front so a bad document never reaches the simulation.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration errors, raised before a session is constructed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("bounds must be positive and finite, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
    #[error("{field}: range [{min}, {max}] is empty, negative or not finite")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be at least 1")]
    ZeroCount { field: &'static str },
    #[error("{field}: extent {extent} does not fit inside {width}x{height}")]
    DoesNotFit {
        field: &'static str,
        extent: f32,
        width: f32,
        height: f32,
    },
    #[error("unknown game variant `{0}`")]
    UnknownVariant(String),
    #[error("invalid config document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Canvas extent. The origin is the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Fails unless a box of `extent` fits inside on both axes
    fn check_fits(&self, field: &'static str, extent: f32) -> Result<(), ConfigError> {
        if extent <= self.width && extent <= self.height {
            Ok(())
        } else {
            Err(ConfigError::DoesNotFit {
                field,
                extent,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Closed interval `[min, max]`, serialized as a two-element array
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate span holding a single value
    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Uniform draw from the span (returns `min` for a degenerate span)
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    /// Finite, ordered, and narrow enough that its width is finite too, so
    /// `sample` can draw from it
    fn is_ordered(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && (self.max - self.min).is_finite()
    }

    fn check_ordered(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.is_ordered() {
            Ok(())
        } else {
            Err(self.invalid(field))
        }
    }

    fn check_non_negative(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.is_ordered() && self.min >= 0.0 {
            Ok(())
        } else {
            Err(self.invalid(field))
        }
    }

    fn check_positive(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.is_ordered() && self.min > 0.0 {
            Ok(())
        } else {
            Err(self.invalid(field))
        }
    }

    fn invalid(&self, field: &'static str) -> ConfigError {
        ConfigError::InvalidRange {
            field,
            min: self.min,
            max: self.max,
        }
    }
}

impl From<[f32; 2]> for Span {
    fn from([min, max]: [f32; 2]) -> Self {
        Self { min, max }
    }
}

impl From<Span> for [f32; 2] {
    fn from(span: Span) -> Self {
        [span.min, span.max]
    }
}

/// How many entities of one kind to spawn, and with which speed and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub entity_count: u32,
    pub speed_range: Span,
    pub radius_range: Span,
}

impl SpawnConfig {
    pub const fn new(entity_count: u32, speed_range: Span, radius_range: Span) -> Self {
        Self {
            entity_count,
            speed_range,
            radius_range,
        }
    }

    fn validate(&self, speed_field: &'static str, radius_field: &'static str) -> Result<(), ConfigError> {
        self.speed_range.check_non_negative(speed_field)?;
        self.radius_range.check_positive(radius_field)
    }
}

fn check_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn check_count(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroCount { field })
    } else {
        Ok(())
    }
}

/// Blob that eats food and dodges poison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChomperConfig {
    pub bounds: Bounds,
    pub player_start_radius: f32,
    pub player_radius_range: Span,
    pub base_speed: f32,
    pub boost_speed: f32,
    pub boost_max_frames: u32,
    /// Radius gained per food eaten
    pub grow: f32,
    /// Radius lost per poison hit
    pub shrink: f32,
    pub food: SpawnConfig,
    pub poison: SpawnConfig,
    /// Poison hits that end the run
    pub penalty_threshold: u32,
}

impl Default for ChomperConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(CHOMPER_WIDTH, CHOMPER_HEIGHT),
            player_start_radius: PLAYER_START_RADIUS,
            player_radius_range: Span::new(PLAYER_MIN_RADIUS, PLAYER_MAX_RADIUS),
            base_speed: PLAYER_BASE_SPEED,
            boost_speed: PLAYER_BOOST_SPEED,
            boost_max_frames: PLAYER_BOOST_MAX_FRAMES,
            grow: PLAYER_GROW,
            shrink: PLAYER_SHRINK,
            food: SpawnConfig::new(FOOD_COUNT, Span::new(0.3, 1.2), Span::new(10.0, 18.0)),
            poison: SpawnConfig::new(POISON_COUNT, Span::new(0.5, 1.5), Span::new(14.0, 22.0)),
            penalty_threshold: POISON_THRESHOLD,
        }
    }
}

impl ChomperConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        self.player_radius_range.check_positive("player_radius_range")?;
        if !self.player_radius_range.contains(self.player_start_radius) {
            return Err(ConfigError::InvalidRange {
                field: "player_start_radius",
                min: self.player_start_radius,
                max: self.player_start_radius,
            });
        }
        self.bounds
            .check_fits("player_radius_range", self.player_radius_range.max * 2.0)?;
        check_positive("base_speed", self.base_speed)?;
        check_positive("boost_speed", self.boost_speed)?;
        check_count("boost_max_frames", self.boost_max_frames)?;
        if !(self.grow.is_finite() && self.grow >= 0.0) {
            return Err(ConfigError::NonPositive { field: "grow", value: self.grow });
        }
        if !(self.shrink.is_finite() && self.shrink >= 0.0) {
            return Err(ConfigError::NonPositive { field: "shrink", value: self.shrink });
        }
        self.food.validate("food.speed_range", "food.radius_range")?;
        self.poison.validate("poison.speed_range", "poison.radius_range")?;
        check_count("penalty_threshold", self.penalty_threshold)
    }
}

/// Spark emitter tuning for the catch game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparkConfig {
    pub life_frames: u32,
    /// Velocity multiplier applied every tick
    pub drag: f32,
    pub size_range: Span,
    /// Horizontal launch velocity
    pub drift_range: Span,
    /// Vertical launch velocity (negative is up)
    pub rise_range: Span,
    pub burst: u32,
    pub ambient_interval: u64,
    pub ambient_points: u32,
    pub ambient_per_point: u32,
    pub max_sparks: usize,
}

impl Default for SparkConfig {
    fn default() -> Self {
        Self {
            life_frames: SPARK_LIFE,
            drag: SPARK_DRAG,
            size_range: Span::new(4.0, 8.0),
            drift_range: Span::new(-1.0, 1.0),
            rise_range: Span::new(-3.0, -1.0),
            burst: SPARK_BURST,
            ambient_interval: SPARK_AMBIENT_INTERVAL,
            ambient_points: SPARK_AMBIENT_POINTS,
            ambient_per_point: SPARK_AMBIENT_PER_POINT,
            max_sparks: MAX_SPARKS,
        }
    }
}

impl SparkConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_count("spark.life_frames", self.life_frames)?;
        if !(self.drag.is_finite() && self.drag > 0.0 && self.drag <= 1.0) {
            return Err(ConfigError::NonPositive { field: "spark.drag", value: self.drag });
        }
        self.size_range.check_positive("spark.size_range")?;
        self.drift_range.check_ordered("spark.drift_range")?;
        self.rise_range.check_ordered("spark.rise_range")?;
        if self.ambient_interval == 0 {
            return Err(ConfigError::ZeroCount { field: "spark.ambient_interval" });
        }
        Ok(())
    }
}

/// Move the catcher under falling objects before they leave the screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuegoFuryConfig {
    pub bounds: Bounds,
    pub catcher_size: Vec2,
    /// Distance from the bottom edge to the catcher centre
    pub catcher_lift: f32,
    pub falling_size: Vec2,
    pub fall_speed_range: Span,
    /// Horizontal keep-out at each edge for new falling objects
    pub spawn_margin: f32,
    pub spawn_y: f32,
    pub effect_duration_frames: u32,
    /// Misses that end the run
    pub penalty_threshold: u32,
    pub spark: SparkConfig,
}

impl Default for FuegoFuryConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(FUEGO_WIDTH, FUEGO_HEIGHT),
            catcher_size: Vec2::new(CATCHER_WIDTH, CATCHER_HEIGHT),
            catcher_lift: CATCHER_LIFT,
            falling_size: Vec2::splat(FALLING_SIZE),
            fall_speed_range: Span::new(2.0, 8.0),
            spawn_margin: FALLING_SPAWN_MARGIN,
            spawn_y: FALLING_SPAWN_Y,
            effect_duration_frames: EFFECT_DURATION_FRAMES,
            penalty_threshold: MISS_THRESHOLD,
            spark: SparkConfig::default(),
        }
    }
}

impl FuegoFuryConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        check_positive("catcher_size.x", self.catcher_size.x)?;
        check_positive("catcher_size.y", self.catcher_size.y)?;
        check_positive("falling_size.x", self.falling_size.x)?;
        check_positive("falling_size.y", self.falling_size.y)?;
        // Ambient sparks are drawn from the catcher's top edge
        if self.catcher_size.x > self.bounds.width {
            return Err(ConfigError::DoesNotFit {
                field: "catcher_size",
                extent: self.catcher_size.x,
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        if !(self.catcher_lift.is_finite() && self.catcher_lift >= 0.0) {
            return Err(ConfigError::NonPositive { field: "catcher_lift", value: self.catcher_lift });
        }
        // Fall speed must be strictly positive or an object could hang forever
        self.fall_speed_range.check_positive("fall_speed_range")?;
        if !(self.spawn_margin.is_finite() && self.spawn_margin >= 0.0) {
            return Err(ConfigError::NonPositive { field: "spawn_margin", value: self.spawn_margin });
        }
        if self.spawn_margin * 2.0 > self.bounds.width {
            return Err(ConfigError::DoesNotFit {
                field: "spawn_margin",
                extent: self.spawn_margin * 2.0,
                width: self.bounds.width,
                height: self.bounds.height,
            });
        }
        if !self.spawn_y.is_finite() {
            return Err(ConfigError::NonPositive { field: "spawn_y", value: self.spawn_y });
        }
        check_count("effect_duration_frames", self.effect_duration_frames)?;
        check_count("penalty_threshold", self.penalty_threshold)?;
        self.spark.validate()
    }
}

/// Orbs bouncing around a box, pushed by click shockwaves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RicochetConfig {
    pub bounds: Bounds,
    pub orbs: SpawnConfig,
    pub shock_growth: f32,
    pub shock_max_radius: f32,
    /// Impulse applied at distance zero
    pub force_near: f32,
    /// Impulse applied at the ring edge
    pub force_far: f32,
}

impl Default for RicochetConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(RICOCHET_SIZE, RICOCHET_SIZE),
            orbs: SpawnConfig::new(ORB_COUNT, Span::new(2.0, 4.0), Span::new(15.0, 30.0)),
            shock_growth: SHOCK_GROWTH,
            shock_max_radius: SHOCK_MAX_RADIUS,
            force_near: SHOCK_FORCE_NEAR,
            force_far: SHOCK_FORCE_FAR,
        }
    }
}

impl RicochetConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        self.orbs.validate("orbs.speed_range", "orbs.radius_range")?;
        self.bounds.check_fits("orbs.radius_range", self.orbs.radius_range.max * 2.0)?;
        check_positive("shock_growth", self.shock_growth)?;
        check_positive("shock_max_radius", self.shock_max_radius)?;
        Span::new(self.force_far.min(self.force_near), self.force_far.max(self.force_near))
            .check_non_negative("force_near/force_far")
    }
}

/// Rocket climbing through a falling starfield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RocketBoostConfig {
    pub bounds: Bounds,
    pub stars: SpawnConfig,
    pub rocket_speed: f32,
    pub boost_speed: f32,
    pub boost_max_frames: u32,
    pub entry_offset: f32,
    pub exit_y: f32,
    pub flame_range: Span,
}

impl Default for RocketBoostConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(ROCKET_WIDTH, ROCKET_HEIGHT),
            stars: SpawnConfig::new(STAR_COUNT, Span::new(0.5, 2.0), Span::fixed(STAR_RADIUS)),
            rocket_speed: ROCKET_SPEED,
            boost_speed: ROCKET_BOOST_SPEED,
            boost_max_frames: ROCKET_BOOST_MAX_FRAMES,
            entry_offset: ROCKET_ENTRY_OFFSET,
            exit_y: ROCKET_EXIT_Y,
            flame_range: Span::new(FLAME_MIN, FLAME_MAX),
        }
    }
}

impl RocketBoostConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        self.stars.validate("stars.speed_range", "stars.radius_range")?;
        check_positive("rocket_speed", self.rocket_speed)?;
        check_positive("boost_speed", self.boost_speed)?;
        check_count("boost_max_frames", self.boost_max_frames)?;
        if !(self.entry_offset.is_finite() && self.exit_y.is_finite())
            || self.exit_y >= self.bounds.height + self.entry_offset
        {
            return Err(ConfigError::InvalidRange {
                field: "exit_y/entry_offset",
                min: self.exit_y,
                max: self.bounds.height + self.entry_offset,
            });
        }
        self.flame_range.check_non_negative("flame_range")
    }
}

/// The four hosted games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Chomper,
    FuegoFury,
    Ricochet,
    RocketBoost,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Chomper,
        Variant::FuegoFury,
        Variant::Ricochet,
        Variant::RocketBoost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Chomper => "chomper",
            Variant::FuegoFury => "fuego-fury",
            Variant::Ricochet => "ricochet",
            Variant::RocketBoost => "rocket-boost",
        }
    }

    pub fn default_config(&self) -> GameConfig {
        match self {
            Variant::Chomper => GameConfig::Chomper(ChomperConfig::default()),
            Variant::FuegoFury => GameConfig::FuegoFury(FuegoFuryConfig::default()),
            Variant::Ricochet => GameConfig::Ricochet(RicochetConfig::default()),
            Variant::RocketBoost => GameConfig::RocketBoost(RocketBoostConfig::default()),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chomper" => Ok(Variant::Chomper),
            "fuego-fury" | "fuegofury" | "fuego" => Ok(Variant::FuegoFury),
            "ricochet" => Ok(Variant::Ricochet),
            "rocket-boost" | "rocketboost" | "rocket" => Ok(Variant::RocketBoost),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Full configuration of one game, tagged by variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum GameConfig {
    Chomper(ChomperConfig),
    FuegoFury(FuegoFuryConfig),
    Ricochet(RicochetConfig),
    RocketBoost(RocketBoostConfig),
}

impl Default for GameConfig {
    fn default() -> Self {
        Variant::Chomper.default_config()
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn variant(&self) -> Variant {
        match self {
            GameConfig::Chomper(_) => Variant::Chomper,
            GameConfig::FuegoFury(_) => Variant::FuegoFury,
            GameConfig::Ricochet(_) => Variant::Ricochet,
            GameConfig::RocketBoost(_) => Variant::RocketBoost,
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            GameConfig::Chomper(c) => c.bounds,
            GameConfig::FuegoFury(c) => c.bounds,
            GameConfig::Ricochet(c) => c.bounds,
            GameConfig::RocketBoost(c) => c.bounds,
        }
    }

    /// Counter value that ends the run, if this variant can be lost
    pub fn penalty_threshold(&self) -> Option<u32> {
        match self {
            GameConfig::Chomper(c) => Some(c.penalty_threshold),
            GameConfig::FuegoFury(c) => Some(c.penalty_threshold),
            GameConfig::Ricochet(_) | GameConfig::RocketBoost(_) => None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            GameConfig::Chomper(c) => c.validate(),
            GameConfig::FuegoFury(c) => c.validate(),
            GameConfig::Ricochet(c) => c.validate(),
            GameConfig::RocketBoost(c) => c.validate(),
        }
    }
}
