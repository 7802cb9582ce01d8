//! Game session and phase machine
//!
//! A `GameSession` exclusively owns its entities and its RNG. It is only
//! mutated by `tick()` (and `restart()`), never through globals.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, Limits};
use crate::config::{Bounds, ConfigError, GameConfig, Variant};
use crate::lerp;

/// Why the session is animating an entity out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTag {
    Caught,
    Missed,
}

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Non-interactive vanish animation before a respawn
    EffectTransition(EffectTag),
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// One running game instance
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: GameConfig,
    /// Seed the session RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub score: u64,
    /// Poison hits or missed catches, depending on the variant
    pub miss_counter: u32,
    pub phase: GamePhase,
    pub effect_frames_remaining: u32,
    /// Entity being animated out during `EffectTransition`
    pub effect_target: Option<u32>,
    /// Ticks since the session (re)started
    pub time_ticks: u64,
    /// Live entities, ordered by id
    pub entities: Vec<Entity>,
    next_id: u32,
}

impl GameSession {
    /// Validate `config` and build a fresh session seeded with `seed`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            miss_counter: 0,
            phase: GamePhase::Playing,
            effect_frames_remaining: 0,
            effect_target: None,
            time_ticks: 0,
            entities: Vec::new(),
            next_id: 1,
        };
        session.populate();
        log::info!(
            "{} session started (seed {}, {} entities)",
            session.variant(),
            seed,
            session.entities.len()
        );
        Ok(session)
    }

    /// Session with the variant's default configuration
    pub fn with_variant(variant: Variant, seed: u64) -> Result<Self, ConfigError> {
        Self::new(variant.default_config(), seed)
    }

    pub fn variant(&self) -> Variant {
        self.config.variant()
    }

    pub fn bounds(&self) -> Bounds {
        self.config.bounds()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Throw away every entity and spawn the variant's initial set
    fn populate(&mut self) {
        self.entities.clear();
        let bounds = self.bounds();
        match self.config.clone() {
            GameConfig::Chomper(c) => {
                let id = self.next_entity_id();
                self.entities.push(Entity::player(
                    id,
                    &bounds,
                    c.player_start_radius,
                    c.player_radius_range,
                    c.base_speed,
                    c.boost_speed,
                    c.boost_max_frames,
                ));
                for (kind, spawn) in [(EntityKind::Food, c.food), (EntityKind::Poison, c.poison)] {
                    let limits = Limits::new(spawn.speed_range, spawn.radius_range);
                    for _ in 0..spawn.entity_count {
                        let id = self.next_entity_id();
                        let e = Entity::drifter(id, kind, limits, &bounds, &mut self.rng);
                        self.entities.push(e);
                    }
                }
            }
            GameConfig::FuegoFury(c) => {
                let id = self.next_entity_id();
                self.entities
                    .push(Entity::catcher(id, &bounds, c.catcher_size, c.catcher_lift));
                let id = self.next_entity_id();
                let falling = Entity::falling(
                    id,
                    c.falling_size,
                    c.fall_speed_range,
                    c.spawn_margin,
                    c.spawn_y,
                    &bounds,
                    &mut self.rng,
                );
                self.entities.push(falling);
            }
            GameConfig::Ricochet(c) => {
                let limits = Limits::new(c.orbs.speed_range, c.orbs.radius_range);
                for _ in 0..c.orbs.entity_count {
                    let id = self.next_entity_id();
                    let orb = Entity::orb(id, limits, &bounds, &mut self.rng);
                    self.entities.push(orb);
                }
            }
            GameConfig::RocketBoost(c) => {
                let limits = Limits::new(c.stars.speed_range, c.stars.radius_range);
                for _ in 0..c.stars.entity_count {
                    let id = self.next_entity_id();
                    let star = Entity::star(id, limits, &bounds, &mut self.rng);
                    self.entities.push(star);
                }
                let id = self.next_entity_id();
                self.entities.push(Entity::rocket(
                    id,
                    &bounds,
                    c.rocket_speed,
                    c.boost_speed,
                    c.boost_max_frames,
                    c.entry_offset,
                    c.exit_y,
                    c.flame_range,
                ));
            }
        }
    }

    /// Reset counters and respawn everything; the RNG stream continues
    pub fn restart(&mut self) {
        self.score = 0;
        self.miss_counter = 0;
        self.phase = GamePhase::Playing;
        self.effect_frames_remaining = 0;
        self.effect_target = None;
        self.time_ticks = 0;
        self.populate();
        log::info!("{} session restarted", self.variant());
    }

    /// Whether the session still accepts gameplay input
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// First entity of a kind (player, catcher, rocket, falling object)
    pub fn find(&self, kind: EntityKind) -> Option<&Entity> {
        self.entities.iter().find(|e| e.kind == kind)
    }

    pub fn find_mut(&mut self, kind: EntityKind) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.kind == kind)
    }

    pub(crate) fn index_of(&self, kind: EntityKind) -> Option<usize> {
        self.entities.iter().position(|e| e.kind == kind)
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Start the vanish animation for `target`
    pub(crate) fn enter_effect(&mut self, tag: EffectTag, target: u32, duration: u32) {
        self.phase = GamePhase::EffectTransition(tag);
        self.effect_frames_remaining = duration;
        self.effect_target = Some(target);
        log::debug!("effect {:?} on entity {} for {} frames", tag, target, duration);
    }

    pub(crate) fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        self.effect_frames_remaining = 0;
        self.effect_target = None;
        log::info!(
            "{} game over: score {}, misses {}",
            self.variant(),
            self.score,
            self.miss_counter
        );
    }

    /// Vanish progress in [0, 1]; 0 outside an effect
    pub fn effect_progress(&self) -> f32 {
        let duration = match &self.config {
            GameConfig::FuegoFury(c) => c.effect_duration_frames,
            _ => return 0.0,
        };
        if !matches!(self.phase, GamePhase::EffectTransition(_)) {
            return 0.0;
        }
        (1.0 - self.effect_frames_remaining as f32 / duration as f32).clamp(0.0, 1.0)
    }

    /// Scale and alpha (0-255) of the entity being animated out
    pub fn effect_visual(&self) -> (f32, f32) {
        let t = self.effect_progress();
        (lerp(1.0, 0.0, t), lerp(255.0, 0.0, t))
    }

    /// Check radius and bounds invariants. A violation is a programming
    /// error: fatal in debug builds, clamped and logged otherwise.
    /// Returns the number of corrections made.
    pub fn enforce_invariants(&mut self) -> usize {
        let bounds = self.bounds();
        let mut corrected = 0;
        for e in &mut self.entities {
            if e.behavior().bounded_radius && !e.limits.radius.contains(e.radius) {
                invariant_fault(format_args!(
                    "{:?} #{} radius {} outside {:?}",
                    e.kind, e.id, e.radius, e.limits.radius
                ));
                e.radius = e.limits.radius.clamp(e.radius);
                corrected += 1;
            }
            if !e.in_bounds(&bounds) {
                invariant_fault(format_args!(
                    "{:?} #{} at {} left the canvas",
                    e.kind, e.id, e.pos
                ));
                e.confine(&bounds);
                corrected += 1;
            }
        }
        corrected
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.entities.sort_by_key(|e| e.id);
    }
}

#[cfg(debug_assertions)]
fn invariant_fault(msg: std::fmt::Arguments<'_>) {
    panic!("simulation invariant violated: {msg}");
}

#[cfg(not(debug_assertions))]
fn invariant_fault(msg: std::fmt::Arguments<'_>) {
    log::warn!("simulation invariant violated, clamping: {msg}");
}
