//! Entities and the per-kind behaviour table
//!
//! Every simulated actor is one `Entity` value: shared motion fields plus a
//! kind-specific payload. Per-kind rules are looked up in a static table
//! instead of going through trait objects.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::math::{random_heading, reflect_axis, steer_direction, wrap_axis};
use crate::config::{Bounds, SparkConfig, Span};

/// Entity kinds, in dispatch table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Steerable blob (chomper)
    Player,
    /// Pointer-tracking box (fuego fury)
    Catcher,
    Food,
    Poison,
    /// Bouncing ball (ricochet)
    Orb,
    /// Expanding ring that pushes orbs
    Shockwave,
    /// Short-lived particle
    Spark,
    FallingObject,
    Rocket,
    Star,
}

impl EntityKind {
    pub const COUNT: usize = 10;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// How an entity is kept inside the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeRule {
    /// Leaves one edge, re-enters at the opposite one; position in `[-r, extent + r]`
    Wrap,
    /// Bounces: velocity sign flips, position clamped into `[r, extent - r]`
    Reflect,
    /// Position clamped into `[r, extent - r]`
    Clamp,
    /// Centre x follows a target clamped to `[0, width]`, y is fixed
    TrackX,
    /// Falls freely; leaving the bottom is a game event, not an edge rule
    Fall,
    /// Vertical loop with off-screen entry and exit lines
    Loop,
    /// Does not move
    Fixed,
}

/// Timed boost, auto-released after `max_frames`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boost {
    pub active: bool,
    pub frames: u32,
    pub max_frames: u32,
}

impl Boost {
    pub fn new(max_frames: u32) -> Self {
        Self {
            active: false,
            frames: 0,
            max_frames,
        }
    }

    /// Start (or restart) the boost
    pub fn activate(&mut self) {
        self.active = true;
        self.frames = 0;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Count one frame of boost; ends once the counter passes the cap
    pub fn advance(&mut self) {
        if self.active {
            self.frames += 1;
            if self.frames > self.max_frames {
                self.active = false;
            }
        }
    }
}

/// Spawn ranges an entity is re-rolled from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub speed: Span,
    pub radius: Span,
}

impl Limits {
    pub fn new(speed: Span, radius: Span) -> Self {
        Self { speed, radius }
    }

    pub fn fixed(speed: f32, radius: f32) -> Self {
        Self::new(Span::fixed(speed), Span::fixed(radius))
    }
}

/// Kind-specific state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityData {
    None,
    Blob {
        target: Vec2,
        start_radius: f32,
        base_speed: f32,
        boost_speed: f32,
        boost: Boost,
    },
    Catcher {
        target_x: f32,
        half_extents: Vec2,
        lift: f32,
    },
    Orb {
        hue: f32,
    },
    Shockwave {
        growth: f32,
        max_radius: f32,
    },
    Spark {
        max_life: u32,
        drag: f32,
        /// Green channel of the spark colour, fixed at emission
        glow: u8,
    },
    Falling {
        half_extents: Vec2,
        spawn_margin: f32,
        spawn_y: f32,
    },
    Rocket {
        base_speed: f32,
        boost_speed: f32,
        boost: Boost,
        entry_offset: f32,
        exit_y: f32,
        flame: f32,
        flame_range: Span,
    },
}

/// A simulated actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub limits: Limits,
    /// Ticks left for ephemeral entities
    pub life: Option<u32>,
    pub data: EntityData,
}

/// Per-tick motion rule for one kind
pub type StepFn = fn(&mut Entity, f32, &Bounds, &mut Pcg32);

/// Behaviour shared by every entity of one kind
pub struct KindBehavior {
    pub edge: EdgeRule,
    pub step: StepFn,
    /// Radius must stay inside `limits.radius` after every update
    pub bounded_radius: bool,
}

static BEHAVIORS: [KindBehavior; EntityKind::COUNT] = [
    // Player
    KindBehavior { edge: EdgeRule::Clamp, step: step_blob, bounded_radius: true },
    // Catcher
    KindBehavior { edge: EdgeRule::TrackX, step: step_catcher, bounded_radius: true },
    // Food
    KindBehavior { edge: EdgeRule::Wrap, step: step_drifter, bounded_radius: true },
    // Poison
    KindBehavior { edge: EdgeRule::Wrap, step: step_drifter, bounded_radius: true },
    // Orb
    KindBehavior { edge: EdgeRule::Reflect, step: step_orb, bounded_radius: true },
    // Shockwave
    KindBehavior { edge: EdgeRule::Fixed, step: step_shockwave, bounded_radius: false },
    // Spark
    KindBehavior { edge: EdgeRule::Wrap, step: step_spark, bounded_radius: true },
    // FallingObject
    KindBehavior { edge: EdgeRule::Fall, step: step_falling, bounded_radius: true },
    // Rocket
    KindBehavior { edge: EdgeRule::Loop, step: step_rocket, bounded_radius: true },
    // Star
    KindBehavior { edge: EdgeRule::Wrap, step: step_star, bounded_radius: true },
];

/// Look up the behaviour of a kind
#[inline]
pub fn behavior(kind: EntityKind) -> &'static KindBehavior {
    &BEHAVIORS[kind.index()]
}

fn step_blob(e: &mut Entity, dt: f32, bounds: &Bounds, _rng: &mut Pcg32) {
    if let EntityData::Blob {
        target,
        base_speed,
        boost_speed,
        ref mut boost,
        ..
    } = e.data
    {
        let speed = if boost.active { boost_speed } else { base_speed };
        e.vel = steer_direction(e.pos, target) * speed;
        e.pos += e.vel * dt;
        boost.advance();
    }
    e.confine(bounds);
}

fn step_catcher(e: &mut Entity, _dt: f32, bounds: &Bounds, _rng: &mut Pcg32) {
    if let EntityData::Catcher { target_x, lift, .. } = e.data {
        e.pos = Vec2::new(target_x.clamp(0.0, bounds.width), bounds.height - lift);
        e.vel = Vec2::ZERO;
    }
}

fn step_drifter(e: &mut Entity, dt: f32, bounds: &Bounds, _rng: &mut Pcg32) {
    e.pos += e.vel * dt;
    e.confine(bounds);
}

fn step_orb(e: &mut Entity, dt: f32, bounds: &Bounds, _rng: &mut Pcg32) {
    e.pos += e.vel * dt;
    reflect_axis(&mut e.pos.x, &mut e.vel.x, e.radius, bounds.width);
    reflect_axis(&mut e.pos.y, &mut e.vel.y, e.radius, bounds.height);
}

fn step_shockwave(e: &mut Entity, dt: f32, _bounds: &Bounds, _rng: &mut Pcg32) {
    if let EntityData::Shockwave { growth, .. } = e.data {
        e.radius += growth * dt;
    }
}

fn step_spark(e: &mut Entity, dt: f32, bounds: &Bounds, _rng: &mut Pcg32) {
    e.pos += e.vel * dt;
    if let EntityData::Spark { drag, .. } = e.data {
        e.vel *= drag;
    }
    if let Some(life) = e.life.as_mut() {
        *life = life.saturating_sub(1);
    }
    e.confine(bounds);
}

fn step_falling(e: &mut Entity, dt: f32, _bounds: &Bounds, _rng: &mut Pcg32) {
    e.pos += e.vel * dt;
}

fn step_rocket(e: &mut Entity, dt: f32, bounds: &Bounds, rng: &mut Pcg32) {
    if let EntityData::Rocket {
        base_speed,
        boost_speed,
        ref mut boost,
        entry_offset,
        exit_y,
        ref mut flame,
        flame_range,
    } = e.data
    {
        let speed = if boost.active { boost_speed } else { base_speed };
        e.vel = Vec2::new(0.0, -speed);
        e.pos += e.vel * dt;
        if e.pos.y < exit_y {
            e.pos.y = bounds.height + entry_offset;
        }
        *flame = flame_range.sample(rng);
        boost.advance();
    }
}

fn step_star(e: &mut Entity, dt: f32, bounds: &Bounds, rng: &mut Pcg32) {
    e.pos += e.vel * dt;
    if e.pos.y > bounds.height {
        e.pos.y = 0.0;
        e.pos.x = rng.random_range(0.0..=bounds.width);
    }
}

impl Entity {
    fn base(id: u32, kind: EntityKind, limits: Limits, data: EntityData) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: limits.radius.min,
            limits,
            life: None,
            data,
        }
    }

    /// Steerable blob centred in the canvas
    pub fn player(
        id: u32,
        bounds: &Bounds,
        start_radius: f32,
        radius_range: Span,
        base_speed: f32,
        boost_speed: f32,
        boost_max_frames: u32,
    ) -> Self {
        let mut e = Self::base(
            id,
            EntityKind::Player,
            Limits::new(Span::new(0.0, boost_speed), radius_range),
            EntityData::Blob {
                target: bounds.center(),
                start_radius,
                base_speed,
                boost_speed,
                boost: Boost::new(boost_max_frames),
            },
        );
        e.radius = start_radius;
        e.pos = bounds.center();
        e
    }

    /// Box that follows the pointer along the bottom of the canvas
    pub fn catcher(id: u32, bounds: &Bounds, size: Vec2, lift: f32) -> Self {
        let half_extents = size * 0.5;
        let mut e = Self::base(
            id,
            EntityKind::Catcher,
            Limits::fixed(0.0, half_extents.x),
            EntityData::Catcher {
                target_x: bounds.center().x,
                half_extents,
                lift,
            },
        );
        e.pos = Vec2::new(bounds.center().x, bounds.height - lift);
        e
    }

    /// Wrapping drifter (food or poison) at a random spot
    pub fn drifter(id: u32, kind: EntityKind, limits: Limits, bounds: &Bounds, rng: &mut Pcg32) -> Self {
        let mut e = Self::base(id, kind, limits, EntityData::None);
        e.respawn(bounds, rng);
        e
    }

    pub fn orb(id: u32, limits: Limits, bounds: &Bounds, rng: &mut Pcg32) -> Self {
        let mut e = Self::base(id, EntityKind::Orb, limits, EntityData::Orb { hue: 0.0 });
        e.respawn(bounds, rng);
        e
    }

    /// Zero-radius ring at `center`
    pub fn shockwave(id: u32, center: Vec2, growth: f32, max_radius: f32) -> Self {
        let mut e = Self::base(
            id,
            EntityKind::Shockwave,
            Limits::new(Span::fixed(0.0), Span::new(0.0, max_radius)),
            EntityData::Shockwave { growth, max_radius },
        );
        e.pos = center;
        e.radius = 0.0;
        e
    }

    /// Spark rising from `origin`
    pub fn spark(id: u32, origin: Vec2, config: &SparkConfig, rng: &mut Pcg32) -> Self {
        let radius_range = Span::new(config.size_range.min * 0.5, config.size_range.max * 0.5);
        let mut e = Self::base(
            id,
            EntityKind::Spark,
            Limits::new(Span::fixed(0.0), radius_range),
            EntityData::Spark {
                max_life: config.life_frames,
                drag: config.drag,
                glow: rng.random_range(180..=230),
            },
        );
        e.pos = origin;
        e.vel = Vec2::new(config.drift_range.sample(rng), config.rise_range.sample(rng));
        e.radius = radius_range.sample(rng);
        e.life = Some(config.life_frames);
        e
    }

    pub fn falling(
        id: u32,
        size: Vec2,
        fall_speed: Span,
        spawn_margin: f32,
        spawn_y: f32,
        bounds: &Bounds,
        rng: &mut Pcg32,
    ) -> Self {
        let half_extents = size * 0.5;
        let mut e = Self::base(
            id,
            EntityKind::FallingObject,
            Limits::new(fall_speed, Span::fixed(half_extents.x)),
            EntityData::Falling {
                half_extents,
                spawn_margin,
                spawn_y,
            },
        );
        e.respawn(bounds, rng);
        e
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rocket(
        id: u32,
        bounds: &Bounds,
        base_speed: f32,
        boost_speed: f32,
        boost_max_frames: u32,
        entry_offset: f32,
        exit_y: f32,
        flame_range: Span,
    ) -> Self {
        let mut e = Self::base(
            id,
            EntityKind::Rocket,
            Limits::fixed(base_speed, 25.0),
            EntityData::Rocket {
                base_speed,
                boost_speed,
                boost: Boost::new(boost_max_frames),
                entry_offset,
                exit_y,
                flame: flame_range.min,
                flame_range,
            },
        );
        e.pos = Vec2::new(bounds.center().x, bounds.height + entry_offset);
        e
    }

    pub fn star(id: u32, limits: Limits, bounds: &Bounds, rng: &mut Pcg32) -> Self {
        let mut e = Self::base(id, EntityKind::Star, limits, EntityData::None);
        e.respawn(bounds, rng);
        e
    }

    /// Behaviour table entry for this entity
    #[inline]
    pub fn behavior(&self) -> &'static KindBehavior {
        behavior(self.kind)
    }

    /// Advance by `dt` ticks using the kind's motion rule
    pub fn step(&mut self, dt: f32, bounds: &Bounds, rng: &mut Pcg32) {
        (self.behavior().step)(self, dt, bounds, rng);
    }

    /// Re-roll position, radius and velocity from the configured ranges
    pub fn respawn(&mut self, bounds: &Bounds, rng: &mut Pcg32) {
        match self.kind {
            EntityKind::Food | EntityKind::Poison => {
                self.radius = self.limits.radius.sample(rng);
                self.pos = Vec2::new(
                    rng.random_range(0.0..=bounds.width),
                    rng.random_range(0.0..=bounds.height),
                );
                self.vel = random_heading(rng) * self.limits.speed.sample(rng);
            }
            EntityKind::Orb => {
                self.radius = self.limits.radius.sample(rng);
                let r = self.radius;
                self.pos = Vec2::new(
                    rng.random_range(r..=bounds.width - r),
                    rng.random_range(r..=bounds.height - r),
                );
                self.vel = random_heading(rng) * self.limits.speed.sample(rng);
                if let EntityData::Orb { ref mut hue } = self.data {
                    *hue = rng.random_range(0.0..360.0);
                }
            }
            EntityKind::Star => {
                self.radius = self.limits.radius.sample(rng);
                self.pos = Vec2::new(
                    rng.random_range(0.0..=bounds.width),
                    rng.random_range(0.0..=bounds.height),
                );
                self.vel = Vec2::new(0.0, self.limits.speed.sample(rng));
            }
            EntityKind::FallingObject => {
                if let EntityData::Falling {
                    spawn_margin,
                    spawn_y,
                    ..
                } = self.data
                {
                    self.pos = Vec2::new(
                        rng.random_range(spawn_margin..=bounds.width - spawn_margin),
                        spawn_y,
                    );
                }
                self.vel = Vec2::new(0.0, self.limits.speed.sample(rng));
            }
            EntityKind::Player => {
                if let EntityData::Blob {
                    ref mut target,
                    start_radius,
                    ref mut boost,
                    ..
                } = self.data
                {
                    self.radius = start_radius;
                    *target = bounds.center();
                    boost.deactivate();
                }
                self.pos = bounds.center();
                self.vel = Vec2::ZERO;
            }
            EntityKind::Catcher => {
                if let EntityData::Catcher {
                    ref mut target_x,
                    lift,
                    ..
                } = self.data
                {
                    *target_x = bounds.center().x;
                    self.pos = Vec2::new(*target_x, bounds.height - lift);
                }
            }
            EntityKind::Rocket => {
                if let EntityData::Rocket {
                    entry_offset,
                    ref mut boost,
                    ..
                } = self.data
                {
                    self.pos = Vec2::new(bounds.center().x, bounds.height + entry_offset);
                    boost.deactivate();
                }
                self.vel = Vec2::ZERO;
            }
            // Ephemeral kinds are removed rather than recycled
            EntityKind::Shockwave | EntityKind::Spark => {}
        }
    }

    /// True once an ephemeral entity has run its course
    pub fn is_expired(&self) -> bool {
        match self.data {
            EntityData::Shockwave { max_radius, .. } => self.radius > max_radius,
            _ => self.life == Some(0),
        }
    }

    /// Change the radius by `delta`, clamped to the kind's range, then
    /// re-apply the edge rule so the bigger body is still in bounds
    pub fn resize(&mut self, delta: f32, bounds: &Bounds) {
        self.radius = self.limits.radius.clamp(self.radius + delta);
        self.confine(bounds);
    }

    /// Apply the kind's edge rule to the current position
    pub fn confine(&mut self, bounds: &Bounds) {
        match self.behavior().edge {
            EdgeRule::Wrap => {
                wrap_axis(&mut self.pos.x, self.radius, bounds.width);
                wrap_axis(&mut self.pos.y, self.radius, bounds.height);
            }
            EdgeRule::Reflect | EdgeRule::Clamp => {
                self.pos.x = self.pos.x.clamp(self.radius, bounds.width - self.radius);
                self.pos.y = self.pos.y.clamp(self.radius, bounds.height - self.radius);
            }
            EdgeRule::TrackX => {
                self.pos.x = self.pos.x.clamp(0.0, bounds.width);
            }
            EdgeRule::Fall | EdgeRule::Loop | EdgeRule::Fixed => {}
        }
    }

    /// Whether the position satisfies the kind's edge rule
    pub fn in_bounds(&self, bounds: &Bounds) -> bool {
        let (x, y, r) = (self.pos.x, self.pos.y, self.radius);
        match self.behavior().edge {
            EdgeRule::Wrap => {
                (-r..=bounds.width + r).contains(&x) && (-r..=bounds.height + r).contains(&y)
            }
            EdgeRule::Reflect | EdgeRule::Clamp => {
                (r..=bounds.width - r).contains(&x) && (r..=bounds.height - r).contains(&y)
            }
            EdgeRule::TrackX => (0.0..=bounds.width).contains(&x),
            EdgeRule::Fall | EdgeRule::Loop | EdgeRule::Fixed => true,
        }
    }

    /// Half width and half height of the entity's box
    pub fn half_extents(&self) -> Vec2 {
        match self.data {
            EntityData::Catcher { half_extents, .. } | EntityData::Falling { half_extents, .. } => {
                half_extents
            }
            _ => Vec2::splat(self.radius),
        }
    }

    /// Point the entity steers toward, if it steers at all
    pub fn set_target(&mut self, point: Vec2) {
        match self.data {
            EntityData::Blob { ref mut target, .. } => *target = point,
            EntityData::Catcher { ref mut target_x, .. } => *target_x = point.x,
            _ => {}
        }
    }

    /// Boost state of entities that can boost
    pub fn boost_mut(&mut self) -> Option<&mut Boost> {
        match self.data {
            EntityData::Blob { ref mut boost, .. } | EntityData::Rocket { ref mut boost, .. } => {
                Some(boost)
            }
            _ => None,
        }
    }

    pub fn boost(&self) -> Option<&Boost> {
        match self.data {
            EntityData::Blob { ref boost, .. } | EntityData::Rocket { ref boost, .. } => Some(boost),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const BOUNDS: Bounds = Bounds::new(800.0, 600.0);

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    fn food(rng: &mut Pcg32) -> Entity {
        Entity::drifter(
            1,
            EntityKind::Food,
            Limits::new(Span::new(0.3, 1.2), Span::new(10.0, 18.0)),
            &BOUNDS,
            rng,
        )
    }

    #[test]
    fn test_table_matches_kind_order() {
        assert_eq!(behavior(EntityKind::Player).edge, EdgeRule::Clamp);
        assert_eq!(behavior(EntityKind::Food).edge, EdgeRule::Wrap);
        assert_eq!(behavior(EntityKind::Orb).edge, EdgeRule::Reflect);
        assert_eq!(behavior(EntityKind::FallingObject).edge, EdgeRule::Fall);
        assert_eq!(behavior(EntityKind::Rocket).edge, EdgeRule::Loop);
        assert_eq!(behavior(EntityKind::Star).edge, EdgeRule::Wrap);
        assert!(!behavior(EntityKind::Shockwave).bounded_radius);
    }

    #[test]
    fn test_drifter_wraps() {
        let mut rng = rng();
        let mut f = food(&mut rng);
        f.radius = 10.0;
        f.pos = Vec2::new(-9.5, 300.0);
        f.vel = Vec2::new(-1.0, 0.0);
        f.step(1.0, &BOUNDS, &mut rng);
        assert_eq!(f.pos.x, 810.0);
    }

    #[test]
    fn test_respawn_radius_from_range_not_previous() {
        let mut rng = rng();
        let mut f = food(&mut rng);
        for _ in 0..200 {
            f.radius = 500.0;
            f.respawn(&BOUNDS, &mut rng);
            assert!((10.0..=18.0).contains(&f.radius));
            let speed = f.vel.length();
            assert!(speed >= 0.3 - 1e-4 && speed <= 1.2 + 1e-4);
        }
    }

    #[test]
    fn test_blob_steers_and_clamps() {
        let mut rng = rng();
        let mut p = Entity::player(1, &BOUNDS, 30.0, Span::new(15.0, 90.0), 3.0, 7.0, 20);
        p.set_target(Vec2::new(800.0, 300.0));
        p.step(1.0, &BOUNDS, &mut rng);
        assert!((p.pos.x - 403.0).abs() < 1e-4);

        p.pos = Vec2::new(790.0, 300.0);
        p.step(1.0, &BOUNDS, &mut rng);
        assert_eq!(p.pos.x, 770.0);
    }

    #[test]
    fn test_blob_on_target_does_not_move() {
        let mut rng = rng();
        let mut p = Entity::player(1, &BOUNDS, 30.0, Span::new(15.0, 90.0), 3.0, 7.0, 20);
        let before = p.pos;
        p.set_target(before);
        p.step(1.0, &BOUNDS, &mut rng);
        assert_eq!(p.pos, before);
        assert_eq!(p.vel, Vec2::ZERO);
    }

    #[test]
    fn test_boost_auto_releases() {
        let mut boost = Boost::new(20);
        boost.activate();
        for _ in 0..20 {
            boost.advance();
            assert!(boost.active);
        }
        boost.advance();
        assert!(!boost.active);
    }

    #[test]
    fn test_resize_clamps_radius_and_position() {
        let mut p = Entity::player(1, &BOUNDS, 30.0, Span::new(15.0, 90.0), 3.0, 7.0, 20);
        p.pos = Vec2::new(30.0, 30.0);
        p.resize(100.0, &BOUNDS);
        assert_eq!(p.radius, 90.0);
        assert_eq!(p.pos, Vec2::new(90.0, 90.0));
        p.resize(-200.0, &BOUNDS);
        assert_eq!(p.radius, 15.0);
    }

    #[test]
    fn test_orb_reflects() {
        let mut rng = rng();
        let bounds = Bounds::new(600.0, 600.0);
        let mut orb = Entity::orb(1, Limits::new(Span::new(2.0, 4.0), Span::new(15.0, 30.0)), &bounds, &mut rng);
        orb.radius = 20.0;
        orb.pos = Vec2::new(21.0, 300.0);
        orb.vel = Vec2::new(-3.0, 0.0);
        orb.step(1.0, &bounds, &mut rng);
        assert_eq!(orb.pos.x, 20.0);
        assert_eq!(orb.vel.x, 3.0);
    }

    #[test]
    fn test_spark_expires() {
        let mut rng = rng();
        let config = SparkConfig::default();
        let mut s = Entity::spark(1, Vec2::new(400.0, 400.0), &config, &mut rng);
        assert!(s.vel.y < 0.0);
        for _ in 0..config.life_frames {
            assert!(!s.is_expired());
            s.step(1.0, &BOUNDS, &mut rng);
        }
        assert!(s.is_expired());
    }

    #[test]
    fn test_shockwave_expires_past_max() {
        let mut rng = rng();
        let mut s = Entity::shockwave(1, Vec2::splat(300.0), 8.0, 200.0);
        let mut ticks = 0;
        while !s.is_expired() {
            s.step(1.0, &BOUNDS, &mut rng);
            ticks += 1;
        }
        assert_eq!(ticks, 26);
        assert!(s.radius > 200.0);
    }

    #[test]
    fn test_rocket_loops() {
        let mut rng = rng();
        let bounds = Bounds::new(500.0, 700.0);
        let mut r = Entity::rocket(1, &bounds, 3.0, 8.0, 90, 150.0, -200.0, Span::new(40.0, 70.0));
        assert_eq!(r.pos.y, 850.0);
        r.pos.y = -198.0;
        r.step(1.0, &bounds, &mut rng);
        assert_eq!(r.pos.y, 850.0);
        let EntityData::Rocket { flame, .. } = r.data else {
            panic!("rocket payload");
        };
        assert!((40.0..=70.0).contains(&flame));
    }

    #[test]
    fn test_star_wraps_to_top() {
        let mut rng = rng();
        let bounds = Bounds::new(500.0, 700.0);
        let mut s = Entity::star(1, Limits::new(Span::new(0.5, 2.0), Span::fixed(1.5)), &bounds, &mut rng);
        s.pos.y = 699.5;
        s.vel.y = 1.0;
        s.step(1.0, &bounds, &mut rng);
        assert_eq!(s.pos.y, 0.0);
        assert!((0.0..=500.0).contains(&s.pos.x));
    }

    #[test]
    fn test_catcher_tracks_pointer_x() {
        let mut rng = rng();
        let mut c = Entity::catcher(1, &BOUNDS, Vec2::new(150.0, 100.0), 120.0);
        c.set_target(Vec2::new(900.0, 10.0));
        c.step(1.0, &BOUNDS, &mut rng);
        assert_eq!(c.pos, Vec2::new(800.0, 480.0));
        assert_eq!(c.half_extents(), Vec2::new(75.0, 50.0));
    }
}
