//! Per-variant consequence rules
//!
//! Each variant steps its entities in the order its game expects and then
//! resolves the interactions it cares about. Only the relevant kind pairs are
//! tested against each other.

use glam::Vec2;

use super::collision::{apply_radial_impulse, boxes_touch, entities_touch};
use super::entity::{Entity, EntityKind};
use super::state::{EffectTag, GamePhase, GameSession};
use crate::config::{ChomperConfig, FuegoFuryConfig, GameConfig, RicochetConfig, SparkConfig, Span};
use crate::consts::TICK_DT;

/// One `Playing` tick: step entities and apply interaction rules
pub fn play(session: &mut GameSession) {
    match session.config.clone() {
        GameConfig::Chomper(c) => play_chomper(session, &c),
        GameConfig::FuegoFury(c) => play_fuego(session, &c),
        GameConfig::Ricochet(c) => play_ricochet(session, &c),
        GameConfig::RocketBoost(_) => step_kinds(session, &[EntityKind::Star, EntityKind::Rocket]),
    }
}

/// One `EffectTransition` tick: ambient entities keep moving, the animated
/// entity is frozen, and the countdown runs
pub fn animate(session: &mut GameSession) {
    if let GameConfig::FuegoFury(c) = session.config.clone() {
        step_kinds(session, &[EntityKind::Catcher]);
        emit_ambient_sparks(session, &c);
        step_kinds(session, &[EntityKind::Spark]);
    }

    session.effect_frames_remaining = session.effect_frames_remaining.saturating_sub(1);
    if session.effect_frames_remaining == 0 {
        let bounds = session.bounds();
        if let Some(id) = session.effect_target.take() {
            if let Some(e) = session.entities.iter_mut().find(|e| e.id == id) {
                e.respawn(&bounds, &mut session.rng);
            }
        }
        session.phase = GamePhase::Playing;
    }
}

/// Step every entity of the listed kinds, kinds in the given order
fn step_kinds(session: &mut GameSession, kinds: &[EntityKind]) {
    let bounds = session.bounds();
    for kind in kinds {
        for e in session.entities.iter_mut().filter(|e| e.kind == *kind) {
            e.step(TICK_DT, &bounds, &mut session.rng);
        }
    }
}

fn play_chomper(session: &mut GameSession, config: &ChomperConfig) {
    step_kinds(
        session,
        &[EntityKind::Food, EntityKind::Poison, EntityKind::Player],
    );

    let Some(pi) = session.index_of(EntityKind::Player) else {
        return;
    };
    let bounds = session.bounds();

    for i in 0..session.entities.len() {
        if session.entities[i].kind != EntityKind::Food
            || !entities_touch(&session.entities[pi], &session.entities[i])
        {
            continue;
        }
        session.entities[i].respawn(&bounds, &mut session.rng);
        session.entities[pi].resize(config.grow, &bounds);
        session.score += 1;
        log::debug!("ate food #{}, score {}", session.entities[i].id, session.score);
    }

    for i in 0..session.entities.len() {
        if session.entities[i].kind != EntityKind::Poison
            || !entities_touch(&session.entities[pi], &session.entities[i])
        {
            continue;
        }
        session.entities[i].respawn(&bounds, &mut session.rng);
        session.entities[pi].resize(-config.shrink, &bounds);
        session.miss_counter += 1;
        log::debug!("poison hit {}/{}", session.miss_counter, config.penalty_threshold);
        if session.miss_counter >= config.penalty_threshold {
            session.end_game();
            return;
        }
    }
}

fn play_fuego(session: &mut GameSession, config: &FuegoFuryConfig) {
    step_kinds(session, &[EntityKind::Catcher]);
    emit_ambient_sparks(session, config);
    step_kinds(session, &[EntityKind::Spark, EntityKind::FallingObject]);

    let (Some(ci), Some(fi)) = (
        session.index_of(EntityKind::Catcher),
        session.index_of(EntityKind::FallingObject),
    ) else {
        return;
    };
    let falling = &session.entities[fi];
    let falling_id = falling.id;

    if boxes_touch(falling, &session.entities[ci]) {
        session.score += 1;
        log::debug!("caught #{}, score {}", falling_id, session.score);
        session.enter_effect(EffectTag::Caught, falling_id, config.effect_duration_frames);
        let catcher = &session.entities[ci];
        let origin = Vec2::new(catcher.pos.x, catcher_top(catcher));
        emit_sparks(session, &config.spark, origin, config.spark.burst);
    } else if falling.pos.y - falling.half_extents().y > session.bounds().height {
        session.miss_counter += 1;
        log::debug!("missed #{}, misses {}", falling_id, session.miss_counter);
        if session.miss_counter >= config.penalty_threshold {
            session.end_game();
        } else {
            session.enter_effect(EffectTag::Missed, falling_id, config.effect_duration_frames);
        }
    }
}

fn catcher_top(catcher: &Entity) -> f32 {
    catcher.pos.y - catcher.half_extents().y
}

/// Flicker along the catcher's top edge every few ticks
fn emit_ambient_sparks(session: &mut GameSession, config: &FuegoFuryConfig) {
    if session.time_ticks % config.spark.ambient_interval != 0 {
        return;
    }
    let Some(catcher) = session.find(EntityKind::Catcher) else {
        return;
    };
    let half_width = catcher.half_extents().x;
    let (center_x, top) = (catcher.pos.x, catcher_top(catcher));
    let width = session.bounds().width;
    for _ in 0..config.spark.ambient_points {
        let x = Span::new(center_x - half_width, center_x + half_width)
            .sample(&mut session.rng)
            .clamp(0.0, width);
        emit_sparks(session, &config.spark, Vec2::new(x, top), config.spark.ambient_per_point);
    }
}

/// Spawn up to `count` sparks at `origin`, respecting the population cap
fn emit_sparks(session: &mut GameSession, config: &SparkConfig, origin: Vec2, count: u32) {
    let live = session.count(EntityKind::Spark);
    let room = config.max_sparks.saturating_sub(live);
    let bounds = session.bounds();
    for _ in 0..(count as usize).min(room) {
        let id = session.next_entity_id();
        let mut spark = Entity::spark(id, origin, config, &mut session.rng);
        spark.confine(&bounds);
        session.entities.push(spark);
    }
}

fn play_ricochet(session: &mut GameSession, config: &RicochetConfig) {
    let bounds = session.bounds();
    let GameSession { entities, rng, .. } = session;

    let shocks: Vec<usize> = entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.kind == EntityKind::Shockwave)
        .map(|(i, _)| i)
        .collect();
    for si in shocks {
        entities[si].step(TICK_DT, &bounds, rng);
        let shock = entities[si].clone();
        for orb in entities.iter_mut().filter(|e| e.kind == EntityKind::Orb) {
            apply_radial_impulse(&shock, orb, config.force_near, config.force_far);
        }
    }
    entities.retain(|e| e.kind != EntityKind::Shockwave || !e.is_expired());

    step_kinds(session, &[EntityKind::Orb]);
}

/// Ring at `center`; only the ricochet variant has shockwaves
pub fn spawn_shockwave(session: &mut GameSession, center: Vec2) {
    let GameConfig::Ricochet(c) = &session.config else {
        return;
    };
    let (growth, max_radius) = (c.shock_growth, c.shock_max_radius);
    let id = session.next_entity_id();
    session
        .entities
        .push(Entity::shockwave(id, center, growth, max_radius));
    log::debug!("shockwave #{} at {}", id, center);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;

    #[test]
    fn test_ambient_sparks_every_other_tick() {
        let mut s = GameSession::with_variant(Variant::FuegoFury, 4).unwrap();
        let GameConfig::FuegoFury(c) = s.config.clone() else {
            unreachable!()
        };
        s.time_ticks = 1;
        emit_ambient_sparks(&mut s, &c);
        assert_eq!(s.count(EntityKind::Spark), 0);
        s.time_ticks = 2;
        emit_ambient_sparks(&mut s, &c);
        assert_eq!(s.count(EntityKind::Spark), 6);
    }

    #[test]
    fn test_spark_cap() {
        let mut s = GameSession::with_variant(Variant::FuegoFury, 4).unwrap();
        let config = SparkConfig {
            max_sparks: 50,
            ..Default::default()
        };
        emit_sparks(&mut s, &config, Vec2::new(400.0, 430.0), 200);
        assert_eq!(s.count(EntityKind::Spark), 50);
        emit_sparks(&mut s, &config, Vec2::new(400.0, 430.0), 10);
        assert_eq!(s.count(EntityKind::Spark), 50);
    }

    #[test]
    fn test_shockwave_only_in_ricochet() {
        let mut s = GameSession::with_variant(Variant::Chomper, 4).unwrap();
        spawn_shockwave(&mut s, Vec2::splat(100.0));
        assert_eq!(s.count(EntityKind::Shockwave), 0);

        let mut s = GameSession::with_variant(Variant::Ricochet, 4).unwrap();
        spawn_shockwave(&mut s, Vec2::splat(100.0));
        assert_eq!(s.count(EntityKind::Shockwave), 1);
    }

    #[test]
    fn test_shockwave_pushes_orb_away() {
        let mut s = GameSession::with_variant(Variant::Ricochet, 4).unwrap();
        s.entities.retain(|e| e.kind != EntityKind::Orb);
        let mut orb = Entity::orb(
            900,
            crate::sim::entity::Limits::new(
                Span::new(2.0, 4.0),
                Span::new(15.0, 30.0),
            ),
            &s.bounds(),
            &mut s.rng,
        );
        orb.pos = Vec2::new(320.0, 300.0);
        orb.vel = Vec2::ZERO;
        s.entities.push(orb);
        spawn_shockwave(&mut s, Vec2::new(300.0, 300.0));

        play(&mut s);
        let orb = s.find(EntityKind::Orb).unwrap();
        // Ring grew to 8 first, so the orb at distance 20 is outside it
        assert_eq!(orb.vel, Vec2::ZERO);

        for _ in 0..2 {
            play(&mut s);
        }
        // Ring radius 24 now covers the orb
        let orb = s.find(EntityKind::Orb).unwrap();
        assert!(orb.vel.x > 0.0);
        assert!(orb.vel.y.abs() < 1e-6);
    }
}
