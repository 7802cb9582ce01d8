//! Per-kind entity painters
//!
//! Mirrors the simulation's behaviour table: one painter per `EntityKind`,
//! looked up by kind index. Painters only read the entity.

use glam::Vec2;

use super::shapes::{circle, ellipse, rect, ring, rotated_triangle, rounded_rect, triangle};
use super::{Color, PresentationSink};
use crate::map_range;
use crate::sim::entity::{Entity, EntityData, EntityKind};
use crate::sim::GameSession;

/// Radians per tick the poison triangles spin
const POISON_SPIN: f32 = 0.02;

/// Session-wide values painters need besides the entity itself
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub time_ticks: u64,
    effect_target: Option<u32>,
    effect_scale: f32,
    effect_alpha: f32,
}

impl Frame {
    pub fn of(session: &GameSession) -> Self {
        let (effect_scale, effect_alpha) = session.effect_visual();
        Self {
            time_ticks: session.time_ticks,
            effect_target: session.effect_target,
            effect_scale,
            effect_alpha,
        }
    }

    /// Scale and alpha of entity `id`: animated if it is vanishing
    pub fn visual(&self, id: u32) -> (f32, f32) {
        if self.effect_target == Some(id) {
            (self.effect_scale, self.effect_alpha)
        } else {
            (1.0, 255.0)
        }
    }
}

pub type Painter = fn(&Entity, &Frame, &mut dyn PresentationSink);

static PAINTERS: [Painter; EntityKind::COUNT] = [
    paint_blob,
    paint_catcher,
    paint_food,
    paint_poison,
    paint_orb,
    paint_shockwave,
    paint_spark,
    paint_falling,
    paint_rocket,
    paint_star,
];

/// Draw one entity with its kind's painter
#[inline]
pub fn paint(e: &Entity, frame: &Frame, sink: &mut dyn PresentationSink) {
    PAINTERS[e.kind.index()](e, frame, sink)
}

fn paint_blob(e: &Entity, _frame: &Frame, sink: &mut dyn PresentationSink) {
    let EntityData::Blob {
        boost_speed, boost, ..
    } = e.data
    else {
        return;
    };
    let (c, r) = (e.pos, e.radius);

    sink.draw(circle(c, r, Color::rgb(120, 210, 255)));

    // Mouth opens wide while boosting
    let mouth = if boost.active { r * 0.8 } else { r * 0.4 };
    sink.draw(ellipse(
        c + Vec2::new(r * 0.3, 0.0),
        Vec2::new(mouth * 0.5, mouth * 0.3),
        Color::BLACK,
    ));

    let eyes = [Vec2::new(-0.4 * r, -0.3 * r), Vec2::new(-0.4 * r, 0.1 * r)];
    for eye in eyes {
        sink.draw(circle(c + eye, r * 0.45, Color::WHITE));
    }

    // Pupils look where the blob is heading
    let look = Vec2::new(
        map_range(e.vel.x, -boost_speed, boost_speed, -r * 0.15, r * 0.15),
        map_range(e.vel.y, -boost_speed, boost_speed, -r * 0.15, r * 0.15),
    );
    for eye in eyes {
        sink.draw(circle(c + eye + look, r * 0.15, Color::BLACK));
    }
}

fn paint_catcher(e: &Entity, _frame: &Frame, sink: &mut dyn PresentationSink) {
    sink.draw(rect(e.pos, e.half_extents(), Color::gray(100)));
}

fn paint_food(e: &Entity, _frame: &Frame, sink: &mut dyn PresentationSink) {
    sink.draw(circle(e.pos, e.radius, Color::rgb(255, 200, 100)));
}

fn paint_poison(e: &Entity, frame: &Frame, sink: &mut dyn PresentationSink) {
    let r = e.radius;
    sink.draw(rotated_triangle(
        e.pos,
        frame.time_ticks as f32 * POISON_SPIN,
        [Vec2::new(-r, r), Vec2::new(r, r), Vec2::new(0.0, -r)],
        Color::rgb(255, 120, 120),
    ));
}

fn paint_orb(e: &Entity, _frame: &Frame, sink: &mut dyn PresentationSink) {
    let hue = match e.data {
        EntityData::Orb { hue } => hue,
        _ => 0.0,
    };
    sink.draw(circle(e.pos, e.radius, Color::from_hsb(hue, 90.0, 100.0)));
}

fn paint_shockwave(e: &Entity, _frame: &Frame, sink: &mut dyn PresentationSink) {
    sink.draw(ring(e.pos, e.radius, Color::rgba(255, 255, 255, 180), 3.0));
}

fn paint_spark(e: &Entity, _frame: &Frame, sink: &mut dyn PresentationSink) {
    let EntityData::Spark { max_life, glow, .. } = e.data else {
        return;
    };
    let life = e.life.unwrap_or(0) as f32;
    let alpha = map_range(life, 0.0, max_life as f32, 0.0, 255.0);
    sink.draw(circle(e.pos, e.radius, Color::rgb(255, glow, 80).with_alpha(alpha)));
}

fn paint_falling(e: &Entity, frame: &Frame, sink: &mut dyn PresentationSink) {
    let (scale, alpha) = frame.visual(e.id);
    if scale <= 0.0 {
        return;
    }
    let color = Color::rgb(200, 200, 0).with_alpha(alpha);
    sink.draw(rect(e.pos, e.half_extents() * scale, color));
}

fn paint_rocket(e: &Entity, _frame: &Frame, sink: &mut dyn PresentationSink) {
    let flame = match e.data {
        EntityData::Rocket { flame, .. } => flame,
        _ => 0.0,
    };
    let at = |x: f32, y: f32| e.pos + Vec2::new(x, y);
    let red = Color::rgb(230, 60, 80);

    // Body and nose cone
    sink.draw(rounded_rect(e.pos, Vec2::new(25.0, 70.0), 20.0, Color::gray(200)));
    sink.draw(triangle(at(-25.0, -70.0), at(25.0, -70.0), at(0.0, -120.0), red));

    // Fins
    sink.draw(triangle(at(-25.0, 40.0), at(-55.0, 70.0), at(-25.0, 70.0), red));
    sink.draw(triangle(at(25.0, 40.0), at(55.0, 70.0), at(25.0, 70.0), red));

    // Window
    sink.draw(circle(at(0.0, -20.0), 17.5, Color::rgb(100, 180, 255)));
    sink.draw(circle(at(0.0, -20.0), 9.0, Color::gray(220)));

    // Flame, length rolled by the simulation
    sink.draw(triangle(
        at(-15.0, 70.0),
        at(15.0, 70.0),
        at(0.0, 70.0 + flame),
        Color::rgb(255, 160, 0),
    ));
    sink.draw(triangle(
        at(-8.0, 70.0),
        at(8.0, 70.0),
        at(0.0, 70.0 + flame * 0.6),
        Color::rgb(255, 230, 150),
    ));
}

fn paint_star(e: &Entity, _frame: &Frame, sink: &mut dyn PresentationSink) {
    sink.draw(circle(e.pos, e.radius, Color::WHITE));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::render::{DrawCmd, DrawList};
    use crate::sim::state::EffectTag;
    use rand::SeedableRng;

    #[test]
    fn test_rocket_flame_uses_stored_length() {
        let session = GameSession::with_variant(Variant::RocketBoost, 1).unwrap();
        let mut rocket = session.find(EntityKind::Rocket).unwrap().clone();
        rocket.pos = Vec2::new(250.0, 300.0);
        if let EntityData::Rocket { ref mut flame, .. } = rocket.data {
            *flame = 55.0;
        }
        let mut list = DrawList::new();
        paint(&rocket, &Frame::of(&session), &mut list);

        let tips: Vec<f32> = list
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Polygon { points, .. } if points.len() == 3 => Some(points[2].y),
                _ => None,
            })
            .collect();
        assert!(tips.contains(&(300.0 + 70.0 + 55.0)));
    }

    #[test]
    fn test_vanishing_object_shrinks_and_fades() {
        let mut session = GameSession::with_variant(Variant::FuegoFury, 1).unwrap();
        let falling = session.find(EntityKind::FallingObject).unwrap().clone();
        session.phase = crate::sim::GamePhase::EffectTransition(EffectTag::Caught);
        session.effect_target = Some(falling.id);
        session.effect_frames_remaining = 10;

        let mut list = DrawList::new();
        paint(&falling, &Frame::of(&session), &mut list);
        let DrawCmd::Polygon { points, color } = &list.commands()[0] else {
            panic!("expected polygon");
        };
        let width = points[1].x - points[0].x;
        assert!((width - 20.0).abs() < 1e-3);
        assert_eq!(color.a, 128);
    }

    #[test]
    fn test_spark_fades_with_life() {
        let session = GameSession::with_variant(Variant::FuegoFury, 1).unwrap();
        let mut spark = Entity::spark(
            99,
            Vec2::new(100.0, 100.0),
            &crate::config::SparkConfig::default(),
            &mut rand_pcg::Pcg32::seed_from_u64(1),
        );
        spark.life = Some(15);
        let mut list = DrawList::new();
        paint(&spark, &Frame::of(&session), &mut list);
        let DrawCmd::Circle { color, .. } = &list.commands()[0] else {
            panic!("expected circle");
        };
        assert_eq!(color.a, 128);
    }
}
