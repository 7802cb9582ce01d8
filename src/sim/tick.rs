//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically, one logical
//! frame per call.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rules;
use super::state::{GamePhase, GameSession};

/// Discrete player intent, produced by the input adapter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Steer toward a point (player blob, catcher)
    SteerTarget(Vec2),
    ActivateBoost,
    DeactivateBoost,
    /// Radial push centred on a point (ricochet)
    Pulse(Vec2),
    /// Leave `GameOver` with a fresh session
    Restart,
}

/// Input for a single tick (deterministic)
///
/// Everything the host knows about the pointer reaches the simulation as
/// intents; there is no separate pointer snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Applied in order
    pub intents: Vec<Intent>,
}

impl TickInput {
    /// Input that only steers toward `pos`
    pub fn pointer(pos: Vec2) -> Self {
        Self {
            intents: vec![Intent::SteerTarget(pos)],
        }
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intents.push(intent);
        self
    }

    fn wants_restart(&self) -> bool {
        self.intents.contains(&Intent::Restart)
    }
}

/// Advance the session by one logical frame
pub fn tick(session: &mut GameSession, input: &TickInput) {
    // Terminal screen: nothing moves until a restart
    if session.phase == GamePhase::GameOver {
        if input.wants_restart() {
            session.restart();
        }
        return;
    }

    session.time_ticks += 1;
    apply_intents(session, input);

    match session.phase {
        GamePhase::Playing => rules::play(session),
        GamePhase::EffectTransition(_) => rules::animate(session),
        GamePhase::GameOver => {}
    }

    session.entities.retain(|e| !e.is_expired());
    session.enforce_invariants();
    session.normalize_order();
}

fn apply_intents(session: &mut GameSession, input: &TickInput) {
    for intent in &input.intents {
        match *intent {
            Intent::SteerTarget(point) => {
                for e in &mut session.entities {
                    e.set_target(point);
                }
            }
            Intent::ActivateBoost => {
                for boost in session.entities.iter_mut().filter_map(|e| e.boost_mut()) {
                    boost.activate();
                    log::debug!("boost on");
                }
            }
            Intent::DeactivateBoost => {
                for boost in session.entities.iter_mut().filter_map(|e| e.boost_mut()) {
                    boost.deactivate();
                }
            }
            Intent::Pulse(center) => rules::spawn_shockwave(session, center),
            // Only meaningful on the terminal screen
            Intent::Restart => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::sim::entity::EntityKind;

    #[test]
    fn test_tick_advances_time() {
        let mut s = GameSession::with_variant(Variant::Chomper, 12345).unwrap();
        tick(&mut s, &TickInput::default());
        tick(&mut s, &TickInput::default());
        assert_eq!(s.time_ticks, 2);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_ignores_everything_but_restart() {
        let mut s = GameSession::with_variant(Variant::Chomper, 12345).unwrap();
        s.score = 7;
        s.end_game();
        let before: Vec<Vec2> = s.entities.iter().map(|e| e.pos).collect();

        let input = TickInput::pointer(Vec2::new(10.0, 10.0)).with_intent(Intent::ActivateBoost);
        tick(&mut s, &input);
        let after: Vec<Vec2> = s.entities.iter().map(|e| e.pos).collect();
        assert_eq!(before, after);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.score, 7);

        tick(&mut s, &TickInput::default().with_intent(Intent::Restart));
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut s = GameSession::with_variant(Variant::Chomper, 1).unwrap();
        s.score = 3;
        tick(&mut s, &TickInput::default().with_intent(Intent::Restart));
        assert!(s.score >= 3);
    }

    #[test]
    fn test_steer_moves_player_toward_pointer() {
        let mut s = GameSession::with_variant(Variant::Chomper, 2).unwrap();
        let start = s.find(EntityKind::Player).unwrap().pos;
        let target = start + Vec2::new(200.0, 0.0);
        tick(&mut s, &TickInput::pointer(target));
        let pos = s.find(EntityKind::Player).unwrap().pos;
        assert!(pos.x > start.x);
        assert!((pos.y - start.y).abs() < 1e-4);
    }

    #[test]
    fn test_pulse_spawns_shockwave() {
        let mut s = GameSession::with_variant(Variant::Ricochet, 2).unwrap();
        let input = TickInput::default().with_intent(Intent::Pulse(Vec2::new(300.0, 300.0)));
        tick(&mut s, &input);
        assert_eq!(s.count(EntityKind::Shockwave), 1);

        // Ring grows 8 per tick and expires past 200
        for _ in 0..30 {
            tick(&mut s, &TickInput::default());
        }
        assert_eq!(s.count(EntityKind::Shockwave), 0);
    }

    #[test]
    fn test_rocket_boost_auto_releases() {
        let mut s = GameSession::with_variant(Variant::RocketBoost, 3).unwrap();
        tick(&mut s, &TickInput::default().with_intent(Intent::ActivateBoost));
        assert!(s.find(EntityKind::Rocket).unwrap().boost().unwrap().active);
        for _ in 0..120 {
            tick(&mut s, &TickInput::default());
        }
        assert!(!s.find(EntityKind::Rocket).unwrap().boost().unwrap().active);
    }

    #[test]
    fn test_entities_stay_ordered() {
        let mut s = GameSession::with_variant(Variant::FuegoFury, 8).unwrap();
        for i in 0..200 {
            let x = (i * 37 % 800) as f32;
            tick(&mut s, &TickInput::pointer(Vec2::new(x, 300.0)));
        }
        for pair in s.entities.windows(2) {
            assert!(pair[0].id < pair[1].id);
        }
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        for variant in Variant::ALL {
            let mut a = GameSession::with_variant(variant, 99999).unwrap();
            let mut b = GameSession::with_variant(variant, 99999).unwrap();
            for i in 0..300u32 {
                let p = Vec2::new((i * 13 % 500) as f32, (i * 7 % 600) as f32);
                let mut input = TickInput::pointer(p);
                if i % 50 == 0 {
                    input = input
                        .with_intent(Intent::ActivateBoost)
                        .with_intent(Intent::Pulse(p));
                }
                tick(&mut a, &input);
                tick(&mut b, &input);
            }
            assert_eq!(a.score, b.score, "{variant}");
            assert_eq!(a.miss_counter, b.miss_counter);
            assert_eq!(a.phase, b.phase);
            assert_eq!(a.entities.len(), b.entities.len());
            for (ea, eb) in a.entities.iter().zip(&b.entities) {
                assert_eq!(ea.id, eb.id);
                assert_eq!(ea.pos, eb.pos);
            }
        }
    }
}
