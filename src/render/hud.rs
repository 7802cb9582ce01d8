//! Backgrounds, status text and the terminal screen

use glam::Vec2;

use super::shapes::vertical_gradient;
use super::{Align, Color, DrawCmd, PresentationSink, palette};
use crate::config::{Bounds, Variant};
use crate::sim::GameSession;

const HUD_SIZE: f32 = 18.0;
const HUD_LINE: f32 = 25.0;
const HUD_MARGIN: f32 = 10.0;

fn label(text: String, pos: Vec2, size: f32, color: Color, align: Align) -> DrawCmd {
    DrawCmd::Text {
        text,
        pos,
        size,
        color,
        align,
    }
}

/// Solid clear or vertical gradient, depending on the variant
pub fn background(variant: Variant, bounds: &Bounds, sink: &mut dyn PresentationSink) {
    let (top, bottom) = palette(variant);
    if top == bottom {
        sink.draw(DrawCmd::Clear(top));
    } else {
        vertical_gradient(bounds, top, bottom, sink);
    }
}

/// Text lines shown in the top-left corner while playing
pub fn status_lines(session: &GameSession) -> Vec<String> {
    match session.variant() {
        Variant::Chomper => vec![
            format!("Score: {}", session.score),
            format!(
                "Poison Hits: {} / {}",
                session.miss_counter,
                session.config.penalty_threshold().unwrap_or(0)
            ),
        ],
        Variant::FuegoFury => vec![
            format!("Score: {}", session.score),
            format!("Misses: {}", session.miss_counter),
            "Move mouse left/right to catch the trash".to_string(),
        ],
        Variant::Ricochet => vec!["Click to send a shockwave".to_string()],
        Variant::RocketBoost => Vec::new(),
    }
}

pub fn status(session: &GameSession, sink: &mut dyn PresentationSink) {
    for (i, line) in status_lines(session).into_iter().enumerate() {
        let pos = Vec2::new(HUD_MARGIN, HUD_MARGIN + i as f32 * HUD_LINE);
        sink.draw(label(line, pos, HUD_SIZE, Color::WHITE, Align::TopLeft));
    }
    if session.variant() == Variant::RocketBoost {
        let pos = Vec2::new(session.bounds().center().x, 34.0);
        sink.draw(label(
            "Click for SUPER BOOST!".to_string(),
            pos,
            HUD_SIZE,
            Color::WHITE,
            Align::Center,
        ));
    }
}

/// Final tally line of the terminal screen
fn tally(session: &GameSession) -> String {
    match session.variant() {
        Variant::Chomper => format!("You ate {} foods", session.score),
        Variant::FuegoFury => format!("You caught {} bags", session.score),
        _ => format!("Score: {}", session.score),
    }
}

/// Replaces the playfield once the run has ended
pub fn game_over(session: &GameSession, sink: &mut dyn PresentationSink) {
    let center = session.bounds().center();
    sink.draw(label(
        "GAME OVER".to_string(),
        center - Vec2::new(0.0, 20.0),
        48.0,
        Color::rgb(255, 80, 80),
        Align::Center,
    ));
    sink.draw(label(
        tally(session),
        center + Vec2::new(0.0, 20.0),
        24.0,
        Color::WHITE,
        Align::Center,
    ));
    sink.draw(label(
        "Click to restart".to_string(),
        center + Vec2::new(0.0, 60.0),
        24.0,
        Color::WHITE,
        Align::Center,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawList;

    #[test]
    fn test_chomper_hud() {
        let mut session = GameSession::with_variant(Variant::Chomper, 1).unwrap();
        session.score = 4;
        session.miss_counter = 2;
        assert_eq!(
            status_lines(&session),
            vec!["Score: 4".to_string(), "Poison Hits: 2 / 10".to_string()]
        );
    }

    #[test]
    fn test_game_over_replaces_playfield() {
        let mut session = GameSession::with_variant(Variant::Chomper, 1).unwrap();
        session.score = 12;
        session.end_game();
        let frame = DrawList::capture(&session);
        let texts: Vec<&str> = frame.texts().collect();
        assert_eq!(texts, vec!["GAME OVER", "You ate 12 foods", "Click to restart"]);
        // Background plus three labels, no entities
        assert_eq!(frame.len(), 4);
    }

    #[test]
    fn test_rocket_hint_centered() {
        let session = GameSession::with_variant(Variant::RocketBoost, 1).unwrap();
        let frame = DrawList::capture(&session);
        let hint = frame
            .commands()
            .iter()
            .find_map(|cmd| match cmd {
                DrawCmd::Text { text, pos, align, .. } if text.contains("BOOST") => {
                    Some((*pos, *align))
                }
                _ => None,
            })
            .unwrap();
        assert_eq!(hint, (Vec2::new(250.0, 34.0), Align::Center));
    }

    #[test]
    fn test_gradient_backgrounds() {
        let session = GameSession::with_variant(Variant::FuegoFury, 1).unwrap();
        let frame = DrawList::capture(&session);
        assert!(matches!(frame.commands()[0], DrawCmd::Line { .. }));
    }
}
