//! Draw command stream
//!
//! `render()` reads a session and emits a flat sequence of 2D primitives into
//! a `PresentationSink`. It never mutates the session and keeps no state of
//! its own, so the same frame can be rendered any number of times.

pub mod hud;
pub mod painters;
pub mod shapes;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Variant;
use crate::sim::GameSession;

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// Same colour with alpha in 0-255, clamped
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.round().clamp(0.0, 255.0) as u8,
            ..self
        }
    }

    /// Hue in degrees, saturation and brightness in percent
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let v = (brightness / 100.0).clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;
        let channel = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// Per-channel interpolation, `t` clamped to [0, 1]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| crate::lerp(a as f32, b as f32, t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// CSS colour string for canvas style setters
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Horizontal anchoring of a text label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// `pos` is the top-left corner
    TopLeft,
    /// `pos` is the centre of the label
    Center,
}

/// One drawing primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawCmd {
    Clear(Color),
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    /// Filled when `stroke` is `None`, otherwise an outline of that width
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        stroke: Option<f32>,
    },
    /// Filled convex polygon
    Polygon { points: Vec<Vec2>, color: Color },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        align: Align,
    },
}

/// Consumer of draw commands (host canvas, recorder, test probe)
pub trait PresentationSink {
    fn draw(&mut self, cmd: DrawCmd);
}

/// Recorded frame that can be replayed into another sink
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame of `session`
    pub fn capture(session: &GameSession) -> Self {
        let mut list = Self::new();
        render(session, &mut list);
        list
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Feed every recorded command, in order, into `sink`
    pub fn replay(&self, sink: &mut impl PresentationSink) {
        for cmd in &self.commands {
            sink.draw(cmd.clone());
        }
    }

    /// Text labels in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl PresentationSink for DrawList {
    fn draw(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }
}

/// Emit one frame of `session` into `sink`
pub fn render(session: &GameSession, sink: &mut impl PresentationSink) {
    let sink: &mut dyn PresentationSink = sink;
    let bounds = session.bounds();
    hud::background(session.variant(), &bounds, sink);

    if session.is_over() {
        hud::game_over(session, sink);
        return;
    }

    let frame = painters::Frame::of(session);
    for e in &session.entities {
        painters::paint(e, &frame, sink);
    }

    hud::status(session, sink);
}

/// Background colours of each variant: top and bottom of the gradient
pub fn palette(variant: Variant) -> (Color, Color) {
    match variant {
        Variant::Chomper => (Color::rgb(25, 25, 40), Color::rgb(25, 25, 40)),
        Variant::FuegoFury => (Color::rgb(10, 5, 20), Color::rgb(255, 110, 0)),
        Variant::Ricochet => (Color::from_hsb(260.0, 60.0, 40.0), Color::from_hsb(200.0, 80.0, 50.0)),
        Variant::RocketBoost => (Color::rgb(5, 10, 35), Color::rgb(5, 10, 35)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;

    #[test]
    fn test_from_hsb_primaries() {
        assert_eq!(Color::from_hsb(0.0, 100.0, 100.0), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hsb(120.0, 100.0, 100.0), Color::rgb(0, 255, 0));
        assert_eq!(Color::from_hsb(240.0, 100.0, 100.0), Color::rgb(0, 0, 255));
        assert_eq!(Color::from_hsb(360.0, 100.0, 100.0), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hsb(77.0, 0.0, 100.0), Color::WHITE);
        assert_eq!(Color::from_hsb(200.0, 80.0, 0.0), Color::BLACK);
    }

    #[test]
    fn test_color_lerp() {
        let a = Color::rgb(10, 5, 20);
        let b = Color::rgb(255, 110, 0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 2.0), b);
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_eq!(mid.r, 128);
    }

    #[test]
    fn test_css() {
        assert_eq!(Color::rgba(255, 0, 0, 255).to_css(), "rgba(255, 0, 0, 1.000)");
        assert_eq!(Color::WHITE.with_alpha(-3.0).a, 0);
    }

    #[test]
    fn test_render_is_pure_and_replayable() {
        let session = GameSession::with_variant(Variant::Chomper, 5).unwrap();
        let before = session.clone();
        let first = DrawList::capture(&session);
        let second = DrawList::capture(&session);
        assert_eq!(first, second);
        assert_eq!(session.entities, before.entities);

        let mut copy = DrawList::new();
        first.replay(&mut copy);
        first.replay(&mut copy);
        assert_eq!(copy.len(), first.len() * 2);
    }

    #[test]
    fn test_every_entity_is_painted() {
        for variant in Variant::ALL {
            let session = GameSession::with_variant(variant, 2).unwrap();
            let frame = DrawList::capture(&session);
            let circles = frame
                .commands()
                .iter()
                .filter(|c| matches!(c, DrawCmd::Circle { .. }))
                .count();
            let dots = session.count(EntityKind::Food)
                + session.count(EntityKind::Orb)
                + session.count(EntityKind::Star);
            assert!(circles >= dots, "{variant}");
        }
    }

    #[test]
    fn test_frame_starts_with_background() {
        let session = GameSession::with_variant(Variant::RocketBoost, 2).unwrap();
        let frame = DrawList::capture(&session);
        assert_eq!(frame.commands()[0], DrawCmd::Clear(Color::rgb(5, 10, 35)));
    }

    #[test]
    fn test_draw_list_serializes() {
        let session = GameSession::with_variant(Variant::Ricochet, 2).unwrap();
        let json = serde_json::to_string(&DrawList::capture(&session)).unwrap();
        assert!(json.contains("\"circle\""));
        let back: DrawList = serde_json::from_str(&json).unwrap();
        assert!(!back.is_empty());
    }
}
