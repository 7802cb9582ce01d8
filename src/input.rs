//! Pointer events to player intents
//!
//! The host feeds raw pointer events in canvas coordinates; the adapter
//! turns them into the `TickInput` the next `tick()` consumes. Continuous
//! state (pointer position, button held) persists across ticks, discrete
//! intents are one-shot and drained with the input.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Variant;
use crate::sim::{GamePhase, Intent, TickInput};

/// Raw event delivered by a host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    PointerMove { x: f32, y: f32 },
    PointerDown,
    PointerUp,
    /// Press where the host cannot tell press from release
    Click,
}

/// Event scheduled for a given tick, used by the headless runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub tick: u64,
    pub event: InputEvent,
}

/// Maps pointer events to the intents of one variant
#[derive(Debug, Clone)]
pub struct InputAdapter {
    variant: Variant,
    pointer: Option<Vec2>,
    pressed: bool,
    pending: Vec<Intent>,
}

impl InputAdapter {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            pointer: None,
            pressed: false,
            pending: Vec::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    /// Button pressed; `phase` is the session phase the press lands in
    pub fn pointer_down(&mut self, phase: GamePhase) {
        self.pressed = true;
        self.press(phase);
    }

    /// Button released; only a held button ends a boost
    pub fn pointer_up(&mut self) {
        let was_pressed = std::mem::replace(&mut self.pressed, false);
        if was_pressed && self.variant == Variant::RocketBoost {
            self.pending.push(Intent::DeactivateBoost);
        }
    }

    /// Press without a distinguishable release
    pub fn click(&mut self, phase: GamePhase) {
        self.press(phase);
    }

    fn press(&mut self, phase: GamePhase) {
        if phase == GamePhase::GameOver {
            self.pending.push(Intent::Restart);
            return;
        }
        match self.variant {
            Variant::Chomper | Variant::RocketBoost => self.pending.push(Intent::ActivateBoost),
            Variant::Ricochet => {
                if let Some(pos) = self.pointer {
                    self.pending.push(Intent::Pulse(pos));
                }
            }
            Variant::FuegoFury => {}
        }
    }

    pub fn handle(&mut self, event: InputEvent, phase: GamePhase) {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer_move(Vec2::new(x, y)),
            InputEvent::PointerDown => self.pointer_down(phase),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::Click => self.click(phase),
        }
    }

    /// Input for the next tick; one-shot intents are cleared
    pub fn take_tick_input(&mut self) -> TickInput {
        let mut intents = Vec::with_capacity(self.pending.len() + 1);
        if let Some(pos) = self.pointer {
            intents.push(Intent::SteerTarget(pos));
        }
        intents.append(&mut self.pending);
        TickInput { intents }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_becomes_steer_target() {
        let mut input = InputAdapter::new(Variant::Chomper);
        assert!(input.take_tick_input().intents.is_empty());

        input.pointer_move(Vec2::new(120.0, 80.0));
        let tick = input.take_tick_input();
        assert_eq!(input.pointer(), Some(Vec2::new(120.0, 80.0)));
        assert_eq!(tick, TickInput::pointer(Vec2::new(120.0, 80.0)));

        // Position persists, steering is re-issued every tick
        let tick = input.take_tick_input();
        assert_eq!(tick.intents.len(), 1);
    }

    #[test]
    fn test_press_maps_per_variant() {
        let mut chomper = InputAdapter::new(Variant::Chomper);
        chomper.pointer_down(GamePhase::Playing);
        assert!(chomper.take_tick_input().intents.contains(&Intent::ActivateBoost));

        let mut ricochet = InputAdapter::new(Variant::Ricochet);
        ricochet.pointer_move(Vec2::new(50.0, 60.0));
        ricochet.click(GamePhase::Playing);
        assert!(
            ricochet
                .take_tick_input()
                .intents
                .contains(&Intent::Pulse(Vec2::new(50.0, 60.0)))
        );

        let mut fuego = InputAdapter::new(Variant::FuegoFury);
        fuego.pointer_down(GamePhase::Playing);
        assert!(fuego.take_tick_input().intents.is_empty());
    }

    #[test]
    fn test_rocket_release_ends_boost() {
        let mut input = InputAdapter::new(Variant::RocketBoost);
        input.pointer_down(GamePhase::Playing);
        assert!(input.is_pressed());
        assert_eq!(input.take_tick_input().intents, vec![Intent::ActivateBoost]);

        input.pointer_up();
        assert!(!input.is_pressed());
        assert_eq!(input.take_tick_input().intents, vec![Intent::DeactivateBoost]);

        // A stray release without a press does nothing
        input.pointer_up();
        assert!(input.take_tick_input().intents.is_empty());
    }

    #[test]
    fn test_press_on_game_over_restarts() {
        let mut input = InputAdapter::new(Variant::Chomper);
        input.handle(InputEvent::PointerDown, GamePhase::GameOver);
        assert_eq!(input.take_tick_input().intents, vec![Intent::Restart]);
        // Drained
        assert!(input.take_tick_input().intents.is_empty());
    }

    #[test]
    fn test_ricochet_pulse_carries_press_position() {
        let mut input = InputAdapter::new(Variant::Ricochet);
        input.pointer_move(Vec2::new(10.0, 20.0));
        input.pointer_down(GamePhase::Playing);
        input.pointer_move(Vec2::new(30.0, 40.0));
        let tick = input.take_tick_input();
        assert_eq!(
            tick.intents,
            vec![
                Intent::SteerTarget(Vec2::new(30.0, 40.0)),
                Intent::Pulse(Vec2::new(10.0, 20.0)),
            ]
        );
    }

    #[test]
    fn test_scripted_event_json() {
        let json = r#"[{"tick": 3, "event": {"pointer_move": {"x": 10, "y": 20}}},
                       {"tick": 4, "event": "pointer_down"}]"#;
        let script: Vec<ScriptedEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(script[0].tick, 3);
        assert_eq!(script[0].event, InputEvent::PointerMove { x: 10.0, y: 20.0 });
        assert_eq!(script[1].event, InputEvent::PointerDown);
    }
}
