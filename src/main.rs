//! Arcade Sim entry point
//!
//! Browser builds drive a session from `requestAnimationFrame` and paint it
//! onto a canvas. Native builds run a session headless from the command line.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use arcade_sim::platform::CanvasSink;
    use arcade_sim::{GameSession, InputAdapter, Variant, render, tick};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        input: InputAdapter,
        sink: CanvasSink,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Canvas pixel position of a client-space point
        fn to_canvas(&self, client_x: f32, client_y: f32) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            let bounds = self.session.bounds();
            let sx = bounds.width / (rect.width() as f32).max(1.0);
            let sy = bounds.height / (rect.height() as f32).max(1.0);
            (
                (client_x - rect.left() as f32) * sx,
                (client_y - rect.top() as f32) * sy,
            )
        }

        fn pointer_move(&mut self, client_x: f32, client_y: f32) {
            let (x, y) = self.to_canvas(client_x, client_y);
            self.input.pointer_move(glam::Vec2::new(x, y));
        }

        /// One tick, then one render pass
        fn frame(&mut self) {
            let input = self.input.take_tick_input();
            tick(&mut self.session, &input);
            render(&self.session, &mut self.sink);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Arcade Sim starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let variant = canvas
            .get_attribute("data-variant")
            .and_then(|name| match name.parse::<Variant>() {
                Ok(v) => Some(v),
                Err(e) => {
                    log::warn!("{e}, falling back to chomper");
                    None
                }
            })
            .unwrap_or(Variant::Chomper);

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::with_variant(variant, seed).expect("default config is valid");

        // Canvas pixels match the logical playfield
        let bounds = session.bounds();
        canvas.set_width(bounds.width as u32);
        canvas.set_height(bounds.height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context lookup failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let game = Rc::new(RefCell::new(Game {
            session,
            input: InputAdapter::new(variant),
            sink: CanvasSink::new(ctx, bounds.width as f64, bounds.height as f64),
            canvas: canvas.clone(),
        }));

        log::info!("{} initialized with seed: {}", variant, seed);

        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Arcade Sim running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer_move(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.pointer_move(event.client_x() as f32, event.client_y() as f32);
                let phase = g.session.phase;
                g.input.pointer_down(phase);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_up();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut()
                        .pointer_move(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(touch) = event.touches().get(0) {
                    g.pointer_move(touch.client_x() as f32, touch.client_y() as f32);
                }
                let phase = g.session.phase;
                g.input.pointer_down(phase);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.pointer_up();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::fs;

    use arcade_sim::input::ScriptedEvent;
    use arcade_sim::{DrawList, GameConfig, GameSession, InputAdapter, Variant, tick};

    const USAGE: &str = "usage: arcade-sim [variant] [--seed N] [--ticks N] \
                         [--config file.json] [--script events.json] [--dump-frame]";

    /// Command line of the headless runner
    #[derive(Debug, Clone, PartialEq)]
    pub struct Options {
        pub variant: Variant,
        pub seed: u64,
        pub ticks: u64,
        pub config: Option<String>,
        pub script: Option<String>,
        pub dump_frame: bool,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                variant: Variant::Chomper,
                seed: 1,
                ticks: 600,
                config: None,
                script: None,
                dump_frame: false,
            }
        }
    }

    impl Options {
        pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
            let mut opts = Self::default();
            let mut args = args.into_iter();
            while let Some(arg) = args.next() {
                let mut value = |flag: &str| {
                    args.next()
                        .ok_or_else(|| format!("{flag} needs a value\n{USAGE}"))
                };
                match arg.as_str() {
                    "--seed" => opts.seed = parse_number(&value("--seed")?)?,
                    "--ticks" => opts.ticks = parse_number(&value("--ticks")?)?,
                    "--config" => opts.config = Some(value("--config")?),
                    "--script" => opts.script = Some(value("--script")?),
                    "--dump-frame" => opts.dump_frame = true,
                    "-h" | "--help" => return Err(USAGE.to_string()),
                    flag if flag.starts_with('-') => {
                        return Err(format!("unknown flag {flag}\n{USAGE}"));
                    }
                    name => opts.variant = name.parse().map_err(|e| format!("{e}\n{USAGE}"))?,
                }
            }
            Ok(opts)
        }
    }

    fn parse_number(s: &str) -> Result<u64, String> {
        s.parse().map_err(|_| format!("not a number: {s}"))
    }

    pub fn run(opts: &Options) -> Result<(), Box<dyn Error>> {
        let config = match &opts.config {
            Some(path) => {
                let config = GameConfig::from_json(&fs::read_to_string(path)?)?;
                if config.variant() != opts.variant {
                    log::info!("{} overrides requested {}", path, opts.variant);
                }
                config
            }
            None => opts.variant.default_config(),
        };
        let variant = config.variant();

        let mut script: Vec<ScriptedEvent> = match &opts.script {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => Vec::new(),
        };
        script.sort_by_key(|e| e.tick);

        let mut session = GameSession::new(config, opts.seed)?;
        let mut input = InputAdapter::new(variant);
        let mut next_event = 0;

        for t in 1..=opts.ticks {
            while let Some(scripted) = script.get(next_event).filter(|e| e.tick <= t) {
                input.handle(scripted.event, session.phase);
                next_event += 1;
            }
            tick(&mut session, &input.take_tick_input());
        }

        log::info!(
            "{} after {} ticks: score {}, misses {}, phase {:?}, {} entities",
            variant,
            opts.ticks,
            session.score,
            session.miss_counter,
            session.phase,
            session.entities.len()
        );

        if opts.dump_frame {
            println!("{}", serde_json::to_string_pretty(&DrawList::capture(&session))?);
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(s: &str) -> Vec<String> {
            s.split_whitespace().map(String::from).collect()
        }

        #[test]
        fn test_parse_defaults() {
            assert_eq!(Options::parse(Vec::new()).unwrap(), Options::default());
        }

        #[test]
        fn test_parse_full_command_line() {
            let opts =
                Options::parse(args("rocket --seed 7 --ticks 30 --script s.json --dump-frame"))
                    .unwrap();
            assert_eq!(opts.variant, Variant::RocketBoost);
            assert_eq!(opts.seed, 7);
            assert_eq!(opts.ticks, 30);
            assert_eq!(opts.script.as_deref(), Some("s.json"));
            assert!(opts.dump_frame);
        }

        #[test]
        fn test_parse_errors() {
            assert!(Options::parse(args("--seed")).is_err());
            assert!(Options::parse(args("--seed abc")).is_err());
            assert!(Options::parse(args("pinball")).is_err());
            assert!(Options::parse(args("--fast")).is_err());
        }

        #[test]
        fn test_headless_run() {
            let opts = Options {
                variant: Variant::Ricochet,
                ticks: 50,
                ..Default::default()
            };
            assert!(run(&opts).is_ok());
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Arcade Sim (native) starting...");

    let opts = match native::Options::parse(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };
    if let Err(e) = native::run(&opts) {
        eprintln!("arcade-sim: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
