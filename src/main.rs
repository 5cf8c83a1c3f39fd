//! Space Game entry point
//!
//! The browser build renders to a canvas and runs the simulation from
//! `requestAnimationFrame`. The native build has no window: it loads the
//! glyph sheet and plays a paced headless session with a scripted pilot.

use spacegame::sim::GameEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

fn log_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::BulletFired => log::trace!("bullet fired"),
            GameEvent::AsteroidSpawned => log::trace!("asteroid spawned"),
            other => log::debug!("{:?}", other),
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use spacegame::Settings;
    use spacegame::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use spacegame::font::GlyphSheet;
    use spacegame::frame::FrameClock;
    use spacegame::platform::{self, web};
    use spacegame::renderer::{RenderState, game_frame};
    use spacegame::sim::{GameState, InputLatch, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputLatch,
        clock: FrameClock,
        render_state: RenderState,
    }

    impl Game {
        /// Run the simulation frames that are due, then draw
        fn frame(&mut self, time: f64) {
            let steps = self.clock.advance(time);
            for _ in 0..steps {
                let events = tick(&mut self.state, &mut self.input);
                super::log_events(&events);
            }
            let frame = game_frame(&self.state, &self.input);
            self.render_state.present(&frame);
        }
    }

    pub async fn run() {
        platform::init_logging();
        log::info!("Space Game starting...");

        let settings = Settings::load();

        let (canvas, width, height) = match web::canvas("canvas", SCREEN_WIDTH, SCREEN_HEIGHT) {
            Ok(c) => c,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let sheet = match web::fetch_bytes(&settings.font.path).await {
            Ok(bytes) => {
                GlyphSheet::from_bytes(&bytes, settings.font.cell_width, settings.font.cell_height)
            }
            Err(e) => {
                log::error!("Could not load {}: {}", settings.font.path, e);
                return;
            }
        };
        let sheet = match sheet {
            Ok(sheet) => sheet,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let mut render_state = match web::init_renderer(canvas, width, height).await {
            Ok(r) => r,
            Err(e) => {
                log::error!("Failed to initialise WebGPU: {}", e);
                return;
            }
        };
        render_state.upload_glyphs(&sheet);

        let seed = settings.resolve_seed(web::now_ms());
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, settings.boundary),
            input: InputLatch::new(),
            clock: FrameClock::new(settings.target_fps),
            render_state,
        }));

        let keys = game.clone();
        if let Err(e) = web::listen_keys(move |key, pressed, repeat| {
            keys.borrow_mut().input.key_event(key, pressed, repeat);
        }) {
            log::error!("Failed to attach keyboard handlers: {}", e);
            return;
        }

        web::hide_loading();
        request_animation_frame(game);

        log::info!("Space Game running!");
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        web::request_animation_frame(move |time| game_loop(game, time));
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{Instant, SystemTime, UNIX_EPOCH};

    use spacegame::Settings;
    use spacegame::font::GlyphSheet;
    use spacegame::frame::FramePacer;
    use spacegame::renderer::game_frame;
    use spacegame::sim::{GameEvent, GameState, InputLatch, Key, tick};

    /// Frames between shots
    const FIRE_INTERVAL: u64 = 30;

    /// Deterministic key presses for a given frame
    fn pilot(frame: u64, input: &mut InputLatch) {
        input.up = frame % 120 < 45;
        input.left = frame % 200 < 30;
        input.right = (100..130).contains(&(frame % 200));
        if frame % FIRE_INTERVAL == 0 {
            input.key_event(Key::Fire, true, false);
        }
    }

    pub fn run() {
        let settings = Settings::load();

        let sheet = match GlyphSheet::open(
            &settings.font.path,
            settings.font.cell_width,
            settings.font.cell_height,
        ) {
            Ok(sheet) => sheet,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };

        let clock_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or_default();
        let seed = settings.resolve_seed(clock_ms);
        log::info!(
            "Headless session: {} frames at {} fps, seed {}",
            settings.headless_frames,
            settings.target_fps,
            seed
        );

        let mut state = GameState::new(seed, settings.boundary);
        let mut input = InputLatch::new();
        let mut pacer = FramePacer::new(settings.target_fps);
        let origin = Instant::now();
        let (mut deaths, mut max_level) = (0u32, state.level);

        for frame in 0..settings.headless_frames {
            pacer.wait(origin);
            pilot(frame, &mut input);

            let events = tick(&mut state, &mut input);
            super::log_events(&events);
            deaths += events
                .iter()
                .filter(|e| matches!(e, GameEvent::ShipDestroyed))
                .count() as u32;
            max_level = max_level.max(state.level);

            let scene = game_frame(&state, &input);
            let missing = scene
                .text
                .iter()
                .filter(|q| q.glyph >= sheet.glyphs().len())
                .count();
            if missing > 0 {
                log::warn!("{} HUD glyphs missing from sheet", missing);
            }
        }

        log::info!(
            "Session over after {:.1}s: score {}, level {} (max {}), {} ship(s) lost",
            origin.elapsed().as_secs_f64(),
            state.score,
            state.level,
            max_level,
            deaths
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    spacegame::platform::init_logging();
    log::info!("Space Game (native) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
