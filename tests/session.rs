//! Whole-session tests through the public API

use glam::Vec2;
use image::{Rgba, RgbaImage};

use spacegame::Settings;
use spacegame::font::GlyphSheet;
use spacegame::frame::FrameClock;
use spacegame::renderer::{font_demo_frame, game_frame};
use spacegame::sim::{
    Asteroid, BoundaryPolicy, GameEvent, GamePhase, GameState, InputLatch, Key, SizeClass, tick,
};

/// Scripted pilot: thrust in bursts, circle left, fire every 30 frames
fn pilot(frame: u64, input: &mut InputLatch) {
    input.key_event(Key::Up, frame % 90 < 30, false);
    input.key_event(Key::Left, frame % 60 < 10, false);
    if frame % 30 == 0 {
        input.key_event(Key::Fire, true, false);
    }
}

fn play(seed: u64, boundary: BoundaryPolicy, frames: u64) -> (GameState, Vec<GameEvent>) {
    let mut state = GameState::new(seed, boundary);
    let mut input = InputLatch::new();
    let mut log = Vec::new();
    for frame in 0..frames {
        pilot(frame, &mut input);
        log.extend(tick(&mut state, &mut input));
    }
    (state, log)
}

#[test]
fn sessions_are_reproducible() {
    let (a, events_a) = play(2024, BoundaryPolicy::Wrap, 3000);
    let (b, events_b) = play(2024, BoundaryPolicy::Wrap, 3000);
    assert_eq!(events_a, events_b);
    assert_eq!(a.score, b.score);
    assert_eq!(a.ship, b.ship);
    assert_eq!(a.asteroids, b.asteroids);
    assert_eq!(a.frame, 3000);
}

#[test]
fn scripted_pilot_fires_and_restarts() {
    let (_, events) = play(99, BoundaryPolicy::Wrap, 6000);
    assert!(events.contains(&GameEvent::BulletFired));

    // Every game over is followed by a restart once fire comes round again
    let deaths = events
        .iter()
        .filter(|e| **e == GameEvent::ShipDestroyed)
        .count();
    let restarts = events.iter().filter(|e| **e == GameEvent::Restarted).count();
    assert!(restarts == deaths || restarts + 1 == deaths);
}

#[test]
fn level_rises_with_score() {
    let mut state = GameState::new(5, BoundaryPolicy::Wrap);
    let mut input = InputLatch::new();
    state.ship.pos = Vec2::new(100.0, 100.0);
    let mut levels = Vec::new();

    // Feed the bullet a fresh stationary target until score reaches 10
    while state.score < 10 {
        state.asteroids.clear();
        state.asteroids.push(Asteroid::new(
            Vec2::new(400.0, 100.0),
            Vec2::ZERO,
            SizeClass::Huge,
        ));
        state.bullet.alive = false;
        input.key_event(Key::Fire, true, false);
        for _ in 0..40 {
            let events = tick(&mut state, &mut input);
            levels.extend(events.iter().filter_map(|e| match e {
                GameEvent::LevelUp { level } => Some(*level),
                _ => None,
            }));
            if !state.bullet.alive {
                break;
            }
        }
        assert!(state.is_phase(GamePhase::Playing));
    }

    assert_eq!(levels, vec![2, 3, 4]);
    assert_eq!(state.level, 4);
}

#[test]
fn game_over_freezes_until_fire() {
    let mut state = GameState::new(8, BoundaryPolicy::Wrap);
    let mut input = InputLatch::new();
    state.asteroids = vec![Asteroid::new(
        state.ship.pos,
        Vec2::new(1.0, 0.0),
        SizeClass::Medium,
    )];

    let events = tick(&mut state, &mut input);
    assert!(events.contains(&GameEvent::ShipDestroyed));
    assert!(state.is_phase(GamePhase::GameOver));

    let frozen = state.asteroids.clone();
    for _ in 0..30 {
        assert!(tick(&mut state, &mut input).is_empty());
    }
    assert_eq!(state.asteroids, frozen);

    input.press(Key::Fire);
    let events = tick(&mut state, &mut input);
    assert_eq!(events.first(), Some(&GameEvent::Restarted));
    assert!(state.is_phase(GamePhase::Playing));
    assert_eq!(state.score, 0);
    assert_eq!(state.asteroids.len(), 1);
}

#[test]
fn hud_uses_sheet_glyphs() {
    // Every cell a distinct grey so glyphs can be told apart
    let image = RgbaImage::from_fn(16 * 12, 6 * 16, |x, y| {
        let index = (y / 16) * 16 + x / 12;
        let level = (index + 1).min(255) as u8;
        Rgba([level, level, level, 255])
    });
    let sheet = GlyphSheet::from_rgba(&image, 12, 16).expect("sheet");

    let state = GameState::new(1, BoundaryPolicy::Wrap);
    let frame = game_frame(&state, &InputLatch::new());
    let s = sheet.glyphs()[frame.text[0].glyph].pixel(4, 4);
    // 'S' is code 83 -> slot 51
    assert_eq!(s, [52, 52, 52, 255]);

    let demo = font_demo_frame();
    assert!(demo.text.iter().all(|q| q.glyph < sheet.glyphs().len()));
}

#[test]
fn bundled_sheet_loads() {
    let font = Settings::default().font;
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(&font.path);
    let sheet = GlyphSheet::open(&path, font.cell_width, font.cell_height).expect("bundled sheet");
    assert_eq!(sheet.cell_size(), (12, 16));
    assert_eq!(sheet.glyphs().len(), 95);

    let opaque = |ch: char| {
        let glyph = sheet.glyph(ch).expect("printable");
        (0..16).any(|y| (0..12).any(|x| glyph.pixel(x, y)[3] == 255))
    };
    // Black background is keyed out, so space is empty and every other
    // printable character leaves a mark
    assert!(!opaque(' '));
    assert!((33u8..=126).map(char::from).all(opaque));
    assert_eq!(sheet.glyph('A').expect("A").pixel(1, 8), [255, 255, 255, 255]);
}

#[test]
fn settings_drive_a_session() {
    let settings = Settings::from_json(r#"{"boundary": "bounce", "seed": 77}"#).expect("json");
    let mut state = GameState::new(settings.resolve_seed(0.0), settings.boundary);
    assert_eq!(state.seed, 77);

    // One second of wall time at 60 fps
    let mut clock = FrameClock::new(settings.target_fps);
    let mut input = InputLatch::new();
    let mut frames = 0;
    for i in 0..=60 {
        for _ in 0..clock.advance(i as f64 * 1000.0 / 60.0) {
            tick(&mut state, &mut input);
            frames += 1;
        }
    }
    assert!((60..=62).contains(&frames), "ran {frames} frames");
    assert_eq!(state.frame, frames);
}
