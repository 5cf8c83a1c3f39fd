//! Per-frame draw lists
//!
//! Scenes are built on the CPU from simulation state so they can be tested
//! without a GPU. The pipeline only uploads and draws what a `Frame` holds.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{
    FIRST_GLYPH, FONT_DEMO_HEIGHT, FONT_DEMO_WIDTH, GLYPH_COUNT, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::font::{GlyphQuad, TextStyle};
use crate::sim::{GamePhase, GameState, InputLatch};

/// HUD anchor points in playfield units
const SCORE_POS: Vec2 = Vec2::new(10.0, 574.0);
const LEVEL_POS: Vec2 = Vec2::new(10.0, 554.0);
const GAME_OVER_Y: f32 = 300.0;
const PRESS_FIRE_Y: f32 = 276.0;

/// Font demo layout
const DEMO_TEXT_POS: Vec2 = Vec2::new(100.0, 100.0);
const CHARSET_POS: Vec2 = Vec2::new(8.0, 200.0);
const CHARSET_COLUMNS: usize = 24;

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Size of the orthographic view (origin bottom-left, y up)
    pub view: Vec2,
    pub clear: [f32; 4],
    /// Triangle list
    pub shapes: Vec<Vertex>,
    pub text: Vec<GlyphQuad>,
}

impl Frame {
    pub fn new(view: Vec2, clear: [f32; 4]) -> Self {
        Self {
            view,
            clear,
            shapes: Vec::new(),
            text: Vec::new(),
        }
    }

    pub fn push_text(&mut self, style: &TextStyle, text: &str, pen: Vec2) {
        self.text.extend(style.layout(text, pen));
    }

    /// A label followed directly by a number
    pub fn push_counter(&mut self, style: &TextStyle, label: &str, value: u32, pen: Vec2) {
        self.push_text(style, label, pen);
        let after = pen + Vec2::new(style.width(label), 0.0);
        self.text.extend(style.layout_int(i64::from(value), after));
    }
}

/// Build the game scene: playfield objects, then the HUD
pub fn game_frame(state: &GameState, input: &InputLatch) -> Frame {
    let mut frame = Frame::new(Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT), colors::BACKGROUND);

    if state.bullet.alive {
        frame.shapes.extend(shapes::bullet(&state.bullet));
    }
    for asteroid in state.asteroids.iter().filter(|a| a.alive) {
        frame.shapes.extend(shapes::asteroid(asteroid));
    }
    if state.ship.alive {
        frame.shapes.extend(shapes::ship(&state.ship, input.up));
    }

    let style = TextStyle::default();
    frame.push_counter(&style, "SCORE ", state.score, SCORE_POS);
    frame.push_counter(&style, "LEVEL ", state.level, LEVEL_POS);

    if state.is_phase(GamePhase::GameOver) {
        let center_x = SCREEN_WIDTH / 2.0;
        for (text, y) in [("GAME OVER", GAME_OVER_Y), ("PRESS SPACE", PRESS_FIRE_Y)] {
            let pen = style.centered(text, center_x, y);
            frame.push_text(&style, text, pen);
        }
    }

    frame
}

/// Build the font demo scene
pub fn font_demo_frame() -> Frame {
    let mut frame = Frame::new(
        Vec2::new(FONT_DEMO_WIDTH, FONT_DEMO_HEIGHT),
        colors::FONT_DEMO_BACKGROUND,
    );
    let style = TextStyle::default();
    frame.push_text(&style, "Test", DEMO_TEXT_POS);

    let charset: Vec<char> = (0..GLYPH_COUNT)
        .map(|i| char::from(FIRST_GLYPH + i as u8))
        .collect();
    for (row, chunk) in charset.chunks(CHARSET_COLUMNS).enumerate() {
        let line: String = chunk.iter().collect();
        let pen = CHARSET_POS - Vec2::new(0.0, row as f32 * style.glyph_height);
        frame.push_text(&style, &line, pen);
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BoundaryPolicy;

    fn text_at(frame: &Frame, y: f32) -> String {
        frame
            .text
            .iter()
            .filter(|q| q.origin.y == y)
            .map(|q| char::from(FIRST_GLYPH + q.glyph as u8))
            .collect()
    }

    #[test]
    fn test_hud_text() {
        let mut state = GameState::new(1, BoundaryPolicy::Wrap);
        state.score = 12;
        let frame = game_frame(&state, &InputLatch::new());
        // Spaces produce quads too (glyph 0)
        assert_eq!(text_at(&frame, 574.0), "SCORE 12");
        assert_eq!(text_at(&frame, 554.0), "LEVEL 1");
        assert_eq!(frame.text[0].origin, SCORE_POS);
        assert_eq!(frame.clear, colors::BACKGROUND);
    }

    #[test]
    fn test_counter_digits_follow_label() {
        let mut state = GameState::new(1, BoundaryPolicy::Wrap);
        state.score = 407;
        let frame = game_frame(&state, &InputLatch::new());
        let score: Vec<_> = frame.text.iter().filter(|q| q.origin.y == 574.0).collect();
        assert_eq!(score.len(), "SCORE 407".len());
        // Digits start right after "SCORE " (6 advances of 12)
        assert_eq!(score[6].origin.x, 10.0 + 72.0);
        assert_eq!(score[6].glyph, usize::from(b'4' - 32));
        assert_eq!(score[8].glyph, usize::from(b'7' - 32));
    }

    #[test]
    fn test_game_over_banner() {
        let mut state = GameState::new(1, BoundaryPolicy::Wrap);
        let playing = game_frame(&state, &InputLatch::new());
        assert!(text_at(&playing, GAME_OVER_Y).is_empty());

        state.ship.alive = false;
        state.set_phase(GamePhase::GameOver);
        let over = game_frame(&state, &InputLatch::new());
        assert_eq!(text_at(&over, GAME_OVER_Y), "GAME OVER");
        assert_eq!(text_at(&over, PRESS_FIRE_Y), "PRESS SPACE");
    }

    #[test]
    fn test_dead_ship_not_drawn() {
        let mut state = GameState::new(1, BoundaryPolicy::Wrap);
        state.asteroids.clear();
        let alive = game_frame(&state, &InputLatch::new());
        assert!(alive.shapes.iter().any(|v| v.color == colors::SHIP));

        state.ship.alive = false;
        let dead = game_frame(&state, &InputLatch::new());
        assert!(dead.shapes.is_empty());
    }

    #[test]
    fn test_thrust_follows_up_key() {
        let mut state = GameState::new(1, BoundaryPolicy::Wrap);
        state.asteroids.clear();
        let mut input = InputLatch::new();
        input.up = true;
        let frame = game_frame(&state, &input);
        assert!(frame.shapes.iter().any(|v| v.color == colors::THRUST));
    }

    #[test]
    fn test_font_demo_frame() {
        let frame = font_demo_frame();
        assert_eq!(frame.view, Vec2::new(320.0, 240.0));
        assert_eq!(frame.clear, colors::FONT_DEMO_BACKGROUND);
        assert_eq!(text_at(&frame, 100.0), "Test");
        assert_eq!(frame.text.len(), 4 + 95);
        assert!(frame.text.iter().all(|q| q.origin.x + q.size.x <= 320.0));
        assert_eq!(text_at(&frame, 200.0).len(), 24);
    }
}
