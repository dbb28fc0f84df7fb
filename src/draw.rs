//! Drawable-surface seam
//!
//! The simulation knows nothing about pixels. A frontend supplies a [`Surface`] and
//! [`draw_match`] paints one frame of the match onto it in court coordinates
//! (origin top-left, y down).

use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{MatchPhase, MatchState, Rect, Side, net_rect};

/// RGBA, components 0.0 - 1.0
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const COURT: Color = [0.118, 0.627, 0.275, 1.0];
    pub const LINE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const LEFT_RACKET: Color = [0.196, 0.471, 0.784, 1.0];
    pub const RIGHT_RACKET: Color = [0.784, 0.235, 0.235, 1.0];
    pub const SHUTTLE: Color = [0.04, 0.04, 0.04, 1.0];
    pub const TEXT: Color = [0.04, 0.04, 0.04, 1.0];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Large,
}

impl TextSize {
    /// Nominal glyph height in court units
    pub fn height(self) -> f32 {
        match self {
            TextSize::Small => 18.0,
            TextSize::Large => 34.0,
        }
    }
}

/// Which point of the text `pos` refers to horizontally; `pos.y` is always the top
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: TextSize,
    pub color: Color,
    pub anchor: TextAnchor,
}

impl TextStyle {
    pub const fn new(size: TextSize, anchor: TextAnchor) -> Self {
        Self {
            size,
            color: colors::TEXT,
            anchor,
        }
    }
}

/// Minimal set of drawing primitives a frontend must provide
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}

pub const CONTROLS_HINT: &str = "W/S = Left | Up/Down = Right | Space = Serve";
pub const RESTART_HINT: &str = "Press R to play again or ESC to quit.";

/// Text line shown when a round is over
pub fn winner_banner(winner: Side) -> String {
    format!("{} Player wins!", winner.as_str())
}

/// Draw one frame: court, net, rackets, shuttle, then HUD text
pub fn draw_match(state: &MatchState, settings: &Settings, surface: &mut impl Surface) {
    // Court and lines
    surface.fill_rect(
        Rect::new(0.0, 0.0, COURT_WIDTH, COURT_HEIGHT),
        colors::COURT,
    );
    surface.fill_rect(
        Rect::new(0.0, COURT_HEIGHT - 4.0, COURT_WIDTH, 4.0),
        colors::LINE,
    );
    surface.fill_rect(net_rect(), colors::LINE);

    surface.fill_rect(state.left.rect(), colors::LEFT_RACKET);
    surface.fill_rect(state.right.rect(), colors::RIGHT_RACKET);
    surface.fill_circle(state.shuttle.pos, state.shuttle.radius, colors::SHUTTLE);

    // Scores and hint
    let small = |anchor| TextStyle::new(TextSize::Small, anchor);
    surface.draw_text(
        &format!("Left: {}", state.left.score),
        Vec2::new(40.0, 12.0),
        small(TextAnchor::Start),
    );
    surface.draw_text(
        &format!("Right: {}", state.right.score),
        Vec2::new(COURT_WIDTH - 40.0, 12.0),
        small(TextAnchor::End),
    );
    if settings.show_controls {
        surface.draw_text(
            CONTROLS_HINT,
            Vec2::new(MID_X, 12.0),
            small(TextAnchor::Middle),
        );
    }

    if let MatchPhase::RoundOver { winner } = state.phase {
        let large = TextStyle::new(TextSize::Large, TextAnchor::Middle);
        surface.draw_text(
            &winner_banner(winner),
            Vec2::new(MID_X, MID_Y - large.size.height() / 2.0),
            large,
        );
        surface.draw_text(
            RESTART_HINT,
            Vec2::new(MID_X, MID_Y + 50.0),
            small(TextAnchor::Middle),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Rect(Rect, Color),
        Circle(Vec2, f32),
        Text(String, TextAnchor),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl Recorder {
        fn texts(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Text(t, _) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for Recorder {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.calls.push(Call::Rect(rect, color));
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color) {
            self.calls.push(Call::Circle(center, radius));
        }

        fn draw_text(&mut self, text: &str, _pos: Vec2, style: TextStyle) {
            self.calls.push(Call::Text(text.to_string(), style.anchor));
        }
    }

    #[test]
    fn test_draws_rackets_shuttle_and_scores() {
        let mut state = MatchState::new(1);
        state.left.score = 2;
        state.right.score = 3;
        let mut surface = Recorder::default();

        draw_match(&state, &Settings::default(), &mut surface);

        assert!(
            surface
                .calls
                .contains(&Call::Rect(state.left.rect(), colors::LEFT_RACKET))
        );
        assert!(
            surface
                .calls
                .contains(&Call::Rect(state.right.rect(), colors::RIGHT_RACKET))
        );
        assert!(surface.calls.contains(&Call::Rect(net_rect(), colors::LINE)));
        assert!(
            surface
                .calls
                .contains(&Call::Circle(state.shuttle.pos, SHUTTLE_RADIUS))
        );
        assert_eq!(surface.texts(), vec!["Left: 2", "Right: 3", CONTROLS_HINT]);
        // Court is painted first so everything else lands on top
        assert!(matches!(surface.calls[0], Call::Rect(_, c) if c == colors::COURT));
    }

    #[test]
    fn test_hint_shown_during_rally() {
        let mut state = MatchState::new(1);
        assert!(state.serve());
        assert_eq!(state.phase, MatchPhase::Rallying);
        let mut surface = Recorder::default();
        draw_match(&state, &Settings::default(), &mut surface);
        assert!(surface.texts().contains(&CONTROLS_HINT));
    }

    #[test]
    fn test_hint_hidden_when_disabled() {
        let state = MatchState::new(1);
        let settings = Settings {
            show_controls: false,
            ..Default::default()
        };
        let mut surface = Recorder::default();
        draw_match(&state, &settings, &mut surface);
        assert!(!surface.texts().contains(&CONTROLS_HINT));
    }

    #[test]
    fn test_round_over_banner() {
        let mut state = MatchState::new(1);
        state.left.score = 1;
        state.right.score = 5;
        state.phase = MatchPhase::RoundOver {
            winner: Side::Right,
        };
        let mut surface = Recorder::default();

        draw_match(&state, &Settings::default(), &mut surface);

        let texts = surface.texts();
        assert!(texts.contains(&"Right Player wins!"));
        assert!(texts.contains(&RESTART_HINT));
    }
}
