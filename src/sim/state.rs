//! Match state and core simulation types
//!
//! Everything the simulation mutates lives in [`MatchState`], owned by the driver.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::settings::Settings;

/// One half of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal direction of play away from this side's racket
    pub fn forward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
        }
    }
}

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Shuttle parked at the server's racket, waiting for the serve input
    Serving,
    /// Shuttle in flight
    Rallying,
    /// A side reached the winning score; waiting for restart or quit
    RoundOver { winner: Side },
}

/// Things that happened during a tick, for logging, sound and presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    Served(Side),
    RacketHit(Side),
    NetHit,
    PointScored { scorer: Side, left: u32, right: u32 },
    MatchWon(Side),
    Restarted,
    QuitRequested,
}

/// A player's racket
#[derive(Debug, Clone)]
pub struct Racket {
    pub side: Side,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical distance covered per tick while a key is held
    pub speed: f32,
    pub score: u32,
}

impl Racket {
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => RACKET_INSET,
            Side::Right => COURT_WIDTH - RACKET_INSET - RACKET_WIDTH,
        };
        Self {
            side,
            pos: Vec2::new(x, MID_Y - RACKET_HEIGHT / 2.0),
            size: Vec2::new(RACKET_WIDTH, RACKET_HEIGHT),
            speed: RACKET_SPEED,
            score: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Move vertically by `delta`, staying inside the court
    pub fn move_by(&mut self, delta: f32) {
        let max_y = COURT_HEIGHT - self.size.y;
        self.pos.y = (self.pos.y + delta).clamp(0.0, max_y);
    }
}

/// The shuttlecock
#[derive(Debug, Clone, PartialEq)]
pub struct Shuttle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Physics only runs while the shuttle is in play
    pub in_play: bool,
}

impl Default for Shuttle {
    fn default() -> Self {
        Self::new()
    }
}

impl Shuttle {
    pub fn new() -> Self {
        let mut shuttle = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: SHUTTLE_RADIUS,
            in_play: false,
        };
        shuttle.reset();
        shuttle
    }

    /// Centre the shuttle and take it out of play
    pub fn reset(&mut self) {
        self.pos = Vec2::new(MID_X, MID_Y);
        self.vel = Vec2::ZERO;
        self.in_play = false;
    }

    /// Advance one step: gravity, Euler integration, soft bounce off the top edge,
    /// then settle if both velocity components are tiny.
    pub fn update(&mut self) {
        if !self.in_play {
            return;
        }

        self.vel.y += GRAVITY;
        self.pos += self.vel;

        if self.pos.y < self.radius {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y * TOP_BOUNCE_DAMPING;
        }

        if self.vel.x.abs() < SETTLE_EPSILON && self.vel.y.abs() < SETTLE_EPSILON {
            self.in_play = false;
        }
    }

    /// Hold the shuttle in front of a racket, ready to be served
    pub fn park_beside(&mut self, racket: &Racket) {
        let offset = self.radius + SERVE_GAP;
        self.pos.x = match racket.side {
            Side::Left => racket.pos.x + racket.size.x + offset,
            Side::Right => racket.pos.x - offset,
        };
        self.pos.y = racket.center().y;
        self.vel = Vec2::ZERO;
        self.in_play = false;
    }
}

/// Complete match state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Source of serve and return jitter
    pub rng: Pcg32,
    pub left: Racket,
    pub right: Racket,
    pub shuttle: Shuttle,
    /// Side that serves the next rally
    pub server: Side,
    pub phase: MatchPhase,
    pub score_to_win: u32,
    /// Simulation tick counter
    pub frame: u64,
}

impl MatchState {
    /// Create a new match with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, &Settings::default())
    }

    pub fn with_settings(seed: u64, settings: &Settings) -> Self {
        let settings = settings.sanitized();
        let mut left = Racket::new(Side::Left);
        let mut right = Racket::new(Side::Right);
        left.speed = settings.racket_speed;
        right.speed = settings.racket_speed;

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            left,
            right,
            shuttle: Shuttle::new(),
            server: Side::Left,
            phase: MatchPhase::Serving,
            score_to_win: settings.score_to_win,
            frame: 0,
        };
        state.park_shuttle();
        state
    }

    pub fn racket(&self, side: Side) -> &Racket {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn racket_mut(&mut self, side: Side) -> &mut Racket {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// (left, right)
    pub fn scores(&self) -> (u32, u32) {
        (self.left.score, self.right.score)
    }

    pub fn is_serving(&self) -> bool {
        self.phase == MatchPhase::Serving
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::RoundOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Put the shuttle in front of the current server's racket
    pub fn park_shuttle(&mut self) {
        let racket = match self.server {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };
        self.shuttle.park_beside(racket);
    }

    /// Launch the parked shuttle toward the receiver.
    ///
    /// Returns false (and does nothing) unless the match is waiting on a serve.
    pub fn serve(&mut self) -> bool {
        if self.phase != MatchPhase::Serving || self.shuttle.in_play {
            return false;
        }

        let lift = SERVE_SPEED_Y + self.rng.random_range(SERVE_JITTER_MIN..=SERVE_JITTER_MAX);
        self.shuttle.vel = Vec2::new(SERVE_SPEED_X * self.server.forward(), lift);
        self.shuttle.in_play = true;
        self.phase = MatchPhase::Rallying;
        true
    }

    /// Credit a point, hand the serve to the scorer and check for a winner.
    ///
    /// Returns the round winner if this point ended the round.
    pub fn award_point(&mut self, scorer: Side) -> Option<Side> {
        self.racket_mut(scorer).score += 1;
        self.server = scorer;
        self.shuttle.reset();
        self.phase = MatchPhase::Serving;
        self.park_shuttle();

        let (left, right) = self.scores();
        if left >= self.score_to_win || right >= self.score_to_win {
            let winner = if left > right { Side::Left } else { Side::Right };
            self.phase = MatchPhase::RoundOver { winner };
            return Some(winner);
        }
        None
    }

    /// Zero the scores and return to the opening serve
    pub fn restart(&mut self) {
        self.left.score = 0;
        self.right.score = 0;
        self.server = Side::Left;
        self.shuttle.reset();
        self.phase = MatchPhase::Serving;
        self.park_shuttle();
    }
}
