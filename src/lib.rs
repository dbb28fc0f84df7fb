//! Shuttle Court - A two-player badminton arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rackets, shuttle, collisions, match state)
//! - `draw`: Drawable-surface seam and scene composition
//! - `renderer`: WebGPU rendering pipeline
//! - `input`: Keyboard mapping to per-tick input
//! - `audio`: Procedural sound effects
//! - `settings`: Persisted preferences

pub mod audio;
pub mod draw;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
///
/// Distances are court units (one per pixel of the reference court), velocities are
/// units per simulation step and accelerations units per step².
pub mod consts {
    /// Simulation rate; one physics step per frame
    pub const FPS: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FPS as f32;
    /// Maximum catch-up steps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Court dimensions
    pub const COURT_WIDTH: f32 = 900.0;
    pub const COURT_HEIGHT: f32 = 520.0;
    /// Court centre (whole units)
    pub const MID_X: f32 = 450.0;
    pub const MID_Y: f32 = 260.0;

    /// Racket defaults
    pub const RACKET_WIDTH: f32 = 12.0;
    pub const RACKET_HEIGHT: f32 = 90.0;
    /// Gap between each racket and its side wall
    pub const RACKET_INSET: f32 = 24.0;
    pub const RACKET_SPEED: f32 = 6.0;

    /// Net, centred on the court
    pub const NET_WIDTH: f32 = 6.0;
    pub const NET_HEIGHT: f32 = 140.0;

    /// Shuttle defaults
    pub const SHUTTLE_RADIUS: f32 = 6.0;
    pub const GRAVITY: f32 = 0.18;
    /// Fraction of vertical speed kept after bouncing off the top edge
    pub const TOP_BOUNCE_DAMPING: f32 = 0.4;
    /// Below this speed on both axes the shuttle settles
    pub const SETTLE_EPSILON: f32 = 0.3;

    /// Racket returns
    pub const MIN_RETURN_SPEED: f32 = 5.0;
    pub const RETURN_SPEED_BOOST: f32 = 2.5;
    /// Vertical speed added per unit of off-centre contact (-1..1)
    pub const SPIN_FACTOR: f32 = 4.0;
    /// Random vertical perturbation on returns, +/-
    pub const RETURN_JITTER: f32 = 0.8;

    /// Net response
    pub const NET_SPEED_DAMPING: f32 = 0.35;
    pub const NET_LIFT_DAMPING: f32 = 0.6;

    /// Serve
    pub const SERVE_SPEED_X: f32 = 6.5;
    pub const SERVE_SPEED_Y: f32 = -2.0;
    pub const SERVE_JITTER_MIN: f32 = -1.0;
    pub const SERVE_JITTER_MAX: f32 = 0.5;
    /// Gap between the racket face and a parked shuttle
    pub const SERVE_GAP: f32 = 8.0;

    /// Landing line; the shuttle is down once its centre reaches this y
    pub const FLOOR_Y: f32 = COURT_HEIGHT - SHUTTLE_RADIUS - 2.0;
    /// How far past a side wall the shuttle may fly before the point is called
    pub const OUT_MARGIN: f32 = 50.0;

    /// Points needed to win a round
    pub const SCORE_TO_WIN: u32 = 5;
}
