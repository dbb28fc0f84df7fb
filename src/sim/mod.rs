//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one step per frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{check_ground, net_collision, net_rect, racket_collision, scorer_for_landing};
pub use rect::Rect;
pub use state::{MatchEvent, MatchPhase, MatchState, Racket, Shuttle, Side};
pub use tick::{TickInput, tick};
