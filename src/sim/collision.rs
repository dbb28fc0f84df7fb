//! Collision detection and response
//!
//! Contact tests use the shuttle's centre point against axis-aligned rectangles rather
//! than a true circle/rectangle overlap. Near racket corners this can register a hit a
//! little late or not at all, which is part of how the game feels.

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::state::{Racket, Shuttle, Side};
use crate::consts::*;

/// The net: a fixed post in the middle of the court
pub fn net_rect() -> Rect {
    Rect::from_center(Vec2::new(MID_X, MID_Y), Vec2::new(NET_WIDTH, NET_HEIGHT))
}

/// Resolve a racket strike.
///
/// On contact the shuttle is pushed clear of the racket face and sent toward the far side
/// at no less than [`MIN_RETURN_SPEED`]. Where it met the racket adds vertical "spin",
/// plus a small random perturbation drawn from `rng`. Returns whether the racket hit.
pub fn racket_collision(racket: &Racket, shuttle: &mut Shuttle, rng: &mut impl Rng) -> bool {
    if !shuttle.in_play {
        return false;
    }
    if !racket.rect().contains_point(shuttle.pos) {
        return false;
    }

    let speed = (shuttle.vel.x.abs() + RETURN_SPEED_BOOST).max(MIN_RETURN_SPEED);
    if racket.pos.x < MID_X {
        shuttle.vel.x = speed;
        shuttle.pos.x = racket.pos.x + racket.size.x + shuttle.radius + 1.0;
    } else {
        shuttle.vel.x = -speed;
        shuttle.pos.x = racket.pos.x - shuttle.radius - 1.0;
    }

    // -1 at the top edge, +1 at the bottom edge
    let half_height = racket.size.y / 2.0;
    let rel = (shuttle.pos.y - (racket.pos.y + half_height)) / half_height;
    shuttle.vel.y += rel * SPIN_FACTOR;
    shuttle.vel.y += rng.random_range(-RETURN_JITTER..=RETURN_JITTER);

    shuttle.in_play = true;
    true
}

/// Bounce the shuttle back off the net. Returns whether it touched the net.
///
/// Checked after the rackets and whether or not the shuttle is in play, so a shuttle
/// inside the net always leaves with the net's velocity.
pub fn net_collision(shuttle: &mut Shuttle) -> bool {
    if !net_rect().contains_point(shuttle.pos) {
        return false;
    }

    shuttle.vel.x *= -NET_SPEED_DAMPING;
    shuttle.vel.y = -shuttle.vel.y.abs() * NET_LIFT_DAMPING;
    shuttle.in_play = true;
    true
}

/// Side that wins the point when the shuttle comes down at `x`
#[inline]
pub fn scorer_for_landing(x: f32) -> Side {
    if x > MID_X { Side::Left } else { Side::Right }
}

/// Check whether the shuttle is down or out. Returns the side that scores.
pub fn check_ground(shuttle: &Shuttle) -> Option<Side> {
    if shuttle.pos.y >= FLOOR_Y {
        return Some(scorer_for_landing(shuttle.pos.x));
    }
    // Past a side wall before reaching the floor
    if shuttle.pos.x < -OUT_MARGIN {
        return Some(Side::Right);
    }
    if shuttle.pos.x > COURT_WIDTH + OUT_MARGIN {
        return Some(Side::Left);
    }
    None
}
