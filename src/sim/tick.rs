//! Fixed timestep simulation tick
//!
//! Core game loop step that advances a match deterministically.

use super::collision::{check_ground, net_collision, racket_collision, scorer_for_landing};
use super::state::{MatchEvent, MatchPhase, MatchState, Side};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held movement keys
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
    /// Serve the parked shuttle
    pub serve: bool,
    /// Start a new round (round over only)
    pub restart: bool,
    /// Leave the game (round over only)
    pub quit: bool,
}

/// Advance the match by one step and report what happened
pub fn tick(state: &mut MatchState, input: &TickInput) -> Vec<MatchEvent> {
    let mut events = Vec::new();

    // Round over: everything is frozen until restart or quit
    if let MatchPhase::RoundOver { .. } = state.phase {
        if input.restart {
            state.restart();
            log::info!("Match restarted");
            events.push(MatchEvent::Restarted);
        } else if input.quit {
            log::info!("Quit requested");
            events.push(MatchEvent::QuitRequested);
        }
        return events;
    }

    state.frame += 1;

    if input.serve && state.serve() {
        log::debug!(
            "{} serves, vel=({:.2}, {:.2})",
            state.server.as_str(),
            state.shuttle.vel.x,
            state.shuttle.vel.y
        );
        events.push(MatchEvent::Served(state.server));
    }

    // Rackets
    if input.left_up {
        let speed = state.left.speed;
        state.left.move_by(-speed);
    }
    if input.left_down {
        let speed = state.left.speed;
        state.left.move_by(speed);
    }
    if input.right_up {
        let speed = state.right.speed;
        state.right.move_by(-speed);
    }
    if input.right_down {
        let speed = state.right.speed;
        state.right.move_by(speed);
    }

    state.shuttle.update();

    // Collisions: rackets first, the net has the last word
    for side in [Side::Left, Side::Right] {
        let racket = match side {
            Side::Left => &state.left,
            Side::Right => &state.right,
        };
        if racket_collision(racket, &mut state.shuttle, &mut state.rng) {
            log::debug!("{} racket hit at y={:.1}", side.as_str(), state.shuttle.pos.y);
            events.push(MatchEvent::RacketHit(side));
        }
    }
    if net_collision(&mut state.shuttle) {
        log::debug!("Net hit at y={:.1}", state.shuttle.pos.y);
        events.push(MatchEvent::NetHit);
    }

    // Down, out, or settled mid-rally
    let point = check_ground(&state.shuttle).or_else(|| {
        (state.phase == MatchPhase::Rallying && !state.shuttle.in_play)
            .then(|| scorer_for_landing(state.shuttle.pos.x))
    });

    if let Some(scorer) = point {
        let winner = state.award_point(scorer);
        let (left, right) = state.scores();
        log::info!("Point to {}: {} - {}", scorer.as_str(), left, right);
        events.push(MatchEvent::PointScored {
            scorer,
            left,
            right,
        });
        if let Some(winner) = winner {
            log::info!("{} player wins the round {} - {}", winner.as_str(), left, right);
            events.push(MatchEvent::MatchWon(winner));
        }
    }

    // Parked shuttle follows the server's racket
    if state.phase == MatchPhase::Serving {
        state.park_shuttle();
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    const SERVE: TickInput = TickInput {
        left_up: false,
        left_down: false,
        right_up: false,
        right_down: false,
        serve: true,
        restart: false,
        quit: false,
    };

    /// Tick with no input until a point is scored
    fn play_out_rally(state: &mut MatchState) -> Vec<MatchEvent> {
        let mut all = Vec::new();
        for _ in 0..10_000 {
            let events = tick(state, &TickInput::default());
            let scored = events
                .iter()
                .any(|e| matches!(e, MatchEvent::PointScored { .. }));
            all.extend(events);
            if scored {
                return all;
            }
        }
        panic!("rally never ended");
    }

    #[test]
    fn test_tick_serving_to_rallying() {
        let mut state = MatchState::new(12345);
        assert_eq!(state.phase, MatchPhase::Serving);

        // Tick without serve - should stay in Serving
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.phase, MatchPhase::Serving);
        assert!(!state.shuttle.in_play);

        let events = tick(&mut state, &SERVE);
        assert_eq!(events, vec![MatchEvent::Served(Side::Left)]);
        assert_eq!(state.phase, MatchPhase::Rallying);
        assert!(state.shuttle.in_play);
        assert!(state.shuttle.vel.x > 0.0);
    }

    #[test]
    fn test_parked_shuttle_follows_server() {
        let mut state = MatchState::new(1);
        let input = TickInput {
            left_down: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.left.pos.y, 221.0);
        assert_eq!(state.shuttle.pos.y, state.left.center().y);
    }

    #[test]
    fn test_both_keys_cancel_out() {
        let mut state = MatchState::new(1);
        let input = TickInput {
            right_up: true,
            right_down: true,
            ..Default::default()
        };
        let before = state.right.pos;
        tick(&mut state, &input);
        assert_eq!(state.right.pos, before);
    }

    #[test]
    fn test_unreturned_serve_scores_for_server() {
        let mut state = MatchState::new(99);
        tick(&mut state, &SERVE);

        let events = play_out_rally(&mut state);
        // Nobody moves; the serve lands on the right half or clears the far racket
        let point = events
            .iter()
            .find_map(|e| match e {
                MatchEvent::PointScored { scorer, .. } => Some(*scorer),
                _ => None,
            })
            .expect("point scored");
        assert_eq!(point, Side::Left);
        assert_eq!(state.scores(), (1, 0));
        assert_eq!(state.server, Side::Left);
        assert!(state.is_serving());
        assert!(!state.shuttle.in_play);
    }

    #[test]
    fn test_landing_scores_and_resets() {
        let mut state = MatchState::new(4);
        tick(&mut state, &SERVE);
        state.shuttle.pos = Vec2::new(500.0, 515.0);
        state.shuttle.vel = Vec2::new(1.0, 2.0);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&MatchEvent::PointScored {
            scorer: Side::Left,
            left: 1,
            right: 0,
        }));
        assert_eq!(state.phase, MatchPhase::Serving);
    }

    #[test]
    fn test_settled_shuttle_ends_rally() {
        let mut state = MatchState::new(8);
        tick(&mut state, &SERVE);
        // Drifting to a stop high over the left half
        state.shuttle.pos = Vec2::new(300.0, 100.0);
        state.shuttle.vel = Vec2::new(0.1, -0.1);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&MatchEvent::PointScored {
            scorer: Side::Right,
            left: 0,
            right: 1,
        }));
        assert_eq!(state.server, Side::Right);
    }

    #[test]
    fn test_racket_return_reported() {
        let mut state = MatchState::new(10);
        tick(&mut state, &SERVE);
        // Coming in at the right racket's face
        state.shuttle.pos = Vec2::new(860.0, 260.0);
        state.shuttle.vel = Vec2::new(6.0, 0.0);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&MatchEvent::RacketHit(Side::Right)));
        assert!(state.shuttle.vel.x <= -MIN_RETURN_SPEED);
    }

    #[test]
    fn test_left_reaches_five_then_restart() {
        let mut state = MatchState::new(21);
        state.left.score = 4;
        state.right.score = 3;
        tick(&mut state, &SERVE);
        state.shuttle.pos = Vec2::new(700.0, 516.0);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&MatchEvent::MatchWon(Side::Left)));
        assert_eq!(state.winner(), Some(Side::Left));

        // Frozen: movement and serve are ignored
        let frame = state.frame;
        let input = TickInput {
            left_up: true,
            serve: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &input).is_empty());
        assert_eq!(state.frame, frame);
        assert_eq!(state.winner(), Some(Side::Left));

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &restart), vec![MatchEvent::Restarted]);
        assert_eq!(state.scores(), (0, 0));
        assert_eq!(state.server, Side::Left);
        assert_eq!(state.phase, MatchPhase::Serving);
    }

    #[test]
    fn test_right_wins_then_restart_hands_serve_to_left() {
        let mut state = MatchState::new(21);
        state.left.score = 2;
        state.right.score = 4;
        state.server = Side::Right;
        state.park_shuttle();
        tick(&mut state, &SERVE);
        state.shuttle.pos = Vec2::new(200.0, 516.0);

        let events = tick(&mut state, &TickInput::default());
        assert!(events.contains(&MatchEvent::MatchWon(Side::Right)));
        assert_eq!(state.server, Side::Right);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &restart), vec![MatchEvent::Restarted]);
        assert_eq!(state.server, Side::Left);
        assert_eq!(state.shuttle.pos, Vec2::new(50.0, state.left.center().y));
    }

    #[test]
    fn test_quit_only_in_round_over() {
        let mut state = MatchState::new(2);
        let quit = TickInput {
            quit: true,
            ..Default::default()
        };
        assert!(tick(&mut state, &quit).is_empty());

        state.phase = MatchPhase::RoundOver {
            winner: Side::Right,
        };
        assert_eq!(tick(&mut state, &quit), vec![MatchEvent::QuitRequested]);
    }

    #[test]
    fn test_determinism() {
        // Two matches with the same seed should produce identical results
        let mut state1 = MatchState::new(99999);
        let mut state2 = MatchState::new(99999);

        let inputs = [
            TickInput {
                right_up: true,
                ..Default::default()
            },
            SERVE,
            TickInput {
                left_down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                let e1 = tick(&mut state1, input);
                let e2 = tick(&mut state2, input);
                assert_eq!(e1, e2);
            }
        }

        assert_eq!(state1.frame, state2.frame);
        assert_eq!(state1.scores(), state2.scores());
        assert_eq!(state1.shuttle, state2.shuttle);
    }
}
