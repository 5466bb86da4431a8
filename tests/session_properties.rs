//! Property tests for session invariants under arbitrary input sequences

use brick_breaker::sim::{GameEvent, GamePhase, GameSession, TickInput, restart, tick};
use brick_breaker::{RestartPolicy, Settings};
use proptest::prelude::*;

fn arb_input() -> impl Strategy<Value = TickInput> {
    (
        any::<bool>(),
        any::<bool>(),
        prop_oneof![
            3 => Just(None),
            3 => (-200.0f32..1000.0).prop_map(Some),
            1 => Just(Some(f32::NAN)),
            1 => Just(Some(f32::INFINITY)),
            1 => Just(Some(f32::NEG_INFINITY)),
        ],
    )
        .prop_map(|(move_left, move_right, pointer_x)| TickInput {
            move_left,
            move_right,
            pointer_x,
            restart: false,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn paddle_stays_in_field(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..400)) {
        let mut session = GameSession::new(Settings::default(), seed).unwrap();
        let max_x = session.settings.field_width - session.paddle.width;
        for input in &inputs {
            tick(&mut session, input);
            prop_assert!(session.paddle.pos.x >= 0.0);
            prop_assert!(session.paddle.pos.x <= max_x);
        }
    }

    #[test]
    fn ball_stays_inside_side_and_top_walls(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..400)) {
        let mut session = GameSession::new(Settings::default(), seed).unwrap();
        for input in &inputs {
            tick(&mut session, input);
            let ball = &session.ball;
            prop_assert!(ball.pos.x >= ball.radius);
            prop_assert!(ball.pos.x <= session.settings.field_width - ball.radius);
            prop_assert!(ball.pos.y >= ball.radius);
            prop_assert!(ball.vel.is_finite());
        }
    }

    #[test]
    fn score_moves_in_brick_steps(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..1500)) {
        let mut session = GameSession::new(Settings::default(), seed).unwrap();
        for input in &inputs {
            let score_before = session.score;
            let remaining_before = session.grid.remaining();
            tick(&mut session, input);

            prop_assert!(session.score >= score_before);
            let destroyed = remaining_before - session.grid.remaining();
            prop_assert_eq!(session.score - score_before, destroyed as u64 * 10);
            prop_assert!(destroyed <= 1);
        }
    }

    #[test]
    fn destroyed_bricks_stay_destroyed(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..1500)) {
        let mut session = GameSession::new(Settings::default(), seed).unwrap();
        let mut gone = vec![false; session.grid.len()];
        for input in &inputs {
            tick(&mut session, input);
            for (i, brick) in session.grid.bricks.iter().enumerate() {
                if gone[i] {
                    prop_assert!(brick.destroyed);
                }
                gone[i] = brick.destroyed;
            }
        }
    }

    #[test]
    fn ball_loss_costs_exactly_one_life(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..1500)) {
        let mut session = GameSession::new(Settings::default(), seed).unwrap();
        for input in &inputs {
            let lives_before = session.lives;
            tick(&mut session, input);

            let lost = session.events.iter().any(|e| matches!(e, GameEvent::LifeLost { .. }));
            if lost {
                prop_assert_eq!(session.lives, lives_before - 1);
                if session.lives > 0 {
                    // Re-served above the paddle, moving up
                    prop_assert_eq!(session.ball.pos.x, session.paddle.center_x());
                    prop_assert!(session.ball.pos.y < session.paddle.pos.y);
                    prop_assert!(session.ball.vel.y < 0.0);
                }
            } else {
                prop_assert_eq!(session.lives, lives_before);
            }
        }
    }

    #[test]
    fn terminal_states_are_exclusive_and_sticky(seed in any::<u64>(), inputs in prop::collection::vec(arb_input(), 1..3000)) {
        let mut session = GameSession::new(Settings::default(), seed).unwrap();
        let mut terminal: Option<GamePhase> = None;
        for input in &inputs {
            tick(&mut session, input);
            match session.phase {
                GamePhase::GameOver => {
                    prop_assert_eq!(session.lives, 0);
                    prop_assert!(!session.grid.is_cleared());
                }
                GamePhase::Win => {
                    prop_assert!(session.grid.is_cleared());
                    prop_assert!(session.lives > 0);
                }
                GamePhase::Playing => {
                    prop_assert!(terminal.is_none());
                    prop_assert!(session.lives > 0);
                }
            }
            if let Some(phase) = terminal {
                prop_assert_eq!(session.phase, phase);
            }
            if session.phase.is_terminal() {
                terminal = Some(session.phase);
            }
        }
    }
}

#[test]
fn full_grid_clear_wins_regardless_of_score_and_lives() {
    let mut session = GameSession::new(Settings::default(), 42).unwrap();
    session.lives = 1;
    session.score = 12_345;

    // Drop every brick but one, then knock the last one out
    let last = session.grid.len() - 1;
    for brick in session.grid.bricks.iter_mut().take(last) {
        brick.destroyed = true;
        brick.hp = 0;
    }
    session.grid.bricks[last].hp = 1;
    let rect = session.grid.bricks[last].rect;
    session.ball.pos = glam::Vec2::new(rect.center_x(), rect.bottom() + 10.0);
    session.ball.vel = glam::Vec2::new(0.0, -4.0);

    tick(&mut session, &TickInput::default());

    assert_eq!(session.phase, GamePhase::Win);
    assert!(!session.is_running());
    assert_eq!(session.lives, 1);
    assert_eq!(session.score, 12_355);
}

#[test]
fn restart_always_returns_fresh_game() {
    for phase in [GamePhase::GameOver, GamePhase::Win, GamePhase::Playing] {
        let mut session = GameSession::new(Settings::default(), 9).unwrap();
        session.phase = phase;
        session.score = 500;
        session.lives = 1;
        for brick in session.grid.bricks.iter_mut().take(30) {
            brick.destroyed = true;
        }

        restart(&mut session);

        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.lives, 3);
        assert_eq!(session.score, 0);
        assert_eq!(session.grid.remaining(), 60);
    }
}

#[test]
fn keep_progress_round_after_win() {
    let settings = Settings {
        win_restart: RestartPolicy::KeepProgress,
        ..Default::default()
    };
    let mut session = GameSession::new(settings, 9).unwrap();
    session.phase = GamePhase::Win;
    session.score = 600;

    let input = TickInput {
        restart: true,
        ..Default::default()
    };
    tick(&mut session, &input);

    assert_eq!(session.round, 2);
    assert_eq!(session.score, 600);
    assert_eq!(session.phase, GamePhase::Playing);
}

#[test]
fn zero_field_is_a_construction_error() {
    let settings = Settings {
        field_width: 0.0,
        field_height: 0.0,
        ..Default::default()
    };
    assert!(GameSession::new(settings, 1).is_err());
}

#[test]
fn ball_spawning_below_the_paddle_is_a_construction_error() {
    let settings = Settings {
        ball_spawn_drop: 1000.0,
        ..Default::default()
    };
    assert!(GameSession::new(settings, 1).is_err());

    // Defaults never lose a life on the opening tick
    let mut session = GameSession::new(Settings::default(), 1).unwrap();
    tick(&mut session, &TickInput::default());
    assert!(!session.events.iter().any(|e| matches!(e, GameEvent::LifeLost { .. })));
}
