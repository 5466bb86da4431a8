//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{
    ball_lost, resolve_bricks, resolve_paddle, resolve_side_walls, resolve_top_wall,
};
use super::rect::Rect;
use super::state::{Brick, BrickGrid, GameEvent, GamePhase, GameSession};
use crate::settings::{RestartPolicy, Settings};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Left direction held
    pub move_left: bool,
    /// Right direction held
    pub move_right: bool,
    /// Absolute paddle center (from mouse/touch position)
    pub pointer_x: Option<f32>,
    /// Restart request (click/tap/R), drained before anything else
    pub restart: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(session: &mut GameSession, input: &TickInput) {
    session.events.clear();

    if input.restart {
        restart(session);
    }

    // Paddle stays live behind the game over / win overlay
    apply_paddle_input(session, input);

    if session.phase != GamePhase::Playing {
        return;
    }

    session.time_ticks += 1;
    step_ball(session);
}

/// Force a transition back to `Playing`.
///
/// After a win with `RestartPolicy::KeepProgress` this starts the next round
/// with score and lives carried over; every other case is a full reset.
pub fn restart(session: &mut GameSession) {
    let keep_progress = session.phase == GamePhase::Win
        && session.settings.win_restart == RestartPolicy::KeepProgress;

    if keep_progress {
        session.round += 1;
        session.start_round();
        log::info!(
            "Round {} started (score={}, lives={})",
            session.round,
            session.score,
            session.lives
        );
    } else {
        session.reset();
        log::info!("Session restarted");
    }
    session.events.push(GameEvent::Restarted {
        round: session.round,
    });
}

/// Incremental keys first, then the absolute pointer overrides
fn apply_paddle_input(session: &mut GameSession, input: &TickInput) {
    let field_width = session.settings.field_width;
    let paddle = &mut session.paddle;

    let mut dx = 0.0;
    if input.move_left {
        dx -= paddle.speed;
    }
    if input.move_right {
        dx += paddle.speed;
    }
    paddle.move_by(dx, field_width);

    if let Some(x) = input.pointer_x {
        paddle.center_on(x, field_width);
    }
}

fn step_ball(session: &mut GameSession) {
    let settings = &session.settings;
    let ball = &mut session.ball;

    ball.pos += ball.vel;

    let side = resolve_side_walls(ball, settings.field_width);
    let top = resolve_top_wall(ball);
    if side || top {
        session.events.push(GameEvent::WallBounce);
    }

    if let Some(offset) = resolve_paddle(
        ball,
        &session.paddle,
        settings.max_deflection,
        settings.max_ball_speed,
    ) {
        session.events.push(GameEvent::PaddleHit { offset });
    }

    if let Some(contact) = resolve_bricks(ball, &mut session.grid) {
        if contact.destroyed {
            let points = settings.points_per_brick;
            session.score += points;
            log::trace!("Brick {} destroyed, score={}", contact.index, session.score);
            session.events.push(GameEvent::BrickDestroyed {
                index: contact.index,
                points,
            });
        } else {
            session.events.push(GameEvent::BrickHit {
                index: contact.index,
                hp: contact.hp,
            });
        }
    }

    if ball_lost(ball, settings.field_height) {
        session.lives = session.lives.saturating_sub(1);
        session.events.push(GameEvent::LifeLost {
            lives: session.lives,
        });
        if session.lives == 0 {
            session.phase = GamePhase::GameOver;
            session.events.push(GameEvent::GameOver {
                score: session.score,
            });
            log::info!("Game over, score={}", session.score);
            return;
        }
        log::debug!("Life lost, {} remaining", session.lives);
        session.serve_ball();
    }

    if session.grid.is_cleared() {
        session.phase = GamePhase::Win;
        session.events.push(GameEvent::Win {
            score: session.score,
        });
        log::info!(
            "Grid cleared in round {}, score={}",
            session.round,
            session.score
        );
    }
}

/// Generate the brick grid for a level.
///
/// Deterministic: rows are numbered from the bottom row (0) upward and every
/// `rows_per_hp` rows up adds one hit point. Bricks are stored row by row,
/// bottom row first.
pub fn generate_grid(settings: &Settings) -> BrickGrid {
    let cols = settings.brick_cols;
    let rows = settings.brick_rows;
    let pitch_x = settings.brick_width + settings.brick_gap;
    let pitch_y = settings.brick_height + settings.brick_gap;

    let mut bricks = Vec::with_capacity(settings.brick_count());
    for row in 0..rows {
        let y = settings.grid_offset_y + (rows - 1 - row) as f32 * pitch_y;
        let hp = (1 + row / settings.rows_per_hp) as u8;
        for col in 0..cols {
            let x = settings.grid_offset_x + col as f32 * pitch_x;
            bricks.push(Brick {
                rect: Rect::new(x, y, settings.brick_width, settings.brick_height),
                row,
                col,
                hp,
                destroyed: false,
            });
        }
    }

    log::debug!("Generated {}x{} brick grid", cols, rows);
    BrickGrid { cols, rows, bricks }
}
