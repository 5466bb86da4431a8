//! Collision detection and response
//!
//! Each resolver mutates the ball in place and reports whether it fired.
//! They are applied in a fixed order by `tick`.

use super::state::{Ball, BrickGrid, Paddle};
use crate::sign;

/// Outcome of the brick pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickContact {
    /// Index into `BrickGrid::bricks`
    pub index: usize,
    /// Hit points left after the hit
    pub hp: u8,
    /// Whether this hit destroyed the brick
    pub destroyed: bool,
}

/// Reflect off the left/right walls. The ball is pushed back inside the
/// field and its horizontal velocity pointed away from the wall it crossed.
pub fn resolve_side_walls(ball: &mut Ball, field_width: f32) -> bool {
    if ball.pos.x < ball.radius {
        ball.pos.x = ball.radius;
        ball.vel.x = ball.vel.x.abs();
        true
    } else if ball.pos.x > field_width - ball.radius {
        ball.pos.x = field_width - ball.radius;
        ball.vel.x = -ball.vel.x.abs();
        true
    } else {
        false
    }
}

/// Reflect off the top wall. The ball is pushed back below the wall and its
/// vertical velocity pointed downward.
pub fn resolve_top_wall(ball: &mut Ball) -> bool {
    if ball.pos.y < ball.radius {
        ball.pos.y = ball.radius;
        ball.vel.y = ball.vel.y.abs();
        true
    } else {
        false
    }
}

/// Bounce off the paddle.
///
/// Fires only while the ball is descending, its bottom edge is at or past the
/// paddle's top edge and its center lies within the paddle span. The outgoing
/// horizontal velocity comes from the impact offset (-1..1) scaled by
/// `max_deflection`; then both axes are nudged faster by `ball.speed_inc`.
///
/// Returns the normalized impact offset on a hit.
pub fn resolve_paddle(
    ball: &mut Ball,
    paddle: &Paddle,
    max_deflection: f32,
    max_speed: Option<f32>,
) -> Option<f32> {
    let rect = paddle.rect();
    let hit = ball.vel.y > 0.0
        && ball.bottom() >= rect.top()
        && ball.pos.x >= rect.left()
        && ball.pos.x <= rect.right();
    if !hit {
        return None;
    }

    let offset = rect.normalized_offset(ball.pos.x);
    let incoming_vx = ball.vel.x;

    ball.vel.y = -ball.vel.y;
    ball.vel.x = offset * max_deflection;

    // A dead-center hit has no deflection sign of its own; keep travelling
    // the way the ball came in
    let mut dir = sign(ball.vel.x);
    if dir == 0.0 {
        dir = sign(incoming_vx);
    }
    if dir == 0.0 {
        dir = 1.0;
    }
    ball.vel.x += dir * ball.speed_inc;
    ball.vel.y -= ball.speed_inc;

    ball.limit_speed(max_speed);
    Some(offset)
}

/// Hit at most one brick: the first live brick, in grid order, whose
/// rectangle overlaps the ball's bounding box.
///
/// The vertical velocity is always inverted, whatever side was struck.
pub fn resolve_bricks(ball: &mut Ball, grid: &mut BrickGrid) -> Option<BrickContact> {
    let (index, brick) = grid
        .bricks
        .iter_mut()
        .enumerate()
        .find(|(_, b)| !b.destroyed && b.rect.overlaps_ball_box(ball.pos, ball.radius))?;

    ball.vel.y = -ball.vel.y;
    let destroyed = brick.hit();
    Some(BrickContact {
        index,
        hp: brick.hp,
        destroyed,
    })
}

/// Ball's top edge is below the bottom of the field
pub fn ball_lost(ball: &Ball, field_height: f32) -> bool {
    ball.top() > field_height
}
