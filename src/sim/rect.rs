//! Axis-aligned rectangle geometry for bricks and the paddle
//!
//! Field coordinates: origin at the top-left corner, +y points down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Strict overlap between the ball's bounding box (center ± radius) and
    /// this rectangle. Touching edges do not count.
    pub fn overlaps_ball_box(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius > self.left()
            && center.x - radius < self.right()
            && center.y + radius > self.top()
            && center.y - radius < self.bottom()
    }

    /// Offset of `x` from the horizontal center, normalized to -1..1 over the
    /// half-width and clamped
    pub fn normalized_offset(&self, x: f32) -> f32 {
        crate::clamp((x - self.center_x()) / (self.w / 2.0), -1.0, 1.0)
    }
}
