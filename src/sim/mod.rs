//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (grid order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{
    BrickContact, ball_lost, resolve_bricks, resolve_paddle, resolve_side_walls, resolve_top_wall,
};
pub use rect::Rect;
pub use snapshot::{BallView, BrickView, Snapshot};
pub use state::{Ball, Brick, BrickGrid, GameEvent, GamePhase, GameSession, Paddle};
pub use tick::{TickInput, generate_grid, restart, tick};
