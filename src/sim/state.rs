//! Game state and core simulation types
//!
//! A `GameSession` owns everything one playthrough mutates. It is created
//! through `GameSession::new`, which validates the settings first.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::tick::generate_grid;
use crate::clamp;
use crate::settings::{ConfigError, Settings};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Out of lives; waits for a restart
    GameOver,
    /// Every brick destroyed; waits for a restart
    Win,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Playing => "Playing",
            GamePhase::GameOver => "GameOver",
            GamePhase::Win => "Win",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Things that happened during a tick, for render/audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the left, right or top wall
    WallBounce,
    /// Ball bounced off the paddle at the given normalized offset (-1..1)
    PaddleHit { offset: f32 },
    /// Brick damaged but still standing
    BrickHit { index: usize, hp: u8 },
    /// Brick destroyed, score awarded
    BrickDestroyed { index: usize, points: u64 },
    /// Ball fell past the bottom; `lives` is what remains
    LifeLost { lives: u8 },
    GameOver { score: u64 },
    Win { score: u64 },
    Restarted { round: u32 },
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Horizontal movement per tick while a direction is held
    pub speed: f32,
}

impl Paddle {
    /// Paddle centered horizontally, `bottom_offset` above the field bottom
    pub fn centered(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(
                (settings.field_width - settings.paddle_width) / 2.0,
                settings.paddle_top(),
            ),
            width: settings.paddle_width,
            height: settings.paddle_height,
            speed: settings.paddle_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    /// Largest legal x for the paddle's left edge
    #[inline]
    pub fn max_x(&self, field_width: f32) -> f32 {
        field_width - self.width
    }

    /// Shift by `dx` and clamp into the field
    pub fn move_by(&mut self, dx: f32, field_width: f32) {
        self.pos.x = clamp(self.pos.x + dx, 0.0, self.max_x(field_width));
    }

    /// Put the paddle's center at `x`, clamped into the field.
    /// Non-finite input is ignored.
    pub fn center_on(&mut self, x: f32, field_width: f32) {
        if !x.is_finite() {
            log::trace!("Ignoring non-finite pointer x");
            return;
        }
        self.pos.x = clamp(x - self.width / 2.0, 0.0, self.max_x(field_width));
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
    /// Ramp-up applied on every paddle hit
    pub speed_inc: f32,
}

impl Ball {
    /// Ball for a fresh session: centered, dropped a little below the middle
    pub fn spawn(settings: &Settings) -> Self {
        let (vx, vy) = settings.ball_initial_vel;
        Self {
            pos: Vec2::new(
                settings.field_width / 2.0,
                settings.field_height / 2.0 + settings.ball_spawn_drop,
            ),
            vel: Vec2::new(vx, vy),
            radius: settings.ball_radius,
            speed_inc: settings.ball_speed_inc,
        }
    }

    /// Reposition above the paddle center and send it upward with the given
    /// horizontal direction. Keeps radius and ramp-up.
    pub fn serve(&mut self, paddle: &Paddle, settings: &Settings, dir: f32) {
        self.pos = Vec2::new(paddle.center_x(), paddle.pos.y - settings.serve_height);
        self.vel = Vec2::new(settings.serve_speed * dir, -settings.serve_speed);
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Apply the optional speed ceiling, preserving direction
    pub fn limit_speed(&mut self, max_speed: Option<f32>) {
        if let Some(max) = max_speed {
            self.vel = self.vel.clamp_length_max(max);
        }
    }
}

/// A single destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Row index counted from the bottom row (0) upward
    pub row: u32,
    pub col: u32,
    pub hp: u8,
    pub destroyed: bool,
}

impl Brick {
    /// Take one hit. Returns true if this hit destroyed the brick.
    pub fn hit(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.destroyed = true;
        }
        self.destroyed
    }
}

/// Bricks of one level in stable iteration order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    pub cols: u32,
    pub rows: u32,
    pub bricks: Vec<Brick>,
}

impl BrickGrid {
    /// True once every brick is destroyed
    pub fn is_cleared(&self) -> bool {
        self.bricks.iter().all(|b| b.destroyed)
    }

    pub fn remaining(&self) -> usize {
        self.bricks.iter().filter(|b| !b.destroyed).count()
    }

    pub fn live(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().filter(|b| !b.destroyed)
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }
}

/// Complete state of one playthrough (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Validated settings this session was built from
    pub settings: Settings,
    /// Seed for reproducibility
    pub seed: u64,
    /// Serve-direction RNG
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub grid: BrickGrid,
    pub score: u64,
    pub lives: u8,
    /// Round number (1-based), advanced by a progress-keeping restart
    pub round: u32,
    /// Simulation tick counter for the current round
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a fresh session, failing fast on settings that would produce a
    /// degenerate game
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;

        let grid = generate_grid(&settings);
        let session = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            paddle: Paddle::centered(&settings),
            ball: Ball::spawn(&settings),
            grid,
            score: 0,
            lives: settings.starting_lives,
            round: 1,
            time_ticks: 0,
            events: Vec::new(),
            settings,
        };
        log::info!(
            "New session: seed={} field={}x{} bricks={}",
            seed,
            session.settings.field_width,
            session.settings.field_height,
            session.grid.len()
        );
        Ok(session)
    }

    /// Whether the ball is live (false in either terminal phase)
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Reset score, lives, round, grid, paddle and ball. Keeps the RNG stream
    /// going so consecutive games differ.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.settings.starting_lives;
        self.round = 1;
        self.start_round();
    }

    /// Fresh grid, paddle and ball; score and lives untouched
    pub fn start_round(&mut self) {
        self.grid = generate_grid(&self.settings);
        self.paddle = Paddle::centered(&self.settings);
        self.ball = Ball::spawn(&self.settings);
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }

    /// Re-serve the ball above the paddle with a random horizontal direction
    pub fn serve_ball(&mut self) {
        let dir = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.serve(&self.paddle, &self.settings, dir);
    }
}
