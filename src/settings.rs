//! Game settings and balance
//!
//! Every tunable constant of the field, paddle, ball and brick grid lives
//! here. Loaded from JSON; validated before a session may be built from it.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value that would produce a degenerate session
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// What a restart does after the grid has been cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RestartPolicy {
    /// Score, lives and round all start over
    #[default]
    FullReset,
    /// Next round: fresh grid, score and lives carried over
    KeepProgress,
}

impl RestartPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestartPolicy::FullReset => "FullReset",
            RestartPolicy::KeepProgress => "KeepProgress",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "full" | "fullreset" | "full_reset" => Some(RestartPolicy::FullReset),
            "keep" | "keepprogress" | "keep_progress" => Some(RestartPolicy::KeepProgress),
            _ => None,
        }
    }
}

/// Game settings (all distances in field units, velocities in units/tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance from the bottom of the field to the paddle's top edge
    pub paddle_bottom_offset: f32,
    /// Horizontal movement per tick while a direction is held
    pub paddle_speed: f32,
    /// Maximum horizontal speed imparted by an edge hit
    pub max_deflection: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Launch velocity of a fresh session
    pub ball_initial_vel: (f32, f32),
    /// Spawn offset below the field centre for a fresh session
    pub ball_spawn_drop: f32,
    /// Added on every paddle hit (horizontal and vertical)
    pub ball_speed_inc: f32,
    /// Speed magnitude per axis when re-served after a lost life
    pub serve_speed: f32,
    /// Height above the paddle's top edge where the ball is re-served
    pub serve_height: f32,
    /// Optional ceiling on ball speed (None = uncapped ramp-up)
    pub max_ball_speed: Option<f32>,

    // === Bricks ===
    pub brick_cols: u32,
    pub brick_rows: u32,
    pub brick_width: f32,
    pub brick_height: f32,
    pub brick_gap: f32,
    pub grid_offset_x: f32,
    pub grid_offset_y: f32,
    /// Rows per extra hit point, counted upward from the bottom row
    pub rows_per_hp: u32,
    pub points_per_brick: u64,

    // === Progression ===
    pub starting_lives: u8,
    pub win_restart: RestartPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,

            paddle_width: 120.0,
            paddle_height: 12.0,
            paddle_bottom_offset: 40.0,
            paddle_speed: 9.0,
            max_deflection: 6.0,

            ball_radius: 8.0,
            ball_initial_vel: (4.0, -4.0),
            ball_spawn_drop: 60.0,
            ball_speed_inc: 0.08,
            serve_speed: 4.0,
            serve_height: 20.0,
            max_ball_speed: None,

            brick_cols: 10,
            brick_rows: 6,
            brick_width: 70.0,
            brick_height: 22.0,
            brick_gap: 6.0,
            grid_offset_x: 15.0,
            grid_offset_y: 70.0,
            rows_per_hp: 2,
            points_per_brick: 10,

            starting_lives: 3,
            win_restart: RestartPolicy::FullReset,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing keys take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Total number of bricks in a generated grid
    pub fn brick_count(&self) -> usize {
        self.brick_cols as usize * self.brick_rows as usize
    }

    /// Y coordinate of the paddle's top edge
    pub fn paddle_top(&self) -> f32 {
        self.field_height - self.paddle_bottom_offset
    }

    /// Reject any configuration that cannot produce a sound session
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("ball_radius", self.ball_radius)?;
        positive("serve_speed", self.serve_speed)?;
        non_negative("paddle_speed", self.paddle_speed)?;
        non_negative("max_deflection", self.max_deflection)?;
        non_negative("ball_speed_inc", self.ball_speed_inc)?;
        non_negative("ball_spawn_drop", self.ball_spawn_drop)?;
        non_negative("serve_height", self.serve_height)?;
        non_negative("brick_gap", self.brick_gap)?;
        non_negative("grid_offset_x", self.grid_offset_x)?;
        non_negative("grid_offset_y", self.grid_offset_y)?;
        positive("brick_width", self.brick_width)?;
        positive("brick_height", self.brick_height)?;

        let (vx, vy) = self.ball_initial_vel;
        if !vx.is_finite() || !vy.is_finite() {
            return Err(ConfigError::invalid("ball_initial_vel", "must be finite"));
        }
        if vy == 0.0 {
            return Err(ConfigError::invalid(
                "ball_initial_vel",
                "vertical component must be non-zero",
            ));
        }
        if let Some(max) = self.max_ball_speed {
            positive("max_ball_speed", max)?;
        }

        if self.paddle_width > self.field_width {
            return Err(ConfigError::invalid(
                "paddle_width",
                format!("{} exceeds field width {}", self.paddle_width, self.field_width),
            ));
        }
        if self.paddle_bottom_offset <= 0.0 || self.paddle_bottom_offset >= self.field_height {
            return Err(ConfigError::invalid(
                "paddle_bottom_offset",
                "paddle must sit inside the field",
            ));
        }
        if self.ball_radius * 2.0 >= self.field_width.min(self.field_height) {
            return Err(ConfigError::invalid("ball_radius", "ball does not fit the field"));
        }
        if self.paddle_bottom_offset < self.paddle_height {
            return Err(ConfigError::invalid(
                "paddle_bottom_offset",
                format!("paddle of height {} pokes out of the field", self.paddle_height),
            ));
        }
        let spawn_bottom = self.field_height / 2.0 + self.ball_spawn_drop + self.ball_radius;
        if spawn_bottom >= self.paddle_top() {
            return Err(ConfigError::invalid(
                "ball_spawn_drop",
                format!("ball spawns at or below the paddle (bottom edge {})", spawn_bottom),
            ));
        }
        if self.paddle_top() - self.serve_height - self.ball_radius < 0.0 {
            return Err(ConfigError::invalid(
                "serve_height",
                "ball would be served above the top wall",
            ));
        }

        if self.brick_cols == 0 || self.brick_rows == 0 {
            return Err(ConfigError::invalid("brick_cols", "grid must contain bricks"));
        }
        if self.rows_per_hp == 0 {
            return Err(ConfigError::invalid("rows_per_hp", "must be at least 1"));
        }
        let grid_right = self.grid_offset_x
            + self.brick_cols as f32 * (self.brick_width + self.brick_gap)
            - self.brick_gap;
        if grid_right > self.field_width {
            return Err(ConfigError::invalid(
                "brick_cols",
                format!("grid right edge {} exceeds field width", grid_right),
            ));
        }
        let grid_bottom = self.grid_offset_y
            + self.brick_rows as f32 * (self.brick_height + self.brick_gap)
            - self.brick_gap;
        if grid_bottom >= self.paddle_top() {
            return Err(ConfigError::invalid(
                "brick_rows",
                format!("grid bottom {} reaches the paddle", grid_bottom),
            ));
        }
        let top_hp = 1 + (self.brick_rows - 1) / self.rows_per_hp;
        if top_hp > u8::MAX as u32 {
            return Err(ConfigError::invalid("brick_rows", "hit points overflow"));
        }

        if self.starting_lives == 0 {
            return Err(ConfigError::invalid("starting_lives", "must be at least 1"));
        }

        Ok(())
    }
}

fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {}", v)))
    }
}

fn non_negative(field: &'static str, v: f32) -> Result<(), ConfigError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be non-negative, got {}", v)))
    }
}
