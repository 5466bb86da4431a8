//! Brick Breaker - a deterministic ball-and-paddle arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `settings`: Data-driven game balance and field layout

pub mod settings;
pub mod sim;

pub use settings::{ConfigError, RestartPolicy, Settings};
pub use sim::{GameEvent, GamePhase, GameSession, Snapshot, TickInput, restart, tick};

/// Host loop constants
pub mod consts {
    /// Fixed simulation timestep (velocities are expressed in units per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike `f32::clamp` this never panics, and a NaN `v` collapses onto a
/// bound instead of propagating.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}

/// Sign of `v` as -1, 0 or 1 (zero stays zero, unlike `f32::signum`)
#[inline]
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(4.5, 0.0, 10.0), 4.5);
    }

    #[test]
    fn test_clamp_nan_stays_in_range() {
        let v = clamp(f32::NAN, 0.0, 10.0);
        assert!((0.0..=10.0).contains(&v));
    }

    #[test]
    fn test_sign_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.2), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }
}
